//! Canvas widget that paints the puzzle and turns pointer input into messages.

use iced::widget::canvas::{self, Frame, Geometry, Path, Stroke};
use iced::widget::canvas::event::{self, Event};
use iced::{Color, Point, Rectangle, Size, Theme, mouse, touch};
use rubikcube::ScreenPoint;
use rubikcube::face::COLOR_COUNT;
use rubikcube::renderer::{self as engine, DrawnFace, FaceList};

use crate::Message;

/// Sticker colors by palette index; the last entry paints the puzzle's inside.
const PALETTE: [Color; COLOR_COUNT as usize + 1] = [
    Color::from_rgb(1.0, 0.835, 0.0),     // yellow
    Color::from_rgb(0.769, 0.118, 0.227), // red
    Color::from_rgb(0.0, 0.62, 0.376),    // green
    Color::from_rgb(1.0, 0.345, 0.0),     // orange
    Color::from_rgb(0.0, 0.318, 0.729),   // blue
    Color::WHITE,
    Color::BLACK,
];

const BACKGROUND: Color = Color::from_rgb(0.93, 0.93, 0.93);
const EDGE: Color = Color::from_rgb(0.1, 0.1, 0.1);

/// Pointer tracking kept by the widget between events
#[derive(Debug, Default)]
pub(crate) struct PointerState {
    pressed: bool,
}

/// The puzzle viewport: replays the controller's latest face list.
pub(crate) struct CubeCanvas<'a> {
    faces: &'a FaceList,
}

impl<'a> CubeCanvas<'a> {
    pub(crate) fn new(faces: &'a FaceList) -> Self {
        Self { faces }
    }
}

impl canvas::Program<Message> for CubeCanvas<'_> {
    type State = PointerState;

    fn update(
        &self,
        state: &mut Self::State,
        event: Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> (event::Status, Option<Message>) {
        match event {
            Event::Mouse(mouse_event) => handle_mouse_event(state, mouse_event, bounds, cursor),
            Event::Touch(touch_event) => handle_touch_event(state, touch_event, bounds),
            _ => (event::Status::Ignored, None),
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        self.faces.replay(&mut FramePainter { frame: &mut frame });
        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if state.pressed {
            mouse::Interaction::Grabbing
        } else if cursor.is_over(bounds) {
            mouse::Interaction::Grab
        } else {
            mouse::Interaction::default()
        }
    }
}

fn handle_mouse_event(
    state: &mut PointerState,
    mouse_event: mouse::Event,
    bounds: Rectangle,
    cursor: mouse::Cursor,
) -> (event::Status, Option<Message>) {
    match mouse_event {
        mouse::Event::ButtonPressed(mouse::Button::Left) => {
            if let Some(position) = cursor.position_in(bounds) {
                state.pressed = true;
                return (
                    event::Status::Captured,
                    Some(Message::TouchStart(to_screen(position))),
                );
            }
        }
        mouse::Event::CursorMoved { .. } if state.pressed => {
            // Drags may leave the canvas; positions stay relative to it
            if let Some(position) = cursor.position_from(bounds.position()) {
                return (
                    event::Status::Captured,
                    Some(Message::Drag(to_screen(position))),
                );
            }
        }
        mouse::Event::ButtonReleased(mouse::Button::Left) if state.pressed => {
            state.pressed = false;
            return (event::Status::Captured, Some(Message::Release));
        }
        _ => {}
    }

    (event::Status::Ignored, None)
}

fn handle_touch_event(
    state: &mut PointerState,
    touch_event: touch::Event,
    bounds: Rectangle,
) -> (event::Status, Option<Message>) {
    let relative = |position: Point| to_screen(Point::ORIGIN + (position - bounds.position()));
    match touch_event {
        touch::Event::FingerPressed { position, .. } if bounds.contains(position) => {
            state.pressed = true;
            (
                event::Status::Captured,
                Some(Message::TouchStart(relative(position))),
            )
        }
        touch::Event::FingerMoved { position, .. } if state.pressed => (
            event::Status::Captured,
            Some(Message::Drag(relative(position))),
        ),
        touch::Event::FingerLifted { .. } | touch::Event::FingerLost { .. } if state.pressed => {
            state.pressed = false;
            (event::Status::Captured, Some(Message::Release))
        }
        _ => (event::Status::Ignored, None),
    }
}

fn to_screen(position: Point) -> ScreenPoint {
    ScreenPoint::new(f64::from(position.x), f64::from(position.y))
}

/// Adapts an iced [`Frame`] to the engine's face sequence.
struct FramePainter<'a> {
    frame: &'a mut Frame,
}

impl engine::Renderer for FramePainter<'_> {
    fn clear(&mut self, screen_size: f64) {
        let side = screen_size as f32;
        self.frame
            .fill_rectangle(Point::ORIGIN, Size::new(side, side), BACKGROUND);
    }

    fn fill_quad(&mut self, face: &DrawnFace) {
        let [first, rest @ ..] = face.points.map(|p| Point::new(p.x as f32, p.y as f32));
        let path = Path::new(|builder| {
            builder.move_to(first);
            for point in rest {
                builder.line_to(point);
            }
            builder.close();
        });
        let color = PALETTE
            .get(usize::from(face.color))
            .copied()
            .unwrap_or(Color::BLACK);
        self.frame.fill(&path, color);
        self.frame
            .stroke(&path, Stroke::default().with_color(EDGE).with_width(1.0));
    }
}
