//! Interactive twisty cube application with iced UI.
//!
//! The puzzle is drawn on a 2D canvas by the engine's painter's algorithm.
//! Drag a sticker to turn a layer; drag beside the puzzle to look around.

use std::time::Instant;

use iced::widget::{Canvas, Column, PickList, Row, button, text};
use iced::{Element, Length, Settings, Size, Subscription, Task, window};
use rubikcube::{EngineConfig, InputHandler, PuzzleController, ScreenPoint};

mod canvas_widget;

use canvas_widget::CubeCanvas;

const TITLE: &str = "Rubik's Cube";
const COLUMN_CHOICES: [usize; 7] = [1, 2, 3, 4, 5, 6, 7];
const CONTROLS_WIDTH: f32 = 200.0;
const PADDING: f32 = 10.0;
const MIN_SCREEN_SIZE: f32 = 100.0;

/// Main application state
pub(crate) struct CubeApp {
    controller: PuzzleController,
    fps: Option<f64>,
    solved: bool,
}

/// Messages that the application can receive
#[derive(Debug, Clone)]
pub(crate) enum Message {
    Columns(usize),
    Shuffle,
    Reset,
    Frame(Instant),
    TouchStart(ScreenPoint),
    Drag(ScreenPoint),
    Release,
    Resized(Size),
}

impl CubeApp {
    pub(crate) fn new(config: EngineConfig) -> rubikcube::Result<Self> {
        Ok(Self {
            controller: PuzzleController::new(config)?,
            fps: None,
            solved: false,
        })
    }

    pub(crate) fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Columns(columns) => {
                if let Err(err) = self.controller.set_columns(columns) {
                    log::warn!("{err}");
                }
                self.solved = false;
            }
            Message::Shuffle => {
                self.controller.shuffle();
                self.solved = false;
            }
            Message::Reset => {
                self.controller.reset();
                self.solved = false;
            }
            Message::Frame(now) => {
                if let Some(summary) = self.controller.frame(now).completed {
                    if summary.fps.is_some() {
                        self.fps = summary.fps;
                    }
                    self.solved |= summary.solved;
                }
            }
            Message::TouchStart(point) => self.controller.touch_start(point),
            Message::Drag(point) => self.controller.drag(point),
            Message::Release => self.controller.release(),
            Message::Resized(size) => {
                let side = (size.width - CONTROLS_WIDTH - 3.0 * PADDING)
                    .min(size.height - 2.0 * PADDING)
                    .max(MIN_SCREEN_SIZE)
                    .floor();
                if let Err(err) = self.controller.set_screen_size(f64::from(side)) {
                    log::warn!("{err}");
                }
            }
        }

        Task::none()
    }

    pub(crate) fn view(&self) -> Element<'_, Message> {
        let fps = match self.fps {
            Some(fps) => format!("{fps:.1} fps"),
            None => "-- fps".to_owned(),
        };
        let status = if self.solved {
            "Solved!"
        } else if self.controller.is_playing() {
            "Shuffled"
        } else {
            ""
        };

        let controls = Column::new()
            .spacing(20)
            .push(
                Column::new()
                    .spacing(5)
                    .push(text("Columns"))
                    .push(
                        PickList::new(
                            &COLUMN_CHOICES[..],
                            Some(self.controller.whole_cube().columns()),
                            Message::Columns,
                        )
                        .width(Length::Fill),
                    ),
            )
            .push(
                button("Shuffle")
                    .on_press(Message::Shuffle)
                    .width(Length::Fill),
            )
            .push(button("Reset").on_press(Message::Reset).width(Length::Fill))
            .push(text(fps))
            .push(text(status));

        let side = self.controller.params().screen_size as f32;
        let viewport = Canvas::new(CubeCanvas::new(self.controller.faces()))
            .width(side)
            .height(side);

        Row::new()
            .spacing(PADDING)
            .padding(PADDING)
            .push(
                iced::widget::container(controls)
                    .width(CONTROLS_WIDTH)
                    .height(Length::Fill),
            )
            .push(viewport)
            .into()
    }

    /// Frame ticks only while the controller has work to do
    pub(crate) fn subscription(&self) -> Subscription<Message> {
        let resize = window::resize_events().map(|(_id, size)| Message::Resized(size));
        if self.controller.is_busy() {
            Subscription::batch([resize, window::frames().map(Message::Frame)])
        } else {
            resize
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::builder().format_timestamp(None).init();

    let app = CubeApp::new(EngineConfig {
        initial_yaw: 0.6,
        initial_pitch: 0.45,
        ..EngineConfig::default()
    })?;
    iced::application(TITLE, CubeApp::update, CubeApp::view)
        .subscription(CubeApp::subscription)
        .settings(Settings {
            antialiasing: true,
            ..Settings::default()
        })
        .window_size(Size::new(
            CONTROLS_WIDTH + 3.0 * PADDING + 600.0,
            2.0 * PADDING + 600.0,
        ))
        .run_with(move || (app, Task::none()))?;
    Ok(())
}
