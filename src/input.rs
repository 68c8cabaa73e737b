use crate::math::ScreenPoint;

/// Pointer events in drawing-area pixels, with y growing downwards.
pub trait InputHandler {
    fn touch_start(&mut self, point: ScreenPoint);
    fn drag(&mut self, point: ScreenPoint);
    fn release(&mut self);
}
