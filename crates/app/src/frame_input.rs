//! Mouse and keyboard input collection for one rendered frame.

use app::app_loop::PointerFrame;
use macroquad::prelude::{
    KeyCode, MouseButton, is_key_down, is_key_pressed, is_mouse_button_down,
    is_mouse_button_pressed, is_mouse_button_released, mouse_position,
};
use possession_core::grid::Point;

#[derive(Default)]
pub struct FrameInput {
    pub pointer: PointerFrame,
    pub save_trace: bool,
    pub quit: bool,
}

// Touch screens arrive here too; macroquad mirrors the first touch as the left mouse button.
pub fn capture_frame_input() -> FrameInput {
    let (x, y) = mouse_position();
    let pointer = PointerFrame {
        position: Point::new(x, y),
        pressed: is_mouse_button_pressed(MouseButton::Left),
        down: is_mouse_button_down(MouseButton::Left),
        released: is_mouse_button_released(MouseButton::Left),
    };

    let ctrl_down = is_key_down(KeyCode::LeftControl) || is_key_down(KeyCode::RightControl);
    FrameInput {
        pointer,
        save_trace: ctrl_down && is_key_pressed(KeyCode::S),
        quit: is_key_pressed(KeyCode::Escape),
    }
}
