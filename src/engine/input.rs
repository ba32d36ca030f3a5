// Pointer and key tracking for the viewer.
// Turns raw winit events into press / drag / release / key events, with
// positions in logical points measured from the window centre.

use glam::Vec2;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown(Vec2),
    /// Movement since the previous pointer position while the button is held.
    PointerDrag(Vec2),
    PointerUp,
    Key(KeyCode),
}

pub struct InputState {
    // Mouse, in logical points from the top-left corner
    pub mouse_position: Vec2,
    pressed: bool,

    // Window, in logical points
    pub window_size: Vec2,
    scale_factor: f32,
}

impl InputState {
    pub fn new(window_size: Vec2, scale_factor: f32) -> Self {
        Self {
            mouse_position: Vec2::ZERO,
            pressed: false,
            window_size,
            scale_factor,
        }
    }

    /// Feed a winit WindowEvent into the input state.
    /// Returns the viewer-level event it amounts to, if any.
    pub fn process_event(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::KeyboardInput { event, .. } => match (event.physical_key, event.state) {
                (PhysicalKey::Code(key), ElementState::Pressed) => Some(InputEvent::Key(key)),
                _ => None,
            },
            WindowEvent::CursorMoved { position, .. } => {
                self.move_to(Vec2::new(position.x as f32, position.y as f32) / self.scale_factor)
            }
            WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => match state {
                ElementState::Pressed => self.press(),
                ElementState::Released => self.release(),
            },
            // Leaving the window ends any drag.
            WindowEvent::CursorLeft { .. } => self.release(),
            WindowEvent::Resized(size) => {
                self.window_size = Vec2::new(size.width as f32, size.height as f32) / self.scale_factor;
                None
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                let physical = self.window_size * self.scale_factor;
                self.scale_factor = *scale_factor as f32;
                self.window_size = physical / self.scale_factor;
                None
            }
            _ => None,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Pointer position relative to the window centre.
    pub fn centred(&self) -> Vec2 {
        self.mouse_position - self.window_size * 0.5
    }

    fn move_to(&mut self, position: Vec2) -> Option<InputEvent> {
        let delta = position - self.mouse_position;
        self.mouse_position = position;
        (self.pressed && delta != Vec2::ZERO).then_some(InputEvent::PointerDrag(delta))
    }

    fn press(&mut self) -> Option<InputEvent> {
        self.pressed = true;
        Some(InputEvent::PointerDown(self.centred()))
    }

    fn release(&mut self) -> Option<InputEvent> {
        std::mem::replace(&mut self.pressed, false).then_some(InputEvent::PointerUp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_only_while_pressed() {
        let mut input = InputState::new(Vec2::new(800.0, 600.0), 1.0);
        assert_eq!(input.move_to(Vec2::new(410.0, 300.0)), None);

        assert_eq!(input.press(), Some(InputEvent::PointerDown(Vec2::new(10.0, 0.0))));
        assert_eq!(
            input.move_to(Vec2::new(415.0, 298.0)),
            Some(InputEvent::PointerDrag(Vec2::new(5.0, -2.0)))
        );
        assert_eq!(input.move_to(Vec2::new(415.0, 298.0)), None);

        assert_eq!(input.release(), Some(InputEvent::PointerUp));
        assert_eq!(input.release(), None);
        assert!(!input.is_pressed());
        assert_eq!(input.move_to(Vec2::new(420.0, 298.0)), None);
    }
}
