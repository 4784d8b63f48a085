use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{InputEvent, Key, KeyState, Modifiers, PointerMoveEvent};

/// Current input state for a single window.
///
/// Holds "is down" information and current pointer position.
/// Per-frame transitions are recorded into an `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    /// Current modifier state.
    pub modifiers: Modifiers,

    /// Whether the window is focused.
    pub focused: bool,

    /// Pointer position in physical pixels.
    pub pointer_pos: Option<(f64, f64)>,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state and writes deltas to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => {
                self.modifiers = *m;
            }

            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Keys released while unfocused never reach us.
                    self.keys_down.clear();
                    self.modifiers = Modifiers::default();
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                self.pointer_pos = Some((*x, *y));
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::Key {
                key,
                state,
                modifiers,
                ..
            } => {
                self.modifiers = *modifiers;

                match state {
                    KeyState::Pressed => {
                        if self.keys_down.insert(*key) {
                            frame.keys_pressed.insert(*key);
                        }
                    }
                    KeyState::Released => {
                        if self.keys_down.remove(key) {
                            frame.keys_released.insert(*key);
                        }
                    }
                }
            }

            InputEvent::MouseWheel { delta, modifiers } => {
                self.modifiers = *modifiers;
                frame.wheel_lines += delta.lines_y();
            }

            InputEvent::Resized { width, height } => {
                frame.resized = Some((*width, *height));
            }
        }

        frame.push_event(ev);
    }

    /// Helper queries
    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn any_down(&self, keys: &[Key]) -> bool {
        keys.iter().any(|k| self.keys_down.contains(k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MouseWheelDelta;

    fn key(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key {
            key,
            state,
            modifiers: Modifiers::default(),
            code: 0,
            repeat: false,
        }
    }

    #[test]
    fn press_is_recorded_once_while_held() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();

        st.apply_event(&mut fr, key(Key::W, KeyState::Pressed));
        assert!(st.key_down(Key::W));
        assert!(fr.key_pressed(Key::W));

        fr.clear();
        // OS key-repeat delivers another press; it is not a new transition.
        st.apply_event(&mut fr, key(Key::W, KeyState::Pressed));
        assert!(!fr.key_pressed(Key::W));

        st.apply_event(&mut fr, key(Key::W, KeyState::Released));
        assert!(!st.key_down(Key::W));
        assert!(fr.key_released(Key::W));
    }

    #[test]
    fn focus_loss_clears_held_keys() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        st.apply_event(&mut fr, key(Key::A, KeyState::Pressed));
        st.apply_event(&mut fr, InputEvent::Focused(false));
        assert!(st.keys_down.is_empty());
        assert!(!st.focused);
    }

    #[test]
    fn wheel_accumulates_lines_within_frame() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        let wheel = |delta| InputEvent::MouseWheel { delta, modifiers: Modifiers::default() };

        st.apply_event(&mut fr, wheel(MouseWheelDelta::Line { x: 0.0, y: 1.0 }));
        st.apply_event(&mut fr, wheel(MouseWheelDelta::Line { x: 0.0, y: 2.0 }));
        st.apply_event(&mut fr, wheel(MouseWheelDelta::Pixel { x: 0.0, y: -40.0 }));
        assert_eq!(fr.wheel_lines, 2.0);

        fr.clear();
        assert_eq!(fr.wheel_lines, 0.0);
    }

    #[test]
    fn resize_keeps_latest_size() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        st.apply_event(&mut fr, InputEvent::Resized { width: 800, height: 600 });
        st.apply_event(&mut fr, InputEvent::Resized { width: 1024, height: 768 });
        assert_eq!(fr.resized, Some((1024, 768)));
        assert_eq!(fr.events.len(), 2);
    }

    #[test]
    fn pointer_tracks_and_leaves() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        st.apply_event(&mut fr, InputEvent::PointerMoved(PointerMoveEvent { x: 3.5, y: 7.0 }));
        assert_eq!(st.pointer_pos, Some((3.5, 7.0)));
        st.apply_event(&mut fr, InputEvent::PointerLeft);
        assert_eq!(st.pointer_pos, None);
    }
}
