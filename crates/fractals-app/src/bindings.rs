//! Keyboard and mouse bindings.

use fractals_engine::input::{InputFrame, InputState, Key};
use fractals_view::{DVec2, FrameInput};

pub const TOGGLE_MODE: Key = Key::Space;
pub const TOGGLE_COLOR: Key = Key::G;
pub const RESET_CAMERA: Key = Key::F;
pub const RELOAD_SHADER: Key = Key::R;
pub const TOGGLE_INFO: Key = Key::Q;
pub const FULLSCREEN: Key = Key::F11;
pub const QUIT: Key = Key::Escape;
pub const ENTER_JULIA_RE: Key = Key::J;
pub const ENTER_JULIA_IM: Key = Key::K;

const ZOOM_SPEED_UP: [Key; 2] = [Key::NumpadAdd, Key::Equal];
const ZOOM_SPEED_DOWN: [Key; 2] = [Key::NumpadSubtract, Key::Minus];

/// `+1` if only `pos` is held, `-1` if only `neg`, else `0`.
fn axis(input: &InputState, pos: &[Key], neg: &[Key]) -> f64 {
    let mut v = 0.0;
    if input.any_down(pos) {
        v += 1.0;
    }
    if input.any_down(neg) {
        v -= 1.0;
    }
    v
}

/// Summarises this frame's input for the viewport controls.
pub fn frame_input(input: &InputState, frame: &InputFrame) -> FrameInput {
    FrameInput {
        pan: DVec2::new(axis(input, &[Key::D], &[Key::A]), axis(input, &[Key::W], &[Key::S])),
        scroll: frame.wheel_lines,
        cursor: input.pointer_pos.map(DVec2::from),
        toggle_mode: frame.key_pressed(TOGGLE_MODE),
        toggle_color: frame.key_pressed(TOGGLE_COLOR),
        reset_camera: frame.key_pressed(RESET_CAMERA),
        zoom_speed_step: axis(input, &ZOOM_SPEED_UP, &ZOOM_SPEED_DOWN),
        julia_nudge: DVec2::new(
            axis(input, &[Key::Digit1], &[Key::Digit2]),
            axis(input, &[Key::Digit3], &[Key::Digit4]),
        ),
        slow: input.modifiers.shift || input.key_down(Key::Shift),
    }
}

/// Mouse-only input, used while the keyboard is captured by text entry.
pub fn pointer_input(input: &InputState, frame: &InputFrame) -> FrameInput {
    FrameInput {
        scroll: frame.wheel_lines,
        cursor: input.pointer_pos.map(DVec2::from),
        ..FrameInput::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fractals_engine::input::{InputEvent, KeyState, Modifiers, MouseWheelDelta, PointerMoveEvent};

    fn press(st: &mut InputState, fr: &mut InputFrame, key: Key) {
        st.apply_event(
            fr,
            InputEvent::Key {
                key,
                state: KeyState::Pressed,
                modifiers: st.modifiers,
                code: 0,
                repeat: false,
            },
        );
    }

    #[test]
    fn held_keys_map_to_directions() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        for key in [Key::W, Key::D, Key::Digit2, Key::Digit3, Key::NumpadAdd] {
            press(&mut st, &mut fr, key);
        }

        let input = frame_input(&st, &fr);
        assert_eq!(input.pan, DVec2::new(1.0, 1.0));
        assert_eq!(input.julia_nudge, DVec2::new(-1.0, 1.0));
        assert_eq!(input.zoom_speed_step, 1.0);
        assert!(!input.slow);
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        press(&mut st, &mut fr, Key::A);
        press(&mut st, &mut fr, Key::D);
        press(&mut st, &mut fr, Key::Equal);
        press(&mut st, &mut fr, Key::NumpadSubtract);
        let input = frame_input(&st, &fr);
        assert_eq!(input.pan.x, 0.0);
        assert_eq!(input.zoom_speed_step, 0.0);
    }

    #[test]
    fn toggles_fire_only_on_the_press_frame() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        press(&mut st, &mut fr, TOGGLE_MODE);
        assert!(frame_input(&st, &fr).toggle_mode);

        fr.clear();
        assert!(!frame_input(&st, &fr).toggle_mode);
    }

    #[test]
    fn wheel_cursor_and_shift_pass_through() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        st.apply_event(&mut fr, InputEvent::PointerMoved(PointerMoveEvent { x: 12.0, y: 34.0 }));
        st.apply_event(
            &mut fr,
            InputEvent::ModifiersChanged(Modifiers { shift: true, ..Modifiers::default() }),
        );
        st.apply_event(
            &mut fr,
            InputEvent::MouseWheel {
                delta: MouseWheelDelta::Line { x: 0.0, y: -2.0 },
                modifiers: st.modifiers,
            },
        );

        let input = frame_input(&st, &fr);
        assert_eq!(input.cursor, Some(DVec2::new(12.0, 34.0)));
        assert_eq!(input.scroll, -2.0);
        assert!(input.slow);

        press(&mut st, &mut fr, Key::W);
        let pointer = pointer_input(&st, &fr);
        assert_eq!(pointer.pan, DVec2::zero());
        assert_eq!(pointer.scroll, -2.0);
    }
}
