//! Typed entry of one Julia constant component.

use fractals_engine::input::Key;
use fractals_view::{JuliaAxis, ViewError, ViewportState};

#[derive(Debug, Clone, PartialEq)]
pub enum EntryOutcome {
    Pending,
    Committed(f64),
    Rejected(ViewError),
    Cancelled,
}

/// Number being typed for `julia_c.x` (Re) or `julia_c.y` (Im).
///
/// Accepts digits, `-` and `.`; Enter commits, Escape cancels.
#[derive(Debug, Clone)]
pub struct JuliaEntry {
    axis: JuliaAxis,
    buffer: String,
}

impl JuliaEntry {
    pub fn new(axis: JuliaAxis) -> Self {
        Self { axis, buffer: String::new() }
    }

    pub fn axis(&self) -> JuliaAxis {
        self.axis
    }

    pub fn prompt(&self) -> String {
        let part = match self.axis {
            JuliaAxis::Re => "Re",
            JuliaAxis::Im => "Im",
        };
        format!("Julia {part} = {}_", self.buffer)
    }

    pub fn handle_key(&mut self, key: Key, state: &mut ViewportState) -> EntryOutcome {
        match key {
            Key::Enter => match state.set_julia_component(self.axis, &self.buffer) {
                Ok(v) => EntryOutcome::Committed(v),
                Err(err) => EntryOutcome::Rejected(err),
            },
            Key::Escape => EntryOutcome::Cancelled,
            Key::Backspace => {
                self.buffer.pop();
                EntryOutcome::Pending
            }
            other => {
                if let Some(c) = key_char(other) {
                    self.buffer.push(c);
                }
                EntryOutcome::Pending
            }
        }
    }
}

fn key_char(key: Key) -> Option<char> {
    let c = match key {
        Key::Digit0 => '0',
        Key::Digit1 => '1',
        Key::Digit2 => '2',
        Key::Digit3 => '3',
        Key::Digit4 => '4',
        Key::Digit5 => '5',
        Key::Digit6 => '6',
        Key::Digit7 => '7',
        Key::Digit8 => '8',
        Key::Digit9 => '9',
        Key::Minus | Key::NumpadSubtract => '-',
        Key::Period | Key::NumpadDecimal => '.',
        _ => return None,
    };
    Some(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_keys(entry: &mut JuliaEntry, state: &mut ViewportState, keys: &[Key]) -> EntryOutcome {
        let mut last = EntryOutcome::Pending;
        for &k in keys {
            last = entry.handle_key(k, state);
        }
        last
    }

    #[test]
    fn typed_number_commits_to_the_chosen_axis() {
        let mut state = ViewportState::default();
        let mut entry = JuliaEntry::new(JuliaAxis::Im);
        let keys = [Key::Minus, Key::Digit0, Key::Period, Key::Digit5, Key::W, Key::Enter];
        assert_eq!(type_keys(&mut entry, &mut state, &keys), EntryOutcome::Committed(-0.5));
        assert_eq!(state.julia_c.y, -0.5);
        assert_eq!(state.julia_c.x, 0.0);
    }

    #[test]
    fn backspace_edits_the_buffer() {
        let mut state = ViewportState::default();
        let mut entry = JuliaEntry::new(JuliaAxis::Re);
        type_keys(&mut entry, &mut state, &[Key::Digit1, Key::Digit2, Key::Backspace]);
        assert_eq!(entry.prompt(), "Julia Re = 1_");
    }

    #[test]
    fn malformed_input_leaves_state_alone() {
        let mut state = ViewportState::default();
        let before = state;
        let mut entry = JuliaEntry::new(JuliaAxis::Re);
        let out = type_keys(&mut entry, &mut state, &[Key::Minus, Key::Minus, Key::Enter]);
        assert!(matches!(out, EntryOutcome::Rejected(ViewError::InvalidNumber { .. })));
        assert_eq!(state, before);

        let mut entry = JuliaEntry::new(JuliaAxis::Re);
        assert_eq!(type_keys(&mut entry, &mut state, &[Key::Digit1, Key::Escape]), EntryOutcome::Cancelled);
        assert_eq!(state, before);
    }
}
