use crate::state::{ColorMode, FractalMode, ViewportState};

/// Key bindings, one line per binding.
pub const CONTROLS: [&str; 15] = [
    "1 - Inc julia Re part",
    "2 - Dec julia Re part",
    "3 - Inc julia Im part",
    "4 - Dec julia Im part",
    "SPACE - Switch between modes",
    "G - Switch color modes",
    "WASD - Move",
    "SCROLL - Zoom",
    "+- - Inc/Dec zoom speed",
    "LSHIFT - Slow down zoom/inc/dec",
    "R - Reload shader",
    "F - Reset camera",
    "J/K - Type julia Re/Im, ENTER to set",
    "Q - Toggle info",
    "F11 - Toggle fullscreen",
];

/// One-line summary of the viewport.
pub fn status_line(state: &ViewportState) -> String {
    let mode = match state.mode {
        FractalMode::Mandelbrot => "Mandelbrot".to_string(),
        FractalMode::Julia => format!("Julia c = {:.6} {:+.6}i", state.julia_c.x, state.julia_c.y),
    };
    let colors = match state.color_mode {
        ColorMode::Scheme0 => 0,
        ColorMode::Scheme1 => 1,
    };
    format!(
        "Zoom level: {:.6} | speed {:.2} | {mode} | colors {colors}",
        state.zoom, state.zoom_speed
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec2::DVec2;

    #[test]
    fn status_shows_zoom_and_mode() {
        let s = ViewportState {
            zoom: 1.05,
            julia_c: DVec2::new(-0.8, 0.156),
            ..ViewportState::default()
        };
        let line = status_line(&s);
        assert!(line.starts_with("Zoom level: 1.050000"));
        assert!(line.contains("Julia c = -0.800000 +0.156000i"));
        assert!(line.ends_with("colors 0"));
    }

    #[test]
    fn mandelbrot_hides_julia_constant() {
        let s = ViewportState { mode: FractalMode::Mandelbrot, ..ViewportState::default() };
        let line = status_line(&s);
        assert!(line.contains("Mandelbrot"));
        assert!(!line.contains("Julia"));
    }
}
