use crate::geometry::ScreenGeometry;
use crate::mapper::screen_to_world;
use crate::state::{ViewportState, ZOOM_MIN};
use crate::vec2::DVec2;

/// Applies one wheel step of cursor-anchored zoom.
///
/// The step is proportional to the current zoom (`zoom / 10`) and scaled by
/// `zoom_speed`, then clamped to [`ZOOM_MIN`]. The pan offset is corrected by
/// the drift of the cursor's world position between the old and new zoom, so
/// the point shown under the cursor stays put.
///
/// The correction is subtracted on x and added on y: the rendering backend's
/// vertical axis points up while screen y points down. Do not "fix" one sign
/// without the other side of the mapping (see [`crate::mapper`]).
///
/// Returns `false`, leaving `state` bit-identical, when `scroll_delta` is zero.
pub fn apply_zoom(
    state: &mut ViewportState,
    geometry: &ScreenGeometry,
    scroll_delta: f64,
    cursor: DVec2,
) -> bool {
    if scroll_delta == 0.0 {
        return false;
    }

    let size = geometry.screen_size();
    let before = screen_to_world(cursor, state.zoom, state.pan_offset, size);

    let zoom = state.zoom + state.zoom_speed * scroll_delta * (state.zoom / 10.0);
    let zoom = zoom.max(ZOOM_MIN);

    let after = screen_to_world(cursor, zoom, state.pan_offset, size);

    state.zoom = zoom;
    state.pan_offset.x -= after.x - before.x;
    state.pan_offset.y += after.y - before.y;

    log::trace!(
        "zoom {:.6} at ({:.1}, {:.1}); pan ({:.9}, {:.9})",
        state.zoom,
        cursor.x,
        cursor.y,
        state.pan_offset.x,
        state.pan_offset.y
    );

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::displayed_world;

    fn geometry() -> ScreenGeometry {
        ScreenGeometry::new(1000.0, 800.0).unwrap()
    }

    #[test]
    fn zero_scroll_is_noop() {
        let mut s = ViewportState {
            zoom: 2.345,
            pan_offset: DVec2::new(0.1, -0.7),
            ..ViewportState::default()
        };
        let before = s;
        assert!(!apply_zoom(&mut s, &geometry(), 0.0, DVec2::new(17.0, 33.0)));
        assert_eq!(s, before);
    }

    #[test]
    fn step_is_proportional_to_zoom() {
        let mut s = ViewportState {
            zoom: 1.0,
            zoom_speed: 0.5,
            ..ViewportState::default()
        };
        apply_zoom(&mut s, &geometry(), 1.0, DVec2::new(500.0, 400.0));
        assert!((s.zoom - 1.05).abs() < 1e-12);

        let mut deep = ViewportState {
            zoom: 1000.0,
            zoom_speed: 0.5,
            ..ViewportState::default()
        };
        apply_zoom(&mut deep, &geometry(), 1.0, DVec2::new(500.0, 400.0));
        assert!((deep.zoom - 1050.0).abs() < 1e-9);
    }

    #[test]
    fn zoom_clamps_to_floor() {
        let mut s = ViewportState {
            zoom: 0.2,
            zoom_speed: 5.0,
            ..ViewportState::default()
        };
        apply_zoom(&mut s, &geometry(), -10.0, DVec2::new(0.0, 0.0));
        assert_eq!(s.zoom, ZOOM_MIN);
    }

    #[test]
    fn cursor_stays_anchored_in_displayed_world() {
        let g = geometry();
        let cursor = DVec2::new(137.0, 611.0);
        let mut s = ViewportState {
            zoom: 3.0,
            pan_offset: DVec2::new(-0.5, 0.25),
            ..ViewportState::default()
        };

        let before = displayed_world(cursor, s.zoom, s.pan_offset, g.screen_size());
        apply_zoom(&mut s, &g, 2.0, cursor);
        let after = displayed_world(cursor, s.zoom, s.pan_offset, g.screen_size());

        assert!((after.x - before.x).abs() < 1e-9);
        assert!((after.y - before.y).abs() < 1e-9);
    }

    #[test]
    fn horizontal_screen_to_world_is_anchored() {
        let g = geometry();
        let cursor = DVec2::new(900.0, 50.0);
        let mut s = ViewportState::default();

        let before = screen_to_world(cursor, s.zoom, s.pan_offset, g.screen_size());
        apply_zoom(&mut s, &g, -1.5, cursor);
        let after = screen_to_world(cursor, s.zoom, s.pan_offset, g.screen_size());

        assert!((after.x - before.x).abs() < 1e-9);
    }
}
