use anyhow::Result;
use fractals_engine::core::{App, AppControl, FrameCtx, WindowCtx};
use fractals_engine::input::{InputEvent, InputFrame, InputState, KeyState};
use fractals_engine::render::FractalRenderer;
use fractals_view::info::{CONTROLS, status_line};
use fractals_view::{
    FrameReport, JuliaAxis, RenderingBackend, ScreenGeometry, ViewportState, apply_frame_input,
    push_viewport,
};

use crate::bindings;
use crate::entry::{EntryOutcome, JuliaEntry};

/// Window-level requests produced by one tick.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct TickActions {
    pub reload_shader: bool,
    pub toggle_fullscreen: bool,
    pub quit: bool,
}

/// Top-level app: owns the viewport and drives one tick per frame.
pub struct FractalsApp<B = FractalRenderer> {
    state: ViewportState,
    geometry: ScreenGeometry,
    backend: B,

    show_info: bool,
    entry: Option<JuliaEntry>,

    base_title: String,
    title: String,
}

impl<B: RenderingBackend> FractalsApp<B> {
    pub fn new(
        state: ViewportState,
        backend: B,
        initial_size: (u32, u32),
        title: String,
    ) -> Result<Self> {
        let geometry = ScreenGeometry::from_pixels(initial_size.0, initial_size.1)?;
        Ok(Self {
            state,
            geometry,
            backend,
            show_info: false,
            entry: None,
            base_title: title.clone(),
            title,
        })
    }

    fn push(&mut self) {
        push_viewport(&mut self.backend, &self.state, &self.geometry);
    }

    /// Applies one frame of input to the viewport.
    ///
    /// Order: resize (and push), input, then a final push of the complete
    /// state. Nothing mutates the viewport after the final push, so the
    /// backend renders exactly what this tick produced.
    pub fn tick(&mut self, input: &InputState, frame: &InputFrame, dt: f64) -> TickActions {
        if let Some((w, h)) = frame.resized {
            self.resize(w, h);
        }

        let mut actions = TickActions::default();
        if self.entry.is_some() {
            let pointer = bindings::pointer_input(input, frame);
            apply_frame_input(&mut self.state, &self.geometry, &pointer, dt);
            self.handle_entry(frame);
        } else {
            let keys = bindings::frame_input(input, frame);
            let report = apply_frame_input(&mut self.state, &self.geometry, &keys, dt);
            self.log_report(report);

            if frame.key_pressed(bindings::TOGGLE_INFO) {
                self.toggle_info();
            }
            if frame.key_pressed(bindings::ENTER_JULIA_RE) {
                self.entry = Some(JuliaEntry::new(JuliaAxis::Re));
            } else if frame.key_pressed(bindings::ENTER_JULIA_IM) {
                self.entry = Some(JuliaEntry::new(JuliaAxis::Im));
            }

            actions.reload_shader = frame.key_pressed(bindings::RELOAD_SHADER);
            actions.toggle_fullscreen = frame.key_released(bindings::FULLSCREEN);
            actions.quit = frame.key_pressed(bindings::QUIT);
        }

        self.push();
        actions
    }

    fn resize(&mut self, width: u32, height: u32) {
        match self.geometry.resize(width as f64, height as f64) {
            Ok(true) => {
                log::debug!("viewport resized to {width}x{height}");
                self.push();
            }
            Ok(false) => {}
            Err(err) => log::warn!("keeping previous viewport: {err}"),
        }
    }

    fn log_report(&self, report: FrameReport) {
        if report.mode_changed {
            log::info!("mode: {:?}", self.state.mode);
        }
        if report.color_changed {
            log::info!("color mode: {:?}", self.state.color_mode);
        }
        if report.camera_reset {
            log::debug!("camera reset");
        }
    }

    fn toggle_info(&mut self) {
        self.show_info = !self.show_info;
        if self.show_info {
            log::info!("controls:\n  {}", CONTROLS.join("\n  "));
        }
    }

    /// Feeds this frame's key presses to the active entry, if any.
    fn handle_entry(&mut self, frame: &InputFrame) {
        let Some(entry) = self.entry.as_mut() else { return };

        let mut outcome = EntryOutcome::Pending;
        for ev in &frame.events {
            if let InputEvent::Key { key, state: KeyState::Pressed, .. } = ev {
                outcome = entry.handle_key(*key, &mut self.state);
                if outcome != EntryOutcome::Pending {
                    break;
                }
            }
        }

        let axis = entry.axis();
        match outcome {
            EntryOutcome::Pending => return,
            EntryOutcome::Committed(v) => log::info!("julia {axis:?} set to {v}"),
            EntryOutcome::Rejected(err) => log::warn!("julia {axis:?} unchanged: {err}"),
            EntryOutcome::Cancelled => log::debug!("julia entry cancelled"),
        }
        self.entry = None;
    }

    fn title_text(&self) -> String {
        match (&self.entry, self.show_info) {
            (Some(entry), _) => format!("{} | {}", status_line(&self.state), entry.prompt()),
            (None, true) => status_line(&self.state),
            (None, false) => self.base_title.clone(),
        }
    }

    fn update_title(&mut self, window: &WindowCtx<'_>) {
        let title = self.title_text();
        if title != self.title {
            window.set_title(&title);
            self.title = title;
        }
    }
}

impl App for FractalsApp<FractalRenderer> {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if self.backend.prepare(&ctx.render_ctx()) {
            self.push();
        }

        let actions = self.tick(ctx.input, ctx.input_frame, ctx.time.dt);

        if actions.reload_shader && self.backend.reload(&ctx.render_ctx()) {
            self.push();
        }
        if actions.toggle_fullscreen {
            let fullscreen = ctx.window.toggle_fullscreen();
            log::info!("fullscreen: {fullscreen}");
        }

        self.update_title(&ctx.window);
        if actions.quit {
            log::info!("quit requested");
            return AppControl::Exit;
        }

        let renderer = &mut self.backend;
        ctx.render(|rctx, target| renderer.render(rctx, target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fractals_engine::input::{Key, Modifiers};
    use fractals_view::sync::param;
    use fractals_view::{DVec2, ParamValue};

    #[derive(Default)]
    struct Recorder {
        calls: Vec<(String, ParamValue)>,
    }

    impl RenderingBackend for Recorder {
        fn set_parameter(&mut self, name: &str, value: ParamValue) {
            self.calls.push((name.to_string(), value));
        }
    }

    impl Recorder {
        /// Values of `name` in push order.
        fn pushed(&self, name: &str) -> Vec<ParamValue> {
            self.calls.iter().filter(|(n, _)| n == name).map(|(_, v)| *v).collect()
        }
    }

    fn app() -> FractalsApp<Recorder> {
        FractalsApp::new(ViewportState::default(), Recorder::default(), (1000, 800), "Fractals".into())
            .unwrap()
    }

    fn press(st: &mut InputState, fr: &mut InputFrame, key: Key) {
        st.apply_event(
            fr,
            InputEvent::Key {
                key,
                state: KeyState::Pressed,
                modifiers: Modifiers::default(),
                code: 0,
                repeat: false,
            },
        );
    }

    #[test]
    fn final_push_carries_post_zoom_state() {
        let mut app = app();
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        st.pointer_pos = Some((0.0, 0.0));
        fr.wheel_lines = 1.0;

        app.tick(&st, &fr, 0.016);

        assert!((app.state.zoom - 1.05).abs() < 1e-12);
        assert_ne!(app.state.pan_offset, DVec2::zero());
        let calls = &app.backend.calls;
        assert_eq!(calls.len(), param::ALL.len());
        assert_eq!(calls.last().map(|(n, _)| n.as_str()), Some(param::COLOR_MODE));
        assert_eq!(
            app.backend.pushed(param::MOVE_OFFSET),
            vec![ParamValue::DVec2(app.state.pan_offset)]
        );
        assert_eq!(app.backend.pushed(param::ZOOM), vec![ParamValue::Double(app.state.zoom)]);
    }

    #[test]
    fn resize_is_pushed_before_input_is_applied() {
        let mut app = app();
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        st.apply_event(&mut fr, InputEvent::Resized { width: 800, height: 600 });
        press(&mut st, &mut fr, Key::W);

        app.tick(&st, &fr, 0.1);

        let sizes = app.backend.pushed(param::SCREEN_SIZE);
        assert_eq!(sizes.len(), 2);
        assert_eq!(sizes[0], ParamValue::DVec2(DVec2::new(800.0, 600.0)));
        assert_eq!(
            app.backend.pushed(param::CENTER_OFFSET)[0],
            ParamValue::DVec2(fractals_view::center_offset(DVec2::new(800.0, 600.0)))
        );

        let pans = app.backend.pushed(param::MOVE_OFFSET);
        assert_eq!(pans[0], ParamValue::DVec2(DVec2::zero()));
        assert_eq!(pans[1], ParamValue::DVec2(DVec2::new(0.0, 0.1)));
    }

    #[test]
    fn degenerate_resize_keeps_previous_geometry() {
        let mut app = app();
        let st = InputState::default();
        let fr = InputFrame { resized: Some((0, 0)), ..InputFrame::default() };

        app.tick(&st, &fr, 0.016);

        assert_eq!(
            app.backend.pushed(param::SCREEN_SIZE),
            vec![ParamValue::DVec2(DVec2::new(1000.0, 800.0))]
        );
    }

    #[test]
    fn window_keys_become_actions() {
        let mut app = app();
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        press(&mut st, &mut fr, Key::R);
        press(&mut st, &mut fr, Key::Escape);
        fr.keys_released.insert(Key::F11);

        let actions = app.tick(&st, &fr, 0.016);
        assert_eq!(
            actions,
            TickActions { reload_shader: true, toggle_fullscreen: true, quit: true }
        );
    }

    #[test]
    fn julia_entry_captures_the_keyboard() {
        let mut app = app();
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        press(&mut st, &mut fr, Key::K);
        app.tick(&st, &fr, 0.016);
        assert!(app.title_text().ends_with("Julia Im = _"));

        // Digit 1 is typed into the entry rather than nudging Re.
        let mut fr = InputFrame::default();
        press(&mut st, &mut fr, Key::Digit1);
        let actions = app.tick(&st, &fr, 1.0);
        assert_eq!(app.state.julia_c, DVec2::zero());
        assert!(app.title_text().ends_with("Julia Im = 1_"));

        let mut fr = InputFrame::default();
        press(&mut st, &mut fr, Key::Enter);
        app.tick(&st, &fr, 0.016);
        assert_eq!(app.state.julia_c, DVec2::new(0.0, 1.0));
        assert!(!actions.quit);
        assert_eq!(app.title_text(), "Fractals");
    }
}
