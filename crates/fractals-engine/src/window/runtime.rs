use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::winit::translate_window_event;
use crate::input::{InputEvent, InputFrame, InputState};
use crate::time::FrameClock;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    /// Requested inner size in physical pixels.
    pub initial_size: PhysicalSize<u32>,
    pub fullscreen: bool,
    /// Redraw cap; `None` redraws as fast as presentation allows.
    pub target_fps: Option<u32>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "Fractals".to_string(),
            initial_size: PhysicalSize::new(1000, 800),
            fullscreen: false,
            target_fps: Some(120),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window and drives `app` until it exits or the window closes.
    ///
    /// Window or GPU setup failures are returned once the event loop stops.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    input_frame: InputFrame,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    window: Option<WindowEntry>,
    window_id: Option<WindowId>,

    frame_interval: Option<Duration>,
    next_frame: Instant,

    exit_requested: bool,
    fatal: Option<anyhow::Error>,
}

/// Minimum spacing between redraws for a frame-rate cap (`0` means uncapped).
fn frame_interval(target_fps: Option<u32>) -> Option<Duration> {
    match target_fps {
        Some(fps) if fps > 0 => Some(Duration::from_secs_f64(1.0 / fps as f64)),
        _ => None,
    }
}

/// Next redraw deadline after one at `deadline`; never schedules in the past.
fn advance_deadline(deadline: Instant, interval: Duration, now: Instant) -> Instant {
    (deadline + interval).max(now)
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        let frame_interval = frame_interval(config.target_fps);
        Self {
            config,
            gpu_init,
            app,
            window: None,
            window_id: None,
            frame_interval,
            next_frame: Instant::now(),
            exit_requested: false,
            fatal: None,
        }
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let mut attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);
        if self.config.fullscreen {
            attrs = attrs.with_fullscreen(Some(winit::window::Fullscreen::Borderless(None)));
        }

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let id = window.id();
        let gpu_init = self.gpu_init.clone();

        let mut entry = WindowEntryTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")?;

        // The first frame sees the real drawable size as a resize.
        entry.with_mut(|fields| {
            let size = fields.window.inner_size();
            log::info!("window created: {}x{} physical", size.width, size.height);
            fields.input_state.apply_event(
                fields.input_frame,
                InputEvent::Resized {
                    width: size.width,
                    height: size.height,
                },
            );
            fields.window.request_redraw();
        });

        self.window = Some(entry);
        self.window_id = Some(id);
        Ok(())
    }

    fn redraw(&mut self) -> AppControl {
        let (app, window) = (&mut self.app, &mut self.window);
        let Some(entry) = window.as_mut() else {
            return AppControl::Continue;
        };

        entry.with_mut(|fields| {
            let time = fields.clock.tick();
            let control = {
                let mut ctx = FrameCtx {
                    window: WindowCtx {
                        window: fields.window,
                    },
                    gpu: fields.gpu,
                    input: fields.input_state,
                    input_frame: fields.input_frame,
                    time,
                };
                app.on_frame(&mut ctx)
            };

            // Clear per-frame deltas after the frame is consumed.
            fields.input_frame.clear();
            control
        })
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.create_window_entry(event_loop) {
            log::error!("failed to create window: {e:#}");
            self.fatal = Some(e);
            self.request_exit(event_loop);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }
        let Some(entry) = self.window.as_ref() else { return };

        match self.frame_interval {
            None => {
                event_loop.set_control_flow(ControlFlow::Wait);
                entry.with_window(|w| w.request_redraw());
            }
            Some(interval) => {
                let now = Instant::now();
                if now >= self.next_frame {
                    self.next_frame = advance_deadline(self.next_frame, interval, now);
                    entry.with_window(|w| w.request_redraw());
                }
                event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }
        if self.window_id != Some(window_id) {
            return;
        }

        // Split borrows to avoid `self` capture inside `ouroboros` closures.
        let (app, window) = (&mut self.app, &mut self.window);
        let Some(entry) = window.as_mut() else {
            return;
        };

        let mut control = AppControl::Continue;
        entry.with_mut(|fields| {
            if let Some(ev) = translate_window_event(fields.input_state, &event) {
                fields.input_state.apply_event(fields.input_frame, ev);
            }

            match &event {
                WindowEvent::Resized(new_size) => {
                    fields.gpu.resize(*new_size);
                    fields.window.request_redraw();
                }
                WindowEvent::ScaleFactorChanged { .. } => {
                    let size = fields.window.inner_size();
                    fields.gpu.resize(size);
                    fields.input_state.apply_event(
                        fields.input_frame,
                        InputEvent::Resized {
                            width: size.width,
                            height: size.height,
                        },
                    );
                    fields.window.request_redraw();
                }
                // Time spent unfocused is not frame time.
                WindowEvent::Focused(true) => fields.clock.reset(),
                _ => {}
            }

            control = app.on_window_event(&event);
        });

        if control == AppControl::Exit {
            self.request_exit(event_loop);
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("close requested");
                self.window = None;
                self.request_exit(event_loop);
            }
            WindowEvent::RedrawRequested => {
                if self.redraw() == AppControl::Exit {
                    self.request_exit(event_loop);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_or_missing_fps_is_uncapped() {
        assert_eq!(frame_interval(None), None);
        assert_eq!(frame_interval(Some(0)), None);
        assert_eq!(frame_interval(Some(50)), Some(Duration::from_millis(20)));
    }

    #[test]
    fn deadline_catches_up_after_a_stall() {
        let t0 = Instant::now();
        let interval = Duration::from_millis(16);

        let on_time = advance_deadline(t0, interval, t0 + Duration::from_millis(1));
        assert_eq!(on_time, t0 + interval);

        let late = t0 + Duration::from_secs(2);
        assert_eq!(advance_deadline(t0, interval, late), late);
    }

    #[test]
    fn default_config_opens_a_1000_by_800_window() {
        let cfg = RuntimeConfig::default();
        assert_eq!(cfg.initial_size, PhysicalSize::new(1000, 800));
        assert_eq!(cfg.title, "Fractals");
        assert!(!cfg.fullscreen);
        assert_eq!(cfg.target_fps, Some(120));
    }
}
