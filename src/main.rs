use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use thiserror::Error;
use tracing::{debug, error, info};
use winit::application::ApplicationHandler;
use winit::error::{EventLoopError, OsError};
use winit::event::{DeviceEvent, DeviceId, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

// Import from the library crate
use skiff::cli::Cli;
use skiff::controller::{ControlSettings, EventDispatcher, FixedTicker, InputEvent};
use skiff::logging::{self, LogSettings};
use skiff::platform::{self, WinitCursor, WinitViewport};

const STATUS_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Error)]
enum AppError {
    #[error("failed to create event loop: {0}")]
    CreateEventLoop(#[source] EventLoopError),
    #[error("failed to create window: {0}")]
    CreateWindow(#[source] OsError),
    #[error("event loop failed: {0}")]
    EventLoopRun(#[source] EventLoopError),
}

/// Everything that exists once the window is up
struct Session {
    window: Arc<Window>,
    dispatcher: EventDispatcher<WinitCursor, WinitViewport>,
    ticker: FixedTicker,
    last_frame: Instant,
    last_status: Instant,
}

impl Session {
    fn new(window: Arc<Window>, cli: &Cli) -> Self {
        let settings = ControlSettings { tick_rate_hz: cli.tick_hz, ..ControlSettings::default() };
        let mut dispatcher = EventDispatcher::new(
            WinitCursor::new(window.clone()),
            WinitViewport::new(window.clone()),
            settings,
        );

        // Stand-ins for the pause menu: focus handoff and overlay re-sync
        let title_window = window.clone();
        dispatcher.on_pause(move || {
            title_window.set_title("skiff (paused)");
            info!("menu has focus");
        });
        let title_window = window.clone();
        dispatcher.on_resume(move |pointer| {
            title_window.set_title("skiff");
            debug!(?pointer, "overlay cursor re-synced");
        });

        let interval = dispatcher.clock().tick_interval();
        let now = Instant::now();
        Self {
            window,
            dispatcher,
            ticker: FixedTicker::new(interval, cli.max_ticks_per_frame),
            last_frame: now,
            last_status: now,
        }
    }

    /// Run the ticks that came due since the last frame and return when the
    /// next one is due
    fn advance(&mut self) -> Instant {
        let now = Instant::now();
        let ticks = self.ticker.advance(now - self.last_frame);
        self.last_frame = now;
        for _ in 0..ticks {
            self.dispatcher.handle(&InputEvent::Tick);
        }

        if now - self.last_status >= STATUS_INTERVAL {
            self.last_status = now;
            let body = self.dispatcher.body();
            info!(
                x = body.position.x,
                y = body.position.y,
                z = body.position.z,
                yaw = body.yaw,
                pitch = body.pitch,
                paused = self.dispatcher.is_paused(),
                ticks = self.dispatcher.ticks(),
                "ship"
            );
        }
        now + self.ticker.time_until_next()
    }
}

struct App {
    cli: Cli,
    session: Option<Session>,
    error: Option<AppError>,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_some() {
            return;
        }
        let attributes = Window::default_attributes()
            .with_title("skiff")
            .with_inner_size(winit::dpi::LogicalSize::new(self.cli.width, self.cli.height));
        match event_loop.create_window(attributes) {
            Ok(window) => {
                let session = Session::new(Arc::new(window), &self.cli);
                info!(
                    tick_hz = session.dispatcher.clock().tick_rate_hz(),
                    locked = session.dispatcher.is_locked(),
                    "session started"
                );
                self.session = Some(session);
            }
            Err(e) => {
                self.error = Some(AppError::CreateWindow(e));
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(session) = self.session.as_mut() else { return };
        if window_id != session.window.id() {
            return;
        }
        let raw_motion = session.dispatcher.capture().platform().reports_raw_motion();
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::CursorMoved { .. } if raw_motion => {
                // Positions are frozen under a hard lock; device deltas drive look instead
            }
            other => {
                let bounds = session.dispatcher.cursor_state().tracking_region;
                if let Some(input) = platform::translate_window_event(&other, bounds) {
                    session.dispatcher.handle(&input);
                }
            }
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        let Some(session) = self.session.as_mut() else { return };
        if let DeviceEvent::MouseMotion { delta } = event {
            let capture = session.dispatcher.capture();
            if capture.is_locked() && capture.platform().reports_raw_motion() {
                let center = session.dispatcher.cursor_state().tracking_region.center();
                let point = platform::raw_motion_sample(center, delta);
                session.dispatcher.handle(&InputEvent::MouseMoved(point));
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(session) = self.session.as_mut() {
            let next = session.advance();
            event_loop.set_control_flow(ControlFlow::WaitUntil(next));
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let event_loop = EventLoop::new().map_err(AppError::CreateEventLoop)?;
    let mut app = App { cli, session: None, error: None };
    event_loop.run_app(&mut app).map_err(AppError::EventLoopRun)?;
    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    logging::init(&LogSettings { file: cli.log_file.clone() });

    run(cli).inspect_err(|e| error!("{e}"))
}
