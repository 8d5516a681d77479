use std::{fs, path::Path, sync::Arc, time::Duration};

use anyhow::{anyhow, Result};
use log::{debug, error, info, warn};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::{
    cache::{FileLoader, ResourceCache},
    clock::FrameClock,
    config::EngineConfig,
    context::Context,
    error::EngineError,
    game_loop::{GameLoop, Pump},
    input::{InputCollector, Key},
    machine::{Step, ViewMachine},
    signals::ExitSignal,
    surface::WindowSurface,
    view::View,
};

/// Builds the first view once the window and context exist.
pub type ViewFactory = Box<dyn FnOnce(&mut Context) -> Result<Box<dyn View>>>;

pub struct Engine {
    cfg: EngineConfig,
}

impl Engine {
    pub fn new(cfg: EngineConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.cfg
    }

    /// Opens the window, builds the initial view and runs until a view
    /// terminates or the user closes the window.
    ///
    /// Window creation and initial view construction errors are returned
    /// without entering the loop.
    pub fn run<F>(self, initial_view: F) -> Result<()>
    where
        F: FnOnce(&mut Context) -> Result<Box<dyn View>> + 'static,
    {
        let event_loop = EventLoop::new().map_err(EngineError::from)?;
        let mut app = EngineApp::new(self.cfg, Box::new(initial_view));
        event_loop.run_app(&mut app).map_err(EngineError::from)?;

        match app.fatal.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    pub fn load_config_toml(path: impl AsRef<Path>) -> Result<EngineConfig> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| EngineError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(EngineConfig::from_toml_str(&text)?)
    }
}

/// Runs with the default configuration and the given window title.
pub fn run<F>(title: &str, initial_view: F) -> Result<()>
where
    F: FnOnce(&mut Context) -> Result<Box<dyn View>> + 'static,
{
    let mut cfg = EngineConfig::default();
    cfg.window.title = title.to_string();
    Engine::new(cfg).run(initial_view)
}

/// Loop state that only exists once the window is up.
struct Running {
    window: Arc<Window>,
    ctx: Context,
    game: GameLoop,
}

/// winit host around the game loop.
struct EngineApp {
    cfg: EngineConfig,
    factory: Option<ViewFactory>,
    running: Option<Running>,
    input: InputCollector,
    exit_signal: ExitSignal,
    fatal: Option<anyhow::Error>,
    finished: bool,
}

impl EngineApp {
    fn new(cfg: EngineConfig, factory: ViewFactory) -> Self {
        let exit_signal = ExitSignal::new();
        if let Err(e) = exit_signal.install_ctrlc_handler() {
            warn!(target: "phi::engine", "ctrl-c handler not installed: {e}");
        }

        Self {
            cfg,
            factory: Some(factory),
            running: None,
            input: InputCollector::new(),
            exit_signal,
            fatal: None,
            finished: false,
        }
    }

    fn start(&mut self, el: &ActiveEventLoop) -> Result<Running> {
        let Some(factory) = self.factory.take() else {
            return Err(anyhow!("initial view factory already consumed"));
        };

        let attrs = WindowAttributes::default()
            .with_title(self.cfg.window.title.clone())
            .with_inner_size(LogicalSize::new(self.cfg.window.width, self.cfg.window.height));
        let window = Arc::new(el.create_window(attrs).map_err(EngineError::from)?);

        let cache = ResourceCache::new(FileLoader::new(&self.cfg.assets.root));
        let mut ctx = Context::new(cache, Box::new(WindowSurface::new(window.clone())));

        let view = factory(&mut ctx).map_err(|e| e.context("initial view construction failed"))?;

        let mut clock = FrameClock::new(self.cfg.frame.target_hz);
        clock.fps_counter_mut().configure_logging(
            self.cfg.frame.log_fps,
            Duration::from_millis(u64::from(self.cfg.frame.fps_log_period_ms)),
        );

        info!(
            target: "phi::engine",
            "boot '{}' {}x{} @ {}Hz, assets at '{}'",
            self.cfg.window.title,
            self.cfg.window.width,
            self.cfg.window.height,
            self.cfg.frame.target_hz,
            self.cfg.assets.root.display()
        );

        Ok(Running {
            window,
            ctx,
            game: GameLoop::new(clock, ViewMachine::new(view)),
        })
    }

    fn finish(&mut self, el: &ActiveEventLoop) {
        if self.finished {
            return;
        }
        self.finished = true;

        if let Some(running) = self.running.as_mut() {
            running.game.shutdown(&mut running.ctx);
            info!(
                target: "phi::engine",
                "shutdown after {} frames, {} ticks delivered, {} view changes",
                running.game.frames(),
                running.game.clock().delivered(),
                running.game.machine().replacements()
            );
        }
        el.exit();
    }
}

impl ApplicationHandler for EngineApp {
    fn resumed(&mut self, el: &ActiveEventLoop) {
        if self.running.is_some() || self.finished {
            return;
        }

        match self.start(el) {
            Ok(running) => self.running = Some(running),
            Err(e) => {
                error!(target: "phi::engine", "{e:#}");
                self.fatal = Some(e);
                self.finish(el);
            }
        }
    }

    fn window_event(&mut self, _el: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        let Some(running) = self.running.as_ref() else { return; };
        if running.window.id() != id {
            return;
        }

        match event {
            WindowEvent::CloseRequested => self.input.request_quit(),
            WindowEvent::Focused(false) => self.input.clear(),
            WindowEvent::Resized(size) => {
                debug!(target: "phi::engine", "resized to {}x{}", size.width, size.height);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else { return; };
                if let Some(key) = map_key(code) {
                    let down = event.state == ElementState::Pressed;
                    self.input.key(key, down, event.repeat);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, el: &ActiveEventLoop) {
        el.set_control_flow(ControlFlow::Poll);

        if self.finished {
            return;
        }
        if self.exit_signal.take() {
            self.input.request_quit();
        }

        let Some(running) = self.running.as_mut() else { return; };
        let input = &mut self.input;

        let pumped = running.game.pump(&mut running.ctx, || input.snapshot());
        if pumped == Pump::Frame(Step::Terminated) {
            self.finish(el);
        }
    }
}

fn map_key(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::Escape => Key::Escape,
        KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
        KeyCode::Space => Key::Space,
        KeyCode::ArrowUp => Key::Up,
        KeyCode::ArrowDown => Key::Down,
        KeyCode::ArrowLeft => Key::Left,
        KeyCode::ArrowRight => Key::Right,
        KeyCode::KeyW => Key::W,
        KeyCode::KeyA => Key::A,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyP => Key::P,
        _ => return None,
    };
    Some(key)
}
