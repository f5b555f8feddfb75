use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window as WinitWindow, WindowId},
};

use scene_viewer::backend::HeadlessBackend;
use scene_viewer::cli::Cli;
use scene_viewer::config::ViewerConfig;
use scene_viewer::core::{Clock, WinitController};
use scene_viewer::traits::{WindowContext, WindowDimensions};
use scene_viewer::viewer::Viewer;
use scene_viewer::window::Window;

// === Application ===

struct App {
    config: ViewerConfig,
    window: Option<Window>,
    viewer: Viewer,
    backend: HeadlessBackend,
    controller: WinitController,
    clock: Clock,
    setup_error: Option<anyhow::Error>,
}

impl App {
    fn new(config: ViewerConfig) -> Self {
        Self {
            viewer: Viewer::new(&config),
            clock: Clock::new(config.time_units_per_second),
            config,
            window: None,
            backend: HeadlessBackend::new(),
            controller: WinitController::new(),
            setup_error: None,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = WinitWindow::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(PhysicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));

        let window = match event_loop.create_window(attributes) {
            Ok(w) => Window::new(Arc::new(w)),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                self.setup_error = Some(anyhow::Error::new(e).context("Failed to create window"));
                event_loop.exit();
                return;
            }
        };

        window.capture_cursor();
        let dimensions = window.dimensions();
        log::info!("window created ({}x{})", dimensions.width, dimensions.height);

        self.viewer.start(&mut self.backend);
        self.clock.reset();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => window.request_close(),
            WindowEvent::Resized(size) => {
                let dimensions = WindowDimensions::new(size.width, size.height);
                self.viewer
                    .resize(dimensions, &self.controller, &mut self.backend);
            }
            WindowEvent::RedrawRequested => {
                let elapsed = self.clock.tick();
                self.viewer
                    .frame(elapsed, &self.controller, window, &mut self.backend);
                self.controller.reset_deltas();
            }
            other => self.controller.process_event(&other),
        }

        if window.should_close() {
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = ViewerConfig::resolve(&cli)?;

    if cli.print_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    let mut app = App::new(config);

    log::info!(
        "Scene Viewer - Controls: WASD move, mouse look, Q/E rotate, O/P scale, \
         T/Y wireframe/fill, B/N/M shading, Escape to quit"
    );
    event_loop.run_app(&mut app)?;

    match app.setup_error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
