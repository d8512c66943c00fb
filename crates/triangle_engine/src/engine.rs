//! Core engine implementation
//!
//! Bootstrap, frame loop and shutdown, in that order, once per process.

use thiserror::Error;

use crate::config::ConfigError;
use crate::core::config::StartupConfig;
use crate::foundation::logging::DIAGNOSTICS_TARGET;
use crate::render::{
    FrameLoop, FrameStats, GlfwWindow, GraphicsApi, GraphicsError, TriangleRenderer, WindowBackend,
    WindowError, WindowResult,
};

/// Process status for a clean shutdown
pub const EXIT_SUCCESS: u8 = 0;

/// Process status for a fatal bootstrap failure (`-1` as an exit byte)
pub const EXIT_FAILURE: u8 = 255;

/// Main engine struct
///
/// Owns the window, the graphics backend and the renderer. Built by
/// [`Engine::bootstrap`] and consumed by [`Engine::shutdown`].
pub struct Engine<W: WindowBackend> {
    renderer: TriangleRenderer<W::Graphics>,
    graphics: W::Graphics,
    window: W,
    frame_loop: FrameLoop,
}

impl Engine<GlfwWindow> {
    /// Run the whole program against GLFW and OpenGL
    pub fn run(config: StartupConfig) -> EngineResult<FrameStats> {
        Self::run_with(config, GlfwWindow::new)
    }
}

impl<W: WindowBackend> Engine<W> {
    /// Bootstrap, loop until closed, shut down
    pub fn run_with<F>(config: StartupConfig, create_window: F) -> EngineResult<FrameStats>
    where
        F: FnOnce(&StartupConfig) -> WindowResult<W>,
    {
        let mut engine = Self::bootstrap(config, create_window)?;
        let stats = engine.run_loop();
        engine.shutdown();
        Ok(stats)
    }

    /// Create the window, load GL, set the viewport and build the renderer
    pub fn bootstrap<F>(config: StartupConfig, create_window: F) -> EngineResult<Self>
    where
        F: FnOnce(&StartupConfig) -> WindowResult<W>,
    {
        log::info!("Initializing engine...");
        config.validate().map_err(fatal)?;

        let mut window = create_window(&config).map_err(fatal)?;
        let mut graphics = window.load_graphics().map_err(fatal)?;

        let (width, height) = window.framebuffer_size();
        graphics.viewport(0, 0, width, height);
        log::debug!("Initial viewport {}x{}", width, height);

        let renderer = TriangleRenderer::new(&mut graphics, &config.render).map_err(fatal)?;

        Ok(Self {
            renderer,
            graphics,
            window,
            frame_loop: FrameLoop::new(),
        })
    }

    /// Run frames until the window closes
    pub fn run_loop(&mut self) -> FrameStats {
        log::info!("Starting main loop...");
        self.frame_loop
            .run(&mut self.window, &mut self.graphics, &self.renderer)
    }

    /// The renderer
    pub fn renderer(&self) -> &TriangleRenderer<W::Graphics> {
        &self.renderer
    }

    /// The window
    pub fn window(&self) -> &W {
        &self.window
    }

    /// Release GPU objects, then the window and the windowing library
    pub fn shutdown(self) {
        let Self {
            renderer,
            mut graphics,
            window,
            ..
        } = self;

        renderer.destroy(&mut graphics);
        drop(graphics);
        drop(window);

        log::info!("Engine shutdown complete");
    }
}

fn fatal(error: impl Into<EngineError>) -> EngineError {
    let error = error.into();
    log::error!(target: DIAGNOSTICS_TARGET, "{error}");
    error
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Engine-level errors
///
/// Every variant ends the process with [`EXIT_FAILURE`].
#[derive(Error, Debug)]
pub enum EngineError {
    /// Window, context or GL loader failure
    #[error(transparent)]
    Bootstrap(#[from] WindowError),

    /// The driver refused to create a GL object
    #[error("Graphics error: {0}")]
    Graphics(#[from] GraphicsError),

    /// Startup configuration rejected
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl EngineError {
    /// Process exit status for this error
    pub const fn exit_status(&self) -> u8 {
        EXIT_FAILURE
    }
}

/// Process exit status for the outcome of [`Engine::run`]
pub fn exit_status<T>(result: &EngineResult<T>) -> u8 {
    match result {
        Ok(_) => EXIT_SUCCESS,
        Err(e) => e.exit_status(),
    }
}
