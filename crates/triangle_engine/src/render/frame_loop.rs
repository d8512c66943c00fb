//! Per-frame loop: input, clear/draw, swap, events
//!
//! The loop runs until the window's close flag is set or the loop itself moves
//! to [`LoopState::Closing`], either from the Escape check at the top of a
//! frame or from a close request delivered by the OS. A frame that sees
//! Escape still completes; the next iteration never starts.

use glfw::Key;

use crate::render::api::GraphicsApi;
use crate::render::renderer::TriangleRenderer;
use crate::render::window::{WindowBackend, WindowEvent};

/// Loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    /// Frames are being produced
    #[default]
    Running,
    /// Close was requested; the current frame is the last one
    Closing,
}

/// Summary of a finished loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Frames presented
    pub frames: u64,
    /// Viewport changes applied from resize events
    pub resizes: u64,
}

/// The clear/draw/swap loop
#[derive(Debug, Default)]
pub struct FrameLoop {
    state: LoopState,
    stats: FrameStats,
}

impl FrameLoop {
    /// Create a loop in the `Running` state
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    pub const fn state(&self) -> LoopState {
        self.state
    }

    /// Frames and resizes so far
    pub const fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Run frames until the window's close flag is set or a close was requested
    pub fn run<W: WindowBackend>(
        &mut self,
        window: &mut W,
        gl: &mut W::Graphics,
        renderer: &TriangleRenderer<W::Graphics>,
    ) -> FrameStats {
        log::info!("Entering frame loop");

        while self.state == LoopState::Running && !window.should_close() {
            self.frame(window, gl, renderer);
        }
        self.state = LoopState::Closing;

        log::info!(
            "Frame loop finished after {} frames ({} resizes)",
            self.stats.frames,
            self.stats.resizes
        );
        self.stats
    }

    /// Run exactly one iteration
    pub fn frame<W: WindowBackend>(
        &mut self,
        window: &mut W,
        gl: &mut W::Graphics,
        renderer: &TriangleRenderer<W::Graphics>,
    ) {
        self.process_input(window);

        renderer.render_frame(gl);

        window.swap_buffers();
        for event in window.poll_events() {
            self.handle_event(gl, event);
        }

        self.stats.frames += 1;
    }

    fn process_input<W: WindowBackend>(&mut self, window: &mut W) {
        if window.is_key_pressed(Key::Escape) {
            log::debug!("Escape pressed, requesting close");
            window.set_should_close(true);
            self.state = LoopState::Closing;
        }
    }

    fn handle_event<G: GraphicsApi>(&mut self, gl: &mut G, event: WindowEvent) {
        match event {
            WindowEvent::FramebufferResized { width, height } => {
                log::debug!("Framebuffer resized to {}x{}", width, height);
                gl.viewport(0, 0, width, height);
                self.stats.resizes += 1;
            }
            WindowEvent::CloseRequested => {
                log::debug!("Window close requested");
                self.state = LoopState::Closing;
            }
        }
    }
}
