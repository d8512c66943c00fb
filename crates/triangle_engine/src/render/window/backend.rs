//! Window backend trait
//!
//! This is the contract between the frame loop and whatever owns the OS
//! window and the GL context. The real implementation is
//! [`GlfwWindow`](super::GlfwWindow); tests substitute a scripted window.

use glfw::Key;
use thiserror::Error;

use crate::render::api::GraphicsApi;

/// Window management errors
///
/// Every variant is fatal to the bootstrap.
#[derive(Error, Debug)]
pub enum WindowError {
    /// The windowing library could not be initialized
    #[error("Failed to initialize GLFW: {0}")]
    InitializationFailed(String),

    /// The window (and with it the context) could not be created
    #[error("Failed to create window")]
    CreationFailed,

    /// GL entry points could not be resolved through the window's context
    #[error("Failed to load OpenGL function pointers: {0}")]
    LoaderFailed(String),
}

/// Result type for window operations
pub type WindowResult<T> = Result<T, WindowError>;

/// Window events the frame loop reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    /// The drawable area changed size, in pixels
    FramebufferResized {
        /// New width
        width: i32,
        /// New height
        height: i32,
    },
    /// The user asked the OS to close the window
    CloseRequested,
}

/// Window and context owner
///
/// Implementations are single-threaded: the context is current on the thread
/// that created the window and every call happens there.
pub trait WindowBackend {
    /// Graphics backend bound to this window's context
    type Graphics: GraphicsApi;

    /// Resolve GL entry points through the current context
    fn load_graphics(&mut self) -> WindowResult<Self::Graphics>;

    /// Check if the window should close
    fn should_close(&self) -> bool;

    /// Set whether the window should close
    fn set_should_close(&mut self, should_close: bool);

    /// Whether `key` is currently held down
    fn is_key_pressed(&self, key: Key) -> bool;

    /// Drawable size in pixels
    fn framebuffer_size(&self) -> (i32, i32);

    /// Present the back buffer
    fn swap_buffers(&mut self);

    /// Dispatch pending window-system events and return the ones we handle
    fn poll_events(&mut self) -> Vec<WindowEvent>;
}
