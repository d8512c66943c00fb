//! Window management
//!
//! - **`backend`**: the [`WindowBackend`] trait the frame loop is written against
//! - **`glfw_window`**: the GLFW implementation with an OpenGL core context

pub mod backend;
pub mod glfw_window;

// Re-export the main public types for convenience
pub use backend::{WindowBackend, WindowError, WindowEvent, WindowResult};
pub use glfw_window::GlfwWindow;
