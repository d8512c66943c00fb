//! Graphics API abstraction
//!
//! The renderer talks to OpenGL only through [`GraphicsApi`], which keeps the
//! bootstrap and frame loop testable without a driver.

pub mod render_backend;

// Re-export commonly used types
pub use render_backend::{BackendResult, GraphicsApi, GraphicsError};
