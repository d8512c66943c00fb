//! Backend implementations for the render module
//!
//! OpenGL through `glow` is the only backend.

/// OpenGL backend implementation
pub mod opengl;
