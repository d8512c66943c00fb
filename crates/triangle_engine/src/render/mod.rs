//! # Rendering System
//!
//! Everything between an open window and a triangle on screen.
//!
//! ## Architecture
//!
//! - **Window**: GLFW window and context ownership, behind [`WindowBackend`]
//! - **API**: the [`GraphicsApi`] trait the renderer issues GL calls through
//! - **Backends**: the `glow` implementation of [`GraphicsApi`]
//! - **Shader / Geometry**: program build and vertex upload
//! - **Renderer**: owns the GPU objects and records one frame
//! - **Frame Loop**: input, render, swap, events

// Public modules for application use
pub mod window;
pub mod api;

/// Graphics backend implementations
pub mod backends;

pub mod shader;
pub mod geometry;
pub mod renderer;
pub mod frame_loop;

pub use api::{BackendResult, GraphicsApi, GraphicsError};
pub use backends::opengl::GlowBackend;
pub use frame_loop::{FrameLoop, FrameStats, LoopState};
pub use geometry::{TriangleGeometry, VertexAttribute, TRIANGLE_VERTICES};
pub use renderer::TriangleRenderer;
pub use shader::{DiagnosticKind, ShaderDiagnostic, ShaderProgram, ShaderStage};
pub use window::{GlfwWindow, WindowBackend, WindowError, WindowEvent, WindowResult};
