//! # Triangle Engine
//!
//! A minimal OpenGL renderer: open a GLFW window with a 3.3 core context,
//! build a two-stage shader program, upload one triangle, and clear/draw/swap
//! until the window closes or Escape is pressed.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use triangle_engine::prelude::*;
//!
//! fn main() -> std::process::ExitCode {
//!     let config = StartupConfig::default();
//!     triangle_engine::foundation::logging::init(&config.engine);
//!
//!     let result = Engine::run(config);
//!     std::process::ExitCode::from(exit_status(&result))
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

// Core engine modules
pub mod core;
pub mod config;
pub mod foundation;
pub mod render;

mod engine;

#[cfg(test)]
mod testing;

pub use engine::{exit_status, Engine, EngineError, EngineResult, EXIT_FAILURE, EXIT_SUCCESS};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        core::config::{RenderStage, ShaderSources, StartupConfig},
        exit_status,
        render::{FrameStats, GlfwWindow, WindowBackend, WindowError},
        Engine, EngineError, EngineResult,
    };
}
