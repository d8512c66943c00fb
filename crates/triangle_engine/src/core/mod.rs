//! # Core Module
//!
//! Shared configuration types used by every other part of the crate.

pub mod config;

// Re-export commonly used config types
pub use config::{
    ContextConfig,
    EngineSettings,
    RenderConfig,
    RenderStage,
    ShaderSources,
    StartupConfig,
    WindowConfig,
};
