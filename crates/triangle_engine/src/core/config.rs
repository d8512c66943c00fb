//! # Startup Configuration
//!
//! Everything the bootstrap needs is gathered into one [`StartupConfig`] value
//! that is built before the window exists and never mutated afterwards.
//!
//! ## Configuration Categories
//!
//! - **Window Config**: title and drawable size of the single window
//! - **Context Config**: requested OpenGL version and profile
//! - **Render Config**: render stage, clear color, shader sources
//! - **Engine Settings**: logging

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::config::{Config, ConfigError};
use crate::render::shader::{DEFAULT_FRAGMENT_SHADER, DEFAULT_VERTEX_SHADER};

/// # Window Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Whether the user may resize the window
    pub resizable: bool,
}

impl WindowConfig {
    /// Create a window configuration with the given size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            title: "OpenGL".to_string(),
            width,
            height,
            resizable: true,
        }
    }

    /// Set the window title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Validate the window configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.is_empty() {
            return Err(ConfigError::Invalid("Window title cannot be empty".to_string()));
        }
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "Window size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if i32::try_from(self.width).is_err() || i32::try_from(self.height).is_err() {
            return Err(ConfigError::Invalid(format!(
                "Window size {}x{} does not fit a GL viewport",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

/// # OpenGL Context Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Requested major version
    pub major: u32,
    /// Requested minor version
    pub minor: u32,
    /// Request a core profile (no deprecated fixed-function API)
    pub core_profile: bool,
    /// Request a forward-compatible context. `None` means auto-detect.
    pub forward_compatible: Option<bool>,
}

impl ContextConfig {
    /// Create a core-profile context configuration for the given version
    pub const fn new(major: u32, minor: u32) -> Self {
        Self {
            major,
            minor,
            core_profile: true,
            forward_compatible: None,
        }
    }

    /// Force forward compatibility on or off
    pub const fn with_forward_compatible(mut self, enabled: bool) -> Self {
        self.forward_compatible = Some(enabled);
        self
    }

    /// Resolve the forward-compatibility flag
    ///
    /// macOS only hands out core profiles to forward-compatible requests.
    pub fn wants_forward_compatible(&self) -> bool {
        self.forward_compatible.unwrap_or(cfg!(target_os = "macos"))
    }

    /// Whether the requested version is at least `major.minor`
    pub const fn is_at_least(&self, major: u32, minor: u32) -> bool {
        self.major > major || (self.major == major && self.minor >= minor)
    }
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self::new(3, 3)
    }
}

/// How far the bootstrap goes before entering the frame loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RenderStage {
    /// Upload the vertex buffer and clear the screen every frame
    Clear,
    /// Additionally compile and link the shader program
    Shaders,
    /// Additionally record a vertex array and draw the triangle every frame
    #[default]
    Triangle,
}

impl RenderStage {
    /// Whether this stage compiles and links the shader program
    pub const fn compiles_shaders(self) -> bool {
        matches!(self, Self::Shaders | Self::Triangle)
    }

    /// Whether this stage records a vertex array and issues draw calls
    pub const fn draws_triangle(self) -> bool {
        matches!(self, Self::Triangle)
    }
}

/// GLSL source text for the two shader stages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShaderSources {
    /// Vertex stage source
    pub vertex: String,
    /// Fragment stage source
    pub fragment: String,
}

impl ShaderSources {
    /// Create shader sources from text
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }
}

impl Default for ShaderSources {
    fn default() -> Self {
        Self::new(DEFAULT_VERTEX_SHADER, DEFAULT_FRAGMENT_SHADER)
    }
}

/// # Render Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Render stage
    pub stage: RenderStage,
    /// Background color as RGBA
    pub clear_color: [f32; 4],
    /// Shader sources
    pub shaders: ShaderSources,
}

impl RenderConfig {
    /// Validate the render configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.clear_color.iter().any(|c| !c.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "Clear color must be finite, got {:?}",
                self.clear_color
            )));
        }
        if self.stage.compiles_shaders()
            && (self.shaders.vertex.trim().is_empty() || self.shaders.fragment.trim().is_empty())
        {
            return Err(ConfigError::Invalid(format!(
                "Stage {:?} needs both shader sources",
                self.stage
            )));
        }
        Ok(())
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            stage: RenderStage::default(),
            clear_color: [0.2, 0.3, 0.3, 1.0],
            shaders: ShaderSources::default(),
        }
    }
}

/// # Engine Settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Log level, refined by `RUST_LOG`
    pub log_level: String,
}

impl EngineSettings {
    /// Parsed log level, falling back to `Info` for unknown names
    pub fn level_filter(&self) -> log::LevelFilter {
        log::LevelFilter::from_str(&self.log_level).unwrap_or(log::LevelFilter::Info)
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// # Complete Startup Configuration
///
/// Top-level configuration handed to [`crate::Engine`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StartupConfig {
    /// Window configuration
    pub window: WindowConfig,
    /// OpenGL context configuration
    pub context: ContextConfig,
    /// Rendering configuration
    pub render: RenderConfig,
    /// Engine settings
    pub engine: EngineSettings,
}

impl StartupConfig {
    /// Set the window size
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.window.width = width;
        self.window.height = height;
        self
    }

    /// Set the render stage
    pub fn with_stage(mut self, stage: RenderStage) -> Self {
        self.render.stage = stage;
        self
    }

    /// Set the shader sources
    pub fn with_shaders(mut self, shaders: ShaderSources) -> Self {
        self.render.shaders = shaders;
        self
    }

    /// Set the log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.engine.log_level = level.into();
        self
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.window.validate()?;
        self.render.validate()?;

        if self.render.stage.draws_triangle() && !self.context.is_at_least(3, 3) {
            return Err(ConfigError::Invalid(format!(
                "Stage {:?} needs OpenGL 3.3 or newer, got {}.{}",
                self.render.stage, self.context.major, self.context.minor
            )));
        }

        if log::LevelFilter::from_str(&self.engine.log_level).is_err() {
            return Err(ConfigError::Invalid(format!(
                "Unknown log level '{}'",
                self.engine.log_level
            )));
        }

        Ok(())
    }
}

impl Config for StartupConfig {}
