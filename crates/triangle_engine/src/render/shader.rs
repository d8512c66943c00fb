//! Shader compilation and linking
//!
//! Compile and link failures are reported but never abort the bootstrap: the
//! caller gets a [`ShaderProgram`] either way and can check
//! [`ShaderProgram::is_usable`]. Drawing with an unusable program is
//! undefined on the GPU side.

use std::fmt;

use crate::core::config::ShaderSources;
use crate::foundation::logging::DIAGNOSTICS_TARGET;
use crate::render::api::{BackendResult, GraphicsApi};

/// Built-in vertex stage: passes the position attribute in slot 0 through.
pub const DEFAULT_VERTEX_SHADER: &str = "#version 330 core
layout (location = 0) in vec3 aPos;
void main() {
\tgl_Position = vec4(aPos.x, aPos.y, aPos.z, 1.0);
}
";

/// Built-in fragment stage: flat green.
pub const DEFAULT_FRAGMENT_SHADER: &str = "#version 330 core
out vec4 FragColor;

void main() {
    FragColor = vec4(0.0f, 1.0f, 0.0f, 0.0f);
}
";

/// Longest compiler or linker log kept in a diagnostic, in characters.
pub const MAX_INFO_LOG_CHARS: usize = 511;

/// Programmable pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex stage
    Vertex,
    /// Fragment stage
    Fragment,
}

impl ShaderStage {
    /// The GL shader type enum for this stage
    pub const fn gl_type(self) -> u32 {
        match self {
            Self::Vertex => glow::VERTEX_SHADER,
            Self::Fragment => glow::FRAGMENT_SHADER,
        }
    }

    const fn compile_failure_tag(self) -> &'static str {
        match self {
            Self::Vertex => "ERROR::SHADER::VERTEX::COMPILATION_FAIL",
            Self::Fragment => "ERROR::SHADER::FRAGMENT::COMPILATION_FAIL",
        }
    }
}

/// Which step produced a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A stage failed to compile
    Compile(ShaderStage),
    /// The program failed to link
    Link,
}

impl DiagnosticKind {
    /// Fixed tag printed in front of the log text
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Compile(stage) => stage.compile_failure_tag(),
            Self::Link => "ERROR::PROGRAM:SHADER::LINKING_FAILED",
        }
    }
}

/// A non-fatal compile or link failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderDiagnostic {
    /// Step that failed
    pub kind: DiagnosticKind,
    /// Driver log, truncated to [`MAX_INFO_LOG_CHARS`]
    pub log: String,
}

impl ShaderDiagnostic {
    pub(crate) fn new(kind: DiagnosticKind, raw_log: &str) -> Self {
        Self {
            kind,
            log: truncate_info_log(raw_log),
        }
    }
}

impl fmt::Display for ShaderDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.kind.tag(), self.log)
    }
}

fn truncate_info_log(raw_log: &str) -> String {
    raw_log
        .trim_end_matches('\0')
        .chars()
        .take(MAX_INFO_LOG_CHARS)
        .collect()
}

/// A linked (or failed-to-link) program plus whatever went wrong on the way
pub struct ShaderProgram<G: GraphicsApi> {
    program: G::Program,
    diagnostics: Vec<ShaderDiagnostic>,
}

impl<G: GraphicsApi> ShaderProgram<G> {
    /// Program handle
    pub fn handle(&self) -> G::Program {
        self.program
    }

    /// Failures reported while building the program
    pub fn diagnostics(&self) -> &[ShaderDiagnostic] {
        &self.diagnostics
    }

    /// True when both stages compiled and the program linked
    pub fn is_usable(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Delete the program object
    pub fn destroy(self, gl: &mut G) {
        gl.delete_program(self.program);
    }
}

/// Compile one stage and report a failure without aborting
pub fn compile_stage<G: GraphicsApi>(
    gl: &mut G,
    stage: ShaderStage,
    source: &str,
) -> BackendResult<(G::Shader, Option<ShaderDiagnostic>)> {
    let shader = gl.create_shader(stage)?;
    gl.shader_source(shader, source);
    gl.compile_shader(shader);

    let diagnostic = if gl.shader_compile_status(shader) {
        log::debug!("Compiled {:?} shader", stage);
        None
    } else {
        let diagnostic = ShaderDiagnostic::new(DiagnosticKind::Compile(stage), &gl.shader_info_log(shader));
        log::error!(target: DIAGNOSTICS_TARGET, "{diagnostic}");
        Some(diagnostic)
    };

    Ok((shader, diagnostic))
}

/// Compile both stages, link them and delete the intermediate shader objects
///
/// Only object creation failures are returned as errors.
pub fn build_program<G: GraphicsApi>(gl: &mut G, sources: &ShaderSources) -> BackendResult<ShaderProgram<G>> {
    let mut diagnostics = Vec::new();

    let (vertex, vertex_diagnostic) = compile_stage(gl, ShaderStage::Vertex, &sources.vertex)?;
    diagnostics.extend(vertex_diagnostic);

    let (fragment, fragment_diagnostic) = match compile_stage(gl, ShaderStage::Fragment, &sources.fragment) {
        Ok(compiled) => compiled,
        Err(e) => {
            gl.delete_shader(vertex);
            return Err(e);
        }
    };
    diagnostics.extend(fragment_diagnostic);

    let program = match gl.create_program() {
        Ok(program) => program,
        Err(e) => {
            gl.delete_shader(vertex);
            gl.delete_shader(fragment);
            return Err(e);
        }
    };

    gl.attach_shader(program, vertex);
    gl.attach_shader(program, fragment);
    gl.link_program(program);

    if gl.program_link_status(program) {
        log::debug!("Linked shader program {:?}", program);
    } else {
        let diagnostic = ShaderDiagnostic::new(DiagnosticKind::Link, &gl.program_info_log(program));
        log::error!(target: DIAGNOSTICS_TARGET, "{diagnostic}");
        diagnostics.push(diagnostic);
    }

    // Linked programs keep their own copy of the compiled stages
    gl.delete_shader(vertex);
    gl.delete_shader(fragment);

    if !diagnostics.is_empty() {
        log::warn!(
            "Continuing with shader program {:?} despite {} failure(s)",
            program,
            diagnostics.len()
        );
    }

    Ok(ShaderProgram { program, diagnostics })
}
