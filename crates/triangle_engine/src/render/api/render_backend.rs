//! Backend abstraction trait for the OpenGL calls the renderer makes
//!
//! The method set mirrors the handful of GL entry points a single static
//! triangle needs. Handle types are associated types so the real backend can
//! use `glow`'s typed names while tests use plain integers.

use std::fmt::Debug;

use thiserror::Error;

use crate::render::geometry::VertexAttribute;
use crate::render::shader::ShaderStage;

/// Result type for backend operations
pub type BackendResult<T> = Result<T, GraphicsError>;

/// Errors reported by a graphics backend
#[derive(Error, Debug)]
pub enum GraphicsError {
    /// The driver refused to create an object
    #[error("Failed to create {object}: {message}")]
    ObjectCreation {
        /// Kind of object, e.g. "vertex buffer"
        object: &'static str,
        /// Driver message
        message: String,
    },
}

impl GraphicsError {
    pub(crate) fn creation(object: &'static str, message: impl Into<String>) -> Self {
        Self::ObjectCreation {
            object,
            message: message.into(),
        }
    }
}

/// Graphics backend trait
///
/// All calls must happen on the thread that owns the current context.
pub trait GraphicsApi {
    /// Vertex buffer object name
    type Buffer: Copy + Debug;
    /// Vertex array object name
    type VertexArray: Copy + Debug;
    /// Shader object name
    type Shader: Copy + Debug;
    /// Program object name
    type Program: Copy + Debug;

    /// Set the pixel rectangle rendering is mapped to
    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32);
    /// Set the color used by [`GraphicsApi::clear_color_buffer`]
    fn clear_color(&mut self, rgba: [f32; 4]);
    /// Clear the color buffer
    fn clear_color_buffer(&mut self);

    /// Create a buffer object
    fn create_buffer(&mut self) -> BackendResult<Self::Buffer>;
    /// Bind (or unbind) the `ARRAY_BUFFER` target
    fn bind_array_buffer(&mut self, buffer: Option<Self::Buffer>);
    /// Upload bytes into the bound `ARRAY_BUFFER` with `STATIC_DRAW` usage
    fn upload_static_array_data(&mut self, data: &[u8]);
    /// Delete a buffer object
    fn delete_buffer(&mut self, buffer: Self::Buffer);

    /// Create a vertex array object
    fn create_vertex_array(&mut self) -> BackendResult<Self::VertexArray>;
    /// Bind (or unbind) a vertex array object
    fn bind_vertex_array(&mut self, vertex_array: Option<Self::VertexArray>);
    /// Describe a float attribute sourced from the bound `ARRAY_BUFFER`
    fn vertex_attrib_pointer_f32(&mut self, attribute: &VertexAttribute);
    /// Enable an attribute slot
    fn enable_vertex_attrib_array(&mut self, location: u32);
    /// Delete a vertex array object
    fn delete_vertex_array(&mut self, vertex_array: Self::VertexArray);

    /// Create a shader object for one stage
    fn create_shader(&mut self, stage: ShaderStage) -> BackendResult<Self::Shader>;
    /// Replace the source of a shader object
    fn shader_source(&mut self, shader: Self::Shader, source: &str);
    /// Compile a shader object
    fn compile_shader(&mut self, shader: Self::Shader);
    /// Compile status of the last compile
    fn shader_compile_status(&self, shader: Self::Shader) -> bool;
    /// Compiler log of the last compile
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    /// Delete a shader object
    fn delete_shader(&mut self, shader: Self::Shader);

    /// Create a program object
    fn create_program(&mut self) -> BackendResult<Self::Program>;
    /// Attach a shader object to a program
    fn attach_shader(&mut self, program: Self::Program, shader: Self::Shader);
    /// Link a program
    fn link_program(&mut self, program: Self::Program);
    /// Link status of the last link
    fn program_link_status(&self, program: Self::Program) -> bool;
    /// Linker log of the last link
    fn program_info_log(&self, program: Self::Program) -> String;
    /// Make a program current (or none)
    fn use_program(&mut self, program: Option<Self::Program>);
    /// Delete a program object
    fn delete_program(&mut self, program: Self::Program);

    /// Draw `count` vertices as a triangle list starting at `first`
    fn draw_triangles(&mut self, first: i32, count: i32);
}
