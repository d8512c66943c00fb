//! OpenGL backend built on `glow`
//!
//! Every method is a thin wrapper over one GL call. Object creation errors
//! from the driver become [`GraphicsError::ObjectCreation`].

#![allow(unsafe_code)]

use std::ffi::c_void;

use glow::HasContext as _;

use crate::render::api::{BackendResult, GraphicsApi, GraphicsError};
use crate::render::geometry::VertexAttribute;
use crate::render::shader::ShaderStage;

/// OpenGL function table for the current context
pub struct GlowBackend {
    gl: glow::Context,
}

impl GlowBackend {
    /// Build the function table with `loader`
    ///
    /// # Safety
    /// A GL context must be current on the calling thread, stay current for
    /// the backend's lifetime, and `loader` must return entry points for it.
    pub unsafe fn from_loader_function<F>(loader: F) -> Self
    where
        F: FnMut(&str) -> *const c_void,
    {
        Self {
            gl: glow::Context::from_loader_function(loader),
        }
    }

    /// `GL_VERSION` string reported by the driver
    pub fn version(&self) -> String {
        unsafe { self.gl.get_parameter_string(glow::VERSION) }
    }
}

impl GraphicsApi for GlowBackend {
    type Buffer = glow::Buffer;
    type VertexArray = glow::VertexArray;
    type Shader = glow::Shader;
    type Program = glow::Program;

    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { self.gl.viewport(x, y, width, height) }
    }

    fn clear_color(&mut self, [r, g, b, a]: [f32; 4]) {
        unsafe { self.gl.clear_color(r, g, b, a) }
    }

    fn clear_color_buffer(&mut self) {
        unsafe { self.gl.clear(glow::COLOR_BUFFER_BIT) }
    }

    fn create_buffer(&mut self) -> BackendResult<glow::Buffer> {
        unsafe { self.gl.create_buffer() }.map_err(|e| GraphicsError::creation("vertex buffer", e))
    }

    fn bind_array_buffer(&mut self, buffer: Option<glow::Buffer>) {
        unsafe { self.gl.bind_buffer(glow::ARRAY_BUFFER, buffer) }
    }

    fn upload_static_array_data(&mut self, data: &[u8]) {
        unsafe {
            self.gl
                .buffer_data_u8_slice(glow::ARRAY_BUFFER, data, glow::STATIC_DRAW);
        }
    }

    fn delete_buffer(&mut self, buffer: glow::Buffer) {
        unsafe { self.gl.delete_buffer(buffer) }
    }

    fn create_vertex_array(&mut self) -> BackendResult<glow::VertexArray> {
        unsafe { self.gl.create_vertex_array() }.map_err(|e| GraphicsError::creation("vertex array", e))
    }

    fn bind_vertex_array(&mut self, vertex_array: Option<glow::VertexArray>) {
        unsafe { self.gl.bind_vertex_array(vertex_array) }
    }

    fn vertex_attrib_pointer_f32(&mut self, attribute: &VertexAttribute) {
        unsafe {
            self.gl.vertex_attrib_pointer_f32(
                attribute.location,
                attribute.components,
                glow::FLOAT,
                attribute.normalized,
                attribute.stride,
                attribute.offset,
            );
        }
    }

    fn enable_vertex_attrib_array(&mut self, location: u32) {
        unsafe { self.gl.enable_vertex_attrib_array(location) }
    }

    fn delete_vertex_array(&mut self, vertex_array: glow::VertexArray) {
        unsafe { self.gl.delete_vertex_array(vertex_array) }
    }

    fn create_shader(&mut self, stage: ShaderStage) -> BackendResult<glow::Shader> {
        unsafe { self.gl.create_shader(stage.gl_type()) }.map_err(|e| GraphicsError::creation("shader", e))
    }

    fn shader_source(&mut self, shader: glow::Shader, source: &str) {
        unsafe { self.gl.shader_source(shader, source) }
    }

    fn compile_shader(&mut self, shader: glow::Shader) {
        unsafe { self.gl.compile_shader(shader) }
    }

    fn shader_compile_status(&self, shader: glow::Shader) -> bool {
        unsafe { self.gl.get_shader_compile_status(shader) }
    }

    fn shader_info_log(&self, shader: glow::Shader) -> String {
        unsafe { self.gl.get_shader_info_log(shader) }
    }

    fn delete_shader(&mut self, shader: glow::Shader) {
        unsafe { self.gl.delete_shader(shader) }
    }

    fn create_program(&mut self) -> BackendResult<glow::Program> {
        unsafe { self.gl.create_program() }.map_err(|e| GraphicsError::creation("shader program", e))
    }

    fn attach_shader(&mut self, program: glow::Program, shader: glow::Shader) {
        unsafe { self.gl.attach_shader(program, shader) }
    }

    fn link_program(&mut self, program: glow::Program) {
        unsafe { self.gl.link_program(program) }
    }

    fn program_link_status(&self, program: glow::Program) -> bool {
        unsafe { self.gl.get_program_link_status(program) }
    }

    fn program_info_log(&self, program: glow::Program) -> String {
        unsafe { self.gl.get_program_info_log(program) }
    }

    fn use_program(&mut self, program: Option<glow::Program>) {
        unsafe { self.gl.use_program(program) }
    }

    fn delete_program(&mut self, program: glow::Program) {
        unsafe { self.gl.delete_program(program) }
    }

    fn draw_triangles(&mut self, first: i32, count: i32) {
        unsafe { self.gl.draw_arrays(glow::TRIANGLES, first, count) }
    }
}
