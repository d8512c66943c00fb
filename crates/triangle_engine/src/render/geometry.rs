//! Triangle geometry and its GPU upload

use crate::render::api::{BackendResult, GraphicsApi};

/// Components per vertex position
pub const POSITION_COMPONENTS: usize = 3;

/// Three vertices in normalized device coordinates, tightly packed xyz.
#[rustfmt::skip]
pub const TRIANGLE_VERTICES: [f32; 9] = [
    -0.5, -0.5, 0.0,
     0.5, -0.5, 0.0,
     0.0,  0.5, 0.0,
];

/// Number of vertices in [`TRIANGLE_VERTICES`]
pub const TRIANGLE_VERTEX_COUNT: i32 = (TRIANGLE_VERTICES.len() / POSITION_COMPONENTS) as i32;

/// Layout of one float vertex attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Shader input slot
    pub location: u32,
    /// Components per vertex
    pub components: i32,
    /// Normalize integer data (unused for floats)
    pub normalized: bool,
    /// Bytes between consecutive vertices
    pub stride: i32,
    /// Byte offset of the first component
    pub offset: i32,
}

impl VertexAttribute {
    /// Slot 0: xyz position, tightly packed, no offset
    pub const POSITION: Self = Self {
        location: 0,
        components: POSITION_COMPONENTS as i32,
        normalized: false,
        stride: (POSITION_COMPONENTS * std::mem::size_of::<f32>()) as i32,
        offset: 0,
    };
}

/// The uploaded triangle: one static vertex buffer, plus a vertex array when drawing
pub struct TriangleGeometry<G: GraphicsApi> {
    vertex_buffer: G::Buffer,
    vertex_array: Option<G::VertexArray>,
}

impl<G: GraphicsApi> TriangleGeometry<G> {
    /// Upload `vertices` as static data
    ///
    /// With `record_vertex_array` the vertex array is created and bound first so
    /// the buffer binding and the position attribute are captured in it.
    pub fn upload(gl: &mut G, vertices: &[f32], record_vertex_array: bool) -> BackendResult<Self> {
        let vertex_array = if record_vertex_array {
            let vertex_array = gl.create_vertex_array()?;
            gl.bind_vertex_array(Some(vertex_array));
            Some(vertex_array)
        } else {
            None
        };

        let vertex_buffer = match gl.create_buffer() {
            Ok(buffer) => buffer,
            Err(e) => {
                if let Some(vertex_array) = vertex_array {
                    gl.bind_vertex_array(None);
                    gl.delete_vertex_array(vertex_array);
                }
                return Err(e);
            }
        };
        gl.bind_array_buffer(Some(vertex_buffer));
        gl.upload_static_array_data(bytemuck::cast_slice(vertices));

        if vertex_array.is_some() {
            let position = VertexAttribute::POSITION;
            gl.vertex_attrib_pointer_f32(&position);
            gl.enable_vertex_attrib_array(position.location);
        }

        log::debug!(
            "Uploaded {} floats into buffer {:?} (vertex array: {:?})",
            vertices.len(),
            vertex_buffer,
            vertex_array
        );

        Ok(Self {
            vertex_buffer,
            vertex_array,
        })
    }

    /// The fixed triangle
    pub fn triangle(gl: &mut G, record_vertex_array: bool) -> BackendResult<Self> {
        Self::upload(gl, &TRIANGLE_VERTICES, record_vertex_array)
    }

    /// Vertex buffer handle
    pub fn vertex_buffer(&self) -> G::Buffer {
        self.vertex_buffer
    }

    /// Vertex array handle, if one was recorded
    pub fn vertex_array(&self) -> Option<G::VertexArray> {
        self.vertex_array
    }

    /// Delete the buffer and the vertex array
    pub fn destroy(self, gl: &mut G) {
        if let Some(vertex_array) = self.vertex_array {
            gl.delete_vertex_array(vertex_array);
        }
        gl.delete_buffer(self.vertex_buffer);
    }
}
