//! Triangle renderer: owns every GPU object the program creates

use crate::core::config::{RenderConfig, RenderStage};
use crate::render::api::{BackendResult, GraphicsApi};
use crate::render::geometry::{TriangleGeometry, TRIANGLE_VERTEX_COUNT};
use crate::render::shader::{build_program, ShaderProgram};

/// Renderer for the single static triangle
///
/// Created once after the context is current and consumed by
/// [`TriangleRenderer::destroy`], so each GPU object is released exactly once.
pub struct TriangleRenderer<G: GraphicsApi> {
    stage: RenderStage,
    clear_color: [f32; 4],
    program: Option<ShaderProgram<G>>,
    geometry: TriangleGeometry<G>,
}

impl<G: GraphicsApi> TriangleRenderer<G> {
    /// Build the shader program (if the stage needs one) and upload the triangle
    pub fn new(gl: &mut G, config: &RenderConfig) -> BackendResult<Self> {
        log::info!("Preparing renderer for stage {:?}", config.stage);

        let program = if config.stage.compiles_shaders() {
            Some(build_program(gl, &config.shaders)?)
        } else {
            None
        };

        let geometry = match TriangleGeometry::triangle(gl, config.stage.draws_triangle()) {
            Ok(geometry) => geometry,
            Err(e) => {
                if let Some(program) = program {
                    program.destroy(gl);
                }
                return Err(e);
            }
        };

        Ok(Self {
            stage: config.stage,
            clear_color: config.clear_color,
            program,
            geometry,
        })
    }

    /// Render stage this renderer was built for
    pub const fn stage(&self) -> RenderStage {
        self.stage
    }

    /// Shader program, when the stage compiles one
    pub fn program(&self) -> Option<&ShaderProgram<G>> {
        self.program.as_ref()
    }

    /// Uploaded geometry
    pub fn geometry(&self) -> &TriangleGeometry<G> {
        &self.geometry
    }

    /// Clear the color buffer and, in the `Triangle` stage, draw
    pub fn render_frame(&self, gl: &mut G) {
        gl.clear_color(self.clear_color);
        gl.clear_color_buffer();

        if !self.stage.draws_triangle() {
            return;
        }

        if let Some(program) = &self.program {
            gl.use_program(Some(program.handle()));
        }
        gl.bind_vertex_array(self.geometry.vertex_array());
        gl.draw_triangles(0, TRIANGLE_VERTEX_COUNT);
    }

    /// Release the buffer, the vertex array and the program
    pub fn destroy(self, gl: &mut G) {
        self.geometry.destroy(gl);
        if let Some(program) = self.program {
            program.destroy(gl);
        }
        log::debug!("Released renderer GPU objects");
    }
}
