//! Test doubles for the window and graphics seams
//!
//! [`RecordingGraphics`] logs every GL call and emulates just enough driver
//! state (buffer contents, compile and link status) for assertions.
//! [`ScriptedWindow`] replays key presses, resizes and close requests on
//! chosen frames.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use glfw::Key;

use crate::core::config::StartupConfig;
use crate::render::api::{BackendResult, GraphicsApi, GraphicsError};
use crate::render::geometry::VertexAttribute;
use crate::render::shader::ShaderStage;
use crate::render::window::{WindowBackend, WindowError, WindowEvent, WindowResult};

/// One recorded GL call
#[derive(Debug, Clone, PartialEq)]
pub enum GlCall {
    Viewport(i32, i32, i32, i32),
    ClearColor([f32; 4]),
    Clear,
    CreateBuffer(u32),
    BindArrayBuffer(Option<u32>),
    BufferData { buffer: Option<u32>, floats: Vec<f32> },
    DeleteBuffer(u32),
    CreateVertexArray(u32),
    BindVertexArray(Option<u32>),
    VertexAttribPointer(VertexAttribute),
    EnableVertexAttribArray(u32),
    DeleteVertexArray(u32),
    CreateShader(u32, ShaderStage),
    ShaderSource(u32),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader { program: u32, shader: u32 },
    LinkProgram(u32),
    UseProgram(Option<u32>),
    DeleteProgram(u32),
    DrawTriangles { first: i32, count: i32 },
}

/// Shared handle to a recorder's call log
pub type CallLog = Rc<RefCell<Vec<GlCall>>>;

#[derive(Debug, Default)]
struct ShaderState {
    stage: Option<ShaderStage>,
    source: String,
    compiled: bool,
    info_log: String,
}

#[derive(Debug, Default)]
struct ProgramState {
    attached: Vec<u32>,
    linked: bool,
    info_log: String,
}

/// In-memory [`GraphicsApi`] that records calls
#[derive(Debug, Default)]
pub struct RecordingGraphics {
    calls: CallLog,
    next_name: u32,
    bound_array_buffer: Option<u32>,
    buffers: HashMap<u32, Vec<f32>>,
    shaders: HashMap<u32, ShaderState>,
    programs: HashMap<u32, ProgramState>,
    compile_failures: HashMap<ShaderStage, String>,
    link_failure: Option<String>,
    fail_buffers: bool,
}

impl RecordingGraphics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every compile of `stage` fail with `log`
    pub fn fail_compile(mut self, stage: ShaderStage, log: &str) -> Self {
        self.compile_failures.insert(stage, log.to_string());
        self
    }

    /// Make linking fail with `log` even when both stages compiled
    pub fn fail_link(mut self, log: &str) -> Self {
        self.link_failure = Some(log.to_string());
        self
    }

    /// Make buffer creation fail
    pub fn fail_buffer_creation(mut self) -> Self {
        self.fail_buffers = true;
        self
    }

    pub fn call_log(&self) -> CallLog {
        Rc::clone(&self.calls)
    }

    pub fn calls(&self) -> Vec<GlCall> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&mut self) {
        self.calls.borrow_mut().clear();
    }

    /// Floats last uploaded into `buffer`
    pub fn buffer_contents(&self, buffer: u32) -> Option<Vec<f32>> {
        self.buffers.get(&buffer).cloned()
    }

    /// Most recent viewport
    pub fn viewport(&self) -> Option<(i32, i32, i32, i32)> {
        self.calls.borrow().iter().rev().find_map(|call| match call {
            GlCall::Viewport(x, y, w, h) => Some((*x, *y, *w, *h)),
            _ => None,
        })
    }

    /// Shader objects created and not yet deleted
    pub fn live_shader_count(&self) -> usize {
        self.shaders.len()
    }

    fn record(&self, call: GlCall) {
        self.calls.borrow_mut().push(call);
    }

    fn allocate_name(&mut self) -> u32 {
        self.next_name += 1;
        self.next_name
    }

    // Stand-in for a GLSL front end: anything with an entry point compiles.
    fn compile(&self, state: &ShaderState) -> Result<(), String> {
        if let Some(log) = state.stage.and_then(|stage| self.compile_failures.get(&stage)) {
            return Err(log.clone());
        }
        if state.source.contains("void main") {
            Ok(())
        } else {
            Err("0:1(1): error: function `main' is not defined".to_string())
        }
    }
}

impl GraphicsApi for RecordingGraphics {
    type Buffer = u32;
    type VertexArray = u32;
    type Shader = u32;
    type Program = u32;

    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.record(GlCall::Viewport(x, y, width, height));
    }

    fn clear_color(&mut self, rgba: [f32; 4]) {
        self.record(GlCall::ClearColor(rgba));
    }

    fn clear_color_buffer(&mut self) {
        self.record(GlCall::Clear);
    }

    fn create_buffer(&mut self) -> BackendResult<u32> {
        if self.fail_buffers {
            return Err(GraphicsError::creation("vertex buffer", "out of memory"));
        }
        let name = self.allocate_name();
        self.buffers.insert(name, Vec::new());
        self.record(GlCall::CreateBuffer(name));
        Ok(name)
    }

    fn bind_array_buffer(&mut self, buffer: Option<u32>) {
        self.bound_array_buffer = buffer;
        self.record(GlCall::BindArrayBuffer(buffer));
    }

    fn upload_static_array_data(&mut self, data: &[u8]) {
        let floats: Vec<f32> = bytemuck::pod_collect_to_vec(data);
        if let Some(contents) = self.bound_array_buffer.and_then(|b| self.buffers.get_mut(&b)) {
            contents.clone_from(&floats);
        }
        self.record(GlCall::BufferData {
            buffer: self.bound_array_buffer,
            floats,
        });
    }

    fn delete_buffer(&mut self, buffer: u32) {
        self.buffers.remove(&buffer);
        self.record(GlCall::DeleteBuffer(buffer));
    }

    fn create_vertex_array(&mut self) -> BackendResult<u32> {
        let name = self.allocate_name();
        self.record(GlCall::CreateVertexArray(name));
        Ok(name)
    }

    fn bind_vertex_array(&mut self, vertex_array: Option<u32>) {
        self.record(GlCall::BindVertexArray(vertex_array));
    }

    fn vertex_attrib_pointer_f32(&mut self, attribute: &VertexAttribute) {
        self.record(GlCall::VertexAttribPointer(*attribute));
    }

    fn enable_vertex_attrib_array(&mut self, location: u32) {
        self.record(GlCall::EnableVertexAttribArray(location));
    }

    fn delete_vertex_array(&mut self, vertex_array: u32) {
        self.record(GlCall::DeleteVertexArray(vertex_array));
    }

    fn create_shader(&mut self, stage: ShaderStage) -> BackendResult<u32> {
        let name = self.allocate_name();
        self.shaders.insert(
            name,
            ShaderState {
                stage: Some(stage),
                ..ShaderState::default()
            },
        );
        self.record(GlCall::CreateShader(name, stage));
        Ok(name)
    }

    fn shader_source(&mut self, shader: u32, source: &str) {
        if let Some(state) = self.shaders.get_mut(&shader) {
            state.source = source.to_string();
        }
        self.record(GlCall::ShaderSource(shader));
    }

    fn compile_shader(&mut self, shader: u32) {
        let outcome = self.shaders.get(&shader).map(|state| self.compile(state));
        if let (Some(state), Some(outcome)) = (self.shaders.get_mut(&shader), outcome) {
            state.compiled = outcome.is_ok();
            state.info_log = outcome.err().unwrap_or_default();
        }
        self.record(GlCall::CompileShader(shader));
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        self.shaders.get(&shader).is_some_and(|state| state.compiled)
    }

    fn shader_info_log(&self, shader: u32) -> String {
        self.shaders
            .get(&shader)
            .map(|state| state.info_log.clone())
            .unwrap_or_default()
    }

    fn delete_shader(&mut self, shader: u32) {
        self.shaders.remove(&shader);
        self.record(GlCall::DeleteShader(shader));
    }

    fn create_program(&mut self) -> BackendResult<u32> {
        let name = self.allocate_name();
        self.programs.insert(name, ProgramState::default());
        self.record(GlCall::CreateProgram(name));
        Ok(name)
    }

    fn attach_shader(&mut self, program: u32, shader: u32) {
        if let Some(state) = self.programs.get_mut(&program) {
            state.attached.push(shader);
        }
        self.record(GlCall::AttachShader { program, shader });
    }

    fn link_program(&mut self, program: u32) {
        let all_compiled = self.programs.get(&program).is_some_and(|state| {
            !state.attached.is_empty()
                && state
                    .attached
                    .iter()
                    .all(|shader| self.shader_compile_status(*shader))
        });
        let outcome = match (&self.link_failure, all_compiled) {
            (Some(log), _) => Err(log.clone()),
            (None, false) => Err("error: linking with uncompiled/unspecialized shader".to_string()),
            (None, true) => Ok(()),
        };
        if let Some(state) = self.programs.get_mut(&program) {
            state.linked = outcome.is_ok();
            state.info_log = outcome.err().unwrap_or_default();
        }
        self.record(GlCall::LinkProgram(program));
    }

    fn program_link_status(&self, program: u32) -> bool {
        self.programs.get(&program).is_some_and(|state| state.linked)
    }

    fn program_info_log(&self, program: u32) -> String {
        self.programs
            .get(&program)
            .map(|state| state.info_log.clone())
            .unwrap_or_default()
    }

    fn use_program(&mut self, program: Option<u32>) {
        self.record(GlCall::UseProgram(program));
    }

    fn delete_program(&mut self, program: u32) {
        self.programs.remove(&program);
        self.record(GlCall::DeleteProgram(program));
    }

    fn draw_triangles(&mut self, first: i32, count: i32) {
        self.record(GlCall::DrawTriangles { first, count });
    }
}

/// Frames after which a scripted window closes itself so a bad script
/// cannot hang the test run.
const FRAME_LIMIT: u64 = 1_000;

/// [`WindowBackend`] that replays a per-frame script
///
/// Frame `n` is the iteration that performs the `n + 1`-th buffer swap.
#[derive(Debug)]
pub struct ScriptedWindow {
    size: (i32, i32),
    should_close: bool,
    swaps: u64,
    escape_frames: Vec<u64>,
    resizes: Vec<(u64, i32, i32)>,
    close_frame: Option<u64>,
    close_request_frame: Option<u64>,
    graphics: Option<RecordingGraphics>,
    fail_loader: bool,
}

impl ScriptedWindow {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            size: (width, height),
            should_close: false,
            swaps: 0,
            escape_frames: Vec::new(),
            resizes: Vec::new(),
            close_frame: None,
            close_request_frame: None,
            graphics: None,
            fail_loader: false,
        }
    }

    pub fn from_config(config: &StartupConfig) -> Self {
        let width = i32::try_from(config.window.width).unwrap_or(i32::MAX);
        let height = i32::try_from(config.window.height).unwrap_or(i32::MAX);
        Self::new(width, height)
    }

    /// Hold Escape during frame `frame`
    pub fn press_escape_on_frame(mut self, frame: u64) -> Self {
        self.escape_frames.push(frame);
        self
    }

    /// Deliver a framebuffer resize while polling at the end of `frame`
    pub fn resize_on_frame(mut self, frame: u64, width: i32, height: i32) -> Self {
        self.resizes.push((frame, width, height));
        self
    }

    /// Deliver an OS close request while polling at the end of `frame`
    pub fn close_on_frame(mut self, frame: u64) -> Self {
        self.close_frame = Some(frame);
        self
    }

    /// Deliver a close request on `frame` without raising the close flag
    pub fn request_close_on_frame(mut self, frame: u64) -> Self {
        self.close_request_frame = Some(frame);
        self
    }

    /// Hand out `graphics` from [`WindowBackend::load_graphics`]
    pub fn with_graphics(mut self, graphics: RecordingGraphics) -> Self {
        self.graphics = Some(graphics);
        self
    }

    /// Make [`WindowBackend::load_graphics`] fail
    pub fn fail_loader(mut self) -> Self {
        self.fail_loader = true;
        self
    }

    pub const fn swap_count(&self) -> u64 {
        self.swaps
    }

    const fn current_frame(&self) -> u64 {
        self.swaps
    }
}

impl WindowBackend for ScriptedWindow {
    type Graphics = RecordingGraphics;

    fn load_graphics(&mut self) -> WindowResult<RecordingGraphics> {
        if self.fail_loader {
            return Err(WindowError::LoaderFailed("glClear is unavailable".to_string()));
        }
        Ok(self.graphics.take().unwrap_or_default())
    }

    fn should_close(&self) -> bool {
        self.should_close
    }

    fn set_should_close(&mut self, should_close: bool) {
        self.should_close = should_close;
    }

    fn is_key_pressed(&self, key: Key) -> bool {
        key == Key::Escape && self.escape_frames.contains(&self.current_frame())
    }

    fn framebuffer_size(&self) -> (i32, i32) {
        self.size
    }

    fn swap_buffers(&mut self) {
        self.swaps += 1;
    }

    fn poll_events(&mut self) -> Vec<WindowEvent> {
        // Polling follows the swap, so the frame that just finished is swaps - 1
        let frame = self.swaps.saturating_sub(1);
        let mut events = Vec::new();

        for &(_, width, height) in self.resizes.iter().filter(|(at, _, _)| *at == frame) {
            events.push(WindowEvent::FramebufferResized { width, height });
        }
        if let Some((_, width, height)) = self.resizes.iter().rev().find(|(at, _, _)| *at == frame) {
            self.size = (*width, *height);
        }

        if self.close_frame == Some(frame) {
            self.should_close = true;
            events.push(WindowEvent::CloseRequested);
        }
        if self.close_request_frame == Some(frame) {
            events.push(WindowEvent::CloseRequested);
        }

        if self.swaps >= FRAME_LIMIT {
            self.should_close = true;
        }

        events
    }
}
