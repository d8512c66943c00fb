//! Window management using GLFW
//!
//! Creates the window together with an OpenGL core-profile context and
//! resolves GL entry points through `glfwGetProcAddress`.

#![allow(unsafe_code)]

use std::ffi::c_void;

use glfw::{Context as _, Key};

use crate::core::config::StartupConfig;
use crate::render::backends::opengl::GlowBackend;
use crate::render::window::backend::{WindowBackend, WindowError, WindowEvent, WindowResult};

/// Entry point probed before building the GL function table
const PROBE_SYMBOL: &str = "glClear";

/// GLFW window wrapper with proper resource management
///
/// Field order matters: the window is destroyed before the last `Glfw`
/// handle drops and terminates the library.
pub struct GlfwWindow {
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
    glfw: glfw::Glfw,
}

impl GlfwWindow {
    /// Initialize GLFW, create the window and make its context current
    pub fn new(config: &StartupConfig) -> WindowResult<Self> {
        let mut glfw = glfw::init(glfw::log_errors)
            .map_err(|e| WindowError::InitializationFailed(format!("{e:?}")))?;

        let context = &config.context;
        glfw.window_hint(glfw::WindowHint::ContextVersion(context.major, context.minor));
        if context.core_profile {
            glfw.window_hint(glfw::WindowHint::OpenGlProfile(glfw::OpenGlProfileHint::Core));
        }
        if context.wants_forward_compatible() {
            glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));
        }
        glfw.window_hint(glfw::WindowHint::Resizable(config.window.resizable));

        // Create window
        let (mut window, events) = glfw
            .create_window(
                config.window.width,
                config.window.height,
                &config.window.title,
                glfw::WindowMode::Windowed,
            )
            .ok_or(WindowError::CreationFailed)?;

        window.make_current();

        // Set up event polling
        window.set_framebuffer_size_polling(true);
        window.set_close_polling(true);

        log::info!(
            "Created {}x{} window '{}' with OpenGL {}.{} context",
            config.window.width,
            config.window.height,
            config.window.title,
            context.major,
            context.minor
        );

        Ok(Self { window, events, glfw })
    }
}

impl WindowBackend for GlfwWindow {
    type Graphics = GlowBackend;

    fn load_graphics(&mut self) -> WindowResult<GlowBackend> {
        let probe = self.window.get_proc_address(PROBE_SYMBOL) as *const c_void;
        if probe.is_null() {
            return Err(WindowError::LoaderFailed(format!("{PROBE_SYMBOL} is unavailable")));
        }

        let window = &mut self.window;
        // SAFETY: the context was made current on this thread in `new` and
        // outlives the backend, which is dropped before the window.
        let backend = unsafe {
            GlowBackend::from_loader_function(|symbol| window.get_proc_address(symbol) as *const c_void)
        };
        log::info!("Loaded OpenGL {}", backend.version());
        Ok(backend)
    }

    fn should_close(&self) -> bool {
        self.window.should_close()
    }

    fn set_should_close(&mut self, should_close: bool) {
        self.window.set_should_close(should_close);
    }

    fn is_key_pressed(&self, key: Key) -> bool {
        self.window.get_key(key) == glfw::Action::Press
    }

    fn framebuffer_size(&self) -> (i32, i32) {
        self.window.get_framebuffer_size()
    }

    fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }

    fn poll_events(&mut self) -> Vec<WindowEvent> {
        self.glfw.poll_events();
        glfw::flush_messages(&self.events)
            .filter_map(|(_, event)| match event {
                glfw::WindowEvent::FramebufferSize(width, height) => {
                    Some(WindowEvent::FramebufferResized { width, height })
                }
                glfw::WindowEvent::Close => Some(WindowEvent::CloseRequested),
                _ => None,
            })
            .collect()
    }
}
