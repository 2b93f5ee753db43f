use glutin::config::{Config, ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, NotCurrentGlContextSurfaceAccessor,
    PossiblyCurrentContext, Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};

use glutin_winit::DisplayBuilder;

use raw_window_handle::HasRawWindowHandle;

use std::ffi::CString;
use std::num::NonZeroU32;
use std::time::Instant;

use thiserror::Error;

use winit::dpi::{PhysicalSize, Size};
use winit::event::{
    DeviceEvent, ElementState, Event, KeyboardInput, MouseScrollDelta, VirtualKeyCode,
    WindowEvent,
};
use winit::event_loop::EventLoop;
use winit::window::{CursorGrabMode, Window, WindowBuilder};

use gl_wrapper::renderer::GlRenderer;

use learngl::camera::{Camera, CameraMovement};
use learngl::config::{ConfigError, Settings};
use learngl::frame_pacer::{FramePacer, InvalidFps};

use crate::demos::{Demo, DemoError, Frame};

// lines scrolled per pixel of touchpad scrolling
const PIXELS_PER_LINE: f64 = 20.0;

pub struct App {
    event_loop: EventLoop<()>,
    gl_context: PossiblyCurrentContext,
    gl_window: GlWindow,
    camera: Camera,
    pacer: FramePacer,
    clear_color: [f32; 3],
}

impl App {
    /// Opens the window and makes an OpenGL 3.3 context current on it.
    pub fn new(settings: &Settings) -> Result<Self, AppError> {
        let event_loop = EventLoop::new();
        let window_builder = WindowBuilder::new()
            .with_inner_size(Size::Physical(PhysicalSize::new(
                settings.window.width,
                settings.window.height,
            )))
            .with_min_inner_size(Size::Physical(PhysicalSize::new(32, 32)))
            .with_title(&settings.window.title);
        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));
        let template = ConfigTemplateBuilder::new()
            .with_depth_size(24)
            .with_stencil_size(8);

        let (window, gl_config) = display_builder
            .build(&event_loop, template, |configs| {
                // the picker must return a config, it has no error channel
                configs
                    .max_by_key(|c| (c.depth_size(), c.stencil_size()))
                    .expect("the display offers no GL configs")
            })
            .map_err(|e| AppError::Display(e.to_string()))?;

        let window = window.ok_or(AppError::NoWindow)?;
        let handle = window.raw_window_handle();
        let gl_display = gl_config.display();

        let context_attr = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .build(Some(handle));

        let gl_window = GlWindow::new(window, &gl_config)?;

        let gl_context = unsafe { gl_display.create_context(&gl_config, &context_attr)? }
            .make_current(&gl_window.surface)?;

        gl::load_with(|s| match CString::new(s) {
            Ok(name) => gl_display.get_proc_address(name.as_c_str()).cast(),
            Err(_) => std::ptr::null(),
        });

        let interval = if settings.window.vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(e) = gl_window.surface.set_swap_interval(&gl_context, interval) {
            log::warn!("could not set swap interval: {e}");
        }

        log::info!(
            "opened {}x{} window, depth {} stencil {}",
            settings.window.width,
            settings.window.height,
            gl_config.depth_size(),
            gl_config.stencil_size()
        );

        Ok(Self {
            event_loop,
            gl_context,
            gl_window,
            camera: settings.camera.build(),
            pacer: FramePacer::new(settings.fps)?,
            clear_color: settings.clear_color,
        })
    }

    /// Inner size of the window as the window system created it.
    pub fn size(&self) -> (u32, u32) {
        self.gl_window.window.inner_size().into()
    }

    pub fn run(self, mut demo: Box<dyn Demo>) -> ! {
        let Self {
            event_loop,
            gl_context,
            gl_window,
            mut camera,
            mut pacer,
            clear_color,
        } = self;

        let mut gl_renderer = GlRenderer::new();
        let mut keys = ActiveKeys::default();
        let mut size = gl_window.window.inner_size();
        let started = Instant::now();

        gl_renderer.resize(size.width, size.height);
        let [r, g, b] = clear_color;
        gl_renderer.clear_all(r, g, b);

        if demo.uses_camera() {
            gl_window.capture_cursor();
        }

        event_loop.run(move |event, _window_target, control_flow| {
            control_flow.set_poll();

            match event {
                Event::MainEventsCleared => gl_window.window.request_redraw(),
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::Resized(new_size) => {
                        if let (Some(w), Some(h)) = (
                            NonZeroU32::new(new_size.width),
                            NonZeroU32::new(new_size.height),
                        ) {
                            gl_window.surface.resize(&gl_context, w, h);
                            gl_renderer.resize(new_size.width, new_size.height);
                            size = new_size;

                            if let Err(e) = demo.resize(size.width, size.height) {
                                log::error!("{e}");
                                control_flow.set_exit_with_code(1);
                            }
                        }
                    }
                    WindowEvent::CloseRequested => control_flow.set_exit(),
                    WindowEvent::KeyboardInput {
                        input:
                            KeyboardInput {
                                virtual_keycode: Some(key),
                                state,
                                ..
                            },
                        ..
                    } => {
                        if key == VirtualKeyCode::Escape {
                            control_flow.set_exit();
                        } else {
                            keys.set(key, state == ElementState::Pressed);
                        }
                    }
                    WindowEvent::MouseWheel { delta, .. } if demo.uses_camera() => {
                        let lines = match delta {
                            MouseScrollDelta::LineDelta(_, y) => y,
                            MouseScrollDelta::PixelDelta(p) => (p.y / PIXELS_PER_LINE) as f32,
                        };
                        camera.update_zoom(lines);
                    }
                    _ => (),
                },
                Event::DeviceEvent {
                    event: DeviceEvent::MouseMotion { delta: (dx, dy) },
                    ..
                } if demo.uses_camera() => {
                    // window y grows downwards
                    camera.update_orientation(dx as f32, -dy as f32, true);
                }
                Event::RedrawRequested(_) => {
                    if demo.uses_camera() {
                        let dt = pacer.last_frame_duration().as_secs_f32();
                        for direction in keys.movements() {
                            camera.move_in(direction, dt);
                        }
                    }

                    let mut frame = Frame {
                        renderer: &mut gl_renderer,
                        camera: &camera,
                        time: started.elapsed().as_secs_f32(),
                        width: size.width,
                        height: size.height,
                        clear_color,
                    };

                    if let Err(e) = demo.draw(&mut frame) {
                        log::error!("{e}");
                        control_flow.set_exit_with_code(1);
                        return;
                    }

                    if let Err(e) = gl_window.surface.swap_buffers(&gl_context) {
                        log::error!("could not swap buffers: {e}");
                        control_flow.set_exit_with_code(1);
                        return;
                    }

                    pacer.start_new_frame();
                    log::trace!("frame took {:?}", pacer.last_frame_duration());
                }
                _ => (),
            }
        })
    }
}

pub struct GlWindow {
    // XXX the surface must be dropped before the window.
    pub surface: Surface<WindowSurface>,
    pub window: Window,
}

impl GlWindow {
    pub fn new(window: Window, config: &Config) -> Result<Self, AppError> {
        let (width, height): (u32, u32) = window.inner_size().into();
        let raw_window_handle = window.raw_window_handle();
        let attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            raw_window_handle,
            NonZeroU32::new(width).ok_or(AppError::ZeroSize)?,
            NonZeroU32::new(height).ok_or(AppError::ZeroSize)?,
        );

        let surface = unsafe { config.display().create_window_surface(config, &attrs)? };

        Ok(Self { window, surface })
    }

    /// Hides the cursor and keeps it inside the window for mouse look.
    fn capture_cursor(&self) {
        let grabbed = self
            .window
            .set_cursor_grab(CursorGrabMode::Confined)
            .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Locked));

        if let Err(e) = grabbed {
            log::warn!("could not grab the cursor: {e}");
        }

        self.window.set_cursor_visible(false);
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("could not create a display: {0}")]
    Display(String),
    #[error("the display did not create a window")]
    NoWindow,
    #[error("window has zero size")]
    ZeroSize,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Context(#[from] glutin::error::Error),
    #[error(transparent)]
    Pacer(#[from] InvalidFps),
    #[error(transparent)]
    Demo(#[from] DemoError),
}

#[derive(Debug, Default)]
pub struct ActiveKeys {
    w: bool,
    a: bool,
    s: bool,
    d: bool,
}

impl ActiveKeys {
    pub fn set(&mut self, key: VirtualKeyCode, pressed: bool) {
        match key {
            VirtualKeyCode::W => self.w = pressed,
            VirtualKeyCode::A => self.a = pressed,
            VirtualKeyCode::S => self.s = pressed,
            VirtualKeyCode::D => self.d = pressed,
            _ => {}
        }
    }

    pub fn movements(&self) -> impl Iterator<Item = CameraMovement> {
        [
            (self.w, CameraMovement::Forward),
            (self.s, CameraMovement::Backward),
            (self.a, CameraMovement::Left),
            (self.d, CameraMovement::Right),
        ]
        .into_iter()
        .filter_map(|(held, movement)| held.then_some(movement))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_keys_map_to_movements() {
        let mut keys = ActiveKeys::default();
        assert_eq!(keys.movements().count(), 0);

        keys.set(VirtualKeyCode::W, true);
        keys.set(VirtualKeyCode::D, true);
        keys.set(VirtualKeyCode::Q, true);

        let moves: Vec<CameraMovement> = keys.movements().collect();
        assert_eq!(moves, vec![CameraMovement::Forward, CameraMovement::Right]);

        keys.set(VirtualKeyCode::W, false);
        let moves: Vec<CameraMovement> = keys.movements().collect();
        assert_eq!(moves, vec![CameraMovement::Right]);
    }
}
