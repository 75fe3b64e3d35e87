//! Application window and event loop management.

use std::sync::Arc;

use glam::Vec3;
use pollster::FutureExt;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

use feaview_core::drawable::RenderBatch;
use feaview_core::error::{FeaViewError, Result};
use feaview_core::options::DisplayOptions;
use feaview_render::RenderEngine;

/// The windowed viewer application.
///
/// Holds the pre-collected panel geometry; the event loop only moves the
/// camera and redraws.
pub(crate) struct FeaViewApp {
    title: String,
    window_size: (u32, u32),
    panel_layout: (usize, usize),
    background: [f32; 4],
    batches: Vec<RenderBatch>,
    bounds: (Vec3, Vec3),
    camera_position: Option<Vec3>,
    window: Option<Arc<Window>>,
    engine: Option<RenderEngine>,
    close_requested: bool,
    // Mouse state for camera control
    mouse_pos: (f64, f64),
    left_mouse_down: bool,
    right_mouse_down: bool,
    shift_down: bool,
}

impl FeaViewApp {
    pub(crate) fn new(
        options: &DisplayOptions,
        batches: Vec<RenderBatch>,
        bounds: (Vec3, Vec3),
        camera_position: Option<Vec3>,
    ) -> Self {
        Self {
            title: options.title.clone(),
            window_size: options.window_size,
            panel_layout: options.panel_layout,
            background: [
                options.background_color.x,
                options.background_color.y,
                options.background_color.z,
                1.0,
            ],
            batches,
            bounds,
            camera_position,
            window: None,
            engine: None,
            close_requested: false,
            mouse_pos: (0.0, 0.0),
            left_mouse_down: false,
            right_mouse_down: false,
            shift_down: false,
        }
    }

    /// Runs the blocking event loop until the window closes.
    pub(crate) fn run(&mut self) -> Result<()> {
        let event_loop = EventLoop::new()
            .map_err(|e| FeaViewError::RenderError(format!("event loop creation failed: {e}")))?;
        event_loop
            .run_app(self)
            .map_err(|e| FeaViewError::RenderError(format!("event loop error: {e}")))
    }

    fn render(&mut self) {
        if let Some(engine) = &mut self.engine {
            if let Err(e) = engine.render_frame(self.background) {
                log::warn!("frame skipped: {e}");
            }
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for FeaViewApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(LogicalSize::new(self.window_size.0, self.window_size.1));

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .expect("failed to create window"),
        );

        let mut engine = RenderEngine::new_windowed(window.clone())
            .block_on()
            .expect("failed to create render engine");

        let (rows, cols) = self.panel_layout;
        engine.set_panel_layout(
            u32::try_from(rows).unwrap_or(1),
            u32::try_from(cols).unwrap_or(1),
        );

        if let Some(position) = self.camera_position {
            engine.camera.set_position(position);
            engine.camera.target = (self.bounds.0 + self.bounds.1) * 0.5;
        } else {
            engine.camera.look_at_box(self.bounds.0, self.bounds.1);
        }

        engine.upload_panels(&self.batches);

        self.window = Some(window);
        self.engine = Some(engine);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.close_requested = true;
            }
            WindowEvent::Resized(size) => {
                if let Some(engine) = &mut self.engine {
                    engine.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.render();
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.shift_down = modifiers.state().shift_key();
            }
            WindowEvent::MouseInput { state, button, .. } => match (button, state) {
                (MouseButton::Left, ElementState::Pressed) => self.left_mouse_down = true,
                (MouseButton::Left, ElementState::Released) => self.left_mouse_down = false,
                (MouseButton::Right, ElementState::Pressed) => self.right_mouse_down = true,
                (MouseButton::Right, ElementState::Released) => self.right_mouse_down = false,
                _ => {}
            },
            WindowEvent::CursorMoved { position, .. } => {
                let dx = (position.x - self.mouse_pos.0) as f32;
                let dy = (position.y - self.mouse_pos.1) as f32;
                self.mouse_pos = (position.x, position.y);

                if let Some(engine) = &mut self.engine {
                    let panning = self.right_mouse_down || (self.left_mouse_down && self.shift_down);
                    if panning {
                        let scale = engine.camera.position.distance(engine.camera.target) * 0.002;
                        engine.camera.pan(-dx * scale, dy * scale);
                    } else if self.left_mouse_down {
                        engine.camera.orbit(dx * 0.01, dy * 0.01);
                    }
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                if let Some(engine) = &mut self.engine {
                    let scroll = match delta {
                        winit::event::MouseScrollDelta::LineDelta(_, y) => y,
                        winit::event::MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.1,
                    };
                    let scale = engine.camera.position.distance(engine.camera.target) * 0.1;
                    engine.camera.zoom(scroll * scale);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed {
                    if let winit::keyboard::PhysicalKey::Code(winit::keyboard::KeyCode::Escape) =
                        event.physical_key
                    {
                        self.close_requested = true;
                    }
                }
            }
            _ => {}
        }

        if self.close_requested {
            event_loop.exit();
        }
    }
}
