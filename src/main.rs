// Interactive subdivision viewer.
// The cage, its subdivided surface and the grid are painted through egui on a
// cleared wgpu surface; a small toolbar drives the subdivision actions and the view.

use std::sync::Arc;

use winit::{
    event::{ElementState, Event as WinitEvent, KeyEvent, WindowEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};
use glam::Vec2;
use cage_viewer::engine::{InputEvent, InputState, MeshError, Overlay, Viewer, ViewerConfig};

// ============================================================================
// APPLICATION STATE
// ============================================================================

struct State {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    clear_color: wgpu::Color,

    overlay: Overlay,
    input: InputState,
    viewer: Viewer,
    /// The current press started on the mesh rather than on the toolbar.
    pointer_captured: bool,
}

impl State {
    async fn new(window: Arc<Window>, viewer: Viewer) -> Self {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone()).unwrap();

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .unwrap();

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await
            .unwrap();

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);

        let overlay = Overlay::new(&window, &device, surface_format);

        let scale_factor = window.scale_factor() as f32;
        let logical = Vec2::new(size.width as f32, size.height as f32) / scale_factor;
        let input = InputState::new(logical, scale_factor);

        let background = viewer.config().background;
        let clear_color = wgpu::Color {
            r: background.r as f64,
            g: background.g as f64,
            b: background.b as f64,
            a: 1.0,
        };

        Self {
            window,
            surface,
            device,
            queue,
            config,
            size,
            clear_color,
            overlay,
            input,
            viewer,
            pointer_captured: false,
        }
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Route a window event to egui first, then to the viewer.
    fn handle_event(&mut self, event: &WindowEvent) -> Result<(), MeshError> {
        let response = self.overlay.handle_window_event(&self.window, event);

        match self.input.process_event(event) {
            Some(InputEvent::PointerDown(pos)) => {
                self.pointer_captured = !self.overlay.wants_pointer();
                if self.pointer_captured {
                    self.viewer.on_pointer_down(pos);
                }
            }
            Some(InputEvent::PointerDrag(delta)) if self.pointer_captured => {
                self.viewer.on_pointer_drag(delta)?;
            }
            Some(InputEvent::PointerUp) => {
                self.pointer_captured = false;
                self.viewer.on_pointer_up();
            }
            Some(InputEvent::Key(key)) if !response.consumed => {
                self.viewer.on_key(key)?;
            }
            _ => {}
        }
        Ok(())
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let _clear_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Clear Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: self.window.scale_factor() as f32,
        };
        self.overlay.render(
            &self.device,
            &self.queue,
            &mut encoder,
            &self.window,
            &view,
            &screen_descriptor,
            &mut self.viewer,
        );

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

// ============================================================================
// MAIN
// ============================================================================

fn main() {
    env_logger::init();

    let viewer = match Viewer::new(ViewerConfig::default()) {
        Ok(viewer) => viewer,
        Err(err) => {
            log::error!("could not build the initial mesh: {err}");
            return;
        }
    };

    let event_loop = EventLoop::new().unwrap();

    let window_attributes = Window::default_attributes()
        .with_title("Cage Viewer - subdivision surfaces")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

    let window = Arc::new(event_loop.create_window(window_attributes).unwrap());

    let mut state = pollster::block_on(State::new(window.clone(), viewer));
    let mut frame_count = 0;
    let mut last_fps_update = std::time::Instant::now();

    event_loop.run(move |event, control_flow| {
        match event {
            WinitEvent::WindowEvent {
                ref event,
                window_id,
            } if window_id == window.id() => match event {
                WindowEvent::CloseRequested
                | WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            state: ElementState::Pressed,
                            physical_key: PhysicalKey::Code(KeyCode::Escape),
                            ..
                        },
                    ..
                } => control_flow.exit(),
                WindowEvent::RedrawRequested => {
                    if let Err(err) = state.viewer.tick() {
                        log::error!("animation step failed: {err}");
                    }
                    match state.render() {
                        Ok(_) => {}
                        Err(wgpu::SurfaceError::Lost) => state.resize(state.size),
                        Err(wgpu::SurfaceError::OutOfMemory) => control_flow.exit(),
                        Err(e) => log::error!("{:?}", e),
                    }

                    frame_count += 1;
                    let now = std::time::Instant::now();
                    if (now - last_fps_update).as_secs_f32() >= 1.0 {
                        let mesh = state.viewer.wireframe();
                        log::debug!(
                            "FPS: {} | Points: {} | Faces: {}",
                            frame_count, mesh.point_count(), mesh.face_count()
                        );
                        frame_count = 0;
                        last_fps_update = now;
                    }
                }
                other => {
                    if let WindowEvent::Resized(physical_size) = other {
                        state.resize(*physical_size);
                    }
                    if let Err(err) = state.handle_event(other) {
                        log::error!("input handling failed: {err}");
                    }
                }
            },
            WinitEvent::AboutToWait => {
                window.request_redraw();
            }
            _ => {}
        }
    }).unwrap();
}
