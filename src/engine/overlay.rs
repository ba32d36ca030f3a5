use egui::epaint::Shadow;
use glam::Vec2;
use super::color::Color;
use super::scene::Layer;
use super::surface::RenderSurface;
use super::viewer::{Action, Viewer};

fn color32(color: Color) -> egui::Color32 {
    let [r, g, b, a] = color.to_rgba8();
    egui::Color32::from_rgba_unmultiplied(r, g, b, a)
}

/// Paints mesh parts with an egui painter. Engine coordinates are offsets from
/// the viewport centre, so every point is shifted by `origin`.
pub struct EguiSurface<'a> {
    painter: &'a egui::Painter,
    origin: egui::Pos2,
}

impl<'a> EguiSurface<'a> {
    pub fn new(painter: &'a egui::Painter, origin: egui::Pos2) -> Self {
        Self { painter, origin }
    }

    fn pos(&self, p: Vec2) -> egui::Pos2 {
        self.origin + egui::vec2(p.x, p.y)
    }
}

impl RenderSurface for EguiSurface<'_> {
    fn draw_polygon(&mut self, points: &[Vec2], fill: Color, stroke: Color) {
        let points = points.iter().map(|&p| self.pos(p)).collect();
        self.painter.add(egui::Shape::convex_polygon(
            points,
            color32(fill),
            egui::Stroke::new(1.0, color32(stroke)),
        ));
    }

    fn draw_line(&mut self, a: Vec2, b: Vec2, color: Color, thickness: f32) {
        self.painter.line_segment(
            [self.pos(a), self.pos(b)],
            egui::Stroke::new(thickness, color32(color)),
        );
    }

    fn draw_point(&mut self, p: Vec2, radius: f32, color: Color) {
        self.painter.circle_filled(self.pos(p), radius, color32(color));
    }
}

/// egui context, winit glue and wgpu renderer for the toolbar and the mesh.
pub struct Overlay {
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Overlay {
    pub fn new(
        window: &winit::window::Window,
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        let egui_ctx = egui::Context::default();

        // Dark, semi-transparent toolbar
        let mut visuals = egui::Visuals::dark();
        visuals.window_fill = egui::Color32::from_rgba_premultiplied(0, 0, 0, 180);
        visuals.window_shadow = Shadow::NONE;
        egui_ctx.set_visuals(visuals);

        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        let egui_renderer = egui_wgpu::Renderer::new(
            device,
            surface_format,
            None,  // no depth
            1,     // msaa samples
            false, // no dithering
        );

        Self {
            egui_ctx,
            egui_state,
            egui_renderer,
        }
    }

    pub fn handle_window_event(
        &mut self,
        window: &winit::window::Window,
        event: &winit::event::WindowEvent,
    ) -> egui_winit::EventResponse {
        self.egui_state.on_window_event(window, event)
    }

    /// True while the pointer is over (or dragging) a toolbar widget.
    pub fn wants_pointer(&self) -> bool {
        self.egui_ctx.wants_pointer_input() || self.egui_ctx.is_pointer_over_area()
    }

    /// Render one egui frame: the mesh on a background layer, the toolbar
    /// on top. Toolbar clicks are applied to the viewer once the frame is built.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        window: &winit::window::Window,
        view: &wgpu::TextureView,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
        viewer: &mut Viewer,
    ) {
        let raw_input = self.egui_state.take_egui_input(window);

        let mut visibility = viewer.scene.visibility;
        let mut animate = viewer.animating();
        let mut clicked = Vec::new();
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            // ── Mesh and grid, behind every window ──────────────────────────
            let painter = ctx.layer_painter(egui::LayerId::new(
                egui::Order::Background,
                egui::Id::new("mesh"),
            ));
            let mut surface = EguiSurface::new(&painter, ctx.screen_rect().center());
            viewer.frame(&mut surface);

            // ── Toolbar ─────────────────────────────────────────────────────
            egui::Window::new("Subdivision")
                .default_pos(egui::pos2(10.0, 10.0))
                .resizable(false)
                .show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        for action in Action::ALL {
                            if ui.button(action.label()).clicked() {
                                clicked.push(action);
                            }
                        }
                    });
                    ui.separator();
                    for layer in Layer::ALL {
                        ui.checkbox(visibility.get_mut(layer), layer.label());
                    }
                    ui.checkbox(&mut animate, "Animate");
                    ui.separator();
                    let mesh = viewer.wireframe();
                    ui.label(format!(
                        "Level {}  Points {}  Faces {}",
                        mesh.level(),
                        mesh.point_count(),
                        mesh.face_count()
                    ));
                });
        });

        viewer.set_visibility(visibility);
        viewer.set_animate(animate);
        for action in clicked {
            if let Err(err) = viewer.apply(action) {
                log::error!("{} failed: {err}", action.label());
            }
        }

        self.egui_state
            .handle_platform_output(window, full_output.platform_output);

        let tris = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.egui_renderer
            .update_buffers(device, queue, encoder, &tris, screen_descriptor);

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            self.egui_renderer
                .render(&mut render_pass.forget_lifetime(), &tris, screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}
