//! Accretion: a black hole swallowing a field of stars
//!
//! A fixed black hole sits at the centre of the window and pulls a few
//! hundred randomly drifting stars toward it with an inverse-square force.
//! Stars that cross its absorption radius disappear.
//!
//! Controls:
//! - Space: Pause/resume
//! - R: Reload the current layout
//! - 1: Scatter layout, 2: Orbiting disk layout
//! - +/-: Adjust black hole mass
//! - Left click: Add a star under the cursor
//! - E: Show/hide the equations panel
//! - Arrow keys / WASD: Pan camera
//! - Scroll: Zoom in/out
//! - Escape: Quit

mod black_hole;
mod canvas;
mod config;
mod equations_ui;
mod renderer;
mod simulation;
mod star;

use anyhow::Context as _;
use canvas::DrawList;
use common::{Camera2D, GraphicsContext};
use config::SimulationConfig;
use equations_ui::{Hud, Status};
use glam::Vec2;
use rand::rngs::ThreadRng;
use renderer::CircleRenderer;
use simulation::{Layout, Simulation};
use winit::{
    event::{ElementState, Event, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::ControlFlow,
    keyboard::{KeyCode, PhysicalKey},
};

const WINDOW_TITLE: &str = "Accretion - Rust/wgpu";
const WINDOW_WIDTH: u32 = 1280;
const WINDOW_HEIGHT: u32 = 720;

/// Longest wall-clock gap fed to the frame accumulator, in seconds
const MAX_FRAME_DELTA: f32 = 0.1;

const MASS_STEP: f32 = 1.2;

struct EguiState {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

struct App {
    ctx: GraphicsContext,
    renderer: CircleRenderer,
    camera: Camera2D,
    home_zoom: f32,
    simulation: Simulation,
    draw_list: DrawList,
    rng: ThreadRng,
    paused: bool,
    accumulator: f32,
    /// Last cursor position in physical pixels
    cursor: Vec2,
    hud: Hud,
    egui: EguiState,
}

impl App {
    fn new(ctx: GraphicsContext) -> Self {
        let bounds = Vec2::new(ctx.size.width as f32, ctx.size.height as f32);
        let config = SimulationConfig::default();

        let mut rng = rand::thread_rng();
        let simulation = Simulation::new(config, bounds, &mut rng);
        log::info!(
            "{} stars around a black hole of mass {} at ({:.0}, {:.0})",
            simulation.stars.len(),
            simulation.black_hole.mass,
            simulation.black_hole.position.x,
            simulation.black_hole.position.y
        );

        let renderer = CircleRenderer::new(&ctx, simulation.stars.len() + 2);
        let camera = Camera2D::framing(bounds.x, bounds.y);
        let mut draw_list = DrawList::new();
        simulation.draw(&mut draw_list);

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &*ctx.window,
            Some(ctx.window.scale_factor() as f32),
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&ctx.device, ctx.config.format, None, 1);

        Self {
            ctx,
            renderer,
            home_zoom: camera.zoom,
            camera,
            simulation,
            draw_list,
            rng,
            paused: false,
            accumulator: 0.0,
            cursor: Vec2::ZERO,
            hud: Hud::default(),
            egui: EguiState {
                ctx: egui_ctx,
                state: egui_state,
                renderer: egui_renderer,
            },
        }
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.ctx.resize(new_size);
        self.camera.update_aspect_ratio(self.ctx.aspect_ratio());
    }

    /// Run as many simulation frames as the elapsed time calls for
    fn update(&mut self, dt: f32) {
        if self.paused {
            return;
        }

        self.accumulator += dt.min(MAX_FRAME_DELTA);
        let interval = self.simulation.config.frame_interval();
        while self.accumulator >= interval {
            let stats = self.simulation.frame(&mut self.draw_list);
            self.accumulator -= interval;

            if stats.absorbed > 0 && stats.live == 0 {
                log::info!("every star has been swallowed, press R for a new field");
            }
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.renderer.update_camera(&self.ctx.queue, &self.camera);
        self.renderer
            .update_instances(&self.ctx.device, &self.ctx.queue, &self.draw_list);

        let status = Status {
            mass: self.simulation.black_hole.mass,
            absorption_radius: self.simulation.black_hole.absorption_radius,
            live: self.simulation.stars.len(),
            absorbed: self.simulation.absorbed_total,
            layout: self.simulation.layout.name(),
            paused: self.paused,
        };
        let hud = &self.hud;
        let raw_input = self.egui.state.take_egui_input(&self.ctx.window);
        let full_output = self.egui.ctx.run(raw_input, |ctx| hud.show(ctx, &status));

        self.egui
            .state
            .handle_platform_output(&self.ctx.window, full_output.platform_output);
        let tris = self
            .egui
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui
                .renderer
                .update_texture(&self.ctx.device, &self.ctx.queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.ctx.size.width, self.ctx.size.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.renderer.render(&mut encoder, &view);

        let egui_commands = self.egui.renderer.update_buffers(
            &self.ctx.device,
            &self.ctx.queue,
            &mut encoder,
            &tris,
            &screen_descriptor,
        );
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.egui
                .renderer
                .render(&mut render_pass, &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui.renderer.free_texture(id);
        }

        self.ctx
            .queue
            .submit(egui_commands.into_iter().chain(std::iter::once(encoder.finish())));
        output.present();

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode, state: ElementState) {
        if state != ElementState::Pressed {
            return;
        }

        match key {
            KeyCode::Space => {
                self.paused = !self.paused;
                log::info!("{}", if self.paused { "paused" } else { "resumed" });
            }
            KeyCode::KeyR => {
                self.simulation.reset(&mut self.rng);
                self.accumulator = 0.0;
                self.redraw_if_paused();
            }
            KeyCode::Digit1 | KeyCode::Digit2 => {
                let layout = if key == KeyCode::Digit1 {
                    Layout::Scatter
                } else {
                    Layout::OrbitingDisk
                };
                self.simulation.load_layout(layout, &mut self.rng);
                self.accumulator = 0.0;
                self.redraw_if_paused();
            }
            KeyCode::Equal | KeyCode::NumpadAdd => {
                let mass = self.simulation.black_hole.mass * MASS_STEP;
                self.simulation.set_black_hole_mass(mass);
                self.redraw_if_paused();
            }
            KeyCode::Minus | KeyCode::NumpadSubtract => {
                let mass = self.simulation.black_hole.mass / MASS_STEP;
                self.simulation.set_black_hole_mass(mass);
                self.redraw_if_paused();
            }
            KeyCode::KeyE => self.hud.toggle_equations(),
            KeyCode::ArrowUp | KeyCode::KeyW => self.camera.pan(Vec2::Y),
            KeyCode::ArrowDown | KeyCode::KeyS => self.camera.pan(Vec2::NEG_Y),
            KeyCode::ArrowLeft | KeyCode::KeyA => self.camera.pan(Vec2::NEG_X),
            KeyCode::ArrowRight | KeyCode::KeyD => self.camera.pan(Vec2::X),
            _ => {}
        }
    }

    fn handle_click(&mut self, button: MouseButton, state: ElementState) {
        if button != MouseButton::Left || state != ElementState::Pressed {
            return;
        }

        let viewport = Vec2::new(self.ctx.size.width as f32, self.ctx.size.height as f32);
        let position = self.camera.screen_to_world(self.cursor, viewport);
        self.simulation.add_star(position, &mut self.rng);
        self.redraw_if_paused();
    }

    /// While paused no frame runs, so refresh the picture by hand
    fn redraw_if_paused(&mut self) {
        if self.paused {
            self.simulation.draw(&mut self.draw_list);
        }
    }

    fn handle_scroll(&mut self, delta: f32) {
        self.camera.zoom *= 1.0 - delta * 0.1;
        self.camera.zoom = self
            .camera
            .zoom
            .clamp(self.home_zoom * 0.1, self.home_zoom * 5.0);
    }

    fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        self.egui.state.on_window_event(&self.ctx.window, event).consumed
    }
}

fn main() -> anyhow::Result<()> {
    let (ctx, event_loop) = pollster::block_on(GraphicsContext::new(
        WINDOW_TITLE,
        WINDOW_WIDTH,
        WINDOW_HEIGHT,
    ))?;

    let mut app = App::new(ctx);
    let mut last_time = std::time::Instant::now();

    event_loop
        .run(move |event, elwt| {
            elwt.set_control_flow(ControlFlow::Poll);

            match event {
                Event::WindowEvent { ref event, .. } => {
                    let consumed = app.handle_window_event(event);

                    if !consumed {
                        match event {
                            WindowEvent::CloseRequested => elwt.exit(),
                            WindowEvent::Resized(size) => app.resize(*size),
                            WindowEvent::KeyboardInput {
                                event:
                                    KeyEvent {
                                        physical_key: PhysicalKey::Code(key),
                                        state,
                                        ..
                                    },
                                ..
                            } => {
                                if *key == KeyCode::Escape && *state == ElementState::Pressed {
                                    elwt.exit();
                                } else {
                                    app.handle_key(*key, *state);
                                }
                            }
                            WindowEvent::CursorMoved { position, .. } => {
                                app.cursor = Vec2::new(position.x as f32, position.y as f32);
                            }
                            WindowEvent::MouseInput { state, button, .. } => {
                                app.handle_click(*button, *state)
                            }
                            WindowEvent::MouseWheel { delta, .. } => {
                                let scroll = match delta {
                                    MouseScrollDelta::LineDelta(_, y) => *y,
                                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                                };
                                app.handle_scroll(scroll);
                            }
                            WindowEvent::RedrawRequested => {
                                let now = std::time::Instant::now();
                                let dt = (now - last_time).as_secs_f32();
                                last_time = now;

                                app.update(dt);
                                match app.render() {
                                    Ok(_) => {}
                                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                                        app.resize(app.ctx.size)
                                    }
                                    Err(wgpu::SurfaceError::OutOfMemory) => {
                                        log::error!("surface out of memory, exiting");
                                        elwt.exit();
                                    }
                                    Err(e) => log::warn!("render error: {:?}", e),
                                }
                            }
                            _ => {}
                        }
                    }
                }
                Event::AboutToWait => {
                    app.ctx.window.request_redraw();
                }
                _ => {}
            }
        })
        .context("event loop error")?;

    Ok(())
}
