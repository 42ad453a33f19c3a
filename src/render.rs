use crate::instances::{self, SceneGlobals, SceneInstances};
use starflight_core::RenderState;
use web_sys as web;

mod helpers;
mod post;
mod scene;
mod targets;
use post::PostSettings;
use scene::SceneResources;
use targets::RenderTargets;

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    scene: SceneResources,
    targets: RenderTargets,
    post: post::PostResources,
    post_settings: PostSettings,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        state: &RenderState,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Default limits; older WebGPU impls reject unknown fields
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let targets = RenderTargets::new(&device, width, height);
        let post = post::create_post_resources(&device, &targets, format);

        let background = instances::background_instances(&state.starfield);
        let path = state.config.debug_path.then(|| {
            state
                .controller
                .curve()
                .sample_points(starflight_core::constants::DEBUG_PATH_SEGMENTS)
        });
        let scene = scene::create_scene_resources(&device, &background, path.as_deref());
        log::info!(
            "[gpu] {}x{} format={:?} background={} debug_path={}",
            width,
            height,
            format,
            background.len(),
            path.is_some()
        );

        let [r, g, b] = state.config.clear_color;
        Ok(Self {
            surface,
            device,
            queue,
            config,
            scene,
            targets,
            post,
            post_settings: PostSettings::from_config(&state.config),
            width,
            height,
            clear_color: wgpu::Color {
                r: r as f64,
                g: g as f64,
                b: b as f64,
                a: 1.0,
            },
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);

            // Recreate offscreen render targets and dependent bind groups
            self.targets.recreate(&self.device, width, height);
            self.post.rebuild_bind_groups(&self.device, &self.targets);
        }
    }

    pub fn render(
        &mut self,
        frame_data: &SceneInstances,
        globals: &SceneGlobals,
        time_sec: f32,
    ) -> Result<(), wgpu::SurfaceError> {
        self.scene.write_globals(&self.queue, globals);
        self.scene
            .solid
            .upload(&self.device, &self.queue, &frame_data.solid);
        self.scene
            .glow
            .upload(&self.device, &self.queue, &frame_data.glow);

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.scene.draw(&mut rpass);
        }

        let (bw, bh) = targets::bloom_size(self.width, self.height);
        let res = [bw as f32, bh as f32];
        let s = &self.post_settings;

        // Pass 2: bright pass → bloom_a
        post::write_post_uniforms(
            &self.queue,
            &self.post.uniform_buffer,
            res,
            time_sec,
            s,
            [0.0, 0.0],
        );
        post::blit(
            &mut encoder,
            "bright_pass",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.bright_pipeline,
            &self.post.bg_hdr,
            None,
        );
        // Uniform writes land before the submit, so each blur direction gets
        // its own submission.
        self.queue.submit(Some(encoder.finish()));

        // Pass 3: blur horizontal bloom_a -> bloom_b
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("blur_h_encoder"),
            });
        post::write_post_uniforms(
            &self.queue,
            &self.post.uniform_buffer,
            res,
            time_sec,
            s,
            [1.0, 0.0],
        );
        post::blit(
            &mut encoder,
            "blur_h",
            &self.targets.bloom_b_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &self.post.bg_from_bloom_a,
            None,
        );
        self.queue.submit(Some(encoder.finish()));

        // Pass 4: blur vertical bloom_b -> bloom_a
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("blur_v_encoder"),
            });
        post::write_post_uniforms(
            &self.queue,
            &self.post.uniform_buffer,
            res,
            time_sec,
            s,
            [0.0, 1.0],
        );
        post::blit(
            &mut encoder,
            "blur_v",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &self.post.bg_from_bloom_b,
            None,
        );
        self.queue.submit(Some(encoder.finish()));

        // Pass 5: composite to swapchain
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("composite_encoder"),
            });
        let full = [self.width as f32, self.height as f32];
        post::write_post_uniforms(
            &self.queue,
            &self.post.uniform_buffer,
            full,
            time_sec,
            s,
            [0.0, 0.0],
        );
        post::blit(
            &mut encoder,
            "composite",
            &view,
            self.clear_color,
            &self.post.composite_pipeline,
            &self.post.bg_hdr,
            Some(&self.post.bg_bloom_a_only),
        );

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
