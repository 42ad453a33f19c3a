use super::helpers::{self, DEPTH_FORMAT, HDR_FORMAT};
use crate::constants::INSTANCE_CAPACITY;
use crate::instances::{InstanceRaw, SceneGlobals};
use glam::Vec3;
use wgpu;
use wgpu::util::DeviceExt;

const INSTANCE_ATTRIBUTES: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
    0 => Float32x4,
    1 => Float32x4,
    2 => Float32x4,
    3 => Float32x4,
    4 => Float32x4,
    5 => Float32x4,
];

const LINE_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

fn instance_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<InstanceRaw>() as u64,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &INSTANCE_ATTRIBUTES,
    }
}

/// Instance buffer that is rewritten every frame and only ever grows.
pub(crate) struct InstanceBuffer {
    label: &'static str,
    buffer: wgpu::Buffer,
    capacity: usize,
    len: u32,
}

impl InstanceBuffer {
    fn new(device: &wgpu::Device, label: &'static str, capacity: usize) -> Self {
        Self {
            label,
            buffer: Self::allocate(device, label, capacity),
            capacity,
            len: 0,
        }
    }

    fn allocate(device: &wgpu::Device, label: &str, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: (capacity.max(1) * std::mem::size_of::<InstanceRaw>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    pub(crate) fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[InstanceRaw],
    ) {
        let cap = helpers::grown_capacity(self.capacity, data.len());
        if cap != self.capacity {
            self.buffer.destroy();
            self.buffer = Self::allocate(device, self.label, cap);
            self.capacity = cap;
            log::debug!("[render] {} grown to {}", self.label, cap);
        }
        if !data.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(data));
        }
        self.len = data.len() as u32;
    }

    fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.len == 0 {
            return;
        }
        pass.set_vertex_buffer(0, self.buffer.slice(..));
        pass.draw(0..6, 0..self.len);
    }
}

pub(crate) struct SceneResources {
    pub(crate) globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    solid_pipeline: wgpu::RenderPipeline,
    glow_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    pub(crate) solid: InstanceBuffer,
    pub(crate) glow: InstanceBuffer,
    background: wgpu::Buffer,
    background_len: u32,
    path: Option<(wgpu::Buffer, u32)>,
}

fn depth_state(write: bool) -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: DEPTH_FORMAT,
        depth_write_enabled: write,
        depth_compare: wgpu::CompareFunction::Less,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    }
}

fn make_scene_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    label: &str,
    entries: (&str, &str),
    buffers: &[wgpu::VertexBufferLayout],
    topology: wgpu::PrimitiveTopology,
    blend: Option<wgpu::BlendState>,
    depth_write: bool,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(entries.0),
            buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology,
            ..Default::default()
        },
        depth_stencil: Some(depth_state(depth_write)),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(entries.1),
            targets: &[Some(wgpu::ColorTargetState {
                format: HDR_FORMAT,
                blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}

pub(crate) fn create_scene_resources(
    device: &wgpu::Device,
    background: &[InstanceRaw],
    path: Option<&[Vec3]>,
) -> SceneResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("scene_shader"),
        source: wgpu::ShaderSource::Wgsl(starflight_core::SCENE_WGSL.into()),
    });
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("scene_bgl"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("scene_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("scene_globals"),
        size: std::mem::size_of::<SceneGlobals>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("scene_bg"),
        layout: &bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: globals_buffer.as_entire_binding(),
        }],
    });

    let solid_pipeline = make_scene_pipeline(
        device,
        &pl,
        &shader,
        "solid_pipeline",
        ("vs_instanced", "fs_solid"),
        &[instance_layout()],
        wgpu::PrimitiveTopology::TriangleList,
        None,
        true,
    );
    let glow_pipeline = make_scene_pipeline(
        device,
        &pl,
        &shader,
        "glow_pipeline",
        ("vs_instanced", "fs_glow"),
        &[instance_layout()],
        wgpu::PrimitiveTopology::TriangleList,
        Some(wgpu::BlendState::ALPHA_BLENDING),
        false,
    );
    let line_pipeline = make_scene_pipeline(
        device,
        &pl,
        &shader,
        "line_pipeline",
        ("vs_line", "fs_line"),
        &[wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<[f32; 3]>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &LINE_ATTRIBUTES,
        }],
        wgpu::PrimitiveTopology::LineStrip,
        None,
        false,
    );

    let background_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("background_stars"),
        contents: if background.is_empty() {
            bytemuck::bytes_of(&[0u8; 4])
        } else {
            bytemuck::cast_slice(background)
        },
        usage: wgpu::BufferUsages::VERTEX,
    });

    let path = path.filter(|p| p.len() >= 2).map(|points| {
        let raw: Vec<[f32; 3]> = points.iter().map(|p| p.to_array()).collect();
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("debug_path"),
            contents: bytemuck::cast_slice(&raw),
            usage: wgpu::BufferUsages::VERTEX,
        });
        (buffer, raw.len() as u32)
    });

    SceneResources {
        globals_buffer,
        globals_bind_group,
        solid_pipeline,
        glow_pipeline,
        line_pipeline,
        solid: InstanceBuffer::new(device, "solid_instances", INSTANCE_CAPACITY),
        glow: InstanceBuffer::new(device, "glow_instances", INSTANCE_CAPACITY),
        background: background_buffer,
        background_len: background.len() as u32,
        path,
    }
}

impl SceneResources {
    pub(crate) fn write_globals(&self, queue: &wgpu::Queue, globals: &SceneGlobals) {
        queue.write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(globals));
    }

    /// Solid bodies first so the translucent layers depth-test against them.
    pub(crate) fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_bind_group(0, &self.globals_bind_group, &[]);

        pass.set_pipeline(&self.solid_pipeline);
        self.solid.draw(pass);

        pass.set_pipeline(&self.glow_pipeline);
        if self.background_len > 0 {
            pass.set_vertex_buffer(0, self.background.slice(..));
            pass.draw(0..6, 0..self.background_len);
        }
        self.glow.draw(pass);

        if let Some((buffer, count)) = &self.path {
            pass.set_pipeline(&self.line_pipeline);
            pass.set_vertex_buffer(0, buffer.slice(..));
            pass.draw(0..*count, 0..1);
        }
    }
}
