use std::borrow::Cow;
use std::path::PathBuf;

use anyhow::{Context, Result};
use bytemuck::{Pod, Zeroable};
use fractals_view::sync::param;
use fractals_view::{DVec2, ParamValue, RenderingBackend};

use crate::render::{RenderCtx, RenderTarget};

const EMBEDDED_SHADER: &str = include_str!("shaders/fractal.wgsl");

/// Where the fractal shader's WGSL comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ShaderSource {
    /// Compiled into the binary.
    #[default]
    Embedded,
    /// Read from disk at build and reload time.
    File(PathBuf),
}

impl ShaderSource {
    fn load(&self) -> Result<Cow<'static, str>> {
        match self {
            ShaderSource::Embedded => Ok(Cow::Borrowed(EMBEDDED_SHADER)),
            ShaderSource::File(path) => std::fs::read_to_string(path)
                .map(Cow::Owned)
                .with_context(|| format!("failed to read shader {}", path.display())),
        }
    }
}

/// Uniform block mirrored by `Params` in `fractal.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
struct FractalUniform {
    screen_size: [f32; 2],
    center_offset: [f32; 2],
    move_offset: [f32; 2],
    julia_c: [f32; 2],
    zoom: f32,
    mode: i32,
    color_mode: i32,
    _pad: u32,
}

/// Full-screen escape-time fractal renderer.
///
/// Parameters pushed through [`RenderingBackend`] are staged on the CPU and
/// uploaded as one uniform block right before the draw, so a frame never
/// mixes values from two different pushes.
///
/// Precision: the GPU evaluates in `f32`, so detail breaks down past a zoom
/// of roughly 1e5 even though the host keeps `f64`.
#[derive(Default)]
pub struct FractalRenderer {
    source: ShaderSource,
    staged: FractalUniform,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group: Option<wgpu::BindGroup>,
    uniform_buffer: Option<wgpu::Buffer>,

    reload_requested: bool,
    warned_unknown: bool,
}

impl FractalRenderer {
    pub fn new(source: ShaderSource) -> Self {
        Self {
            source,
            ..Self::default()
        }
    }

    pub fn source(&self) -> &ShaderSource {
        &self.source
    }

    /// Rebuilds the pipeline from the shader source.
    ///
    /// If the source cannot be read the current pipeline stays in place and
    /// `false` is returned.
    pub fn reload(&mut self, ctx: &RenderCtx<'_>) -> bool {
        self.reload_requested = true;
        self.prepare(ctx)
    }

    /// Ensures a pipeline exists for the current surface format.
    ///
    /// Returns `true` when the pipeline was (re)built; callers push the full
    /// viewport again in that case.
    pub fn prepare(&mut self, ctx: &RenderCtx<'_>) -> bool {
        let format_matches = self.pipeline_format == Some(ctx.surface_format);
        if format_matches && self.pipeline.is_some() && !self.reload_requested {
            return false;
        }
        let reloading = std::mem::take(&mut self.reload_requested);

        let source = match self.source.load() {
            Ok(src) => src,
            Err(err) if self.pipeline.is_some() && format_matches => {
                log::error!("shader reload failed, keeping current pipeline: {err:#}");
                return false;
            }
            Err(err) => {
                log::warn!("{err:#}; using embedded shader");
                Cow::Borrowed(EMBEDDED_SHADER)
            }
        };

        self.build_pipeline(ctx, source);
        if reloading {
            log::info!("fractal shader reloaded ({:?})", self.source);
        }
        true
    }

    /// Draws the fractal over the whole target.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        self.prepare(ctx);

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(ubo) = self.uniform_buffer.as_ref() else { return };

        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&self.staged));

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("fractal pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        // Single oversized triangle generated from vertex_index.
        rpass.draw(0..3, 0..1);
    }

    fn build_pipeline(&mut self, ctx: &RenderCtx<'_>, source: Cow<'static, str>) {
        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("fractal shader"),
            source: wgpu::ShaderSource::Wgsl(source),
        });

        let uniform_size = std::mem::size_of::<FractalUniform>() as u64;

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("fractal bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: wgpu::BufferSize::new(uniform_size),
                        },
                        count: None,
                    }],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("fractal pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("fractal pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let uniform_buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("fractal ubo"),
            size: uniform_size,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("fractal bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group = Some(bind_group);
        self.uniform_buffer = Some(uniform_buffer);
    }
}

fn to_f32x2(v: DVec2) -> [f32; 2] {
    [v.x as f32, v.y as f32]
}

impl RenderingBackend for FractalRenderer {
    fn set_parameter(&mut self, name: &str, value: ParamValue) {
        let u = &mut self.staged;
        match (name, value) {
            (param::SCREEN_SIZE, ParamValue::DVec2(v)) => u.screen_size = to_f32x2(v),
            (param::CENTER_OFFSET, ParamValue::DVec2(v)) => u.center_offset = to_f32x2(v),
            (param::MOVE_OFFSET, ParamValue::DVec2(v)) => u.move_offset = to_f32x2(v),
            (param::JULIA_C, ParamValue::DVec2(v)) => u.julia_c = to_f32x2(v),
            (param::ZOOM, ParamValue::Double(z)) => u.zoom = z as f32,
            (param::MODE, ParamValue::Int(m)) => u.mode = m,
            (param::COLOR_MODE, ParamValue::Int(m)) => u.color_mode = m,
            (name, value) => {
                if !self.warned_unknown {
                    log::debug!("FractalRenderer: ignoring parameter {name:?} = {value:?}");
                    self.warned_unknown = true;
                }
            }
        }
    }
}
