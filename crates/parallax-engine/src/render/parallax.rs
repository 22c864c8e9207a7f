use glam::Vec2;
use wgpu::util::DeviceExt;

use crate::assets::ImageAsset;
use crate::pointer::PointerState;
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{ParallaxScene, ParallaxUniforms, PlaneVertex, PLANE_INDICES, PLANE_VERTICES};

const SHADER_SRC: &str = include_str!("shaders/parallax.wgsl");

/// Bounds the largest shift to a fiftieth of the texture so the effect stays
/// subtle. Must match the constant of the same name in `parallax.wgsl`.
pub const DISPLACEMENT_DIVISOR: f32 = 50.0;

/// uv offset the fragment stage applies for one depth sample.
///
/// `depth_sample` is the raw red channel in `[0, 1]`. Brighter (nearer)
/// samples move less: `1.0` yields no shift, `0.0` the full
/// `angle / DISPLACEMENT_DIVISOR`.
#[inline]
pub fn displacement(depth_sample: f32, pointer: PointerState) -> Vec2 {
    pointer.as_vec2() * ((1.0 - depth_sample) / DISPLACEMENT_DIVISOR)
}

/// The uv at which the color texture is sampled for a fragment at `uv`.
#[inline]
pub fn displaced_uv(uv: Vec2, depth_sample: f32, pointer: PointerState) -> Vec2 {
    uv + displacement(depth_sample, pointer)
}

/// Draws the scene's plane with the parallax shader.
///
/// Textures are uploaded from the scene's images on the first frame and kept
/// for the renderer's lifetime; after that only the uniform block is written
/// each frame.
#[derive(Default)]
pub struct ParallaxRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,

    bind_group: Option<wgpu::BindGroup>,
    uniform_ubo: Option<wgpu::Buffer>,
    sampler: Option<wgpu::Sampler>,

    color_view: Option<wgpu::TextureView>,
    depth_view: Option<wgpu::TextureView>,
    textures_rejected: bool,

    plane_vbo: Option<wgpu::Buffer>,
    plane_ibo: Option<wgpu::Buffer>,
}

impl ParallaxRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, scene: &ParallaxScene) {
        self.ensure_pipeline(ctx);
        self.ensure_textures(ctx, scene);
        self.ensure_sampler(ctx);
        self.ensure_static_buffers(ctx);
        self.ensure_bindings(ctx);
        self.write_uniforms(ctx, scene.uniforms());

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(plane_vbo) = self.plane_vbo.as_ref() else { return };
        let Some(plane_ibo) = self.plane_ibo.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("parallax pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
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
        rpass.set_vertex_buffer(0, plane_vbo.slice(..));
        rpass.set_index_buffer(plane_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..PLANE_INDICES.len() as u32, 0, 0..1);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }
        log::debug!("building parallax pipeline for {:?}", ctx.surface_format);

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("parallax shader"),
            source: wgpu::ShaderSource::Wgsl(SHADER_SRC.into()),
        });

        let texture_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        };

        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("parallax bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: Some(ParallaxUniforms::min_binding_size()),
                    },
                    count: None,
                },
                texture_entry(1),
                texture_entry(2),
                wgpu::BindGroupLayoutEntry {
                    binding: 3,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("parallax pipeline layout"),
            bind_group_layouts: &[&bgl],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("parallax pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[PlaneVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
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

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bgl);
        self.bind_group = None;
    }

    fn ensure_textures(&mut self, ctx: &RenderCtx<'_>, scene: &ParallaxScene) {
        if self.textures_rejected || (self.color_view.is_some() && self.depth_view.is_some()) {
            return;
        }

        let images = scene.images();
        let max = ctx.device.limits().max_texture_dimension_2d;
        for img in [&images.color, &images.depth] {
            if img.width() > max || img.height() > max {
                log::error!(
                    "'{}' is {}x{}, larger than the device texture limit {max}; nothing will be drawn",
                    img.name(),
                    img.width(),
                    img.height()
                );
                self.textures_rejected = true;
                return;
            }
        }

        // The photo is sRGB-encoded. The depth map holds linear values that
        // the shader reads back verbatim.
        self.color_view = Some(upload_rgba8(ctx, &images.color, wgpu::TextureFormat::Rgba8UnormSrgb));
        self.depth_view = Some(upload_rgba8(ctx, &images.depth, wgpu::TextureFormat::Rgba8Unorm));
        self.bind_group = None;
    }

    fn ensure_sampler(&mut self, ctx: &RenderCtx<'_>) {
        if self.sampler.is_some() {
            return;
        }
        // Displaced lookups near the border land outside [0, 1]; clamping
        // repeats the edge texel.
        self.sampler = Some(ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("parallax sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        }));
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.plane_vbo.is_some() && self.plane_ibo.is_some() {
            return;
        }

        self.plane_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("parallax plane vbo"),
            contents: bytemuck::cast_slice(&PLANE_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        }));

        self.plane_ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("parallax plane ibo"),
            contents: bytemuck::cast_slice(&PLANE_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() {
            return;
        }
        let (Some(bgl), Some(color), Some(depth), Some(sampler)) = (
            self.bind_group_layout.as_ref(),
            self.color_view.as_ref(),
            self.depth_view.as_ref(),
            self.sampler.as_ref(),
        ) else {
            return;
        };

        let ubo = self.uniform_ubo.get_or_insert_with(|| {
            ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("parallax uniform ubo"),
                size: std::mem::size_of::<ParallaxUniforms>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        });

        self.bind_group = Some(ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("parallax bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(color),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(depth),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        }));
    }

    fn write_uniforms(&self, ctx: &RenderCtx<'_>, uniforms: &ParallaxUniforms) {
        let Some(ubo) = self.uniform_ubo.as_ref() else { return };
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(uniforms));
    }
}

fn upload_rgba8(ctx: &RenderCtx<'_>, img: &ImageAsset, format: wgpu::TextureFormat) -> wgpu::TextureView {
    let size = wgpu::Extent3d {
        width: img.width(),
        height: img.height(),
        depth_or_array_layers: 1,
    };

    let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
        label: Some(img.name()),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    ctx.queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        img.pixels(),
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * img.width()),
            rows_per_image: Some(img.height()),
        },
        size,
    );
    log::debug!("uploaded '{}' as {format:?}", img.name());

    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, y: f32) -> PointerState {
        PointerState { x_angle: x, y_angle: y }
    }

    #[test]
    fn nearest_depth_does_not_move() {
        assert_eq!(displacement(1.0, p(1.0, -1.0)), Vec2::ZERO);
        assert_eq!(displacement(1.0, p(-0.3, 0.8)), Vec2::ZERO);
    }

    #[test]
    fn farthest_depth_moves_most() {
        assert_eq!(displacement(0.0, p(1.0, -1.0)), Vec2::new(0.02, -0.02));
        assert_eq!(displacement(0.0, p(-0.5, 0.25)), Vec2::new(-0.5 / 50.0, 0.25 / 50.0));
    }

    #[test]
    fn displacement_is_linear_in_inverted_depth() {
        for d in [0.0f32, 0.1, 0.25, 0.5, 0.9, 1.0] {
            for (ax, ay) in [(1.0f32, 1.0f32), (-1.0, 0.5), (0.3, -0.7)] {
                let got = displacement(d, p(ax, ay));
                let want = Vec2::new((1.0 - d) * ax / 50.0, (1.0 - d) * ay / 50.0);
                assert!((got.x - want.x).abs() < 1e-7, "d={d} ax={ax}");
                assert!((got.y - want.y).abs() < 1e-7, "d={d} ay={ay}");
            }
        }
    }

    #[test]
    fn centered_pointer_samples_in_place() {
        let uv = Vec2::new(0.3, 0.6);
        assert_eq!(displaced_uv(uv, 0.0, PointerState::CENTER), uv);
    }

    #[test]
    fn shader_parses_and_validates() {
        use wgpu::naga;

        let module = naga::front::wgsl::parse_str(SHADER_SRC)
            .unwrap_or_else(|e| panic!("{}", e.emit_to_string(SHADER_SRC)));
        naga::valid::Validator::new(naga::valid::ValidationFlags::all(), naga::valid::Capabilities::empty())
            .validate(&module)
            .unwrap_or_else(|e| panic!("parallax.wgsl failed validation: {e:?}"));

        let stages: Vec<_> = module
            .entry_points
            .iter()
            .map(|ep| (ep.name.as_str(), ep.stage))
            .collect();
        assert!(stages.contains(&("vs_main", naga::ShaderStage::Vertex)));
        assert!(stages.contains(&("fs_main", naga::ShaderStage::Fragment)));
    }

    #[test]
    fn shader_divisor_matches_cpu_reference() {
        assert!(SHADER_SRC.contains("const DISPLACEMENT_DIVISOR: f32 = 50.0;"));
        assert_eq!(DISPLACEMENT_DIVISOR, 50.0);
    }

    #[test]
    fn shader_inverts_red_channel_of_depth() {
        assert!(SHADER_SRC.contains("1.0 - textureSample(depth_tex, tex_sampler, texel_coord(f.uv)).r"));
    }
}
