//! WGPU-based rendering engine for the tabletop viewer
//!
//! Owns the device, surface and the GPU side of the uniform model: one frame
//! uniform buffer, one dynamic buffer of per-draw object uniforms and the
//! pipelines of the scene and shadow programs. Each frame is rendered in two
//! passes from the draws a [`FrameRecorder`] collected: depth from light 0
//! into the shadow map, then the lit scene into the surface.

use std::sync::Arc;
use wgpu::{Device, TextureFormat};
use winit::window::Window;

use crate::{
    config::ViewerConfig,
    error::ViewerError,
    gfx::{
        resources::{BoundTexture, TextureResource},
        scene::{mesh::DrawMesh, SceneManager},
        shader::{FrameUniform, ObjectUniform},
    },
    wgpu_utils::{
        binding_types, BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc,
        DynamicUniformBuffer, UniformBuffer,
    },
};

use super::{
    frame_recorder::FrameRecorder,
    pipeline_manager::{PipelineConfig, PipelineManager},
};

const SCENE_PIPELINE: &str = "Scene";
const SHADOW_PIPELINE: &str = "Shadow";

/// Object records allocated up front; the buffer grows past this on demand
const INITIAL_DRAW_CAPACITY: usize = 32;

pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    clear_color: wgpu::Color,
    pipeline_manager: PipelineManager,

    frame_ubo: UniformBuffer<FrameUniform>,
    frame_bind_group: wgpu::BindGroup,

    object_layout: BindGroupLayoutWithDesc,
    object_buffer: DynamicUniformBuffer<ObjectUniform>,
    object_bind_group: wgpu::BindGroup,

    texture_layout: BindGroupLayoutWithDesc,
    shadow_layout: BindGroupLayoutWithDesc,
    fallback_texture: BoundTexture,
}

impl RenderEngine {
    /// Creates the GPU context for `window` and builds both pipelines
    pub async fn new(window: Arc<Window>, viewer_config: &ViewerConfig) -> Result<Self, ViewerError> {
        let size = window.inner_size();
        let width = if size.width == 0 { viewer_config.window.width } else { size.width };
        let height = if size.height == 0 { viewer_config.window.height } else { size.height };

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        let info = adapter.get_info();
        log::info!("Using adapter {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits {
                    max_texture_dimension_2d: 4096,
                    ..wgpu::Limits::downlevel_defaults()
                },
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .unwrap_or(TextureFormat::Bgra8Unorm);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");

        // group 0: frame uniforms
        let frame_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform())
            .create(&device, "Frame Bind Group Layout");
        let frame_ubo = UniformBuffer::<FrameUniform>::new(&device);
        let frame_bind_group = BindGroupBuilder::new(&frame_layout)
            .resource(frame_ubo.binding_resource())
            .create(&device, "Frame Bind Group");

        // group 1: per-draw object uniforms
        let object_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::dynamic_uniform::<ObjectUniform>())
            .create(&device, "Object Bind Group Layout");
        let object_buffer = DynamicUniformBuffer::new(&device, INITIAL_DRAW_CAPACITY);
        let object_bind_group = BindGroupBuilder::new(&object_layout)
            .resource(object_buffer.binding_resource())
            .create(&device, "Object Bind Group");

        // group 2: object texture
        let texture_layout = BindGroupLayoutBuilder::new()
            .next_binding_fragment(binding_types::texture_2d())
            .next_binding_fragment(binding_types::sampler(wgpu::SamplerBindingType::Filtering))
            .create(&device, "Texture Bind Group Layout");

        // group 3: shadow map
        let shadow_layout = BindGroupLayoutBuilder::new()
            .next_binding_fragment(binding_types::depth_texture_2d())
            .next_binding_fragment(binding_types::sampler(wgpu::SamplerBindingType::Comparison))
            .create(&device, "Shadow Bind Group Layout");

        let fallback_texture = BoundTexture::new(
            &device,
            TextureResource::create_fallback(&device, &queue),
            &texture_layout,
            "Fallback Texture",
        );

        let device_handle: Arc<Device> = device.into();
        let queue_handle: Arc<wgpu::Queue> = queue.into();
        let mut pipeline_manager = PipelineManager::new(device_handle.clone());

        pipeline_manager.load_shader("scene", include_str!("scene.wgsl"));
        pipeline_manager.load_shader("shadow", include_str!("shadow.wgsl"));

        pipeline_manager.register_pipeline(
            SHADOW_PIPELINE,
            PipelineConfig::default()
                .with_label("SHADOW")
                .with_shader("shadow")
                .with_vertex_only()
                .with_depth_format(TextureResource::DEPTH_FORMAT)
                .with_depth_bias(wgpu::DepthBiasState {
                    constant: 2,
                    slope_scale: 2.0,
                    clamp: 0.0,
                })
                .with_bind_group_layouts(vec![
                    frame_layout.layout.clone(),
                    object_layout.layout.clone(),
                ]),
        );

        pipeline_manager.register_pipeline(
            SCENE_PIPELINE,
            PipelineConfig::default()
                .with_label("SCENE")
                .with_shader("scene")
                .with_depth_format(TextureResource::DEPTH_FORMAT)
                .with_color_targets(vec![Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })])
                .with_bind_group_layouts(vec![
                    frame_layout.layout.clone(),
                    object_layout.layout.clone(),
                    texture_layout.layout.clone(),
                    shadow_layout.layout.clone(),
                ]),
        );

        if let Err(errors) = pipeline_manager.create_all_pipelines() {
            for error in errors {
                log::error!("{}", error);
            }
        }

        let [r, g, b, a] = viewer_config.clear_color;

        Ok(RenderEngine {
            surface,
            device: device_handle,
            queue: queue_handle,
            config,
            depth_texture,
            clear_color: wgpu::Color { r, g, b, a },
            pipeline_manager,
            frame_ubo,
            frame_bind_group,
            object_layout,
            object_buffer,
            object_bind_group,
            texture_layout,
            shadow_layout,
            fallback_texture,
        })
    }

    /// Uploads the recorded uniforms and replays the recorded draws
    ///
    /// Draws need the scene's GPU meshes; before the scene is prepared only
    /// the clear color is rendered.
    pub fn render_frame(
        &mut self,
        recorder: &FrameRecorder,
        scene: &SceneManager,
    ) -> Result<(), wgpu::SurfaceError> {
        self.frame_ubo
            .update_content(&self.queue, *recorder.frame_uniform());

        let objects = recorder.object_uniforms();
        if self.object_buffer.ensure_capacity(&self.device, objects.len()) {
            self.object_bind_group = BindGroupBuilder::new(&self.object_layout)
                .resource(self.object_buffer.binding_resource())
                .create(&self.device, "Object Bind Group");
        }
        self.object_buffer.write(&self.queue, &objects);

        let surface_texture = self.surface.get_current_texture()?;
        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let gpu = scene.gpu_resources();

        // PASS 1: depth from light 0
        if let Some(gpu) = gpu {
            let mut shadow_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Shadow Depth Pass"),
                color_attachments: &[],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &gpu.shadow_map.resource.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if let Some(pipeline) = self.pipeline_manager.pipeline(SHADOW_PIPELINE) {
                shadow_pass.set_pipeline(pipeline);
                shadow_pass.set_bind_group(0, &self.frame_bind_group, &[]);

                for (index, draw) in recorder.draws().iter().enumerate() {
                    let offset = self.object_buffer.offset(index);
                    shadow_pass.set_bind_group(1, &self.object_bind_group, &[offset]);
                    shadow_pass.draw_mesh(gpu.meshes.get(draw.shape));
                }
            }
        }

        // PASS 2: lit scene
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if let (Some(gpu), Some(pipeline)) =
                (gpu, self.pipeline_manager.pipeline(SCENE_PIPELINE))
            {
                render_pass.set_pipeline(pipeline);
                render_pass.set_bind_group(0, &self.frame_bind_group, &[]);
                render_pass.set_bind_group(3, &gpu.shadow_map.bind_group, &[]);

                for (index, draw) in recorder.draws().iter().enumerate() {
                    let texture = draw
                        .texture
                        .and_then(|slot| scene.texture(slot))
                        .unwrap_or(&self.fallback_texture);

                    let offset = self.object_buffer.offset(index);
                    render_pass.set_bind_group(1, &self.object_bind_group, &[offset]);
                    render_pass.set_bind_group(2, &texture.bind_group, &[]);
                    render_pass.draw_mesh(gpu.meshes.get(draw.shape));
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }

    /// Resizes the surface and recreates the depth buffer; zero sizes are
    /// ignored
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.reconfigure();

        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }

    /// Reapplies the current surface configuration after a lost surface
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Layout object textures are bound with (group 2)
    pub fn texture_layout(&self) -> &BindGroupLayoutWithDesc {
        &self.texture_layout
    }

    /// Layout the shadow map is bound with (group 3)
    pub fn shadow_layout(&self) -> &BindGroupLayoutWithDesc {
        &self.shadow_layout
    }
}
