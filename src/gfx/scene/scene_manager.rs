//! Scene preparation and per-object draw sequencing
//!
//! The manager owns the catalogs the desk scene is built from (textures,
//! materials, lights, placed objects) together with their GPU resources.
//! Rendering walks the object list and, for each object, writes the uniforms
//! it needs into a [`DrawSink`] before asking it to draw the shape.

use std::path::{Path, PathBuf};

use cgmath::{Matrix4, Point3, Vector2, Vector3, Vector4};

use crate::{
    error::TextureError,
    gfx::{
        rendering::RenderEngine,
        resources::{
            texture_resource::{load_texture_file, SHADOW_MAP_SIZE},
            BoundTexture, MaterialLibrary, ObjectMaterial, SceneLights, TextureRegistry,
            TextureResource,
        },
        shader::{uniform_slot, ShaderInterface},
    },
};

use super::{
    mesh::{ShapeKind, ShapeMeshes},
    scene_object::{SceneObject, Surface},
    tabletop::{tabletop_objects, TEXTURE_CATALOG},
    transform::Transform,
};

/// Point the shadow caster looks at
fn shadow_target() -> Point3<f32> {
    Point3::new(10.0, 0.0, 0.0)
}

/// Texture unit every object texture is bound to
const OBJECT_TEXTURE_UNIT: i32 = 0;

/// Uniform target that can also bind textures and issue draws
pub trait DrawSink: ShaderInterface {
    /// Binds the texture in registry `slot` to the object texture unit
    fn bind_texture(&mut self, slot: usize);
    fn unbind_texture(&mut self);
    fn draw_shape(&mut self, shape: ShapeKind);
}

/// GPU resources shared by every draw of the scene
pub struct SceneGpuResources {
    pub meshes: ShapeMeshes,
    pub shadow_map: BoundTexture,
}

pub struct SceneManager<T = BoundTexture> {
    texture_dir: PathBuf,
    textures: TextureRegistry<T>,
    materials: MaterialLibrary,
    lights: SceneLights,
    objects: Vec<SceneObject>,
    gpu: Option<SceneGpuResources>,
}

impl<T> SceneManager<T> {
    /// The desk scene with its materials and lights; no textures are loaded yet
    pub fn new(texture_dir: impl Into<PathBuf>) -> Self {
        Self {
            texture_dir: texture_dir.into(),
            textures: TextureRegistry::new(),
            materials: MaterialLibrary::tabletop(),
            lights: SceneLights::tabletop(),
            objects: tabletop_objects(),
            gpu: None,
        }
    }

    pub fn texture_dir(&self) -> &Path {
        &self.texture_dir
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn materials(&self) -> &MaterialLibrary {
        &self.materials
    }

    pub fn lights(&self) -> &SceneLights {
        &self.lights
    }

    pub fn gpu_resources(&self) -> Option<&SceneGpuResources> {
        self.gpu.as_ref()
    }

    pub fn texture(&self, slot: usize) -> Option<&T> {
        self.textures.get(slot)
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Stores an already uploaded texture under `tag`
    pub fn register_texture(&mut self, tag: &str, texture: T) -> Result<usize, TextureError> {
        let slot = self.textures.register(tag, texture)?;
        log::debug!("Texture '{}' bound to slot {}", tag, slot);
        Ok(slot)
    }

    /// Slot of the texture registered under `tag`
    pub fn find_texture_slot(&self, tag: &str) -> Option<usize> {
        let slot = self.textures.find_slot(tag);
        if slot.is_none() {
            log::error!("No texture registered under tag '{}'", tag);
        }
        slot
    }

    pub fn find_material(&self, tag: &str) -> Option<&ObjectMaterial> {
        let material = self.materials.find_material(tag);
        if material.is_none() {
            log::error!("No material registered under tag '{}'", tag);
        }
        material
    }

    /// Writes `model` for the given scale, rotation (degrees) and position
    pub fn set_transformations<S: ShaderInterface + ?Sized>(
        shader: &mut S,
        scale: Vector3<f32>,
        rotation: Vector3<f32>,
        position: Vector3<f32>,
    ) {
        let model = Transform::new(scale, rotation, position).model_matrix();
        shader.set_mat4_value(uniform_slot::MODEL, model);
    }

    /// Switches the next draws to a flat color
    pub fn set_shader_color<S: ShaderInterface + ?Sized>(shader: &mut S, color: Vector4<f32>) {
        shader.set_bool_value(uniform_slot::USE_TEXTURE, false);
        shader.set_vec4_value(uniform_slot::OBJECT_COLOR, color);
    }

    /// Switches the next draws to the texture tagged `tag`
    ///
    /// An unknown tag logs an error and disables texturing so the draw falls
    /// back to the current object color.
    pub fn set_shader_texture<S: DrawSink + ?Sized>(&self, sink: &mut S, tag: &str) {
        match self.find_texture_slot(tag) {
            Some(slot) => {
                sink.set_bool_value(uniform_slot::USE_TEXTURE, true);
                sink.set_sampler2d_value(uniform_slot::OBJECT_TEXTURE, OBJECT_TEXTURE_UNIT);
                sink.bind_texture(slot);
            }
            None => {
                sink.set_bool_value(uniform_slot::USE_TEXTURE, false);
                sink.unbind_texture();
            }
        }
    }

    pub fn set_texture_uv_scale<S: ShaderInterface + ?Sized>(shader: &mut S, u: f32, v: f32) {
        shader.set_vec2_value(uniform_slot::UV_SCALE, Vector2::new(u, v));
    }

    /// Writes the `material.*` uniforms of `tag`; leaves them untouched when
    /// the tag is unknown
    pub fn set_shader_material<S: ShaderInterface + ?Sized>(&self, shader: &mut S, tag: &str) {
        if let Some(material) = self.find_material(tag) {
            material.apply(shader);
        }
    }

    /// Pushes every light, the shadow transform and the lighting switch
    pub fn setup_scene_lights<S: ShaderInterface + ?Sized>(&self, shader: &mut S) {
        self.lights.apply(shader, shadow_target());
        log::debug!("Pushed {} light sources", self.lights.sources().len());
    }

    /// Light-space transform used by the shadow pass
    pub fn light_space_matrix(&self) -> Matrix4<f32> {
        self.lights.light_space_matrix(shadow_target())
    }

    /// Issues one draw per scene object, in list order
    pub fn render_scene<S: DrawSink + ?Sized>(&self, sink: &mut S) {
        for object in &self.objects {
            let transform = &object.transform;
            Self::set_transformations(
                sink,
                transform.scale,
                transform.rotation,
                transform.position,
            );

            if let Some(material) = &object.material {
                self.set_shader_material(sink, material);
            }

            match &object.surface {
                Surface::Texture(tag) => self.set_shader_texture(sink, tag),
                Surface::Color(color) => Self::set_shader_color(sink, *color),
            }

            Self::set_texture_uv_scale(sink, object.uv_scale.x, object.uv_scale.y);

            sink.draw_shape(object.shape);
            sink.unbind_texture();
        }
    }
}

impl SceneManager<BoundTexture> {
    /// Uploads meshes, the shadow map and every catalog texture, then pushes
    /// the lights
    ///
    /// Texture failures are logged and leave the tag unbound; the scene still
    /// renders.
    pub fn prepare_scene<S: ShaderInterface + ?Sized>(
        &mut self,
        engine: &RenderEngine,
        shader: &mut S,
    ) {
        let device = engine.device();

        let shadow_resource = TextureResource::create_shadow_map(device, SHADOW_MAP_SIZE);
        let shadow_map =
            BoundTexture::new(device, shadow_resource, engine.shadow_layout(), "Shadow Map");
        self.gpu = Some(SceneGpuResources {
            meshes: ShapeMeshes::load(device),
            shadow_map,
        });

        for (file, tag) in TEXTURE_CATALOG {
            if let Err(err) = self.create_texture(engine, file, tag) {
                log::error!("Could not load texture '{}' from {}: {}", tag, file, err);
            }
        }
        log::info!(
            "Loaded {} of {} textures from {}",
            self.textures.len(),
            TEXTURE_CATALOG.len(),
            self.texture_dir.display()
        );

        self.setup_scene_lights(shader);
    }

    /// Loads `file` from the texture directory and registers it under `tag`
    pub fn create_texture(
        &mut self,
        engine: &RenderEngine,
        file: &str,
        tag: &str,
    ) -> Result<usize, TextureError> {
        if self.textures.is_full() {
            return Err(TextureError::SlotsExhausted(self.textures.len()));
        }

        let path = self.texture_dir.join(file);
        let image = load_texture_file(&path)?;
        image.check_size(engine.device().limits().max_texture_dimension_2d)?;
        log::info!(
            "Loaded texture '{}': {}x{}, {} channels",
            tag,
            image.width,
            image.height,
            image.channels
        );

        let resource = TextureResource::create_from_image(engine.device(), engine.queue(), &image, tag);
        let bound = BoundTexture::new(engine.device(), resource, engine.texture_layout(), tag);
        self.register_texture(tag, bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{
        rendering::frame_recorder::FrameRecorder,
        shader::{testing::RecordingShader, MaterialUniform, UniformValue},
    };

    /// Scene with every catalog texture registered, in catalog order
    fn textured_scene() -> SceneManager<()> {
        let mut scene = SceneManager::new("resources");
        for (_, tag) in TEXTURE_CATALOG {
            scene.register_texture(tag, ()).unwrap();
        }
        scene
    }

    #[test]
    fn registered_tags_keep_their_slot() {
        let scene = textured_scene();
        assert_eq!(scene.texture_count(), TEXTURE_CATALOG.len());
        assert_eq!(scene.find_texture_slot("floor"), Some(0));
        assert_eq!(scene.find_texture_slot("drywall"), Some(12));
        assert_eq!(scene.find_texture_slot("floor"), Some(0));
        assert_eq!(scene.find_texture_slot("marble"), None);
    }

    #[test]
    fn render_scene_draws_every_object_in_order() {
        let scene = textured_scene();
        let mut recorder = FrameRecorder::new();
        recorder.begin_frame();
        scene.render_scene(&mut recorder);

        let shapes: Vec<ShapeKind> = recorder.draws().iter().map(|d| d.shape).collect();
        let expected: Vec<ShapeKind> = scene.objects().iter().map(|o| o.shape).collect();
        assert_eq!(shapes, expected);

        let backdrop = &recorder.draws()[0];
        assert_eq!(backdrop.texture, scene.find_texture_slot("backdrop"));
        assert_eq!(backdrop.object.use_texture, 1);

        let book = recorder.draws().last().unwrap();
        assert_eq!(book.texture, scene.find_texture_slot("book"));
        let expected_model: [[f32; 4]; 4] =
            scene.objects().last().unwrap().transform.model_matrix().into();
        assert_eq!(book.object.model, expected_model);
    }

    #[test]
    fn materials_follow_the_object_tags() {
        let scene = textured_scene();
        let mut recorder = FrameRecorder::new();
        scene.render_scene(&mut recorder);

        // floor is wood
        let wood = scene.materials().find_material("wood").unwrap();
        let floor = &recorder.draws()[2].object.material;
        assert_eq!(floor.shininess, wood.shininess);
        assert_eq!(floor.ambient_strength, wood.ambient_strength);
    }

    #[test]
    fn missing_texture_falls_back_to_color() {
        let scene: SceneManager<()> = SceneManager::new("resources");
        let mut recorder = FrameRecorder::new();
        scene.render_scene(&mut recorder);

        assert_eq!(recorder.draws().len(), scene.objects().len());
        assert!(recorder
            .draws()
            .iter()
            .all(|draw| draw.texture.is_none() && draw.object.use_texture == 0));
    }

    #[test]
    fn missing_material_leaves_uniforms_unchanged() {
        let scene: SceneManager<()> = SceneManager::new("resources");
        let mut recorder = FrameRecorder::new();

        scene.set_shader_material(&mut recorder, "glass");
        let before: MaterialUniform = recorder.state().object.material;
        scene.set_shader_material(&mut recorder, "marble");
        assert_eq!(recorder.state().object.material, before);
    }

    #[test]
    fn shader_color_disables_texturing() {
        let mut shader = RecordingShader::default();
        SceneManager::<()>::set_shader_color(&mut shader, Vector4::new(0.5, 0.5, 0.5, 1.0));
        assert_eq!(shader.names(), ["bUseTexture", "objectColor"]);
        assert_eq!(shader.last_value("bUseTexture"), Some(UniformValue::Bool(false)));
    }

    #[test]
    fn set_transformations_writes_model() {
        let mut shader = RecordingShader::default();
        SceneManager::<()>::set_transformations(
            &mut shader,
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 2.0, 3.0),
        );
        assert_eq!(
            shader.last_value("model"),
            Some(UniformValue::Mat4(Matrix4::from_translation(Vector3::new(
                1.0, 2.0, 3.0
            ))))
        );
    }

    #[test]
    fn scene_lights_enable_lighting() {
        let scene: SceneManager<()> = SceneManager::new("resources");
        let mut recorder = FrameRecorder::new();
        scene.setup_scene_lights(&mut recorder);

        let frame = recorder.frame_uniform();
        assert_eq!(frame.use_lighting, 1);
        assert_eq!(frame.lights[0].position, [-8.0, 30.0, 30.0]);
        assert_eq!(frame.lights[0].focal_strength, 2.0);
        let light_space: [[f32; 4]; 4] = scene.light_space_matrix().into();
        assert_eq!(frame.light_view_proj, light_space);
    }
}
