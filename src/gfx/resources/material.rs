//! Phong materials looked up by tag
//!
//! Materials are plain values pushed into the `material.*` uniforms before
//! each draw that names one.

use cgmath::Vector3;

use crate::gfx::shader::{uniform_slot::material_uniform_name, MaterialField, ShaderInterface};

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectMaterial {
    pub tag: String,
    pub ambient_color: Vector3<f32>,
    pub ambient_strength: f32,
    pub diffuse_color: Vector3<f32>,
    pub specular_color: Vector3<f32>,
    pub shininess: f32,
}

impl ObjectMaterial {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ambient_color: Vector3::new(0.0, 0.0, 0.0),
            ambient_strength: 0.0,
            diffuse_color: Vector3::new(0.0, 0.0, 0.0),
            specular_color: Vector3::new(0.0, 0.0, 0.0),
            shininess: 0.0,
        }
    }

    /// Builder pattern: Set ambient color and strength
    pub fn with_ambient(mut self, r: f32, g: f32, b: f32, strength: f32) -> Self {
        self.ambient_color = Vector3::new(r, g, b);
        self.ambient_strength = strength;
        self
    }

    /// Builder pattern: Set diffuse color
    pub fn with_diffuse(mut self, r: f32, g: f32, b: f32) -> Self {
        self.diffuse_color = Vector3::new(r, g, b);
        self
    }

    /// Builder pattern: Set specular color and shininess exponent
    pub fn with_specular(mut self, r: f32, g: f32, b: f32, shininess: f32) -> Self {
        self.specular_color = Vector3::new(r, g, b);
        self.shininess = shininess;
        self
    }

    /// Writes every `material.*` uniform
    pub fn apply<S: ShaderInterface + ?Sized>(&self, shader: &mut S) {
        shader.set_vec3_value(
            &material_uniform_name(MaterialField::AmbientColor),
            self.ambient_color,
        );
        shader.set_float_value(
            &material_uniform_name(MaterialField::AmbientStrength),
            self.ambient_strength,
        );
        shader.set_vec3_value(
            &material_uniform_name(MaterialField::DiffuseColor),
            self.diffuse_color,
        );
        shader.set_vec3_value(
            &material_uniform_name(MaterialField::SpecularColor),
            self.specular_color,
        );
        shader.set_float_value(&material_uniform_name(MaterialField::Shininess), self.shininess);
    }
}

/// Ordered material catalog with linear lookup by tag
#[derive(Debug, Clone, Default)]
pub struct MaterialLibrary {
    materials: Vec<ObjectMaterial>,
}

impl MaterialLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// The surface finishes used by the tabletop scene
    pub fn tabletop() -> Self {
        let mut library = Self::new();
        library.add_material(
            ObjectMaterial::new("gold")
                .with_ambient(0.25, 0.25, 0.15, 0.4)
                .with_diffuse(0.3, 0.3, 0.2)
                .with_specular(0.5, 0.45, 0.35, 30.0),
        );
        library.add_material(
            ObjectMaterial::new("cement")
                .with_ambient(0.3, 0.3, 0.3, 0.4)
                .with_diffuse(0.5, 0.5, 0.5)
                .with_specular(0.5, 0.5, 0.5, 0.3),
        );
        library.add_material(
            ObjectMaterial::new("wood")
                .with_ambient(0.06, 0.04, 0.12, 0.1)
                .with_diffuse(0.55, 0.55, 0.35)
                .with_specular(0.01, 0.01, 0.01, 0.01),
        );
        library.add_material(
            ObjectMaterial::new("tile")
                .with_ambient(0.25, 0.35, 0.45, 0.4)
                .with_diffuse(0.3, 0.2, 0.1)
                .with_specular(0.5, 0.4, 0.3, 15.0),
        );
        library.add_material(
            ObjectMaterial::new("glass")
                .with_ambient(0.1, 0.1, 0.1, 0.3)
                .with_diffuse(0.7, 0.6, 0.5)
                .with_specular(0.3, 0.3, 0.3, 20.0),
        );
        library.add_material(
            ObjectMaterial::new("clay")
                .with_ambient(0.05, 0.05, 0.06, 0.2)
                .with_diffuse(0.4, 0.4, 0.5)
                .with_specular(0.5, 0.5, 0.6, 5.0),
        );
        library.add_material(
            ObjectMaterial::new("cloth")
                .with_ambient(0.25, 0.2, 0.15, 0.05)
                .with_diffuse(0.2, 0.2, 0.1)
                .with_specular(0.1, 0.1, 0.1, 0.1),
        );
        library.add_material(
            ObjectMaterial::new("paper")
                .with_ambient(0.6, 0.6, 0.5, 0.05)
                .with_diffuse(0.08, 0.1, 0.1)
                .with_specular(0.3, 0.1, 0.1, 0.5),
        );
        library
    }

    pub fn add_material(&mut self, material: ObjectMaterial) {
        self.materials.push(material);
    }

    /// First material registered under `tag`
    pub fn find_material(&self, tag: &str) -> Option<&ObjectMaterial> {
        self.materials.iter().find(|material| material.tag == tag)
    }

    pub fn list_materials(&self) -> impl Iterator<Item = &str> {
        self.materials.iter().map(|material| material.tag.as_str())
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::shader::{testing::RecordingShader, UniformValue};

    #[test]
    fn tabletop_catalog_has_all_finishes() {
        let library = MaterialLibrary::tabletop();
        let tags: Vec<&str> = library.list_materials().collect();
        assert_eq!(
            tags,
            ["gold", "cement", "wood", "tile", "glass", "clay", "cloth", "paper"]
        );
    }

    #[test]
    fn lookup_is_by_exact_tag() {
        let library = MaterialLibrary::tabletop();
        let glass = library.find_material("glass").unwrap();
        assert_eq!(glass.shininess, 20.0);
        assert_eq!(glass.diffuse_color, Vector3::new(0.7, 0.6, 0.5));

        assert!(library.find_material("Glass").is_none());
        assert!(library.find_material("marble").is_none());
    }

    #[test]
    fn first_registration_wins() {
        let mut library = MaterialLibrary::new();
        library.add_material(ObjectMaterial::new("wood").with_specular(0.0, 0.0, 0.0, 1.0));
        library.add_material(ObjectMaterial::new("wood").with_specular(0.0, 0.0, 0.0, 2.0));
        assert_eq!(library.find_material("wood").unwrap().shininess, 1.0);
    }

    #[test]
    fn apply_writes_all_material_uniforms() {
        let mut shader = RecordingShader::default();
        MaterialLibrary::tabletop()
            .find_material("clay")
            .unwrap()
            .apply(&mut shader);

        assert_eq!(
            shader.names(),
            [
                "material.ambientColor",
                "material.ambientStrength",
                "material.diffuseColor",
                "material.specularColor",
                "material.shininess",
            ]
        );
        assert_eq!(shader.writes[4].1, UniformValue::Float(5.0));
    }
}
