//! The fixed desk scene: texture catalog and object placements

use super::{mesh::ShapeKind, scene_object::SceneObject};

/// `(file name, tag)` pairs loaded from the texture directory at startup
///
/// Files shared by several tags are uploaded once per tag, so every tag owns
/// its own slot.
pub const TEXTURE_CATALOG: [(&str, &str); 13] = [
    ("knife_handle.jpg", "floor"),
    ("body3.jpg", "candelbase"),
    ("body3.jpg", "candelbody"),
    ("silverbase.jpg", "base"),
    ("silverbase.jpg", "top"),
    ("vase.jpg", "vase"),
    ("alexa.jpg", "alexa"),
    ("harddrive.jpg", "drive"),
    ("bookcover.png", "book"),
    ("stainless_end.jpg", "basering"),
    ("stainless_end.jpg", "topring"),
    ("backdrop.jpg", "backdrop"),
    ("drywall.jpg", "drywall"),
];

/// Objects in draw order
pub fn tabletop_objects() -> Vec<SceneObject> {
    vec![
        // walls
        SceneObject::new("backdrop", ShapeKind::Plane)
            .scaled(50.0, 30.0, 50.0)
            .rotated(90.0, 0.0, 0.0)
            .at(0.0, 0.0, -10.0)
            .with_texture("backdrop"),
        SceneObject::new("drywall", ShapeKind::Plane)
            .scaled(50.0, 30.0, 50.0)
            .rotated(90.0, 0.0, 90.0)
            .at(30.0, 0.0, 0.0)
            .with_texture("drywall"),
        SceneObject::new("floor", ShapeKind::Plane)
            .scaled(30.0, 3.5, 10.0)
            .with_material("wood")
            .with_texture("floor"),
        // candle holder
        SceneObject::new("candle bottom ring", ShapeKind::Torus)
            .scaled(0.3, 0.5, 1.5)
            .rotated(85.0, 0.0, 0.0)
            .at(20.0, 0.2, 5.0)
            .with_texture("basering"),
        SceneObject::new("candle lower body", ShapeKind::TaperedCylinder)
            .scaled(0.6, 1.5, 0.8)
            .rotated(180.0, 0.0, 0.0)
            .at(20.0, 1.8, 5.0)
            .with_material("glass")
            .with_texture("candelbase"),
        SceneObject::new("candle base", ShapeKind::Cylinder)
            .scaled(1.0, 0.1, 1.0)
            .at(20.0, 0.0, 5.0)
            .with_material("clay")
            .with_texture("base"),
        SceneObject::new("candle upper body", ShapeKind::TaperedCylinder)
            .scaled(0.6, 3.0, 0.8)
            .at(20.0, 1.8, 5.0)
            .with_material("glass")
            .with_texture("candelbase"),
        SceneObject::new("candle top ring", ShapeKind::Torus)
            .scaled(0.3, 0.5, 2.0)
            .rotated(90.0, 0.0, 0.0)
            .at(20.0, 4.8, 5.0)
            .with_texture("topring"),
        SceneObject::new("candle top", ShapeKind::Cylinder)
            .scaled(1.0, 0.1, 1.0)
            .at(20.0, 4.9, 5.0)
            .with_material("clay")
            .with_texture("top"),
        // desk items
        SceneObject::new("vase", ShapeKind::TaperedCylinder)
            .scaled(5.0, 20.0, 1.0)
            .rotated(-180.0, 0.0, 0.0)
            .at(20.0, 20.0, -5.0)
            .with_material("glass")
            .with_texture("vase"),
        SceneObject::new("smart speaker", ShapeKind::Sphere)
            .rotated(210.0, 0.0, 110.0)
            .at(7.0, 1.0, 5.0)
            .with_material("cloth")
            .with_texture("alexa"),
        SceneObject::new("hard drive", ShapeKind::Box)
            .scaled(3.5, 3.5, 0.5)
            .rotated(0.0, 0.0, 180.0)
            .at(7.0, 1.75, 3.0)
            .with_material("glass")
            .with_texture("drive"),
        SceneObject::new("book", ShapeKind::Box)
            .scaled(4.0, 5.0, 0.5)
            .rotated(-90.0, 0.0, 0.0)
            .at(-2.0, 0.25, 3.0)
            .with_material("paper")
            .with_texture("book"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{resources::MaterialLibrary, scene::scene_object::Surface};

    #[test]
    fn catalog_tags_are_unique() {
        let mut tags: Vec<&str> = TEXTURE_CATALOG.iter().map(|(_, tag)| *tag).collect();
        tags.sort_unstable();
        tags.dedup();
        assert_eq!(tags.len(), TEXTURE_CATALOG.len());
    }

    #[test]
    fn every_object_references_known_tags() {
        let materials = MaterialLibrary::tabletop();
        for object in tabletop_objects() {
            if let Some(material) = &object.material {
                assert!(materials.find_material(material).is_some(), "{}", object.label);
            }
            if let Surface::Texture(tag) = &object.surface {
                assert!(
                    TEXTURE_CATALOG.iter().any(|(_, t)| t == tag),
                    "{} uses unknown texture {}",
                    object.label,
                    tag
                );
            }
        }
    }

    #[test]
    fn scene_has_thirteen_objects_starting_with_walls() {
        let objects = tabletop_objects();
        assert_eq!(objects.len(), 13);
        assert_eq!(objects[0].label, "backdrop");
        assert_eq!(objects[2].shape, ShapeKind::Plane);
    }
}
