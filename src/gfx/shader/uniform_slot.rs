//! Uniform name contract shared with the WGSL programs
//!
//! Host code addresses uniforms by the same string names the shaders were
//! written against. Names are parsed into [`UniformSlot`]s before being
//! written into the packed uniform buffers.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Number of `lightSources[i]` entries the scene program accepts
pub const MAX_LIGHT_SOURCES: usize = 4;

pub const MODEL: &str = "model";
pub const VIEW: &str = "view";
pub const PROJECTION: &str = "projection";
pub const VIEW_POSITION: &str = "viewPosition";
pub const LIGHT_SPACE_MATRIX: &str = "lightSpaceMatrix";
pub const OBJECT_COLOR: &str = "objectColor";
pub const OBJECT_TEXTURE: &str = "objectTexture";
pub const USE_TEXTURE: &str = "bUseTexture";
pub const USE_LIGHTING: &str = "bUseLighting";
pub const UV_SCALE: &str = "UVscale";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UniformError {
    #[error("unknown uniform '{0}'")]
    UnknownName(String),

    #[error("light index {0} is outside lightSources[0..{MAX_LIGHT_SOURCES}]")]
    LightIndexOutOfRange(usize),

    #[error("uniform '{name}' expects {expected}, got {actual}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialField {
    AmbientColor,
    AmbientStrength,
    DiffuseColor,
    SpecularColor,
    Shininess,
}

impl MaterialField {
    pub fn as_str(self) -> &'static str {
        match self {
            MaterialField::AmbientColor => "ambientColor",
            MaterialField::AmbientStrength => "ambientStrength",
            MaterialField::DiffuseColor => "diffuseColor",
            MaterialField::SpecularColor => "specularColor",
            MaterialField::Shininess => "shininess",
        }
    }

    fn parse(field: &str) -> Option<Self> {
        Some(match field {
            "ambientColor" => MaterialField::AmbientColor,
            "ambientStrength" => MaterialField::AmbientStrength,
            "diffuseColor" => MaterialField::DiffuseColor,
            "specularColor" => MaterialField::SpecularColor,
            "shininess" => MaterialField::Shininess,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightField {
    Position,
    AmbientColor,
    DiffuseColor,
    SpecularColor,
    FocalStrength,
    SpecularIntensity,
}

impl LightField {
    pub fn as_str(self) -> &'static str {
        match self {
            LightField::Position => "position",
            LightField::AmbientColor => "ambientColor",
            LightField::DiffuseColor => "diffuseColor",
            LightField::SpecularColor => "specularColor",
            LightField::FocalStrength => "focalStrength",
            LightField::SpecularIntensity => "specularIntensity",
        }
    }

    fn parse(field: &str) -> Option<Self> {
        Some(match field {
            "position" => LightField::Position,
            "ambientColor" => LightField::AmbientColor,
            "diffuseColor" => LightField::DiffuseColor,
            "specularColor" => LightField::SpecularColor,
            "focalStrength" => LightField::FocalStrength,
            "specularIntensity" => LightField::SpecularIntensity,
            _ => return None,
        })
    }
}

/// A parsed uniform name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniformSlot {
    Model,
    View,
    Projection,
    ViewPosition,
    LightSpaceMatrix,
    ObjectColor,
    ObjectTexture,
    UseTexture,
    UseLighting,
    UvScale,
    Material(MaterialField),
    Light(usize, LightField),
}

impl FromStr for UniformSlot {
    type Err = UniformError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let unknown = || UniformError::UnknownName(name.to_string());

        let slot = match name {
            MODEL => UniformSlot::Model,
            VIEW => UniformSlot::View,
            PROJECTION => UniformSlot::Projection,
            VIEW_POSITION => UniformSlot::ViewPosition,
            LIGHT_SPACE_MATRIX => UniformSlot::LightSpaceMatrix,
            OBJECT_COLOR => UniformSlot::ObjectColor,
            OBJECT_TEXTURE => UniformSlot::ObjectTexture,
            USE_TEXTURE => UniformSlot::UseTexture,
            USE_LIGHTING => UniformSlot::UseLighting,
            UV_SCALE => UniformSlot::UvScale,
            _ => {
                if let Some(field) = name.strip_prefix("material.") {
                    return MaterialField::parse(field)
                        .map(UniformSlot::Material)
                        .ok_or_else(unknown);
                }

                let rest = name.strip_prefix("lightSources[").ok_or_else(unknown)?;
                let (index, field) = rest.split_once("].").ok_or_else(unknown)?;
                let index: usize = index.parse().map_err(|_| unknown())?;
                let field = LightField::parse(field).ok_or_else(unknown)?;
                if index >= MAX_LIGHT_SOURCES {
                    return Err(UniformError::LightIndexOutOfRange(index));
                }
                UniformSlot::Light(index, field)
            }
        };

        Ok(slot)
    }
}

impl fmt::Display for UniformSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniformSlot::Model => f.write_str(MODEL),
            UniformSlot::View => f.write_str(VIEW),
            UniformSlot::Projection => f.write_str(PROJECTION),
            UniformSlot::ViewPosition => f.write_str(VIEW_POSITION),
            UniformSlot::LightSpaceMatrix => f.write_str(LIGHT_SPACE_MATRIX),
            UniformSlot::ObjectColor => f.write_str(OBJECT_COLOR),
            UniformSlot::ObjectTexture => f.write_str(OBJECT_TEXTURE),
            UniformSlot::UseTexture => f.write_str(USE_TEXTURE),
            UniformSlot::UseLighting => f.write_str(USE_LIGHTING),
            UniformSlot::UvScale => f.write_str(UV_SCALE),
            UniformSlot::Material(field) => write!(f, "material.{}", field.as_str()),
            UniformSlot::Light(index, field) => {
                write!(f, "lightSources[{}].{}", index, field.as_str())
            }
        }
    }
}

pub fn material_uniform_name(field: MaterialField) -> String {
    UniformSlot::Material(field).to_string()
}

pub fn light_uniform_name(index: usize, field: LightField) -> String {
    UniformSlot::Light(index, field).to_string()
}
