//! Texture resource management for wgpu
//!
//! Decodes image files into RGBA8 pixels and creates the GPU textures the
//! scene samples: object textures, the frame depth buffer and the shadow map.

use std::path::Path;

use crate::{
    error::TextureError,
    wgpu_utils::{BindGroupBuilder, BindGroupLayoutWithDesc},
};

/// Side length in texels of the square shadow map
pub const SHADOW_MAP_SIZE: u32 = 1024;

/// Decoded image pixels, always expanded to RGBA8
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    /// Channel count of the source image (3 or 4)
    pub channels: u8,
    pub rgba: Vec<u8>,
}

impl DecodedImage {
    /// Fails when either side exceeds `max_dimension` texels
    pub fn check_size(&self, max_dimension: u32) -> Result<(), TextureError> {
        if self.width > max_dimension || self.height > max_dimension {
            return Err(TextureError::TooLarge {
                width: self.width,
                height: self.height,
                limit: max_dimension,
            });
        }
        Ok(())
    }
}

/// Decodes an encoded image, accepting only RGB and RGBA sources
///
/// Rows are kept in file order, top row first.
pub fn decode_texture(bytes: &[u8]) -> Result<DecodedImage, TextureError> {
    let image = image::load_from_memory(bytes)?;
    let channels = image.color().channel_count();
    if channels != 3 && channels != 4 {
        return Err(TextureError::UnsupportedChannels(channels));
    }

    let rgba = image.into_rgba8();
    Ok(DecodedImage {
        width: rgba.width(),
        height: rgba.height(),
        channels,
        rgba: rgba.into_raw(),
    })
}

pub fn load_texture_file(path: &Path) -> Result<DecodedImage, TextureError> {
    let bytes = std::fs::read(path).map_err(|source| TextureError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode_texture(&bytes)
}

/// GPU texture resource containing texture, view, and sampler
pub struct TextureResource {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl TextureResource {
    /// Standard depth buffer format used throughout the viewer
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    /// Creates a depth texture matching the surface configuration
    pub fn create_depth_texture(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        label: &str,
    ) -> Self {
        Self::create_depth(device, config.width, config.height, label)
    }

    /// Creates the light-space depth target sampled for shadowing
    pub fn create_shadow_map(device: &wgpu::Device, size: u32) -> Self {
        Self::create_depth(device, size, size, "Shadow Map")
    }

    fn create_depth(device: &wgpu::Device, width: u32, height: u32, label: &str) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        // comparison sampler for shadow lookups
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(&format!("{} Sampler", label)),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            compare: Some(wgpu::CompareFunction::LessEqual),
            lod_min_clamp: 0.0,
            lod_max_clamp: 100.0,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
        }
    }

    /// Uploads decoded pixels as a repeating, linearly filtered texture
    pub fn create_from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &DecodedImage,
        label: &str,
    ) -> Self {
        Self::create_from_rgba_data(device, queue, &image.rgba, image.width, image.height, label)
    }

    pub fn create_from_rgba_data(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[u8],
        width: u32,
        height: u32,
        label: &str,
    ) -> Self {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(&format!("{} Sampler", label)),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
        }
    }

    /// 1x1 white texture bound whenever no object texture is
    pub fn create_fallback(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        Self::create_from_rgba_data(device, queue, &[255, 255, 255, 255], 1, 1, "Fallback Texture")
    }

    /// Bind group exposing the view and sampler, in that order
    pub fn create_bind_group(
        &self,
        device: &wgpu::Device,
        layout: &BindGroupLayoutWithDesc,
        label: &str,
    ) -> wgpu::BindGroup {
        BindGroupBuilder::new(layout)
            .texture(&self.view)
            .sampler(&self.sampler)
            .create(device, label)
    }
}

/// A texture together with its ready-to-bind bind group
pub struct BoundTexture {
    pub resource: TextureResource,
    pub bind_group: wgpu::BindGroup,
}

impl BoundTexture {
    pub fn new(
        device: &wgpu::Device,
        resource: TextureResource,
        layout: &BindGroupLayoutWithDesc,
        label: &str,
    ) -> Self {
        let bind_group = resource.create_bind_group(device, layout, label);
        Self {
            resource,
            bind_group,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{DynamicImage, ImageFormat};

    use super::*;

    fn encode_png(image: DynamicImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn rgb_images_expand_to_rgba() {
        let png = encode_png(DynamicImage::new_rgb8(3, 2));
        let decoded = decode_texture(&png).unwrap();

        assert_eq!((decoded.width, decoded.height, decoded.channels), (3, 2, 3));
        assert_eq!(decoded.rgba.len(), 3 * 2 * 4);
        assert!(decoded.rgba.chunks(4).all(|px| px[3] == 255));
    }

    #[test]
    fn rgba_images_keep_alpha() {
        let mut image = image::RgbaImage::new(1, 1);
        image.put_pixel(0, 0, image::Rgba([10, 20, 30, 40]));
        let decoded = decode_texture(&encode_png(DynamicImage::ImageRgba8(image))).unwrap();

        assert_eq!(decoded.channels, 4);
        assert_eq!(decoded.rgba, vec![10, 20, 30, 40]);
    }

    #[test]
    fn rows_are_not_flipped() {
        let mut image = image::RgbImage::new(1, 2);
        image.put_pixel(0, 0, image::Rgb([255, 0, 0]));
        image.put_pixel(0, 1, image::Rgb([0, 0, 255]));
        let decoded = decode_texture(&encode_png(DynamicImage::ImageRgb8(image))).unwrap();

        assert_eq!(&decoded.rgba[..4], &[255, 0, 0, 255]);
        assert_eq!(&decoded.rgba[4..], &[0, 0, 255, 255]);
    }

    #[test]
    fn oversized_images_are_rejected() {
        let wide = decode_texture(&encode_png(DynamicImage::ImageRgb8(image::RgbImage::new(40, 2)))).unwrap();
        assert!(matches!(
            wide.check_size(32),
            Err(TextureError::TooLarge { width: 40, height: 2, limit: 32 })
        ));

        let tall = decode_texture(&encode_png(DynamicImage::ImageRgba8(image::RgbaImage::new(2, 33)))).unwrap();
        assert!(matches!(tall.check_size(32), Err(TextureError::TooLarge { .. })));

        wide.check_size(40).unwrap();
    }

    #[test]
    fn gray_images_are_rejected() {
        let luma = encode_png(DynamicImage::new_luma8(2, 2));
        assert!(matches!(
            decode_texture(&luma),
            Err(TextureError::UnsupportedChannels(1))
        ));

        let luma_alpha = encode_png(DynamicImage::new_luma_a8(2, 2));
        assert!(matches!(
            decode_texture(&luma_alpha),
            Err(TextureError::UnsupportedChannels(2))
        ));
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        assert!(matches!(
            decode_texture(b"not an image"),
            Err(TextureError::Decode(_))
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_texture_file(Path::new("resources/does-not-exist.png")).unwrap_err();
        match err {
            TextureError::Io { path, .. } => assert!(path.ends_with("does-not-exist.png")),
            other => panic!("unexpected error {other:?}"),
        }
    }
}
