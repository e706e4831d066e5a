//! # Primitive Shape Generation
//!
//! Y-up unit shapes with outward normals and counter-clockwise front faces.

use std::f32::consts::{PI, TAU};

use super::GeometryData;

/// Tube radius of the torus relative to its unit ring radius
pub const TORUS_TUBE_RADIUS: f32 = 0.2;

/// Generate a unit cube centered at the origin
///
/// Returns a cube with vertices from -0.5 to 0.5 on all axes.
/// Each face has its own four vertices so normals stay flat.
#[rustfmt::skip]
pub fn generate_box() -> GeometryData {
    let mut data = GeometryData::new();

    let positions = [
        // Front face
        [-0.5, -0.5,  0.5], [ 0.5, -0.5,  0.5], [ 0.5,  0.5,  0.5], [-0.5,  0.5,  0.5],
        // Back face
        [-0.5, -0.5, -0.5], [-0.5,  0.5, -0.5], [ 0.5,  0.5, -0.5], [ 0.5, -0.5, -0.5],
        // Left face
        [-0.5, -0.5, -0.5], [-0.5, -0.5,  0.5], [-0.5,  0.5,  0.5], [-0.5,  0.5, -0.5],
        // Right face
        [ 0.5, -0.5,  0.5], [ 0.5, -0.5, -0.5], [ 0.5,  0.5, -0.5], [ 0.5,  0.5,  0.5],
        // Top face
        [-0.5,  0.5,  0.5], [ 0.5,  0.5,  0.5], [ 0.5,  0.5, -0.5], [-0.5,  0.5, -0.5],
        // Bottom face
        [-0.5, -0.5, -0.5], [ 0.5, -0.5, -0.5], [ 0.5, -0.5,  0.5], [-0.5, -0.5,  0.5],
    ];

    let tex_coords = [
        [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0],
        [1.0, 1.0], [1.0, 0.0], [0.0, 0.0], [0.0, 1.0],
        [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0],
        [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0],
        [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0],
        [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0],
    ];

    let face_normals = [
        [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0],
        [-1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
    ];

    data.vertices = positions.to_vec();
    data.tex_coords = tex_coords.to_vec();
    data.normals = face_normals.iter().flat_map(|n| [*n; 4]).collect();

    for face in 0..6u32 {
        let base = face * 4;
        data.indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    data
}

/// Generate a UV sphere of radius 1 centered at the origin
///
/// # Arguments
/// * `longitude_segments` - Number of vertical segments (longitude lines)
/// * `latitude_segments` - Number of horizontal segments (latitude lines)
pub fn generate_sphere(longitude_segments: u32, latitude_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);

    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();

        for long in 0..=long_segs {
            let phi = long as f32 * TAU / long_segs as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();

            let p = [sin_theta * cos_phi, cos_theta, sin_theta * sin_phi];
            let uv = [long as f32 / long_segs as f32, lat as f32 / lat_segs as f32];
            data.push_vertex(p, p, uv);
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            data.indices.extend_from_slice(&[first, first + 1, second]);
            data.indices.extend_from_slice(&[second, first + 1, second + 1]);
        }
    }

    data
}

/// Generate a plane in the XZ plane with normal +Y
///
/// # Arguments
/// * `half_width` - Half extent along X
/// * `half_depth` - Half extent along Z
/// * `width_segments` - Number of subdivisions along X
/// * `depth_segments` - Number of subdivisions along Z
pub fn generate_plane(
    half_width: f32,
    half_depth: f32,
    width_segments: u32,
    depth_segments: u32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let w_segs = width_segments.max(1);
    let d_segs = depth_segments.max(1);

    for z in 0..=d_segs {
        let v = z as f32 / d_segs as f32;
        let pos_z = (v * 2.0 - 1.0) * half_depth;

        for x in 0..=w_segs {
            let u = x as f32 / w_segs as f32;
            let pos_x = (u * 2.0 - 1.0) * half_width;
            data.push_vertex([pos_x, 0.0, pos_z], [0.0, 1.0, 0.0], [u, v]);
        }
    }

    // counter-clockwise when viewed from +Y
    for z in 0..d_segs {
        for x in 0..w_segs {
            let i = z * (w_segs + 1) + x;
            let next_row = i + w_segs + 1;

            data.indices.extend_from_slice(&[i, next_row, i + 1]);
            data.indices.extend_from_slice(&[next_row, next_row + 1, i + 1]);
        }
    }

    data
}

/// Generate a closed frustum with its base on y = 0 and top at y = 1
///
/// A `top_radius` of zero produces a cone without a top cap.
pub fn generate_tapered_cylinder(bottom_radius: f32, top_radius: f32, segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let segs = segments.max(3);
    // slope of the side wall for unit height
    let slope = bottom_radius - top_radius;

    for i in 0..=segs {
        let u = i as f32 / segs as f32;
        let (sin_a, cos_a) = (u * TAU).sin_cos();
        let len = (1.0 + slope * slope).sqrt();
        let normal = [cos_a / len, slope / len, sin_a / len];

        data.push_vertex(
            [bottom_radius * cos_a, 0.0, bottom_radius * sin_a],
            normal,
            [u, 1.0],
        );
        data.push_vertex([top_radius * cos_a, 1.0, top_radius * sin_a], normal, [u, 0.0]);
    }

    for i in 0..segs {
        let bottom_current = i * 2;
        let top_current = bottom_current + 1;
        let bottom_next = bottom_current + 2;
        let top_next = bottom_next + 1;

        data.indices
            .extend_from_slice(&[bottom_current, top_current, bottom_next]);
        data.indices
            .extend_from_slice(&[top_current, top_next, bottom_next]);
    }

    push_cap(&mut data, bottom_radius, 0.0, segs, false);
    if top_radius > 0.0 {
        push_cap(&mut data, top_radius, 1.0, segs, true);
    }

    data
}

/// Unit-radius cylinder, base on y = 0 and top at y = 1
pub fn generate_cylinder(segments: u32) -> GeometryData {
    generate_tapered_cylinder(1.0, 1.0, segments)
}

/// Unit-radius cone, base on y = 0 and apex at y = 1
pub fn generate_cone(segments: u32) -> GeometryData {
    generate_tapered_cylinder(1.0, 0.0, segments)
}

/// Ring of radius 1 around the Z axis
pub fn generate_torus(ring_segments: u32, tube_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let ring_segs = ring_segments.max(3);
    let tube_segs = tube_segments.max(3);

    for i in 0..=ring_segs {
        let u = i as f32 / ring_segs as f32;
        let (sin_t, cos_t) = (u * TAU).sin_cos();

        for j in 0..=tube_segs {
            let v = j as f32 / tube_segs as f32;
            let (sin_p, cos_p) = (v * TAU).sin_cos();

            let normal = [cos_p * cos_t, cos_p * sin_t, sin_p];
            let position = [
                cos_t + TORUS_TUBE_RADIUS * normal[0],
                sin_t + TORUS_TUBE_RADIUS * normal[1],
                TORUS_TUBE_RADIUS * normal[2],
            ];
            data.push_vertex(position, normal, [u, v]);
        }
    }

    let stride = tube_segs + 1;
    for i in 0..ring_segs {
        for j in 0..tube_segs {
            let a = i * stride + j;
            let b = a + stride;
            let c = a + 1;
            let d = b + 1;

            data.indices.extend_from_slice(&[a, b, c]);
            data.indices.extend_from_slice(&[b, d, c]);
        }
    }

    data
}

fn push_cap(data: &mut GeometryData, radius: f32, y: f32, segs: u32, facing_up: bool) {
    let normal = if facing_up { [0.0, 1.0, 0.0] } else { [0.0, -1.0, 0.0] };
    let center = data.push_vertex([0.0, y, 0.0], normal, [0.5, 0.5]);

    for i in 0..=segs {
        let (sin_a, cos_a) = (i as f32 * TAU / segs as f32).sin_cos();
        data.push_vertex(
            [radius * cos_a, y, radius * sin_a],
            normal,
            [0.5 + 0.5 * cos_a, 0.5 + 0.5 * sin_a],
        );
    }

    for i in 0..segs {
        let current = center + 1 + i;
        let next = current + 1;
        if facing_up {
            data.indices.extend_from_slice(&[center, next, current]);
        } else {
            data.indices.extend_from_slice(&[center, current, next]);
        }
    }
}
