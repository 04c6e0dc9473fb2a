//! Projecting sample colors back onto the source mesh.

use image::{Rgb, Rgba, RgbImage, RgbaImage};
use meshdiff_sample::{SampledCloud, barycentric, blend_uvs};
use meshdiff_types::{IndexedMesh, MeshTopology, VertexColor};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::{HeatmapError, HeatmapResult};

/// A baked UV-space heatmap.
#[derive(Debug, Clone)]
pub struct BakedTexture {
    /// Color texture: sample colors at their UV positions, black elsewhere.
    pub color: RgbImage,
    /// Coverage mask: opaque white where a sample landed, transparent black
    /// elsewhere. Lets consumers dilate or inspect sparse coverage.
    pub coverage: RgbaImage,
}

impl BakedTexture {
    /// Side length of the square texture in texels.
    #[must_use]
    pub fn dimension(&self) -> u32 {
        self.color.width()
    }
}

/// Bake per-sample colors into a UV-space texture and coverage mask.
///
/// For every sample, its barycentric weights inside the origin face are
/// recomputed from its 3D position, the face's three wedge UVs are blended
/// at those weights, and the UV maps to the texel
/// `(round(u·(dim−1)), round(v·(dim−1)))` (UV channels clamped to [0, 1]
/// first). The sample's color, scaled to 0–255, lands in the color texture;
/// opaque white lands in the coverage mask. Samples are written in sampling
/// order and the last write to a texel wins — point density only locally
/// exceeds texel density, so no blending is attempted.
///
/// # Errors
///
/// - [`HeatmapError::InvalidTextureDim`] for a zero dimension.
/// - [`HeatmapError::EmptyCloud`] / [`HeatmapError::MissingColors`] for an
///   empty or uncolorized cloud.
/// - [`HeatmapError::MissingUvs`] if the mesh carries no wedge UVs.
/// - [`HeatmapError::FaceOutOfBounds`] if the cloud was sampled from a
///   different mesh.
pub fn bake_texture(
    cloud: &SampledCloud,
    mesh: &IndexedMesh,
    texture_dim: u32,
) -> HeatmapResult<BakedTexture> {
    if texture_dim == 0 {
        return Err(HeatmapError::InvalidTextureDim(texture_dim));
    }
    if cloud.is_empty() {
        return Err(HeatmapError::EmptyCloud);
    }
    let colors = cloud.colors().ok_or(HeatmapError::MissingColors)?;
    if !mesh.has_wedge_uvs() {
        return Err(HeatmapError::MissingUvs);
    }

    let max_texel = f64::from(texture_dim - 1);

    // Recover texel coordinates in parallel; the writes below stay
    // sequential so last-write-wins follows sampling order.
    let texels: Vec<(u32, u32)> = cloud
        .points()
        .par_iter()
        .zip(cloud.triangle_idxes().par_iter())
        .map(|(point, &face)| -> HeatmapResult<(u32, u32)> {
            let face = face as usize;
            let out_of_bounds = || HeatmapError::FaceOutOfBounds {
                face,
                face_count: mesh.face_count(),
            };
            let tri = mesh.triangle(face).ok_or_else(out_of_bounds)?;
            let corner_uvs = mesh.face_wedge_uvs(face).ok_or_else(out_of_bounds)?;

            let weights = barycentric(&tri, point);
            let [u, v] = blend_uvs(weights, corner_uvs[0], corner_uvs[1], corner_uvs[2]);

            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            // Clamped to [0, max_texel] before the cast
            let x = (u.clamp(0.0, 1.0) * max_texel).round() as u32;
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let y = (v.clamp(0.0, 1.0) * max_texel).round() as u32;
            Ok((x, y))
        })
        .collect::<HeatmapResult<_>>()?;

    let mut color = RgbImage::new(texture_dim, texture_dim);
    let mut coverage = RgbaImage::new(texture_dim, texture_dim);

    for (&(x, y), rgb) in texels.iter().zip(colors) {
        let quantized = VertexColor::from_float(rgb[0], rgb[1], rgb[2]);
        color.put_pixel(x, y, Rgb([quantized.r, quantized.g, quantized.b]));
        coverage.put_pixel(x, y, Rgba([255, 255, 255, 255]));
    }

    info!(
        samples = cloud.len(),
        texture_dim, "baked heatmap texture"
    );

    Ok(BakedTexture { color, coverage })
}

/// Color mesh vertices from the first sample of each face.
///
/// For every face, the first sample (in sampling order) originating from it
/// donates its color to all three face vertices — flat, per-face coloring,
/// the cheap fallback when no texture pipeline is available. Faces without
/// samples leave their vertices untouched. Vertices shared between faces
/// take the color of the last face that writes them.
///
/// # Errors
///
/// - [`HeatmapError::MissingColors`] for an uncolorized cloud.
/// - [`HeatmapError::FaceOutOfBounds`] if the cloud was sampled from a
///   different mesh.
pub fn bake_vertex_colors(cloud: &SampledCloud, mesh: &mut IndexedMesh) -> HeatmapResult<()> {
    let colors = cloud.colors().ok_or(HeatmapError::MissingColors)?;

    // First sample index per face; faces never hit stay None.
    let mut first_sample: Vec<Option<usize>> = vec![None; mesh.face_count()];
    for (sample, &face) in cloud.triangle_idxes().iter().enumerate() {
        let face = face as usize;
        let slot = first_sample
            .get_mut(face)
            .ok_or(HeatmapError::FaceOutOfBounds {
                face,
                face_count: cloud.len(),
            })?;
        if slot.is_none() {
            *slot = Some(sample);
        }
    }

    let mut colored_faces = 0_usize;
    for (face_index, slot) in first_sample.iter().enumerate() {
        let Some(sample) = slot else { continue };
        let rgb = colors[*sample];
        let quantized = VertexColor::from_float(rgb[0], rgb[1], rgb[2]);
        let [i0, i1, i2] = mesh.faces[face_index];
        for vi in [i0, i1, i2] {
            mesh.set_vertex_color(vi as usize, quantized);
        }
        colored_faces += 1;
    }

    debug!(
        colored_faces,
        total_faces = mesh.face_count(),
        "baked vertex colors"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshdiff_types::unit_square;
    use nalgebra::{Point3, Vector3};

    /// Cloud over the unit square with explicit positions/faces/colors.
    fn square_cloud(samples: &[(f64, f64, u32)], colors: &[[f64; 3]]) -> SampledCloud {
        let points = samples
            .iter()
            .map(|&(x, y, _)| Point3::new(x, y, 0.0))
            .collect();
        let normals = vec![Vector3::z(); samples.len()];
        let faces = samples.iter().map(|&(_, _, f)| f).collect();
        let mut cloud = SampledCloud::from_parts(points, normals, faces).unwrap();
        cloud.set_colors(colors.to_vec()).unwrap();
        cloud
    }

    #[test]
    fn bake_preconditions() {
        let square = unit_square();
        let mut cloud = SampledCloud::from_parts(
            vec![Point3::new(0.5, 0.25, 0.0)],
            vec![Vector3::z()],
            vec![0],
        )
        .unwrap();

        assert!(matches!(
            bake_texture(&cloud, &square, 0),
            Err(HeatmapError::InvalidTextureDim(0))
        ));
        assert!(matches!(
            bake_texture(&cloud, &square, 64),
            Err(HeatmapError::MissingColors)
        ));

        cloud.set_colors(vec![[1.0, 0.0, 0.0]]).unwrap();
        let no_uvs = IndexedMesh::from_parts(square.vertices.clone(), square.faces.clone());
        assert!(matches!(
            bake_texture(&cloud, &no_uvs, 64),
            Err(HeatmapError::MissingUvs)
        ));

        assert!(matches!(
            bake_texture(&SampledCloud::default(), &square, 64),
            Err(HeatmapError::EmptyCloud)
        ));
    }

    #[test]
    fn samples_land_on_their_uv_texels() {
        let square = unit_square();
        // UVs equal XY positions on the unit square, so texels are direct.
        let cloud = square_cloud(
            &[(0.0, 0.0, 0), (1.0, 1.0, 1), (0.5, 0.25, 0)],
            &[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        );

        let baked = bake_texture(&cloud, &square, 9).unwrap();
        assert_eq!(baked.dimension(), 9);
        assert_eq!(baked.color.get_pixel(0, 0).0, [255, 0, 0]);
        assert_eq!(baked.color.get_pixel(8, 8).0, [0, 255, 0]);
        assert_eq!(baked.color.get_pixel(4, 2).0, [0, 0, 255]);

        // Coverage marks exactly the written texels.
        assert_eq!(baked.coverage.get_pixel(0, 0).0, [255, 255, 255, 255]);
        assert_eq!(baked.coverage.get_pixel(4, 2).0[3], 255);
        assert_eq!(baked.coverage.get_pixel(3, 3).0, [0, 0, 0, 0]);
    }

    #[test]
    fn colliding_texels_keep_the_last_write() {
        let square = unit_square();
        let cloud = square_cloud(
            &[(0.0, 0.0, 0), (0.0, 0.0, 0)],
            &[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        );

        let baked = bake_texture(&cloud, &square, 16).unwrap();
        assert_eq!(baked.color.get_pixel(0, 0).0, [0, 255, 0]);
    }

    #[test]
    fn out_of_range_uvs_clamp_into_the_texture() {
        let mut square = unit_square();
        // Push one corner UV outside [0, 1]^2.
        let mut uvs = square.wedge_uvs().unwrap().to_vec();
        uvs[0] = [-0.5, 1.5];
        assert!(square.set_wedge_uvs(uvs));

        let cloud = square_cloud(&[(0.0, 0.0, 0)], &[[1.0, 1.0, 1.0]]);
        let baked = bake_texture(&cloud, &square, 8).unwrap();
        // Sample at corner 0 blends to that corner's UV, clamped to (0, 1).
        assert_eq!(baked.color.get_pixel(0, 7).0, [255, 255, 255]);
    }

    #[test]
    fn foreign_cloud_is_rejected() {
        let square = unit_square();
        let cloud = square_cloud(&[(0.5, 0.25, 7)], &[[1.0, 0.0, 0.0]]);
        assert!(matches!(
            bake_texture(&cloud, &square, 8),
            Err(HeatmapError::FaceOutOfBounds { face: 7, .. })
        ));
    }

    #[test]
    fn vertex_colors_come_from_first_sample_per_face() {
        let mut square = unit_square();
        // Two samples on face 0 (first red), none on face 1.
        let cloud = square_cloud(
            &[(0.6, 0.2, 0), (0.7, 0.1, 0)],
            &[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        );

        bake_vertex_colors(&cloud, &mut square).unwrap();

        // Face 0 vertices carry the first sample's color.
        for vi in [0_usize, 1, 2] {
            assert_eq!(
                square.vertices[vi].color(),
                Some(VertexColor::new(255, 0, 0))
            );
        }
        // Vertex 3 belongs only to the unsampled face 1 and stays uncolored.
        assert!(square.vertices[3].color().is_none());
    }

    #[test]
    fn vertex_bake_requires_colors() {
        let mut square = unit_square();
        let cloud = SampledCloud::from_parts(
            vec![Point3::new(0.5, 0.25, 0.0)],
            vec![Vector3::z()],
            vec![0],
        )
        .unwrap();
        assert!(matches!(
            bake_vertex_colors(&cloud, &mut square),
            Err(HeatmapError::MissingColors)
        ));
    }
}
