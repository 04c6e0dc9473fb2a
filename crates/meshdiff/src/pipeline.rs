//! The end-to-end mesh comparison pipeline.
//!
//! Mirrors the canonical driver order: sample both meshes, aggregate signed
//! distances bidirectionally, colorize, bake the UV texture, merge vertex
//! colors back into the source mesh, and report distance statistics.

use meshdiff_chamfer::{DistanceField, DistanceStats, chamfer_distances};
use meshdiff_heatmap::{BakedTexture, bake_texture, bake_vertex_colors, colorize_cloud};
use meshdiff_sample::{SampledCloud, sample_surface};
use meshdiff_types::IndexedMesh;
use rand::{SeedableRng, rngs::StdRng};
use tracing::info;

use crate::error::PipelineResult;

/// Parameters for a mesh comparison run.
#[derive(Debug, Clone)]
pub struct CompareParams {
    /// Sample budget per mesh. Every face gets at least one sample, so the
    /// actual cloud may be larger. Default: 50 000.
    pub sample_count: usize,

    /// Side length of the square output texture in texels. Default: 1024.
    pub texture_dim: u32,

    /// Breakpoints for positive distances. `None` derives them from the
    /// observed values. Default: `None`.
    pub positive_breakpoints: Option<[f64; 3]>,

    /// Breakpoints for negative distances. `None` derives them from the
    /// observed values. Default: `None`.
    pub negative_breakpoints: Option<[f64; 3]>,

    /// Seed for the sampling RNG; the same seed reproduces the exact run.
    /// Default: 0.
    pub seed: u64,
}

impl Default for CompareParams {
    fn default() -> Self {
        Self {
            sample_count: 50_000,
            texture_dim: 1024,
            positive_breakpoints: None,
            negative_breakpoints: None,
            seed: 0,
        }
    }
}

impl CompareParams {
    /// Create params with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-mesh sample budget.
    #[must_use]
    pub const fn with_sample_count(mut self, count: usize) -> Self {
        self.sample_count = count;
        self
    }

    /// Set the texture dimension.
    #[must_use]
    pub const fn with_texture_dim(mut self, dim: u32) -> Self {
        self.texture_dim = dim;
        self
    }

    /// Override the palette breakpoints for both signs.
    #[must_use]
    pub const fn with_breakpoints(mut self, positive: [f64; 3], negative: [f64; 3]) -> Self {
        self.positive_breakpoints = Some(positive);
        self.negative_breakpoints = Some(negative);
        self
    }

    /// Set the sampling seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Everything a comparison run produces.
#[derive(Debug, Clone)]
pub struct ComparisonResult {
    /// The colorized source sample cloud.
    pub source_cloud: SampledCloud,
    /// The target sample cloud (cacheable for re-runs).
    pub target_cloud: SampledCloud,
    /// Signed distance per source sample.
    pub distances: DistanceField,
    /// Per-sign extrema of the distances.
    pub stats: DistanceStats,
    /// The baked UV-space color texture and coverage mask.
    pub texture: BakedTexture,
}

/// Compare a source mesh against a target mesh.
///
/// The source mesh must carry wedge UVs (texture baking fails fast without
/// them). Vertex normals are computed on either mesh if missing; on
/// success the source mesh additionally receives per-vertex heatmap colors,
/// which is why it is taken mutably.
///
/// Sign convention: positive distances mean the target surface lies on the
/// side the source normals point away from (in front of the source
/// surface), negative means behind it.
///
/// # Errors
///
/// Any stage error, wrapped in [`PipelineError`](crate::PipelineError):
/// empty meshes, a source mesh without UVs, breakpoint arrays of the wrong
/// length.
///
/// # Example
///
/// ```
/// use meshdiff::prelude::*;
///
/// let mut source = unit_square();
/// let target = unit_square();
///
/// let params = CompareParams::new().with_sample_count(200).with_texture_dim(32);
/// let result = compare_meshes(&mut source, &target, &params).unwrap();
/// assert_eq!(result.distances.len(), result.source_cloud.len());
/// ```
pub fn compare_meshes(
    source: &mut IndexedMesh,
    target: &IndexedMesh,
    params: &CompareParams,
) -> PipelineResult<ComparisonResult> {
    info!(
        sample_count = params.sample_count,
        texture_dim = params.texture_dim,
        seed = params.seed,
        "comparing meshes"
    );

    if !source.has_vertex_normals() {
        source.compute_vertex_normals();
    }
    let target_storage;
    let target = if target.has_vertex_normals() {
        target
    } else {
        let mut with_normals = target.clone();
        with_normals.compute_vertex_normals();
        target_storage = with_normals;
        &target_storage
    };

    let mut rng = StdRng::seed_from_u64(params.seed);
    let mut source_cloud = sample_surface(source, params.sample_count, &mut rng)?;
    let target_cloud = sample_surface(target, params.sample_count, &mut rng)?;

    let distances = chamfer_distances(&source_cloud, &target_cloud)?;

    colorize_cloud(
        &mut source_cloud,
        &distances,
        params.positive_breakpoints.as_ref().map(<[f64; 3]>::as_slice),
        params.negative_breakpoints.as_ref().map(<[f64; 3]>::as_slice),
    )?;

    let texture = bake_texture(&source_cloud, source, params.texture_dim)?;
    bake_vertex_colors(&source_cloud, source)?;

    let stats = distances.stats();
    info!(%stats, "mesh comparison complete");

    Ok(ComparisonResult {
        source_cloud,
        target_cloud,
        distances,
        stats,
        texture,
    })
}
