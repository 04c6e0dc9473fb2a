//! Heatmap colorization and texture baking.
//!
//! The last stage of the comparison pipeline: turn a signed
//! [`DistanceField`](meshdiff_chamfer::DistanceField) into colors, then
//! project those colors back onto the source mesh.
//!
//! - [`colorize`] / [`colorize_cloud`] map signed scalars through two
//!   breakpoint-driven palettes (white→yellow→red for positive magnitudes,
//!   white→cyan→blue for negative).
//! - [`bake_texture`] writes per-sample colors into a UV-space texture and a
//!   coverage mask, using each sample's barycentric position inside its
//!   origin face to recover wedge UVs.
//! - [`bake_vertex_colors`] is the cheap fallback path: every face adopts
//!   the color of its first sample, flat across its three vertices.
//!
//! # Example
//!
//! ```
//! use meshdiff_heatmap::colorize;
//!
//! // 0.25 sits halfway between the 0.2 and 0.3 breakpoints, so the color
//! // is the exact midpoint of the palette's yellow and red entries.
//! let colors = colorize(&[0.25], Some(&[0.1, 0.2, 0.3]), None).unwrap();
//! assert!((colors[0].r - 1.0).abs() < 1e-12);
//! assert!((colors[0].g - 0.5).abs() < 1e-12);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod bake;
mod color;
mod colorize;
mod error;

pub use bake::{BakedTexture, bake_texture, bake_vertex_colors};
pub use color::{LinearRgba, PALETTE_LEN, Palette};
pub use colorize::{colorize, colorize_cloud};
pub use error::{HeatmapError, HeatmapResult};
