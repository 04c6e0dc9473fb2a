//! Breakpoint-driven mapping from signed scalars to palette colors.

use meshdiff_chamfer::DistanceField;
use meshdiff_sample::SampledCloud;
use rayon::prelude::*;

use crate::color::{LinearRgba, PALETTE_LEN, Palette};
use crate::error::{HeatmapError, HeatmapResult};

/// Map signed values to RGBA colors through the two sign palettes.
///
/// Values are partitioned by sign (≥ 0 vs < 0); each partition's absolute
/// values run through its own palette (positive: white→yellow→red,
/// negative: white→cyan→blue). Breakpoints mark where the interpolation
/// switches color pairs:
///
/// - If a breakpoint array is supplied, its absolute values are used and it
///   must hold exactly [`PALETTE_LEN`] entries.
/// - Otherwise breakpoints are derived per partition: three values evenly
///   spaced from the partition's minimum absolute value with step
///   `(max − min) / 3`.
///
/// Each value lands in the bucket of the last breakpoint not exceeding it
/// and is lerped toward the next palette color by its position in the
/// bucket (clamped to [0, 1], so out-of-range values saturate at the ramp
/// ends). All output channels are finite and in [0, 1] for finite input.
///
/// # Errors
///
/// Returns [`HeatmapError::BreakpointCountMismatch`] if a supplied
/// breakpoint array is not exactly [`PALETTE_LEN`] long.
pub fn colorize(
    values: &[f64],
    positive_breakpoints: Option<&[f64]>,
    negative_breakpoints: Option<&[f64]>,
) -> HeatmapResult<Vec<LinearRgba>> {
    let positive = resolve_breakpoints(values, positive_breakpoints, |v| v >= 0.0)?;
    let negative = resolve_breakpoints(values, negative_breakpoints, |v| v < 0.0)?;

    let positive_palette = Palette::positive();
    let negative_palette = Palette::negative();

    Ok(values
        .par_iter()
        .map(|&v| {
            if v >= 0.0 {
                map_absolute(v.abs(), &positive, &positive_palette)
            } else {
                map_absolute(v.abs(), &negative, &negative_palette)
            }
        })
        .collect())
}

/// Colorize a cloud in place from its distance field.
///
/// Convenience over [`colorize`]: maps the field and stores the RGB part of
/// each color on the cloud (alpha is dropped, matching the cloud's color
/// schema).
///
/// # Errors
///
/// [`HeatmapError::DistanceCountMismatch`] unless the field has exactly one
/// value per sample, plus everything [`colorize`] returns.
pub fn colorize_cloud(
    cloud: &mut SampledCloud,
    distances: &DistanceField,
    positive_breakpoints: Option<&[f64]>,
    negative_breakpoints: Option<&[f64]>,
) -> HeatmapResult<()> {
    if distances.len() != cloud.len() {
        return Err(HeatmapError::DistanceCountMismatch {
            expected: cloud.len(),
            actual: distances.len(),
        });
    }

    let colors = colorize(
        distances.values(),
        positive_breakpoints,
        negative_breakpoints,
    )?;
    cloud.set_colors(colors.iter().map(|c| c.to_rgb_array()).collect())?;
    Ok(())
}

/// Validate supplied breakpoints or derive them from one sign partition.
///
/// A partition with no values gets a zero array; the mapping loop never
/// consults it.
fn resolve_breakpoints(
    values: &[f64],
    supplied: Option<&[f64]>,
    in_partition: impl Fn(f64) -> bool,
) -> HeatmapResult<[f64; PALETTE_LEN]> {
    if let Some(breakpoints) = supplied {
        if breakpoints.len() != PALETTE_LEN {
            return Err(HeatmapError::BreakpointCountMismatch {
                expected: PALETTE_LEN,
                actual: breakpoints.len(),
            });
        }
        let mut out = [0.0; PALETTE_LEN];
        for (slot, bp) in out.iter_mut().zip(breakpoints) {
            *slot = bp.abs();
        }
        return Ok(out);
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values.iter().filter(|&&v| in_partition(v)) {
        let v = v.abs();
        min = min.min(v);
        max = max.max(v);
    }
    if min > max {
        return Ok([0.0; PALETTE_LEN]);
    }

    #[allow(clippy::cast_precision_loss)]
    let step = (max - min) / PALETTE_LEN as f64;
    let mut out = [0.0; PALETTE_LEN];
    for (i, slot) in out.iter_mut().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        {
            *slot = (i as f64).mul_add(step, min);
        }
    }
    Ok(out)
}

/// Map one absolute value through a palette.
fn map_absolute(value: f64, breakpoints: &[f64; PALETTE_LEN], palette: &Palette) -> LinearRgba {
    // Index of the last breakpoint not exceeding the value, clamped so a
    // bucket always has an upper neighbor.
    let below_or_equal = breakpoints.iter().filter(|bp| **bp <= value).count();
    let bucket = below_or_equal.saturating_sub(1).min(PALETTE_LEN - 2);

    let lo = breakpoints[bucket];
    let hi = breakpoints[bucket + 1];
    let span = hi - lo;
    // A zero-width bucket pins the value to the bucket's lower color.
    let t = if span > 0.0 {
        ((value - lo) / span).clamp(0.0, 1.0)
    } else {
        0.0
    };

    palette.colors()[bucket].lerp(palette.colors()[bucket + 1], t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Point3, Vector3};
    use rand::{Rng, SeedableRng, rngs::StdRng};

    const BPS: [f64; 3] = [0.1, 0.2, 0.3];

    #[test]
    fn value_between_breakpoints_interpolates() {
        // 0.25 -> t = 0.5 between yellow and red.
        let colors = colorize(&[0.25], Some(&BPS), None).unwrap();
        assert_relative_eq!(colors[0].r, 1.0);
        assert_relative_eq!(colors[0].g, 0.5);
        assert_relative_eq!(colors[0].b, 0.0);
        assert_relative_eq!(colors[0].a, 1.0);
    }

    #[test]
    fn value_on_breakpoint_is_exact_palette_color() {
        let colors = colorize(&[0.1, 0.2, 0.3], Some(&BPS), None).unwrap();
        assert_eq!(colors[0], LinearRgba::WHITE);
        assert_eq!(colors[1], LinearRgba::YELLOW);
        assert_eq!(colors[2], LinearRgba::RED);
    }

    #[test]
    fn out_of_range_values_saturate() {
        let colors = colorize(&[0.01, 9.0], Some(&BPS), None).unwrap();
        assert_eq!(colors[0], LinearRgba::WHITE);
        assert_eq!(colors[1], LinearRgba::RED);
    }

    #[test]
    fn negative_values_use_negative_palette() {
        let colors = colorize(&[-0.25], None, Some(&BPS)).unwrap();
        assert_relative_eq!(colors[0].r, 0.0);
        assert_relative_eq!(colors[0].g, 0.5);
        assert_relative_eq!(colors[0].b, 1.0);
    }

    #[test]
    fn supplied_breakpoints_are_taken_absolute() {
        // Negative-palette breakpoints are often written as negative values.
        let colors = colorize(&[-0.25], None, Some(&[-0.1, -0.2, -0.3])).unwrap();
        assert_relative_eq!(colors[0].g, 0.5);
        assert_relative_eq!(colors[0].b, 1.0);
    }

    #[test]
    fn wrong_breakpoint_count_fails_fast() {
        let result = colorize(&[0.5], Some(&[0.1, 0.2]), None);
        assert!(matches!(
            result,
            Err(HeatmapError::BreakpointCountMismatch {
                expected: 3,
                actual: 2
            })
        ));
        let result = colorize(&[0.5], None, Some(&[0.1, 0.2, 0.3, 0.4]));
        assert!(matches!(
            result,
            Err(HeatmapError::BreakpointCountMismatch { actual: 4, .. })
        ));
    }

    #[test]
    fn auto_breakpoints_span_each_partition() {
        // Positive partition [0, 3] derives breakpoints [0, 1, 2].
        let colors = colorize(&[0.0, 1.0, 1.5, 3.0], None, None).unwrap();
        assert_eq!(colors[0], LinearRgba::WHITE);
        assert_eq!(colors[1], LinearRgba::YELLOW);
        assert_relative_eq!(colors[2].g, 0.5); // halfway yellow -> red
        assert_eq!(colors[3], LinearRgba::RED);
    }

    #[test]
    fn partitions_derive_independently() {
        // Negative magnitudes are an order larger; each side still spans
        // its own ramp fully.
        let colors = colorize(&[0.0, 1.0, -10.0, -40.0], None, None).unwrap();
        assert_eq!(colors[0], LinearRgba::WHITE);
        assert_eq!(colors[1], LinearRgba::RED);
        assert_eq!(colors[2], LinearRgba::WHITE);
        assert_eq!(colors[3], LinearRgba::BLUE);
    }

    #[test]
    fn single_value_gets_an_exact_palette_color() {
        // Degenerate auto breakpoints collapse to [x, x, x]; the value maps
        // to the middle palette entry with t = 0.
        let colors = colorize(&[0.42], None, None).unwrap();
        assert_eq!(colors[0], LinearRgba::YELLOW);
    }

    #[test]
    fn channels_stay_in_unit_range() {
        let mut rng = StdRng::seed_from_u64(99);
        let values: Vec<f64> = (0..500).map(|_| rng.gen_range(-1000.0..1000.0)).collect();
        let colors = colorize(&values, None, None).unwrap();
        for c in colors {
            for channel in [c.r, c.g, c.b, c.a] {
                assert!(channel.is_finite());
                assert!((0.0..=1.0).contains(&channel));
            }
        }
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(colorize(&[], None, None).unwrap().is_empty());
    }

    #[test]
    fn cloud_colorization_checks_field_length() {
        let mut cloud = SampledCloud::from_parts(
            vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)],
            vec![Vector3::z(), Vector3::z()],
            vec![0, 0],
        )
        .unwrap();

        let short = DistanceField::from_values(vec![0.5]);
        assert!(matches!(
            colorize_cloud(&mut cloud, &short, None, None),
            Err(HeatmapError::DistanceCountMismatch {
                expected: 2,
                actual: 1
            })
        ));

        let field = DistanceField::from_values(vec![0.25, -0.25]);
        colorize_cloud(&mut cloud, &field, Some(&BPS), Some(&BPS)).unwrap();
        let colors = cloud.colors().unwrap();
        assert_relative_eq!(colors[0][1], 0.5); // yellow/red midpoint
        assert_relative_eq!(colors[1][2], 1.0); // cyan/blue midpoint
    }
}
