//! Component measurement: area filter, centroid and radius.

use std::cmp::Ordering;
use std::f64::consts::PI;

use crate::backend::LabelMap;
use crate::types::{DetectStats, Dot};

/// Running pixel count and coordinate sums for one component.
#[derive(Debug, Clone, Copy, Default)]
struct Accumulator {
    area: u64,
    sum_x: u64,
    sum_y: u64,
}

/// Measure every labeled component and keep those with
/// `min_area <= area <= max_area`.
///
/// Dots come out in label order.
#[must_use = "returns the measured dots"]
pub fn measure_components(
    labels: &LabelMap,
    min_area: u64,
    max_area: u64,
) -> (Vec<Dot>, DetectStats) {
    let max_label = labels.pixels().map(|p| p.0[0]).max().unwrap_or(0);
    let mut accumulators = vec![Accumulator::default(); max_label as usize + 1];

    for (x, y, p) in labels.enumerate_pixels() {
        let label = p.0[0];
        if label == 0 {
            continue;
        }
        let acc = &mut accumulators[label as usize];
        acc.area += 1;
        acc.sum_x += u64::from(x);
        acc.sum_y += u64::from(y);
    }

    let mut stats = DetectStats::default();
    let mut dots = Vec::new();
    for acc in accumulators.iter().skip(1).filter(|a| a.area > 0) {
        stats.components += 1;
        if acc.area < min_area {
            stats.too_small += 1;
        } else if acc.area > max_area {
            stats.too_large += 1;
        } else {
            dots.push(dot_from(*acc));
        }
    }

    (dots, stats)
}

#[allow(clippy::cast_precision_loss)]
fn dot_from(acc: Accumulator) -> Dot {
    let area = acc.area as f64;
    Dot {
        x: round_to_3(acc.sum_x as f64 / area),
        y: round_to_3(acc.sum_y as f64 / area),
        radius: round_to_3(equivalent_radius(acc.area)),
    }
}

/// Radius of the circle whose area equals `area` pixels.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn equivalent_radius(area: u64) -> f64 {
    (area as f64 / PI).sqrt()
}

/// Round to 3 decimal places, ties away from zero.
#[must_use]
pub fn round_to_3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Sort into reading order: top-to-bottom, then left-to-right.
///
/// The sort is stable, so dots at identical positions keep their
/// relative order.
pub fn sort_reading_order(dots: &mut [Dot]) {
    dots.sort_by(|a, b| match a.y.total_cmp(&b.y) {
        Ordering::Equal => a.x.total_cmp(&b.x),
        other => other,
    });
}
