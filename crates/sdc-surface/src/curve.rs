//! Closed, smooth curves through random control points.
//!
//! The loop is a uniform Catmull–Rom spline: each segment `P1 → P2` is the
//! cubic Bézier with inner handles `P1 + (P2 − P0)/6` and `P2 − (P3 − P1)/6`,
//! so the curve interpolates every control point and is C¹ around the loop.
//! The dense evaluation is then resampled to points evenly spaced by arc
//! length, which keeps "N samples further along" a stable distance.

use std::f32::consts::PI;

use sdc_core::{SimRng, Vec2};

/// Dense evaluations per control segment before resampling.
const SUBDIVISIONS: usize = 64;

/// Cubic Bézier point at `t ∈ [0, 1]`.
#[inline]
pub fn bezier3(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let t2 = t * t;
    let t3 = t2 * t;
    let mt = 1.0 - t;
    let mt2 = mt * mt;
    let mt3 = mt2 * mt;

    p0 * mt3 + p1 * (3.0 * mt2 * t) + p2 * (3.0 * mt * t2) + p3 * t3
}

/// `2 * complexity` control points at evenly spaced angles around `center`,
/// each at a radius drawn uniformly from `[spread_min, spread_max]`.
pub fn random_loop(
    center:     Vec2,
    spread_min: f32,
    spread_max: f32,
    complexity: usize,
    rng:        &mut SimRng,
) -> Vec<Vec2> {
    let n = 2 * complexity;
    let step = PI / complexity as f32;
    (0..n)
        .map(|k| {
            let phi = k as f32 * step;
            let rho = rng.gen_range(spread_min..=spread_max);
            center + Vec2::new(rho * phi.cos(), rho * phi.sin())
        })
        .collect()
}

/// Evaluate the closed Catmull–Rom loop through `controls` and resample it
/// to `samples` points spaced evenly by arc length.
///
/// Returns an empty vec for fewer than 3 control points or zero samples.
pub fn closed_catmull_rom(controls: &[Vec2], samples: usize) -> Vec<Vec2> {
    let n = controls.len();
    if n < 3 || samples == 0 {
        return Vec::new();
    }

    // ── Dense evaluation ──────────────────────────────────────────────────
    let mut dense = Vec::with_capacity(n * SUBDIVISIONS + 1);
    for i in 0..n {
        let p0 = controls[(i + n - 1) % n];
        let p1 = controls[i];
        let p2 = controls[(i + 1) % n];
        let p3 = controls[(i + 2) % n];
        let b1 = p1 + (p2 - p0) * (1.0 / 6.0);
        let b2 = p2 - (p3 - p1) * (1.0 / 6.0);
        for s in 0..SUBDIVISIONS {
            let t = s as f32 / SUBDIVISIONS as f32;
            dense.push(bezier3(p1, b1, b2, p2, t));
        }
    }
    dense.push(controls[0]);

    // ── Arc-length resampling ─────────────────────────────────────────────
    let mut cumulative = Vec::with_capacity(dense.len());
    let mut total = 0.0_f32;
    cumulative.push(0.0);
    for pair in dense.windows(2) {
        total += pair[0].distance(pair[1]);
        cumulative.push(total);
    }
    if total <= 0.0 {
        return vec![controls[0]; samples];
    }

    let spacing = total / samples as f32;
    let mut out = Vec::with_capacity(samples);
    let mut seg = 0;
    for k in 0..samples {
        let target = k as f32 * spacing;
        while seg + 1 < cumulative.len() - 1 && cumulative[seg + 1] < target {
            seg += 1;
        }
        let span = cumulative[seg + 1] - cumulative[seg];
        let t = if span > 0.0 { (target - cumulative[seg]) / span } else { 0.0 };
        out.push(dense[seg] + (dense[seg + 1] - dense[seg]) * t.clamp(0.0, 1.0));
    }
    out
}

/// Split `len` items into `parts` contiguous ranges whose sizes differ by at
/// most one, larger ranges first.
pub fn split_even(len: usize, parts: usize) -> Vec<std::ops::Range<usize>> {
    if parts == 0 {
        return Vec::new();
    }
    let base = len / parts;
    let extra = len % parts;
    let mut start = 0;
    (0..parts)
        .map(|i| {
            let size = base + usize::from(i < extra);
            let range = start..start + size;
            start += size;
            range
        })
        .collect()
}
