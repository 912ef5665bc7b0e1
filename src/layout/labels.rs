// Label placement around a chord diagram: radial anchors plus two
// fixed-point relaxation passes (clear the arc ring, then de-overlap
// pairs). Pure geometry, no SVG dependency.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use serde::Serialize;

use super::error::{LayoutError, RelaxPhase};
use super::{radial_point, ArcSegment};

/// Scan cap floor so tiny inputs still get a usable bound.
const MIN_SCAN_CAP: usize = 64;

/// Measured bounding box of one rendered label, from the text-measurement
/// collaborator.
#[derive(Debug, Clone, Copy)]
pub struct LabelBox {
    pub width: f32,
    pub height: f32,
}

/// Engine tuning. `anchor_radius` is where unadjusted labels sit;
/// `circle_radius` is the arc ring every label must clear.
#[derive(Debug, Clone, Copy)]
pub struct LabelParams {
    pub anchor_radius: f32,
    pub circle_radius: f32,
    /// Clearance enforced around every label box during overlap tests.
    pub margin: f32,
    /// Outward nudge per relaxation move. Must be positive.
    pub step: f32,
    /// Horizontal padding added on both sides of each measured box.
    pub padding_x: f32,
    /// Relaxation scan cap per phase, as a multiple of n^2.
    pub max_pass_factor: usize,
}

impl LabelParams {
    fn scan_cap(&self, n: usize) -> usize {
        (self.max_pass_factor * n * n).max(MIN_SCAN_CAP)
    }
}

/// A label box anchored at the radial projection of its arc midpoint.
/// Text runs away from the circle center horizontally (`side_x` is the
/// side, +1 right / -1 left, padded by `pad_x` on both ends), while the
/// box's vertical extent reaches from the anchor back toward the ring
/// (`side_y` +1 below the center / -1 above). Relaxation moves `anchor.1`
/// only; sizes and sides are fixed at initial placement.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct OrientedRect {
    pub anchor: (f32, f32),
    pub width: f32,
    pub height: f32,
    pub pad_x: f32,
    pub side_x: f32,
    pub side_y: f32,
}

impl OrientedRect {
    /// (min_x, min_y, max_x, max_y)
    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        let x1 = self.anchor.0 - self.side_x * self.pad_x;
        let x2 = self.anchor.0 + self.side_x * (self.width + self.pad_x);
        let y1 = self.anchor.1 - self.side_y * self.height;
        let y2 = self.anchor.1;
        (x1.min(x2), y1.min(y2), x1.max(x2), y1.max(y2))
    }

    /// Visual top-left corner, for renderers that draw from it.
    pub fn top_left(&self) -> (f32, f32) {
        let (min_x, min_y, _, _) = self.bounds();
        (min_x, min_y)
    }

    /// Strict test against the disk of `radius` centered at the origin;
    /// touching does not count.
    pub(crate) fn intersects_disk(&self, radius: f32) -> bool {
        let (min_x, min_y, max_x, max_y) = self.bounds();
        let cx = 0.0_f32.clamp(min_x, max_x);
        let cy = 0.0_f32.clamp(min_y, max_y);
        cx * cx + cy * cy < radius * radius
    }
}

/// True when the two boxes, each inflated by `margin` on all four sides,
/// strictly overlap.
pub(crate) fn rects_collide(a: &OrientedRect, b: &OrientedRect, margin: f32) -> bool {
    let (ax1, ay1, ax2, ay2) = a.bounds();
    let (bx1, by1, bx2, by2) = b.bounds();
    ax1 - margin < bx2 + margin
        && bx1 - margin < ax2 + margin
        && ay1 - margin < by2 + margin
        && by1 - margin < ay2 + margin
}

/// Text alignment hint for renderers: labels on the right half read
/// outward from the anchor (`Start`), labels on the left half end at it
/// (`End`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Start,
    End,
}

impl Alignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Start => "start",
            Alignment::End => "end",
        }
    }
}

/// Final placement for one label.
#[derive(Debug, Clone, Serialize)]
pub struct PlacedLabel {
    pub index: usize,
    pub rect: OrientedRect,
    pub align: Alignment,
    /// Arc midpoint on the ring, radial anchor, label attach point.
    pub connector: [[f32; 2]; 3],
}

/// Place labels for `arcs`, one per arc, resolving overlaps with the arc
/// ring and with each other. `measure` is called exactly once per label, in
/// index order, after initial radial placement. Pure: identical inputs give
/// identical output.
pub fn place_labels(
    arcs: &[ArcSegment],
    params: &LabelParams,
    mut measure: impl FnMut(usize) -> LabelBox,
) -> Result<Vec<PlacedLabel>, LayoutError> {
    for (index, arc) in arcs.iter().enumerate() {
        if arc.end_angle <= arc.start_angle {
            return Err(LayoutError::InvalidArc {
                index,
                start: arc.start_angle,
                end: arc.end_angle,
            });
        }
    }

    let n = arcs.len();
    let mut rects = Vec::with_capacity(n);
    for (index, arc) in arcs.iter().enumerate() {
        let mid = arc.midpoint();
        let anchor = radial_point(mid, params.anchor_radius);
        let boxed = measure(index);
        let (side_x, side_y) = sides_of(mid);
        rects.push(OrientedRect {
            anchor,
            width: boxed.width,
            height: boxed.height,
            pad_x: params.padding_x,
            side_x,
            side_y,
        });
    }

    relax_circle_clearance(&mut rects, params, n)?;
    relax_pair_separation(&mut rects, params, n)?;

    let labels = arcs
        .iter()
        .enumerate()
        .map(|(index, arc)| {
            let rect = rects[index];
            let mid = arc.midpoint();
            // Connector lands on the circle-facing edge at half height.
            let attach = (
                rect.anchor.0,
                rect.anchor.1 - rect.side_y * rect.height / 2.0,
            );
            PlacedLabel {
                index,
                rect,
                align: if rect.side_x > 0.0 {
                    Alignment::Start
                } else {
                    Alignment::End
                },
                connector: [
                    point(radial_point(mid, params.circle_radius)),
                    point(radial_point(mid, params.anchor_radius)),
                    point(attach),
                ],
            }
        })
        .collect();
    Ok(labels)
}

/// Phase A: push any label still crossing the arc ring outward along its
/// vertical sign, restarting the scan after every move, until a full scan
/// is clean.
fn relax_circle_clearance(
    rects: &mut [OrientedRect],
    params: &LabelParams,
    n: usize,
) -> Result<(), LayoutError> {
    let cap = params.scan_cap(n);
    let mut scans = 0;
    'scan: loop {
        scans += 1;
        if scans > cap {
            return Err(LayoutError::NonConvergence {
                phase: RelaxPhase::CircleClearance,
                scans: cap,
            });
        }
        for rect in rects.iter_mut() {
            if rect.intersects_disk(params.circle_radius) {
                rect.anchor.1 += rect.side_y * params.step;
                continue 'scan;
            }
        }
        return Ok(());
    }
}

/// Phase B: for each ordered pair of colliding labels move the one whose
/// horizontal distance from center is not smaller (ties move the second),
/// restarting the scan after every move. Keeping the inner label of each
/// pair fixed stops mirrored pairs from chasing each other outward.
fn relax_pair_separation(
    rects: &mut [OrientedRect],
    params: &LabelParams,
    n: usize,
) -> Result<(), LayoutError> {
    let cap = params.scan_cap(n);
    let mut scans = 0;
    'scan: loop {
        scans += 1;
        if scans > cap {
            return Err(LayoutError::NonConvergence {
                phase: RelaxPhase::PairSeparation,
                scans: cap,
            });
        }
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                if rects_collide(&rects[i], &rects[j], params.margin) {
                    let mover = if rects[j].anchor.0.abs() >= rects[i].anchor.0.abs() {
                        j
                    } else {
                        i
                    };
                    rects[mover].anchor.1 += rects[mover].side_y * params.step;
                    continue 'scan;
                }
            }
        }
        return Ok(());
    }
}

/// Growth signs from the angular midpoint, decided in angle space with a
/// tolerance band around the axes. A midpoint on (or within rounding
/// distance of) an axis counts as the positive side, so a 3 or 9 o'clock
/// label moves down and a 6 or 12 o'clock label keeps the right-hand
/// side. `sin`/`cos` of the midpoint can land a hair on the wrong side of
/// zero and must not pick the direction.
fn sides_of(mid: f32) -> (f32, f32) {
    const AXIS_EPS: f32 = 1e-4;
    let angle = mid.rem_euclid(TAU);
    let side_x = if angle <= PI + AXIS_EPS || angle >= TAU - AXIS_EPS {
        1.0
    } else {
        -1.0
    };
    let side_y = if angle >= FRAC_PI_2 - AXIS_EPS && angle <= 3.0 * FRAC_PI_2 + AXIS_EPS {
        1.0
    } else {
        -1.0
    };
    (side_x, side_y)
}

fn point(p: (f32, f32)) -> [f32; 2] {
    [p.0, p.1]
}
