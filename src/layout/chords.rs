// Chord generation: one ribbon per linked pair, attached to a clamped
// angular window around each arc's midpoint.

use serde::Serialize;

use super::ArcSegment;
use crate::matrix::LinkMatrix;

/// One chord between two department arcs. The endpoints are angular
/// windows at the chord radius; the renderer draws the ribbon between
/// them.
#[derive(Debug, Clone, Serialize)]
pub struct Chord {
    pub source_index: usize,
    pub target_index: usize,
    pub source: ArcSegment,
    pub target: ArcSegment,
    pub value: f32,
}

impl Chord {
    /// Arc whose color the ribbon takes when nothing is focused.
    pub fn dominant_index(&self) -> usize {
        self.source_index.min(self.target_index)
    }
}

/// Angular window of `width` around the arc's midpoint, clamped to the
/// arc itself so narrow arcs never leak chord endpoints past their edges.
pub(super) fn arc_center(arc: &ArcSegment, width: f32) -> ArcSegment {
    let mid = arc.midpoint();
    ArcSegment {
        start_angle: arc.start_angle.max(mid - width),
        end_angle: arc.end_angle.min(mid + width),
    }
}

/// Chords for every unordered pair with a positive link count. Symmetric
/// matrices make the lower triangle sufficient.
pub(super) fn calc_chords(
    matrix: &LinkMatrix,
    positions: &[ArcSegment],
    chord_width: f32,
) -> Vec<Chord> {
    let mut chords = Vec::new();
    for i in 0..matrix.n() {
        for j in 0..i {
            let value = matrix.get(i, j);
            if value > 0.0 {
                chords.push(Chord {
                    source_index: i,
                    target_index: j,
                    source: arc_center(&positions[i], chord_width),
                    target: arc_center(&positions[j], chord_width),
                    value,
                });
            }
        }
    }
    chords
}
