pub mod arcs;
pub mod chords;
pub mod error;
pub mod labels;
pub(crate) mod text;

pub use arcs::SortOrder;
pub use chords::Chord;
pub use error::{LayoutError, RelaxPhase};
pub use labels::{place_labels, Alignment, LabelBox, LabelParams, OrientedRect, PlacedLabel};

use serde::Serialize;

use crate::config::LayoutConfig;
use crate::data::Dataset;

/// Half-open angular interval owned by one entity. Angles are radians,
/// clockwise from 12 o'clock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArcSegment {
    pub start_angle: f32,
    pub end_angle: f32,
}

impl ArcSegment {
    pub fn midpoint(&self) -> f32 {
        (self.start_angle + self.end_angle) / 2.0
    }
}

/// Point at `angle` on the circle of `radius` centered at the origin.
pub fn radial_point(angle: f32, radius: f32) -> (f32, f32) {
    (radius * angle.sin(), -radius * angle.cos())
}

/// The nested radii every diagram is drawn with, all derived from the
/// inner radius.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Radii {
    pub inner: f32,
    pub outer: f32,
    pub chord: f32,
    pub label: f32,
}

impl Radii {
    pub(crate) fn derive(width: f32, height: f32, config: &LayoutConfig) -> Self {
        let inner = ((width - 100.0) / 2.0).min(height) * config.inner_radius_factor;
        Radii {
            inner,
            outer: inner * config.outer_radius_ratio,
            chord: inner * config.chord_radius_ratio,
            label: inner * config.label_radius_ratio,
        }
    }
}

/// One department arc with its display text.
#[derive(Debug, Clone, Serialize)]
pub struct DeptArc {
    pub index: usize,
    pub name: String,
    pub display_name: String,
    pub arc: ArcSegment,
}

/// Arcs, chords and relaxed labels for one matrix, positioned at
/// `center` within the overall canvas.
#[derive(Debug, Clone, Serialize)]
pub struct ChordDiagram {
    pub relation: String,
    pub center: (f32, f32),
    pub radii: Radii,
    pub arcs: Vec<DeptArc>,
    pub chords: Vec<Chord>,
    pub labels: Vec<PlacedLabel>,
}

/// The dual view: research and teaching diagrams side by side, sharing
/// one arc layout so departments stay put between the two circles.
#[derive(Debug, Clone, Serialize)]
pub struct DualLayout {
    pub order: SortOrder,
    pub width: f32,
    pub height: f32,
    pub research: ChordDiagram,
    pub teaching: ChordDiagram,
}

/// Compute the dual chord layout for one sort order. Fails before any
/// geometry work on inconsistent input, and with `NonConvergence` if the
/// label relaxation exceeds its scan cap.
pub fn compute_dual_layout(
    dataset: &Dataset,
    order: SortOrder,
    width: f32,
    height: f32,
    config: &LayoutConfig,
) -> Result<DualLayout, LayoutError> {
    let n = dataset.departments.len();
    if dataset.research.n() != n || dataset.teaching.n() != n {
        return Err(LayoutError::CountMismatch {
            arcs: dataset.research.n().min(dataset.teaching.n()),
            labels: n,
        });
    }

    let totals = dataset.research.add(&dataset.teaching).row_sums();
    let balance = dataset.research.subtract(&dataset.teaching).row_sums();
    let weights = arcs::arc_weights(order, &dataset.faculty, &totals, &balance);
    let sequence = arcs::arc_sequence(order, &weights);
    let positions = arcs::angular_partition(&weights, &sequence, config.pad_angle);

    let radii = Radii::derive(width, height, config);
    let params = LabelParams {
        anchor_radius: radii.label,
        circle_radius: radii.inner,
        margin: config.label_margin,
        step: config.label_step,
        padding_x: config.label_padding_x,
        max_pass_factor: config.max_pass_factor,
    };

    let dept_arcs: Vec<DeptArc> = dataset
        .departments
        .names()
        .iter()
        .enumerate()
        .map(|(index, name)| DeptArc {
            index,
            name: name.clone(),
            display_name: text::truncate(name, config.max_label_chars),
            arc: positions[index],
        })
        .collect();

    // Both circles share arc positions and label geometry; only the
    // ribbons differ by matrix.
    let labels = labels::place_labels(&positions, &params, |index| {
        text::measure_label(&dept_arcs[index].display_name, config)
    })?;

    let diagram = |relation: &str, matrix: &crate::matrix::LinkMatrix, slot: f32| ChordDiagram {
        relation: relation.to_string(),
        center: (radii.label * (2.0 * slot + 1.0), radii.label),
        radii,
        arcs: dept_arcs.clone(),
        chords: chords::calc_chords(matrix, &positions, config.chord_width),
        labels: labels.clone(),
    };

    Ok(DualLayout {
        order,
        width,
        height,
        research: diagram("research", &dataset.research, 0.0),
        teaching: diagram("teaching", &dataset.teaching, 1.0),
    })
}
