use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::data::Dataset;
use crate::layout::{ChordDiagram, DualLayout, Radii};

/// Flat, canvas-space snapshot of a [`DualLayout`] for downstream
/// renderers and golden tests. All coordinates are absolute, with the
/// per-diagram center already applied.
#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub order: String,
    pub width: f32,
    pub height: f32,
    pub diagrams: Vec<DiagramDump>,
}

#[derive(Debug, Serialize)]
pub struct DiagramDump {
    pub relation: String,
    pub center: [f32; 2],
    pub radii: Radii,
    pub arcs: Vec<ArcDump>,
    pub chords: Vec<ChordDump>,
    pub labels: Vec<LabelDump>,
}

#[derive(Debug, Serialize)]
pub struct ArcDump {
    pub index: usize,
    pub name: String,
    pub display_name: String,
    pub start_angle: f32,
    pub end_angle: f32,
}

#[derive(Debug, Serialize)]
pub struct ChordDump {
    pub source: String,
    pub target: String,
    pub value: f32,
    pub source_start: f32,
    pub source_end: f32,
    pub target_start: f32,
    pub target_end: f32,
    pub dominant: String,
}

#[derive(Debug, Serialize)]
pub struct LabelDump {
    pub name: String,
    pub text: String,
    /// Top-left corner of the padded label box.
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub anchor: String,
    pub connector: Vec<[f32; 2]>,
}

fn dump_diagram(diagram: &ChordDiagram, dataset: &Dataset) -> DiagramDump {
    let (cx, cy) = diagram.center;

    let arcs = diagram
        .arcs
        .iter()
        .map(|arc| ArcDump {
            index: arc.index,
            name: arc.name.clone(),
            display_name: arc.display_name.clone(),
            start_angle: arc.arc.start_angle,
            end_angle: arc.arc.end_angle,
        })
        .collect();

    let chords = diagram
        .chords
        .iter()
        .map(|chord| ChordDump {
            source: dataset.departments.name(chord.source_index).to_string(),
            target: dataset.departments.name(chord.target_index).to_string(),
            value: chord.value,
            source_start: chord.source.start_angle,
            source_end: chord.source.end_angle,
            target_start: chord.target.start_angle,
            target_end: chord.target.end_angle,
            dominant: dataset.departments.name(chord.dominant_index()).to_string(),
        })
        .collect();

    let labels = diagram
        .labels
        .iter()
        .map(|label| {
            let (min_x, min_y, max_x, max_y) = label.rect.bounds();
            LabelDump {
                name: dataset.departments.name(label.index).to_string(),
                text: diagram.arcs[label.index].display_name.clone(),
                x: cx + min_x,
                y: cy + min_y,
                width: max_x - min_x,
                height: max_y - min_y,
                anchor: label.align.as_str().to_string(),
                connector: label
                    .connector
                    .iter()
                    .map(|[x, y]| [cx + x, cy + y])
                    .collect(),
            }
        })
        .collect();

    DiagramDump {
        relation: diagram.relation.clone(),
        center: [cx, cy],
        radii: diagram.radii,
        arcs,
        chords,
        labels,
    }
}

impl LayoutDump {
    pub fn from_layout(layout: &DualLayout, dataset: &Dataset) -> Self {
        LayoutDump {
            order: layout.order.as_str().to_string(),
            width: layout.width,
            height: layout.height,
            diagrams: vec![
                dump_diagram(&layout.research, dataset),
                dump_diagram(&layout.teaching, dataset),
            ],
        }
    }
}

/// Serialize the dump to `path`, or to stdout when no path is given.
pub fn write_layout_dump(
    path: Option<&Path>,
    layout: &DualLayout,
    dataset: &Dataset,
) -> anyhow::Result<()> {
    let dump = LayoutDump::from_layout(layout, dataset);
    match path {
        Some(path) => {
            let file = File::create(path)?;
            let writer = BufWriter::new(file);
            serde_json::to_writer_pretty(writer, &dump)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            serde_json::to_writer_pretty(&mut handle, &dump)?;
            writeln!(handle)?;
        }
    }
    Ok(())
}
