#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod data;
pub mod layout;
pub mod layout_dump;
pub mod matrix;
pub mod text_metrics;

pub use config::{load_config, LayoutConfig};
pub use data::{load_dataset, Dataset};
pub use layout::{
    compute_dual_layout, place_labels, radial_point, Alignment, ArcSegment, Chord, ChordDiagram,
    DeptArc, DualLayout, LabelBox, LabelParams, LayoutError, OrientedRect, PlacedLabel, Radii,
    RelaxPhase, SortOrder,
};
pub use layout_dump::{write_layout_dump, LayoutDump};
pub use matrix::{DataError, EntitySet, LinkMatrix, LinkRecord};
