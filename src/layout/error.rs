use thiserror::Error;

/// Which relaxation phase gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelaxPhase {
    CircleClearance,
    PairSeparation,
}

impl std::fmt::Display for RelaxPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelaxPhase::CircleClearance => write!(f, "circle clearance"),
            RelaxPhase::PairSeparation => write!(f, "pair separation"),
        }
    }
}

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("arc {index} has end angle {end} <= start angle {start}")]
    InvalidArc { index: usize, start: f32, end: f32 },

    #[error("{arcs} arcs but {labels} labels")]
    CountMismatch { arcs: usize, labels: usize },

    #[error("label relaxation ({phase}) did not converge within {scans} scans")]
    NonConvergence { phase: RelaxPhase, scans: usize },
}
