use std::collections::HashMap;

use thiserror::Error;

/// Ordered set of entity names (departments). Indices are stable insertion
/// order and double as matrix row/column indices.
#[derive(Debug, Clone, Default)]
pub struct EntitySet {
    names: Vec<String>,
    lookup: HashMap<String, usize>,
}

impl EntitySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the union of endpoints across link records, in first-seen
    /// order.
    pub fn from_link_endpoints<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut set = Self::new();
        for (a, b) in pairs {
            set.ensure(a);
            set.ensure(b);
        }
        set
    }

    pub fn ensure(&mut self, name: &str) -> usize {
        if let Some(&idx) = self.lookup.get(name) {
            return idx;
        }
        let idx = self.names.len();
        self.names.push(name.to_string());
        self.lookup.insert(name.to_string(), idx);
        idx
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.lookup.get(name).copied()
    }

    pub fn name(&self, idx: usize) -> &str {
        &self.names[idx]
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// One undirected link record: `(name1, name2, weight)`.
#[derive(Debug, Clone)]
pub struct LinkRecord {
    pub department1: String,
    pub department2: String,
    pub links: f32,
}

#[derive(Debug, Error)]
pub enum DataError {
    #[error("unknown department {name:?} in link record")]
    UnknownEntity { name: String },
    #[error(
        "duplicate link pair {name1:?} x {name2:?}: already {existing}, record says {incoming}"
    )]
    DuplicatePair {
        name1: String,
        name2: String,
        existing: f32,
        incoming: f32,
    },
    #[error("negative link weight {links} for {name1:?} x {name2:?}")]
    NegativeWeight {
        name1: String,
        name2: String,
        links: f32,
    },
    #[error("failed to read {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
}

/// Square symmetric matrix of link counts. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkMatrix {
    n: usize,
    cells: Vec<f32>,
}

impl LinkMatrix {
    fn zeros(n: usize) -> Self {
        Self {
            n,
            cells: vec![0.0; n * n],
        }
    }

    /// Populate from undirected records. Every record writes both `[i][j]`
    /// and `[j][i]`; a second record resolving to the same unordered pair is
    /// rejected, whether or not the weights agree.
    pub fn build(entities: &EntitySet, records: &[LinkRecord]) -> Result<Self, DataError> {
        let n = entities.len();
        let mut matrix = Self::zeros(n);
        let mut written = vec![false; n * n];
        for record in records {
            let i = entities.index_of(&record.department1).ok_or_else(|| {
                DataError::UnknownEntity {
                    name: record.department1.clone(),
                }
            })?;
            let j = entities.index_of(&record.department2).ok_or_else(|| {
                DataError::UnknownEntity {
                    name: record.department2.clone(),
                }
            })?;
            if record.links < 0.0 {
                return Err(DataError::NegativeWeight {
                    name1: record.department1.clone(),
                    name2: record.department2.clone(),
                    links: record.links,
                });
            }
            if written[i * n + j] || written[j * n + i] {
                return Err(DataError::DuplicatePair {
                    name1: record.department1.clone(),
                    name2: record.department2.clone(),
                    existing: matrix.cells[i * n + j],
                    incoming: record.links,
                });
            }
            matrix.cells[i * n + j] = record.links;
            matrix.cells[j * n + i] = record.links;
            written[i * n + j] = true;
            written[j * n + i] = true;
        }
        Ok(matrix)
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.cells[i * self.n + j]
    }

    pub fn row_sum(&self, i: usize) -> f32 {
        self.cells[i * self.n..(i + 1) * self.n].iter().sum()
    }

    pub fn row_sums(&self) -> Vec<f32> {
        (0..self.n).map(|i| self.row_sum(i)).collect()
    }

    pub fn max_value(&self) -> f32 {
        self.cells.iter().fold(0.0_f32, |acc, &v| acc.max(v))
    }

    pub fn add(&self, other: &LinkMatrix) -> LinkMatrix {
        self.zip(other, |a, b| a + b)
    }

    pub fn subtract(&self, other: &LinkMatrix) -> LinkMatrix {
        self.zip(other, |a, b| a - b)
    }

    fn zip(&self, other: &LinkMatrix, op: impl Fn(f32, f32) -> f32) -> LinkMatrix {
        debug_assert_eq!(self.n, other.n, "matrix dimension mismatch");
        LinkMatrix {
            n: self.n,
            cells: self
                .cells
                .iter()
                .zip(other.cells.iter())
                .map(|(&a, &b)| op(a, b))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(a: &str, b: &str, links: f32) -> LinkRecord {
        LinkRecord {
            department1: a.to_string(),
            department2: b.to_string(),
            links,
        }
    }

    fn three_depts() -> EntitySet {
        EntitySet::from_link_endpoints([
            ("Economics", "Law"),
            ("Economics", "Physics"),
        ])
    }

    #[test]
    fn entity_set_keeps_insertion_order() {
        let set = three_depts();
        assert_eq!(set.names(), &["Economics", "Law", "Physics"]);
        assert_eq!(set.index_of("Physics"), Some(2));
        assert_eq!(set.index_of("History"), None);
    }

    #[test]
    fn build_is_symmetric() {
        let set = three_depts();
        let m = LinkMatrix::build(
            &set,
            &[record("Economics", "Law", 4.0), record("Law", "Physics", 2.0)],
        )
        .unwrap();
        for i in 0..m.n() {
            for j in 0..m.n() {
                assert_eq!(m.get(i, j), m.get(j, i), "asymmetry at ({i}, {j})");
            }
        }
        assert_eq!(m.get(0, 1), 4.0);
        assert_eq!(m.get(2, 1), 2.0);
        assert_eq!(m.get(0, 2), 0.0);
    }

    #[test]
    fn build_rejects_duplicate_pair_even_reversed() {
        let set = three_depts();
        let err = LinkMatrix::build(
            &set,
            &[
                record("Economics", "Law", 4.0),
                record("Law", "Economics", 5.0),
            ],
        )
        .unwrap_err();
        match err {
            DataError::DuplicatePair {
                existing, incoming, ..
            } => {
                assert_eq!(existing, 4.0);
                assert_eq!(incoming, 5.0);
            }
            other => panic!("expected DuplicatePair, got {other:?}"),
        }
    }

    #[test]
    fn build_rejects_unknown_entity() {
        let set = three_depts();
        let err =
            LinkMatrix::build(&set, &[record("Economics", "History", 1.0)]).unwrap_err();
        assert!(matches!(err, DataError::UnknownEntity { name } if name == "History"));
    }

    #[test]
    fn build_rejects_negative_weight() {
        let set = three_depts();
        let err = LinkMatrix::build(&set, &[record("Economics", "Law", -1.0)]).unwrap_err();
        assert!(matches!(err, DataError::NegativeWeight { .. }));
    }

    #[test]
    fn row_sum_add_subtract_max() {
        let set = three_depts();
        let research = LinkMatrix::build(
            &set,
            &[record("Economics", "Law", 4.0), record("Law", "Physics", 2.0)],
        )
        .unwrap();
        let teaching = LinkMatrix::build(
            &set,
            &[record("Economics", "Law", 1.0), record("Economics", "Physics", 3.0)],
        )
        .unwrap();

        assert_eq!(research.row_sum(1), 6.0);
        assert_eq!(research.max_value(), 4.0);

        let total = research.add(&teaching);
        assert_eq!(total.get(0, 1), 5.0);
        assert_eq!(total.row_sums(), vec![8.0, 7.0, 5.0]);

        let balance = research.subtract(&teaching);
        assert_eq!(balance.get(0, 1), 3.0);
        assert_eq!(balance.get(0, 2), -3.0);
        // Result stays symmetric under both element-wise ops.
        assert_eq!(balance.get(2, 0), balance.get(0, 2));
    }
}
