use std::path::Path;

use serde::Deserialize;

use crate::matrix::{DataError, EntitySet, LinkMatrix, LinkRecord};

/// Loaded input: the department roster plus one symmetric matrix per
/// relation. Both matrices share the same index space.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub departments: EntitySet,
    /// Faculty headcount per department, aligned with `departments` indices.
    pub faculty: Vec<f32>,
    pub research: LinkMatrix,
    pub teaching: LinkMatrix,
}

#[derive(Debug, Deserialize)]
struct DeptRow {
    department: String,
    faculty: f32,
}

#[derive(Debug, Deserialize)]
struct LinkRow {
    department1: String,
    department2: String,
    links: f32,
}

impl Dataset {
    /// Assemble from in-memory records. The department set is the union of
    /// link endpoints, research first, in first-seen order; departments
    /// absent from `faculty` get a zero headcount.
    pub fn from_records(
        research: &[LinkRecord],
        teaching: &[LinkRecord],
        faculty: &[(&str, f32)],
    ) -> Result<Dataset, DataError> {
        let departments = EntitySet::from_link_endpoints(
            research
                .iter()
                .chain(teaching.iter())
                .map(|r| (r.department1.as_str(), r.department2.as_str())),
        );
        let mut counts = vec![0.0f32; departments.len()];
        for (name, count) in faculty {
            if let Some(idx) = departments.index_of(name) {
                counts[idx] = *count;
            }
        }
        let research = LinkMatrix::build(&departments, research)?;
        let teaching = LinkMatrix::build(&departments, teaching)?;
        Ok(Dataset {
            departments,
            faculty: counts,
            research,
            teaching,
        })
    }
}

fn read_links(path: &Path) -> Result<Vec<LinkRecord>, DataError> {
    let wrap = |source: csv::Error| DataError::Csv {
        path: path.display().to_string(),
        source,
    };
    let mut reader = csv::Reader::from_path(path).map_err(wrap)?;
    let mut records = Vec::new();
    for row in reader.deserialize::<LinkRow>() {
        let row = row.map_err(wrap)?;
        records.push(LinkRecord {
            department1: row.department1,
            department2: row.department2,
            links: row.links,
        });
    }
    Ok(records)
}

fn read_faculty(path: &Path) -> Result<Vec<(String, f32)>, DataError> {
    let wrap = |source: csv::Error| DataError::Csv {
        path: path.display().to_string(),
        source,
    };
    let mut reader = csv::Reader::from_path(path).map_err(wrap)?;
    let mut rows = Vec::new();
    for row in reader.deserialize::<DeptRow>() {
        let row = row.map_err(wrap)?;
        rows.push((row.department, row.faculty));
    }
    Ok(rows)
}

/// Load the three CSV inputs and assemble a [`Dataset`].
pub fn load_dataset(
    departments: &Path,
    research: &Path,
    teaching: &Path,
) -> Result<Dataset, DataError> {
    let faculty_rows = read_faculty(departments)?;
    let research_records = read_links(research)?;
    let teaching_records = read_links(teaching)?;
    let faculty: Vec<(&str, f32)> = faculty_rows
        .iter()
        .map(|(name, count)| (name.as_str(), *count))
        .collect();
    Dataset::from_records(&research_records, &teaching_records, &faculty)
}
