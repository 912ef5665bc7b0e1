// Angular partition of the circle, one arc per department, driven by the
// selected weight vector and sort order.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::Serialize;

use super::ArcSegment;

const FULL_CIRCLE: f32 = std::f32::consts::PI * 2.0;
/// Share floor handed to zero-weight entities so every arc keeps a
/// positive span (a degenerate arc would have no midpoint to label).
const MIN_WEIGHT_SHARE: f32 = 1e-3;

/// The four arc orderings cycled through by the interactive views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Equal arcs, insertion order.
    Department,
    /// Arcs sized by faculty head count, ascending around the circle.
    Faculty,
    /// Arcs sized by total links (research + teaching), descending.
    Links,
    /// Arcs sized by link balance (research - teaching), descending.
    Emphasis,
}

impl SortOrder {
    pub const ALL: [SortOrder; 4] = [
        SortOrder::Department,
        SortOrder::Faculty,
        SortOrder::Links,
        SortOrder::Emphasis,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Department => "department",
            SortOrder::Faculty => "faculty",
            SortOrder::Links => "links",
            SortOrder::Emphasis => "emphasis",
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "department" => Ok(SortOrder::Department),
            "faculty" => Ok(SortOrder::Faculty),
            "links" => Ok(SortOrder::Links),
            "emphasis" => Ok(SortOrder::Emphasis),
            other => Err(format!(
                "unknown order {other:?} (expected department, faculty, links or emphasis)"
            )),
        }
    }
}

/// Weight vector for the chosen order. `totals` and `balance` are the row
/// sums of the combined and differenced link matrices.
pub(super) fn arc_weights(
    order: SortOrder,
    faculty: &[f32],
    totals: &[f32],
    balance: &[f32],
) -> Vec<f32> {
    match order {
        SortOrder::Department => vec![1.0; faculty.len()],
        SortOrder::Faculty => faculty.to_vec(),
        SortOrder::Links => totals.to_vec(),
        SortOrder::Emphasis => balance.to_vec(),
    }
}

/// Placement sequence of entity indices around the circle. Department
/// order keeps insertion order; faculty sorts ascending; links and
/// emphasis sort descending. Ties break by entity index so the sequence
/// is total.
pub(super) fn arc_sequence(order: SortOrder, weights: &[f32]) -> Vec<usize> {
    let mut sequence: Vec<usize> = (0..weights.len()).collect();
    match order {
        SortOrder::Department => {}
        SortOrder::Faculty => sequence.sort_by(|&a, &b| {
            weights[a]
                .partial_cmp(&weights[b])
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.cmp(&b))
        }),
        SortOrder::Links | SortOrder::Emphasis => sequence.sort_by(|&a, &b| {
            weights[b]
                .partial_cmp(&weights[a])
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.cmp(&b))
        }),
    }
    sequence
}

/// Split the circle into one arc per entity, `pad_angle` of gap around
/// each, spans proportional to the clamped weights. The result is indexed
/// by entity index regardless of where the sequence placed it. Negative
/// weights count as zero; an all-zero vector falls back to equal spans.
pub(super) fn angular_partition(
    weights: &[f32],
    sequence: &[usize],
    pad_angle: f32,
) -> Vec<ArcSegment> {
    let n = weights.len();
    if n == 0 {
        return Vec::new();
    }

    let mut clamped: Vec<f32> = weights.iter().map(|w| w.max(0.0)).collect();
    let total: f32 = clamped.iter().sum();
    if total <= 0.0 {
        clamped = vec![1.0; n];
    }
    let floor = clamped.iter().sum::<f32>() * MIN_WEIGHT_SHARE;
    let shares: Vec<f32> = clamped.iter().map(|w| w.max(floor)).collect();
    let share_total: f32 = shares.iter().sum();

    let usable = FULL_CIRCLE - pad_angle * n as f32;
    let mut arcs = vec![
        ArcSegment {
            start_angle: 0.0,
            end_angle: 0.0,
        };
        n
    ];
    let mut cursor = 0.0;
    for &index in sequence {
        let span = shares[index] / share_total * usable;
        arcs[index] = ArcSegment {
            start_angle: cursor + pad_angle / 2.0,
            end_angle: cursor + pad_angle / 2.0 + span,
        };
        cursor += span + pad_angle;
    }
    arcs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_round_trips_through_str() {
        for order in SortOrder::ALL {
            assert_eq!(order.as_str().parse::<SortOrder>().unwrap(), order);
        }
        assert!("alphabetical".parse::<SortOrder>().is_err());
    }

    #[test]
    fn department_order_splits_evenly_in_insertion_order() {
        let weights = arc_weights(SortOrder::Department, &[3.0, 1.0, 2.0], &[], &[]);
        let sequence = arc_sequence(SortOrder::Department, &weights);
        assert_eq!(sequence, vec![0, 1, 2]);

        let arcs = angular_partition(&weights, &sequence, 0.01);
        let spans: Vec<f32> = arcs.iter().map(|a| a.end_angle - a.start_angle).collect();
        for span in &spans {
            assert!((span - spans[0]).abs() < 1e-5);
        }
        assert!(arcs[0].start_angle < arcs[1].start_angle);
        assert!(arcs[1].start_angle < arcs[2].start_angle);
    }

    #[test]
    fn faculty_sorts_ascending_links_descending() {
        let faculty = [30.0, 10.0, 20.0];
        let totals = [5.0, 9.0, 7.0];
        let asc = arc_sequence(
            SortOrder::Faculty,
            &arc_weights(SortOrder::Faculty, &faculty, &totals, &[]),
        );
        assert_eq!(asc, vec![1, 2, 0]);

        let desc = arc_sequence(
            SortOrder::Links,
            &arc_weights(SortOrder::Links, &faculty, &totals, &[]),
        );
        assert_eq!(desc, vec![1, 2, 0]);
    }

    #[test]
    fn ties_break_by_entity_index() {
        let weights = [4.0, 4.0, 4.0];
        assert_eq!(arc_sequence(SortOrder::Links, &weights), vec![0, 1, 2]);
        assert_eq!(arc_sequence(SortOrder::Faculty, &weights), vec![0, 1, 2]);
    }

    #[test]
    fn partition_covers_the_circle_with_gaps() {
        let weights = [2.0, 3.0, 5.0];
        let pad = 0.01;
        let arcs = angular_partition(&weights, &[0, 1, 2], pad);

        let mut total_span = 0.0;
        for (index, arc) in arcs.iter().enumerate() {
            assert!(
                arc.end_angle > arc.start_angle,
                "degenerate arc at {index}"
            );
            total_span += arc.end_angle - arc.start_angle;
        }
        assert!((total_span + pad * 3.0 - FULL_CIRCLE).abs() < 1e-4);
        // Larger weight, larger span.
        let span = |i: usize| arcs[i].end_angle - arcs[i].start_angle;
        assert!(span(2) > span(1) && span(1) > span(0));
    }

    #[test]
    fn partition_is_indexed_by_entity_not_position() {
        // Entity 2 has the largest weight and is placed first by a
        // descending sequence, but stays addressable as arcs[2].
        let weights = [2.0, 3.0, 5.0];
        let sequence = arc_sequence(SortOrder::Links, &weights);
        assert_eq!(sequence, vec![2, 1, 0]);

        let arcs = angular_partition(&weights, &sequence, 0.0);
        assert!(arcs[2].start_angle < arcs[1].start_angle);
        assert!(arcs[1].start_angle < arcs[0].start_angle);
        let span = |i: usize| arcs[i].end_angle - arcs[i].start_angle;
        assert!((span(2) - FULL_CIRCLE * 0.5).abs() < 1e-4);
    }

    #[test]
    fn zero_and_negative_weights_still_get_positive_arcs() {
        let arcs = angular_partition(&[0.0, -4.0, 10.0], &[0, 1, 2], 0.01);
        for arc in &arcs {
            assert!(arc.end_angle > arc.start_angle);
        }

        let uniform = angular_partition(&[0.0, 0.0], &[0, 1], 0.0);
        let span = |i: usize| uniform[i].end_angle - uniform[i].start_angle;
        assert!((span(0) - span(1)).abs() < 1e-5);
    }
}
