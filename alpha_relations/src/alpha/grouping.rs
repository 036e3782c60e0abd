use std::{collections::BTreeSet, fmt};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::relations::{Footprint, RelationKind};
use crate::event_log::activity::Activity;

///
/// Candidate split/join block `(left, right)`
///
/// Valid when all activities of `left` are pairwise in [`RelationKind::Choice`], the same
/// holds for `right`, and every activity of `left` is in [`RelationKind::Causality`]
/// towards every activity of `right`.
///
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Grouping {
    /// Input side (activities enabling `right`)
    pub left: BTreeSet<Activity>,
    /// Output side
    pub right: BTreeSet<Activity>,
}

impl Grouping {
    /// Create a new [`Grouping`] from both sides
    pub fn new<L, R, A, B>(left: L, right: R) -> Self
    where
        L: IntoIterator<Item = A>,
        R: IntoIterator<Item = B>,
        A: Into<Activity>,
        B: Into<Activity>,
    {
        Self {
            left: left.into_iter().map(Into::into).collect(),
            right: right.into_iter().map(Into::into).collect(),
        }
    }

    ///
    /// Whether `other` contains this grouping on both sides (and is not equal to it)
    ///
    pub fn is_dominated_by(&self, other: &Grouping) -> bool {
        self != other && self.left.is_subset(&other.left) && self.right.is_subset(&other.right)
    }

    ///
    /// Check this grouping against the relations of a [`Footprint`]
    ///
    /// Activities not contained in the footprint make the grouping invalid.
    ///
    pub fn is_valid(&self, footprint: &Footprint) -> bool {
        let left: Option<Vec<usize>> = self.left.iter().map(|a| footprint.index_of(a)).collect();
        let right: Option<Vec<usize>> = self.right.iter().map(|a| footprint.index_of(a)).collect();
        match (left, right) {
            (Some(left), Some(right)) => is_valid_candidate(footprint, &left, &right),
            _ => false,
        }
    }
}

fn pairwise_choice(footprint: &Footprint, acts: &[usize]) -> bool {
    // Reflexive pairs are checked as well: a self-loop rules out an activity entirely
    acts.iter()
        .cartesian_product(acts)
        .all(|(a, b)| footprint.kind_by_index(*a, *b) == RelationKind::Choice)
}

///
/// Validity of a grouping candidate given by activity indices of `footprint`
///
/// Both sides must be non-empty.
///
pub fn is_valid_candidate(footprint: &Footprint, left: &[usize], right: &[usize]) -> bool {
    !left.is_empty()
        && !right.is_empty()
        && left
            .iter()
            .cartesian_product(right)
            .all(|(a, b)| footprint.kind_by_index(*a, *b) == RelationKind::Causality)
        && pairwise_choice(footprint, left)
        && pairwise_choice(footprint, right)
}

impl fmt::Display for Grouping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({{{}}}, {{{}}})",
            self.left.iter().join(", "),
            self.right.iter().join(", ")
        )
    }
}
