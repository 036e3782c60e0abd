use std::{collections::HashSet, ops::Range};

use itertools::Itertools;
use rayon::prelude::*;
use thiserror::Error;

use super::{
    grouping::{is_valid_candidate, Grouping},
    relations::Footprint,
};
use crate::config::AlphaRelationsConfig;

/// Grouping candidate as sorted, deduplicated activity indices of a [`Footprint`]
pub type IndexCandidate = (Vec<usize>, Vec<usize>);

///
/// Error encountered while discovering groupings
///
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscoveryError {
    /// The fixpoint was not reached within the configured number of growth passes
    #[error("Grouping growth did not converge within {passes} passes ({collection_size} candidates so far)")]
    GrowthPassLimitExceeded {
        /// Configured maximum number of passes
        passes: usize,
        /// Number of candidates collected before giving up
        collection_size: usize,
    },
}

fn union(a: &[usize], b: &[usize]) -> Vec<usize> {
    a.iter().merge(b).dedup().copied().collect()
}

///
/// All valid singleton candidates `({a}, {b})` with `a != b`, in universe order
///
pub fn seed_candidates(footprint: &Footprint) -> Vec<IndexCandidate> {
    let n = footprint.num_activities();
    (0..n)
        .cartesian_product(0..n)
        .filter(|(a, b)| a != b && is_valid_candidate(footprint, &[*a], &[*b]))
        .map(|(a, b)| (vec![a], vec![b]))
        .collect()
}

fn grow_candidate(
    footprint: &Footprint,
    (a1, b1): &IndexCandidate,
    cnds: &[IndexCandidate],
    known: &HashSet<IndexCandidate>,
) -> Vec<IndexCandidate> {
    cnds.iter()
        .filter_map(|(a2, b2)| {
            let cnd = (union(a1, a2), union(b1, b2));
            if known.contains(&cnd) || !is_valid_candidate(footprint, &cnd.0, &cnd.1) {
                return None;
            }
            Some(cnd)
        })
        .collect()
}

///
/// Grow candidates until no union of two candidates yields a new valid one
///
/// Returns the complete fixpoint collection: the seeds (see [`seed_candidates`]) followed by
/// the grown candidates in the order they were found.
/// Each pass combines the candidates added by the previous pass with the whole collection.
///
pub fn build_index_candidates(
    footprint: &Footprint,
    config: &AlphaRelationsConfig,
) -> Result<Vec<IndexCandidate>, DiscoveryError> {
    let mut cnds = seed_candidates(footprint);
    let mut known: HashSet<IndexCandidate> = cnds.iter().cloned().collect();
    tracing::debug!("Seed candidates #{}", cnds.len());

    let mut frontier: Range<usize> = 0..cnds.len();
    let mut passes = 0;
    while !frontier.is_empty() {
        if let Some(max_passes) = config.max_growth_passes {
            if passes >= max_passes {
                return Err(DiscoveryError::GrowthPassLimitExceeded {
                    passes: max_passes,
                    collection_size: cnds.len(),
                });
            }
        }
        passes += 1;

        let added: Vec<IndexCandidate> = if config.parallel {
            cnds[frontier.clone()]
                .par_iter()
                .flat_map_iter(|cnd| grow_candidate(footprint, cnd, &cnds, &known))
                .collect()
        } else {
            cnds[frontier.clone()]
                .iter()
                .flat_map(|cnd| grow_candidate(footprint, cnd, &cnds, &known))
                .collect()
        };

        let start = cnds.len();
        for cnd in added {
            if known.insert(cnd.clone()) {
                cnds.push(cnd);
            }
        }
        tracing::trace!("Growth pass {}: +{} candidates", passes, cnds.len() - start);
        frontier = start..cnds.len();
    }
    tracing::debug!("Reached fixpoint after {} passes with #{} candidates", passes, cnds.len());
    Ok(cnds)
}

/// Translate an [`IndexCandidate`] to a [`Grouping`] of activity names
pub fn cnd_to_grouping(footprint: &Footprint, (a, b): &IndexCandidate) -> Grouping {
    Grouping {
        left: a.iter().map(|i| footprint.activities[*i].clone()).collect(),
        right: b.iter().map(|i| footprint.activities[*i].clone()).collect(),
    }
}

///
/// Build the complete fixpoint collection of valid [`Grouping`]s
///
/// See [`build_index_candidates`].
///
pub fn build_candidates(
    footprint: &Footprint,
    config: &AlphaRelationsConfig,
) -> Result<Vec<Grouping>, DiscoveryError> {
    Ok(build_index_candidates(footprint, config)?
        .iter()
        .map(|cnd| cnd_to_grouping(footprint, cnd))
        .collect())
}
