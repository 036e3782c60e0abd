use std::{collections::HashSet, fmt};

use itertools::Itertools;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::event_log::activity::{Activity, Trace};

///
/// `successor` was observed immediately after `predecessor` in at least one trace
///
/// Read as `predecessor > successor`. Self-successions (`a > a`) are valid.
///
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DirectSuccession {
    /// Activity which precedes
    pub predecessor: Activity,
    /// Activity being preceded
    pub successor: Activity,
}

impl DirectSuccession {
    /// Create a new [`DirectSuccession`] `predecessor > successor`
    pub fn new<A: Into<Activity>, B: Into<Activity>>(predecessor: A, successor: B) -> Self {
        Self {
            predecessor: predecessor.into(),
            successor: successor.into(),
        }
    }
}

impl fmt::Display for DirectSuccession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} > {}", self.predecessor, self.successor)
    }
}

fn trace_successions(trace: &Trace) -> impl Iterator<Item = DirectSuccession> + '_ {
    trace
        .iter()
        .tuple_windows()
        .map(|(pred, succ)| DirectSuccession::new(pred.clone(), succ.clone()))
}

///
/// Collect all direct successions observed in the given traces
///
/// Only adjacent activities inside the same trace form a succession; the relation is not
/// transitive and trace multiplicity does not matter.
///
pub fn extract_direct_successions(traces: &[Trace]) -> HashSet<DirectSuccession> {
    traces.iter().flat_map(trace_successions).collect()
}

///
/// Same as [`extract_direct_successions`], but scans traces in parallel
///
pub fn par_extract_direct_successions(traces: &[Trace]) -> HashSet<DirectSuccession> {
    traces
        .par_iter()
        .fold(HashSet::new, |mut set, trace| {
            set.extend(trace_successions(trace));
            set
        })
        .reduce(HashSet::new, |mut s1, mut s2| {
            if s1.len() < s2.len() {
                s2.extend(s1);
                s2
            } else {
                s1.extend(s2);
                s1
            }
        })
}

///
/// All distinct activities of the traces, in order of first appearance
///
pub fn unique_activities(traces: &[Trace]) -> Vec<Activity> {
    traces.iter().flatten().unique().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_log::activity::trace_of;

    #[test]
    fn direct_successions() {
        let traces = vec![trace_of(["F", "F"]), trace_of(["A", "K"])];
        let dfs = extract_direct_successions(&traces);
        assert_eq!(dfs.len(), 2);
        assert!(dfs.contains(&DirectSuccession::new("F", "F")));
        assert!(dfs.contains(&DirectSuccession::new("A", "K")));
    }

    #[test]
    fn no_duplications_in_successions() {
        let dfs = extract_direct_successions(&[trace_of(["F", "F", "F"])]);
        assert_eq!(dfs.len(), 1);
        assert!(dfs.contains(&DirectSuccession::new("F", "F")));
    }

    #[test]
    fn direct_succession_is_not_transitive() {
        let dfs = extract_direct_successions(&[trace_of(["A", "K", "F"])]);
        assert_eq!(dfs.len(), 2);
        assert!(dfs.contains(&DirectSuccession::new("A", "K")));
        assert!(dfs.contains(&DirectSuccession::new("K", "F")));
        assert!(!dfs.contains(&DirectSuccession::new("A", "F")));
    }

    #[test]
    fn short_traces_contribute_nothing() {
        let dfs = extract_direct_successions(&[trace_of(["A"]), Vec::new()]);
        assert!(dfs.is_empty());
        assert_eq!(unique_activities(&[trace_of(["A"]), Vec::new()]).len(), 1);
    }

    #[test]
    fn parallel_extraction_matches_sequential() {
        let traces = vec![
            trace_of(["a", "b", "c", "d"]),
            trace_of(["a", "c", "b", "d"]),
            trace_of(["a", "e", "d"]),
            trace_of(["a", "b", "c", "d"]),
        ];
        assert_eq!(
            par_extract_direct_successions(&traces),
            extract_direct_successions(&traces)
        );
    }

    #[test]
    fn unique_activities_without_duplicates() {
        let traces = vec![trace_of(["A", "B", "C", "B"]), trace_of(["A", "C", "B"])];
        assert_eq!(unique_activities(&traces), trace_of(["A", "B", "C"]));
    }
}
