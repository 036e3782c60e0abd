use std::{
    collections::{HashMap, HashSet},
    fmt,
};

use itertools::Itertools;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::direct_succession::DirectSuccession;
use crate::event_log::activity::Activity;

///
/// Ordering relation between two activities `a` and `b`
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationKind {
    /// `a -> b`: `a > b` but never `b > a`
    Causality,
    /// `a <- b`: `b > a` but never `a > b`
    ReversedCausality,
    /// `a || b`: both `a > b` and `b > a`
    Parallel,
    /// `a # b`: neither `a > b` nor `b > a`
    Choice,
}

impl RelationKind {
    ///
    /// Classify a pair from the presence of `a > b` (`ab`) and `b > a` (`ba`)
    ///
    pub fn from_successions(ab: bool, ba: bool) -> Self {
        match (ab, ba) {
            (true, false) => RelationKind::Causality,
            (false, true) => RelationKind::ReversedCausality,
            (true, true) => RelationKind::Parallel,
            (false, false) => RelationKind::Choice,
        }
    }

    /// The kind of the same pair read in the opposite direction
    pub fn inverse(&self) -> Self {
        match self {
            RelationKind::Causality => RelationKind::ReversedCausality,
            RelationKind::ReversedCausality => RelationKind::Causality,
            RelationKind::Parallel => RelationKind::Parallel,
            RelationKind::Choice => RelationKind::Choice,
        }
    }

    /// Operator mark (`->`, `<-`, `||` or `#`)
    pub fn mark(&self) -> &'static str {
        match self {
            RelationKind::Causality => "->",
            RelationKind::ReversedCausality => "<-",
            RelationKind::Parallel => "||",
            RelationKind::Choice => "#",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mark())
    }
}

///
/// Relation `predecessor OP successor` between two activities
///
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relation {
    /// Left-hand activity
    pub predecessor: Activity,
    /// Right-hand activity
    pub successor: Activity,
    /// Relation kind
    pub kind: RelationKind,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.predecessor, self.kind, self.successor)
    }
}

///
/// Footprint of an event log: the [`RelationKind`] of every ordered pair of activities
///
/// Holds exactly `n²` relations for `n` activities (self-pairs included).
///
#[derive(Debug, Clone, Default, Serialize)]
pub struct Footprint {
    /// Activity universe; indices into this list are used throughout the grouping phase
    pub activities: Vec<Activity>,
    #[serde(skip)]
    act_to_index: HashMap<Activity, usize>,
    /// Row-major relation matrix: `kinds[a][b]` is the relation of `a` towards `b`
    kinds: Vec<Vec<RelationKind>>,
}

impl Footprint {
    ///
    /// Classify all pairs of `activities` based on the given direct successions
    ///
    /// Repeated activities are kept only at their first position.
    ///
    pub fn from_direct_successions(
        activities: Vec<Activity>,
        successions: &HashSet<DirectSuccession>,
    ) -> Self {
        let activities: Vec<Activity> = activities.into_iter().unique().collect();
        let (act_to_index, df_rel) = Self::index_successions(&activities, successions);
        let n = activities.len();
        let kinds = (0..n)
            .map(|a| classify_row(a, n, &df_rel))
            .collect();
        Self {
            activities,
            act_to_index,
            kinds,
        }
    }

    ///
    /// Same as [`Footprint::from_direct_successions`], classifying rows in parallel
    ///
    pub fn par_from_direct_successions(
        activities: Vec<Activity>,
        successions: &HashSet<DirectSuccession>,
    ) -> Self {
        let activities: Vec<Activity> = activities.into_iter().unique().collect();
        let (act_to_index, df_rel) = Self::index_successions(&activities, successions);
        let n = activities.len();
        let kinds = (0..n)
            .into_par_iter()
            .map(|a| classify_row(a, n, &df_rel))
            .collect();
        Self {
            activities,
            act_to_index,
            kinds,
        }
    }

    fn index_successions(
        activities: &[Activity],
        successions: &HashSet<DirectSuccession>,
    ) -> (HashMap<Activity, usize>, HashSet<(usize, usize)>) {
        let act_to_index: HashMap<Activity, usize> = activities
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, act)| (act, i))
            .collect();
        let df_rel = successions
            .iter()
            .filter_map(|ds| {
                Some((
                    *act_to_index.get(&ds.predecessor)?,
                    *act_to_index.get(&ds.successor)?,
                ))
            })
            .collect();
        (act_to_index, df_rel)
    }

    /// Number of activities in the universe
    pub fn num_activities(&self) -> usize {
        self.activities.len()
    }

    /// Number of relations (always `num_activities()²`)
    pub fn len(&self) -> usize {
        self.kinds.iter().map(Vec::len).sum()
    }

    /// Whether the footprint holds no relations (empty log)
    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    /// Index of an activity in [`Footprint::activities`]
    pub fn index_of<S: AsRef<str>>(&self, activity: S) -> Option<usize> {
        self.act_to_index.get(activity.as_ref()).copied()
    }

    ///
    /// Relation kind between two activities given by index
    ///
    /// Panics if an index is out of bounds.
    ///
    pub fn kind_by_index(&self, a: usize, b: usize) -> RelationKind {
        self.kinds[a][b]
    }

    /// Relation kind between two activities given by name (`None` if one is unknown)
    pub fn kind<S: AsRef<str>>(&self, a: S, b: S) -> Option<RelationKind> {
        Some(self.kind_by_index(self.index_of(a)?, self.index_of(b)?))
    }

    /// [`Relation`] between two activities given by name (`None` if one is unknown)
    pub fn relation<S: AsRef<str>>(&self, a: S, b: S) -> Option<Relation> {
        let (ia, ib) = (self.index_of(a)?, self.index_of(b)?);
        Some(self.relation_by_index(ia, ib))
    }

    fn relation_by_index(&self, a: usize, b: usize) -> Relation {
        Relation {
            predecessor: self.activities[a].clone(),
            successor: self.activities[b].clone(),
            kind: self.kinds[a][b],
        }
    }

    ///
    /// All `n²` relations, row by row in activity order
    ///
    pub fn relations(&self) -> impl Iterator<Item = Relation> + '_ {
        let n = self.activities.len();
        (0..n).flat_map(move |a| (0..n).map(move |b| self.relation_by_index(a, b)))
    }
}

fn classify_row(a: usize, n: usize, df_rel: &HashSet<(usize, usize)>) -> Vec<RelationKind> {
    (0..n)
        .map(|b| RelationKind::from_successions(df_rel.contains(&(a, b)), df_rel.contains(&(b, a))))
        .collect()
}

impl fmt::Display for Footprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .activities
            .iter()
            .map(|a| a.name().chars().count())
            .max()
            .unwrap_or(0)
            .max(2);
        write!(f, "{:width$}", "")?;
        for act in &self.activities {
            write!(f, " {:width$}", act.name())?;
        }
        writeln!(f)?;
        for (act, row) in self.activities.iter().zip(&self.kinds) {
            write!(f, "{:width$}", act.name())?;
            for kind in row {
                write!(f, " {:width$}", kind.mark())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
