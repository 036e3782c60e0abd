use rayon::prelude::*;

use super::grouping::Grouping;

fn is_dominated(cnd: &Grouping, cnds: &[Grouping]) -> bool {
    cnds.iter().any(|other| {
        other.left.len() >= cnd.left.len()
            && other.right.len() >= cnd.right.len()
            && cnd.is_dominated_by(other)
    })
}

///
/// Keep only the groupings not contained (on both sides) in another grouping of `cnds`
///
/// Incomparable maximal groupings are all kept; the input order is preserved.
///
pub fn select_maximal(cnds: &[Grouping]) -> Vec<Grouping> {
    cnds.iter()
        .filter(|cnd| !is_dominated(cnd, cnds))
        .cloned()
        .collect()
}

///
/// Same as [`select_maximal`], checking candidates in parallel
///
pub fn par_select_maximal(cnds: &[Grouping]) -> Vec<Grouping> {
    cnds.par_iter()
        .filter(|cnd| !is_dominated(cnd, cnds))
        .cloned()
        .collect()
}
