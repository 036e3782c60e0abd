use proptest::prelude::*;

use crate::{
    alpha::{
        direct_succession::{extract_direct_successions, DirectSuccession},
        full::discover_footprint,
    },
    discover_maximal_groupings,
    event_log::{activity::trace_of, trace_log::ActivitySeparator},
    import_trace_log_from_path,
    utils::test_utils::get_test_data_path,
    AlphaRelationsConfig, Grouping, RelationKind, Trace, TraceLog,
};


fn import_log(name: &str, separator: ActivitySeparator) -> TraceLog {
    let path = get_test_data_path().join("logs").join(name);
    import_trace_log_from_path(path, separator).unwrap()
}

#[test]
fn self_loop_log_successions() {
    let log = import_log("self_loop.txt", ActivitySeparator::Character);
    let dfs = extract_direct_successions(&log.traces);
    assert_eq!(dfs.len(), 2);
    assert!(dfs.contains(&DirectSuccession::new("F", "F")));
    assert!(dfs.contains(&DirectSuccession::new("A", "K")));

    let (res, _) = discover_maximal_groupings(&log, &AlphaRelationsConfig::default()).unwrap();
    assert_eq!(res.maximal, vec![Grouping::new(["A"], ["K"])]);
}

#[test]
fn l1_relations() {
    let log = import_log("l1.txt", ActivitySeparator::Character);
    assert_eq!(log.len(), 3);
    let fp = discover_footprint(&log, &AlphaRelationsConfig::default());
    assert_eq!(fp.len(), 25);
    assert_eq!(fp.kind("a", "b"), Some(RelationKind::Causality));
    assert_eq!(fp.kind("b", "c"), Some(RelationKind::Parallel));
    assert_eq!(fp.kind("a", "d"), Some(RelationKind::Choice));
    assert_eq!(fp.kind("d", "a"), Some(RelationKind::Choice));
}

#[test]
fn l1_maximal_groupings() {
    let log = import_log("l1.txt", ActivitySeparator::Character);
    let (res, _) = discover_maximal_groupings(&log, &AlphaRelationsConfig::default()).unwrap();
    assert_eq!(res.candidates.len(), 10);
    assert_eq!(
        res.maximal,
        vec![
            Grouping::new(["a"], ["b", "e"]),
            Grouping::new(["a"], ["c", "e"]),
            Grouping::new(["b", "e"], ["d"]),
            Grouping::new(["c", "e"], ["d"]),
        ]
    );
    assert!(!res.maximal.contains(&Grouping::new(["a"], ["b"])));
    let printed: Vec<String> = res.maximal.iter().map(ToString::to_string).collect();
    assert_eq!(
        printed,
        vec!["({a}, {b, e})", "({a}, {c, e})", "({b, e}, {d})", "({c, e}, {d})"]
    );
}

#[test]
fn delimited_log_with_long_names() {
    let log = import_log("compensation.csv", ActivitySeparator::Delimiter(','));
    let (res, _) = discover_maximal_groupings(&log, &AlphaRelationsConfig::default()).unwrap();
    assert_eq!(res.footprint.num_activities(), 7);
    assert_eq!(res.candidates.len(), 10);
    assert_eq!(
        res.maximal,
        vec![
            Grouping::new(["register request"], ["check ticket"]),
            Grouping::new(["examine thoroughly"], ["check ticket"]),
            Grouping::new(["check ticket"], ["decide"]),
            Grouping::new(["examine casually"], ["decide"]),
            Grouping::new(
                ["register request"],
                ["examine thoroughly", "examine casually"]
            ),
            Grouping::new(["decide"], ["reject request", "pay compensation"]),
        ]
    );
    assert_eq!(
        res.maximal[4].to_string(),
        "({register request}, {examine casually, examine thoroughly})"
    );
}

#[test]
fn empty_log_file() {
    let log = import_log("empty.txt", ActivitySeparator::Character);
    assert!(log.is_empty());
    assert!(log.activities().is_empty());
    let (res, _) = discover_maximal_groupings(&log, &AlphaRelationsConfig::default()).unwrap();
    assert!(res.footprint.is_empty());
    assert!(res.maximal.is_empty());
}

#[test]
fn result_serializes_to_json() {
    let log = TraceLog::new(vec![trace_of(["a", "b"])]).unwrap();
    let (res, _) = discover_maximal_groupings(&log, &AlphaRelationsConfig::default()).unwrap();
    let json = serde_json::to_value(&res).unwrap();
    assert_eq!(
        json["maximal"],
        serde_json::json!([{"left": ["a"], "right": ["b"]}])
    );
    assert_eq!(
        json["direct_successions"],
        serde_json::json!([{"predecessor": "a", "successor": "b"}])
    );
    assert_eq!(json["activities"], serde_json::json!(["a", "b"]));
    assert_eq!(json["footprint"]["activities"], serde_json::json!(["a", "b"]));
    assert_eq!(json["footprint"]["kinds"][0][1], "CAUSALITY");

    let groupings_json = crate::groupings_to_json(&res.maximal).unwrap();
    assert_eq!(crate::json_to_groupings(&groupings_json).unwrap(), res.maximal);
}

/// Traces over a small alphabet (`a` to `e`), including empty and duplicate traces
pub(crate) fn small_traces() -> impl Strategy<Value = Vec<Trace>> {
    prop::collection::vec(
        prop::collection::vec(prop::sample::select(vec!["a", "b", "c", "d", "e"]), 0..7)
            .prop_map(|names| trace_of(names)),
        0..7,
    )
}
