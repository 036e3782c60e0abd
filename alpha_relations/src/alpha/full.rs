use std::{collections::HashSet, time::Instant};

use serde::{Deserialize, Serialize};

use super::{
    candidate_building::{build_candidates, DiscoveryError},
    candidate_pruning::{par_select_maximal, select_maximal},
    direct_succession::{
        extract_direct_successions, par_extract_direct_successions, DirectSuccession,
    },
    grouping::Grouping,
    relations::Footprint,
};
use crate::{
    config::AlphaRelationsConfig,
    event_log::{activity::Activity, trace_log::TraceLog},
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
/// Duration (in seconds) per phase of the discovery (+ total time)
pub struct AlgoDuration {
    /// Duration for extracting direct successions (in seconds)
    pub succession_extraction: f32,
    /// Duration for classifying all activity pairs (in seconds)
    pub classification: f32,
    /// Duration for seeding and growing grouping candidates (in seconds)
    pub candidate_building: f32,
    /// Duration for selecting maximal candidates (in seconds)
    pub candidate_pruning: f32,
    /// Total duration (in seconds)
    pub total: f32,
}

impl AlgoDuration {
    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

///
/// Intermediate and final results of [`discover_maximal_groupings`]
///
#[derive(Debug, Clone, Serialize)]
pub struct AlphaRelationsResult {
    /// Activity universe (in order of first appearance)
    pub activities: Vec<Activity>,
    /// All direct successions of the log (sorted)
    pub direct_successions: Vec<DirectSuccession>,
    /// Relations between all pairs of activities
    pub footprint: Footprint,
    /// Fixpoint collection of valid groupings (in generation order)
    pub candidates: Vec<Grouping>,
    /// Maximal groupings (in generation order)
    pub maximal: Vec<Grouping>,
}

///
/// Compute the [`Footprint`] of a [`TraceLog`]
///
pub fn discover_footprint(log: &TraceLog, config: &AlphaRelationsConfig) -> Footprint {
    classify(log, &extract(log, config), config)
}

fn extract(log: &TraceLog, config: &AlphaRelationsConfig) -> HashSet<DirectSuccession> {
    if config.parallel {
        par_extract_direct_successions(&log.traces)
    } else {
        extract_direct_successions(&log.traces)
    }
}

fn classify(
    log: &TraceLog,
    successions: &HashSet<DirectSuccession>,
    config: &AlphaRelationsConfig,
) -> Footprint {
    if config.parallel {
        Footprint::par_from_direct_successions(log.activities(), successions)
    } else {
        Footprint::from_direct_successions(log.activities(), successions)
    }
}

///
/// Discover the maximal [`Grouping`]s of a [`TraceLog`]
///
/// Runs succession extraction, relation classification, candidate growth and the
/// maximality filter. Additionally returns the durations for performance measurements.
///
pub fn discover_maximal_groupings(
    log: &TraceLog,
    config: &AlphaRelationsConfig,
) -> Result<(AlphaRelationsResult, AlgoDuration), DiscoveryError> {
    tracing::info!("Started relation discovery on {} traces", log.len());
    let mut algo_dur = AlgoDuration::default();
    let total_start = Instant::now();

    let start = Instant::now();
    let successions = extract(log, config);
    algo_dur.succession_extraction = start.elapsed().as_secs_f32();
    tracing::debug!("Direct successions #{}", successions.len());

    let start = Instant::now();
    let footprint = classify(log, &successions, config);
    algo_dur.classification = start.elapsed().as_secs_f32();
    tracing::debug!(
        "Classified {} relations over {} activities",
        footprint.len(),
        footprint.num_activities()
    );

    let start = Instant::now();
    let candidates = build_candidates(&footprint, config)?;
    algo_dur.candidate_building = start.elapsed().as_secs_f32();
    tracing::debug!("Built candidates #{}", candidates.len());

    let start = Instant::now();
    let maximal = if config.parallel {
        par_select_maximal(&candidates)
    } else {
        select_maximal(&candidates)
    };
    algo_dur.candidate_pruning = start.elapsed().as_secs_f32();
    tracing::debug!("Maximal candidates #{}", maximal.len());

    let mut direct_successions: Vec<DirectSuccession> = successions.into_iter().collect();
    direct_successions.sort();

    algo_dur.total = total_start.elapsed().as_secs_f32();
    tracing::info!(
        "Discovered {} maximal groupings in {:.4}s",
        maximal.len(),
        algo_dur.total
    );
    Ok((
        AlphaRelationsResult {
            activities: footprint.activities.clone(),
            direct_successions,
            footprint,
            candidates,
            maximal,
        },
        algo_dur,
    ))
}
