#![warn(
    clippy::doc_markdown,
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs
)]

#![doc = include_str!("../README.md")]

///
/// Event logs as plain activity traces ([`TraceLog`])
///
pub mod event_log {
    /// [`Activity`] and [`Trace`] value types
    pub mod activity;
    /// [`TraceLog`] struct and textual log import
    pub mod trace_log;

    pub use activity::{Activity, Trace};
    pub use trace_log::{ActivitySeparator, TraceLog, TraceLogError};
}

///
/// Relation discovery and maximal groupings (the first phases of the Alpha algorithm)
///
pub mod alpha {
    /// Direct succession extraction
    pub mod direct_succession;
    /// Relation classification ([`Footprint`])
    pub mod relations;
    /// [`Grouping`] struct and validity check
    pub mod grouping;
    /// Seeding and fixpoint growth of grouping candidates
    pub mod candidate_building;
    /// Maximality filter on grouping candidates
    pub mod candidate_pruning;
    /// Full pipeline from [`TraceLog`] to maximal groupings
    pub mod full;

    #[doc(inline)]
    pub use grouping::Grouping;
    #[doc(inline)]
    pub use relations::{Footprint, Relation, RelationKind};
}

/// Algorithm and import configuration
pub mod config;

#[cfg(test)]
mod utils;

#[cfg(test)]
mod tests;

#[doc(inline)]
pub use event_log::trace_log::TraceLog;

#[doc(inline)]
pub use event_log::trace_log::import_trace_log_from_path;

#[doc(inline)]
pub use event_log::trace_log::import_trace_log_from_slice;

#[doc(inline)]
pub use event_log::activity::{Activity, Trace};

#[doc(inline)]
pub use alpha::direct_succession::{extract_direct_successions, unique_activities, DirectSuccession};

#[doc(inline)]
pub use alpha::relations::{Footprint, Relation, RelationKind};

#[doc(inline)]
pub use alpha::grouping::Grouping;

#[doc(inline)]
pub use alpha::full::{discover_maximal_groupings, AlgoDuration, AlphaRelationsResult};

#[doc(inline)]
pub use alpha::candidate_building::DiscoveryError;

#[doc(inline)]
pub use config::AlphaRelationsConfig;

///
/// Serialize [`Grouping`]s as a JSON [`String`]
///
pub fn groupings_to_json(groupings: &[Grouping]) -> Result<String, serde_json::Error> {
    serde_json::to_string(groupings)
}

///
/// Deserialize [`Grouping`]s from a JSON [`String`]
///
pub fn json_to_groupings(groupings_json: &str) -> Result<Vec<Grouping>, serde_json::Error> {
    serde_json::from_str(groupings_json)
}
