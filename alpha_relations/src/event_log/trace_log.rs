use std::{
    collections::HashSet,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use flate2::bufread::GzDecoder;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::activity::{Activity, Trace};

///
/// Error encountered while reading or constructing a [`TraceLog`]
///
#[derive(Debug, Error)]
pub enum TraceLogError {
    /// IO error
    #[error("Failed to read event log: {0}")]
    IOError(#[from] std::io::Error),
    /// An activity with an empty name (after trimming) was passed in
    #[error("Empty activity name in trace {trace} at position {position}")]
    EmptyActivity {
        /// Index of the offending trace
        trace: usize,
        /// Position of the activity inside the trace
        position: usize,
    },
}

///
/// How a line of a textual event log is split into activities
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivitySeparator {
    /// Every (non-whitespace) character is one activity, e.g., `abcd`
    #[default]
    Character,
    /// Activities are separated by the given delimiter, e.g., `register,check,pay`
    Delimiter(char),
}

impl ActivitySeparator {
    /// Split a single raw log line into a [`Trace`]
    ///
    /// Tokens are trimmed; tokens which are empty after trimming are dropped.
    pub fn tokenize(&self, line: &str) -> Trace {
        match self {
            ActivitySeparator::Character => line
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(|c| Activity::new(c.to_string()))
                .collect(),
            ActivitySeparator::Delimiter(delim) => line
                .split(*delim)
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(Activity::new)
                .collect(),
        }
    }
}

///
/// An event log reduced to the sequence of activities of each case
///
/// Identical raw lines are only kept once (in order of first occurrence).
///
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceLog {
    /// Traces of the log
    pub traces: Vec<Trace>,
}

impl TraceLog {
    ///
    /// Construct a [`TraceLog`] from already tokenized traces
    ///
    /// Returns [`TraceLogError::EmptyActivity`] if any activity has an empty (or whitespace-only) name.
    /// Traces are kept as passed in (no deduplication).
    ///
    pub fn new(traces: Vec<Trace>) -> Result<Self, TraceLogError> {
        for (trace, acts) in traces.iter().enumerate() {
            if let Some(position) = acts.iter().position(|a| a.name().trim().is_empty()) {
                return Err(TraceLogError::EmptyActivity { trace, position });
            }
        }
        Ok(Self { traces })
    }

    ///
    /// Read a textual event log (one trace per line)
    ///
    pub fn from_reader<R: BufRead>(
        reader: R,
        separator: ActivitySeparator,
    ) -> Result<Self, TraceLogError> {
        let mut seen_lines: HashSet<String> = HashSet::new();
        let mut traces: Vec<Trace> = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if seen_lines.contains(&line) {
                continue;
            }
            let trace = separator.tokenize(&line);
            seen_lines.insert(line);
            if !trace.is_empty() {
                traces.push(trace);
            }
        }
        tracing::debug!("Read {} distinct traces", traces.len());
        Ok(Self { traces })
    }

    /// Number of traces
    pub fn len(&self) -> usize {
        self.traces.len()
    }

    /// Whether the log contains no traces
    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }

    ///
    /// All distinct activities of the log, in order of first appearance
    ///
    pub fn activities(&self) -> Vec<Activity> {
        crate::alpha::direct_succession::unique_activities(&self.traces)
    }
}

///
/// Import a [`TraceLog`] from a file path
///
/// Files ending in `.gz` are decompressed on the fly.
///
pub fn import_trace_log_from_path<P: AsRef<Path>>(
    path: P,
    separator: ActivitySeparator,
) -> Result<TraceLog, TraceLogError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    if path.to_string_lossy().ends_with(".gz") {
        let dec: GzDecoder<BufReader<File>> = GzDecoder::new(BufReader::new(file));
        TraceLog::from_reader(BufReader::new(dec), separator)
    } else {
        TraceLog::from_reader(BufReader::new(file), separator)
    }
}

///
/// Import a [`TraceLog`] from a byte slice (&\[u8\])
///
/// * `is_compressed_gz`: Parse the passed `log_data` as a compressed .gz archive
///
pub fn import_trace_log_from_slice(
    log_data: &[u8],
    is_compressed_gz: bool,
    separator: ActivitySeparator,
) -> Result<TraceLog, TraceLogError> {
    if is_compressed_gz {
        let gz: GzDecoder<&[u8]> = GzDecoder::new(log_data);
        return TraceLog::from_reader(BufReader::new(gz), separator);
    }
    TraceLog::from_reader(log_data, separator)
}
