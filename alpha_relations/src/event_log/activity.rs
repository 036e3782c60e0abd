use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};

/// An activity, identified only by its name
///
/// Two activities with the same name are interchangeable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Activity(String);

/// A single case of an event log: the activities in execution order
pub type Trace = Vec<Activity>;

impl Activity {
    /// Create a new [`Activity`] with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self(name.into())
    }

    /// Name of the activity
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Activity {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Activity {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for Activity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Activity {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Build a [`Trace`] from activity names
///
/// ```
/// use alpha_relations::event_log::activity::trace_of;
///
/// let trace = trace_of(["register", "check", "pay"]);
/// assert_eq!(trace.len(), 3);
/// assert_eq!(trace[1].name(), "check");
/// ```
pub fn trace_of<I, S>(names: I) -> Trace
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names.into_iter().map(Activity::new).collect()
}
