//! Environmental refetch triggers.

use serde::{Deserialize, Serialize};

/// Environmental event that can prompt a refetch of observed queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefetchTrigger {
    /// The client UI regained focus.
    FocusRegained,
    /// Network connectivity was restored.
    ConnectivityRestored,
}

/// Which environmental events trigger a refetch.
///
/// The default refetches on reconnect but not on focus regain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefetchTriggers {
    /// Refetch when the client UI regains focus.
    pub on_focus_regain: bool,
    /// Refetch when network connectivity is restored.
    pub on_connectivity_restore: bool,
}

impl Default for RefetchTriggers {
    fn default() -> Self {
        Self {
            on_focus_regain: false,
            on_connectivity_restore: true,
        }
    }
}

impl RefetchTriggers {
    /// Whether `trigger` should cause a refetch under this policy.
    pub fn refetch_on(&self, trigger: RefetchTrigger) -> bool {
        match trigger {
            RefetchTrigger::FocusRegained => self.on_focus_regain,
            RefetchTrigger::ConnectivityRestored => self.on_connectivity_restore,
        }
    }
}
