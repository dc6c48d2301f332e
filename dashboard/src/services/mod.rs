//! Dashboard sessions
//!
//! A session owns one view-model and the state machine around it:
//! `Empty -> Loading -> Ready | Error`, with every mutation passing through
//! `Loading` again.

pub mod farm_overview;
pub mod field_dashboard;
pub mod phase;

pub use farm_overview::{FarmOverviewSession, FieldRow};
pub use field_dashboard::{FieldDashboardSession, FieldView, ResetDateDialog, SensorDialog};
pub use phase::{PhaseTracker, SessionPhase};

use serde::{Deserialize, Serialize};

/// What a session does after a mutation succeeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshPolicy {
    /// Re-fetch the whole view-model; nothing is patched in place
    #[default]
    FullReload,
}
