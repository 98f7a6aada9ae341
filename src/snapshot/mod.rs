//! Point-in-time view of a controller for diagnostics.
//!
//! Snapshots are export-only. A controller's state belongs to its instance
//! and is never restored into another one.

use crate::controller::Input;
use crate::core::{Footprint, PendingTimer, VisualState};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

pub mod error;

pub use error::SnapshotError;

/// Serializable view of a controller's state.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Snapshot {
    /// Controller instance id
    pub id: Uuid,

    pub state: VisualState,

    /// Start of the current loading episode
    pub load_started: Option<DateTime<Utc>>,

    /// Frozen size, if any
    pub footprint: Option<Footprint>,

    /// Live timers, earliest first
    pub pending: Vec<PendingTimer>,

    /// Last applied input
    pub input: Input,

    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,
}

impl Snapshot {
    /// Render the snapshot as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }
}
