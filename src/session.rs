//! Session State Store — named fields surviving across user actions.
//!
//! One [`SessionState`] per session, default-initialized to empty strings on
//! first access and overwritten in place on stage reruns. Sessions are fully
//! isolated from each other; within a session there is a single logical
//! writer, so no locking.

use std::collections::HashMap;

use uuid::Uuid;

/// All persisted fields for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// User-supplied Snowflake stored procedure text.
    pub procedure: String,
    /// English requirements from stage 1, user-editable.
    pub requirements: String,
    pub requirements_metrics: String,
    /// Generated PySpark code from stage 2.
    pub pyspark_code: String,
    pub pyspark_metrics: String,
    /// Self-reported accuracy from stage 3.
    pub accuracy_report: String,
    pub accuracy_metrics: String,
}

impl SessionState {
    /// Empty state, usable where a missing session must render as blank.
    pub const EMPTY: SessionState = SessionState {
        procedure: String::new(),
        requirements: String::new(),
        requirements_metrics: String::new(),
        pyspark_code: String::new(),
        pyspark_metrics: String::new(),
        accuracy_report: String::new(),
        accuracy_metrics: String::new(),
    };
}

/// Map from session id to state.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<Uuid, SessionState>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new session with empty fields.
    pub fn create(&mut self) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions.insert(id, SessionState::default());
        id
    }

    /// Mutable state for a session, default-initialized on first access.
    pub fn state_mut(&mut self, id: Uuid) -> &mut SessionState {
        self.sessions.entry(id).or_default()
    }

    /// Read-only state for a session, if it exists.
    pub fn state(&self, id: &Uuid) -> Option<&SessionState> {
        self.sessions.get(id)
    }
}
