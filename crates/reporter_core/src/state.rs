use std::collections::BTreeMap;

use crate::snapshot::ProgressSnapshot;
use crate::stage::{Phase, StageKey, REPORT_ARTIFACT_PATH, TERMINAL_THRESHOLD};
use crate::view_model::{SessionView, StageRow};

/// Session lifecycle. Transitions only move forward; once a run has
/// started there is no cancellation path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Confirmed,
    DictPhaseRunning,
    DictPhaseDone,
    ReportPhaseRunning,
    ReportPhaseDone,
    DownloadReady,
}

/// Transient UI state for one polling session: the session stage plus the
/// currently displayed value per stage key. Nothing is persisted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    session: SessionState,
    values: BTreeMap<StageKey, f64>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> SessionState {
        self.session
    }

    pub(crate) fn set_session(&mut self, session: SessionState) {
        self.session = session;
        self.dirty = true;
    }

    /// Phase currently being polled, if any.
    pub fn active_phase(&self) -> Option<Phase> {
        match self.session {
            SessionState::DictPhaseRunning => Some(Phase::Dictionaries),
            SessionState::ReportPhaseRunning => Some(Phase::Reports),
            _ => None,
        }
    }

    /// Apply a sparse snapshot to the indicators owned by `phase`.
    ///
    /// Keys outside the phase and keys absent from the snapshot are left
    /// unchanged. Values are clamped to the indicator range, matching a
    /// `max="100"` progress element.
    pub(crate) fn apply_snapshot(&mut self, phase: Phase, snapshot: &ProgressSnapshot) {
        for stage in phase.stages() {
            if let Some(value) = snapshot.get(stage.key) {
                self.values.insert(stage.key, value.clamp(0.0, 100.0));
                self.dirty = true;
            }
        }
    }

    /// Currently displayed value for `key`; zero until a snapshot reports
    /// otherwise.
    pub fn stage_value(&self, key: StageKey) -> f64 {
        self.values.get(&key).copied().unwrap_or(0.0)
    }

    /// True once the phase's terminal stage has reported completion.
    pub(crate) fn terminal_reached(&self, phase: Phase) -> bool {
        self.stage_value(phase.terminal_key()) >= TERMINAL_THRESHOLD
    }

    /// Returns whether the state changed since the last call, and clears
    /// the flag. The shell uses this to re-render only on change.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> SessionView {
        let mut rows = Vec::new();
        if self.session != SessionState::Idle {
            self.push_rows(Phase::Dictionaries, &mut rows);
        }
        if matches!(
            self.session,
            SessionState::DictPhaseDone
                | SessionState::ReportPhaseRunning
                | SessionState::ReportPhaseDone
                | SessionState::DownloadReady
        ) {
            self.push_rows(Phase::Reports, &mut rows);
        }

        SessionView {
            session: self.session,
            rows,
            download: (self.session == SessionState::DownloadReady)
                .then_some(REPORT_ARTIFACT_PATH),
        }
    }

    fn push_rows(&self, phase: Phase, rows: &mut Vec<StageRow>) {
        rows.extend(phase.stages().iter().map(|stage| StageRow {
            key: stage.key,
            label: stage.label,
            value: self.stage_value(stage.key),
        }));
    }
}
