use crate::stage::StageKey;
use crate::state::SessionState;

/// Render input derived from [`AppState`](crate::AppState).
///
/// Rows are append-only across a session: dictionary rows appear once the
/// run is confirmed, report rows once the dictionary phase has finished.
/// A row's order never changes after it appears.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionView {
    pub session: SessionState,
    pub rows: Vec<StageRow>,
    /// Relative artifact path, present once the report phase is done and
    /// the download has been presented.
    pub download: Option<&'static str>,
}

/// One labeled progress indicator with its currently displayed value.
#[derive(Debug, Clone, PartialEq)]
pub struct StageRow {
    pub key: StageKey,
    pub label: &'static str,
    pub value: f64,
}
