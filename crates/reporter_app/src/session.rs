use std::collections::VecDeque;
use std::time::Duration;

use reporter_core::{update, AppState, Effect, Msg, SessionState, SessionView};
use reporter_engine::JobRunner;
use reporter_logging::runner_warn;

use crate::board::StageBoard;

/// Knobs for one polling session. The default interval matches the job
/// runner's once-per-second progress cadence.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub poll_interval: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
        }
    }
}

/// Drive one full reporting session: dictionary phase, report phase, then
/// the download link.
///
/// Single-threaded cooperative loop: at most one request is in flight, and
/// every poll waits one full interval first, failed polls included. Returns
/// once the session reaches `DownloadReady`.
pub async fn run(
    runner: &dyn JobRunner,
    board: &mut dyn StageBoard,
    base_url: &str,
    options: &SessionOptions,
) {
    let mut state = AppState::new();
    let mut last_session = state.session();
    let mut pending = VecDeque::from([Msg::RunConfirmed]);

    while let Some(msg) = pending.pop_front() {
        let (next, effects) = update(state, msg);
        state = next;

        if state.consume_dirty() {
            let view = state.view();
            announce_transitions(board, last_session, view.session);
            last_session = view.session;
            replay_rows(board, &view);
        }

        for effect in effects {
            match effect {
                Effect::TriggerPhase(phase) => {
                    runner.trigger(phase).await;
                    pending.push_back(Msg::PhaseTriggered(phase));
                }
                Effect::SchedulePoll => {
                    tokio::time::sleep(options.poll_interval).await;
                    match runner.poll().await {
                        Ok(snapshot) => pending.push_back(Msg::SnapshotReceived(snapshot)),
                        Err(err) => {
                            runner_warn!("progress poll failed: {err}");
                            pending.push_back(Msg::PollFailed {
                                message: err.to_string(),
                            });
                        }
                    }
                }
                Effect::PresentDownload { path } => {
                    board.download_ready(&download_url(base_url, path));
                    pending.push_back(Msg::DownloadPresented);
                }
            }
        }
    }
}

/// Section banners mirroring the original report page headings.
fn announce_transitions(board: &mut dyn StageBoard, previous: SessionState, current: SessionState) {
    if previous == current {
        return;
    }
    match current {
        SessionState::Confirmed => board.banner("Creating dictionaries"),
        SessionState::DictPhaseDone => {
            board.banner("Dictionary creation complete!");
            board.banner("Creating reports (ETA: 8 minutes)...");
        }
        SessionState::ReportPhaseDone => board.banner("Report creation complete!"),
        _ => {}
    }
}

fn replay_rows(board: &mut dyn StageBoard, view: &SessionView) {
    for row in &view.rows {
        board.upsert_stage(row.key, row.label, row.value);
    }
}

fn download_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Instant;

    use reporter_core::{Phase, ProgressSnapshot, StageKey};
    use reporter_engine::PollError;

    use super::*;

    fn key(index: u8) -> StageKey {
        StageKey::new(index).unwrap()
    }

    fn snapshot(entries: &[(u8, f64)]) -> ProgressSnapshot {
        let mut snapshot = ProgressSnapshot::new();
        for &(index, value) in entries {
            snapshot.set(key(index), value);
        }
        snapshot
    }

    fn everything_complete() -> ProgressSnapshot {
        (0..16).map(|index| (key(index), 100.0)).collect()
    }

    #[derive(Debug, PartialEq)]
    enum BoardEvent {
        Stage(StageKey, f64),
        Banner(String),
        Download(String),
    }

    #[derive(Default)]
    struct RecordingBoard {
        events: Vec<BoardEvent>,
    }

    impl RecordingBoard {
        /// Stage keys in order of first appearance.
        fn appended_keys(&self) -> Vec<StageKey> {
            let mut keys = Vec::new();
            for event in &self.events {
                if let BoardEvent::Stage(key, _) = event {
                    if !keys.contains(key) {
                        keys.push(*key);
                    }
                }
            }
            keys
        }

        fn downloads(&self) -> Vec<&str> {
            self.events
                .iter()
                .filter_map(|event| match event {
                    BoardEvent::Download(url) => Some(url.as_str()),
                    _ => None,
                })
                .collect()
        }
    }

    impl StageBoard for RecordingBoard {
        fn upsert_stage(&mut self, key: StageKey, _label: &str, value: f64) {
            self.events.push(BoardEvent::Stage(key, value));
        }

        fn banner(&mut self, text: &str) {
            self.events.push(BoardEvent::Banner(text.to_string()));
        }

        fn download_ready(&mut self, url: &str) {
            self.events.push(BoardEvent::Download(url.to_string()));
        }
    }

    struct FakeRunner {
        responses: Mutex<std::collections::VecDeque<Result<ProgressSnapshot, PollError>>>,
        triggers: Mutex<Vec<Phase>>,
        polls: Mutex<Vec<Instant>>,
    }

    impl FakeRunner {
        fn script(
            responses: impl IntoIterator<Item = Result<ProgressSnapshot, PollError>>,
        ) -> Self {
            Self {
                responses: Mutex::new(responses.into_iter().collect()),
                triggers: Mutex::new(Vec::new()),
                polls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl JobRunner for FakeRunner {
        async fn trigger(&self, phase: Phase) {
            self.triggers.lock().unwrap().push(phase);
        }

        async fn poll(&self) -> Result<ProgressSnapshot, PollError> {
            self.polls.lock().unwrap().push(Instant::now());
            // Once the script runs out, report full completion so a broken
            // test cannot spin forever.
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(everything_complete()))
        }
    }

    fn quick_options() -> SessionOptions {
        SessionOptions {
            poll_interval: Duration::from_millis(5),
        }
    }

    #[tokio::test]
    async fn full_session_triggers_both_phases_and_presents_the_download() {
        let dict_complete: Vec<(u8, f64)> = (0..=5).map(|index| (index, 100.0)).collect();
        let report_complete: Vec<(u8, f64)> = (6..=15).map(|index| (index, 100.0)).collect();
        let runner = FakeRunner::script([
            Ok(snapshot(&[(0, 50.0)])),
            Ok(snapshot(&dict_complete)),
            Ok(snapshot(&[(6, 10.0)])),
            Ok(snapshot(&report_complete)),
        ]);
        let mut board = RecordingBoard::default();

        run(&runner, &mut board, "http://example.test", &quick_options()).await;

        assert_eq!(
            *runner.triggers.lock().unwrap(),
            vec![Phase::Dictionaries, Phase::Reports]
        );
        assert_eq!(runner.polls.lock().unwrap().len(), 4);
        assert_eq!(
            board.appended_keys(),
            (0..16).map(key).collect::<Vec<_>>()
        );
        assert_eq!(
            board.downloads(),
            vec!["http://example.test/download/library-report.xlsx"]
        );
        assert_eq!(
            board.events[0],
            BoardEvent::Banner("Creating dictionaries".to_string())
        );
        assert!(board.events.contains(&BoardEvent::Stage(key(0), 50.0)));
    }

    #[tokio::test]
    async fn polls_are_spaced_by_at_least_the_interval() {
        let runner = FakeRunner::script([Ok(ProgressSnapshot::new()), Ok(ProgressSnapshot::new())]);
        let mut board = RecordingBoard::default();
        let options = SessionOptions {
            poll_interval: Duration::from_millis(30),
        };

        run(&runner, &mut board, "http://example.test", &options).await;

        let polls = runner.polls.lock().unwrap();
        assert!(polls.len() >= 3);
        for pair in polls.windows(2) {
            assert!(pair[1] - pair[0] >= options.poll_interval);
        }
    }

    #[tokio::test]
    async fn poll_failures_do_not_abort_the_session() {
        let dict_complete: Vec<(u8, f64)> = (0..=5).map(|index| (index, 100.0)).collect();
        let report_complete: Vec<(u8, f64)> = (6..=15).map(|index| (index, 100.0)).collect();
        let runner = FakeRunner::script([
            Err(PollError::Network("connection refused".to_string())),
            Ok(snapshot(&[(0, 20.0)])),
            Err(PollError::HttpStatus(500)),
            Ok(snapshot(&dict_complete)),
            Ok(snapshot(&report_complete)),
        ]);
        let mut board = RecordingBoard::default();

        run(&runner, &mut board, "http://example.test", &quick_options()).await;

        assert_eq!(runner.polls.lock().unwrap().len(), 5);
        assert!(board.events.contains(&BoardEvent::Stage(key(0), 20.0)));
        assert_eq!(board.downloads().len(), 1);
    }
}
