use crate::{AppState, Effect, Msg, Phase, SessionState, REPORT_ARTIFACT_PATH};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::RunConfirmed => {
            if state.session() != SessionState::Idle {
                return (state, Vec::new());
            }
            state.set_session(SessionState::Confirmed);
            vec![Effect::TriggerPhase(Phase::Dictionaries)]
        }
        // Declining must leave no trace: no triggers, no polls.
        Msg::RunDeclined => Vec::new(),
        Msg::PhaseTriggered(phase) => match (state.session(), phase) {
            (SessionState::Confirmed, Phase::Dictionaries) => {
                state.set_session(SessionState::DictPhaseRunning);
                vec![Effect::SchedulePoll]
            }
            (SessionState::DictPhaseDone, Phase::Reports) => {
                state.set_session(SessionState::ReportPhaseRunning);
                vec![Effect::SchedulePoll]
            }
            _ => Vec::new(),
        },
        Msg::SnapshotReceived(snapshot) => {
            let Some(phase) = state.active_phase() else {
                return (state, Vec::new());
            };
            state.apply_snapshot(phase, &snapshot);
            if !state.terminal_reached(phase) {
                vec![Effect::SchedulePoll]
            } else {
                match phase {
                    Phase::Dictionaries => {
                        state.set_session(SessionState::DictPhaseDone);
                        vec![Effect::TriggerPhase(Phase::Reports)]
                    }
                    Phase::Reports => {
                        state.set_session(SessionState::ReportPhaseDone);
                        vec![Effect::PresentDownload {
                            path: REPORT_ARTIFACT_PATH,
                        }]
                    }
                }
            }
        }
        Msg::PollFailed { .. } => {
            // A failing endpoint never ends the session: no retry cap, no
            // backoff, displayed values untouched.
            if state.active_phase().is_some() {
                vec![Effect::SchedulePoll]
            } else {
                Vec::new()
            }
        }
        Msg::DownloadPresented => {
            if state.session() == SessionState::ReportPhaseDone {
                state.set_session(SessionState::DownloadReady);
            }
            Vec::new()
        }
    };

    (state, effects)
}
