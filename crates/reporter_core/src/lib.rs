//! Reporter core: pure session state machine and view-model helpers.
mod effect;
mod msg;
mod snapshot;
mod stage;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use snapshot::ProgressSnapshot;
pub use stage::{
    ParseStageKeyError, Phase, StageKey, StageSpec, REPORT_ARTIFACT_PATH, STAGE_COUNT,
    TERMINAL_THRESHOLD,
};
pub use state::{AppState, SessionState};
pub use update::update;
pub use view_model::{SessionView, StageRow};
