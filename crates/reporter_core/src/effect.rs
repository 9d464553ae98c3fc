use crate::stage::Phase;

/// Side effects requested by [`update`](crate::update). The shell executes
/// each effect and feeds its outcome back in as a [`Msg`](crate::Msg).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Issue the fire-and-forget start request for a phase. The response
    /// is ignored and failures are never surfaced to the user.
    TriggerPhase(Phase),
    /// Wait one poll interval, then fetch the next progress snapshot.
    SchedulePoll,
    /// Present the finished report artifact to the user.
    PresentDownload { path: &'static str },
}
