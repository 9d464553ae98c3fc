#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User accepted the run confirmation prompt.
    RunConfirmed,
    /// User declined the run confirmation prompt.
    RunDeclined,
    /// The best-effort start request for a phase has been issued.
    PhaseTriggered(crate::Phase),
    /// One progress snapshot arrived from the job runner.
    SnapshotReceived(crate::ProgressSnapshot),
    /// A poll attempt failed; the loop carries on unchanged.
    PollFailed { message: String },
    /// The download link has been presented to the user.
    DownloadPresented,
}
