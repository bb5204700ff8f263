//! Host-side control link state
//!
//! Tracks what the controller is doing from the host's point of view.
//! Events are acknowledged replies and transport changes. An event that
//! makes no sense in the current state leaves the state unchanged, since
//! replies can arrive late over a serial link.

/// Host-side view of the controller session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkState {
    /// No transport open
    #[default]
    Disconnected,
    /// Connected, nothing running
    Idle,
    /// `PUT` announced, payload in flight
    Uploading,
    /// A schedule is playing
    Running,
    /// Playback frozen by `PAUSE`
    Paused,
    /// Controller reported an error; cleared by `STOP` or reconnect
    Fault,
}

/// Observable link events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkEvent {
    /// Transport opened
    Connected,
    /// Transport lost or closed
    Dropped,
    /// `PUT` sent, payload transfer begins
    UploadStarted,
    /// `OK PUT` received
    UploadAcked,
    /// `OK RUN` received
    RunAcked,
    /// `OK PAUSE` received
    PauseAcked,
    /// `OK RESUME` received
    ResumeAcked,
    /// `OK STOP` received
    StopAcked,
    /// `DONE` received
    DoneReceived,
    /// `ERR` received
    ErrReceived,
}

impl LinkState {
    /// Process an event and return the next state
    pub fn transition(self, event: LinkEvent) -> Self {
        use LinkEvent::*;
        use LinkState::*;

        match (self, event) {
            (_, Dropped) => Disconnected,
            (Disconnected, Connected) => Idle,
            // Without a transport no reply can be trusted
            (Disconnected, _) => Disconnected,
            (_, ErrReceived) => Fault,

            (Idle, UploadStarted) => Uploading,
            (Uploading, UploadAcked) => Idle,
            (Idle, RunAcked) => Running,
            (Running, PauseAcked) => Paused,
            (Paused, ResumeAcked) => Running,
            (Running | Paused | Fault, StopAcked) => Idle,
            (Running | Paused, DoneReceived) => Idle,

            // Late or out-of-order replies change nothing
            (state, _) => state,
        }
    }

    /// Check if an upload may be started in this state
    pub fn can_upload(&self) -> bool {
        matches!(self, LinkState::Idle)
    }

    /// Check if playback may be started in this state
    pub fn can_run(&self) -> bool {
        matches!(self, LinkState::Idle)
    }

    /// Check if playback may be paused in this state
    pub fn can_pause(&self) -> bool {
        matches!(self, LinkState::Running)
    }

    /// Check if playback may be resumed in this state
    pub fn can_resume(&self) -> bool {
        matches!(self, LinkState::Paused)
    }

    /// Check if `STOP` is meaningful in this state
    pub fn can_stop(&self) -> bool {
        matches!(
            self,
            LinkState::Running | LinkState::Paused | LinkState::Fault
        )
    }

    /// Check if a transport is open
    pub fn is_connected(&self) -> bool {
        !matches!(self, LinkState::Disconnected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use LinkEvent::*;
    use LinkState::*;

    const ALL_STATES: [LinkState; 6] = [Disconnected, Idle, Uploading, Running, Paused, Fault];

    #[test]
    fn test_upload_cycle_returns_to_idle() {
        let state = Disconnected.transition(Connected);
        assert_eq!(state, Idle);
        let state = state.transition(UploadStarted);
        assert_eq!(state, Uploading);
        let state = state.transition(UploadAcked);
        assert_eq!(state, Idle);
    }

    #[test]
    fn test_run_pause_resume_stop() {
        let state = Idle.transition(RunAcked);
        assert_eq!(state, Running);
        let state = state.transition(PauseAcked);
        assert_eq!(state, Paused);
        let state = state.transition(ResumeAcked);
        assert_eq!(state, Running);
        let state = state.transition(StopAcked);
        assert_eq!(state, Idle);
    }

    #[test]
    fn test_done_finishes_playback() {
        assert_eq!(Running.transition(DoneReceived), Idle);
        assert_eq!(Paused.transition(DoneReceived), Idle);
    }

    #[test]
    fn test_err_faults_until_stopped() {
        let state = Running.transition(ErrReceived);
        assert_eq!(state, Fault);
        // A fault blocks everything except stop and reconnect.
        assert_eq!(state.transition(RunAcked), Fault);
        assert_eq!(state.transition(StopAcked), Idle);
    }

    #[test]
    fn test_drop_disconnects_from_any_state() {
        for state in ALL_STATES {
            assert_eq!(state.transition(Dropped), Disconnected);
        }
    }

    #[test]
    fn test_late_replies_leave_state_unchanged() {
        assert_eq!(Idle.transition(PauseAcked), Idle);
        assert_eq!(Idle.transition(DoneReceived), Idle);
        assert_eq!(Disconnected.transition(RunAcked), Disconnected);
        assert_eq!(Disconnected.transition(ErrReceived), Disconnected);
        assert_eq!(Uploading.transition(RunAcked), Uploading);
    }

    #[test]
    fn test_command_gates_follow_state() {
        assert!(Idle.can_upload());
        assert!(Idle.can_run());
        assert!(!Idle.can_pause());
        assert!(Running.can_pause());
        assert!(Running.can_stop());
        assert!(Paused.can_resume());
        assert!(Fault.can_stop());
        assert!(!Fault.can_run());
        assert!(!Disconnected.is_connected());
        assert!(Idle.is_connected());
    }
}
