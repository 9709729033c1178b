/// Simulated quantum-cloud session
///
/// A scripted handshake with no network behind it:
///
/// Disconnected -(trigger)-> Connecting -(1.5s)-> Queued -(2.0s)-> Active -(trigger)-> Disconnected
///
/// Timed steps go through a [`Scheduler`]. Each step remembers the state it
/// expects to leave, so a step that outlives its sequence is dropped.
use std::fmt;
use std::time::Duration;

use super::scheduler::{Scheduler, TaskId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Disconnected,
    Connecting,
    Queued,
    Active,
}

impl SessionState {
    /// Status label shown in the UI
    pub fn label(self) -> &'static str {
        match self {
            SessionState::Disconnected => "OFFLINE",
            SessionState::Connecting => "HANDSHAKE",
            SessionState::Queued => "QUEUED",
            SessionState::Active => "ENTANGLED",
        }
    }

    /// Label of the action a trigger would perform from this state
    pub fn action_label(self) -> &'static str {
        match self {
            SessionState::Disconnected => "Connect Quantum Cloud",
            SessionState::Connecting | SessionState::Queued => "Connecting...",
            SessionState::Active => "Disconnect",
        }
    }

    pub fn is_busy(self) -> bool {
        matches!(self, SessionState::Connecting | SessionState::Queued)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A timed step of the handshake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Step {
    from: SessionState,
    to: SessionState,
}

/// Something that happened to the session, returned so the caller can log it
/// and apply side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Moved from one state to another
    Transition { from: SessionState, to: SessionState },
    /// A trigger arrived while a handshake was already running
    Ignored(SessionState),
}

impl SessionEvent {
    pub fn message(&self) -> &'static str {
        match self {
            SessionEvent::Transition { to: SessionState::Connecting, .. } => {
                "Initiating handshake with quantum cloud..."
            }
            SessionEvent::Transition { to: SessionState::Queued, .. } => {
                "Job queued on remote QPU. Awaiting qubit allocation..."
            }
            SessionEvent::Transition { to: SessionState::Active, .. } => {
                "Entanglement established. Quantum filter engaged."
            }
            SessionEvent::Transition { to: SessionState::Disconnected, .. } => {
                "Quantum link released. Session closed."
            }
            SessionEvent::Ignored(_) => "Handshake already in progress. Trigger ignored.",
        }
    }

    /// Entering Active forces the interference filter on
    pub fn forces_filter(&self) -> bool {
        matches!(self, SessionEvent::Transition { to: SessionState::Active, .. })
    }
}

#[derive(Debug)]
pub struct SessionSimulator {
    state: SessionState,
    connect_delay: Duration,
    queue_delay: Duration,
    scheduler: Scheduler<Step>,
    pending: Option<TaskId>,
}

impl SessionSimulator {
    pub fn new(connect_delay: Duration, queue_delay: Duration) -> Self {
        Self {
            state: SessionState::Disconnected,
            connect_delay,
            queue_delay,
            scheduler: Scheduler::new(),
            pending: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Time the next scripted step is due, if any
    #[cfg(test)]
    pub fn next_step_due(&self) -> Option<Duration> {
        self.scheduler.next_due()
    }

    /// User pressed the connect/disconnect control at `now`
    pub fn trigger(&mut self, now: Duration) -> SessionEvent {
        match self.state {
            SessionState::Disconnected => {
                let event = self.enter(SessionState::Connecting);
                self.schedule(
                    now + self.connect_delay,
                    Step { from: SessionState::Connecting, to: SessionState::Queued },
                );
                event
            }
            SessionState::Connecting | SessionState::Queued => SessionEvent::Ignored(self.state),
            SessionState::Active => {
                self.cancel_pending();
                self.enter(SessionState::Disconnected)
            }
        }
    }

    /// Fire every step due at or before `now`
    pub fn poll(&mut self, now: Duration) -> Vec<SessionEvent> {
        let mut events = Vec::new();

        // A fired step may schedule the next one, which can itself be due already
        loop {
            let due = self.scheduler.drain_due(now);
            if due.is_empty() {
                break;
            }
            for fired in due {
                self.pending = None;
                let step = fired.task;
                if step.from != self.state {
                    log::debug!("⏭️  Dropping stale session step {:?}", step);
                    continue;
                }

                events.push(self.enter(step.to));

                if step.to == SessionState::Queued {
                    // Measured from when this step was due, not when it was polled
                    self.schedule(
                        fired.at + self.queue_delay,
                        Step { from: SessionState::Queued, to: SessionState::Active },
                    );
                }
            }
        }

        events
    }

    /// Drop any pending scripted step and go back to Disconnected without an event
    pub fn shutdown(&mut self) {
        self.cancel_pending();
        self.scheduler.cancel_all();
        self.state = SessionState::Disconnected;
    }

    fn enter(&mut self, to: SessionState) -> SessionEvent {
        let from = self.state;
        self.state = to;
        SessionEvent::Transition { from, to }
    }

    fn schedule(&mut self, due: Duration, step: Step) {
        self.cancel_pending();
        self.pending = Some(self.scheduler.schedule_at(due, step));
    }

    fn cancel_pending(&mut self) {
        if let Some(id) = self.pending.take() {
            self.scheduler.cancel(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn simulator() -> SessionSimulator {
        SessionSimulator::new(ms(1500), ms(2000))
    }

    #[test]
    fn test_full_handshake_timing() {
        let mut session = simulator();

        let event = session.trigger(ms(0));
        assert_eq!(
            event,
            SessionEvent::Transition { from: SessionState::Disconnected, to: SessionState::Connecting }
        );

        assert!(session.poll(ms(1499)).is_empty());
        assert_eq!(session.state(), SessionState::Connecting);

        let events = session.poll(ms(1500));
        assert_eq!(events.len(), 1);
        assert_eq!(session.state(), SessionState::Queued);
        assert_eq!(session.next_step_due(), Some(ms(3500)));

        assert!(session.poll(ms(3499)).is_empty());
        let events = session.poll(ms(3500));
        assert_eq!(session.state(), SessionState::Active);
        assert!(events[0].forces_filter());
        assert_eq!(session.next_step_due(), None);
    }

    #[test]
    fn test_late_poll_fires_both_steps() {
        let mut session = simulator();
        session.trigger(ms(0));

        let events = session.poll(ms(10_000));
        assert_eq!(events.len(), 2);
        assert_eq!(session.state(), SessionState::Active);
    }

    #[test]
    fn test_queue_delay_counts_from_due_time() {
        let mut session = simulator();
        session.trigger(ms(0));

        // Polled late: the Queued step was due at 1500
        session.poll(ms(1600));
        assert_eq!(session.state(), SessionState::Queued);
        assert_eq!(session.next_step_due(), Some(ms(3500)));
    }

    #[test]
    fn test_disconnect_from_active_is_immediate() {
        let mut session = simulator();
        session.trigger(ms(0));
        session.poll(ms(3500));

        let event = session.trigger(ms(3500));
        assert_eq!(
            event,
            SessionEvent::Transition { from: SessionState::Active, to: SessionState::Disconnected }
        );
        assert_eq!(session.state(), SessionState::Disconnected);
        assert!(!event.forces_filter());
    }

    #[test]
    fn test_trigger_mid_sequence_is_ignored() {
        let mut session = simulator();
        session.trigger(ms(0));

        assert_eq!(session.trigger(ms(500)), SessionEvent::Ignored(SessionState::Connecting));
        session.poll(ms(1500));
        assert_eq!(session.trigger(ms(2000)), SessionEvent::Ignored(SessionState::Queued));

        // The original schedule is untouched
        session.poll(ms(3500));
        assert_eq!(session.state(), SessionState::Active);
    }

    #[test]
    fn test_shutdown_cancels_pending_steps() {
        let mut session = simulator();
        session.trigger(ms(0));
        session.shutdown();

        assert!(session.poll(ms(60_000)).is_empty());
        assert_eq!(session.state(), SessionState::Disconnected);
        assert_eq!(session.next_step_due(), None);
    }

    #[test]
    fn test_reconnect_after_disconnect() {
        let mut session = simulator();
        session.trigger(ms(0));
        session.poll(ms(3500));
        session.trigger(ms(4000));

        session.trigger(ms(5000));
        session.poll(ms(6499));
        assert_eq!(session.state(), SessionState::Connecting);
        session.poll(ms(8500));
        assert_eq!(session.state(), SessionState::Active);
    }

    #[test]
    fn test_labels() {
        assert_eq!(SessionState::Disconnected.action_label(), "Connect Quantum Cloud");
        assert_eq!(SessionState::Active.action_label(), "Disconnect");
        assert!(SessionState::Queued.is_busy());
        assert!(!SessionState::Active.is_busy());
    }
}
