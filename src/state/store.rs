/// The viewer's single authoritative state container
///
/// Every component lives here and every change goes through one of the
/// transition functions below, which also write the mission log.
use image::RgbaImage;
use std::sync::Arc;

use super::mission_log::MissionLog;
use super::scheduler::{Clock, MonotonicClock};
use super::session::{SessionEvent, SessionSimulator, SessionState};
use super::target::{Target, TargetId, TargetSelector};
use crate::config::ViewerConfig;
use crate::error::ViewerError;
use crate::fetch::{ImageLoader, LoadOutcome, LoadTicket, LoadedImage};
use crate::render::{FilterMode, FrameProcessor, RenderedFrame};

pub struct ViewerState<C: Clock = MonotonicClock> {
    config: ViewerConfig,
    clock: C,
    selector: TargetSelector,
    loader: ImageLoader,
    frames: FrameProcessor,
    session: SessionSimulator,
    filter: FilterMode,
    log: MissionLog,
}

impl ViewerState<MonotonicClock> {
    pub fn new(config: ViewerConfig) -> Self {
        Self::with_clock(config, MonotonicClock::new())
    }
}

impl<C: Clock> ViewerState<C> {
    pub fn with_clock(config: ViewerConfig, clock: C) -> Self {
        let mut log = MissionLog::new(config.log_capacity);
        log.append("Telescope array online. Quantum link offline.");

        Self {
            frames: FrameProcessor::new(&config),
            session: SessionSimulator::new(config.connect_delay(), config.queue_delay()),
            selector: TargetSelector::default(),
            loader: ImageLoader::new(),
            filter: FilterMode::default(),
            log,
            config,
            clock,
        }
    }

    // ========== Accessors ==========

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    #[cfg(test)]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn current_target(&self) -> &'static Target {
        self.selector.metadata()
    }

    pub fn session_state(&self) -> SessionState {
        self.session.state()
    }

    pub fn filter_mode(&self) -> FilterMode {
        self.filter
    }

    pub fn log(&self) -> &MissionLog {
        &self.log
    }

    pub fn loaded_image(&self) -> Option<&LoadedImage> {
        self.loader.current()
    }

    pub fn is_loading(&self) -> bool {
        self.loader.is_pending()
    }

    pub fn frames(&self) -> &FrameProcessor {
        &self.frames
    }

    // ========== Target selection ==========

    /// Point the telescope at `id` and start loading its image.
    /// The returned ticket must be handed back through [`Self::finish_load`].
    pub fn select_target(&mut self, id: TargetId) -> LoadTicket {
        self.selector.select(id);
        self.log.append(format!("Slewing to {}...", id.target().name));
        self.loader.begin(id)
    }

    /// Same as [`Self::select_target`] for an untrusted key
    #[cfg(test)]
    pub fn select_target_key(&mut self, key: &str) -> Result<LoadTicket, ViewerError> {
        let id: TargetId = key.parse()?;
        Ok(self.select_target(id))
    }

    /// Deliver the result of a fetch started by `select_target`
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Arc<RgbaImage>, ViewerError>,
    ) -> LoadOutcome {
        let outcome = self.loader.complete(ticket, result);
        match &outcome {
            LoadOutcome::Applied => {
                self.log
                    .append(format!("Tracking lock acquired on {}.", ticket.target.target().name));
            }
            LoadOutcome::Stale => {
                log::debug!(
                    "⏭️  Discarding stale image for {} (generation {})",
                    ticket.target,
                    ticket.generation
                );
            }
            LoadOutcome::Failed(err) => {
                log::warn!("⚠️  {}", err);
                self.log
                    .append(format!("Tracking failed on {}: {}", ticket.target.target().name, err));
            }
        }
        outcome
    }

    // ========== Session & filter ==========

    /// Connect/disconnect control
    pub fn toggle_connection(&mut self) -> SessionEvent {
        let event = self.session.trigger(self.clock.now());
        self.apply_session_event(event);
        event
    }

    /// Fire any session steps that have come due
    pub fn poll_session(&mut self) -> Vec<SessionEvent> {
        let events = self.session.poll(self.clock.now());
        for event in &events {
            self.apply_session_event(*event);
        }
        events
    }

    pub fn toggle_filter(&mut self) -> FilterMode {
        self.filter = self.filter.toggled();
        self.log.append(if self.filter.is_enabled() {
            "Quantum filter engaged."
        } else {
            "Quantum filter disengaged."
        });
        self.filter
    }

    fn apply_session_event(&mut self, event: SessionEvent) {
        if event.forces_filter() {
            self.filter = FilterMode::Quantum;
        }
        self.log.append(event.message());
    }

    // ========== Rendering & lifecycle ==========

    pub fn render_loop_running(&self) -> bool {
        self.frames.is_running()
    }

    /// One display refresh worth of work
    pub fn render_frame(&mut self) -> Option<RenderedFrame> {
        self.frames.tick(self.loader.current(), self.filter)
    }

    /// Stop the render loop and drop pending session steps
    pub fn teardown(&mut self) {
        self.frames.cancel();
        self.session.shutdown();
        log::info!("👋 Viewer torn down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SurfaceSize;
    use crate::state::scheduler::ManualClock;
    use std::time::Duration;

    fn viewer() -> ViewerState<ManualClock> {
        let mut config = ViewerConfig::default();
        config.surface = SurfaceSize::new(12, 8);
        ViewerState::with_clock(config, ManualClock::new())
    }

    fn bitmap() -> Arc<RgbaImage> {
        Arc::new(RgbaImage::from_pixel(24, 16, image::Rgba([80, 90, 100, 255])))
    }

    fn latest_message<C: Clock>(state: &ViewerState<C>) -> String {
        state.log().latest().unwrap().message.clone()
    }

    #[test]
    fn test_select_updates_metadata_and_logs() {
        let mut state = viewer();
        for id in TargetId::ALL {
            let ticket = state.select_target(id);
            assert_eq!(ticket.target, id);
            assert_eq!(state.current_target(), id.target());
            assert!(latest_message(&state).starts_with("Slewing to"));
        }
    }

    #[test]
    fn test_unknown_key_changes_nothing() {
        let mut state = viewer();
        state.select_target(TargetId::Crab);
        let before = state.log().len();

        let result = state.select_target_key("betelgeuse");
        assert_eq!(result, Err(ViewerError::UnknownTarget("betelgeuse".to_string())));
        assert_eq!(state.current_target().id, TargetId::Crab);
        assert_eq!(state.log().len(), before);

        let ticket = state.select_target_key("pillars").unwrap();
        assert_eq!(ticket.target, TargetId::Pillars);
    }

    #[test]
    fn test_load_then_render() {
        let mut state = viewer();
        assert!(state.render_frame().is_none());

        let ticket = state.select_target(TargetId::Orion);
        assert!(state.is_loading());
        assert!(state.render_frame().is_none());

        assert_eq!(state.finish_load(ticket, Ok(bitmap())), LoadOutcome::Applied);
        assert!(latest_message(&state).starts_with("Tracking lock acquired"));

        let frame = state.render_frame().unwrap();
        assert_eq!(frame.pixels.len(), 12 * 8 * 4);
    }

    #[test]
    fn test_failed_load_logs_and_keeps_image() {
        let mut state = viewer();
        let ok = state.select_target(TargetId::Andromeda);
        state.finish_load(ok, Ok(bitmap()));

        let bad = state.select_target(TargetId::Crab);
        let outcome = state.finish_load(
            bad,
            Err(ViewerError::Fetch {
                uri: bad.uri().to_string(),
                reason: "404 Not Found".to_string(),
            }),
        );

        assert!(matches!(outcome, LoadOutcome::Failed(_)));
        assert!(latest_message(&state).contains("404 Not Found"));
        assert_eq!(state.loaded_image().unwrap().target, TargetId::Andromeda);
        assert!(state.render_frame().is_some());
    }

    #[test]
    fn test_stale_load_is_not_logged() {
        let mut state = viewer();
        let slow = state.select_target(TargetId::Andromeda);
        let fast = state.select_target(TargetId::Orion);
        state.finish_load(fast, Ok(bitmap()));
        let before = state.log().len();

        assert_eq!(state.finish_load(slow, Ok(bitmap())), LoadOutcome::Stale);
        assert_eq!(state.log().len(), before);
        assert_eq!(state.loaded_image().unwrap().target, TargetId::Orion);
    }

    #[test]
    fn test_connect_sequence_on_virtual_clock() {
        let mut state = viewer();
        assert_eq!(state.filter_mode(), FilterMode::Raw);

        state.toggle_connection();
        assert_eq!(state.session_state(), SessionState::Connecting);

        state.clock().advance(Duration::from_millis(1499));
        assert!(state.poll_session().is_empty());

        state.clock().advance(Duration::from_millis(1));
        state.poll_session();
        assert_eq!(state.session_state(), SessionState::Queued);
        assert_eq!(state.filter_mode(), FilterMode::Raw);

        state.clock().advance(Duration::from_millis(1999));
        assert!(state.poll_session().is_empty());

        state.clock().advance(Duration::from_millis(1));
        state.poll_session();
        assert_eq!(state.session_state(), SessionState::Active);
        assert_eq!(state.filter_mode(), FilterMode::Quantum);
    }

    #[test]
    fn test_disconnect_is_immediate_and_keeps_filter() {
        let mut state = viewer();
        state.toggle_connection();
        state.clock().advance(Duration::from_secs(4));
        state.poll_session();

        state.toggle_connection();
        assert_eq!(state.session_state(), SessionState::Disconnected);
        assert_eq!(state.filter_mode(), FilterMode::Quantum);
    }

    #[test]
    fn test_user_filter_toggle() {
        let mut state = viewer();
        assert_eq!(state.toggle_filter(), FilterMode::Quantum);
        assert_eq!(latest_message(&state), "Quantum filter engaged.");
        assert_eq!(state.toggle_filter(), FilterMode::Raw);
        assert_eq!(latest_message(&state), "Quantum filter disengaged.");
    }

    #[test]
    fn test_log_stays_capped() {
        let mut state = viewer();
        for _ in 0..30 {
            state.toggle_filter();
        }
        assert_eq!(state.log().len(), 10);
    }

    #[test]
    fn test_teardown_cancels_everything() {
        let mut state = viewer();
        let ticket = state.select_target(TargetId::Andromeda);
        state.finish_load(ticket, Ok(bitmap()));
        state.toggle_connection();

        state.teardown();
        assert!(!state.render_loop_running());
        assert!(state.render_frame().is_none());

        state.clock().advance(Duration::from_secs(60));
        assert!(state.poll_session().is_empty());
        assert_eq!(state.session_state(), SessionState::Disconnected);
    }
}
