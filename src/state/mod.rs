/// State management module
///
/// This module handles all application state, including:
/// - The target catalog and current selection (target.rs)
/// - The capped mission log (mission_log.rs)
/// - The delayed-task queue and clocks (scheduler.rs)
/// - The simulated quantum-cloud session (session.rs)
/// - The single store tying it all together (store.rs)

pub mod mission_log;
pub mod scheduler;
pub mod session;
pub mod store;
pub mod target;
