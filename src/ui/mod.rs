/// User interface
///
/// - `reticle.rs` - canvas overlay drawn over the filtered frame
/// - `panel.rs` - target selector, telemetry, session controls, mission log

pub mod panel;
pub mod reticle;
