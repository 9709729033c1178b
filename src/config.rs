/// Viewer configuration
///
/// All tunables of the viewer live here. Only the compiled-in default is
/// used by the application; the JSON helpers exist so the values can be
/// inspected or embedded elsewhere.
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Size of the drawing surface in logical pixels
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ViewerConfig {
    // ========== Surface ==========

    /// Drawing surface (900x600)
    pub surface: SurfaceSize,

    // ========== Interference filter ==========

    /// Phase added to the accumulator on every rendered frame
    pub phase_step: f64,

    /// Multiplier applied to the pixel index inside the sine
    pub noise_frequency: f64,

    /// Peak noise magnitude in 8-bit channel units
    pub noise_amplitude: f64,

    // ========== Session ==========

    /// Connecting -> Queued delay in milliseconds
    pub connect_delay_ms: u64,

    /// Queued -> Active delay in milliseconds
    pub queue_delay_ms: u64,

    // ========== Log ==========

    /// Maximum number of log entries kept
    pub log_capacity: usize,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            surface: SurfaceSize::new(900, 600),
            phase_step: 0.15,
            noise_frequency: 0.01,
            noise_amplitude: 20.0,
            connect_delay_ms: 1500,
            queue_delay_ms: 2000,
            log_capacity: 10,
        }
    }
}

impl ViewerConfig {
    pub fn connect_delay(&self) -> Duration {
        Duration::from_millis(self.connect_delay_ms)
    }

    pub fn queue_delay(&self) -> Duration {
        Duration::from_millis(self.queue_delay_ms)
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse from JSON string
    #[cfg(test)]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
