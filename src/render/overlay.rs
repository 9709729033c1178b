/// Targeting reticle drawn over every frame
use cgmath::Vector2;

use super::filter::FilterMode;
use crate::config::SurfaceSize;

pub const RETICLE_RADIUS: f32 = 50.0;
/// Crosshair ticks run from this distance from the center...
pub const TICK_INNER: f32 = 30.0;
/// ...to this one
pub const TICK_OUTER: f32 = 70.0;

/// Stroke colors as RGBA in 0.0..=1.0
pub const CYAN: [f32; 4] = [0.0, 1.0, 1.0, 1.0];
pub const TRANSLUCENT_GREEN: [f32; 4] = [0.0, 1.0, 0.0, 0.5];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Vector2<f32>,
    pub to: Vector2<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reticle {
    pub center: Vector2<f32>,
    pub radius: f32,
    /// Left, right, top, bottom
    pub ticks: [Segment; 4],
    pub color: [f32; 4],
}

impl Reticle {
    pub fn for_surface(surface: SurfaceSize, mode: FilterMode) -> Self {
        let center = Vector2::new(surface.width as f32 / 2.0, surface.height as f32 / 2.0);
        let tick = |direction: Vector2<f32>| Segment {
            from: center + direction * TICK_INNER,
            to: center + direction * TICK_OUTER,
        };

        Self {
            center,
            radius: RETICLE_RADIUS,
            ticks: [
                tick(Vector2::new(-1.0, 0.0)),
                tick(Vector2::new(1.0, 0.0)),
                tick(Vector2::new(0.0, -1.0)),
                tick(Vector2::new(0.0, 1.0)),
            ],
            color: stroke_color(mode),
        }
    }
}

pub fn stroke_color(mode: FilterMode) -> [f32; 4] {
    match mode {
        FilterMode::Quantum => CYAN,
        FilterMode::Raw => TRANSLUCENT_GREEN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_on_surface() {
        let reticle = Reticle::for_surface(SurfaceSize::new(900, 600), FilterMode::Raw);
        assert_eq!(reticle.center, Vector2::new(450.0, 300.0));
        assert_eq!(reticle.radius, 50.0);
        assert_eq!(reticle.ticks[0].from, Vector2::new(420.0, 300.0));
        assert_eq!(reticle.ticks[0].to, Vector2::new(380.0, 300.0));
        assert_eq!(reticle.ticks[3].to, Vector2::new(450.0, 370.0));
    }

    #[test]
    fn test_color_follows_mode() {
        let surface = SurfaceSize::new(900, 600);
        assert_eq!(Reticle::for_surface(surface, FilterMode::Quantum).color, CYAN);
        assert_eq!(Reticle::for_surface(surface, FilterMode::Raw).color[3], 0.5);
    }
}
