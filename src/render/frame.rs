/// Frame processor and render loop state
use image::RgbaImage;
use std::sync::Arc;

use super::filter::{apply_interference, FilterMode, NoiseWave};
use super::fit::composite_cover;
use super::overlay::Reticle;
use crate::config::{SurfaceSize, ViewerConfig};
use crate::fetch::LoadedImage;

/// Output of one tick, ready to be put on screen
#[derive(Debug, Clone)]
pub struct RenderedFrame {
    pub surface: SurfaceSize,
    /// Tightly packed RGBA8, `surface.width * surface.height * 4` bytes
    pub pixels: Vec<u8>,
    pub reticle: Reticle,
    /// Phase used for this frame
    pub phase: f64,
}

/// Cover-fitted copy of the current bitmap, rebuilt when the image changes
#[derive(Debug)]
struct Base {
    generation: u64,
    pixels: Arc<RgbaImage>,
}

#[derive(Debug)]
pub struct FrameProcessor {
    surface: SurfaceSize,
    wave: NoiseWave,
    phase_step: f64,
    phase: f64,
    base: Option<Base>,
    running: bool,
    frames_rendered: u64,
}

impl FrameProcessor {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            surface: config.surface,
            wave: NoiseWave {
                frequency: config.noise_frequency,
                amplitude: config.noise_amplitude,
            },
            phase_step: config.phase_step,
            phase: 0.0,
            base: None,
            running: true,
            frames_rendered: 0,
        }
    }

    #[cfg(test)]
    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Whether the loop still wants refresh callbacks
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop the loop. Further ticks are no-ops.
    pub fn cancel(&mut self) {
        if self.running {
            log::info!("🛑 Render loop cancelled after {} frames", self.frames_rendered);
        }
        self.running = false;
        self.base = None;
    }

    /// Produce one frame, or `None` when the loop is stopped, there is no
    /// image yet, or the surface is empty. A skipped tick leaves the phase alone.
    pub fn tick(&mut self, image: Option<&LoadedImage>, mode: FilterMode) -> Option<RenderedFrame> {
        if !self.running || self.surface.is_empty() {
            return None;
        }
        let image = image?;
        let base = self.base_for(image)?;

        let mut pixels = base.as_raw().clone();

        self.phase += self.phase_step;
        apply_interference(&mut pixels, self.phase, mode, self.wave);
        self.frames_rendered += 1;

        Some(RenderedFrame {
            surface: self.surface,
            pixels,
            reticle: Reticle::for_surface(self.surface, mode),
            phase: self.phase,
        })
    }

    fn base_for(&mut self, image: &LoadedImage) -> Option<Arc<RgbaImage>> {
        if let Some(base) = &self.base {
            if base.generation == image.generation {
                return Some(Arc::clone(&base.pixels));
            }
        }

        let (fit, pixels) = composite_cover(&image.pixels, self.surface)?;
        let pixels = Arc::new(pixels);
        log::debug!(
            "🎯 Composited {}x{} bitmap onto {}x{} surface (scale {:.3})",
            image.pixels.width(),
            image.pixels.height(),
            self.surface.width,
            self.surface.height,
            fit.scale
        );
        self.base = Some(Base {
            generation: image.generation,
            pixels: Arc::clone(&pixels),
        });
        Some(pixels)
    }
}
