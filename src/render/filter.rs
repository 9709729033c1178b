/// Interference filter
///
/// The per-pixel tint applied to every frame. Pure functions over an RGBA8
/// buffer so they can be tested without a window.
///
/// For pixel index `p` the noise term is `sin(p * frequency + phase) * amplitude`.
/// - Quantum mode subtracts the noise and shifts toward cyan:
///   `r + 10`, `g + 40 - noise`, `b + 50 - noise`
/// - Raw mode adds the noise to all three color channels
///
/// Alpha is never touched. Results are rounded then clamped to 0..=255.

/// Which tint formula the frame processor applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Noise added, no correction
    #[default]
    Raw,
    /// Noise subtracted, cyan shift ("constructive interference")
    Quantum,
}

impl FilterMode {
    pub fn from_enabled(enabled: bool) -> Self {
        if enabled {
            FilterMode::Quantum
        } else {
            FilterMode::Raw
        }
    }

    pub fn is_enabled(self) -> bool {
        self == FilterMode::Quantum
    }

    pub fn toggled(self) -> Self {
        Self::from_enabled(!self.is_enabled())
    }
}

/// Sine wave parameters for the noise term
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseWave {
    pub frequency: f64,
    pub amplitude: f64,
}

impl Default for NoiseWave {
    fn default() -> Self {
        Self { frequency: 0.01, amplitude: 20.0 }
    }
}

impl NoiseWave {
    pub fn at(&self, pixel_index: usize, phase: f64) -> f64 {
        (pixel_index as f64 * self.frequency + phase).sin() * self.amplitude
    }
}

fn clamp_channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Tint one RGBA pixel given its noise value
pub fn tint_pixel(pixel: [u8; 4], noise: f64, mode: FilterMode) -> [u8; 4] {
    let [r, g, b, a] = pixel.map(f64::from);
    match mode {
        FilterMode::Quantum => [
            clamp_channel(r + 10.0),
            clamp_channel(g + 40.0 - noise),
            clamp_channel(b + 50.0 - noise),
            a as u8,
        ],
        FilterMode::Raw => [
            clamp_channel(r + noise),
            clamp_channel(g + noise),
            clamp_channel(b + noise),
            a as u8,
        ],
    }
}

/// Apply the filter in place to a tightly packed RGBA8 buffer.
///
/// Trailing bytes that do not form a whole pixel are left alone.
pub fn apply_interference(pixels: &mut [u8], phase: f64, mode: FilterMode, wave: NoiseWave) {
    let whole = pixels.len() / 4 * 4;
    let rgba: &mut [[u8; 4]] = bytemuck::cast_slice_mut(&mut pixels[..whole]);

    for (index, pixel) in rgba.iter_mut().enumerate() {
        *pixel = tint_pixel(*pixel, wave.at(index, phase), mode);
    }
}
