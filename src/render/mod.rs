/// Frame rendering
///
/// Per display refresh the frame processor:
/// - composites the loaded bitmap onto the surface with cover placement (fit.rs)
/// - applies the interference filter to the pixel buffer (filter.rs)
/// - describes the reticle drawn on top (overlay.rs)
///
/// frame.rs ties these together and owns the phase accumulator.

pub mod filter;
pub mod fit;
pub mod frame;
pub mod overlay;

pub use filter::FilterMode;
pub use frame::{FrameProcessor, RenderedFrame};
