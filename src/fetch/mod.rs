/// Target image acquisition
///
/// This module handles:
/// - Fetching image bytes (HTTPS or local file) and decoding them (source.rs)
/// - Deciding which completed load gets displayed (loader.rs)

pub mod loader;
pub mod source;

pub use loader::{ImageLoader, LoadOutcome, LoadTicket, LoadedImage};
pub use source::ImageFetcher;
