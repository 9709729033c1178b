/// Image loader bookkeeping
///
/// Every request gets a generation number. Only the result of the most
/// recent request may replace the displayed image; anything older that
/// finishes late is discarded.
use image::RgbaImage;
use std::sync::Arc;

use crate::error::ViewerError;
use crate::state::target::TargetId;

/// A decoded bitmap and the request that produced it
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub generation: u64,
    pub target: TargetId,
    pub pixels: Arc<RgbaImage>,
}

/// Issued when a load starts, handed back when it completes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub generation: u64,
    pub target: TargetId,
}

impl LoadTicket {
    pub fn uri(&self) -> &'static str {
        self.target.target().image_uri
    }
}

/// What happened to a completed load
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The image is now displayed
    Applied,
    /// A newer request was issued; result dropped
    Stale,
    /// The latest request failed; previous image (if any) stays
    Failed(ViewerError),
}

#[derive(Debug, Default)]
pub struct ImageLoader {
    latest: u64,
    resolved: u64,
    current: Option<LoadedImage>,
}

impl ImageLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request for `target`, superseding any in flight
    pub fn begin(&mut self, target: TargetId) -> LoadTicket {
        self.latest += 1;
        LoadTicket {
            generation: self.latest,
            target,
        }
    }

    pub fn complete(
        &mut self,
        ticket: LoadTicket,
        result: Result<Arc<RgbaImage>, ViewerError>,
    ) -> LoadOutcome {
        if ticket.generation != self.latest {
            return LoadOutcome::Stale;
        }
        self.resolved = ticket.generation;

        match result {
            Ok(pixels) => {
                self.current = Some(LoadedImage {
                    generation: ticket.generation,
                    target: ticket.target,
                    pixels,
                });
                LoadOutcome::Applied
            }
            Err(err) => LoadOutcome::Failed(err),
        }
    }

    /// Image currently on display
    pub fn current(&self) -> Option<&LoadedImage> {
        self.current.as_ref()
    }

    /// True while the latest request has not been resolved
    pub fn is_pending(&self) -> bool {
        self.resolved < self.latest
    }
}
