use crate::coords::Point;
use crate::session::PointerSample;

/// Click history of the rendering surface for the current canvas epoch.
/// Markers accumulate until the surface is rebuilt; only the most recent
/// one is meaningful to the session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClickSurface {
    epoch: u64,
    markers: Vec<Point>,
}

impl ClickSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn markers(&self) -> &[Point] {
        &self.markers
    }

    /// Record a click and stamp it with the current epoch
    pub fn record(&mut self, position: Point) -> PointerSample {
        self.markers.push(position);
        PointerSample {
            position,
            epoch: self.epoch,
        }
    }

    pub fn latest(&self) -> Option<PointerSample> {
        self.markers.last().map(|&position| PointerSample {
            position,
            epoch: self.epoch,
        })
    }

    /// Start over empty at `epoch`. Rebuilding at the current epoch is a no-op.
    pub fn rebuild(&mut self, epoch: u64) {
        if epoch != self.epoch {
            self.epoch = epoch;
            self.markers.clear();
        }
    }

    /// Back to the state of a freshly opened session
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
