use tracing::debug;

use crate::mapper::CoordinateMapper;
use crate::time::Timestamp;

/// The widget's view parameters.
///
/// `base_time` is fixed at construction. `display_time` follows real time
/// through [`advance`](Self::advance) unless the view is frozen.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    display_time: Timestamp,
    base_time: Timestamp,
    pixel_offset: f64,
    frozen: bool,
    scale: f64,
}

impl ViewState {
    pub fn new(now: Timestamp, scale: f64) -> Self {
        Self {
            display_time: now,
            base_time: now,
            pixel_offset: 0.0,
            frozen: false,
            scale,
        }
    }

    pub fn display_time(&self) -> Timestamp {
        self.display_time
    }

    pub fn base_time(&self) -> Timestamp {
        self.base_time
    }

    pub fn pixel_offset(&self) -> f64 {
        self.pixel_offset
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Follow real time. No-op while frozen.
    pub fn advance(&mut self, now: Timestamp) {
        if !self.frozen {
            self.display_time = now;
        }
    }

    pub fn pan(&mut self, delta_px: f64) {
        self.pixel_offset += delta_px;
    }

    pub fn set_pixel_offset(&mut self, offset: f64) {
        self.pixel_offset = offset;
    }

    pub fn set_frozen(&mut self, frozen: bool) {
        if self.frozen != frozen {
            debug!(frozen, display_time = %self.display_time, "freeze state changed");
        }
        self.frozen = frozen;
    }

    pub fn mapper(&self) -> CoordinateMapper {
        CoordinateMapper::new(self.display_time, self.pixel_offset, self.scale)
    }
}
