use crate::time::Timestamp;

/// Converts between wall-clock time and vertical pixel rows.
///
/// Row 0 is `display_time`; older times sit further down. The accumulated pan
/// offset enters every conversion through [`ms_offset`](Self::ms_offset), so
/// its sign convention lives in exactly one place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    pub display_time: Timestamp,
    pub pixel_offset: f64,
    /// Pixels per elapsed millisecond. Always positive and finite.
    pub scale: f64,
}

impl CoordinateMapper {
    pub fn new(display_time: Timestamp, pixel_offset: f64, scale: f64) -> Self {
        Self {
            display_time,
            pixel_offset,
            scale,
        }
    }

    /// The pan offset expressed as a shift in time.
    pub fn ms_offset(&self) -> f64 {
        -self.pixel_offset / self.scale
    }

    pub fn time_to_pixel(&self, t: Timestamp) -> f64 {
        let effective = t + self.ms_offset();
        (self.display_time - effective) * self.scale
    }

    pub fn pixel_to_time(&self, px: f64) -> Timestamp {
        self.display_time - px / self.scale - self.ms_offset()
    }

    pub fn px_to_ms(&self, px: f64) -> f64 {
        px / self.scale
    }

    pub fn ms_to_px(&self, ms: f64) -> f64 {
        ms * self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: Timestamp = Timestamp::from_millis(1_700_000_000_000.0);

    #[test]
    fn display_time_maps_to_row_zero() {
        let m = CoordinateMapper::new(T0, 0.0, 0.05);
        assert_eq!(m.time_to_pixel(T0), 0.0);
    }

    #[test]
    fn one_second_ago_is_fifty_pixels_down() {
        let m = CoordinateMapper::new(T0, 0.0, 0.05);
        assert!((m.time_to_pixel(T0 - 1000.0) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn pan_shifts_every_row_by_the_offset() {
        let still = CoordinateMapper::new(T0, 0.0, 0.05);
        let panned = CoordinateMapper::new(T0, 37.5, 0.05);
        for ms in [0.0, 250.0, 12_345.0, -800.0] {
            let t = T0 - ms;
            let shift = panned.time_to_pixel(t) - still.time_to_pixel(t);
            assert!((shift - 37.5).abs() < 1e-6, "shift={shift}");
        }
    }

    #[test]
    fn positive_offset_moves_time_backwards_in_ms() {
        let m = CoordinateMapper::new(T0, 50.0, 0.05);
        assert_eq!(m.ms_offset(), -1000.0);
        assert_eq!(m.pixel_to_time(50.0), T0);
    }

    #[test]
    fn unit_helpers_are_inverse() {
        let m = CoordinateMapper::new(T0, 0.0, 0.05);
        assert_eq!(m.ms_to_px(m.px_to_ms(40.0)), 40.0);
    }
}
