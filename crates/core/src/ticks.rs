//! Tick label placement and formatting.

use std::fmt::Display;

use chrono::{Local, TimeZone};
use tracing::{trace, warn};

use crate::mapper::CoordinateMapper;
use crate::time::Timestamp;

/// Upper bound on labels emitted in one frame.
pub const MAX_LABELS_PER_FRAME: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub time: Timestamp,
    /// Pixel row of `time`.
    pub y: f64,
}

/// Ticks on multiples of `interval_ms` that fall on a surface of `height`
/// pixels, newest first.
///
/// The first tick is the boundary at or just above the top edge; each
/// following tick is one step older, until the row passes the bottom
/// edge. Tick times come from an integer index, so they stay on exact
/// multiples of the interval however far the view is panned.
///
/// When the surface spans more intervals than [`MAX_LABELS_PER_FRAME`], the
/// step becomes a whole multiple of the interval, so labels thin out but
/// still reach the bottom edge.
pub fn visible_ticks(mapper: &CoordinateMapper, height: f64, interval_ms: f64) -> Vec<Tick> {
    if !(height.is_finite() && interval_ms.is_finite() && interval_ms > 0.0) {
        return Vec::new();
    }

    let top = mapper.pixel_to_time(0.0).as_millis();
    if !top.is_finite() {
        return Vec::new();
    }

    let stride = label_stride(mapper.px_to_ms(height.max(0.0)) / interval_ms);
    if stride > 1 {
        trace!(interval_ms, stride, "thinning tick labels");
    }

    let mut ticks = Vec::new();
    let mut index = ((top / interval_ms) / stride as f64).ceil() as i64;
    loop {
        let time = Timestamp::from_millis(index.saturating_mul(stride) as f64 * interval_ms);
        let y = mapper.time_to_pixel(time);
        if y > height {
            break;
        }
        if ticks.len() == MAX_LABELS_PER_FRAME {
            warn!(interval_ms, stride, height, "tick labels capped");
            break;
        }
        ticks.push(Tick { time, y });
        index -= 1;
    }
    ticks
}

/// Intervals per label so that `spanned` intervals fit in one frame. The
/// slack covers the boundary ticks at either edge.
fn label_stride(spanned: f64) -> i64 {
    let budget = (MAX_LABELS_PER_FRAME - 4) as f64;
    if !spanned.is_finite() || spanned <= budget {
        return 1;
    }
    (spanned / budget).ceil() as i64
}

/// `mm:ss:SSS` in local wall-clock time.
pub fn format_label(time: Timestamp) -> String {
    format_label_in(time, &Local)
}

pub fn format_label_in<Tz>(time: Timestamp, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match time.to_datetime(tz) {
        Some(dt) => dt.format("%M:%S:%3f").to_string(),
        None => "--:--:---".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    const T0: Timestamp = Timestamp::from_millis(1_700_000_000_250.0);

    #[test]
    fn ticks_sit_on_second_boundaries_newest_first() {
        let mapper = CoordinateMapper::new(T0, 0.0, 0.05);
        let ticks = visible_ticks(&mapper, 200.0, 1000.0);

        // One boundary just above the top edge, then four more within 200px.
        assert_eq!(ticks.len(), 5);
        assert_eq!(ticks[0].time.as_millis(), 1_700_000_001_000.0);
        assert!(ticks[0].y <= 0.0);
        assert!(ticks.windows(2).all(|w| w[0].time > w[1].time));
        assert!(ticks.iter().all(|t| t.time.as_millis() % 1000.0 == 0.0));
        assert!(ticks.iter().all(|t| t.y <= 200.0));
    }

    #[test]
    fn rows_step_by_interval_times_scale() {
        let mapper = CoordinateMapper::new(T0, 13.0, 0.05);
        let ticks = visible_ticks(&mapper, 500.0, 1000.0);
        for pair in ticks.windows(2) {
            assert!((pair[1].y - pair[0].y - 50.0).abs() < 1e-6);
        }
    }

    #[test]
    fn degenerate_inputs_produce_nothing() {
        let mapper = CoordinateMapper::new(T0, 0.0, 0.05);
        assert!(visible_ticks(&mapper, f64::NAN, 1000.0).is_empty());
        assert!(visible_ticks(&mapper, 100.0, 0.0).is_empty());
    }

    #[test]
    fn dense_intervals_thin_out_but_cover_the_surface() {
        let mapper = CoordinateMapper::new(T0, 0.0, 0.05);
        let ticks = visible_ticks(&mapper, 600.0, 1.0);

        assert!(ticks.len() <= MAX_LABELS_PER_FRAME);
        assert!(ticks.iter().all(|t| t.time.as_millis() % 1.0 == 0.0));
        let last = ticks.last().map(|t| t.y).unwrap_or_default();
        let step_px = ticks[1].y - ticks[0].y;
        assert!(step_px > 0.0);
        assert!(last > 600.0 - step_px, "labels stop at y={last}");
    }

    #[test]
    fn tiny_intervals_stay_under_the_cap() {
        let mapper = CoordinateMapper::new(T0, 0.0, 0.05);
        let ticks = visible_ticks(&mapper, 10_000.0, 0.001);
        assert!(ticks.len() <= MAX_LABELS_PER_FRAME);
        let last = ticks.last().map(|t| t.y).unwrap_or_default();
        assert!(last > 9_990.0, "labels stop at y={last}");
    }

    #[test]
    fn sparse_intervals_are_not_thinned() {
        assert_eq!(label_stride(12.0), 1);
        assert_eq!(label_stride(f64::INFINITY), 1);
        assert_eq!(label_stride(12_000.0), 3);
    }

    #[test]
    fn labels_are_minutes_seconds_millis() {
        // 2023-11-14T22:13:20.250Z
        assert_eq!(format_label_in(T0, &Utc), "13:20:250");
        assert_eq!(
            format_label_in(Timestamp::from_millis(1_700_000_000_007.0), &Utc),
            "13:20:007"
        );
    }
}
