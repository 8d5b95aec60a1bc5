use nowline_protocol::{Point, RenderCommand, Size, ThemeToken};

use crate::config::TimelineConfig;
use crate::mapper::CoordinateMapper;
use crate::ticks::{format_label, visible_ticks};
use crate::time::Timestamp;

/// Everything one repaint needs, captured at tick time.
#[derive(Debug, Clone, Copy)]
pub struct FrameInputs<'a> {
    pub config: &'a TimelineConfig,
    pub mapper: CoordinateMapper,
    pub size: Size,
    /// Real wall-clock time, not the (possibly frozen) display time.
    pub now: Timestamp,
    pub base_time: Timestamp,
}

/// Build one full repaint pass: clear, reference line, tick labels, now
/// marker, anchor marker.
pub fn paint_frame(frame: &FrameInputs<'_>) -> Vec<RenderCommand> {
    let FrameInputs {
        config,
        mapper,
        size,
        now,
        base_time,
    } = *frame;

    let mut commands = Vec::with_capacity(64);
    commands.push(RenderCommand::ClearRect {
        rect: size.to_rect(),
        color: ThemeToken::Background,
    });

    let line = &config.line;
    commands.push(RenderCommand::DrawLine {
        from: Point::new(line.position, 0.0),
        to: Point::new(line.position, size.height),
        color: line.color,
        width: line.width,
    });

    let labels = &config.labels;
    for tick in visible_ticks(&mapper, size.height, labels.interval) {
        commands.push(RenderCommand::DrawText {
            position: Point::new(labels.position, tick.y),
            text: format_label(tick.time),
            color: labels.color,
            font: labels.font,
            align: labels.align,
        });
    }

    let markers = &config.markers;
    for (time, color) in [(now, markers.now_color), (base_time, markers.anchor_color)] {
        let y = mapper.time_to_pixel(time);
        commands.push(RenderCommand::DrawLine {
            from: Point::new(markers.start_x, y),
            to: Point::new(size.width, y),
            color,
            width: markers.width,
        });
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: Timestamp = Timestamp::from_millis(1_700_000_000_000.0);

    fn frame(config: &TimelineConfig, display: Timestamp, now: Timestamp) -> Vec<RenderCommand> {
        paint_frame(&FrameInputs {
            config,
            mapper: CoordinateMapper::new(display, 0.0, config.scale),
            size: Size::new(400.0, 300.0),
            now,
            base_time: T0,
        })
    }

    #[test]
    fn paints_in_order() {
        let config = TimelineConfig::default();
        let cmds = frame(&config, T0, T0);

        assert!(matches!(cmds[0], RenderCommand::ClearRect { .. }));
        assert!(matches!(
            cmds[1],
            RenderCommand::DrawLine {
                color: ThemeToken::ReferenceLine,
                ..
            }
        ));
        let texts = cmds
            .iter()
            .filter(|c| matches!(c, RenderCommand::DrawText { .. }))
            .count();
        // 300px at 50px per second: the boundary at the top plus six below.
        assert_eq!(texts, 7);
        assert!(matches!(
            cmds[cmds.len() - 2],
            RenderCommand::DrawLine {
                color: ThemeToken::NowMarker,
                ..
            }
        ));
        assert!(matches!(
            cmds[cmds.len() - 1],
            RenderCommand::DrawLine {
                color: ThemeToken::AnchorMarker,
                ..
            }
        ));
    }

    #[test]
    fn reference_line_spans_full_height() {
        let config = TimelineConfig::default();
        let cmds = frame(&config, T0, T0);
        let RenderCommand::DrawLine { from, to, width, .. } = &cmds[1] else {
            panic!("expected reference line, got {:?}", cmds[1]);
        };
        assert_eq!(*from, Point::new(80.0, 0.0));
        assert_eq!(*to, Point::new(80.0, 300.0));
        assert_eq!(*width, 4.0);
    }

    #[test]
    fn now_marker_follows_real_time_even_when_display_lags() {
        let config = TimelineConfig::default();
        // Display frozen two seconds ago: real "now" is 100px above row 0.
        let cmds = frame(&config, T0, T0 + 2000.0);
        let RenderCommand::DrawLine { from, to, .. } = &cmds[cmds.len() - 2] else {
            panic!("expected now marker");
        };
        assert_eq!(from.y, -100.0);
        assert_eq!(from.x, 100.0);
        assert_eq!(to.x, 400.0);
    }
}
