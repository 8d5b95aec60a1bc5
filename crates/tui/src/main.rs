mod input;
mod renderer;

use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Mutex;

use anyhow::{Context, Result, bail};
use nowline_core::host::ListenerRegistry;
use nowline_core::{SvgSurface, SystemClock, Timeline, TimelineConfig};
use nowline_protocol::Size;

const USAGE: &str = "Usage: nowline [--config <options.json>] [--log <file>] [--svg <out.svg> [--size <W>x<H>]]";

struct Args {
    config: Option<PathBuf>,
    log: Option<PathBuf>,
    svg: Option<PathBuf>,
    size: Size,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        config: None,
        log: None,
        svg: None,
        size: Size::new(400.0, 600.0),
    };
    let mut it = std::env::args().skip(1);
    while let Some(flag) = it.next() {
        let mut value = || it.next().with_context(|| format!("{flag} needs a value\n{USAGE}"));
        match flag.as_str() {
            "--config" => args.config = Some(PathBuf::from(value()?)),
            "--log" => args.log = Some(PathBuf::from(value()?)),
            "--svg" => args.svg = Some(PathBuf::from(value()?)),
            "--size" => args.size = parse_size(&value()?)?,
            "-h" | "--help" => {
                eprintln!("{USAGE}");
                std::process::exit(0);
            }
            other => bail!("unknown argument {other:?}\n{USAGE}"),
        }
    }
    Ok(args)
}

fn parse_size(s: &str) -> Result<Size> {
    let (w, h) = s
        .split_once('x')
        .with_context(|| format!("size must look like 400x600, got {s:?}"))?;
    Ok(Size::new(w.trim().parse()?, h.trim().parse()?))
}

/// Defaults sized for terminal cells instead of pixels.
fn terminal_defaults() -> TimelineConfig {
    let mut config = TimelineConfig {
        scale: 0.01,
        wheel_gain: 2.0,
        ..TimelineConfig::default()
    };
    config.labels.position = 0.0;
    config.line.position = 10.0;
    config.markers.start_x = 12.0;
    config
}

fn load_config(path: Option<&PathBuf>, fallback: TimelineConfig) -> Result<TimelineConfig> {
    let Some(path) = path else {
        return Ok(fallback);
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    Ok(TimelineConfig::from_json(&json)?)
}

fn main() -> Result<()> {
    let args = parse_args()?;

    if let Some(log) = &args.log {
        let file = std::fs::File::create(log)
            .with_context(|| format!("creating log file {}", log.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }

    if let Some(out) = &args.svg {
        let config = load_config(args.config.as_ref(), TimelineConfig::default())?;
        let timeline = Timeline::new(
            config,
            SvgSurface::new(args.size, false),
            ListenerRegistry::new(),
            SystemClock,
        )?;
        std::fs::write(out, timeline.surface().document())
            .with_context(|| format!("writing {}", out.display()))?;
        eprintln!("wrote {}", out.display());
        return Ok(());
    }

    let config = load_config(args.config.as_ref(), terminal_defaults())?;
    run_terminal(config)
}

fn run_terminal(config: TimelineConfig) -> Result<()> {
    use crossterm::{
        event::{self, Event, KeyCode, KeyEventKind},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    };
    use nowline_core::InputEvent;
    use nowline_core::host::EventKind;
    use nowline_core::ticks::format_label;
    use ratatui::{
        Terminal,
        backend::CrosstermBackend,
        layout::Rect,
        style::{Color, Style},
        widgets::{Block, Paragraph},
    };
    use web_time::Instant;

    use crate::input::{ClickTracker, TerminalInput, translate_mouse};
    use crate::renderer::{TerminalSurface, theme_to_color};

    config.validate()?;
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let content_area = |full: Rect| Rect::new(0, 1, full.width, full.height.saturating_sub(2));
    let term_size = terminal.size()?;
    let area = content_area(Rect::new(0, 0, term_size.width, term_size.height));
    let surface = TerminalSurface::new(Size::new(f64::from(area.width), f64::from(area.height)));

    let mut timeline = Timeline::new(config, surface, TerminalInput::default(), SystemClock)?;
    tracing::info!(width = area.width, height = area.height, "terminal timeline started");
    let hover = Rc::new(Cell::new(None));
    let sink = Rc::clone(&hover);
    timeline.on_hover(move |update| sink.set(Some(update)));

    let mut clicks = ClickTracker::default();
    let result = (|| -> Result<()> {
        loop {
            timeline.poll(Instant::now());

            terminal.draw(|frame| {
                let full = frame.area();
                let area = content_area(full);

                let header = Block::default()
                    .title(" nowline | drag/scroll to pan | double-click to follow | space halt/proceed | q quit ")
                    .style(Style::default().fg(Color::White).bg(Color::DarkGray));
                frame.render_widget(header, Rect::new(0, 0, full.width, 1));

                timeline.surface().render(frame.buffer_mut(), area);

                let state = timeline.view_state();
                let mut status = format!(
                    " display {} | offset {:.0} | {}{}",
                    format_label(state.display_time()),
                    state.pixel_offset(),
                    if timeline.is_running() { "running" } else { "halted" },
                    if state.is_frozen() { " | frozen" } else { "" },
                );
                if let Some(h) = hover.get() {
                    status.push_str(&format!(" | pointer {}", format_label(h.time)));
                }
                let status_row = Rect::new(0, full.height.saturating_sub(1), full.width, 1);
                frame.render_widget(
                    Paragraph::new(status).style(
                        Style::default().fg(theme_to_color(nowline_protocol::ThemeToken::StatusText)),
                    ),
                    status_row,
                );
            })?;

            let timeout = timeline
                .next_due()
                .map(|due| due.saturating_duration_since(Instant::now()))
                .unwrap_or(std::time::Duration::from_millis(100));
            if !event::poll(timeout)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char(' ') => {
                        if timeline.is_running() {
                            timeline.halt();
                        } else {
                            timeline.proceed();
                        }
                    }
                    _ => {}
                },
                Event::Resize(width, height) => {
                    if timeline.input_source().is_listening(EventKind::Resize) {
                        let area = content_area(Rect::new(0, 0, width, height));
                        timeline.dispatch(InputEvent::Resize(Size::new(
                            f64::from(area.width),
                            f64::from(area.height),
                        )));
                    }
                }
                Event::Mouse(mouse) => {
                    let full = terminal.size()?;
                    let area = content_area(Rect::new(0, 0, full.width, full.height));
                    for (kind, event) in translate_mouse(mouse, area, &mut clicks, Instant::now()) {
                        if timeline.input_source().is_listening(kind) {
                            timeline.dispatch(event);
                        }
                    }
                }
                _ => {}
            }
        }
        Ok(())
    })();

    // Dropping the timeline releases mouse capture before the screen is restored.
    drop(timeline);
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}
