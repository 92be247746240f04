use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};
use tracing_subscriber::EnvFilter;

use gaswatch::alarm::notify::{NullSounder, Sounder, TerminalBell};
use gaswatch::app::{App, View};
use gaswatch::events;
use gaswatch::settings::Settings;
use gaswatch::sim::engine::{Engine, RngNoise};
use gaswatch::ui::{self, Theme};

/// Keyboard poll timeout, which also paces the waveform frame rate.
const FRAME_POLL: Duration = Duration::from_millis(33);

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ThemeArg {
    Auto,
    Dark,
    Light,
}

#[derive(Parser, Debug)]
#[command(name = "gaswatch")]
#[command(about = "Simulated anesthesia-machine monitor TUI")]
struct Args {
    /// Vitals tick period in milliseconds (overrides the settings file)
    #[arg(short, long)]
    tick_ms: Option<u64>,

    /// Seed for the noise generator, for reproducible runs
    #[arg(short, long)]
    seed: Option<u64>,

    /// Settings file (TOML or JSON) with alarm-limit overrides
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Append tracing output to this file (the terminal is owned by the TUI)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Disable the terminal bell
    #[arg(long)]
    no_bell: bool,

    /// Theme selection
    #[arg(long, value_enum, default_value_t = ThemeArg::Auto)]
    theme: ThemeArg,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let settings = Settings::load(args.config.as_deref())?;

    if let Some(ref path) = args.log_file {
        init_tracing(path)?;
    }

    let tick_period = Duration::from_millis(args.tick_ms.unwrap_or(settings.tick_ms).max(1));

    // Separate noise streams for the model and the traces so the two
    // drivers stay decoupled; both derive from the seed when given.
    let (engine_noise, wave_noise) = match args.seed {
        Some(seed) => (RngNoise::seeded(seed), RngNoise::seeded(seed.wrapping_add(1))),
        None => (RngNoise::new(), RngNoise::new()),
    };

    let engine = Engine::new(Box::new(engine_noise), tick_period.as_secs_f64());

    let sounder: Box<dyn Sounder> = if args.no_bell {
        Box::new(NullSounder)
    } else {
        Box::new(TerminalBell)
    };

    let theme = match args.theme {
        ThemeArg::Auto => Theme::auto_detect(),
        ThemeArg::Dark => Theme::dark(),
        ThemeArg::Light => Theme::light(),
    };

    let app = App::new(
        engine,
        Box::new(wave_noise),
        sounder,
        settings.limits,
        tick_period,
        theme,
    );

    run_tui(app)
}

/// Set up tracing to append to a file; the TUI owns stdout/stderr.
fn init_tracing(path: &std::path::Path) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

/// Run the TUI with the given app state.
fn run_tui(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let mut last_tick = Instant::now();

    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 70;
    const MIN_HEIGHT: u16 = 20;

    while app.running {
        // Draw UI
        terminal.draw(|frame| {
            let area = frame.area();

            // Check for minimum terminal size
            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let centered =
                    ratatui::layout::Rect::new(0, (area.height / 2).saturating_sub(2), area.width, 5);
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(1), // Tabs
                Constraint::Min(16),   // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            // Render header with patient status
            ui::common::render_header(frame, app, chunks[0]);

            // Render tabs
            ui::common::render_tabs(frame, app, chunks[1]);

            // Render current view
            match app.current_view {
                View::Monitor => render_monitor(frame, app, chunks[2]),
                View::Trends => ui::trends::render(frame, app, chunks[2]),
                View::Alarms => ui::alarms::render(frame, app, chunks[2]),
            }

            // Render status bar
            ui::common::render_status_bar(frame, app, chunks[3]);

            // Render help overlay if active
            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Advance the waveform traces once per frame, decoupled from
        // the vitals tick.
        app.advance_waves();

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(FRAME_POLL)? {
            if let crossterm::event::Event::Key(key) = event {
                events::handle_key_event(app, key);
            }
            // Resize redraws on the next iteration.
        }

        // Run the simulation step on its fixed period
        if last_tick.elapsed() >= app.tick_period {
            app.tick();
            last_tick = Instant::now();
        }

        // Keep the alarm tone loop aligned and fire due bursts
        app.service_audio(Instant::now());
    }

    Ok(())
}

/// The main monitor view: waveforms and cards on top, controls and the
/// alarm strip below.
fn render_monitor(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect) {
    let halves = Layout::vertical([Constraint::Fill(3), Constraint::Fill(2)]).split(area);

    let top = Layout::horizontal([Constraint::Fill(3), Constraint::Fill(2)]).split(halves[0]);
    ui::waves::render(frame, app, top[0]);
    ui::vitals::render_cards(frame, app, top[1]);

    let bottom = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).split(halves[1]);
    let left = Layout::vertical([Constraint::Fill(1), Constraint::Length(3)]).split(bottom[0]);
    ui::controls::render(frame, app, left[0]);
    ui::vitals::render_gases(frame, app, left[1]);
    ui::alarms::render(frame, app, bottom[1]);
}
