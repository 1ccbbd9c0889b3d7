//! Rangeslider — dual-handle range slider in the terminal.
//!
//! Loads the host config (file, then command-line overrides), mounts the
//! slider into the host page and runs the event loop until `q`/`Esc`.

use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use rangeslider_tui::app::AppState;
use rangeslider_tui::config::{HostConfig, SliderOverrides};
use rangeslider_tui::{input, logging, ui};

#[derive(Parser)]
#[command(
    name = "rangeslider",
    about = "Rangeslider — pick a low/high range with two handles"
)]
struct Cli {
    /// Config file (defaults to <config dir>/rangeslider/config.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Lower bound of the domain.
    #[arg(long, allow_negative_numbers = true)]
    min: Option<f64>,

    /// Upper bound of the domain.
    #[arg(long, allow_negative_numbers = true)]
    max: Option<f64>,

    /// Step granularity.
    #[arg(long)]
    step: Option<f64>,

    /// Initial value of the min handle.
    #[arg(long, allow_negative_numbers = true)]
    low: Option<f64>,

    /// Initial value of the max handle.
    #[arg(long, allow_negative_numbers = true)]
    high: Option<f64>,

    /// Panel title.
    #[arg(long)]
    label: Option<String>,

    /// Print the mounted element tree as HTML and exit.
    #[arg(long, default_value_t = false)]
    dump_html: bool,

    /// Print the last committed selection as JSON on exit.
    #[arg(long, default_value_t = false)]
    json: bool,
}

impl Cli {
    fn overrides(&self) -> SliderOverrides {
        SliderOverrides {
            minimum: self.min,
            maximum: self.max,
            step: self.step,
            low: self.low,
            high: self.high,
            label: self.label.clone(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = HostConfig::load(cli.config.as_deref()).context("loading config")?;
    config.apply_overrides(&cli.overrides());
    config.validate().context("invalid slider config")?;

    if cli.dump_html {
        let app = AppState::new(&config);
        if !app.slider.is_mounted() {
            let reason = app
                .status_message
                .map(|(msg, _)| msg)
                .unwrap_or_else(|| format!("cannot mount at \"{}\"", config.mount));
            bail!(reason);
        }
        println!("{}", app.document.to_html(app.document.root()));
        return Ok(());
    }

    let log_guard = logging::init();

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!(panic = %info, "panic");
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), DisableMouseCapture, LeaveAlternateScreen);
        default_hook(info);
    }));

    let mut app = AppState::new(&config);
    if let (Some(guard), None) = (&log_guard, &app.status_message) {
        app.set_status(format!("Logging to {}", guard.log_dir().display()));
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the main event loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result?;

    if cli.json {
        println!("{}", serde_json::to_string(&app.last_commit)?);
    }
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render, remembering the areas for mouse hit-testing
        terminal.draw(|f| {
            app.layout = Some(ui::compute_layout(f.area()));
            ui::draw(f, app);
        })?;

        // 2. Drain commits forwarded by the change callback (non-blocking)
        app.drain_commits();

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => input::handle_key(app, key),
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                _ => {}
            }
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    app.drain_commits();
    Ok(())
}
