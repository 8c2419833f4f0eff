use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use pippin::app::{App, AppControl};
use pippin::audio::TerminalAudio;
use pippin::build_info;
use pippin::config::{parse_args, CliCommand, Config, USAGE};
use pippin::core::constants::FRAME_MS;
use pippin::leaderboard::HttpLeaderboard;
use pippin::logging;
use pippin::ui;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

type Tui = Terminal<CrosstermBackend<Stdout>>;

fn main() -> io::Result<()> {
    // Handle CLI arguments
    let overrides = match parse_args(std::env::args().skip(1)) {
        Ok(CliCommand::Run(overrides)) => overrides,
        Ok(CliCommand::Version) => {
            println!("{}", build_info::version_line());
            std::process::exit(0);
        }
        Ok(CliCommand::Help) => {
            println!("{}", USAGE);
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Run 'pippin --help' for usage.");
            std::process::exit(1);
        }
    };

    if let Err(e) = logging::init() {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let mut config = Config::load();
    config.apply_overrides(&overrides);
    log::info!("starting {} with {:?}", build_info::version_line(), config);

    let leaderboard = HttpLeaderboard::new(config.leaderboard_url.clone());
    let audio = TerminalAudio::new(false);
    let mut app = App::new(config, audio, leaderboard);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    // Restore terminal even when the loop failed
    disable_raw_mode()?;
    terminal.backend_mut().execute(DisableMouseCapture)?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        log::error!("exiting after error: {}", e);
    }
    result
}

fn run<A, L>(terminal: &mut Tui, app: &mut App<A, L>) -> io::Result<()>
where
    A: pippin::audio::AudioService,
    L: pippin::leaderboard::Leaderboard,
{
    let mut last_tick = Instant::now();

    loop {
        let mut projection = None;
        terminal.draw(|frame| {
            projection = Some(ui::draw(frame, app.scene(), app.modal()));
        })?;

        // Drain input until the next frame is due
        let frame = Duration::from_millis(FRAME_MS);
        while let Some(remaining) = frame.checked_sub(last_tick.elapsed()) {
            if !event::poll(remaining)? {
                break;
            }
            let event = event::read()?;
            if let Some(projection) = projection.as_ref() {
                if app.handle_event(&event, projection) == AppControl::Quit {
                    log::info!("quit");
                    return Ok(());
                }
            }
        }

        let now = Instant::now();
        let dt_ms = now.duration_since(last_tick).as_millis() as u64;
        last_tick = now;
        app.tick(dt_ms);
    }
}
