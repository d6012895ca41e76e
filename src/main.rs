use std::io;
use std::io::Write;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use std::time::Instant;

use anyhow::Context;
use crossterm::cursor;
use crossterm::event;
use crossterm::execute;
use crossterm::queue;
use crossterm::style;
use crossterm::terminal;
use tracing::error;
use tracing::info;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use lifegrid::ScreenSize;
use lifegrid::camera;
use lifegrid::camera::Camera;
use lifegrid::catalog::Catalog;
use lifegrid::config::Config;
use lifegrid::events::AppEvent;
use lifegrid::events::EngineEvent;
use lifegrid::events::Event;
use lifegrid::game::Game;
use lifegrid::io::convert_event;
use lifegrid::step::Diff;

const FRAMERATE: u32 = 60;
const FRAMETIME: Duration = Duration::from_millis(1_000 / FRAMERATE as u64);

/// Status line and machine list
const HEADER_ROWS: ScreenSize = 2;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they can be redirected away from the grid
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = Config {
        catalog: std::env::args().nth(1).map(PathBuf::from),
        ..Config::default()
    };

    let catalog = match &config.catalog {
        Some(path) => Catalog::load(path),
        None => Catalog::builtin(),
    }
    .inspect_err(|e| error!("{e}"))
    .context("Failed to load the pattern catalog")?;

    info!(machines = catalog.count(), "starting");
    let mut game = Game::new(&config, catalog);

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        terminal::EnterAlternateScreen,
        event::EnableMouseCapture,
        cursor::Hide
    )?;

    let res = run(&mut game, &mut stdout);

    execute!(
        stdout,
        cursor::Show,
        event::DisableMouseCapture,
        terminal::LeaveAlternateScreen
    )?;
    terminal::disable_raw_mode()?;

    res
}

fn run<W: Write>(game: &mut Game, out: &mut W) -> anyhow::Result<()> {
    let (cols, rows) = terminal::size()?;
    let mut cam = Camera::new(cols, rows, HEADER_ROWS);

    // The whole grid has to be drawn on the first frame
    let mut redraw = true;

    loop {
        let t = Instant::now();

        // Poll event for as long as FRAMETIME
        let event = if event::poll(FRAMETIME)? {
            convert_event(event::read()?)
        } else {
            None
        };

        match event {
            None => {}
            Some(Event::AppEvent(AppEvent::Exit)) => break,
            Some(Event::AppEvent(AppEvent::Resize { cols, rows })) => {
                cam.resize(cols, rows);
                redraw = true;
            }
            Some(Event::EngineEvent(event)) => {
                redraw |= handle_event(game, &cam, event);
            }
        }

        let diff = game.tick(Instant::now());

        if redraw {
            draw_grid(out, &mut cam, game)?;
            redraw = false;
        } else if let Some(diff) = diff {
            draw_diff(out, &mut cam, &diff)?;
        }

        draw_header(out, game)?;
        out.flush()?;

        let time_left = FRAMETIME.saturating_sub(t.elapsed());
        thread::sleep(time_left);
    }

    Ok(())
}

/// Returns true if the whole grid needs redrawing
fn handle_event(game: &mut Game, cam: &Camera, event: EngineEvent) -> bool {
    match event {
        EngineEvent::TogglePaused => game.toggle_paused(),
        EngineEvent::SkipFrame => game.skip_frame(),
        EngineEvent::CycleBoundary => {
            game.cycle_boundary();
        }
        EngineEvent::FasterFrames => {
            let delay = game.frame_delay().saturating_sub(Config::FRAME_DELAY_STEP);
            game.set_frame_delay(delay);
        }
        EngineEvent::SlowerFrames => {
            let delay = game.frame_delay() + Config::FRAME_DELAY_STEP;
            game.set_frame_delay(delay);
        }
        EngineEvent::Reset => {
            game.reset();
            return true;
        }
        EngineEvent::ZoomOut => {
            game.zoom(true);
            return true;
        }
        EngineEvent::ZoomIn => {
            game.zoom(false);
            return true;
        }
        EngineEvent::PlaceMachine(index) => match game.place_machine(index) {
            Ok(()) => return true,
            Err(e) => warn!("{e}"),
        },
        EngineEvent::Click { col, row } => {
            if let Some(p) = cam.cell_at(col, row) {
                return game.toggle(p.x, p.y);
            }
        }
    }

    false
}

fn draw_grid<W: Write>(out: &mut W, cam: &mut Camera, game: &Game) -> io::Result<()> {
    let top = cam.top();

    cam.draw(game.board());
    queue!(out, terminal::Clear(terminal::ClearType::All))?;

    for (i, line) in cam.render().lines().enumerate() {
        queue!(
            out,
            cursor::MoveTo(0, top + i as ScreenSize),
            style::Print(line)
        )?;
    }

    Ok(())
}

/// Only redraw the cells that changed
fn draw_diff<W: Write>(out: &mut W, cam: &mut Camera, diff: &Diff) -> io::Result<()> {
    cam.apply(diff);

    for (p, alive) in diff.changes() {
        let Some((col, row)) = cam.screen_pos(p) else {
            continue;
        };

        queue!(
            out,
            cursor::MoveTo(col, row),
            style::Print(camera::glyph(alive))
        )?;
    }

    Ok(())
}

fn draw_header<W: Write>(out: &mut W, game: &Game) -> io::Result<()> {
    queue!(
        out,
        cursor::MoveTo(0, 0),
        terminal::Clear(terminal::ClearType::CurrentLine),
        style::Print(camera::status_line(game)),
        cursor::MoveTo(0, 1),
        terminal::Clear(terminal::ClearType::CurrentLine),
        style::Print(camera::machine_line(game))
    )
}
