use std::time::Duration;
use std::time::Instant;

use tracing::debug;

use crate::Coord;
use crate::board::Board;
use crate::catalog::Catalog;
use crate::catalog::CatalogError;
use crate::config::Config;
use crate::step::Boundary;
use crate::step::Diff;

const SECOND: Duration = Duration::from_secs(1);

/// Simulation clock. None of this is board state.
#[derive(Debug)]
struct Clock {
    frame_delay: Duration,
    paused: bool,

    /// Step once on the next tick, even when paused
    skip_frame: bool,

    generation: u64,

    /// Whole seconds spent running
    running_time: Duration,

    steps_this_second: u32,
    steps_per_second: u32,

    // Both are set on the first tick
    last_step: Option<Instant>,
    second_start: Option<Instant>,
}

impl Clock {
    fn new(frame_delay: Duration) -> Self {
        Self {
            frame_delay,
            paused: true,
            skip_frame: false,
            generation: 0,
            running_time: Duration::ZERO,
            steps_this_second: 0,
            steps_per_second: 0,
            last_step: None,
            second_start: None,
        }
    }

    /// Whether a generation is due at `now`.
    fn due(&mut self, now: Instant) -> bool {
        let last_step = *self.last_step.get_or_insert(now);

        let running = !self.paused && now.duration_since(last_step) >= self.frame_delay;

        running || self.skip_frame
    }

    fn stepped(&mut self, now: Instant) {
        self.generation += 1;
        self.steps_this_second += 1;
        self.skip_frame = false;
        self.last_step = Some(now);
    }

    /// Roll the per-second counters over once a second has gone by.
    fn roll_second(&mut self, now: Instant) {
        let second_start = *self.second_start.get_or_insert(now);

        if now.duration_since(second_start) < SECOND {
            return;
        }

        if !self.paused {
            self.running_time += SECOND;
        }

        self.steps_per_second = self.steps_this_second;
        self.steps_this_second = 0;
        self.second_start = Some(now);
    }

    fn reset(&mut self) {
        self.paused = true;
        self.skip_frame = false;
        self.generation = 0;
        self.running_time = Duration::ZERO;
    }
}

/// Drives a [`Board`]: owns it along with the pattern catalog and the simulation clock.
///
/// The caller decides how often to call [`Game::tick`], and the game decides whether a new
/// generation is due.
#[derive(Debug)]
pub struct Game {
    board: Board,
    catalog: Catalog,
    boundary: Boundary,
    clock: Clock,
}

impl Game {
    /// A new, paused game on an empty board.
    pub fn new(config: &Config, catalog: Catalog) -> Self {
        Self {
            board: Board::from_config(config),
            catalog,
            boundary: config.boundary,
            clock: Clock::new(config.frame_delay),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    pub fn set_boundary(&mut self, boundary: Boundary) {
        self.boundary = boundary;
    }

    /// Switch to the next boundary policy and return it.
    pub fn cycle_boundary(&mut self) -> Boundary {
        self.boundary = self.boundary.next();
        debug!(boundary = self.boundary.label(), "boundary changed");

        self.boundary
    }

    /// Advance the clock to `now`, stepping the board if a generation is due. Returns the cells
    /// that changed when it did.
    pub fn tick(&mut self, now: Instant) -> Option<Diff> {
        let diff = if self.clock.due(now) {
            let diff = self.board.step(self.boundary);
            self.clock.stepped(now);

            Some(diff)
        } else {
            None
        };

        self.clock.roll_second(now);

        diff
    }

    pub fn is_paused(&self) -> bool {
        self.clock.paused
    }

    pub fn toggle_paused(&mut self) {
        self.clock.paused = !self.clock.paused;
    }

    /// Step exactly once on the next tick.
    pub fn skip_frame(&mut self) {
        self.clock.skip_frame = true;
    }

    pub fn frame_delay(&self) -> Duration {
        self.clock.frame_delay
    }

    pub fn set_frame_delay(&mut self, delay: Duration) {
        self.clock.frame_delay = delay;
    }

    /// Clear the board, zero the counters and pause.
    pub fn reset(&mut self) {
        self.board.clear();
        self.clock.reset();
    }

    /// Reset, then stamp machine `index` in the middle of the grid. Nothing changes if `index` is
    /// out of range.
    pub fn place_machine(&mut self, index: usize) -> Result<(), CatalogError> {
        self.catalog.get(index)?;
        self.reset();

        let pattern = self.catalog.get(index)?;
        self.board.stamp_centered(pattern);
        debug!(name = pattern.name(), "machine placed");

        Ok(())
    }

    /// Toggle a cell on the grid. Coordinates off the grid are ignored.
    pub fn toggle(&mut self, x: Coord, y: Coord) -> bool {
        if !self.board.contains(x, y) {
            return false;
        }

        self.board.toggle(x, y);
        true
    }

    /// Show one more (`out`) or one less cell in each direction.
    pub fn zoom(&mut self, out: bool) {
        self.board.grow(if out { 1 } else { -1 });
    }

    pub fn generation(&self) -> u64 {
        self.clock.generation
    }

    /// Generations computed during the last whole second
    pub fn steps_per_second(&self) -> u32 {
        self.clock.steps_per_second
    }

    pub fn running_time(&self) -> Duration {
        self.clock.running_time
    }

    pub fn live_count(&self) -> usize {
        self.board.live_count()
    }
}
