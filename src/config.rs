use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::Coord;
use crate::step::Boundary;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid size bounds [{min}, {max}]: expected 1 <= min <= max")]
    InvalidBounds { min: Coord, max: Coord },
}

/// Inclusive range that both grid dimensions are pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeBounds {
    min: Coord,
    max: Coord,
}

impl Default for SizeBounds {
    fn default() -> Self {
        Self {
            min: Config::MIN_SIZE,
            max: Config::MAX_SIZE,
        }
    }
}

impl SizeBounds {
    pub fn new(min: Coord, max: Coord) -> Result<Self, ConfigError> {
        if min < 1 || min > max {
            return Err(ConfigError::InvalidBounds { min, max });
        }

        Ok(Self { min, max })
    }

    pub fn min(&self) -> Coord {
        self.min
    }

    pub fn max(&self) -> Coord {
        self.max
    }

    /// Pin `n` into `[min, max]`.
    pub fn clamp(&self, n: Coord) -> Coord {
        n.clamp(self.min, self.max)
    }
}

/// Everything needed to set up a board and the driver around it.
#[derive(Debug, Clone)]
pub struct Config {
    pub bounds: SizeBounds,

    /// Initial grid width, clamped into `bounds` on use
    pub width: Coord,

    /// Initial grid height, clamped into `bounds` on use
    pub height: Coord,

    pub boundary: Boundary,

    /// Minimum time between two generations while running
    pub frame_delay: Duration,

    /// Pattern catalog to load instead of the bundled one
    pub catalog: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bounds: SizeBounds::default(),
            width: Self::DEFAULT_SIZE,
            height: Self::DEFAULT_SIZE,
            boundary: Boundary::default(),
            frame_delay: Self::FRAME_DELAY,
            catalog: None,
        }
    }
}

impl Config {
    pub const MIN_SIZE: Coord = 5;
    pub const MAX_SIZE: Coord = 100;
    pub const DEFAULT_SIZE: Coord = 50;

    pub const FRAME_DELAY: Duration = Duration::from_millis(100);

    /// How much `[` and `]` change the frame delay by
    pub const FRAME_DELAY_STEP: Duration = Duration::from_millis(10);
}
