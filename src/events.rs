use crate::ScreenSize;

pub enum Event {
    EngineEvent(EngineEvent),
    AppEvent(AppEvent),
}

/// Things that change the board or the simulation clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    TogglePaused,

    /// Advance a single generation
    SkipFrame,

    /// Clear the board and the counters
    Reset,

    /// Grow the grid by one cell in each direction
    ZoomOut,

    /// Shrink the grid by one cell in each direction
    ZoomIn,

    FasterFrames,
    SlowerFrames,

    CycleBoundary,

    /// Reset, then place machine `n` of the catalog
    PlaceMachine(usize),

    /// A click at terminal position `(col, row)`
    Click { col: ScreenSize, row: ScreenSize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    Resize { cols: ScreenSize, rows: ScreenSize },

    /// Exit the application
    Exit,
}
