pub mod board;
pub mod camera;
pub mod catalog;
pub mod config;
pub mod events;
pub mod game;
pub mod io;
pub mod pattern;
pub mod point;
pub mod step;

mod parse_util;

/// A single coordinate (or dimension) on the board
pub type Coord = i32;

/// Terminal columns and rows
pub type ScreenSize = u16;
