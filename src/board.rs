use std::collections::HashSet;
use std::fmt;

use tracing::debug;

use crate::Coord;
use crate::config::Config;
use crate::config::SizeBounds;
use crate::pattern::Pattern;
use crate::point::Point;
use crate::step;
use crate::step::Boundary;
use crate::step::Diff;

/// The set of live cells, and the extent of the grid they are viewed through.
///
/// Live cells are stored sparsely. They are allowed to sit outside `[0, width) x [0, height)`:
/// shrinking the grid hides cells but never deletes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: Coord,
    height: Coord,
    bounds: SizeBounds,
    live: HashSet<Point>,
}

impl Board {
    /// Create an empty board. Both dimensions are pinned into `bounds`.
    pub fn new(width: Coord, height: Coord, bounds: SizeBounds) -> Self {
        Self {
            width: bounds.clamp(width),
            height: bounds.clamp(height),
            bounds,
            live: HashSet::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.width, config.height, config.bounds)
    }

    pub fn width(&self) -> Coord {
        self.width
    }

    pub fn height(&self) -> Coord {
        self.height
    }

    pub fn bounds(&self) -> SizeBounds {
        self.bounds
    }

    /// Whether `(x, y)` lies on the grid.
    pub fn contains(&self, x: Coord, y: Coord) -> bool {
        (0..self.width).contains(&x) && (0..self.height).contains(&y)
    }

    /// Any coordinate may be queried, on the grid or not.
    pub fn is_alive(&self, x: Coord, y: Coord) -> bool {
        self.live.contains(&Point::new(x, y))
    }

    pub fn toggle(&mut self, x: Coord, y: Coord) {
        let p = Point::new(x, y);

        if !self.live.remove(&p) {
            self.live.insert(p);
        }
    }

    pub fn set_alive(&mut self, x: Coord, y: Coord) {
        self.live.insert(Point::new(x, y));
    }

    pub fn clear(&mut self) {
        self.live.clear();
    }

    /// Change the grid extent. Requests outside the configured bounds are pinned to the nearest
    /// bound. Live cells stay where they are.
    pub fn resize(&mut self, width: Coord, height: Coord) {
        let (w, h) = (self.bounds.clamp(width), self.bounds.clamp(height));

        if (w, h) != (width, height) {
            debug!(width, height, w, h, "grid size clamped");
        }

        self.width = w;
        self.height = h;
    }

    /// Grow (or shrink, for negative `delta`) both dimensions at once.
    pub fn grow(&mut self, delta: Coord) {
        self.resize(
            self.width.saturating_add(delta),
            self.height.saturating_add(delta),
        );
    }

    /// Set `(anchor_x + j, anchor_y + i)` alive for every live cell `(j, i)` of `pattern`.
    pub fn stamp(&mut self, pattern: &Pattern, anchor_x: Coord, anchor_y: Coord) {
        for Point { x, y } in pattern.live_offsets() {
            self.set_alive(anchor_x + x, anchor_y + y);
        }
    }

    /// Where `pattern` has to be anchored for it to sit in the middle of the grid.
    pub fn centered_anchor(&self, pattern: &Pattern) -> Point {
        Point::new(
            self.width / 2 - pattern.width() / 2,
            self.height / 2 - pattern.height() / 2,
        )
    }

    pub fn stamp_centered(&mut self, pattern: &Pattern) {
        let Point { x, y } = self.centered_anchor(pattern);
        self.stamp(pattern, x, y);
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Every live cell, in no particular order.
    pub fn live_cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.live.iter().copied()
    }

    /// Live cells that lie on the grid.
    pub fn visible_cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.live_cells().filter(|p| self.contains(p.x, p.y))
    }

    pub(crate) fn live(&self) -> &HashSet<Point> {
        &self.live
    }

    /// Advance one generation. The next generation is computed in full before it replaces the
    /// current one.
    pub fn step(&mut self, boundary: Boundary) -> Diff {
        let next = step::next_generation(self, boundary);
        self.live = next.live;

        next.diff
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            if y > 0 {
                writeln!(f)?;
            }

            for x in 0..self.width {
                let c = if self.is_alive(x, y) { 'X' } else { '.' };
                write!(f, "{c}")?;
            }
        }

        Ok(())
    }
}
