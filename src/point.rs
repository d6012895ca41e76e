use core::fmt::Debug;

use crate::Coord;

/// A cell coordinate on the board. `x` grows to the right and `y` grows downwards.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: Coord,
    pub y: Coord,
}

impl Point {
    pub const fn new(x: Coord, y: Coord) -> Self {
        Point { x, y }
    }

    /// The 3x3 block centered on this point, itself included.
    pub fn block(&self) -> impl Iterator<Item = Point> + use<> {
        let Point { x, y } = *self;

        (-1..=1).flat_map(move |dy| (-1..=1).map(move |dx| Point::new(x + dx, y + dy)))
    }

    /// The 8 points surrounding this one.
    pub fn neighbors(&self) -> impl Iterator<Item = Point> + use<> {
        let center = *self;

        self.block().filter(move |p| *p != center)
    }
}

impl From<(Coord, Coord)> for Point {
    fn from((x, y): (Coord, Coord)) -> Self {
        Point { x, y }
    }
}

impl Debug for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
