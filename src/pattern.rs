use crate::Coord;
use crate::point::Point;

/// A named, fixed-size stamp of live cells. Also called a machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    name: String,
    width: Coord,
    height: Coord,

    /// Row-major, `height * width` entries
    template: Vec<bool>,
}

impl Pattern {
    /// Create a pattern from a row-major template.
    ///
    /// # Panics
    /// If the dimensions are not positive, or if `template` does not hold exactly `width * height`
    /// entries.
    pub fn new(name: impl Into<String>, width: Coord, height: Coord, template: Vec<bool>) -> Self {
        assert!(width > 0 && height > 0, "pattern dimensions must be positive");
        assert_eq!(
            template.len(),
            (width * height) as usize,
            "template size does not match dimensions"
        );

        Self {
            name: name.into(),
            width,
            height,
            template,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> Coord {
        self.width
    }

    pub fn height(&self) -> Coord {
        self.height
    }

    /// Whether the relative cell `(x, y)` is alive. Anything outside the pattern is dead.
    pub fn is_alive(&self, x: Coord, y: Coord) -> bool {
        if !(0..self.width).contains(&x) || !(0..self.height).contains(&y) {
            return false;
        }

        self.template[(y * self.width + x) as usize]
    }

    /// Relative offsets of every live cell, row by row.
    pub fn live_offsets(&self) -> impl Iterator<Item = Point> + '_ {
        self.template
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(|(i, _)| {
                let i = i as Coord;
                Point::new(i % self.width, i / self.width)
            })
    }

    pub fn population(&self) -> usize {
        self.template.iter().filter(|&&alive| alive).count()
    }
}
