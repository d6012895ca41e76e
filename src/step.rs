//! A live cell dies if it has fewer than two live neighbors.
//! A live cell with two or three live neighbors lives on to the next generation.
//! A live cell with more than three live neighbors dies.
//! A dead cell will be brought back to live if it has exactly three live neighbors.

use std::collections::HashSet;

use crate::Coord;
use crate::board::Board;
use crate::point::Point;

/// How the edges of the grid behave.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Everything outside the grid is permanently dead. Cells outside the grid are never born,
    /// and any left there by a resize die on the next step.
    #[default]
    Clamped,

    /// The grid is a torus: each edge is adjacent to the opposite one. Cells left outside the
    /// grid by a resize are not part of the torus and die on the next step.
    Wrapped,

    /// The grid is a window onto an infinite plane. Cells outside of it keep evolving.
    Unbounded,
}

impl Boundary {
    /// Where `p` lives under this policy, or `None` if it is permanently dead.
    pub fn normalize(self, board: &Board, p: Point) -> Option<Point> {
        match self {
            Boundary::Clamped => board.contains(p.x, p.y).then_some(p),
            Boundary::Wrapped => Some(Point::new(
                p.x.rem_euclid(board.width()),
                p.y.rem_euclid(board.height()),
            )),
            Boundary::Unbounded => Some(p),
        }
    }

    /// Clamped -> Wrapped -> Unbounded -> Clamped
    pub fn next(self) -> Self {
        match self {
            Boundary::Clamped => Boundary::Wrapped,
            Boundary::Wrapped => Boundary::Unbounded,
            Boundary::Unbounded => Boundary::Clamped,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Boundary::Clamped => "clamped",
            Boundary::Wrapped => "wrapped",
            Boundary::Unbounded => "unbounded",
        }
    }
}

/// On-grid cells whose state flipped during a step. This is what needs redrawing.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Diff {
    /// Cells that came alive, sorted
    pub born: Vec<Point>,

    /// Cells that died, sorted
    pub died: Vec<Point>,
}

impl Diff {
    pub fn is_empty(&self) -> bool {
        self.born.is_empty() && self.died.is_empty()
    }

    pub fn len(&self) -> usize {
        self.born.len() + self.died.len()
    }

    /// Every changed cell along with its new state.
    pub fn changes(&self) -> impl Iterator<Item = (Point, bool)> + '_ {
        let born = self.born.iter().map(|&p| (p, true));
        let died = self.died.iter().map(|&p| (p, false));

        born.chain(died)
    }
}

/// The result of a step, before it is applied to a board.
#[derive(Debug, Clone)]
pub struct Generation {
    pub live: HashSet<Point>,
    pub diff: Diff,
}

/// Count the live neighbors of `(x, y)`, following `boundary` for coordinates off the grid.
pub fn neighbors(board: &Board, x: Coord, y: Coord, boundary: Boundary) -> u8 {
    Point::new(x, y)
        .neighbors()
        .filter_map(|p| boundary.normalize(board, p))
        .filter(|p| board.is_alive(p.x, p.y))
        .count() as u8
}

fn rule(alive: bool, neighbors: u8) -> bool {
    matches!((alive, neighbors), (true, 2 | 3) | (false, 3))
}

/// Compute the generation following `board`.
///
/// Only live cells and their neighbors can change, so those are the only cells looked at. Every
/// lookup is made against `board`, which is left untouched.
pub fn next_generation(board: &Board, boundary: Boundary) -> Generation {
    let candidates: HashSet<Point> = board
        .live()
        .iter()
        .flat_map(|p| p.block())
        .filter_map(|p| boundary.normalize(board, p))
        .collect();

    let live: HashSet<Point> = candidates
        .into_iter()
        .filter(|p| {
            let n = neighbors(board, p.x, p.y, boundary);
            rule(board.is_alive(p.x, p.y), n)
        })
        .collect();

    let visible = |p: &&Point| board.contains(p.x, p.y);

    let mut born: Vec<Point> = live.difference(board.live()).filter(visible).copied().collect();
    let mut died: Vec<Point> = board.live().difference(&live).filter(visible).copied().collect();

    born.sort_unstable();
    died.sort_unstable();

    Generation {
        live,
        diff: Diff { born, died },
    }
}

#[cfg(test)]
mod test {
    use super::Boundary;
    use super::neighbors;
    use super::next_generation;
    use super::rule;
    use crate::board::Board;
    use crate::config::SizeBounds;
    use crate::point::Point;

    fn board(w: i32, h: i32, cells: &[(i32, i32)]) -> Board {
        let mut b = Board::new(w, h, SizeBounds::default());
        for &(x, y) in cells {
            b.set_alive(x, y);
        }

        b
    }

    #[test]
    fn rule_table() {
        for n in 0..=8 {
            assert_eq!(rule(true, n), n == 2 || n == 3, "alive with {n}");
            assert_eq!(rule(false, n), n == 3, "dead with {n}");
        }
    }

    #[test]
    fn neighbors_in_the_middle() {
        let b = board(10, 10, &[(4, 4), (5, 4), (6, 4), (5, 5)]);

        assert_eq!(neighbors(&b, 5, 4, Boundary::Clamped), 3);
        assert_eq!(neighbors(&b, 5, 3, Boundary::Clamped), 3);
        assert_eq!(neighbors(&b, 0, 0, Boundary::Clamped), 0);
    }

    #[test]
    fn wrapped_edges_touch() {
        let b = board(10, 10, &[(9, 5), (0, 4), (0, 6)]);

        assert_eq!(neighbors(&b, 0, 5, Boundary::Wrapped), 3);
        assert_eq!(neighbors(&b, 0, 5, Boundary::Clamped), 2);
    }

    #[test]
    fn clamped_never_births_off_grid() {
        // Three cells along the top edge would give birth above it on an infinite plane
        let b = board(10, 10, &[(4, 0), (5, 0), (6, 0)]);

        let next = next_generation(&b, Boundary::Clamped);

        assert!(!next.live.contains(&Point::new(5, -1)));
        assert!(next.live.contains(&Point::new(5, 1)));
    }

    #[test]
    fn unbounded_births_off_grid_without_reporting_them() {
        let b = board(10, 10, &[(4, 0), (5, 0), (6, 0)]);

        let next = next_generation(&b, Boundary::Unbounded);

        assert!(next.live.contains(&Point::new(5, -1)));
        assert_eq!(next.diff.born, [Point::new(5, 1)]);
        assert_eq!(next.diff.died, [Point::new(4, 0), Point::new(6, 0)]);
    }

    #[test]
    fn wrapped_blinker_across_the_seam() {
        // Vertical blinker through the left edge becomes a horizontal one split over both edges
        let b = board(10, 10, &[(0, 4), (0, 5), (0, 6)]);

        let next = next_generation(&b, Boundary::Wrapped);

        let mut live: Vec<_> = next.live.into_iter().collect();
        live.sort();
        assert_eq!(live, [Point::new(0, 5), Point::new(1, 5), Point::new(9, 5)]);
    }

    #[test]
    fn stray_cells_die_on_bounded_grids() {
        let mut b = board(20, 20, &[(15, 15), (16, 15), (15, 16), (16, 16)]);
        b.resize(10, 10);

        for boundary in [Boundary::Clamped, Boundary::Wrapped] {
            let next = next_generation(&b, boundary);

            assert!(next.live.is_empty(), "{boundary:?}");
            assert!(next.diff.is_empty(), "{boundary:?}");
        }

        let next = next_generation(&b, Boundary::Unbounded);
        assert_eq!(next.live.len(), 4);
    }

    #[test]
    fn diff_changes() {
        let b = board(10, 10, &[(4, 5), (5, 5), (6, 5)]);

        let diff = next_generation(&b, Boundary::Clamped).diff;

        assert_eq!(diff.len(), 4);
        let changes: Vec<_> = diff.changes().collect();
        assert_eq!(
            changes,
            [
                (Point::new(5, 4), true),
                (Point::new(5, 6), true),
                (Point::new(4, 5), false),
                (Point::new(6, 5), false),
            ]
        );
    }

    #[test]
    fn boundary_cycle() {
        let b = Boundary::default();

        assert_eq!(b, Boundary::Clamped);
        assert_eq!(b.next().next().next(), b);
    }
}
