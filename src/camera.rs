use crate::Coord;
use crate::ScreenSize;
use crate::board::Board;
use crate::game::Game;
use crate::point::Point;
use crate::step::Diff;

/// Terminal columns taken by a single cell. Cells are drawn two columns wide so that they come
/// out roughly square.
pub const CELL_COLS: ScreenSize = 2;

pub const ALIVE: &str = "██";
pub const DEAD: &str = "░░";

/// Turns a [`Board`] into lines of text, and terminal positions back into cells.
///
/// The grid is drawn below `top` header rows, starting at the first column. Whatever does not fit
/// in the terminal is clipped.
pub struct Camera {
    /// The cell buffer
    cb: Vec<bool>,

    /// The frame buffer
    fb: String,

    /// Width of the grid, in cells
    w: usize,

    /// Height of the grid, in cells
    h: usize,

    /// Rows above the grid
    top: ScreenSize,

    /// Terminal size
    cols: ScreenSize,
    rows: ScreenSize,
}

impl Camera {
    pub fn new(cols: ScreenSize, rows: ScreenSize, top: ScreenSize) -> Self {
        Self {
            cb: Vec::new(),
            fb: String::new(),
            w: 0,
            h: 0,
            top,
            cols,
            rows,
        }
    }

    /// The terminal was resized
    pub fn resize(&mut self, cols: ScreenSize, rows: ScreenSize) {
        self.cols = cols;
        self.rows = rows;
    }

    pub fn top(&self) -> ScreenSize {
        self.top
    }

    /// Copy the visible part of `board` into the cell buffer.
    pub fn draw(&mut self, board: &Board) {
        self.w = board.width() as usize;
        self.h = board.height() as usize;

        self.cb.clear();
        self.cb.resize(self.w * self.h, false);

        for Point { x, y } in board.visible_cells() {
            let i = self.xy_from(x as usize, y as usize);
            self.cb[i] = true;
        }
    }

    /// Update the cell buffer with the cells that changed in a step.
    pub fn apply(&mut self, diff: &Diff) {
        for (p, alive) in diff.changes() {
            if let Some(i) = self.index(p) {
                self.cb[i] = alive;
            }
        }
    }

    /// Render every row of the cell buffer that fits in the terminal.
    pub fn render(&mut self) -> &str {
        let (vw, vh) = self.visible_size();

        self.fb.clear();

        for y in 0..vh {
            if y > 0 {
                self.fb.push('\n');
            }

            for x in 0..vw {
                let alive = self.cb[self.xy_from(x, y)];
                self.fb.push_str(glyph(alive));
            }
        }

        &self.fb
    }

    /// Terminal position of the top-left column of cell `p`, if it is on screen.
    pub fn screen_pos(&self, p: Point) -> Option<(ScreenSize, ScreenSize)> {
        let (vw, vh) = self.visible_size();

        let (x, y) = (usize::try_from(p.x).ok()?, usize::try_from(p.y).ok()?);
        if x >= vw || y >= vh {
            return None;
        }

        Some((x as ScreenSize * CELL_COLS, y as ScreenSize + self.top))
    }

    /// The cell drawn at terminal position `(col, row)`, if any.
    pub fn cell_at(&self, col: ScreenSize, row: ScreenSize) -> Option<Point> {
        let (vw, vh) = self.visible_size();

        let row = row.checked_sub(self.top)?;
        let (x, y) = ((col / CELL_COLS) as usize, row as usize);

        if x >= vw || y >= vh {
            return None;
        }

        Some(Point::new(x as Coord, y as Coord))
    }

    /// Grid cells that fit in the terminal, horizontally and vertically
    fn visible_size(&self) -> (usize, usize) {
        let cols = (self.cols / CELL_COLS) as usize;
        let rows = self.rows.saturating_sub(self.top) as usize;

        (self.w.min(cols), self.h.min(rows))
    }

    fn index(&self, p: Point) -> Option<usize> {
        let (x, y) = (usize::try_from(p.x).ok()?, usize::try_from(p.y).ok()?);

        (x < self.w && y < self.h).then(|| self.xy_from(x, y))
    }

    fn xy_from(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }
}

pub fn glyph(alive: bool) -> &'static str {
    if alive { ALIVE } else { DEAD }
}

/// The line of counters shown above the grid.
pub fn status_line(game: &Game) -> String {
    let state = if game.is_paused() { "paused" } else { "running" };

    format!(
        "{state} | generation {} | cells {} | {} steps/s | {}s | {} | delay {}ms | {}x{}",
        game.generation(),
        game.live_count(),
        game.steps_per_second(),
        game.running_time().as_secs(),
        game.boundary().label(),
        game.frame_delay().as_millis(),
        game.board().width(),
        game.board().height(),
    )
}

/// The line listing the machines and the key that places each.
pub fn machine_line(game: &Game) -> String {
    let machines: Vec<String> = game
        .catalog()
        .iter()
        .take(9)
        .enumerate()
        .map(|(i, p)| format!("{} {}", i + 1, p.name()))
        .collect();

    format!("machines: {}", machines.join("  "))
}

#[cfg(test)]
mod test {
    use super::Camera;
    use crate::board::Board;
    use crate::catalog::Catalog;
    use crate::config::Config;
    use crate::config::SizeBounds;
    use crate::game::Game;
    use crate::point::Point;
    use crate::step::Boundary;

    fn blinker() -> Board {
        let mut b = Board::new(5, 5, SizeBounds::default());
        b.set_alive(1, 2);
        b.set_alive(2, 2);
        b.set_alive(3, 2);

        b
    }

    #[test]
    fn render_board() {
        let mut cam = Camera::new(80, 24, 2);
        cam.draw(&blinker());

        insta::assert_snapshot!(cam.render(), @r"
        ░░░░░░░░░░
        ░░░░░░░░░░
        ░░██████░░
        ░░░░░░░░░░
        ░░░░░░░░░░
        ");
    }

    #[test]
    fn apply_diff_matches_full_redraw() {
        let mut board = blinker();
        let mut cam = Camera::new(80, 24, 2);
        cam.draw(&board);

        let diff = board.step(Boundary::Clamped);
        cam.apply(&diff);
        let incremental = cam.render().to_string();

        cam.draw(&board);
        assert_eq!(cam.render(), incremental);
    }

    #[test]
    fn render_clips_to_terminal() {
        let mut cam = Camera::new(6, 4, 2);
        cam.draw(&blinker());

        insta::assert_snapshot!(cam.render(), @r"
        ░░░░░░
        ░░░░░░
        ");
    }

    #[test]
    fn cell_at_and_screen_pos() {
        let mut cam = Camera::new(80, 24, 2);
        cam.draw(&blinker());

        assert_eq!(cam.cell_at(0, 2), Some(Point::new(0, 0)));
        assert_eq!(cam.cell_at(7, 4), Some(Point::new(3, 2)));
        assert_eq!(cam.cell_at(7, 1), None);
        assert_eq!(cam.cell_at(10, 2), None);
        assert_eq!(cam.cell_at(0, 7), None);

        assert_eq!(cam.screen_pos(Point::new(3, 2)), Some((6, 4)));
        assert_eq!(cam.screen_pos(Point::new(-1, 2)), None);
        assert_eq!(cam.screen_pos(Point::new(5, 0)), None);
    }

    #[test]
    fn status_and_machines() {
        let catalog = Catalog::parse("Blinker 3 1 X X X Block 2 2 X X X X").unwrap();
        let game = Game::new(&Config::default(), catalog);

        assert_eq!(
            super::status_line(&game),
            "paused | generation 0 | cells 0 | 0 steps/s | 0s | clamped | delay 100ms | 50x50"
        );
        assert_eq!(super::machine_line(&game), "machines: 1 Blinker  2 Block");
    }
}
