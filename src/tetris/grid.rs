//! Logical Tetris grid.
//!
//! Pure state plus rules, no browser types: the session module feeds it timer
//! ticks and key presses and re-derives the visual scene after every
//! mutation. The board is a fixed 10x20 matrix of optional cell colors;
//! exactly one piece falls at a time. Game over is not a terminal state here:
//! a spawn that collides immediately resets the board and score in place and
//! play resumes on the cleared board.

use crate::tetris::shapes::{self, SHAPE_CATALOG, ShapeDef};

pub const GRID_WIDTH: usize = 10;
pub const GRID_HEIGHT: usize = 20;
pub const POINTS_PER_LINE: u32 = 100;

/// Board cell: `None` empty, `Some(color)` content locked from a past piece.
pub type Cell = Option<&'static str>;

/// The currently falling piece: a square boolean matrix (its rotation state),
/// the catalog color, and the top-left anchor in board coordinates (row 0 at
/// the top, y growing downward).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub shape: Vec<Vec<bool>>,
    pub color: &'static str,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    /// Fresh piece at the catalog spawn position: anchored at the top row,
    /// horizontally centered on the padded bounding box (integer division).
    fn at_spawn(def: &'static ShapeDef) -> Self {
        let x = ((GRID_WIDTH - def.size()) / 2) as i32;
        Self {
            shape: def.matrix(),
            color: def.color,
            x,
            y: 0,
        }
    }

    /// Absolute board coordinates of every filled cell.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let (px, py) = (self.x, self.y);
        self.shape.iter().enumerate().flat_map(move |(r, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, filled)| **filled)
                .map(move |(c, _)| (px + c as i32, py + r as i32))
        })
    }
}

/// Outcome of one gravity step, for the caller that re-derives the view and
/// surfaces game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The piece moved down one row (or there was no piece to move).
    Moved,
    /// The row below was blocked: the piece locked, full rows cleared, and a
    /// new piece spawned.
    Locked { cleared: u32, game_over: bool },
}

/// Small linear congruential generator for shape selection. Deterministic per
/// seed, which keeps spawning testable; the session seeds it from the clock
/// (or from real entropy with the `rng` feature).
#[derive(Debug, Clone)]
pub struct ShapeRng {
    state: u32,
}

impl ShapeRng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    fn next(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(1_664_525)
            .wrapping_add(1_013_904_223);
        self.state >> 16
    }

    fn next_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.next() as usize % len
    }
}

/// The single owned game state: locked rows, the active piece, the score and
/// the shape picker. All mutation goes through the operations below, one
/// event handler at a time.
#[derive(Debug, Clone)]
pub struct GridModel {
    rows: Vec<Vec<Cell>>,
    pub active: Option<Piece>,
    pub score: u32,
    rng: ShapeRng,
}

impl GridModel {
    /// Empty board, no active piece; call [`GridModel::spawn`] to start play.
    pub fn new(seed: u32) -> Self {
        Self {
            rows: vec![vec![None; GRID_WIDTH]; GRID_HEIGHT],
            active: None,
            score: 0,
            rng: ShapeRng::new(seed),
        }
    }

    /// Locked content at (x, y); `None` for empty or out-of-range cells.
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.rows.get(y).and_then(|row| row.get(x)).copied().flatten()
    }

    /// Directly writes one locked cell; out-of-range coordinates are ignored.
    /// Gameplay never calls this, board setup in tests does.
    pub fn set_cell(&mut self, x: usize, y: usize, color: &'static str) {
        if let Some(cell) = self.rows.get_mut(y).and_then(|row| row.get_mut(x)) {
            *cell = Some(color);
        }
    }

    /// Pure collision query for `piece` displaced by (dx, dy): true if any
    /// filled cell would leave the horizontal bounds, reach below the board,
    /// or overlap locked content. Cells above the top edge are only
    /// bounds-checked horizontally, so a piece may hang off-grid upward
    /// without counting as a hit.
    pub fn collides(&self, piece: &Piece, dx: i32, dy: i32) -> bool {
        Self::shape_collides(&self.rows, &piece.shape, piece.x + dx, piece.y + dy)
    }

    fn shape_collides(rows: &[Vec<Cell>], shape: &[Vec<bool>], px: i32, py: i32) -> bool {
        for (r, row) in shape.iter().enumerate() {
            for (c, &filled) in row.iter().enumerate() {
                if !filled {
                    continue;
                }
                let x = px + c as i32;
                let y = py + r as i32;
                if x < 0 || x >= GRID_WIDTH as i32 {
                    return true;
                }
                if y >= GRID_HEIGHT as i32 {
                    return true;
                }
                if y >= 0 && rows[y as usize][x as usize].is_some() {
                    return true;
                }
            }
        }
        false
    }

    /// Attempts to shift the active piece by (dx, dy). All-or-nothing: on
    /// collision nothing changes and `false` comes back.
    pub fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        if Self::shape_collides(&self.rows, &piece.shape, piece.x + dx, piece.y + dy) {
            return false;
        }
        piece.x += dx;
        piece.y += dy;
        true
    }

    /// Rotates the active piece clockwise in place. The rotated matrix is
    /// tested at the unrotated anchor; on collision the piece keeps its
    /// current state. No wall kicks.
    pub fn rotate(&mut self) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        let rotated = shapes::rotated_clockwise(&piece.shape);
        if Self::shape_collides(&self.rows, &rotated, piece.x, piece.y) {
            return false;
        }
        piece.shape = rotated;
        true
    }

    /// One gravity step: move down a row, or settle when the row below is
    /// blocked (lock the piece, clear full rows, spawn the next piece).
    /// Without an active piece this is a no-op reported as `Moved`.
    pub fn step_down(&mut self) -> Step {
        if self.active.is_none() {
            return Step::Moved;
        }
        if self.try_move(0, 1) {
            return Step::Moved;
        }
        self.lock_active();
        let cleared = self.clear_lines();
        let game_over = self.spawn();
        Step::Locked { cleared, game_over }
    }

    /// Writes the active piece's color into every in-bounds cell it covers
    /// and drops it. Out-of-bounds cells are skipped silently; the collision
    /// rules keep them from occurring in normal play.
    pub fn lock_active(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };
        for (x, y) in piece.cells() {
            if (0..GRID_WIDTH as i32).contains(&x) && (0..GRID_HEIGHT as i32).contains(&y) {
                self.rows[y as usize][x as usize] = Some(piece.color);
            }
        }
    }

    /// Collapses every fully occupied row: the row is removed and a fresh
    /// empty row enters at index 0, so the board never changes size. The scan
    /// runs bottom-to-top and holds its index after a removal because the row
    /// that slid into the same slot may be full as well. Score goes up by 100
    /// per cleared row.
    pub fn clear_lines(&mut self) -> u32 {
        let mut cleared = 0;
        let mut y = GRID_HEIGHT as i32 - 1;
        while y >= 0 {
            if self.rows[y as usize].iter().all(|cell| cell.is_some()) {
                self.rows.remove(y as usize);
                self.rows.insert(0, vec![None; GRID_WIDTH]);
                cleared += 1;
            } else {
                y -= 1;
            }
        }
        self.score += cleared * POINTS_PER_LINE;
        cleared
    }

    /// Spawns a fresh random piece at the top. Returns `true` when the new
    /// piece immediately overlaps locked content: the game-over condition,
    /// which resets board and score in place and puts another fresh piece on
    /// the cleared board before returning.
    pub fn spawn(&mut self) -> bool {
        let def = self.pick_shape();
        if self.spawn_from(def) {
            return false;
        }
        self.reset();
        let def = self.pick_shape();
        self.spawn_from(def);
        true
    }

    /// Places a specific catalog template at its spawn position; `false`
    /// (with no state change) if the fresh piece would collide right away.
    pub fn spawn_from(&mut self, def: &'static ShapeDef) -> bool {
        let piece = Piece::at_spawn(def);
        if Self::shape_collides(&self.rows, &piece.shape, piece.x, piece.y) {
            return false;
        }
        self.active = Some(piece);
        true
    }

    fn pick_shape(&mut self) -> &'static ShapeDef {
        &SHAPE_CATALOG[self.rng.next_index(SHAPE_CATALOG.len())]
    }

    /// Clears every cell, drops the active piece and zeroes the score.
    pub fn reset(&mut self) {
        for row in &mut self.rows {
            row.fill(None);
        }
        self.active = None;
        self.score = 0;
    }
}
