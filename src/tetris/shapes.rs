//! Shape catalog for the Tetris runtime.
//!
//! Seven classic tetrominoes, each stored as one canonical rotation state in a
//! square bounding box ("I" is 4x4 by padding, "O" is naturally 2x2, the rest
//! are 3x3 by padding). The square padding is load-bearing: rotation is a
//! plain transpose-plus-row-reverse and only squares survive that unchanged in
//! size. Template rows use `#` for filled cells.

/// One catalog template. Read-only; every falling piece of this kind starts
/// from a copy of `matrix()`.
#[derive(Debug, PartialEq, Eq)]
pub struct ShapeDef {
    pub name: &'static str,
    pub color: &'static str,
    pub rows: &'static [&'static str],
}

impl ShapeDef {
    /// Side length of the square bounding box.
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    /// The canonical rotation state as a mutable-friendly boolean matrix.
    pub fn matrix(&self) -> Vec<Vec<bool>> {
        self.rows
            .iter()
            .map(|row| row.chars().map(|c| c == '#').collect())
            .collect()
    }
}

pub const SHAPE_CATALOG: &[ShapeDef] = &[
    ShapeDef {
        name: "I",
        color: "#00f0f0",
        rows: &["####", "....", "....", "...."],
    },
    ShapeDef {
        name: "O",
        color: "#f0f000",
        rows: &["##", "##"],
    },
    ShapeDef {
        name: "T",
        color: "#a000f0",
        rows: &["###", ".#.", "..."],
    },
    ShapeDef {
        name: "S",
        color: "#00f000",
        rows: &[".##", "##.", "..."],
    },
    ShapeDef {
        name: "Z",
        color: "#f00000",
        rows: &["##.", ".##", "..."],
    },
    ShapeDef {
        name: "J",
        color: "#0000f0",
        rows: &["#..", "###", "..."],
    },
    ShapeDef {
        name: "L",
        color: "#f0a000",
        rows: &["..#", "###", "..."],
    },
];

/// Catalog lookup by template name ("I".."L").
pub fn shape_named(name: &str) -> Option<&'static ShapeDef> {
    SHAPE_CATALOG.iter().find(|s| s.name == name)
}

/// 90 degrees clockwise: transpose, then reverse each row (one indexing pass).
/// Assumes a square matrix, which every catalog template guarantees.
pub fn rotated_clockwise(shape: &[Vec<bool>]) -> Vec<Vec<bool>> {
    let n = shape.len();
    let mut out = vec![vec![false; n]; n];
    for (r, row) in shape.iter().enumerate() {
        for (c, &filled) in row.iter().enumerate() {
            out[c][n - 1 - r] = filled;
        }
    }
    out
}
