//! Sprite bitmaps.
//!
//! Sprites are authored row-major (one byte per row, most significant bit is
//! the leftmost pixel) and transposed once at startup into the column-major
//! "direct" layout used by drawing and pixel collision: one byte per column,
//! bit `r` lit means row `r` is set.

use heapless::Vec;

/// Widest/tallest bitmap a single byte can describe.
pub const MAX_SIDE: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirectBitmap {
    cols: u8,
    rows: u8,
    columns: [u8; MAX_SIDE],
}

impl DirectBitmap {
    pub const EMPTY: Self = Self {
        cols: 0,
        rows: 0,
        columns: [0; MAX_SIDE],
    };

    /// Transpose a `cols × rows.len()` row-major pattern.
    pub fn from_rows(cols: usize, rows: &[u8]) -> Self {
        let cols = cols.min(MAX_SIDE);
        let height = rows.len().min(MAX_SIDE);
        let mut columns = [0u8; MAX_SIDE];
        for (i, column) in columns.iter_mut().enumerate().take(cols) {
            for (j, row) in rows.iter().enumerate().take(height) {
                let bit = (row >> (cols - 1 - i)) & 1;
                *column |= bit << j;
            }
        }
        Self {
            cols: cols as u8,
            rows: height as u8,
            columns,
        }
    }

    /// Transpose back into the authored row-major form.
    pub fn to_rows(&self) -> Vec<u8, MAX_SIDE> {
        let cols = usize::from(self.cols);
        let mut rows = Vec::new();
        for j in 0..usize::from(self.rows) {
            let mut row = 0u8;
            for i in 0..cols {
                let bit = (self.columns[i] >> j) & 1;
                row |= bit << (cols - 1 - i);
            }
            // capacity equals MAX_SIDE and rows never exceeds it
            let _ = rows.push(row);
        }
        rows
    }

    pub fn cols(&self) -> usize {
        usize::from(self.cols)
    }

    pub fn rows(&self) -> usize {
        usize::from(self.rows)
    }

    pub fn column(&self, col: usize) -> u8 {
        self.columns.get(col).copied().unwrap_or(0)
    }

    /// Out-of-range lookups read as unset.
    pub fn is_set(&self, col: i32, row: i32) -> bool {
        if col < 0 || row < 0 || row >= MAX_SIDE as i32 {
            return false;
        }
        (self.column(col as usize) >> row) & 1 == 1
    }
}

/// Authored sprite: a bounding box plus its row-major pattern.
pub struct Authored {
    pub width: i32,
    pub rows: &'static [u8],
}

impl Authored {
    fn prepare(&self) -> Sprite {
        Sprite {
            width: self.width,
            height: self.rows.len() as i32,
            bitmap: DirectBitmap::from_rows(MAX_SIDE, self.rows),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sprite {
    pub width: i32,
    pub height: i32,
    pub bitmap: DirectBitmap,
}

pub const TOM: Authored = Authored {
    width: 5,
    rows: &[
        0b1000_1000,
        0b1101_1000,
        0b1111_1000,
        0b1010_1000,
        0b1111_1000,
        0b1111_1000,
        0b0111_0000,
    ],
};

pub const JERRY: Authored = Authored {
    width: 5,
    rows: &[
        0b1101_1000,
        0b1101_1000,
        0b1101_1000,
        0b0111_0000,
        0b0111_0000,
        0b0111_0000,
    ],
};

pub const SUPER_JERRY: Authored = Authored {
    width: 6,
    rows: &[
        0b1100_1100,
        0b1111_1100,
        0b1111_1100,
        0b1111_1100,
        0b0111_1000,
        0b0111_1000,
        0b0111_1000,
        0b0011_0000,
    ],
};

pub const CHEESE: Authored = Authored {
    width: 3,
    rows: &[0b1110_0000, 0b1000_0000, 0b1110_0000],
};

pub const TRAP: Authored = Authored {
    width: 3,
    rows: &[0b1000_0000, 0b0100_0000, 0b1110_0000],
};

pub const MILK: Authored = Authored {
    width: 6,
    rows: &[0b0100_1000, 0b1111_1100, 0b1000_0100],
};

pub const DOOR: Authored = Authored {
    width: 5,
    rows: &[
        0b1111_1000,
        0b1000_1000,
        0b1000_1000,
        0b1000_1000,
        0b1000_1000,
    ],
};

pub const FIREWORK: Authored = Authored {
    width: 1,
    rows: &[0b1000_0000],
};

/// Every sprite in direct form, prepared once at boot.
#[derive(Clone, Debug)]
pub struct Sprites {
    pub tom: Sprite,
    pub jerry: Sprite,
    pub super_jerry: Sprite,
    pub cheese: Sprite,
    pub trap: Sprite,
    pub milk: Sprite,
    pub door: Sprite,
    pub firework: Sprite,
}

impl Sprites {
    pub fn prepare() -> Self {
        Self {
            tom: TOM.prepare(),
            jerry: JERRY.prepare(),
            super_jerry: SUPER_JERRY.prepare(),
            cheese: CHEESE.prepare(),
            trap: TRAP.prepare(),
            milk: MILK.prepare(),
            door: DOOR.prepare(),
            firework: FIREWORK.prepare(),
        }
    }
}
