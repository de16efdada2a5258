//! Cell index and pixel coordinate mapping for the fixed 40x40 board.
//! Cells are anchored at their top-left pixel, so the inverse mapping floors.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::error::{ViewError, ViewResult};

pub const BOARD_COLUMNS: u32 = 40;
pub const BOARD_ROWS: u32 = 40;
pub const CELL_COUNT: usize = (BOARD_COLUMNS * BOARD_ROWS) as usize;

/// Row-major index of one board cell, always in `0..1600`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct CellIndex(u16);

impl CellIndex {
    pub fn new(index: u32) -> ViewResult<Self> {
        if (index as usize) < CELL_COUNT {
            Ok(Self(index as u16))
        } else {
            Err(ViewError::CellOutOfRange { index })
        }
    }

    pub fn from_column_row(column: u32, row: u32) -> ViewResult<Self> {
        if column >= BOARD_COLUMNS || row >= BOARD_ROWS {
            return Err(ViewError::CellOutOfRange {
                index: row.saturating_mul(BOARD_COLUMNS).saturating_add(column),
            });
        }
        Self::new(row * BOARD_COLUMNS + column)
    }

    pub fn get(self) -> u32 {
        u32::from(self.0)
    }

    pub fn as_usize(self) -> usize {
        usize::from(self.0)
    }

    pub fn column(self) -> u32 {
        self.get() % BOARD_COLUMNS
    }

    pub fn row(self) -> u32 {
        self.get() / BOARD_COLUMNS
    }

    /// Every cell in row-major order.
    pub fn all() -> impl Iterator<Item = CellIndex> {
        (0..CELL_COUNT as u16).map(CellIndex)
    }
}

impl TryFrom<u32> for CellIndex {
    type Error = ViewError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CellIndex> for u32 {
    fn from(cell: CellIndex) -> Self {
        cell.get()
    }
}

/// Edge length of one cell in pixels at the current zoom level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct TileSize(u32);

impl TileSize {
    pub fn new(pixels: u32) -> ViewResult<Self> {
        if pixels == 0 {
            return Err(ViewError::InvalidTileSize { tile_size: pixels });
        }
        Ok(Self(pixels))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn as_f32(self) -> f32 {
        self.0 as f32
    }

    /// Full board edge length in pixels.
    pub fn board_pixels(self) -> f32 {
        (u64::from(self.0) * u64::from(BOARD_COLUMNS)) as f32
    }
}

impl TryFrom<u32> for TileSize {
    type Error = ViewError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TileSize> for u32 {
    fn from(tile: TileSize) -> Self {
        tile.get()
    }
}

/// Integer pixel position of a cell's top-left corner on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelPos {
    pub x: i64,
    pub y: i64,
}

impl PixelPos {
    pub fn to_point(self) -> Point {
        Point { x: self.x as f32, y: self.y as f32 }
    }
}

/// Continuous screen or map coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

/// Axis-aligned rectangle; contains its top-left edge but not its bottom-right.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }

    pub fn translated(&self, by: Point) -> Rect {
        Rect { x: self.x + by.x, y: self.y + by.y, ..*self }
    }
}

pub fn cell_to_pixel(cell: CellIndex, tile: TileSize) -> PixelPos {
    let size = i64::from(tile.get());
    PixelPos { x: i64::from(cell.column()) * size, y: i64::from(cell.row()) * size }
}

pub fn pixel_to_cell(pos: PixelPos, tile: TileSize) -> ViewResult<CellIndex> {
    let size = i64::from(tile.get());
    let column = pos.x.div_euclid(size);
    let row = pos.y.div_euclid(size);
    if !(0..i64::from(BOARD_COLUMNS)).contains(&column) || !(0..i64::from(BOARD_ROWS)).contains(&row)
    {
        return Err(ViewError::PointOffBoard { x: pos.x as f32, y: pos.y as f32 });
    }
    CellIndex::from_column_row(column as u32, row as u32)
}
