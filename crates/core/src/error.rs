use thiserror::Error;

/// Failures raised when inbound view data breaks the board contract.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ViewError {
    #[error("cell index {index} is outside the 40x40 board")]
    CellOutOfRange { index: u32 },
    #[error("map point ({x}, {y}) does not fall on the board")]
    PointOffBoard { x: f32, y: f32 },
    #[error("board snapshot has {actual} cells, expected {expected}")]
    BoardSize { expected: usize, actual: usize },
    #[error("tile size must be positive, got {tile_size}")]
    InvalidTileSize { tile_size: u32 },
    #[error("tile size {tile_size} matches neither zoom level")]
    UnknownZoomLevel { tile_size: u32 },
    #[error("view setting `{field}` is out of range")]
    InvalidConfig { field: &'static str },
}

pub type ViewResult<T> = Result<T, ViewError>;
