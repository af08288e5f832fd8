use std::io;
use std::num::ParseIntError;

use crate::engine::Tile;

/// Rejections raised when building a `Board` from caller-supplied cells.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("board size must be positive")]
    ZeroSize,
    #[error("row {row} has {len} cells, expected {size}")]
    NotSquare { row: usize, len: usize, size: usize },
    #[error("cell ({row}, {col}) holds {value}, which is neither empty nor a power of two")]
    InvalidTile { row: usize, col: usize, value: Tile },
    #[error("tile values add up to more than {limit}")]
    TotalTooLarge { limit: Tile },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown key: {0:?}")]
    UnknownKey(String),
    #[error("bad cell value: {0}")]
    BadInt(#[from] ParseIntError),
    #[error(transparent)]
    Board(#[from] BoardError),
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("board size must be positive")]
    InvalidSize,
}
