use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::snake::INITIAL_LENGTH;

/// Largest grid side. Keeps cell coordinates in `i32` and the terminal frame in `u16`.
pub const MAX_SIDE: u32 = i16::MAX as u32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("cell size must be greater than zero")]
    ZeroCellSize,
    #[error("a {columns}x{rows} board cannot hold the starting snake")]
    BoardTooSmall { columns: u32, rows: u32 },
    #[error("a {columns}x{rows} board is larger than {max} cells on a side")]
    BoardTooLarge { columns: u32, rows: u32, max: u32 },
    #[error("terminal is {have_w}x{have_h} but the board needs {need_w}x{need_h}")]
    TerminalTooSmall { have_w: u16, have_h: u16, need_w: u16, need_h: u16 },
}

/// Terminal Snake on a fixed grid.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// Board width in pixels
    #[arg(long, default_value_t = 400)]
    pub width: u32,

    /// Board height in pixels
    #[arg(long, default_value_t = 200)]
    pub height: u32,

    /// Side of one grid cell in pixels
    #[arg(long, default_value_t = 10)]
    pub cell_size: u32,

    /// Seed for food placement
    #[arg(long)]
    pub seed: Option<u64>,

    /// Where to write the log (the terminal is taken by the game)
    #[arg(long, default_value = "gridsnake.log")]
    pub log_file: PathBuf,
}

impl Args {
    pub fn board(&self) -> Result<Board, ConfigError> {
        Board::new(self.width, self.height, self.cell_size)
    }
}

/// Board dimensions: canvas size in pixels and the cell size.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Board {
    pub width: u32,
    pub height: u32,
    pub cell_size: u32,
}

impl Board {
    pub fn new(width: u32, height: u32, cell_size: u32) -> Result<Self, ConfigError> {
        if cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }

        let board = Board { width, height, cell_size };

        // The starting snake lies on row 1 from column 0 and needs room for a first step
        if board.columns() < INITIAL_LENGTH as u32 + 1 || board.rows() < 2 {
            return Err(ConfigError::BoardTooSmall { columns: board.columns(), rows: board.rows() });
        }

        if board.columns() > MAX_SIDE || board.rows() > MAX_SIDE {
            return Err(ConfigError::BoardTooLarge { columns: board.columns(), rows: board.rows(), max: MAX_SIDE });
        }

        Ok(board)
    }

    pub fn columns(&self) -> u32 {
        self.width / self.cell_size
    }

    pub fn rows(&self) -> u32 {
        self.height / self.cell_size
    }

    pub fn cell_count(&self) -> usize {
        self.columns() as usize * self.rows() as usize
    }
}
