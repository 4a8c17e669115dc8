use std::io;

use rand::Rng;
use thiserror::Error;

use crate::cell::Cell;
use crate::collision::collides_with_occupied;
use crate::config::Board;
use crate::render::{paint_cell, Color, Render, Surface};
use crate::snake::Snake;

const FOOD_COLOR: Color = Color::Green;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FoodError {
    #[error("the snake covers all {0} cells, there is nowhere to put food")]
    BoardFull(usize),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Food {
    cell: Cell,
    cell_size: u32,
}

impl Food {
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, board: &Board, snake: &Snake) -> Result<Self, FoodError> {
        let cell = free_cell(rng, board, snake)?;
        Ok(Food { cell, cell_size: board.cell_size })
    }

    pub fn at(cell: Cell, cell_size: u32) -> Self {
        Food { cell, cell_size }
    }

    pub fn cell(&self) -> Cell {
        self.cell
    }

    pub fn relocate<R: Rng + ?Sized>(&mut self, rng: &mut R, board: &Board, snake: &Snake) -> Result<(), FoodError> {
        self.cell = free_cell(rng, board, snake)?;
        Ok(())
    }
}

impl Render for Food {
    fn render(&self, surface: &mut dyn Surface) -> io::Result<()> {
        paint_cell(surface, self.cell, self.cell_size, FOOD_COLOR)
    }
}

/// Draws uniform random cells until one is off the snake. Retries are
/// unbounded as long as at least one cell is free.
fn free_cell<R: Rng + ?Sized>(rng: &mut R, board: &Board, snake: &Snake) -> Result<Cell, FoodError> {
    if snake.occupied().len() >= board.cell_count() {
        return Err(FoodError::BoardFull(board.cell_count()));
    }

    let (columns, rows) = (board.columns() as i32, board.rows() as i32);

    loop {
        let x = rng.gen_range(0..columns);
        let y = rng.gen_range(0..rows);

        if !collides_with_occupied(x, y, snake.occupied()) {
            return Ok(Cell::new(x, y));
        }
    }
}
