use std::collections::{HashSet, VecDeque};
use std::io;

use crate::cell::{Cell, Direction::{self, *}};
use crate::collision::{collides_with_occupied, collides_with_point, collides_with_wall};
use crate::config::Board;
use crate::render::{paint_cell, Color, Render, Surface};
use Step::*;

pub const INITIAL_LENGTH: i32 = 5;
const START_ROW: i32 = 1;

const SNAKE_COLOR: Color = Color::Blue;

/// What a single update did to the snake.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Step {
    Moved { new_head: Cell, old_tail: Cell },
    Ate { new_head: Cell },
    Crashed { at: Cell },
}

pub struct Snake {
    // Head at the front, tail at the back
    body: VecDeque<Cell>,
    // Same cells as `body`, for O(1) collision checks
    occupied: HashSet<Cell>,
    direction: Direction,
    cell_size: u32,
}

impl Snake {
    /// A horizontal snake on row 1 heading right, tail at column 0.
    pub fn new(cell_size: u32) -> Self {
        let mut snake = Snake {
            body: VecDeque::with_capacity(INITIAL_LENGTH as usize),
            occupied: HashSet::with_capacity(INITIAL_LENGTH as usize),
            direction: Right,
            cell_size,
        };

        for x in 0..INITIAL_LENGTH {
            snake.push_head(Cell::new(x, START_ROW));
        }

        snake
    }

    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn occupied(&self) -> &HashSet<Cell> {
        &self.occupied
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Changes direction unless the request would reverse the snake onto itself.
    pub fn turn(&mut self, new_direction: Direction) -> bool {
        if new_direction == self.direction.opposite() {
            return false;
        }

        self.direction = new_direction;
        true
    }

    /// Advances one cell. Collisions are checked against the body as it is
    /// before the move, so running into the current tail cell is fatal too.
    pub fn update(&mut self, board: &Board, food: Cell) -> Step {
        let next = self.head().step(self.direction);

        if collides_with_wall(next.x, next.y, board.width, board.height, self.cell_size) ||
           collides_with_occupied(next.x, next.y, &self.occupied) {
            return Crashed { at: next };
        }

        if collides_with_point(next.x, next.y, food.x, food.y) {
            self.push_head(next);
            return Ate { new_head: next };
        }

        let old_tail = self.pop_tail();
        self.push_head(next);
        Moved { new_head: next, old_tail }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn push_head(&mut self, cell: Cell) {
        self.occupied.insert(cell);
        self.body.push_front(cell);
    }

    fn pop_tail(&mut self) -> Cell {
        let tail = self.body.pop_back().expect("snake is never empty");
        self.occupied.remove(&tail);
        tail
    }
}

impl Render for Snake {
    fn render(&self, surface: &mut dyn Surface) -> io::Result<()> {
        for cell in &self.body {
            paint_cell(surface, *cell, self.cell_size, SNAKE_COLOR)?;
        }
        Ok(())
    }
}
