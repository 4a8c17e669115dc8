//! Pure collision predicates shared by the snake and the food.

use std::collections::HashSet;

use crate::cell::Cell;

/// True when `(x, y)` is one of the cells just outside the board.
pub fn collides_with_wall(x: i32, y: i32, width: u32, height: u32, cell_size: u32) -> bool {
    let columns = (width / cell_size) as i32;
    let rows = (height / cell_size) as i32;

    x == -1 || x == columns || y == -1 || y == rows
}

/// Cells missing from the set are free, not an error.
pub fn collides_with_occupied(x: i32, y: i32, occupancy: &HashSet<Cell>) -> bool {
    occupancy.contains(&Cell::new(x, y))
}

pub fn collides_with_point(x: i32, y: i32, other_x: i32, other_y: i32) -> bool {
    x == other_x && y == other_y
}
