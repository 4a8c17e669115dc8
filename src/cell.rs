use Direction::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }
}

/// A grid coordinate. Signed so the cells just outside the board exist.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }

    pub fn step(self, direction: Direction) -> Cell {
        match direction {
            Up => Cell::new(self.x, self.y - 1),
            Down => Cell::new(self.x, self.y + 1),
            Left => Cell::new(self.x - 1, self.y),
            Right => Cell::new(self.x + 1, self.y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_pairs() {
        assert_eq!(Up.opposite(), Down);
        assert_eq!(Left.opposite(), Right);
        assert_eq!(Right.opposite().opposite(), Right);
    }

    #[test]
    fn step_moves_one_cell() {
        let c = Cell::new(3, 3);
        assert_eq!(c.step(Up), Cell::new(3, 2));
        assert_eq!(c.step(Down), Cell::new(3, 4));
        assert_eq!(c.step(Left), Cell::new(2, 3));
        assert_eq!(c.step(Right), Cell::new(4, 3));
        assert_eq!(Cell::new(0, 0).step(Left), Cell::new(-1, 0));
    }
}
