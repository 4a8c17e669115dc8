//! The drawing surface the game paints on, in pixel coordinates.

use std::io;

use crate::cell::Cell;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Color {
    White,
    Black,
    Blue,
    Green,
}

/// An immediate-mode 2D drawing context.
pub trait Surface {
    fn set_fill_color(&mut self, color: Color);
    fn set_stroke_color(&mut self, color: Color);
    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32) -> io::Result<()>;
    fn stroke_rect(&mut self, x: u32, y: u32, width: u32, height: u32) -> io::Result<()>;
    fn fill_text(&mut self, text: &str, x: u32, y: u32) -> io::Result<()>;
}

/// Anything that knows how to draw itself on a [`Surface`].
pub trait Render {
    fn render(&self, surface: &mut dyn Surface) -> io::Result<()>;
}

/// Paints one grid cell as a filled square with a white outline.
pub fn paint_cell(surface: &mut dyn Surface, cell: Cell, cell_size: u32, color: Color) -> io::Result<()> {
    let x = cell.x as u32 * cell_size;
    let y = cell.y as u32 * cell_size;

    surface.set_fill_color(color);
    surface.fill_rect(x, y, cell_size, cell_size)?;
    surface.set_stroke_color(Color::White);
    surface.stroke_rect(x, y, cell_size, cell_size)
}


#[cfg(test)]
mod tests {
    use super::*;
    use super::testing::{Op, RecordingSurface};

    #[test]
    fn paint_cell_fills_then_outlines() {
        let mut surface = RecordingSurface::new();
        paint_cell(&mut surface, Cell::new(3, 2), 10, Color::Blue).unwrap();

        assert_eq!(surface.ops, vec![
            Op::Fill(Color::Blue, 30, 20, 10, 10),
            Op::Stroke(Color::White, 30, 20, 10, 10),
        ]);
    }
}
