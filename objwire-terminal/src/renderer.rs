/// Character-cell drawing surface for terminal wireframe output
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::Point2;
use objwire_core::{Colour, Surface};
use std::io::Write;

const POINT_CHAR: char = 'o';
const LINE_CHAR: char = '.';

/// Cell coordinates beyond this are treated as fully off-surface.
const MAX_CELL: i32 = 1 << 15;

/// Maps the engine's logical pixel canvas onto a grid of terminal cells
/// and strokes wireframe output into a character buffer.
pub struct TermSurface {
    cols: usize,
    rows: usize,
    canvas_width: f32,
    canvas_height: f32,
    cells: Vec<(char, Colour)>,
}

impl TermSurface {
    /// Surface over `cols` x `rows` cells showing a logical canvas of
    /// `canvas_width` x `canvas_height` pixels.
    pub fn new(cols: usize, rows: usize, canvas_width: f32, canvas_height: f32) -> Self {
        Self {
            cols,
            rows,
            canvas_width,
            canvas_height,
            cells: vec![(' ', Colour::WHITE); cols * rows],
        }
    }

    fn to_cell(&self, point: Point2<f32>) -> (i32, i32) {
        let x = (point.x / self.canvas_width * self.cols as f32).floor() as i32;
        let y = (point.y / self.canvas_height * self.rows as f32).floor() as i32;
        (x.clamp(-MAX_CELL, MAX_CELL), y.clamp(-MAX_CELL, MAX_CELL))
    }

    fn plot(&mut self, x: i32, y: i32, glyph: char, colour: Colour) {
        if x < 0 || y < 0 || x >= self.cols as i32 || y >= self.rows as i32 {
            return;
        }
        self.cells[y as usize * self.cols + x as usize] = (glyph, colour);
    }

    /// Bresenham line between two cells, clipped per plot.
    fn stroke(&mut self, from: (i32, i32), to: (i32, i32), colour: Colour) {
        let (mut x, mut y) = from;
        let dx = (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        let sx = if x < to.0 { 1 } else { -1 };
        let sy = if y < to.1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.plot(x, y, LINE_CHAR, colour);
            if (x, y) == to {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Queue the buffered frame onto a writer, one row per line.
    pub fn present<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let (glyph, colour) = self.cells[row * self.cols + col];
                writer.queue(SetForegroundColor(Color::Rgb {
                    r: colour.r,
                    g: colour.g,
                    b: colour.b,
                }))?;
                writer.queue(Print(glyph))?;
            }
            writer.queue(Print('\n'))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl Surface for TermSurface {
    fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = (' ', Colour::WHITE);
        }
    }

    fn draw_point(&mut self, point: Point2<f32>, _size: f32, colour: Colour) {
        let (x, y) = self.to_cell(point);
        self.plot(x, y, POINT_CHAR, colour);
    }

    fn draw_polygon(&mut self, points: &[Point2<f32>], outline: Colour) {
        for (i, point) in points.iter().enumerate() {
            let next = points[(i + 1) % points.len()];
            self.stroke(self.to_cell(*point), self.to_cell(next), outline);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit_cells(surface: &TermSurface) -> Vec<(usize, usize, char)> {
        let mut lit = Vec::new();
        for row in 0..surface.rows {
            for col in 0..surface.cols {
                let (glyph, _) = surface.cells[row * surface.cols + col];
                if glyph != ' ' {
                    lit.push((col, row, glyph));
                }
            }
        }
        lit
    }

    #[test]
    fn point_lands_in_expected_cell() {
        let mut surface = TermSurface::new(80, 40, 840.0, 560.0);
        surface.draw_point(Point2::new(420.0, 280.0), 2.0, Colour::WHITE);
        assert_eq!(lit_cells(&surface), vec![(40, 20, POINT_CHAR)]);
    }

    #[test]
    fn off_surface_points_are_clipped() {
        let mut surface = TermSurface::new(80, 40, 840.0, 560.0);
        surface.draw_point(Point2::new(-50.0, 100.0), 2.0, Colour::WHITE);
        surface.draw_point(Point2::new(100.0, 1e7), 2.0, Colour::WHITE);
        assert!(lit_cells(&surface).is_empty());
    }

    #[test]
    fn polygon_outline_closes() {
        // cell-aligned triangle: every corner cell must be stroked
        let mut surface = TermSurface::new(84, 56, 840.0, 560.0);
        let points = [
            Point2::new(105.0, 105.0),
            Point2::new(405.0, 105.0),
            Point2::new(105.0, 405.0),
        ];
        surface.draw_polygon(&points, Colour::BLUE);
        let lit = lit_cells(&surface);
        for corner in [(10, 10), (40, 10), (10, 40)] {
            assert!(
                lit.iter().any(|&(c, r, _)| (c, r) == corner),
                "corner {corner:?} not stroked"
            );
        }
        // closing edge from the last point back to the first
        assert!(lit.iter().any(|&(c, r, _)| (c, r) == (10, 25)));
    }

    #[test]
    fn clear_blanks_the_buffer() {
        let mut surface = TermSurface::new(10, 10, 100.0, 100.0);
        surface.draw_point(Point2::new(50.0, 50.0), 2.0, Colour::WHITE);
        surface.clear();
        assert!(lit_cells(&surface).is_empty());
    }
}
