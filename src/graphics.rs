use pixels::{Pixels, SurfaceTexture};
use winit::dpi::PhysicalPosition;
use winit::window::Window;

use crate::grid::Grid;

pub const CELL_SIZE: u32 = 12;

const COLOR_BACKGROUND: [u8; 4] = [0, 0, 0, 255];
const COLOR_GRID_LINE: [u8; 4] = [40, 40, 40, 255];
const COLOR_LIVE_CELL: [u8; 4] = [240, 240, 240, 255];

/// Draws the board into a fixed-size `pixels` framebuffer: live cells as
/// filled squares under a lattice of 1-px grid lines, centered in the
/// window.
pub struct GraphicsRenderer {
    pixels: Pixels,
    width: u32,
    height: u32,
}

impl GraphicsRenderer {
    pub fn new(window: &Window, width: u32, height: u32) -> Result<Self, pixels::Error> {
        let window_size = window.inner_size();
        let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, window);
        let pixels = Pixels::new(width, height, surface_texture)?;

        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Resizes the presentation surface. The framebuffer keeps its fixed
    /// dimensions, so cell coordinates stay stable.
    pub fn resize(&mut self, width: u32, height: u32) {
        if let Err(err) = self.pixels.resize_surface(width, height) {
            log::error!("Failed to resize surface: {}", err);
        }
    }

    /// Maps a physical window position to the cell under it, or `None` when
    /// the position is off the board.
    pub fn cell_at(&self, grid: &Grid, position: PhysicalPosition<f64>) -> Option<(u32, u32)> {
        let (px, py) = self
            .pixels
            .window_pos_to_pixel((position.x as f32, position.y as f32))
            .ok()?;
        let origin = board_origin(self.width, self.height, grid.width(), grid.height());
        cell_from_pixel(px as u32, py as u32, origin, grid.width(), grid.height())
    }

    pub fn render(&mut self, grid: &Grid) {
        let (width, height) = (self.width, self.height);
        let (origin_x, origin_y) = board_origin(width, height, grid.width(), grid.height());
        let frame = self.pixels.frame_mut();

        for pixel in frame.chunks_exact_mut(4) {
            pixel.copy_from_slice(&COLOR_BACKGROUND);
        }

        for y in 0..grid.height() {
            for x in 0..grid.width() {
                if grid.is_alive(x, y) {
                    let cell_x = origin_x + x * CELL_SIZE;
                    let cell_y = origin_y + y * CELL_SIZE;
                    Self::draw_cell_static(frame, cell_x, cell_y, COLOR_LIVE_CELL, width, height);
                }
            }
        }

        Self::draw_grid_lines_static(
            frame,
            origin_x,
            origin_y,
            grid.width(),
            grid.height(),
            width,
            height,
        );
    }

    pub fn present(&mut self) -> Result<(), pixels::Error> {
        self.pixels.render()
    }

    fn draw_cell_static(frame: &mut [u8], x: u32, y: u32, color: [u8; 4], width: u32, height: u32) {
        for dy in 0..CELL_SIZE {
            for dx in 0..CELL_SIZE {
                let px = x + dx;
                let py = y + dy;

                if px < width && py < height {
                    let index = ((py * width + px) * 4) as usize;
                    if index + 3 < frame.len() {
                        frame[index..index + 4].copy_from_slice(&color);
                    }
                }
            }
        }
    }

    fn draw_grid_lines_static(
        frame: &mut [u8],
        origin_x: u32,
        origin_y: u32,
        cols: u32,
        rows: u32,
        width: u32,
        height: u32,
    ) {
        let board_width = cols * CELL_SIZE;
        let board_height = rows * CELL_SIZE;

        // Vertical lines
        for x in 0..=cols {
            let line_x = origin_x + x * CELL_SIZE;
            for dy in 0..board_height {
                let py = origin_y + dy;
                if line_x < width && py < height {
                    let index = ((py * width + line_x) * 4) as usize;
                    if index + 3 < frame.len() {
                        frame[index..index + 4].copy_from_slice(&COLOR_GRID_LINE);
                    }
                }
            }
        }

        // Horizontal lines
        for y in 0..=rows {
            let line_y = origin_y + y * CELL_SIZE;
            for dx in 0..board_width {
                let px = origin_x + dx;
                if px < width && line_y < height {
                    let index = ((line_y * width + px) * 4) as usize;
                    if index + 3 < frame.len() {
                        frame[index..index + 4].copy_from_slice(&COLOR_GRID_LINE);
                    }
                }
            }
        }
    }
}

/// Top-left corner of the board, centered in the framebuffer.
fn board_origin(width: u32, height: u32, cols: u32, rows: u32) -> (u32, u32) {
    let origin_x = width.saturating_sub(cols * CELL_SIZE) / 2;
    let origin_y = height.saturating_sub(rows * CELL_SIZE) / 2;
    (origin_x, origin_y)
}

fn cell_from_pixel(
    px: u32,
    py: u32,
    (origin_x, origin_y): (u32, u32),
    cols: u32,
    rows: u32,
) -> Option<(u32, u32)> {
    if px < origin_x || py < origin_y {
        return None;
    }
    let x = (px - origin_x) / CELL_SIZE;
    let y = (py - origin_y) / CELL_SIZE;
    if x < cols && y < rows {
        Some((x, y))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{COLS, ROWS};

    #[test]
    fn board_is_centered_in_the_default_framebuffer() {
        assert_eq!(board_origin(800, 600, COLS, ROWS), (40, 60));
    }

    #[test]
    fn pixel_to_cell_mapping_respects_the_board_bounds() {
        let origin = board_origin(800, 600, COLS, ROWS);

        assert_eq!(cell_from_pixel(40, 60, origin, COLS, ROWS), Some((0, 0)));
        assert_eq!(cell_from_pixel(51, 71, origin, COLS, ROWS), Some((0, 0)));
        assert_eq!(cell_from_pixel(52, 72, origin, COLS, ROWS), Some((1, 1)));
        assert_eq!(
            cell_from_pixel(40 + 59 * 12, 60 + 39 * 12, origin, COLS, ROWS),
            Some((59, 39))
        );

        // Off the left/top edge and past the last cell.
        assert_eq!(cell_from_pixel(39, 60, origin, COLS, ROWS), None);
        assert_eq!(cell_from_pixel(40, 59, origin, COLS, ROWS), None);
        assert_eq!(cell_from_pixel(40 + 60 * 12, 300, origin, COLS, ROWS), None);
        assert_eq!(cell_from_pixel(300, 60 + 40 * 12, origin, COLS, ROWS), None);
    }
}
