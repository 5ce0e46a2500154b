use rand::Rng;
use thiserror::Error;

pub const COLS: u32 = 60;
pub const ROWS: u32 = 40;

// Moore neighborhood, self excluded.
const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    #[error("cell ({x}, {y}) is out of range")]
    OutOfRange { x: u32, y: u32 },
}

/// Dense cell storage plus a same-shaped scratch buffer for stepping.
#[derive(Debug, Clone)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Vec<bool>>, // row-major: cells[y][x]
    next: Vec<Vec<bool>>,
}

impl Grid {
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be non-zero");
        let cells = vec![vec![false; width as usize]; height as usize];
        let next = cells.clone();

        Self {
            width,
            height,
            cells,
            next,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Sets every cell independently alive with probability `ratio`.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R, ratio: f64) {
        for row in self.cells.iter_mut() {
            for cell in row.iter_mut() {
                *cell = rng.gen::<f64>() < ratio;
            }
        }
    }

    /// Out-of-range coordinates read as dead.
    pub fn is_alive(&self, x: u32, y: u32) -> bool {
        if x < self.width && y < self.height {
            self.cells[y as usize][x as usize]
        } else {
            false
        }
    }

    pub fn toggle(&mut self, x: u32, y: u32) -> Result<(), GridError> {
        if x >= self.width || y >= self.height {
            return Err(GridError::OutOfRange { x, y });
        }
        let cell = &mut self.cells[y as usize][x as usize];
        *cell = !*cell;
        Ok(())
    }

    /// Live cells among the 8 surrounding positions. The board does not
    /// wrap: neighbors past an edge simply do not count.
    pub fn count_neighbors(&self, x: u32, y: u32) -> u8 {
        let mut count = 0;
        for (dx, dy) in NEIGHBOR_OFFSETS {
            let nx = x as i32 + dx;
            let ny = y as i32 + dy;
            if nx < 0 || nx >= self.width as i32 || ny < 0 || ny >= self.height as i32 {
                continue;
            }
            if self.cells[ny as usize][nx as usize] {
                count += 1;
            }
        }
        count
    }

    /// Advances the whole board one generation. Every next state is computed
    /// from the current buffer only, then the buffers are swapped, so a
    /// reader never observes a half-stepped board.
    pub fn step(&mut self) {
        for y in 0..self.height {
            for x in 0..self.width {
                let alive = self.cells[y as usize][x as usize];
                let neighbors = self.count_neighbors(x, y);

                self.next[y as usize][x as usize] = match (alive, neighbors) {
                    (true, n) if n < 2 => false,
                    (true, 2) | (true, 3) => true,
                    (true, n) if n > 3 => false,
                    (false, 3) => true,
                    (unchanged, _) => unchanged,
                };
            }
        }

        std::mem::swap(&mut self.cells, &mut self.next);
    }
}
