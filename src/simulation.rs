use std::time::{Duration, Instant};

use rand::Rng;

use crate::grid::{Grid, COLS, ROWS};

/// Minimum wall-clock time between generation advances, independent of the
/// host frame rate.
pub const UPDATE_INTERVAL: Duration = Duration::from_millis(100);
/// Probability that a cell starts alive in the initial random seed.
pub const SEED_RATIO: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimState {
    Paused,
    Running,
}

/// Pointer state for one frame, already mapped to cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pointer {
    Released,
    /// Pressed somewhere in the window; `None` when off the board.
    Pressed(Option<(u32, u32)>),
}

/// Mediates between host events and the grid: owns the board, the
/// run/pause state and the fixed simulation cadence.
pub struct Simulation {
    grid: Grid,
    state: SimState,
    last_update: Instant,
    last_toggled: Option<(u32, u32)>,
}

impl Simulation {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        let mut grid = Grid::new(COLS, ROWS);
        grid.randomize(rng, SEED_RATIO);
        Self::with_grid(grid)
    }

    fn with_grid(grid: Grid) -> Self {
        Self {
            grid,
            state: SimState::Running,
            last_update: Instant::now(),
            last_toggled: None,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn toggle_running(&mut self) {
        self.state = match self.state {
            SimState::Running => SimState::Paused,
            SimState::Paused => SimState::Running,
        };
    }

    /// Per-frame update: pointer toggling first, then a rate-limited
    /// generation advance. Invoked once per host frame, not once per
    /// generation.
    pub fn tick(&mut self, pointer: Pointer) {
        self.tick_at(Instant::now(), pointer);
    }

    fn tick_at(&mut self, now: Instant, pointer: Pointer) {
        self.handle_pointer(pointer);

        if self.state == SimState::Paused {
            return;
        }
        if now.duration_since(self.last_update) < UPDATE_INTERVAL {
            return;
        }

        self.grid.step();
        self.last_update = now;
    }

    // A cell toggles on the edge where the pointer first covers it; holding
    // over the same cell does not re-toggle. A press outside the board keeps
    // the latch, so dragging off the board and back does not double-flip.
    fn handle_pointer(&mut self, pointer: Pointer) {
        match pointer {
            Pointer::Released => self.last_toggled = None,
            Pointer::Pressed(None) => {}
            Pointer::Pressed(Some((x, y))) => {
                if self.last_toggled != Some((x, y)) {
                    self.last_toggled = Some((x, y));
                    if let Err(err) = self.grid.toggle(x, y) {
                        log::warn!("pointer toggle ignored: {}", err);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn blinker_sim() -> Simulation {
        let mut grid = Grid::new(5, 5);
        for y in 1..4 {
            grid.toggle(2, y).unwrap();
        }
        Simulation::with_grid(grid)
    }

    fn population(sim: &Simulation) -> usize {
        let grid = sim.grid();
        let mut count = 0;
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                if grid.is_alive(x, y) {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn starts_running() {
        let mut rng = StdRng::seed_from_u64(1);
        let sim = Simulation::new(&mut rng);
        assert_eq!(sim.state, SimState::Running);
    }

    #[test]
    fn toggle_running_flips_between_the_two_states() {
        let mut sim = blinker_sim();
        sim.toggle_running();
        assert_eq!(sim.state, SimState::Paused);
        sim.toggle_running();
        assert_eq!(sim.state, SimState::Running);
    }

    #[test]
    fn tick_advances_only_after_the_update_interval() {
        let mut sim = blinker_sim();
        assert!(sim.grid().is_alive(2, 1));

        let t1 = sim.last_update + UPDATE_INTERVAL;
        sim.tick_at(t1, Pointer::Released);
        // Blinker flipped to horizontal.
        assert!(!sim.grid().is_alive(2, 1));
        assert!(sim.grid().is_alive(1, 2));

        // Too soon: nothing moves.
        sim.tick_at(t1 + UPDATE_INTERVAL / 2, Pointer::Released);
        assert!(sim.grid().is_alive(1, 2));

        sim.tick_at(t1 + UPDATE_INTERVAL, Pointer::Released);
        assert!(sim.grid().is_alive(2, 1));
        assert!(!sim.grid().is_alive(1, 2));
    }

    #[test]
    fn paused_tick_never_advances() {
        let mut sim = blinker_sim();
        sim.toggle_running();

        let far_future = sim.last_update + UPDATE_INTERVAL * 100;
        sim.tick_at(far_future, Pointer::Released);
        assert!(sim.grid().is_alive(2, 1));
        assert!(!sim.grid().is_alive(1, 2));
    }

    #[test]
    fn pointer_toggles_on_cell_edges_only() {
        let mut sim = blinker_sim();
        sim.toggle_running();
        let before = population(&sim);

        // First touch flips the cell.
        sim.tick_at(sim.last_update, Pointer::Pressed(Some((0, 0))));
        assert!(sim.grid().is_alive(0, 0));
        assert_eq!(population(&sim), before + 1);

        // Holding over the same cell does not re-toggle.
        sim.tick_at(sim.last_update, Pointer::Pressed(Some((0, 0))));
        assert!(sim.grid().is_alive(0, 0));

        // Dragging off the board keeps the latch.
        sim.tick_at(sim.last_update, Pointer::Pressed(None));
        sim.tick_at(sim.last_update, Pointer::Pressed(Some((0, 0))));
        assert!(sim.grid().is_alive(0, 0));

        // Dragging onto a different cell flips that one.
        sim.tick_at(sim.last_update, Pointer::Pressed(Some((4, 4))));
        assert!(sim.grid().is_alive(4, 4));

        // Release and press again re-toggles.
        sim.tick_at(sim.last_update, Pointer::Released);
        sim.tick_at(sim.last_update, Pointer::Pressed(Some((4, 4))));
        assert!(!sim.grid().is_alive(4, 4));
    }

    #[test]
    fn pointer_toggles_while_paused() {
        let mut sim = blinker_sim();
        sim.toggle_running();

        sim.tick_at(sim.last_update, Pointer::Pressed(Some((0, 4))));
        assert!(sim.grid().is_alive(0, 4));
    }
}
