pub mod cell;

use log::{debug, trace};

use crate::config::{Config, ConfigError};
use crate::life::cell::{next_state, Cell, CellState};
use crate::surface::Surface;

/// Generate a pseudorandom seed for the board's PRNG.
pub fn generate_seed() -> (u64, u64) {
    use byteorder::{ByteOrder, NativeEndian};
    use getrandom::getrandom;

    let mut seed = [0_u8; 16];

    getrandom(&mut seed).expect("failed to getrandom");

    (
        NativeEndian::read_u64(&seed[0..8]),
        NativeEndian::read_u64(&seed[8..16]),
    )
}

/// Supplies the initial state of each cell.
pub trait StateSource {
    fn next_state(&mut self) -> CellState;
}

impl StateSource for randomize::PCG32 {
    fn next_state(&mut self) -> CellState {
        CellState::from(randomize::f32_half_open_right(self.next_u32()) >= 0.5)
    }
}

impl<F: FnMut() -> CellState> StateSource for F {
    fn next_state(&mut self) -> CellState {
        self()
    }
}

/// A wrap-around grid of cells, stored column by column.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Board {
    cell_width: u32,
    columns: usize,
    rows: usize,
    cells: Vec<Cell>,
    generation: u64,
}

impl Board {
    pub fn new_empty(config: &Config) -> Result<Self, ConfigError> {
        Self::new_seeded(config, &mut || CellState::Dead)
    }

    pub fn new_random(config: &Config) -> Result<Self, ConfigError> {
        let mut rng: randomize::PCG32 = generate_seed().into();
        Self::new_seeded(config, &mut rng)
    }

    pub fn new_seeded<S: StateSource + ?Sized>(
        config: &Config,
        source: &mut S,
    ) -> Result<Self, ConfigError> {
        let size = config.grid_size()?;
        let w = config.cell_width;

        let mut cells = Vec::with_capacity(size.columns * size.rows);
        for column in 0..size.columns {
            for row in 0..size.rows {
                let x = column as u32 * w;
                let y = row as u32 * w;
                cells.push(Cell::new(x, y, w, source.next_state()));
            }
        }

        debug!(
            "board of {}x{} cells, {}px each",
            size.columns, size.rows, config.cell_width
        );

        Ok(Self {
            cell_width: config.cell_width,
            columns: size.columns,
            rows: size.rows,
            cells,
            generation: 0,
        })
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell_width(&self) -> u32 {
        self.cell_width
    }

    /// Number of completed generations.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.state().is_alive()).count()
    }

    pub fn cell(&self, column: usize, row: usize) -> Option<&Cell> {
        self.index(column, row).map(|i| &self.cells[i])
    }

    pub fn cell_mut(&mut self, column: usize, row: usize) -> Option<&mut Cell> {
        self.index(column, row).map(move |i| &mut self.cells[i])
    }

    /// Every cell, column by column.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter()
    }

    fn index(&self, column: usize, row: usize) -> Option<usize> {
        if column < self.columns && row < self.rows {
            Some(column * self.rows + row)
        } else {
            None
        }
    }

    fn wrapped_index(&self, column: isize, row: isize) -> usize {
        let column = column.rem_euclid(self.columns as isize) as usize;
        let row = row.rem_euclid(self.rows as isize) as usize;
        column * self.rows + row
    }

    /// Live cells around `(column, row)` in the last snapshot.
    pub fn live_neighbors(&self, column: usize, row: usize) -> u8 {
        let alive = |i: usize| self.cells[i].previous().map_or(0, |s| s as u8);
        let (c, r) = (column as isize, row as isize);

        let mut sum = 0;
        for dc in -1..=1 {
            for dr in -1..=1 {
                sum += alive(self.wrapped_index(c + dc, r + dr));
            }
        }
        sum - alive(self.wrapped_index(c, r))
    }

    /// Advance every cell by one generation.
    pub fn generate(&mut self) {
        // The whole grid is snapshotted before any cell is re-evaluated
        for cell in self.cells.iter_mut() {
            cell.save_previous();
        }

        for column in 0..self.columns {
            for row in 0..self.rows {
                let neighbors = self.live_neighbors(column, row);
                let i = column * self.rows + row;
                let previous = self.cells[i].previous().unwrap_or_default();
                self.cells[i].set_state(next_state(previous, neighbors));
            }
        }

        self.generation += 1;
        trace!(
            "generation {}: {} alive",
            self.generation,
            self.population()
        );
    }

    pub fn display<S: Surface + ?Sized>(&self, surface: &mut S) {
        for cell in self.cells.iter() {
            surface.fill_rect(cell.x, cell.y, cell.width, cell.width, cell.shade().rgba());
        }
    }
}

/// A board bound to the surface it is drawn on.
pub struct Life<S> {
    board: Board,
    surface: S,
}

impl<S: Surface> Life<S> {
    /// Fill `surface` with randomly seeded cells `cell_width` pixels wide.
    pub fn new(surface: S, cell_width: u32) -> Result<Self, ConfigError> {
        let board = Board::new_random(&Self::layout(&surface, cell_width))?;
        Ok(Self { board, surface })
    }

    pub fn with_source<R: StateSource + ?Sized>(
        surface: S,
        cell_width: u32,
        source: &mut R,
    ) -> Result<Self, ConfigError> {
        let board = Board::new_seeded(&Self::layout(&surface, cell_width), source)?;
        Ok(Self { board, surface })
    }

    fn layout(surface: &S, cell_width: u32) -> Config {
        let (width, height) = surface.size();
        Config::new(width, height).with_cell_width(cell_width)
    }

    /// Draw the next frame.
    pub fn tick(&mut self) {
        self.surface.clear();
        self.board.generate();
        self.board.display(&mut self.surface);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::life::cell::Shade;
    use crate::surface::FrameBuffer;
    use CellState::{Alive, Dead};

    fn board(columns: u32, rows: u32, live: &[(usize, usize)]) -> Board {
        let config = Config::new(columns, rows).with_cell_width(1);
        let mut board = Board::new_empty(&config).unwrap();
        for &(c, r) in live {
            board.cell_mut(c, r).unwrap().set_state(Alive);
        }
        board
    }

    fn live_cells(board: &Board) -> Vec<(usize, usize)> {
        let mut live = Vec::new();
        for c in 0..board.columns() {
            for r in 0..board.rows() {
                if board.cell(c, r).unwrap().state().is_alive() {
                    live.push((c, r));
                }
            }
        }
        live
    }

    #[test]
    fn three_live_cells_fill_a_three_by_three_torus() {
        // on a 3x3 torus every neighborhood is the whole grid
        let mut b = board(3, 3, &[(0, 0), (1, 1), (2, 0)]);
        b.generate();
        assert_eq!(b.population(), 9);

        b.generate();
        assert_eq!(b.population(), 0);
    }

    #[test]
    fn lone_cell_dies() {
        let mut b = board(3, 3, &[(1, 1)]);
        b.generate();
        assert!(live_cells(&b).is_empty());
    }

    #[test]
    fn four_live_cells_on_three_by_three_hold() {
        let live = [(0, 0), (0, 1), (2, 2), (1, 2)];
        let mut b = board(3, 3, &live);
        b.generate();

        let mut expected = live.to_vec();
        expected.sort();
        assert_eq!(live_cells(&b), expected);
    }

    #[test]
    fn neighbors_wrap_around_the_corner() {
        let mut b = board(5, 5, &[(0, 0), (4, 4)]);
        for cell in b.cells.iter_mut() {
            cell.save_previous();
        }
        assert_eq!(b.live_neighbors(0, 0), 1);
        assert_eq!(b.live_neighbors(4, 4), 1);
        assert_eq!(b.live_neighbors(2, 2), 0);
    }

    #[test]
    fn births_happen_across_the_edge() {
        let mut b = board(5, 5, &[(0, 0), (4, 4), (0, 4)]);
        b.generate();

        assert_eq!(b.cell(4, 0).unwrap().state(), Alive);
        assert_eq!(b.cell(0, 0).unwrap().state(), Alive);
    }

    #[test]
    fn dead_board_stays_dead() {
        let mut b = board(7, 4, &[]);
        for _ in 0..10 {
            b.generate();
        }
        assert_eq!(b.population(), 0);
    }

    #[test]
    fn block_is_still() {
        let block = [(2, 2), (2, 3), (3, 2), (3, 3)];
        let mut b = board(6, 6, &block);
        b.generate();
        assert_eq!(live_cells(&b), block.to_vec());
    }

    #[test]
    fn generation_counts_calls() {
        let mut b = board(4, 4, &[]);
        assert_eq!(b.generation(), 0);
        b.generate();
        assert_eq!(b.generation(), 1);
        b.generate();
        b.generate();
        assert_eq!(b.generation(), 3);
    }

    #[test]
    fn same_seed_same_board() {
        let config = Config::new(40, 30).with_cell_width(2);
        let mut rng_a: randomize::PCG32 = (7, 11).into();
        let mut rng_b: randomize::PCG32 = (7, 11).into();
        let mut a = Board::new_seeded(&config, &mut rng_a).unwrap();
        let mut b = Board::new_seeded(&config, &mut rng_b).unwrap();
        assert_eq!(a, b);

        for _ in 0..5 {
            a.generate();
            b.generate();
            assert_eq!(a, b);
        }
    }

    fn assert_about_half_alive(b: &Board) {
        let total = b.columns() * b.rows();
        let alive = b.population();
        assert!(
            alive * 100 >= total * 45 && alive * 100 <= total * 55,
            "{alive} of {total} alive"
        );
    }

    #[test]
    fn seeded_board_starts_about_half_alive() {
        let config = Config::new(200, 200).with_cell_width(1);
        let mut rng: randomize::PCG32 = (42, 54).into();
        let b = Board::new_seeded(&config, &mut rng).unwrap();
        assert_about_half_alive(&b);
    }

    #[test]
    fn random_board_starts_about_half_alive() {
        let config = Config::new(200, 200).with_cell_width(1);
        let b = Board::new_random(&config).unwrap();
        assert_about_half_alive(&b);
    }

    #[test]
    fn custom_source_sets_initial_states() {
        let config = Config::new(2, 2).with_cell_width(1);
        let mut states = [Alive, Dead, Dead, Alive].into_iter();
        let b = Board::new_seeded(&config, &mut || states.next().unwrap_or(Dead)).unwrap();

        assert_eq!(live_cells(&b), vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn cells_are_placed_by_width() {
        let config = Config::new(20, 10).with_cell_width(5);
        let b = Board::new_empty(&config).unwrap();
        let cell = b.cell(3, 1).unwrap();

        assert_eq!((cell.x, cell.y, cell.width), (15, 5, 5));
        assert_eq!(b.cell_width(), 5);
        assert!(b.cell(4, 0).is_none());
        assert_eq!(b.cells().count(), 8);
    }

    #[test]
    fn zero_width_board_is_rejected() {
        let config = Config::new(20, 10).with_cell_width(0);
        assert_eq!(Board::new_empty(&config), Err(ConfigError::ZeroCellWidth));
    }

    #[test]
    fn tick_paints_transitions() {
        let mut states = [Alive, Dead, Alive, Alive].into_iter();
        // 2x2 cells of 2px; every neighborhood sees each cell more than once
        let mut life =
            Life::with_source(FrameBuffer::new(4, 4), 2, &mut || states.next().unwrap_or(Dead))
                .unwrap();

        life.tick();

        let board = life.board();
        for cell in board.cells() {
            let painted = life.surface().pixel(cell.x, cell.y).unwrap();
            assert_eq!(painted, cell.shade().rgba());
        }
        assert_eq!(board.generation(), 1);
        assert_ne!(board.cell(0, 0).unwrap().shade(), Shade::Dead);
    }
}
