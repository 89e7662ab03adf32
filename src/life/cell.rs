use crate::surface::Rgba;

#[derive(Copy, Clone, Debug, Default, Hash, Eq, PartialEq)]
pub enum CellState {
    #[default]
    Dead = 0,
    Alive = 1,
}

impl CellState {
    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive { CellState::Alive } else { CellState::Dead }
    }
}

/// Classic Life rule applied to a cell's last snapshot.
pub fn next_state(previous: CellState, live_neighbors: u8) -> CellState {
    match previous {
        // underpopulation
        CellState::Alive if live_neighbors < 2 => CellState::Dead,
        // overpopulation
        CellState::Alive if live_neighbors > 3 => CellState::Dead,
        // reproduction
        CellState::Dead if live_neighbors == 3 => CellState::Alive,
        _ => previous,
    }
}

/// How a cell is drawn, picked from the transition it just went through.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Shade {
    Born,
    Alive,
    Died,
    Dead,
}

impl Shade {
    pub fn of(previous: Option<CellState>, state: CellState) -> Self {
        match (previous, state) {
            (Some(CellState::Dead), CellState::Alive) => Shade::Born,
            (Some(CellState::Alive), CellState::Alive) => Shade::Alive,
            (Some(CellState::Alive), CellState::Dead) => Shade::Died,
            // before the first generation there is no transition to show
            _ => Shade::Dead,
        }
    }

    pub fn rgba(self) -> Rgba {
        match self {
            Shade::Born => [0x7f, 0x97, 0xa1, 0xff],
            Shade::Alive => [0x2d, 0x36, 0x3d, 0xff],
            Shade::Died => [0x10, 0xb3, 0xd2, 0xff],
            Shade::Dead => [0xc3, 0xd3, 0xd2, 0xff],
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Cell {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    state: CellState,
    previous: Option<CellState>,
}

impl Cell {
    pub fn new(x: u32, y: u32, width: u32, state: CellState) -> Self {
        Self {
            x,
            y,
            width,
            state,
            previous: None,
        }
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    /// State at the start of the latest generation, `None` before the first.
    pub fn previous(&self) -> Option<CellState> {
        self.previous
    }

    pub fn save_previous(&mut self) {
        self.previous = Some(self.state);
    }

    pub fn set_state(&mut self, state: CellState) {
        self.state = state;
    }

    pub fn shade(&self) -> Shade {
        Shade::of(self.previous, self.state)
    }
}
