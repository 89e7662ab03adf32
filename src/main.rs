#![forbid(unsafe_code)]

use torus_life::DEFAULT_CELL_WIDTH;

const WINDOW_WIDTH: f64 = 1280.;
const WINDOW_HEIGHT: f64 = 720.;

fn main() -> Result<(), torus_life::Error> {
    torus_life::run(WINDOW_WIDTH, WINDOW_HEIGHT, DEFAULT_CELL_WIDTH)
}
