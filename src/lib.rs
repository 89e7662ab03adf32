pub mod config;
pub mod life;
pub mod surface;

use error_iter::ErrorIter as _;
use log::{debug, error, info};
use pixels::{Pixels, SurfaceTexture};
use thiserror::Error;
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::KeyCode;
use winit::window::WindowBuilder;
use winit_input_helper::WinitInputHelper;

pub use crate::config::{Config, ConfigError, GridSize, DEFAULT_CELL_WIDTH};
pub use crate::life::cell::{Cell, CellState, Shade};
pub use crate::life::{Board, Life, StateSource};
pub use crate::surface::{FrameBuffer, PixelSurface, Surface};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("pixels: {0}")]
    Pixels(#[from] pixels::Error),
    #[error("event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("window: {0}")]
    Window(#[from] winit::error::OsError),
}

/// Open a window and advance one generation per frame until it is closed.
pub fn run(width: f64, height: f64, cell_width: u32) -> Result<(), Error> {
    env_logger::init();
    let event_loop = EventLoop::new()?;
    let mut input = WinitInputHelper::new();

    let window = {
        let size = LogicalSize::new(width, height);
        WindowBuilder::new()
            .with_title("Game of Life")
            .with_inner_size(size)
            .build(&event_loop)?
    };

    let surface = {
        let window_size = window.inner_size();
        let texture = SurfaceTexture::new(window_size.width, window_size.height, &window);
        PixelSurface::new(Pixels::new(window_size.width, window_size.height, texture)?)
    };

    let mut life = Life::new(surface, cell_width)?;
    info!(
        "{}x{} cells of {}px",
        life.board().columns(),
        life.board().rows(),
        life.board().cell_width()
    );

    event_loop.run(|event, elwt| {
        if let Event::WindowEvent {
            event: WindowEvent::RedrawRequested,
            ..
        } = event
        {
            life.tick();
            if let Err(err) = life.surface().render() {
                log_error("pixels.render", err);
                elwt.exit();
                return;
            }
        }

        // winit_input_helper says when a frame's worth of events has arrived
        if input.update(&event) {
            if input.key_pressed(KeyCode::Escape) || input.close_requested() {
                elwt.exit();
                return;
            }
            if let Some(size) = input.window_resized() {
                debug!("window resized to {}x{}", size.width, size.height);
                if let Err(err) = life.surface_mut().resize_surface(size.width, size.height) {
                    log_error("pixels.resize_surface", err);
                    elwt.exit();
                    return;
                }
            }
            window.request_redraw();
        }
    })?;

    info!("stopped after {} generations", life.board().generation());
    Ok(())
}

fn log_error<E: std::error::Error + 'static>(method_name: &str, err: E) {
    error!("{method_name}() failed: {err}");
    for source in err.sources().skip(1) {
        error!("  Caused by: {source}");
    }
}
