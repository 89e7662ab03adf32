use pixels::Pixels;

pub type Rgba = [u8; 4];

/// Cleared pixels are fully transparent.
pub const CLEAR: Rgba = [0, 0, 0, 0];

/// Something a board can paint itself onto.
pub trait Surface {
    /// Width and height in pixels.
    fn size(&self) -> (u32, u32);
    fn clear(&mut self);
    /// Fill an axis-aligned rectangle. Anything outside the surface is clipped.
    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Rgba);
}

fn fill(frame: &mut [u8], stride: u32, x: u32, y: u32, width: u32, height: u32, color: Rgba) {
    let rows = frame.len() / (stride as usize * 4).max(1);
    let right = x.saturating_add(width).min(stride) as usize;
    let bottom = (y.saturating_add(height) as usize).min(rows);
    let left = x as usize;
    if left >= right {
        return;
    }

    for row in (y as usize)..bottom {
        let start = (row * stride as usize + left) * 4;
        let end = (row * stride as usize + right) * 4;
        for pix in frame[start..end].chunks_exact_mut(4) {
            pix.copy_from_slice(&color);
        }
    }
}

/// An RGBA8 frame kept in memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn frame(&self) -> &[u8] {
        &self.data
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let mut color = CLEAR;
        color.copy_from_slice(&self.data[i..i + 4]);
        Some(color)
    }
}

impl Surface for FrameBuffer {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        for pix in self.data.chunks_exact_mut(4) {
            pix.copy_from_slice(&CLEAR);
        }
    }

    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Rgba) {
        fill(&mut self.data, self.width, x, y, width, height, color);
    }
}

/// The window's pixel buffer, presented with [`PixelSurface::render`].
pub struct PixelSurface {
    pixels: Pixels,
}

impl PixelSurface {
    pub fn new(pixels: Pixels) -> Self {
        Self { pixels }
    }

    pub fn render(&self) -> Result<(), pixels::Error> {
        self.pixels.render()
    }

    pub fn resize_surface(&mut self, width: u32, height: u32) -> Result<(), pixels::TextureError> {
        self.pixels.resize_surface(width, height)
    }
}

impl Surface for PixelSurface {
    /// Size of the pixel buffer, which stays fixed when the window is resized.
    fn size(&self) -> (u32, u32) {
        let extent = self.pixels.context().texture_extent;
        (extent.width, extent.height)
    }

    fn clear(&mut self) {
        for pix in self.pixels.frame_mut().chunks_exact_mut(4) {
            pix.copy_from_slice(&CLEAR);
        }
    }

    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Rgba) {
        let (stride, _) = self.size();
        fill(self.pixels.frame_mut(), stride, x, y, width, height, color);
    }
}
