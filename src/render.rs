//! The painting boundary.  The core never draws; it hands single-pixel
//! fill commands to a Renderer, which is whatever the embedding
//! supplies: a window canvas, a terminal, or the in-memory PixelBuffer
//! below, which the CLI binary encodes to a PPM file once the
//! animation drains.
use image::Rgb;

use planes::Pixel;

/// A surface the animation can paint on.  The driver only ever fills
/// single pixels and clears the surface when a new view is built.
pub trait Renderer {
    /// Paints one pixel.  Out-of-raster pixels may be ignored.
    fn fill_pixel(&mut self, pixel: Pixel, color: Rgb<u8>);
    /// Resets the surface to black at the given raster size.  Called
    /// once per view build, before any painting.
    fn clear(&mut self, width: usize, height: usize);
}

/// An in-memory RGB framebuffer, one byte per sample, rows laid out
/// top to bottom.
#[derive(Clone, Debug)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    samples: Vec<u8>,
}

impl PixelBuffer {
    /// A black buffer of the given raster size.
    pub fn new(width: usize, height: usize) -> PixelBuffer {
        PixelBuffer {
            width,
            height,
            samples: vec![0; width * height * 3],
        }
    }

    /// The raster dimensions of the buffer.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// The raw samples, three bytes per pixel, ready for an encoder.
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// The color currently stored for a pixel.
    pub fn pixel(&self, pixel: &Pixel) -> Rgb<u8> {
        let offset = (pixel.1 * self.width + pixel.0) * 3;
        Rgb {
            data: [
                self.samples[offset],
                self.samples[offset + 1],
                self.samples[offset + 2],
            ],
        }
    }
}

impl Renderer for PixelBuffer {
    fn fill_pixel(&mut self, pixel: Pixel, color: Rgb<u8>) {
        if pixel.0 >= self.width || pixel.1 >= self.height {
            return;
        }
        let offset = (pixel.1 * self.width + pixel.0) * 3;
        self.samples[offset] = color.data[0];
        self.samples[offset + 1] = color.data[1];
        self.samples[offset + 2] = color.data[2];
    }

    fn clear(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.samples = vec![0; width * height * 3];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_pixels_read_back() {
        let mut buffer = PixelBuffer::new(4, 3);
        buffer.fill_pixel(Pixel(2, 1), Rgb { data: [10, 20, 30] });
        assert_eq!(buffer.pixel(&Pixel(2, 1)), Rgb { data: [10, 20, 30] });
        assert_eq!(buffer.pixel(&Pixel(0, 0)), Rgb { data: [0, 0, 0] });
    }

    #[test]
    fn out_of_raster_fills_are_ignored() {
        let mut buffer = PixelBuffer::new(4, 3);
        buffer.fill_pixel(Pixel(4, 0), Rgb { data: [255, 255, 255] });
        buffer.fill_pixel(Pixel(0, 3), Rgb { data: [255, 255, 255] });
        assert!(buffer.samples().iter().all(|&s| s == 0));
    }

    #[test]
    fn clear_resizes_and_blanks() {
        let mut buffer = PixelBuffer::new(2, 2);
        buffer.fill_pixel(Pixel(1, 1), Rgb { data: [9, 9, 9] });
        buffer.clear(3, 2);
        assert_eq!(buffer.dimensions(), (3, 2));
        assert_eq!(buffer.samples().len(), 18);
        assert!(buffer.samples().iter().all(|&s| s == 0));
    }
}
