//! The per-pixel iteration state and the grid that holds it.  One
//! PointState exists for every pixel of the raster; the whole grid is
//! built in a single pass when a view is established and replaced
//! wholesale when the view changes.  It is never resized or reordered
//! mid-animation.
use itertools::iproduct;
use num::Complex;

use planes::{Pixel, PlaneMapper};

/// The iteration state of a single pixel.  The constant term c is
/// fixed at creation; the iterate z and its magnitude accumulate one
/// application of z * z + c per tick until the point escapes.
#[derive(Copy, Clone, Debug)]
pub struct PointState {
    /// The raster coordinate this state belongs to.  Fixed for the
    /// state's lifetime.
    pub pixel: Pixel,
    /// The mapped plane coordinate c, computed once from the pixel
    /// and the view transform.
    pub constant: Complex<f64>,
    /// The cumulative iterate z.  Starts at the origin.
    pub iterate: Complex<f64>,
    /// |z| after the last iteration.  Starts at 0.
    pub magnitude: f64,
    /// Set the first tick |z| exceeds the escape threshold, and never
    /// reverts.  An escaped point is frozen: its other fields stop
    /// changing.
    pub escaped: bool,
}

impl PointState {
    /// A fresh, unescaped state for one pixel under the given mapper.
    pub fn new(pixel: Pixel, mapper: &PlaneMapper) -> PointState {
        PointState {
            pixel,
            constant: mapper.pixel_to_point(&pixel),
            iterate: Complex::new(0.0, 0.0),
            magnitude: 0.0,
            escaped: false,
        }
    }
}

/// All of the PointStates for one raster, in a flat row-major vector
/// so that a pixel's state sits at offset y * width + x.
#[derive(Clone, Debug)]
pub struct PointGrid {
    width: usize,
    height: usize,
    points: Vec<PointState>,
}

impl PointGrid {
    /// Builds the full grid for the mapper's raster, every point at
    /// z = 0 and unescaped.  O(width * height); this is the only
    /// place point states are created.
    pub fn new(mapper: &PlaneMapper) -> PointGrid {
        let (width, height) = mapper.raster();
        let mut points = Vec::with_capacity(mapper.len());
        for (y, x) in iproduct!(0..height, 0..width) {
            points.push(PointState::new(Pixel(x, y), mapper));
        }
        PointGrid {
            width,
            height,
            points,
        }
    }

    /// The number of points in the grid.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Describes that the grid is of a size.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The raster dimensions the grid was built for.
    pub fn raster(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Read access to the flat point array.
    pub fn points(&self) -> &[PointState] {
        &self.points
    }

    /// Write access to the flat point array, for the escape-time
    /// engine's per-tick scan.
    pub fn points_mut(&mut self) -> &mut [PointState] {
        &mut self.points
    }
}
