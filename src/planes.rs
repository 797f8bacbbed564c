//! Contains the PlaneMapper struct, which describes the relationship
//! between an integral raster with an origin at 0,0 and a window onto
//! the complex plane.  The window is not given as a pair of corners;
//! it is derived from a ViewTransform (a zoom factor and a pan offset
//! in pixels), which is how the interactive controls express it.
use num::Complex;

/// The default field of view: the width of one pixel on the complex
/// plane at zoom 1.  An 800x600 raster at this scale spans roughly the
/// classic -2.4..2.4 view of the set.
pub const BASE_SCALE: f64 = 0.006;

/// Describes the x, y of a point in the raster.  All values are
/// assumed to be non-negative integers, with y growing downward.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Pixel(pub usize, pub usize);

/// The pan and zoom parameters supplied by the outside world (sliders,
/// pointer events, a command line).  Read-only to the core: the mapper
/// consumes one of these whenever a view is (re)built.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewTransform {
    /// Zoom multiplier.  Greater than zero; larger values magnify.
    pub zoom: f64,
    /// Horizontal pan, in raster pixels.
    pub translate_x: f64,
    /// Vertical pan, in raster pixels.
    pub translate_y: f64,
}

impl Default for ViewTransform {
    fn default() -> ViewTransform {
        ViewTransform {
            zoom: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
        }
    }
}

/// Maps pixels of a width x height raster onto the complex plane.  The
/// raster center (shifted by the pan offset) lands on the origin, and
/// the imaginary axis increases upward, so the y term is negated
/// relative to raster y, which increases downward.
#[derive(Debug)]
pub struct PlaneMapper {
    width: usize,
    height: usize,
    // Width of one pixel on the complex plane.
    scale: f64,
    center_x: f64,
    center_y: f64,
}

impl PlaneMapper {
    /// Constructor.  Takes the raster dimensions and the current view
    /// transform, and derives the effective scale and center from
    /// them.  Fails on an empty raster or a non-positive zoom.
    pub fn new(width: usize, height: usize, view: &ViewTransform) -> Result<PlaneMapper, String> {
        if width == 0 || height == 0 {
            return Err("The raster must be at least one pixel in each dimension.".to_string());
        }
        if !(view.zoom > 0.0) {
            return Err("The zoom factor must be greater than zero.".to_string());
        }
        Ok(PlaneMapper::with_scale(
            width,
            height,
            BASE_SCALE / view.zoom,
            view.translate_x,
            view.translate_y,
        ))
    }

    /// Constructor with an explicit per-pixel scale instead of a zoom
    /// factor.  The raster is assumed to be non-empty.
    pub fn with_scale(
        width: usize,
        height: usize,
        scale: f64,
        translate_x: f64,
        translate_y: f64,
    ) -> PlaneMapper {
        PlaneMapper {
            width,
            height,
            scale,
            center_x: (width as f64) / 2.0 + translate_x,
            center_y: (height as f64) / 2.0 + translate_y,
        }
    }

    /// The total number of points in the raster.  Used to size the
    /// point grid and the pixel buffer.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Describes that the raster is of a size.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The raster dimensions this mapper was built for.
    pub fn raster(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Given a pixel of the raster, return the complex number c that
    /// the pixel stands for under the current view.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(
            ((pixel.0 as f64) - self.center_x) * self.scale,
            -((pixel.1 as f64) - self.center_y) * self.scale,
        )
    }

    /// The linear offset of a pixel from the root of a row-major
    /// buffer covering the raster.
    pub fn pixel_to_offset(&self, pixel: &Pixel) -> usize {
        pixel.1 * self.width + pixel.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planemapper_fails_on_empty_raster() {
        let pm = PlaneMapper::new(0, 600, &ViewTransform::default());
        assert!(pm.is_err());
    }

    #[test]
    fn planemapper_fails_on_bad_zoom() {
        let view = ViewTransform {
            zoom: 0.0,
            ..ViewTransform::default()
        };
        assert!(PlaneMapper::new(800, 600, &view).is_err());
        let view = ViewTransform {
            zoom: -2.0,
            ..ViewTransform::default()
        };
        assert!(PlaneMapper::new(800, 600, &view).is_err());
    }

    #[test]
    fn center_pixel_maps_to_origin() {
        let pm = PlaneMapper::new(8, 8, &ViewTransform::default()).unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel(4, 4)), Complex::new(0.0, 0.0));
    }

    #[test]
    fn imaginary_axis_increases_upward() {
        let pm = PlaneMapper::with_scale(8, 8, 0.5, 0.0, 0.0);
        // Above the center on the raster means positive im.
        assert_eq!(pm.pixel_to_point(&Pixel(4, 2)), Complex::new(0.0, 1.0));
        assert_eq!(pm.pixel_to_point(&Pixel(4, 6)), Complex::new(0.0, -1.0));
        // Right of the center means positive re.
        assert_eq!(pm.pixel_to_point(&Pixel(6, 4)), Complex::new(1.0, 0.0));
    }

    #[test]
    fn translate_shifts_the_center() {
        let pm = PlaneMapper::with_scale(8, 8, 1.0, 1.0, -2.0);
        assert_eq!(pm.pixel_to_point(&Pixel(5, 2)), Complex::new(0.0, 0.0));
    }

    #[test]
    fn zoom_divides_the_base_scale() {
        let view = ViewTransform {
            zoom: 2.0,
            ..ViewTransform::default()
        };
        let pm = PlaneMapper::new(8, 8, &view).unwrap();
        let c = pm.pixel_to_point(&Pixel(5, 4));
        assert!((c.re - BASE_SCALE / 2.0).abs() < 1e-12);
        assert_eq!(c.im, 0.0);
    }

    #[test]
    fn offsets_are_row_major() {
        let pm = PlaneMapper::new(4, 3, &ViewTransform::default()).unwrap();
        assert_eq!(pm.len(), 12);
        assert!(!pm.is_empty());
        assert_eq!(pm.pixel_to_offset(&Pixel(0, 0)), 0);
        assert_eq!(pm.pixel_to_offset(&Pixel(3, 0)), 3);
        assert_eq!(pm.pixel_to_offset(&Pixel(0, 1)), 4);
        assert_eq!(pm.pixel_to_offset(&Pixel(3, 2)), 11);
    }
}
