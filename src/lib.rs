#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Incremental Mandelbrot renderer
//!
//! The Mandelbrot set is drawn by taking the point c on the complex
//! plane that each pixel stands for and repeatedly applying
//! z = z * z + c, watching for the moment |z| exceeds a fixed bound.
//! Most renderers iterate each pixel to completion before moving on.
//! This one turns the loop inside out: every tick of an animation
//! applies one iteration to *all* points that have not yet escaped,
//! and the points that escape on the same tick are painted together
//! in a single color drawn from a sweeping palette.  The set emerges
//! band by band, earliest escapees first, while the interior stays
//! black for as long as the animation runs.
//!
//! The crate is the numeric and scheduling core of that animation.
//! The things it cannot know about its embedding arrive as
//! collaborators: a `Renderer` that can fill single pixels, a
//! `ViewTransform` carrying the pan/zoom state of whatever controls
//! the view, and a `TickScheduler` that supplies the pause between
//! ticks and may cancel the run.

extern crate crossbeam;
extern crate image;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;

pub mod driver;
pub mod engine;
pub mod planes;
pub mod points;
pub mod render;
pub mod sweep;

pub use driver::{
    AnimationDriver, DriverConfig, DriverState, ThreadScheduler, TickOutcome, TickScheduler,
};
pub use engine::{step_all, step_all_threaded, ESCAPE_THRESHOLD};
pub use planes::{Pixel, PlaneMapper, ViewTransform, BASE_SCALE};
pub use points::{PointGrid, PointState};
pub use render::{PixelBuffer, Renderer};
pub use sweep::{ChannelBounce, PaletteCycle, SweepPolicy, DEFAULT_COLOR_STEP};
