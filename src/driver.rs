// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The animation driver: the object that owns the point grid, the
//! color sweep, and the queue of pending ticks, and that turns the
//! crank.  A tick is one atomic batch: the whole grid is scanned once,
//! every point that escaped on that scan is painted with the one
//! current sweep color, and the sweep advances.  Ticks are strictly
//! sequential; the only suspension point is the scheduler wait between
//! one tick and the next.
//!
//! Rebuilding the view while ticks are queued is the cancellation
//! path: `build_view` requires exclusive access to the driver, resets
//! the queue to zero and replaces the grid wholesale, so no stale tick
//! can ever touch the new grid or paint with a stale sweep state.

use std::thread;
use std::time::Duration;

use engine::{step_all, step_all_threaded, ESCAPE_THRESHOLD};
use planes::{Pixel, PlaneMapper, ViewTransform};
use points::PointGrid;
use render::Renderer;
use sweep::SweepPolicy;

/// The delay between ticks when none is configured, matching the
/// near-immediate cadence of the interactive animation.
pub const DEFAULT_TICK_DELAY: Duration = Duration::from_millis(1);

/// The source of the pauses between ticks.  Injected so the core can
/// be driven synchronously in tests, and so an embedding can hook its
/// own timer in.
pub trait TickScheduler {
    /// Waits out the delay before the next tick.  Returning false
    /// cancels the pending tick and stops the current drain.
    fn wait(&mut self, delay: Duration) -> bool;
}

/// A scheduler that parks the current thread for the delay.
pub struct ThreadScheduler;

impl TickScheduler for ThreadScheduler {
    fn wait(&mut self, delay: Duration) -> bool {
        thread::sleep(delay);
        true
    }
}

/// The knobs of one animation session.
#[derive(Copy, Clone, Debug)]
pub struct DriverConfig {
    /// The escape bound |z| is tested against.
    pub threshold: f64,
    /// The pause between consecutive ticks of a drain.
    pub delay: Duration,
    /// Worker threads for the per-tick scan.  1 keeps the scan on the
    /// calling thread.
    pub threads: usize,
    /// Optional tick cap: once this many ticks have run, remaining
    /// unescaped points are presumed interior and the queue is
    /// dropped.  None iterates for as long as ticks keep arriving.
    pub max_ticks: Option<usize>,
}

impl Default for DriverConfig {
    fn default() -> DriverConfig {
        DriverConfig {
            threshold: ESCAPE_THRESHOLD,
            delay: DEFAULT_TICK_DELAY,
            threads: 1,
            max_ticks: None,
        }
    }
}

/// Where the driver is in its lifecycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DriverState {
    /// No view has been built yet; ticks cannot be enqueued.
    Idle,
    /// A grid exists and the queue is empty.
    Ready,
    /// A grid exists and ticks are waiting to run.
    Running,
}

/// What one call to `tick` (or the last tick of a `drain`) did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// A tick ran: this many points escaped and were painted, and this
    /// many remain unescaped.
    Ran {
        /// Points that escaped and were painted on this tick.
        escaped: usize,
        /// Points still iterating after this tick.
        remaining: usize,
    },
    /// The queue was empty; nothing ran.
    Drained,
    /// The configured tick cap was reached; this many points remain
    /// unescaped and are presumed interior.
    Exhausted {
        /// Points presumed to be inside the set.
        interior: usize,
    },
}

/// The animation driver.  Owns all mutable animation state; every
/// mutation goes through its methods.
pub struct AnimationDriver {
    config: DriverConfig,
    // The sweep as configured, kept pristine so build_view can reset
    // the working copy.
    initial_sweep: SweepPolicy,
    sweep: SweepPolicy,
    grid: Option<PointGrid>,
    queued: usize,
    ticks_run: usize,
}

impl AnimationDriver {
    /// Constructor.  The driver starts Idle; nothing runs until a
    /// view is built.
    pub fn new(config: DriverConfig, sweep: SweepPolicy) -> AnimationDriver {
        AnimationDriver {
            config,
            initial_sweep: sweep.clone(),
            sweep,
            grid: None,
            queued: 0,
            ticks_run: 0,
        }
    }

    /// The driver's current lifecycle state.
    pub fn state(&self) -> DriverState {
        match self.grid {
            None => DriverState::Idle,
            Some(_) if self.queued > 0 => DriverState::Running,
            Some(_) => DriverState::Ready,
        }
    }

    /// Ticks currently waiting to run.
    pub fn queued(&self) -> usize {
        self.queued
    }

    /// Ticks run since the last view build.
    pub fn ticks_run(&self) -> usize {
        self.ticks_run
    }

    /// The current point grid, if a view has been built.
    pub fn grid(&self) -> Option<&PointGrid> {
        self.grid.as_ref()
    }

    /// The pixels still unescaped, which after an `Exhausted` outcome
    /// are presumed to be inside the set.
    pub fn interior_pixels(&self) -> Vec<Pixel> {
        match self.grid {
            Some(ref grid) => grid
                .points()
                .iter()
                .filter(|point| !point.escaped)
                .map(|point| point.pixel)
                .collect(),
            None => vec![],
        }
    }

    /// (Re)establishes the view: clears the renderer, maps every pixel
    /// of the raster to its plane coordinate, and resets the sweep,
    /// the queue and the tick count.  This is the only operation that
    /// replaces the point grid, and it cancels anything queued.
    pub fn build_view<R: Renderer>(
        &mut self,
        view: &ViewTransform,
        width: usize,
        height: usize,
        renderer: &mut R,
    ) -> Result<(), String> {
        let mapper = PlaneMapper::new(width, height, view)?;
        renderer.clear(width, height);
        self.grid = Some(PointGrid::new(&mapper));
        self.sweep = self.initial_sweep.clone();
        self.queued = 0;
        self.ticks_run = 0;
        info!(
            "view built: {}x{} raster, zoom {}, translate ({}, {})",
            width, height, view.zoom, view.translate_x, view.translate_y
        );
        Ok(())
    }

    /// Adds `n` ticks to the queue and returns the new queue depth.
    /// Reports an error, rather than crashing or silently dropping,
    /// when no view has been built yet.
    pub fn enqueue(&mut self, n: usize) -> Result<usize, String> {
        if self.grid.is_none() {
            return Err("No view has been built yet; call build_view first.".to_string());
        }
        self.queued += n;
        Ok(self.queued)
    }

    /// Runs at most one queued tick: one full scan of the unescaped
    /// points, one batch paint in the single current sweep color, one
    /// sweep advance.  Returns without running anything if the queue
    /// is empty or the tick cap has been reached.
    pub fn tick<R: Renderer>(&mut self, renderer: &mut R) -> TickOutcome {
        let grid = match self.grid {
            Some(ref mut grid) => grid,
            None => return TickOutcome::Drained,
        };
        if self.queued == 0 {
            return TickOutcome::Drained;
        }
        if let Some(cap) = self.config.max_ticks {
            if self.ticks_run >= cap {
                self.queued = 0;
                let interior = grid.points().iter().filter(|p| !p.escaped).count();
                info!(
                    "tick cap {} reached; {} points presumed interior",
                    cap, interior
                );
                return TickOutcome::Exhausted { interior };
            }
        }
        self.queued -= 1;

        let color = self.sweep.current();
        let newly_escaped = if self.config.threads > 1 {
            step_all_threaded(grid.points_mut(), self.config.threshold, self.config.threads)
        } else {
            step_all(grid.points_mut(), self.config.threshold)
        };
        for &offset in &newly_escaped {
            renderer.fill_pixel(grid.points()[offset].pixel, color);
        }
        self.sweep.advance();
        self.ticks_run += 1;

        let remaining = grid.points().iter().filter(|p| !p.escaped).count();
        debug!(
            "tick {}: {} escaped, {} remaining, {} queued",
            self.ticks_run,
            newly_escaped.len(),
            remaining,
            self.queued
        );
        TickOutcome::Ran {
            escaped: newly_escaped.len(),
            remaining,
        }
    }

    /// Drains the queue cooperatively: tick, wait, tick, until the
    /// queue empties, the cap trips, or the scheduler cancels.  Each
    /// tick runs to completion before the wait; no tick ever overlaps
    /// another.  Returns the outcome of the last tick.
    pub fn drain<R: Renderer, S: TickScheduler>(
        &mut self,
        renderer: &mut R,
        scheduler: &mut S,
    ) -> TickOutcome {
        loop {
            let outcome = self.tick(renderer);
            match outcome {
                TickOutcome::Ran { .. } => {
                    if self.queued == 0 {
                        return outcome;
                    }
                    if !scheduler.wait(self.config.delay) {
                        return outcome;
                    }
                }
                _ => return outcome,
            }
        }
    }
}
