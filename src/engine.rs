// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time engine.  One call to `step_all` is one tick: it
//! applies z = z * z + c once to every point that has not yet escaped,
//! flags the points whose magnitude crossed the threshold on this
//! tick, and reports them so the color sweep can paint them as a
//! batch.  Points whose orbit stays inside the threshold disk are
//! assumed (not proven) to belong to the set, and there is no
//! iteration cap here: the animation is driven by ticks, not by a
//! maximum iteration count.  The opt-in cap lives in the driver.

use crossbeam::thread::ScopedJoinHandle;

use points::PointState;

/// The standard escape bound for z * z + c: once |z| exceeds 2 the
/// orbit is guaranteed to diverge.
pub const ESCAPE_THRESHOLD: f64 = 2.0;

/// Advances every unescaped point in the slice by one iteration and
/// returns the offsets of the points that escaped on this tick, in
/// raster order.  Already-escaped points are skipped entirely, so the
/// cost of a tick is proportional to the remaining unescaped
/// population.  An iterate that overflows to infinity compares above
/// the threshold and is counted as escaped.
pub fn step_all(points: &mut [PointState], threshold: f64) -> Vec<usize> {
    let mut newly_escaped = vec![];
    for (offset, point) in points.iter_mut().enumerate() {
        if point.escaped {
            continue;
        }
        point.iterate = point.iterate * point.iterate + point.constant;
        point.magnitude = point.iterate.norm();
        if point.magnitude > threshold {
            point.escaped = true;
            newly_escaped.push(offset);
        }
    }
    newly_escaped
}

/// The multi-threaded version of `step_all`.  No point affects any
/// other, so the scan is split into disjoint chunks, one scoped thread
/// each; the scope join is the barrier that guarantees every update
/// has landed before the caller paints the batch.  The result is the
/// same offsets `step_all` would have returned, in the same order.
pub fn step_all_threaded(points: &mut [PointState], threshold: f64, threads: usize) -> Vec<usize> {
    if threads <= 1 || points.len() <= threads {
        return step_all(points, threshold);
    }
    let chunk_size = (points.len() + threads - 1) / threads;
    let mut newly_escaped: Vec<usize> = vec![];
    crossbeam::scope(|spawner| {
        let handles: Vec<ScopedJoinHandle<Vec<usize>>> = points
            .chunks_mut(chunk_size)
            .enumerate()
            .map(|(chunk, points)| {
                let base = chunk * chunk_size;
                spawner.spawn(move |_| {
                    step_all(points, threshold)
                        .into_iter()
                        .map(|offset| base + offset)
                        .collect()
                })
            })
            .collect();

        newly_escaped = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .flatten()
            .collect()
    })
    .unwrap();
    newly_escaped
}
