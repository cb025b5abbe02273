//! Pairwise gravitational kicks for the n-body engine
//!
//! A kick applies one timestep worth of mutual Newtonian attraction to every
//! body's velocity. Positions are only read here; the drift lives in
//! [`crate::simulation::integrator`].
//!
//! Two implementations share the same per-pair arithmetic:
//! - [`DirectKick`]   sequential i < j loop, bit-reproducible
//! - [`ParallelKick`] a capped number of pair blocks on rayon, merged in block order

use rayon::prelude::*;

use crate::simulation::states::{NVec3, System};

/// Velocity update strategy for one step of length `dt`
pub trait PairwiseKick {
    fn kick(&self, dt: f64, sys: &mut System);

    /// Short label for logs and benchmark tables
    fn name(&self) -> &'static str;
}

/// Displacement `xi - xj` and the shared factor `dt / r^3` for one pair.
#[inline]
fn pair_coupling(xi: &NVec3, xj: &NVec3, dt: f64) -> (NVec3, f64) {
    let d = xi - xj;
    let r2 = d.dot(&d);
    // dt / (r2 * r) avoids a second division
    let mag = dt / (r2 * r2.sqrt());
    (d, mag)
}

/// Number of unordered pairs among `n` bodies
pub fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Row-major walk over the unordered pairs `(i, j)`, `i < j`, starting at
/// linear pair index `start` and yielding `len` pairs.
fn pairs_from(n: usize, start: usize, len: usize) -> impl Iterator<Item = (usize, usize)> {
    // Locate the row holding pair `start`
    let mut i = 0;
    let mut skip = start;
    while i < n && skip >= n - i - 1 {
        skip -= n - i - 1;
        i += 1;
    }
    let mut j = i + 1 + skip;

    (0..len).map(move |_| {
        let pair = (i, j);
        j += 1;
        if j == n {
            i += 1;
            j = i + 1;
        }
        pair
    })
}

/// Direct O(N^2) summation, one pass over every unordered pair.
///
/// Pairs are visited with `i` increasing, then `j` increasing. Each pair
/// updates both velocities once, with equal and opposite momentum changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectKick;

impl PairwiseKick for DirectKick {
    fn kick(&self, dt: f64, sys: &mut System) {
        let bodies = sys.bodies_mut();
        let n = bodies.len();

        for i in 0..n {
            // bi is the left side of every pair in this row
            let (head, tail) = bodies.split_at_mut(i + 1);
            let bi = &mut head[i];

            for bj in tail.iter_mut() {
                let (d, mag) = pair_coupling(&bi.x, &bj.x, dt);

                // i is pulled toward j (-d), j toward i (+d)
                bi.v -= d * (bj.m * mag);
                bj.v += d * (bi.m * mag);
            }
        }
    }

    fn name(&self) -> &'static str {
        "direct"
    }
}

/// Pair-block parallel summation.
///
/// The row-major pair sequence is cut into at most [`ParallelKick::MAX_BLOCKS`]
/// contiguous blocks of at least `pairs_per_task` pairs. Every block
/// accumulates into its own per-body delta buffer, so no two tasks write the
/// same memory. Buffers are merged on the calling thread in block order.
/// Block boundaries depend only on `n` and `pairs_per_task`, never on the
/// thread count, so the result is reproducible. The addition order differs
/// from [`DirectKick`], so the two agree only up to rounding.
#[derive(Debug, Clone, Copy)]
pub struct ParallelKick {
    pub pairs_per_task: usize,
}

impl ParallelKick {
    pub const DEFAULT_PAIRS_PER_TASK: usize = 64;

    /// Upper bound on delta buffers per step; keeps allocation and merge O(N)
    pub const MAX_BLOCKS: usize = 32;

    pub fn new(pairs_per_task: usize) -> Self {
        Self {
            pairs_per_task: pairs_per_task.max(1),
        }
    }

    /// Pairs per block and number of blocks for `n` bodies
    pub fn block_layout(&self, n: usize) -> (usize, usize) {
        let pairs = pair_count(n);
        if pairs == 0 {
            return (0, 0);
        }
        let block = pairs
            .div_ceil(Self::MAX_BLOCKS)
            .max(self.pairs_per_task.max(1));
        (block, pairs.div_ceil(block))
    }

    /// Per-block velocity deltas, in block order
    fn block_deltas(&self, dt: f64, sys: &System) -> Vec<Vec<NVec3>> {
        let n = sys.len();
        let bodies = sys.bodies();
        let pairs = pair_count(n);
        let (block, blocks) = self.block_layout(n);

        (0..blocks)
            .into_par_iter()
            .map(|b| {
                let start = b * block;
                let len = block.min(pairs - start);

                let mut dv = vec![NVec3::zeros(); n];
                for (i, j) in pairs_from(n, start, len) {
                    let (bi, bj) = (&bodies[i], &bodies[j]);
                    let (d, mag) = pair_coupling(&bi.x, &bj.x, dt);
                    dv[i] -= d * (bj.m * mag);
                    dv[j] += d * (bi.m * mag);
                }
                dv
            })
            .collect()
    }
}

impl Default for ParallelKick {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PAIRS_PER_TASK)
    }
}

impl PairwiseKick for ParallelKick {
    fn kick(&self, dt: f64, sys: &mut System) {
        if sys.len() < 2 {
            return;
        }

        let blocks = self.block_deltas(dt, sys);

        // Single-threaded merge: block 0 first, body index increasing
        let bodies = sys.bodies_mut();
        for dv in blocks {
            for (b, delta) in bodies.iter_mut().zip(dv) {
                b.v += delta;
            }
        }
    }

    fn name(&self) -> &'static str {
        "parallel"
    }
}
