//! Bound-allocation strategies (§4.8): decide how a shrinking optimization
//! range `[current_min, current_max]` is re-split across a fixed number of
//! workers, each of which was previously searching its own sub-range.
//!
//! Grounded on
//! `original_source/source/optim/decomposition/RangeBasedAllocationStrategy.cpp`
//! and `AggressiveRangeBasedAllocationStrategy.cpp`.

use panoramyx_core::BigInt;

/// A factory that builds a range iterator yielding `steps + 1` values
/// spanning `[min, max]`. Boxed so a strategy can be configured with either
/// [`crate::LinearRangeIterator`] or [`crate::LogarithmicRangeIterator`]
/// without becoming generic over the iterator type.
pub type RangeIteratorFactory =
    Box<dyn Fn(BigInt, BigInt, usize) -> Box<dyn Iterator<Item = BigInt>> + Send + Sync>;

pub trait BoundAllocationStrategy {
    fn set_minimization(&mut self, minimization: bool);

    fn compute_bound_allocation(
        &self,
        current_bounds: &[BigInt],
        current_min: BigInt,
        current_max: BigInt,
    ) -> Vec<BigInt>;
}

fn rebuild_all(
    range_iterator: &RangeIteratorFactory,
    current_bounds: &[BigInt],
    current_min: BigInt,
    current_max: BigInt,
) -> Vec<BigInt> {
    if current_bounds.is_empty() {
        return Vec::new();
    }
    log::debug!("allocating {} completely new bounds", current_bounds.len());
    range_iterator(current_min, current_max, current_bounds.len() - 1).collect()
}

fn pad_to_length(mut bounds: Vec<BigInt>, len: usize) -> Vec<BigInt> {
    while bounds.len() < len {
        let last = *bounds.last().expect("at least one bound was already allocated");
        log::debug!("duplicating {last} to fill the bounds");
        bounds.push(last);
    }
    bounds
}

/// Reuses interior bounds that already fall within the new range and only
/// regenerates the two outer segments, unless either segment lacks room for
/// the solvers it must cover, in which case every bound is recomputed.
pub struct RangeBasedAllocationStrategy {
    range_iterator: RangeIteratorFactory,
    minimization: bool,
}

impl RangeBasedAllocationStrategy {
    pub fn new(range_iterator: RangeIteratorFactory) -> Self {
        Self {
            range_iterator,
            minimization: true,
        }
    }
}

impl BoundAllocationStrategy for RangeBasedAllocationStrategy {
    fn set_minimization(&mut self, minimization: bool) {
        self.minimization = minimization;
    }

    fn compute_bound_allocation(
        &self,
        current_bounds: &[BigInt],
        current_min: BigInt,
        current_max: BigInt,
    ) -> Vec<BigInt> {
        let n = current_bounds.len();
        if n < 2 {
            return rebuild_all(&self.range_iterator, current_bounds, current_min, current_max);
        }

        let mut index_lower: Option<usize> = None;
        let mut index_upper = 0usize;
        for i in 0..n - 1 {
            if current_bounds[i + 1] >= current_max {
                index_upper = i;
                break;
            } else if current_bounds[i] > current_min && index_lower.is_none() {
                index_lower = Some(i);
            }
        }

        // No bound exceeds the minimum: the whole lower segment is stale,
        // which the original's direct array indexing cannot express safely.
        let Some(index_lower) = index_lower else {
            return rebuild_all(&self.range_iterator, current_bounds, current_min, current_max);
        };

        let lower_room = current_bounds[index_lower] - current_min;
        let upper_room = current_max - current_bounds[index_upper];
        if lower_room < index_lower as BigInt || upper_room < (n - index_upper - 1) as BigInt {
            return rebuild_all(&self.range_iterator, current_bounds, current_min, current_max);
        }

        let mut new_bounds = Vec::with_capacity(n);
        new_bounds.extend((self.range_iterator)(current_min, current_bounds[index_lower], index_lower));

        for bound in &current_bounds[index_lower + 1..index_upper] {
            log::debug!("allocating the same bound {bound}");
            new_bounds.push(*bound);
        }

        new_bounds.extend((self.range_iterator)(
            current_bounds[index_upper],
            current_max,
            n - index_upper - 1,
        ));

        pad_to_length(new_bounds, n)
    }
}

/// Always recomputes every bound from scratch, ignoring any overlap with
/// the previous allocation.
pub struct AggressiveRangeBasedAllocationStrategy {
    range_iterator: RangeIteratorFactory,
    minimization: bool,
}

impl AggressiveRangeBasedAllocationStrategy {
    pub fn new(range_iterator: RangeIteratorFactory) -> Self {
        Self {
            range_iterator,
            minimization: true,
        }
    }
}

impl BoundAllocationStrategy for AggressiveRangeBasedAllocationStrategy {
    fn set_minimization(&mut self, minimization: bool) {
        self.minimization = minimization;
    }

    fn compute_bound_allocation(
        &self,
        current_bounds: &[BigInt],
        current_min: BigInt,
        current_max: BigInt,
    ) -> Vec<BigInt> {
        let new_bounds = rebuild_all(&self.range_iterator, current_bounds, current_min, current_max);
        pad_to_length(new_bounds, current_bounds.len())
    }
}
