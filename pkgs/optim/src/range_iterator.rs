//! Range iterators (§4.8): spread `steps + 1` values across `[min, max]`,
//! inclusive, with the last value always forced to exactly `max`.
//!
//! Grounded on
//! `original_source/source/optim/decomposition/LogarithmicRangeIterator.cpp`
//! for [`LogarithmicRangeIterator`]. [`LinearRangeIterator`] has no
//! corresponding file in the filtered sources (only the logarithmic variant
//! was captured); it reuses the same "track a running current value, force
//! the final sample to `max`" shape with a plain arithmetic step instead of
//! a logarithmic one.

use panoramyx_core::BigInt;

/// An iterator that lays out `steps + 1` values over `[min, max]`.
pub trait RangeIterator: Iterator<Item = BigInt> {}

pub struct LinearRangeIterator {
    minimum: BigInt,
    maximum: BigInt,
    current_value: BigInt,
    step: f64,
    number_of_steps: i64,
    current_step: i64,
}

impl LinearRangeIterator {
    pub fn new(min: BigInt, max: BigInt, steps: usize) -> Self {
        let number_of_steps = steps as i64 + 1;
        let step = (max - min) as f64 / number_of_steps as f64;
        Self {
            minimum: min,
            maximum: max,
            current_value: min,
            step,
            number_of_steps,
            current_step: 0,
        }
    }

    fn compute_next_value(&self, step: i64) -> BigInt {
        self.minimum + (self.step * (step + 1) as f64) as BigInt
    }
}

impl Iterator for LinearRangeIterator {
    type Item = BigInt;

    fn next(&mut self) -> Option<BigInt> {
        if self.current_step >= self.number_of_steps {
            return None;
        }
        let ret = self.current_value;
        let next_value = self.compute_next_value(self.current_step);
        self.current_step += 1;
        if self.current_step == self.number_of_steps {
            return Some(self.maximum);
        }
        self.current_value = if next_value == self.current_value {
            self.current_value + 1
        } else {
            next_value
        };
        Some(ret)
    }
}

impl RangeIterator for LinearRangeIterator {}

pub struct LogarithmicRangeIterator {
    minimum: BigInt,
    maximum: BigInt,
    current_value: BigInt,
    scale: f64,
    number_of_steps: i64,
    current_step: i64,
    increasing: bool,
}

impl LogarithmicRangeIterator {
    pub fn new(min: BigInt, max: BigInt, steps: usize, increasing: bool) -> Self {
        let number_of_steps = steps as i64 + 1;
        let scale = (max - min) as f64 / (2.0 + number_of_steps as f64).ln();
        Self {
            minimum: min,
            maximum: max,
            current_value: min,
            scale,
            number_of_steps,
            current_step: 0,
            increasing,
        }
    }

    fn compute_next_value(&self, step: i64) -> BigInt {
        let scaled = if self.increasing {
            self.maximum as f64 - ((self.number_of_steps - step) as f64).ln() * self.scale
        } else {
            self.minimum as f64 + ((2 + step) as f64).ln() * self.scale
        };
        scaled as BigInt
    }
}

impl Iterator for LogarithmicRangeIterator {
    type Item = BigInt;

    fn next(&mut self) -> Option<BigInt> {
        if self.current_step >= self.number_of_steps {
            return None;
        }
        let ret = self.current_value;
        let next_value = self.compute_next_value(self.current_step);
        self.current_step += 1;
        if self.current_step == self.number_of_steps {
            return Some(self.maximum);
        }
        self.current_value = if next_value == self.current_value {
            self.current_value + 1
        } else {
            next_value
        };
        Some(ret)
    }
}

impl RangeIterator for LogarithmicRangeIterator {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_iterator_produces_steps_plus_one_values_ending_at_max() {
        let values: Vec<BigInt> = LinearRangeIterator::new(0, 100, 4).collect();
        assert_eq!(values.len(), 5);
        assert_eq!(values[0], 0);
        assert_eq!(*values.last().unwrap(), 100);
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn linear_iterator_with_zero_steps_yields_only_max() {
        let values: Vec<BigInt> = LinearRangeIterator::new(10, 20, 0).collect();
        assert_eq!(values, vec![20]);
    }

    #[test]
    fn logarithmic_iterator_produces_steps_plus_one_values_ending_at_max() {
        let values: Vec<BigInt> = LogarithmicRangeIterator::new(0, 1000, 5, true).collect();
        assert_eq!(values.len(), 6);
        assert_eq!(*values.last().unwrap(), 1000);
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn logarithmic_iterator_decreasing_mode_still_ends_at_max() {
        let values: Vec<BigInt> = LogarithmicRangeIterator::new(0, 1000, 5, false).collect();
        assert_eq!(values.len(), 6);
        assert_eq!(*values.last().unwrap(), 1000);
    }

    #[test]
    fn logarithmic_iterator_with_zero_steps_yields_only_max() {
        let values: Vec<BigInt> = LogarithmicRangeIterator::new(0, 50, 0, true).collect();
        assert_eq!(values, vec![50]);
    }
}
