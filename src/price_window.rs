use std::num::NonZero;

use crate::{Price, ring_buffer::RingBuffer};

/// Trailing window over the last `size` prices.
#[derive(Clone, Debug)]
pub(crate) struct PriceWindow {
    window: RingBuffer,
    /// Running sum of values in the window. Maintained incrementally via
    /// add/subtract, may accumulate FP rounding drift over very long runs,
    /// but negligible for typical window sizes on daily data.
    sum: Price,
    size_reciprocal: f64,
}

impl PriceWindow {
    pub fn new(size: NonZero<usize>) -> Self {
        Self {
            window: RingBuffer::new(size.get()),
            sum: 0.0,
            #[allow(clippy::cast_precision_loss)]
            size_reciprocal: 1.0 / size.get() as f64,
        }
    }

    #[inline]
    pub fn add(&mut self, price: Price) {
        if let Some(old_price) = self.window.push(price) {
            self.sum -= old_price;
        }
        self.sum += price;
    }

    #[inline]
    pub fn sum(&self) -> Option<Price> {
        self.window.is_ready().then_some(self.sum)
    }

    #[inline]
    pub fn mean(&self) -> Option<Price> {
        self.sum().map(|sum| sum * self.size_reciprocal)
    }

    /// Population variance of the full window.
    ///
    /// A window of identical values has variance exactly `0.0`.
    pub fn population_variance(&self) -> Option<f64> {
        let mean = self.mean()?;

        let mut values = self.window.iter();
        let first = values.next()?;
        if values.all(|v| v == first) {
            return Some(0.0);
        }

        let squared_deviations: f64 = self
            .window
            .iter()
            .map(|v| {
                let deviation = v - mean;
                deviation * deviation
            })
            .sum();

        Some(squared_deviations * self.size_reciprocal)
    }
}
