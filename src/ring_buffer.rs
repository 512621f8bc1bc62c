use crate::Price;

/// Trailing window of the last `capacity` values, stored in place.
///
/// `cursor` is the slot the next value lands in. Once the window is full
/// that slot holds the oldest value, which is handed back on eviction.
#[derive(Clone, Debug)]
pub(crate) struct RingBuffer {
    slots: Box<[Price]>,
    cursor: usize,
    filled: usize,
}

impl RingBuffer {
    #[must_use]
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            slots: vec![0.0; capacity].into_boxed_slice(),
            cursor: 0,
            filled: 0,
        }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// `true` once `capacity` values have been pushed.
    #[inline]
    pub(crate) fn is_ready(&self) -> bool {
        self.filled == self.capacity()
    }

    /// Stores `value`; returns the value it displaced when the window was
    /// already full.
    #[inline]
    pub(crate) fn push(&mut self, value: Price) -> Option<Price> {
        let evicted = self
            .is_ready()
            .then(|| std::mem::replace(&mut self.slots[self.cursor], value));

        if evicted.is_none() {
            self.slots[self.cursor] = value;
            self.filled += 1;
        }

        self.cursor = (self.cursor + 1) % self.capacity();

        evicted
    }

    /// Stored values from oldest to newest.
    pub(crate) fn iter(&self) -> impl Iterator<Item = Price> + '_ {
        let start = if self.is_ready() { self.cursor } else { 0 };
        (0..self.filled).map(move |offset| self.slots[(start + offset) % self.capacity()])
    }
}
