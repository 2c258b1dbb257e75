//! Fixed-capacity ring buffer read newest-first

/// Ring buffer with a write cursor that always points at the newest value.
///
/// Slots fill in insertion order until `capacity` is reached, after which each
/// push overwrites the oldest slot. Storage never reallocates after `new`.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    samples: Vec<T>,
    capacity: usize,
    cursor: usize,
}

impl<T> RingBuffer<T> {
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ring buffer capacity must be non-zero");
        Self {
            samples: Vec::with_capacity(capacity),
            capacity,
            cursor: 0,
        }
    }

    pub fn push(&mut self, sample: T) {
        if self.samples.len() < self.capacity {
            self.cursor = self.samples.len();
            self.samples.push(sample);
        } else {
            self.cursor = (self.cursor + 1) % self.capacity;
            self.samples[self.cursor] = sample;
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.samples.len() == self.capacity
    }

    /// Most recently pushed value.
    pub fn latest(&self) -> Option<&T> {
        self.samples.get(self.cursor)
    }

    /// Walks backward from the newest value, wrapping once. `count` is clamped
    /// to the number of stored values.
    pub fn recent(&self, count: usize) -> Recent<'_, T> {
        Recent {
            samples: &self.samples,
            index: self.cursor,
            remaining: count.min(self.samples.len()),
        }
    }

    pub fn clear(&mut self) {
        self.samples.clear();
        self.cursor = 0;
    }
}

/// Newest-first iterator returned by [`RingBuffer::recent`].
pub struct Recent<'a, T> {
    samples: &'a [T],
    index: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Recent<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let item = &self.samples[self.index];
        self.remaining -= 1;
        self.index = if self.index == 0 {
            self.samples.len() - 1
        } else {
            self.index - 1
        };
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Recent<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(buffer: &RingBuffer<u32>, count: usize) -> Vec<u32> {
        buffer.recent(count).copied().collect()
    }

    #[test]
    fn test_ring_buffer() {
        let mut buffer = RingBuffer::new(3);
        assert!(buffer.is_empty());
        assert_eq!(buffer.latest(), None);

        buffer.push(10);
        assert_eq!(buffer.latest(), Some(&10));

        buffer.push(20);
        buffer.push(30);
        assert!(buffer.is_full());
        assert_eq!(collect(&buffer, 3), vec![30, 20, 10]);

        // Should wrap around
        buffer.push(40);
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.latest(), Some(&40));
        assert_eq!(collect(&buffer, 3), vec![40, 30, 20]);
    }

    #[test]
    fn recent_is_clamped_to_occupancy() {
        let mut buffer = RingBuffer::new(8);
        buffer.push(1);
        buffer.push(2);
        assert_eq!(collect(&buffer, 100), vec![2, 1]);
        assert_eq!(buffer.recent(100).len(), 2);
        assert_eq!(collect(&buffer, 0), Vec::<u32>::new());
    }

    #[test]
    fn keeps_exactly_the_newest_capacity_values() {
        let capacity = 5;
        let mut buffer = RingBuffer::new(capacity);
        for value in 0..23u32 {
            buffer.push(value);
        }
        assert_eq!(buffer.len(), capacity);
        assert_eq!(collect(&buffer, capacity), vec![22, 21, 20, 19, 18]);
    }

    #[test]
    fn clear_resets_cursor() {
        let mut buffer = RingBuffer::new(2);
        buffer.push(1);
        buffer.push(2);
        buffer.push(3);
        buffer.clear();
        assert!(buffer.is_empty());
        buffer.push(7);
        assert_eq!(collect(&buffer, 2), vec![7]);
    }

    #[test]
    #[should_panic(expected = "capacity must be non-zero")]
    fn zero_capacity_panics() {
        let _ = RingBuffer::<u32>::new(0);
    }
}
