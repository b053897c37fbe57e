use std::fmt::{Debug, Formatter};
use std::iter::FusedIterator;

/// A first-in, first-out queue with a capacity fixed at construction.
///
/// [`enqueue`](RingBuffer::enqueue) refuses new elements once the buffer is
/// full, while [`enqueue_overwrite`](RingBuffer::enqueue_overwrite) makes
/// room by evicting the oldest one.
///
/// # Examples
/// ```
/// use owned_collections::RingBuffer;
///
/// let mut rb = RingBuffer::new(3);
/// for x in 1..=4 {
///     rb.enqueue_overwrite(x);
/// }
///
/// assert!(rb.is_full());
/// assert_eq!(rb.dequeue(), Some(2));
/// assert_eq!(rb.drain_all(), [3, 4]);
/// assert!(rb.is_empty());
/// ```
#[derive(Clone)]
pub struct RingBuffer<T> {
    slots: Box<[Option<T>]>,
    // index of the oldest element
    head: usize,
    len: usize,
}

/// Iterator over a [`RingBuffer`] from the oldest element to the newest.
pub struct Iter<'a, T> {
    buf: &'a RingBuffer<T>,
    pos: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos == self.buf.len {
            return None;
        }

        let slot = &self.buf.slots[self.buf.wrap(self.buf.head + self.pos)];
        self.pos += 1;
        slot.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rem = self.buf.len - self.pos;
        (rem, Some(rem))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}

impl<T> RingBuffer<T> {
    /// Creates an empty buffer that holds at most `capacity` elements.
    ///
    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        if capacity == 0 {
            panic!("ring buffer: capacity must be positive");
        }

        RingBuffer {
            slots: (0..capacity).map(|_| None).collect(),
            head: 0,
            len: 0,
        }
    }

    fn wrap(&self, idx: usize) -> usize {
        idx % self.slots.len()
    }

    // slot the next element goes into
    fn tail(&self) -> usize {
        self.wrap(self.head + self.len)
    }

    /// Appends `val` as the newest element.
    ///
    /// Returns `Err(val)`, handing the value back, if the buffer is full.
    ///
    /// # Examples
    /// ```
    /// use owned_collections::RingBuffer;
    ///
    /// let mut rb = RingBuffer::new(1);
    /// assert_eq!(rb.enqueue('a'), Ok(()));
    /// assert_eq!(rb.enqueue('b'), Err('b'));
    /// assert_eq!(rb.peek(), Some(&'a'));
    /// ```
    pub fn enqueue(&mut self, val: T) -> Result<(), T> {
        if self.is_full() {
            return Err(val);
        }

        let tail = self.tail();
        self.slots[tail] = Some(val);
        self.len += 1;
        Ok(())
    }

    /// Appends `val` as the newest element, evicting and returning the
    /// oldest element if the buffer is full.
    pub fn enqueue_overwrite(&mut self, val: T) -> Option<T> {
        if !self.is_full() {
            let tail = self.tail();
            self.slots[tail] = Some(val);
            self.len += 1;
            return None;
        }

        // when full the tail slot is the head slot
        let evicted = self.slots[self.head].replace(val);
        self.head = self.wrap(self.head + 1);
        log::debug!(
            "ring buffer: evicted oldest element (capacity {})",
            self.slots.len()
        );
        evicted
    }

    /// Removes and returns the oldest element.
    pub fn dequeue(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        let val = self.slots[self.head].take();
        self.head = self.wrap(self.head + 1);
        self.len -= 1;
        val
    }

    /// Returns a reference to the oldest element.
    pub fn peek(&self) -> Option<&T> {
        if self.len == 0 {
            return None;
        }

        self.slots[self.head].as_ref()
    }

    /// Removes every element and returns them, oldest first.
    pub fn drain_all(&mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.len);
        while let Some(val) = self.dequeue() {
            out.push(val);
        }

        out
    }

    /// Drops every element.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.head = 0;
        self.len = 0;
    }

    /// Returns an iterator from the oldest element to the newest.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { buf: self, pos: 0 }
    }

    /// Returns the number of buffered elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the maximum number of elements the buffer holds.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Tests if no more elements fit without eviction.
    pub fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    /// Tests if the buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<T: Debug> Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
