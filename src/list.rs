use std::fmt::{Debug, Formatter};
use std::iter::FusedIterator;
use std::mem::replace;

struct Node<T> {
    val: T,
    next: OptLink<T>,
}

type OptLink<T> = Option<Box<Node<T>>>;

/// A singly-linked list.
///
/// Elements are addressed by their position from the head (index 0).
/// Operations taking an index walk the list and cost `O(index)`; `append`
/// walks to the tail.
///
/// Out-of-range lookups, replacements and removals are ordinary outcomes
/// reported through `Option`. Inserting past the end is a caller bug and
/// panics.
///
/// # Examples
/// ```
/// use owned_collections::List;
///
/// let mut l = List::new();
/// l.append(2);
/// l.append(3);
/// l.prepend(1);
///
/// assert_eq!(l.to_vec(), [1, 2, 3]);
/// assert_eq!(l.index_of(&3), Some(2));
///
/// l.reverse();
/// assert_eq!(l.to_vec(), [3, 2, 1]);
/// ```
pub struct List<T> {
    len: usize,
    head: OptLink<T>,
}

/// Iterator over a [`List`] from head to tail.
pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
    len: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|n| {
            self.next = n.next.as_deref();
            self.len -= 1;
            &n.val
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}

/// Owning iterator over a [`List`] from head to tail.
pub struct IntoIter<T> {
    list: List<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> List<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        List { len: 0, head: None }
    }

    // Returns the link at position idx: the head link for 0, the tail's
    // (empty) next link for self.len.
    fn slot_mut(&mut self, idx: usize) -> &mut OptLink<T> {
        debug_assert!(idx <= self.len);

        let mut cur = &mut self.head;
        for _ in 0..idx {
            cur = match cur {
                Some(n) => &mut n.next,
                None => unreachable!("list: link {idx} lies past the tail"),
            };
        }

        cur
    }

    /// Adds an element at the tail.
    pub fn append(&mut self, val: T) {
        let len = self.len;
        *self.slot_mut(len) = Some(Box::new(Node { val, next: None }));
        self.len += 1;
    }

    /// Adds an element at the head.
    pub fn prepend(&mut self, val: T) {
        self.head = Some(Box::new(Node {
            val,
            next: self.head.take(),
        }));
        self.len += 1;
    }

    /// Inserts an element so that it ends up at position `idx`, shifting the
    /// elements from `idx` on towards the tail. `idx == self.len()` appends.
    ///
    /// # Panics
    /// Panics if `idx > self.len()`.
    ///
    /// # Examples
    /// ```
    /// use owned_collections::List;
    ///
    /// let mut l: List<_> = [10, 30].into_iter().collect();
    /// l.insert(1, 20);
    /// l.insert(3, 40);
    /// assert_eq!(l.to_vec(), [10, 20, 30, 40]);
    /// ```
    pub fn insert(&mut self, idx: usize, val: T) {
        if idx > self.len {
            panic!(
                "list: insert index {idx} out of range for length {}",
                self.len
            );
        }

        let slot = self.slot_mut(idx);
        let next = slot.take();
        *slot = Some(Box::new(Node { val, next }));
        self.len += 1;
    }

    /// Replaces the element at `idx` and returns the old one. Returns `None`,
    /// dropping `val`, when `idx` is out of range.
    pub fn replace(&mut self, idx: usize, val: T) -> Option<T> {
        self.get_mut(idx).map(|old| replace(old, val))
    }

    /// Returns a reference to the element at `idx`, or `None` if out of range.
    pub fn get(&self, idx: usize) -> Option<&T> {
        self.iter().nth(idx)
    }

    /// Returns a mutable reference to the element at `idx`.
    pub fn get_mut(&mut self, idx: usize) -> Option<&mut T> {
        if idx >= self.len {
            return None;
        }

        self.slot_mut(idx).as_deref_mut().map(|n| &mut n.val)
    }

    /// Returns the position of the first element equal to `x`.
    pub fn index_of(&self, x: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().position(|y| x == y)
    }

    /// Tests if the element x occurs in the list.
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|y| x == y)
    }

    /// Removes and returns the element at `idx`, or returns `None` if `idx`
    /// is out of range.
    pub fn remove(&mut self, idx: usize) -> Option<T> {
        if idx >= self.len {
            return None;
        }

        let slot = self.slot_mut(idx);
        let Node { val, next } = *slot.take()?;
        *slot = next;
        self.len -= 1;
        Some(val)
    }

    /// Removes and returns the head element.
    pub fn pop_front(&mut self) -> Option<T> {
        self.remove(0)
    }

    /// Removes all elements.
    pub fn clear(&mut self) {
        // unlink one node at a time; dropping the head recursively could
        // overflow the stack on long lists
        let mut cur = self.head.take();
        while let Some(mut n) = cur {
            cur = n.next.take();
        }
        self.len = 0;
    }

    /// Exchanges the elements at positions `i` and `j`. Does nothing if either
    /// index is out of range or the two are equal.
    ///
    /// # Examples
    /// ```
    /// use owned_collections::List;
    ///
    /// let mut l: List<_> = (0..5).collect();
    /// l.swap(4, 1);
    /// assert_eq!(l.to_vec(), [0, 4, 2, 3, 1]);
    /// l.swap(0, 5);
    /// assert_eq!(l.to_vec(), [0, 4, 2, 3, 1]);
    /// ```
    pub fn swap(&mut self, i: usize, j: usize) {
        if i >= self.len || j >= self.len || i == j {
            return;
        }

        let (lo, hi) = (i.min(j), i.max(j));
        let Some(first) = self.slot_mut(lo).as_deref_mut() else {
            return;
        };
        let Node { val: a, next } = first;

        let mut cur = next;
        for _ in lo + 1..hi {
            cur = match cur {
                Some(n) => &mut n.next,
                None => return,
            };
        }

        if let Some(second) = cur.as_deref_mut() {
            std::mem::swap(a, &mut second.val);
        }
    }

    /// Reverses the order of the elements in place.
    pub fn reverse(&mut self) {
        let mut prev = None;
        let mut cur = self.head.take();

        while let Some(mut n) = cur {
            cur = replace(&mut n.next, prev);
            prev = Some(n);
        }

        self.head = prev;
    }

    /// Copies the elements, head first, into a vector.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Returns an iterator from the head to the tail.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
            len: self.len,
        }
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Tests if there are no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: Debug> Debug for List<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for List<T> {}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let len = self.len;
        let mut added = 0;

        // keep a cursor on the tail link instead of walking for every element
        let mut slot = self.slot_mut(len);
        for val in iter {
            let n = slot.insert(Box::new(Node { val, next: None }));
            slot = &mut n.next;
            added += 1;
        }

        self.len += added;
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut l = List::new();
        l.extend(iter);
        l
    }
}

#[cfg(test)]
mod test {
    extern crate quickcheck;
    use super::*;
    use quickcheck::quickcheck;

    fn tens() -> List<i32> {
        (1..=10).map(|x| x * 10).collect()
    }

    #[test]
    fn append_test() {
        let mut l = List::new();

        l.append(14);
        assert_eq!(l.len(), 1);
        assert_eq!(l.get(0), Some(&14));

        l.append(15);
        assert_eq!(l.len(), 2);
        assert_eq!(l.get(1), Some(&15));
    }

    #[test]
    fn prepend_test() {
        let mut l = List::new();

        l.append(10);
        l.prepend(15);
        assert_eq!(l.len(), 2);
        assert_eq!(l.get(0), Some(&15));
        assert_eq!(l.get(1), Some(&10));
    }

    #[test]
    fn insert_test() {
        let mut l = List::new();
        l.insert(0, 'b');
        l.insert(0, 'a');
        l.insert(2, 'd');
        l.insert(2, 'c');
        assert_eq!(l.to_vec(), ['a', 'b', 'c', 'd']);
        assert_eq!(l.len(), 4);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn insert_past_end_panics() {
        let mut l = tens();
        l.insert(11, 5);
    }

    #[test]
    fn replace_test() {
        let mut l = tens();
        assert_eq!(l.replace(3, 45), Some(40));
        assert_eq!(l.get(3), Some(&45));
        assert_eq!(l.replace(10, 0), None);
        assert_eq!(l.len(), 10);

        let mut empty: List<i32> = List::new();
        assert_eq!(empty.replace(0, 1), None);
        assert!(empty.is_empty());
    }

    #[test]
    fn find_test() {
        let l = tens();
        assert_eq!(l.get(0), Some(&10));
        assert_eq!(l.get(9), Some(&100));
        assert_eq!(l.get(10), None);
        assert_eq!(l.index_of(&70), Some(6));
        assert_eq!(l.index_of(&71), None);
        assert!(l.contains(&100));
        assert!(!l.contains(&0));
    }

    #[test]
    fn remove_test() {
        let mut l = tens();
        assert_eq!(l.remove(0), Some(10));
        assert_eq!(l.remove(8), Some(100));
        assert_eq!(l.remove(8), None);
        assert_eq!(l.remove(3), Some(50));
        assert_eq!(l.to_vec(), [20, 30, 40, 60, 70, 80, 90]);

        // the tail link must still be usable after removing the last node
        l.append(110);
        assert_eq!(l.get(7), Some(&110));
    }

    #[test]
    fn clear_test() {
        let mut l = tens();
        l.clear();
        assert!(l.is_empty());
        assert_eq!(l.iter().next(), None);
        l.append(1);
        assert_eq!(l.to_vec(), [1]);
    }

    #[test]
    fn swap_test() {
        let mut l = tens();
        l.swap(0, 9);
        assert_eq!(l.get(0), Some(&100));
        assert_eq!(l.get(9), Some(&10));

        l.swap(5, 4);
        assert_eq!(l.to_vec(), [100, 20, 30, 40, 60, 50, 70, 80, 90, 10]);

        // out of range and identical indices are ignored
        l.swap(3, 3);
        l.swap(3, 10);
        assert_eq!(l.to_vec(), [100, 20, 30, 40, 60, 50, 70, 80, 90, 10]);
    }

    #[test]
    fn reverse_test() {
        let mut l = tens();
        l.reverse();
        assert_eq!(l.to_vec(), [100, 90, 80, 70, 60, 50, 40, 30, 20, 10]);
        assert_eq!(l.len(), 10);

        // appending goes to the new tail
        l.append(0);
        assert_eq!(l.get(10), Some(&0));
    }

    #[test]
    fn long_list_drop() {
        let l: List<_> = (0..200_000).collect();
        assert_eq!(l.len(), 200_000);
        drop(l);
    }

    quickcheck! {
        fn qc_reverse_twice(xs: Vec<i32>) -> bool {
            let mut l: List<_> = xs.iter().copied().collect();
            l.reverse();
            l.reverse();
            l.to_vec() == xs
        }

        fn qc_cmp_with_vec(ops: Vec<(u8, u8, i16)>) -> () {
            let mut l = List::new();
            let mut v = Vec::new();

            for (op, idx, x) in ops {
                let idx = idx as usize % (v.len() + 1);
                match op % 6 {
                    0 => {
                        l.insert(idx, x);
                        v.insert(idx, x);
                    }
                    1 => {
                        let expected = (idx < v.len()).then(|| v.remove(idx));
                        assert_eq!(l.remove(idx), expected);
                    }
                    2 => {
                        let expected = v.get_mut(idx).map(|y| replace(y, x));
                        assert_eq!(l.replace(idx, x), expected);
                    }
                    3 => {
                        let j = x as usize % (v.len() + 1);
                        l.swap(idx, j);
                        if idx < v.len() && j < v.len() {
                            v.swap(idx, j);
                        }
                    }
                    4 => {
                        l.prepend(x);
                        v.insert(0, x);
                    }
                    _ => {
                        l.append(x);
                        v.push(x);
                    }
                }

                assert_eq!(l.len(), v.len());
                assert!(l.iter().eq(v.iter()));
                assert_eq!(l.get(idx), v.get(idx));
            }
        }
    }
}
