use std::fmt::{Debug, Formatter};
use std::iter::{FusedIterator, Rev};

/// A last-in, first-out stack over a growable array.
///
/// `push` is amortized constant time; `pop` and `top` are constant time.
/// Popping or peeking an empty stack is a caller bug and panics, so check
/// [`is_empty`](Stack::is_empty) first when the stack may be empty.
///
/// # Examples
/// ```
/// use owned_collections::Stack;
///
/// let mut s = Stack::new();
/// s.push(10);
/// s.push(20);
/// s.push(30);
///
/// assert_eq!(s.pop(), 30);
/// assert_eq!(*s.top(), 20);
/// assert_eq!(s.len(), 2);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Stack<T> {
    // bottom of the stack at index 0
    elems: Vec<T>,
}

/// Iterator over a [`Stack`] from the top element to the bottom one.
pub struct Iter<'a, T> {
    inner: Rev<std::slice::Iter<'a, T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}

impl<T> Stack<T> {
    /// Creates an empty stack.
    ///
    /// # Examples
    /// ```
    /// use owned_collections::Stack;
    ///
    /// let stack: Stack<i32> = Stack::new();
    /// assert!(stack.is_empty());
    /// ```
    pub fn new() -> Self {
        Stack { elems: Vec::new() }
    }

    /// Creates an empty stack with room for `capacity` elements before the
    /// backing store has to grow.
    pub fn with_capacity(capacity: usize) -> Self {
        Stack {
            elems: Vec::with_capacity(capacity),
        }
    }

    /// Pushes an element on top of the stack.
    pub fn push(&mut self, val: T) {
        self.elems.push(val);
    }

    /// Removes and returns the top element.
    ///
    /// # Panics
    /// Panics if the stack is empty.
    pub fn pop(&mut self) -> T {
        match self.elems.pop() {
            Some(val) => val,
            None => panic!("stack: called pop() on an empty stack"),
        }
    }

    /// Returns a reference to the top element.
    ///
    /// # Panics
    /// Panics if the stack is empty.
    ///
    /// # Examples
    /// ```
    /// use owned_collections::Stack;
    ///
    /// let s: Stack<_> = (0..3).collect();
    /// assert_eq!(*s.top(), 2);
    /// ```
    pub fn top(&self) -> &T {
        match self.elems.last() {
            Some(val) => val,
            None => panic!("stack: called top() on an empty stack"),
        }
    }

    /// Returns a mutable reference to the top element.
    ///
    /// # Panics
    /// Panics if the stack is empty.
    ///
    /// # Examples
    /// ```
    /// use owned_collections::Stack;
    ///
    /// let mut s: Stack<_> = (0..=3).collect();
    /// *s.top_mut() += 5;
    ///
    /// assert_eq!(s.pop(), 8);
    /// assert_eq!(s.pop(), 2);
    /// ```
    pub fn top_mut(&mut self) -> &mut T {
        match self.elems.last_mut() {
            Some(val) => val,
            None => panic!("stack: called top_mut() on an empty stack"),
        }
    }

    /// Returns the number of elements in the stack.
    pub fn len(&self) -> usize {
        self.elems.len()
    }

    /// Tests if the stack holds no elements.
    pub fn is_empty(&self) -> bool {
        self.elems.is_empty()
    }

    /// Removes all elements from the stack.
    pub fn clear(&mut self) {
        self.elems.clear();
    }

    /// Creates an iterator from the top to the bottom elements of the stack.
    ///
    /// # Examples
    /// ```
    /// use owned_collections::Stack;
    ///
    /// let s: Stack<_> = (0..4).collect();
    /// assert!(s.iter().copied().eq([3, 2, 1, 0]));
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.elems.iter().rev(),
        }
    }

    /// Tests if the element x occurs in the stack.
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq,
    {
        self.elems.contains(x)
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Debug> Debug for Stack<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T> IntoIterator for &'a Stack<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// Elements are pushed in iteration order, so the last one ends up on top.
impl<T> Extend<T> for Stack<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.elems.extend(iter);
    }
}

impl<T> FromIterator<T> for Stack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Stack {
            elems: Vec::from_iter(iter),
        }
    }
}

impl<T> From<Vec<T>> for Stack<T> {
    fn from(elems: Vec<T>) -> Self {
        Stack { elems }
    }
}

#[cfg(test)]
mod test {
    extern crate quickcheck;
    use super::*;
    use quickcheck::quickcheck;

    #[test]
    fn push_pop_test() {
        let mut st = Stack::new();

        st.push(10);
        st.push(20);
        st.push(30);
        assert_eq!(st.len(), 3);
        assert!(st.iter().copied().eq([30, 20, 10]));

        assert_eq!(st.pop(), 30);
        assert_eq!(st.len(), 2);
        assert_eq!(*st.top(), 20);
    }

    #[test]
    fn len_test() {
        let mut st: Stack<_> = (1..=5).collect();
        assert_eq!(st.len(), 5);

        st.pop();
        st.pop();
        assert_eq!(st.len(), 3);
        assert!(!st.is_empty());

        st.clear();
        assert!(st.is_empty());
    }

    #[test]
    #[should_panic(expected = "empty stack")]
    fn pop_empty_panics() {
        let mut st: Stack<u8> = Stack::new();
        st.pop();
    }

    #[test]
    #[should_panic(expected = "empty stack")]
    fn top_empty_panics() {
        let st: Stack<u8> = Stack::with_capacity(4);
        st.top();
    }

    #[test]
    fn debug_test() {
        let st: Stack<_> = vec!['a', 'b'].into();
        assert_eq!(format!("{:?}", st), "['b', 'a']");
    }

    quickcheck! {
        fn qc_cmp_with_vec(xs: Vec<i32>) -> bool {
            let mut st = Stack::new();
            let mut v = Vec::new();

            for &x in xs.iter() {
                // use the bottom bits to pick an operation
                match x % 4 {
                    0 if !v.is_empty() => assert_eq!(Some(st.pop()), v.pop()),
                    1 if !v.is_empty() => {
                        *st.top_mut() += 1;
                        *v.last_mut().unwrap() += 1;
                    }
                    _ => {
                        st.push(x / 4);
                        v.push(x / 4);
                    }
                }

                assert_eq!(st.len(), v.len());
                assert_eq!(st.is_empty(), v.is_empty());
                assert!(st.iter().eq(v.iter().rev()));
            }

            true
        }
    }
}
