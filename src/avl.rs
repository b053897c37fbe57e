#![warn(missing_docs)]
use std::borrow::Borrow;
use std::cmp::Ordering::{self, *};
use std::fmt::{Debug, Display, Formatter};
use std::iter::FusedIterator;
use std::mem::replace;

type OptNode<K, V> = Option<Box<Node<K, V>>>;

/// An entry of an [`AvlTree`] together with the subtree hanging below it.
///
/// Nodes are only handed out by shared reference (see [`AvlTree::find`]), so
/// callers can inspect an entry but never restructure the tree through it.
#[derive(Clone)]
pub struct Node<K, V> {
    key: K,
    val: V,
    height: usize,
    left: OptNode<K, V>,
    right: OptNode<K, V>,
}

impl<K, V> Node<K, V> {
    fn leaf(key: K, val: V) -> Box<Self> {
        Box::new(Node {
            key,
            val,
            height: 1,
            left: None,
            right: None,
        })
    }

    /// Returns the key of this entry.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Returns the value stored with the key.
    pub fn value(&self) -> &V {
        &self.val
    }

    /// Returns the height of the subtree rooted here. A leaf has height 1.
    pub fn height(&self) -> usize {
        self.height
    }

    // Returns the "balance factor" of the node: left height minus right height
    fn bal(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }

    fn fix_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }
}

impl<K: Ord, V> Node<K, V> {
    #[cfg(test)]
    fn chk(&self, greatest: Option<&K>) -> (usize, Option<&K>) {
        // is our node in order with left-side ancestors?
        assert!(greatest.iter().all(|&k| k < &self.key));

        // is the cached height right?
        assert_eq!(
            self.height,
            1 + height(&self.left).max(height(&self.right))
        );

        // are we balanced?
        assert!(self.bal().abs() <= 1);

        // are our left descendents okay?
        let (lf_len, greatest) = chk(&self.left, greatest);

        // are our left descendents all less than us?
        assert!(greatest.iter().all(|&k| k < &self.key));

        // are our right descendents okay?
        let (rt_len, greatest) = chk(&self.right, Some(&self.key));

        (lf_len + rt_len + 1, greatest)
    }
}

impl<K: Debug, V: Debug> Debug for Node<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "(ht: {} {{{:?}: {:?}}} ",
            self.height, self.key, self.val
        ))?;

        match &self.left {
            None => f.write_str(".")?,
            Some(lf) => lf.fmt(f)?,
        }

        f.write_str(" ")?;

        match &self.right {
            None => f.write_str(".")?,
            Some(rt) => rt.fmt(f)?,
        }

        f.write_str(")")
    }
}

impl<K: Display, V> Display for Node<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key)
    }
}

fn height<K, V>(opt_node: &OptNode<K, V>) -> usize {
    opt_node.as_ref().map_or(0, |n| n.height)
}

#[cfg(test)]
fn chk<'a, K: Ord, V>(
    opt_node: &'a OptNode<K, V>,
    greatest: Option<&'a K>,
) -> (usize, Option<&'a K>) {
    match opt_node.as_deref() {
        None => (0, greatest),
        Some(n) => n.chk(greatest),
    }
}

fn rot_rt<K, V>(mut a: Box<Node<K, V>>) -> Box<Node<K, V>> {
    // We want the following transformation:
    //    a(b(x, y), z)   =>   b(x, a(y, z))
    // x and z retain the same parents.
    let mut b = a.left.take().expect("right rotation needs a left child");

    a.left = b.right.take();
    a.fix_height();

    b.right = Some(a);
    b.fix_height();

    log::trace!("avl: rotated right, subtree height now {}", b.height);
    b
}

fn rot_lf<K, V>(mut a: Box<Node<K, V>>) -> Box<Node<K, V>> {
    // We want the following transformation:
    //    a(x, b(y, z))   =>   b(a(x, y), z)
    // x and z retain the same parents.
    let mut b = a.right.take().expect("left rotation needs a right child");

    a.right = b.left.take();
    a.fix_height();

    b.left = Some(a);
    b.fix_height();

    log::trace!("avl: rotated left, subtree height now {}", b.height);
    b
}

// Rebalances n after an insertion below it. `went` is how the inserted key
// compared with the key of n's child on the insertion path, which tells the
// outer cases (LL, RR) from the inner ones (LR, RL).
fn rebal_ins<K, V>(mut n: Box<Node<K, V>>, went: Ordering) -> Box<Node<K, V>> {
    let bal = n.bal();

    if bal > 1 {
        if went == Greater {
            n.left = n.left.take().map(rot_lf);
        }
        return rot_rt(n);
    }

    if bal < -1 {
        if went == Less {
            n.right = n.right.take().map(rot_rt);
        }
        return rot_lf(n);
    }

    n
}

// Rebalances n after a removal below it. No single key points at the heavy
// side, so the child's own balance factor picks the case.
fn rebal_rm<K, V>(mut n: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let bal = n.bal();

    if bal > 1 {
        if n.left.as_ref().map_or(0, |l| l.bal()) < 0 {
            n.left = n.left.take().map(rot_lf);
        }
        return rot_rt(n);
    }

    if bal < -1 {
        if n.right.as_ref().map_or(0, |r| r.bal()) > 0 {
            n.right = n.right.take().map(rot_rt);
        }
        return rot_lf(n);
    }

    n
}

// Inserts (k, v) into the subtree and returns its new root together with how k
// compared to the key at the old root (Equal for a freshly created leaf).
// The comparison is None when k was already present and nothing changed.
fn ins<K: Ord, V>(
    root: OptNode<K, V>,
    k: K,
    v: V,
    len: &mut usize,
) -> (Box<Node<K, V>>, Option<Ordering>) {
    let mut n = match root {
        None => {
            *len += 1;
            return (Node::leaf(k, v), Some(Equal)); // *** EARLY RETURN ***
        }

        Some(n) => n,
    };

    let dir = k.cmp(&n.key);
    let went = match dir {
        Equal => None,

        Less => {
            let (lf, went) = ins(n.left.take(), k, v, len);
            n.left = Some(lf);
            went
        }

        Greater => {
            let (rt, went) = ins(n.right.take(), k, v, len);
            n.right = Some(rt);
            went
        }
    };

    match went {
        None => (n, None),
        Some(went) => {
            n.fix_height();
            (rebal_ins(n, went), Some(dir))
        }
    }
}

// Detaches the leftmost node of the subtree, returning what remains of the
// subtree (rebalanced) and the detached node.
fn rm_leftmost<K, V>(
    mut n: Box<Node<K, V>>,
    len: &mut usize,
) -> (OptNode<K, V>, Box<Node<K, V>>) {
    match n.left.take() {
        None => {
            *len -= 1;
            (n.right.take(), n)
        }

        Some(lf) => {
            let (lf, min) = rm_leftmost(lf, len);
            n.left = lf;
            n.fix_height();
            (Some(rebal_rm(n)), min)
        }
    }
}

// removes k from the subtree and returns the new root and the removed value.
fn rm<K, V, Q>(
    root: OptNode<K, V>,
    k: &Q,
    len: &mut usize,
) -> (OptNode<K, V>, Option<V>)
where
    K: Borrow<Q> + Ord,
    Q: Ord + ?Sized,
{
    let mut n = match root {
        None => return (None, None), // *** EARLY RETURN ***
        Some(n) => n,
    };

    let old_val = match k.cmp(n.key.borrow()) {
        Less => {
            let (lf, v) = rm(n.left.take(), k, len);
            n.left = lf;
            v
        }

        Greater => {
            let (rt, v) = rm(n.right.take(), k, len);
            n.right = rt;
            v
        }

        Equal => match (n.left.take(), n.right.take()) {
            (None, child) | (child, None) => {
                // splice the only child (if any) into n's place
                *len -= 1;
                return (child, Some(n.val));
            }

            (Some(lf), Some(rt)) => {
                // both children are populated: the in-order successor takes
                // over this node's entry
                let (rt, succ) = rm_leftmost(rt, len);
                let Node { key, val, .. } = *succ;
                n.left = Some(lf);
                n.right = rt;
                n.key = key;
                Some(replace(&mut n.val, val))
            }
        },
    };

    if old_val.is_none() {
        return (Some(n), None);
    }

    n.fix_height();
    (Some(rebal_rm(n)), old_val)
}

/// An ordered map from keys to values, kept height-balanced as an AVL tree.
///
/// Every node exclusively owns its children, and every mutation rebalances
/// the path it touched before returning, so the height stays logarithmic in
/// the number of entries.
///
/// Unlike [`std::collections::BTreeMap::insert`], inserting a key that is
/// already present keeps the stored value.
///
/// # Examples
/// ```
/// use owned_collections::AvlTree;
///
/// let mut tree = AvlTree::new();
/// for k in [5, 3, 8, 1, 4, 7, 9, 2, 6] {
///     tree.insert(k, k * 10);
/// }
///
/// assert_eq!(tree.len(), 9);
/// assert_eq!(tree.height(), 4);
/// assert!(tree.keys().copied().eq(1..=9));
/// assert_eq!(tree.get(&7), Some(&70));
/// ```
#[derive(Clone)]
pub struct AvlTree<K, V> {
    len: usize,
    root: OptNode<K, V>,
}

impl<K: Debug, V: Debug> Debug for AvlTree<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.root {
            None => f.write_str("AvlTree(EMPTY)"),
            Some(n) => {
                // use Node's Debug formatter
                f.write_fmt(format_args!("AvlTree(#{}, {:?})", self.len, n))
            }
        }
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for AvlTree<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for AvlTree<K, V> {}

impl<K, V> AvlTree<K, V> {
    /// Makes a new, empty tree.
    ///
    /// # Examples
    /// ```
    /// use owned_collections::AvlTree;
    ///
    /// let tree: AvlTree<u32, &str> = AvlTree::new();
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.height(), 0);
    /// ```
    pub fn new() -> Self {
        AvlTree { len: 0, root: None }
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the height of the tree: 0 when empty, 1 for a single entry.
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// Returns an iterator over the entries, ordered by key.
    ///
    /// The iterator walks the tree lazily and holds at most `self.height()`
    /// pending nodes.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.root, self.len)
    }

    /// Returns an iterator over the keys in increasing order.
    ///
    /// # Examples
    /// ```
    /// use owned_collections::AvlTree;
    ///
    /// let tree: AvlTree<_, _> = [(3, 'c'), (1, 'a'), (2, 'b')].into_iter().collect();
    /// let keys: Vec<_> = tree.keys().collect();
    /// assert_eq!(keys, [&1, &2, &3]);
    /// ```
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys(self.iter())
    }

    /// Returns an iterator over the values, in the order of their keys.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }

    #[cfg(test)]
    fn chk(&self)
    where
        K: Ord,
    {
        assert_eq!(chk(&self.root, None).0, self.len);
    }
}

impl<K: Ord, V> AvlTree<K, V> {
    /// Inserts `val` under `key` and rebalances the tree.
    ///
    /// If the key is already present, the tree is left untouched: the stored
    /// value is kept and `val` is dropped. Returns whether the key was new.
    ///
    /// # Examples
    /// ```
    /// use owned_collections::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// assert!(tree.insert(37, "a"));
    /// assert!(!tree.insert(37, "b"));
    /// assert_eq!(tree.get(&37), Some(&"a"));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, val: V) -> bool {
        let old_len = self.len;
        let (root, _) = ins(self.root.take(), key, val, &mut self.len);
        self.root = Some(root);
        self.len != old_len
    }

    /// Removes `key` from the tree and returns its value, or `None` if the key
    /// was not present.
    ///
    /// # Examples
    /// ```
    /// use owned_collections::AvlTree;
    ///
    /// let mut tree: AvlTree<_, _> = (0..7).map(|k| (k, k + 100)).collect();
    /// assert_eq!(tree.remove(&3), Some(103));
    /// assert_eq!(tree.remove(&3), None);
    /// assert_eq!(tree.len(), 6);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (root, old_val) = rm(self.root.take(), key, &mut self.len);
        self.root = root;
        old_val
    }

    /// Looks up `key` and returns a read-only view of its node.
    ///
    /// # Examples
    /// ```
    /// use owned_collections::AvlTree;
    ///
    /// let tree: AvlTree<_, _> = [("b", 2), ("a", 1)].into_iter().collect();
    /// let node = tree.find("a").unwrap();
    /// assert_eq!((node.key(), node.value()), (&"a", &1));
    /// assert!(tree.find("z").is_none());
    /// ```
    pub fn find<Q>(&self, key: &Q) -> Option<&Node<K, V>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut curr = self.root.as_deref();
        while let Some(n) = curr {
            curr = match key.cmp(n.key.borrow()) {
                Less => n.left.as_deref(),
                Greater => n.right.as_deref(),
                Equal => return Some(n),
            };
        }

        None
    }

    /// Returns a reference to the value stored under `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).map(Node::value)
    }

    /// Tests whether `key` is present.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).is_some()
    }
}

impl<K, V> Default for AvlTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// In-order iterator over the entries of an [`AvlTree`].
pub struct Iter<'a, K, V> {
    // nodes whose left subtree has been visited but which have not been
    // yielded yet; the top of the stack is the next entry
    stack: Vec<&'a Node<K, V>>,
    len: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn new(root: &'a OptNode<K, V>, len: usize) -> Self {
        let mut iter = Iter {
            stack: Vec::with_capacity(height(root)),
            len,
        };
        iter.push_left_spine(root.as_deref());
        iter
    }

    fn push_left_spine(&mut self, mut curr: Option<&'a Node<K, V>>) {
        while let Some(n) = curr {
            self.stack.push(n);
            curr = n.left.as_deref();
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.stack.pop()?;
        self.push_left_spine(n.right.as_deref());
        self.len -= 1;
        Some((&n.key, &n.val))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {
    fn len(&self) -> usize {
        self.len
    }
}

impl<'a, K, V> FusedIterator for Iter<'a, K, V> {}

/// In-order iterator over the keys of an [`AvlTree`].
pub struct Keys<'a, K, V>(Iter<'a, K, V>);

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a, K, V> ExactSizeIterator for Keys<'a, K, V> {
    fn len(&self) -> usize {
        self.0.len()
    }
}

impl<'a, K, V> FusedIterator for Keys<'a, K, V> {}

impl<'a, K, V> IntoIterator for &'a AvlTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// Duplicate keys keep the first value, matching `insert`.
impl<K: Ord, V> Extend<(K, V)> for AvlTree<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for AvlTree<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut tree = AvlTree::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for AvlTree<K, V> {
    fn from(vs: [(K, V); N]) -> Self {
        AvlTree::from_iter(vs)
    }
}
