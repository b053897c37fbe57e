//! # Owned in-memory collections
//!
//! `owned-collections` is a small set of generic containers whose nodes and
//! slots are owned strictly top-down, with no shared or reference-counted
//! links:
//!
//! * [`AvlTree`], an ordered map kept height-balanced as an AVL tree.
//! * [`List`], a singly-linked list with index-based access.
//! * [`RingBuffer`], a fixed-capacity FIFO that can evict its oldest element.
//! * [`Stack`], a LIFO stack over a growable array.
//!
//! None of the containers synchronize internally; wrap one in a lock to share
//! it between threads. Misuse that the type system cannot rule out (popping an
//! empty stack, a zero-capacity ring buffer) panics; absent keys, indices and
//! elements are reported through `Option`.

pub mod avl;
pub use avl::AvlTree;

pub mod list;
pub use list::List;

pub mod ring_buffer;
pub use ring_buffer::RingBuffer;

pub mod stack;
pub use stack::Stack;
