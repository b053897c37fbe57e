use proptest::prelude::*;

#[allow(dead_code)]
pub(super) fn assert_eq_iters<I: Iterator, J: Iterator<Item = I::Item>>(
    mut i: I,
    mut j: J,
) where
    I::Item: std::fmt::Debug + Eq, // same inferred for J::Item
{
    loop {
        match (i.next(), j.next()) {
            (None, None) => return,
            (a, b) => assert_eq!(a, b),
        }
    }
}

// Largest height an AVL tree with n entries can reach.
#[allow(dead_code)]
pub(super) fn avl_height_bound(n: usize) -> usize {
    (1.4405 * ((n + 2) as f64).log2() - 0.3277).floor() as usize
}

pub(super) type SmallIntPairs = Vec<(u16, u16)>;

#[allow(dead_code)]
pub(super) fn small_int_pairs() -> impl Strategy<Value = SmallIntPairs> {
    prop::collection::vec((0u16..1024u16, 0u16..1024u16), 0..512)
}

#[allow(dead_code)]
pub(super) fn string_u16_pairs() -> impl Strategy<Value = Vec<(String, u16)>> {
    prop::collection::vec(("[a-z]{0,2}", 0u16..1024u16), 0..512)
}

/// A mutation applied to a container under test and to its std model.
#[allow(dead_code)]
#[derive(Clone, Debug)]
pub(super) enum Op {
    Insert(u16, u16),
    Remove(u16),
    Pop,
    Peek,
}

#[allow(dead_code)]
pub(super) fn op_seqs(key_range: u16) -> impl Strategy<Value = Vec<Op>> {
    let op = prop_oneof![
        4 => (0..key_range, any::<u16>()).prop_map(|(k, v)| Op::Insert(k, v)),
        2 => (0..key_range).prop_map(Op::Remove),
        1 => Just(Op::Pop),
        1 => Just(Op::Peek),
    ];

    prop::collection::vec(op, 0..512)
}
