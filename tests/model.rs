//! Compares an `OrderedIndex` against `BTreeSet` over random operation sequences.

use std::collections::BTreeSet;

use avl_index::{Balancing, EmptyError, OrderedIndex};
use proptest::prelude::*;

#[derive(Copy, Clone, Debug)]
enum Op {
    Insert(u16),
    Remove(u16),
    Contains(u16),
    Min,
    Max,
    PopFirst,
    PopLast,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    // A small key space keeps duplicate inserts and hits on removal frequent.
    let key = 0u16..256;
    prop_oneof![
        3 => key.clone().prop_map(Op::Insert),
        2 => key.clone().prop_map(Op::Remove),
        1 => key.prop_map(Op::Contains),
        1 => Just(Op::Min),
        1 => Just(Op::Max),
        1 => Just(Op::PopFirst),
        1 => Just(Op::PopLast),
    ]
}

fn run_equivalence(balancing: Balancing, ops: Vec<Op>) {
    let mut model = BTreeSet::new();
    let mut index = OrderedIndex::with_balancing(balancing);

    for (op_id, op) in ops.into_iter().enumerate() {
        match op {
            Op::Insert(key) => {
                let before = index.to_string();
                let inserted = index.insert(key);
                assert_eq!(inserted, model.insert(key), "Op #{op_id}: {op:?}");
                if !inserted {
                    assert_eq!(index.to_string(), before, "Op #{op_id}: {op:?}");
                }
            }
            Op::Remove(key) => {
                let before = index.to_string();
                let removed = index.remove(&key);
                assert_eq!(removed, model.remove(&key), "Op #{op_id}: {op:?}");
                if !removed {
                    assert_eq!(index.to_string(), before, "Op #{op_id}: {op:?}");
                }
            }
            Op::Contains(key) => {
                assert_eq!(index.contains(&key), model.contains(&key), "Op #{op_id}: {op:?}");
            }
            Op::Min => {
                assert_eq!(index.min().ok(), model.first(), "Op #{op_id}: {op:?}");
            }
            Op::Max => {
                assert_eq!(index.max().ok(), model.last(), "Op #{op_id}: {op:?}");
            }
            Op::PopFirst => {
                assert_eq!(index.pop_first(), model.pop_first(), "Op #{op_id}: {op:?}");
            }
            Op::PopLast => {
                assert_eq!(index.pop_last(), model.pop_last(), "Op #{op_id}: {op:?}");
            }
        }

        if let Some(violation) = index.find_violation() {
            panic!("Op #{op_id}: {op:?} left the index inconsistent: {violation}");
        }
        assert_eq!(index.len(), model.len());
        assert!(index.iter().eq(model.iter()), "Op #{op_id}: {op:?}");
    }

    if index.is_empty() {
        assert_eq!(index.min(), Err(EmptyError));
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    #[test]
    fn avl_matches_btree(ops in proptest::collection::vec(op_strategy(), 0..400)) {
        run_equivalence(Balancing::Avl, ops);
    }

    #[test]
    fn plain_matches_btree(ops in proptest::collection::vec(op_strategy(), 0..200)) {
        run_equivalence(Balancing::Disabled, ops);
    }

    #[test]
    fn inorder_is_sorted(keys in proptest::collection::vec(any::<i64>(), 0..300)) {
        let index: OrderedIndex<i64> = keys.iter().copied().collect();
        let listed: Vec<i64> = index.inorder_traversal().into_iter().copied().collect();
        prop_assert!(listed.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert!(index.validate());
    }
}
