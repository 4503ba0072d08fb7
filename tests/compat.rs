//! Randomised checks of `VectorMap` against `std::collections::BTreeMap`.

use std::collections::BTreeMap;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vector_map::{Natural, Reversed, VectorMap};

const RAND_SEED: u64 = 123;

fn assert_same(map: &VectorMap<i32, i32>, model: &BTreeMap<i32, i32>) {
    assert_eq!(map.len(), model.len());
    assert!(map.iter().eq(model.iter()));
}

#[test]
fn test_random_ops_against_btree_map() {
    let mut rng = StdRng::seed_from_u64(RAND_SEED);
    let mut map = VectorMap::<i32, i32>::new();
    let mut model = BTreeMap::<i32, i32>::new();

    for round in 0..10_000 {
        let k = rng.gen_range(0..500);
        match rng.gen_range(0..6) {
            0 | 1 => {
                let inserted = map.insert(k, round).1;
                let expected = !model.contains_key(&k);
                model.entry(k).or_insert(round);
                assert_eq!(inserted, expected);
            }
            2 => {
                let hint = map.lower_bound(&rng.gen_range(0..500));
                let cursor = map.insert_hint(hint, k, round);
                model.entry(k).or_insert(round);
                assert_eq!(cursor.key(&map), Some(&k));
            }
            3 => {
                assert_eq!(map.remove(&k), model.remove(&k));
            }
            4 => {
                assert_eq!(map.get(&k), model.get(&k));
                assert_eq!(
                    map.lower_bound(&k).key(&map),
                    model.range(k..).next().map(|(k, _)| k)
                );
                assert_eq!(
                    map.upper_bound(&k).key(&map),
                    model.range(k + 1..).next().map(|(k, _)| k)
                );
            }
            _ => {
                let hi = k + rng.gen_range(0..50);
                assert!(map.range(k..hi).eq(model.range(k..hi)));
            }
        }
    }

    assert_same(&map, &model);
    assert_eq!(map.first_key_value(), model.first_key_value());
    assert_eq!(map.last_key_value(), model.last_key_value());
}

#[test]
fn test_reversed_matches_reversed_btree_map() {
    let mut rng = StdRng::seed_from_u64(RAND_SEED);
    let pairs = (0..1000)
        .map(|_| (rng.gen_range(0..300), rng.gen::<i32>()))
        .collect::<Vec<_>>();

    let map = VectorMap::from_iter_with(pairs.iter().copied(), Reversed(Natural));
    let mut model = BTreeMap::new();
    for (k, v) in pairs {
        model.entry(k).or_insert(v);
    }

    assert!(map.iter().eq(model.iter().rev()));
}

#[derive(Debug, Clone)]
enum Op {
    Insert(i32, i32),
    Erase(i32),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0i32..200, any::<i32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        1 => (0i32..200).prop_map(Op::Erase),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn keys_stay_sorted_and_unique(ops in prop::collection::vec(op_strategy(), 0..400)) {
        let mut map = VectorMap::<i32, i32>::new();
        let mut model = BTreeMap::<i32, i32>::new();

        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    map.insert(k, v);
                    model.entry(k).or_insert(v);
                }
                Op::Erase(k) => {
                    prop_assert_eq!(map.erase(&k), usize::from(model.remove(&k).is_some()));
                }
            }
        }

        prop_assert!(map.as_slice().windows(2).all(|w| w[0].0 < w[1].0));
        prop_assert!(map.iter().eq(model.iter()));
    }

    #[test]
    fn equal_range_spans_at_most_one(keys in prop::collection::vec(0i32..100, 0..100), probe in -10i32..110) {
        let map: VectorMap<i32, ()> = keys.iter().map(|k| (*k, ())).collect();
        let (first, last) = map.equal_range(&probe);

        prop_assert_eq!(first, map.lower_bound(&probe));
        prop_assert_eq!(last, map.upper_bound(&probe));
        prop_assert_eq!(last.offset() - first.offset(), map.count(&probe));
        prop_assert_eq!(map.count(&probe), usize::from(keys.contains(&probe)));
    }

    #[test]
    fn insert_then_erase_is_identity(keys in prop::collection::vec(0i32..1000, 0..200), k in 1000i32..2000) {
        let mut map: VectorMap<i32, i32> = keys.iter().map(|k| (*k, *k)).collect();
        let before = map.clone();

        prop_assert!(map.insert(k, 0).1);
        prop_assert_eq!(map.erase(&k), 1);
        prop_assert_eq!(map, before);
    }

    #[test]
    fn range_construction_keeps_first(pairs in prop::collection::vec((0i32..50, any::<i32>()), 0..200)) {
        let map: VectorMap<i32, i32> = pairs.iter().copied().collect();

        let mut model = BTreeMap::new();
        for (k, v) in pairs {
            model.entry(k).or_insert(v);
        }
        prop_assert!(map.iter().eq(model.iter()));
    }
}
