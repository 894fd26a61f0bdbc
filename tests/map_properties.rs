// HashMap property tests against a std::collections::HashMap model.
//
// Property 1: random put/remove/get sequences agree with the model.
//  - Keys come from a small range so overwrites and removals of present
//    keys are frequent; small capacities make growth frequent too.
//  - Invariant after each step: len() matches, every op's return value
//    matches, and contains_key agrees for the key just touched.
//
// Property 2: growth preserves contents.
//  - Insert N distinct keys into a small table, read every one back.
//  - Capacity never shrinks and strictly grows once N crosses the
//    threshold.
//
// Property 3: equality and hashing ignore layout.
//  - Two maps built from the same pairs in different orders and with
//    different initial capacities are equal and hash equal.
use std::collections::HashMap as Model;
use std::hash::BuildHasher;
use std::hash::BuildHasherDefault;
use std::hash::DefaultHasher;

use proptest::prelude::*;
use quad_hash::HashMap;
use quad_hash::TableConfig;

#[derive(Debug, Clone)]
enum Op {
    Insert(u16, u32),
    Remove(u16),
    Get(u16),
    Clear,
}

fn op_strategy(key_space: u16) -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (0..key_space, any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        3 => (0..key_space).prop_map(Op::Remove),
        3 => (0..key_space).prop_map(Op::Get),
        1 => Just(Op::Clear),
    ]
}

fn config_strategy() -> impl Strategy<Value = TableConfig> {
    (1usize..40, prop_oneof![Just(0.5f32), Just(0.8f32), Just(0.95f32)]).prop_map(
        |(initial_capacity, load_factor)| TableConfig {
            initial_capacity,
            load_factor,
        },
    )
}

proptest! {
    #[test]
    fn prop_matches_model(
        config in config_strategy(),
        ops in proptest::collection::vec(op_strategy(64), 1..300),
    ) {
        let mut map: HashMap<u16, u32> = HashMap::with_config(config);
        let mut model: Model<u16, u32> = Model::new();

        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    prop_assert_eq!(map.insert(k, v), model.insert(k, v));
                    prop_assert!(map.contains_key(&k));
                }
                Op::Remove(k) => {
                    prop_assert_eq!(map.remove(&k), model.remove(&k));
                    prop_assert!(!map.contains_key(&k));
                }
                Op::Get(k) => {
                    prop_assert_eq!(map.get(&k), model.get(&k));
                }
                Op::Clear => {
                    map.clear();
                    model.clear();
                }
            }
            prop_assert_eq!(map.len(), model.len());
        }

        prop_assert!(map == model);
        for (k, v) in &model {
            prop_assert_eq!(map.get(k), Some(v));
        }
    }

    #[test]
    fn prop_growth_preserves_entries(
        config in config_strategy(),
        count in 1usize..500,
    ) {
        let mut map: HashMap<u64, u64> = HashMap::with_config(config);
        let initial_capacity = map.capacity();
        let mut capacity = initial_capacity;

        for key in 0..count as u64 {
            prop_assert_eq!(map.insert(key, key * 3), None);
            prop_assert!(map.capacity() >= capacity);
            capacity = map.capacity();
        }

        prop_assert_eq!(map.len(), count);
        if count as f32 / initial_capacity as f32 >= map.load_factor() {
            prop_assert!(map.capacity() > initial_capacity);
        }
        for key in 0..count as u64 {
            prop_assert_eq!(map.get(&key), Some(&(key * 3)));
        }
    }

    #[test]
    fn prop_equality_ignores_insertion_order_and_capacity(
        pairs in proptest::collection::hash_map(any::<u32>(), any::<i64>(), 0..200),
        first_capacity in 1usize..100,
        second_capacity in 1usize..100,
    ) {
        let mut forward: HashMap<u32, i64> = HashMap::with_capacity(first_capacity);
        for (&k, &v) in pairs.iter() {
            forward.insert(k, v);
        }

        let mut backward: HashMap<u32, i64> = HashMap::with_capacity(second_capacity);
        let mut reversed: Vec<(u32, i64)> = pairs.iter().map(|(&k, &v)| (k, v)).collect();
        reversed.reverse();
        for (k, v) in reversed {
            backward.insert(k, v);
        }

        prop_assert!(forward == backward);
        prop_assert!(backward == forward);

        let hasher = BuildHasherDefault::<DefaultHasher>::default();
        prop_assert_eq!(hasher.hash_one(&forward), hasher.hash_one(&backward));
    }

    #[test]
    fn prop_tombstones_never_hide_keys(
        keys in proptest::collection::hash_set(0u64..10_000, 1..150),
        removals in proptest::collection::vec(any::<proptest::sample::Index>(), 0..150),
    ) {
        let keys: Vec<u64> = keys.into_iter().collect();
        let mut map: HashMap<u64, u64> = HashMap::with_capacity(7);
        for &key in &keys {
            map.insert(key, key);
        }

        let mut removed = std::collections::HashSet::new();
        for index in removals {
            let key = *index.get(&keys);
            let expected = if removed.insert(key) { Some(key) } else { None };
            prop_assert_eq!(map.remove(&key), expected);
        }

        for &key in &keys {
            let expected = if removed.contains(&key) { None } else { Some(&key) };
            prop_assert_eq!(map.get(&key), expected);
        }
        prop_assert_eq!(map.len(), keys.len() - removed.len());
    }
}
