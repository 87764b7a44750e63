use crate::trie::{Trie, TrieNode};

use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

/// Every node below the root must hold a value or lead to one
fn validate_tree(t: &Trie) {
    let Some(root) = t.root() else {
        return;
    };
    assert!(
        root.has_value() || !root.is_leaf(),
        "non-empty trie must not keep a dead root"
    );

    let mut stack: Vec<&TrieNode> = root.children().values().map(|c| &**c).collect();
    while let Some(node) = stack.pop() {
        assert!(
            node.has_value() || !node.is_leaf(),
            "dead branch should have been pruned"
        );
        stack.extend(node.children().values().map(|c| &**c));
    }
}

#[derive(Clone, Debug)]
enum Op {
    Put(Vec<u8>, u64),
    PutText(Vec<u8>, String),
    Remove(Vec<u8>),
}

#[derive(Clone, Debug, PartialEq)]
enum Model {
    Number(u64),
    Text(String),
}

fn key_strategy() -> impl Strategy<Value = Vec<u8>> + Clone {
    // Small alphabet so keys share prefixes and extend each other
    prop::collection::vec(b'a'..=b'd', 0..=6)
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let key = key_strategy();
    let op = prop_oneof![
        40 => (key.clone(), any::<u64>()).prop_map(|(k, v)| Op::Put(k, v)),
        15 => (key.clone(), "[a-z]{0,4}").prop_map(|(k, v)| Op::PutText(k, v)),
        45 => key.prop_map(Op::Remove),
    ];
    prop::collection::vec(op, 0..=200)
}

fn check_against_model(t: &Trie, m: &BTreeMap<Vec<u8>, Model>, keys: &BTreeSet<Vec<u8>>) {
    for key in keys {
        let expected = m.get(key);
        let number = t.get::<u64>(key).copied().map(Model::Number);
        let text = t.get::<String>(key).cloned().map(Model::Text);
        assert!(
            number.is_none() || text.is_none(),
            "a key holds exactly one type"
        );
        assert_eq!(number.or(text).as_ref(), expected, "key {:?}", key);
        assert_eq!(t.contains_key(key), expected.is_some());
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence_with_history(ops in ops_strategy()) {
        let mut t = Trie::new();
        let mut m: BTreeMap<Vec<u8>, Model> = BTreeMap::new();
        let mut keys: BTreeSet<Vec<u8>> = BTreeSet::new();
        let mut history: Vec<(Trie, BTreeMap<Vec<u8>, Model>)> = vec![(t.clone(), m.clone())];

        for op in ops {
            match op {
                Op::Put(key, value) => {
                    t = t.put(&key, value);
                    m.insert(key.clone(), Model::Number(value));
                    keys.insert(key);
                }
                Op::PutText(key, value) => {
                    t = t.put(&key, value.clone());
                    m.insert(key.clone(), Model::Text(value));
                    keys.insert(key);
                }
                Op::Remove(key) => {
                    let next = t.remove(&key);
                    let was_present = m.remove(&key).is_some();
                    prop_assert_eq!(next != t, was_present);
                    t = next;
                    keys.insert(key);
                }
            }
            validate_tree(&t);
            history.push((t.clone(), m.clone()));
        }

        // Older versions must still answer exactly as they did when built
        for (trie, model) in &history {
            check_against_model(trie, model, &keys);
        }
        prop_assert_eq!(t.is_empty(), m.is_empty());
    }

    #[test]
    fn prop_put_then_get(
        base in prop::collection::vec((key_strategy(), any::<u64>()), 0..=20),
        key in key_strategy(),
        value in any::<u64>(),
    ) {
        let mut t = Trie::new();
        for (k, v) in &base {
            t = t.put(k, *v);
        }

        let next = t.put(&key, value);
        prop_assert_eq!(next.get::<u64>(&key), Some(&value));
        prop_assert_eq!(next.get::<u32>(&key), None);
        for (k, _) in &base {
            if *k != key {
                prop_assert_eq!(next.get::<u64>(k), t.get::<u64>(k));
            }
        }
    }

    #[test]
    fn prop_put_shares_off_path_subtrees(
        base in prop::collection::vec((key_strategy(), any::<u64>()), 1..=20),
        key in key_strategy(),
    ) {
        let mut t = Trie::new();
        for (k, v) in &base {
            t = t.put(k, *v);
        }
        let next = t.put(&key, 0u64);

        // Walk the written path; every sibling edge must point at the same node
        let mut old = t.root().map(|n| &**n);
        let mut new = next.root().map(|n| &**n);
        for &symbol in &key {
            let (Some(o), Some(n)) = (old, new) else {
                break;
            };
            for (s, child) in o.children() {
                if *s != symbol {
                    let shared = n.child(*s).expect("sibling kept");
                    prop_assert!(std::sync::Arc::ptr_eq(child, shared));
                }
            }
            old = o.child(symbol).map(|c| &**c);
            new = n.child(symbol).map(|c| &**c);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 16,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_deep_keys(
        lengths in prop::collection::vec(0usize..=20_000, 1..=6),
        fill in b'a'..=b'b',
    ) {
        // Keys are prefixes of one long run, so each extends the shorter ones
        let run = vec![fill; 20_000];
        let mut t = Trie::new();
        for (i, &len) in lengths.iter().enumerate() {
            t = t.put(&run[..len], i as u64);
        }
        validate_tree(&t);

        let mut expected: BTreeMap<usize, u64> = BTreeMap::new();
        for (i, &len) in lengths.iter().enumerate() {
            expected.insert(len, i as u64);
        }
        for (&len, value) in &expected {
            prop_assert_eq!(t.get::<u64>(&run[..len]), Some(value));
        }

        for &len in expected.keys() {
            let next = t.remove(&run[..len]);
            prop_assert!(next != t);
            prop_assert_eq!(next.get::<u64>(&run[..len]), None);
            validate_tree(&next);
            t = next;
        }
        prop_assert!(t.is_empty());
    }
}
