//! Stateful property testing for DataStore capacity and eviction.
//!
//! Uses proptest-state-machine to drive a real store and a reference model
//! through the same sequence of writes, reads and deletes. The model tracks:
//!
//! - Surviving keys in first-insertion order (FIFO eviction)
//! - The capacity bound, including the zero-limit "disabled" store
//! - Patched field values, which must survive without changing position

use std::collections::HashMap;

use proptest::prelude::*;
use proptest_state_machine::{ReferenceStateMachine, StateMachineTest, prop_state_machine};
use serde_json::{Value, json};

use harbor_cache::{DataStore, Origin, Structure, StructureError, StructureKind, require_id};

/// Minimal structure used to exercise the store.
#[derive(Debug, Clone)]
struct Item {
    id: String,
    label: Option<String>,
}

impl Structure for Item {
    const KIND: StructureKind = StructureKind::User;

    fn id(&self) -> &str {
        &self.id
    }

    fn patch(&mut self, data: &Value) {
        if let Some(label) = data.get("label").and_then(Value::as_str) {
            self.label = Some(label.to_string());
        }
    }
}

fn item(data: &Value, _origin: &Origin) -> Result<Item, StructureError> {
    Ok(Item {
        id: require_id(data, StructureKind::User)?,
        label: data.get("label").and_then(Value::as_str).map(str::to_string),
    })
}

const KEYS: &[&str] = &["a", "b", "c", "d", "e", "f", "g"];

/// Operations that can be performed on a store.
#[derive(Debug, Clone)]
pub enum StoreOperation {
    /// Insert or replace `key` through `set`.
    Set { key: String },
    /// Insert or patch `key` through `add`.
    Add { key: String, label: String },
    /// Read `key` (must not affect eviction order).
    Read { key: String },
    /// Delete `key`.
    Delete { key: String },
}

/// Reference model of a store.
#[derive(Clone, Debug, Default)]
pub struct StoreModel {
    /// Configured limit.
    pub limit: usize,
    /// Surviving keys, oldest first.
    pub order: Vec<String>,
    /// Latest label per surviving key.
    pub labels: HashMap<String, Option<String>>,
    /// Keys evicted by the most recent operation.
    pub last_evicted: usize,
}

impl StoreModel {
    fn insert(&mut self, key: &str, label: Option<String>) {
        self.last_evicted = 0;
        if self.limit == 0 {
            return;
        }
        if !self.labels.contains_key(key) {
            if self.order.len() >= self.limit {
                let oldest = self.order.remove(0);
                self.labels.remove(&oldest);
                self.last_evicted = 1;
            }
            self.order.push(key.to_string());
        }
        self.labels.insert(key.to_string(), label);
    }
}

impl ReferenceStateMachine for StoreModel {
    type State = Self;
    type Transition = StoreOperation;

    fn init_state() -> BoxedStrategy<Self::State> {
        (0usize..5)
            .prop_map(|limit| StoreModel {
                limit,
                ..StoreModel::default()
            })
            .boxed()
    }

    fn transitions(_state: &Self::State) -> BoxedStrategy<Self::Transition> {
        let key = proptest::sample::select(KEYS).prop_map(str::to_string);
        prop_oneof![
            3 => key.clone().prop_map(|key| StoreOperation::Set { key }),
            3 => (key.clone(), "[a-z]{1,6}")
                .prop_map(|(key, label)| StoreOperation::Add { key, label }),
            2 => key.clone().prop_map(|key| StoreOperation::Read { key }),
            1 => key.prop_map(|key| StoreOperation::Delete { key }),
        ]
        .boxed()
    }

    fn apply(mut state: Self::State, transition: &Self::Transition) -> Self::State {
        match transition {
            StoreOperation::Set { key } => state.insert(key, None),
            StoreOperation::Add { key, label } => {
                state.last_evicted = 0;
                if let Some(existing) = state.labels.get_mut(key) {
                    *existing = Some(label.clone());
                } else {
                    state.insert(key, Some(label.clone()));
                }
            }
            StoreOperation::Read { .. } => state.last_evicted = 0,
            StoreOperation::Delete { key } => {
                state.last_evicted = 0;
                if state.labels.remove(key).is_some() {
                    state.order.retain(|k| k != key);
                }
            }
        }
        state
    }
}

/// Test harness wrapping a real DataStore.
pub struct StoreTestHarness {
    store: DataStore<Item>,
}

impl StoreTestHarness {
    fn new(limit: usize) -> Self {
        Self {
            store: DataStore::new(item, limit, true),
        }
    }

    fn apply_operation(&mut self, op: &StoreOperation) {
        match op {
            StoreOperation::Set { key } => {
                self.store.set(key.clone(), Item {
                    id: key.clone(),
                    label: None,
                });
            }
            StoreOperation::Add { key, label } => {
                let added = self
                    .store
                    .add(&json!({ "id": key, "label": label }))
                    .expect("record has an id");
                assert_eq!(added.id(), key);
                assert_eq!(added.label.as_deref(), Some(label.as_str()));
            }
            StoreOperation::Read { key } => {
                let _ = self.store.get(key);
                let _ = self.store.resolve(key.as_str());
            }
            StoreOperation::Delete { key } => {
                self.store.delete(key);
            }
        }
    }

    fn verify_invariants(&self, model: &StoreModel) {
        // Invariant 1: size is bounded by the limit
        assert!(
            self.store.len() <= model.limit,
            "size {} exceeds limit {}",
            self.store.len(),
            model.limit
        );

        // Invariant 2: surviving keys and their order match the model
        let keys: Vec<&str> = self.store.keys().collect();
        let expected: Vec<&str> = model.order.iter().map(String::as_str).collect();
        assert_eq!(keys, expected, "key order mismatch");

        // Invariant 3: every key resolves and round-trips through resolve_id
        for key in &model.order {
            let found = self.store.resolve(key.as_str()).expect("surviving key resolves");
            assert_eq!(self.store.resolve_id(found), Some(key.as_str()));
            assert_eq!(&found.label, &model.labels[key]);
        }

        // Invariant 4: at most one eviction per operation
        assert!(model.last_evicted <= 1);
    }
}

impl StateMachineTest for StoreTestHarness {
    type SystemUnderTest = Self;
    type Reference = StoreModel;

    fn init_test(
        ref_state: &<Self::Reference as ReferenceStateMachine>::State,
    ) -> Self::SystemUnderTest {
        Self::new(ref_state.limit)
    }

    fn apply(
        mut state: Self::SystemUnderTest,
        ref_state: &<Self::Reference as ReferenceStateMachine>::State,
        transition: <Self::Reference as ReferenceStateMachine>::Transition,
    ) -> Self::SystemUnderTest {
        let before: Vec<String> = state.store.keys().map(str::to_string).collect();
        state.apply_operation(&transition);
        let evicted = before
            .iter()
            .filter(|k| !state.store.has(k))
            .filter(|k| !matches!(&transition, StoreOperation::Delete { key } if key == *k))
            .count();
        assert!(evicted <= 1, "{} keys evicted by one operation", evicted);
        state.verify_invariants(ref_state);
        state
    }

    fn check_invariants(
        state: &Self::SystemUnderTest,
        ref_state: &<Self::Reference as ReferenceStateMachine>::State,
    ) {
        state.verify_invariants(ref_state);
    }
}

prop_state_machine! {
    #![proptest_config(ProptestConfig {
        cases: 100,
        max_shrink_iters: 10000,
        ..ProptestConfig::default()
    })]

    #[test]
    fn store_state_machine_test(sequential 1..60 => StoreTestHarness);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn survivors_are_newest_keys(limit in 1usize..8, count in 0usize..40) {
        let mut store = DataStore::new(item, limit, true);
        for i in 0..count {
            let key = format!("k{}", i);
            // Reading old keys must not save them from eviction
            let _ = store.get("k0");
            store.set(key.clone(), Item { id: key, label: None });
            prop_assert_eq!(store.len(), (i + 1).min(limit));
        }

        let expected: Vec<String> = (count.saturating_sub(limit)..count)
            .map(|i| format!("k{}", i))
            .collect();
        let keys: Vec<String> = store.keys().map(str::to_string).collect();
        prop_assert_eq!(keys, expected);
    }

    #[test]
    fn zero_limit_never_grows(ids in prop::collection::vec("[a-z]{1,4}", 0..30)) {
        let mut store = DataStore::new(item, 0, true);
        for id in ids {
            store.set(id.clone(), Item { id: id.clone(), label: None });
            let added = store.add(&json!({ "id": id })).expect("record has an id");
            prop_assert!(!added.is_cached());
            drop(added);
            prop_assert_eq!(store.len(), 0);
        }
    }

    #[test]
    fn add_twice_patches_same_entry(id in "[a-z]{1,8}", first in "[a-z]{1,6}", second in "[a-z]{1,6}") {
        let mut store = DataStore::new(item, 4, true);

        let first_ptr: *const Item = {
            let added = store.add(&json!({ "id": id, "label": first })).expect("record has an id");
            &*added
        };
        let second_ptr: *const Item = {
            let added = store.add(&json!({ "id": id, "label": second })).expect("record has an id");
            prop_assert!(added.is_patch());
            &*added
        };

        prop_assert!(std::ptr::eq(first_ptr, second_ptr));
        prop_assert_eq!(store.len(), 1);
        prop_assert_eq!(store.get(&id).and_then(|i| i.label.clone()), Some(second));
    }
}
