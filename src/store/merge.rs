//! Recursive field-level merge over schema-less JSON records.
//!
//! Objects merge key-by-key, recursively; arrays, scalars and null
//! overwrite whatever was there. This is intentionally shallow-typed: the
//! store imposes no schema, and validating field contents is the caller's
//! concern.

use serde_json::map::Entry;
use serde_json::Value;

/// Merges `update` into `base` in place.
///
/// For each key in an update object: if both sides hold an object at that
/// key, recurse; otherwise the update's value replaces the base's. Keys
/// absent from the update are left untouched, so a partial update never
/// destroys existing nested fields.
pub fn deep_merge(base: &mut Value, update: Value) {
    match (base, update) {
        (Value::Object(base_map), Value::Object(update_map)) => {
            for (key, value) in update_map {
                match base_map.entry(key) {
                    Entry::Occupied(mut slot) if slot.get().is_object() && value.is_object() => {
                        deep_merge(slot.get_mut(), value);
                    }
                    Entry::Occupied(mut slot) => {
                        slot.insert(value);
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(value);
                    }
                }
            }
        }
        (base, update) => *base = update,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn merged(mut base: Value, update: Value) -> Value {
        deep_merge(&mut base, update);
        base
    }

    #[test]
    fn disjoint_nested_fields_are_both_kept() {
        assert_eq!(
            merged(json!({"a": {"x": 1}}), json!({"a": {"y": 2}})),
            json!({"a": {"x": 1, "y": 2}})
        );
    }

    #[test]
    fn update_wins_at_the_same_path() {
        assert_eq!(
            merged(json!({"a": {"x": 1, "y": 2}}), json!({"a": {"x": 9}})),
            json!({"a": {"x": 9, "y": 2}})
        );
    }

    #[test]
    fn arrays_are_overwritten_not_concatenated() {
        assert_eq!(
            merged(json!({"tags": [1, 2, 3]}), json!({"tags": [4]})),
            json!({"tags": [4]})
        );
    }

    #[test]
    fn scalar_replaces_object_and_object_replaces_scalar() {
        assert_eq!(
            merged(json!({"a": {"x": 1}}), json!({"a": 7})),
            json!({"a": 7})
        );
        assert_eq!(
            merged(json!({"a": 7}), json!({"a": {"x": 1}})),
            json!({"a": {"x": 1}})
        );
    }

    #[test]
    fn null_overwrites_like_any_scalar() {
        assert_eq!(
            merged(json!({"a": {"x": 1}, "b": 2}), json!({"b": null})),
            json!({"a": {"x": 1}, "b": null})
        );
    }

    #[test]
    fn empty_update_changes_nothing() {
        let base = json!({"a": {"x": 1}, "b": [1, 2]});
        assert_eq!(merged(base.clone(), json!({})), base);
    }

    // Generator for JSON values a few levels deep, biased toward objects so
    // the recursive arm gets exercised.
    fn arb_json() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            "[a-z]{0,8}".prop_map(Value::from),
        ];
        leaf.prop_recursive(3, 32, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::from),
                prop::collection::hash_map("[a-z]{1,4}", inner, 0..4)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    proptest! {
        // Applying the same update twice is the same as applying it once.
        #[test]
        fn merge_is_idempotent(base in arb_json(), update in arb_json()) {
            let once = merged(base.clone(), update.clone());
            let twice = merged(once.clone(), update);
            prop_assert_eq!(once, twice);
        }

        // Keys never present in the update survive the merge unchanged.
        #[test]
        fn merge_preserves_untouched_keys(
            base in prop::collection::hash_map("[a-m]{1,4}", arb_json(), 0..4),
            update in prop::collection::hash_map("[n-z]{1,4}", arb_json(), 0..4),
        ) {
            let base: serde_json::Map<String, Value> = base.into_iter().collect();
            let update: serde_json::Map<String, Value> = update.into_iter().collect();
            let result = merged(Value::Object(base.clone()), Value::Object(update));
            for (key, value) in &base {
                prop_assert_eq!(result.get(key.as_str()), Some(value));
            }
        }

        // Merging an empty update into a record is the identity.
        #[test]
        fn empty_update_is_identity(
            base in prop::collection::hash_map("[a-z]{1,4}", arb_json(), 0..4),
        ) {
            let base = Value::Object(base.into_iter().collect());
            let result = merged(base.clone(), Value::Object(serde_json::Map::new()));
            prop_assert_eq!(result, base);
        }
    }
}
