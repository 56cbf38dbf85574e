use daq_appenv::resolver::merge;
use daq_appenv::types::EnvMap;
use proptest::prelude::*;

fn env_strategy() -> impl Strategy<Value = EnvMap> {
    prop::collection::btree_map("[A-E]", "[a-z0-9]{0,4}", 0..6)
}

proptest! {
    #[test]
    fn merge_keys_are_the_union(base in env_strategy(), overrides in env_strategy()) {
        let merged = merge(&base, &overrides);
        for key in base.keys().chain(overrides.keys()) {
            prop_assert!(merged.contains_key(key));
        }
        prop_assert!(merged.len() <= base.len() + overrides.len());
    }

    #[test]
    fn overrides_win(base in env_strategy(), overrides in env_strategy()) {
        let merged = merge(&base, &overrides);
        for (key, value) in &overrides {
            prop_assert_eq!(merged.get(key), Some(value));
        }
        for (key, value) in &base {
            if !overrides.contains_key(key) {
                prop_assert_eq!(merged.get(key), Some(value));
            }
        }
    }

    #[test]
    fn merge_leaves_inputs_untouched(base in env_strategy(), overrides in env_strategy()) {
        let base_before = base.clone();
        let overrides_before = overrides.clone();
        let _ = merge(&base, &overrides);
        prop_assert_eq!(base, base_before);
        prop_assert_eq!(overrides, overrides_before);
    }

    #[test]
    fn merge_with_empty_is_identity(base in env_strategy()) {
        prop_assert_eq!(merge(&base, &EnvMap::new()), base.clone());
        prop_assert_eq!(merge(&EnvMap::new(), &base), base);
    }
}
