//! Property-based tests for the repository merge algebra.
//!
//! These tests use proptest to generate random catalogs and verify that
//! the merge invariants and the include laws hold for all inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::metadata::{Property, Source};
    use crate::repository::Repository;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    /// A generated registration: group id, source type, property id and a
    /// distinguishing default value.
    type RegisteredEntry = (String, String, String, u32);

    /// Narrow alphabets keep collisions frequent, which is where the
    /// first-writer-wins rules actually get exercised.
    fn entry_strategy() -> impl Strategy<Value = RegisteredEntry> {
        ("[a-c]{1,2}", "[A-C]", "[a-c]{1,2}\\.[a-d]{1,2}", any::<u32>())
    }

    fn entries_strategy(max: usize) -> impl Strategy<Value = Vec<RegisteredEntry>> {
        prop::collection::vec(entry_strategy(), 0..max)
    }

    /// Replay a list of registrations against a fresh repository.
    fn build_repository(entries: &[RegisteredEntry]) -> Repository {
        let mut repository = Repository::new();
        for (group_id, source_type, property_id, default) in entries {
            let source = Source::new(group_id.clone(), source_type.clone());
            repository.add_sources([source.clone()]).unwrap();
            let mut property = Property::new(property_id.clone());
            property.default_value = Some(serde_json::json!(default));
            repository.add_property(property, Some(&source)).unwrap();
        }
        repository
    }

    type PropertyMap = BTreeMap<String, Property>;

    /// Deterministic projection of a repository's observable state, used to
    /// compare repositories without depending on hash iteration order.
    #[derive(Debug, PartialEq)]
    struct GroupSnapshot {
        properties: PropertyMap,
        sources: BTreeMap<String, PropertyMap>,
    }

    fn snapshot(repository: &Repository) -> BTreeMap<String, GroupSnapshot> {
        repository
            .all_groups()
            .iter()
            .map(|(group_id, group)| {
                let properties = group
                    .properties()
                    .iter()
                    .map(|(id, property)| (id.clone(), property.clone()))
                    .collect();
                let sources = group
                    .sources()
                    .iter()
                    .map(|(source_type, source)| {
                        (
                            source_type.clone(),
                            source
                                .properties()
                                .iter()
                                .map(|(id, property)| (id.clone(), property.clone()))
                                .collect(),
                        )
                    })
                    .collect();
                (group_id.clone(), GroupSnapshot { properties, sources })
            })
            .collect()
    }

    /// Whether every key of `prev` is still present in `next`.
    fn is_key_subset(
        prev: &BTreeMap<String, GroupSnapshot>,
        next: &BTreeMap<String, GroupSnapshot>,
    ) -> bool {
        prev.iter().all(|(group_id, prev_group)| {
            next.get(group_id).is_some_and(|next_group| {
                prev_group
                    .properties
                    .keys()
                    .all(|id| next_group.properties.contains_key(id))
                    && prev_group.sources.iter().all(|(source_type, prev_props)| {
                        next_group.sources.get(source_type).is_some_and(|next_props| {
                            prev_props.keys().all(|id| next_props.contains_key(id))
                        })
                    })
            })
        })
    }

    proptest! {
        /// Property: for any insertion sequence, the retained value under a
        /// key equals the first inserted value, at both the group and the
        /// source mapping level.
        #[test]
        fn first_writer_wins_per_key(entries in entries_strategy(16)) {
            let repository = build_repository(&entries);

            let mut expected_group: BTreeMap<(String, String), u32> = BTreeMap::new();
            let mut expected_source: BTreeMap<(String, String, String), u32> = BTreeMap::new();
            for (group_id, source_type, property_id, default) in &entries {
                expected_group
                    .entry((group_id.clone(), property_id.clone()))
                    .or_insert(*default);
                expected_source
                    .entry((group_id.clone(), source_type.clone(), property_id.clone()))
                    .or_insert(*default);
            }

            let groups = repository.all_groups();
            for ((group_id, property_id), default) in &expected_group {
                let group = groups.get(group_id).expect("group should exist");
                let property = group.property(property_id).expect("property should exist");
                prop_assert_eq!(
                    property.default_value.as_ref(),
                    Some(&serde_json::json!(*default))
                );
            }
            for ((group_id, source_type, property_id), default) in &expected_source {
                let source = groups
                    .get(group_id)
                    .and_then(|group| group.source(source_type))
                    .expect("source should exist");
                let property = source.property(property_id).expect("property should exist");
                prop_assert_eq!(
                    property.default_value.as_ref(),
                    Some(&serde_json::json!(*default))
                );
            }
        }

        /// Property: no registration shrinks the set of keys present in any
        /// mapping.
        #[test]
        fn registration_is_monotone(entries in entries_strategy(16)) {
            let mut repository = Repository::new();
            let mut previous = snapshot(&repository);
            for (group_id, source_type, property_id, default) in &entries {
                let source = Source::new(group_id.clone(), source_type.clone());
                repository.add_sources([source.clone()]).unwrap();
                let mut property = Property::new(property_id.clone());
                property.default_value = Some(serde_json::json!(default));
                repository.add_property(property, Some(&source)).unwrap();

                let current = snapshot(&repository);
                prop_assert!(is_key_subset(&previous, &current));
                previous = current;
            }
        }

        /// Law: including an empty repository is a no-op on the receiver's
        /// observable state.
        #[test]
        fn include_empty_is_identity(entries in entries_strategy(16)) {
            let mut repository = build_repository(&entries);
            let before = snapshot(&repository);
            repository.include(Repository::new());
            prop_assert_eq!(before, snapshot(&repository));
        }

        /// Law: including a copy of oneself leaves the observable state
        /// unchanged.
        #[test]
        fn include_self_copy_is_idempotent(entries in entries_strategy(16)) {
            let mut repository = build_repository(&entries);
            let copy = repository.clone();
            let before = snapshot(&repository);
            repository.include(copy);
            prop_assert_eq!(before, snapshot(&repository));
        }

        /// Law: include is associative under the first-writer-wins
        /// projection. Merging A, then B, then C matches merging A with
        /// (B merged with C).
        #[test]
        fn include_is_associative(
            a in entries_strategy(8),
            b in entries_strategy(8),
            c in entries_strategy(8),
        ) {
            let sequential = {
                let mut repository = build_repository(&a);
                repository.include(build_repository(&b));
                repository.include(build_repository(&c));
                snapshot(&repository)
            };
            let grouped = {
                let mut tail = build_repository(&b);
                tail.include(build_repository(&c));
                let mut repository = build_repository(&a);
                repository.include(tail);
                snapshot(&repository)
            };
            prop_assert_eq!(sequential, grouped);
        }
    }
}
