//! # Configuration Metadata Repository
//!
//! This module provides the `Repository`, the top-level container that
//! aggregates configuration property metadata contributed by independent
//! producers (jars, modules, metadata files) into one queryable structure.
//!
//! ## Design
//!
//! The whole merge algebra lives here; groups, sources and properties are
//! passive value objects. Three entry points mutate the repository:
//!
//! - **`add_sources`**: register source containers, creating their groups
//!   on first mention.
//! - **`add_property`**: attach a property to its group and, when a source
//!   is supplied, to that source's registered bucket.
//! - **`include`**: union a foreign repository into this one.
//!
//! All three combine entities under *first-writer-wins* rules: the earliest
//! entry registered under a key is retained, later entries under the same
//! key only add detail. The repository is monotonic. Nothing is ever
//! removed, so downstream consumers (documentation generators, completion
//! back-ends, validators) can cache what they have seen.
//!
//! ## Concurrency
//!
//! The repository is defined for single-threaded mutation. First-writer-wins
//! depends on a total order of insertions, so the structure is deliberately
//! unsynchronized; wrap it in a lock if readers and writers must share it.

use crate::error::{Error, Result};
use crate::metadata::{Group, Property, Source};
use log::debug;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Identifier of the distinguished group housing properties registered
/// without an owning source.
///
/// The group is materialized lazily the first time such a property arrives.
/// It is structurally no different from any other group; consumers may
/// query it directly.
pub const ROOT_GROUP: &str = "_ROOT_GROUP_";

/// In-memory catalog of configuration property metadata.
///
/// Groups are created on first mention and never removed; the same holds
/// for sources within a group and properties within a mapping. Failing
/// operations are atomic and leave the repository untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Repository {
    groups: HashMap<String, Group>,
}

impl Repository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the given sources.
    ///
    /// The group of each source is created if absent. A typed source is
    /// installed under its type identifier; if the (group, type) pair is
    /// already registered, the existing source keeps its identity and only
    /// gains the new source's properties. Sources without a type create
    /// their group but contribute no source bucket.
    ///
    /// All inputs are validated before anything is mutated: a source with
    /// an empty group identifier fails with [`Error::EmptyGroupId`], a
    /// present but empty type with [`Error::EmptySourceType`].
    pub fn add_sources<I>(&mut self, sources: I) -> Result<()>
    where
        I: IntoIterator<Item = Source>,
    {
        let sources: Vec<Source> = sources.into_iter().collect();
        for source in &sources {
            if source.group_id.is_empty() {
                return Err(Error::EmptyGroupId);
            }
            if source.source_type.as_deref() == Some("") {
                return Err(Error::EmptySourceType {
                    group_id: source.group_id.clone(),
                });
            }
        }

        for source in sources {
            let group = self
                .groups
                .entry(source.group_id.clone())
                .or_insert_with(|| Group::new(source.group_id.clone()));
            match source.source_type.clone() {
                Some(source_type) => {
                    Self::add_or_merge_source(group.sources_mut(), source_type, source);
                }
                None => {
                    debug!(
                        "source for group {} has no type, contributing no source bucket",
                        source.group_id
                    );
                }
            }
        }
        Ok(())
    }

    /// Attach a property to its group and, when a source is supplied, to
    /// that source.
    ///
    /// Without a source the property lands in the [`ROOT_GROUP`] group,
    /// which is created on first use. With a source, the source's group
    /// must already be registered through [`Repository::add_sources`];
    /// otherwise the call fails with [`Error::UnknownGroup`] and mutates
    /// nothing.
    ///
    /// Both the source-level and the group-level insert are independently
    /// first-writer-wins: a property registered twice against the same
    /// source keeps its first source-level form, and a property registered
    /// against two sources of one group keeps its first group-level form
    /// while both source views retain their own entries.
    pub fn add_property(&mut self, property: Property, source: Option<&Source>) -> Result<()> {
        if property.id.is_empty() {
            return Err(Error::EmptyPropertyId);
        }

        let Some(source) = source else {
            let group = self
                .groups
                .entry(ROOT_GROUP.to_string())
                .or_insert_with(|| Group::new(ROOT_GROUP));
            group.put_property(property);
            return Ok(());
        };

        if source.group_id.is_empty() {
            return Err(Error::EmptyGroupId);
        }
        let group = self
            .groups
            .get_mut(&source.group_id)
            .ok_or_else(|| Error::UnknownGroup {
                group_id: source.group_id.clone(),
            })?;

        if let Some(source_type) = source.source_type.as_deref() {
            match group.sources_mut().get_mut(source_type) {
                Some(bucket) => {
                    bucket.put_property(property.clone());
                }
                None => debug!(
                    "no source registered under ({}, {}), recording {} in the group view only",
                    source.group_id, source_type, property.id
                ),
            }
        }
        group.put_property(property);
        Ok(())
    }

    /// Union another repository into this one.
    ///
    /// Groups unknown locally are adopted wholesale. Overlapping groups
    /// merge their property and source views under first-writer-wins,
    /// meaning entries already present locally always win and foreign
    /// entries only fill gaps.
    ///
    /// `other` is consumed: adopted groups transfer ownership, so the
    /// foreign repository cannot be observed or mutated afterwards.
    pub fn include(&mut self, other: Repository) {
        for (group_id, group) in other.groups {
            match self.groups.entry(group_id) {
                Entry::Vacant(slot) => {
                    slot.insert(group);
                }
                Entry::Occupied(mut slot) => {
                    let existing = slot.get_mut();
                    let (sources, properties) = group.into_parts();
                    for property in properties.into_values() {
                        existing.put_property(property);
                    }
                    for (source_type, source) in sources {
                        Self::add_or_merge_source(existing.sources_mut(), source_type, source);
                    }
                }
            }
        }
    }

    /// Read-only view of every group, keyed by group identifier.
    pub fn all_groups(&self) -> GroupsView<'_> {
        GroupsView {
            groups: &self.groups,
        }
    }

    /// Fresh snapshot of every property across all groups, keyed by
    /// identifier.
    ///
    /// The snapshot shares no storage with the repository. When the same
    /// identifier occurs in several groups, the winning entry is
    /// unspecified; callers must not rely on cross-group collision
    /// resolution.
    pub fn all_properties(&self) -> HashMap<String, Property> {
        let mut properties = HashMap::new();
        for group in self.groups.values() {
            for (id, property) in group.properties() {
                properties.insert(id.clone(), property.clone());
            }
        }
        properties
    }

    /// Install `source` under `source_type`, or fold its properties into
    /// the source already registered there.
    ///
    /// The first source registered under a (group, type) pair stays the
    /// canonical representative: later registrations contribute their
    /// properties first-writer-wins and lose any other metadata they
    /// carried.
    fn add_or_merge_source(
        sources: &mut HashMap<String, Source>,
        source_type: String,
        source: Source,
    ) {
        match sources.entry(source_type) {
            Entry::Vacant(slot) => {
                slot.insert(source);
            }
            Entry::Occupied(mut slot) => {
                let existing = slot.get_mut();
                for property in source.into_properties().into_values() {
                    existing.put_property(property);
                }
            }
        }
    }
}

/// Read-only view over the groups of a [`Repository`], keyed by group
/// identifier.
///
/// The view borrows the repository and exposes no mutable access; the
/// borrow checker rules out mutation at compile time. The map-shaped
/// `insert` and `remove` methods exist so that callers driving the view
/// through a generic mapping surface fail deterministically with
/// [`Error::ImmutableView`] instead of silently: they never alter the
/// repository.
#[derive(Debug, Clone, Copy)]
pub struct GroupsView<'a> {
    groups: &'a HashMap<String, Group>,
}

impl<'a> GroupsView<'a> {
    /// Look up a group by identifier.
    pub fn get(&self, group_id: &str) -> Option<&'a Group> {
        self.groups.get(group_id)
    }

    /// Whether a group with the given identifier exists.
    pub fn contains(&self, group_id: &str) -> bool {
        self.groups.contains_key(group_id)
    }

    /// Number of groups in the repository.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether the repository holds no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterate over (identifier, group) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&'a String, &'a Group)> {
        self.groups.iter()
    }

    /// Iterate over group identifiers.
    pub fn keys(&self) -> impl Iterator<Item = &'a String> {
        self.groups.keys()
    }

    /// Rejected: the view is read-only.
    pub fn insert(&mut self, _group_id: String, _group: Group) -> Result<()> {
        Err(Error::ImmutableView {
            operation: "insert".to_string(),
        })
    }

    /// Rejected: the view is read-only.
    pub fn remove(&mut self, _group_id: &str) -> Result<Group> {
        Err(Error::ImmutableView {
            operation: "remove".to_string(),
        })
    }
}
