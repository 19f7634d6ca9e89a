//! # Metadata Value Objects
//!
//! This module defines the passive entities the repository aggregates:
//! properties, their deprecation descriptors, sources and groups. They are
//! the shapes a metadata loader produces when parsing serialized metadata
//! documents, which is why the loader-facing types derive the serde traits.
//!
//! ## Key Components
//!
//! - **`Property`**: a leaf record describing one configurable key.
//! - **`Deprecation`** / **`DeprecationLevel`**: the optional deprecation
//!   descriptor attached to a property.
//! - **`Source`**: a named origin of properties, typically the binding
//!   target type within a group.
//! - **`Group`**: a namespace bucket owning both a property view and a
//!   source view.
//!
//! All of these are value objects: beyond construction they expose
//! accessors plus, for `Source`, the first-writer-wins property mapping.
//! The merge algebra itself lives in [`crate::repository`].

use crate::merge::put_if_absent;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Severity of a property deprecation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeprecationLevel {
    /// The property is still bound but its use is discouraged.
    #[default]
    Warning,
    /// The property is no longer bound.
    Error,
}

/// Deprecation descriptor attached to a property.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Deprecation {
    /// Severity of the deprecation.
    #[serde(default)]
    pub level: DeprecationLevel,
    /// Why the property was deprecated.
    #[serde(default)]
    pub reason: Option<String>,
    /// The property to use instead, if any.
    #[serde(default)]
    pub replacement: Option<String>,
    /// The version in which the property was deprecated.
    #[serde(default)]
    pub since: Option<String>,
}

/// A leaf record describing one configurable key.
///
/// Properties are immutable once constructed: the merge algebra never
/// replaces a property stored under a key, it only discards later
/// duplicates. The identifier is the merge key; equality compares the full
/// record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Fully-qualified dotted identifier (e.g. `server.port`), unique
    /// within its owning source and within its owning group.
    pub id: String,
    /// Declared semantic type. Opaque to the repository.
    #[serde(rename = "type", default)]
    pub data_type: Option<String>,
    /// Default value, if the property has one.
    #[serde(default)]
    pub default_value: Option<serde_json::Value>,
    /// Human-readable description.
    #[serde(default)]
    pub description: Option<String>,
    /// Deprecation descriptor, present when the property is deprecated.
    #[serde(default)]
    pub deprecation: Option<Deprecation>,
}

impl Property {
    /// Create a property with the given identifier and no further metadata.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Whether the property carries a deprecation descriptor.
    pub fn is_deprecated(&self) -> bool {
        self.deprecation.is_some()
    }
}

/// A named origin of properties inside a group, typically the descriptor of
/// the binding target type.
///
/// Two sources are "the same source" iff their (group identifier, type
/// identifier) pair matches; that pair is the merge key the repository uses
/// when sources are registered more than once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    /// Identifier of the group this source contributes to.
    pub group_id: String,
    /// Type identifier, unique within the group.
    ///
    /// Sources without a type still create their group but contribute no
    /// source-keyed bucket; their properties must be registered
    /// individually.
    #[serde(rename = "type", default)]
    pub source_type: Option<String>,
    /// Human-readable description of the source.
    #[serde(default)]
    pub description: Option<String>,
    /// Properties contributed by this source, keyed by identifier.
    #[serde(default)]
    properties: HashMap<String, Property>,
}

impl Source {
    /// Create a typed source for the given group.
    pub fn new(group_id: impl Into<String>, source_type: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            source_type: Some(source_type.into()),
            description: None,
            properties: HashMap::new(),
        }
    }

    /// Create a source with no binding target type.
    pub fn untyped(group_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            source_type: None,
            description: None,
            properties: HashMap::new(),
        }
    }

    /// Properties contributed by this source, keyed by identifier.
    pub fn properties(&self) -> &HashMap<String, Property> {
        &self.properties
    }

    /// Look up a contributed property by its identifier.
    pub fn property(&self, id: &str) -> Option<&Property> {
        self.properties.get(id)
    }

    /// Record a property on this source.
    ///
    /// First-writer-wins: if a property with the same identifier is already
    /// recorded, the earlier entry is retained and `false` is returned.
    pub fn put_property(&mut self, property: Property) -> bool {
        put_if_absent(&mut self.properties, property.id.clone(), property)
    }

    /// Consume the source, yielding its property mapping.
    pub(crate) fn into_properties(self) -> HashMap<String, Property> {
        self.properties
    }
}

/// A namespace bucket owning a property view and a source view.
///
/// Groups are passive. They are created and populated exclusively by the
/// repository's merge operations and expose read access only; the property
/// view of a group is the union of what was registered against it, with the
/// earliest entry winning per identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    id: String,
    sources: HashMap<String, Source>,
    properties: HashMap<String, Property>,
}

impl Group {
    pub(crate) fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sources: HashMap::new(),
            properties: HashMap::new(),
        }
    }

    /// Group identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Sources registered in this group, keyed by type identifier.
    pub fn sources(&self) -> &HashMap<String, Source> {
        &self.sources
    }

    /// Union view of the properties in this group, keyed by identifier.
    pub fn properties(&self) -> &HashMap<String, Property> {
        &self.properties
    }

    /// Look up a source by its type identifier.
    pub fn source(&self, source_type: &str) -> Option<&Source> {
        self.sources.get(source_type)
    }

    /// Look up a property by its identifier.
    pub fn property(&self, id: &str) -> Option<&Property> {
        self.properties.get(id)
    }

    /// Record a property in the group view, first-writer-wins.
    pub(crate) fn put_property(&mut self, property: Property) -> bool {
        put_if_absent(&mut self.properties, property.id.clone(), property)
    }

    pub(crate) fn sources_mut(&mut self) -> &mut HashMap<String, Source> {
        &mut self.sources
    }

    /// Consume the group, yielding its source and property mappings.
    pub(crate) fn into_parts(self) -> (HashMap<String, Source>, HashMap<String, Property>) {
        (self.sources, self.properties)
    }
}
