//! # Configuration Metadata Library
//!
//! This library provides an in-memory catalog that aggregates descriptions
//! of configuration properties produced by multiple independent
//! contributors (jars, modules, or other metadata files) into a single
//! queryable, mergeable structure. It is the substrate documentation
//! generators, IDE completion back-ends and validation tooling operate on:
//! they ask which properties exist, which group a property belongs to, what
//! a property's type and default are, and merge additional metadata
//! discovered at runtime.
//!
//! ## Quick Example
//!
//! ```
//! use config_metadata::metadata::{Property, Source};
//! use config_metadata::repository::Repository;
//!
//! let mut repository = Repository::new();
//!
//! // Register the binding target of the `server` group.
//! let server = Source::new("server", "com.example.ServerProperties");
//! repository.add_sources([server.clone()]).unwrap();
//!
//! // Attach a property to that source.
//! let mut port = Property::new("server.port");
//! port.data_type = Some("integer".to_string());
//! repository.add_property(port, Some(&server)).unwrap();
//!
//! assert!(repository.all_properties().contains_key("server.port"));
//! assert_eq!(repository.all_groups().len(), 1);
//! ```
//!
//! ## Core Concepts
//!
//! The library is built around a few key concepts:
//!
//! - **Metadata entities (`metadata`)**: the passive value objects —
//!   `Property` (a leaf configuration key with type, default, description
//!   and deprecation), `Source` (a named origin of properties, typically
//!   the binding target type within a group) and `Group` (a namespace
//!   bucket owning a property view and a source view).
//! - **Repository (`repository`)**: the top-level container of groups and
//!   the merge algebra (`add_sources`, `add_property`, `include`) that
//!   combines contributions.
//! - **Merge primitive (`merge`)**: the single first-writer-wins insert
//!   everything above is built on.
//! - **Errors (`error`)**: the few precondition and contract violations the
//!   algebra can surface.
//!
//! ## Merge Semantics
//!
//! The repository is monotonic: groups, sources and properties are created
//! on first mention and never removed. Wherever two contributions collide
//! under the same key, the earliest one wins and keeps its form; later
//! contributions only add detail (a re-registered source contributes its
//! properties but the established source keeps its identity). The
//! repository is defined for single-threaded mutation; wrap it in a lock if
//! it must be shared.

pub mod error;
pub mod merge;
pub mod metadata;
pub mod repository;

#[cfg(test)]
mod repository_proptest;
