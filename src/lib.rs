//! Derive version strings from the state of a git repository.
//!
//! A [selector::DescriptorSelector] picks the tag, branch or commit
//! descriptor that applies to a [domain::RepositorySituation], and a
//! [composer::VersionComposer] renders the descriptor's format string
//! (see [template]) into a version and rewrites matching properties.

pub mod composer;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod selector;
pub mod template;
pub mod ui;

pub use composer::{ComposedVersion, VersionComposer};
pub use error::{GitVersionError, Result};
pub use selector::{DescriptorSelector, RefSelection, RefType};
