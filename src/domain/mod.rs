//! Domain logic - repository facts, ref patterns and descriptors

pub mod descriptor;
pub mod pattern;
pub mod situation;
pub mod version;

pub use descriptor::{PropertyDescriptor, VersionDescriptor};
pub use pattern::{CaptureMap, PatternMatcher};
pub use situation::{RepositorySituation, NO_COMMIT};
