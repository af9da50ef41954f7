//! Git facts abstraction layer
//!
//! This module provides a trait-based abstraction over reading the
//! repository state a version is derived from, allowing for multiple
//! implementations including real Git repositories and mock
//! implementations for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [SituationProvider] trait. The concrete
//! implementations include:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation for testing
//!
//! # Usage
//!
//! ```rust
//! # use gitver::git::SituationProvider;
//! # fn example<P: SituationProvider>(provider: &P) -> gitver::Result<()> {
//! let situation = provider.situation()?;
//! println!("HEAD is at {}", situation.head_commit());
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::RepositorySituation;
use crate::error::Result;

/// Source of repository facts
///
/// ## Error Handling
///
/// Implementations map underlying errors (like `git2::Error`) to
/// [crate::error::GitVersionError] variants. A repository without commits
/// is not an error; it yields the all-zero commit sentinel.
pub trait SituationProvider {
    /// Read the current state of HEAD
    ///
    /// # Returns
    /// * `Ok(RepositorySituation)` - Commit, branch, tags at HEAD and clean flag
    /// * `Err` - If the repository cannot be read
    fn situation(&self) -> Result<RepositorySituation>;
}
