//! Repository modules implementing row-level operations for revu entities.
//!
//! Each module adds methods to `RevuDb` via `impl RevuDb` blocks.

pub mod assignments;
pub mod audit;
pub mod comments;
pub mod cycles;
pub mod items;
pub mod reviewers;
pub mod users;
