//! Entity structs for all revu domain objects.
//!
//! Each persisted entity maps to a table in the libSQL database owned by
//! `revu-db`. All structs derive `Serialize`, `Deserialize`, and `JsonSchema`
//! for JSON roundtrip and schema export.

mod assignment;
mod audit;
mod comment;
mod cycle;
mod item;
mod reviewer;
mod user;

pub use assignment::ReviewAssignment;
pub use audit::AuditEntry;
pub use comment::Comment;
pub use cycle::ReviewCycle;
pub use item::ReviewableItem;
pub use reviewer::ReviewerCandidate;
pub use user::User;
