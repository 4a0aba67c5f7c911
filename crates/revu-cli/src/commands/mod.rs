pub mod assignment;
pub mod audit;
pub mod comment;
pub mod dispatch;
pub mod item;
pub mod reassign;
pub mod reviewers;
pub mod schema;
pub mod transition;
pub mod user;
