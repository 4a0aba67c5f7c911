mod assignment;
mod comment;
mod item;
mod user;

pub use assignment::AssignmentCommands;
pub use comment::CommentCommands;
pub use item::ItemCommands;
pub use user::UserCommands;
