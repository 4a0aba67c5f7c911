//! ID prefix constants.
//!
//! IDs have the shape `{prefix}-{8 hex chars}`, generated by the database.

pub const PREFIX_USER: &str = "usr";
pub const PREFIX_ITEM: &str = "itm";
pub const PREFIX_CYCLE: &str = "cyc";
pub const PREFIX_ASSIGNMENT: &str = "asg";
pub const PREFIX_COMMENT: &str = "cmt";
pub const PREFIX_AUDIT: &str = "aud";

pub const ALL_PREFIXES: [&str; 6] = [
    PREFIX_USER,
    PREFIX_ITEM,
    PREFIX_CYCLE,
    PREFIX_ASSIGNMENT,
    PREFIX_COMMENT,
    PREFIX_AUDIT,
];
