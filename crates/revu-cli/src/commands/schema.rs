use anyhow::bail;
use schemars::schema_for;

use revu_core::entities::{
    AuditEntry, Comment, ReviewAssignment, ReviewCycle, ReviewableItem, ReviewerCandidate, User,
};
use revu_core::identity::ActorContext;
use revu_core::metadata::{ReassignMetadata, TransitionMetadata};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

const ENTITIES: [&str; 10] = [
    "item",
    "cycle",
    "assignment",
    "comment",
    "audit",
    "reviewer",
    "user",
    "actor",
    "transition-metadata",
    "reassign-metadata",
];

fn schema_value(entity: &str) -> Option<schemars::Schema> {
    let schema = match entity {
        "item" => schema_for!(ReviewableItem),
        "cycle" => schema_for!(ReviewCycle),
        "assignment" => schema_for!(ReviewAssignment),
        "comment" => schema_for!(Comment),
        "audit" => schema_for!(AuditEntry),
        "reviewer" => schema_for!(ReviewerCandidate),
        "user" => schema_for!(User),
        "actor" => schema_for!(ActorContext),
        "transition-metadata" => schema_for!(TransitionMetadata),
        "reassign-metadata" => schema_for!(ReassignMetadata),
        _ => return None,
    };
    Some(schema)
}

/// Handle `revu schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let entity = args.entity.trim().to_ascii_lowercase().replace('_', "-");
    let Some(schema) = schema_value(&entity) else {
        bail!(
            "unknown schema entity '{}'; expected one of: {}",
            args.entity,
            ENTITIES.join(", ")
        );
    };
    output(&schema, flags.format)
}
