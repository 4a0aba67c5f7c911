//! # revu-core
//!
//! Core types shared across the revu review workflow crates.
//!
//! This crate provides:
//! - Entity structs for reviewable items, review cycles, assignments,
//!   comments, and audit entries
//! - Canonical status enums with transition tables
//! - Per-item-type status vocabulary mapping (native strings ↔ canonical)
//! - Explicit actor context passed into every core call
//! - ID prefix constants
//! - Typed audit metadata payloads
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod ids;
pub mod metadata;
pub mod vocab;
