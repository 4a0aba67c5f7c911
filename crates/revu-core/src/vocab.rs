//! Per-item-type status vocabulary.
//!
//! Each item type persists its status in its own historical vocabulary (a
//! listing is `approved`, a business entry is `active`). The state machine only
//! ever sees the canonical [`ItemStatus`]; these tables translate in both
//! directions at the persistence edge.

use crate::enums::{ItemStatus, ItemType};
use crate::errors::CoreError;

type Table = [(ItemStatus, &'static str); 5];

const CONTENT: Table = [
    (ItemStatus::Draft, "draft"),
    (ItemStatus::PendingReview, "pending_review"),
    (ItemStatus::Published, "published"),
    (ItemStatus::Rejected, "rejected"),
    (ItemStatus::Archived, "archived"),
];

const SERVICE: Table = [
    (ItemStatus::Draft, "draft"),
    (ItemStatus::PendingReview, "pending"),
    (ItemStatus::Published, "approved"),
    (ItemStatus::Rejected, "rejected"),
    (ItemStatus::Archived, "archived"),
];

const BUSINESS: Table = [
    (ItemStatus::Draft, "draft"),
    (ItemStatus::PendingReview, "under_review"),
    (ItemStatus::Published, "active"),
    (ItemStatus::Rejected, "declined"),
    (ItemStatus::Archived, "inactive"),
];

const fn table(item_type: ItemType) -> &'static Table {
    match item_type {
        ItemType::Content => &CONTENT,
        ItemType::Service => &SERVICE,
        ItemType::Business => &BUSINESS,
    }
}

/// Native stored string for a canonical status.
#[must_use]
pub fn to_native(item_type: ItemType, status: ItemStatus) -> &'static str {
    table(item_type)
        .iter()
        .find(|(canonical, _)| *canonical == status)
        .map_or_else(|| status.as_str(), |(_, native)| *native)
}

/// Canonical status for a stored native string.
///
/// # Errors
///
/// Returns `CoreError::UnknownStatus` if `native` is not in the type's vocabulary.
pub fn to_canonical(item_type: ItemType, native: &str) -> Result<ItemStatus, CoreError> {
    table(item_type)
        .iter()
        .find(|(_, candidate)| *candidate == native)
        .map(|(canonical, _)| *canonical)
        .ok_or_else(|| CoreError::UnknownStatus {
            item_type: item_type.as_str().to_string(),
            value: native.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ItemType::Service, ItemStatus::Published, "approved")]
    #[case(ItemType::Service, ItemStatus::PendingReview, "pending")]
    #[case(ItemType::Business, ItemStatus::Published, "active")]
    #[case(ItemType::Business, ItemStatus::Rejected, "declined")]
    #[case(ItemType::Content, ItemStatus::Archived, "archived")]
    fn native_names(#[case] ty: ItemType, #[case] status: ItemStatus, #[case] native: &str) {
        assert_eq!(to_native(ty, status), native);
        assert_eq!(to_canonical(ty, native).unwrap(), status);
    }

    #[test]
    fn every_status_maps_both_ways_for_every_type() {
        for ty in ItemType::ALL {
            for status in ItemStatus::ALL {
                let native = to_native(ty, status);
                assert_eq!(to_canonical(ty, native).unwrap(), status, "{ty} {status}");
            }
        }
    }

    #[test]
    fn vocabularies_are_not_interchangeable() {
        let err = to_canonical(ItemType::Content, "approved").unwrap_err();
        assert!(matches!(err, CoreError::UnknownStatus { .. }));
        assert!(to_canonical(ItemType::Business, "published").is_err());
    }
}
