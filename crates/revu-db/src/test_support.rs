//! Shared test utilities for revu-db unit tests.

pub(crate) mod helpers {
    use revu_core::entities::{ReviewCycle, ReviewableItem, User};
    use revu_core::enums::{ActorRole, ItemType};

    use crate::RevuDb;

    /// Create an in-memory database with migrations applied.
    pub async fn test_db() -> RevuDb {
        RevuDb::open_local(":memory:").await.unwrap()
    }

    pub async fn seed_user(db: &RevuDb, name: &str, role: ActorRole, org: Option<&str>) -> User {
        db.create_user(name, role, org).await.unwrap()
    }

    pub async fn seed_item(db: &RevuDb, item_type: ItemType, org: Option<&str>) -> ReviewableItem {
        db.create_item(item_type, org, "Test item", "usr-seed")
            .await
            .unwrap()
    }

    /// Seed an item and open its first review cycle.
    pub async fn seed_open_cycle(db: &RevuDb) -> (ReviewableItem, ReviewCycle) {
        let item = seed_item(db, ItemType::Content, Some("org-a")).await;
        let (cycle, _) = db
            .upsert_open_cycle(&item.id, "usr-seed", "Seed", 3)
            .await
            .unwrap();
        (item, cycle)
    }
}
