//! Shared test utilities for revu-engine unit tests.

pub(crate) mod helpers {
    use std::sync::Mutex;

    use revu_config::ReviewConfig;
    use revu_core::entities::{ReviewCycle, ReviewableItem, User};
    use revu_core::enums::{ActorRole, ItemStatus, ItemType};
    use revu_core::identity::ActorContext;
    use revu_core::vocab;

    use crate::ReviewService;
    use crate::authz::{AuthzDecision, AuthzRequest, Authorizer};
    use crate::notify::{Notifier, NotifyLevel};

    pub async fn test_service() -> ReviewService {
        test_service_with(ReviewConfig::default()).await
    }

    pub async fn test_service_with(config: ReviewConfig) -> ReviewService {
        ReviewService::open_local(":memory:", config).await.unwrap()
    }

    /// An actor that is not stored in the users table.
    pub fn actor(role: ActorRole, org: Option<&str>) -> ActorContext {
        ActorContext {
            user_id: format!("usr-{role}"),
            name: format!("Test {role}"),
            role,
            organization_id: org.map(String::from),
        }
    }

    pub async fn seed_user(
        svc: &ReviewService,
        name: &str,
        role: ActorRole,
        org: Option<&str>,
    ) -> User {
        svc.db().create_user(name, role, org).await.unwrap()
    }

    pub async fn seed_item(
        svc: &ReviewService,
        item_type: ItemType,
        org: Option<&str>,
    ) -> ReviewableItem {
        svc.db()
            .create_item(item_type, org, "Test item", "usr-seed")
            .await
            .unwrap()
    }

    pub async fn seed_open_cycle(
        svc: &ReviewService,
        org: Option<&str>,
    ) -> (ReviewableItem, ReviewCycle) {
        let item = seed_item(svc, ItemType::Content, org).await;
        let (cycle, _) = svc
            .db()
            .upsert_open_cycle(&item.id, "usr-seed", "Seed", 3)
            .await
            .unwrap();
        (item, cycle)
    }

    /// Put an item into `status` without going through the state machine.
    pub async fn force_status(svc: &ReviewService, item: &ReviewableItem, status: ItemStatus) {
        svc.db()
            .conn()
            .execute(
                "UPDATE items SET status = ?1 WHERE id = ?2",
                [vocab::to_native(item.item_type, status), item.id.as_str()],
            )
            .await
            .unwrap();
    }

    pub struct AllowAll;

    impl Authorizer for AllowAll {
        fn authorize(&self, _request: &AuthzRequest<'_>) -> AuthzDecision {
            AuthzDecision::Allow
        }
    }

    pub struct DenyAll;

    impl Authorizer for DenyAll {
        fn authorize(&self, _request: &AuthzRequest<'_>) -> AuthzDecision {
            AuthzDecision::Deny {
                reason: "not allowed in tests".into(),
            }
        }
    }

    #[derive(Default)]
    pub struct RecordingNotifier {
        pub messages: Mutex<Vec<(String, NotifyLevel)>>,
    }

    impl RecordingNotifier {
        pub fn levels(&self) -> Vec<NotifyLevel> {
            self.messages
                .lock()
                .unwrap()
                .iter()
                .map(|(_, level)| *level)
                .collect()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, message: &str, level: NotifyLevel) {
            self.messages
                .lock()
                .unwrap()
                .push((message.to_string(), level));
        }
    }
}
