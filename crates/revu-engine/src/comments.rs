//! Comment thread: typed, immutable annotations on an item.
//!
//! Rejection comments are the only ones with resolution state; while any is
//! open the item cannot be resubmitted.

use std::sync::LazyLock;

use regex::Regex;

use revu_core::entities::Comment;
use revu_core::enums::{CommentType, ReviewAction};
use revu_core::identity::ActorContext;
use revu_db::helpers;
use revu_db::repos::comments::NewComment;

use crate::error::or_not_found;
use crate::{ReviewService, WorkflowError};

static MENTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@(\w+)").expect("mention pattern is valid"));

/// `@name` tokens in order of appearance. Not resolved to users.
#[must_use]
pub fn parse_mentions(text: &str) -> Vec<String> {
    MENTION_REGEX
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Caller-supplied parts of a new comment. The author comes from the actor.
#[derive(Debug, Clone, Default)]
pub struct CommentDraft {
    pub text: String,
    /// Defaults to [`CommentType::General`].
    pub comment_type: Option<CommentType>,
    pub action_type: Option<ReviewAction>,
    pub related_status_change: Option<String>,
    pub parent_comment_id: Option<String>,
}

impl CommentDraft {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_type(mut self, comment_type: CommentType) -> Self {
        self.comment_type = Some(comment_type);
        self
    }
}

impl ReviewService {
    /// Record a comment. Returns only once the row is committed.
    ///
    /// # Errors
    ///
    /// `Validation` for blank text or a parent on another item, `NotFound`
    /// for an unknown item or parent.
    #[tracing::instrument(skip(self, draft), fields(comment_type = tracing::field::Empty))]
    pub async fn submit_comment(
        &self,
        actor: &ActorContext,
        item_id: &str,
        draft: CommentDraft,
    ) -> Result<Comment, WorkflowError> {
        let text = draft.text.trim();
        if text.is_empty() {
            return Err(WorkflowError::Validation("comment text is empty".into()));
        }
        self.db
            .get_item(item_id)
            .await
            .map_err(or_not_found("item", item_id))?;

        if let Some(parent_id) = draft.parent_comment_id.as_deref() {
            let parent = self
                .db
                .get_comment(parent_id)
                .await
                .map_err(or_not_found("comment", parent_id))?;
            if parent.item_id != item_id {
                return Err(WorkflowError::Validation(format!(
                    "parent comment {parent_id} belongs to another item"
                )));
            }
        }

        let comment_type = draft.comment_type.unwrap_or(CommentType::General);
        tracing::Span::current().record("comment_type", comment_type.as_str());
        let mentions = parse_mentions(text);
        let comment = self
            .db
            .insert_comment(NewComment {
                item_id,
                author_id: &actor.user_id,
                author_name: &actor.name,
                author_role: actor.role,
                text,
                comment_type,
                action_type: draft.action_type,
                related_status_change: draft.related_status_change.as_deref(),
                mentions: &mentions,
                parent_comment_id: draft.parent_comment_id.as_deref(),
            })
            .await?;
        tracing::info!(comment_id = %comment.id, "comment recorded");
        Ok(comment)
    }

    /// Resolve a rejection comment. Resolving an already-resolved comment is
    /// a successful no-op.
    ///
    /// # Errors
    ///
    /// `CommentNotResolvable` for any other comment type.
    #[tracing::instrument(skip(self))]
    pub async fn resolve_comment(
        &self,
        actor: &ActorContext,
        comment_id: &str,
    ) -> Result<bool, WorkflowError> {
        let comment = self
            .db
            .get_comment(comment_id)
            .await
            .map_err(or_not_found("comment", comment_id))?;
        if !comment.comment_type.is_resolvable() {
            return Err(WorkflowError::CommentNotResolvable(comment_id.to_string()));
        }
        if comment.is_resolved {
            return Ok(true);
        }
        if self
            .db
            .resolve_comment(comment_id, &actor.user_id, helpers::now())
            .await?
        {
            tracing::info!("rejection comment resolved");
        }
        // Losing to a concurrent resolver still leaves the comment resolved.
        Ok(true)
    }

    pub async fn has_unresolved_rejections(&self, item_id: &str) -> Result<bool, WorkflowError> {
        Ok(self.db.has_unresolved_rejections(item_id).await?)
    }

    pub async fn list_unresolved_rejections(
        &self,
        item_id: &str,
    ) -> Result<Vec<Comment>, WorkflowError> {
        Ok(self.db.list_unresolved_rejections(item_id).await?)
    }

    /// All comments on an item, oldest first.
    pub async fn list_comments(&self, item_id: &str) -> Result<Vec<Comment>, WorkflowError> {
        Ok(self.db.list_comments(item_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{actor, seed_item, test_service};
    use pretty_assertions::assert_eq;
    use revu_core::enums::{ActorRole, ItemType};

    #[test]
    fn mentions_are_word_tokens_in_order() {
        assert_eq!(
            parse_mentions("ping @sam and @ops_team, cc @sam. mail a@b"),
            vec!["sam", "ops_team", "sam", "b"]
        );
        assert!(parse_mentions("no mentions @ here").is_empty());
    }

    #[tokio::test]
    async fn submitted_comment_lists_back_identically() {
        let svc = test_service().await;
        let item = seed_item(&svc, ItemType::Content, Some("org-a")).await;
        let rita = actor(ActorRole::Reviewer, None);

        let created = svc
            .submit_comment(
                &rita,
                &item.id,
                CommentDraft {
                    action_type: Some(ReviewAction::SendBack),
                    ..CommentDraft::new("Fix the title @sam").with_type(CommentType::Revision)
                },
            )
            .await
            .unwrap();

        let listed = svc.list_comments(&item.id).await.unwrap();
        assert_eq!(listed, vec![created.clone()]);
        assert_eq!(listed[0].text, "Fix the title @sam");
        assert_eq!(listed[0].mentions, vec!["sam"]);
        assert_eq!(listed[0].comment_type, CommentType::Revision);
        assert_eq!(listed[0].author_role, ActorRole::Reviewer);
    }

    #[tokio::test]
    async fn default_type_is_general() {
        let svc = test_service().await;
        let item = seed_item(&svc, ItemType::Service, None).await;
        let c = svc
            .submit_comment(&actor(ActorRole::Admin, None), &item.id, CommentDraft::new("hello"))
            .await
            .unwrap();
        assert_eq!(c.comment_type, CommentType::General);
    }

    #[tokio::test]
    async fn blank_text_and_unknown_item_are_rejected() {
        let svc = test_service().await;
        let admin = actor(ActorRole::Admin, None);
        let item = seed_item(&svc, ItemType::Content, None).await;

        let blank = svc
            .submit_comment(&admin, &item.id, CommentDraft::new("   "))
            .await;
        assert!(matches!(blank, Err(WorkflowError::Validation(_))));

        let missing = svc
            .submit_comment(&admin, "itm-missing", CommentDraft::new("hi"))
            .await;
        assert!(matches!(missing, Err(WorkflowError::NotFound { entity: "item", .. })));
    }

    #[tokio::test]
    async fn parent_must_be_on_same_item() {
        let svc = test_service().await;
        let admin = actor(ActorRole::Admin, None);
        let a = seed_item(&svc, ItemType::Content, None).await;
        let b = seed_item(&svc, ItemType::Content, None).await;
        let root = svc
            .submit_comment(&admin, &a.id, CommentDraft::new("root"))
            .await
            .unwrap();

        let reply = svc
            .submit_comment(
                &admin,
                &a.id,
                CommentDraft {
                    parent_comment_id: Some(root.id.clone()),
                    ..CommentDraft::new("reply")
                },
            )
            .await
            .unwrap();
        assert_eq!(reply.parent_comment_id.as_deref(), Some(root.id.as_str()));

        let cross = svc
            .submit_comment(
                &admin,
                &b.id,
                CommentDraft {
                    parent_comment_id: Some(root.id),
                    ..CommentDraft::new("elsewhere")
                },
            )
            .await;
        assert!(matches!(cross, Err(WorkflowError::Validation(_))));
    }

    #[tokio::test]
    async fn resolve_is_idempotent() {
        let svc = test_service().await;
        let item = seed_item(&svc, ItemType::Content, None).await;
        let rita = actor(ActorRole::Reviewer, None);
        let sam = actor(ActorRole::Submitter, None);
        let rejection = svc
            .submit_comment(
                &rita,
                &item.id,
                CommentDraft::new("licence missing").with_type(CommentType::Rejection),
            )
            .await
            .unwrap();
        assert!(svc.has_unresolved_rejections(&item.id).await.unwrap());

        assert!(svc.resolve_comment(&sam, &rejection.id).await.unwrap());
        let first = svc.db().get_comment(&rejection.id).await.unwrap();
        assert!(svc.resolve_comment(&sam, &rejection.id).await.unwrap());
        let second = svc.db().get_comment(&rejection.id).await.unwrap();

        assert_eq!(first, second);
        assert!(second.is_resolved);
        assert_eq!(second.resolved_by.as_deref(), Some(sam.user_id.as_str()));
        assert!(!svc.has_unresolved_rejections(&item.id).await.unwrap());
    }

    #[tokio::test]
    async fn non_rejection_comments_are_not_resolvable() {
        let svc = test_service().await;
        let item = seed_item(&svc, ItemType::Content, None).await;
        let admin = actor(ActorRole::Admin, None);
        let note = svc
            .submit_comment(&admin, &item.id, CommentDraft::new("fyi"))
            .await
            .unwrap();

        let result = svc.resolve_comment(&admin, &note.id).await;
        assert!(matches!(result, Err(WorkflowError::CommentNotResolvable(_))));
    }
}
