use std::path::Path;

use anyhow::Context;
use revu_config::RevuConfig;
use revu_core::identity::ActorContext;
use revu_engine::ReviewService;
use revu_engine::notify::TracingNotifier;
use revu_engine::orchestrator::ReviewOrchestrator;

use crate::cli::GlobalFlags;
use crate::policy::RolePolicy;

pub type Orchestrator = ReviewOrchestrator<RolePolicy, TracingNotifier>;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub orchestrator: Orchestrator,
    pub config: RevuConfig,
    /// The user named by `--as`, if any.
    pub actor: Option<ActorContext>,
}

impl AppContext {
    /// Open the configured database and resolve the acting user.
    pub async fn init(config: RevuConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let path = &config.database.path;
        if !config.database.is_in_memory() {
            if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }

        let service = ReviewService::open_local(path, config.review.clone())
            .await
            .with_context(|| format!("failed to open review database at {path}"))?;
        tracing::debug!(%path, "review database opened");

        let actor = match flags.actor.as_deref() {
            Some(id) => {
                let user = service
                    .db()
                    .get_user(id)
                    .await
                    .with_context(|| format!("unknown --as user '{id}'"))?;
                if !user.is_active {
                    anyhow::bail!("--as user '{id}' is deactivated");
                }
                Some(user.actor())
            }
            None => None,
        };

        Ok(Self {
            orchestrator: ReviewOrchestrator::new(service, RolePolicy, TracingNotifier),
            config,
            actor,
        })
    }

    /// The acting user, required by mutating commands.
    pub fn require_actor(&self) -> anyhow::Result<&ActorContext> {
        self.actor
            .as_ref()
            .context("this command needs an acting user: pass --as <user-id>")
    }

    pub const fn service(&self) -> &ReviewService {
        self.orchestrator.service()
    }

    /// Effective list limit: `--limit`, else `general.default_limit`.
    pub fn limit(&self, flags: &GlobalFlags) -> u32 {
        flags.limit.unwrap_or(self.config.general.default_limit)
    }
}
