//! Service context - dependency container for services
//!
//! Holds every port the engine talks to, the acting bot identity and the
//! engine timeouts. Cloning is cheap (all ports are `Arc`s).

use std::sync::Arc;
use std::time::Duration;

use invite_common::EngineConfig;
use invite_core::traits::{
    AuditLogRepository, GuildRepository, InviteCodeRepository, InviteLedger, JoinRepository,
    MemberRepository, RankRepository, RoleRepository,
};
use invite_core::Snowflake;

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Ports
    ledger: Arc<dyn InviteLedger>,
    invite_code_repo: Arc<dyn InviteCodeRepository>,
    rank_repo: Arc<dyn RankRepository>,
    role_repo: Arc<dyn RoleRepository>,
    guild_repo: Arc<dyn GuildRepository>,
    member_repo: Arc<dyn MemberRepository>,
    audit_repo: Arc<dyn AuditLogRepository>,
    join_repo: Arc<dyn JoinRepository>,

    // Acting agent for role grants
    bot_user_id: Snowflake,

    engine: EngineConfig,
}

impl ServiceContext {
    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Ports ===

    pub fn ledger(&self) -> &dyn InviteLedger {
        self.ledger.as_ref()
    }

    pub fn invite_code_repo(&self) -> &dyn InviteCodeRepository {
        self.invite_code_repo.as_ref()
    }

    pub fn rank_repo(&self) -> &dyn RankRepository {
        self.rank_repo.as_ref()
    }

    /// Live role directory
    pub fn role_repo(&self) -> &dyn RoleRepository {
        self.role_repo.as_ref()
    }

    pub fn guild_repo(&self) -> &dyn GuildRepository {
        self.guild_repo.as_ref()
    }

    pub fn member_repo(&self) -> &dyn MemberRepository {
        self.member_repo.as_ref()
    }

    pub fn audit_repo(&self) -> &dyn AuditLogRepository {
        self.audit_repo.as_ref()
    }

    pub fn join_repo(&self) -> &dyn JoinRepository {
        self.join_repo.as_ref()
    }

    // === Settings ===

    pub fn bot_user_id(&self) -> Snowflake {
        self.bot_user_id
    }

    pub fn store_timeout(&self) -> Duration {
        self.engine.store_timeout()
    }

    pub fn role_grant_timeout(&self) -> Duration {
        self.engine.role_grant_timeout()
    }

    pub fn join_stats_max_days(&self) -> u32 {
        self.engine.join_stats_max_days
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("bot_user_id", &self.bot_user_id)
            .field("engine", &self.engine)
            .finish()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    ledger: Option<Arc<dyn InviteLedger>>,
    invite_code_repo: Option<Arc<dyn InviteCodeRepository>>,
    rank_repo: Option<Arc<dyn RankRepository>>,
    role_repo: Option<Arc<dyn RoleRepository>>,
    guild_repo: Option<Arc<dyn GuildRepository>>,
    member_repo: Option<Arc<dyn MemberRepository>>,
    audit_repo: Option<Arc<dyn AuditLogRepository>>,
    join_repo: Option<Arc<dyn JoinRepository>>,
    bot_user_id: Option<Snowflake>,
    engine: Option<EngineConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ledger(mut self, ledger: Arc<dyn InviteLedger>) -> Self {
        self.ledger = Some(ledger);
        self
    }

    pub fn invite_code_repo(mut self, repo: Arc<dyn InviteCodeRepository>) -> Self {
        self.invite_code_repo = Some(repo);
        self
    }

    pub fn rank_repo(mut self, repo: Arc<dyn RankRepository>) -> Self {
        self.rank_repo = Some(repo);
        self
    }

    pub fn role_repo(mut self, repo: Arc<dyn RoleRepository>) -> Self {
        self.role_repo = Some(repo);
        self
    }

    pub fn guild_repo(mut self, repo: Arc<dyn GuildRepository>) -> Self {
        self.guild_repo = Some(repo);
        self
    }

    pub fn member_repo(mut self, repo: Arc<dyn MemberRepository>) -> Self {
        self.member_repo = Some(repo);
        self
    }

    pub fn audit_repo(mut self, repo: Arc<dyn AuditLogRepository>) -> Self {
        self.audit_repo = Some(repo);
        self
    }

    pub fn join_repo(mut self, repo: Arc<dyn JoinRepository>) -> Self {
        self.join_repo = Some(repo);
        self
    }

    pub fn bot_user_id(mut self, id: Snowflake) -> Self {
        self.bot_user_id = Some(id);
        self
    }

    /// Engine timeouts and limits; defaults apply when not set
    pub fn engine(mut self, engine: EngineConfig) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        Ok(ServiceContext {
            ledger: self.ledger.ok_or_else(|| ServiceError::validation("ledger is required"))?,
            invite_code_repo: self
                .invite_code_repo
                .ok_or_else(|| ServiceError::validation("invite_code_repo is required"))?,
            rank_repo: self.rank_repo.ok_or_else(|| ServiceError::validation("rank_repo is required"))?,
            role_repo: self.role_repo.ok_or_else(|| ServiceError::validation("role_repo is required"))?,
            guild_repo: self.guild_repo.ok_or_else(|| ServiceError::validation("guild_repo is required"))?,
            member_repo: self
                .member_repo
                .ok_or_else(|| ServiceError::validation("member_repo is required"))?,
            audit_repo: self.audit_repo.ok_or_else(|| ServiceError::validation("audit_repo is required"))?,
            join_repo: self.join_repo.ok_or_else(|| ServiceError::validation("join_repo is required"))?,
            bot_user_id: self
                .bot_user_id
                .ok_or_else(|| ServiceError::validation("bot_user_id is required"))?,
            engine: self.engine.unwrap_or_default(),
        })
    }
}
