//! In-memory port implementations for tests
//!
//! `InMemoryStore` implements every repository trait so a `ServiceContext`
//! can run without PostgreSQL. Failure switches and a role-grant call counter
//! let tests observe outage and side-effect behavior.

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use chrono::Utc;
use invite_common::EngineConfig;
use invite_core::entities::{
    AuditEntry, CustomInvite, DailyJoinCount, Guild, InviteCode, MemberJoin, NewAuditEntry, Rank,
    Role,
};
use invite_core::traits::{
    AuditLogRepository, GuildRepository, InviteCodeRepository, InviteLedger, JoinRepository,
    MemberRepository, RankRepository, RepoResult, RoleRepository,
};
use invite_core::{DomainError, Permissions, Snowflake};

use crate::services::ServiceContext;

// Well-known ids of the standard test guild
pub const GUILD: Snowflake = Snowflake::new(100);
pub const OWNER: Snowflake = Snowflake::new(1);
pub const BOT: Snowflake = Snowflake::new(4242);
pub const BOT_ROLE: Snowflake = Snowflake::new(10);
pub const BRONZE: Snowflake = Snowflake::new(11);
pub const SILVER: Snowflake = Snowflake::new(12);
pub const GOLD: Snowflake = Snowflake::new(13);

/// In-memory storage for all ports
#[derive(Debug, Default)]
pub struct InMemoryStore {
    guilds: RwLock<HashMap<Snowflake, Guild>>,
    roles: RwLock<Vec<Role>>,
    member_roles: RwLock<HashMap<(Snowflake, Snowflake), BTreeSet<Snowflake>>>,
    invites: RwLock<HashMap<String, InviteCode>>,
    adjustments: RwLock<Vec<CustomInvite>>,
    // Vec keeps insertion order, which is the evaluator's iteration order
    ranks: RwLock<Vec<Rank>>,
    joins: RwLock<Vec<MemberJoin>>,
    audit: RwLock<Vec<AuditEntry>>,
    audit_sequence: AtomicI64,
    grant_calls: AtomicUsize,
    fail_reads: AtomicBool,
    fail_audit: AtomicBool,
    fail_grants: AtomicBool,
    read_delay_ms: AtomicU64,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Guild 100 owned by user 1, with @everyone (no MANAGE_ROLES), a bot role
    /// that has MANAGE_ROLES and held by `BOT`, and three reward roles
    /// Bronze/Silver/Gold. No ranks are configured.
    pub async fn standard_guild() -> Arc<Self> {
        let store = Self::new();
        store.add_guild(Guild::new(GUILD, "Test Guild", OWNER)).await;
        store
            .add_role(Role::everyone(GUILD, Permissions::default()))
            .await;
        store
            .add_role(
                Role::new(BOT_ROLE, GUILD, "Invite Bot")
                    .with_permissions(Permissions::MANAGE_ROLES)
                    .with_position(5),
            )
            .await;
        store.add_role(Role::new(BRONZE, GUILD, "Bronze").with_position(1)).await;
        store.add_role(Role::new(SILVER, GUILD, "Silver").with_position(2)).await;
        store.add_role(Role::new(GOLD, GUILD, "Gold").with_position(3)).await;
        store.give_roles(GUILD, BOT, &[BOT_ROLE]).await;
        store
    }

    /// `standard_guild` plus ranks Bronze 100, Silver 250, Gold 500
    pub async fn tiered_guild() -> Arc<Self> {
        let store = Self::standard_guild().await;
        store.add_rank(Rank::new(GUILD, BRONZE, 100)).await;
        store.add_rank(Rank::new(GUILD, SILVER, 250)).await;
        store.add_rank(Rank::new(GUILD, GOLD, 500)).await;
        store
    }

    /// Context wired to this store, acting as `BOT`, with short timeouts
    pub fn context(self: &Arc<Self>) -> ServiceContext {
        self.context_as(BOT)
    }

    pub fn context_as(self: &Arc<Self>, bot_user_id: Snowflake) -> ServiceContext {
        self.context_with(
            bot_user_id,
            EngineConfig {
                store_timeout_ms: 200,
                role_grant_timeout_ms: 200,
                join_stats_max_days: 60,
            },
        )
    }

    pub fn context_with(self: &Arc<Self>, bot_user_id: Snowflake, engine: EngineConfig) -> ServiceContext {
        // Every field is supplied, so build cannot fail
        ServiceContext::builder()
            .ledger(self.clone())
            .invite_code_repo(self.clone())
            .rank_repo(self.clone())
            .role_repo(self.clone())
            .guild_repo(self.clone())
            .member_repo(self.clone())
            .audit_repo(self.clone())
            .join_repo(self.clone())
            .bot_user_id(bot_user_id)
            .engine(engine)
            .build()
            .expect("complete test context")
    }

    // === Seeding ===

    pub async fn add_guild(&self, guild: Guild) {
        self.guilds.write().await.insert(guild.id, guild);
    }

    pub async fn add_role(&self, role: Role) {
        self.roles.write().await.push(role);
    }

    /// Delete a role from the directory, leaving any rank that points at it
    pub async fn delete_role(&self, role_id: Snowflake) {
        self.roles.write().await.retain(|r| r.id != role_id);
    }

    pub async fn give_roles(&self, guild_id: Snowflake, user_id: Snowflake, role_ids: &[Snowflake]) {
        self.member_roles
            .write()
            .await
            .entry((guild_id, user_id))
            .or_default()
            .extend(role_ids.iter().copied());
    }

    pub async fn add_invite(&self, invite: InviteCode) {
        self.invites.write().await.insert(invite.code.clone(), invite);
    }

    pub async fn add_adjustment(&self, adjustment: CustomInvite) {
        self.adjustments.write().await.push(adjustment);
    }

    pub async fn add_rank(&self, rank: Rank) {
        self.ranks.write().await.push(rank);
    }

    pub async fn add_join(&self, join: MemberJoin) {
        self.joins.write().await.push(join);
    }

    /// Shorthand for the three credit sources of one member
    pub async fn seed_credit(&self, member_id: Snowflake, code: i32, custom: i64, auto: i64) {
        if code != 0 {
            self.add_invite(
                InviteCode::new(format!("code-{member_id}"), GUILD, member_id).with_uses(code),
            )
            .await;
        }
        if custom != 0 {
            self.add_adjustment(CustomInvite::manual(GUILD, member_id, OWNER, custom))
                .await;
        }
        if auto != 0 {
            self.add_adjustment(CustomInvite::generated(GUILD, member_id, auto))
                .await;
        }
    }

    // === Failure switches ===

    /// Every read fails with `StoreUnavailable`
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_audit(&self, fail: bool) {
        self.fail_audit.store(fail, Ordering::SeqCst);
    }

    pub fn fail_grants(&self, fail: bool) {
        self.fail_grants.store(fail, Ordering::SeqCst);
    }

    /// Delay applied to every read before it answers
    pub fn set_read_delay(&self, delay: Duration) {
        let millis = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self.read_delay_ms.store(millis, Ordering::SeqCst);
    }

    // === Inspection ===

    /// Number of `add_roles` calls that reached the store
    pub fn grant_calls(&self) -> usize {
        self.grant_calls.load(Ordering::SeqCst)
    }

    pub async fn held_roles(&self, guild_id: Snowflake, user_id: Snowflake) -> BTreeSet<Snowflake> {
        self.member_roles
            .read()
            .await
            .get(&(guild_id, user_id))
            .cloned()
            .unwrap_or_default()
    }

    pub async fn audit_entries(&self) -> Vec<AuditEntry> {
        self.audit.read().await.clone()
    }

    pub async fn adjustments(&self) -> Vec<CustomInvite> {
        self.adjustments.read().await.clone()
    }

    pub async fn ranks(&self) -> Vec<Rank> {
        self.ranks.read().await.clone()
    }

    pub async fn joins(&self) -> Vec<MemberJoin> {
        self.joins.read().await.clone()
    }

    pub async fn invite(&self, code: &str) -> Option<InviteCode> {
        self.invites.read().await.get(code).cloned()
    }

    async fn before_read(&self) -> RepoResult<()> {
        let delay = self.read_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(DomainError::StoreUnavailable("store offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl InviteLedger for InMemoryStore {
    async fn code_uses_sum(
        &self,
        guild_id: Snowflake,
        member_id: Snowflake,
    ) -> RepoResult<Option<i64>> {
        self.before_read().await?;
        let invites = self.invites.read().await;
        let uses: Vec<i64> = invites
            .values()
            .filter(|i| i.guild_id == guild_id && i.inviter_id == member_id)
            .map(|i| i64::from(i.uses))
            .collect();
        Ok((!uses.is_empty()).then(|| uses.iter().sum()))
    }

    async fn custom_sum(
        &self,
        guild_id: Snowflake,
        member_id: Snowflake,
        generated: bool,
    ) -> RepoResult<Option<i64>> {
        self.before_read().await?;
        let adjustments = self.adjustments.read().await;
        let amounts: Vec<i64> = adjustments
            .iter()
            .filter(|a| a.guild_id == guild_id && a.member_id == member_id && a.generated == generated)
            .map(|a| a.amount)
            .collect();
        Ok((!amounts.is_empty()).then(|| amounts.iter().sum()))
    }

    async fn add_custom_invite(&self, adjustment: &CustomInvite) -> RepoResult<()> {
        self.before_read().await?;
        self.adjustments.write().await.push(adjustment.clone());
        Ok(())
    }
}

#[async_trait]
impl InviteCodeRepository for InMemoryStore {
    async fn find_by_code(&self, code: &str) -> RepoResult<Option<InviteCode>> {
        self.before_read().await?;
        Ok(self.invites.read().await.get(code).cloned())
    }

    async fn increment_uses(&self, code: &str) -> RepoResult<()> {
        self.before_read().await?;
        let mut invites = self.invites.write().await;
        let invite = invites
            .get_mut(code)
            .ok_or_else(|| DomainError::InviteCodeNotFound(code.to_string()))?;
        invite.uses += 1;
        Ok(())
    }
}

#[async_trait]
impl RankRepository for InMemoryStore {
    async fn find_by_guild(&self, guild_id: Snowflake) -> RepoResult<Vec<Rank>> {
        self.before_read().await?;
        let ranks = self.ranks.read().await;
        Ok(ranks.iter().filter(|r| r.guild_id == guild_id).copied().collect())
    }

    async fn find(&self, guild_id: Snowflake, role_id: Snowflake) -> RepoResult<Option<Rank>> {
        self.before_read().await?;
        let ranks = self.ranks.read().await;
        Ok(ranks
            .iter()
            .find(|r| r.guild_id == guild_id && r.role_id == role_id)
            .copied())
    }

    async fn upsert(&self, rank: &Rank) -> RepoResult<()> {
        self.before_read().await?;
        let mut ranks = self.ranks.write().await;
        if let Some(holder) = ranks.iter().find(|r| {
            r.guild_id == rank.guild_id
                && r.num_invites == rank.num_invites
                && r.role_id != rank.role_id
        }) {
            return Err(DomainError::DuplicateRankThreshold {
                threshold: rank.num_invites,
                role_id: holder.role_id,
            });
        }
        match ranks
            .iter_mut()
            .find(|r| r.guild_id == rank.guild_id && r.role_id == rank.role_id)
        {
            Some(existing) => existing.num_invites = rank.num_invites,
            None => ranks.push(*rank),
        }
        Ok(())
    }

    async fn delete(&self, guild_id: Snowflake, role_id: Snowflake) -> RepoResult<bool> {
        self.before_read().await?;
        let mut ranks = self.ranks.write().await;
        let before = ranks.len();
        ranks.retain(|r| !(r.guild_id == guild_id && r.role_id == role_id));
        Ok(ranks.len() != before)
    }
}

#[async_trait]
impl RoleRepository for InMemoryStore {
    async fn find_by_guild(&self, guild_id: Snowflake) -> RepoResult<Vec<Role>> {
        self.before_read().await?;
        let roles = self.roles.read().await;
        Ok(roles.iter().filter(|r| r.guild_id == guild_id).cloned().collect())
    }
}

#[async_trait]
impl GuildRepository for InMemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Guild>> {
        self.before_read().await?;
        Ok(self.guilds.read().await.get(&id).cloned())
    }
}

#[async_trait]
impl MemberRepository for InMemoryStore {
    async fn get_role_ids(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Vec<Snowflake>> {
        self.before_read().await?;
        Ok(self.held_roles(guild_id, user_id).await.into_iter().collect())
    }

    async fn add_roles(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        role_ids: &[Snowflake],
    ) -> RepoResult<()> {
        self.grant_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_grants.load(Ordering::SeqCst) {
            return Err(DomainError::RoleServiceUnavailable(
                "role directory offline".to_string(),
            ));
        }
        self.give_roles(guild_id, user_id, role_ids).await;
        Ok(())
    }
}

#[async_trait]
impl AuditLogRepository for InMemoryStore {
    async fn create(&self, entry: &NewAuditEntry) -> RepoResult<AuditEntry> {
        if self.fail_audit.load(Ordering::SeqCst) {
            return Err(DomainError::AuditWriteFailure("audit store offline".to_string()));
        }
        let stored = AuditEntry {
            id: self.audit_sequence.fetch_add(1, Ordering::SeqCst) + 1,
            action: entry.action,
            guild_id: entry.guild_id,
            member_id: entry.member_id,
            data: entry.data.clone(),
            created_at: Utc::now(),
        };
        self.audit.write().await.push(stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl JoinRepository for InMemoryStore {
    async fn create(&self, join: &MemberJoin) -> RepoResult<()> {
        self.before_read().await?;
        self.joins.write().await.push(join.clone());
        Ok(())
    }

    async fn daily_counts(
        &self,
        guild_id: Snowflake,
        limit: i64,
    ) -> RepoResult<Vec<DailyJoinCount>> {
        self.before_read().await?;
        let joins = self.joins.read().await;

        let mut per_day: BTreeMap<chrono::NaiveDate, i64> = BTreeMap::new();
        for join in joins.iter().filter(|j| j.guild_id == guild_id) {
            *per_day.entry(join.created_at.date_naive()).or_default() += 1;
        }

        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(per_day
            .into_iter()
            .rev()
            .take(limit)
            .map(|(day, total)| DailyJoinCount { day, total })
            .collect())
    }
}
