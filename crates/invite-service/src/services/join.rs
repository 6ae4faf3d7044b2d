//! Join recording and joins-per-day statistics

use chrono::{DateTime, Utc};
use invite_core::{DailyJoinCount, DomainError, MemberJoin, Snowflake};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use super::context::ServiceContext;
use super::deadline;
use super::error::{ServiceError, ServiceResult};
use super::promotion::{PromotionOutcome, PromotionService};

/// A recorded join and, when it came through a code, the inviter's promotion
///
/// Once the join is stored the call succeeds. A failed inviter promotion is
/// reported in `promotion_error` and can be retried with a plain promote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinOutcome {
    pub member_id: Snowflake,
    pub inviter_id: Option<Snowflake>,
    pub invite_code: Option<String>,
    pub joined_at: DateTime<Utc>,
    pub inviter_promotion: Option<PromotionOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotion_error: Option<String>,
}

pub struct JoinService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> JoinService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Record a member joining, crediting the inviter when a code was used
    #[instrument(skip(self))]
    pub async fn record_join(
        &self,
        guild_id: Snowflake,
        member_id: Snowflake,
        invite_code: Option<&str>,
    ) -> ServiceResult<JoinOutcome> {
        let limit = self.ctx.store_timeout();

        let Some(code) = invite_code else {
            let join = MemberJoin::new(guild_id, member_id);
            deadline::store(limit, "create_join", self.ctx.join_repo().create(&join)).await?;
            debug!(guild_id = %guild_id, member_id = %member_id, "Join recorded without invite");
            return Ok(JoinOutcome {
                member_id,
                inviter_id: None,
                invite_code: None,
                joined_at: join.created_at,
                inviter_promotion: None,
                promotion_error: None,
            });
        };

        let invite = deadline::store(
            limit,
            "find_invite",
            self.ctx.invite_code_repo().find_by_code(code),
        )
        .await?
        .filter(|invite| invite.belongs_to(guild_id))
        .ok_or_else(|| DomainError::InviteCodeNotFound(code.to_string()))?;

        deadline::store(
            limit,
            "increment_uses",
            self.ctx.invite_code_repo().increment_uses(&invite.code),
        )
        .await?;

        let join = MemberJoin::new(guild_id, member_id).via(invite.code.clone(), invite.inviter_id);
        deadline::store(limit, "create_join", self.ctx.join_repo().create(&join)).await?;

        info!(
            guild_id = %guild_id,
            member_id = %member_id,
            inviter_id = %invite.inviter_id,
            code = %invite.code,
            "Join credited to inviter"
        );

        // The use is already counted; failing here would double-credit on retry
        let (inviter_promotion, promotion_error) = match PromotionService::new(self.ctx)
            .promote(guild_id, invite.inviter_id)
            .await
        {
            Ok(promotion) => (Some(promotion), None),
            Err(e) => {
                warn!(
                    guild_id = %guild_id,
                    inviter_id = %invite.inviter_id,
                    error = %e,
                    "Inviter promotion failed after join was recorded"
                );
                (None, Some(e.to_string()))
            }
        };

        Ok(JoinOutcome {
            member_id,
            inviter_id: join.inviter_id,
            invite_code: join.invite_code,
            joined_at: join.created_at,
            inviter_promotion,
            promotion_error,
        })
    }

    /// Joins per day for the most recent `days` days that have joins, oldest first
    #[instrument(skip(self))]
    pub async fn daily_joins(
        &self,
        guild_id: Snowflake,
        days: Option<u32>,
    ) -> ServiceResult<Vec<DailyJoinCount>> {
        let max_days = self.ctx.join_stats_max_days();
        let days = days.unwrap_or(max_days);
        if days == 0 || days > max_days {
            return Err(ServiceError::validation(format!(
                "days must be between 1 and {max_days}"
            )));
        }

        let mut counts = deadline::store(
            self.ctx.store_timeout(),
            "daily_counts",
            self.ctx.join_repo().daily_counts(guild_id, i64::from(days)),
        )
        .await?;
        counts.reverse();

        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::promotion::GrantStatus;
    use crate::testing::{InMemoryStore, BOT, BRONZE, GUILD};
    use invite_common::EngineConfig;
    use chrono::{Duration, NaiveDate};
    use invite_core::{InviteCode, Rank};
    use std::collections::BTreeSet;

    const INVITER: Snowflake = Snowflake::new(50);
    const NEWCOMER: Snowflake = Snowflake::new(60);

    #[tokio::test]
    async fn test_join_via_code_credits_and_promotes_inviter() {
        let store = InMemoryStore::standard_guild().await;
        store.add_rank(Rank::new(GUILD, BRONZE, 3)).await;
        store
            .add_invite(InviteCode::new("abc", GUILD, INVITER).with_uses(2))
            .await;
        let ctx = store.context();

        let outcome = JoinService::new(&ctx)
            .record_join(GUILD, NEWCOMER, Some("abc"))
            .await
            .unwrap();

        assert_eq!(outcome.inviter_id, Some(INVITER));
        assert_eq!(store.invite("abc").await.unwrap().uses, 3);

        let promotion = outcome.inviter_promotion.unwrap();
        assert_eq!(promotion.member_id, INVITER);
        assert_eq!(promotion.grant, GrantStatus::Granted(BTreeSet::from([BRONZE])));

        let joins = store.joins().await;
        assert_eq!(joins.len(), 1);
        assert_eq!(joins[0].invite_code.as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn test_failed_inviter_promotion_keeps_join_counted_once() {
        let store = InMemoryStore::standard_guild().await;
        store.add_rank(Rank::new(GUILD, BRONZE, 3)).await;
        store
            .add_invite(InviteCode::new("abc", GUILD, INVITER).with_uses(2))
            .await;
        store.fail_grants(true);
        let ctx = store.context();

        let outcome = JoinService::new(&ctx)
            .record_join(GUILD, NEWCOMER, Some("abc"))
            .await
            .unwrap();

        assert!(outcome.inviter_promotion.is_none());
        assert!(outcome.promotion_error.is_some());
        assert_eq!(store.invite("abc").await.unwrap().uses, 3);
        assert_eq!(store.joins().await.len(), 1);

        // Only the promotion is retried
        store.fail_grants(false);
        let promotion = PromotionService::new(&ctx).promote(GUILD, INVITER).await.unwrap();
        assert_eq!(promotion.grant, GrantStatus::Granted(BTreeSet::from([BRONZE])));
        assert_eq!(store.invite("abc").await.unwrap().uses, 3);
        assert_eq!(store.joins().await.len(), 1);
    }

    #[tokio::test]
    async fn test_join_without_code_has_no_inviter() {
        let store = InMemoryStore::standard_guild().await;
        let ctx = store.context();

        let outcome = JoinService::new(&ctx)
            .record_join(GUILD, NEWCOMER, None)
            .await
            .unwrap();

        assert!(outcome.inviter_id.is_none());
        assert!(outcome.inviter_promotion.is_none());
        assert_eq!(store.joins().await.len(), 1);
    }

    #[tokio::test]
    async fn test_code_from_another_guild_is_unknown() {
        let store = InMemoryStore::standard_guild().await;
        store
            .add_invite(InviteCode::new("elsewhere", Snowflake::new(999), INVITER))
            .await;
        let ctx = store.context();

        let err = JoinService::new(&ctx)
            .record_join(GUILD, NEWCOMER, Some("elsewhere"))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Domain(DomainError::InviteCodeNotFound(_))));
        assert_eq!(store.invite("elsewhere").await.unwrap().uses, 0);
        assert!(store.joins().await.is_empty());
    }

    async fn seed_days(store: &InMemoryStore, per_day: &[(NaiveDate, usize)]) {
        for (day, count) in per_day {
            for i in 0..*count {
                let mut join = MemberJoin::new(GUILD, Snowflake::new(1000 + i as i64));
                join.created_at = day.and_hms_opt(12, 0, 0).unwrap().and_utc();
                store.add_join(join).await;
            }
        }
    }

    #[tokio::test]
    async fn test_daily_joins_chronological() {
        let store = InMemoryStore::standard_guild().await;
        let first = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        seed_days(
            &store,
            &[(first + Duration::days(2), 1), (first, 3), (first + Duration::days(1), 2)],
        )
        .await;
        let ctx = store.context();

        let counts = JoinService::new(&ctx).daily_joins(GUILD, None).await.unwrap();

        let totals: Vec<(NaiveDate, i64)> = counts.iter().map(|c| (c.day, c.total)).collect();
        assert_eq!(
            totals,
            vec![
                (first, 3),
                (first + Duration::days(1), 2),
                (first + Duration::days(2), 1),
            ]
        );
    }

    #[tokio::test]
    async fn test_daily_joins_keeps_most_recent_days() {
        let store = InMemoryStore::standard_guild().await;
        let first = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let days: Vec<(NaiveDate, usize)> =
            (0..5).map(|offset| (first + Duration::days(offset), 1)).collect();
        seed_days(&store, &days).await;
        let ctx = store.context();

        let counts = JoinService::new(&ctx).daily_joins(GUILD, Some(2)).await.unwrap();

        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0].day, first + Duration::days(3));
        assert_eq!(counts[1].day, first + Duration::days(4));
    }

    #[tokio::test]
    async fn test_daily_joins_window_bounds() {
        let store = InMemoryStore::standard_guild().await;
        let ctx = store.context();
        let service = JoinService::new(&ctx);

        assert!(matches!(
            service.daily_joins(GUILD, Some(0)).await,
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            service.daily_joins(GUILD, Some(61)).await,
            Err(ServiceError::Validation(_))
        ));
        assert!(service.daily_joins(GUILD, Some(60)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_daily_joins_window_follows_config() {
        let store = InMemoryStore::standard_guild().await;
        let first = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let days: Vec<(NaiveDate, usize)> =
            (0..75).map(|offset| (first + Duration::days(offset), 1)).collect();
        seed_days(&store, &days).await;
        let engine = EngineConfig {
            join_stats_max_days: 90,
            store_timeout_ms: 200,
            role_grant_timeout_ms: 200,
        };
        let ctx = store.context_with(BOT, engine);
        let service = JoinService::new(&ctx);

        // The default window is the configured maximum
        assert_eq!(service.daily_joins(GUILD, None).await.unwrap().len(), 75);
        assert_eq!(service.daily_joins(GUILD, Some(90)).await.unwrap().len(), 75);
        assert!(matches!(
            service.daily_joins(GUILD, Some(91)).await,
            Err(ServiceError::Validation(_))
        ));
    }
}
