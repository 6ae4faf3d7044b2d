//! End-to-end scenarios through the HTTP surface
//!
//! Run with: cargo test -p integration-tests --test api_tests

use std::time::Duration;

use axum::http::StatusCode;
use integration_tests::*;
use invite_core::{AuditAction, InviteCode, Rank, Snowflake};
use invite_service::testing::InMemoryStore;

const MEMBER: Snowflake = Snowflake::new(77);

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::standard().await;
    let response = app.get("/health").await.unwrap();
    assert_status(&response, StatusCode::OK);
    assert_eq!(response.body["status"], "healthy");
}

// ============================================================================
// Invite Total Tests
// ============================================================================

#[tokio::test]
async fn test_invite_total_breakdown() {
    let app = TestApp::standard().await;
    app.store.seed_credit(MEMBER, 80, 20, 3).await;

    let response = app.get(&invites_uri(MEMBER)).await.unwrap();
    assert_status(&response, StatusCode::OK);

    let data = response.data();
    assert_eq!(data["member_id"], "77");
    assert_eq!(data["code"], 80);
    assert_eq!(data["custom"], 20);
    assert_eq!(data["auto"], 3);
    assert_eq!(data["total"], 103);
}

#[tokio::test]
async fn test_negative_adjustments_clamp_at_zero() {
    let app = TestApp::standard().await;
    app.store.seed_credit(MEMBER, 10, -40, 0).await;

    let response = app.get(&invites_uri(MEMBER)).await.unwrap();
    assert_eq!(response.data()["custom"], 0);
    assert_eq!(response.data()["total"], 10);
}

// ============================================================================
// Promotion Tests
// ============================================================================

#[tokio::test]
async fn test_promote_grants_first_rank() {
    let app = TestApp::tiered().await;
    app.store.seed_credit(MEMBER, 80, 20, 0).await;

    let response = app.post_empty(&promote_uri(MEMBER)).await.unwrap();
    assert_status(&response, StatusCode::OK);

    let data = response.data();
    assert_eq!(id_list(&data["granted_role_ids"]), vec![BRONZE.to_string()]);
    assert_eq!(data["next_rank"]["name"], "Silver");
    assert_eq!(data["next_rank"]["num_invites"], 250);
    assert_eq!(data["next_rank"]["remaining"], 150);
    assert_eq!(data["rank_count"], 3);

    let held = app.store.held_roles(GUILD, MEMBER).await;
    assert!(held.contains(&BRONZE));
}

#[tokio::test]
async fn test_promote_top_rank_has_no_next() {
    let app = TestApp::tiered().await;
    app.store.seed_credit(MEMBER, 500, 0, 0).await;
    app.store.give_roles(GUILD, MEMBER, &[BRONZE, SILVER]).await;

    let response = app.post_empty(&promote_uri(MEMBER)).await.unwrap();
    let data = response.data();

    assert_eq!(id_list(&data["granted_role_ids"]), vec![GOLD.to_string()]);
    assert!(data["next_rank"].is_null());
}

#[tokio::test]
async fn test_promote_without_ranks_is_a_no_op() {
    let app = TestApp::standard().await;
    app.store.seed_credit(MEMBER, 1000, 0, 0).await;

    let response = app.post_empty(&promote_uri(MEMBER)).await.unwrap();
    assert_status(&response, StatusCode::OK);
    assert!(id_list(&response.data()["granted_role_ids"]).is_empty());
    assert_eq!(response.data()["rank_count"], 0);
    assert_eq!(app.store.grant_calls(), 0);
}

#[tokio::test]
async fn test_promote_repeated_is_idempotent() {
    let app = TestApp::tiered().await;
    app.store.seed_credit(MEMBER, 300, 0, 0).await;

    app.post_empty(&promote_uri(MEMBER)).await.unwrap();
    let second = app.post_empty(&promote_uri(MEMBER)).await.unwrap();

    assert!(id_list(&second.data()["granted_role_ids"]).is_empty());
    assert_eq!(app.store.grant_calls(), 1);
}

#[tokio::test]
async fn test_promote_reports_withheld_roles() {
    let store = InMemoryStore::tiered_guild().await;
    store.seed_credit(MEMBER, 120, 0, 0).await;
    // Account without any role, so without MANAGE_ROLES
    let app = TestApp::acting_as(store, Snowflake::new(555));

    let response = app.post_empty(&promote_uri(MEMBER)).await.unwrap();
    assert_status(&response, StatusCode::OK);
    assert_eq!(id_list(&response.data()["withheld_role_ids"]), vec![BRONZE.to_string()]);
    assert_eq!(app.store.grant_calls(), 0);
}

#[tokio::test]
async fn test_store_timeout_is_service_unavailable() {
    let app = TestApp::tiered().await;
    app.store.seed_credit(MEMBER, 120, 0, 0).await;
    app.store.set_read_delay(Duration::from_millis(500));

    let response = app.post_empty(&promote_uri(MEMBER)).await.unwrap();
    assert_status(&response, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.error_code(), Some("STORE_UNAVAILABLE"));
    assert_eq!(app.store.grant_calls(), 0);
}

#[tokio::test]
async fn test_audit_failure_is_reported_not_fatal() {
    let app = TestApp::tiered().await;
    app.store.seed_credit(MEMBER, 120, 0, 0).await;
    app.store.fail_audit(true);

    let response = app.post_empty(&promote_uri(MEMBER)).await.unwrap();
    assert_status(&response, StatusCode::OK);
    assert!(response.data()["audit_failure"].is_string());
    assert!(app.store.held_roles(GUILD, MEMBER).await.contains(&BRONZE));
}

// ============================================================================
// Credit Adjustment Tests
// ============================================================================

#[tokio::test]
async fn test_add_invites_promotes() {
    let app = TestApp::tiered().await;
    app.store.seed_credit(MEMBER, 90, 0, 0).await;

    let response = app
        .post(&invites_uri(MEMBER), &AdjustInvites::manual(10))
        .await
        .unwrap();
    assert_status(&response, StatusCode::OK);
    assert_eq!(response.data()["invites"]["total"], 100);
    assert_eq!(id_list(&response.data()["granted_role_ids"]), vec![BRONZE.to_string()]);

    let actions: Vec<AuditAction> = app
        .store
        .audit_entries()
        .await
        .into_iter()
        .map(|e| e.action)
        .collect();
    assert_eq!(actions, vec![AuditAction::AddInvites, AuditAction::Promote]);
}

#[tokio::test]
async fn test_zero_adjustment_rejected() {
    let app = TestApp::standard().await;

    let response = app
        .post(&invites_uri(MEMBER), &AdjustInvites::manual(0))
        .await
        .unwrap();
    assert_status(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_clear_invites_keeps_code_credit() {
    let app = TestApp::tiered().await;
    app.store.seed_credit(MEMBER, 30, 200, 15).await;

    let response = app.delete(&invites_uri(MEMBER), &Actor::owner()).await.unwrap();
    assert_status(&response, StatusCode::OK);
    assert_eq!(response.data()["before"]["total"], 245);
    assert_eq!(response.data()["after"]["total"], 30);

    let total = app.get(&invites_uri(MEMBER)).await.unwrap();
    assert_eq!(total.data()["total"], 30);
}

// ============================================================================
// Rank Configuration Tests
// ============================================================================

#[tokio::test]
async fn test_rank_lifecycle() {
    let app = TestApp::standard().await;

    let set = app.put(&rank_uri(SILVER), &SetRank::new(250)).await.unwrap();
    assert_status(&set, StatusCode::OK);
    app.put(&rank_uri(BRONZE), &SetRank::new(100)).await.unwrap();

    let list = app.get(&ranks_uri()).await.unwrap();
    let thresholds: Vec<i64> = list
        .data()
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["num_invites"].as_i64().unwrap())
        .collect();
    assert_eq!(thresholds, vec![100, 250]);
    assert_eq!(list.data()[0]["role_name"], "Bronze");

    let removed = app.delete(&rank_uri(BRONZE), &Actor::owner()).await.unwrap();
    assert_status(&removed, StatusCode::OK);

    let missing = app.delete(&rank_uri(BRONZE), &Actor::owner()).await.unwrap();
    assert_status(&missing, StatusCode::NOT_FOUND);
    assert_eq!(missing.error_code(), Some("UNKNOWN_RANK"));
}

#[tokio::test]
async fn test_duplicate_threshold_conflicts() {
    let app = TestApp::tiered().await;

    let response = app.put(&rank_uri(GOLD), &SetRank::new(100)).await.unwrap();
    assert_status(&response, StatusCode::CONFLICT);
    assert_eq!(response.error_code(), Some("DUPLICATE_RANK_THRESHOLD"));
}

#[tokio::test]
async fn test_negative_threshold_rejected() {
    let app = TestApp::standard().await;

    let response = app.put(&rank_uri(GOLD), &SetRank::new(-5)).await.unwrap();
    assert_status(&response, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("VALIDATION_ERROR"));
}

#[tokio::test]
async fn test_deleted_role_rank_is_stale() {
    let app = TestApp::tiered().await;
    app.store.delete_role(SILVER).await;
    app.store.seed_credit(MEMBER, 300, 0, 0).await;

    let list = app.get(&ranks_uri()).await.unwrap();
    assert_eq!(list.data()[1]["stale"], true);

    let promoted = app.post_empty(&promote_uri(MEMBER)).await.unwrap();
    assert_eq!(id_list(&promoted.data()["granted_role_ids"]), vec![BRONZE.to_string()]);
    assert_eq!(
        id_list(&promoted.data()["stale_rank_role_ids"]),
        vec![SILVER.to_string()]
    );
}

// ============================================================================
// Join Tests
// ============================================================================

#[tokio::test]
async fn test_join_through_code_promotes_inviter() {
    let app = TestApp::tiered().await;
    let inviter = Snowflake::new(50);
    app.store
        .add_invite(InviteCode::new("welcome", GUILD, inviter).with_uses(99))
        .await;

    let response = app
        .post(
            &joins_uri(),
            &RecordJoin {
                member_id: "60".to_string(),
                invite_code: Some("welcome".to_string()),
            },
        )
        .await
        .unwrap();
    assert_status(&response, StatusCode::CREATED);

    let data = response.data();
    assert_eq!(data["inviter_id"], "50");
    assert_eq!(data["inviter_promotion"]["invites"]["total"], 100);
    assert_eq!(
        id_list(&data["inviter_promotion"]["granted_role_ids"]),
        vec![BRONZE.to_string()]
    );
    assert_eq!(app.store.invite("welcome").await.unwrap().uses, 100);
}

#[tokio::test]
async fn test_join_is_kept_when_inviter_grant_fails() {
    let app = TestApp::tiered().await;
    let inviter = Snowflake::new(50);
    app.store
        .add_invite(InviteCode::new("welcome", GUILD, inviter).with_uses(99))
        .await;
    app.store.fail_grants(true);

    let response = app
        .post(
            &joins_uri(),
            &RecordJoin {
                member_id: "60".to_string(),
                invite_code: Some("welcome".to_string()),
            },
        )
        .await
        .unwrap();
    assert_status(&response, StatusCode::CREATED);
    assert!(response.data()["promotion_error"].is_string());
    assert!(response.data().get("inviter_promotion").is_none());

    // Promotion is retried on its own; the use is counted once
    app.store.fail_grants(false);
    let promoted = app.post_empty(&promote_uri(inviter)).await.unwrap();
    assert_status(&promoted, StatusCode::OK);
    assert_eq!(
        id_list(&promoted.data()["granted_role_ids"]),
        vec![BRONZE.to_string()]
    );
    assert_eq!(app.store.invite("welcome").await.unwrap().uses, 100);
    assert_eq!(app.store.joins().await.len(), 1);
}

#[tokio::test]
async fn test_join_with_unknown_code() {
    let app = TestApp::standard().await;

    let response = app
        .post(
            &joins_uri(),
            &RecordJoin {
                member_id: "60".to_string(),
                invite_code: Some("nope".to_string()),
            },
        )
        .await
        .unwrap();
    assert_status(&response, StatusCode::NOT_FOUND);
    assert_eq!(response.error_code(), Some("UNKNOWN_INVITE"));
}

#[tokio::test]
async fn test_daily_joins_window() {
    let app = TestApp::standard().await;
    for member in 1..=3 {
        app.post(
            &joins_uri(),
            &RecordJoin {
                member_id: member.to_string(),
                invite_code: None,
            },
        )
        .await
        .unwrap();
    }

    let response = app.get(&format!("{}/daily?days=7", joins_uri())).await.unwrap();
    assert_status(&response, StatusCode::OK);
    let days = response.data().as_array().unwrap();
    let total: i64 = days.iter().map(|d| d["total"].as_i64().unwrap()).sum();
    assert_eq!(total, 3);

    let too_wide = app.get(&format!("{}/daily?days=61", joins_uri())).await.unwrap();
    assert_status(&too_wide, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rank_change_takes_effect_on_next_promotion() {
    let app = TestApp::standard().await;
    app.store.seed_credit(MEMBER, 40, 0, 0).await;
    app.store.add_rank(Rank::new(GUILD, GOLD, 500)).await;

    let before = app.post_empty(&promote_uri(MEMBER)).await.unwrap();
    assert!(id_list(&before.data()["granted_role_ids"]).is_empty());

    app.put(&rank_uri(GOLD), &SetRank::new(40)).await.unwrap();
    let after = app.post_empty(&promote_uri(MEMBER)).await.unwrap();
    assert_eq!(id_list(&after.data()["granted_role_ids"]), vec![GOLD.to_string()]);
}
