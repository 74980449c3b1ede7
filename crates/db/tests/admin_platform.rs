//! Integration tests for the admin and platform surfaces.
//!
//! Exercises the repository layer against a real database:
//! - Audit review: at-most-once status flip plus its log row, atomically
//! - Admin operation log recording and filtered listing
//! - Key-value settings
//! - Storage quota counters
//! - Per-feature usage limits
//! - Melody statistics and preset model defaults

use sqlx::PgPool;
use inkstone_core::pagination::PageParams;
use inkstone_db::models::admin::{AdminLogQuery, CreateAdminLog};
use inkstone_db::models::ai_model::CreatePresetModel;
use inkstone_db::models::melody::CreateMelody;
use inkstone_db::models::resource_audit::{ReviewDecision, SubmitAudit};
use inkstone_db::models::user::CreateUser;
use inkstone_db::repositories::{
    AdminLogRepo, MelodyRepo, PresetModelRepo, ResourceAuditRepo, SettingRepo, StorageQuotaRepo,
    UserLimitRepo, UserRepo,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_user(pool: &PgPool, username: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            nickname: None,
            avatar_url: None,
        },
    )
    .await
    .unwrap()
    .id
}

async fn submit_audit(pool: &PgPool, user_id: i64, title: &str) -> i64 {
    ResourceAuditRepo::submit(
        pool,
        &SubmitAudit {
            user_id,
            resource_type: "novel".to_string(),
            resource_id: 1,
            title: title.to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

fn new_log(admin_id: i64, action: &str) -> CreateAdminLog {
    CreateAdminLog {
        admin_id,
        action: action.to_string(),
        target_type: None,
        target_id: None,
        detail: None,
        ip_address: None,
    }
}

// ---------------------------------------------------------------------------
// Resource audits
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_review_flips_status_and_appends_log(pool: PgPool) {
    let author = seed_user(&pool, "author").await;
    let reviewer = seed_user(&pool, "reviewer").await;
    let audit_id = submit_audit(&pool, author, "My Novel").await;

    let ok = ResourceAuditRepo::review(
        &pool,
        audit_id,
        reviewer,
        ReviewDecision::Approved,
        Some("looks fine"),
    )
    .await
    .unwrap();
    assert!(ok);

    let audit = ResourceAuditRepo::find_by_id(&pool, audit_id).await.unwrap().unwrap();
    assert_eq!(audit.status, "approved");
    assert_eq!(audit.reviewed_by, Some(reviewer));
    assert!(audit.reviewed_at.is_some());

    let logs = ResourceAuditRepo::logs_for(&pool, audit_id).await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].decision, "approved");
    assert_eq!(logs[0].comment.as_deref(), Some("looks fine"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_second_review_is_refused_without_stray_log(pool: PgPool) {
    let author = seed_user(&pool, "author").await;
    let reviewer = seed_user(&pool, "reviewer").await;
    let audit_id = submit_audit(&pool, author, "My Novel").await;

    assert!(ResourceAuditRepo::review(&pool, audit_id, reviewer, ReviewDecision::Rejected, None)
        .await
        .unwrap());

    // The entry is no longer pending; the rolled-back second review must
    // not leave a log row behind.
    assert!(!ResourceAuditRepo::review(&pool, audit_id, reviewer, ReviewDecision::Approved, None)
        .await
        .unwrap());

    let audit = ResourceAuditRepo::find_by_id(&pool, audit_id).await.unwrap().unwrap();
    assert_eq!(audit.status, "rejected");
    assert_eq!(ResourceAuditRepo::logs_for(&pool, audit_id).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_queue_is_oldest_first_and_scoped_by_status(pool: PgPool) {
    let author = seed_user(&pool, "author").await;
    let reviewer = seed_user(&pool, "reviewer").await;
    let first = submit_audit(&pool, author, "First").await;
    let second = submit_audit(&pool, author, "Second").await;
    ResourceAuditRepo::review(&pool, second, reviewer, ReviewDecision::Approved, None)
        .await
        .unwrap();

    let pending = ResourceAuditRepo::queue(&pool, "pending", PageParams::default())
        .await
        .unwrap();
    assert_eq!(pending.total, 1);
    assert_eq!(pending.items[0].id, first);

    let approved = ResourceAuditRepo::queue(&pool, "approved", PageParams::default())
        .await
        .unwrap();
    assert_eq!(approved.total, 1);
    assert_eq!(approved.items[0].id, second);
}

// ---------------------------------------------------------------------------
// Admin operation logs
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_operation_logs_filtering(pool: PgPool) {
    let root = seed_user(&pool, "root").await;
    let helper = seed_user(&pool, "helper").await;

    assert!(AdminLogRepo::record(&pool, &new_log(root, "user.ban")).await.is_some());
    assert!(AdminLogRepo::record(&pool, &new_log(root, "notice.create")).await.is_some());
    assert!(AdminLogRepo::record(&pool, &new_log(helper, "user.ban")).await.is_some());

    let all = AdminLogRepo::operation_logs(&pool, &AdminLogQuery::default(), PageParams::default())
        .await
        .unwrap();
    assert_eq!(all.total, 3);

    let by_admin = AdminLogRepo::operation_logs(
        &pool,
        &AdminLogQuery {
            admin_id: Some(root),
            ..Default::default()
        },
        PageParams::default(),
    )
    .await
    .unwrap();
    assert_eq!(by_admin.total, 2);

    let by_both = AdminLogRepo::operation_logs(
        &pool,
        &AdminLogQuery {
            admin_id: Some(root),
            action: Some("user.ban".to_string()),
            ..Default::default()
        },
        PageParams::default(),
    )
    .await
    .unwrap();
    assert_eq!(by_both.total, 1);
    assert_eq!(by_both.items[0].action, "user.ban");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_record_with_bad_fk_collapses_to_none(pool: PgPool) {
    // No such admin: the FK violation is swallowed and reported as None.
    assert!(AdminLogRepo::record(&pool, &new_log(999_999, "user.ban")).await.is_none());
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_settings_set_get_remove(pool: PgPool) {
    assert!(SettingRepo::get(&pool, "site.name").await.unwrap().is_none());
    assert_eq!(
        SettingRepo::get_or(&pool, "site.name", "Inkstone").await.unwrap(),
        "Inkstone"
    );

    assert!(SettingRepo::set(&pool, "site.name", "My Site").await);
    assert_eq!(
        SettingRepo::get(&pool, "site.name").await.unwrap().as_deref(),
        Some("My Site")
    );

    // Upsert replaces in place.
    assert!(SettingRepo::set(&pool, "site.name", "Renamed").await);
    assert_eq!(
        SettingRepo::get(&pool, "site.name").await.unwrap().as_deref(),
        Some("Renamed")
    );

    assert!(SettingRepo::remove(&pool, "site.name").await.unwrap());
    assert!(!SettingRepo::remove(&pool, "site.name").await.unwrap());
}

// ---------------------------------------------------------------------------
// Storage quotas
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_storage_usage_counters(pool: PgPool) {
    let user_id = seed_user(&pool, "uploader").await;
    let quota = StorageQuotaRepo::get_or_create(&pool, user_id, 1_000).await.unwrap();
    assert_eq!(quota.used_space, 0);
    assert_eq!(quota.total_quota, 1_000);

    let quota = StorageQuotaRepo::add_usage(&pool, user_id, 600).await.unwrap().unwrap();
    assert_eq!(quota.used_space, 600);
    assert_eq!(quota.remaining(), 400);

    // Releasing more than is used clamps at zero.
    let quota = StorageQuotaRepo::release_usage(&pool, user_id, 900).await.unwrap().unwrap();
    assert_eq!(quota.used_space, 0);
    assert_eq!(quota.remaining(), 1_000);

    let quota = StorageQuotaRepo::set_total_quota(&pool, user_id, 5_000)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(quota.total_quota, 5_000);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_storage_get_or_create_keeps_existing_quota(pool: PgPool) {
    let user_id = seed_user(&pool, "uploader").await;
    StorageQuotaRepo::get_or_create(&pool, user_id, 1_000).await.unwrap();
    StorageQuotaRepo::add_usage(&pool, user_id, 100).await.unwrap();

    // A second call with a different default must not reset anything.
    let quota = StorageQuotaRepo::get_or_create(&pool, user_id, 9_999).await.unwrap();
    assert_eq!(quota.used_space, 100);
    assert_eq!(quota.total_quota, 1_000);
}

// ---------------------------------------------------------------------------
// Usage limits
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_limit_exhaustion_and_reset(pool: PgPool) {
    let user_id = seed_user(&pool, "limited").await;

    assert!(UserLimitRepo::has_access(&pool, user_id, "export", 2).await.unwrap());
    UserLimitRepo::increment_usage(&pool, user_id, "export").await.unwrap();
    UserLimitRepo::increment_usage(&pool, user_id, "export").await.unwrap();
    assert!(!UserLimitRepo::has_access(&pool, user_id, "export", 2).await.unwrap());

    assert!(UserLimitRepo::reset(&pool, user_id, "export").await.unwrap());
    assert!(UserLimitRepo::has_access(&pool, user_id, "export", 2).await.unwrap());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_unlimited_sentinel_never_exhausts(pool: PgPool) {
    let user_id = seed_user(&pool, "vip").await;

    UserLimitRepo::get_or_create(&pool, user_id, "export", -1).await.unwrap();
    for _ in 0..10 {
        UserLimitRepo::increment_usage(&pool, user_id, "export").await.unwrap();
    }
    assert!(UserLimitRepo::has_access(&pool, user_id, "export", -1).await.unwrap());
}

// ---------------------------------------------------------------------------
// Melodies
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_melody_lifecycle_and_stats(pool: PgPool) {
    let user_id = seed_user(&pool, "composer").await;

    let first = MelodyRepo::create(
        &pool,
        &CreateMelody {
            user_id,
            title: "Sketch".to_string(),
            bpm: Some(120),
        },
    )
    .await
    .unwrap();
    assert_eq!(first.status, "generating");

    let second = MelodyRepo::create(
        &pool,
        &CreateMelody {
            user_id,
            title: "Theme".to_string(),
            bpm: None,
        },
    )
    .await
    .unwrap();

    assert!(MelodyRepo::update_status(&pool, first.id, "completed", Some(90)).await.unwrap());
    assert!(MelodyRepo::update_status(&pool, second.id, "failed", None).await.unwrap());
    assert!(!MelodyRepo::update_status(&pool, 999_999, "completed", None).await.unwrap());

    let stats = MelodyRepo::stats(&pool).await.unwrap();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.generating, 0);
    assert_eq!(stats.failed, 1);
    assert!((stats.avg_duration_secs - 90.0).abs() < f64::EPSILON);
}

// ---------------------------------------------------------------------------
// Preset models
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_set_default_is_exclusive(pool: PgPool) {
    let a = PresetModelRepo::create(
        &pool,
        &CreatePresetModel {
            name: "Fast".to_string(),
            model_key: "fast-1".to_string(),
            provider: "acme".to_string(),
            max_tokens: None,
            temperature: None,
        },
    )
    .await
    .unwrap();
    let b = PresetModelRepo::create(
        &pool,
        &CreatePresetModel {
            name: "Smart".to_string(),
            model_key: "smart-1".to_string(),
            provider: "acme".to_string(),
            max_tokens: Some(8192),
            temperature: Some(0.2),
        },
    )
    .await
    .unwrap();

    assert!(PresetModelRepo::set_default(&pool, a.id).await.unwrap());
    assert!(PresetModelRepo::set_default(&pool, b.id).await.unwrap());

    let default = PresetModelRepo::default_preset(&pool).await.unwrap().unwrap();
    assert_eq!(default.id, b.id);

    let previous = PresetModelRepo::find_by_id(&pool, a.id).await.unwrap().unwrap();
    assert!(!previous.is_default);

    // Pointing at a missing preset rolls back; the current default stays.
    assert!(!PresetModelRepo::set_default(&pool, 999_999).await.unwrap());
    let default = PresetModelRepo::default_preset(&pool).await.unwrap().unwrap();
    assert_eq!(default.id, b.id);
}
