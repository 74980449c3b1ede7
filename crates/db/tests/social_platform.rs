//! Integration tests for the social and content surfaces.
//!
//! Exercises the repository layer against a real database:
//! - Mutual friendship: both directions or neither
//! - Site message feed pagination and read flags
//! - Notice bar priority clamping and active-window listing
//! - Crowdfunding contributions and the running counters

use sqlx::PgPool;
use inkstone_db::models::crowdfunding::CreateCampaign;
use inkstone_db::models::notice::{CreateNoticeBar, UpdateNoticeBar};
use inkstone_db::models::site_message::CreateSiteMessage;
use inkstone_db::models::user::CreateUser;
use inkstone_db::repositories::{
    CrowdfundingRepo, FriendRepo, NoticeBarRepo, SiteMessageRepo, UserRepo,
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

async fn send_message(pool: &PgPool, user_id: i64, title: &str) -> i64 {
    SiteMessageRepo::send(
        pool,
        &CreateSiteMessage {
            user_id,
            title: title.to_string(),
            content: "body".to_string(),
            category: None,
        },
    )
    .await
    .unwrap()
    .id
}

fn new_notice(content: &str, priority: Option<i32>) -> CreateNoticeBar {
    CreateNoticeBar {
        content: content.to_string(),
        link: None,
        priority,
        starts_at: None,
        ends_at: None,
    }
}

// ---------------------------------------------------------------------------
// Friend graph
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_add_mutual_creates_both_directions(pool: PgPool) {
    let alice = seed_user(&pool, "alice").await;
    let bob = seed_user(&pool, "bob").await;

    assert!(FriendRepo::add_mutual(&pool, alice, bob).await);
    assert!(FriendRepo::are_friends(&pool, alice, bob).await.unwrap());
    assert!(FriendRepo::are_friends(&pool, bob, alice).await.unwrap());

    let friends = FriendRepo::friends_of(&pool, alice).await.unwrap();
    assert_eq!(friends.len(), 1);
    assert_eq!(friends[0].friend_id, bob);
    assert_eq!(friends[0].username, "bob");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_add_mutual_duplicate_leaves_graph_intact(pool: PgPool) {
    let alice = seed_user(&pool, "alice").await;
    let bob = seed_user(&pool, "bob").await;

    assert!(FriendRepo::add_mutual(&pool, alice, bob).await);
    // The duplicate insert violates the unique pair; the transaction
    // rolls back and the existing edges survive.
    assert!(!FriendRepo::add_mutual(&pool, alice, bob).await);

    assert!(FriendRepo::are_friends(&pool, alice, bob).await.unwrap());
    assert!(FriendRepo::are_friends(&pool, bob, alice).await.unwrap());
    assert_eq!(FriendRepo::friends_of(&pool, alice).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_add_mutual_self_is_refused(pool: PgPool) {
    let alice = seed_user(&pool, "alice").await;

    // Fails the user_id <> friend_id check; nothing is written.
    assert!(!FriendRepo::add_mutual(&pool, alice, alice).await);
    assert!(FriendRepo::friends_of(&pool, alice).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_remove_mutual_deletes_both_directions(pool: PgPool) {
    let alice = seed_user(&pool, "alice").await;
    let bob = seed_user(&pool, "bob").await;
    FriendRepo::add_mutual(&pool, alice, bob).await;

    assert!(FriendRepo::remove_mutual(&pool, alice, bob).await);
    assert!(!FriendRepo::are_friends(&pool, alice, bob).await.unwrap());
    assert!(!FriendRepo::are_friends(&pool, bob, alice).await.unwrap());

    // Removing an absent friendship reports false.
    assert!(!FriendRepo::remove_mutual(&pool, alice, bob).await);
}

// ---------------------------------------------------------------------------
// Site messages
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_feed_has_more_flag(pool: PgPool) {
    let user_id = seed_user(&pool, "reader").await;
    for i in 0..5 {
        send_message(&pool, user_id, &format!("msg {i}")).await;
    }

    let first = SiteMessageRepo::feed(&pool, user_id, Some(1), Some(2)).await.unwrap();
    assert_eq!(first.items.len(), 2);
    assert!(first.has_more);

    let last = SiteMessageRepo::feed(&pool, user_id, Some(3), Some(2)).await.unwrap();
    assert_eq!(last.items.len(), 1);
    assert!(!last.has_more);

    let beyond = SiteMessageRepo::feed(&pool, user_id, Some(4), Some(2)).await.unwrap();
    assert!(beyond.items.is_empty());
    assert!(!beyond.has_more);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_mark_read_is_scoped_to_owner(pool: PgPool) {
    let owner = seed_user(&pool, "owner").await;
    let other = seed_user(&pool, "other").await;
    let message_id = send_message(&pool, owner, "hello").await;

    // Someone else's id does not flip the flag.
    assert!(!SiteMessageRepo::mark_read(&pool, message_id, other).await.unwrap());
    assert_eq!(SiteMessageRepo::unread_count(&pool, owner).await.unwrap(), 1);

    assert!(SiteMessageRepo::mark_read(&pool, message_id, owner).await.unwrap());
    // Already read: a second call is a no-op.
    assert!(!SiteMessageRepo::mark_read(&pool, message_id, owner).await.unwrap());
    assert_eq!(SiteMessageRepo::unread_count(&pool, owner).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_mark_all_read_counts_changes(pool: PgPool) {
    let user_id = seed_user(&pool, "reader").await;
    for i in 0..3 {
        send_message(&pool, user_id, &format!("msg {i}")).await;
    }

    assert_eq!(SiteMessageRepo::mark_all_read(&pool, user_id).await.unwrap(), 3);
    assert_eq!(SiteMessageRepo::mark_all_read(&pool, user_id).await.unwrap(), 0);
}

// ---------------------------------------------------------------------------
// Notice bars
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_notice_priority_is_clamped(pool: PgPool) {
    let high = NoticeBarRepo::create(&pool, &new_notice("too high", Some(150)))
        .await
        .unwrap();
    assert_eq!(high.priority, 100);

    let low = NoticeBarRepo::create(&pool, &new_notice("too low", Some(-5)))
        .await
        .unwrap();
    assert_eq!(low.priority, 0);

    let updated = NoticeBarRepo::update(
        &pool,
        low.id,
        &UpdateNoticeBar {
            priority: Some(9999),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.priority, 100);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_list_active_respects_window_and_flag(pool: PgPool) {
    let visible = NoticeBarRepo::create(&pool, &new_notice("visible", Some(10)))
        .await
        .unwrap();
    let hidden = NoticeBarRepo::create(&pool, &new_notice("hidden", Some(90)))
        .await
        .unwrap();
    NoticeBarRepo::update(
        &pool,
        hidden.id,
        &UpdateNoticeBar {
            is_active: Some(false),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    // An already-ended window hides the bar as well.
    let ended = NoticeBarRepo::create(&pool, &new_notice("ended", Some(50))).await.unwrap();
    sqlx::query("UPDATE notice_bars SET ends_at = NOW() - INTERVAL '1 hour' WHERE id = $1")
        .bind(ended.id)
        .execute(&pool)
        .await
        .unwrap();

    let active = NoticeBarRepo::list_active(&pool).await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, visible.id);

    // The unfiltered lister still sees all three, highest priority first.
    let all = NoticeBarRepo::list_all(&pool).await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].id, hidden.id);
}

// ---------------------------------------------------------------------------
// Crowdfunding
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_contribute_bumps_campaign_counters(pool: PgPool) {
    let owner = seed_user(&pool, "owner").await;
    let backer = seed_user(&pool, "backer").await;
    let campaign = CrowdfundingRepo::create(
        &pool,
        &CreateCampaign {
            user_id: owner,
            title: "Print run".to_string(),
            description: None,
            goal_amount: 10_000,
            deadline: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(campaign.status, "open");
    assert_eq!(campaign.raised_amount, 0);

    CrowdfundingRepo::contribute(&pool, campaign.id, backer, 2_500, Some("good luck"))
        .await
        .unwrap();
    CrowdfundingRepo::contribute(&pool, campaign.id, owner, 1_000, None)
        .await
        .unwrap();

    let campaign = CrowdfundingRepo::find_by_id(&pool, campaign.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(campaign.raised_amount, 3_500);
    assert_eq!(campaign.backer_count, 2);

    let contributions = CrowdfundingRepo::list_contributions(&pool, campaign.id)
        .await
        .unwrap();
    assert_eq!(contributions.len(), 2);
    // Newest first.
    assert_eq!(contributions[0].amount, 1_000);
    assert_eq!(contributions[1].message.as_deref(), Some("good luck"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_contribute_rejects_non_positive_amount(pool: PgPool) {
    let owner = seed_user(&pool, "owner").await;
    let campaign = CrowdfundingRepo::create(
        &pool,
        &CreateCampaign {
            user_id: owner,
            title: "Print run".to_string(),
            description: None,
            goal_amount: 10_000,
            deadline: None,
        },
    )
    .await
    .unwrap();

    assert!(CrowdfundingRepo::contribute(&pool, campaign.id, owner, 0, None)
        .await
        .is_err());

    let campaign = CrowdfundingRepo::find_by_id(&pool, campaign.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(campaign.raised_amount, 0);
    assert_eq!(campaign.backer_count, 0);
}
