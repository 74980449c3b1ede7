//! Integration tests for the novel authoring stack.
//!
//! Exercises the repository layer against a real database:
//! - Chapter create/update/delete and the novel word-count invariant
//! - Append-only chapter version history
//! - Outline tree assembly and reparenting guards
//! - Novel statistics

use sqlx::PgPool;
use inkstone_db::models::chapter::{CreateChapter, UpdateChapter};
use inkstone_db::models::novel::{CreateNovel, UpdateNovel};
use inkstone_db::models::outline::CreateOutline;
use inkstone_db::models::user::CreateUser;
use inkstone_db::repositories::{ChapterRepo, NovelRepo, OutlineRepo, UserRepo};

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

async fn seed_novel(pool: &PgPool, user_id: i64, title: &str) -> i64 {
    NovelRepo::create(
        pool,
        &CreateNovel {
            user_id,
            title: title.to_string(),
            synopsis: None,
            genre: None,
        },
    )
    .await
    .unwrap()
    .id
}

fn new_chapter(novel_id: i64, title: &str, content: &str) -> CreateChapter {
    CreateChapter {
        novel_id,
        title: title.to_string(),
        content: Some(content.to_string()),
        sort_order: None,
    }
}

fn new_outline(novel_id: i64, parent_id: Option<i64>, title: &str) -> CreateOutline {
    CreateOutline {
        novel_id,
        parent_id,
        title: title.to_string(),
        summary: None,
        sort_order: None,
    }
}

// ---------------------------------------------------------------------------
// Word-count invariant
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_chapter_create_updates_novel_word_count(pool: PgPool) {
    let user_id = seed_user(&pool, "author").await;
    let novel_id = seed_novel(&pool, user_id, "First Novel").await;

    let chapter = ChapterRepo::create(&pool, &new_chapter(novel_id, "One", "hello world"))
        .await
        .unwrap();
    assert_eq!(chapter.word_count, 10);

    let novel = NovelRepo::find_by_id(&pool, novel_id).await.unwrap().unwrap();
    assert_eq!(novel.current_words, 10);

    ChapterRepo::create(&pool, &new_chapter(novel_id, "Two", "abc def"))
        .await
        .unwrap();
    let novel = NovelRepo::find_by_id(&pool, novel_id).await.unwrap().unwrap();
    assert_eq!(novel.current_words, 16);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_chapter_delete_restores_word_count(pool: PgPool) {
    let user_id = seed_user(&pool, "author").await;
    let novel_id = seed_novel(&pool, user_id, "Novel").await;

    let keep = ChapterRepo::create(&pool, &new_chapter(novel_id, "Keep", "aaaa"))
        .await
        .unwrap();
    let drop = ChapterRepo::create(&pool, &new_chapter(novel_id, "Drop", "bbbbbb"))
        .await
        .unwrap();

    assert!(ChapterRepo::delete(&pool, drop.id).await.unwrap());

    let novel = NovelRepo::find_by_id(&pool, novel_id).await.unwrap().unwrap();
    assert_eq!(novel.current_words, keep.word_count);

    // Second delete is a no-op.
    assert!(!ChapterRepo::delete(&pool, drop.id).await.unwrap());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_cjk_content_counts_characters(pool: PgPool) {
    let user_id = seed_user(&pool, "author").await;
    let novel_id = seed_novel(&pool, user_id, "Novel").await;

    // Five CJK characters plus one space: five countable characters.
    let chapter = ChapterRepo::create(&pool, &new_chapter(novel_id, "One", "你好 世界啊"))
        .await
        .unwrap();
    assert_eq!(chapter.word_count, 5);
}

// ---------------------------------------------------------------------------
// Version history
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_update_content_appends_versions(pool: PgPool) {
    let user_id = seed_user(&pool, "author").await;
    let novel_id = seed_novel(&pool, user_id, "Novel").await;
    let chapter = ChapterRepo::create(&pool, &new_chapter(novel_id, "One", "v0"))
        .await
        .unwrap();

    let updated = ChapterRepo::update_content(&pool, chapter.id, "first revision")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.content, "first revision");
    assert_eq!(updated.word_count, 13);

    ChapterRepo::update_content(&pool, chapter.id, "second revision")
        .await
        .unwrap()
        .unwrap();

    let versions = ChapterRepo::list_versions(&pool, chapter.id).await.unwrap();
    assert_eq!(versions.len(), 2);
    // Newest first, version numbers strictly increasing from 1.
    assert_eq!(versions[0].version, 2);
    assert_eq!(versions[0].content, "second revision");
    assert_eq!(versions[1].version, 1);
    assert_eq!(versions[1].content, "first revision");

    let novel = NovelRepo::find_by_id(&pool, novel_id).await.unwrap().unwrap();
    assert_eq!(novel.current_words, 14);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_update_content_missing_chapter_returns_none(pool: PgPool) {
    let updated = ChapterRepo::update_content(&pool, 999_999, "text").await.unwrap();
    assert!(updated.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_metadata_update_does_not_touch_versions(pool: PgPool) {
    let user_id = seed_user(&pool, "author").await;
    let novel_id = seed_novel(&pool, user_id, "Novel").await;
    let chapter = ChapterRepo::create(&pool, &new_chapter(novel_id, "Old", "text"))
        .await
        .unwrap();

    let updated = ChapterRepo::update(
        &pool,
        chapter.id,
        &UpdateChapter {
            title: Some("New".to_string()),
            status: Some("published".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.title, "New");
    assert_eq!(updated.status, "published");

    assert!(ChapterRepo::list_versions(&pool, chapter.id).await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Novel CRUD and statistics
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_novel_update_and_stats(pool: PgPool) {
    let user_id = seed_user(&pool, "author").await;
    let novel_id = seed_novel(&pool, user_id, "Working Title").await;

    let updated = NovelRepo::update(
        &pool,
        novel_id,
        &UpdateNovel {
            title: Some("Final Title".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.title, "Final Title");

    let one = ChapterRepo::create(&pool, &new_chapter(novel_id, "One", "abcd"))
        .await
        .unwrap();
    ChapterRepo::create(&pool, &new_chapter(novel_id, "Two", "efgh"))
        .await
        .unwrap();
    ChapterRepo::update(
        &pool,
        one.id,
        &UpdateChapter {
            status: Some("published".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let stats = NovelRepo::stats(&pool, novel_id).await.unwrap();
    assert_eq!(stats.chapter_count, 2);
    assert_eq!(stats.total_words, 8);
    assert_eq!(stats.published_chapters, 1);
    assert_eq!(stats.draft_chapters, 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_novel_delete_cascades_chapters(pool: PgPool) {
    let user_id = seed_user(&pool, "author").await;
    let novel_id = seed_novel(&pool, user_id, "Doomed").await;
    let chapter = ChapterRepo::create(&pool, &new_chapter(novel_id, "One", "text"))
        .await
        .unwrap();

    assert!(NovelRepo::delete(&pool, novel_id).await.unwrap());
    assert!(ChapterRepo::find_by_id(&pool, chapter.id).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Outline tree
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_outline_tree_nests_children(pool: PgPool) {
    let user_id = seed_user(&pool, "author").await;
    let novel_id = seed_novel(&pool, user_id, "Novel").await;

    let act = OutlineRepo::create(&pool, &new_outline(novel_id, None, "Act I"))
        .await
        .unwrap();
    let scene = OutlineRepo::create(&pool, &new_outline(novel_id, Some(act.id), "Scene 1"))
        .await
        .unwrap();
    OutlineRepo::create(&pool, &new_outline(novel_id, Some(scene.id), "Beat 1"))
        .await
        .unwrap();

    let tree = OutlineRepo::tree(&pool, novel_id).await.unwrap();
    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].outline.id, act.id);
    assert_eq!(tree[0].children.len(), 1);
    assert_eq!(tree[0].children[0].outline.id, scene.id);
    assert_eq!(tree[0].children[0].children.len(), 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_outline_parent_must_share_novel(pool: PgPool) {
    let user_id = seed_user(&pool, "author").await;
    let novel_a = seed_novel(&pool, user_id, "A").await;
    let novel_b = seed_novel(&pool, user_id, "B").await;

    let foreign = OutlineRepo::create(&pool, &new_outline(novel_a, None, "Root"))
        .await
        .unwrap();
    let result =
        OutlineRepo::create(&pool, &new_outline(novel_b, Some(foreign.id), "Child")).await;
    assert!(result.is_err());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_move_node_rejects_cycles(pool: PgPool) {
    let user_id = seed_user(&pool, "author").await;
    let novel_id = seed_novel(&pool, user_id, "Novel").await;

    let a = OutlineRepo::create(&pool, &new_outline(novel_id, None, "A")).await.unwrap();
    let b = OutlineRepo::create(&pool, &new_outline(novel_id, Some(a.id), "B"))
        .await
        .unwrap();
    let c = OutlineRepo::create(&pool, &new_outline(novel_id, Some(b.id), "C"))
        .await
        .unwrap();

    // Self-parenting and moving under a descendant are both refused.
    assert!(!OutlineRepo::move_node(&pool, a.id, Some(a.id)).await.unwrap());
    assert!(!OutlineRepo::move_node(&pool, a.id, Some(c.id)).await.unwrap());

    // A legal sibling move and a detach both go through.
    assert!(OutlineRepo::move_node(&pool, c.id, Some(a.id)).await.unwrap());
    assert!(OutlineRepo::move_node(&pool, b.id, None).await.unwrap());

    let moved = OutlineRepo::find_by_id(&pool, b.id).await.unwrap().unwrap();
    assert!(moved.parent_id.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_outline_delete_promotes_children(pool: PgPool) {
    let user_id = seed_user(&pool, "author").await;
    let novel_id = seed_novel(&pool, user_id, "Novel").await;

    let parent = OutlineRepo::create(&pool, &new_outline(novel_id, None, "Parent"))
        .await
        .unwrap();
    let child = OutlineRepo::create(&pool, &new_outline(novel_id, Some(parent.id), "Child"))
        .await
        .unwrap();

    assert!(OutlineRepo::delete(&pool, parent.id).await.unwrap());

    // FK is ON DELETE SET NULL, so the child resurfaces as a root.
    let tree = OutlineRepo::tree(&pool, novel_id).await.unwrap();
    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].outline.id, child.id);
    assert!(tree[0].outline.parent_id.is_none());
}
