// tests/postgres_store_tests.rs
//
// Run with: DATABASE_URL=postgres://... cargo test -- --ignored

use blog_backend::{
    comments::cascade,
    models::{article::LikeChange, comment::NewComment},
    store::{ArticleStore, CommentStore, PgStore},
};
use sqlx::postgres::PgPoolOptions;

async fn connect() -> PgStore {
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await
        .expect("Failed to connect to Postgres for testing.");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    PgStore::new(pool)
}

/// Inserts a user and an article owned by them; returns (user_id, article_id).
async fn seed(store: &PgStore) -> (i64, i64) {
    let username = format!("u_{}", &uuid::Uuid::new_v4().to_string()[..8]);
    let (user_id,): (i64,) =
        sqlx::query_as("INSERT INTO users (username) VALUES ($1) RETURNING id")
            .bind(&username)
            .fetch_one(store.pool())
            .await
            .unwrap();
    let (article_id,): (i64,) = sqlx::query_as(
        "INSERT INTO articles (author_id, title, content, excerpt) VALUES ($1, 't', 'c', 'c') RETURNING id",
    )
    .bind(user_id)
    .fetch_one(store.pool())
    .await
    .unwrap();

    (user_id, article_id)
}

fn new_comment(article_id: i64, user_id: i64, parent_id: Option<i64>) -> NewComment {
    NewComment {
        article_id,
        user_id,
        content: "hello".to_string(),
        parent_id,
        root_id: None,
        username: "pg".to_string(),
        avatar: None,
        reply_to_user_id: None,
        reply_to_username: None,
    }
}

#[tokio::test]
#[ignore = "requires a running Postgres (DATABASE_URL)"]
async fn cascade_delete_removes_the_subtree_in_postgres() {
    let store = connect().await;
    let (user_id, article_id) = seed(&store).await;

    let a = store.insert_comment(new_comment(article_id, user_id, None)).await.unwrap();
    let b = store.insert_comment(new_comment(article_id, user_id, Some(a.id))).await.unwrap();
    let c = store.insert_comment(new_comment(article_id, user_id, Some(b.id))).await.unwrap();
    let other = store.insert_comment(new_comment(article_id, user_id, None)).await.unwrap();

    let deleted = cascade::delete_thread(&store, &a).await.unwrap();

    assert_eq!(deleted, vec![a.id, b.id, c.id]);
    let remaining: Vec<i64> = store
        .list_comments(article_id)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(remaining, vec![other.id]);
}

#[tokio::test]
#[ignore = "requires a running Postgres (DATABASE_URL)"]
async fn partial_delete_is_rolled_back() {
    let store = connect().await;
    let (user_id, article_id) = seed(&store).await;

    let a = store.insert_comment(new_comment(article_id, user_id, None)).await.unwrap();
    let b = store.insert_comment(new_comment(article_id, user_id, Some(a.id))).await.unwrap();

    // Leaving the reply out of the id set violates the parent foreign key.
    let result = store.delete_comments(&[a.id]).await;

    assert!(result.is_err());
    assert!(store.find_comment(a.id).await.unwrap().is_some());
    assert!(store.find_comment(b.id).await.unwrap().is_some());
}

#[tokio::test]
#[ignore = "requires a running Postgres (DATABASE_URL)"]
async fn likes_update_the_counter_once_per_user() {
    let store = connect().await;
    let (user_id, article_id) = seed(&store).await;

    let first = store.like_article(article_id, user_id).await.unwrap();
    let repeat = store.like_article(article_id, user_id).await.unwrap();
    let removed = store.unlike_article(article_id, user_id).await.unwrap();
    let again = store.unlike_article(article_id, user_id).await.unwrap();

    assert_eq!(first, LikeChange::Applied(1));
    assert_eq!(repeat, LikeChange::Unchanged);
    assert_eq!(removed, LikeChange::Applied(0));
    assert_eq!(again, LikeChange::Unchanged);
    let article = store.find_article(article_id).await.unwrap().unwrap();
    assert_eq!(article.likes_count, 0);
}
