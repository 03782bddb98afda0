// tests/article_api_tests.rs

use std::sync::Arc;

use blog_backend::{
    config::Config, models::user::UserProfile, routes, state::AppState, store::MemoryStore,
    utils::jwt::sign_jwt,
};
use serde_json::{Value, json};

const SECRET: &str = "article_test_secret";

async fn spawn_app(config: Config) -> (String, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone(), config).expect("Failed to build state");
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (address, store)
}

fn bearer(user: &UserProfile) -> String {
    format!(
        "Bearer {}",
        sign_jwt(user.id, &user.username, &user.role, SECRET, 600).unwrap()
    )
}

#[tokio::test]
async fn clean_article_keeps_requested_status() {
    // Arrange
    let (address, store) = spawn_app(Config::for_testing(SECRET)).await;
    let client = reqwest::Client::new();
    let user = store.add_user("writer", None, "user");

    // Act
    let response = client
        .post(format!("{}/api/articles", address))
        .header("Authorization", bearer(&user))
        .json(&json!({
            "title": "Lifetimes explained",
            "content": "A short walk through borrowing.",
            "status": "draft"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["author_id"].as_i64(), Some(user.id));
    assert_eq!(body["data"]["word_count"], 31);
    assert_eq!(body["data"]["sensitive_words"], json!([]));

    let id = body["data"]["id"].as_i64().unwrap();
    let fetched: Value = client
        .get(format!("{}/api/articles/{}", address, id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["data"]["title"], "Lifetimes explained");
    assert_eq!(fetched["data"]["excerpt"], "A short walk through borrowing.");
}

#[tokio::test]
async fn sensitive_article_is_held_for_review() {
    let (address, store) = spawn_app(Config::for_testing(SECRET)).await;
    let client = reqwest::Client::new();
    let user = store.add_user("writer", None, "user");

    let response = client
        .post(format!("{}/api/articles", address))
        .header("Authorization", bearer(&user))
        .json(&json!({
            "title": "Weekend plans",
            "content": "Definitely not a SCAM.",
            "status": "published"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["sensitive_words"], json!(["scam"]));
}

#[tokio::test]
async fn configured_word_list_replaces_the_default() {
    let mut config = Config::for_testing(SECRET);
    config.sensitive_words = Some(vec!["spoiler".to_string()]);
    let (address, store) = spawn_app(config).await;
    let client = reqwest::Client::new();
    let user = store.add_user("writer", None, "user");

    let body: Value = client
        .post(format!("{}/api/articles", address))
        .header("Authorization", bearer(&user))
        .json(&json!({ "title": "Spoiler inside", "content": "scam talk" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["sensitive_words"], json!(["spoiler"]));
}

#[tokio::test]
async fn article_creation_validates_input() {
    let (address, store) = spawn_app(Config::for_testing(SECRET)).await;
    let client = reqwest::Client::new();
    let user = store.add_user("writer", None, "user");

    let empty_title = client
        .post(format!("{}/api/articles", address))
        .header("Authorization", bearer(&user))
        .json(&json!({ "title": "  ", "content": "body" }))
        .send()
        .await
        .unwrap();
    let anonymous = client
        .post(format!("{}/api/articles", address))
        .json(&json!({ "title": "t", "content": "body" }))
        .send()
        .await
        .unwrap();
    let missing = client
        .get(format!("{}/api/articles/777", address))
        .send()
        .await
        .unwrap();

    assert_eq!(empty_title.status().as_u16(), 400);
    assert_eq!(anonymous.status().as_u16(), 401);
    assert_eq!(missing.status().as_u16(), 404);
}

#[tokio::test]
async fn profile_lookup_and_edit() {
    let (address, store) = spawn_app(Config::for_testing(SECRET)).await;
    let client = reqwest::Client::new();
    let user = store.add_user("reader", None, "user");
    store.add_user("taken", None, "user");

    let profile: Value = client
        .get(format!("{}/api/users/{}", address, user.id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(profile["data"]["username"], "reader");

    let bad_avatar = client
        .put(format!("{}/api/users/me", address))
        .header("Authorization", bearer(&user))
        .json(&json!({ "avatar": "not a url" }))
        .send()
        .await
        .unwrap();
    let duplicate = client
        .put(format!("{}/api/users/me", address))
        .header("Authorization", bearer(&user))
        .json(&json!({ "username": "taken" }))
        .send()
        .await
        .unwrap();
    let ok = client
        .put(format!("{}/api/users/me", address))
        .header("Authorization", bearer(&user))
        .json(&json!({ "avatar": "https://img.example.com/me.png" }))
        .send()
        .await
        .unwrap();

    assert_eq!(bad_avatar.status().as_u16(), 400);
    assert_eq!(duplicate.status().as_u16(), 409);
    assert_eq!(ok.status().as_u16(), 200);
    let body: Value = ok.json().await.unwrap();
    assert_eq!(body["data"]["avatar"], "https://img.example.com/me.png");
    assert_eq!(body["data"]["username"], "reader");
}

#[tokio::test]
async fn like_and_unlike_keep_the_counter_in_step() {
    // Arrange
    let (address, store) = spawn_app(Config::for_testing(SECRET)).await;
    let client = reqwest::Client::new();
    let writer = store.add_user("writer", None, "user");
    let reader = store.add_user("reader", None, "user");
    let created: Value = client
        .post(format!("{}/api/articles", address))
        .header("Authorization", bearer(&writer))
        .json(&json!({ "title": "Pinning futures", "content": "Why Pin exists." }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(created["data"]["likes_count"], 0);
    let like_url = format!("{}/api/articles/{}/like", address, created["data"]["id"]);

    // Act
    let first = client
        .post(&like_url)
        .header("Authorization", bearer(&reader))
        .send()
        .await
        .unwrap();
    let second = client
        .post(&like_url)
        .header("Authorization", bearer(&reader))
        .send()
        .await
        .unwrap();
    let by_writer = client
        .post(&like_url)
        .header("Authorization", bearer(&writer))
        .send()
        .await
        .unwrap();
    let unlike = client
        .delete(&like_url)
        .header("Authorization", bearer(&reader))
        .send()
        .await
        .unwrap();
    let unlike_again = client
        .delete(&like_url)
        .header("Authorization", bearer(&reader))
        .send()
        .await
        .unwrap();

    // Assert
    assert_eq!(first.status().as_u16(), 200);
    let body: Value = first.json().await.unwrap();
    assert_eq!(body["data"], json!({ "liked": true, "likes_count": 1 }));

    assert_eq!(second.status().as_u16(), 400);
    let body: Value = second.json().await.unwrap();
    assert_eq!(body["success"], false);

    let body: Value = by_writer.json().await.unwrap();
    assert_eq!(body["data"]["likes_count"], 2);

    let body: Value = unlike.json().await.unwrap();
    assert_eq!(body["data"], json!({ "liked": false, "likes_count": 1 }));
    assert_eq!(unlike_again.status().as_u16(), 400);

    let fetched: Value = client
        .get(format!("{}/api/articles/{}", address, created["data"]["id"]))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["data"]["likes_count"], 1);
}

#[tokio::test]
async fn liking_requires_login_and_an_existing_article() {
    let (address, store) = spawn_app(Config::for_testing(SECRET)).await;
    let client = reqwest::Client::new();
    let reader = store.add_user("reader", None, "user");

    let anonymous = client
        .post(format!("{}/api/articles/1/like", address))
        .send()
        .await
        .unwrap();
    let missing = client
        .post(format!("{}/api/articles/999/like", address))
        .header("Authorization", bearer(&reader))
        .send()
        .await
        .unwrap();

    assert_eq!(anonymous.status().as_u16(), 401);
    assert_eq!(missing.status().as_u16(), 404);
}
