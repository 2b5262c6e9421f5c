mod common;

use common::book_json;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

#[tokio::test]
async fn test_create_book() {
    let app = TestApp::spawn().await;
    let user = app.register("reader").await;

    let body = app.create_book(&user, "The Fifth Season").await;

    assert_eq!(body["status_code"], 201);
    assert!(body["data"]["id"].is_string());
    assert_eq!(body["data"]["title"], "The Fifth Season");
    assert_eq!(body["data"]["read_date"], "2024-06-15");
    assert_eq!(body["data"]["rating"], 4);
    assert_eq!(body["data"]["notes"], "Second reading");
    assert_eq!(body["data"]["user"]["id"], user.id.as_str());
    assert_eq!(body["data"]["user"]["username"], "reader");
    assert!(body["data"]["user"].get("email").is_none());
}

#[tokio::test]
async fn test_create_book_validation() {
    let app = TestApp::spawn().await;
    let user = app.register("reader").await;

    let cases = [
        book_json("The Fifth Season", 0),
        book_json("The Fifth Season", 6),
        book_json("", 3),
        json!({"title": "Untitled", "author": "Anon", "summary": "x", "read_date": "yesterday", "rating": 3}),
        json!({"title": "Untitled", "author": "Anon", "summary": "x", "rating": 3}),
        json!({"title": "Untitled", "author": "Anon", "summary": "x", "read_date": "2024-01-01", "rating": "five"}),
    ];

    for payload in cases {
        let response = app
            .post_authenticated("/api/books", &user.access_token)
            .json(&payload)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", payload);
    }
}

#[tokio::test]
async fn test_list_books_returns_summaries() {
    let app = TestApp::spawn().await;
    let user = app.register("reader").await;
    app.create_book(&user, "The Fifth Season").await;
    app.create_book(&user, "The Obelisk Gate").await;

    let response = app
        .get_authenticated("/api/books", &user.access_token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    let books = body["data"].as_array().unwrap();
    assert_eq!(books.len(), 2);
    assert_eq!(books[0]["title"], "The Fifth Season");
    assert_eq!(books[1]["title"], "The Obelisk Gate");
    assert!(books[0].get("summary").is_none());
    assert!(books[0]["rating"].is_number());
}

#[tokio::test]
async fn test_get_update_delete_book() {
    let app = TestApp::spawn().await;
    let user = app.register("reader").await;
    let created = app.create_book(&user, "The Fifth Season").await;
    let path = format!("/api/books/{}", created["data"]["id"].as_str().unwrap());

    let fetched = app
        .get_authenticated(&path, &user.access_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(fetched.status(), StatusCode::OK);
    let fetched: Value = fetched.json().await.unwrap();
    assert_eq!(fetched["data"]["summary"], "The world ends, again.");

    let updated = app
        .put_authenticated(&path, &user.access_token)
        .json(&json!({
            "title": "The Stone Sky",
            "author": "N. K. Jemisin",
            "summary": "The moon returns.",
            "read_date": "2024-07-01",
            "rating": 5
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(updated.status(), StatusCode::OK);
    let updated: Value = updated.json().await.unwrap();
    assert_eq!(updated["data"]["title"], "The Stone Sky");
    assert_eq!(updated["data"]["rating"], 5);
    // Full replacement: omitted notes are cleared
    assert!(updated["data"]["notes"].is_null());
    assert_eq!(updated["data"]["id"], created["data"]["id"]);

    let deleted = app
        .delete_authenticated(&path, &user.access_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let gone = app
        .get_authenticated(&path, &user.access_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_books_of_other_users_are_not_found() {
    let app = TestApp::spawn().await;
    let owner = app.register("owner").await;
    let intruder = app.register("intruder").await;
    let created = app.create_book(&owner, "Private Diary").await;
    let path = format!("/api/books/{}", created["data"]["id"].as_str().unwrap());

    let read = app
        .get_authenticated(&path, &intruder.access_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(read.status(), StatusCode::NOT_FOUND);

    let update = app
        .put_authenticated(&path, &intruder.access_token)
        .json(&book_json("Hijacked", 1))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(update.status(), StatusCode::NOT_FOUND);

    let delete = app
        .delete_authenticated(&path, &intruder.access_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(delete.status(), StatusCode::NOT_FOUND);

    let listed = app
        .get_authenticated("/api/books", &intruder.access_token)
        .send()
        .await
        .expect("Failed to execute request");
    let listed: Value = listed.json().await.unwrap();
    assert!(listed["data"].as_array().unwrap().is_empty());

    let still_there = app
        .get_authenticated(&path, &owner.access_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(still_there.status(), StatusCode::OK);
    let still_there: Value = still_there.json().await.unwrap();
    assert_eq!(still_there["data"]["title"], "Private Diary");
}

#[tokio::test]
async fn test_unknown_and_malformed_book_ids() {
    let app = TestApp::spawn().await;
    let user = app.register("reader").await;

    let unknown = app
        .get_authenticated(
            &format!("/api/books/{}", uuid::Uuid::new_v4()),
            &user.access_token,
        )
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);

    let malformed = app
        .get_authenticated("/api/books/42", &user.access_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_book_routes_require_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/books")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .post("/api/books")
        .json(&book_json("Anonymous", 3))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
