mod common;

use anyhow::Result;
use axum::http::StatusCode;
use bankly_api::auth::TokenCodec;
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn listing_requires_a_token() -> Result<()> {
    let app = TestApp::new();

    let res = app.get("/users", None).await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.body["success"], false);
    Ok(())
}

#[tokio::test]
async fn token_signed_with_another_secret_is_not_an_identity() -> Result<()> {
    let app = TestApp::new();
    let forged = TokenCodec::new(b"I AM A BAD GUY", 1)?.issue("hacker", true)?;

    let res = app.get("/users", Some(&forged)).await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let res = app.delete("/users/u1", Some(&forged)).await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert!(app.store.snapshot("u1").await.is_some());
    Ok(())
}

#[tokio::test]
async fn garbage_token_is_treated_as_no_token() -> Result<()> {
    let app = TestApp::new();

    let res = app.get("/users", Some("not.a.token")).await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    // Public routes do not care
    let res = app.post("/auth/login", json!({"username": "u1", "password": "pwd1"})).await?;
    assert_eq!(res.status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn listing_returns_only_basic_info() -> Result<()> {
    let app = TestApp::new();
    let token = app.token("u1");

    let res = app.get("/users", Some(&token)).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(
        res.body["data"],
        json!({
            "users": [
                {"username": "u1", "first_name": "fn1", "last_name": "ln1"},
                {"username": "u2", "first_name": "fn2", "last_name": "ln2"},
                {"username": "u3", "first_name": "fn3", "last_name": "ln3"},
            ]
        })
    );
    Ok(())
}

#[tokio::test]
async fn get_requires_a_token() -> Result<()> {
    let app = TestApp::new();

    let res = app.get("/users/u1", None).await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn get_returns_contact_details() -> Result<()> {
    let app = TestApp::new();
    let token = app.token("u2");

    let res = app.get("/users/u1", Some(&token)).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(
        res.body["data"]["user"],
        json!({
            "username": "u1",
            "first_name": "fn1",
            "last_name": "ln1",
            "email": "email1",
            "phone": "phone1",
        })
    );
    Ok(())
}

#[tokio::test]
async fn get_unknown_user_is_not_found() -> Result<()> {
    let app = TestApp::new();
    let token = app.token("u1");

    let res = app.get("/users/nothere", Some(&token)).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["status"], 404);
    assert_eq!(res.body["error"], "No such user");
    Ok(())
}
