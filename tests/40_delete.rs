mod common;

use anyhow::Result;
use axum::http::StatusCode;

use common::TestApp;

#[tokio::test]
async fn delete_requires_a_token() -> Result<()> {
    let app = TestApp::new();

    let res = app.delete("/users/u1", None).await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert!(app.store.snapshot("u1").await.is_some());
    Ok(())
}

#[tokio::test]
async fn standard_user_cannot_delete_even_self() -> Result<()> {
    let app = TestApp::new();

    let res = app.delete("/users/u1", Some(&app.token("u1"))).await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert!(app.store.snapshot("u1").await.is_some());
    Ok(())
}

#[tokio::test]
async fn admin_deletes_user() -> Result<()> {
    let app = TestApp::new();

    let res = app.delete("/users/u1", Some(&app.token("u3"))).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["message"], "deleted");
    assert!(app.store.snapshot("u1").await.is_none());

    let res = app.get("/users/u1", Some(&app.token("u3"))).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn deleting_missing_user_is_not_found() -> Result<()> {
    let app = TestApp::new();

    let res = app.delete("/users/nothere", Some(&app.token("u3"))).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["error"], "No such user");
    assert_eq!(app.store.user_count().await, 3);
    Ok(())
}
