mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn root_answers_plain_text() -> Result<()> {
    let server = common::ensure_server().await?;

    let res = reqwest::get(format!("{}/", server.base_url)).await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await?, "health check!");
    Ok(())
}

#[tokio::test]
async fn health_reports_database_state() -> Result<()> {
    let server = common::ensure_server().await?;

    let res = reqwest::get(format!("{}/health", server.base_url)).await?;

    // The spawned server points at a closed port, so the database is down.
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["data"]["status"], "degraded");
    Ok(())
}

#[tokio::test]
async fn protected_route_without_token_is_rejected() -> Result<()> {
    let server = common::ensure_server().await?;

    let res = reqwest::get(format!("{}/api/user/get_user_by_token", server.base_url)).await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "MISSING_AUTH_HEADER");
    Ok(())
}
