mod common;

use std::sync::Arc;

use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, StatusCode};

use common::{multipart, send, test_app_with_stores, MemoryItems, MemoryUsers};
use marketplace_api::database::models::ItemDraft;

fn register(username: &str, password: &str) -> Request<Body> {
    multipart(
        "/api/user/register",
        &[
            ("username", None, username.as_bytes()),
            ("password", None, password.as_bytes()),
            ("nickname", None, b"rider"),
        ],
    )
}

fn login(username: &str, password: &str) -> Request<Body> {
    multipart(
        "/api/user/login",
        &[
            ("username", None, username.as_bytes()),
            ("password", None, password.as_bytes()),
        ],
    )
}

fn upsert(bearer: &str, parts: &[(&str, Option<&str>, &[u8])]) -> Request<Body> {
    let mut request = multipart("/api/item/upsert_item", parts);
    request
        .headers_mut()
        .insert("authorization", bearer.parse().expect("header value"));
    request
}

fn draft(title: &str) -> ItemDraft {
    ItemDraft {
        category_id: 1,
        title: title.into(),
        content: String::new(),
        price: 1000,
    }
}

fn stores() -> (Arc<MemoryUsers>, Arc<MemoryItems>) {
    (Arc::new(MemoryUsers::default()), Arc::new(MemoryItems::default()))
}

#[tokio::test]
async fn register_then_login_issues_working_token() -> Result<()> {
    let (users, items) = stores();
    let (app, _) = test_app_with_stores(users, items)?;

    let (status, body) = send(&app, register("kim", "pw1234")).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["userInfo"].get("password").is_none());

    let (status, body) = send(&app, login("kim", "pw1234")).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["userInfo"]["username"], "kim");
    assert!(body["data"]["userInfo"].get("password").is_none());

    let token = body["data"]["token"].as_str().expect("token").to_string();
    let request = Request::builder()
        .uri("/api/user/get_user_by_token")
        .header("authorization", token)
        .body(Body::empty())?;
    let (status, body) = send(&app, request).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "kim");
    Ok(())
}

#[tokio::test]
async fn duplicate_username_is_409() -> Result<()> {
    let (users, items) = stores();
    let (app, _) = test_app_with_stores(users, items)?;

    let (status, _) = send(&app, register("kim", "pw1234")).await?;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, register("kim", "other")).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "CONFLICT");
    Ok(())
}

#[tokio::test]
async fn wrong_password_reads_like_unknown_user() -> Result<()> {
    let (users, items) = stores();
    let (app, _) = test_app_with_stores(users, items)?;
    send(&app, register("kim", "pw1234")).await?;

    let (wrong_status, wrong_body) = send(&app, login("kim", "nope")).await?;
    let (unknown_status, unknown_body) = send(&app, login("lee", "pw1234")).await?;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body["msg"], unknown_body["msg"]);
    assert!(wrong_body.get("data").is_none());
    Ok(())
}

#[tokio::test]
async fn new_listing_is_201_and_edit_is_200() -> Result<()> {
    let (users, items) = stores();
    let (app, _) = test_app_with_stores(users, items.clone())?;
    let (_, body) = send(&app, register("kim", "pw1234")).await?;
    let bearer = body["data"]["token"].as_str().expect("token").to_string();

    let (status, body) = send(
        &app,
        upsert(&bearer, &[("title", None, b"bike"), ("price", None, b"5000"), ("files", Some("a.jpg"), b"img")]),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    let item_id = body["data"]["item_id"].as_i64().expect("item_id");
    assert_eq!(items.images_of(item_id), vec!["https://img.test/a.jpg".to_string()]);

    let id_text = item_id.to_string();
    let (status, body) = send(
        &app,
        upsert(&bearer, &[("item_id", None, id_text.as_bytes()), ("title", None, b"red bike")]),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["item_id"], item_id);
    assert_eq!(items.draft(item_id).map(|d| d.title), Some("red bike".to_string()));
    Ok(())
}

#[tokio::test]
async fn editing_someone_elses_listing_is_404() -> Result<()> {
    let (users, items) = stores();
    items.seed(7, 99, draft("not yours"));
    let (app, _) = test_app_with_stores(users, items.clone())?;
    let (_, body) = send(&app, register("kim", "pw1234")).await?;
    let bearer = body["data"]["token"].as_str().expect("token").to_string();

    let (status, body) = send(&app, upsert(&bearer, &[("item_id", None, b"7"), ("title", None, b"mine now")])).await?;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(items.draft(7).map(|d| d.title), Some("not yours".to_string()));
    Ok(())
}
