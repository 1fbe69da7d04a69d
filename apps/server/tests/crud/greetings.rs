//! /api/greetings

use crate::support::{assert_status, json_body, to_json_body, with_test_app};
use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn greeting_lifecycle() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, _headers, body) = app
                .request(
                    Method::POST,
                    "/api/greetings",
                    Some(to_json_body(&json!({ "text": "Hello World!", "language": "en" }))?),
                )
                .await?;
            assert_status(status, StatusCode::CREATED, "create greeting");
            let created = json_body(&body)?;
            let id = created["id"].as_i64().expect("created greeting has an id");
            assert_eq!(
                created,
                json!({ "id": id, "text": "Hello World!", "language": "en" })
            );

            let (status, _headers, body) = app
                .request(
                    Method::PUT,
                    &format!("/api/greetings/{id}"),
                    Some(to_json_body(&json!({ "text": "Hallo Welt!", "language": "de" }))?),
                )
                .await?;
            assert_status(status, StatusCode::OK, "update greeting");
            assert_eq!(
                json_body(&body)?,
                json!({ "id": id, "text": "Hallo Welt!", "language": "de" })
            );

            let (status, _headers, _body) = app
                .request(Method::DELETE, &format!("/api/greetings/{id}"), None)
                .await?;
            assert_status(status, StatusCode::NO_CONTENT, "delete greeting");

            let (status, _headers, body) = app
                .request(Method::GET, &format!("/api/greetings/{id}"), None)
                .await?;
            assert_status(status, StatusCode::NOT_FOUND, "deleted greeting");
            assert!(body.is_empty());
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn greetings_and_countries_are_separate_collections() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            app.seed_country("Germany", "Berlin").await?;
            let greeting = app.seed_greeting("Hola Mundo!", "es").await?;
            assert_eq!(greeting, 1, "greetings number their ids independently");

            let (status, _headers, body) = app.request(Method::GET, "/api/greetings", None).await?;
            assert_status(status, StatusCode::OK, "list greetings");
            assert_eq!(
                json_body(&body)?,
                json!([{ "id": 1, "text": "Hola Mundo!", "language": "es" }])
            );
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn create_greeting_with_id_is_server_error() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, _headers, _body) = app
                .request(
                    Method::POST,
                    "/api/greetings",
                    Some(to_json_body(
                        &json!({ "id": 1, "text": "Hello World!", "language": "en" }),
                    )?),
                )
                .await?;
            assert_status(status, StatusCode::INTERNAL_SERVER_ERROR, "create greeting with id");
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn update_unknown_greeting_is_server_error() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            app.seed_greeting("Hello World!", "en").await?;

            let (status, _headers, body) = app
                .request(
                    Method::PUT,
                    "/api/greetings/99",
                    Some(to_json_body(&json!({ "text": "Hallo Welt!", "language": "de" }))?),
                )
                .await?;
            assert_status(status, StatusCode::INTERNAL_SERVER_ERROR, "update unknown greeting");
            assert_eq!(
                json_body(&body)?,
                json!({ "status": 500, "error": "Internal Server Error" })
            );

            let (status, _headers, _body) = app.request(Method::GET, "/api/greetings/99", None).await?;
            assert_status(status, StatusCode::NOT_FOUND, "update must not create");

            let (_status, _headers, body) = app.request(Method::GET, "/api/greetings/1", None).await?;
            assert_eq!(
                json_body(&body)?,
                json!({ "id": 1, "text": "Hello World!", "language": "en" })
            );
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn delete_unknown_greeting_is_no_content() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            app.seed_greeting("Hola Mundo!", "es").await?;

            let (status, _headers, body) = app.request(Method::DELETE, "/api/greetings/42", None).await?;
            assert_status(status, StatusCode::NO_CONTENT, "delete unknown greeting");
            assert!(body.is_empty());

            let (_status, _headers, body) = app.request(Method::GET, "/api/greetings", None).await?;
            assert_eq!(json_body(&body)?.as_array().map(Vec::len), Some(1));
            Ok(())
        })
    })
    .await
}
