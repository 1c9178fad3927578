use anyhow::Result;
use axum::http::StatusCode;
use marquee_core::api::routes::{utils::replace_param, v1};
use serde_json::{Value, json};
use sqlx::PgPool;

#[path = "support/mod.rs"]
mod support;
use support::{FORWARDED_FOR, build_postgres_test_server};

#[sqlx::test(
    migrator = "marquee_core::MIGRATOR",
    fixtures(path = "../../marquee-core/fixtures", scripts("catalog"))
)]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn ratings_flow_through_the_aggregate(pool: PgPool) -> Result<()> {
    let server = build_postgres_test_server(pool.clone())?;

    for (client, star) in [("203.0.113.1", 3), ("203.0.113.2", 4), ("203.0.113.3", 5)] {
        server
            .post(v1::ratings::COLLECTION)
            .add_header(FORWARDED_FOR, client)
            .json(&json!({"star": star, "movie": 1}))
            .await
            .assert_status(StatusCode::CREATED);
    }
    server
        .post(v1::ratings::COLLECTION)
        .add_header(FORWARDED_FOR, "203.0.113.3")
        .json(&json!({"star": 5, "movie": 1}))
        .await
        .assert_status(StatusCode::CREATED);

    let stored: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ratings WHERE movie_id = 1")
        .fetch_one(&pool)
        .await?;
    assert_eq!(stored, 3);

    let response = server
        .get(v1::movies::COLLECTION)
        .add_header(FORWARDED_FOR, "203.0.113.2")
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["count"], 2);
    assert_eq!(body["data"]["results"][0]["middle_star"], 4);
    assert_eq!(body["data"]["results"][0]["rating_user"], true);
    assert_eq!(body["data"]["results"][1]["middle_star"], Value::Null);
    Ok(())
}

#[sqlx::test(
    migrator = "marquee_core::MIGRATOR",
    fixtures(path = "../../marquee-core/fixtures", scripts("catalog", "reviews"))
)]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn detail_serves_threads_and_hides_drafts(pool: PgPool) -> Result<()> {
    let server = build_postgres_test_server(pool)?;

    let response = server
        .get(&replace_param(v1::movies::ITEM, "{id}", "1"))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    let reviews = body["data"]["reviews"].as_array().expect("reviews array");
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0]["name"], "R");
    assert_eq!(reviews[0]["children"][0]["children"][0]["name"], "C1a");
    assert_eq!(reviews[0]["children"][1]["name"], "C2");

    server
        .get(&replace_param(v1::movies::ITEM, "{id}", "3"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    Ok(())
}

#[sqlx::test(
    migrator = "marquee_core::MIGRATOR",
    fixtures(path = "../../marquee-core/fixtures", scripts("catalog"))
)]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn review_for_missing_movie_is_rejected(pool: PgPool) -> Result<()> {
    let server = build_postgres_test_server(pool.clone())?;

    let response = server
        .post(v1::reviews::COLLECTION)
        .json(&json!({
            "name": "Ghost",
            "email": "ghost@example.com",
            "text": "Nobody will read this",
            "movie": 42
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"]["fields"]["movie"].is_array());

    let stored: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews")
        .fetch_one(&pool)
        .await?;
    assert_eq!(stored, 0);
    Ok(())
}
