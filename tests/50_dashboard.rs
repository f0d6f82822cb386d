mod common;

// The test harness pins the server clock to 2025-11-04 via FITHUB_TODAY, so
// "today" is deterministic here.

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

const TODAY: &str = "2025-11-04";

async fn dashboard(
    client: &reqwest::Client,
    server: &common::TestServer,
    token: &str,
) -> Result<Value> {
    let res = client
        .get(format!("{}/api/dashboard", server.base_url))
        .bearer_auth(token)
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "dashboard: {}", res.status());
    Ok(res.json::<Value>().await?)
}

#[tokio::test]
async fn totals_calories_from_todays_log() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let client = reqwest::Client::new();
    let token = common::authenticated_user(&client, &server, "user1").await?;

    let res = client
        .post(format!("{}/api/dietlogs", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "date": TODAY }))
        .send()
        .await?;
    let log_id = res.json::<Value>().await?["data"]["id"].as_i64().unwrap();

    let res = client
        .post(format!("{}/api/fooditems", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "diet_log_id": log_id, "name": "Apple", "calories": 95, "meal_type": "Snacks" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = dashboard(&client, &server, &token).await?;
    assert_eq!(body["data"]["total_calories"], 95);
    assert_eq!(body["data"]["date"], TODAY);
    Ok(())
}

#[tokio::test]
async fn no_log_today_yields_zero_total() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let client = reqwest::Client::new();
    let token = common::authenticated_user(&client, &server, "user1").await?;

    let body = dashboard(&client, &server, &token).await?;
    assert_eq!(body["data"]["total_calories"], 0);
    assert!(body["data"]["sets"].as_array().unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn shows_only_todays_sets() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let client = reqwest::Client::new();
    let token = common::authenticated_user(&client, &server, "user1").await?;

    let res = client
        .post(format!("{}/api/exercises", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "name": "Squat", "muscle_group": "Legs" }))
        .send()
        .await?;
    let exercise_id = res.json::<Value>().await?["data"]["id"].as_i64().unwrap();

    for (date, reps) in [(TODAY, 8), ("2025-11-03", 10)] {
        let res = client
            .post(format!("{}/api/sets", server.base_url))
            .bearer_auth(&token)
            .json(&json!({ "exercise_id": exercise_id, "date": date, "reps": reps, "weight": 225 }))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let body = dashboard(&client, &server, &token).await?;
    let sets = body["data"]["sets"].as_array().unwrap();
    assert_eq!(sets.len(), 1);
    assert_eq!(sets[0]["exercise_name"], "Squat");
    assert_eq!(sets[0]["reps"], 8);
    Ok(())
}

#[tokio::test]
async fn dashboard_is_scoped_to_the_caller() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let client = reqwest::Client::new();
    let token1 = common::authenticated_user(&client, &server, "user1").await?;
    let token2 = common::authenticated_user(&client, &server, "user2").await?;

    let res = client
        .post(format!("{}/api/dietlogs", server.base_url))
        .bearer_auth(&token1)
        .json(&json!({ "date": TODAY }))
        .send()
        .await?;
    let log_id = res.json::<Value>().await?["data"]["id"].as_i64().unwrap();

    client
        .post(format!("{}/api/fooditems", server.base_url))
        .bearer_auth(&token1)
        .json(&json!({ "diet_log_id": log_id, "name": "Burger", "calories": 800, "meal_type": "Dinner" }))
        .send()
        .await?;

    let body = dashboard(&client, &server, &token2).await?;
    assert_eq!(body["data"]["total_calories"], 0);
    Ok(())
}
