//! End-to-end tests against a spawned server and a live Postgres.
//!
//! Run with: APP_DATABASE_URL=postgres://... cargo test -- --ignored


use serde_json::{json, Value};
use test_utils::{unique_phone, TestApp};

async fn create_skill(app: &TestApp, name: &str, category: &str) -> i32 {
    let response = app
        .client
        .post(app.url("/skills"))
        .json(&json!({"name": name, "category": category, "description": "test skill"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 201);
    response.json::<Value>().await.unwrap()["id"].as_i64().unwrap() as i32
}

async fn create_candidate(app: &TestApp, name: &str, phone: &str) -> i32 {
    let response = app
        .client
        .post(app.url("/candidates"))
        .json(&json!({"name": name, "phone": phone, "education": "BSc CS"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 201);
    response.json::<Value>().await.unwrap()["id"].as_i64().unwrap() as i32
}

#[tokio::test]
#[ignore = "requires a running Postgres (set APP_DATABASE_URL)"]
async fn end_to_end_link_and_category_filter() {
    let app = TestApp::spawn().await;

    let skill_id = create_skill(&app, "Docker", "DEVOPS").await;
    let candidate_id = create_candidate(&app, "Alice", &unique_phone()).await;

    let response = app
        .client
        .put(app.url(&format!("/candidates/{candidate_id}/skills/{skill_id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body = response.json::<Value>().await.unwrap();
    let skills = body["skills"].as_array().unwrap();
    assert!(skills.iter().any(|s| s["name"] == "Docker"));

    let response = app
        .client
        .get(app.url("/candidates?category=DEVOPS"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let list = response.json::<Value>().await.unwrap();
    assert!(list
        .as_array()
        .unwrap()
        .iter()
        .any(|c| c["id"].as_i64() == Some(candidate_id as i64)));
}

#[tokio::test]
#[ignore = "requires a running Postgres (set APP_DATABASE_URL)"]
async fn linking_twice_keeps_exactly_one_association_row() {
    let app = TestApp::spawn().await;

    let skill_id = create_skill(&app, "Kubernetes", "DEVOPS").await;
    let candidate_id = create_candidate(&app, "Bob", &unique_phone()).await;

    for _ in 0..2 {
        let response = app
            .client
            .put(app.url(&format!("/candidates/{candidate_id}/skills/{skill_id}")))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 200);
    }

    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM candidate_skills WHERE candidate_id = $1 AND skill_id = $2",
    )
    .bind(candidate_id)
    .bind(skill_id)
    .fetch_one(&app.db_pool)
    .await
    .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
#[ignore = "requires a running Postgres (set APP_DATABASE_URL)"]
async fn deleting_a_skill_cascades_association_rows() {
    let app = TestApp::spawn().await;

    let skill_id = create_skill(&app, "Terraform", "DEVOPS").await;
    let first = create_candidate(&app, "Carol", &unique_phone()).await;
    let second = create_candidate(&app, "Dave", &unique_phone()).await;

    for candidate_id in [first, second] {
        let response = app
            .client
            .put(app.url(&format!("/candidates/{candidate_id}/skills/{skill_id}")))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 200);
    }

    let response = app
        .client
        .delete(app.url(&format!("/skills/{skill_id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 204);

    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM candidate_skills WHERE skill_id = $1")
            .bind(skill_id)
            .fetch_one(&app.db_pool)
            .await
            .unwrap();
    assert_eq!(count, 0);

    let list = app
        .client
        .get(app.url("/candidates?category=DEVOPS"))
        .send()
        .await
        .unwrap()
        .json::<Value>()
        .await
        .unwrap();
    for candidate_id in [first, second] {
        assert!(!list
            .as_array()
            .unwrap()
            .iter()
            .any(|c| c["id"].as_i64() == Some(candidate_id as i64)));
    }
}

#[tokio::test]
#[ignore = "requires a running Postgres (set APP_DATABASE_URL)"]
async fn candidate_round_trip() {
    let app = TestApp::spawn().await;

    let phone = unique_phone();
    let candidate_id = create_candidate(&app, "Erin", &phone).await;

    let response = app
        .client
        .get(app.url(&format!("/candidates/{candidate_id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body = response.json::<Value>().await.unwrap();
    assert_eq!(body["name"], "Erin");
    assert_eq!(body["phone"], phone.as_str());
    assert_eq!(body["education"], "BSc CS");
    assert_eq!(body["skills"], json!([]));
}

#[tokio::test]
#[ignore = "requires a running Postgres (set APP_DATABASE_URL)"]
async fn validation_failures_answer_400_with_error_body() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .post(app.url("/candidates"))
        .json(&json!({"name": "Frank", "phone": "123", "education": "BSc CS"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    let body = response.json::<Value>().await.unwrap();
    assert_eq!(body["status"], 400);
    assert!(body["message"].as_str().unwrap().contains("Phone must be 8 digits"));

    let response = app
        .client
        .post(app.url("/candidates"))
        .json(&json!({"name": "  ", "phone": unique_phone(), "education": "BSc CS"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
#[ignore = "requires a running Postgres (set APP_DATABASE_URL)"]
async fn missing_rows_answer_404() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(app.url("/candidates/999999"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
    let body = response.json::<Value>().await.unwrap();
    assert_eq!(body["status"], 404);

    let response = app
        .client
        .put(app.url("/candidates/999999/skills/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
#[ignore = "requires a running Postgres (set APP_DATABASE_URL)"]
async fn invalid_category_filter_answers_400() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(app.url("/candidates?category=COOKING"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    let body = response.json::<Value>().await.unwrap();
    assert!(body["message"].as_str().unwrap().contains("Allowed values"));
}

#[tokio::test]
#[ignore = "requires a running Postgres (set APP_DATABASE_URL)"]
async fn duplicate_phone_answers_409() {
    let app = TestApp::spawn().await;

    let phone = unique_phone();
    create_candidate(&app, "Grace", &phone).await;

    let response = app
        .client
        .post(app.url("/candidates"))
        .json(&json!({"name": "Heidi", "phone": phone, "education": "MSc"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 409);
    let body = response.json::<Value>().await.unwrap();
    assert_eq!(body["status"], 409);
}

#[tokio::test]
#[ignore = "requires a running Postgres (set APP_DATABASE_URL)"]
async fn unlink_removes_the_pair_and_is_idempotent() {
    let app = TestApp::spawn().await;

    let skill_id = create_skill(&app, "Ansible", "DEVOPS").await;
    let candidate_id = create_candidate(&app, "Ivan", &unique_phone()).await;

    app.client
        .put(app.url(&format!("/candidates/{candidate_id}/skills/{skill_id}")))
        .send()
        .await
        .unwrap();

    for _ in 0..2 {
        let response = app
            .client
            .delete(app.url(&format!("/candidates/{candidate_id}/skills/{skill_id}")))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 200);
        let body = response.json::<Value>().await.unwrap();
        assert_eq!(body["skills"], json!([]));
    }
}

#[tokio::test]
#[ignore = "requires a running Postgres (set APP_DATABASE_URL)"]
async fn update_merges_only_provided_fields() {
    let app = TestApp::spawn().await;

    let phone = unique_phone();
    let candidate_id = create_candidate(&app, "Judy", &phone).await;

    let response = app
        .client
        .put(app.url(&format!("/candidates/{candidate_id}")))
        .json(&json!({"education": "PhD"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body = response.json::<Value>().await.unwrap();
    assert_eq!(body["name"], "Judy");
    assert_eq!(body["phone"], phone.as_str());
    assert_eq!(body["education"], "PhD");
}

#[tokio::test]
#[ignore = "requires a running Postgres (set APP_DATABASE_URL)"]
async fn create_with_skill_refs_skips_unresolvable_ids() {
    let app = TestApp::spawn().await;

    let skill_id = create_skill(&app, "Rust", "PROG_LANG").await;

    let response = app
        .client
        .post(app.url("/candidates"))
        .json(&json!({
            "name": "Mallory",
            "phone": unique_phone(),
            "education": "BSc CS",
            "skills": [{"id": skill_id}, {"id": 999999}]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 201);
    let body = response.json::<Value>().await.unwrap();
    let skills = body["skills"].as_array().unwrap();
    assert_eq!(skills.len(), 1);
    assert_eq!(skills[0]["name"], "Rust");
}
