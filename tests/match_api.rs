mod common;

use common::{TestApp, day, slots_body, spawn_app};
use reqwest::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

async fn body_of(response: reqwest::Response) -> Value {
    response.json().await.expect("Failed to parse response")
}

async fn list_matches(app: &TestApp, token: &str) -> reqwest::Response {
    app.client
        .get(format!("{}/api/matches", app.address))
        .bearer_auth(token)
        .send()
        .await
        .expect("Failed to execute request")
}

#[tokio::test]
async fn health_check_works() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(format!("{}/health-check", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_of(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "memory");
}

#[tokio::test]
async fn protected_routes_require_a_valid_token() {
    let app = spawn_app().await;
    let bob = app.create_user("bob").await;

    let missing = app
        .client
        .post(format!("{}/api/likes/{}", app.address, bob.id))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

    let garbage = app
        .client
        .get(format!("{}/api/matches", app.address))
        .bearer_auth("not-a-jwt")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);
    assert!(body_of(garbage).await["message"].is_string());

    let wrong_scheme = app
        .client
        .get(format!("{}/api/matches", app.address))
        .header("Authorization", format!("Basic {}", bob.token))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(wrong_scheme.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn like_match_and_schedule_flow() {
    let app = spawn_app().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;

    let first = app.like(&alice, bob.id).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let first = body_of(first).await;
    assert_eq!(first["isMatch"], json!(false));
    assert_eq!(first["matchId"], Value::Null);

    let second = app.like(&bob, alice.id).await;
    assert_eq!(second.status(), StatusCode::CREATED);
    let second = body_of(second).await;
    assert_eq!(second["isMatch"], json!(true));
    let match_id = Uuid::try_parse(second["matchId"].as_str().unwrap()).unwrap();

    assert_eq!(app.like(&alice, bob.id).await.status(), StatusCode::CONFLICT);

    let detail = body_of(app.match_detail(&alice, match_id).await).await;
    assert_eq!(detail["status"], "matched");
    assert_eq!(detail["matchedUserId"], json!(bob.id));

    let d2 = day(2);
    let pending = app
        .submit_availability(&alice, match_id, &slots_body(&[(&d2, "18:00", "21:00")]))
        .await;
    assert_eq!(pending.status(), StatusCode::OK);
    let pending = body_of(pending).await;
    assert_eq!(pending["status"], "availability_pending");
    assert_eq!(pending["scheduledSlot"], Value::Null);
    assert_eq!(pending["bothSubmitted"], json!(false));

    let bob_view = body_of(app.match_detail(&bob, match_id).await).await;
    assert_eq!(bob_view["myAvailabilitySubmitted"], json!(false));
    assert_eq!(bob_view["theirAvailabilitySubmitted"], json!(true));
    assert!(!bob_view.to_string().contains("18:00"));

    let scheduled = app
        .submit_availability(
            &bob,
            match_id,
            &slots_body(&[(&day(1), "12:00", "13:00"), (&d2, "19:30", "22:00")]),
        )
        .await;
    assert_eq!(scheduled.status(), StatusCode::OK);
    let scheduled = body_of(scheduled).await;
    assert_eq!(scheduled["status"], "scheduled");
    assert_eq!(scheduled["bothSubmitted"], json!(true));
    assert_eq!(
        scheduled["scheduledSlot"],
        json!({"date": d2, "startTime": "19:30", "endTime": "21:00"})
    );

    let listed = list_matches(&app, &alice.token).await;
    assert_eq!(listed.status(), StatusCode::OK);
    let listed = body_of(listed).await;
    let listed = listed.as_array().expect("array of matches");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], json!(match_id));
    assert_eq!(listed[0]["status"], "scheduled");
}

#[tokio::test]
async fn outsiders_cannot_see_or_touch_a_match() {
    let app = spawn_app().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    let carol = app.create_user("carol").await;
    let match_id = app.create_match(&alice, &bob).await;

    assert_eq!(
        app.match_detail(&carol, match_id).await.status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        app.submit_availability(&carol, match_id, &slots_body(&[(&day(1), "10:00", "11:00")]))
            .await
            .status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        app.match_detail(&alice, Uuid::new_v4()).await.status(),
        StatusCode::NOT_FOUND
    );

    let listed = body_of(list_matches(&app, &carol.token).await).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn malformed_ids_are_bad_requests() {
    let app = spawn_app().await;
    let alice = app.create_user("alice").await;

    let response = app
        .client
        .post(format!("{}/api/likes/not-a-uuid", app.address))
        .bearer_auth(&alice.token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_of(response).await["message"], "Invalid UUID format");

    let response = app
        .client
        .get(format!("{}/api/matches/12345", app.address))
        .bearer_auth(&alice.token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn liking_self_or_unknown_user_fails() {
    let app = spawn_app().await;
    let alice = app.create_user("alice").await;

    assert_eq!(app.like(&alice, alice.id).await.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        app.like(&alice, Uuid::new_v4()).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn bad_availability_payloads_are_rejected_without_saving() {
    let app = spawn_app().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    let match_id = app.create_match(&alice, &bob).await;

    let test_cases = vec![
        (json!({}), "missing slots"),
        (json!({"slots": []}), "empty slots"),
        (
            json!({"slots": [{"date": "2025/01/10", "startTime": "10:00", "endTime": "11:00"}]}),
            "bad date format",
        ),
        (
            json!({"slots": [{"date": day(1), "startTime": "9:00", "endTime": "11:00"}]}),
            "bad time format",
        ),
        (
            json!({"slots": [{"date": day(1), "startTime": "24:00", "endTime": "24:30"}]}),
            "hour out of range",
        ),
        (
            json!({"slots": [{"date": day(1), "startTime": "11:00", "endTime": "10:00"}]}),
            "end before start",
        ),
        (
            json!({"slots": [{"date": day(1), "startTime": "10:00", "endTime": "10:00"}]}),
            "zero length",
        ),
        (slots_body(&[(&day(-1), "10:00", "11:00")]), "in the past"),
        (slots_body(&[(&day(22), "10:00", "11:00")]), "beyond the horizon"),
        (
            slots_body(&[(&day(1), "10:00", "11:00"), (&day(40), "10:00", "11:00")]),
            "one bad slot in a good batch",
        ),
    ];

    for (body, description) in test_cases {
        let response = app.submit_availability(&alice, match_id, &body).await;
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "API did not reject payload: {description}"
        );
    }

    let not_json = app
        .client
        .post(format!("{}/api/matches/{match_id}/availability", app.address))
        .bearer_auth(&alice.token)
        .body("slots=tomorrow")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(not_json.status(), StatusCode::BAD_REQUEST);

    let detail = body_of(app.match_detail(&alice, match_id).await).await;
    assert_eq!(detail["status"], "matched");
    assert_eq!(detail["myAvailabilitySubmitted"], json!(false));
}

#[tokio::test]
async fn horizon_edge_is_accepted() {
    let app = spawn_app().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    let match_id = app.create_match(&alice, &bob).await;

    let response = app
        .submit_availability(
            &alice,
            match_id,
            &slots_body(&[(&day(0), "23:00", "23:59"), (&day(21), "00:00", "01:00")]),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unlike_is_idempotent() {
    let app = spawn_app().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;

    assert_eq!(app.like(&alice, bob.id).await.status(), StatusCode::CREATED);
    assert_eq!(app.unlike(&alice, bob.id).await.status(), StatusCode::NO_CONTENT);
    assert_eq!(app.unlike(&alice, bob.id).await.status(), StatusCode::NO_CONTENT);
    assert_eq!(app.like(&alice, bob.id).await.status(), StatusCode::CREATED);
}
