//! Court service HTTP tests

mod common;

use axum::http::StatusCode;
use common::{admin_token, get_json, post_json, put_json, send, test_app, user_token};
use serde_json::json;
use uprava_core::server::ServiceKind;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

fn driving_ban_body(subject: &str) -> serde_json::Value {
    json!({
        "data": {
            "id": "ban-1",
            "reason": "License suspension",
            "duration": "2025-06-01T00:00:00",
            "subject": subject,
            "issued_at": "2025-01-01T00:00:00"
        }
    })
}

#[tokio::test]
async fn test_person_hearing_reschedule_rules() {
    let (app, _peers) = test_app(ServiceKind::Court).await;
    let admin = admin_token();

    let (status, body) = post_json(
        &app,
        "/hearings/person",
        &admin,
        json!({
            "reason": "speeding",
            "date_time": "2025-01-10T09:00:00",
            "subject": "p-1"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["kind"], "person");
    assert_eq!(body["data"]["court"], "Misdemeanor Court Novi Sad");
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = put_json(
        &app,
        &format!("/hearings/{}/reschedule", id),
        &admin,
        json!({"date_time": "2025-01-09T09:00:00"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Court hearing can't be rescheduled before set date and time"
    );

    let (status, body) = put_json(
        &app,
        &format!("/hearings/{}/reschedule", id),
        &admin,
        json!({"date_time": "2025-01-11T09:00:00"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["date_time"], "2025-01-11T09:00:00");

    let (status, body) = get_json(&app, &format!("/hearings/{}", id), &admin).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["date_time"], "2025-01-11T09:00:00");
}

#[tokio::test]
async fn test_legal_entity_hearing_rejects_bad_timestamp() {
    let (app, _peers) = test_app(ServiceKind::Court).await;

    let (status, body) = post_json(
        &app,
        "/hearings/legal-entity",
        &admin_token(),
        json!({
            "reason": "unpaid fines",
            "date_time": "10.01.2025 09:00",
            "subject": "le-1"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_unknown_hearing_is_not_found() {
    let (app, _peers) = test_app(ServiceKind::Court).await;

    let (status, body) = get_json(&app, "/hearings/missing", &admin_token()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_suspension_issues_driving_ban() {
    let (app, peers) = test_app(ServiceKind::Court).await;
    let admin = admin_token();

    Mock::given(method("POST"))
        .and(path("/driving-ban"))
        .and(header("Authorization", format!("Bearer {}", admin).as_str()))
        .and(body_partial_json(json!({
            "reason": "License suspension",
            "duration": "2025-06-01T00:00:00",
            "subject": "p-1"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(driving_ban_body("p-1")))
        .expect(1)
        .mount(&peers)
        .await;

    let (status, body) = post_json(
        &app,
        "/suspensions",
        &admin,
        json!({
            "from": "2025-01-01T00:00:00",
            "to": "2025-06-01T00:00:00",
            "subject": "p-1"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["driving_ban"]["id"], "ban-1");

    let id = body["data"]["suspension"]["id"].as_str().unwrap();
    let (status, body) = get_json(&app, &format!("/suspensions/{}", id), &admin).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["to"], "2025-06-01T00:00:00");
}

#[tokio::test]
async fn test_suspension_kept_when_ban_cascade_fails() {
    let (app, peers) = test_app(ServiceKind::Court).await;
    let admin = admin_token();

    Mock::given(method("POST"))
        .and(path("/driving-ban"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&peers)
        .await;

    let (status, body) = post_json(
        &app,
        "/suspensions",
        &admin,
        json!({
            "from": "2025-01-01T00:00:00",
            "to": "2025-06-01T00:00:00",
            "subject": "p-1"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "cascade_failed");

    let id = body["details"]["suspension_id"].as_str().unwrap();
    let (status, _) = get_json(&app, &format!("/suspensions/{}", id), &admin).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_crime_report_schedules_hearing() {
    let (app, peers) = test_app(ServiceKind::Court).await;
    let admin = admin_token();

    Mock::given(method("GET"))
        .and(path("/user/p-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "id": "p-1",
                "first_name": "Ana",
                "last_name": "Petrovic",
                "email": "ana@example.com"
            }
        })))
        .expect(1)
        .mount(&peers)
        .await;

    let (status, body) = post_json(
        &app,
        "/crime-report",
        &admin,
        json!({
            "id": "v-1",
            "reason": "drunk driving: 0.50",
            "description": "",
            "time": "2025-03-05T23:10:00",
            "location": "Novi Sad",
            "violator": "p-1"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let hearing_id = body["data"]["hearing_id"].as_str().unwrap();
    let (status, body) = get_json(&app, &format!("/hearings/{}", hearing_id), &admin).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["subject"], "p-1");
    assert_eq!(body["data"]["violation"], "v-1");
}

#[tokio::test]
async fn test_warrants_readable_by_users_but_issued_by_admins() {
    let (app, _peers) = test_app(ServiceKind::Court).await;
    let user = user_token("p-1");

    let (status, _) = post_json(
        &app,
        "/warrants",
        &user,
        json!({"traffic_violation": "v-1", "issued_for": "p-1"}),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = post_json(
        &app,
        "/warrants",
        &admin_token(),
        json!({"traffic_violation": "v-1", "issued_for": "p-1"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = get_json(&app, "/warrants/p-1", &user).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["traffic_violation"], "v-1");
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let (app, _peers) = test_app(ServiceKind::Court).await;

    let (status, _) = send(
        &app,
        axum::http::Method::GET,
        "/warrants/p-1",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
