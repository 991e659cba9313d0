mod common;

use axum::http::StatusCode;
use classgate_core::models::attendance::ParticipantRole;
use classgate_gate::GateState;
use common::*;
use pretty_assertions::assert_eq;
use serde_json::Value;

#[tokio::test]
async fn teacher_link_redirects_to_the_class_room() {
    let ctx = context(None).await;

    let response = signed_in(
        ctx.server
            .post("/api/class-session/teacher-access")
            .add_query_param("scheduleId", ctx.schedule.id),
        &ctx.teacher,
    )
    .await;

    response.assert_status_ok();
    let state: GateState = response.json();
    let GateState::Redirecting { handoff } = state else {
        panic!("expected a redirect, got {state:?}");
    };
    assert_eq!(handoff.role, ParticipantRole::Teacher);
    assert_eq!(handoff.room_name, "classgate-2025-a-physics");
    assert!(handoff.url.starts_with("https://meet.example.org/classgate-2025-a-physics#"));
    assert_eq!(ctx.store.attendance().await.len(), 1);
}

#[tokio::test]
async fn student_waits_until_teacher_has_joined() {
    let ctx = context(None).await;
    let student_path = format!("/api/class-session/{}", ctx.enrollment.id);

    let waiting = signed_in(ctx.server.post(&student_path), &ctx.student).await;
    let body: Value = waiting.json();
    assert_eq!(body["state"], "waiting_for_teacher");
    assert!(ctx.store.attendance().await.is_empty());

    signed_in(
        ctx.server
            .post("/api/class-session/teacher-access")
            .add_query_param("scheduleId", ctx.schedule.id),
        &ctx.teacher,
    )
    .await
    .assert_status_ok();

    let admitted = signed_in(ctx.server.post(&student_path), &ctx.student).await;
    let body: Value = admitted.json();
    assert_eq!(body["state"], "redirecting");
    assert_eq!(body["handoff"]["role"], "student");
    assert_eq!(body["handoff"]["room_name"], "classgate-2025-a-physics");
    assert_eq!(ctx.store.attendance().await.len(), 2);
}

#[tokio::test]
async fn foreign_enrollment_is_denied() {
    let ctx = context(None).await;
    let intruder = caller("Ravi");

    let response = signed_in(
        ctx.server.post(&format!("/api/class-session/{}", ctx.enrollment.id)),
        &intruder,
    )
    .await;

    response.assert_status_ok();
    let state: GateState = response.json();
    assert_eq!(
        state,
        GateState::Error {
            reason: "This class link belongs to another student".to_string()
        }
    );
}

#[tokio::test]
async fn malformed_link_is_denied() {
    let ctx = context(None).await;

    let response = signed_in(ctx.server.post("/api/class-session/not-a-link"), &ctx.student).await;

    let body: Value = response.json();
    assert_eq!(body["state"], "error");
}

#[tokio::test]
async fn missing_identity_is_unauthorized() {
    let ctx = context(None).await;

    let response = ctx
        .server
        .post(&format!("/api/class-session/{}", ctx.enrollment.id))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(
        body["error"],
        "Authentication error: Missing x-user-id header"
    );
}

#[tokio::test]
async fn garbled_user_id_is_unauthorized() {
    let ctx = context(None).await;

    let response = ctx
        .server
        .post(&format!("/api/class-session/{}", ctx.enrollment.id))
        .add_header(
            axum::http::HeaderName::from_static("x-user-id"),
            axum::http::HeaderValue::from_static("42"),
        )
        .add_header(
            axum::http::HeaderName::from_static("x-user-name"),
            axum::http::HeaderValue::from_static("Asha"),
        )
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}
