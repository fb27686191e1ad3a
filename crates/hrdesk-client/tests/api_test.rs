//! Client tests against an in-process fake of the HR server

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use hrdesk_client::{ApiError, ClientConfig, HrClient};
use hrdesk_reconciler::{SkillReconciler, SkillStore, StoreError};
use hrdesk_types::{
    EmployeeDraft, MemberRequest, MemberRoleUpdate, SkillAssignment, SkillCatalogEntry,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Fake {
    skills: Arc<Mutex<Vec<Value>>>,
    echo_on_save: bool,
}

async fn start(fake: Fake) -> HrClient {
    let app = Router::new()
        .route("/employees", post(create_employee))
        .route("/employees/:id/skills", get(get_skills).put(put_skills))
        .route("/employees/:id/upload-resume", post(upload_resume))
        .route("/skills", get(search_skills))
        .route("/api/projects/:id/members", post(add_member))
        .route(
            "/api/projects/:id/members/:member",
            axum::routing::put(update_member).delete(remove_member),
        )
        .route("/api/me", get(me))
        .with_state(fake);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind free port");
    let addr = listener.local_addr().expect("local_addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    HrClient::new(&ClientConfig::with_base_url(format!("http://{addr}"))).expect("client")
}

async fn create_employee(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["firstname"].as_str().unwrap_or("").is_empty() {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "First name required"})));
    }
    (StatusCode::CREATED, Json(json!({"id": "31"})))
}

async fn get_skills(State(fake): State<Fake>, Path(_id): Path<i64>) -> Json<Value> {
    let skills = fake.skills.lock().expect("lock").clone();
    Json(json!({ "skills": skills }))
}

async fn put_skills(
    State(fake): State<Fake>,
    Path(_id): Path<i64>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut stored = Vec::new();
    for (i, skill) in body["skills"].as_array().cloned().unwrap_or_default().into_iter().enumerate() {
        if skill["skillName"].as_str().unwrap_or("").is_empty() {
            return (StatusCode::BAD_REQUEST, Json(json!({"error": "Skill name missing"})));
        }
        let mut skill = skill;
        if skill["skillID"].is_null() {
            skill["skillID"] = json!(1000 + i);
        }
        stored.push(skill);
    }
    *fake.skills.lock().expect("lock") = stored.clone();

    if fake.echo_on_save {
        (StatusCode::OK, Json(json!({ "success": true, "skills": stored })))
    } else {
        (StatusCode::OK, Json(json!({ "success": true })))
    }
}

async fn upload_resume(Path(_id): Path<i64>, mut multipart: Multipart) -> Json<Value> {
    let mut seen = None;
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.unwrap_or_default();
        seen = Some((name, file, bytes.len()));
    }
    match seen {
        Some((name, file, len)) if name == "resume" && file == "cv.pdf" && len > 0 => Json(json!({
            "success": true,
            "skills": [
                {"skillID": 5, "skillName": "Kubernetes", "level": 6, "evidence": "Ran clusters"},
                {"skillID": 9, "skillName": "Go"}
            ]
        })),
        _ => Json(json!({"success": false, "error": "No resume uploaded"})),
    }
}

async fn search_skills(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    Json(json!([{
        "skillID": 1,
        "skillName": format!("q={} dep={}",
            params.get("q").cloned().unwrap_or_default(),
            params.get("department").cloned().unwrap_or_default()),
        "skillCategoryname": "Echo"
    }]))
}

async fn add_member(Path(_id): Path<i64>, Json(body): Json<Value>) -> Json<Value> {
    if body["nameOrID"] == "ghost" {
        Json(json!({"success": false, "error": "Employee not found"}))
    } else {
        Json(json!({"success": true, "message": "Member added"}))
    }
}

async fn update_member(
    Path((id, member)): Path<(i64, String)>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let role = body["role"].as_str().unwrap_or("");
    Json(json!({"success": true, "message": format!("{id}:{member}:{role}")}))
}

async fn remove_member(Path((id, member)): Path<(i64, String)>) -> Json<Value> {
    Json(json!({"success": true, "message": format!("{id}:{member}")}))
}

async fn me() -> Json<Value> {
    Json(json!({"success": false}))
}

fn custom(name: &str, level: u8) -> SkillAssignment {
    SkillAssignment {
        skill_id: None,
        skill_name: name.into(),
        category_name: "Custom".into(),
        proficiency_level: level,
        evidence: String::new(),
    }
}

#[tokio::test]
async fn test_replace_skills_rereads_when_not_echoed() {
    let client = start(Fake::default()).await;

    let saved = client
        .replace_employee_skills(3, &[custom("Knitting", 4)])
        .await
        .expect("save");

    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].skill_id, Some(1000));
    assert_eq!(saved[0].proficiency_level, 4);
}

#[tokio::test]
async fn test_replace_skills_uses_echo() {
    let client = start(Fake {
        echo_on_save: true,
        ..Fake::default()
    })
    .await;

    let saved = client
        .replace_employee_skills(3, &[custom("Knitting", 2), custom("Origami", 8)])
        .await
        .expect("save");
    assert_eq!(saved.iter().filter_map(|s| s.skill_id).collect::<Vec<_>>(), vec![1000, 1001]);
}

#[tokio::test]
async fn test_rejected_save_carries_server_message() {
    let client = start(Fake::default()).await;

    let err = client
        .replace_employee_skills(3, &[custom("", 1)])
        .await
        .expect_err("empty name is rejected");

    match err {
        ApiError::Status { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Skill name missing");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn test_store_error_mapping_through_reconciler() {
    let client = start(Fake::default()).await;
    let mut reconciler = SkillReconciler::new(
        vec![SkillCatalogEntry::new(1, "Rust", "Languages")],
        vec![custom("", 0)],
    );

    let err = client
        .replace_skills(3, &reconciler.assignments())
        .await
        .expect_err("rejected");
    assert!(matches!(err, StoreError::Rejected { status: 400, .. }));

    let before = reconciler.assignments();
    assert!(reconciler.save(&client, 3).await.is_err());
    assert_eq!(reconciler.assignments(), before);

    let row = reconciler.row_id_at(0).expect("row");
    reconciler.set_row_name(row, "rust");
    let count = reconciler.save(&client, 3).await.expect("save");
    assert_eq!(count, 1);
    assert_eq!(reconciler.rows()[0].assignment.skill_id, Some(1));
}

#[tokio::test]
async fn test_create_employee_parses_string_id() {
    let client = start(Fake::default()).await;
    let draft = EmployeeDraft {
        firstname: "Ada".into(),
        lastname: "Lovelace".into(),
        department: "1".into(),
        ..EmployeeDraft::default()
    };
    assert_eq!(client.create_employee(&draft).await.expect("create"), 31);

    let err = client
        .create_employee(&EmployeeDraft::default())
        .await
        .expect_err("invalid");
    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn test_upload_resume_multipart() {
    let client = start(Fake::default()).await;
    let skills = client
        .upload_resume(3, "cv.pdf", b"%PDF-1.4 resume".to_vec())
        .await
        .expect("upload");

    assert_eq!(skills.len(), 2);
    assert_eq!(skills[0].level, Some(6));
    assert_eq!(skills[1].level, None);

    let err = client
        .upload_resume(3, "other.pdf", b"x".to_vec())
        .await
        .expect_err("wrong file");
    assert!(matches!(err, ApiError::Server(msg) if msg == "No resume uploaded"));
}

#[tokio::test]
async fn test_search_skills_sends_only_given_params() {
    let client = start(Fake::default()).await;
    let hits = client.search_skills(Some(" rus "), Some(4)).await.expect("search");
    assert_eq!(hits[0].skill_name, "q=rus dep=4");

    let hits = client.search_skills(None, None).await.expect("search");
    assert_eq!(hits[0].skill_name, "q= dep=");
}

#[tokio::test]
async fn test_business_failures_are_errors() {
    let client = start(Fake::default()).await;

    let ok = client
        .add_project_member(
            1,
            &MemberRequest {
                name_or_id: "42".into(),
                role: "Lead".into(),
            },
        )
        .await
        .expect("added");
    assert_eq!(ok.display_text(), "Member added");

    let err = client
        .add_project_member(
            1,
            &MemberRequest {
                name_or_id: "ghost".into(),
                role: "Lead".into(),
            },
        )
        .await
        .expect_err("unknown member");
    assert!(matches!(err, ApiError::Server(msg) if msg == "Employee not found"));

    assert!(matches!(client.me().await, Err(ApiError::Server(_))));
}

#[tokio::test]
async fn test_member_reference_travels_as_one_segment() {
    let client = start(Fake::default()).await;

    let updated = client
        .update_project_member(
            3,
            " Ada Lovelace ",
            &MemberRoleUpdate {
                role: "Lead".into(),
            },
        )
        .await
        .expect("updated");
    assert_eq!(updated.display_text(), "3:Ada Lovelace:Lead");

    let removed = client.remove_project_member(3, "a/b?c#d").await.expect("removed");
    assert_eq!(removed.display_text(), "3:a/b?c#d");

    let removed = client.remove_project_member(3, "42").await.expect("removed");
    assert_eq!(removed.display_text(), "3:42");
}

#[tokio::test]
async fn test_network_failure() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = HrClient::new(&ClientConfig::with_base_url(format!("http://{addr}"))).expect("client");
    assert!(matches!(client.employee_skills(1).await, Err(ApiError::Network(_))));
}
