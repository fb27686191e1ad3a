//! Editor flows against an in-process fake of the HR server

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use hrdesk_client::{ApiError, ClientConfig, HrClient};
use hrdesk_editors::{
    CatalogEditor, EditorError, EditorMode, EmployeeDirectory, EmployeeEditor, ProjectPanel,
    SkillsDashboard, ValidationError,
};
use hrdesk_persistence::LocalStore;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Fake {
    skills: Arc<Mutex<Vec<Value>>>,
    catalog: Arc<Mutex<Vec<Value>>>,
    members: Arc<Mutex<Vec<Value>>>,
}

async fn start(fake: Fake) -> HrClient {
    let app = Router::new()
        .route("/departments", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
        .route("/employees", get(list_employees).post(create_employee))
        .route("/employees/:id", get(get_employee).put(update_employee))
        .route("/employees/:id/skills", get(get_skills).put(put_skills))
        .route("/employees/:id/projects", get(employee_projects))
        .route("/employees/:id/upload-resume", post(upload_resume))
        .route("/skills", get(search_skills))
        .route("/api/me", get(me))
        .route("/api/skill-categories", get(categories))
        .route(
            "/api/manager/:id/skills",
            get(manager_skills).post(add_manager_skill),
        )
        .route("/api/projects", get(projects))
        .route(
            "/api/projects/:id/skills",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        )
        .route("/api/projects/:id/members", post(add_member))
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

fn ada() -> Value {
    json!({
        "empID": 7,
        "firstname": "Ada",
        "lastname": "Lovelace",
        "title": "Analyst",
        "department": 2,
        "departmentname": "Finance",
        "email": "ada@hr.io"
    })
}

async fn list_employees() -> Json<Value> {
    Json(json!([ada(), {"firstname": "No", "lastname": "Id"}]))
}

async fn get_employee(Path(id): Path<i64>) -> (StatusCode, Json<Value>) {
    if id == 7 {
        (StatusCode::OK, Json(ada()))
    } else {
        (StatusCode::NOT_FOUND, Json(json!({"error": "Employee not found"})))
    }
}

async fn create_employee(Json(_body): Json<Value>) -> (StatusCode, Json<Value>) {
    (StatusCode::CREATED, Json(json!({"id": 77})))
}

async fn update_employee(Path(_id): Path<i64>, Json(_body): Json<Value>) -> Json<Value> {
    Json(json!({"success": true}))
}

async fn get_skills(State(fake): State<Fake>, Path(_id): Path<i64>) -> Json<Value> {
    let skills = fake.skills.lock().expect("lock").clone();
    Json(json!({ "skills": skills }))
}

async fn put_skills(
    State(fake): State<Fake>,
    Path(_id): Path<i64>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let skills = body["skills"].as_array().cloned().unwrap_or_default();
    *fake.skills.lock().expect("lock") = skills;
    Json(json!({"success": true}))
}

async fn employee_projects(Path(_id): Path<i64>) -> Json<Value> {
    Json(json!([
        {"projectID": 1, "projectName": "Atlas", "status": "In Progress", "startDate": "2024-01-01"},
        {"projectID": 2, "projectName": "Borealis", "status": "Completed",
         "startDate": "2023-01-01", "endDate": "2023-01-31"}
    ]))
}

async fn upload_resume(Path(_id): Path<i64>) -> Json<Value> {
    Json(json!({
        "success": true,
        "skills": [
            {"skillID": 1, "skillName": "Rust", "level": 9, "evidence": "Shipped a compiler"},
            {"skillID": 2, "skillName": "SQL"}
        ]
    }))
}

async fn search_skills() -> Json<Value> {
    Json(json!([
        {"skillID": 1, "skillName": "Rust", "skillCategoryname": "Languages"},
        {"skillID": 2, "skillName": "SQL", "skillCategoryname": "Data"}
    ]))
}

async fn me() -> Json<Value> {
    Json(json!({"success": true, "manager_id": 4, "manager_name": "Mina"}))
}

async fn categories() -> Json<Value> {
    Json(json!({"categories": [
        {"skillCategoryID": 10, "skillCategoryName": "Languages"}
    ]}))
}

async fn manager_skills(State(fake): State<Fake>, Path(_id): Path<i64>) -> Json<Value> {
    let skills = fake.catalog.lock().expect("lock").clone();
    Json(json!({ "skills": skills }))
}

async fn add_manager_skill(
    State(fake): State<Fake>,
    Path(_id): Path<i64>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut catalog = fake.catalog.lock().expect("lock");
    let name = body["skillName"].as_str().unwrap_or_default().to_string();
    if catalog.iter().any(|s| s["skillName"] == name.as_str()) {
        return (StatusCode::CONFLICT, Json(json!({"error": "Skill already exists"})));
    }
    let id = catalog.len() + 1;
    catalog.push(json!({
        "skillID": id,
        "skillName": name,
        "skillCategoryID": body["skillCategoryID"]
    }));
    (StatusCode::CREATED, Json(json!({"success": true})))
}

async fn projects(State(fake): State<Fake>) -> Json<Value> {
    let members = fake.members.lock().expect("lock").clone();
    Json(json!({"projects": [
        {"projectID": 1, "projectName": "Atlas", "status": "In Progress", "members": members}
    ]}))
}

async fn add_member(
    State(fake): State<Fake>,
    Path(_id): Path<i64>,
    Json(body): Json<Value>,
) -> Json<Value> {
    if body["nameOrID"] != "7" {
        return Json(json!({"success": false, "error": "Employee not found"}));
    }
    fake.members.lock().expect("lock").push(json!({
        "empID": 7,
        "fullName": "Ada Lovelace",
        "role": body["role"]
    }));
    Json(json!({"success": true, "message": "Ada Lovelace added to Atlas"}))
}

#[tokio::test]
async fn test_employee_editor_create_then_view() {
    let client = start(Fake::default()).await;

    let mut editor = EmployeeEditor::open(&client, None).await.expect("open");
    assert_eq!(editor.mode(), EditorMode::Create);
    assert_eq!(editor.departments().len(), 3);

    let form = editor.form_mut().expect("create form is enabled");
    form.firstname = " Grace ".into();
    form.lastname = "Hopper".into();
    form.phone = "555 1234".into();
    form.department = "1".into();
    assert!(matches!(
        editor.submit(&client).await,
        Err(EditorError::Validation(ValidationError::InvalidPhone))
    ));

    editor.form_mut().expect("still enabled").phone = "(555) 123-4567".into();
    let id = editor.submit(&client).await.expect("submit");
    assert_eq!(id, 77);
    assert_eq!(editor.mode(), EditorMode::View);
    assert_eq!(editor.form().firstname, "Grace");
}

#[tokio::test]
async fn test_employee_editor_requires_edit_mode() {
    let client = start(Fake::default()).await;

    let mut editor = EmployeeEditor::open(&client, Some(7)).await.expect("open");
    assert_eq!(editor.mode(), EditorMode::View);
    assert!(matches!(editor.submit(&client).await, Err(EditorError::ReadOnly)));

    assert!(editor.begin_edit());
    editor.form_mut().expect("enabled").title = "Countess".into();
    assert_eq!(editor.submit(&client).await.expect("update"), 7);

    assert!(matches!(
        EmployeeEditor::open(&client, Some(8)).await,
        Err(EditorError::Api(_))
    ));
}

#[tokio::test]
async fn test_catalog_editor_reloads_after_add() {
    let client = start(Fake::default()).await;

    let mut editor = CatalogEditor::for_session(&client).await.expect("load");
    assert_eq!(editor.manager_id(), 4);
    assert!(editor.clear_filter().is_empty());

    editor.add(&client, " Rust ", 10).await.expect("add");
    assert_eq!(editor.filter("languages").len(), 1);

    let err = editor.add(&client, "Rust", 10).await.expect_err("duplicate");
    assert!(matches!(
        err,
        EditorError::Api(ApiError::Status { status: 409, ref message }) if message == "Skill already exists"
    ));
    assert!(matches!(
        editor.add(&client, "  ", 10).await,
        Err(EditorError::Validation(ValidationError::MissingSkillName))
    ));
    assert_eq!(editor.clear_filter().len(), 1);
}

#[tokio::test]
async fn test_project_panel_member_flow() {
    let client = start(Fake::default()).await;

    let mut panel = ProjectPanel::load(&client, 1).await.expect("load");
    assert!(panel.members().is_empty());
    assert!(panel.skills().is_empty());

    let message = panel.add_member(&client, " 7 ", "").await.expect("add");
    assert_eq!(message, "Ada Lovelace added to Atlas");
    assert_eq!(panel.members().len(), 1);
    assert_eq!(panel.members()[0].role_or_default(), "Contributor");

    let err = panel.add_member(&client, "ghost", "Lead").await.expect_err("unknown");
    assert!(matches!(err, EditorError::Api(ApiError::Server(ref m)) if m == "Employee not found"));
    assert_eq!(panel.members().len(), 1);

    assert!(matches!(
        ProjectPanel::load(&client, 99).await,
        Err(EditorError::Api(_))
    ));
}

#[tokio::test]
async fn test_skills_dashboard_resume_merge_and_save() {
    let fake = Fake::default();
    *fake.skills.lock().expect("lock") = vec![json!({
        "skillID": 1,
        "skillName": "Rust",
        "skillCategoryname": "Languages",
        "profiencylevel": 5,
        "evidence": "Side projects"
    })];
    let client = start(fake.clone()).await;

    let mut dashboard = SkillsDashboard::load(&client, 7).await.expect("load");
    assert_eq!(dashboard.employee().display_name(), "Ada Lovelace");
    assert_eq!(dashboard.skills().len(), 1);

    let counts = dashboard
        .import_resume(&client, "cv.pdf", b"resume".to_vec())
        .await
        .expect("import");
    assert_eq!((counts.added, counts.updated), (1, 1));
    assert_eq!(fake.skills.lock().expect("lock").len(), 1);

    let rows = dashboard.skills().rows();
    assert_eq!(rows[0].assignment.proficiency_level, 9);
    assert_eq!(rows[0].assignment.evidence, "Side projects | Resume: Shipped a compiler");
    assert_eq!(rows[1].assignment.proficiency_level, 3);

    assert_eq!(dashboard.save(&client).await.expect("save"), 2);
    assert_eq!(fake.skills.lock().expect("lock").len(), 2);

    let stats = dashboard.stats(chrono::Utc::now());
    assert_eq!(stats.total_skills, 2);
    assert_eq!(stats.average_proficiency, "6.0");
    assert_eq!(stats.active_projects, 1);
}

#[tokio::test]
async fn test_skills_dashboard_loads_rows_with_null_columns() {
    let fake = Fake::default();
    *fake.skills.lock().expect("lock") = vec![
        json!({
            "skillID": 3,
            "skillName": "Rust",
            "skillCategoryname": null,
            "profiencylevel": null,
            "evidence": null
        }),
        json!({"skillID": 2, "skillName": "SQL", "profiencylevel": 4, "evidence": "Reports"}),
    ];
    let client = start(fake).await;

    let dashboard = SkillsDashboard::load(&client, 7).await.expect("load");
    let rows = dashboard.skills().rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].assignment.proficiency_level, 0);
    assert_eq!(rows[0].assignment.evidence, "");
    assert_eq!(
        dashboard.stats(chrono::Utc::now()).average_proficiency,
        "2.0"
    );
}

#[tokio::test]
async fn test_directory_sync_and_filter() {
    let client = start(Fake::default()).await;
    let db = std::env::temp_dir().join(format!("hrdesk-editors-{}.db", uuid::Uuid::new_v4()));
    let store = LocalStore::new(db.to_str().expect("utf-8 path"))
        .await
        .expect("store");
    let directory = EmployeeDirectory::new(store);

    assert_eq!(directory.sync(&client).await.expect("sync"), 1);
    let found = directory.list("ada finance").await.expect("list");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, "7");

    assert!(matches!(
        directory.remove("8").await,
        Err(EditorError::NotFound(_))
    ));
    directory.remove("7").await.expect("remove");
    assert!(directory.list("").await.expect("list").is_empty());

    let _ = std::fs::remove_file(db);
}
