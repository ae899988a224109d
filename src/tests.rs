//! Integration tests for the portfolio backend.

use std::sync::Arc;

use reqwest::Client;
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::config::Config;
use crate::local::{FileStorage, LocalStore};
use crate::remote::{init_database, RemoteAdapter, RemoteStore, SqliteStore};
use crate::service::PortfolioService;
use crate::{create_router, AppState};

const ADMIN_KEY: &str = "test-admin-key";

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
    _temp_dir: TempDir,
}

impl TestFixture {
    async fn new() -> Self {
        Self::with_key(Some(ADMIN_KEY.to_string())).await
    }

    async fn with_key(admin_key: Option<String>) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let pool = init_database(&temp_dir.path().join("remote.sqlite"))
            .await
            .expect("Failed to init DB");
        Self::start(temp_dir, Arc::new(SqliteStore::new(pool)), admin_key).await
    }

    async fn with_remote(remote: Arc<dyn RemoteStore>) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self::start(temp_dir, remote, Some(ADMIN_KEY.to_string())).await
    }

    async fn start(
        temp_dir: TempDir,
        remote: Arc<dyn RemoteStore>,
        admin_key: Option<String>,
    ) -> Self {
        let data_dir = temp_dir.path().join("local");
        let storage = FileStorage::open(&data_dir).expect("Failed to open local store");
        let local = LocalStore::new(Arc::new(storage));
        local.initialize().expect("Failed to seed local store");

        let config = Config {
            admin_key: admin_key.clone(),
            data_dir,
            db_path: temp_dir.path().join("remote.sqlite"),
            remote: None,
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            log_level: "warn".to_string(),
        };

        let adapter = RemoteAdapter::new(remote, local.clone());
        let state = AppState {
            service: Arc::new(PortfolioService::new(adapter, local)),
            config: Arc::new(config),
        };

        let app = create_router(state);

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = format!("http://{}", addr);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let mut client_builder = Client::builder();
        if let Some(key) = admin_key {
            let mut headers = reqwest::header::HeaderMap::new();
            headers.insert("x-api-key", key.parse().unwrap());
            client_builder = client_builder.default_headers(headers);
        }

        TestFixture {
            client: client_builder.build().unwrap(),
            base_url,
            _temp_dir: temp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn create_project(&self, body: Value) -> Value {
        let resp = self
            .client
            .post(self.url("/api/projects"))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        body["data"].clone()
    }
}

fn project_body(title: &str) -> Value {
    json!({
        "title": title,
        "description": "A project built for testing",
        "category": "Web Development",
        "tags": ["Rust", " Axum ", "Rust"],
        "image": "/images/test.jpg",
        "githubUrl": "https://github.com/example/test",
        "featured": true,
        "status": "Completed"
    })
}

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_public_routes_need_no_key() {
    let fixture = TestFixture::new().await;
    let client = Client::new();

    let resp = client
        .get(fixture.url("/api/projects"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = client
        .get(fixture.url("/api/settings"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn test_auth_missing_key() {
    let fixture = TestFixture::new().await;

    let resp = Client::new()
        .post(fixture.url("/api/projects"))
        .json(&project_body("Blocked"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_auth_invalid_key() {
    let fixture = TestFixture::new().await;

    let resp = Client::new()
        .post(fixture.url("/api/local/reset"))
        .header("x-api-key", "wrong-key")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    let resp = Client::new()
        .post(fixture.url("/api/local/reset"))
        .bearer_auth("wrong-key")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn test_auth_bearer_key() {
    let fixture = TestFixture::new().await;

    let resp = Client::new()
        .post(fixture.url("/api/local/reset"))
        .bearer_auth(ADMIN_KEY)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn test_no_key_configured_opens_admin_routes() {
    let fixture = TestFixture::with_key(None).await;

    let created = fixture.create_project(project_body("Open")).await;
    assert_eq!(created["title"], "Open");
}

#[tokio::test]
async fn test_project_crud() {
    let fixture = TestFixture::new().await;

    // Create project
    let created = fixture.create_project(project_body("Portfolio API")).await;
    let project_id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["title"], "Portfolio API");
    assert_eq!(created["tags"], json!(["Rust", "Axum"]));
    assert_eq!(created["category"], "Web Development");
    assert!(created["createdAt"].is_string());

    // Get project
    let get_resp = fixture
        .client
        .get(fixture.url(&format!("/api/projects/{}", project_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(get_resp.status(), 200);
    let get_body: Value = get_resp.json().await.unwrap();
    assert_eq!(get_body["data"]["githubUrl"], "https://github.com/example/test");

    // Update project
    let update_resp = fixture
        .client
        .put(fixture.url(&format!("/api/projects/{}", project_id)))
        .json(&json!({
            "status": "Archived",
            "githubUrl": null
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(update_resp.status(), 200);
    let update_body: Value = update_resp.json().await.unwrap();
    assert_eq!(update_body["data"]["status"], "Archived");
    assert_eq!(update_body["data"]["title"], "Portfolio API");
    assert!(update_body["data"]["githubUrl"].is_null());
    assert_eq!(update_body["data"]["createdAt"], created["createdAt"]);

    // List projects
    let list_resp = fixture
        .client
        .get(fixture.url("/api/projects"))
        .send()
        .await
        .unwrap();
    let list_body: Value = list_resp.json().await.unwrap();
    assert_eq!(list_body["data"].as_array().unwrap().len(), 1);

    // Delete project
    let delete_resp = fixture
        .client
        .delete(fixture.url(&format!("/api/projects/{}", project_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(delete_resp.status(), 200);
    let delete_body: Value = delete_resp.json().await.unwrap();
    assert_eq!(delete_body["data"]["deleted"], true);

    // Verify deleted
    let get_deleted_resp = fixture
        .client
        .get(fixture.url(&format!("/api/projects/{}", project_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(get_deleted_resp.status(), 404);
    let body: Value = get_deleted_resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_list_projects_filters_and_order() {
    let fixture = TestFixture::new().await;

    let first = fixture.create_project(project_body("First")).await;
    let mut other = project_body("Second");
    other["featured"] = json!(false);
    other["category"] = json!("Mobile App");
    other["status"] = json!("In Progress");
    let second = fixture.create_project(other).await;

    let resp = fixture
        .client
        .get(fixture.url("/api/projects"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    let ids: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(
        ids,
        vec![second["id"].as_str().unwrap(), first["id"].as_str().unwrap()]
    );

    let resp = fixture
        .client
        .get(fixture.url("/api/projects?featured=true"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["title"], "First");

    let resp = fixture
        .client
        .get(fixture.url("/api/projects?status=In%20Progress"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["title"], "Second");

    let resp = fixture
        .client
        .get(fixture.url("/api/projects?category=Data%20Science"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_update_unknown_project() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .put(fixture.url("/api/projects/does-not-exist"))
        .json(&json!({"title": "Ghost"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_create_project_validation() {
    let fixture = TestFixture::new().await;

    let mut body = project_body("Invalid");
    body["title"] = json!("   ");

    let resp = fixture
        .client
        .post(fixture.url("/api/projects"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_settings_save_and_fetch() {
    let fixture = TestFixture::new().await;

    // Before any save the local defaults are served
    let resp = fixture
        .client
        .get(fixture.url("/api/settings"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let mut settings: Value = resp.json().await.unwrap();
    let mut settings = settings["data"].take();
    assert!(!settings["name"].as_str().unwrap().is_empty());

    settings["name"] = json!("Jane Doe");
    settings["greetings"] = json!(["Hello", "Hi"]);

    let save_resp = fixture
        .client
        .put(fixture.url("/api/settings"))
        .json(&settings)
        .send()
        .await
        .unwrap();
    assert_eq!(save_resp.status(), 200);

    let resp = fixture
        .client
        .get(fixture.url("/api/settings"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["name"], "Jane Doe");
    assert_eq!(body["data"]["greetings"], json!(["Hello", "Hi"]));
}

#[tokio::test]
async fn test_reads_fall_back_to_local_seed() {
    let fixture =
        TestFixture::with_remote(Arc::new(crate::remote::tests::FailingRemote)).await;

    let resp = fixture
        .client
        .get(fixture.url("/api/projects"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 4);

    let resp = fixture
        .client
        .get(fixture.url("/api/projects/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = fixture
        .client
        .get(fixture.url("/api/settings"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn test_writes_surface_remote_errors() {
    let fixture =
        TestFixture::with_remote(Arc::new(crate::remote::tests::FailingRemote)).await;

    let resp = fixture
        .client
        .post(fixture.url("/api/projects"))
        .json(&project_body("Offline"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 502);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "REMOTE_ERROR");

    let resp = fixture
        .client
        .delete(fixture.url("/api/projects/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["deleted"], false);
}

#[tokio::test]
async fn test_local_export_import_reset() {
    let fixture = TestFixture::new().await;

    // Export the seeded snapshot
    let resp = fixture
        .client
        .get(fixture.url("/api/local/export"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp
        .headers()
        .get("content-disposition")
        .is_some());
    let mut snapshot: Value = resp.json().await.unwrap();
    assert_eq!(snapshot["projects"].as_array().unwrap().len(), 4);

    // Import a trimmed snapshot
    snapshot["projects"] = json!([snapshot["projects"][0].clone()]);
    let resp = fixture
        .client
        .post(fixture.url("/api/local/import"))
        .body(snapshot.to_string())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["imported"], true);

    let resp = fixture
        .client
        .get(fixture.url("/api/local/export"))
        .send()
        .await
        .unwrap();
    let exported: Value = resp.json().await.unwrap();
    assert_eq!(exported["projects"].as_array().unwrap().len(), 1);

    let resp = fixture
        .client
        .post(fixture.url("/api/local/import"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    // Malformed input is rejected without touching the store
    let resp = fixture
        .client
        .post(fixture.url("/api/local/import"))
        .body("{broken")
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["imported"], false);

    // Reset restores the seed
    let resp = fixture
        .client
        .post(fixture.url("/api/local/reset"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = fixture
        .client
        .get(fixture.url("/api/local/export"))
        .send()
        .await
        .unwrap();
    let exported: Value = resp.json().await.unwrap();
    assert_eq!(exported["projects"].as_array().unwrap().len(), 4);
}
