//! Router tests against the in-memory store

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use factory_api::{build_router, AppState};
use factory_infrastructure::InMemoryStore;
use factory_shared::config::AppConfig;

const ADMIN_EMAIL: &str = "admin@test.com";
const ADMIN_PASSWORD: &str = "adminpass";

struct TestApp {
    router: Router,
}

impl TestApp {
    async fn new() -> Self {
        let config = AppConfig::with_defaults("memory://", "router-test-secret").unwrap();
        let state = AppState::new(config, InMemoryStore::new().repositories(), None);
        state
            .services
            .users
            .create_superuser(ADMIN_EMAIL, ADMIN_PASSWORD, "Admin")
            .await
            .unwrap();

        Self {
            router: build_router(state),
        }
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    async fn token(&self, email: &str, password: &str) -> String {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/user/token/",
                None,
                Some(json!({ "email": email, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed for {}: {}", email, body);
        body["access"].as_str().unwrap().to_string()
    }

    async fn admin_token(&self) -> String {
        self.token(ADMIN_EMAIL, ADMIN_PASSWORD).await
    }

    async fn create_factory(&self, admin: &str, name: &str) -> Value {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/factory/create/",
                Some(admin),
                Some(json!({
                    "name": name,
                    "address": "Main Street 1",
                    "city": "Springfield",
                    "country": "Freedonia"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body
    }

    /// Regular (non-staff) member of `factory_id`; returns its access token.
    async fn member(&self, admin: &str, email: &str, factory_id: i64) -> String {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/user/create/",
                Some(admin),
                Some(json!({
                    "email": email,
                    "password": "memberpass",
                    "surname": "Member",
                    "factory": factory_id
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        self.token(email, "memberpass").await
    }

    async fn create_equipment(&self, token: &str, factory_id: i64, name: &str) -> Value {
        let (status, body) = self
            .send(
                Method::POST,
                &format!("/api/equipment/create/{}/", factory_id),
                Some(token),
                Some(json!({
                    "name": name,
                    "description": "Hydraulic press",
                    "price": 1500.0,
                    "date": "2023-04-01"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body
    }

    async fn create_property(&self, token: &str, equipment_id: i64, name: &str) -> Value {
        let (status, body) = self
            .send(
                Method::POST,
                &format!("/api/equipment/create_property/{}/", equipment_id),
                Some(token),
                Some(json!({ "name": name, "description": "400V" })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body
    }
}

fn id(value: &Value) -> i64 {
    value["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new().await;
    let (status, body) = app.send(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, _) = app.send(Method::GET, "/health/ready", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_authentication_failures() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/user/token/",
            None,
            Some(json!({ "email": ADMIN_EMAIL, "password": "wrong" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");

    let (status, _) = app.send(Method::GET, "/api/user/me/", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .send(Method::GET, "/api/user/me/", Some("not-a-jwt"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .send(
            Method::POST,
            "/api/user/token/",
            None,
            Some(json!({ "email": ADMIN_EMAIL })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadRequest");
}

#[tokio::test]
async fn test_refresh_flow() {
    let app = TestApp::new().await;
    let (_, pair) = app
        .send(
            Method::POST,
            "/api/user/token/",
            None,
            Some(json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD })),
        )
        .await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/user/token/refresh/",
            None,
            Some(json!({ "refresh": pair["refresh"] })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let access = body["access"].as_str().unwrap();

    let (status, me) = app.send(Method::GET, "/api/user/me/", Some(access), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], ADMIN_EMAIL);

    // An access token is not a refresh token, and vice versa.
    let (status, _) = app
        .send(
            Method::POST,
            "/api/user/token/refresh/",
            None,
            Some(json!({ "refresh": pair["access"] })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let refresh = pair["refresh"].as_str().unwrap();
    let (status, _) = app.send(Method::GET, "/api/user/me/", Some(refresh), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_factory_creation_provisions_owner_login() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let factory = app.create_factory(&admin, "Plant North").await;
    let owner_email = factory["user_email"].as_str().unwrap().to_string();

    assert!(owner_email.ends_with("@factory.com"));
    assert_eq!(factory["all_users"].as_array().unwrap().len(), 1);
    assert_eq!(factory["all_users"][0]["is_staff"], true);
    assert_eq!(factory["all_users"][0]["id"], factory["user_id"]);
    assert!(factory["equipments"].as_array().unwrap().is_empty());

    let owner = app.token(&owner_email, "changeme").await;
    let (status, me) = app.send(Method::GET, "/api/user/me/", Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["factory"], factory["id"]);
    assert_eq!(me["name"], "Plant North");
    assert_eq!(me["surname"], "Default Surname");
    assert_eq!(me["is_staff"], true);
}

#[tokio::test]
async fn test_non_staff_cannot_create_users_or_factories() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let factory = app.create_factory(&admin, "Plant").await;
    let member = app.member(&admin, "ru@test.com", id(&factory)).await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/factory/create/",
            Some(&member),
            Some(json!({ "name": "X", "address": "Y", "city": "Z", "country": "W" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Forbidden");

    let (status, _) = app
        .send(
            Method::POST,
            "/api/user/create/",
            Some(&member),
            Some(json!({ "email": "new@test.com", "password": "pass", "surname": "New" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send(Method::DELETE, &format!("/api/factory/delete/{}/", id(&factory)), Some(&member), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_tenant_isolation() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let north = app.create_factory(&admin, "Plant North").await;
    let south = app.create_factory(&admin, "Plant South").await;
    let member = app.member(&admin, "north@test.com", id(&north)).await;

    let own = app.create_equipment(&member, id(&north), "Press North").await;
    let foreign = app.create_equipment(&admin, id(&south), "Press South").await;

    // Factory list is filtered, foreign factory reads as missing.
    let (_, factories) = app.send(Method::GET, "/api/factory/", Some(&member), None).await;
    let factories = factories.as_array().unwrap();
    assert_eq!(factories.len(), 1);
    assert_eq!(factories[0]["id"], north["id"]);

    let (status, _) = app
        .send(Method::GET, &format!("/api/factory/{}/", id(&south)), Some(&member), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Equipment
    let (status, listed) = app
        .send(Method::GET, &format!("/api/equipment/list/{}/", id(&north)), Some(&member), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, _) = app
        .send(Method::GET, &format!("/api/equipment/list/{}/", id(&south)), Some(&member), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send(Method::GET, &format!("/api/equipment/{}/", id(&foreign)), Some(&member), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(
            Method::PATCH,
            &format!("/api/equipment/update/{}/", id(&foreign)),
            Some(&member),
            Some(json!({ "status": false })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send(Method::DELETE, &format!("/api/equipment/delete/{}/", id(&foreign)), Some(&member), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, updated) = app
        .send(
            Method::PATCH,
            &format!("/api/equipment/update/{}/", id(&own)),
            Some(&member),
            Some(json!({ "status": false })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], false);

    // Properties
    let foreign_property = app.create_property(&admin, id(&foreign), "Voltage South").await;
    let (status, _) = app
        .send(
            Method::POST,
            &format!("/api/equipment/create_property/{}/", id(&foreign)),
            Some(&member),
            Some(json!({ "name": "Weight", "description": "2t" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send(
            Method::GET,
            &format!("/api/equipment/properties/{}/", id(&foreign)),
            Some(&member),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send(
            Method::GET,
            &format!("/api/equipment/property/{}/", id(&foreign_property)),
            Some(&member),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(
            Method::DELETE,
            &format!("/api/equipment/delete_property/{}/", id(&foreign_property)),
            Some(&member),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_equipment_create_requires_existing_factory() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let (status, _) = app
        .send(
            Method::POST,
            "/api/equipment/create/999/",
            Some(&admin),
            Some(json!({
                "name": "Ghost",
                "description": "Nowhere",
                "price": 1.0,
                "date": "2023-04-01"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cascading_deletes() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let factory = app.create_factory(&admin, "Plant").await;
    let owner_id = factory["user_id"].as_i64().unwrap();

    let press = app.create_equipment(&admin, id(&factory), "Press").await;
    let lathe = app.create_equipment(&admin, id(&factory), "Lathe").await;
    let voltage = app.create_property(&admin, id(&press), "Voltage").await;
    let weight = app.create_property(&admin, id(&lathe), "Weight").await;

    // Equipment delete removes its properties.
    let (status, _) = app
        .send(Method::DELETE, &format!("/api/equipment/delete/{}/", id(&press)), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app
        .send(Method::GET, &format!("/api/equipment/property/{}/", id(&voltage)), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Factory delete removes equipment and properties, keeps users.
    let (status, _) = app
        .send(Method::DELETE, &format!("/api/factory/delete/{}/", id(&factory)), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app
        .send(Method::GET, &format!("/api/equipment/{}/", id(&lathe)), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app
        .send(Method::GET, &format!("/api/equipment/property/{}/", id(&weight)), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, owner) = app
        .send(Method::GET, &format!("/api/user/detail/{}/", owner_id), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(owner["factory"], Value::Null);
}

#[tokio::test]
async fn test_factory_update_keeps_user_count() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let factory = app.create_factory(&admin, "Plant").await;

    let (_, before) = app.send(Method::GET, "/api/user/list/", Some(&admin), None).await;

    let (status, updated) = app
        .send(
            Method::PATCH,
            &format!("/api/factory/update/{}/", id(&factory)),
            Some(&admin),
            Some(json!({ "city": "Shelbyville" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["city"], "Shelbyville");
    assert_eq!(updated["name"], "Plant");

    let (_, after) = app.send(Method::GET, "/api/user/list/", Some(&admin), None).await;
    assert_eq!(before.as_array().unwrap().len(), after.as_array().unwrap().len());

    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/api/factory/update/{}/", id(&factory)),
            Some(&admin),
            Some(json!({ "name": "Renamed" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("address"));
}

#[tokio::test]
async fn test_member_can_update_own_factory_only() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let north = app.create_factory(&admin, "Plant North").await;
    let south = app.create_factory(&admin, "Plant South").await;
    let member = app.member(&admin, "north@test.com", id(&north)).await;

    let (status, _) = app
        .send(
            Method::PATCH,
            &format!("/api/factory/update/{}/", id(&north)),
            Some(&member),
            Some(json!({ "address": "Harbour Road 5" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .send(
            Method::PATCH,
            &format!("/api/factory/update/{}/", id(&south)),
            Some(&member),
            Some(json!({ "address": "Harbour Road 5" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send(
            Method::PATCH,
            "/api/factory/update/999/",
            Some(&member),
            Some(json!({ "address": "Harbour Road 5" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_responses_never_expose_passwords() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let factory = app.create_factory(&admin, "Plant").await;
    app.member(&admin, "ru@test.com", id(&factory)).await;

    let (_, users) = app.send(Method::GET, "/api/user/list/", Some(&admin), None).await;
    let (_, me) = app.send(Method::GET, "/api/user/me/", Some(&admin), None).await;
    let (_, factories) = app.send(Method::GET, "/api/factory/", Some(&admin), None).await;

    for body in [users, me, factories] {
        let text = body.to_string();
        assert!(!text.contains("password"), "{}", text);
        assert!(!text.contains("argon2"), "{}", text);
    }
}

#[tokio::test]
async fn test_uniqueness_violations_are_bad_requests() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let north = app.create_factory(&admin, "Plant North").await;
    let south = app.create_factory(&admin, "Plant South").await;
    app.create_equipment(&admin, id(&north), "Press").await;

    let (status, body) = app
        .send(
            Method::POST,
            &format!("/api/equipment/create/{}/", id(&south)),
            Some(&admin),
            Some(json!({
                "name": "Press",
                "description": "Second press",
                "price": 10.0,
                "date": "2023-04-01"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadRequest");

    let (status, _) = app
        .send(
            Method::POST,
            "/api/user/create/",
            Some(&admin),
            Some(json!({ "email": "ADMIN@test.com", "password": "pass", "surname": "Dup" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .send(
            Method::POST,
            "/api/user/create/",
            Some(&admin),
            Some(json!({ "email": "not-an-email", "password": "pass", "surname": "Bad" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_user_management_rules() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let factory = app.create_factory(&admin, "Plant").await;
    let owner_email = factory["user_email"].as_str().unwrap().to_string();
    let owner = app.token(&owner_email, "changeme").await;

    // Staff, but not superuser: cannot grant superuser.
    let (status, _) = app
        .send(
            Method::POST,
            "/api/user/create/",
            Some(&owner),
            Some(json!({ "email": "boss@test.com", "password": "pass", "surname": "Boss", "is_superuser": true })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, created) = app
        .send(
            Method::POST,
            "/api/user/create/",
            Some(&admin),
            Some(json!({ "email": "boss@test.com", "password": "pass", "surname": "Boss", "is_superuser": true })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["is_superuser"], true);

    // Changed password takes effect.
    let (status, _) = app
        .send(
            Method::PATCH,
            &format!("/api/user/update/{}/", id(&created)),
            Some(&admin),
            Some(json!({ "password": "newpass" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    app.token("boss@test.com", "newpass").await;

    // Nobody deletes their own account.
    let (_, me) = app.send(Method::GET, "/api/user/me/", Some(&admin), None).await;
    let (status, _) = app
        .send(Method::DELETE, &format!("/api/user/delete/{}/", id(&me)), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send(Method::DELETE, &format!("/api/user/delete/{}/", id(&created)), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app
        .send(Method::GET, &format!("/api/user/detail/{}/", id(&created)), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_factory_owner_cannot_take_over_superuser() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let (_, me) = app.send(Method::GET, "/api/user/me/", Some(&admin), None).await;
    let admin_id = me["id"].as_i64().unwrap();

    let factory = app.create_factory(&admin, "Owner Plant").await;
    let owner_email = factory["user_email"].as_str().unwrap().to_string();
    let owner = app.token(&owner_email, "changeme").await;

    let (status, _) = app
        .send(
            Method::PATCH,
            &format!("/api/user/update/{}/", admin_id),
            Some(&owner),
            Some(json!({ "password": "taken-over" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send(
            Method::DELETE,
            &format!("/api/user/delete/{}/", admin_id),
            Some(&owner),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Credentials unchanged, account still there.
    let (status, _) = app
        .send(
            Method::POST,
            "/api/user/token/",
            None,
            Some(json!({ "email": ADMIN_EMAIL, "password": "taken-over" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    app.admin_token().await;
}

#[tokio::test]
async fn test_login_with_non_ascii_email_is_rejected_cleanly() {
    // Failed logins are logged with a masked address; keep a live subscriber.
    let _log = tracing::subscriber::set_default(
        tracing_subscriber::fmt().with_test_writer().finish(),
    );
    let app = TestApp::new().await;
    let (status, body) = app
        .send(
            Method::POST,
            "/api/user/token/",
            None,
            Some(json!({ "email": "é@plant.io", "password": "whatever" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
async fn test_user_create_requires_surname() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    for body in [
        json!({ "email": "nosurname@test.com", "password": "pass" }),
        json!({ "email": "nosurname@test.com", "password": "pass", "surname": "" }),
    ] {
        let (status, body) = app
            .send(Method::POST, "/api/user/create/", Some(&admin), Some(body))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);
    }
}
