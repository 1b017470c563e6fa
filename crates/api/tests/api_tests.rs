use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use blog_api::handler::AppRouter;
use serde_json::{Value, json};
use shared::{
    abstract_trait::{AuthServiceTrait, UserServiceTrait},
    config::{AdminBootstrap, Hashing, JwtConfig},
    domain::CreateUserRequest,
    model::user::AppRole,
    repository::InMemoryStore,
    state::AppState,
};

const PASSWORD: &str = "segredo123";

struct TestApp {
    server: TestServer,
    state: AppState,
}

impl TestApp {
    async fn new() -> Self {
        let store = InMemoryStore::new();
        let state = AppState::from_repositories(
            Arc::new(store.post_repository()),
            Arc::new(store.user_repository()),
            Hashing::new(4),
            JwtConfig::new("test-secret", 1),
            3000,
        );

        state
            .di_container
            .auth_service
            .bootstrap_admin(&AdminBootstrap {
                name: "Administrador".into(),
                email: "admin@escola.com".into(),
                password: PASSWORD.into(),
            })
            .await
            .expect("admin bootstrap");

        let server =
            TestServer::new(AppRouter::router(state.clone()));

        Self { server, state }
    }

    async fn register(&self, name: &str, app_role: AppRole) -> String {
        let email = format!("{}@escola.com", name.to_lowercase());
        self.state
            .di_container
            .user_service
            .create(&CreateUserRequest {
                name: Some(name.into()),
                email: Some(email.clone()),
                password: Some(PASSWORD.into()),
                app_role: Some(app_role),
                role: None,
            })
            .await
            .expect("user created");
        self.login(&email).await
    }

    async fn login(&self, email: &str) -> String {
        let response = self
            .server
            .post("/auth/login")
            .json(&json!({ "email": email, "password": PASSWORD }))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        body["data"]["token"]
            .as_str()
            .expect("token in body")
            .to_string()
    }

    async fn create_post(&self, token: &str, titulo: &str) -> Value {
        let response = self
            .server
            .post("/posts")
            .authorization_bearer(token)
            .json(&json!({
                "titulo": titulo,
                "conteudo": "Um conteúdo com tamanho suficiente"
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json::<Value>()["data"].clone()
    }
}

mod health {
    use super::*;

    #[tokio::test]
    async fn reports_the_port() {
        let app = TestApp::new().await;

        let response = app.server.get("/health").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(
            body["message"],
            "Health Check OK, Backend is running on port 3000!"
        );
    }

    #[tokio::test]
    async fn metrics_are_exposed_after_service_calls() {
        let app = TestApp::new().await;
        app.server.get("/posts").await.assert_status_ok();

        let response = app.server.get("/metrics").await;
        response.assert_status_ok();
        assert!(response.text().contains("service_requests_total"));
    }
}

mod posts {
    use super::*;

    #[tokio::test]
    async fn empty_listing_uses_default_pagination() {
        let app = TestApp::new().await;

        let response = app
            .server
            .get("/posts")
            .add_query_param("page", "abc")
            .add_query_param("limit", "-5")
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"], json!([]));
        assert_eq!(
            body["pagination"],
            json!({ "page": 1, "limit": 10, "total": 0, "pages": 0 })
        );
    }

    #[tokio::test]
    async fn creating_requires_a_token() {
        let app = TestApp::new().await;

        let response = app
            .server
            .post("/posts")
            .json(&json!({ "titulo": "Olá", "conteudo": "Conteúdo suficiente" }))
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Usuário não autenticado.");
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let app = TestApp::new().await;

        let response = app
            .server
            .post("/posts")
            .authorization_bearer("nao-e-um-jwt")
            .json(&json!({ "titulo": "Olá", "conteudo": "Conteúdo suficiente" }))
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.json::<Value>()["message"],
            "Token inválido ou expirado."
        );
    }

    #[tokio::test]
    async fn validation_failure_is_a_bad_request() {
        let app = TestApp::new().await;
        let token = app.register("Ana", AppRole::Student).await;

        let response = app
            .server
            .post("/posts")
            .authorization_bearer(&token)
            .json(&json!({ "titulo": "Olá", "conteudo": "curto" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>(),
            json!({
                "success": false,
                "message": "Conteúdo deve ter pelo menos 10 caracteres"
            })
        );
    }

    #[tokio::test]
    async fn malformed_json_is_a_bad_request() {
        let app = TestApp::new().await;
        let token = app.register("Ana", AppRole::Student).await;

        let response = app
            .server
            .post("/posts")
            .authorization_bearer(&token)
            .content_type("application/json")
            .text("{ titulo: ")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["success"], false);
    }

    #[tokio::test]
    async fn full_lifecycle_respects_ownership() {
        let app = TestApp::new().await;
        let ana = app.register("Ana", AppRole::Student).await;
        let bia = app.register("Bia", AppRole::Student).await;

        let post = app.create_post(&ana, "Meu primeiro post").await;
        let id = post["id"].as_i64().expect("numeric id");
        assert_eq!(post["autor"], "Ana");
        assert_eq!(post["author"]["email"], "ana@escola.com");

        let response = app.server.get(&format!("/posts/{id}")).await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["data"]["titulo"], "Meu primeiro post");

        let response = app
            .server
            .put(&format!("/posts/{id}"))
            .authorization_bearer(&bia)
            .json(&json!({ "titulo": "Invadido" }))
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
        assert_eq!(response.json::<Value>()["message"], "Ação não autorizada");

        let response = app
            .server
            .put(&format!("/posts/{id}"))
            .authorization_bearer(&ana)
            .json(&json!({ "titulo": "Editado" }))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["message"], "Post atualizado com sucesso");
        assert_eq!(body["data"]["titulo"], "Editado");

        let response = app
            .server
            .delete(&format!("/posts/{id}"))
            .authorization_bearer(&ana)
            .await;
        response.assert_status(StatusCode::NO_CONTENT);

        let response = app.server.get(&format!("/posts/{id}")).await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.json::<Value>()["message"], "Post não encontrado");
    }

    #[tokio::test]
    async fn update_of_missing_post_is_not_found() {
        let app = TestApp::new().await;
        let token = app.register("Ana", AppRole::Student).await;

        let response = app
            .server
            .put("/posts/4242")
            .authorization_bearer(&token)
            .json(&json!({ "titulo": "" }))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn search_and_author_filter() {
        let app = TestApp::new().await;
        let ana = app.register("Ana", AppRole::Student).await;
        let bia = app.register("Bia", AppRole::Student).await;

        let post = app.create_post(&ana, "Aprendendo Rust").await;
        app.create_post(&bia, "Receitas de bolo").await;

        let response = app
            .server
            .get("/posts/search")
            .add_query_param("search", "rust")
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["pagination"]["total"], 1);
        assert_eq!(body["data"][0]["titulo"], "Aprendendo Rust");

        let author_id = post["authorId"].as_str().expect("author id");
        let response = app
            .server
            .get("/posts")
            .add_query_param("authorId", author_id)
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["pagination"]["total"], 1);
    }
}

mod users {
    use super::*;

    #[tokio::test]
    async fn students_cannot_create_users() {
        let app = TestApp::new().await;
        let token = app.register("Ana", AppRole::Student).await;

        let response = app
            .server
            .post("/users")
            .authorization_bearer(&token)
            .json(&json!({ "name": "Novo", "email": "novo@escola.com", "password": PASSWORD }))
            .await;

        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn admin_creates_users_and_duplicates_conflict() {
        let app = TestApp::new().await;
        let admin = app.login("admin@escola.com").await;

        let payload = json!({
            "name": "Carlos",
            "email": "carlos@escola.com",
            "password": PASSWORD,
            "appRole": "TEACHER"
        });

        let response = app
            .server
            .post("/users")
            .authorization_bearer(&admin)
            .json(&payload)
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["message"], "Usuário criado com sucesso");
        assert_eq!(body["data"]["appRole"], "TEACHER");
        assert!(body["data"].get("password").is_none());

        let response = app
            .server
            .post("/users")
            .authorization_bearer(&admin)
            .json(&payload)
            .await;
        response.assert_status(StatusCode::CONFLICT);
        assert_eq!(
            response.json::<Value>()["message"],
            "Este email já está cadastrado."
        );
    }

    #[tokio::test]
    async fn missing_name_is_reported() {
        let app = TestApp::new().await;
        let admin = app.login("admin@escola.com").await;

        let response = app
            .server
            .post("/users")
            .authorization_bearer(&admin)
            .json(&json!({ "email": "x@escola.com", "password": PASSWORD }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["message"], "Nome é obrigatório");
    }

    #[tokio::test]
    async fn listing_and_role_filter_are_public() {
        let app = TestApp::new().await;
        app.register("Ana", AppRole::Student).await;
        app.register("Carlos", AppRole::Teacher).await;

        let response = app.server.get("/users").await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["pagination"]["total"], 3);

        let response = app
            .server
            .get("/users")
            .add_query_param("role", "TEACHER")
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["pagination"]["total"], 1);
        assert_eq!(body["data"][0]["name"], "Carlos");
    }

    #[tokio::test]
    async fn invalid_user_id_is_a_bad_request() {
        let app = TestApp::new().await;

        let response = app.server.get("/users/not-a-uuid").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["success"], false);
    }

    #[tokio::test]
    async fn student_updates_self_but_not_others() {
        let app = TestApp::new().await;
        let ana = app.register("Ana", AppRole::Student).await;
        app.register("Bia", AppRole::Student).await;

        let me: Value = app
            .server
            .get("/auth/me")
            .authorization_bearer(&ana)
            .await
            .json();
        let ana_id = me["data"]["id"].as_str().expect("id").to_string();

        let listing: Value = app
            .server
            .get("/users/search")
            .add_query_param("search", "bia")
            .await
            .json();
        let bia_id = listing["data"][0]["id"].as_str().expect("id").to_string();

        let response = app
            .server
            .put(&format!("/users/{bia_id}"))
            .authorization_bearer(&ana)
            .json(&json!({ "name": "Outra" }))
            .await;
        response.assert_status(StatusCode::FORBIDDEN);

        let response = app
            .server
            .put(&format!("/users/{ana_id}"))
            .authorization_bearer(&ana)
            .json(&json!({ "name": "Ana Maria" }))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["message"], "Usuário atualizado com sucesso");
        assert_eq!(body["data"]["name"], "Ana Maria");
    }

    #[tokio::test]
    async fn admin_deletes_a_user() {
        let app = TestApp::new().await;
        let admin = app.login("admin@escola.com").await;
        let ana = app.register("Ana", AppRole::Student).await;

        let me: Value = app
            .server
            .get("/auth/me")
            .authorization_bearer(&ana)
            .await
            .json();
        let ana_id = me["data"]["id"].as_str().expect("id").to_string();

        let response = app
            .server
            .delete(&format!("/users/{ana_id}"))
            .authorization_bearer(&admin)
            .await;
        response.assert_status_ok();
        assert_eq!(
            response.json::<Value>(),
            json!({ "success": true, "message": "Usuário deletado com sucesso" })
        );

        app.server
            .get(&format!("/users/{ana_id}"))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn change_password_then_login_with_it() {
        let app = TestApp::new().await;
        let ana = app.register("Ana", AppRole::Student).await;

        let me: Value = app
            .server
            .get("/auth/me")
            .authorization_bearer(&ana)
            .await
            .json();
        let ana_id = me["data"]["id"].as_str().expect("id").to_string();

        let response = app
            .server
            .post(&format!("/users/{ana_id}/change-password"))
            .authorization_bearer(&ana)
            .json(&json!({ "oldPassword": PASSWORD, "newPassword": "123" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>()["message"],
            "A nova senha deve ter no mínimo 6 caracteres"
        );

        let response = app
            .server
            .post(&format!("/users/{ana_id}/change-password"))
            .authorization_bearer(&ana)
            .json(&json!({ "oldPassword": PASSWORD, "newPassword": "outraSenha1" }))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["message"], "Senha alterada com sucesso");

        let response = app
            .server
            .post("/auth/login")
            .json(&json!({ "email": "ana@escola.com", "password": "outraSenha1" }))
            .await;
        response.assert_status_ok();
    }
}

mod auth {
    use super::*;

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let app = TestApp::new().await;

        let response = app
            .server
            .post("/auth/login")
            .json(&json!({ "email": "admin@escola.com", "password": "errada123" }))
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(response.json::<Value>()["message"], "Credenciais inválidas");
    }

    #[tokio::test]
    async fn malformed_email_fails_validation() {
        let app = TestApp::new().await;

        let response = app
            .server
            .post("/auth/login")
            .json(&json!({ "email": "admin", "password": PASSWORD }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["message"], "Email deve ser válido");
    }

    #[tokio::test]
    async fn me_returns_the_token_owner() {
        let app = TestApp::new().await;
        let token = app.login("admin@escola.com").await;

        let response = app
            .server
            .get("/auth/me")
            .authorization_bearer(&token)
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["email"], "admin@escola.com");
        assert_eq!(body["data"]["appRole"], "ADMIN");
    }

    #[tokio::test]
    async fn logout_clears_the_cookie() {
        let app = TestApp::new().await;

        let response = app.server.post("/auth/logout").await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["success"], true);
    }
}
