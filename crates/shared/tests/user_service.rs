use std::sync::Arc;

use shared::{
    abstract_trait::{AuthServiceTrait, PostsRepositoryTrait, UserServiceTrait},
    config::{AdminBootstrap, Hashing, JwtConfig},
    domain::{
        ChangePasswordRequest, CreateUserRequest, FindAllUserRequest, LoginRequest,
        SearchUserRequest, UpdateUserRequest,
    },
    model::{
        posts::NewPost,
        user::{AppRole, Role},
    },
    policy::AuthUser,
    repository::InMemoryStore,
    service::{AuthService, UserService},
    utils::{AppError, Metrics},
};
use tokio::sync::Mutex;

struct Fixture {
    store: InMemoryStore,
    users: UserService,
    auth: AuthService,
}

impl Fixture {
    fn new() -> Self {
        let store = InMemoryStore::new();
        let metrics = Arc::new(Mutex::new(Metrics::new()));
        let hashing = Hashing::new(4);

        let users = UserService::new(
            Arc::new(store.user_repository()),
            hashing.clone(),
            metrics.clone(),
        );
        let auth = AuthService::new(
            Arc::new(store.user_repository()),
            hashing,
            JwtConfig::new("test-secret", 1),
            metrics,
        );

        Self { store, users, auth }
    }

    async fn register(&self, name: &str, app_role: AppRole) -> AuthUser {
        let created = self
            .users
            .create(&CreateUserRequest {
                name: Some(name.into()),
                email: Some(format!("{}@escola.com", name.to_lowercase())),
                password: Some("segredo123".into()),
                app_role: Some(app_role),
                role: None,
            })
            .await
            .unwrap()
            .data;

        AuthUser {
            id: created.id,
            name: created.name,
            email: created.email,
            app_role: created.app_role,
        }
    }

    async fn login(&self, email: &str, password: &str) -> Result<String, AppError> {
        self.auth
            .login_user(&LoginRequest {
                email: email.into(),
                password: password.into(),
            })
            .await
            .map(|r| r.data.token)
    }
}

#[tokio::test]
async fn create_defaults_roles_and_hides_password() {
    let fx = Fixture::new();

    let response = fx
        .users
        .create(&CreateUserRequest {
            name: Some("  Ana  ".into()),
            email: Some(" ana@escola.com ".into()),
            password: Some("segredo123".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(response.message.as_deref(), Some("Usuário criado com sucesso"));
    assert_eq!(response.data.name, "Ana");
    assert_eq!(response.data.email, "ana@escola.com");
    assert_eq!(response.data.app_role, AppRole::Student);
    assert_eq!(response.data.role, Role::User);

    let body = serde_json::to_value(&response.data).unwrap();
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn duplicate_email_conflicts() {
    let fx = Fixture::new();
    fx.register("Ana", AppRole::Student).await;

    let err = fx
        .users
        .create(&CreateUserRequest {
            name: Some("Outra Ana".into()),
            email: Some("ana@escola.com".into()),
            password: Some("segredo123".into()),
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::EmailAlreadyExists));
}

#[tokio::test]
async fn short_password_keeps_the_historical_message() {
    let fx = Fixture::new();

    let err = fx
        .users
        .create(&CreateUserRequest {
            name: Some("Ana".into()),
            email: Some("ana@escola.com".into()),
            password: Some("12345".into()),
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Senha deve ter no mínimo 5 caracteres");
}

#[tokio::test]
async fn student_may_only_update_themselves() {
    let fx = Fixture::new();
    let ana = fx.register("Ana", AppRole::Student).await;
    let bia = fx.register("Bia", AppRole::Student).await;

    let err = fx
        .users
        .update(
            &ana,
            bia.id,
            &UpdateUserRequest {
                name: Some("Hackeada".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    let own = fx
        .users
        .update(
            &ana,
            ana.id,
            &UpdateUserRequest {
                name: Some("Ana Maria".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(own.data.name, "Ana Maria");
}

#[tokio::test]
async fn student_cannot_promote_themselves() {
    let fx = Fixture::new();
    let ana = fx.register("Ana", AppRole::Student).await;

    let err = fx
        .users
        .update(
            &ana,
            ana.id,
            &UpdateUserRequest {
                app_role: Some(AppRole::Admin),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Forbidden));
}

#[tokio::test]
async fn admin_changes_roles() {
    let fx = Fixture::new();
    let admin = fx.register("Root", AppRole::Admin).await;
    let ana = fx.register("Ana", AppRole::Student).await;

    let updated = fx
        .users
        .update(
            &admin,
            ana.id,
            &UpdateUserRequest {
                app_role: Some(AppRole::Teacher),
                role: Some(Role::Admin),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.data.app_role, AppRole::Teacher);
    assert_eq!(updated.data.role, Role::Admin);
}

#[tokio::test]
async fn blank_name_on_update_is_rejected() {
    let fx = Fixture::new();
    let ana = fx.register("Ana", AppRole::Student).await;

    let err = fx
        .users
        .update(
            &ana,
            ana.id,
            &UpdateUserRequest {
                name: Some("   ".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Nome não pode ser vazio");
}

#[tokio::test]
async fn delete_removes_user_and_their_posts() {
    let fx = Fixture::new();
    let admin = fx.register("Root", AppRole::Admin).await;
    let ana = fx.register("Ana", AppRole::Student).await;

    let posts = fx.store.post_repository();
    let post = posts
        .create(&NewPost {
            titulo: "Título".into(),
            conteudo: "Conteúdo válido aqui".into(),
            autor: "Ana".into(),
            author_id: ana.id,
        })
        .await
        .unwrap();

    let response = fx.users.delete(&admin, ana.id).await.unwrap();
    assert_eq!(response.message, "Usuário deletado com sucesso");

    assert!(posts.find_by_id(post.id).await.unwrap().is_none());
    assert!(matches!(
        fx.users.find_by_id(ana.id).await.unwrap_err(),
        AppError::NotFound(_)
    ));
}

#[tokio::test]
async fn listing_filters_by_role_and_includes_posts() {
    let fx = Fixture::new();
    let ana = fx.register("Ana", AppRole::Student).await;
    fx.register("Carlos", AppRole::Teacher).await;

    fx.store
        .post_repository()
        .create(&NewPost {
            titulo: "Primeiro".into(),
            conteudo: "Conteúdo válido aqui".into(),
            autor: "Ana".into(),
            author_id: ana.id,
        })
        .await
        .unwrap();

    let students = fx
        .users
        .find_all(&FindAllUserRequest {
            role: Some("STUDENT".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(students.pagination.total, 1);
    assert_eq!(students.data[0].id, ana.id);
    assert_eq!(students.data[0].posts.len(), 1);
    assert_eq!(students.data[0].posts[0].titulo, "Primeiro");
}

#[tokio::test]
async fn search_matches_email_case_insensitively() {
    let fx = Fixture::new();
    fx.register("Ana", AppRole::Student).await;
    fx.register("Bia", AppRole::Student).await;

    let found = fx
        .users
        .search(&SearchUserRequest {
            search: Some("BIA@".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(found.pagination.total, 1);
    assert_eq!(found.data[0].name, "Bia");
}

#[tokio::test]
async fn student_needs_current_password_to_change_it() {
    let fx = Fixture::new();
    let ana = fx.register("Ana", AppRole::Student).await;

    let err = fx
        .users
        .change_password(
            &ana,
            ana.id,
            &ChangePasswordRequest {
                old_password: Some("errada".into()),
                new_password: Some("novaSenha1".into()),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(ref m) if m == "Senha atual incorreta"));

    let ok = fx
        .users
        .change_password(
            &ana,
            ana.id,
            &ChangePasswordRequest {
                old_password: Some("segredo123".into()),
                new_password: Some("novaSenha1".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(ok.message, "Senha alterada com sucesso");

    assert!(fx.login("ana@escola.com", "novaSenha1").await.is_ok());
}

#[tokio::test]
async fn teacher_overwrites_password_without_the_old_one() {
    let fx = Fixture::new();
    let teacher = fx.register("Carlos", AppRole::Teacher).await;
    let ana = fx.register("Ana", AppRole::Student).await;

    fx.users
        .change_password(
            &teacher,
            ana.id,
            &ChangePasswordRequest {
                old_password: None,
                new_password: Some("trocada123".into()),
            },
        )
        .await
        .unwrap();

    assert!(fx.login("ana@escola.com", "trocada123").await.is_ok());
    assert!(matches!(
        fx.login("ana@escola.com", "segredo123").await.unwrap_err(),
        AppError::InvalidCredentials
    ));
}

#[tokio::test]
async fn new_password_is_validated_before_lookup() {
    let fx = Fixture::new();
    let teacher = fx.register("Carlos", AppRole::Teacher).await;

    let err = fx
        .users
        .change_password(
            &teacher,
            uuid::Uuid::new_v4(),
            &ChangePasswordRequest {
                old_password: None,
                new_password: Some("123".into()),
            },
        )
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "A nova senha deve ter no mínimo 6 caracteres"
    );
}

#[tokio::test]
async fn token_resolves_back_to_the_user() {
    let fx = Fixture::new();
    let ana = fx.register("Ana", AppRole::Student).await;

    let token = fx.login("ana@escola.com", "segredo123").await.unwrap();
    let resolved = fx.auth.authenticate(&token).await.unwrap();

    assert_eq!(resolved, ana);

    let me = fx.auth.get_me(&resolved).await.unwrap();
    assert_eq!(me.data.email, "ana@escola.com");
}

#[tokio::test]
async fn unknown_email_is_reported_as_bad_credentials() {
    let fx = Fixture::new();

    let err = fx.login("ninguem@escola.com", "segredo123").await.unwrap_err();

    assert!(matches!(err, AppError::InvalidCredentials));
}

#[tokio::test]
async fn admin_bootstrap_runs_once() {
    let fx = Fixture::new();
    let admin = AdminBootstrap {
        name: "Administrador".into(),
        email: "admin@escola.com".into(),
        password: "admin123".into(),
    };

    assert!(fx.auth.bootstrap_admin(&admin).await.unwrap());
    assert!(!fx.auth.bootstrap_admin(&admin).await.unwrap());

    assert!(fx.login("admin@escola.com", "admin123").await.is_ok());
}
