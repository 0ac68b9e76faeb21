use axum::body::Bytes;
use axum::extract::{Query, State};
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use finite_storefront_api::{
    dto::uploads::{RawUpload, UploadQuery},
    error::AppError,
    middleware::auth::AuthUser,
    routes::admin,
    state::AppState,
    storage::LocalFileStore,
};

fn state_with_media(dir: &std::path::Path) -> AppState {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/unused")
        .expect("lazy pool");
    let files = LocalFileStore::new(dir, "http://127.0.0.1:3000");
    AppState::new(pool, files, "2349033120032".to_string())
}

fn admin_user() -> AuthUser {
    AuthUser {
        user_id: Uuid::new_v4(),
        role: "admin".to_string(),
    }
}

fn temp_media_dir() -> std::path::PathBuf {
    std::env::temp_dir().join(format!("storefront-media-{}", Uuid::new_v4()))
}

#[tokio::test]
async fn upload_writes_the_file_and_returns_its_public_url() {
    let dir = temp_media_dir();
    let state = state_with_media(&dir);

    let response = admin::upload_image(
        State(state),
        admin_user(),
        Query(UploadQuery {
            filename: "uploads/shirt front.jpg".to_string(),
        }),
        RawUpload(Bytes::from_static(b"\x89PNG\r\n")),
    )
    .await
    .expect("upload");
    let data = response.0.data.expect("upload data");

    // Client-supplied directories are stripped; the key is server-generated.
    assert!(data.path.starts_with("products/"));
    assert!(data.path.ends_with("-shirt front.jpg"));
    assert!(data.url.starts_with("http://127.0.0.1:3000/media/products/"));

    let stored = tokio::fs::read(dir.join(&data.path)).await.expect("stored file");
    assert_eq!(stored, b"\x89PNG\r\n");
}

#[tokio::test]
async fn non_admins_cannot_upload() {
    let state = state_with_media(&temp_media_dir());
    let user = AuthUser {
        user_id: Uuid::new_v4(),
        role: "user".to_string(),
    };

    let result = admin::upload_image(
        State(state),
        user,
        Query(UploadQuery {
            filename: "a.jpg".to_string(),
        }),
        RawUpload(Bytes::from_static(b"x")),
    )
    .await;

    assert!(matches!(result, Err(AppError::Forbidden)));
}

#[tokio::test]
async fn empty_uploads_are_rejected() {
    let state = state_with_media(&temp_media_dir());

    let result = admin::upload_image(
        State(state),
        admin_user(),
        Query(UploadQuery {
            filename: "a.jpg".to_string(),
        }),
        RawUpload(Bytes::new()),
    )
    .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
}
