use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    routing::{get, post, put},
};
use uuid::Uuid;

use crate::{
    audit::{self, AuditAction},
    dto::{
        categories::CategoryPayload,
        import::ImportReport,
        products::{ProductList, ProductPayload},
        uploads::{RawUpload, UploadQuery, UploadResponse},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Category, Product},
    response::{ApiResponse, Meta},
    services::import_service::{import_products, import_template, parse_catalogue},
    state::AppState,
    storage::FileStore,
    store::CatalogStore,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_all_products).post(create_product))
        .route("/products/{id}", put(update_product).delete(delete_product))
        .route("/products/import", post(import_catalogue))
        .route("/products/import/template", get(download_import_template))
        .route("/categories", post(create_category))
        .route("/categories/{id}", put(update_category).delete(delete_category))
        .route("/uploads", post(upload_image))
}

fn validate_product(payload: &ProductPayload) -> AppResult<()> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".to_string()));
    }
    if payload.price <= 0 {
        return Err(AppError::BadRequest(
            "price must be greater than 0".to_string(),
        ));
    }
    Ok(())
}

#[utoipa::path(
    get,
    path = "/api/admin/products",
    responses(
        (status = 200, description = "All products, inactive included", body = ApiResponse<ProductList>),
        (status = 403, description = "Not an admin"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_all_products(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    user.require_admin()?;
    let items = state.store.list_products(false).await?;
    let meta = Meta::total(items.len() as i64);
    Ok(Json(ApiResponse::success(
        "Products",
        ProductList { items },
        Some(meta),
    )))
}

#[utoipa::path(
    post,
    path = "/api/admin/products",
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Product created", body = ApiResponse<Product>),
        (status = 400, description = "Bad request"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_product(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<ProductPayload>,
) -> AppResult<Json<ApiResponse<Product>>> {
    user.require_admin()?;
    validate_product(&payload)?;

    let product = state.store.create_product(payload).await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        AuditAction::ProductCreate,
        Some(serde_json::json!({ "product_id": product.id, "name": product.name })),
    )
    .await;

    Ok(Json(ApiResponse::success(
        "Product created",
        product,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    put,
    path = "/api/admin/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<Product>),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProductPayload>,
) -> AppResult<Json<ApiResponse<Product>>> {
    user.require_admin()?;
    validate_product(&payload)?;

    let product = state.store.update_product(id, payload).await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        AuditAction::ProductUpdate,
        Some(serde_json::json!({ "product_id": id })),
    )
    .await;

    Ok(Json(ApiResponse::success(
        "Product updated",
        product,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    delete,
    path = "/api/admin/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    user.require_admin()?;
    state.store.delete_product(id).await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        AuditAction::ProductDelete,
        Some(serde_json::json!({ "product_id": id })),
    )
    .await;

    Ok(Json(ApiResponse::success(
        "Product deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    post,
    path = "/api/admin/categories",
    request_body = CategoryPayload,
    responses(
        (status = 200, description = "Category created", body = ApiResponse<Category>),
        (status = 409, description = "Duplicate category name"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_category(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CategoryPayload>,
) -> AppResult<Json<ApiResponse<Category>>> {
    user.require_admin()?;
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".to_string()));
    }

    let category = state.store.create_category(payload).await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        AuditAction::CategoryCreate,
        Some(serde_json::json!({ "category_id": category.id, "name": category.name })),
    )
    .await;

    Ok(Json(ApiResponse::success(
        "Category created",
        category,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    put,
    path = "/api/admin/categories/{id}",
    params(("id" = Uuid, Path, description = "Category ID")),
    request_body = CategoryPayload,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<Category>),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Duplicate category name"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_category(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CategoryPayload>,
) -> AppResult<Json<ApiResponse<Category>>> {
    user.require_admin()?;
    let category = state.store.update_category(id, payload).await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        AuditAction::CategoryUpdate,
        Some(serde_json::json!({ "category_id": id, "name": category.name })),
    )
    .await;

    Ok(Json(ApiResponse::success(
        "Category updated",
        category,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    delete,
    path = "/api/admin/categories/{id}",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category and its products deleted"),
        (status = 404, description = "Category not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_category(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    user.require_admin()?;
    state.store.delete_category(id).await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        AuditAction::CategoryDelete,
        Some(serde_json::json!({ "category_id": id })),
    )
    .await;

    Ok(Json(ApiResponse::success(
        "Category deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    post,
    path = "/api/admin/products/import",
    request_body = String,
    responses(
        (status = 200, description = "Batch processed; per-record outcomes inside", body = ApiResponse<ImportReport>),
        (status = 400, description = "Nothing importable in the body"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn import_catalogue(
    State(state): State<AppState>,
    user: AuthUser,
    body: String,
) -> AppResult<Json<ApiResponse<ImportReport>>> {
    user.require_admin()?;

    let records = parse_catalogue(&body);
    if records.is_empty() {
        return Err(AppError::BadRequest("No products to import".to_string()));
    }

    let report = import_products(&state.store, records).await?;
    tracing::info!(
        success = report.success,
        failed = report.failed,
        "catalogue import finished"
    );

    audit::record(
        &state.pool,
        Some(user.user_id),
        AuditAction::CatalogueImport,
        Some(serde_json::json!({ "success": report.success, "failed": report.failed })),
    )
    .await;

    Ok(Json(ApiResponse::success(
        "Import finished",
        report,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    get,
    path = "/api/admin/products/import/template",
    responses(
        (status = 200, description = "CSV template download", body = String, content_type = "text/csv"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn download_import_template(user: AuthUser) -> AppResult<impl IntoResponse> {
    user.require_admin()?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"product_import_template.csv\"",
            ),
        ],
        import_template(),
    ))
}

#[utoipa::path(
    post,
    path = "/api/admin/uploads",
    params(("filename" = String, Query, description = "Original file name")),
    request_body(content = RawUpload, content_type = "application/octet-stream"),
    responses(
        (status = 200, description = "Stored object and its public URL", body = ApiResponse<UploadResponse>),
        (status = 400, description = "Bad request"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn upload_image(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<UploadQuery>,
    RawUpload(body): RawUpload,
) -> AppResult<Json<ApiResponse<UploadResponse>>> {
    user.require_admin()?;
    if body.is_empty() {
        return Err(AppError::BadRequest("empty upload".to_string()));
    }

    // Strip any client-supplied directories; uploads are keyed server-side.
    let name = query
        .filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("filename is required".to_string()));
    }

    let path = format!("products/{}-{}", Uuid::new_v4(), name);
    state.files.upload(&path, &body).await?;
    let url = state.files.public_url(&path);

    audit::record(
        &state.pool,
        Some(user.user_id),
        AuditAction::ImageUpload,
        Some(serde_json::json!({ "path": path.as_str() })),
    )
    .await;

    Ok(Json(ApiResponse::success(
        "Uploaded",
        UploadResponse { path, url },
        Some(Meta::empty()),
    )))
}
