use serde_json::Value;
use uuid::Uuid;

use crate::db::DbPool;

/// Administrative activity recorded in `audit_logs`. The variant decides both
/// the `action` string and the `resource` column.
#[derive(Debug, Clone, Copy)]
pub enum AuditAction {
    UserRegister,
    UserLogin,
    ProductCreate,
    ProductUpdate,
    ProductDelete,
    CategoryCreate,
    CategoryUpdate,
    CategoryDelete,
    CatalogueImport,
    ImageUpload,
}

impl AuditAction {
    pub fn as_str(self) -> &'static str {
        match self {
            AuditAction::UserRegister => "user_register",
            AuditAction::UserLogin => "user_login",
            AuditAction::ProductCreate => "product_create",
            AuditAction::ProductUpdate => "product_update",
            AuditAction::ProductDelete => "product_delete",
            AuditAction::CategoryCreate => "category_create",
            AuditAction::CategoryUpdate => "category_update",
            AuditAction::CategoryDelete => "category_delete",
            AuditAction::CatalogueImport => "products_import",
            AuditAction::ImageUpload => "image_upload",
        }
    }

    fn resource(self) -> &'static str {
        match self {
            AuditAction::UserRegister | AuditAction::UserLogin => "users",
            AuditAction::ProductCreate
            | AuditAction::ProductUpdate
            | AuditAction::ProductDelete
            | AuditAction::CatalogueImport => "products",
            AuditAction::CategoryCreate
            | AuditAction::CategoryUpdate
            | AuditAction::CategoryDelete => "categories",
            AuditAction::ImageUpload => "uploads",
        }
    }
}

/// Best-effort audit write. A failed insert is logged and never fails the
/// request that triggered it.
pub async fn record(pool: &DbPool, actor: Option<Uuid>, action: AuditAction, detail: Option<Value>) {
    let result = sqlx::query(
        r#"
        INSERT INTO audit_logs (id, user_id, action, resource, metadata)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(actor)
    .bind(action.as_str())
    .bind(action.resource())
    .bind(detail)
    .execute(pool)
    .await;

    if let Err(err) = result {
        tracing::warn!(error = %err, action = action.as_str(), "audit write failed");
    }
}
