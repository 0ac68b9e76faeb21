use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    db::DbPool,
    dto::{categories::CategoryPayload, products::ProductPayload},
    error::{AppError, AppResult},
    models::{Category, Product},
};

/// Persistence collaborator for the catalogue. Admin CRUD, the storefront
/// listing and the import loop all go through this seam, so tests can swap
/// in an in-memory double.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn list_categories(&self) -> AppResult<Vec<Category>>;
    /// Duplicate names surface as `AppError::DuplicateCategory`.
    async fn create_category(&self, payload: CategoryPayload) -> AppResult<Category>;
    async fn update_category(&self, id: Uuid, payload: CategoryPayload) -> AppResult<Category>;
    async fn delete_category(&self, id: Uuid) -> AppResult<()>;

    async fn list_products(&self, active_only: bool) -> AppResult<Vec<Product>>;
    async fn get_product(&self, id: Uuid) -> AppResult<Option<Product>>;
    async fn create_product(&self, payload: ProductPayload) -> AppResult<Product>;
    async fn update_product(&self, id: Uuid, payload: ProductPayload) -> AppResult<Product>;
    async fn delete_product(&self, id: Uuid) -> AppResult<()>;
}

#[derive(Clone)]
pub struct PgCatalogStore {
    pool: DbPool,
}

impl PgCatalogStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn list_categories(&self) -> AppResult<Vec<Category>> {
        let categories =
            sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name")
                .fetch_all(&self.pool)
                .await?;
        Ok(categories)
    }

    async fn create_category(&self, payload: CategoryPayload) -> AppResult<Category> {
        let result = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (id, name, description) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(payload.name.as_str())
        .bind(payload.description.as_deref())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(category) => Ok(category),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(AppError::DuplicateCategory(payload.name))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn update_category(&self, id: Uuid, payload: CategoryPayload) -> AppResult<Category> {
        let result = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = $2, description = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.name.as_str())
        .bind(payload.description.as_deref())
        .fetch_optional(&self.pool)
        .await;

        match result {
            Ok(Some(category)) => Ok(category),
            Ok(None) => Err(AppError::NotFound),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(AppError::DuplicateCategory(payload.name))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn delete_category(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn list_products(&self, active_only: bool) -> AppResult<Vec<Product>> {
        let query = if active_only {
            "SELECT * FROM products WHERE is_active ORDER BY created_at DESC"
        } else {
            "SELECT * FROM products ORDER BY created_at DESC"
        };
        let products = sqlx::query_as::<_, Product>(query)
            .fetch_all(&self.pool)
            .await?;
        Ok(products)
    }

    async fn get_product(&self, id: Uuid) -> AppResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }

    async fn create_product(&self, payload: ProductPayload) -> AppResult<Product> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products
                (id, name, price, category_id, images, sizes, colors, description,
                 is_active, is_new_arrival, is_best_seller, is_on_sale, sale_price)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(payload.name)
        .bind(payload.price)
        .bind(payload.category_id)
        .bind(payload.images)
        .bind(payload.sizes)
        .bind(payload.colors)
        .bind(payload.description)
        .bind(payload.is_active)
        .bind(payload.is_new_arrival)
        .bind(payload.is_best_seller)
        .bind(payload.is_on_sale)
        .bind(payload.sale_price)
        .fetch_one(&self.pool)
        .await?;
        Ok(product)
    }

    async fn update_product(&self, id: Uuid, payload: ProductPayload) -> AppResult<Product> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = $2, price = $3, category_id = $4, images = $5, sizes = $6,
                colors = $7, description = $8, is_active = $9, is_new_arrival = $10,
                is_best_seller = $11, is_on_sale = $12, sale_price = $13
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.name)
        .bind(payload.price)
        .bind(payload.category_id)
        .bind(payload.images)
        .bind(payload.sizes)
        .bind(payload.colors)
        .bind(payload.description)
        .bind(payload.is_active)
        .bind(payload.is_new_arrival)
        .bind(payload.is_best_seller)
        .bind(payload.is_on_sale)
        .bind(payload.sale_price)
        .fetch_optional(&self.pool)
        .await?;

        product.ok_or(AppError::NotFound)
    }

    async fn delete_product(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
