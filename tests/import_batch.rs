use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use finite_storefront_api::{
    dto::{categories::CategoryPayload, products::ProductPayload},
    error::{AppError, AppResult},
    models::{Category, Product},
    services::import_service::{import_products, parse_catalogue},
    store::CatalogStore,
};

/// In-memory stand-in for the persistence collaborator. Creates can be
/// forced to fail for named products to exercise the partial-failure path.
struct MemoryCatalog {
    categories: Vec<Category>,
    products: Mutex<Vec<Product>>,
    fail_for: Vec<String>,
}

impl MemoryCatalog {
    fn with_categories(names: &[&str]) -> Self {
        let categories = names
            .iter()
            .map(|name| Category {
                id: Uuid::new_v4(),
                name: name.to_string(),
                description: None,
                created_at: Utc::now(),
            })
            .collect();
        Self {
            categories,
            products: Mutex::new(Vec::new()),
            fail_for: Vec::new(),
        }
    }

    fn failing_for(mut self, name: &str) -> Self {
        self.fail_for.push(name.to_string());
        self
    }

    fn created(&self) -> Vec<Product> {
        self.products.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    async fn list_categories(&self) -> AppResult<Vec<Category>> {
        Ok(self.categories.clone())
    }

    async fn create_category(&self, payload: CategoryPayload) -> AppResult<Category> {
        if self
            .categories
            .iter()
            .any(|c| c.name.eq_ignore_ascii_case(&payload.name))
        {
            return Err(AppError::DuplicateCategory(payload.name));
        }
        Ok(Category {
            id: Uuid::new_v4(),
            name: payload.name,
            description: payload.description,
            created_at: Utc::now(),
        })
    }

    async fn update_category(&self, _id: Uuid, payload: CategoryPayload) -> AppResult<Category> {
        Ok(Category {
            id: Uuid::new_v4(),
            name: payload.name,
            description: payload.description,
            created_at: Utc::now(),
        })
    }

    async fn delete_category(&self, _id: Uuid) -> AppResult<()> {
        Ok(())
    }

    async fn list_products(&self, active_only: bool) -> AppResult<Vec<Product>> {
        let products = self.products.lock().unwrap();
        Ok(products
            .iter()
            .filter(|p| !active_only || p.is_active)
            .cloned()
            .collect())
    }

    async fn get_product(&self, id: Uuid) -> AppResult<Option<Product>> {
        let products = self.products.lock().unwrap();
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn create_product(&self, payload: ProductPayload) -> AppResult<Product> {
        if self.fail_for.contains(&payload.name) {
            return Err(AppError::BadRequest("row level security".to_string()));
        }
        let product = Product {
            id: Uuid::new_v4(),
            name: payload.name,
            price: payload.price,
            category_id: payload.category_id,
            images: payload.images,
            sizes: payload.sizes,
            colors: payload.colors,
            description: payload.description,
            is_active: payload.is_active,
            is_new_arrival: payload.is_new_arrival,
            is_best_seller: payload.is_best_seller,
            is_on_sale: payload.is_on_sale,
            sale_price: payload.sale_price,
            created_at: Utc::now(),
        };
        self.products.lock().unwrap().push(product.clone());
        Ok(product)
    }

    async fn update_product(&self, _id: Uuid, _payload: ProductPayload) -> AppResult<Product> {
        Err(AppError::NotFound)
    }

    async fn delete_product(&self, _id: Uuid) -> AppResult<()> {
        Ok(())
    }
}

const HEADER: &str = "name,price,category,sizes,colors,description,is_new_arrival,is_best_seller,is_on_sale,sale_price,image_url";

#[tokio::test]
async fn quoted_record_imports_with_all_fields_mapped() {
    let store = MemoryCatalog::with_categories(&["Shirts"]);
    let text = format!(
        "{HEADER}\nBlack Oxford Shirt,25000,Shirts,\"S,M,L,XL\",\"Black,White\",desc,true,false,false,,url"
    );

    let report = import_products(&store, parse_catalogue(&text)).await.unwrap();
    assert_eq!(report.success, 1);
    assert_eq!(report.failed, 0);

    let created = store.created();
    let p = &created[0];
    assert_eq!(p.name, "Black Oxford Shirt");
    assert_eq!(p.price, 25000);
    assert_eq!(p.sizes, vec!["S", "M", "L", "XL"]);
    assert_eq!(p.colors.as_deref(), Some(&["Black".to_string(), "White".to_string()][..]));
    assert_eq!(p.images, vec!["url"]);
    assert!(p.is_new_arrival && !p.is_best_seller && !p.is_on_sale);
    assert!(p.is_active);
    assert_eq!(p.sale_price, None);
}

#[tokio::test]
async fn unknown_category_is_rejected_but_the_batch_continues() {
    let store = MemoryCatalog::with_categories(&["Shirts", "Shoes"]);
    let text = format!(
        "{HEADER}\n\
        Gold Chronograph,120000,Watches,,,fine watch,false,false,false,,\n\
        White Sneakers,45000,Shoes,\"40,41\",White,,false,true,false,,url"
    );

    let report = import_products(&store, parse_catalogue(&text)).await.unwrap();
    assert_eq!(report.success, 1);
    assert_eq!(report.failed, 1);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].contains("Watches"));
    assert!(report.errors[0].contains("Gold Chronograph"));

    assert_eq!(store.created().len(), 1);
    assert_eq!(store.created()[0].name, "White Sneakers");
}

#[tokio::test]
async fn ten_line_batch_with_three_invalid_reports_seven_and_three_in_order() {
    let store = MemoryCatalog::with_categories(&["Shirts"]);
    let mut lines = vec![HEADER.to_string()];
    for i in 1..=4 {
        lines.push(format!("Shirt {i},1000,Shirts,M,,,false,false,false,,"));
    }
    lines.push(",5000,Shirts,M,,,false,false,false,,".to_string()); // missing name
    lines.push("Free Shirt,0,Shirts,M,,,false,false,false,,".to_string()); // bad price
    for i in 5..=7 {
        lines.push(format!("Shirt {i},1000,Shirts,M,,,false,false,false,,"));
    }
    lines.push("Odd Watch,9000,Watches,M,,,false,false,false,,".to_string()); // bad category

    let report = import_products(&store, parse_catalogue(&lines.join("\n")))
        .await
        .unwrap();

    assert_eq!(report.success, 7);
    assert_eq!(report.failed, 3);
    assert_eq!(report.errors.len(), 3);
    // Errors arrive in input order.
    assert_eq!(report.errors[0], "Missing name for product");
    assert_eq!(report.errors[1], "Invalid price for \"Free Shirt\"");
    assert_eq!(
        report.errors[2],
        "Category \"Watches\" not found for \"Odd Watch\". Create it first."
    );
}

#[tokio::test]
async fn category_names_match_case_insensitively() {
    let store = MemoryCatalog::with_categories(&["Shirts"]);
    let text = format!("{HEADER}\nPlain Tee,9000,sHiRtS,M,,,false,false,false,,");

    let report = import_products(&store, parse_catalogue(&text)).await.unwrap();
    assert_eq!(report.success, 1);
    assert_eq!(store.created()[0].category_id, store.categories[0].id);
}

#[tokio::test]
async fn empty_size_list_falls_back_to_one_size() {
    let store = MemoryCatalog::with_categories(&["Perfume"]);
    let text = format!("{HEADER}\nNoir Perfume,35000,Perfume,,,,false,false,false,,");

    let report = import_products(&store, parse_catalogue(&text)).await.unwrap();
    assert_eq!(report.success, 1);

    let created = store.created();
    assert_eq!(created[0].sizes, vec!["One Size"]);
    assert_eq!(created[0].colors, None);
    assert_eq!(created[0].description, None);
    assert!(created[0].images.is_empty());
}

#[tokio::test]
async fn store_failures_are_wrapped_with_the_record_name() {
    let store = MemoryCatalog::with_categories(&["Shirts"]).failing_for("Cursed Shirt");
    let text = format!(
        "{HEADER}\n\
        Cursed Shirt,1000,Shirts,M,,,false,false,false,,\n\
        Lucky Shirt,1000,Shirts,M,,,false,false,false,,"
    );

    let report = import_products(&store, parse_catalogue(&text)).await.unwrap();
    assert_eq!(report.success, 1);
    assert_eq!(report.failed, 1);
    assert!(report.errors[0].starts_with("Failed to import \"Cursed Shirt\":"));

    // The failure does not stop the later record.
    assert_eq!(store.created()[0].name, "Lucky Shirt");
}

#[tokio::test]
async fn duplicate_category_creation_is_a_distinct_error() {
    let store = MemoryCatalog::with_categories(&["Shirts"]);
    let err = store
        .create_category(CategoryPayload {
            name: "shirts".to_string(),
            description: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::DuplicateCategory(_)));
}
