use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    cart::CartLine,
    dto::{
        auth::{LoginRequest, LoginResponse, RegisterRequest},
        cart::{
            AddItemRequest, CartView, CheckoutRequest, CheckoutResponse, CreateCartResponse,
            RemoveItemRequest, UpdateQuantityRequest,
        },
        categories::{CategoryList, CategoryPayload},
        import::ImportReport,
        products::{ProductList, ProductPayload},
        uploads::{RawUpload, UploadResponse},
    },
    models::{Category, Product, User},
    response::{ApiResponse, Meta},
    routes::{
        admin, auth, cart, categories,
        health::{self, HealthData},
        params, products,
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::register,
        products::list_products,
        products::get_product,
        categories::list_categories,
        cart::create_cart,
        cart::view_cart,
        cart::add_item,
        cart::update_quantity,
        cart::remove_item,
        cart::clear_cart,
        cart::checkout,
        admin::list_all_products,
        admin::create_product,
        admin::update_product,
        admin::delete_product,
        admin::create_category,
        admin::update_category,
        admin::delete_category,
        admin::import_catalogue,
        admin::download_import_template,
        admin::upload_image,
    ),
    components(
        schemas(
            User,
            Product,
            Category,
            CartLine,
            CartView,
            CreateCartResponse,
            AddItemRequest,
            UpdateQuantityRequest,
            RemoveItemRequest,
            CheckoutRequest,
            CheckoutResponse,
            ProductPayload,
            ProductList,
            CategoryPayload,
            CategoryList,
            ImportReport,
            RawUpload,
            UploadResponse,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            params::ProductQuery,
            params::Collection,
            HealthData,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<CategoryList>,
            ApiResponse<CartView>,
            ApiResponse<CheckoutResponse>,
            ApiResponse<ImportReport>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Storefront catalogue"),
        (name = "Categories", description = "Category listing"),
        (name = "Cart", description = "Session carts and checkout hand-off"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Admin", description = "Catalogue management and import"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
