use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};
use uuid::Uuid;

use crate::{
    checkout::{Discount, build_order_message, generate_order_ref, resolve_discount, whatsapp_url},
    dto::cart::{
        AddItemRequest, CartView, CheckoutRequest, CheckoutResponse, CreateCartResponse,
        RemoveItemRequest, UpdateQuantityRequest,
    },
    error::{AppError, AppResult},
    response::{ApiResponse, Meta},
    state::AppState,
    store::CatalogStore,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_cart))
        .route(
            "/{cart_id}",
            axum::routing::get(view_cart).delete(clear_cart),
        )
        .route(
            "/{cart_id}/items",
            post(add_item).put(update_quantity).delete(remove_item),
        )
        .route("/{cart_id}/checkout", post(checkout))
}

#[utoipa::path(
    post,
    path = "/api/carts",
    responses(
        (status = 200, description = "New empty cart", body = ApiResponse<CreateCartResponse>)
    ),
    tag = "Cart"
)]
pub async fn create_cart(State(state): State<AppState>) -> Json<ApiResponse<CreateCartResponse>> {
    let cart_id = state.open_cart();
    Json(ApiResponse::success(
        "Cart created",
        CreateCartResponse { cart_id },
        None,
    ))
}

#[utoipa::path(
    get,
    path = "/api/carts/{cart_id}",
    params(("cart_id" = Uuid, Path, description = "Cart ID")),
    responses(
        (status = 200, description = "Cart contents and totals", body = ApiResponse<CartView>),
        (status = 404, description = "Unknown cart"),
    ),
    tag = "Cart"
)]
pub async fn view_cart(
    State(state): State<AppState>,
    Path(cart_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let view = state
        .with_cart(&cart_id, |cart| CartView::from(cart))
        .ok_or(AppError::NotFound)?;
    Ok(Json(ApiResponse::success("Cart", view, None)))
}

#[utoipa::path(
    post,
    path = "/api/carts/{cart_id}/items",
    params(("cart_id" = Uuid, Path, description = "Cart ID")),
    request_body = AddItemRequest,
    responses(
        (status = 200, description = "One unit added, merged by (product, size)", body = ApiResponse<CartView>),
        (status = 400, description = "Unknown product"),
        (status = 404, description = "Unknown cart"),
    ),
    tag = "Cart"
)]
pub async fn add_item(
    State(state): State<AppState>,
    Path(cart_id): Path<Uuid>,
    Json(payload): Json<AddItemRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    // Resolve the product before touching the cart map; the session guard
    // lives only inside the closure.
    let product = state
        .store
        .get_product(payload.product_id)
        .await?
        .filter(|p| p.is_active)
        .ok_or_else(|| AppError::BadRequest("product not found".to_string()))?;

    let view = state
        .with_cart_mut(&cart_id, |cart| {
            cart.add_item(product, &payload.size);
            CartView::from(&*cart)
        })
        .ok_or(AppError::NotFound)?;
    Ok(Json(ApiResponse::success("Added to cart", view, None)))
}

#[utoipa::path(
    put,
    path = "/api/carts/{cart_id}/items",
    params(("cart_id" = Uuid, Path, description = "Cart ID")),
    request_body = UpdateQuantityRequest,
    responses(
        (status = 200, description = "Quantity set; zero or below removes the line", body = ApiResponse<CartView>),
        (status = 404, description = "Unknown cart"),
    ),
    tag = "Cart"
)]
pub async fn update_quantity(
    State(state): State<AppState>,
    Path(cart_id): Path<Uuid>,
    Json(payload): Json<UpdateQuantityRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let view = state
        .with_cart_mut(&cart_id, |cart| {
            cart.update_quantity(payload.product_id, &payload.size, payload.quantity);
            CartView::from(&*cart)
        })
        .ok_or(AppError::NotFound)?;
    Ok(Json(ApiResponse::success("Cart updated", view, None)))
}

#[utoipa::path(
    delete,
    path = "/api/carts/{cart_id}/items",
    params(("cart_id" = Uuid, Path, description = "Cart ID")),
    request_body = RemoveItemRequest,
    responses(
        (status = 200, description = "Line removed if present", body = ApiResponse<CartView>),
        (status = 404, description = "Unknown cart"),
    ),
    tag = "Cart"
)]
pub async fn remove_item(
    State(state): State<AppState>,
    Path(cart_id): Path<Uuid>,
    Json(payload): Json<RemoveItemRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let view = state
        .with_cart_mut(&cart_id, |cart| {
            cart.remove_item(payload.product_id, &payload.size);
            CartView::from(&*cart)
        })
        .ok_or(AppError::NotFound)?;
    Ok(Json(ApiResponse::success("Removed from cart", view, None)))
}

#[utoipa::path(
    delete,
    path = "/api/carts/{cart_id}",
    params(("cart_id" = Uuid, Path, description = "Cart ID")),
    responses(
        (status = 200, description = "Cart emptied; the session stays open", body = ApiResponse<CartView>),
        (status = 404, description = "Unknown cart"),
    ),
    tag = "Cart"
)]
pub async fn clear_cart(
    State(state): State<AppState>,
    Path(cart_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let view = state
        .with_cart_mut(&cart_id, |cart| {
            cart.clear();
            CartView::from(&*cart)
        })
        .ok_or(AppError::NotFound)?;
    Ok(Json(ApiResponse::success(
        "Cart cleared",
        view,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    post,
    path = "/api/carts/{cart_id}/checkout",
    params(("cart_id" = Uuid, Path, description = "Cart ID")),
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Order message and hand-off URL; the cart session is removed", body = ApiResponse<CheckoutResponse>),
        (status = 400, description = "Empty cart or invalid discount code"),
        (status = 404, description = "Unknown cart"),
    ),
    tag = "Cart"
)]
pub async fn checkout(
    State(state): State<AppState>,
    Path(cart_id): Path<Uuid>,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<Json<ApiResponse<CheckoutResponse>>> {
    let code = payload.discount_code.as_deref();
    let prepared: AppResult<(i64, Discount, String, String)> = state
        .with_cart(&cart_id, |cart| {
            if cart.is_empty() {
                return Err(AppError::BadRequest("Cart is empty".to_string()));
            }
            let subtotal = cart.total_price();
            let discount = resolve_discount(subtotal, code)?;
            let order_ref = generate_order_ref();
            let message = build_order_message(cart.lines(), subtotal, &discount, &order_ref);
            Ok((subtotal, discount, order_ref, message))
        })
        .ok_or(AppError::NotFound)?;
    let (subtotal, discount, order_ref, message) = prepared?;

    let url = whatsapp_url(&state.whatsapp_number, &message);

    // A dispatched order ends the session; the cart entry goes with it.
    state.close_cart(&cart_id);

    tracing::info!(order_ref = %order_ref, subtotal, "checkout dispatched");

    Ok(Json(ApiResponse::success(
        "Order ready",
        CheckoutResponse {
            order_ref,
            message,
            whatsapp_url: url,
            subtotal,
            discount: discount.amount(),
            total: subtotal - discount.amount(),
        },
        None,
    )))
}
