use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use uuid::Uuid;

use crate::{cart::Cart, db::DbPool, storage::LocalFileStore, store::PgCatalogStore};

/// Sessions idle this long are dropped on the next sweep.
const CART_IDLE_TTL: Duration = Duration::from_secs(60 * 60 * 24);

struct CartSession {
    cart: Cart,
    last_used: Instant,
}

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub store: PgCatalogStore,
    /// One in-memory cart per shopping session, keyed by the server-issued
    /// cart id. Carts are never persisted.
    carts: Arc<DashMap<Uuid, CartSession>>,
    pub files: LocalFileStore,
    pub whatsapp_number: String,
}

impl AppState {
    pub fn new(pool: DbPool, files: LocalFileStore, whatsapp_number: String) -> Self {
        Self {
            store: PgCatalogStore::new(pool.clone()),
            pool,
            carts: Arc::new(DashMap::new()),
            files,
            whatsapp_number,
        }
    }

    /// Issues a new session cart id. Abandoned sessions are swept
    /// opportunistically here.
    pub fn open_cart(&self) -> Uuid {
        self.evict_carts_idle_for(CART_IDLE_TTL);
        let cart_id = Uuid::new_v4();
        self.carts.insert(
            cart_id,
            CartSession {
                cart: Cart::new(),
                last_used: Instant::now(),
            },
        );
        cart_id
    }

    /// Runs `f` against the session's cart, refreshing its idle timer.
    /// Returns `None` for unknown carts. The map guard never outlives the
    /// closure, so callers cannot hold it across an await.
    pub fn with_cart<T>(&self, cart_id: &Uuid, f: impl FnOnce(&Cart) -> T) -> Option<T> {
        let mut session = self.carts.get_mut(cart_id)?;
        session.last_used = Instant::now();
        Some(f(&session.cart))
    }

    pub fn with_cart_mut<T>(&self, cart_id: &Uuid, f: impl FnOnce(&mut Cart) -> T) -> Option<T> {
        let mut session = self.carts.get_mut(cart_id)?;
        session.last_used = Instant::now();
        Some(f(&mut session.cart))
    }

    /// Drops the session outright. A dispatched order ends the cart.
    pub fn close_cart(&self, cart_id: &Uuid) -> bool {
        self.carts.remove(cart_id).is_some()
    }

    pub fn evict_carts_idle_for(&self, max_idle: Duration) {
        self.carts
            .retain(|_, session| session.last_used.elapsed() < max_idle);
    }
}
