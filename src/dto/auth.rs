use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::User;

const SESSION_HOURS: i64 = 24;

#[derive(Deserialize, Debug, ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token handed back on login, already carrying the `Bearer ` prefix so
/// clients can put it straight into the Authorization header.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
}

/// Claims carried by a storefront session token.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: usize,
}

impl Claims {
    /// Session claims for a signed-in user. `None` only on clock overflow.
    pub fn for_user(user: &User) -> Option<Self> {
        let expires = Utc::now().checked_add_signed(Duration::hours(SESSION_HOURS))?;
        Some(Self {
            sub: user.id.to_string(),
            role: user.role.clone(),
            exp: expires.timestamp() as usize,
        })
    }
}
