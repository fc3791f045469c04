use db::models::user::Role;
use serde::{Deserialize, Serialize};
use services::AuthContext;

/// JWT payload.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: i64,
    pub role: Role,
    pub exp: usize,
}

impl Claims {
    pub fn context(&self) -> AuthContext {
        AuthContext::new(self.sub, self.role)
    }
}

/// Authenticated caller, placed in request extensions by the guards.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);
