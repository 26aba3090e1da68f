//! Google OAuth2 access token sources

mod service_account;
mod static_token;

pub use service_account::{ServiceAccountKey, ServiceAccountTokenSource, CLOUD_PLATFORM_SCOPE};
pub use static_token::StaticTokenSource;
