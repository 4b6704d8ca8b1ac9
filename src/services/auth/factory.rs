/// Factory: build the token issuer and verifier from application `Config`.
use std::sync::Arc;

use tracing::{info, warn};

use crate::config::Config;
use crate::services::auth::{ServiceAccounts, SigningKeys, TokenIssuer, TokenVerifier};

pub fn build_auth_services(config: &Config) -> (Arc<TokenIssuer>, Arc<TokenVerifier>) {
    let keys = SigningKeys::new(
        &config.jwt_secret,
        config.jwt_secret_admin.as_deref(),
        config.jwt_secret_dev.as_deref(),
    );

    let accounts = ServiceAccounts::from_config(
        &config.admin_account,
        &config.developer_account,
        &config.test_account,
        &keys,
    );

    if accounts.is_empty() {
        warn!("no service accounts configured; system login will reject every request");
    } else {
        info!(count = accounts.len(), "service accounts loaded");
    }

    let issuer = TokenIssuer::new(accounts, keys.user().clone());
    let verifier = TokenVerifier::new(keys);

    (Arc::new(issuer), Arc::new(verifier))
}
