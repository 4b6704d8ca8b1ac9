/*
 * Responsibility
 * - 環境変数や設定の読み込み (DATABASE_URL, CORS 許可、JWT secret、service account など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// One service account as configured. Any part may be absent; the auth
/// factory decides which entries become login candidates.
#[derive(Clone, Default)]
pub struct ServiceAccountConfig {
    pub username: Option<String>,
    pub password_hash: Option<String>,
}

impl fmt::Debug for ServiceAccountConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountConfig")
            .field("username", &self.username)
            .field("password_hash", &self.password_hash.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub database_max_connections: u32,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,
    pub request_timeout_seconds: u64,

    pub upload_dir: PathBuf,

    // end-user tokens
    pub jwt_secret: String,
    // system tokens, selected by role
    pub jwt_secret_admin: Option<String>,
    pub jwt_secret_dev: Option<String>,

    pub admin_account: ServiceAccountConfig,
    pub developer_account: ServiceAccountConfig,
    pub test_account: ServiceAccountConfig,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print secrets
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .field("upload_dir", &self.upload_dir)
            .field("admin_account", &self.admin_account)
            .field("developer_account", &self.developer_account)
            .field("test_account", &self.test_account)
            .finish_non_exhaustive()
    }
}

// Empty strings count as unset, same as a missing variable.
fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3002);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let database_url =
            non_empty_var("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let database_max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);

        let app_env = AppEnv::from_env();

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let request_timeout_seconds = std::env::var("REQUEST_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(120);

        let upload_dir = non_empty_var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("uploads"));

        let jwt_secret = non_empty_var("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
        let jwt_secret_admin = non_empty_var("JWT_SECRET_ADMIN");
        let jwt_secret_dev = non_empty_var("JWT_SECRET_DEV");

        let admin_account = ServiceAccountConfig {
            username: non_empty_var("ADMIN_USER"),
            password_hash: non_empty_var("ADMIN_PASS"),
        };
        let developer_account = ServiceAccountConfig {
            username: non_empty_var("DEVELOPER_USER"),
            password_hash: non_empty_var("DEVELOPER_PASS"),
        };
        let test_account = ServiceAccountConfig {
            username: non_empty_var("TEST_USER"),
            password_hash: non_empty_var("TEST_PASS"),
        };

        let config = Self {
            addr,
            database_url,
            database_max_connections,
            app_env,
            cors_allowed_origins,
            request_timeout_seconds,
            upload_dir,
            jwt_secret,
            jwt_secret_admin,
            jwt_secret_dev,
            admin_account,
            developer_account,
            test_account,
        };
        config.validate()?;

        Ok(config)
    }

    /// Rejects configurations where two signing secrets coincide: a shared
    /// secret would let a token minted for one scope verify in another.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let admin = self.jwt_secret_admin.as_deref();
        let dev = self.jwt_secret_dev.as_deref();

        if admin == Some(self.jwt_secret.as_str()) {
            return Err(ConfigError::Invalid("JWT_SECRET_ADMIN"));
        }
        if dev == Some(self.jwt_secret.as_str()) {
            return Err(ConfigError::Invalid("JWT_SECRET_DEV"));
        }
        if admin.is_some() && admin == dev {
            return Err(ConfigError::Invalid("JWT_SECRET_DEV"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            addr: "127.0.0.1:0".parse().unwrap(),
            database_url: "postgres://localhost/test".to_string(),
            database_max_connections: 1,
            app_env: AppEnv::Development,
            cors_allowed_origins: Vec::new(),
            request_timeout_seconds: 30,
            upload_dir: PathBuf::from("uploads"),
            jwt_secret: "user-secret".to_string(),
            jwt_secret_admin: Some("admin-secret".to_string()),
            jwt_secret_dev: Some("dev-secret".to_string()),
            admin_account: ServiceAccountConfig::default(),
            developer_account: ServiceAccountConfig::default(),
            test_account: ServiceAccountConfig::default(),
        }
    }

    #[test]
    fn distinct_secrets_are_accepted() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn admin_secret_equal_to_dev_secret_is_rejected() {
        let mut c = config();
        c.jwt_secret_dev = Some("admin-secret".to_string());
        assert!(matches!(
            c.validate(),
            Err(ConfigError::Invalid("JWT_SECRET_DEV"))
        ));
    }

    #[test]
    fn role_secret_equal_to_user_secret_is_rejected() {
        let mut c = config();
        c.jwt_secret_admin = Some("user-secret".to_string());
        assert!(matches!(
            c.validate(),
            Err(ConfigError::Invalid("JWT_SECRET_ADMIN"))
        ));
    }

    #[test]
    fn missing_role_secrets_are_allowed() {
        let mut c = config();
        c.jwt_secret_admin = None;
        c.jwt_secret_dev = None;
        assert!(c.validate().is_ok());
    }
}
