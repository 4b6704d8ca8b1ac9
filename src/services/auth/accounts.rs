use crate::config::ServiceAccountConfig;
use crate::services::auth::claims::Role;
use crate::services::auth::keys::{SigningKey, SigningKeys};

/// A statically configured service account eligible for system login.
#[derive(Debug, Clone)]
pub struct ServiceCredential {
    pub role: Role,
    pub username: String,
    pub password_hash: String,
    pub signing_key: Option<SigningKey>,
}

/// The login candidates, built once at startup and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ServiceAccounts {
    candidates: Vec<ServiceCredential>,
}

impl ServiceAccounts {
    /// Builds the candidate list in lookup order: admin, developer, test.
    /// The test account shares the developer role and secret. Entries missing
    /// a username or a password hash are dropped.
    pub fn from_config(
        admin: &ServiceAccountConfig,
        developer: &ServiceAccountConfig,
        test: &ServiceAccountConfig,
        keys: &SigningKeys,
    ) -> Self {
        let candidates = [(Role::Admin, admin), (Role::Dev, developer), (Role::Dev, test)]
            .into_iter()
            .filter_map(|(role, account)| {
                let username = account.username.clone()?;
                let password_hash = account.password_hash.clone()?;
                Some(ServiceCredential {
                    role,
                    username,
                    password_hash,
                    signing_key: keys.for_role(role).cloned(),
                })
            })
            .collect();

        Self { candidates }
    }

    pub fn find(&self, username: &str) -> Option<&ServiceCredential> {
        self.candidates.iter().find(|c| c.username == username)
    }

    /// A real stored hash to verify against when the username is unknown,
    /// so both paths pay the same bcrypt cost.
    pub fn decoy_hash(&self) -> Option<&str> {
        self.candidates.first().map(|c| c.password_hash.as_str())
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(user: Option<&str>, hash: Option<&str>) -> ServiceAccountConfig {
        ServiceAccountConfig {
            username: user.map(str::to_string),
            password_hash: hash.map(str::to_string),
        }
    }

    fn keys() -> SigningKeys {
        SigningKeys::new("user-secret", Some("admin-secret"), Some("dev-secret"))
    }

    #[test]
    fn test_account_is_a_developer() {
        let accounts = ServiceAccounts::from_config(
            &account(Some("root"), Some("h1")),
            &account(Some("dev1"), Some("h2")),
            &account(Some("tester"), Some("h3")),
            &keys(),
        );

        assert_eq!(accounts.len(), 3);
        assert_eq!(accounts.find("root").unwrap().role, Role::Admin);
        assert_eq!(accounts.find("dev1").unwrap().role, Role::Dev);
        assert_eq!(accounts.find("tester").unwrap().role, Role::Dev);
    }

    #[test]
    fn incomplete_entries_are_not_candidates() {
        let accounts = ServiceAccounts::from_config(
            &account(Some("root"), None),
            &account(None, Some("h2")),
            &account(Some("tester"), Some("h3")),
            &keys(),
        );

        assert_eq!(accounts.len(), 1);
        assert!(accounts.find("root").is_none());
        assert!(accounts.find("tester").is_some());
    }

    #[test]
    fn decoy_hash_comes_from_the_first_candidate() {
        let accounts = ServiceAccounts::from_config(
            &account(None, None),
            &account(Some("dev1"), Some("h2")),
            &account(Some("tester"), Some("h3")),
            &keys(),
        );
        assert_eq!(accounts.decoy_hash(), Some("h2"));
        assert_eq!(ServiceAccounts::default().decoy_hash(), None);
    }

    #[test]
    fn lookup_is_exact() {
        let accounts = ServiceAccounts::from_config(
            &account(Some("root"), Some("h1")),
            &ServiceAccountConfig::default(),
            &ServiceAccountConfig::default(),
            &keys(),
        );

        assert!(accounts.find("Root").is_none());
        assert!(accounts.find("root ").is_none());
        assert!(accounts.find("").is_none());
    }

    #[test]
    fn missing_role_secret_leaves_the_candidate_without_a_key() {
        let keys = SigningKeys::new("user-secret", Some("admin-secret"), None);
        let accounts = ServiceAccounts::from_config(
            &account(Some("root"), Some("h1")),
            &account(Some("dev1"), Some("h2")),
            &ServiceAccountConfig::default(),
            &keys,
        );

        assert!(accounts.find("root").unwrap().signing_key.is_some());
        assert!(accounts.find("dev1").unwrap().signing_key.is_none());
    }
}
