//! Authorization for destructive bulk operations

use super::Caller;

/// Outcome of an authorization check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Denied,
}

/// Decides whether a caller may run a guarded operation.
pub trait Authorizer: Send + Sync {
    fn authorize(&self, caller: &Caller) -> Decision;
}

/// A single fixed username/password pair.
#[derive(Clone)]
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Authorizer for StaticCredentials {
    fn authorize(&self, caller: &Caller) -> Decision {
        match caller {
            Caller::Basic { username, password }
                if *username == self.username && *password == self.password =>
            {
                Decision::Allowed
            }
            _ => Decision::Denied,
        }
    }
}
