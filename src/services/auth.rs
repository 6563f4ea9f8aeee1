use indexmap::IndexMap;

/// Credential check used by the login screen.
///
/// The shipped implementation compares against a fixed map; swap in a real
/// identity provider by implementing this trait.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, identifier: &str, secret: &str) -> bool;
}

/// Accepts exactly the (identifier, secret) pairs it was built with.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    accepted: IndexMap<String, String>,
}

impl StaticCredentials {
    pub fn new(accepted: IndexMap<String, String>) -> Self {
        Self { accepted }
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, identifier: &str, secret: &str) -> bool {
        self.accepted
            .get(identifier)
            .is_some_and(|expected| expected == secret)
    }
}
