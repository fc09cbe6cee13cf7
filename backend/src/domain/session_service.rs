//! Session gate service.
//!
//! A presence-only flag in an injected key-value store gates the back
//! office: the flag being set means "signed in". There is no credential
//! check, token, or expiry; this is an access convenience, not a security
//! boundary.

use log::info;
use std::sync::Arc;

use crate::domain::DomainError;
use crate::storage::KeyValueStore;

/// Key holding the gate flag.
const AUTH_KEY: &str = "ngo_auth";

/// Service owning the session gate flag.
#[derive(Clone)]
pub struct SessionService {
    store: Arc<dyn KeyValueStore>,
}

impl SessionService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Set the gate flag. The email is recorded as the flag value purely
    /// for display.
    pub fn sign_in(&self, email: &str) -> Result<(), DomainError> {
        self.store.set(AUTH_KEY, email)?;
        info!("Session opened for {}", email);
        Ok(())
    }

    /// Clear the gate flag.
    pub fn sign_out(&self) -> Result<(), DomainError> {
        self.store.remove(AUTH_KEY)?;
        info!("Session closed");
        Ok(())
    }

    /// Presence check: the flag existing at all means signed in.
    pub fn is_signed_in(&self) -> Result<bool, DomainError> {
        Ok(self.store.get(AUTH_KEY)?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKeyValueStore;

    fn create_test_service() -> SessionService {
        SessionService::new(Arc::new(MemoryKeyValueStore::new()))
    }

    #[test]
    fn presence_of_the_flag_is_the_whole_session() {
        let service = create_test_service();
        assert!(!service.is_signed_in().unwrap());

        service.sign_in("treasurer@example.org").unwrap();
        assert!(service.is_signed_in().unwrap());

        service.sign_out().unwrap();
        assert!(!service.is_signed_in().unwrap());
    }

    #[test]
    fn signing_out_twice_is_harmless() {
        let service = create_test_service();
        service.sign_out().unwrap();
        service.sign_out().unwrap();
        assert!(!service.is_signed_in().unwrap());
    }
}
