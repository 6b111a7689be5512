//! Static bearer-token authenticator.
//!
//! Login and credential storage live outside this service; deployments
//! provision tokens out of band and this adapter resolves them to callers.

use std::collections::HashMap;

use crate::domain::ports::{Caller, CallerAuthenticator};
use crate::domain::user::{Role, UserId};

/// Token table resolving bearer tokens to callers.
#[derive(Default)]
pub struct StaticTokenAuthenticator {
    tokens: HashMap<String, Caller>,
}

impl StaticTokenAuthenticator {
    /// Empty table; every token is rejected until one is added.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `token` as `role` for a fresh user id, returning the id so
    /// callers can correlate seeded data.
    pub fn add_token(&mut self, token: impl Into<String>, role: Role) -> UserId {
        let id = UserId::new();
        self.tokens.insert(token.into(), Caller { id, role });
        id
    }
}

impl CallerAuthenticator for StaticTokenAuthenticator {
    fn authenticate(&self, token: &str) -> Option<Caller> {
        self.tokens.get(token).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn known_tokens_resolve_and_unknown_ones_do_not() {
        let mut authenticator = StaticTokenAuthenticator::new();
        let admin_id = authenticator.add_token("admin-token", Role::Admin);

        let caller = authenticator
            .authenticate("admin-token")
            .expect("known token");
        assert_eq!(caller.id, admin_id);
        assert_eq!(caller.role, Role::Admin);
        assert!(authenticator.authenticate("other").is_none());
    }
}
