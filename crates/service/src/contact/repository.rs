use std::time::Duration;

use async_trait::async_trait;

use super::domain::Contact;

/// How long a saved collection stays visible after the last `save`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExpiryPolicy {
    pub ttl: Duration,
}

impl ExpiryPolicy {
    pub fn new(ttl: Duration) -> Self { Self { ttl } }
}

impl Default for ExpiryPolicy {
    fn default() -> Self { Self { ttl: Duration::from_secs(24 * 60 * 60) } }
}

/// Whole-collection storage for contacts.
///
/// `load` returns `None` when nothing was saved yet or the last save expired.
/// `save` replaces the collection and restarts its expiry. Neither fails:
/// absence is an ordinary state, not an error.
#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn load(&self) -> Option<Vec<Contact>>;
    async fn save(&self, contacts: Vec<Contact>);
}
