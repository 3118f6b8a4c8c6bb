use async_trait::async_trait;
use tokio::{sync::RwLock, time::Instant};

use crate::contact::domain::Contact;
use crate::contact::repository::{ContactRepository, ExpiryPolicy};

struct Entry {
    contacts: Vec<Contact>,
    expires_at: Instant,
}

/// Process-local collection with an absolute deadline reset by each save.
pub struct InMemoryContactRepository {
    entry: RwLock<Option<Entry>>,
    policy: ExpiryPolicy,
}

impl InMemoryContactRepository {
    pub fn new(policy: ExpiryPolicy) -> Self {
        Self { entry: RwLock::new(None), policy }
    }

    pub fn policy(&self) -> ExpiryPolicy { self.policy }
}

impl Default for InMemoryContactRepository {
    fn default() -> Self { Self::new(ExpiryPolicy::default()) }
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn load(&self) -> Option<Vec<Contact>> {
        let entry = self.entry.read().await;
        entry
            .as_ref()
            .filter(|e| Instant::now() < e.expires_at)
            .map(|e| e.contacts.clone())
    }

    async fn save(&self, contacts: Vec<Contact>) {
        let expires_at = Instant::now() + self.policy.ttl;
        *self.entry.write().await = Some(Entry { contacts, expires_at });
    }
}
