use std::sync::Arc;

use async_trait::async_trait;
use moka::future::Cache;

use crate::contact::domain::Contact;
use crate::contact::repository::{ContactRepository, ExpiryPolicy};

const CONTACTS_KEY: &str = "contacts";

/// Contact collection held in a single-entry moka cache. Each insert
/// restarts the entry's time-to-live.
pub struct MokaContactRepository {
    cache: Cache<&'static str, Arc<Vec<Contact>>>,
    policy: ExpiryPolicy,
}

impl MokaContactRepository {
    pub fn new(policy: ExpiryPolicy) -> Self {
        let cache = Cache::builder().time_to_live(policy.ttl).build();
        Self { cache, policy }
    }

    pub fn policy(&self) -> ExpiryPolicy { self.policy }
}

#[async_trait]
impl ContactRepository for MokaContactRepository {
    async fn load(&self) -> Option<Vec<Contact>> {
        self.cache.get(&CONTACTS_KEY).await.map(|c| c.as_ref().clone())
    }

    async fn save(&self, contacts: Vec<Contact>) {
        self.cache.insert(CONTACTS_KEY, Arc::new(contacts)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn contact(id: u32) -> Contact {
        Contact {
            id,
            name: format!("c{id}"),
            title: Some("t".into()),
            phone: "1".into(),
            email: "c@x.com".into(),
            linkedin: None,
            twitter: None,
            github: None,
        }
    }

    #[tokio::test]
    async fn round_trips_the_collection() {
        let repo = MokaContactRepository::new(ExpiryPolicy::default());
        assert!(repo.load().await.is_none());
        repo.save(vec![contact(1), contact(2)]).await;
        assert_eq!(repo.load().await, Some(vec![contact(1), contact(2)]));
        repo.save(Vec::new()).await;
        assert_eq!(repo.load().await, Some(Vec::new()));
    }

    #[tokio::test]
    async fn entry_expires_after_ttl() {
        let repo = MokaContactRepository::new(ExpiryPolicy::new(Duration::from_millis(100)));
        assert_eq!(repo.policy().ttl, Duration::from_millis(100));
        repo.save(vec![contact(1)]).await;
        assert!(repo.load().await.is_some());

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert!(repo.load().await.is_none());
    }
}
