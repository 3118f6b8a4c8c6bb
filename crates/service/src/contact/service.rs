use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use super::domain::{Contact, ContactInput};
use super::repository::ContactRepository;
use super::vcard::{self, VCardFile};
use crate::errors::ServiceError;

pub const DEFAULT_MAX_CONTACTS: usize = 10;

/// Contact business service independent of web framework.
///
/// Owns the id sequence and the capacity rule. Every mutation holds the
/// sequence lock across its `load`/`save` pair, so concurrent requests can
/// neither exceed capacity nor hand out the same id twice.
pub struct ContactService<R: ContactRepository + ?Sized> {
    repo: Arc<R>,
    max_contacts: usize,
    next_id: Mutex<u32>,
}

impl<R: ContactRepository + ?Sized> ContactService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self::with_capacity(repo, DEFAULT_MAX_CONTACTS) }

    pub fn with_capacity(repo: Arc<R>, max_contacts: usize) -> Self {
        Self { repo, max_contacts, next_id: Mutex::new(1) }
    }

    pub fn max_contacts(&self) -> usize { self.max_contacts }

    /// All stored contacts in insertion order.
    ///
    /// # Examples
    /// ```
    /// use service::contact::{domain::ContactInput, service::ContactService};
    /// use service::storage::memory::InMemoryContactRepository;
    /// use std::sync::Arc;
    /// let svc = ContactService::new(Arc::new(InMemoryContactRepository::default()));
    /// assert!(tokio_test::block_on(svc.list()).is_err());
    /// let input = ContactInput { name: "Ada".into(), phone: "123".into(), email: "a@b.com".into(), ..Default::default() };
    /// tokio_test::block_on(svc.create(input)).unwrap();
    /// assert_eq!(tokio_test::block_on(svc.list()).unwrap().len(), 1);
    /// ```
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Contact>, ServiceError> {
        match self.repo.load().await {
            Some(contacts) if !contacts.is_empty() => Ok(contacts),
            _ => Err(ServiceError::no_contacts()),
        }
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: u32) -> Result<Contact, ServiceError> {
        self.repo
            .load()
            .await
            .unwrap_or_default()
            .into_iter()
            .find(|c| c.id == id)
            .ok_or_else(ServiceError::contact_not_found)
    }

    /// Store a new contact and assign it the next id.
    ///
    /// # Examples
    /// ```
    /// use service::contact::{domain::ContactInput, service::ContactService};
    /// use service::storage::memory::InMemoryContactRepository;
    /// use std::sync::Arc;
    /// let svc = ContactService::new(Arc::new(InMemoryContactRepository::default()));
    /// let input = ContactInput { name: "Ada".into(), phone: "123".into(), email: "a@b.com".into(), ..Default::default() };
    /// let first = tokio_test::block_on(svc.create(input.clone())).unwrap();
    /// let second = tokio_test::block_on(svc.create(input)).unwrap();
    /// assert_eq!((first.id, second.id), (1, 2));
    /// ```
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: ContactInput) -> Result<Contact, ServiceError> {
        let mut next_id = self.next_id.lock().await;
        let mut contacts = self.repo.load().await.unwrap_or_default();
        if contacts.len() >= self.max_contacts {
            debug!(count = contacts.len(), limit = self.max_contacts, "contact capacity reached");
            return Err(ServiceError::CapacityExceeded { limit: self.max_contacts });
        }

        let contact = Contact::from_input(*next_id, input);
        *next_id += 1;
        contacts.push(contact.clone());
        self.repo.save(contacts).await;
        info!(id = contact.id, "contact_created");
        Ok(contact)
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: u32, input: ContactInput) -> Result<Contact, ServiceError> {
        let _guard = self.next_id.lock().await;
        let mut contacts = self.repo.load().await.ok_or_else(ServiceError::contact_not_found)?;
        let existing = contacts
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(ServiceError::contact_not_found)?;
        existing.apply_update(input);
        let updated = existing.clone();
        self.repo.save(contacts).await;
        info!(id, "contact_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: u32) -> Result<(), ServiceError> {
        let _guard = self.next_id.lock().await;
        let mut contacts = self.repo.load().await.ok_or_else(ServiceError::contact_not_found)?;
        let pos = contacts
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(ServiceError::contact_not_found)?;
        contacts.remove(pos);
        self.repo.save(contacts).await;
        info!(id, "contact_deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn export_vcard(&self, id: u32) -> Result<VCardFile, ServiceError> {
        let contact = self.get(id).await?;
        Ok(vcard::export(&contact))
    }
}
