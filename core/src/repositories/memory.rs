//! In-memory repository implementations.
//!
//! Used by unit tests and by the API integration tests, which exercise the
//! full HTTP surface without a database. Behavior mirrors the MySQL
//! implementations, including the conditional refresh-token swap and the
//! at-most-once style-link invariant.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::{Client, Style, StyleCategory, User};
use crate::errors::DomainError;
use crate::repositories::{ClientRepository, StyleRepository, UserRepository};

/// In-memory [`UserRepository`].
#[derive(Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_google_id(&self, google_id: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.google_id.as_deref() == Some(google_id))
            .cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(DomainError::conflict(format!(
                "Duplicate field value: {}. Please use another value.",
                user.email
            )));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(DomainError::not_found("User"));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn swap_refresh_token(
        &self,
        user_id: Uuid,
        current: Option<&str>,
        next: Option<&str>,
    ) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;
        match users.get_mut(&user_id) {
            Some(user) if user.refresh_token.as_deref() == current => {
                user.refresh_token = next.map(|t| t.to_string());
                user.updated_at = chrono::Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let mut all: Vec<User> = self.users.read().await.values().cloned().collect();
        all.sort_by_key(|u| u.created_at);
        Ok(all)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.users.read().await.len() as u64)
    }
}

/// In-memory [`ClientRepository`].
#[derive(Default, Clone)]
pub struct InMemoryClientRepository {
    clients: Arc<RwLock<HashMap<Uuid, Client>>>,
}

impl InMemoryClientRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[async_trait]
impl ClientRepository for InMemoryClientRepository {
    async fn create(&self, client: Client) -> Result<Client, DomainError> {
        let mut clients = self.clients.write().await;
        if clients.values().any(|c| c.phone == client.phone) {
            return Err(DomainError::conflict(format!(
                "Duplicate field value: {}. Please use another value.",
                client.phone
            )));
        }
        clients.insert(client.id, client.clone());
        Ok(client)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Client>, DomainError> {
        Ok(self.clients.read().await.get(&id).cloned())
    }

    async fn search(
        &self,
        name: Option<&str>,
        event_type: Option<&str>,
    ) -> Result<Vec<Client>, DomainError> {
        let clients = self.clients.read().await;
        let mut found: Vec<Client> = clients
            .values()
            .filter(|c| name.map_or(true, |n| contains_ci(&c.name, n)))
            .filter(|c| {
                event_type.map_or(true, |e| {
                    c.event_type.as_deref().map_or(false, |ct| contains_ci(ct, e))
                })
            })
            .cloned()
            .collect();
        found.sort_by_key(|c| c.created_at);
        Ok(found)
    }

    async fn update(&self, client: Client) -> Result<Client, DomainError> {
        let mut clients = self.clients.write().await;
        if !clients.contains_key(&client.id) {
            return Err(DomainError::not_found("Client"));
        }
        clients.insert(client.id, client.clone());
        Ok(client)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.clients.write().await.remove(&id).is_some())
    }

    async fn link_style(&self, client_id: Uuid, style_id: Uuid) -> Result<bool, DomainError> {
        let mut clients = self.clients.write().await;
        let client = clients
            .get_mut(&client_id)
            .ok_or_else(|| DomainError::not_found("Client"))?;
        Ok(client.link_style(style_id))
    }

    async fn unlink_style_everywhere(&self, style_id: Uuid) -> Result<u64, DomainError> {
        let mut clients = self.clients.write().await;
        let mut touched = 0;
        for client in clients.values_mut() {
            if client.has_style(style_id) {
                client.unlink_style(style_id);
                touched += 1;
            }
        }
        Ok(touched)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.clients.read().await.len() as u64)
    }
}

/// In-memory [`StyleRepository`].
#[derive(Default, Clone)]
pub struct InMemoryStyleRepository {
    styles: Arc<RwLock<HashMap<Uuid, Style>>>,
}

impl InMemoryStyleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StyleRepository for InMemoryStyleRepository {
    async fn create(&self, style: Style) -> Result<Style, DomainError> {
        self.styles.write().await.insert(style.id, style.clone());
        Ok(style)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Style>, DomainError> {
        Ok(self.styles.read().await.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Style>, DomainError> {
        let styles = self.styles.read().await;
        Ok(ids.iter().filter_map(|id| styles.get(id).cloned()).collect())
    }

    async fn search(
        &self,
        category: Option<StyleCategory>,
        name: Option<&str>,
    ) -> Result<Vec<Style>, DomainError> {
        let styles = self.styles.read().await;
        let mut found: Vec<Style> = styles
            .values()
            .filter(|s| category.map_or(true, |c| s.category == c))
            .filter(|s| name.map_or(true, |n| contains_ci(&s.name, n)))
            .cloned()
            .collect();
        found.sort_by_key(|s| s.created_at);
        Ok(found)
    }

    async fn update(&self, style: Style) -> Result<Style, DomainError> {
        let mut styles = self.styles.write().await;
        if !styles.contains_key(&style.id) {
            return Err(DomainError::not_found("Style"));
        }
        styles.insert(style.id, style.clone());
        Ok(style)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.styles.write().await.remove(&id).is_some())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.styles.read().await.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let repo = InMemoryUserRepository::new();
        let user = User::new("A".to_string(), "a@x.com".to_string(), "h".to_string());
        repo.create(user).await.unwrap();

        let dup = User::new("B".to_string(), "a@x.com".to_string(), "h2".to_string());
        let err = repo.create(dup).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict { .. }));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn refresh_token_swap_is_conditional() {
        let repo = InMemoryUserRepository::new();
        let user = User::new("A".to_string(), "a@x.com".to_string(), "h".to_string());
        let id = user.id;
        repo.create(user).await.unwrap();

        assert!(repo.swap_refresh_token(id, None, Some("t1")).await.unwrap());
        // Stale expectation loses
        assert!(!repo.swap_refresh_token(id, None, Some("t2")).await.unwrap());
        assert!(repo
            .swap_refresh_token(id, Some("t1"), Some("t2"))
            .await
            .unwrap());

        let stored = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.refresh_token.as_deref(), Some("t2"));
    }

    #[tokio::test]
    async fn unlink_style_everywhere_touches_only_linked_clients() {
        let repo = InMemoryClientRepository::new();
        let style_id = Uuid::new_v4();

        let mut a = Client::new("Ada".to_string(), "080".to_string());
        a.link_style(style_id);
        let b = Client::new("Bisi".to_string(), "081".to_string());
        repo.create(a.clone()).await.unwrap();
        repo.create(b).await.unwrap();

        assert_eq!(repo.unlink_style_everywhere(style_id).await.unwrap(), 1);
        let reloaded = repo.find_by_id(a.id).await.unwrap().unwrap();
        assert!(reloaded.style_ids.is_empty());
    }

    #[tokio::test]
    async fn style_search_filters_by_category_and_name() {
        let repo = InMemoryStyleRepository::new();
        repo.create(Style::new(
            "Lace gown".to_string(),
            StyleCategory::Wedding,
            "u1".to_string(),
            "p1".to_string(),
        ))
        .await
        .unwrap();
        repo.create(Style::new(
            "Agbada".to_string(),
            StyleCategory::Traditional,
            "u2".to_string(),
            "p2".to_string(),
        ))
        .await
        .unwrap();

        let weddings = repo.search(Some(StyleCategory::Wedding), None).await.unwrap();
        assert_eq!(weddings.len(), 1);

        let by_name = repo.search(None, Some("gown")).await.unwrap();
        assert_eq!(by_name[0].name, "Lace gown");
    }
}
