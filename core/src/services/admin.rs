//! Admin-only reporting over the whole data set.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::entities::User;
use crate::errors::DomainError;
use crate::repositories::{ClientRepository, StyleRepository, UserRepository};

/// Record counts across the data set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub users: u64,
    pub clients: u64,
    pub styles: u64,
}

pub struct AdminService<U, C, S>
where
    U: UserRepository,
    C: ClientRepository,
    S: StyleRepository,
{
    user_repo: Arc<U>,
    client_repo: Arc<C>,
    style_repo: Arc<S>,
}

impl<U, C, S> AdminService<U, C, S>
where
    U: UserRepository,
    C: ClientRepository,
    S: StyleRepository,
{
    pub fn new(user_repo: Arc<U>, client_repo: Arc<C>, style_repo: Arc<S>) -> Self {
        Self {
            user_repo,
            client_repo,
            style_repo,
        }
    }

    pub async fn stats(&self) -> Result<Stats, DomainError> {
        Ok(Stats {
            users: self.user_repo.count().await?,
            clients: self.client_repo.count().await?,
            styles: self.style_repo.count().await?,
        })
    }

    pub async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        self.user_repo.list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Client, Style, StyleCategory};
    use crate::repositories::memory::{
        InMemoryClientRepository, InMemoryStyleRepository, InMemoryUserRepository,
    };

    #[tokio::test]
    async fn stats_count_every_collection() {
        let users = Arc::new(InMemoryUserRepository::new());
        let clients = Arc::new(InMemoryClientRepository::new());
        let styles = Arc::new(InMemoryStyleRepository::new());
        let svc = AdminService::new(users.clone(), clients.clone(), styles.clone());

        users
            .create(User::new(
                "Ada".to_string(),
                "ada@x.com".to_string(),
                "$2b$hash".to_string(),
            ))
            .await
            .unwrap();
        clients
            .create(Client::new("Ngozi".to_string(), "+234080".to_string()))
            .await
            .unwrap();
        clients
            .create(Client::new("Chidi".to_string(), "+234081".to_string()))
            .await
            .unwrap();
        styles
            .create(Style::new(
                "Agbada".to_string(),
                StyleCategory::Traditional,
                "https://img/a.png".to_string(),
                "fashion_styles/a".to_string(),
            ))
            .await
            .unwrap();

        assert_eq!(
            svc.stats().await.unwrap(),
            Stats {
                users: 1,
                clients: 2,
                styles: 1,
            }
        );
    }

    #[tokio::test]
    async fn list_users_returns_everyone() {
        let users = Arc::new(InMemoryUserRepository::new());
        let svc = AdminService::new(
            users.clone(),
            Arc::new(InMemoryClientRepository::new()),
            Arc::new(InMemoryStyleRepository::new()),
        );

        users
            .create(User::new(
                "Ada".to_string(),
                "ada@x.com".to_string(),
                "$2b$hash".to_string(),
            ))
            .await
            .unwrap();

        let listed = svc.list_users().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].email, "ada@x.com");
    }
}
