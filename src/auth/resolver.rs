use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::auth::repo::User;

/// Maps a bearer credential to the account it belongs to. `None` means the
/// credential matches no account.
#[async_trait]
pub trait CredentialResolver: Send + Sync {
    async fn resolve(&self, credential: &str) -> anyhow::Result<Option<User>>;
}

/// Default resolver: the credential is the user id itself.
pub struct BearerIdResolver {
    db: SqlitePool,
}

impl BearerIdResolver {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CredentialResolver for BearerIdResolver {
    async fn resolve(&self, credential: &str) -> anyhow::Result<Option<User>> {
        let user = User::find_by_id(&self.db, credential).await?;
        Ok(user)
    }
}
