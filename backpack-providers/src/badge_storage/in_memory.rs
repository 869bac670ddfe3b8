use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::badge_storage::{error::BadgeStorageError, BadgeRow, BadgeStorage, StoredBadge};
use crate::common_models::badge::BadgeId;

/// Row store kept in memory, with auto-increment ids and unique `body_hash` and `jwt`
/// columns.
#[derive(Clone, Default)]
pub struct InMemoryBadgeStorage {
    storage: Arc<Mutex<Table>>,
}

#[derive(Default)]
struct Table {
    last_id: u64,
    rows: BTreeMap<BadgeId, BadgeRow>,
}

impl InMemoryBadgeStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.storage.lock().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Table {
    fn check_unique(&self, row: &BadgeRow) -> Result<(), BadgeStorageError> {
        for existing in self.rows.values() {
            if row.body_hash.is_some() && existing.body_hash == row.body_hash {
                return Err(BadgeStorageError::ConstraintViolation(
                    "duplicate body_hash".to_owned(),
                ));
            }
            if row.jwt.is_some() && existing.jwt == row.jwt {
                return Err(BadgeStorageError::ConstraintViolation(
                    "duplicate jwt".to_owned(),
                ));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl BadgeStorage for InMemoryBadgeStorage {
    async fn insert(&self, row: BadgeRow) -> Result<BadgeId, BadgeStorageError> {
        let mut table = self.storage.lock().await;

        table.check_unique(&row)?;

        table.last_id += 1;
        let id = BadgeId::from(table.last_id);
        table.rows.insert(id, row);

        Ok(id)
    }

    async fn get(&self, id: BadgeId) -> Result<Option<StoredBadge>, BadgeStorageError> {
        let table = self.storage.lock().await;

        Ok(table.rows.get(&id).map(|row| StoredBadge {
            id,
            row: row.to_owned(),
        }))
    }

    async fn get_by_body_hash(
        &self,
        body_hash: &str,
    ) -> Result<Option<StoredBadge>, BadgeStorageError> {
        let table = self.storage.lock().await;

        Ok(table
            .rows
            .iter()
            .find(|(_, row)| row.body_hash.as_deref() == Some(body_hash))
            .map(|(id, row)| StoredBadge {
                id: *id,
                row: row.to_owned(),
            }))
    }
}
