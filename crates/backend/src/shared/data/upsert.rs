//! Generic upsert-by-natural-key executor.
//!
//! Every integration entity persists through the same sequence: look up the
//! record holding the unique key, merge fields into it if found, otherwise
//! create a fresh record. The storage-specific part is behind
//! [`UpsertTarget`]; one adapter per table lives next to its repository.
//!
//! The read-then-write pair is not atomic against concurrent callers with
//! the same key; the unique index on integration_key rejects the losing
//! create.

use async_trait::async_trait;
use contracts::integration::UpsertOutcome;
use sea_orm::ActiveValue;

/// Column update policy behind the no-clobber invariant: an absent value
/// stays `NotSet` so the merge leaves the stored column untouched.
pub fn set_if_present<T: Clone>(value: &Option<T>) -> ActiveValue<Option<T>>
where
    Option<T>: Into<sea_orm::Value>,
{
    match value {
        Some(v) => ActiveValue::Set(Some(v.clone())),
        None => ActiveValue::NotSet,
    }
}

#[async_trait]
pub trait UpsertTarget {
    /// Normalized field set. `None` members are treated as absent and never
    /// overwrite a stored value on update.
    type Fields: Send + Sync;

    /// Record id currently holding the key, if any
    async fn find_by_key(&self, key: &str) -> anyhow::Result<Option<String>>;

    /// Create a record from key + fields, returning its id
    async fn insert(&self, key: &str, fields: &Self::Fields) -> anyhow::Result<String>;

    /// Merge fields into the existing record
    async fn update(&self, id: &str, fields: &Self::Fields) -> anyhow::Result<()>;
}

pub async fn upsert_by_key<T>(
    target: &T,
    key: &str,
    fields: &T::Fields,
) -> anyhow::Result<UpsertOutcome>
where
    T: UpsertTarget + Sync,
{
    match target.find_by_key(key).await? {
        Some(id) => {
            tracing::debug!(key, "updating existing record");
            target.update(&id, fields).await?;
            Ok(UpsertOutcome::updated(id))
        }
        None => {
            tracing::debug!(key, "inserting new record");
            let id = target.insert(key, fields).await?;
            Ok(UpsertOutcome::created(id))
        }
    }
}
