use std::{collections::HashMap, hash::Hash, path::PathBuf, sync::Arc};
use tokio::{fs, sync::RwLock};

use crate::errors::ServiceError;

/// Generic key-value map store, optionally persisted to a JSON file.
///
/// File-backed stores rewrite the whole file after every mutation, which is
/// fine for the small record sets this service tracks. In-memory stores skip
/// persistence entirely and are what tests run against.
#[derive(Clone)]
pub struct JsonMapStore<K, V> {
    inner: Arc<RwLock<HashMap<K, V>>>,
    file_path: Option<PathBuf>,
}

impl<K, V> JsonMapStore<K, V>
where
    K: Eq + Hash + serde::Serialize + serde::de::DeserializeOwned + Clone,
    V: serde::Serialize + serde::de::DeserializeOwned + Clone,
{
    /// Initialize the store from a path. Creates the file with an empty map if missing.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.ok();
        }

        let map: HashMap<K, V> = match fs::read(&file_path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                ServiceError::Db(format!("corrupt store file {}: {e}", file_path.display()))
            })?,
            Err(_) => {
                let empty: HashMap<K, V> = HashMap::new();
                fs::write(&file_path, serde_json::to_vec(&empty).map_err(|e| ServiceError::Db(e.to_string()))?)
                    .await
                    .map_err(|e| ServiceError::Db(e.to_string()))?;
                empty
            }
        };

        Ok(Arc::new(Self { inner: Arc::new(RwLock::new(map)), file_path: Some(file_path) }))
    }

    /// Store that lives only as long as the process.
    pub fn in_memory() -> Arc<Self> {
        Arc::new(Self { inner: Arc::new(RwLock::new(HashMap::new())), file_path: None })
    }

    async fn save(&self, map: &HashMap<K, V>) -> Result<(), ServiceError> {
        let Some(path) = &self.file_path else { return Ok(()) };
        let data = serde_json::to_vec(map).map_err(|e| ServiceError::Db(e.to_string()))?;
        fs::write(path, data).await.map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(())
    }

    /// All values, in no particular order.
    pub async fn values(&self) -> Vec<V> {
        let map = self.inner.read().await;
        map.values().cloned().collect()
    }

    /// Get value by key.
    pub async fn get(&self, key: &K) -> Option<V> {
        let map = self.inner.read().await;
        map.get(key).cloned()
    }

    /// Values matching a predicate, in no particular order.
    pub async fn filter<F>(&self, pred: F) -> Vec<V>
    where
        F: Fn(&V) -> bool,
    {
        let map = self.inner.read().await;
        map.values().filter(|v| pred(v)).cloned().collect()
    }

    /// Remove a key and persist; returns whether it existed.
    pub async fn remove(&self, key: &K) -> Result<bool, ServiceError> {
        self.update_map(|m| Ok(m.remove(key).is_some())).await
    }

    /// Apply a mutation under the write lock and persist.
    ///
    /// Check-then-write sequences go through here so no other writer can
    /// interleave between the check and the write. The mutation runs on a copy
    /// that replaces the live map only after it is saved, so a failing closure
    /// or a failed write leaves the store unchanged.
    pub async fn update_map<F, R>(&self, f: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut HashMap<K, V>) -> Result<R, ServiceError>,
    {
        let mut map = self.inner.write().await;
        let mut next = map.clone();
        let out = f(&mut next)?;
        self.save(&next).await?;
        *map = next;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn json_map_store_crud_persists() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("json_map_store_{}.json", uuid::Uuid::new_v4()));
        let store = JsonMapStore::<String, String>::new(&tmp).await?;

        // initially empty
        assert_eq!(store.values().await.len(), 0);

        store.update_map(|m| { m.insert("a".into(), "1".into()); Ok(()) }).await?;
        store.update_map(|m| { m.insert("b".into(), "2".into()); Ok(()) }).await?;
        assert_eq!(store.get(&"a".into()).await.as_deref(), Some("1"));
        assert_eq!(store.filter(|v| v == "2").await, vec!["2".to_string()]);

        // a rejected check-then-insert leaves the map alone
        let res: Result<(), _> = store
            .update_map(|m| {
                if m.values().any(|v| v == "1") {
                    return Err(ServiceError::Conflict("duplicate".into()));
                }
                m.insert("c".into(), "1".into());
                Ok(())
            })
            .await;
        assert!(matches!(res, Err(ServiceError::Conflict(_))));
        assert!(store.get(&"c".into()).await.is_none());

        // remove and reload persistence
        let existed = store.remove(&"b".into()).await?;
        assert!(existed);
        assert!(!store.remove(&"b".into()).await?);
        let reloaded = JsonMapStore::<String, String>::new(&tmp).await?;
        assert_eq!(reloaded.values().await, vec!["1".to_string()]);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn failed_write_leaves_memory_unchanged() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("json_map_store_{}.json", uuid::Uuid::new_v4()));
        let store = JsonMapStore::<String, String>::new(&tmp).await?;
        store.update_map(|m| { m.insert("kept".into(), "1".into()); Ok(()) }).await?;

        // a directory where the file was makes every later write fail
        tokio::fs::remove_file(&tmp).await?;
        tokio::fs::create_dir(&tmp).await?;

        let res = store.update_map(|m| { m.insert("lost".into(), "2".into()); Ok(()) }).await;
        assert!(matches!(res, Err(ServiceError::Db(_))));
        assert!(store.get(&"lost".into()).await.is_none());

        assert!(matches!(store.remove(&"kept".into()).await, Err(ServiceError::Db(_))));
        assert_eq!(store.get(&"kept".into()).await.as_deref(), Some("1"));

        let _ = tokio::fs::remove_dir(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn in_memory_store_never_touches_disk() -> Result<(), anyhow::Error> {
        let store = JsonMapStore::<u32, String>::in_memory();
        store.update_map(|m| { m.insert(1, "x".into()); Ok(()) }).await?;
        assert_eq!(store.get(&1).await.as_deref(), Some("x"));
        assert!(store.remove(&1).await?);
        assert!(store.values().await.is_empty());
        Ok(())
    }
}
