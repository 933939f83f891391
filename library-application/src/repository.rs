//! 实体仓储
//!
//! 仓储以实体快照为单位读写。`save` 与 `delete` 带期望版本，
//! 在提交时原子地比较存储中的版本，不一致返回 `StaleState`。
//!
use crate::error::AppError;
use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use library_domain::concurrency::check_version;
use library_domain::entity::Entity;
use library_domain::value_object::Version;
use std::hash::Hash;
use tracing::{debug, warn};

#[async_trait]
pub trait Repository<E>: Send + Sync
where
    E: Entity + 'static,
{
    async fn find(&self, id: &E::Id) -> Result<Option<E>, AppError>;

    async fn find_all(&self) -> Result<Vec<E>, AppError>;

    /// 新增实体；标识已存在时返回 `AlreadyExists`
    async fn insert(&self, entity: E) -> Result<(), AppError>;

    /// 提交变更后的实体
    ///
    /// `expected` 为调用方读取实体时的版本；存储中的版本与之不同说明期间已有其他提交。
    async fn save(&self, entity: E, expected: Version) -> Result<(), AppError>;

    async fn delete(&self, id: &E::Id, expected: Version) -> Result<(), AppError>;

    /// 读取实体，不存在时返回 `NotFound`
    async fn load(&self, id: &E::Id) -> Result<E, AppError> {
        self.find(id)
            .await?
            .ok_or_else(|| AppError::not_found(E::TYPE, id))
    }
}

/// 基于 DashMap 的内存仓储
///
/// 比较交换在 entry 锁内完成，同一标识上的并发提交最多只有一个成功。
pub struct InMemoryRepository<E>
where
    E: Entity,
{
    entities: DashMap<E::Id, E>,
}

impl<E> Default for InMemoryRepository<E>
where
    E: Entity,
    E::Id: Eq + Hash,
{
    fn default() -> Self {
        Self {
            entities: DashMap::new(),
        }
    }
}

impl<E> InMemoryRepository<E>
where
    E: Entity,
    E::Id: Eq + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[async_trait]
impl<E> Repository<E> for InMemoryRepository<E>
where
    E: Entity + Clone + 'static,
    E::Id: Eq + Hash,
{
    async fn find(&self, id: &E::Id) -> Result<Option<E>, AppError> {
        let found = self.entities.get(id).map(|e| e.value().clone());
        debug!(entity = E::TYPE, %id, found = found.is_some(), "find");
        Ok(found)
    }

    async fn find_all(&self) -> Result<Vec<E>, AppError> {
        Ok(self.entities.iter().map(|e| e.value().clone()).collect())
    }

    async fn insert(&self, entity: E) -> Result<(), AppError> {
        match self.entities.entry(entity.id().clone()) {
            Entry::Occupied(slot) => Err(AppError::already_exists(E::TYPE, slot.key())),
            Entry::Vacant(slot) => {
                debug!(entity = E::TYPE, id = %entity.id(), version = %entity.version(), "insert");
                slot.insert(entity);
                Ok(())
            }
        }
    }

    async fn save(&self, entity: E, expected: Version) -> Result<(), AppError> {
        let id = entity.id().clone();
        let Some(mut stored) = self.entities.get_mut(&id) else {
            return Err(AppError::not_found(E::TYPE, &id));
        };

        if let Err(err) = check_version(E::TYPE, stored.version(), expected) {
            warn!(entity = E::TYPE, %id, %expected, actual = %stored.version(), "rejected stale write");
            return Err(err.into());
        }

        debug!(entity = E::TYPE, %id, from = %expected, to = %entity.version(), "save");
        *stored = entity;
        Ok(())
    }

    async fn delete(&self, id: &E::Id, expected: Version) -> Result<(), AppError> {
        let Entry::Occupied(slot) = self.entities.entry(id.clone()) else {
            return Err(AppError::not_found(E::TYPE, id));
        };

        if let Err(err) = check_version(E::TYPE, slot.get().version(), expected) {
            warn!(entity = E::TYPE, %id, %expected, actual = %slot.get().version(), "rejected stale delete");
            return Err(err.into());
        }

        slot.remove();
        debug!(entity = E::TYPE, %id, "delete");
        Ok(())
    }
}
