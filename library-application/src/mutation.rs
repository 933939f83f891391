//! 读取-变更-提交的通用流程
//!
//! 处理器不自行重试：`StaleState` 原样返回给调用方，由其重新读取后决定。
//!
use crate::context::AppContext;
use crate::error::AppError;
use crate::repository::Repository;
use library_domain::entity::{Entity, EntityWithPhoto, Patchable};
use library_domain::error::DomainResult;
use library_domain::value_object::Version;
use tracing::info;

/// 读取实体，以 `expected` 执行变更，再以同一版本比较交换提交，返回新版本
pub(crate) async fn mutate<E, F>(
    ctx: &AppContext,
    repo: &dyn Repository<E>,
    id: &E::Id,
    expected: Version,
    change: F,
) -> Result<Version, AppError>
where
    E: Entity + 'static,
    F: FnOnce(&mut E, Version) -> DomainResult<()> + Send,
{
    let mut entity = repo.load(id).await?;
    change(&mut entity, expected)?;

    let version = entity.version();
    repo.save(entity, expected).await?;
    info!(
        entity = E::TYPE,
        %id,
        %version,
        correlation_id = ctx.correlation_id.as_deref(),
        "entity updated"
    );
    Ok(version)
}

pub(crate) async fn patch<E>(
    ctx: &AppContext,
    repo: &dyn Repository<E>,
    id: &E::Id,
    expected: Version,
    patch: E::Patch,
) -> Result<Version, AppError>
where
    E: Patchable + 'static,
{
    mutate(ctx, repo, id, expected, |entity: &mut E, v| {
        entity.apply_patch(v, patch)
    })
    .await
}

pub(crate) async fn remove_photo<E>(
    ctx: &AppContext,
    repo: &dyn Repository<E>,
    id: &E::Id,
    expected: Version,
) -> Result<Version, AppError>
where
    E: EntityWithPhoto + 'static,
{
    mutate(ctx, repo, id, expected, |entity: &mut E, v| entity.remove_photo(v)).await
}
