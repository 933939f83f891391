use crate::{context::AppContext, error::AppError, query::Query};
use async_trait::async_trait;

/// 查询总线（Query Bus）
///
/// - 负责根据查询的具体类型路由到对应的处理器；
/// - 对外返回与查询关联的结果类型。
#[async_trait]
pub trait QueryBus: Send + Sync {
    /// 分发查询到对应处理器
    async fn dispatch<Q>(&self, ctx: &AppContext, q: Q) -> Result<Q::Output, AppError>
    where
        Q: Query;
}
