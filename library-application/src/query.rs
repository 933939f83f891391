/// 应用层查询（Query）
///
/// 表达只读意图，不改变领域状态。
/// - 结果直接返回领域实体的快照（克隆），视图映射由外层负责；
/// - 与 [`Command`](crate::command::Command) 相对，`Query` 应避免副作用。
pub trait Query: Send + Sync + 'static {
    /// 查询的稳定名称（建议常量字符串，不随重构变化）
    const NAME: &'static str;

    /// 查询结果类型
    type Output: Send + 'static;
}
