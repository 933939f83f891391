/// 应用层命令（Command）
///
/// 表达"意图"的写操作请求，会修改领域状态。
/// - 输出仅限执行结果的最小信息：新建实体的标识或变更后的版本号；
/// - 与 [`Query`](crate::query::Query) 相对，`Command` 应避免读写混用；
/// - 保持语义化的"动宾结构"命名，如 `CreateBook`、`ReturnLending`。
///
/// 关联常量：
/// - `NAME`：命令的稳定名称，用于日志、追踪与路由。避免依赖 `type_name::<T>()`。
pub trait Command: Send + Sync + 'static {
    /// 命令的稳定名称（建议常量字符串，不随重构变化）
    const NAME: &'static str;

    /// 命令执行成功后的返回值
    type Output: Send + 'static;
}
