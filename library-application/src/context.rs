/// 应用层上下文（Application Context）
///
/// 承载一次应用层调用（命令/查询）所需的横切信息。
/// 目前只有 `correlation_id`：链路追踪标识，写入日志字段。
///
/// 典型用法：
/// ```rust
/// use library_application::context::AppContext;
///
/// let ctx = AppContext::builder().correlation_id("cor-123").build();
/// assert_eq!(ctx.correlation_id.as_deref(), Some("cor-123"));
/// assert!(AppContext::default().correlation_id.is_none());
/// ```
#[derive(Clone, Debug, Default, bon::Builder)]
pub struct AppContext {
    #[builder(into)]
    pub correlation_id: Option<String>,
}
