//! 领域建模过程宏（library-macros）
//!
//! - `#[value_object]`：为自校验值对象合并派生，并让反序列化走构造函数校验
//! - `#[entity]`：为实体追加 `id`/`version` 字段，实现 `Entity` 与乐观锁辅助方法
//! - `#[entity_id]`：为单字段 tuple struct 形式的实体编号生成常用转换
//!
//! 生成代码通过 `::library_domain` 路径引用领域层类型。
//!
use proc_macro::TokenStream;

mod entity;
mod entity_id;
mod utils;
mod value_object;

/// 实体宏
///
/// ```ignore
/// #[entity(id = AuthorNumber)]
/// pub struct Author {
///     name: Name,
///     bio: Bio,
/// }
/// ```
#[proc_macro_attribute]
pub fn entity(attr: TokenStream, item: TokenStream) -> TokenStream {
    entity::expand(attr, item)
}

/// 实体编号宏，仅支持单字段 tuple struct
#[proc_macro_attribute]
pub fn entity_id(attr: TokenStream, item: TokenStream) -> TokenStream {
    entity_id::expand(attr, item)
}

/// 值对象宏
///
/// 目标类型需提供 `fn new(raw) -> DomainResult<Self>`（或通过 `ctor = ...` 指定）。
#[proc_macro_attribute]
pub fn value_object(attr: TokenStream, item: TokenStream) -> TokenStream {
    value_object::expand(attr, item)
}
