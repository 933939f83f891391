//! 借阅流程示例
//!
//! 注册处理器后依次创建作者、图书、读者并完成一次借阅与归还，
//! 中途演示过期版本被拒绝。
//!
//! 运行示例：
//! ```bash
//! cargo run -p library-application --example lending_workflow
//! ```

use chrono::NaiveDate;
use library_application::author::CreateAuthor;
use library_application::book::{CreateBook, PatchBook};
use library_application::command_bus::CommandBus;
use library_application::config::LibraryConfig;
use library_application::context::AppContext;
use library_application::lending::{CreateLending, FindLending, ReturnLending};
use library_application::query_bus::QueryBus;
use library_application::reader::CreateReader;
use library_application::{InMemoryCommandBus, InMemoryQueryBus, Repositories, register_handlers};
use library_domain::book::BookPatch;
use library_domain::patch::Patch;
use library_domain::value_object::Version;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let commands = InMemoryCommandBus::new();
    let queries = InMemoryQueryBus::new();
    let config = LibraryConfig::from_json(r#"{"lending_duration_days": 21}"#)?;
    register_handlers(&commands, &queries, &Repositories::in_memory(), &config)?;

    let ctx = AppContext::builder().correlation_id("cor-1").build();

    let author = commands
        .dispatch(
            &ctx,
            CreateAuthor {
                name: "Manuel Antonio Pina".into(),
                bio: "Poeta e jornalista".into(),
                photo: None,
            },
        )
        .await?;
    let isbn = commands
        .dispatch(
            &ctx,
            CreateBook {
                isbn: "9782826012092".into(),
                title: "O Inventão".into(),
                description: Some("Contos".into()),
                genre: "Infantil".into(),
                authors: vec![author],
                cover: None,
            },
        )
        .await?;
    println!("图书 {isbn} 已创建，作者 {author}");

    let patch = BookPatch {
        title: Patch::Set("O Inventão (2.ª edição)".into()),
        ..Default::default()
    };
    let v1 = commands
        .dispatch(
            &ctx,
            PatchBook {
                isbn: isbn.clone(),
                expected: Version::new(),
                patch: patch.clone(),
            },
        )
        .await?;
    println!("书名已更新，版本 {v1}");

    // 使用过期版本 -> StaleState
    if let Err(err) = commands
        .dispatch(
            &ctx,
            PatchBook {
                isbn: isbn.clone(),
                expected: Version::new(),
                patch,
            },
        )
        .await
    {
        println!("过期版本被拒绝（conflict = {}）: {err}", err.is_conflict());
    }

    let reader = commands
        .dispatch(
            &ctx,
            CreateReader {
                name: "Maria Jose".into(),
                birth_date: NaiveDate::from_ymd_opt(1990, 3, 14).ok_or("invalid date")?,
                phone_number: "912345678".into(),
                gdpr_consent: true,
                marketing_consent: false,
                third_party_sharing_consent: false,
                photo: None,
                interests: vec!["Infantil".into()],
            },
        )
        .await?;

    let number = commands
        .dispatch(&ctx, CreateLending { isbn, reader })
        .await?;
    let lending = queries.dispatch(&ctx, FindLending { number }).await?;
    println!("借阅 {number}：应还日期 {}", lending.limit_date());

    let version = commands
        .dispatch(
            &ctx,
            ReturnLending {
                number,
                expected: Version::new(),
                commentary: Some("Bom estado".into()),
            },
        )
        .await?;
    println!("借阅 {number} 已归还，版本 {version}");

    Ok(())
}
