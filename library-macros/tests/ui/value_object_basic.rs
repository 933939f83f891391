use library_domain::error::{DomainError, DomainResult};
use library_macros::value_object;

#[value_object]
struct ShelfCode(String);

impl ShelfCode {
    fn new(raw: String) -> DomainResult<Self> {
        if raw.trim().is_empty() {
            return Err(DomainError::invalid_argument(
                "shelf_code",
                "Shelf code cannot be blank",
            ));
        }
        Ok(Self(raw))
    }
}

#[value_object(debug = false, display = false)]
struct Floor(u8);

impl Floor {
    fn new(raw: u8) -> DomainResult<Self> {
        Ok(Self(raw))
    }
}

impl std::fmt::Debug for Floor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Floor(..)")
    }
}

#[value_object(via = String, ctor = parse)]
struct Position {
    row: u32,
    col: u32,
}

impl Position {
    fn parse(raw: String) -> DomainResult<Self> {
        let (row, col) = raw
            .split_once(':')
            .ok_or_else(|| DomainError::invalid_argument("position", "missing ':'"))?;
        let number = |s: &str| {
            s.parse::<u32>()
                .map_err(|_| DomainError::invalid_argument("position", "expected a number"))
        };
        Ok(Self {
            row: number(row)?,
            col: number(col)?,
        })
    }
}

impl From<Position> for String {
    fn from(value: Position) -> Self {
        format!("{}:{}", value.row, value.col)
    }
}

fn main() {
    // 构造与 Display/AsRef
    let code = ShelfCode::new("A-12".to_string()).unwrap();
    assert_eq!(code.to_string(), "A-12");
    assert_eq!(code.as_ref(), "A-12");

    // 反序列化经过构造函数校验
    let ok: ShelfCode = serde_json::from_str("\"B-3\"").unwrap();
    assert_eq!(String::from(ok), "B-3");
    assert!(serde_json::from_str::<ShelfCode>("\"   \"").is_err());

    // debug = false 时使用手写 Debug
    let floor = Floor::new(2).unwrap();
    assert_eq!(format!("{:?}", floor), "Floor(..)");

    // 多字段值对象经由 via 类型序列化
    let pos = Position::try_from("3:4".to_string()).unwrap();
    assert_eq!(serde_json::to_string(&pos).unwrap(), "\"3:4\"");
    let back: Position = serde_json::from_str("\"3:4\"").unwrap();
    assert!(back == pos);
}
