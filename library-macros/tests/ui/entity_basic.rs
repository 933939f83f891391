use library_domain::entity::Entity;
use library_domain::error::{DomainError, DomainResult};
use library_domain::value_object::Version;
use library_macros::entity;

#[entity(id = String)]
struct Shelf {
    label: String,
}

impl Shelf {
    fn new(id: String, label: String) -> Self {
        Self {
            id,
            version: Version::new(),
            label,
        }
    }

    fn relabel(&mut self, expected: Version, label: String) -> DomainResult<()> {
        self.guard_version(expected)?;
        self.label = label;
        self.advance_version();
        Ok(())
    }
}

fn main() {
    let mut shelf = Shelf::new("s-1".to_string(), "Poetry".to_string());
    assert_eq!(Shelf::TYPE, "Shelf");
    assert_eq!(shelf.id(), "s-1");
    assert_eq!(shelf.version(), Version::new());

    shelf.relabel(Version::new(), "Drama".to_string()).unwrap();
    assert_eq!(shelf.version().value(), 1);
    assert_eq!(shelf.label, "Drama");

    let err = shelf.relabel(Version::new(), "Prose".to_string()).unwrap_err();
    assert!(matches!(err, DomainError::StaleState { .. }));

    let json = serde_json::to_value(&shelf).unwrap();
    assert_eq!(json["version"], 1);
    let _ = format!("{:?}", shelf.clone());
}
