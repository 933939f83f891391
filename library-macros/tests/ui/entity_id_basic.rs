use library_macros::entity_id;

#[entity_id]
#[derive(Copy, PartialOrd, Ord)]
struct ShelfNumber(u64);

#[entity_id(debug = false)]
struct RoomNumber(u32);

impl std::fmt::Debug for RoomNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RoomNumber(..)")
    }
}

fn main() {
    let id = ShelfNumber::new(7);
    assert_eq!(*id.value(), 7);
    assert_eq!(id.to_string(), "7");
    assert_eq!("7".parse::<ShelfNumber>().unwrap(), id);
    assert!(ShelfNumber::from(8) > id);
    assert_eq!(serde_json::to_string(&id).unwrap(), "7");

    let room = RoomNumber::new(1);
    assert_eq!(format!("{:?}", room), "RoomNumber(..)");
}
