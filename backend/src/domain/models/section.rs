/// A class grouping. Accounts and snapshots point at it by `name`.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: String,
    pub name: String,
}
