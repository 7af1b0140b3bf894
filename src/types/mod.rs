mod from;
mod record;
mod value;

pub use record::Record;
pub use value::Value;

/// A sequence in which the elements are `list_reconciler::types::Value`
pub type Sequence = Vec<Value>;

/// The (type, index) pair which identifies a record in a list model
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ItemKey {
    pub item_type: String,
    pub item_index: i64,
}

impl ItemKey {
    #[must_use]
    pub fn new(item_type: &str, item_index: i64) -> Self {
        Self {
            item_type: item_type.into(),
            item_index,
        }
    }
}

impl std::fmt::Display for ItemKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]", self.item_type, self.item_index)
    }
}
