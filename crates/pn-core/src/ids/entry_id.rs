use serde::{Deserialize, Serialize};

use super::id_macro::impl_id;

/// Identifier of one recorded clipboard capture.
///
/// Assigned once when the entry is created and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl_id!(EntryId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ids_are_unique() {
        let a = EntryId::new();
        let b = EntryId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn id_round_trips_through_string() {
        let id = EntryId::from("7f0c2a8e-entry");
        assert_eq!(id.as_str(), "7f0c2a8e-entry");
        assert_eq!(id.to_string(), "7f0c2a8e-entry");
        let raw: String = id.clone().into();
        assert_eq!(EntryId::from_string(raw), id);
    }
}
