use serde::{Deserialize, Serialize};

use super::id_macro::impl_id;

/// Identity of a captured clipboard entry.
///
/// Generated once per capture (UUID v4) and never reused within a process.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(String);

impl_id!(EntryId);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn new_ids_are_unique() {
        let ids: HashSet<EntryId> = (0..1000).map(|_| EntryId::new()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn from_str_round_trips_display() {
        let id = EntryId::from("entry-1");
        assert_eq!(id.to_string(), "entry-1");
        assert_eq!(id.as_str(), "entry-1");
    }
}
