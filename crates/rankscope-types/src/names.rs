use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Dense identifier of an interned event name
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(usize);

impl EventId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the name in first-seen order
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Interned event names in first-seen order.
///
/// Ids are dense in `[0, len)` and a name keeps its id for the lifetime of the table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct NameTable {
    names: Vec<String>,
    ids: HashMap<String, EventId>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id of `name`, assigning the next dense id on first sight.
    pub fn intern(&mut self, name: &str) -> EventId {
        if let Some(id) = self.ids.get(name) {
            return *id;
        }
        let id = EventId(self.names.len());
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), id);
        id
    }

    pub fn lookup_id(&self, name: &str) -> Result<EventId> {
        self.ids.get(name).copied().ok_or_else(|| Error::UnknownName {
            name: name.to_string(),
        })
    }

    pub fn lookup_name(&self, id: EventId) -> Result<&str> {
        self.names
            .get(id.0)
            .map(String::as_str)
            .ok_or(Error::UnknownId { id: id.0 })
    }

    /// Name for an id produced by this table.
    ///
    /// Panics on a foreign id; use [`NameTable::lookup_name`] for untrusted ids.
    pub fn name(&self, id: EventId) -> &str {
        &self.names[id.0]
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate `(id, name)` pairs in id order
    pub fn iter(&self) -> impl Iterator<Item = (EventId, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, name)| (EventId(i), name.as_str()))
    }
}

impl From<Vec<String>> for NameTable {
    fn from(names: Vec<String>) -> Self {
        let mut table = NameTable::new();
        for name in &names {
            table.intern(name);
        }
        table
    }
}

impl From<NameTable> for Vec<String> {
    fn from(table: NameTable) -> Self {
        table.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_assigns_dense_ids_in_first_seen_order() {
        let mut names = NameTable::new();
        assert_eq!(names.intern("main"), EventId::new(0));
        assert_eq!(names.intern("solve"), EventId::new(1));
        assert_eq!(names.intern("main"), EventId::new(0));
        assert_eq!(names.intern("io"), EventId::new(2));
        assert_eq!(names.len(), 3);

        let order: Vec<&str> = names.iter().map(|(_, n)| n).collect();
        assert_eq!(order, vec!["main", "solve", "io"]);
    }

    #[test]
    fn test_lookup_roundtrip() {
        let mut names = NameTable::new();
        for name in ["a", "b", "MPI_Allreduce", "a", ""] {
            let id = names.intern(name);
            assert_eq!(names.lookup_name(id), Ok(name));
            assert_eq!(names.lookup_id(name), Ok(id));
        }
    }

    #[test]
    fn test_lookup_unknown() {
        let mut names = NameTable::new();
        names.intern("known");

        assert_eq!(
            names.lookup_id("missing"),
            Err(Error::UnknownName {
                name: "missing".to_string()
            })
        );
        assert_eq!(
            names.lookup_name(EventId::new(5)),
            Err(Error::UnknownId { id: 5 })
        );
    }

    #[test]
    fn test_serde_as_name_list() {
        let mut names = NameTable::new();
        names.intern("x");
        names.intern("y");

        let json = serde_json::to_string(&names).unwrap();
        assert_eq!(json, r#"["x","y"]"#);

        let back: NameTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, names);
    }
}
