//! The immutable, load-once result of reading a configuration file.

use reminder_core::ReminderDefinition;

/// An ordered collection of reminder definitions, keyed by name.
///
/// Preserves insertion order (the order reminders appeared in the
/// configuration file) so status displays are deterministic.
#[derive(Debug, Default)]
pub struct Catalogue {
    entries: Vec<(String, ReminderDefinition)>,
}

impl Catalogue {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert a definition. A duplicate name replaces the prior entry
    /// in place, preserving its original position.
    pub fn insert(&mut self, definition: ReminderDefinition) {
        match self.entries.iter_mut().find(|(n, _)| *n == definition.name) {
            Some((_, existing)) => *existing = definition,
            None => self.entries.push((definition.name.clone(), definition)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ReminderDefinition> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, d)| d)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReminderDefinition> {
        self.entries.iter().map(|(_, d)| d)
    }
}

impl<'a> IntoIterator for &'a Catalogue {
    type Item = &'a ReminderDefinition;
    type IntoIter = std::vec::IntoIter<&'a ReminderDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter().map(|(_, d)| d).collect::<Vec<_>>().into_iter()
    }
}
