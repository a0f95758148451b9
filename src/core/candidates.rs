use indexmap::IndexSet;

/// Insertion-ordered set of suggestible values. Duplicates are rejected on
/// insert and removal keeps the remaining order intact; matching never
/// reorders the set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    values: IndexSet<String>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(values: impl IntoIterator<Item = String>) -> Self {
        let mut set = Self::new();
        set.add(values);
        set
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.contains(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }

    /// Appends each value not already present. Empty strings are never
    /// valid candidates and are skipped. Returns how many values landed.
    pub fn add(&mut self, values: impl IntoIterator<Item = String>) -> usize {
        let mut added = 0;
        for value in values {
            if !value.is_empty() && self.values.insert(value) {
                added += 1;
            }
        }
        added
    }

    /// Removes each present value, preserving the order of the rest.
    /// Returns how many values were dropped.
    pub fn remove<S: AsRef<str>>(&mut self, values: impl IntoIterator<Item = S>) -> usize {
        let mut removed = 0;
        for value in values {
            if self.values.shift_remove(value.as_ref()) {
                removed += 1;
            }
        }
        removed
    }

    pub fn replace(&mut self, values: impl IntoIterator<Item = String>) {
        self.values.clear();
        self.add(values);
    }
}
