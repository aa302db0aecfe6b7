//! Include/exclude filtering of attribute names.
//!
//! A [`PropertyFilter`] holds two ordered, deduplicated name sets and decides
//! which resolved attributes are compared:
//!
//! - with an empty include set, every resolved attribute passes;
//! - with a non-empty include set, only included attributes pass;
//! - an excluded attribute never passes, even when it is also included.
//!
//! Names are matched exactly and case-sensitively. The output keeps the order
//! of the resolved attributes, never the order names were supplied in.
//!
//! # Examples
//!
//! ```
//! use attrdiff::filter::PropertyFilter;
//!
//! let filter = PropertyFilter::new()
//!     .include(["id", "type", "id", "createdAt"])
//!     .exclude(["type"]);
//!
//! let resolved = ["createdAt", "id", "status", "type"].map(String::from);
//! assert_eq!(filter.apply(&resolved), vec!["createdAt", "id"]);
//! ```

/// Ordered, deduplicated include and exclude sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyFilter {
    include: Vec<String>,
    exclude: Vec<String>,
}

impl PropertyFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_include(names);
        self
    }

    pub fn exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_exclude(names);
        self
    }

    /// Adds names to the include set. Returns the names that were new.
    pub fn add_include<I, S>(&mut self, names: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend_unique(&mut self.include, names)
    }

    /// Adds names to the exclude set. Returns the names that were new.
    pub fn add_exclude<I, S>(&mut self, names: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend_unique(&mut self.exclude, names)
    }

    pub fn includes(&self) -> &[String] {
        &self.include
    }

    pub fn excludes(&self) -> &[String] {
        &self.exclude
    }

    pub fn has_filters(&self) -> bool {
        !self.include.is_empty() || !self.exclude.is_empty()
    }

    pub fn should_include(&self, name: &str) -> bool {
        if self.exclude.iter().any(|n| n == name) {
            return false;
        }

        if !self.include.is_empty() {
            return self.include.iter().any(|n| n == name);
        }

        true
    }

    /// Filters resolved attribute names, keeping their order.
    pub fn apply(&self, resolved: &[String]) -> Vec<String> {
        resolved
            .iter()
            .filter(|name| self.should_include(name))
            .cloned()
            .collect()
    }
}

fn extend_unique<I, S>(set: &mut Vec<String>, names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut added = Vec::new();
    for name in names {
        let name = name.into();
        if !set.contains(&name) {
            set.push(name.clone());
            added.push(name);
        }
    }
    added
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved() -> Vec<String> {
        ["id", "type", "status", "createdAt", "updatedAt", "description"]
            .map(String::from)
            .to_vec()
    }

    #[test]
    fn test_no_filters_pass_everything() {
        let filter = PropertyFilter::new();
        assert!(!filter.has_filters());
        assert_eq!(filter.apply(&resolved()), resolved());
    }

    #[test]
    fn test_duplicates_collapse() {
        let mut filter = PropertyFilter::new();
        let added = filter.add_include(["id", "type", "id", "type", "createdAt"]);
        assert_eq!(added, vec!["id", "type", "createdAt"]);
        assert_eq!(filter.includes().len(), 3);
        assert!(filter.add_include(["id"]).is_empty());
    }

    #[test]
    fn test_exclude_beats_include() {
        let filter = PropertyFilter::new()
            .include(["id", "createdAt", "updatedAt", "description"])
            .exclude(["createdAt", "updatedAt", "type"]);
        assert_eq!(filter.apply(&resolved()), vec!["id", "description"]);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let filter = PropertyFilter::new().exclude(["ID"]);
        assert!(filter.should_include("id"));
        assert!(!filter.should_include("ID"));
    }

    #[test]
    fn test_unknown_names_never_appear() {
        let filter = PropertyFilter::new().include(["id", "nonexistent"]);
        assert_eq!(filter.apply(&resolved()), vec!["id"]);
    }
}
