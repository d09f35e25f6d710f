//! Monitored forum threads.

use serde::{Deserialize, Serialize};

/// A named thread to monitor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Topic {
    /// Human-readable display name
    pub name: String,

    /// Thread path relative to the site base URL (e.g. `/threads/foo.123`)
    pub path: String,
}

impl Topic {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Absolute URL of the thread's first page.
    pub fn thread_url(&self, base_url: &str) -> String {
        format!("{}{}", base_url, self.path)
    }
}

/// Fixed set of topics, enumerated in declaration order.
#[derive(Debug, Clone)]
pub struct TopicCatalog {
    topics: Vec<Topic>,
}

impl TopicCatalog {
    pub fn new(topics: Vec<Topic>) -> Self {
        Self { topics }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Topic> {
        self.topics.iter()
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}

impl<'a> IntoIterator for &'a TopicCatalog {
    type Item = &'a Topic;
    type IntoIter = std::slice::Iter<'a, Topic>;

    fn into_iter(self) -> Self::IntoIter {
        self.topics.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_url() {
        let topic = Topic::new("Latte Art", "/threads/und-ploetzlich-war-da-latte-art.7785");
        assert_eq!(
            topic.thread_url("https://www.kaffee-netz.de"),
            "https://www.kaffee-netz.de/threads/und-ploetzlich-war-da-latte-art.7785"
        );
    }

    #[test]
    fn test_catalog_preserves_order() {
        let catalog = TopicCatalog::new(vec![Topic::new("b", "/b"), Topic::new("a", "/a")]);
        let names: Vec<_> = catalog.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
        assert_eq!(catalog.len(), 2);
    }
}
