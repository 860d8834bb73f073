//! YAML values carrying the position they were parsed from.

use netdef_error_reporting::Mark;
use yaml_rust2::Yaml;

/// A YAML value with the mark of its first character.
///
/// The owned `yaml` value is a complete tree on its own; `children` mirrors
/// it with marks for every element, so semantic checks can point at the
/// exact key or value they reject.
#[derive(Debug, Clone)]
pub struct Node {
    /// The complete value, without positions
    pub yaml: Yaml,

    /// Where this node starts (0-indexed)
    pub mark: Mark,

    children: Children,
}

#[derive(Debug, Clone)]
enum Children {
    None,
    Array(Vec<Node>),
    Hash(Vec<NodeEntry>),
}

/// A mapping entry; key and value keep their own marks.
#[derive(Debug, Clone)]
pub struct NodeEntry {
    pub key: Node,
    pub value: Node,
}

impl Node {
    pub fn new_scalar(yaml: Yaml, mark: Mark) -> Self {
        Self {
            yaml,
            mark,
            children: Children::None,
        }
    }

    pub fn new_array(mark: Mark, items: Vec<Node>) -> Self {
        let yaml = Yaml::Array(items.iter().map(|n| n.yaml.clone()).collect());
        Self {
            yaml,
            mark,
            children: Children::Array(items),
        }
    }

    pub fn new_hash(mark: Mark, entries: Vec<NodeEntry>) -> Self {
        let yaml = Yaml::Hash(
            entries
                .iter()
                .map(|e| (e.key.yaml.clone(), e.value.yaml.clone()))
                .collect(),
        );
        Self {
            yaml,
            mark,
            children: Children::Hash(entries),
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self.children, Children::None)
    }

    pub fn is_array(&self) -> bool {
        matches!(self.children, Children::Array(_))
    }

    pub fn is_hash(&self) -> bool {
        matches!(self.children, Children::Hash(_))
    }

    pub fn is_null(&self) -> bool {
        self.yaml.is_null()
    }

    /// Sequence items, if this is a sequence.
    pub fn items(&self) -> Option<&[Node]> {
        match &self.children {
            Children::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Mapping entries in document order, if this is a mapping.
    pub fn entries(&self) -> Option<&[NodeEntry]> {
        match &self.children {
            Children::Hash(entries) => Some(entries),
            _ => None,
        }
    }

    /// Look up a mapping value by string key.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries()?
            .iter()
            .find(|entry| entry.key.yaml.as_str() == Some(key))
            .map(|entry| &entry.value)
    }

    /// Look up a mapping entry by string key, keeping the key's mark.
    pub fn get_entry(&self, key: &str) -> Option<&NodeEntry> {
        self.entries()?
            .iter()
            .find(|entry| entry.key.yaml.as_str() == Some(key))
    }

    pub fn as_str(&self) -> Option<&str> {
        self.yaml.as_str()
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.yaml.as_i64()
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.yaml.as_bool()
    }

    /// Number of sequence items or mapping entries; 0 for scalars.
    pub fn len(&self) -> usize {
        match &self.children {
            Children::None => 0,
            Children::Array(items) => items.len(),
            Children::Hash(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
