//! Composite error nodes and their views.

use super::atom::ErrorAtom;
use super::code::ErrorCode;
use super::messages::MessageFormatter;
use super::shape::ErrorShape;
use indexmap::IndexMap;
use std::collections::BTreeMap;

// ============================================================================
// ERROR NODE
// ============================================================================

/// Any node of the error tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorNode {
    Atom(ErrorAtom),
    Map(ErrorMap),
    List(ErrorList),
}

impl ErrorNode {
    /// Atom shorthand.
    #[must_use]
    pub const fn atom(code: ErrorCode) -> Self {
        Self::Atom(ErrorAtom::new(code))
    }

    /// The atom, when this node is a leaf.
    #[must_use]
    pub const fn as_atom(&self) -> Option<&ErrorAtom> {
        match self {
            Self::Atom(atom) => Some(atom),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_map(&self) -> Option<&ErrorMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_list(&self) -> Option<&ErrorList> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    /// Same tree with every atom replaced by its code.
    #[must_use]
    pub fn codes(&self) -> ErrorShape<ErrorCode> {
        match self {
            Self::Atom(atom) => ErrorShape::Leaf(atom.code.clone()),
            Self::Map(map) => map.codes(),
            Self::List(list) => list.codes(),
        }
    }

    /// Same tree with every atom rendered by `formatter`.
    #[must_use]
    pub fn messages(&self, formatter: &dyn MessageFormatter) -> ErrorShape<String> {
        self.render(formatter, None, None)
    }

    /// Every rendered message, depth first, keys then indices in order.
    #[must_use]
    pub fn flattened_messages(&self, formatter: &dyn MessageFormatter) -> Vec<String> {
        let mut out = Vec::new();
        self.flatten_into(formatter, None, None, &mut out);
        out
    }

    /// Number of atoms in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Atom(_) => 1,
            Self::Map(map) => map.len(),
            Self::List(list) => list.len(),
        }
    }

    /// Composite nodes can be empty while under construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names a leaf after the map field it sits under.
    pub(crate) fn keyed(self, key: &str) -> Self {
        match self {
            Self::Atom(atom) if atom.key.is_none() => Self::Atom(atom.with_key(key)),
            other => other,
        }
    }

    /// Positions a leaf at the list slot it sits in.
    pub(crate) fn indexed(self, index: usize) -> Self {
        match self {
            Self::Atom(atom) if atom.index.is_none() => Self::Atom(atom.with_index(index)),
            other => other,
        }
    }

    fn render(
        &self,
        formatter: &dyn MessageFormatter,
        key: Option<&str>,
        index: Option<usize>,
    ) -> ErrorShape<String> {
        match self {
            Self::Atom(atom) => ErrorShape::Leaf(atom.render(formatter, key, index)),
            Self::Map(map) => map.render(formatter),
            Self::List(list) => list.render(formatter, key),
        }
    }

    fn flatten_into(
        &self,
        formatter: &dyn MessageFormatter,
        key: Option<&str>,
        index: Option<usize>,
        out: &mut Vec<String>,
    ) {
        match self {
            Self::Atom(atom) => out.push(atom.render(formatter, key, index)),
            Self::Map(map) => map.flatten_into(formatter, out),
            Self::List(list) => list.flatten_into(formatter, key, out),
        }
    }
}

impl From<ErrorAtom> for ErrorNode {
    fn from(atom: ErrorAtom) -> Self {
        Self::Atom(atom)
    }
}

impl From<ErrorMap> for ErrorNode {
    fn from(map: ErrorMap) -> Self {
        Self::Map(map)
    }
}

impl From<ErrorList> for ErrorNode {
    fn from(list: ErrorList) -> Self {
        Self::List(list)
    }
}

// ============================================================================
// ERROR MAP
// ============================================================================

/// Failures keyed by field name, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMap(IndexMap<String, ErrorNode>);

impl ErrorMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, node: impl Into<ErrorNode>) {
        self.0.insert(key.into(), node.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ErrorNode> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ErrorNode)> {
        self.0.iter().map(|(key, node)| (key.as_str(), node))
    }

    /// Number of failing fields, without descending.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.0.len()
    }

    /// Number of atoms in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.values().map(ErrorNode::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn codes(&self) -> ErrorShape<ErrorCode> {
        ErrorShape::Map(
            self.0
                .iter()
                .map(|(key, node)| (key.clone(), node.codes()))
                .collect(),
        )
    }

    #[must_use]
    pub fn messages(&self, formatter: &dyn MessageFormatter) -> ErrorShape<String> {
        self.render(formatter)
    }

    #[must_use]
    pub fn flattened_messages(&self, formatter: &dyn MessageFormatter) -> Vec<String> {
        let mut out = Vec::new();
        self.flatten_into(formatter, &mut out);
        out
    }

    fn render(&self, formatter: &dyn MessageFormatter) -> ErrorShape<String> {
        ErrorShape::Map(
            self.0
                .iter()
                .map(|(key, node)| (key.clone(), node.render(formatter, Some(key.as_str()), None)))
                .collect(),
        )
    }

    fn flatten_into(&self, formatter: &dyn MessageFormatter, out: &mut Vec<String>) {
        for (key, node) in &self.0 {
            node.flatten_into(formatter, Some(key.as_str()), None, out);
        }
    }
}

impl<'a> IntoIterator for &'a ErrorMap {
    type Item = (&'a String, &'a ErrorNode);
    type IntoIter = indexmap::map::Iter<'a, String, ErrorNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ============================================================================
// ERROR LIST
// ============================================================================

/// Failures keyed by list position. Sparse: successful slots are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorList(BTreeMap<usize, ErrorNode>);

impl ErrorList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, index: usize, node: impl Into<ErrorNode>) {
        self.0.insert(index, node.into());
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ErrorNode> {
        self.0.get(&index)
    }

    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &ErrorNode)> {
        self.0.iter().map(|(index, node)| (*index, node))
    }

    /// Number of atoms in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.values().map(ErrorNode::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn codes(&self) -> ErrorShape<ErrorCode> {
        ErrorShape::List(
            self.0
                .iter()
                .map(|(index, node)| (*index, node.codes()))
                .collect(),
        )
    }

    /// Messages for the elements; `key` names the list itself.
    #[must_use]
    pub fn messages(
        &self,
        formatter: &dyn MessageFormatter,
        key: Option<&str>,
    ) -> ErrorShape<String> {
        self.render(formatter, key)
    }

    #[must_use]
    pub fn flattened_messages(
        &self,
        formatter: &dyn MessageFormatter,
        key: Option<&str>,
    ) -> Vec<String> {
        let mut out = Vec::new();
        self.flatten_into(formatter, key, &mut out);
        out
    }

    fn render(&self, formatter: &dyn MessageFormatter, key: Option<&str>) -> ErrorShape<String> {
        ErrorShape::List(
            self.0
                .iter()
                .map(|(index, node)| (*index, node.render(formatter, key, Some(*index))))
                .collect(),
        )
    }

    fn flatten_into(
        &self,
        formatter: &dyn MessageFormatter,
        key: Option<&str>,
        out: &mut Vec<String>,
    ) {
        for (index, node) in &self.0 {
            node.flatten_into(formatter, key, Some(*index), out);
        }
    }
}
