//! Generic parsed markup tree.
//!
//! Nodes live in a flat arena in document order and refer to each other by
//! [`NodeId`]. Every node keeps its parent link so that a matched leaf (for
//! example a `<gloss>`) can climb back to its owning `<entry>`.

use indexmap::IndexMap;

/// Index of a node inside its [`MarkupTree`].
pub type NodeId = usize;

/// One element of the parsed document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupNode {
    pub tag: String,
    /// Text appearing directly inside this element, entity references resolved
    pub text: String,
    pub attrs: IndexMap<String, String>,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
}

/// An immutable element tree.
#[derive(Debug, Clone, Default)]
pub struct MarkupTree {
    nodes: Vec<MarkupNode>,
    root: Option<NodeId>,
}

impl MarkupTree {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends a node below `parent` (or as the document element) and returns its id.
    pub(crate) fn push_node(&mut self, tag: String, attrs: IndexMap<String, String>, parent: Option<NodeId>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(MarkupNode {
            tag,
            text: String::new(),
            attrs,
            children: Vec::new(),
            parent,
        });
        match parent {
            Some(parent_id) => self.nodes[parent_id].children.push(id),
            None => {
                if self.root.is_none() {
                    self.root = Some(id);
                }
            }
        }
        id
    }

    pub(crate) fn push_text(&mut self, id: NodeId, text: &str) {
        self.nodes[id].text.push_str(text);
    }

    /// The document element, if the document had one.
    pub fn root(&self) -> Option<NodeRef<'_>> {
        self.root.map(|id| NodeRef { tree: self, id })
    }

    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        if id < self.nodes.len() {
            Some(NodeRef { tree: self, id })
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes with the given tag, in document order.
    pub fn find_all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        self.nodes
            .iter()
            .enumerate()
            .filter(move |(_, node)| node.tag == tag)
            .map(move |(id, _)| NodeRef { tree: self, id })
    }
}

/// Borrowed handle to one node of a [`MarkupTree`].
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a MarkupTree,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    fn node(&self) -> &'a MarkupNode {
        &self.tree.nodes[self.id]
    }

    pub fn tag(&self) -> &'a str {
        &self.node().tag
    }

    pub fn text(&self) -> &'a str {
        &self.node().text
    }

    pub fn attrs(&self) -> &'a IndexMap<String, String> {
        &self.node().attrs
    }

    pub fn attr(&self, key: &str) -> Option<&'a str> {
        self.node().attrs.get(key).map(String::as_str)
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.node().parent.map(|id| NodeRef { tree: self.tree, id })
    }

    /// Child elements in document order.
    pub fn children(self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let tree = self.tree;
        self.node().children.iter().map(move |&id| NodeRef { tree, id })
    }

    /// Child elements with the given tag, in document order.
    pub fn children_named(self, tag: &'a str) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        self.children().filter(move |child| child.tag() == tag)
    }

    /// First child element with the given tag.
    pub fn child(&self, tag: &str) -> Option<NodeRef<'a>> {
        self.children().find(|child| child.tag() == tag)
    }

    /// Nearest ancestor with the given tag, not counting this node itself.
    pub fn find_parent(&self, tag: &str) -> Option<NodeRef<'a>> {
        let mut current = self.parent();
        while let Some(node) = current {
            if node.tag() == tag {
                return Some(node);
            }
            current = node.parent();
        }
        None
    }
}

impl std::fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("tag", &self.tag())
            .field("children", &self.node().children.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> MarkupTree {
        let mut tree = MarkupTree::new();
        let root = tree.push_node("JMdict".to_string(), IndexMap::new(), None);
        let entry = tree.push_node("entry".to_string(), IndexMap::new(), Some(root));
        let sense = tree.push_node("sense".to_string(), IndexMap::new(), Some(entry));
        let mut attrs = IndexMap::new();
        attrs.insert("xml:lang".to_string(), "eng".to_string());
        let gloss = tree.push_node("gloss".to_string(), attrs, Some(sense));
        tree.push_text(gloss, "to eat");
        tree.push_node("gloss".to_string(), IndexMap::new(), Some(sense));
        tree
    }

    #[test]
    fn test_navigation() {
        let tree = sample_tree();
        let root = tree.root().unwrap();
        assert_eq!(root.tag(), "JMdict");
        let entry = root.child("entry").unwrap();
        let sense = entry.child("sense").unwrap();
        let glosses: Vec<_> = sense.children_named("gloss").collect();
        assert_eq!(glosses.len(), 2);
        assert_eq!(glosses[0].text(), "to eat");
        assert_eq!(glosses[0].attr("xml:lang"), Some("eng"));
        assert_eq!(glosses[1].text(), "");
        assert!(entry.child("k_ele").is_none());
    }

    #[test]
    fn test_find_parent() {
        let tree = sample_tree();
        let gloss = tree.find_all("gloss").next().unwrap();
        assert_eq!(gloss.find_parent("entry").unwrap().id(), 1);
        assert_eq!(gloss.find_parent("JMdict").unwrap().id(), 0);
        assert!(gloss.find_parent("gloss").is_none());
        assert!(tree.root().unwrap().find_parent("entry").is_none());
    }

    #[test]
    fn test_find_all_document_order() {
        let tree = sample_tree();
        let ids: Vec<_> = tree.find_all("gloss").map(|n| n.id()).collect();
        assert_eq!(ids, vec![3, 4]);
        assert_eq!(tree.len(), 5);
    }
}
