//! Tree mutation surface used by the relocator, and an in-memory tree.
//!
//! [`Dom`] is deliberately tiny: look an element up by id, create an anchor,
//! and the three insertion primitives (`after`, `before`, `prepend`). Each
//! insertion moves the node, detaching it from wherever it was, exactly like
//! the corresponding DOM methods.
//!
//! [`MemoryDom`] is an arena-backed tree with the same semantics, used by
//! native tests.

#[cfg(test)]
#[path = "dom_test.rs"]
mod dom_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

use crate::consts::ANCHOR_ATTRIBUTE;
use crate::error::PageError;

/// Minimal document access needed to relocate nodes.
pub trait Dom {
    /// Node identity. Equality means "the same node", never structural equality.
    type Node: Clone + PartialEq + fmt::Debug + 'static;

    /// Find an element by its `id` attribute.
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// Create a detached, hidden anchor labelled with the subject's id.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Dom`] when the host cannot create the node.
    fn create_anchor(&self, subject_id: &str) -> Result<Self::Node, PageError>;

    /// Move `node` to immediately after `reference`.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Dom`] when `reference` is detached or the host
    /// rejects the insertion.
    fn insert_after(&self, reference: &Self::Node, node: &Self::Node) -> Result<(), PageError>;

    /// Move `node` to immediately before `reference`.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Dom`] when `reference` is detached or the host
    /// rejects the insertion.
    fn insert_before(&self, reference: &Self::Node, node: &Self::Node) -> Result<(), PageError>;

    /// Move `node` to be the first child of `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Dom`] when the host rejects the insertion.
    fn prepend(&self, parent: &Self::Node, node: &Self::Node) -> Result<(), PageError>;
}

/// Index of a node inside a [`MemoryDom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
struct MemoryNode {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attributes: HashMap<String, String>,
}

#[derive(Debug)]
struct Tree {
    nodes: Vec<MemoryNode>,
    ids: HashMap<String, NodeId>,
}

impl Tree {
    fn node(&self, id: NodeId) -> Result<&MemoryNode, PageError> {
        self.nodes
            .get(id.0)
            .ok_or_else(|| PageError::Dom(format!("unknown node {}", id.0)))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut MemoryNode, PageError> {
        self.nodes
            .get_mut(id.0)
            .ok_or_else(|| PageError::Dom(format!("unknown node {}", id.0)))
    }

    fn detach(&mut self, id: NodeId) -> Result<(), PageError> {
        if let Some(parent) = self.node(id)?.parent {
            self.node_mut(parent)?.children.retain(|child| *child != id);
            self.node_mut(id)?.parent = None;
        }
        Ok(())
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, mut node: NodeId) -> Result<bool, PageError> {
        loop {
            if node == ancestor {
                return Ok(true);
            }
            match self.node(node)?.parent {
                Some(parent) => node = parent,
                None => return Ok(false),
            }
        }
    }

    /// Detach `node` and insert it into `parent` at the position computed by
    /// `position` once the node is out of the child list.
    fn insert(
        &mut self,
        parent: NodeId,
        node: NodeId,
        position: impl FnOnce(&[NodeId]) -> Result<usize, PageError>,
    ) -> Result<(), PageError> {
        if self.is_inclusive_ancestor(node, parent)? {
            return Err(PageError::Dom("cannot insert a node into itself".to_owned()));
        }
        self.detach(node)?;
        let index = position(&self.node(parent)?.children)?;
        self.node_mut(parent)?.children.insert(index, node);
        self.node_mut(node)?.parent = Some(parent);
        Ok(())
    }

    fn parent_of_reference(&self, reference: NodeId) -> Result<NodeId, PageError> {
        self.node(reference)?
            .parent
            .ok_or_else(|| PageError::Dom(format!("node {} is detached", reference.0)))
    }
}

fn index_of(children: &[NodeId], node: NodeId) -> Result<usize, PageError> {
    children
        .iter()
        .position(|child| *child == node)
        .ok_or_else(|| PageError::Dom(format!("node {} is not a child of its parent", node.0)))
}

/// Arena-backed document tree.
#[derive(Debug)]
pub struct MemoryDom {
    tree: RefCell<Tree>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    /// Create a document containing only a `body` root.
    #[must_use]
    pub fn new() -> Self {
        let root = MemoryNode {
            tag: "body".to_owned(),
            parent: None,
            children: Vec::new(),
            attributes: HashMap::new(),
        };
        Self {
            tree: RefCell::new(Tree { nodes: vec![root], ids: HashMap::new() }),
        }
    }

    /// The `body` root.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Create a detached element, registering `id` when given.
    pub fn create_element(&self, tag: &str, id: Option<&str>) -> NodeId {
        let mut tree = self.tree.borrow_mut();
        let node = NodeId(tree.nodes.len());
        let mut attributes = HashMap::new();
        if let Some(id) = id {
            attributes.insert("id".to_owned(), id.to_owned());
            tree.ids.insert(id.to_owned(), node);
        }
        tree.nodes.push(MemoryNode { tag: tag.to_owned(), parent: None, children: Vec::new(), attributes });
        node
    }

    /// Create an element and append it as the last child of `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Dom`] when `parent` is not part of this tree.
    pub fn append_element(&self, parent: NodeId, tag: &str, id: Option<&str>) -> Result<NodeId, PageError> {
        let node = self.create_element(tag, id);
        self.tree
            .borrow_mut()
            .insert(parent, node, |children| Ok(children.len()))?;
        Ok(node)
    }

    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.tree.borrow().nodes.get(node.0).and_then(|n| n.parent)
    }

    #[must_use]
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.tree
            .borrow()
            .nodes
            .get(node.0)
            .map_or_else(Vec::new, |n| n.children.clone())
    }

    /// The sibling immediately after `node`, if any.
    #[must_use]
    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent(node)?;
        let children = self.children(parent);
        let index = children.iter().position(|child| *child == node)?;
        children.get(index + 1).copied()
    }

    #[must_use]
    pub fn tag(&self, node: NodeId) -> Option<String> {
        self.tree.borrow().nodes.get(node.0).map(|n| n.tag.clone())
    }

    #[must_use]
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.tree
            .borrow()
            .nodes
            .get(node.0)
            .and_then(|n| n.attributes.get(name).cloned())
    }
}

impl Dom for MemoryDom {
    type Node = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree.borrow().ids.get(id).copied()
    }

    fn create_anchor(&self, subject_id: &str) -> Result<NodeId, PageError> {
        let node = self.create_element("div", None);
        let mut tree = self.tree.borrow_mut();
        let attributes = &mut tree.node_mut(node)?.attributes;
        attributes.insert(ANCHOR_ATTRIBUTE.to_owned(), subject_id.to_owned());
        attributes.insert("style".to_owned(), "display: none".to_owned());
        Ok(node)
    }

    fn insert_after(&self, reference: &NodeId, node: &NodeId) -> Result<(), PageError> {
        if reference == node {
            return Ok(());
        }
        let mut tree = self.tree.borrow_mut();
        let parent = tree.parent_of_reference(*reference)?;
        let reference = *reference;
        tree.insert(parent, *node, |children| Ok(index_of(children, reference)? + 1))
    }

    fn insert_before(&self, reference: &NodeId, node: &NodeId) -> Result<(), PageError> {
        if reference == node {
            return Ok(());
        }
        let mut tree = self.tree.borrow_mut();
        let parent = tree.parent_of_reference(*reference)?;
        let reference = *reference;
        tree.insert(parent, *node, |children| index_of(children, reference))
    }

    fn prepend(&self, parent: &NodeId, node: &NodeId) -> Result<(), PageError> {
        self.tree.borrow_mut().insert(*parent, *node, |_| Ok(0))
    }
}
