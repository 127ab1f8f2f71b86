use crate::key::KeyLiteral;
use crate::tree::{NodeId, SectionTree};

/// A group close with only the root left on the stack.
#[derive(Debug, PartialEq, Eq, thiserror::Error, Clone)]
#[error("Cannot close a group at the root")]
pub struct CannotCloseRoot;

/// Construction ended with groups still open.
#[derive(Debug, PartialEq, Eq, thiserror::Error, Clone)]
#[error("{unclosed} group(s) still open")]
pub struct UnclosedGroups {
    pub unclosed: usize,
}

/// Builds a section tree through a stack of open groups.
///
/// The stack starts with the tree's root and never becomes empty.
pub struct TreeConstructor<'t> {
    tree: &'t mut SectionTree,
    /// Stack of NodeIds from root to the innermost open group.
    stack: Vec<NodeId>,
}

impl<'t> TreeConstructor<'t> {
    pub fn new(tree: &'t mut SectionTree) -> Self {
        let root = tree.get_root_id();
        Self {
            tree,
            stack: vec![root],
        }
    }

    pub fn current_node_id(&self) -> NodeId {
        *self.stack.last().expect("Stack should never be empty")
    }

    /// Number of entries on the open stack, root included.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Register a new group under the current node and make it current.
    pub fn open_group(&mut self, key: KeyLiteral) -> NodeId {
        let parent = self.current_node_id();
        let id = self.tree.add_group(parent, key);
        self.stack.push(id);
        id
    }

    /// Register a leaf under the current node.
    pub fn add_leaf(&mut self, key: KeyLiteral) {
        let parent = self.current_node_id();
        self.tree.add_leaf(parent, key);
    }

    /// Return to the parent of the current group.
    pub fn close_group(&mut self) -> Result<NodeId, CannotCloseRoot> {
        if self.stack.len() <= 1 {
            return Err(CannotCloseRoot);
        }
        self.stack.pop();
        Ok(self.current_node_id())
    }

    /// Check that every opened group has been closed.
    pub fn finish(self) -> Result<(), UnclosedGroups> {
        match self.stack.len() {
            1 => Ok(()),
            depth => Err(UnclosedGroups { unclosed: depth - 1 }),
        }
    }
}
