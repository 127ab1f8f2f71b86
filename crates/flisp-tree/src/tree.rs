use crate::key::KeyLiteral;
use crate::map::Map;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// A child of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    /// An atom without children.
    Leaf,
    /// A nested group stored in the same arena.
    Group(NodeId),
}

impl Entry {
    pub fn is_leaf(&self) -> bool {
        matches!(self, Entry::Leaf)
    }

    pub fn as_group(&self) -> Option<NodeId> {
        match self {
            Entry::Leaf => None,
            Entry::Group(id) => Some(*id),
        }
    }
}

/// One level of the tree: keys in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Group {
    pub entries: Map<KeyLiteral, Entry>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &KeyLiteral) -> Option<Entry> {
        self.entries.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The parsed contents of one section.
///
/// Groups live in an arena and refer to nested groups by [`NodeId`]. The root
/// group always exists at `NodeId(0)`. Replacing a group by re-inserting its
/// key leaves the old group unreachable in the arena.
#[derive(Debug, Clone)]
pub struct SectionTree {
    root: NodeId,
    nodes: Vec<Group>,
}

impl Default for SectionTree {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for SectionTree {
    fn eq(&self, other: &Self) -> bool {
        self.groups_equal(self.root, other, other.root)
    }
}

impl SectionTree {
    /// Compare two groups structurally, ignoring NodeId values
    fn groups_equal(&self, id1: NodeId, other: &SectionTree, id2: NodeId) -> bool {
        let group1 = self.node(id1);
        let group2 = other.node(id2);

        if group1.len() != group2.len() {
            return false;
        }

        // Order is part of the structure
        for ((key1, entry1), (key2, entry2)) in group1.entries.iter().zip(group2.entries.iter()) {
            if key1 != key2 {
                return false;
            }
            match (entry1, entry2) {
                (Entry::Leaf, Entry::Leaf) => {}
                (Entry::Group(child1), Entry::Group(child2)) => {
                    if !self.groups_equal(*child1, other, *child2) {
                        return false;
                    }
                }
                _ => return false,
            }
        }

        true
    }

    pub fn new() -> Self {
        Self {
            root: NodeId(0),
            nodes: vec![Group::new()],
        }
    }

    pub fn root(&self) -> &Group {
        &self.nodes[self.root.0]
    }

    pub fn get_root_id(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Group {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Group {
        &mut self.nodes[id.0]
    }

    pub fn is_empty(&self) -> bool {
        self.root().is_empty()
    }

    /// Register a leaf under `parent`, replacing whatever the key held.
    pub fn add_leaf(&mut self, parent: NodeId, key: KeyLiteral) -> Option<Entry> {
        self.node_mut(parent).entries.insert(key, Entry::Leaf)
    }

    /// Register a new empty group under `parent` and return its id.
    pub fn add_group(&mut self, parent: NodeId, key: KeyLiteral) -> NodeId {
        self.nodes.push(Group::new());
        let id = NodeId(self.nodes.len() - 1);
        self.node_mut(parent).entries.insert(key, Entry::Group(id));
        id
    }

    /// Number of leaves and groups reachable from the root.
    pub fn atom_count(&self) -> usize {
        self.count_from(self.root)
    }

    fn count_from(&self, id: NodeId) -> usize {
        self.node(id)
            .entries
            .values()
            .map(|entry| match entry {
                Entry::Leaf => 1,
                Entry::Group(child) => 1 + self.count_from(*child),
            })
            .sum()
    }

    /// Number of leaves reachable from the root.
    pub fn leaf_count(&self) -> usize {
        self.leaves_from(self.root)
    }

    fn leaves_from(&self, id: NodeId) -> usize {
        self.node(id)
            .entries
            .values()
            .map(|entry| match entry {
                Entry::Leaf => 1,
                Entry::Group(child) => self.leaves_from(*child),
            })
            .sum()
    }

    /// Follow a path of keys from the root.
    pub fn lookup(&self, path: &[&str]) -> Option<Entry> {
        let mut current = Entry::Group(self.root);
        for segment in path {
            let group = current.as_group()?;
            current = self.node(group).get(&KeyLiteral::bare(*segment))?;
        }
        Some(current)
    }
}
