use flisp_tree::{Entry, KeyLiteral, NodeId, SectionTree};

/// Line emitted between two siblings of the same group.
pub const SEPARATOR: &str = "-";

/// Flatten a section into mergestate directives.
///
/// Every leaf yields one directive whose prefix lists its enclosing groups
/// innermost first, joined with `*`. A [`SEPARATOR`] line precedes every
/// sibling except the first one of its group.
pub fn flatten(tree: &SectionTree) -> Vec<String> {
    let mut lines = Vec::new();
    flatten_group(tree, tree.get_root_id(), "", &mut lines);
    lines
}

fn flatten_group(tree: &SectionTree, id: NodeId, prefix: &str, lines: &mut Vec<String>) {
    for (index, (key, entry)) in tree.node(id).entries.iter().enumerate() {
        if index > 0 {
            lines.push(SEPARATOR.to_string());
        }
        match entry {
            Entry::Leaf => lines.push(directive_line(key, prefix)),
            Entry::Group(child) => {
                let prefix = if prefix.is_empty() {
                    key.to_string()
                } else {
                    format!("{key}*{prefix}")
                };
                flatten_group(tree, *child, &prefix, lines);
            }
        }
    }
}

/// `# MergeState <key>=<TAB>(<prefix>)`
pub fn directive_line(key: &KeyLiteral, prefix: &str) -> String {
    format!("# MergeState {key}=\t({prefix})")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn key(s: &str) -> KeyLiteral {
        KeyLiteral::from_token(s)
    }

    #[test]
    fn test_prefix_is_innermost_first() {
        let mut tree = SectionTree::new();
        let root = tree.get_root_id();
        let outer = tree.add_group(root, key("outer"));
        let inner = tree.add_group(outer, key("inner"));
        tree.add_leaf(inner, key("leaf1"));

        assert_eq!(flatten(&tree), vec!["# MergeState leaf1=\t(inner*outer)"]);
    }

    #[test]
    fn test_root_leaf_has_empty_prefix() {
        let mut tree = SectionTree::new();
        let root = tree.get_root_id();
        tree.add_leaf(root, key("key"));

        assert_eq!(flatten(&tree), vec!["# MergeState key=\t()"]);
    }

    #[test]
    fn test_separators_between_mixed_siblings() {
        let mut tree = SectionTree::new();
        let root = tree.get_root_id();
        tree.add_leaf(root, key("a"));
        let g = tree.add_group(root, key("g"));
        tree.add_leaf(g, key("x"));
        tree.add_leaf(g, key("y"));
        tree.add_leaf(root, key("b"));

        assert_eq!(
            flatten(&tree),
            vec![
                "# MergeState a=\t()",
                "-",
                "# MergeState x=\t(g)",
                "-",
                "# MergeState y=\t(g)",
                "-",
                "# MergeState b=\t()",
            ]
        );
    }

    #[test]
    fn test_quoted_keys_keep_parentheses() {
        let mut tree = SectionTree::new();
        let root = tree.get_root_id();
        let nop = tree.add_group(root, key("\"00 : NOP\""));
        let i00 = tree.add_group(nop, key("I00"));
        tree.add_leaf(i00, key("NF"));

        assert_eq!(
            flatten(&tree),
            vec!["# MergeState NF=\t(I00*(00 : NOP))"]
        );
    }

    #[test]
    fn test_empty_tree_has_no_lines() {
        assert!(flatten(&SectionTree::new()).is_empty());
    }

    #[test]
    fn test_empty_group_still_gets_separator() {
        let mut tree = SectionTree::new();
        let root = tree.get_root_id();
        tree.add_leaf(root, key("a"));
        tree.add_group(root, key("empty"));

        assert_eq!(flatten(&tree), vec!["# MergeState a=\t()", "-"]);
    }
}
