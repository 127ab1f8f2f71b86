use std::fmt::{self, Write};

use crate::tree::{Entry, NodeId, SectionTree};

const INDENT: &str = "  ";

impl SectionTree {
    /// Write the tree in grouping syntax, one root entry per line.
    ///
    /// Groups holding only leaves are kept on one line; other groups open a
    /// new indented block. Parsing the output gives back an equal tree.
    pub fn write_grouping<W: Write>(&self, out: &mut W) -> fmt::Result {
        self.write_entries(self.get_root_id(), 0, out)
    }

    pub fn to_grouping_string(&self) -> String {
        let mut out = String::new();
        // Writing into a String never fails
        let _ = self.write_grouping(&mut out);
        out
    }

    fn write_entries<W: Write>(&self, id: NodeId, level: usize, out: &mut W) -> fmt::Result {
        for (key, entry) in self.node(id).entries.iter() {
            write_indent(level, out)?;
            match entry {
                Entry::Leaf => writeln!(out, "{}", key.to_atom())?,
                Entry::Group(child) => {
                    let group = self.node(*child);
                    if group.entries.values().all(Entry::is_leaf) {
                        let atoms: Vec<_> = group.entries.keys().map(|k| k.to_atom()).collect();
                        writeln!(out, "{}({})", key.to_atom(), atoms.join(" "))?;
                    } else {
                        writeln!(out, "{}(", key.to_atom())?;
                        self.write_entries(*child, level + 1, out)?;
                        write_indent(level, out)?;
                        writeln!(out, ")")?;
                    }
                }
            }
        }
        Ok(())
    }
}

fn write_indent<W: Write>(level: usize, out: &mut W) -> fmt::Result {
    for _ in 0..level {
        out.write_str(INDENT)?;
    }
    Ok(())
}
