use std::fmt::{self, Write};

use crate::index::{Balancing, OrderedIndex};
use crate::node::Link;

// Deeper subtrees are elided from `render_tree` output.
const MAX_RENDER_DEPTH: usize = 16;

impl<K: fmt::Display> OrderedIndex<K> {
    /// Draws the tree sideways, right subtree above left subtree, one node per line.
    ///
    /// ```
    /// use avl_index::OrderedIndex;
    /// let index: OrderedIndex<i32> = [1, 2, 3].into_iter().collect();
    /// assert_eq!(index.render_tree(), "2 (root)\n|-R: 3 (leaf)\n`-L: 1 (leaf)\n");
    /// ```
    pub fn render_tree(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_tree(&mut out);
        out
    }

    fn write_tree<W: Write>(&self, w: &mut W) -> fmt::Result {
        if self.root.is_none() {
            return w.write_str("(empty tree)\n");
        }

        let mut stack: Vec<(Link, String, &str)> = vec![(self.root, String::new(), "")];
        while let Some((link, prefix, branch)) = stack.pop() {
            let lead = junction(&prefix, branch);
            let id = match link {
                Some(id) => id,
                None => {
                    writeln!(w, "{lead}{branch}None")?;
                    continue;
                }
            };
            if prefix.len() > 2 * MAX_RENDER_DEPTH {
                writeln!(w, "{lead}{branch}(tree continues)")?;
                continue;
            }

            let node = &self.nodes[id];
            if node.is_leaf() {
                writeln!(w, "{lead}{branch}{} (leaf)", node.key)?;
            } else {
                let postfix = if branch.is_empty() { " (root)" } else { "" };
                writeln!(w, "{lead}{branch}{}{postfix}", node.key)?;
                stack.push((node.left, format!("{prefix}  "), "L: "));
                stack.push((node.right, format!("{prefix}| "), "R: "));
            }
        }
        Ok(())
    }
}

/// Turns the last indentation step of `prefix` into a branch connector.
fn junction(prefix: &str, branch: &str) -> String {
    if prefix.len() < 2 || branch.is_empty() {
        return prefix.to_string();
    }
    let (head, tail) = prefix.split_at(prefix.len() - 2);
    let connector = if tail.starts_with('|') { '|' } else { '`' };
    format!("{head}{connector}-")
}

/// Pre-order listing of the keys, e.g. `AVL pre-order { 2, 1, 3 }`.
impl<K: fmt::Display> fmt::Display for OrderedIndex<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.balancing {
            Balancing::Avl => "AVL",
            Balancing::Disabled => "BST",
        };
        write!(f, "{label} pre-order {{ ")?;
        for (i, key) in self.preorder().into_iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}")?;
        }
        f.write_str(" }")
    }
}
