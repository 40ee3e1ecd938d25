//! ASCII tree rendering of feature names.
use std::collections::HashSet;

const ROOT: usize = 0;

#[derive(Debug, Default)]
struct Node {
    name: String,
    is_feature: bool,
    children: Vec<usize>,
}

/// Index arena holding the path tree; node `0` is the unnamed root.
#[derive(Debug)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    fn build(features: &[String]) -> Self {
        let known: HashSet<&str> = features.iter().map(String::as_str).collect();
        let mut tree = Self {
            nodes: vec![Node::default()],
        };

        for feature in features {
            let mut parent = ROOT;
            let mut path = String::new();
            for part in feature.split('/') {
                if !path.is_empty() {
                    path.push('/');
                }
                path.push_str(part);
                parent = match tree.find_child(parent, part) {
                    Some(id) => id,
                    None => tree.add_child(parent, part, known.contains(path.as_str())),
                };
            }
        }
        tree
    }

    fn find_child(&self, parent: usize, name: &str) -> Option<usize> {
        self.nodes
            .get(parent)?
            .children
            .iter()
            .copied()
            .find(|&id| self.nodes.get(id).is_some_and(|n| n.name == name))
    }

    fn add_child(&mut self, parent: usize, name: &str, is_feature: bool) -> usize {
        let id = self.nodes.len();
        self.nodes.push(Node {
            name: name.to_string(),
            is_feature,
            children: Vec::new(),
        });
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(id);
        }
        id
    }

    /// Replace every non-feature node that has children by those children,
    /// renamed to carry the skipped path segments (`auth/oauth` instead of
    /// a bare `oauth` under a placeholder `auth`).
    fn collapse(&mut self, node: usize, prefix: &str) {
        let children = self
            .nodes
            .get_mut(node)
            .map(|n| std::mem::take(&mut n.children))
            .unwrap_or_default();

        let mut kept = Vec::with_capacity(children.len());
        for child in children {
            let Some((name, is_feature, is_leaf)) = self
                .nodes
                .get(child)
                .map(|n| (n.name.clone(), n.is_feature, n.children.is_empty()))
            else {
                continue;
            };
            let child_prefix = if prefix.is_empty() {
                name
            } else {
                format!("{prefix}/{name}")
            };

            if !is_feature && !is_leaf {
                self.collapse(child, &child_prefix);
                if let Some(n) = self.nodes.get(child) {
                    kept.extend(n.children.iter().copied());
                }
            } else {
                if !prefix.is_empty()
                    && let Some(n) = self.nodes.get_mut(child)
                {
                    n.name = child_prefix;
                }
                self.collapse(child, "");
                kept.push(child);
            }
        }

        if let Some(n) = self.nodes.get_mut(node) {
            n.children = kept;
        }
    }

    fn render(&self, out: &mut String, node: usize, prefix: &str) {
        let Some(children) = self.nodes.get(node).map(|n| &n.children) else {
            return;
        };
        for (i, &child) in children.iter().enumerate() {
            let Some(entry) = self.nodes.get(child) else {
                continue;
            };
            let (connector, indent) = if i + 1 == children.len() {
                ("└── ", "    ")
            } else {
                ("├── ", "│   ")
            };
            out.push_str(prefix);
            out.push_str(connector);
            out.push_str(&entry.name);
            out.push('\n');
            self.render(out, child, &format!("{prefix}{indent}"));
        }
    }
}

/// Render feature names as an indented ASCII tree.
///
/// Siblings keep the order of first appearance in `features`.  Path
/// segments that are not features themselves are folded into their
/// descendants' labels.  Every line, including the last, ends with `\n`;
/// an empty list renders as an empty string.
#[must_use]
pub fn render_tree(features: &[String]) -> String {
    if features.is_empty() {
        return String::new();
    }
    let mut tree = Tree::build(features);
    tree.collapse(ROOT, "");

    let mut out = String::new();
    tree.render(&mut out, ROOT, "");
    out
}
