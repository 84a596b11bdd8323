//! Human-readable outline of a guess tree.

use generational_arena::Index;
use termtree::Tree;

use crate::domain::arena::{Branch, GuessTree};

const YES_BEND: &str = "+-";
const NO_BEND: &str = "`-";
const YES_LABEL: &str = "Yes: ";
const NO_LABEL: &str = "No:  ";

/// Classic ASCII outline.
///
/// ```text
/// Is it bigger than a breadbox?
/// +-Yes: It is an elephant
/// `-No:  It is a mouse
/// ```
pub fn render_ascii(tree: &GuessTree) -> String {
    let mut out = String::new();
    // (node, prefix inherited from the parent, bend, label)
    let mut stack = vec![(tree.root(), String::new(), "", "")];
    while let Some((idx, prefix, bend, label)) = stack.pop() {
        let Ok(node) = tree.node(idx) else {
            continue;
        };
        out.push_str(&prefix);
        out.push_str(bend);
        out.push_str(label);
        if node.is_leaf() {
            out.push_str("It is ");
        }
        out.push_str(&node.text);
        out.push('\n');

        if node.is_leaf() {
            continue;
        }
        let prefix = match bend {
            YES_BEND => format!("{prefix}| "),
            NO_BEND => format!("{prefix}  "),
            _ => prefix,
        };
        if let Ok(no) = tree.follow(idx, Branch::No) {
            stack.push((no, prefix.clone(), NO_BEND, NO_LABEL));
        }
        if let Ok(yes) = tree.follow(idx, Branch::Yes) {
            stack.push((yes, prefix, YES_BEND, YES_LABEL));
        }
    }
    out
}

/// Box-drawing outline via `termtree`.
pub fn render_unicode(tree: &GuessTree) -> String {
    let outline = to_termtree(tree);
    let rendered = outline.to_string();
    dismantle(outline);
    rendered
}

/// Builds the termtree bottom-up; a question is assembled once all of its
/// children are on the `done` stack.
fn to_termtree(tree: &GuessTree) -> Tree<String> {
    enum Step {
        Visit(Index, &'static str),
        Assemble(String, usize),
    }

    let mut steps = vec![Step::Visit(tree.root(), "")];
    let mut done: Vec<Tree<String>> = Vec::new();
    while let Some(step) = steps.pop() {
        match step {
            Step::Visit(idx, label) => {
                let Ok(node) = tree.node(idx) else {
                    done.push(Tree::new(format!("{label}?")));
                    continue;
                };
                if node.is_leaf() {
                    done.push(Tree::new(format!("{label}It is {}", node.text)));
                    continue;
                }
                let children: Vec<_> = [(Branch::Yes, YES_LABEL), (Branch::No, NO_LABEL)]
                    .into_iter()
                    .filter_map(|(branch, label)| tree.follow(idx, branch).ok().map(|c| (c, label)))
                    .collect();
                steps.push(Step::Assemble(format!("{label}{}", node.text), children.len()));
                for (child, label) in children.into_iter().rev() {
                    steps.push(Step::Visit(child, label));
                }
            }
            Step::Assemble(text, count) => {
                let leaves = done.split_off(done.len() - count);
                done.push(Tree::new(text).with_leaves(leaves));
            }
        }
    }
    done.pop().unwrap_or_else(|| Tree::new(String::new()))
}

/// Drops a termtree without recursing once per level.
fn dismantle(outline: Tree<String>) {
    let mut stack = vec![outline];
    while let Some(mut node) = stack.pop() {
        stack.append(&mut node.leaves);
    }
}
