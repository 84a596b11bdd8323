//! Arena-backed binary decision tree.
//!
//! Every node lives in a generational arena and is addressed by `Index`.
//! Learning rewrites exactly one slot in place, so parents never need to be
//! rebuilt and the change is visible from the root immediately.

use std::fmt;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::error::{DomainError, DomainResult};

/// Which side of a question an answer leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Branch {
    Yes,
    No,
}

impl Branch {
    pub fn from_affirmative(affirmative: bool) -> Self {
        if affirmative {
            Branch::Yes
        } else {
            Branch::No
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Branch::Yes => write!(f, "yes"),
            Branch::No => write!(f, "no"),
        }
    }
}

/// Shape of a node: a guess, or a question with exactly two children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Leaf,
    Internal { yes: Index, no: Index },
}

/// Tree node: an object name for leaves, a yes/no question otherwise.
#[derive(Debug, Clone)]
pub struct GuessNode {
    pub text: String,
    pub kind: NodeKind,
}

impl GuessNode {
    fn leaf(text: String) -> Self {
        Self {
            text,
            kind: NodeKind::Leaf,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf)
    }

    /// Child index on `branch`, None for leaves.
    pub fn child(&self, branch: Branch) -> Option<Index> {
        match (self.kind, branch) {
            (NodeKind::Leaf, _) => None,
            (NodeKind::Internal { yes, .. }, Branch::Yes) => Some(yes),
            (NodeKind::Internal { no, .. }, Branch::No) => Some(no),
        }
    }
}

/// The knowledge tree. Never empty: a tree holds at least one leaf.
#[derive(Debug, Clone)]
pub struct GuessTree {
    arena: Arena<GuessNode>,
    root: Index,
}

/// Trim node text and reject what the file format cannot carry.
pub(crate) fn clean_text(text: &str) -> DomainResult<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.contains(['\n', '\r']) {
        return Err(DomainError::InvalidText(text.to_string()));
    }
    Ok(trimmed.to_string())
}

impl GuessTree {
    /// Single-leaf tree.
    pub fn leaf(text: &str) -> DomainResult<Self> {
        let mut arena = Arena::new();
        let root = arena.insert(GuessNode::leaf(clean_text(text)?));
        Ok(Self { arena, root })
    }

    /// Question node owning the two given subtrees.
    pub fn internal(question: &str, yes: GuessTree, no: GuessTree) -> DomainResult<Self> {
        let question = clean_text(question)?;
        let mut arena = Arena::with_capacity(yes.len() + no.len() + 1);
        let yes = graft(&mut arena, &yes, yes.root)?;
        let no = graft(&mut arena, &no, no.root)?;
        let root = arena.insert(GuessNode {
            text: question,
            kind: NodeKind::Internal { yes, no },
        });
        Ok(Self { arena, root })
    }

    /// Two guesses under one question.
    pub fn small() -> Self {
        Self::starter(&[
            ("Is it bigger than a breadbox?", 1, 2),
            ("an elephant", 0, 0),
            ("a mouse", 0, 0),
        ])
    }

    /// Three guesses under two questions.
    pub fn medium() -> Self {
        Self::starter(&[
            ("Is it bigger than a breadbox?", 1, 4),
            ("Is it gray?", 2, 3),
            ("an elephant", 0, 0),
            ("a tiger", 0, 0),
            ("a mouse", 0, 0),
        ])
    }

    /// Builds a compiled-in tree from a flat table; `(text, 0, 0)` is a leaf,
    /// otherwise the numbers are row offsets of the yes/no children.
    fn starter(rows: &[(&str, usize, usize)]) -> Self {
        let mut arena = Arena::with_capacity(rows.len());
        let slots: Vec<Index> = rows
            .iter()
            .map(|(text, _, _)| arena.insert(GuessNode::leaf((*text).to_string())))
            .collect();
        for (slot, (_, yes, no)) in slots.iter().zip(rows) {
            if *yes != 0 {
                arena[*slot].kind = NodeKind::Internal {
                    yes: slots[*yes],
                    no: slots[*no],
                };
            }
        }
        Self {
            arena,
            root: slots[0],
        }
    }

    pub(crate) fn from_parts(arena: Arena<GuessNode>, root: Index) -> Self {
        Self { arena, root }
    }

    pub fn root(&self) -> Index {
        self.root
    }

    #[instrument(level = "trace", skip(self))]
    pub fn node(&self, idx: Index) -> DomainResult<&GuessNode> {
        self.arena.get(idx).ok_or(DomainError::StaleIndex)
    }

    pub fn text(&self, idx: Index) -> DomainResult<&str> {
        self.node(idx).map(|n| n.text.as_str())
    }

    pub fn is_leaf(&self, idx: Index) -> DomainResult<bool> {
        self.node(idx).map(GuessNode::is_leaf)
    }

    /// Follows `branch` from the question at `idx`.
    ///
    /// Fails with `MissingBranch` when the node has no such child or the child
    /// index does not resolve; callers must not guess a replacement.
    #[instrument(level = "trace", skip(self))]
    pub fn follow(&self, idx: Index, branch: Branch) -> DomainResult<Index> {
        let node = self.node(idx)?;
        node.child(branch)
            .filter(|child| self.arena.contains(*child))
            .ok_or_else(|| DomainError::MissingBranch {
                question: node.text.clone(),
                branch,
            })
    }

    /// Turns the leaf at `leaf` into a question separating the old guess from
    /// `answer`.
    ///
    /// When `answer_is_yes`, the new object hangs off the yes branch and the
    /// old guess off the no branch; otherwise the reverse. The slot keeps its
    /// index, so every ancestor sees the new question.
    #[instrument(level = "debug", skip(self))]
    pub fn split_leaf(
        &mut self,
        leaf: Index,
        answer: &str,
        question: &str,
        answer_is_yes: bool,
    ) -> DomainResult<()> {
        let answer = clean_text(answer)?;
        let question = clean_text(question)?;
        let node = self.node(leaf)?;
        if !node.is_leaf() {
            return Err(DomainError::NotALeaf(node.text.clone()));
        }
        let guess = node.text.clone();

        let old = self.arena.insert(GuessNode::leaf(guess));
        let new = self.arena.insert(GuessNode::leaf(answer));
        let (yes, no) = if answer_is_yes { (new, old) } else { (old, new) };
        self.arena[leaf] = GuessNode {
            text: question,
            kind: NodeKind::Internal { yes, no },
        };
        Ok(())
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Always false; kept for the `len` convention.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    #[instrument(level = "trace", skip(self))]
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder::new(self)
    }

    /// Number of levels from the root to the deepest leaf.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self.root, 1)];
        while let Some((idx, level)) = stack.pop() {
            let Some(node) = self.arena.get(idx) else {
                continue;
            };
            deepest = deepest.max(level);
            if let NodeKind::Internal { yes, no } = node.kind {
                stack.push((yes, level + 1));
                stack.push((no, level + 1));
            }
        }
        deepest
    }

    /// Object names in pre-order (yes side first).
    pub fn leaves(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, n)| n.is_leaf())
            .map(|(_, n)| n.text.as_str())
            .collect()
    }

    /// Questions in pre-order (yes side first).
    pub fn questions(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, n)| !n.is_leaf())
            .map(|(_, n)| n.text.as_str())
            .collect()
    }

    fn same_shape(&self, other: &GuessTree) -> bool {
        let mut pairs = vec![(self.root, other.root)];
        while let Some((a, b)) = pairs.pop() {
            let (Some(x), Some(y)) = (self.arena.get(a), other.arena.get(b)) else {
                return false;
            };
            if x.text != y.text {
                return false;
            }
            match (x.kind, y.kind) {
                (NodeKind::Leaf, NodeKind::Leaf) => {}
                (NodeKind::Internal { yes: ay, no: an }, NodeKind::Internal { yes: by, no: bn }) => {
                    pairs.push((ay, by));
                    pairs.push((an, bn));
                }
                _ => return false,
            }
        }
        true
    }

    /// Points `branch` of the question at `parent` to `child`.
    pub(crate) fn attach(arena: &mut Arena<GuessNode>, parent: Index, branch: Branch, child: Index) {
        if let NodeKind::Internal { yes, no } = &mut arena[parent].kind {
            match branch {
                Branch::Yes => *yes = child,
                Branch::No => *no = child,
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn detach(&mut self, idx: Index) {
        self.arena.remove(idx);
    }
}

/// Copies the subtree of `src` rooted at `idx` into `arena`.
///
/// A copied question first points at itself on both sides; each child patches
/// its slot when it is inserted.
fn graft(arena: &mut Arena<GuessNode>, src: &GuessTree, idx: Index) -> DomainResult<Index> {
    let mut pending: Vec<(Index, Option<(Index, Branch)>)> = vec![(idx, None)];
    let mut top = None;
    while let Some((from, parent)) = pending.pop() {
        let node = src.node(from)?;
        let copy = arena.insert(GuessNode::leaf(node.text.clone()));
        if let NodeKind::Internal { yes, no } = node.kind {
            arena[copy].kind = NodeKind::Internal {
                yes: copy,
                no: copy,
            };
            pending.push((no, Some((copy, Branch::No))));
            pending.push((yes, Some((copy, Branch::Yes))));
        }
        match parent {
            Some((parent, branch)) => GuessTree::attach(arena, parent, branch, copy),
            None => top = Some(copy),
        }
    }
    top.ok_or(DomainError::StaleIndex)
}

/// Structural equality: same texts in the same shape, indices ignored.
impl PartialEq for GuessTree {
    fn eq(&self, other: &Self) -> bool {
        self.same_shape(other)
    }
}

impl Eq for GuessTree {}

impl fmt::Display for GuessTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::domain::outline::render_ascii(self))
    }
}

/// Pre-order walk, yes branch before no branch. Dangling children are skipped.
pub struct PreOrder<'a> {
    tree: &'a GuessTree,
    stack: Vec<Index>,
}

impl<'a> PreOrder<'a> {
    fn new(tree: &'a GuessTree) -> Self {
        Self {
            tree,
            stack: vec![tree.root],
        }
    }
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = (Index, &'a GuessNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(idx) = self.stack.pop() {
            if let Some(node) = self.tree.arena.get(idx) {
                if let NodeKind::Internal { yes, no } = node.kind {
                    // no first so yes pops first
                    self.stack.push(no);
                    self.stack.push(yes);
                }
                return Some((idx, node));
            }
        }
        None
    }
}
