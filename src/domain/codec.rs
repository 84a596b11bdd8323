//! Plain-text tree format.
//!
//! Pre-order, two lines per node: a tag (`Leaf` or `Internal node`) followed
//! by the node text. Internal nodes are followed by their full yes subtree and
//! then their full no subtree. Shape is recovered from the tags alone.
//!
//! ```text
//! Internal node
//! Is it bigger than a breadbox?
//! Leaf
//! an elephant
//! Leaf
//! a mouse
//! ```

use generational_arena::{Arena, Index};
use tracing::{debug, instrument};

use crate::domain::arena::{clean_text, Branch, GuessNode, GuessTree, NodeKind};
use crate::domain::error::{DomainError, DomainResult};

pub const LEAF_TAG: &str = "Leaf";
pub const INTERNAL_TAG: &str = "Internal node";

/// Serialize `tree`. Fails only if a question has a dangling child.
#[instrument(level = "debug", skip(tree), fields(nodes = tree.len()))]
pub fn encode(tree: &GuessTree) -> DomainResult<String> {
    let mut out = String::new();
    let mut stack = vec![tree.root()];
    while let Some(idx) = stack.pop() {
        let node = tree.node(idx)?;
        let tag = if node.is_leaf() { LEAF_TAG } else { INTERNAL_TAG };
        push_line(&mut out, tag);
        push_line(&mut out, node.text.trim());
        if !node.is_leaf() {
            // no first so the yes subtree is written first
            stack.push(tree.follow(idx, Branch::No)?);
            stack.push(tree.follow(idx, Branch::Yes)?);
        }
    }
    Ok(out)
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

/// Parse a tree written by [`encode`].
///
/// Truncated or inconsistent input is rejected as a whole; no partial tree is
/// ever returned. Nesting depth is bounded only by memory.
#[instrument(level = "debug", skip(content), fields(bytes = content.len()))]
pub fn decode(content: &str) -> DomainResult<GuessTree> {
    let mut reader = LineReader::new(content);
    let mut arena: Arena<GuessNode> = Arena::new();
    // questions still waiting for a child, with the branch to fill next
    let mut open: Vec<(Index, Branch)> = Vec::new();
    let mut root = None;

    loop {
        let Some((tag, text)) = read_node(&mut reader)? else {
            return Err(match open.last() {
                None => DomainError::EmptyTree,
                Some(&(question, branch)) => DomainError::malformed(
                    reader.line + 1,
                    format!("missing {branch} subtree of {:?}", arena[question].text),
                ),
            });
        };

        let idx = arena.insert(GuessNode {
            text,
            kind: NodeKind::Leaf,
        });
        if tag == INTERNAL_TAG {
            arena[idx].kind = NodeKind::Internal { yes: idx, no: idx };
        }

        match open.last_mut() {
            Some((parent, branch)) => {
                GuessTree::attach(&mut arena, *parent, *branch, idx);
                if *branch == Branch::Yes {
                    *branch = Branch::No;
                } else {
                    open.pop();
                }
            }
            None => root = Some(idx),
        }
        if tag == INTERNAL_TAG {
            open.push((idx, Branch::Yes));
        }
        if open.is_empty() {
            break;
        }
    }

    while let Some(line) = reader.next_line() {
        if !line.is_empty() {
            return Err(DomainError::malformed(reader.line, "trailing content"));
        }
    }
    let root = root.ok_or(DomainError::EmptyTree)?;
    debug!("decoded {} nodes", arena.len());
    Ok(GuessTree::from_parts(arena, root))
}

/// Reads one tag and its payload. None when the stream is exhausted (or
/// blank) where a tag was due.
fn read_node(reader: &mut LineReader<'_>) -> DomainResult<Option<(&'static str, String)>> {
    let tag = match reader.next_line() {
        None | Some("") => return Ok(None),
        Some(LEAF_TAG) => LEAF_TAG,
        Some(INTERNAL_TAG) => INTERNAL_TAG,
        Some(other) => {
            return Err(DomainError::malformed(
                reader.line,
                format!("unknown tag {other:?}"),
            ))
        }
    };
    let tag_line = reader.line;

    match reader.next_line() {
        None | Some("") => Err(DomainError::malformed(
            tag_line + 1,
            format!("missing payload after {tag:?}"),
        )),
        Some(payload) => clean_text(payload)
            .map(|text| Some((tag, text)))
            .map_err(|_| DomainError::malformed(reader.line, "invalid payload")),
    }
}

/// Line cursor yielding trimmed lines and tracking the 1-based line number.
struct LineReader<'a> {
    lines: std::str::Lines<'a>,
    line: usize,
}

impl<'a> LineReader<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            lines: content.lines(),
            line: 0,
        }
    }

    fn next_line(&mut self) -> Option<&'a str> {
        let line = self.lines.next()?;
        self.line += 1;
        Some(line.trim())
    }
}
