use serde::Serialize;

/// Index of a line within its [`ConfigTree`] arena.
pub type LineId = usize;

/// A single configuration statement in the parsed hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigLine {
    /// Statement text with indentation and block punctuation stripped.
    pub text: String,
    /// Nesting depth (0 = top level).
    pub depth: usize,
    /// 1-based line number in the source text.
    pub number: usize,
    /// Owning parent, `None` for top-level lines.
    pub parent: Option<LineId>,
    /// Children in declaration order.
    pub children: Vec<LineId>,
}

/// An ordered forest of configuration lines.
///
/// Lines live in a flat arena and reference each other by index, so the
/// parent/child relation cannot form a cycle and every non-root line has
/// exactly one parent. The tree is immutable once parsing completes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigTree {
    lines: Vec<ConfigLine>,
}

impl ConfigTree {
    pub(crate) fn from_lines(lines: Vec<ConfigLine>) -> Self {
        Self { lines }
    }

    /// All lines in source order.
    pub fn lines(&self) -> &[ConfigLine] {
        &self.lines
    }

    /// Number of lines in the tree.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True when the tree holds no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line by id, if it exists.
    pub fn get(&self, id: LineId) -> Option<&ConfigLine> {
        self.lines.get(id)
    }

    /// Statement text of a line; empty for an unknown id.
    pub fn text(&self, id: LineId) -> &str {
        self.get(id).map(|line| line.text.as_str()).unwrap_or("")
    }

    /// Parent of a line, if any.
    pub fn parent(&self, id: LineId) -> Option<LineId> {
        self.get(id)?.parent
    }

    /// Children of a line in declaration order.
    pub fn children(&self, id: LineId) -> &[LineId] {
        self.get(id)
            .map(|line| line.children.as_slice())
            .unwrap_or(&[])
    }

    /// Top-level lines in declaration order.
    pub fn top_level(&self) -> impl Iterator<Item = LineId> + '_ {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.parent.is_none())
            .map(|(id, _)| id)
    }

    /// Preorder walk of a line's descendants, the line itself excluded.
    pub fn descendants(&self, id: LineId) -> Vec<LineId> {
        let mut out = Vec::new();
        let mut stack: Vec<LineId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev());
        }
        out
    }
}
