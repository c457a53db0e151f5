//! The document tree handed to the printer.

/// Identifies a group so an [`Doc::IfBreak`] elsewhere can follow its
/// break decision.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GroupId(u32);

/// Hands out fresh [`GroupId`]s for one document.
#[derive(Debug, Default)]
pub struct GroupIds {
    next: u32,
}

impl GroupIds {
    pub fn new() -> Self {
        GroupIds::default()
    }

    pub fn next_id(&mut self) -> GroupId {
        let id = GroupId(self.next);
        self.next += 1;
        id
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// A space when flat, a newline when broken.
    Normal,
    /// Nothing when flat, a newline when broken.
    Soft,
    /// Always a newline.
    Hard,
    /// Always a newline, without indentation.
    Literal,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Doc {
    /// Literal text. Must not contain newlines.
    Text(String),
    Concat(Vec<Doc>),
    /// Contents indented one level deeper when they break.
    Indent(Box<Doc>),
    /// Printed flat if it fits on the rest of the line, broken otherwise.
    Group {
        contents: Box<Doc>,
        should_break: bool,
        id: Option<GroupId>,
    },
    /// Alternating content and separator parts; each separator breaks only
    /// when the content after it does not fit.
    Fill(Vec<Doc>),
    /// Chooses a branch by the mode of the enclosing group, or of the group
    /// named by `group_id`.
    IfBreak {
        break_contents: Box<Doc>,
        flat_contents: Box<Doc>,
        group_id: Option<GroupId>,
    },
    Line(LineKind),
    /// Forces every enclosing group to break.
    BreakParent,
}

impl Doc {
    /// Whether the document prints nothing in any mode.
    pub fn is_empty(&self) -> bool {
        match self {
            Doc::Text(s) => s.is_empty(),
            Doc::Concat(parts) | Doc::Fill(parts) => parts.iter().all(Doc::is_empty),
            Doc::Indent(contents) | Doc::Group { contents, .. } => contents.is_empty(),
            Doc::IfBreak {
                break_contents,
                flat_contents,
                ..
            } => break_contents.is_empty() && flat_contents.is_empty(),
            Doc::Line(_) | Doc::BreakParent => false,
        }
    }
}

impl From<&str> for Doc {
    fn from(s: &str) -> Self {
        Doc::Text(s.to_owned())
    }
}

impl From<String> for Doc {
    fn from(s: String) -> Self {
        Doc::Text(s)
    }
}

impl From<Vec<Doc>> for Doc {
    fn from(parts: Vec<Doc>) -> Self {
        Doc::Concat(parts)
    }
}
