//! Width-fitting printer.
//!
//! Renders a [`Doc`] with an explicit command stack: groups print flat when
//! their contents fit on the remainder of the line, fills decide each
//! separator on its own, and conditional content follows the mode of the
//! group it is tied to.

use quire_ir::ensure_sufficient_stack;
use rustc_hash::FxHashMap;

use crate::doc::{Doc, GroupId, LineKind};

/// Layout parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PrintOptions {
    /// Target line width in characters.
    pub width: usize,
    /// Spaces per indentation level.
    pub indent_width: usize,
}

impl Default for PrintOptions {
    fn default() -> Self {
        PrintOptions {
            width: 100,
            indent_width: 4,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Mode {
    Break,
    Flat,
}

#[derive(Copy, Clone, Debug)]
enum Item<'a> {
    Doc(&'a Doc),
    /// The unprinted tail of a fill.
    FillTail(&'a [Doc]),
}

#[derive(Copy, Clone, Debug)]
struct Cmd<'a> {
    indent: usize,
    mode: Mode,
    item: Item<'a>,
}

impl<'a> Cmd<'a> {
    fn child(self, doc: &'a Doc) -> Self {
        Cmd {
            item: Item::Doc(doc),
            ..self
        }
    }

    fn with_mode(self, mode: Mode, doc: &'a Doc) -> Self {
        Cmd {
            mode,
            item: Item::Doc(doc),
            ..self
        }
    }
}

/// Render `doc` to a string.
///
/// Break propagation runs on a copy first, so hard lines anywhere inside a
/// group force that group to break.
pub fn print(doc: &Doc, options: &PrintOptions) -> String {
    let mut doc = doc.clone();
    propagate_breaks(&mut doc);
    Printer::new(options).run(&doc)
}

/// Mark every group that contains a [`Doc::BreakParent`], directly or through
/// a nested breaking group, as `should_break`. Returns whether `doc` itself
/// forces its parent to break.
pub fn propagate_breaks(doc: &mut Doc) -> bool {
    ensure_sufficient_stack(|| match doc {
        Doc::BreakParent => true,
        Doc::Text(_) | Doc::Line(_) => false,
        Doc::Concat(parts) | Doc::Fill(parts) => {
            let mut any = false;
            for part in parts {
                any |= propagate_breaks(part);
            }
            any
        }
        Doc::Indent(contents) => propagate_breaks(contents),
        Doc::Group {
            contents,
            should_break,
            ..
        } => {
            if propagate_breaks(contents) {
                *should_break = true;
            }
            *should_break
        }
        Doc::IfBreak {
            break_contents,
            flat_contents,
            ..
        } => {
            let in_break = propagate_breaks(break_contents);
            let in_flat = propagate_breaks(flat_contents);
            in_break || in_flat
        }
    })
}

struct Printer<'a> {
    options: PrintOptions,
    out: String,
    /// Current column.
    pos: usize,
    cmds: Vec<Cmd<'a>>,
    group_modes: FxHashMap<GroupId, Mode>,
}

impl<'a> Printer<'a> {
    fn new(options: &PrintOptions) -> Self {
        Printer {
            options: *options,
            out: String::new(),
            pos: 0,
            cmds: Vec::new(),
            group_modes: FxHashMap::default(),
        }
    }

    fn run(mut self, doc: &'a Doc) -> String {
        self.cmds.push(Cmd {
            indent: 0,
            mode: Mode::Break,
            item: Item::Doc(doc),
        });
        let mut should_remeasure = false;

        while let Some(cmd) = self.cmds.pop() {
            let doc = match cmd.item {
                Item::FillTail(parts) => {
                    self.fill(cmd, parts);
                    continue;
                }
                Item::Doc(doc) => doc,
            };
            match doc {
                Doc::Text(s) => {
                    self.out.push_str(s);
                    self.pos += width_of(s);
                }
                Doc::Concat(parts) => {
                    self.cmds.extend(parts.iter().rev().map(|p| cmd.child(p)));
                }
                Doc::Indent(contents) => self.cmds.push(Cmd {
                    indent: cmd.indent + 1,
                    ..cmd.child(contents)
                }),
                Doc::Group {
                    contents,
                    should_break,
                    id,
                } => {
                    let mode = if cmd.mode == Mode::Flat && !should_remeasure {
                        if *should_break {
                            Mode::Break
                        } else {
                            Mode::Flat
                        }
                    } else {
                        should_remeasure = false;
                        let flat = [(Mode::Flat, Item::Doc(&**contents))];
                        if !*should_break && self.fits(&flat, &self.cmds, self.remaining(), false)
                        {
                            Mode::Flat
                        } else {
                            Mode::Break
                        }
                    };
                    self.cmds.push(cmd.with_mode(mode, contents));
                    if let Some(id) = id {
                        self.group_modes.insert(*id, mode);
                    }
                }
                Doc::Fill(parts) => self.fill(cmd, parts),
                Doc::IfBreak {
                    break_contents,
                    flat_contents,
                    group_id,
                } => {
                    let mode = match group_id {
                        Some(id) => self.group_modes.get(id).copied(),
                        None => Some(cmd.mode),
                    };
                    match mode {
                        Some(Mode::Break) => self.cmds.push(cmd.child(break_contents)),
                        Some(Mode::Flat) => self.cmds.push(cmd.child(flat_contents)),
                        None => {}
                    }
                }
                Doc::Line(kind) => {
                    if cmd.mode == Mode::Flat {
                        match kind {
                            LineKind::Soft => continue,
                            LineKind::Normal => {
                                self.out.push(' ');
                                self.pos += 1;
                                continue;
                            }
                            LineKind::Hard | LineKind::Literal => should_remeasure = true,
                        }
                    }
                    self.newline(cmd.indent, *kind == LineKind::Literal);
                }
                Doc::BreakParent => {}
            }
        }
        self.out
    }

    fn newline(&mut self, indent: usize, literal: bool) {
        if literal {
            self.out.push('\n');
            self.pos = 0;
            return;
        }
        let kept = self.out.trim_end_matches([' ', '\t']).len();
        self.out.truncate(kept);
        self.out.push('\n');
        let spaces = indent * self.options.indent_width;
        self.out.extend(std::iter::repeat(' ').take(spaces));
        self.pos = spaces;
    }

    fn fill(&mut self, cmd: Cmd<'a>, parts: &'a [Doc]) {
        let Some(content) = parts.first() else {
            return;
        };
        let rem = self.remaining();
        let content_fits = self.fits(&[(Mode::Flat, Item::Doc(content))], &[], rem, true);
        let content_mode = if content_fits { Mode::Flat } else { Mode::Break };

        let Some(separator) = parts.get(1) else {
            self.cmds.push(cmd.with_mode(content_mode, content));
            return;
        };
        let Some(second) = parts.get(2) else {
            self.cmds.push(cmd.with_mode(content_mode, separator));
            self.cmds.push(cmd.with_mode(content_mode, content));
            return;
        };

        let pair = [
            (Mode::Flat, Item::Doc(content)),
            (Mode::Flat, Item::Doc(separator)),
            (Mode::Flat, Item::Doc(second)),
        ];
        let pair_fits = self.fits(&pair, &[], rem, true);

        self.cmds.push(Cmd {
            item: Item::FillTail(&parts[2..]),
            ..cmd
        });
        let separator_mode = if pair_fits { Mode::Flat } else { Mode::Break };
        self.cmds.push(cmd.with_mode(separator_mode, separator));
        self.cmds.push(cmd.with_mode(content_mode, content));
    }

    #[allow(
        clippy::cast_possible_wrap,
        reason = "widths and columns are far below isize::MAX"
    )]
    fn remaining(&self) -> isize {
        self.options.width as isize - self.pos as isize
    }

    /// Whether `next`, followed by as much of `rest` as it takes to reach a
    /// line break, fits in `width` columns.
    #[allow(
        clippy::cast_possible_wrap,
        reason = "text widths are far below isize::MAX"
    )]
    fn fits(
        &self,
        next: &[(Mode, Item<'a>)],
        rest: &[Cmd<'a>],
        mut width: isize,
        must_be_flat: bool,
    ) -> bool {
        let mut rest_idx = rest.len();
        let mut stack: Vec<(Mode, Item<'a>)> = next.iter().rev().copied().collect();

        while width >= 0 {
            let Some((mode, item)) = stack.pop() else {
                if rest_idx == 0 {
                    return true;
                }
                rest_idx -= 1;
                let cmd = rest[rest_idx];
                stack.push((cmd.mode, cmd.item));
                continue;
            };
            let doc = match item {
                Item::FillTail(parts) => {
                    stack.extend(parts.iter().rev().map(|p| (mode, Item::Doc(p))));
                    continue;
                }
                Item::Doc(doc) => doc,
            };
            match doc {
                Doc::Text(s) => width -= width_of(s) as isize,
                Doc::Concat(parts) | Doc::Fill(parts) => {
                    stack.extend(parts.iter().rev().map(|p| (mode, Item::Doc(p))));
                }
                Doc::Indent(contents) => stack.push((mode, Item::Doc(contents))),
                Doc::Group {
                    contents,
                    should_break,
                    ..
                } => {
                    if must_be_flat && *should_break {
                        return false;
                    }
                    let group_mode = if *should_break { Mode::Break } else { mode };
                    stack.push((group_mode, Item::Doc(contents)));
                }
                Doc::IfBreak {
                    break_contents,
                    flat_contents,
                    group_id,
                } => {
                    let group_mode = match group_id {
                        Some(id) => self.group_modes.get(id).copied().unwrap_or(Mode::Flat),
                        None => mode,
                    };
                    let contents = if group_mode == Mode::Break {
                        break_contents
                    } else {
                        flat_contents
                    };
                    stack.push((mode, Item::Doc(contents)));
                }
                Doc::Line(kind) => {
                    if mode == Mode::Break || matches!(kind, LineKind::Hard | LineKind::Literal) {
                        return true;
                    }
                    if *kind == LineKind::Normal {
                        width -= 1;
                    }
                }
                Doc::BreakParent => {}
            }
        }
        false
    }
}

#[inline]
fn width_of(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests;
