//! Static tag tables.
//!
//! Every per-tag behaviour the printer needs is resolved once into a
//! [`TagRoles`] set during classification, so the printing passes test a bit
//! instead of re-running string comparisons against these tables.

use bitflags::bitflags;

bitflags! {
    /// Layout roles a node plays, resolved from its tag name.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TagRoles: u16 {
        /// Rendered inline by default (`a`, `span`, `b`, ...).
        const INLINE = 1 << 0;
        /// Rendered inline-block by default (`button`, `select`, ...).
        const INLINE_BLOCK = 1 << 1;
        /// Children always go on their own lines.
        const ALWAYS_MULTILINE = 1 << 2;
        /// Prefers a hard line break around itself.
        const PREFER_HARDLINE = 1 << 3;
        /// Printed verbatim from source.
        const PRESERVE = 1 << 4;
        /// Element body always breaks onto its own lines.
        const FORCE_BREAK_CONTENT = 1 << 5;
    }
}

const INLINE_TAGS: &[&str] = &[
    "a", "span", "b", "strong", "i", "em", "u", "s", "mark", "small", "abbr", "cite", "code",
    "kbd", "var", "samp", "time", "sub", "sup", "q", "bdo", "bdi", "br", "wbr", "img", "input",
    "button", "label", "select", "textarea", "output",
];

const INLINE_BLOCK_TAGS: &[&str] = &[
    "input", "select", "textarea", "button", "label", "option", "optgroup", "meter", "progress",
    "object", "video", "audio",
];

const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Table elements with their CSS display value.
const TABLE_TAGS: &[(&str, &str)] = &[
    ("table", "table"),
    ("tr", "table-row"),
    ("td", "table-cell"),
    ("th", "table-cell"),
    ("caption", "table-caption"),
    ("col", "table-column"),
    ("colgroup", "table-column-group"),
    ("tbody", "table-row-group"),
    ("thead", "table-header-group"),
    ("tfoot", "table-footer-group"),
];

/// Prefix shared by all embedded language region tags.
pub const LANG_TAG_PREFIX: &str = "lang-";

/// Which top-level partition an embedded region belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LangRegion {
    /// `lang-js` / `lang-ts`: moved to the top of the document.
    Script,
    /// Every other `lang-*` tag: moved to the bottom.
    Style,
}

/// Whether `tag` names an embedded language region (`lang-js`, `lang-css`, ...).
pub fn is_lang_tag(tag: &str) -> bool {
    tag.len() > LANG_TAG_PREFIX.len() && tag.starts_with(LANG_TAG_PREFIX)
}

/// Classify an embedded language tag.
pub fn lang_region(tag: &str) -> Option<LangRegion> {
    if !is_lang_tag(tag) {
        return None;
    }
    if tag.ends_with("-js") || tag.ends_with("-ts") {
        Some(LangRegion::Script)
    } else {
        Some(LangRegion::Style)
    }
}

/// CSS display of a table element, if `tag` is one.
pub fn table_display(tag: &str) -> Option<&'static str> {
    TABLE_TAGS
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|(_, display)| *display)
}

/// Whether the element body is raw text rather than markup.
pub fn is_raw_text_tag(tag: &str) -> bool {
    matches!(tag, "script" | "style" | "textarea") || is_lang_tag(tag)
}

/// Whether `tag` is a void element.
pub fn is_void_tag(tag: &str) -> bool {
    VOID_TAGS.contains(&tag)
}

impl TagRoles {
    /// Roles every comment node plays.
    pub const COMMENT: TagRoles = TagRoles::PRESERVE.union(TagRoles::PREFER_HARDLINE);

    /// Resolve the roles of an element from its tag name.
    pub fn for_element(tag: &str) -> TagRoles {
        let mut roles = TagRoles::empty();
        if INLINE_TAGS.contains(&tag) {
            roles |= TagRoles::INLINE;
        }
        if INLINE_BLOCK_TAGS.contains(&tag) {
            roles |= TagRoles::INLINE_BLOCK;
        }
        if table_display(tag).is_some_and(|display| display != "table-cell") {
            roles |= TagRoles::ALWAYS_MULTILINE;
        }
        match tag {
            "html" | "head" | "ul" | "ol" => roles |= TagRoles::ALWAYS_MULTILINE,
            "select" => roles |= TagRoles::ALWAYS_MULTILINE | TagRoles::PREFER_HARDLINE,
            "pre" | "textarea" => roles |= TagRoles::PRESERVE,
            "script" => roles |= TagRoles::PREFER_HARDLINE | TagRoles::FORCE_BREAK_CONTENT,
            "body" | "style" => roles |= TagRoles::FORCE_BREAK_CONTENT,
            _ => {}
        }
        roles
    }
}

#[cfg(test)]
mod tests;
