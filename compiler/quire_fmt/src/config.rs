//! Formatter configuration.

use quire_doc::PrintOptions;

/// Default maximum line width before breaking.
pub const MAX_LINE_WIDTH: usize = 100;

/// Spaces per indentation level.
pub const INDENT_WIDTH: usize = 4;

/// How whitespace between elements is treated when no display directive
/// says otherwise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum WhitespaceSensitivity {
    /// Follow the default CSS display of each tag.
    #[default]
    Css,
    /// Treat every element as inline; all whitespace is significant.
    Strict,
    /// Treat every element as block; whitespace between tags is free.
    Ignore,
}

/// Spelling of component tag names in the output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum ComponentTagCase {
    /// Keep the tag as written.
    #[default]
    Preserve,
    /// `my-button` becomes `MyButton`.
    Camel,
    /// `MyButton` becomes `my-button`.
    Kebab,
}

/// Configuration for the formatter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "kebab-case")
)]
pub struct FormatConfig {
    /// Maximum line width before breaking to multiple lines.
    pub max_width: usize,
    /// Indentation size in spaces.
    pub indent_width: usize,
    pub whitespace_sensitivity: WhitespaceSensitivity,
    /// Put every attribute on its own line when an element has more than one.
    pub single_attribute_per_line: bool,
    /// Keep the `>` of a broken opening tag on the last attribute's line.
    pub bracket_same_line: bool,
    /// Print interpolations as `{ expr }` instead of `{expr}`.
    pub space_around_interpolation: bool,
    pub component_tag_case: ComponentTagCase,
    /// Prefer `'` over `"` around attribute values.
    pub single_quote: bool,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            max_width: MAX_LINE_WIDTH,
            indent_width: INDENT_WIDTH,
            whitespace_sensitivity: WhitespaceSensitivity::default(),
            single_attribute_per_line: false,
            bracket_same_line: false,
            space_around_interpolation: false,
            component_tag_case: ComponentTagCase::default(),
            single_quote: false,
        }
    }
}

impl FormatConfig {
    /// Create a new config with the specified max width.
    pub fn with_max_width(max_width: usize) -> Self {
        Self {
            max_width,
            ..Default::default()
        }
    }

    /// Create a new config with the specified indent width.
    pub fn with_indent_width(indent_width: usize) -> Self {
        Self {
            indent_width,
            ..Default::default()
        }
    }

    /// Create a new config with the specified whitespace sensitivity.
    pub fn with_whitespace_sensitivity(whitespace_sensitivity: WhitespaceSensitivity) -> Self {
        Self {
            whitespace_sensitivity,
            ..Default::default()
        }
    }

    #[inline]
    pub fn print_options(&self) -> PrintOptions {
        PrintOptions {
            width: self.max_width,
            indent_width: self.indent_width,
        }
    }

    /// The quote character attribute values are printed with by default.
    #[inline]
    pub fn preferred_quote(&self) -> char {
        if self.single_quote {
            '\''
        } else {
            '"'
        }
    }
}

#[cfg(test)]
mod tests;
