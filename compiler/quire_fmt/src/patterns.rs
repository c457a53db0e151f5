//! Cached regex patterns.

use std::sync::LazyLock;

use regex::Regex;

/// `<!-- display: inline-block -->`
#[allow(clippy::expect_used, reason = "pattern is a literal")]
pub(crate) static DISPLAY_DIRECTIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*display:\s*([a-z]+(?:-[a-z]+)*)\s*$").expect("valid display directive regex")
});

/// Location noise sub-formatters put around their messages: a
/// `<css input>:L:C: ` preamble or a trailing ` (L:C)`.
#[allow(clippy::expect_used, reason = "pattern is a literal")]
pub(crate) static MESSAGE_LOCATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^<css input>:\d+:\d+: | \(\d+:\d+\)$").expect("valid message location regex")
});
