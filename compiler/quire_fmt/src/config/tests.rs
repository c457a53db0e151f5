use super::*;

#[test]
fn defaults() {
    let config = FormatConfig::default();
    assert_eq!(config.max_width, 100);
    assert_eq!(config.indent_width, 4);
    assert_eq!(config.whitespace_sensitivity, WhitespaceSensitivity::Css);
    assert_eq!(config.component_tag_case, ComponentTagCase::Preserve);
    assert_eq!(config.preferred_quote(), '"');
}

#[test]
fn constructors_keep_other_defaults() {
    let config = FormatConfig::with_max_width(40);
    assert_eq!(config.max_width, 40);
    assert_eq!(config.indent_width, INDENT_WIDTH);

    let config = FormatConfig::with_whitespace_sensitivity(WhitespaceSensitivity::Strict);
    assert_eq!(config.max_width, MAX_LINE_WIDTH);
    assert_eq!(config.whitespace_sensitivity, WhitespaceSensitivity::Strict);
}

#[test]
fn print_options_follow_config() {
    let options = FormatConfig::with_indent_width(2).print_options();
    assert_eq!(options.width, 100);
    assert_eq!(options.indent_width, 2);
}

#[test]
fn single_quote_preference() {
    let config = FormatConfig {
        single_quote: true,
        ..FormatConfig::default()
    };
    assert_eq!(config.preferred_quote(), '\'');
}
