use super::*;

#[test]
fn inline_tags_resolve_inline() {
    assert!(TagRoles::for_element("a").contains(TagRoles::INLINE));
    assert!(TagRoles::for_element("span").contains(TagRoles::INLINE));
    assert!(!TagRoles::for_element("div").contains(TagRoles::INLINE));
}

#[test]
fn select_plays_several_roles() {
    let roles = TagRoles::for_element("select");
    assert!(roles.contains(TagRoles::INLINE | TagRoles::INLINE_BLOCK));
    assert!(roles.contains(TagRoles::ALWAYS_MULTILINE | TagRoles::PREFER_HARDLINE));
}

#[test]
fn table_cells_are_not_multiline() {
    assert!(TagRoles::for_element("tr").contains(TagRoles::ALWAYS_MULTILINE));
    assert!(TagRoles::for_element("table").contains(TagRoles::ALWAYS_MULTILINE));
    assert!(!TagRoles::for_element("td").contains(TagRoles::ALWAYS_MULTILINE));
    assert_eq!(table_display("td"), Some("table-cell"));
}

#[test]
fn preserved_and_void_tags() {
    assert!(TagRoles::for_element("pre").contains(TagRoles::PRESERVE));
    assert!(TagRoles::for_element("textarea").contains(TagRoles::PRESERVE));
    assert!(is_void_tag("br"));
    assert!(!is_void_tag("div"));
}

#[test]
fn comments_preserve_and_prefer_hardline() {
    assert!(TagRoles::COMMENT.contains(TagRoles::PRESERVE));
    assert!(TagRoles::COMMENT.contains(TagRoles::PREFER_HARDLINE));
}

#[test]
fn lang_regions() {
    assert_eq!(lang_region("lang-js"), Some(LangRegion::Script));
    assert_eq!(lang_region("lang-ts"), Some(LangRegion::Script));
    assert_eq!(lang_region("lang-css"), Some(LangRegion::Style));
    assert_eq!(lang_region("lang-scss"), Some(LangRegion::Style));
    assert_eq!(lang_region("lang-"), None);
    assert_eq!(lang_region("div"), None);
}

#[test]
fn raw_text_tags() {
    assert!(is_raw_text_tag("script"));
    assert!(is_raw_text_tag("lang-less"));
    assert!(!is_raw_text_tag("pre"));
}
