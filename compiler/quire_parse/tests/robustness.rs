#![allow(clippy::unwrap_used, clippy::expect_used)]

//! The parser must reject or accept arbitrary input without panicking, and
//! accepted trees must stay inside the source.

use proptest::prelude::*;
use quire_ir::NodeKind;

proptest! {
    #[test]
    fn never_panics(source in "[<>/abp {}\"'=!\\-\n]{0,48}") {
        let _ = quire_parse::parse(&source);
    }

    #[test]
    fn accepted_trees_are_well_formed(source in "(<(b|i|div)>|</(b|i|div)>|[a-z ]{1,4}|<br>|\\{x\\}|<!-- c -->){0,12}") {
        if let Ok(tree) = quire_parse::parse(&source) {
            for id in tree.preorder() {
                let node = &tree[id];
                prop_assert!(node.range.start <= node.range.end);
                prop_assert!(node.range.end as usize <= source.len());
                if node.kind == NodeKind::Text {
                    prop_assert!(!node.content.trim().is_empty());
                    prop_assert_eq!(
                        &source[node.range.to_range()],
                        node.content.trim()
                    );
                }
                if let Some(parent) = node.parent {
                    prop_assert_eq!(tree[parent].last_child, tree[parent].children.last().copied());
                }
            }
        }
    }
}
