//! Declarative spacing rules for expressions.
//!
//! Rules are evaluated in order; the first rule matching a token pair
//! decides whether a space separates them.

use super::lexer::TokenCategory;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum SpaceAction {
    #[default]
    None,
    Space,
}

/// Matcher for one side of a token pair.
#[derive(Clone, Copy, Debug)]
enum TokenMatcher {
    Any,
    Exact(TokenCategory),
    OneOf(&'static [TokenCategory]),
    Category(fn(TokenCategory) -> bool),
}

impl TokenMatcher {
    #[inline]
    fn matches(self, cat: TokenCategory) -> bool {
        match self {
            TokenMatcher::Any => true,
            TokenMatcher::Exact(expected) => expected == cat,
            TokenMatcher::OneOf(categories) => categories.contains(&cat),
            TokenMatcher::Category(predicate) => predicate(cat),
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct SpaceRule {
    /// For debugging.
    #[allow(dead_code, reason = "read through Debug output only")]
    name: &'static str,
    left: TokenMatcher,
    right: TokenMatcher,
    action: SpaceAction,
}

impl SpaceRule {
    const fn new(
        name: &'static str,
        left: TokenMatcher,
        right: TokenMatcher,
        action: SpaceAction,
    ) -> Self {
        SpaceRule {
            name,
            left,
            right,
            action,
        }
    }
}

#[allow(
    clippy::enum_glob_use,
    reason = "the rule table is much more readable with short names"
)]
use TokenCategory::*;
use TokenMatcher::{Any, Category, Exact, OneOf};

static OPEN_PAREN_OR_BRACKET: &[TokenCategory] = &[LParen, LBracket];
static CLOSE_PAREN_OR_BRACKET: &[TokenCategory] = &[RParen, RBracket];
static SPACED_OPERATORS: &[TokenCategory] = &[Binary, Arrow, Question, TernaryColon];

/// All spacing rules in evaluation order.
static SPACE_RULES: &[SpaceRule] = &[
    // Empty delimiters: (), [], {}
    SpaceRule::new("EmptyParens", Exact(LParen), Exact(RParen), SpaceAction::None),
    SpaceRule::new("EmptyBrackets", Exact(LBracket), Exact(RBracket), SpaceAction::None),
    SpaceRule::new("EmptyBraces", Exact(LBrace), Exact(RBrace), SpaceAction::None),
    // Object braces are padded: { a: 1 }
    SpaceRule::new("AfterLBrace", Exact(LBrace), Any, SpaceAction::Space),
    SpaceRule::new("BeforeRBrace", Any, Exact(RBrace), SpaceAction::Space),
    // Parens and brackets are not: (x), [x]
    SpaceRule::new("AfterOpen", OneOf(OPEN_PAREN_OR_BRACKET), Any, SpaceAction::None),
    SpaceRule::new("BeforeClose", Any, OneOf(CLOSE_PAREN_OR_BRACKET), SpaceAction::None),
    SpaceRule::new("BeforeComma", Any, Exact(Comma), SpaceAction::None),
    SpaceRule::new("AfterComma", Exact(Comma), Any, SpaceAction::Space),
    SpaceRule::new("BeforeSemicolon", Any, Exact(Semicolon), SpaceAction::None),
    SpaceRule::new("AfterSemicolon", Exact(Semicolon), Any, SpaceAction::Space),
    // Member access: a.b, a?.b
    SpaceRule::new("BeforeDot", Any, Exact(Dot), SpaceAction::None),
    SpaceRule::new("AfterDot", Exact(Dot), Any, SpaceAction::None),
    SpaceRule::new("AfterSpread", Exact(Spread), Any, SpaceAction::None),
    SpaceRule::new("AfterPrefix", Exact(Prefix), Any, SpaceAction::None),
    SpaceRule::new("BeforePostfix", Any, Exact(Postfix), SpaceAction::None),
    // Keys and annotations: { a: 1 }, (x: T)
    SpaceRule::new("BeforeKeyColon", Any, Exact(KeyColon), SpaceAction::None),
    SpaceRule::new("AfterKeyColon", Exact(KeyColon), Any, SpaceAction::Space),
    SpaceRule::new("BeforeOperator", Any, OneOf(SPACED_OPERATORS), SpaceAction::Space),
    SpaceRule::new("AfterOperator", OneOf(SPACED_OPERATORS), Any, SpaceAction::Space),
    SpaceRule::new("AfterKeyword", Exact(Keyword), Any, SpaceAction::Space),
    SpaceRule::new("BeforeKeyword", Any, Exact(Keyword), SpaceAction::Space),
    SpaceRule::new("BeforeComment", Any, Exact(Comment), SpaceAction::Space),
    SpaceRule::new("AfterComment", Exact(Comment), Any, SpaceAction::Space),
    SpaceRule::new("BeforeLineComment", Any, Exact(LineComment), SpaceAction::Space),
    // Calls and indexing: f(x), a[0]
    SpaceRule::new("CallOrIndex", Any, OneOf(OPEN_PAREN_OR_BRACKET), SpaceAction::None),
    SpaceRule::new("BeforeLBrace", Any, Exact(LBrace), SpaceAction::Space),
    SpaceRule::new(
        "AdjacentOperands",
        Category(TokenCategory::is_operand_end),
        Category(TokenCategory::is_operand_start),
        SpaceAction::Space,
    ),
];

/// The spacing between two adjacent tokens.
pub(crate) fn space_between(left: TokenCategory, right: TokenCategory) -> SpaceAction {
    SPACE_RULES
        .iter()
        .find(|rule| rule.left.matches(left) && rule.right.matches(right))
        .map_or(SpaceAction::None, |rule| rule.action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_matching_rule_wins() {
        assert_eq!(space_between(LBrace, RBrace), SpaceAction::None);
        assert_eq!(space_between(LBrace, Word), SpaceAction::Space);
        assert_eq!(space_between(LParen, LBrace), SpaceAction::None);
        assert_eq!(space_between(Word, LParen), SpaceAction::None);
        assert_eq!(space_between(Binary, LParen), SpaceAction::Space);
        assert_eq!(space_between(Keyword, LParen), SpaceAction::Space);
    }

    #[test]
    fn operands_and_operators() {
        assert_eq!(space_between(Word, Binary), SpaceAction::Space);
        assert_eq!(space_between(Prefix, Word), SpaceAction::None);
        assert_eq!(space_between(Binary, Prefix), SpaceAction::Space);
        assert_eq!(space_between(Word, Postfix), SpaceAction::None);
        assert_eq!(space_between(Word, KeyColon), SpaceAction::None);
        assert_eq!(space_between(Word, TernaryColon), SpaceAction::Space);
        assert_eq!(space_between(RParen, Word), SpaceAction::Space);
        assert_eq!(space_between(Word, Dot), SpaceAction::None);
    }

    #[test]
    fn literals_spreads_and_members() {
        assert_eq!(space_between(Spread, Word), SpaceAction::None);
        assert_eq!(space_between(Str, Str), SpaceAction::Space);
        assert_eq!(space_between(Postfix, Dot), SpaceAction::None);
    }
}
