#![allow(clippy::unwrap_used, reason = "test assertions use unwrap for clarity")]

use luma_diagnostic::ErrorCode;
use luma_ir::{GreenElement, LanguageVersion, ParseOptions};
use pretty_assertions::assert_eq;

use crate::parse_expression;
use crate::tests::{codes, sexp};

/// Shape of the expression node parsed from `source`.
fn shape(source: &str) -> String {
    let tree = parse_expression(source, &ParseOptions::default());
    assert!(
        tree.diagnostics().is_empty(),
        "unexpected diagnostics for {source:?}: {:?}",
        tree.diagnostics()
    );
    first_node(&tree)
}

fn first_node(tree: &crate::SyntaxTree) -> String {
    let node = tree
        .green()
        .children()
        .iter()
        .find_map(GreenElement::as_node)
        .unwrap();
    sexp(node)
}

fn codes_in(source: &str, version: LanguageVersion) -> Vec<ErrorCode> {
    let options = ParseOptions::default().with_version(version);
    codes(&parse_expression(source, &options))
}

mod precedence {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert_eq!(
            shape("1 + 2 * 3"),
            "(BinaryExpression (LiteralExpression 1) + \
             (BinaryExpression (LiteralExpression 2) * (LiteralExpression 3)))"
        );
    }

    #[test]
    fn subtraction_is_left_associative() {
        assert_eq!(
            shape("a - b - c"),
            "(BinaryExpression (BinaryExpression (NameExpression a) - (NameExpression b)) \
             - (NameExpression c))"
        );
    }

    #[test]
    fn power_is_right_associative() {
        assert_eq!(
            shape("2 ^ 3 ^ 4"),
            "(BinaryExpression (LiteralExpression 2) ^ \
             (BinaryExpression (LiteralExpression 3) ^ (LiteralExpression 4)))"
        );
    }

    #[test]
    fn concatenation_is_right_associative() {
        assert_eq!(
            shape("a .. b .. c"),
            "(BinaryExpression (NameExpression a) .. \
             (BinaryExpression (NameExpression b) .. (NameExpression c)))"
        );
    }

    #[test]
    fn power_binds_tighter_than_unary_minus() {
        assert_eq!(
            shape("-x ^ 2"),
            "(UnaryExpression - (BinaryExpression (NameExpression x) ^ (LiteralExpression 2)))"
        );
    }

    #[test]
    fn unary_binds_tighter_than_addition() {
        assert_eq!(
            shape("-x + 1"),
            "(BinaryExpression (UnaryExpression - (NameExpression x)) + (LiteralExpression 1))"
        );
    }

    #[test]
    fn not_applies_before_comparison() {
        assert_eq!(
            shape("not a == b"),
            "(BinaryExpression (UnaryExpression not (NameExpression a)) == (NameExpression b))"
        );
    }

    #[test]
    fn and_binds_tighter_than_or() {
        assert_eq!(
            shape("a or b and c"),
            "(BinaryExpression (NameExpression a) or \
             (BinaryExpression (NameExpression b) and (NameExpression c)))"
        );
    }

    #[test]
    fn bitwise_operators_sit_between_comparison_and_concatenation() {
        assert_eq!(
            shape("a | b & c == d"),
            "(BinaryExpression (BinaryExpression (NameExpression a) | \
             (BinaryExpression (NameExpression b) & (NameExpression c))) \
             == (NameExpression d))"
        );
    }
}

mod suffixes {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn chained_suffixes() {
        assert_eq!(
            shape("a.b[c]:d(e)"),
            "(MethodCallExpression (IndexExpression (MemberAccessExpression \
             (NameExpression a) . b) [ (NameExpression c) ]) : d \
             (ArgumentList ( (NameExpression e) )))"
        );
    }

    #[test]
    fn table_argument() {
        assert_eq!(
            shape("f{1}"),
            "(CallExpression (NameExpression f) (ArgumentList \
             (TableConstructor { (PositionalField (LiteralExpression 1)) })))"
        );
    }

    #[test]
    fn string_argument() {
        assert_eq!(
            shape("f'x'"),
            "(CallExpression (NameExpression f) (ArgumentList (LiteralExpression 'x')))"
        );
    }

    #[test]
    fn parenthesized_call() {
        assert_eq!(
            shape("(f)()"),
            "(CallExpression (ParenthesizedExpression ( (NameExpression f) )) \
             (ArgumentList ( )))"
        );
    }
}

#[test]
fn table_with_every_field_kind() {
    assert_eq!(
        shape("{1, x = 2; [k] = 3,}"),
        "(TableConstructor { (PositionalField (LiteralExpression 1)) , \
         (NamedField x = (LiteralExpression 2)) ; \
         (IndexedField [ (NameExpression k) ] = (LiteralExpression 3)) , })"
    );
}

#[test]
fn vararg_function_expression() {
    assert_eq!(
        shape("function(a, ...) return ... end"),
        "(FunctionExpression function (FunctionBody (ParameterList ( (Parameter a) , \
         (Parameter ...) )) (Block (ReturnStatement return (ExpressionList \
         (VarArgExpression ...)))) end))"
    );
}

#[test]
fn varargs_in_fixed_function() {
    assert_eq!(
        codes_in("function(a) return ... end", LanguageVersion::Lua54),
        [ErrorCode::E1008]
    );
}

#[test]
fn varargs_must_be_the_last_parameter() {
    assert_eq!(
        codes_in("function(..., a) end", LanguageVersion::Lua54),
        [ErrorCode::E1001]
    );
}

mod errors {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn trailing_comma_in_arguments() {
        assert_eq!(codes_in("f(a,)", LanguageVersion::Lua54), [ErrorCode::E1005]);
    }

    #[test]
    fn lone_separator_in_table() {
        assert_eq!(codes_in("{,}", LanguageVersion::Lua54), [ErrorCode::E1005]);
    }

    #[test]
    fn missing_right_operand() {
        let tree = parse_expression("1 +", &ParseOptions::default());
        assert_eq!(codes(&tree), [ErrorCode::E1002]);
        assert_eq!(
            first_node(&tree),
            "(BinaryExpression (LiteralExpression 1) + (NameExpression <IdentifierToken>))"
        );
        assert_eq!(tree.root().full_text(), "1 +");
    }

    #[test]
    fn unclosed_index() {
        let tree = parse_expression("a[1", &ParseOptions::default());
        assert_eq!(codes(&tree), [ErrorCode::E1004]);
        assert_eq!(
            first_node(&tree),
            "(IndexExpression (NameExpression a) [ (LiteralExpression 1) <CloseBracketToken>)"
        );
    }
}

mod gating {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn floor_division_needs_lua_5_3() {
        assert_eq!(codes_in("a // b", LanguageVersion::Lua52), [ErrorCode::E1009]);
        assert!(codes_in("a // b", LanguageVersion::Lua53).is_empty());
    }

    #[test]
    fn unary_bitwise_not_needs_lua_5_3() {
        assert_eq!(codes_in("~a", LanguageVersion::Lua52), [ErrorCode::E1009]);
        assert!(codes_in("~a", LanguageVersion::Lua54).is_empty());
    }

    #[test]
    fn gate_message_names_both_versions() {
        let options = ParseOptions::default().with_version(LanguageVersion::Lua51);
        let tree = parse_expression("a << 1", &options);
        let message = &tree.diagnostics()[0].message;
        assert!(message.contains("Lua 5.1"), "{message}");
        assert!(message.contains("Lua 5.3"), "{message}");
    }
}
