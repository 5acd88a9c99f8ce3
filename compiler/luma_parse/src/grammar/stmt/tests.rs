use luma_diagnostic::ErrorCode;
use luma_ir::{LanguageVersion, ParseOptions, Span};

use crate::parse;
use crate::tests::{codes, statements_in};

/// Statement shapes of a source that must parse without diagnostics.
fn clean(source: &str) -> Vec<String> {
    let options = ParseOptions::default();
    let tree = parse(source, &options);
    assert!(
        tree.diagnostics().is_empty(),
        "unexpected diagnostics for {source:?}: {:?}",
        tree.diagnostics()
    );
    statements_in(source, &options)
}

fn codes_in(source: &str, version: LanguageVersion) -> Vec<ErrorCode> {
    codes(&parse(source, &ParseOptions::default().with_version(version)))
}

fn codes_of(source: &str) -> Vec<ErrorCode> {
    codes_in(source, LanguageVersion::Lua54)
}

mod shapes {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn local_declaration_with_attribute() {
        assert_eq!(
            clean("local x <const>, y = 1, 2"),
            ["(LocalDeclarationStatement local (NameList (LocalName x (Attribute < const >)) , \
              (LocalName y)) = (ExpressionList (LiteralExpression 1) , (LiteralExpression 2)))"]
        );
    }

    #[test]
    fn local_function() {
        assert_eq!(
            clean("local function f(a) return a end"),
            ["(LocalFunctionStatement local function f (FunctionBody (ParameterList ( \
              (Parameter a) )) (Block (ReturnStatement return (ExpressionList \
              (NameExpression a)))) end))"]
        );
    }

    #[test]
    fn method_declaration() {
        assert_eq!(
            clean("function a.b:c() end"),
            ["(FunctionDeclarationStatement function (FunctionName a . b : c) \
              (FunctionBody (ParameterList ( )) (Block) end))"]
        );
    }

    #[test]
    fn if_with_every_clause() {
        assert_eq!(
            clean("if a then b() elseif c then else end"),
            ["(IfStatement if (NameExpression a) then (Block (ExpressionStatement \
              (CallExpression (NameExpression b) (ArgumentList ( ))))) (ElseIfClause elseif \
              (NameExpression c) then (Block)) (ElseClause else (Block)) end)"]
        );
    }

    #[test]
    fn numeric_for_with_step() {
        assert_eq!(
            clean("for i = 1, 10, 2 do break end"),
            ["(NumericForStatement for i = (LiteralExpression 1) , (LiteralExpression 10) , \
              (LiteralExpression 2) do (Block (BreakStatement break)) end)"]
        );
    }

    #[test]
    fn generic_for() {
        assert_eq!(
            clean("for k, v in pairs(t) do end"),
            ["(GenericForStatement for (NameList (LocalName k) , (LocalName v)) in \
              (ExpressionList (CallExpression (NameExpression pairs) (ArgumentList ( \
              (NameExpression t) )))) do (Block) end)"]
        );
    }

    #[test]
    fn loops() {
        assert_eq!(
            clean("while x do end repeat until x"),
            [
                "(WhileStatement while (NameExpression x) do (Block) end)",
                "(RepeatStatement repeat (Block) until (NameExpression x))",
            ]
        );
    }

    #[test]
    fn multiple_assignment() {
        assert_eq!(
            clean("a, b.c = 1, 2"),
            ["(AssignmentStatement (ExpressionList (NameExpression a) , \
              (MemberAccessExpression (NameExpression b) . c)) = \
              (ExpressionList (LiteralExpression 1) , (LiteralExpression 2)))"]
        );
    }

    #[test]
    fn label_and_goto() {
        assert_eq!(
            clean("::top:: goto top"),
            ["(LabelStatement :: top ::)", "(GotoStatement goto top)"]
        );
    }

    #[test]
    fn empty_statements_and_bare_return() {
        assert_eq!(
            clean("do ; end return;"),
            [
                "(DoStatement do (Block (EmptyStatement ;)) end)",
                "(ReturnStatement return ;)",
            ]
        );
    }

    #[test]
    fn method_call_with_string_argument() {
        assert_eq!(
            clean("obj:m \"s\""),
            ["(ExpressionStatement (MethodCallExpression (NameExpression obj) : m \
              (ArgumentList (LiteralExpression \"s\"))))"]
        );
    }

    #[test]
    fn goto_is_an_ordinary_name_when_not_followed_by_one() {
        assert_eq!(
            clean("goto = 1"),
            ["(AssignmentStatement (ExpressionList (NameExpression goto)) = \
              (ExpressionList (LiteralExpression 1)))"]
        );
    }
}

mod context {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn break_outside_a_loop() {
        assert_eq!(codes_of("break"), [ErrorCode::E1007]);
        assert!(codes_of("while true do break end").is_empty());
        assert!(codes_of("repeat if x then break end until y").is_empty());
    }

    #[test]
    fn break_inside_a_function_inside_a_loop() {
        assert_eq!(
            codes_of("while true do local f = function() break end end"),
            [ErrorCode::E1007]
        );
    }

    #[test]
    fn statement_after_return() {
        assert_eq!(codes_of("return 1 x()"), [ErrorCode::E1006]);
        assert!(codes_of("do return end x()").is_empty());
    }

    #[test]
    fn statement_after_return_points_back_at_the_return() {
        let tree = parse("return 1 x()", &ParseOptions::default());
        let diagnostic = &tree.diagnostics()[0];
        assert_eq!(diagnostic.span, Span::new(9, 10));
        let labels: Vec<_> = diagnostic
            .labels
            .iter()
            .map(|l| (l.span, l.message.as_str(), l.is_primary))
            .collect();
        assert_eq!(
            labels,
            [
                (Span::new(9, 10), "unreachable statement", true),
                (Span::new(0, 6), "the block returns here", false),
            ]
        );
    }

    #[test]
    fn only_the_first_statement_after_return_is_reported() {
        assert_eq!(codes_of("return 1 x() y() z()"), [ErrorCode::E1006]);
        assert_eq!(
            codes_of("return x() return y() z()"),
            [ErrorCode::E1006, ErrorCode::E1006]
        );
    }

    #[test]
    fn varargs_outside_a_vararg_function() {
        assert!(codes_of("return ...").is_empty());
        assert_eq!(
            codes_of("local function f() return ... end"),
            [ErrorCode::E1008]
        );
        assert!(codes_of("local function f(...) return ... end").is_empty());
    }
}

mod errors {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn expression_is_not_a_statement() {
        assert_eq!(
            codes_of("x + 1"),
            [ErrorCode::E1001, ErrorCode::E1001, ErrorCode::E1001]
        );
    }

    #[test]
    fn invalid_assignment_targets() {
        assert_eq!(codes_of("(a) = 1"), [ErrorCode::E1011]);
        assert_eq!(codes_of("f() = 1"), [ErrorCode::E1011]);
        assert_eq!(codes_of("a, f() = 1, 2"), [ErrorCode::E1011]);
    }

    #[test]
    fn unknown_attribute() {
        assert_eq!(codes_of("local x <foo> = 1"), [ErrorCode::E1012]);
    }

    #[test]
    fn keyword_as_local_name() {
        assert_eq!(
            codes_of("local end = 1"),
            [
                ErrorCode::E1003,
                ErrorCode::E1001,
                ErrorCode::E1001,
                ErrorCode::E1001,
            ]
        );
    }

    #[test]
    fn unterminated_if() {
        let tree = parse("if x", &ParseOptions::default());
        assert_eq!(codes(&tree), [ErrorCode::E1004, ErrorCode::E1004]);
        assert_eq!(tree.root().full_text(), "if x");
    }

    #[test]
    fn stray_end_is_skipped() {
        let tree = parse("end x()", &ParseOptions::default());
        assert_eq!(codes(&tree), [ErrorCode::E1001]);
        assert_eq!(statements_in("end x()", &ParseOptions::default()).len(), 1);
    }
}

mod versions {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn attributes_need_lua_5_4() {
        assert_eq!(
            codes_in("local x <const> = 1", LanguageVersion::Lua53),
            [ErrorCode::E1009]
        );
    }

    #[test]
    fn gated_features_name_the_version_to_select() {
        let options = ParseOptions::default().with_version(LanguageVersion::Lua53);
        let tree = parse("local x <close> = f()", &options);
        assert_eq!(tree.diagnostics()[0].notes, ["select Lua 5.4 or later to use this"]);
    }

    #[test]
    fn goto_and_labels_need_lua_5_2() {
        assert_eq!(
            codes_in("goto done ::done::", LanguageVersion::Lua51),
            [ErrorCode::E1009, ErrorCode::E1009]
        );
        assert!(codes_in("goto done ::done::", LanguageVersion::Lua52).is_empty());
    }

    #[test]
    fn call_on_next_line_is_ambiguous_in_lua_5_1() {
        assert_eq!(codes_in("f\n(g)", LanguageVersion::Lua51), [ErrorCode::E1010]);
        assert!(codes_in("f\n(g)", LanguageVersion::Lua52).is_empty());
    }
}
