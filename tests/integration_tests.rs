//! Integration tests for end-to-end semantic analysis.
//!
//! These tests build whole C-minus programs the way the parser would hand
//! them over and verify the diagnostics and symbol table produced by running
//! both analysis passes.

use cminus::{
    analyzer::analyzer::{analyze, Analyzer, AnalyzerOptions},
    ast::{
        ast::TreeNode,
        declarations::{array_decl, array_param, fn_decl, param, var_decl, void_param},
        expressions::{array_element, binary, call, constant, identifier},
        statements::{assign, compound, if_else_stmt, return_stmt, return_void, while_stmt},
        types::{ExpType, Operator},
    },
    errors::errors::{Diagnostic, DiagnosticKind},
    symtab::symtab::ScopeId,
    MK_SIBLINGS,
};

fn run(mut tree: TreeNode) -> Vec<Diagnostic> {
    let (_, result) = analyze(&mut tree, AnalyzerOptions::default());
    result.unwrap()
}

fn error_names(diagnostics: &[Diagnostic]) -> Vec<&str> {
    diagnostics.iter().map(|diagnostic| diagnostic.get_error_name()).collect()
}

fn void_main(locals: Option<TreeNode>, body: Option<TreeNode>) -> TreeNode {
    fn_decl(1, ExpType::Void, "main", void_param(1), compound(1, locals, body))
}

/// int gcd(int u, int v) { if (v == 0) return u; else return gcd(v, u - u / v * v); }
/// void main(void) { int x; int y; x = input(); y = input(); output(gcd(x, y)); }
fn gcd_program() -> TreeNode {
    let gcd = fn_decl(
        1,
        ExpType::Integer,
        "gcd",
        MK_SIBLINGS!(param(1, "u"), param(1, "v")),
        compound(
            2,
            None,
            Some(if_else_stmt(
                3,
                binary(3, Operator::Equals, identifier(3, "v"), constant(3, 0)),
                return_stmt(3, identifier(3, "u")),
                return_stmt(
                    4,
                    call(
                        4,
                        "gcd",
                        Some(MK_SIBLINGS!(
                            identifier(4, "v"),
                            binary(
                                4,
                                Operator::Minus,
                                identifier(4, "u"),
                                binary(
                                    4,
                                    Operator::Times,
                                    binary(4, Operator::Over, identifier(4, "u"), identifier(4, "v")),
                                    identifier(4, "v")
                                )
                            )
                        )),
                    ),
                ),
            )),
        ),
    );
    let main = fn_decl(
        7,
        ExpType::Void,
        "main",
        void_param(7),
        compound(
            8,
            Some(MK_SIBLINGS!(
                var_decl(9, ExpType::Integer, "x"),
                var_decl(9, ExpType::Integer, "y")
            )),
            Some(MK_SIBLINGS!(
                assign(10, identifier(10, "x"), call(10, "input", None)),
                assign(10, identifier(10, "y"), call(10, "input", None)),
                call(11, "output", Some(call(11, "gcd", Some(MK_SIBLINGS!(identifier(11, "x"), identifier(11, "y"))))))
            )),
        ),
    );
    MK_SIBLINGS!(gcd, main)
}

#[test]
fn test_well_typed_program_has_no_diagnostics() {
    let mut tree = gcd_program();
    let mut analyzer = Analyzer::default();

    let diagnostics = analyzer.analyze(&mut tree).unwrap();

    assert!(diagnostics.is_empty(), "unexpected diagnostics: {:?}", diagnostics);
    assert!(!analyzer.had_error());
    let gcd = analyzer.table().lookup_local(ScopeId::GLOBAL, "gcd").unwrap();
    assert_eq!(gcd.ty, ExpType::Integer);
    assert_eq!(gcd.param_count(), Some(2));
}

#[test]
fn test_sorting_program_has_no_diagnostics() {
    // int a[10];
    // void sort(int arr[], int n) { int i; i = 0; while (i < n) { arr[i] = arr[i] + 1; i = i + 1; } }
    // void main(void) { sort(a, 10); output(a[0]); }
    let sort = fn_decl(
        2,
        ExpType::Void,
        "sort",
        MK_SIBLINGS!(array_param(2, "arr"), param(2, "n")),
        compound(
            2,
            Some(var_decl(3, ExpType::Integer, "i")),
            Some(MK_SIBLINGS!(
                assign(4, identifier(4, "i"), constant(4, 0)),
                while_stmt(
                    5,
                    binary(5, Operator::Less, identifier(5, "i"), identifier(5, "n")),
                    compound(
                        5,
                        None,
                        Some(MK_SIBLINGS!(
                            assign(
                                6,
                                array_element(6, "arr", identifier(6, "i")),
                                binary(6, Operator::Plus, array_element(6, "arr", identifier(6, "i")), constant(6, 1))
                            ),
                            assign(7, identifier(7, "i"), binary(7, Operator::Plus, identifier(7, "i"), constant(7, 1)))
                        ))
                    )
                )
            )),
        ),
    );
    let main = void_main(
        None,
        Some(MK_SIBLINGS!(
            call(11, "sort", Some(MK_SIBLINGS!(identifier(11, "a"), constant(11, 10)))),
            call(12, "output", Some(array_element(12, "a", constant(12, 0))))
        )),
    );
    let program = MK_SIBLINGS!(array_decl(1, ExpType::IntArray, "a", 10), sort, main);

    assert!(run(program).is_empty());
}

#[test]
fn test_redeclaration_in_same_scope() {
    let program = void_main(
        Some(MK_SIBLINGS!(
            var_decl(2, ExpType::Integer, "x"),
            var_decl(3, ExpType::Integer, "x")
        )),
        None,
    );

    assert_eq!(
        run(program),
        vec![Diagnostic::new(DiagnosticKind::Redeclared { name: "x".to_string() }, 3)]
    );
}

#[test]
fn test_shadowing_in_nested_block_is_allowed() {
    let program = void_main(
        Some(var_decl(2, ExpType::Integer, "x")),
        Some(compound(3, Some(var_decl(4, ExpType::Integer, "x")), None)),
    );

    assert!(run(program).is_empty());
}

#[test]
fn test_inner_assignment_resolves_to_inner_symbol() {
    let mut program = void_main(
        Some(var_decl(2, ExpType::Integer, "x")),
        Some(compound(
            3,
            Some(var_decl(4, ExpType::Integer, "x")),
            Some(assign(5, identifier(5, "x"), constant(5, 1))),
        )),
    );

    let (analyzer, result) = analyze(&mut program, AnalyzerOptions::default());
    assert!(result.unwrap().is_empty());

    let table = analyzer.table();
    let outer = table.find("main11").unwrap();
    let inner = table.find("main113").unwrap();
    let outer_x = table.lookup_local(outer, "x").unwrap();
    let inner_x = table.lookup_local(inner, "x").unwrap();
    assert_eq!(outer_x.location(), Some(0));
    assert_eq!(outer_x.lines, vec![2]);
    assert_eq!(inner_x.location(), Some(1));
    assert_eq!(inner_x.lines, vec![4, 5]);
}

#[test]
fn test_undeclared_variable_and_function() {
    let program = void_main(
        Some(var_decl(2, ExpType::Integer, "x")),
        Some(MK_SIBLINGS!(
            assign(3, identifier(3, "x"), identifier(3, "y")),
            call(4, "y", None)
        )),
    );

    let diagnostics = run(program);

    assert_eq!(
        diagnostics,
        vec![
            Diagnostic::new(DiagnosticKind::UndeclaredVariable { name: "y".to_string() }, 3),
            Diagnostic::new(DiagnosticKind::InvalidAssignment, 3),
            Diagnostic::new(DiagnosticKind::UndeclaredFunction { name: "y".to_string() }, 4),
        ]
    );
    assert_eq!(diagnostics[2].to_string(), "Error: Undeclared function \"y\" is called at line 4");
}

#[test]
fn test_builtins_resolve_without_declaration() {
    let program = void_main(
        Some(var_decl(2, ExpType::Integer, "x")),
        Some(MK_SIBLINGS!(
            assign(3, identifier(3, "x"), call(3, "input", None)),
            call(4, "output", Some(identifier(4, "x")))
        )),
    );
    let mut tree = program;
    let (analyzer, result) = analyze(&mut tree, AnalyzerOptions::default());

    assert!(result.unwrap().is_empty());
    assert_eq!(analyzer.table().param_count("input"), Ok(0));
    let output = analyzer.table().lookup_local(ScopeId::GLOBAL, "output").unwrap();
    assert_eq!(output.ty, ExpType::Void);
}

#[test]
fn test_array_indexing() {
    let valid = void_main(
        Some(array_decl(2, ExpType::IntArray, "a", 5)),
        Some(assign(3, array_element(3, "a", constant(3, 0)), constant(3, 1))),
    );
    assert!(run(valid).is_empty());

    let array_index = void_main(
        Some(MK_SIBLINGS!(
            array_decl(2, ExpType::IntArray, "a", 5),
            array_decl(2, ExpType::IntArray, "b", 5)
        )),
        Some(assign(3, array_element(3, "a", identifier(3, "b")), constant(3, 1))),
    );
    assert_eq!(
        error_names(&run(array_index)),
        vec!["InvalidArrayIndexType", "InvalidAssignment"]
    );

    let scalar_target = void_main(
        Some(var_decl(2, ExpType::Integer, "a")),
        Some(call(3, "output", Some(array_element(3, "a", constant(3, 0))))),
    );
    assert_eq!(
        run(scalar_target),
        vec![Diagnostic::new(DiagnosticKind::InvalidArrayIndexTarget { name: "a".to_string() }, 3)]
    );
}

#[test]
fn test_call_arity() {
    let callee = || {
        fn_decl(
            1,
            ExpType::Integer,
            "add",
            MK_SIBLINGS!(param(1, "a"), param(1, "b")),
            compound(1, None, Some(return_stmt(2, binary(2, Operator::Plus, identifier(2, "a"), identifier(2, "b"))))),
        )
    };

    let no_arguments = MK_SIBLINGS!(callee(), void_main(None, Some(call(5, "add", None))));
    assert_eq!(
        run(no_arguments),
        vec![Diagnostic::new(DiagnosticKind::InvalidFunctionCall { name: "add".to_string() }, 5)]
    );

    let one_argument = MK_SIBLINGS!(callee(), void_main(None, Some(call(5, "add", Some(constant(5, 1))))));
    assert_eq!(error_names(&run(one_argument)), vec!["InvalidFunctionCall"]);

    let two_arguments = MK_SIBLINGS!(
        callee(),
        void_main(None, Some(call(5, "add", Some(MK_SIBLINGS!(constant(5, 1), constant(5, 2))))))
    );
    assert!(run(two_arguments).is_empty());
}

#[test]
fn test_return_type_mismatch() {
    let void_returns_value = fn_decl(1, ExpType::Void, "f", void_param(1), compound(1, None, Some(return_stmt(2, constant(2, 1)))));
    assert_eq!(
        run(void_returns_value),
        vec![Diagnostic::new(DiagnosticKind::InvalidReturn, 2)]
    );

    let int_returns_nothing = fn_decl(1, ExpType::Integer, "f", void_param(1), compound(1, None, Some(return_void(2))));
    assert_eq!(
        run(int_returns_nothing),
        vec![Diagnostic::new(DiagnosticKind::InvalidReturn, 2)]
    );
}

#[test]
fn test_checker_rerun_is_deterministic() {
    let mut tree = MK_SIBLINGS!(
        gcd_program(),
        fn_decl(
            20,
            ExpType::Void,
            "broken",
            void_param(20),
            compound(
                20,
                Some(var_decl(21, ExpType::Integer, "x")),
                Some(MK_SIBLINGS!(
                    if_else_stmt(22, call(22, "output", Some(constant(22, 1))), return_void(22), return_stmt(22, identifier(22, "x"))),
                    assign(23, identifier(23, "z"), constant(23, 1))
                ))
            )
        )
    );
    let mut analyzer = Analyzer::default();
    assert!(analyzer.build_symtab(&mut tree).unwrap().is_empty());

    let first = analyzer.type_check(&mut tree).unwrap();
    let second = analyzer.type_check(&mut tree).unwrap();

    assert_eq!(
        error_names(&first),
        vec!["InvalidReturn", "InvalidCondition", "UndeclaredVariable", "InvalidAssignment"]
    );
    assert_eq!(first, second);
    assert!(analyzer.had_error());
}

#[test]
fn test_diagnostic_listing() {
    let program = MK_SIBLINGS!(
        var_decl(1, ExpType::Void, "v"),
        var_decl(2, ExpType::Integer, "v"),
        void_main(None, Some(while_stmt(3, call(3, "output", Some(constant(3, 0))), compound(3, None, None))))
    );

    let listing: Vec<String> = run(program).iter().map(ToString::to_string).collect();

    assert_eq!(
        listing,
        vec![
            "Error: The void-type variable is declared at line 1 (name : \"v\")",
            "Error: Symbol \"v\" is redefined at line 2",
            "Error: Invalid condition at line 3",
        ]
    );
}
