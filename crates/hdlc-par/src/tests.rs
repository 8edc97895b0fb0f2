use bumpalo::Bump;
use hdlc_ast::context::Context;
use hdlc_ast::decl::TopLevelModule;
use hdlc_ast::dump::dump_module_text;
use hdlc_ast::expr::{BinaryOp, Expression};
use hdlc_ast::stmt::{MatchPattern, Statement};
use hdlc_ast::types::{Direction, TypeRef};
use hdlc_num::{BigInt, BitVectorKind};
use hdlc_util::diagnostic::Handler;
use hdlc_util::source::{Source, SourceMap};

use crate::parse_top_level_module;

fn with_parsed<R>(
    text: &str,
    check: impl for<'a> FnOnce(Option<&'a TopLevelModule<'a>>, &Handler, &Source) -> R,
) -> R {
    let mut map = SourceMap::new();
    let id = map.add_source("test.hdl", text);
    let source = map.get(id).unwrap();
    let arena = Bump::new();
    let ctx = Context::new(&arena);
    let handler = Handler::new();
    let result = parse_top_level_module(&ctx, &source, &handler).ok();
    check(result, &handler, &source)
}

fn parse_ok<R>(
    text: &str,
    check: impl for<'a> FnOnce(&'a TopLevelModule<'a>, &Source) -> R,
) -> R {
    with_parsed(text, |result, handler, source| {
        let top = result.unwrap_or_else(|| {
            panic!(
                "parse failed: {:?}",
                handler
                    .diagnostics()
                    .first()
                    .map(|d| d.message.clone())
                    .unwrap_or_default()
            )
        });
        check(top, source)
    })
}

fn parse_error(text: &str) -> String {
    with_parsed(text, |result, handler, _| {
        assert!(result.is_none(), "expected a parse error in {text:?}");
        handler.diagnostics()[0].message.clone()
    })
}

// =========================================================================
// Top level
// =========================================================================

#[test]
fn test_empty_module() {
    parse_ok("module m { }", |top, source| {
        assert_eq!(&*top.module.symbol.name, "m");
        assert!(top.module.statements().is_empty());
        assert!(top.imports.is_empty());
        assert_eq!(dump_module_text(top.module, source), "module m =0\n");
    });
}

#[test]
fn test_imports_before_module() {
    parse_ok("import a; import b; module m { }", |top, _| {
        let names: Vec<&str> = top.imports.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
    });
}

#[test]
fn test_extra_tokens_after_main_module() {
    assert_eq!(
        parse_error("module a { } module b { }"),
        "extra tokens before end-of-file"
    );
}

#[test]
fn test_error_location_points_at_second_module() {
    with_parsed("module a { } module b { }", |result, handler, source| {
        assert!(result.is_none());
        let span = handler.diagnostics()[0].span;
        assert_eq!(source.span_text(span), "module");
        assert_eq!(span.start, 13);
    });
}

#[test]
fn test_missing_module() {
    assert_eq!(parse_error(""), "expected: module");
    assert_eq!(parse_error("import a;"), "expected: module");
}

#[test]
fn test_comments_attached_not_rejected() {
    parse_ok(
        "// header\nmodule m { /* inside */ }\n// trailer\n",
        |top, source| {
            assert!(!top.module.before_module_comments.is_empty());
            assert_eq!(top.module.before_module_comments.text(source), "// header");
            assert_eq!(
                top.module.before_rbrace_comments().text(source),
                "/* inside */"
            );
            assert_eq!(top.before_eof_comments.text(source), "// trailer");
        },
    );
}

// =========================================================================
// Declarations and scopes
// =========================================================================

#[test]
fn test_nested_module_redefinition() {
    // the inner name lands in the outer module's scope, where the outer
    // module's own name is already visible
    assert_eq!(parse_error("module m { module m { } }"), "name redefined");
}

#[test]
fn test_nested_module_redefinition_location() {
    with_parsed("module m { module m { } }", |result, handler, _| {
        assert!(result.is_none());
        let span = handler.diagnostics()[0].span;
        // the inner m's name range starts at offset 18
        assert_eq!(span.start, 18);
    });
}

#[test]
fn test_sibling_modules_resolve() {
    parse_ok(
        "module top { module a { const k = 1; } module b { a::k; } }",
        |_, _| {},
    );
}

#[test]
fn test_sibling_reference_is_not_forward() {
    // a referenced before it is declared: references fail at the
    // reference, not at the end of the scope
    assert_eq!(
        parse_error("module top { module b { a; } module a { } }"),
        "name not found"
    );
}

#[test]
fn test_scoped_name_through_module() {
    parse_ok(
        "module top { module a { const k = 1; } function f(): u8 { return a::k; } }",
        |_, _| {},
    );
}

#[test]
fn test_scoped_name_not_a_scope() {
    assert_eq!(
        parse_error("module top { const k = 1; const j = k::x; }"),
        "name is not a scope"
    );
}

#[test]
fn test_global_scope_reference() {
    parse_ok("module m { let x : ::u8; }", |top, _| {
        let Statement::Let(let_statement) = top.module.statements()[0] else {
            panic!("expected let");
        };
        let resolved = let_statement.parts[0].resolved.unwrap();
        let bv = resolved.as_bit_vector().unwrap();
        assert_eq!(bv.bit_width, 8);
        assert_eq!(bv.direction, Direction::Reg);
    });
}

#[test]
fn test_duplicate_let_names() {
    assert_eq!(
        parse_error("module m { let x : u8; let x : u8; }"),
        "name redefined"
    );
}

#[test]
fn test_block_scope_allows_shadowing() {
    parse_ok("module m { let x : u8; { let x : u16; } }", |top, _| {
        let Statement::Block(block) = top.module.statements()[1] else {
            panic!("expected block");
        };
        assert_eq!(block.scope.table.len(), 1);
    });
}

#[test]
fn test_function_declaration() {
    parse_ok(
        "module m { function add(a: u8, b: u8): u8 { return a + b; } }",
        |top, _| {
            let Statement::Function(function) = top.module.statements()[0] else {
                panic!("expected function");
            };
            assert_eq!(&*function.symbol.name, "add");
            assert_eq!(function.parameters.len(), 2);
            assert_eq!(function.scope.table.len(), 2);
            let ret = function.return_type.as_ref().unwrap();
            assert_eq!(ret.resolved.unwrap().as_bit_vector().unwrap().bit_width, 8);
        },
    );
}

#[test]
fn test_enum_declaration() {
    parse_ok(
        "module m { enum state : u8 { idle = 0, run = 1, done = idle } }",
        |top, _| {
            let Statement::Enum(enum_decl) = top.module.statements()[0] else {
                panic!("expected enum");
            };
            assert_eq!(&*enum_decl.symbol.name, "state");
            assert_eq!(enum_decl.parts().len(), 3);
            // parts are symbols in the enum's own scope with parent
            // back-references
            assert_eq!(enum_decl.scope.table.len(), 3);
            for part in enum_decl.parts() {
                assert!(std::ptr::eq(part.parent().unwrap(), *enum_decl));
            }
        },
    );
}

#[test]
fn test_enum_part_sees_earlier_siblings() {
    // `done = idle` resolves idle from the enum's own scope
    parse_ok(
        "module m { enum e : u8 { idle = 0, done = idle } }",
        |_, _| {},
    );
}

#[test]
fn test_interface_and_implements() {
    parse_ok(
        "module m { interface bus { } module slave implements bus { } }",
        |top, _| {
            let Statement::Module(slave) = top.module.statements()[1] else {
                panic!("expected module statement");
            };
            assert!(slave.implements.is_some());
        },
    );
}

#[test]
fn test_type_alias_is_transparent() {
    parse_ok("module m { type t = u8; let x : t; }", |top, _| {
        let Statement::Let(let_statement) = top.module.statements()[1] else {
            panic!("expected let");
        };
        let resolved = let_statement.parts[0].resolved.unwrap();
        let bv = resolved.as_bit_vector().unwrap();
        assert_eq!(bv.bit_width, 8);
        assert_eq!(bv.kind, BitVectorKind::Unsigned);
    });
}

#[test]
fn test_alias_of_alias_canonicalizes() {
    parse_ok(
        "module m { type a = u16; type b = a; let x : b, y : u16; }",
        |top, _| {
            let Statement::Let(let_statement) = top.module.statements()[2] else {
                panic!("expected let");
            };
            let b = let_statement.parts[0].resolved.unwrap();
            let u16_type = let_statement.parts[1].resolved.unwrap();
            assert_eq!(b, u16_type);
        },
    );
}

#[test]
fn test_type_position_rejects_non_type() {
    assert_eq!(
        parse_error("module m { const k = 1; let x : k; }"),
        "expected: type name"
    );
}

#[test]
fn test_self_reference_of_alias_fails() {
    assert_eq!(parse_error("module m { type t = t; }"), "name not found");
}

// =========================================================================
// Bundles
// =========================================================================

#[test]
fn test_bundle_members_and_statelessness() {
    parse_ok(
        "module m { bundle b { x: uint<4>; y: !uint<4>; } }",
        |top, _| {
            let Statement::Bundle(bundle) = top.module.statements()[0] else {
                panic!("expected bundle");
            };
            assert!(bundle.is_defined());
            let members = bundle.members();
            assert_eq!(members.len(), 2);
            assert_eq!(&*members[0].symbol.name, "x");
            assert_eq!(&*members[1].symbol.name, "y");
            // reg-direction leaves flip to themselves
            let x = members[0].ty().unwrap().as_bit_vector().unwrap();
            let y = members[1].ty().unwrap().as_bit_vector().unwrap();
            assert_eq!(x.direction, Direction::Reg);
            assert_eq!(y.direction, Direction::Reg);
            assert!(std::ptr::eq(x, y));
            assert!(bundle.is_stateless());
            assert!(bundle.flipped().is_stateless());
            assert!(std::ptr::eq(bundle.flipped().twin(), *bundle));
            // the twin's members are the bundle's variables
            assert_eq!(bundle.flipped().members().len(), 2);
            assert!(std::ptr::eq(bundle.flipped().members()[0], members[0]));
        },
    );
}

#[test]
fn test_port_of_bundle_type() {
    parse_ok(
        "module m { bundle io { valid: bit; } input p : io; }",
        |top, _| {
            let Statement::Bundle(bundle) = top.module.statements()[0] else {
                panic!("expected bundle");
            };
            // all-Reg members: stateless
            assert!(bundle.is_stateless());
            let Statement::Port(port) = top.module.statements()[1] else {
                panic!("expected port");
            };
            // a named bundle keeps its own type; the twin flips it
            let resolved = port.parts[0].resolved.unwrap();
            assert_eq!(resolved, TypeRef::Bundle(*bundle));
        },
    );
}

#[test]
fn test_bundle_member_group_shares_type() {
    parse_ok("module m { bundle b { a, c: u16; } }", |top, _| {
        let Statement::Bundle(bundle) = top.module.statements()[0] else {
            panic!("expected bundle");
        };
        let members = bundle.members();
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].ty(), members[1].ty());
        assert_eq!(bundle.member_lines().len(), 1);
    });
}

#[test]
fn test_bundle_duplicate_member() {
    assert_eq!(
        parse_error("module m { bundle b { x: u8; x: u8; } }"),
        "name redefined"
    );
}

#[test]
fn test_flipped_bundle_via_flip_type() {
    parse_ok(
        "module m { bundle b { x: bit; } let f : !b, g : flip b; }",
        |top, _| {
            let Statement::Bundle(bundle) = top.module.statements()[0] else {
                panic!("expected bundle");
            };
            let Statement::Let(let_statement) = top.module.statements()[1] else {
                panic!("expected let");
            };
            let f = let_statement.parts[0].resolved.unwrap();
            let g = let_statement.parts[1].resolved.unwrap();
            assert_eq!(f, TypeRef::FlippedBundle(bundle.flipped()));
            assert_eq!(f, g);
            assert_eq!(f.flipped(), TypeRef::Bundle(*bundle));
        },
    );
}

// =========================================================================
// Statements
// =========================================================================

#[test]
fn test_port_statement_directions() {
    parse_ok("module m { input a : u8; output b : u8; }", |top, _| {
        let Statement::Port(input) = top.module.statements()[0] else {
            panic!("expected input");
        };
        let Statement::Port(output) = top.module.statements()[1] else {
            panic!("expected output");
        };
        assert!(input.is_input);
        assert!(!output.is_input);
        let a = input.parts[0].resolved.unwrap().as_bit_vector().unwrap();
        let b = output.parts[0].resolved.unwrap().as_bit_vector().unwrap();
        assert_eq!(a.direction, Direction::Input);
        assert_eq!(b.direction, Direction::Output);
        // input and output u8 are each other's twins
        assert!(std::ptr::eq(a.flipped(), b));
        // name-to-part and part-to-statement back-references
        assert!(std::ptr::eq(
            input.parts[0].names[0].parent().unwrap(),
            input.parts[0]
        ));
        assert!(std::ptr::eq(input.parts[0].parent().unwrap(), input));
    });
}

#[test]
fn test_reg_statement_with_initializers() {
    parse_ok("module m { reg a = 1, b : u8, c : bit; }", |top, _| {
        let Statement::Reg(reg) = top.module.statements()[0] else {
            panic!("expected reg");
        };
        assert_eq!(reg.parts.len(), 2);
        let first = reg.parts[0];
        assert_eq!(first.names.len(), 2);
        assert!(first.names[0].initializer.is_some());
        assert!(first.names[1].initializer.is_none());
        assert_eq!(
            first.resolved.unwrap().as_bit_vector().unwrap().direction,
            Direction::Reg
        );
    });
}

#[test]
fn test_if_else_chain() {
    parse_ok(
        "module m { function f(x: bit) { if (x) return; else { } } }",
        |top, _| {
            let Statement::Function(function) = top.module.statements()[0] else {
                panic!("expected function");
            };
            let Statement::If(if_statement) = function.statements()[0] else {
                panic!("expected if");
            };
            assert!(if_statement.else_clause.is_some());
        },
    );
}

#[test]
fn test_for_statement_scope_and_backlink() {
    parse_ok("module m { for (i in 0 to 7) { i; } }", |top, _| {
        let Statement::For(for_statement) = top.module.statements()[0] else {
            panic!("expected for");
        };
        assert_eq!(&*for_statement.variable.symbol.name, "i");
        assert!(for_statement.to.is_some());
        assert!(for_statement.variable.parent().is_some());
        // the variable lives in the loop's own scope, not the module's
        assert_eq!(for_statement.scope.table.len(), 1);
        assert!(top
            .module
            .scope
            .table
            .find(for_statement.variable.symbol.name)
            .is_none());
    });
}

#[test]
fn test_for_type_statement() {
    parse_ok("module m { for (type t in u8) ; }", |top, _| {
        let Statement::ForType(for_type) = top.module.statements()[0] else {
            panic!("expected for-type");
        };
        assert_eq!(&*for_type.variable.symbol.name, "t");
    });
}

#[test]
fn test_match_statement_patterns() {
    parse_ok(
        "module m { reg x : u8; match (x) { 0b10?1 => ; 1, 2 to 3 => { } } }",
        |top, source| {
            let Statement::Match(match_statement) = top.module.statements()[1] else {
                panic!("expected match");
            };
            assert_eq!(match_statement.parts.len(), 2);
            let MatchPattern::Number(number) = match_statement.parts[0].patterns[0] else {
                panic!("expected number pattern");
            };
            let value = number.token.integer_value(source);
            assert_eq!(value.value, BigInt::from(0b1001));
            assert_eq!(value.mask, BigInt::from(0b1101));
            assert_eq!(match_statement.parts[1].patterns.len(), 2);
            let MatchPattern::Range(range) = match_statement.parts[1].patterns[1] else {
                panic!("expected range pattern");
            };
            assert!(range.to.is_some());
        },
    );
}

#[test]
fn test_number_pattern_rejected_in_expression() {
    assert_eq!(
        parse_error("module m { const k = 0b1?; }"),
        "number pattern not allowed here"
    );
}

#[test]
fn test_connect_statement() {
    parse_ok(
        "module m { input a : bit; output b : bit; a <-> b; }",
        |top, _| {
            let Statement::Expression(statement) = top.module.statements()[2] else {
                panic!("expected expression statement");
            };
            let Expression::Binary(binary) = statement.expression else {
                panic!("expected binary");
            };
            assert_eq!(binary.op, BinaryOp::Connect);
        },
    );
}

// =========================================================================
// Expressions
// =========================================================================

fn first_const_expression<'a>(top: &'a TopLevelModule<'a>) -> &'a Expression<'a> {
    for statement in top.module.statements() {
        if let Statement::Const(constant) = statement {
            return constant.parts[0].value;
        }
    }
    panic!("no const statement");
}

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    parse_ok("module m { const k = 1 + 2 * 3; }", |top, _| {
        let Expression::Binary(add) = first_const_expression(top) else {
            panic!("expected binary");
        };
        assert_eq!(add.op, BinaryOp::Add);
        let Expression::Binary(mul) = add.rhs else {
            panic!("expected rhs to be the product");
        };
        assert_eq!(mul.op, BinaryOp::Mul);
    });
}

#[test]
fn test_left_associativity() {
    parse_ok("module m { const k = 1 - 2 - 3; }", |top, _| {
        let Expression::Binary(outer) = first_const_expression(top) else {
            panic!("expected binary");
        };
        assert_eq!(outer.op, BinaryOp::Sub);
        assert!(matches!(outer.lhs, Expression::Binary(_)));
        assert!(matches!(outer.rhs, Expression::Number(_)));
    });
}

#[test]
fn test_bitwise_tiers_are_distinct() {
    // a | b ^ c & d parses as a | (b ^ (c & d))
    parse_ok("module m { const a = 1, b = 2, c = 3, d = 4, k = a | b ^ c & d; }", |top, _| {
        let Statement::Const(constant) = top.module.statements()[0] else {
            panic!("expected const");
        };
        let Expression::Binary(or) = constant.parts[4].value else {
            panic!("expected binary");
        };
        assert_eq!(or.op, BinaryOp::BitOr);
        let Expression::Binary(xor) = or.rhs else {
            panic!("expected xor");
        };
        assert_eq!(xor.op, BinaryOp::BitXor);
        let Expression::Binary(and) = xor.rhs else {
            panic!("expected and");
        };
        assert_eq!(and.op, BinaryOp::BitAnd);
    });
}

#[test]
fn test_shift_vs_relational() {
    // 1 << 2 < 3 parses as (1 << 2) < 3
    parse_ok("module m { const k = 1 << 2 < 3; }", |top, _| {
        let Expression::Binary(lt) = first_const_expression(top) else {
            panic!("expected binary");
        };
        assert_eq!(lt.op, BinaryOp::Lt);
        let Expression::Binary(shl) = lt.lhs else {
            panic!("expected shift on the left");
        };
        assert_eq!(shl.op, BinaryOp::Shl);
    });
}

#[test]
fn test_ternary_right_associative() {
    parse_ok("module m { const k = 1 ? 2 : 3 ? 4 : 5; }", |top, _| {
        let Expression::Conditional(outer) = first_const_expression(top) else {
            panic!("expected conditional");
        };
        assert!(matches!(
            outer.else_expression,
            Expression::Conditional(_)
        ));
    });
}

#[test]
fn test_assignment_right_associative() {
    parse_ok(
        "module m { reg a : u8, b : u8; a = b = 1; }",
        |top, _| {
            let Statement::Expression(statement) = top.module.statements()[1] else {
                panic!("expected expression statement");
            };
            let Expression::Binary(outer) = statement.expression else {
                panic!("expected assignment");
            };
            assert_eq!(outer.op, BinaryOp::Assign);
            assert!(matches!(outer.lhs, Expression::ScopedId(_)));
            let Expression::Binary(inner) = outer.rhs else {
                panic!("expected nested assignment");
            };
            assert_eq!(inner.op, BinaryOp::Assign);
        },
    );
}

#[test]
fn test_unary_reductions() {
    parse_ok("module m { reg x : u8; const k = &x + |x + ^x; }", |_, _| {});
}

#[test]
fn test_postfix_chain() {
    parse_ok(
        "module m { reg x : u8; const k = x.a[1].b[2 to 3]; }",
        |top, _| {
            let Expression::Slice(slice) = first_const_expression(top) else {
                panic!("expected slice");
            };
            assert!(slice.to.is_some());
            assert!(matches!(slice.base, Expression::Member(_)));
        },
    );
}

#[test]
fn test_call_fill_cat_popcount_cast() {
    parse_ok(
        "module m { function f(): u8 { return 1; } \
         const a = f(), b = fill(4, 1), c = cat(1, 2, 3), d = popCount(7), \
         e = cast!{u8}(300); }",
        |top, _| {
            let Statement::Const(constant) = top.module.statements()[1] else {
                panic!("expected const");
            };
            assert!(matches!(constant.parts[0].value, Expression::Call(_)));
            assert!(matches!(constant.parts[1].value, Expression::Fill(_)));
            let Expression::Cat(cat) = constant.parts[2].value else {
                panic!("expected cat");
            };
            assert_eq!(cat.rest.len(), 2);
            assert!(matches!(constant.parts[3].value, Expression::PopCount(_)));
            let Expression::Cast(cast) = constant.parts[4].value else {
                panic!("expected cast");
            };
            let resolved = match cast.ty {
                hdlc_ast::type_expr::TypeExpr::Builtin(b) => b.name,
                _ => panic!("expected builtin type in cast"),
            };
            assert_eq!(resolved.bit_width(), 8);
        },
    );
}

#[test]
fn test_list_expression_terminates() {
    parse_ok("module m { const k = {1, 2, 3}; }", |top, _| {
        let Expression::List(list) = first_const_expression(top) else {
            panic!("expected list");
        };
        assert_eq!(list.elements.len(), 3);
        assert!(!list.has_trailing_comma);
    });
    parse_ok("module m { const k = {1, 2,}; }", |top, _| {
        let Expression::List(list) = first_const_expression(top) else {
            panic!("expected list");
        };
        assert_eq!(list.elements.len(), 2);
        assert!(list.has_trailing_comma);
    });
    parse_ok("module m { const k = {}; }", |top, _| {
        let Expression::List(list) = first_const_expression(top) else {
            panic!("expected list");
        };
        assert!(list.elements.is_empty());
    });
}

#[test]
fn test_expected_expression_error() {
    assert_eq!(parse_error("module m { const k = ; }"), "expected: expression");
}

// =========================================================================
// Types
// =========================================================================

#[test]
fn test_uint_width_out_of_range() {
    assert_eq!(
        parse_error("module m { let x : uint<0>; }"),
        "bit vector must be non-zero width"
    );
    assert_eq!(
        parse_error("module m { let x : uint<99999999>; }"),
        "bit vector is too wide"
    );
}

#[test]
fn test_sized_types_resolve() {
    parse_ok("module m { let a : uint<12>, b : sint<12>; }", |top, _| {
        let Statement::Let(let_statement) = top.module.statements()[0] else {
            panic!("expected let");
        };
        let a = let_statement.parts[0].resolved.unwrap().as_bit_vector().unwrap();
        let b = let_statement.parts[1].resolved.unwrap().as_bit_vector().unwrap();
        assert_eq!(a.bit_width, 12);
        assert_eq!(a.kind, BitVectorKind::Unsigned);
        assert_eq!(b.kind, BitVectorKind::Signed);
        assert!(!std::ptr::eq(a, b));
    });
}

#[test]
fn test_non_literal_width_stays_surface() {
    parse_ok("module m { const w = 8; let x : uint<(w)>; }", |top, _| {
        let Statement::Let(let_statement) = top.module.statements()[1] else {
            panic!("expected let");
        };
        assert!(let_statement.parts[0].resolved.is_none());
    });
}

#[test]
fn test_typeof_memory_tuple_function_types_parse() {
    parse_ok(
        "module m { reg r : u8; let a : typeOf(r), b : memory[16]: u8, \
         c : {u8, u16}, d : function(x: u8, bit): u8; }",
        |top, _| {
            let Statement::Let(let_statement) = top.module.statements()[1] else {
                panic!("expected let");
            };
            for part in let_statement.parts {
                assert!(part.resolved.is_none());
            }
        },
    );
}

#[test]
fn test_flip_is_involutive_on_ports() {
    parse_ok("module m { input a : !u8; }", |top, _| {
        let Statement::Port(port) = top.module.statements()[0] else {
            panic!("expected port");
        };
        // !u8 under input direction: the flip turns Input into Output
        let resolved = port.parts[0].resolved.unwrap().as_bit_vector().unwrap();
        assert_eq!(resolved.direction, Direction::Output);
        assert_eq!(resolved.flipped().direction, Direction::Input);
    });
}

// =========================================================================
// Templates
// =========================================================================

#[test]
fn test_template_parameters() {
    parse_ok(
        "module top { interface bus { } module fifo!{depth, width : u32, module port : bus...} { } }",
        |top, _| {
            let Statement::Module(fifo) = top.module.statements()[1] else {
                panic!("expected module");
            };
            let parameters = fifo.template_parameters.unwrap();
            let names: Vec<&str> = parameters
                .parameters()
                .map(|parameter| parameter.symbol.name.as_str())
                .collect();
            assert_eq!(names, ["depth", "width", "port"]);
            let kinds: Vec<_> = parameters.parameters().map(|p| p.kind).collect();
            // depth and width share one interned value kind
            assert!(std::ptr::eq(kinds[0], kinds[1]));
            assert!(kinds[2].is_module());
            assert!(kinds[2].is_list());
            // parameters are symbols in the module's own scope
            assert!(fifo.scope.table.find(parameters.parameters().next().unwrap().symbol.name).is_some());
        },
    );
}

#[test]
fn test_template_parameter_type_must_be_integer() {
    assert_eq!(
        parse_error("module top { bundle b { x: bit; } module t!{n : b} { } }"),
        "type must be an integer (uint or sint)"
    );
}

#[test]
fn test_module_template_parameter_needs_interface() {
    assert_eq!(
        parse_error("module top { module t!{module p : u8} { } }"),
        "module template parameter type must be an interface"
    );
}

#[test]
fn test_duplicate_template_parameter() {
    assert_eq!(
        parse_error("module top { module t!{n, n : u32} { } }"),
        "name redefined"
    );
}

#[test]
fn test_template_arguments_on_scoped_id() {
    parse_ok(
        "module top { interface i { } module t!{n : u32} { const k = 1; } \
         function f(): u8 { return t!{4}::k; } }",
        |_, _| {},
    );
}

#[test]
fn test_top_level_module_must_not_be_template() {
    assert_eq!(
        parse_error("module m!{n : u32} { }"),
        "top-level module must not be a template"
    );
}

// =========================================================================
// Dump integration
// =========================================================================

#[test]
fn test_text_dump_shapes() {
    parse_ok(
        "module m { bundle b { x: uint<4>; } reg r = 0 : u8; }",
        |top, source| {
            let text = dump_module_text(top.module, source);
            assert!(text.starts_with("module m =0\n"));
            assert!(text.contains("bundle b =1"));
            assert!(text.contains("member x: uint<4>(reg)"));
            assert!(text.contains("reg r"));
        },
    );
}

#[test]
fn test_dump_graph_builds_with_sharing() {
    parse_ok("module m { module inner { } }", |top, source| {
        let (graph, root) = hdlc_ast::build_dump_graph(top, source);
        let json = graph.to_json(Some(root));
        // the inner module appears once as a node and once as a @ref
        // through the symbol table
        assert_eq!(json.matches("\"@name\": \"Module\"").count(), 2);
        assert!(json.contains("\"@ref\""));
        let dot = graph.to_dot(Some(root));
        assert!(dot.starts_with("digraph"));
    });
}
