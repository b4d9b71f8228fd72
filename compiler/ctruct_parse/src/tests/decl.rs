//! Declaration dispatcher tests.

use ctruct_ir::ast::{
    AlignasArg, AttributeSpecifierKind, BuiltinType, CvQualifiers, DeclFlags, DeclKind,
    ElaboratedKey, FunctionBody, Initializer, LinkageBody, SpecifierWord, StmtKind, TemplateArg,
    TemplateParamKind, TypeKind, TypeParamKey,
};
use pretty_assertions::assert_eq;

use super::{parse_ok, parse_source};
use crate::SyntaxErrorKind;

fn builtin(kinds: &[BuiltinType]) -> TypeKind {
    TypeKind::Builtin(kinds.iter().copied().collect())
}

#[test]
fn test_empty_declaration() {
    let parsed = parse_ok(";;");
    assert_eq!(parsed.decl_count(), 2);
    assert_eq!(parsed.decl(0).kind, DeclKind::Empty);
}

#[test]
fn test_simple_declaration_with_several_declarators() {
    let parsed = parse_ok("static const unsigned long a = 1, *b, c[4];");
    let simple = parsed.simple(0);
    assert_eq!(simple.specifiers.flags, DeclFlags::STATIC);
    let ty = parsed.arena().get_type(simple.specifiers.ty.unwrap());
    assert_eq!(ty.kind, builtin(&[BuiltinType::Unsigned, BuiltinType::Long]));
    let names: Vec<String> = simple
        .declarators
        .iter()
        .map(|d| parsed.declarator_name(d.declarator))
        .collect();
    assert_eq!(names, ["a", "b", "c"]);
    assert!(matches!(simple.declarators[0].init, Some(Initializer::Assign(_))));
    assert_eq!(simple.declarators[1].init, None);
}

#[test]
fn test_initializer_forms() {
    let parsed = parse_ok("int a = {1, 2}; int b{3}; int c(4, 5);");
    let init = |i: usize| parsed.simple(i).declarators[0].init.unwrap();
    assert!(matches!(init(0), Initializer::Braced { with_eq: true, args } if args.len() == 2));
    assert!(matches!(init(1), Initializer::Braced { with_eq: false, args } if args.len() == 1));
    assert!(matches!(init(2), Initializer::Paren(args) if args.len() == 2));
}

#[test]
fn test_named_types() {
    let parsed = parse_ok("std::vector<std::vector<int>> grid; ::size_t n;");
    let ty = parsed.arena().get_type(parsed.simple(0).specifiers.ty.unwrap());
    let TypeKind::Named(name) = &ty.kind else {
        panic!("expected named type");
    };
    assert_eq!(parsed.qualified(name), "std::vector");
    let args = name.segments[1].template_args.as_ref().unwrap();
    let [TemplateArg::Type(inner)] = args.as_slice() else {
        panic!("expected one type argument, got {args:?}");
    };
    let inner = parsed.arena().get_type(inner.specifiers.ty.unwrap());
    assert!(matches!(&inner.kind, TypeKind::Named(n) if n.segments[1].template_args.is_some()));
    assert_eq!(parsed.declarator_name(parsed.simple(0).declarators[0].declarator), "grid");

    let ty = parsed.arena().get_type(parsed.simple(1).specifiers.ty.unwrap());
    assert!(matches!(&ty.kind, TypeKind::Named(n) if n.global));
}

#[test]
fn test_specifier_source_order() {
    let parsed = parse_ok("unsigned const long static z;");
    let specs = &parsed.simple(0).specifiers;
    assert_eq!(
        specs.order.as_slice(),
        [
            SpecifierWord::Builtin(BuiltinType::Unsigned),
            SpecifierWord::Cv(CvQualifiers::CONST),
            SpecifierWord::Builtin(BuiltinType::Long),
            SpecifierWord::Flag(DeclFlags::STATIC),
        ]
    );
    let ty = parsed.arena().get_type(specs.ty.unwrap());
    assert_eq!(ty.kind, builtin(&[BuiltinType::Unsigned, BuiltinType::Long]));

    let parsed = parse_ok("[[maybe_unused]] std::string const s;");
    let specs = &parsed.simple(0).specifiers;
    assert_eq!(
        specs.order.as_slice(),
        [SpecifierWord::Type, SpecifierWord::Cv(CvQualifiers::CONST)]
    );
}

#[test]
fn test_template_argument_expressions() {
    let parsed = parse_ok("array<int, 3 + 1> a; bits<(4 > 2)> b;");
    let ty = parsed.arena().get_type(parsed.simple(0).specifiers.ty.unwrap());
    let TypeKind::Named(name) = &ty.kind else {
        panic!("expected named type");
    };
    let args = name.segments[0].template_args.as_ref().unwrap();
    assert!(matches!(args.as_slice(), [TemplateArg::Type(_), TemplateArg::Expr(_)]));
    assert_eq!(parsed.decl_count(), 2);
}

#[test]
fn test_elaborated_and_decltype_specifiers() {
    let parsed = parse_ok("struct tm *now; typename T::type v; decltype(x + 1) y;");
    let kinds: Vec<_> = (0..3)
        .map(|i| &parsed.arena().get_type(parsed.simple(i).specifiers.ty.unwrap()).kind)
        .collect();
    assert!(matches!(kinds[0], TypeKind::Elaborated { key: ElaboratedKey::Struct, .. }));
    assert!(matches!(kinds[1], TypeKind::Elaborated { key: ElaboratedKey::Typename, .. }));
    assert!(matches!(kinds[2], TypeKind::Decltype(_)));
}

#[test]
fn test_forward_declaration() {
    let parsed = parse_ok("class Widget;");
    assert!(parsed.simple(0).declarators.is_empty());
}

#[test]
fn test_function_definition() {
    let parsed = parse_ok("int add(int a, int b) { return a + b; }");
    let def = parsed.function(0);
    assert_eq!(parsed.declarator_name(def.declarator), "add");
    let FunctionBody::Block { ctor_inits, body } = &def.body else {
        panic!("expected block body");
    };
    assert!(ctor_inits.is_empty());
    let StmtKind::Block(stmts) = parsed.arena().get_stmt(*body).kind else {
        panic!("expected block");
    };
    assert_eq!(stmts.len(), 1);
}

#[test]
fn test_trailing_return_type_overrides_auto() {
    let parsed = parse_ok("auto func(int a) -> int { return a; }");
    let def = parsed.function(0);
    let ret = parsed.arena().get_type(def.return_type.unwrap());
    assert_eq!(ret.kind, builtin(&[BuiltinType::Int]));
    let declared = parsed.arena().get_type(def.specifiers.ty.unwrap());
    assert_eq!(declared.kind, builtin(&[BuiltinType::Auto]));
}

#[test]
fn test_defaulted_and_deleted_functions() {
    let parsed = parse_ok("Widget() = default; Widget(const Widget &) = delete;");
    assert_eq!(parsed.function(0).body, FunctionBody::Default);
    assert_eq!(parsed.function(1).body, FunctionBody::Delete);
    assert!(parsed.function(0).return_type.is_none());
}

#[test]
fn test_constructor_with_member_initializers() {
    let parsed = parse_ok("Point::Point(int x, int y) : x_(x), y_{y}, Base<int>(0) {}");
    let def = parsed.function(0);
    assert_eq!(parsed.declarator_name(def.declarator), "Point::Point");
    let FunctionBody::Block { ctor_inits, .. } = &def.body else {
        panic!("expected block body");
    };
    let names: Vec<String> = ctor_inits.iter().map(|m| parsed.qualified(&m.name)).collect();
    assert_eq!(names, ["x_", "y_", "Base"]);
    assert!(matches!(ctor_inits[1].init, Initializer::Braced { with_eq: false, .. }));
}

#[test]
fn test_function_try_block() {
    let parsed = parse_ok("void run() try { go(); } catch (const Error &e) { } catch (...) { }");
    let FunctionBody::Try { handlers, .. } = &parsed.function(0).body else {
        panic!("expected function try block");
    };
    assert_eq!(handlers.len(), 2);
    assert!(handlers[0].param.is_some());
    assert!(handlers[1].param.is_none());
}

#[test]
fn test_function_declaration_without_type_is_accepted() {
    let parsed = parse_ok("Widget(int size);");
    assert!(parsed.arena().is_function_declarator(parsed.simple(0).declarators[0].declarator));
}

#[test]
fn test_pure_virtual_declaration() {
    let parsed = parse_ok("virtual void draw() = 0;");
    let simple = parsed.simple(0);
    assert_eq!(simple.specifiers.flags, DeclFlags::VIRTUAL);
    assert!(matches!(simple.declarators[0].init, Some(Initializer::Assign(_))));
}

#[test]
fn test_template_declaration() {
    let parsed = parse_ok(
        "template <class T, typename U = int, int N = 3, template <class> class C, class... Ts> \
         void f(T t);",
    );
    let DeclKind::Template(template) = &parsed.decl(0).kind else {
        panic!("expected template");
    };
    assert_eq!(template.params.len(), 5);
    assert!(matches!(
        template.params[0].kind,
        TemplateParamKind::Type { key: TypeParamKey::Class, pack: false, default: None, .. }
    ));
    assert!(matches!(
        template.params[1].kind,
        TemplateParamKind::Type { key: TypeParamKey::Typename, default: Some(_), .. }
    ));
    assert!(matches!(
        &template.params[2].kind,
        TemplateParamKind::NonType(p) if p.default.is_some()
    ));
    assert!(matches!(
        &template.params[3].kind,
        TemplateParamKind::Template { params, .. } if params.len() == 1
    ));
    assert!(matches!(template.params[4].kind, TemplateParamKind::Type { pack: true, .. }));
    assert!(matches!(parsed.arena().get_decl(template.decl).kind, DeclKind::Simple(_)));
}

#[test]
fn test_typename_non_type_template_parameter() {
    let parsed = parse_ok("template <typename T::size_type N> int x;");
    let DeclKind::Template(template) = &parsed.decl(0).kind else {
        panic!("expected template");
    };
    assert!(matches!(template.params[0].kind, TemplateParamKind::NonType(_)));
}

#[test]
fn test_nested_template_declaration() {
    let parsed = parse_ok("template <class T> template <class U> void A<T>::f(U u);");
    let DeclKind::Template(outer) = &parsed.decl(0).kind else {
        panic!("expected template");
    };
    assert!(matches!(parsed.arena().get_decl(outer.decl).kind, DeclKind::Template(_)));
}

#[test]
fn test_explicit_specialization_and_instantiation() {
    let parsed = parse_ok("template <> int f<int>(int); template int g<int>(int); extern template int h<int>(int);");
    assert!(matches!(parsed.decl(0).kind, DeclKind::ExplicitSpecialization(_)));
    assert!(matches!(
        parsed.decl(1).kind,
        DeclKind::ExplicitInstantiation { is_extern: false, .. }
    ));
    assert!(matches!(
        parsed.decl(2).kind,
        DeclKind::ExplicitInstantiation { is_extern: true, .. }
    ));
}

#[test]
fn test_linkage_specifications() {
    let parsed = parse_ok("extern \"C\" { int a; void f(); } extern \"C++\" int b;");
    let DeclKind::Linkage(braced) = &parsed.decl(0).kind else {
        panic!("expected linkage");
    };
    assert_eq!(parsed.text(braced.abi), "\"C\"");
    assert!(matches!(&braced.body, LinkageBody::Braced(decls) if decls.len() == 2));
    let DeclKind::Linkage(single) = &parsed.decl(1).kind else {
        panic!("expected linkage");
    };
    assert!(matches!(single.body, LinkageBody::Single(_)));
}

#[test]
fn test_extern_variable_is_a_simple_declaration() {
    let parsed = parse_ok("extern int errno_value;");
    assert_eq!(parsed.simple(0).specifiers.flags, DeclFlags::EXTERN);
}

#[test]
fn test_namespaces() {
    let parsed = parse_ok("namespace a { int x; namespace { int y; } } inline namespace v1 {}");
    let DeclKind::Namespace(outer) = &parsed.decl(0).kind else {
        panic!("expected namespace");
    };
    assert!(!outer.inline);
    assert_eq!(parsed.text(outer.name.unwrap()), "a");
    assert_eq!(outer.decls.len(), 2);
    let DeclKind::Namespace(unnamed) = &parsed.arena().get_decl(outer.decls[1]).kind else {
        panic!("expected nested namespace");
    };
    assert_eq!(unnamed.name, None);

    let DeclKind::Namespace(inline) = &parsed.decl(1).kind else {
        panic!("expected inline namespace");
    };
    assert!(inline.inline);
    assert!(inline.decls.is_empty());
}

#[test]
fn test_namespace_alias() {
    let parsed = parse_ok("namespace fs = std::filesystem;");
    let DeclKind::NamespaceAlias { alias, target } = &parsed.decl(0).kind else {
        panic!("expected namespace alias");
    };
    assert_eq!(parsed.text(*alias), "fs");
    assert_eq!(parsed.qualified(target), "std::filesystem");
}

#[test]
fn test_using_forms() {
    let parsed = parse_ok(
        "using namespace std; using std::swap; using typename Base::type; using Vec = vector<int>;",
    );
    assert!(matches!(parsed.decl(0).kind, DeclKind::UsingDirective(_)));
    assert!(matches!(
        parsed.decl(1).kind,
        DeclKind::UsingDeclaration { typename: false, .. }
    ));
    assert!(matches!(
        parsed.decl(2).kind,
        DeclKind::UsingDeclaration { typename: true, .. }
    ));
    let DeclKind::Alias { name, ty, .. } = &parsed.decl(3).kind else {
        panic!("expected alias");
    };
    assert_eq!(parsed.text(*name), "Vec");
    assert!(ty.specifiers.ty.is_some());
}

#[test]
fn test_static_assert() {
    let parsed = parse_ok("static_assert(sizeof_int == 4, \"int size\"); static_assert(ok);");
    assert!(matches!(
        parsed.decl(0).kind,
        DeclKind::StaticAssert { message: Some(_), .. }
    ));
    assert!(matches!(parsed.decl(1).kind, DeclKind::StaticAssert { message: None, .. }));
}

#[test]
fn test_attribute_declaration() {
    let parsed = parse_ok("[[gnu::visibility(\"default\"), deprecated]];");
    let DeclKind::Attribute(specs) = &parsed.decl(0).kind else {
        panic!("expected attribute declaration");
    };
    let AttributeSpecifierKind::List(attrs) = &specs[0].kind else {
        panic!("expected attribute list");
    };
    assert_eq!(attrs.len(), 2);
    assert_eq!(parsed.text(attrs[0].scope.unwrap()), "gnu");
    assert_eq!(attrs[0].args.unwrap().len(), 1);
    assert!(attrs[1].args.is_none());
}

#[test]
fn test_attributes_on_declarations() {
    let parsed = parse_ok("[[nodiscard]] int f(); [[using gnu: hot, cold]] void g(); alignas(16) char buf[64];");
    assert_eq!(parsed.simple(0).attrs.len(), 1);
    let AttributeSpecifierKind::List(attrs) = &parsed.simple(1).attrs[0].kind else {
        panic!("expected attribute list");
    };
    assert!(attrs.iter().all(|a| a.scope.is_some()));
    assert!(matches!(
        parsed.simple(2).attrs[0].kind,
        AttributeSpecifierKind::Alignas { arg: AlignasArg::Expr(_), pack: false }
    ));
}

#[test]
fn test_alignas_type_argument() {
    let parsed = parse_ok("alignas(double) char storage[8];");
    assert!(matches!(
        parsed.simple(0).attrs[0].kind,
        AttributeSpecifierKind::Alignas { arg: AlignasArg::Type(_), .. }
    ));
}

#[test]
fn test_ambiguous_declaration() {
    let parsed = parse_source("x;");
    assert_eq!(parsed.output.errors.len(), 1);
    assert_eq!(parsed.output.errors[0].kind, SyntaxErrorKind::AmbiguousDeclaration);
    assert_eq!(parsed.decl_count(), 0);
}

#[test]
fn test_nothing_matches_reports_without_consuming() {
    let parsed = parse_source("return 0;");
    let error = &parsed.output.errors[0];
    assert_eq!(error.kind, SyntaxErrorKind::UnexpectedToken);
    assert_eq!(error.found_desc, "`return`");
    assert_eq!(error.span.start, 0);
}

#[test]
fn test_namespace_not_allowed_in_function_body() {
    let parsed = parse_source("void f() { namespace n {} }");
    assert!(parsed.output.has_errors());
    assert_eq!(parsed.output.errors[0].context, Some("namespace definition"));
}

#[test]
fn test_spans_cover_declarations() {
    let parsed = parse_ok("int a;  int b = 2;");
    assert_eq!(parsed.decl(0).span.to_range(), 0..6);
    assert_eq!(parsed.decl(1).span.to_range(), 8..18);
}
