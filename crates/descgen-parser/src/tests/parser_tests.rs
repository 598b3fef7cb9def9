use super::*;
use descgen_common::diagnostics::diagnostic_codes;

fn parse(text: &str) -> SourceFile {
    let (file, diagnostics) = parse_source("test.cs", text);
    assert!(diagnostics.is_empty(), "unexpected diagnostics: {diagnostics:?}");
    file
}

fn enum_names(file: &SourceFile) -> Vec<String> {
    file.enum_sites()
        .iter()
        .map(|site| site.name().to_string())
        .collect()
}

fn arguments_of(attribute_source: &str) -> Vec<AttributeArgument> {
    let file = parse(&format!("enum E {{ {attribute_source} A }}"));
    let sites = file.enum_sites();
    sites[0].declaration.members[0].attributes[0].attributes[0]
        .arguments
        .clone()
        .expect("argument list")
}

fn single_argument(attribute_source: &str) -> Expression {
    let mut arguments = arguments_of(attribute_source);
    assert_eq!(arguments.len(), 1);
    arguments.remove(0).expression
}

// =============================================================================
// Declarations
// =============================================================================

#[test]
fn test_block_namespace_with_described_enum() {
    let file = parse(
        r#"
using System.ComponentModel;

namespace N
{
    public enum Color
    {
        [Description("Bright Red")]
        Red,
        [Description("Deep Blue")]
        Blue
    }
}
"#,
    );

    assert_eq!(file.members.len(), 1);
    let Declaration::Namespace(namespace) = &file.members[0] else {
        panic!("expected namespace, got {:?}", file.members[0]);
    };
    assert_eq!(namespace.name.text, "N");
    assert!(!namespace.is_file_scoped);

    let Declaration::Enum(color) = &namespace.members[0] else {
        panic!("expected enum");
    };
    assert_eq!(color.name.text, "Color");
    assert!(color.modifiers.has(modifier_flags::PUBLIC));
    assert_eq!(color.members.len(), 2);

    let red = &color.members[0];
    assert_eq!(red.name.text, "Red");
    let attribute = red.all_attributes().next().expect("attribute");
    assert_eq!(attribute.name.text, "Description");
    assert_eq!(attribute.argument_count(), 1);
    assert_eq!(
        attribute.arguments.as_ref().unwrap()[0].expression,
        Expression::String {
            value: "Bright Red".to_string(),
            kind: StringLiteralKind::Regular,
        }
    );
}

#[test]
fn test_file_scoped_namespace_owns_rest_of_file() {
    let file = parse("namespace Company.Product.Models;\n\nenum A { X }\nclass C { enum B { Y } }\n");
    assert_eq!(file.members.len(), 1);
    let Declaration::Namespace(namespace) = &file.members[0] else {
        panic!("expected namespace");
    };
    assert!(namespace.is_file_scoped);
    assert_eq!(namespace.name.text, "Company.Product.Models");
    assert_eq!(namespace.name.segments.len(), 3);
    assert_eq!(namespace.members.len(), 2);
    assert_eq!(enum_names(&file), vec!["A", "B"]);
}

#[test]
fn test_nested_namespaces_and_global_enum() {
    let file = parse("enum Top { A }\nnamespace A { namespace B.C { enum Inner { Z } } }");
    let sites = file.enum_sites();
    assert_eq!(sites.len(), 2);
    assert!(sites[0].namespaces.is_empty());
    let names: Vec<&str> = sites[1]
        .namespaces
        .iter()
        .map(|ns| ns.name.text.as_str())
        .collect();
    assert_eq!(names, vec!["A", "B.C"]);
}

#[test]
fn test_type_members_are_skipped_and_nested_types_kept() {
    let file = parse(
        r#"
public class Holder<TKey, in TValue> : Base<TKey>, IFoo where TKey : class, new()
{
    private int _count = 0;
    public string Name { get; set; } = "x";
    public Func<int> Factory = () => { return 1; };
    public int Compute(int a) { if (a > 0) { return a; } return 0; }
    public int Twice => _count * 2;
    public Holder() : base() { }
    public int this[int i] { get { return i; } }
    public event EventHandler Changed;
    public delegate void Callback(int value);
    [Obsolete] public enum Mode { On, Off }
    internal struct Inner { enum Deep { A } }
}
"#,
    );

    let Declaration::Type(holder) = &file.members[0] else {
        panic!("expected class");
    };
    assert_eq!(holder.kind, TypeKind::Class);
    assert_eq!(holder.name.text, "Holder");
    let parameters: Vec<&str> = holder
        .type_parameters
        .iter()
        .map(|p| p.text.as_str())
        .collect();
    assert_eq!(parameters, vec!["TKey", "TValue"]);
    assert_eq!(holder.members.len(), 2);

    let sites = file.enum_sites();
    assert_eq!(enum_names(&file), vec!["Mode", "Deep"]);
    assert_eq!(sites[0].containing_types.len(), 1);
    assert_eq!(sites[0].declaration.attributes.len(), 1);
    let chain: Vec<&str> = sites[1]
        .containing_types
        .iter()
        .map(|ty| ty.name.text.as_str())
        .collect();
    assert_eq!(chain, vec!["Holder", "Inner"]);
    assert_eq!(sites[1].containing_types[1].kind, TypeKind::Struct);
    assert!(sites[1].containing_types[1].modifiers.has(modifier_flags::INTERNAL));
}

#[test]
fn test_records_and_interfaces() {
    let file = parse(
        "public record Person(string Name) { public enum Kind { A } }\n\
         record struct Point(int X, int Y);\n\
         public sealed record class Tag;\n\
         interface IShape { enum Corner { Round } }\n",
    );
    let kinds: Vec<TypeKind> = file
        .members
        .iter()
        .filter_map(|member| match member {
            Declaration::Type(ty) => Some(ty.kind),
            _ => None,
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            TypeKind::Record,
            TypeKind::RecordStruct,
            TypeKind::Record,
            TypeKind::Interface
        ]
    );
    assert_eq!(enum_names(&file), vec!["Kind", "Corner"]);
}

#[test]
fn test_modifiers() {
    let file = parse(
        "public static partial class P { protected internal enum A { X } private protected enum B { Y } }\n\
         file class F { }",
    );
    let Declaration::Type(p) = &file.members[0] else {
        panic!("expected class");
    };
    assert!(p.modifiers.has(modifier_flags::PUBLIC));
    assert!(p.modifiers.has(modifier_flags::STATIC));
    assert!(p.modifiers.has(modifier_flags::PARTIAL));

    let sites = file.enum_sites();
    let a = &sites[0].declaration.modifiers;
    assert!(a.has(modifier_flags::PROTECTED) && a.has(modifier_flags::INTERNAL));
    let b = &sites[1].declaration.modifiers;
    assert!(b.has(modifier_flags::PRIVATE) && b.has(modifier_flags::PROTECTED));

    let Declaration::Type(f) = &file.members[1] else {
        panic!("expected class");
    };
    assert!(f.modifiers.has(modifier_flags::FILE));
    assert!(!f.modifiers.has(modifier_flags::PUBLIC));
}

#[test]
fn test_enum_base_type_initializers_and_trailing_comma() {
    let file = parse("[Flags] enum F : byte { A = 1, B = A | 2, C = (1 << 3), };");
    let sites = file.enum_sites();
    let f = sites[0].declaration;
    assert_eq!(f.base_type.as_deref(), Some("byte"));
    assert_eq!(f.attributes.len(), 1);
    let initializers: Vec<Option<&str>> = f
        .members
        .iter()
        .map(|m| m.initializer.as_deref())
        .collect();
    assert_eq!(
        initializers,
        vec![Some("1"), Some("A | 2"), Some("(1 << 3)")]
    );
}

#[test]
fn test_empty_enum_and_verbatim_names() {
    let file = parse("enum Empty { }\nenum @class { @default, Plain }");
    let sites = file.enum_sites();
    assert!(sites[0].declaration.members.is_empty());
    let verbatim = sites[1].declaration;
    assert_eq!(verbatim.name.text, "class");
    assert!(verbatim.name.is_verbatim);
    assert_eq!(verbatim.members[0].name.text, "default");
    assert!(verbatim.members[0].name.is_verbatim);
    assert!(!verbatim.members[1].name.is_verbatim);
}

#[test]
fn test_global_attribute_and_using_directives() {
    let file = parse(
        "extern alias Legacy;\nglobal using System;\nusing static System.Math;\nusing Alias = System.ComponentModel;\n\
         [assembly: AssemblyVersion(\"1.0\")]\nnamespace N { enum E { A } }",
    );
    assert_eq!(enum_names(&file), vec!["E"]);
}

// =============================================================================
// Attributes
// =============================================================================

#[test]
fn test_attribute_lists_targets_and_multiple_attributes() {
    let file = parse(
        "enum E { [field: Description(\"a\"), Browsable(false)] [Obsolete] A, [global::System.ComponentModel.DescriptionAttribute(\"b\")] B }",
    );
    let sites = file.enum_sites();
    let members = &sites[0].declaration.members;

    let a = &members[0];
    assert_eq!(a.attributes.len(), 2);
    assert_eq!(a.attributes[0].target.as_deref(), Some("field"));
    let names: Vec<&str> = a.all_attributes().map(|attr| attr.name.text.as_str()).collect();
    assert_eq!(names, vec!["Description", "Browsable", "Obsolete"]);
    assert!(a.attributes[1].attributes[0].arguments.is_none());
    assert_eq!(a.attributes[1].attributes[0].argument_count(), 0);

    let b = members[1].all_attributes().next().expect("attribute");
    assert_eq!(
        b.name.text,
        "global::System.ComponentModel.DescriptionAttribute"
    );
    assert_eq!(b.name.alias.as_ref().map(|a| a.text.as_str()), Some("global"));
    assert_eq!(b.name.last().map(|s| s.text.as_str()), Some("DescriptionAttribute"));
}

#[test]
fn test_named_arguments() {
    let arguments = arguments_of("[Description(\"x\", Category = \"y\", description: \"z\")]");
    assert_eq!(arguments.len(), 3);
    assert!(arguments[0].name.is_none());
    assert!(matches!(&arguments[1].name, Some(ArgumentName::Equals(id)) if id.text == "Category"));
    assert!(matches!(&arguments[2].name, Some(ArgumentName::Colon(id)) if id.text == "description"));
    let constructor: Vec<bool> = arguments
        .iter()
        .map(AttributeArgument::is_constructor_argument)
        .collect();
    assert_eq!(constructor, vec![true, false, true]);
}

#[test]
fn test_empty_argument_list() {
    assert!(arguments_of("[Description()]").is_empty());
}

#[test]
fn test_string_concatenation_and_precedence() {
    let expression = single_argument(r#"[D("a" + "b")]"#);
    let Expression::Binary { left, operator, right } = expression else {
        panic!("expected binary");
    };
    assert_eq!(operator, BinaryOperator::Add);
    assert!(matches!(*left, Expression::String { ref value, .. } if value == "a"));
    assert!(matches!(*right, Expression::String { ref value, .. } if value == "b"));

    let expression = single_argument("[D(1 + 2 * 3)]");
    let Expression::Binary { operator, right, .. } = expression else {
        panic!("expected binary");
    };
    assert_eq!(operator, BinaryOperator::Add);
    assert!(matches!(
        *right,
        Expression::Binary {
            operator: BinaryOperator::Multiply,
            ..
        }
    ));
}

#[test]
fn test_literal_kinds() {
    assert_eq!(
        single_argument(r#"[D(@"C:\temp")]"#),
        Expression::String {
            value: r"C:\temp".to_string(),
            kind: StringLiteralKind::Verbatim,
        }
    );
    assert_eq!(single_argument("[D('x')]"), Expression::Character("x".to_string()));
    assert_eq!(single_argument("[D(42)]"), Expression::Number("42".to_string()));
    assert_eq!(single_argument("[D(true)]"), Expression::Boolean(true));
    assert_eq!(single_argument("[D(null)]"), Expression::Null);
    assert!(matches!(
        single_argument(r#"[D($"n{1}")]"#),
        Expression::InterpolatedString(_)
    ));
    assert!(matches!(
        single_argument("[D(-1)]"),
        Expression::Unary {
            operator: UnaryOperator::Minus,
            ..
        }
    ));
}

#[test]
fn test_nameof_typeof_cast_and_parenthesized() {
    let Expression::NameOf(operand) = single_argument("[D(nameof(Color.Red))]") else {
        panic!("expected nameof");
    };
    assert!(matches!(*operand, Expression::Name(ref name) if name.text == "Color.Red"));

    assert_eq!(
        single_argument("[D(typeof(List<int>))]"),
        Expression::TypeOf("List<int>".to_string())
    );

    let Expression::Cast { target, operand } = single_argument(r#"[D((string)"x")]"#) else {
        panic!("expected cast");
    };
    assert_eq!(target, "string");
    assert!(matches!(*operand, Expression::String { ref value, .. } if value == "x"));

    assert!(matches!(
        single_argument(r#"[D(("x"))]"#),
        Expression::Parenthesized(_)
    ));
}

#[test]
fn test_unmodeled_arguments_keep_their_text() {
    assert_eq!(
        single_argument(r#"[D(Resources.Get("x"))]"#),
        Expression::Other(r#"Resources.Get("x")"#.to_string())
    );
    assert_eq!(
        single_argument(r#"[D(flag ? "a" : "b")]"#),
        Expression::Other(r#"flag ? "a" : "b""#.to_string())
    );
    assert!(matches!(
        single_argument("[D(Strings.Label)]"),
        Expression::Name(ref name) if name.text == "Strings.Label"
    ));
}

// =============================================================================
// Recovery
// =============================================================================

#[test]
fn test_missing_close_brace_reports_expected() {
    let (file, diagnostics) = parse_source("test.cs", "namespace N { enum E { A, B }");
    assert_eq!(enum_names(&file), vec!["E"]);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, diagnostic_codes::EXPECTED);
    assert_eq!(diagnostics[0].message, "'}' expected.");
}

#[test]
fn test_stray_close_brace_reports_declaration_expected() {
    let (file, diagnostics) = parse_source("test.cs", "enum E { A } }\nenum F { B }");
    assert_eq!(enum_names(&file), vec!["E", "F"]);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, diagnostic_codes::DECLARATION_EXPECTED);
    assert_eq!(diagnostics[0].start, 13);
}

#[test]
fn test_missing_comma_between_enum_members() {
    let (file, diagnostics) = parse_source("test.cs", "enum E { A B, C }");
    let sites = file.enum_sites();
    let names: Vec<&str> = sites[0]
        .declaration
        .members
        .iter()
        .map(|m| m.name.text.as_str())
        .collect();
    assert_eq!(names, vec!["A", "C"]);
    assert_eq!(diagnostics[0].code, diagnostic_codes::EXPECTED);
    assert_eq!(diagnostics[0].message, "',' expected.");
}

#[test]
fn test_scanner_diagnostics_are_merged() {
    let (_, diagnostics) = parse_source("test.cs", "enum E { /* open");
    assert!(
        diagnostics
            .iter()
            .any(|d| d.code == diagnostic_codes::ASTERISK_SLASH_EXPECTED)
    );
}
