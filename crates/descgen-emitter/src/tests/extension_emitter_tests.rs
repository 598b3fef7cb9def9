use super::*;
use descgen_binder::{Binder, ResolvedEnumType};
use descgen_common::{AttributeMatch, NewLineKind};
use descgen_parser::parse_source;

fn resolve(text: &str) -> ResolvedEnumType {
    let (file, diagnostics) = parse_source("emitter.cs", text);
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    let mut results = Binder::new(&file).resolve_all();
    assert_eq!(results.len(), 1);
    results.remove(0).expect("enum resolves")
}

fn emit_with(text: &str, options: EmitterOptions) -> Result<GeneratedUnit, GenerateError> {
    let resolved = resolve(text);
    generate(&resolved, resolved.namespace.as_deref(), options)
}

fn emit(text: &str) -> String {
    emit_with(text, EmitterOptions::default())
        .expect("extension class generates")
        .text
}

fn lines(lines: &[&str]) -> String {
    lines.join("\n")
}

// =============================================================================
// Layout
// =============================================================================

#[test]
fn test_described_enum_in_namespace() {
    let text = emit(
        r#"namespace N { public enum Color { [Description("Bright Red")] Red, [Description("Deep Blue")] Blue } }"#,
    );
    let expected = lines(&[
        "namespace N",
        "{",
        "    public static class ColorExtensions",
        "    {",
        "        public static string GetDescription(this Color value)",
        "        {",
        "            switch (value)",
        "            {",
        "                case Color.Red:",
        "                    return \"Bright Red\";",
        "                case Color.Blue:",
        "                    return \"Deep Blue\";",
        "                default:",
        "                    return value.ToString();",
        "            }",
        "        }",
        "    }",
        "}",
    ]);
    assert_eq!(text, expected);
}

#[test]
fn test_undescribed_member_falls_back_to_its_name() {
    let text = emit(r#"enum Status { [Description("Active now")] Active, Inactive }"#);
    let expected = lines(&[
        "internal static class StatusExtensions",
        "{",
        "    public static string GetDescription(this Status value)",
        "    {",
        "        switch (value)",
        "        {",
        "            case Status.Active:",
        "                return \"Active now\";",
        "            case Status.Inactive:",
        "                return \"Inactive\";",
        "            default:",
        "                return value.ToString();",
        "        }",
        "    }",
        "}",
    ]);
    assert_eq!(text, expected);
}

#[test]
fn test_one_section_per_member_plus_default() {
    let text = emit(
        r#"namespace N { enum E { [Description("a")] A, [Description("b")] B, [Description("c")] C } }"#,
    );
    assert_eq!(text.matches("case E.").count(), 3);
    assert_eq!(text.matches("default:").count(), 1);
    let a = text.find("case E.A:").expect("A");
    let b = text.find("case E.B:").expect("B");
    let c = text.find("case E.C:").expect("C");
    let default = text.find("default:").expect("default");
    assert!(a < b && b < c && c < default);
}

#[test]
fn test_empty_enum_has_only_default_section() {
    let text = emit("namespace N { public enum Empty { } }");
    assert!(!text.contains("case "));
    assert!(text.contains("            switch (value)\n            {\n                default:"));
}

#[test]
fn test_no_trailing_newline_and_crlf_option() {
    let source = r#"namespace N { enum E { [Description("a")] A } }"#;
    assert!(!emit(source).ends_with('\n'));

    let options = EmitterOptions {
        printer: PrinterOptions {
            new_line: NewLineKind::CarriageReturnLineFeed,
        },
        ..EmitterOptions::default()
    };
    let text = emit_with(source, options).expect("generates").text;
    assert!(text.starts_with("namespace N\r\n{\r\n"));
    assert_eq!(text.matches('\n').count(), text.matches("\r\n").count());
    assert!(!text.ends_with('\n'));
}

#[test]
fn test_generation_is_deterministic() {
    let source = r#"namespace A.B { public class Outer { public enum E { [Description("x")] X, Y } } }"#;
    assert_eq!(emit(source), emit(source));
}

// =============================================================================
// Names and visibility
// =============================================================================

#[test]
fn test_global_namespace_has_no_namespace_block() {
    let text = emit(r#"public enum E { [Description("a")] A }"#);
    assert!(text.starts_with("public static class EExtensions\n{"));
    assert!(!text.contains("namespace"));
}

#[test]
fn test_nested_enum_uses_containing_type_path() {
    let text = emit(
        r#"namespace N { internal class Outer { public enum E { [Description("a")] A } } }"#,
    );
    assert!(text.contains("    internal static class EExtensions\n"));
    assert!(text.contains("GetDescription(this Outer.E value)"));
    assert!(text.contains("case Outer.E.A:"));
}

#[test]
fn test_visibility_is_most_restrictive_along_chain() {
    let cases = [
        ("public", "public", "public"),
        ("public", "internal", "internal"),
        ("internal", "public", "internal"),
        ("internal", "internal", "internal"),
    ];
    for (outer, inner, expected) in cases {
        let source = format!(
            r#"namespace N {{ {outer} class Outer {{ {inner} enum E {{ [Description("a")] A }} }} }}"#
        );
        let text = emit(&source);
        assert!(
            text.contains(&format!("    {expected} static class EExtensions\n")),
            "{outer}/{inner}: {text}"
        );
    }
}

#[test]
fn test_two_level_nesting_and_generic_containers() {
    let text = emit(
        r#"namespace N { public class Outer<T, U> { public struct Middle { public enum E { [Description("a")] A } } } }"#,
    );
    assert!(text.contains("GetDescription(this Outer<T, U>.Middle.E value)"));
    assert!(text.contains("case Outer<T, U>.Middle.E.A:"));
}

#[test]
fn test_reserved_words_are_escaped() {
    let text = emit(r#"namespace N { public enum @class { [Description("d")] @default, Plain } }"#);
    assert!(text.contains("public static class classExtensions"));
    assert!(text.contains("GetDescription(this @class value)"));
    assert!(text.contains("case @class.@default:"));
    assert!(text.contains("case @class.Plain:"));
}

#[test]
fn test_label_text_is_escaped() {
    let text = emit(r#"namespace N { enum E { [Description("say \"hi\"\n")] A } }"#);
    assert!(text.contains(r#"return "say \"hi\"\n";"#));
}

#[test]
fn test_surrogate_pair_label_is_kept() {
    let text = emit(r#"namespace N { enum E { [Description("\uD83D\uDE00 smile")] A } }"#);
    assert!(text.contains("return \"\u{1F600} smile\";"), "{text}");
}

#[test]
fn test_hint_name_drops_verbatim_prefix() {
    let unit = emit_with(
        r#"namespace N { public enum @class { [Description("c")] A } }"#,
        EmitterOptions::default(),
    )
    .expect("generates");
    assert_eq!(unit.hint_name, "class_Extensions_Class");
    assert_eq!(unit.enum_name, "@class");
}

#[test]
fn test_hint_and_enum_names() {
    let unit = emit_with(
        r#"namespace N { public class Outer { public enum Color { [Description("r")] Red } } }"#,
        EmitterOptions::default(),
    )
    .expect("generates");
    assert_eq!(unit.hint_name, "Color_Extensions_Class");
    assert_eq!(unit.enum_name, "Outer.Color");
}

// =============================================================================
// Labels
// =============================================================================

#[test]
fn test_constant_string_expressions_supply_labels() {
    let text = emit(
        r#"namespace N { enum E { [Description("Bright" + " " + "Red")] A, [Description(nameof(Other))] B, [Description(@"C:\x")] C } }"#,
    );
    assert!(text.contains("return \"Bright Red\";"));
    assert!(text.contains("return \"Other\";"));
    assert!(text.contains(r#"return "C:\\x";"#));
}

#[test]
fn test_first_description_attribute_wins() {
    let text = emit(
        r#"namespace N { enum E { [Obsolete, Description("first")] [Description("second")] A } }"#,
    );
    assert!(text.contains("return \"first\";"));
    assert!(!text.contains("second"));
}

#[test]
fn test_qualified_and_suffixed_attribute_names() {
    let text = emit(
        r#"namespace N { enum E { [System.ComponentModel.Description("q")] A, [DescriptionAttribute("s")] B } }"#,
    );
    assert!(text.contains("return \"q\";"));
    assert!(text.contains("return \"s\";"));
}

#[test]
fn test_normalized_matching_accepts_verbatim_class_name() {
    let source = r#"namespace N { enum E { [@Description("v")] A } }"#;
    assert!(emit(source).contains("return \"A\";"));

    let options = EmitterOptions {
        attribute_match: AttributeMatch::Normalized,
        ..EmitterOptions::default()
    };
    let text = emit_with(source, options).expect("generates").text;
    assert!(text.contains("return \"v\";"));
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_wrong_argument_count_is_an_error() {
    let error = emit_with(
        r#"namespace N { enum E { [Description("a", "b")] A } }"#,
        EmitterOptions::default(),
    )
    .expect_err("two arguments");
    assert!(matches!(
        &error,
        GenerateError::ArgumentCount { member, count: 2, .. } if member == "A"
    ));
    assert_eq!(error.code(), 5001);

    let diagnostic = error.to_diagnostic("emitter.cs");
    assert_eq!(diagnostic.code, 5001);
    assert_eq!(diagnostic.start, error.span().start);
    assert!(diagnostic.message_text.contains("but has 2"), "{}", diagnostic.message_text);
}

#[test]
fn test_empty_argument_list_is_an_error() {
    let error = emit_with(
        "namespace N { enum E { [Description()] A } }",
        EmitterOptions::default(),
    )
    .expect_err("no arguments");
    assert!(matches!(error, GenerateError::ArgumentCount { count: 0, .. }));
}

#[test]
fn test_non_string_argument_is_an_error() {
    let error = emit_with(
        "namespace N { enum E { [Description(42)] A } }",
        EmitterOptions::default(),
    )
    .expect_err("number argument");
    assert!(matches!(
        &error,
        GenerateError::ArgumentNotString { found: "number", attribute, .. } if attribute == "Description"
    ));
    assert_eq!(error.code(), 5002);
    assert_eq!(error.to_diagnostic("emitter.cs").code, 5002);
}

#[test]
fn test_named_arguments_do_not_count() {
    let text = emit(r#"namespace N { enum E { [Description("a", Extra = 1)] A } }"#);
    assert!(text.contains("return \"a\";"));
}

// =============================================================================
// IR
// =============================================================================

#[test]
fn test_build_ir_shape() {
    let resolved = resolve(r#"namespace N { enum E { [Description("a")] A } }"#);
    let unit = ExtensionEmitter::new(EmitterOptions::default())
        .build(&resolved, None)
        .expect("builds");
    let IRNode::CompilationUnit(members) = unit else {
        panic!("expected compilation unit");
    };
    let [IRNode::ClassDeclaration { modifiers, name, members }] = members.as_slice() else {
        panic!("expected a single class: {members:?}");
    };
    assert_eq!(modifiers, &vec!["internal", "static"]);
    assert_eq!(name, "EExtensions");
    let [IRNode::MethodDeclaration { body, .. }] = members.as_slice() else {
        panic!("expected a single method");
    };
    let [IRNode::SwitchStatement { cases, .. }] = body.as_slice() else {
        panic!("expected a switch body");
    };
    assert_eq!(cases.len(), 2);
    assert!(cases[1].is_default());
}
