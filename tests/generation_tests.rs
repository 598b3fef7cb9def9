//! End-to-end generation over parsed sources.

use descgen::common::diagnostics::diagnostic_codes;
use descgen::common::{AttributeMatch, NewLineKind};
use descgen::emitter::PrinterOptions;
use descgen::{GenerationResult, Generator, GeneratorOptions, generate_all, parse_sources};

fn inputs(files: &[(&str, &str)]) -> Vec<(String, String)> {
    files
        .iter()
        .map(|(name, text)| ((*name).to_string(), (*text).to_string()))
        .collect()
}

fn run_with(files: &[(&str, &str)], options: GeneratorOptions) -> GenerationResult {
    let (parsed, diagnostics) = parse_sources(&inputs(files), options.parallel);
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    generate_all(&parsed, options)
}

fn run(files: &[(&str, &str)]) -> GenerationResult {
    run_with(files, GeneratorOptions::default())
}

fn codes(result: &GenerationResult) -> Vec<u32> {
    result.diagnostics.iter().map(|d| d.code).collect()
}

const COLOR: &str = r#"
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
"#;

#[test]
fn described_enum_gets_extension_class() {
    let result = run(&[("Color.cs", COLOR)]);
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    assert_eq!(result.sources.len(), 1);

    let source = result.sources.get("Color_Extensions_Class").expect("generated");
    assert_eq!(source.enum_name, "Color");
    assert_eq!(source.origin, "Color.cs");
    let expected = [
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
    ]
    .join("\n");
    assert_eq!(source.text, expected);
}

#[test]
fn undescribed_enum_generates_nothing() {
    let result = run(&[("Status.cs", "namespace N { enum Status { Active, Inactive } }")]);
    assert!(result.sources.is_empty());
    assert!(result.diagnostics.is_empty());
}

#[test]
fn partially_described_enum_generates_nothing() {
    let result = run(&[(
        "Status.cs",
        r#"namespace N { enum Status { [Description("On")] Active, Inactive } }"#,
    )]);
    assert!(result.sources.is_empty());
    assert!(result.diagnostics.is_empty());
}

#[test]
fn nested_enum_in_internal_class_is_internal() {
    let result = run(&[(
        "Outer.cs",
        r#"namespace N { internal class Outer { public enum E { [Description("a")] A } } }"#,
    )]);
    let source = result.sources.get("E_Extensions_Class").expect("generated");
    assert!(source.text.contains("    internal static class EExtensions\n"));
    assert!(source.text.contains("case Outer.E.A:"));
}

#[test]
fn sources_follow_file_then_document_order() {
    let result = run(&[
        (
            "A.cs",
            r#"namespace N { enum First { [Description("1")] A } class C { enum Second { [Description("2")] B } } }"#,
        ),
        ("B.cs", r#"enum Third { [Description("3")] C }"#),
    ]);
    let hints: Vec<&str> = result.sources.iter().map(|s| s.hint_name.as_str()).collect();
    assert_eq!(
        hints,
        vec![
            "First_Extensions_Class",
            "Second_Extensions_Class",
            "Third_Extensions_Class"
        ]
    );
}

#[test]
fn duplicate_hint_name_skips_later_enum() {
    let result = run(&[
        ("A.cs", r#"namespace A { enum Color { [Description("a")] X } }"#),
        ("B.cs", r#"namespace B { enum Color { [Description("b")] Y } }"#),
    ]);
    assert_eq!(result.sources.len(), 1);
    let kept = result.sources.get("Color_Extensions_Class").expect("first kept");
    assert!(kept.text.starts_with("namespace A\n"));

    assert_eq!(codes(&result), vec![diagnostic_codes::DUPLICATE_HINT_NAME]);
    let diagnostic = &result.diagnostics[0];
    assert_eq!(diagnostic.file, "B.cs");
    assert_eq!(diagnostic.start, 19);
    assert_eq!(diagnostic.length, 5);
    assert_eq!(
        diagnostic.message_text,
        "A generated source named 'Color_Extensions_Class' was already added; the companion for enum 'Color' is skipped."
    );
}

#[test]
fn failing_enum_does_not_stop_the_pass() {
    let result = run(&[(
        "Mixed.cs",
        r#"
        namespace N
        {
            enum Good { [Description("ok")] A }
            enum NotString { [Description(42)] A }
            enum Duplicate { [Description("x")] A, [Description("y")] A }
            enum AlsoGood { [Description("fine")] B }
        }
        "#,
    )]);
    let hints: Vec<&str> = result.sources.iter().map(|s| s.hint_name.as_str()).collect();
    assert_eq!(hints, vec!["Good_Extensions_Class", "AlsoGood_Extensions_Class"]);
    assert_eq!(
        codes(&result),
        vec![
            diagnostic_codes::DESCRIPTION_ARGUMENT_NOT_STRING,
            diagnostic_codes::ENUM_NOT_RESOLVED
        ]
    );
    assert!(result.diagnostics[1].message_text.starts_with("Enum 'Duplicate' could not be resolved:"));
}

#[test]
fn parallel_and_sequential_runs_match() {
    let mut text = String::from("namespace Bulk\n{\n");
    for i in 0..64 {
        text.push_str(&format!(
            "    public enum E{i} {{ [Description(\"first {i}\")] A, [Description(\"second {i}\")] B }}\n"
        ));
    }
    text.push_str("    enum Broken { [Description(1)] A }\n}\n");
    let files = [("Bulk.cs", text.as_str())];

    let parallel = run_with(&files, GeneratorOptions::default());
    let sequential = run_with(
        &files,
        GeneratorOptions {
            parallel: false,
            ..GeneratorOptions::default()
        },
    );

    assert_eq!(parallel.sources.len(), 64);
    let texts = |result: &GenerationResult| -> Vec<(String, String)> {
        result
            .sources
            .iter()
            .map(|s| (s.hint_name.clone(), s.text.clone()))
            .collect()
    };
    assert_eq!(texts(&parallel), texts(&sequential));
    assert_eq!(parallel.diagnostics, sequential.diagnostics);
}

#[test]
fn options_reach_the_emitter() {
    let options = GeneratorOptions {
        attribute_match: AttributeMatch::Normalized,
        printer: PrinterOptions {
            new_line: NewLineKind::CarriageReturnLineFeed,
        },
        parallel: false,
    };
    let result = run_with(
        &[(
            "E.cs",
            r#"namespace N { enum E { [System.ComponentModel.DescriptionAttribute("q")] A } }"#,
        )],
        options,
    );
    let source = result.sources.get("E_Extensions_Class").expect("generated");
    assert!(source.text.starts_with("namespace N\r\n{\r\n"));
    assert!(source.text.contains("return \"q\";"));

    let exact = run(&[(
        "E.cs",
        r#"namespace N { enum E { [System.ComponentModel.DescriptionAttribute("q")] A } }"#,
    )]);
    assert!(exact.sources.is_empty());
}

#[test]
fn parse_errors_are_reported_and_recovered_enums_generated() {
    let (parsed, diagnostics) = parse_sources(
        &inputs(&[("Broken.cs", r#"namespace N { enum E { [Description("a")] A }"#)]),
        false,
    );
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].file, "Broken.cs");
    assert_eq!(diagnostics[0].code, diagnostic_codes::EXPECTED);

    let result = Generator::new(GeneratorOptions::default()).run(&parsed);
    assert!(result.sources.contains("E_Extensions_Class"));
}
