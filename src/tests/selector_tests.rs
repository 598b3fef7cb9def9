use super::*;
use descgen_common::AttributeMatch;
use descgen_parser::{SourceFile, parse_source};

fn parse(text: &str) -> SourceFile {
    let (file, diagnostics) = parse_source("selector.cs", text);
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    file
}

fn selected(text: &str, attribute_match: AttributeMatch) -> Vec<String> {
    let file = parse(text);
    find_qualifying_enums(file.enum_sites(), attribute_match)
        .iter()
        .map(|site| site.name().to_string())
        .collect()
}

fn exact(text: &str) -> Vec<String> {
    selected(text, AttributeMatch::Exact)
}

#[test]
fn test_fully_described_enum_qualifies() {
    assert_eq!(
        exact(r#"enum Color { [Description("Bright Red")] Red, [Description("Deep Blue")] Blue }"#),
        vec!["Color"]
    );
}

#[test]
fn test_partially_described_enum_is_skipped() {
    assert!(exact(r#"enum Status { [Description("On")] Active, Inactive }"#).is_empty());
    assert!(exact("enum Status { Active, Inactive }").is_empty());
}

#[test]
fn test_empty_enum_qualifies() {
    assert_eq!(exact("enum Empty { }"), vec!["Empty"]);
}

#[test]
fn test_argument_count_must_be_one() {
    assert!(exact(r#"enum E { [Description("a", "b")] A }"#).is_empty());
    assert!(exact("enum E { [Description()] A }").is_empty());
    assert!(exact("enum E { [Description] A }").is_empty());
    // A named argument counts as the single argument
    assert_eq!(exact(r#"enum E { [Description(Text = "a")] A }"#), vec!["E"]);
}

#[test]
fn test_any_matching_attribute_covers_member() {
    let source = r#"enum E
    {
        [Obsolete] [Description("a")] A,
        [Browsable(false), Description("b")] B,
        [Description("x", "y"), Description("c")] C,
    }"#;
    assert_eq!(exact(source), vec!["E"]);
}

#[test]
fn test_selection_keeps_document_order() {
    let source = r#"
        namespace N
        {
            enum First { [Description("1")] A }
            class Holder
            {
                enum Nested { [Description("2")] B }
            }
            enum Skipped { C }
        }
        enum Last { [Description("3")] D }
    "#;
    assert_eq!(exact(source), vec!["First", "Nested", "Last"]);
}

#[test]
fn test_exact_matching_compares_written_name() {
    let source = r#"
        enum Suffixed { [DescriptionAttribute("a")] A }
        enum Qualified { [System.ComponentModel.Description("b")] B }
        enum Lower { [description("c")] C }
    "#;
    assert!(exact(source).is_empty());
}

#[test]
fn test_normalized_matching_unifies_spellings() {
    let source = r#"
        enum Suffixed { [DescriptionAttribute("a")] A }
        enum Qualified { [System.ComponentModel.Description("b")] B }
        enum Global { [global::System.ComponentModel.DescriptionAttribute("c")] C }
        enum Other { [Display("d")] D }
    "#;
    assert_eq!(
        selected(source, AttributeMatch::Normalized),
        vec!["Suffixed", "Qualified", "Global"]
    );
}

#[test]
fn test_is_described_enum_on_declaration() {
    let file = parse(r#"enum E { [Description("a")] A } enum F { B }"#);
    let sites = file.enum_sites();
    assert!(is_described_enum(sites[0].declaration, AttributeMatch::Exact));
    assert!(!is_described_enum(sites[1].declaration, AttributeMatch::Exact));
}
