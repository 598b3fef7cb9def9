use clap::Parser;
use std::path::Path;

use super::args::CliArgs;
use super::config::{
    DEFAULT_EXCLUDE, DEFAULT_INCLUDE, DescgenConfig, find_config_path, load_config,
    parse_attribute_match, parse_config, parse_new_line, resolve_config,
};
use descgen_common::{AttributeMatch, NewLineKind};

fn args(argv: &[&str]) -> CliArgs {
    let mut full = vec!["descgen"];
    full.extend_from_slice(argv);
    CliArgs::try_parse_from(full).expect("args parse")
}

#[test]
fn parses_all_fields() {
    let config = parse_config(
        r#"{
            "include": ["src/**/*.cs"],
            "exclude": ["**/obj/**"],
            "files": ["Extra.cs"],
            "outDir": "generated",
            "newLine": "crlf",
            "attributeMatch": "normalized",
            "parallel": false
        }"#,
    )
    .expect("config parses");

    assert_eq!(config.include, Some(vec!["src/**/*.cs".to_string()]));
    assert_eq!(config.exclude, Some(vec!["**/obj/**".to_string()]));
    assert_eq!(config.files, Some(vec!["Extra.cs".to_string()]));
    assert_eq!(config.out_dir.as_deref(), Some("generated"));
    assert_eq!(config.new_line.as_deref(), Some("crlf"));
    assert_eq!(config.attribute_match.as_deref(), Some("normalized"));
    assert_eq!(config.parallel, Some(false));
}

#[test]
fn accepts_comments_and_trailing_commas() {
    let config = parse_config(
        r#"{
            // where sources live
            "include": ["src/**/*.cs", ],
            /* "outDir": "ignored", */
            "parallel": "true",
        }"#,
    )
    .expect("config parses");

    assert_eq!(config.include, Some(vec!["src/**/*.cs".to_string()]));
    assert_eq!(config.out_dir, None);
    assert_eq!(config.parallel, Some(true));
}

#[test]
fn keeps_comment_markers_inside_strings() {
    let config = parse_config(r#"{ "outDir": "out//gen/*x*/", }"#).expect("config parses");
    assert_eq!(config.out_dir.as_deref(), Some("out//gen/*x*/"));
}

#[test]
fn rejects_unknown_fields_and_bad_booleans() {
    assert!(parse_config(r#"{ "outdir": "x" }"#).is_err());
    assert!(parse_config(r#"{ "parallel": "maybe" }"#).is_err());
}

#[test]
fn parses_option_values() {
    assert_eq!(parse_new_line("LF").expect("lf"), NewLineKind::LineFeed);
    assert_eq!(
        parse_new_line("crlf").expect("crlf"),
        NewLineKind::CarriageReturnLineFeed
    );
    assert!(parse_new_line("cr").is_err());
    assert_eq!(
        parse_attribute_match("Normalized").expect("normalized"),
        AttributeMatch::Normalized
    );
    assert!(parse_attribute_match("loose").is_err());
}

#[test]
fn resolves_defaults_without_config() {
    let cwd = Path::new("/work");
    let resolved = resolve_config(None, cwd, cwd, &args(&[])).expect("resolves");

    assert_eq!(resolved.base_dir, cwd);
    assert!(resolved.inputs.is_empty());
    assert_eq!(resolved.include, DEFAULT_INCLUDE);
    assert_eq!(resolved.exclude, DEFAULT_EXCLUDE);
    assert_eq!(resolved.out_dir, None);
    assert_eq!(resolved.generator.attribute_match, AttributeMatch::Exact);
    assert_eq!(resolved.generator.printer.new_line, NewLineKind::LineFeed);
    assert!(resolved.generator.parallel);
}

#[test]
fn command_line_overrides_config() {
    let config = DescgenConfig {
        files: Some(vec!["A.cs".to_string()]),
        out_dir: Some("generated".to_string()),
        new_line: Some("crlf".to_string()),
        attribute_match: Some("normalized".to_string()),
        parallel: Some(true),
        ..DescgenConfig::default()
    };
    let base_dir = Path::new("/work/project");
    let cwd = Path::new("/work");

    let from_file = resolve_config(Some(&config), base_dir, cwd, &args(&[])).expect("resolves");
    assert_eq!(from_file.inputs, vec![base_dir.join("A.cs")]);
    assert_eq!(from_file.out_dir, Some(base_dir.join("generated")));
    assert_eq!(
        from_file.generator.printer.new_line,
        NewLineKind::CarriageReturnLineFeed
    );
    assert_eq!(from_file.generator.attribute_match, AttributeMatch::Normalized);

    let overridden = resolve_config(
        Some(&config),
        base_dir,
        cwd,
        &args(&[
            "--outDir",
            "out",
            "--newLine",
            "lf",
            "--attributeMatch",
            "exact",
            "--noParallel",
            "B.cs",
        ]),
    )
    .expect("resolves");
    assert_eq!(overridden.inputs, vec![cwd.join("B.cs")]);
    assert_eq!(overridden.out_dir, Some(cwd.join("out")));
    assert_eq!(overridden.generator.printer.new_line, NewLineKind::LineFeed);
    assert_eq!(overridden.generator.attribute_match, AttributeMatch::Exact);
    assert!(!overridden.generator.parallel);
}

#[test]
fn invalid_config_values_are_errors() {
    let config = DescgenConfig {
        new_line: Some("cr".to_string()),
        ..DescgenConfig::default()
    };
    let cwd = Path::new("/work");
    assert!(resolve_config(Some(&config), cwd, cwd, &args(&[])).is_err());
}

#[test]
fn finds_and_loads_config_files() {
    let dir = tempfile::tempdir().expect("temp dir");
    let root = dir.path();
    assert_eq!(find_config_path(root, None).expect("no config"), None);

    let path = root.join("descgen.json");
    std::fs::write(&path, r#"{ "outDir": "gen" }"#).expect("write config");

    assert_eq!(
        find_config_path(root, None).expect("config"),
        Some(path.clone())
    );
    assert_eq!(
        find_config_path(root, Some(Path::new("."))).expect("directory"),
        Some(root.join(".").join("descgen.json"))
    );
    assert_eq!(
        find_config_path(root, Some(Path::new("descgen.json"))).expect("file"),
        Some(path.clone())
    );
    assert!(find_config_path(root, Some(Path::new("missing.json"))).is_err());

    let config = load_config(&path).expect("loads");
    assert_eq!(config.out_dir.as_deref(), Some("gen"));
}
