#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{IsTerminal, Write};

use descgen::cli::args::CliArgs;
use descgen::cli::{driver, reporter::Reporter};

fn main() -> Result<()> {
    // DESCGEN_LOG / DESCGEN_LOG_FORMAT, see src/tracing_config.rs
    descgen::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;

    let outcome = driver::run(&args, &cwd)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if args.list_candidates {
        for candidate in &outcome.candidates {
            writeln!(out, "{candidate}")?;
        }
    } else if !outcome.has_out_dir {
        for (index, source) in outcome.sources.iter().enumerate() {
            if index > 0 {
                writeln!(out)?;
            }
            writeln!(out, "// {}.cs", source.hint_name)?;
            writeln!(out, "{}", source.text)?;
        }
    }
    out.flush()?;

    if !outcome.diagnostics.is_empty() {
        let terminal = std::io::stderr().is_terminal();
        let mut reporter = Reporter::new(args.pretty || terminal, terminal);
        for (file_name, text) in &outcome.inputs {
            reporter.add_source(file_name.as_str(), text.as_str());
        }
        eprintln!("{}", reporter.render(&outcome.diagnostics));
        let errors = outcome.diagnostics.len();
        eprintln!(
            "\nFound {errors} error{}.",
            if errors == 1 { "" } else { "s" }
        );
    }

    std::process::exit(outcome.exit_code());
}
