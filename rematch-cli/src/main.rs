mod tree;

use anyhow::Context;
use clap::{arg, command, crate_authors, Command};
use log::LevelFilter;
use rematch::Regex;
use std::io;

fn cli() -> Command {
    command!()
        .author(crate_authors!("\n")) // requires `cargo` feature
        .arg_required_else_help(true)
        .arg(arg!(--debug "Log what the engine is doing"))
        .arg(arg!(--tree "Print the expression tree of the pattern"))
        .arg(arg!(--dot "Print the automaton of the pattern in graphviz format"))
        .arg(arg!(<PATTERN> "Pattern the strings are matched against"))
        .arg(arg!(<STRINGS> ... "Strings to match"))
}

/// One line per subject, right-aligned to the longest one.
fn report<'a>(regex: &Regex, subjects: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let subjects: Vec<_> = subjects.into_iter().collect();
    let width = subjects
        .iter()
        .map(|s| s.chars().count())
        .max()
        .unwrap_or(0);

    subjects
        .into_iter()
        .map(|s| format!("{s:>width$}: {}", regex.matches(s)))
        .collect()
}

fn main() -> anyhow::Result<()> {
    let args = cli().get_matches();

    let mut logger = env_logger::Builder::from_default_env();
    if args.get_flag("debug") {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    let pattern = args
        .get_one::<String>("PATTERN")
        .context("no pattern given")?;

    let regex =
        Regex::new(pattern).with_context(|| format!("can not compile `{pattern}`"))?;

    if args.get_flag("tree") {
        let ast = rematch::parse(pattern)?;
        let mut output = String::new();
        ascii_tree::write_tree(&mut output, &tree::ast_ascii_tree(&ast))?;
        println!("{output}");
    }

    if args.get_flag("dot") {
        regex.output_dot(&mut io::stdout().lock())?;
    }

    let subjects = args
        .get_many::<String>("STRINGS")
        .into_iter()
        .flatten()
        .map(String::as_str);

    for line in report(&regex, subjects) {
        println!("{line}");
    }

    Ok(())
}
