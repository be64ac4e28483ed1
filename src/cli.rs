//! Command-line interface for webtidy.
//!
//! Defines CLI arguments using clap builder API

use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};

use crate::process::Language;

/// CLI arguments parsed from command line
#[derive(Debug, Clone)]
pub struct CliArgs {
    /// Files or directories to process
    pub inputs: Vec<PathBuf>,

    /// Number of spaces per indent level
    pub indent: Option<usize>,

    /// Minify instead of pretty-printing
    pub minify: bool,

    /// Force the input language (otherwise detected from the extension)
    pub language: Option<Language>,

    /// Compact stylesheet output instead of indentation
    pub compact: bool,

    /// Strip comments
    pub remove_comments: bool,

    /// Lexically sort declarations inside each rule block
    pub sort_properties: bool,

    /// Drop lines that trim to nothing (markup format mode)
    pub remove_empty_lines: bool,

    /// Strip inline `style="..."` attributes (markup format mode)
    pub remove_inline_styles: bool,

    /// Keep whitespace in minify mode (disable the collapse step)
    pub keep_whitespace: bool,

    /// Rewrite `attr="attr"` as bare `attr` (markup minify mode)
    pub collapse_boolean_attributes: bool,

    /// Normalize any doctype to `<!DOCTYPE html>` (markup minify mode)
    pub shorten_doctype: bool,

    /// Drop `<html>`, `<head>`, `<body>` tags (markup minify mode)
    pub remove_optional_tags: bool,

    /// Output to stdout instead of in-place
    pub stdout: bool,

    /// Config file path
    pub config: Option<PathBuf>,

    /// Recursive directory processing
    pub recursive: bool,

    /// Silent mode (no output)
    pub silent: bool,

    /// Number of parallel jobs (0 = auto, 1 = sequential)
    pub jobs: Option<usize>,

    /// Exclude patterns for files/directories (glob patterns)
    pub exclude: Vec<String>,

    /// Enable debug output
    pub debug: bool,
}

/// Build the clap Command for parsing CLI arguments
#[must_use]
pub fn build_cli() -> Command {
    Command::new("webtidy")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Fred Jones")
        .about("Formatter and minifier for CSS and HTML")
        .arg(
            Arg::new("inputs")
                .help("Files or directories to process")
                .value_name("FILE")
                .num_args(1..)
                .required(false)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("indent")
                .short('i')
                .long("indent")
                .help("Number of spaces per indent level [default: 2]")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("minify")
                .short('m')
                .long("minify")
                .help("Minify instead of pretty-printing")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("language")
                .short('L')
                .long("language")
                .help("Force input language: css or html (otherwise from extension)")
                .value_name("LANG")
                .value_parser(["css", "html"]),
        )
        .arg(
            Arg::new("compact")
                .long("compact")
                .help("Compact stylesheet output instead of indentation")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("remove-comments")
                .long("remove-comments")
                .help("Strip /* ... */ or <!-- ... --> comments")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("sort-properties")
                .long("sort-properties")
                .help("Lexically sort declarations inside each CSS rule block")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("remove-empty-lines")
                .long("remove-empty-lines")
                .help("Drop lines that trim to nothing (HTML format mode)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("remove-inline-styles")
                .long("remove-inline-styles")
                .help("Strip inline style=\"...\" attributes (HTML format mode)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("keep-whitespace")
                .long("keep-whitespace")
                .help("Keep whitespace in minify mode (disable the collapse step)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("collapse-boolean-attributes")
                .long("collapse-boolean-attributes")
                .help("Rewrite attr=\"attr\" as bare attr (HTML minify mode)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("shorten-doctype")
                .long("shorten-doctype")
                .help("Normalize any doctype to <!DOCTYPE html> (HTML minify mode)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("remove-optional-tags")
                .long("remove-optional-tags")
                .help("Drop <html>, <head>, <body> tags (HTML minify mode, lossy)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("stdout")
                .short('s')
                .long("stdout")
                .help("Output to stdout instead of rewriting files in place")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Config file path (overrides auto-discovery)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("recursive")
                .short('r')
                .long("recursive")
                .help("Process directories recursively")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .help("Exclude files/dirs matching pattern (repeatable)")
                .value_name("PATTERN")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("jobs")
                .short('j')
                .long("jobs")
                .help("Parallel jobs (0=auto, 1=sequential)")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("silent")
                .short('S')
                .long("silent")
                .help("Silent mode")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("debug")
                .short('D')
                .long("debug")
                .help("Enable debug output")
                .action(ArgAction::SetTrue),
        )
}

/// Parse CLI arguments from the process command line
#[must_use]
pub fn parse_args() -> CliArgs {
    args_from_matches(&build_cli().get_matches())
}

/// Parse CLI arguments from an explicit iterator (used by tests)
pub fn parse_args_from<I, T>(args: I) -> CliArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    args_from_matches(&build_cli().get_matches_from(args))
}

/// Convert clap `ArgMatches` to `CliArgs`
fn args_from_matches(matches: &clap::ArgMatches) -> CliArgs {
    let language = matches
        .get_one::<String>("language")
        .and_then(|lang| Language::from_extension(lang));

    CliArgs {
        inputs: matches
            .get_many::<PathBuf>("inputs")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        indent: matches.get_one::<usize>("indent").copied(),
        minify: matches.get_flag("minify"),
        language,
        compact: matches.get_flag("compact"),
        remove_comments: matches.get_flag("remove-comments"),
        sort_properties: matches.get_flag("sort-properties"),
        remove_empty_lines: matches.get_flag("remove-empty-lines"),
        remove_inline_styles: matches.get_flag("remove-inline-styles"),
        keep_whitespace: matches.get_flag("keep-whitespace"),
        collapse_boolean_attributes: matches.get_flag("collapse-boolean-attributes"),
        shorten_doctype: matches.get_flag("shorten-doctype"),
        remove_optional_tags: matches.get_flag("remove-optional-tags"),
        stdout: matches.get_flag("stdout"),
        config: matches.get_one::<PathBuf>("config").cloned(),
        recursive: matches.get_flag("recursive"),
        exclude: matches
            .get_many::<String>("exclude")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        debug: matches.get_flag("debug"),
        silent: matches.get_flag("silent"),
        jobs: matches.get_one::<usize>("jobs").copied(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_builds() {
        let cmd = build_cli();
        // Just verify it builds without panic
        assert_eq!(cmd.get_name(), "webtidy");
    }

    #[test]
    fn test_cli_defaults() {
        let cmd = build_cli();
        let matches = cmd.try_get_matches_from(vec!["webtidy"]).unwrap();

        assert!(matches.get_many::<PathBuf>("inputs").is_none());
        assert!(!matches.get_flag("minify"));
        assert!(!matches.get_flag("stdout"));
    }

    #[test]
    fn test_minify_flag() {
        let args = parse_args_from(vec!["webtidy", "-m", "style.css"]);
        assert!(args.minify);
    }

    #[test]
    fn test_language_option() {
        let args = parse_args_from(vec!["webtidy", "-L", "html", "-"]);
        assert_eq!(args.language, Some(Language::Html));

        let args = parse_args_from(vec!["webtidy", "--language", "css", "-"]);
        assert_eq!(args.language, Some(Language::Css));
    }

    #[test]
    fn test_language_not_set() {
        let args = parse_args_from(vec!["webtidy", "style.css"]);
        assert_eq!(args.language, None);
    }

    #[test]
    fn test_indent_option() {
        let args = parse_args_from(vec!["webtidy", "-i", "4", "style.css"]);
        assert_eq!(args.indent, Some(4));
    }

    #[test]
    fn test_indent_not_set() {
        let args = parse_args_from(vec!["webtidy", "style.css"]);
        assert_eq!(args.indent, None);
    }

    #[test]
    fn test_option_flags() {
        let args = parse_args_from(vec![
            "webtidy",
            "--remove-comments",
            "--sort-properties",
            "--keep-whitespace",
            "style.css",
        ]);
        assert!(args.remove_comments);
        assert!(args.sort_properties);
        assert!(args.keep_whitespace);
        assert!(!args.compact);
        assert!(!args.shorten_doctype);
    }

    #[test]
    fn test_exclude_single() {
        let args = parse_args_from(vec!["webtidy", "-r", "-e", "*.min.css", "assets/"]);
        assert_eq!(args.exclude, vec!["*.min.css"]);
    }

    #[test]
    fn test_exclude_multiple() {
        let args = parse_args_from(vec![
            "webtidy",
            "-r",
            "-e",
            "*.min.css",
            "--exclude",
            "dist*",
            "-e",
            "vendor",
            "assets/",
        ]);
        assert_eq!(args.exclude, vec!["*.min.css", "dist*", "vendor"]);
    }

    #[test]
    fn test_exclude_empty() {
        let args = parse_args_from(vec!["webtidy", "style.css"]);
        assert!(args.exclude.is_empty());
    }

    #[test]
    fn test_debug_flag() {
        let args = parse_args_from(vec!["webtidy", "-D", "style.css"]);
        assert!(args.debug);
    }

    #[test]
    fn test_debug_not_set() {
        let args = parse_args_from(vec!["webtidy", "style.css"]);
        assert!(!args.debug);
    }

    #[test]
    fn test_jobs_option() {
        let args = parse_args_from(vec!["webtidy", "-j", "1", "style.css"]);
        assert_eq!(args.jobs, Some(1));
    }
}
