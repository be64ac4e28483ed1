//! webtidy - Formatter and minifier for CSS and HTML

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::fs::File;
use std::io::{self, BufReader, Cursor, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use glob::Pattern;
use rayon::prelude::*;
use walkdir::WalkDir;
use webtidy::process::{format_file, Language, Mode};
use webtidy::{compute_stats, find_directive, parse_args, CliArgs, Config, Result};

/// File extensions to process
const SUPPORTED_EXTENSIONS: &[&str] = &["css", "html", "htm", "CSS", "HTML", "HTM"];

/// Default maximum file size in bytes (100 MB)
/// Files larger than this are skipped to prevent memory exhaustion
const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

fn main() -> Result<()> {
    // Parse CLI arguments
    let args = parse_args();

    // Check if we should read from stdin
    let use_stdin =
        args.inputs.is_empty() || (args.inputs.len() == 1 && args.inputs[0].as_os_str() == "-");

    // If no inputs and running interactively, print usage; otherwise read from stdin
    if args.inputs.is_empty() && io::stdin().is_terminal() {
        print_usage();
        return Ok(());
    }

    if use_stdin {
        // Process stdin - use current directory for config discovery
        let config = build_config(&args, None)?;
        return process_stdin(&config, &args);
    }

    // Build base configuration for parallel processing
    // For explicit config files, we use one config for all files
    // For auto-discovery, each file may have its own config
    let use_per_file_config = args.config.is_none();
    let base_config = if use_per_file_config {
        None
    } else {
        Some(build_config(&args, None)?)
    };

    // Configure thread pool if --jobs specified
    if let Some(jobs) = args.jobs {
        if jobs > 0 {
            if let Err(e) = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build_global()
            {
                eprintln!("Warning: failed to configure thread pool: {e}");
            }
        }
    }

    // Collect all files to process
    let files = collect_files(&args);

    if files.is_empty() {
        if !args.silent {
            eprintln!("No CSS or HTML files found to process.");
        }
        return Ok(());
    }

    // Process files
    let use_sequential = args.stdout || args.jobs == Some(1);
    if use_sequential {
        // Sequential processing for stdout or --jobs 1
        process_files_sequential(&files, base_config.as_ref(), &args);
    } else {
        // Parallel processing for in-place rewriting
        process_files_parallel(&files, base_config.as_ref(), &args);
    }

    Ok(())
}

/// Build configuration from CLI args and optional config file
///
/// If `for_path` is provided and no explicit config file is specified,
/// uses auto-discovery to find config files in parent directories.
fn build_config(args: &CliArgs, for_path: Option<&Path>) -> Result<Config> {
    let mut config = if let Some(config_path) = &args.config {
        // Explicit config file specified
        if args.debug {
            eprintln!(
                "[DEBUG] Using explicit config file: {}",
                config_path.display()
            );
        }
        Config::from_toml_file(config_path)?
    } else if let Some(path) = for_path {
        // Auto-discover config files from parent directories
        if args.debug {
            let discovered = Config::discover_config_files(path);
            if discovered.is_empty() {
                eprintln!("[DEBUG] No config files discovered for: {}", path.display());
            } else {
                eprintln!("[DEBUG] Discovered config files for {}:", path.display());
                for f in &discovered {
                    eprintln!("[DEBUG]   - {}", f.display());
                }
            }
        }
        Config::from_discovered_files(path)
    } else {
        // No path provided, use current directory for discovery
        Config::from_discovered_files(&std::env::current_dir().unwrap_or_default())
    };

    // Override with CLI arguments
    if let Some(indent) = args.indent {
        config.indent = indent;
    }
    if args.compact {
        config.compact = true;
    }
    if args.remove_comments {
        config.remove_comments = true;
    }
    if args.sort_properties {
        config.sort_properties = true;
    }
    if args.remove_empty_lines {
        config.remove_empty_lines = true;
    }
    if args.remove_inline_styles {
        config.remove_inline_styles = true;
    }
    if args.keep_whitespace {
        config.remove_whitespace = false;
    }
    if args.collapse_boolean_attributes {
        config.collapse_boolean_attributes = true;
    }
    if args.shorten_doctype {
        config.shorten_doctype = true;
    }
    if args.remove_optional_tags {
        config.remove_optional_tags = true;
    }

    // Print final config in debug mode
    if args.debug {
        print_config_debug(&config);
    }

    // Validate configuration
    if let Some(error) = config.validate() {
        anyhow::bail!("Invalid configuration: {error}");
    }

    Ok(config)
}

/// Print configuration values in debug mode
fn print_config_debug(config: &Config) {
    eprintln!("[DEBUG] Configuration:");
    eprintln!("[DEBUG]   indent: {}", config.indent);
    eprintln!("[DEBUG]   compact: {}", config.compact);
    eprintln!("[DEBUG]   remove_comments: {}", config.remove_comments);
    eprintln!("[DEBUG]   sort_properties: {}", config.sort_properties);
    eprintln!("[DEBUG]   remove_empty_lines: {}", config.remove_empty_lines);
    eprintln!(
        "[DEBUG]   remove_inline_styles: {}",
        config.remove_inline_styles
    );
    eprintln!("[DEBUG]   remove_whitespace: {}", config.remove_whitespace);
    eprintln!(
        "[DEBUG]   collapse_boolean_attributes: {}",
        config.collapse_boolean_attributes
    );
    eprintln!("[DEBUG]   shorten_doctype: {}", config.shorten_doctype);
    eprintln!(
        "[DEBUG]   remove_optional_tags: {}",
        config.remove_optional_tags
    );
}

/// Collect all files to process, handling directories and recursive flag
fn collect_files(args: &CliArgs) -> Vec<PathBuf> {
    // Compile exclude patterns
    let exclude_patterns: Vec<Pattern> = args
        .exclude
        .iter()
        .filter_map(|p| Pattern::new(p).ok())
        .collect();

    let mut files = Vec::new();

    for input in &args.inputs {
        if input.is_file() {
            if !is_excluded(input, &exclude_patterns) {
                files.push(input.clone());
            }
        } else if input.is_dir() {
            if args.recursive {
                // Recursive directory traversal
                // Note: WalkDir detects symlink loops when follow_links(true) and
                // returns errors for them. We skip errors via filter_map(ok).
                // max_depth prevents runaway traversal in pathological directory structures.
                for entry in WalkDir::new(input)
                    .follow_links(true)
                    .max_depth(256)
                    .into_iter()
                    .filter_map(std::result::Result::ok)
                {
                    let path = entry.path();
                    if path.is_file()
                        && is_supported_file(path)
                        && !is_excluded(path, &exclude_patterns)
                    {
                        files.push(path.to_path_buf());
                    }
                }
            } else {
                // Non-recursive: only direct children
                if let Ok(entries) = std::fs::read_dir(input) {
                    for entry in entries.filter_map(std::result::Result::ok) {
                        let path = entry.path();
                        if path.is_file()
                            && is_supported_file(&path)
                            && !is_excluded(&path, &exclude_patterns)
                        {
                            files.push(path);
                        }
                    }
                }
            }
        }
    }

    files
}

/// Check if a path matches any exclusion pattern
fn is_excluded(path: &Path, patterns: &[Pattern]) -> bool {
    if patterns.is_empty() {
        return false;
    }

    let path_str = path.to_string_lossy();

    for pattern in patterns {
        // Match against full path
        if pattern.matches(&path_str) {
            return true;
        }

        // Match against file name only
        if let Some(file_name) = path.file_name() {
            if pattern.matches(&file_name.to_string_lossy()) {
                return true;
            }
        }

        // Match against each path component (for directory patterns)
        for component in path.components() {
            if let std::path::Component::Normal(c) = component {
                if pattern.matches(&c.to_string_lossy()) {
                    return true;
                }
            }
        }
    }

    false
}

/// Check if a file has a supported extension
fn is_supported_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
}

/// Determine the language for a file from CLI override or extension
fn detect_language(path: &Path, args: &CliArgs) -> Option<Language> {
    if let Some(language) = args.language {
        return Some(language);
    }
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(Language::from_extension)
}

/// Process files sequentially (for stdout output)
fn process_files_sequential(files: &[PathBuf], base_config: Option<&Config>, args: &CliArgs) {
    for path in files {
        // Use base config if provided, otherwise discover per-file config
        let file_result = if let Some(config) = base_config {
            process_single_file(path, config, args)
        } else {
            match build_config(args, Some(path)) {
                Ok(config) => process_single_file(path, &config, args),
                Err(e) => Err(e),
            }
        };

        if let Err(e) = file_result {
            eprintln!("Error processing {}: {}", path.display(), e);
        }
    }
}

/// Process files in parallel using Rayon
fn process_files_parallel(files: &[PathBuf], base_config: Option<&Config>, args: &CliArgs) {
    let success_count = AtomicUsize::new(0);
    let error_count = AtomicUsize::new(0);

    files.par_iter().for_each(|path| {
        // Use base config if provided, otherwise discover per-file config
        let file_result = if let Some(config) = base_config {
            process_single_file(path, config, args)
        } else {
            match build_config(args, Some(path)) {
                Ok(config) => process_single_file(path, &config, args),
                Err(e) => Err(e),
            }
        };

        match file_result {
            Ok(()) => {
                success_count.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                error_count.fetch_add(1, Ordering::Relaxed);
                eprintln!("Error processing {}: {}", path.display(), e);
            }
        }
    });

    let success = success_count.load(Ordering::Relaxed);
    let errors = error_count.load(Ordering::Relaxed);

    if !args.silent {
        if errors == 0 {
            eprintln!("Processed {success} files successfully.");
        } else {
            eprintln!("Processed {success} files, {errors} errors.");
        }
    }
}

/// Apply directive overrides from file contents to a configuration
fn apply_directive_overrides(config: &mut Config, contents: &[u8], debug: bool, source_name: &str) {
    let cursor = Cursor::new(contents);
    if let Some(overrides) = find_directive(&mut BufReader::new(cursor)) {
        if debug {
            eprintln!("[DEBUG] Found file directive in {source_name}");
        }
        if let Some(indent) = overrides.indent {
            if debug {
                eprintln!("[DEBUG]   Directive override: indent = {indent}");
            }
            config.indent = indent;
        }
        if let Some(compact) = overrides.compact {
            config.compact = compact;
        }
        if let Some(remove_comments) = overrides.remove_comments {
            config.remove_comments = remove_comments;
        }
        if let Some(sort_properties) = overrides.sort_properties {
            config.sort_properties = sort_properties;
        }
        if let Some(remove_empty_lines) = overrides.remove_empty_lines {
            config.remove_empty_lines = remove_empty_lines;
        }
        if let Some(remove_inline_styles) = overrides.remove_inline_styles {
            config.remove_inline_styles = remove_inline_styles;
        }
        if let Some(remove_whitespace) = overrides.remove_whitespace {
            config.remove_whitespace = remove_whitespace;
        }
        if let Some(collapse) = overrides.collapse_boolean_attributes {
            config.collapse_boolean_attributes = collapse;
        }
        if let Some(shorten_doctype) = overrides.shorten_doctype {
            config.shorten_doctype = shorten_doctype;
        }
        if let Some(remove_optional_tags) = overrides.remove_optional_tags {
            config.remove_optional_tags = remove_optional_tags;
        }
    }
}

/// Process a single file
fn process_single_file(path: &PathBuf, config: &Config, args: &CliArgs) -> Result<()> {
    let Some(language) = detect_language(path, args) else {
        if !args.silent {
            eprintln!("Skipping {} (unknown language)", path.display());
        }
        return Ok(());
    };
    let mode = if args.minify { Mode::Minify } else { Mode::Format };

    // Check file size BEFORE reading to prevent memory exhaustion
    let metadata = std::fs::metadata(path)?;
    let file_size = metadata.len();
    if file_size > DEFAULT_MAX_FILE_SIZE {
        if !args.silent {
            let size_mb = file_size / (1024 * 1024);
            let limit_mb = DEFAULT_MAX_FILE_SIZE / (1024 * 1024);
            eprintln!(
                "Skipping {} ({} MB exceeds limit of {} MB)",
                path.display(),
                size_mb,
                limit_mb
            );
        }
        return Ok(());
    }

    // Read input file into memory
    let mut file_contents = Vec::new();
    File::open(path)?.read_to_end(&mut file_contents)?;

    if !args.silent && !args.stdout {
        eprintln!("Processing: {}", path.display());
    }

    // Make a per-file copy of config that can be overridden by directives
    let mut file_config = config.clone();
    apply_directive_overrides(
        &mut file_config,
        &file_contents,
        args.debug,
        path.to_str().unwrap_or("unknown"),
    );

    // Run the pipeline
    let reader = BufReader::new(Cursor::new(&file_contents));
    let mut output = Vec::new();
    let result = format_file(reader, &mut output, &file_config, language, mode)?;

    // Report compression stats for minify mode
    if mode == Mode::Minify && !args.silent {
        let original = String::from_utf8_lossy(&file_contents);
        let stats = compute_stats(&original, &result);
        eprintln!(
            "{}: {} -> {} bytes ({}% smaller)",
            path.display(),
            stats.original_size,
            stats.result_size,
            stats.ratio_percent
        );
    }

    // Output results
    if args.stdout {
        io::stdout().write_all(&output)?;
    } else {
        // Write back to file (in-place)
        std::fs::write(path, &output)?;
    }

    Ok(())
}

/// Process input from stdin, output to stdout
fn process_stdin(config: &Config, args: &CliArgs) -> Result<()> {
    // Read all input from stdin
    let mut stdin_contents = Vec::new();
    io::stdin().read_to_end(&mut stdin_contents)?;

    // Check size after reading to prevent processing extremely large input
    #[allow(clippy::cast_possible_truncation)]
    let stdin_size = stdin_contents.len() as u64;
    if stdin_size > DEFAULT_MAX_FILE_SIZE {
        anyhow::bail!(
            "stdin input too large ({} MB exceeds limit of {} MB)",
            stdin_size / (1024 * 1024),
            DEFAULT_MAX_FILE_SIZE / (1024 * 1024)
        );
    }

    // Stdin has no extension to inspect; default to CSS unless --language is given
    let language = args.language.unwrap_or(Language::Css);
    let mode = if args.minify { Mode::Minify } else { Mode::Format };

    // Make a copy of config that can be overridden by directives
    let mut file_config = config.clone();
    apply_directive_overrides(&mut file_config, &stdin_contents, args.debug, "stdin");

    // Run the pipeline
    let reader = BufReader::new(Cursor::new(&stdin_contents));
    let mut output = Vec::new();
    let result = format_file(reader, &mut output, &file_config, language, mode)?;

    // Always output to stdout when reading from stdin
    io::stdout().write_all(&output)?;

    if mode == Mode::Minify && !args.silent {
        let original = String::from_utf8_lossy(&stdin_contents);
        let stats = compute_stats(&original, &result);
        eprintln!(
            "stdin: {} -> {} bytes ({}% smaller)",
            stats.original_size, stats.result_size, stats.ratio_percent
        );
    }

    Ok(())
}

fn print_usage() {
    println!(
        "webtidy v{} - CSS and HTML formatter/minifier",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("A fast stylesheet and markup reformatter written in Rust.");
    println!();
    println!("Usage:");
    println!("  webtidy [OPTIONS] <FILE>...");
    println!("  webtidy [OPTIONS] -r <DIRECTORY>");
    println!("  webtidy [OPTIONS] -              # Read from stdin");
    println!("  cat style.css | webtidy          # Pipe input");
    println!();
    println!("Examples:");
    println!("  webtidy style.css                # Format single file in-place");
    println!("  webtidy *.html                   # Format multiple files");
    println!("  webtidy -r assets/               # Recursively format directory");
    println!("  webtidy -m style.css             # Minify in-place, report savings");
    println!("  webtidy --stdout style.css       # Output to stdout");
    println!("  webtidy -i 4 page.html           # Use 4-space indent");
    println!("  webtidy -m -L html - < page.html # Minify stdin as HTML");
    println!();
    println!("Options:");
    println!("  -i, --indent <NUM>               Indent size [default: 2]");
    println!("  -m, --minify                     Minify instead of pretty-printing");
    println!("  -L, --language <LANG>            Force language: css or html");
    println!("  -r, --recursive                  Process directories recursively");
    println!("  -e, --exclude <PATTERN>          Exclude files/dirs matching pattern (repeatable)");
    println!("  -s, --stdout                     Output to stdout");
    println!("  -c, --config <FILE>              Config file path (overrides auto-discovery)");
    println!("  -j, --jobs <NUM>                 Parallel jobs (0=auto, 1=sequential)");
    println!("  -S, --silent                     Silent mode");
    println!("  -D, --debug                      Enable debug output");
    println!("  -h, --help                       Print help");
    println!();
    println!("Format-mode options:");
    println!("  --remove-comments                Strip /* ... */ or <!-- ... -->");
    println!("  --compact                        Compact CSS output instead of indentation");
    println!("  --sort-properties                Sort declarations inside each CSS rule");
    println!("  --remove-empty-lines             Drop blank lines (HTML)");
    println!("  --remove-inline-styles           Strip style=\"...\" attributes (HTML)");
    println!();
    println!("Minify-mode options:");
    println!("  --keep-whitespace                Disable the whitespace collapse step");
    println!("  --collapse-boolean-attributes    Rewrite attr=\"attr\" as attr (HTML)");
    println!("  --shorten-doctype                Normalize doctype to <!DOCTYPE html> (HTML)");
    println!("  --remove-optional-tags           Drop <html>/<head>/<body> tags (HTML, lossy)");
    println!();
    println!("Supported extensions: .css, .html, .htm (case-insensitive)");
    println!();
    println!("Config file auto-discovery:");
    println!("  Searches for webtidy.toml in parent directories");
    println!("  starting from the file being processed up to the root directory.");
    println!("  Also checks webtidy.toml in the home directory.");
    println!("  More specific configs (closer to file) override less specific ones.");
    println!();
    println!("In-file directives override config and CLI:");
    println!("  /* webtidy: --indent 4 --sort-properties */");
    println!("  <!-- webtidy: --remove-comments -->");
}
