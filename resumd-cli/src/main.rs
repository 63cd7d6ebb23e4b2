// Command-line interface for resumd
//
// This binary converts Markdown resumes between formats, inspects their structure and
// exports them to PDF. All document work is done by the resumd-babel library; this crate
// reads files, loads configuration and reports errors.
//
// Converting:
//
// The conversion needs a to and from pair. The from is auto-detected from the file extension,
// while being overwrittable by an explicit --from flag.
// Usage:
//  resumd <input> --to <format> [--from <format>] [--output <file>]           - Convert (default)
//  resumd convert <input> --to <format> [--hide-section <TITLE>]... [-o <file>] - Same as above
//  resumd outline <input>                     - Sections and items with ids and visibility
//  resumd layout <input>                      - Draw commands as JSON
//  resumd merge <base> <additional> [-o <file>] - Fold additional items into the projects section
//  resumd generate-css                        - Print the HTML presentation stylesheet
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix. Layout keys (font-size, line-height, margin,
// show-full-urls, page-size) and fallback override the configuration; everything else is
// passed to the target format as is.
// Example:
//  resumd cv.md --to pdf --extra-page-size a4 --extra-margin 54

use clap::{Arg, ArgAction, Command, ValueHint};
use resumd_babel::formats::markdown::{parse_markdown, serialize_markdown};
use resumd_babel::formats::options::{parse_bool_flag, parse_f32_option};
use resumd_babel::ir::from_model;
use resumd_babel::layout::{layout, LayoutSettings, PageSize};
use resumd_babel::model::Document;
use resumd_babel::publish::default_file_name;
use resumd_babel::{FormatRegistry, SerializedDocument};
use resumd_config::{Loader, PageSizeName, ResumdConfig};
use std::collections::HashMap;
use std::fs;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "RESUMD_LOG";
const SUBCOMMANDS: &[&str] = &[
    "convert",
    "outline",
    "layout",
    "merge",
    "generate-css",
    "help",
];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = if let Some(key) = arg.strip_prefix("--extra-") {
            Some(key)
        } else {
            arg.strip_prefix("--extras-")
        };

        if let Some(key) = key_opt {
            let has_value = if i + 1 < args.len() {
                !args[i + 1].starts_with('-')
            } else {
                false
            };

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn input_arg() -> Arg {
    Arg::new("input")
        .help("Input file path")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn output_arg() -> Arg {
    Arg::new("output")
        .long("output")
        .short('o')
        .help("Output file path (defaults to stdout)")
        .value_hint(ValueHint::FilePath)
}

fn build_cli() -> Command {
    Command::new("resumd")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert, inspect and export Markdown resumes")
        .long_about(
            "resumd works with resumes written in a small Markdown dialect:\n\
            '## ' lines open sections, '### ' lines open items, everything else is item body.\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            resumd cv.md --to pdf                       # Writes resume.pdf\n  \
            resumd cv.md --to html -o cv.html           # HTML presentation\n  \
            resumd cv.md --to pdf --extra-page-size a4  # A4 pages\n  \
            resumd outline cv.md                        # Sections, items and ids",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a resumd.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats (default command)")
                .long_about(
                    "Convert documents between different formats.\n\n\
                    Supported formats:\n  \
                    - markdown: the resume dialect (.md)\n  \
                    - json:     lossless save format, keeps hidden content (.json)\n  \
                    - html:     presentation with embedded CSS (.html)\n  \
                    - pdf:      paginated PDF with selectable text (.pdf)\n  \
                    - png:      screenshot of the HTML presentation (.png)\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Text output goes to stdout by default; binary output without -o\n\
                    goes to the configured default file name.",
                )
                .arg(input_arg())
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(output_arg())
                .arg(
                    Arg::new("hide-section")
                        .long("hide-section")
                        .value_name("TITLE")
                        .help("Hide every section with this title (case-insensitive)")
                        .action(ArgAction::Append),
                ),
        )
        .subcommand(
            Command::new("outline")
                .about("List sections and items with their ids and visibility")
                .arg(input_arg()),
        )
        .subcommand(
            Command::new("layout")
                .about("Print the laid out draw commands as JSON")
                .arg(input_arg()),
        )
        .subcommand(
            Command::new("merge")
                .about("Merge the items of a second resume into the projects section")
                .long_about(
                    "Every item of <additional> is added to the first section of <base> whose\n\
                    title contains 'project' (any case), replacing items from an earlier merge.\n\
                    A 'Projects' section is appended when there is none.\n\
                    The merged document is written as Markdown.",
                )
                .arg(
                    Arg::new("base")
                        .help("Resume to merge into")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("additional")
                        .help("Resume whose items are merged")
                        .required(true)
                        .index(2)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("generate-css")
                .about("Output the default CSS used for HTML export")
                .long_about(
                    "Outputs the baseline CSS used when converting to HTML.\n\n\
                    Save it, edit it and pass it back with --extra-css-path.",
                ),
        )
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {message}");
    std::process::exit(1);
}

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // A file as first argument means the convert subcommand was left out
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && !SUBCOMMANDS.contains(&cleaned_args[1].as_str())
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params).unwrap_or_else(|e| fail(e));

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let to = sub_matches.get_one::<String>("to").expect("to is required");

            let from = match sub_matches.get_one::<String>("from") {
                Some(f) => f.to_string(),
                None => FormatRegistry::default()
                    .detect_format_from_filename(input)
                    .unwrap_or_else(|| {
                        fail(format!(
                            "Could not detect format from filename '{input}'; specify --from"
                        ))
                    }),
            };

            let hidden: Vec<&str> = sub_matches
                .get_many::<String>("hide-section")
                .map(|titles| titles.map(String::as_str).collect())
                .unwrap_or_default();
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, &from, to, output, &hidden, &extra_params, &config);
        }
        Some(("outline", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            print!("{}", outline(&read_markdown(input)));
        }
        Some(("layout", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            handle_layout_command(input, &config);
        }
        Some(("merge", sub_matches)) => {
            let base = sub_matches
                .get_one::<String>("base")
                .expect("base is required");
            let additional = sub_matches
                .get_one::<String>("additional")
                .expect("additional is required");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_merge_command(base, additional, output);
        }
        Some(("generate-css", _)) => {
            print!("{}", resumd_babel::formats::get_default_css());
        }
        _ => fail("Unknown subcommand. Use --help for usage information."),
    }
}

fn read_source(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| fail(format!("reading file '{path}': {e}")))
}

fn read_markdown(path: &str) -> Document {
    parse_markdown(&read_source(path))
}

fn write_output(path: &str, bytes: Vec<u8>) {
    fs::write(path, bytes).unwrap_or_else(|e| fail(format!("writing file '{path}': {e}")));
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    hidden_sections: &[&str],
    extra_params: &HashMap<String, String>,
    config: &ResumdConfig,
) {
    let registry = FormatRegistry::default();

    for name in [from, to] {
        if let Err(e) = registry.get(name) {
            fail(e);
        }
    }

    let source = read_source(input);
    let doc = registry
        .parse(&source, from)
        .unwrap_or_else(|e| fail(format!("parse error: {e}")));
    let doc = hide_sections(doc, hidden_sections);

    let mut format_options = format_params_from_config(config, to);
    for (key, value) in extra_params {
        format_options.insert(key.clone(), value.clone());
    }

    let result = registry
        .serialize_with_options(&doc, to, &format_options)
        .unwrap_or_else(|e| fail(e));

    match (output, result) {
        (Some(path), data) => write_output(path, data.into_bytes()),
        (None, SerializedDocument::Text(text)) => print!("{text}"),
        (None, SerializedDocument::Binary(bytes)) => {
            let path = default_output_path(to, config);
            write_output(&path, bytes);
            println!("Wrote {path}");
        }
    }
}

fn default_output_path(format: &str, config: &ResumdConfig) -> String {
    match format {
        "pdf" => config.export.pdf_file.clone(),
        "markdown" => config.export.markdown_file.clone(),
        other => default_file_name(other),
    }
}

/// Hide every section whose title matches one of `titles`, ignoring case.
fn hide_sections(doc: Document, titles: &[&str]) -> Document {
    let targets: Vec<_> = doc
        .sections()
        .iter()
        .filter(|section| section.visible)
        .filter(|section| {
            titles
                .iter()
                .any(|title| section.title.trim().eq_ignore_ascii_case(title.trim()))
        })
        .map(|section| section.id.clone())
        .collect();

    targets
        .iter()
        .fold(doc, |doc, id| doc.toggle_section_visibility(id))
}

fn outline(doc: &Document) -> String {
    let mut out = String::new();
    for section in doc.sections() {
        out.push_str(&format!(
            "{}  {}{}\n",
            section.id,
            display_title(&section.title),
            if section.visible { "" } else { " [hidden]" }
        ));
        for item in &section.items {
            let mut flags = Vec::new();
            if !item.visible {
                flags.push("hidden");
            }
            if item.is_additional {
                flags.push("additional");
            }
            let flags = if flags.is_empty() {
                String::new()
            } else {
                format!(" [{}]", flags.join(", "))
            };
            out.push_str(&format!(
                "  {}  {}{}\n",
                item.id,
                display_title(&item.title),
                flags
            ));
        }
    }
    out
}

fn display_title(title: &str) -> &str {
    if title.trim().is_empty() {
        "(untitled)"
    } else {
        title
    }
}

fn handle_layout_command(input: &str, config: &ResumdConfig) {
    let doc = read_markdown(input);
    let settings = LayoutSettings::from(&config.layout);
    let placed = layout(&from_model(&doc), &settings).unwrap_or_else(|e| fail(e));
    let json = serde_json::to_string_pretty(&placed).unwrap_or_else(|e| fail(e));
    println!("{json}");
}

fn handle_merge_command(base: &str, additional: &str, output: Option<&str>) {
    let merged = read_markdown(base).merge_additional(&read_markdown(additional));
    let markdown = serialize_markdown(&merged);
    match output {
        Some(path) => write_output(path, markdown.into_bytes()),
        None => print!("{markdown}"),
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> ResumdConfig {
    let loader = Loader::new().with_optional_file("resumd.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader
        .build()
        .unwrap_or_else(|err| fail(format!("failed to load configuration: {err}")))
}

/// Move layout and export keys out of `extra_params` into `config`.
fn apply_config_overrides(
    config: &mut ResumdConfig,
    extra_params: &mut HashMap<String, String>,
) -> Result<(), String> {
    let layout = &mut config.layout;
    if let Some(value) = parse_f32_option(extra_params, "font-size").map_err(|e| e.to_string())? {
        layout.font_size = value;
    }
    if let Some(value) =
        parse_f32_option(extra_params, "line-height").map_err(|e| e.to_string())?
    {
        layout.line_height = value;
    }
    if let Some(value) = parse_f32_option(extra_params, "margin").map_err(|e| e.to_string())? {
        layout.margin = value;
    }
    layout.show_full_urls = parse_bool_flag(extra_params, "show-full-urls", layout.show_full_urls)
        .map_err(|e| e.to_string())?;
    if let Some(raw) = extra_params.get("page-size") {
        layout.page_size = match raw.parse::<PageSize>().map_err(|e| e.to_string())? {
            size if size == PageSize::A4 => PageSizeName::A4,
            _ => PageSizeName::Letter,
        };
    }
    config.export.fallback = parse_bool_flag(extra_params, "fallback", config.export.fallback)
        .map_err(|e| e.to_string())?;

    for key in [
        "font-size",
        "line-height",
        "margin",
        "show-full-urls",
        "page-size",
        "fallback",
    ] {
        extra_params.remove(key);
    }
    Ok(())
}

/// Format options derived from the configuration; `--extra-*` values are layered on top.
///
/// Only formats that take options get any, since the rest reject extra parameters.
fn format_params_from_config(config: &ResumdConfig, format: &str) -> HashMap<String, String> {
    let layout = &config.layout;
    let page_size = match layout.page_size {
        PageSizeName::Letter => "letter",
        PageSizeName::A4 => "a4",
    };
    let viewport = [
        ("viewport-width", config.raster.viewport_width.to_string()),
        ("viewport-height", config.raster.viewport_height.to_string()),
    ];
    let params: Vec<(&str, String)> = match format {
        "pdf" => [
            ("font-size", layout.font_size.to_string()),
            ("line-height", layout.line_height.to_string()),
            ("margin", layout.margin.to_string()),
            ("show-full-urls", layout.show_full_urls.to_string()),
            ("page-size", page_size.to_string()),
            ("fallback", config.export.fallback.to_string()),
        ]
        .into_iter()
        .chain(viewport)
        .collect(),
        "png" => viewport.into_iter().collect(),
        "html" => vec![("show-full-urls", layout.show_full_urls.to_string())],
        _ => Vec::new(),
    };
    params
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}
