//! plugindoc — generate plugin reference documentation from directive markup.
//!
//! Supports two modes:
//!
//! - **stdin mode**: `plugindoc < plugins.rst`
//! - **file mode**: `plugindoc -o docs/plugins -p _prefix.mdx docs/src/*.rst`

use anyhow::{bail, Context, Result};
use clap::Parser;
use plugindoc::model::Document;
use plugindoc::render::{Format, Renderer};
use plugindoc::{Domain, DomainConfig, DocumentBuilder};
use std::collections::BTreeSet;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn, Level};

#[derive(Parser)]
#[command(
    name = "plugindoc",
    about = "Generate plugin reference documentation from directive markup"
)]
struct Cli {
    /// Input files (glob patterns supported). If omitted, reads from stdin.
    files: Vec<String>,

    /// Output directory (required when files are given)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Prefix template file or directory containing _prefix.mdx.
    /// Supports ${name} substitution.
    #[arg(short = 'p', long)]
    prefix: Option<PathBuf>,

    /// Output format: markdown (default), html, json
    #[arg(short = 'f', long, default_value = "markdown")]
    format: Format,

    /// Domain prefix recognized in directives (`.. <domain>:plugin::`)
    #[arg(long, default_value = "gollum")]
    domain: String,

    /// Human-readable domain label
    #[arg(long, default_value = "Gollum")]
    domain_label: String,

    /// Log directive resolution
    #[arg(short = 'v', long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short = 'q', long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let domain = Domain::with_plugin_directives(DomainConfig {
        name: cli.domain.clone(),
        label: cli.domain_label.clone(),
    });
    debug!(
        domain = domain.name(),
        directives = ?domain.directive_names().collect::<Vec<_>>(),
        "registered directives"
    );

    if cli.files.is_empty() {
        return stdin_mode(&cli, &domain);
    }

    file_mode(&cli, &domain)
}

fn init_logging(cli: &Cli) {
    let level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// stdin mode: read from stdin, write the rendered document to stdout.
fn stdin_mode(cli: &Cli, domain: &Domain) -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let doc = DocumentBuilder::new(domain)
        .build("stdin", &input)
        .context("failed to build stdin")?;
    print!("{}", cli.format.renderer().render(&doc)?);
    Ok(())
}

/// file mode: build every input separately, one output file each.
fn file_mode(cli: &Cli, domain: &Domain) -> Result<()> {
    let output_dir = cli
        .output
        .as_deref()
        .context("--output is required when files are given")?;

    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory: {}", output_dir.display()))?;

    let prefix_template = resolve_prefix(cli.prefix.as_deref(), output_dir)?;
    let input_files = collect_inputs(&cli.files)?;
    let renderer = cli.format.renderer();
    let mut builder = DocumentBuilder::new(domain);
    let mut failed = 0;

    for path in &input_files {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let name = derive_output_name(path);

        let doc = match builder.build(&name, &content) {
            Ok(doc) => doc,
            Err(e) => {
                error!(file = %path.display(), "{}", e);
                failed += 1;
                continue;
            }
        };
        if doc.nodes.is_empty() {
            info!(file = %path.display(), "nothing documented, skipping");
            continue;
        }

        let out_path = output_dir.join(format!("{}.{}", name, renderer.file_extension()));
        let output = render_with_prefix(renderer.as_ref(), &doc, prefix_template.as_deref(), &name)?;
        fs::write(&out_path, &output)
            .with_context(|| format!("failed to write {}", out_path.display()))?;
    }

    if failed > 0 {
        bail!("{} document(s) failed to build", failed);
    }
    Ok(())
}

fn render_with_prefix(
    renderer: &dyn Renderer,
    doc: &Document,
    prefix: Option<&str>,
    name: &str,
) -> Result<String> {
    let mut output = String::new();
    if let Some(tpl) = prefix {
        output.push_str(&tpl.replace("${name}", name));
        output.push('\n');
    }
    output.push_str(&renderer.render(doc)?);
    Ok(output)
}

/// Template looked up inside prefix and output directories.
const PREFIX_FILE: &str = "_prefix.mdx";

/// Prefix template for file mode.
///
/// `-p` names a template or a directory holding [`PREFIX_FILE`]; without it
/// the output directory is searched. Only a `-p` path that doesn't exist is an
/// error, a directory without a template just means no prefix.
fn resolve_prefix(prefix_arg: Option<&Path>, output_dir: &Path) -> Result<Option<String>> {
    let template = match prefix_arg {
        Some(p) if p.is_file() => Some(p.to_path_buf()),
        Some(p) if p.is_dir() => prefix_in(p),
        Some(p) => bail!("prefix not found: {}", p.display()),
        None => prefix_in(output_dir),
    };
    template
        .map(|path| {
            fs::read_to_string(&path)
                .with_context(|| format!("failed to read prefix file: {}", path.display()))
        })
        .transpose()
}

fn prefix_in(dir: &Path) -> Option<PathBuf> {
    Some(dir.join(PREFIX_FILE)).filter(|p| p.is_file())
}

/// Extensions picked up when a directory is given as input.
const SOURCE_EXTENSIONS: &[&str] = &["rst", "txt"];

/// Input files from file, directory and glob arguments, sorted and deduplicated.
fn collect_inputs(args: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = BTreeSet::new();
    for arg in args {
        let path = Path::new(arg);
        if path.is_file() {
            files.insert(path.to_path_buf());
        } else if path.is_dir() {
            files.extend(sources_in(path)?);
        } else {
            let matches = glob::glob(arg).with_context(|| format!("invalid glob pattern: {}", arg))?;
            let before = files.len();
            files.extend(matches.filter_map(|m| m.ok()).filter(|p| p.is_file()));
            if files.len() == before {
                warn!(pattern = %arg, "no new files matched");
            }
        }
    }
    Ok(files.into_iter().collect())
}

/// Markup sources directly inside `dir` (not recursive).
fn sources_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("failed to read directory: {}", dir.display()))?;
    let mut found = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("failed to read directory: {}", dir.display()))?
            .path();
        let is_source = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext));
        if is_source && path.is_file() {
            found.push(path);
        }
    }
    Ok(found)
}

/// Derive the output file name (without extension) from a source path.
/// "docs/src/consumers.rst" → "consumers"
fn derive_output_name(source: &Path) -> String {
    source
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| source.to_string_lossy().to_string())
}
