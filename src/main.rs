use anyhow::{bail, Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use symdoc::{Document, NavigationRoot, RenderConfig, SiteRenderer, SymbolGraph};

fn cli() -> Command {
    Command::new("symdoc")
        .about("Render a documented symbol graph to Markdown")
        .arg(
            Arg::new("input")
                .help("Symbol graph JSON written by the extractor")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .index(1),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Directory to write documents into")
                .required(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("JSON render configuration; flags override its values")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("guides")
                .long("guides")
                .help("Hand-written navigation manifest listed before the API pages")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(Arg::new("path-prefix").long("path-prefix").help("Base path of symbol links"))
        .arg(Arg::new("slug-prefix").long("slug-prefix").help("Prefix of front-matter slugs"))
        .arg(
            Arg::new("front-matter")
                .long("front-matter")
                .help("Emit front matter instead of a top-level heading")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("inline-members")
                .long("inline-members")
                .help("Render members inside their container instead of separate files")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("strip-extension")
                .long("strip-extension")
                .help("Drop the .md extension from links")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("summary-indent")
                .long("summary-indent")
                .help("Base indentation of SUMMARY.md entries, in spaces")
                .value_parser(value_parser!(usize)),
        )
}

fn load_config(matches: &ArgMatches) -> Result<RenderConfig> {
    let mut config: RenderConfig = match matches.get_one::<PathBuf>("config") {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            serde_json::from_str(&json)
                .with_context(|| format!("failed to parse config {}", path.display()))?
        }
        None => RenderConfig::default(),
    };

    if let Some(prefix) = matches.get_one::<String>("path-prefix") {
        config.path_prefix = prefix.clone();
    }
    if let Some(prefix) = matches.get_one::<String>("slug-prefix") {
        config.slug_prefix = prefix.clone();
    }
    if matches.get_flag("front-matter") {
        config.output_front_matter = true;
    }
    if matches.get_flag("inline-members") {
        config.output_member_files = false;
    }
    if matches.get_flag("strip-extension") {
        config.strip_extension_from_links = true;
    }
    if let Some(indent) = matches.get_one::<usize>("summary-indent") {
        config.summary_indent_level = *indent;
    }

    Ok(config)
}

/// Resolves a document path under `output_dir`, refusing paths that would leave it.
fn output_path(output_dir: &Path, relative: &str) -> Result<PathBuf> {
    let relative = Path::new(relative);
    if !relative
        .components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
    {
        bail!("document path {} escapes the output directory", relative.display());
    }
    Ok(output_dir.join(relative))
}

fn write_document(output_dir: &Path, document: &Document) -> Result<()> {
    let path = output_path(output_dir, &document.path)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(&path, &document.content)
        .with_context(|| format!("failed to write {}", path.display()))?;
    debug!(path = %path.display(), "wrote document");
    Ok(())
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("symdoc=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();

    let input = matches
        .get_one::<PathBuf>("input")
        .context("missing input file")?;
    let output_dir = matches
        .get_one::<PathBuf>("output")
        .context("missing output directory")?;
    let config = load_config(&matches)?;

    // Read and parse the symbol graph
    let json = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let graph = SymbolGraph::from_json(&json)
        .with_context(|| format!("failed to parse {}", input.display()))?;
    info!(symbols = graph.len(), input = %input.display(), "loaded symbol graph");

    let index = graph.into_index();
    let mut site = SiteRenderer::new(&index, &config)
        .render()
        .context("failed to render documentation")?;

    if let Some(path) = matches.get_one::<PathBuf>("guides") {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read guides {}", path.display()))?;
        let guides = NavigationRoot::from_json(&json)
            .with_context(|| format!("failed to parse guides {}", path.display()))?;
        site.manifest.prepend(guides);
    }

    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;

    // Every path is checked before the first write
    for document in &site.documents {
        output_path(output_dir, &document.path)?;
    }
    for document in &site.documents {
        write_document(output_dir, document)?;
    }
    write_document(output_dir, &site.toc)?;

    let index_path = output_dir.join("index.json");
    fs::write(&index_path, site.manifest.to_json_pretty()?)
        .with_context(|| format!("failed to write {}", index_path.display()))?;

    info!(
        documents = site.documents.len(),
        output = %output_dir.display(),
        "wrote documentation"
    );

    Ok(())
}
