//! # Schema Subcommand
//!
//! `jsonval schema <FILE>`: build the reference graph of a schema and
//! report on it.
//!
//! Every JSON/YAML file in the schema directory (the root schema's own
//! directory unless `--schema-dir` is given) is registered with a
//! [`LocalDocumentResolver`] under its path relative to that directory, so
//! external `$ref`s are resolved offline, by relative path or bare file name.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use jsonval_adapters::DocumentRef;
use jsonval_schema::{Draft, LocalDocumentResolver, ParserOptions, SchemaGraph, SchemaParser};

use crate::load::{find_schema_files, LoadedDocument};

/// Arguments for the `jsonval schema` subcommand.
#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Root schema document (JSON or YAML).
    #[arg(value_name = "FILE")]
    pub path: PathBuf,

    /// Directory of documents available to external `$ref`s.
    #[arg(long, value_name = "DIR")]
    pub schema_dir: Option<PathBuf>,

    /// Parser options file (YAML or JSON).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Draft to parse with: draft3, draft4 or draft7. Overrides the config file.
    #[arg(long)]
    pub draft: Option<Draft>,

    /// URI of the root document. Overrides the config file.
    #[arg(long, value_name = "URI")]
    pub base_uri: Option<String>,

    /// Print the whole graph as JSON instead of a summary.
    #[arg(long)]
    pub json: bool,
}

/// Execute the schema subcommand.
pub fn run_schema(args: &SchemaArgs) -> Result<u8> {
    let options = parser_options(args)?;
    let graph = build_graph(args, &options)?;
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&graph).context("failed to render schema graph")?
        );
    } else {
        print!("{}", summarize(&args.path, &options, &graph));
    }
    Ok(0)
}

/// Options from `--config`, then `--draft` and `--base-uri` on top.
pub fn parser_options(args: &SchemaArgs) -> Result<ParserOptions> {
    let mut options = match &args.config {
        Some(path) => ParserOptions::load(path)
            .with_context(|| format!("failed to load parser options from {}", path.display()))?,
        None => ParserOptions::default(),
    };
    if let Some(draft) = args.draft {
        options.draft = draft;
    }
    if let Some(uri) = &args.base_uri {
        options.base_uri = Some(uri.clone());
    }
    Ok(options)
}

/// Load the root schema and the schema directory, and build the graph.
pub fn build_graph(args: &SchemaArgs, options: &ParserOptions) -> Result<SchemaGraph> {
    let root = LoadedDocument::load(&args.path)?;
    let schema_dir = match &args.schema_dir {
        Some(dir) => dir.clone(),
        None => args
            .path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };

    let mut library = Vec::new();
    for path in find_schema_files(&schema_dir) {
        match LoadedDocument::load(&path) {
            Ok(document) => library.push((relative_uri(&schema_dir, &path), document)),
            Err(e) => tracing::warn!(path = %path.display(), "skipping unreadable schema: {e:#}"),
        }
    }
    tracing::info!(
        dir = %schema_dir.display(),
        documents = library.len(),
        "loaded schema directory"
    );

    let mut resolver: LocalDocumentResolver<DocumentRef<'_>> = LocalDocumentResolver::new();
    for (uri, document) in &library {
        resolver.insert(uri.as_str(), document.node());
    }

    SchemaParser::new(options.clone())
        .parse(root.node(), &mut resolver)
        .with_context(|| format!("failed to build schema graph for {}", args.path.display()))
}

/// `path` relative to `dir`, with `/` separators.
fn relative_uri(dir: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(dir).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Human-readable report of a built graph.
pub fn summarize(path: &Path, options: &ParserOptions, graph: &SchemaGraph) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Schema: {}", path.display());
    let _ = writeln!(out, "  draft:     {}", options.draft);
    let _ = writeln!(out, "  nodes:     {}", graph.len());
    let _ = writeln!(
        out,
        "  recursive: {}",
        if graph.is_cyclic() { "yes" } else { "no" }
    );
    let _ = writeln!(out, "  documents: {}", graph.documents().len());
    for uri in graph.documents() {
        let shown = if uri.is_empty() { "(root)" } else { uri.as_str() };
        let _ = writeln!(out, "    {shown}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(path: PathBuf) -> SchemaArgs {
        SchemaArgs {
            path,
            schema_dir: None,
            config: None,
            draft: None,
            base_uri: None,
            json: false,
        }
    }

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn builds_graph_with_sibling_documents() {
        let dir = tempfile::tempdir().unwrap();
        let root = write(
            dir.path(),
            "root.json",
            r#"{"type": "object", "properties": {"id": {"$ref": "defs/common.yaml#/id"}}}"#,
        );
        write(dir.path(), "defs/common.yaml", "id:\n  type: integer\n");

        let args = args(root);
        let options = parser_options(&args).unwrap();
        let graph = build_graph(&args, &options).unwrap();
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.documents(), ["", "defs/common.yaml"]);

        let summary = summarize(&args.path, &options, &graph);
        assert!(summary.contains("nodes:     2"));
        assert!(summary.contains("recursive: no"));
        assert!(summary.contains("defs/common.yaml"));
    }

    #[test]
    fn circular_reference_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let root = write(dir.path(), "loop.json", r##"{"items": {"$ref": "#/items"}}"##);
        let args = args(root);
        let options = parser_options(&args).unwrap();
        let err = build_graph(&args, &options).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("circular $ref"), "unexpected error: {message}");
        assert!(message.contains("loop.json"));
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = write(dir.path(), "options.yaml", "draft: draft4\nbase_uri: a.json\n");
        let mut args = args(dir.path().join("root.json"));
        args.config = Some(config);
        args.base_uri = Some("b.json".into());

        let options = parser_options(&args).unwrap();
        assert_eq!(options.draft, Draft::Draft4);
        assert_eq!(options.base_uri.as_deref(), Some("b.json"));
    }

    #[test]
    fn relative_uri_uses_forward_slashes() {
        let dir = Path::new("schemas");
        let path = dir.join("nested").join("a.json");
        assert_eq!(relative_uri(dir, &path), "nested/a.json");
    }
}
