mod discovery;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use wadlgen_core::config::{self, CONFIG_FILE_NAME, WadlgenConfig};
use wadlgen_core::ir::{Diagnostic, IrType};
use wadlgen_core::parse::DocumentKind;
use wadlgen_core::transform::{self, Compilation, CompileOptions, SourceDocument};
use wadlgen_core::{CodeGenerator, GeneratedFile};
use wadlgen_js::{ClientGenerator, ServerGenerator};

#[derive(Parser)]
#[command(
    name = "wadlgen",
    about = "JavaScript model and constructor generator for WADL/XSD APIs",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate client models and server constructors
    Generate {
        /// Directory searched recursively for .xsd and .wadl files
        #[arg(requires_all = ["client_output", "server_output"])]
        api_root: Option<PathBuf>,

        /// Output directory for client models and enums
        #[arg(requires_all = ["api_root", "server_output"])]
        client_output: Option<PathBuf>,

        /// Output directory for server constructors and index.js
        #[arg(requires_all = ["api_root", "client_output"])]
        server_output: Option<PathBuf>,
    },

    /// Parse every document under a directory and report what was found
    Validate {
        /// Directory searched recursively for .xsd and .wadl files
        root: PathBuf,
    },

    /// Inspect the resolved type model
    Inspect {
        /// Directory searched recursively for .xsd and .wadl files
        root: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a new wadlgen configuration
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            api_root,
            client_output,
            server_output,
        } => cmd_generate(api_root, client_output, server_output),

        Commands::Validate { root } => cmd_validate(root),

        Commands::Inspect { root, format } => cmd_inspect(root, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "wadlgen", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<WadlgenConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

/// Documents read from an api root. Documents that fail to parse are counted, not kept.
struct LoadedDocuments {
    documents: Vec<SourceDocument>,
    failures: usize,
}

fn load_documents(root: &Path) -> Result<LoadedDocuments> {
    if !root.is_dir() {
        anyhow::bail!("api root {} does not exist", root.display());
    }

    let files = discovery::discover(root);
    let resources = files
        .iter()
        .filter(|f| f.kind == DocumentKind::Resource)
        .count();
    eprintln!(
        "Found {} wadl files and {} xsd files in {}",
        resources,
        files.len() - resources,
        root.display()
    );

    let mut loaded = LoadedDocuments {
        documents: Vec::with_capacity(files.len()),
        failures: 0,
    };
    for file in files {
        let display = file.path.display().to_string();
        let parsed = fs::read_to_string(&file.path)
            .with_context(|| format!("failed to read {display}"))
            .and_then(|text| {
                SourceDocument::parse(&display, file.name, file.source_dir, file.kind, &text)
                    .with_context(|| format!("failed to parse {display}"))
            });
        match parsed {
            Ok(doc) => loaded.documents.push(doc),
            Err(err) => {
                log::error!("{err:#}; document skipped");
                loaded.failures += 1;
            }
        }
    }
    Ok(loaded)
}

fn compile_root(root: &Path, cfg: &WadlgenConfig) -> Result<(Compilation, usize)> {
    let loaded = load_documents(root)?;
    let compilation = transform::compile(&loaded.documents, &CompileOptions::from(cfg));
    Ok((compilation, loaded.failures))
}

/// Write generated files to disk under the given base directory.
fn write_files(base: &Path, files: &[GeneratedFile]) -> Result<()> {
    for file in files {
        let path = base.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        fs::write(&path, &file.content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("  wrote {}", path.display());
    }
    Ok(())
}

fn generate_into<G>(generator: G, compilation: &Compilation, cfg: &WadlgenConfig, dir: &Path) -> Result<()>
where
    G: CodeGenerator<Config = WadlgenConfig>,
    G::Error: Send + Sync + 'static,
{
    let files = generator.generate(&compilation.ir, cfg)?;
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    write_files(dir, &files)?;
    eprintln!("Generated {} files in {}", files.len(), dir.display());
    Ok(())
}

fn cmd_generate(
    api_root: Option<PathBuf>,
    client_output: Option<PathBuf>,
    server_output: Option<PathBuf>,
) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let (api_root, client_dir, server_dir) = match (api_root, client_output, server_output) {
        (Some(api_root), Some(client), Some(server)) => (api_root, client, server),
        _ => (
            PathBuf::from(&cfg.api_root),
            PathBuf::from(&cfg.client_output),
            PathBuf::from(&cfg.server_output),
        ),
    };

    let (compilation, failures) = compile_root(&api_root, &cfg)?;

    eprintln!("server-side types will be written to {}", server_dir.display());
    generate_into(ServerGenerator, &compilation, &cfg, &server_dir)?;
    eprintln!("client-side types will be written to {}", client_dir.display());
    generate_into(ClientGenerator, &compilation, &cfg, &client_dir)?;

    let mut unregistered = 0;
    for diagnostic in &compilation.ir.diagnostics {
        match diagnostic {
            Diagnostic::SuffixCollision(_) => eprintln!("  warning: {diagnostic}"),
            Diagnostic::UnregisteredReference { .. } => unregistered += 1,
        }
    }

    let stats = &compilation.stats;
    eprintln!(
        "{} types ({} collections), {} unresolved member references, {} unregistered resource references, {} documents skipped",
        stats.types, stats.collections, stats.unresolved_references, unregistered, failures
    );
    Ok(())
}

fn cmd_validate(root: PathBuf) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let (compilation, failures) = compile_root(&root, &cfg)?;
    let stats = &compilation.stats;

    eprintln!("  Schemas: {}", stats.schemas);
    eprintln!("  Resource documents: {}", stats.resources);
    eprintln!("  Types: {} ({} collections)", stats.types, stats.collections);
    eprintln!("  Path annotations: {}", stats.annotations);
    eprintln!("  Unresolved member references: {}", stats.unresolved_references);
    for diagnostic in &compilation.ir.diagnostics {
        eprintln!("  {diagnostic}");
    }

    if failures > 0 {
        anyhow::bail!("{failures} documents failed to parse");
    }
    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_inspect(root: PathBuf, format: InspectFormat) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let (compilation, _) = compile_root(&root, &cfg)?;

    let summary = build_inspect_summary(&compilation);

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn build_inspect_summary(compilation: &Compilation) -> serde_json::Value {
    let types: Vec<serde_json::Value> = compilation
        .ir
        .types
        .iter()
        .map(|ty| match ty {
            IrType::Enumeration(e) => serde_json::json!({
                "name": e.name.original,
                "kind": "enum",
                "source_dir": e.source_dir,
                "values": e.variants.iter().map(|v| &v.value).collect::<Vec<_>>(),
            }),
            IrType::Record(r) => serde_json::json!({
                "name": r.name.original,
                "kind": "record",
                "source_dir": r.source_dir,
                "members": r.constructor.as_ref().map(|c| {
                    c.fields.iter().map(|f| &f.name.original).collect::<Vec<_>>()
                }),
                "url": r.model.as_ref().map(|m| &m.url),
                "paths": r.model.as_ref().map(|m| &m.paths),
                "collection": r.collection.as_ref().map(|c| serde_json::json!({
                    "list": c.list_name().original,
                    "endpoints": c.endpoints,
                })),
            }),
        })
        .collect();

    serde_json::json!({
        "stats": compilation.stats,
        "types": types,
        "diagnostics": compilation.ir.diagnostics,
    })
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())
        .with_context(|| format!("failed to write {}", config_path.display()))?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
