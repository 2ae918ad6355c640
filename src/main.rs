use anyhow::{anyhow, Context};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

use renombra::services::audit::{self, AuditEntry};
use renombra::services::config::RunConfig;
use renombra::services::engine::pattern::CompiledPattern;
use renombra::services::engine::{self, area::AreaMapping};
use renombra::services::file_ops::apply;
use renombra::services::scanner::walker;
use renombra::types::decision::RenameAction;

/// Clean and standardize document filenames against a naming template.
#[derive(Debug, Parser)]
#[command(name = "renombra", version, about)]
struct Cli {
    /// Root folder to scan.
    root: PathBuf,

    /// JSON config file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Naming template, e.g. "{PARENT_LETTER}.{AREA}.{NAME}.{EXT}".
    #[arg(long)]
    pattern: Option<String>,

    /// Default prefix (e.g. F, P, G, I, IND, RUT).
    #[arg(long)]
    prefix: Option<String>,

    /// File with line-oriented "folder name:abbreviation" mappings.
    #[arg(long = "map-file")]
    map_file: Option<PathBuf>,

    /// Persistent audit log file (.csv), appended to on --apply.
    #[arg(long)]
    log: Option<PathBuf>,

    /// Folder name at which logged paths are relativized.
    #[arg(long = "log-anchor")]
    log_anchor: Option<String>,

    /// Restrict the scan to these first-level subfolders (repeatable).
    #[arg(long)]
    include: Vec<String>,

    /// Execute the decisions. Without this flag nothing on disk changes.
    #[arg(long)]
    apply: bool,

    /// Keep temp/junk files.
    #[arg(long)]
    no_delete_temp: bool,

    /// Skip cosmetic name cleanup.
    #[arg(long)]
    no_clean: bool,

    /// Skip template standardization (cleanup-only runs).
    #[arg(long)]
    no_standard: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => RunConfig::load(path).map_err(|e| anyhow!(e.to_string()))?,
        None => RunConfig::default(),
    };

    if let Some(pattern) = &cli.pattern {
        config.pattern = pattern.clone();
    }
    if let Some(prefix) = &cli.prefix {
        config.default_prefix = prefix.clone();
    }
    if let Some(map_file) = &cli.map_file {
        config.area_map = fs::read_to_string(map_file)
            .with_context(|| format!("cannot read map file {}", map_file.display()))?;
    }
    if let Some(log) = &cli.log {
        config.log_path = Some(log.clone());
    }
    if let Some(anchor) = &cli.log_anchor {
        config.log_anchor = Some(anchor.clone());
    }
    if !cli.include.is_empty() {
        config.include = cli.include.clone();
    }
    if cli.no_delete_temp {
        config.delete_temp = false;
    }
    if cli.no_clean {
        config.clean_names = false;
    }
    if cli.no_standard {
        config.apply_standard = false;
    }

    let pattern = CompiledPattern::compile(config.pattern.trim())
        .map_err(|e| anyhow!("invalid pattern: {e}"))?;
    let mapping = AreaMapping::parse(&config.area_map);
    if mapping.is_empty() {
        log::warn!("Area mapping is empty; {{AREA}} fields will not resolve from folders");
    }
    let engine_config = config.engine_config();

    let selected: Vec<PathBuf> = config.include.iter().map(|s| cli.root.join(s)).collect();
    let files = walker::collect_files(&cli.root, &selected).map_err(anyhow::Error::msg)?;

    log::info!(
        "Scanning {} file(s) under {} with pattern {} (apply: {})",
        files.len(),
        cli.root.display(),
        pattern.template(),
        cli.apply
    );

    let mut entries: Vec<AuditEntry> = Vec::new();
    for file in &files {
        let folder = file.folder.to_string_lossy();
        let decision = engine::evaluate(&file.name, &folder, &pattern, &mapping, &engine_config);
        if decision.action == RenameAction::NoChange {
            continue;
        }

        let entry = if cli.apply {
            match apply::apply_decision(file, &decision) {
                Some(entry) => entry,
                None => continue,
            }
        } else {
            let Some(label) = decision.action.audit_label(true) else {
                continue;
            };
            let new_path = decision
                .new_name
                .as_ref()
                .map(|n| file.folder.join(n).to_string_lossy().to_string())
                .unwrap_or_default();
            AuditEntry::now(&file.path.to_string_lossy(), label, &new_path, &decision.note)
        };

        println!(
            "{:<22} {}  ->  {}  [{}]",
            entry.action,
            audit::shorten_path(&entry.original_path, 3),
            audit::shorten_path(&entry.new_path, 3),
            entry.note
        );
        entries.push(entry);
    }

    if cli.apply {
        if let Some(log_path) = &config.log_path {
            audit::append_entries(log_path, &entries, config.log_anchor.as_deref())
                .map_err(|e| anyhow!(e.to_string()))?;
            log::info!("Audit log updated: {}", log_path.display());
        }
    }

    println!(
        "{} file(s) scanned, {} action(s) {}",
        files.len(),
        entries.len(),
        if cli.apply { "applied" } else { "proposed" }
    );

    Ok(())
}
