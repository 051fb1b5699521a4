use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context};
use colored::Colorize;
use serde_json::{json, Value};
use shapediff_diff::{
    apply_patch, diff, flatten, flatten_to_map, lookup, patch_stats, reconcile, SyncConfig,
};
use shapediff_types::{Shape, ValuePath};
use tracing::debug;

use crate::cli::*;

pub fn run_command(cli: Cli, out: &mut impl Write) -> anyhow::Result<()> {
    let format = cli.format;
    match cli.command {
        Command::Diff(args) => cmd_diff(args, &format, out),
        Command::Flatten(args) => cmd_flatten(args, &format, out),
        Command::Get(args) => cmd_get(args, out),
        Command::Apply(args) => cmd_apply(args, &format, out),
        Command::Sync(args) => cmd_sync(args, cli.config.as_deref(), &format, out),
    }
}

fn read_json(path: &Path) -> anyhow::Result<Value> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    debug!(path = %path.display(), "loaded document");
    Ok(value)
}

fn write_json(path: &Path, value: &Value) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    fs::write(path, text + "\n").with_context(|| format!("failed to write {}", path.display()))
}

fn load_config(path: Option<&Path>) -> anyhow::Result<SyncConfig> {
    let Some(path) = path else {
        return Ok(SyncConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    SyncConfig::from_toml_str(&text).with_context(|| format!("invalid config {}", path.display()))
}

fn path_label(path: &ValuePath) -> String {
    if path.is_root() { "(root)".into() } else { path.to_string() }
}

fn print_leaves(value: &Value, out: &mut impl Write) -> anyhow::Result<()> {
    for (path, leaf) in flatten(value) {
        writeln!(out, "  {} = {}", path_label(&path).yellow(), leaf)?;
    }
    Ok(())
}

fn cmd_diff(args: DiffArgs, format: &OutputFormat, out: &mut impl Write) -> anyhow::Result<()> {
    let updated = read_json(&args.updated)?;
    let original = args.original.as_deref().map(read_json).transpose()?;
    let patch = diff(&updated, original.as_ref());

    match (format, &patch) {
        (OutputFormat::Json, _) => {
            writeln!(out, "{}", serde_json::to_string_pretty(&patch)?)?;
        }
        (OutputFormat::Text, None) => writeln!(out, "No changes.")?,
        (OutputFormat::Text, Some(patch)) => {
            let stats = patch_stats(patch);
            writeln!(
                out,
                "{} {} changed ({} patch, depth {})",
                "~".yellow().bold(),
                format!("{} leaves", stats.leaves).bold(),
                Shape::of(patch),
                stats.depth
            )?;
            print_leaves(patch, out)?;
        }
    }
    Ok(())
}

fn cmd_flatten(args: FlattenArgs, format: &OutputFormat, out: &mut impl Write) -> anyhow::Result<()> {
    let patch = read_json(&args.patch)?;
    match format {
        OutputFormat::Json => {
            let map = Value::Object(flatten_to_map(&patch));
            writeln!(out, "{}", serde_json::to_string_pretty(&map)?)?;
        }
        OutputFormat::Text => print_leaves(&patch, out)?,
    }
    Ok(())
}

fn cmd_get(args: GetArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let doc = read_json(&args.file)?;
    match lookup(&doc, &args.path)? {
        Some(value) => writeln!(out, "{}", serde_json::to_string_pretty(value)?)?,
        None => bail!("no value at {:?} in {}", args.path, args.file.display()),
    }
    Ok(())
}

fn cmd_apply(args: ApplyArgs, format: &OutputFormat, out: &mut impl Write) -> anyhow::Result<()> {
    let mut target = read_json(&args.target)?;
    let patch = read_json(&args.patch)?;
    let written = apply_patch(&mut target, &patch);

    emit_document(&target, args.output.as_deref(), format, json!({ "written": written }), out)?;
    if matches!(format, OutputFormat::Text) {
        writeln!(out, "{} {} leaves written", "✓".green().bold(), written)?;
    }
    Ok(())
}

fn cmd_sync(
    args: SyncArgs,
    config_path: Option<&Path>,
    format: &OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    if args.no_prune {
        config = config.with_pruning(false);
    }
    if let Some(depth) = args.max_depth {
        config = config.with_max_depth(depth);
    }

    let mut model = read_json(&args.model)?;
    let defaults = args.defaults.as_deref().map(read_json).transpose()?;
    let report = reconcile(&mut model, defaults.as_ref(), &config)?;

    let summary = json!({ "written": report.written, "pruned": report.pruned });
    emit_document(&model, args.output.as_deref(), format, summary, out)?;
    if matches!(format, OutputFormat::Text) {
        if report.is_noop() {
            writeln!(out, "{} Model already up to date.", "✓".green().bold())?;
        } else {
            writeln!(
                out,
                "{} {} written, {} pruned",
                "✓".green().bold(),
                report.written.to_string().bold(),
                report.pruned.to_string().bold()
            )?;
        }
    }
    Ok(())
}

/// Write the resulting document to `output` when given, otherwise print it.
/// JSON format wraps it together with `summary` fields.
fn emit_document(
    doc: &Value,
    output: Option<&Path>,
    format: &OutputFormat,
    summary: Value,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if let Some(path) = output {
        write_json(path, doc)?;
    }
    match format {
        OutputFormat::Json => {
            let mut report = summary;
            if output.is_none() {
                report["document"] = doc.clone();
            }
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        }
        OutputFormat::Text if output.is_none() => {
            writeln!(out, "{}", serde_json::to_string_pretty(doc)?)?;
        }
        OutputFormat::Text => {}
    }
    Ok(())
}
