use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use bijli_cli::cli::AnalyzeArgs;
use bijli_cli::config::{BijliConfig, OutputFormat};
use bijli_core::{AnalysisProfile, DisplayTable};
use bijli_io::{analyze_csv, export_csv, write_csv, write_json, IoError};
use tabwriter::TabWriter;
use tracing::{debug, error, info, warn};

/// Analyze each input on its own; one bad file does not stop the others.
pub fn handle(args: &AnalyzeArgs, config: &BijliConfig) -> Result<()> {
    let profile = config.resolve_profile(args.preset, args.profile.as_deref())?;
    let format = args.format.unwrap_or(config.output.format);
    let targets = export_targets(&args.inputs, args.out.as_deref(), config);

    info!(
        "Analyzing {} file(s) with profile '{}'",
        args.inputs.len(),
        profile.name
    );

    let mut failed = 0;
    for (input, target) in args.inputs.iter().zip(&targets) {
        let start = Instant::now();
        match run_one(input, target.as_deref(), &profile, format, args.inputs.len() > 1) {
            Ok(()) => debug!(
                "{} finished in {} ms",
                input.display(),
                start.elapsed().as_millis()
            ),
            Err(err) => {
                failed += 1;
                report_failure(input, &err);
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} input file(s) failed", args.inputs.len());
    }
    Ok(())
}

fn run_one(
    input: &Path,
    target: Option<&Path>,
    profile: &AnalysisProfile,
    format: OutputFormat,
    labelled: bool,
) -> Result<()> {
    let result = analyze_csv(input, profile)?;

    if result.is_empty() {
        info!("No duplicate outages found in {}", input.display());
    }

    // Export before printing so a failed file shows no rows.
    if let Some(path) = target {
        export_csv(&result, path).with_context(|| format!("exporting to {}", path.display()))?;
        info!("Wrote {} row(s) to {}", result.len(), path.display());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Table => {
            if labelled {
                writeln!(out, "== {} ==", input.display())?;
            }
            print_table(&mut out, &result)?;
            print_summary(&mut out, input, &result)?;
        }
        OutputFormat::Csv => write_csv(&result, &mut out)?,
        OutputFormat::Json => write_json(&result, &mut out)?,
    }
    out.flush()?;
    Ok(())
}

fn print_table<W: Write>(out: &mut W, result: &DisplayTable) -> Result<()> {
    if result.is_empty() {
        return Ok(());
    }
    let mut writer = TabWriter::new(&mut *out);
    writeln!(writer, "{}", result.header().join("\t"))?;
    for row in result.cells() {
        writeln!(writer, "{}", row.join("\t"))?;
    }
    writer.flush()?;
    Ok(())
}

fn print_summary<W: Write>(out: &mut W, input: &Path, result: &DisplayTable) -> Result<()> {
    let s = &result.summary;
    if result.is_empty() {
        writeln!(
            out,
            "No duplicate outages in {} ({} rows read, {} excluded by reason)",
            input.display(),
            s.input_rows,
            s.excluded_rows
        )?;
    } else {
        writeln!(
            out,
            "{}: {} rows read, {} excluded by reason, {} duplicate groups, {} rows flagged",
            input.display(),
            s.input_rows,
            s.excluded_rows,
            s.duplicate_groups,
            s.output_rows
        )?;
    }
    Ok(())
}

fn report_failure(input: &Path, err: &anyhow::Error) {
    match err.downcast_ref::<IoError>().and_then(IoError::schema) {
        Some(schema) => {
            error!(
                "{}: missing required columns: {}",
                input.display(),
                schema.missing.join(", ")
            );
            error!(
                "{}: columns found in file: {}",
                input.display(),
                schema.present.join(", ")
            );
        }
        None => {
            error!("{}: analysis failed: {:#}", input.display(), err);
            debug!("{}: full diagnostic: {:?}", input.display(), err);
        }
    }
}

/// Where each input's result is exported, if anywhere.
///
/// With one input `--out` names the file; with several it names a directory.
/// Without `--out`, the configured output directory is used.
fn export_targets(inputs: &[PathBuf], out: Option<&Path>, config: &BijliConfig) -> Vec<Option<PathBuf>> {
    match (out, config.output.directory.as_deref()) {
        (Some(path), _) if inputs.len() == 1 => vec![Some(path.to_path_buf())],
        (Some(dir), _) | (None, Some(dir)) => {
            if out.is_some() && dir.extension().is_some() {
                warn!(
                    "{} looks like a file but several inputs were given; using it as a directory",
                    dir.display()
                );
            }
            inputs
                .iter()
                .map(|input| Some(dir.join(duplicates_file_name(input))))
                .collect()
        }
        (None, None) => vec![None; inputs.len()],
    }
}

fn duplicates_file_name(input: &Path) -> String {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("outages");
    format!("{stem}-duplicates.csv")
}
