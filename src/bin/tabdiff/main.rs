mod args;
mod color_when;

use std::{collections::HashSet, fs, path::Path, process::ExitCode};

use anyhow::{Context as _, Result};
use args::Args;
use clap::Parser;
use log::{error, info, warn};
use tabdiff::{Comparison, Document, LEGEND, Symbol, codec};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const FATAL: u8 = 2;
const CONFLICTS: u8 = 1;

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(error) = init_tracing(&args) {
        eprintln!("{error:#}");
        return ExitCode::from(FATAL);
    }

    match run(&args) {
        Ok(code) => code,
        Err(error) => {
            error!("{error:#}");
            ExitCode::from(FATAL)
        }
    }
}

fn init_tracing(args: &Args) -> Result<()> {
    let level = args.verbose.log_level_filter().to_string().to_lowercase();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}={level}", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(args.color.use_colors()),
        )
        .try_init()
        .context("Failed to initialise tracing")
}

fn run(args: &Args) -> Result<ExitCode> {
    let base = read_document(&args.old)?;
    let mine = read_document(&args.mine)?;
    let yours = args.yours.as_deref().map(read_document).transpose()?;

    let comparison = match &yours {
        Some(yours) => Comparison::three_way(&mine, &base, yours)
            .context("Failed to compare the documents")?,
        None => Comparison::two_way(&base, &mine),
    };

    if let Some(output) = &args.output {
        if comparison.is_three_way() {
            write_merge(&comparison, output)?;
            if !comparison.has_conflicts() {
                return Ok(ExitCode::SUCCESS);
            }
        } else {
            warn!("Ignoring {}, merging requires three files", output.display());
        }
    }

    for line in show(args, [&mine, &base], yours.as_ref(), &comparison)? {
        println!("{line}");
    }

    Ok(if comparison.has_conflicts() {
        ExitCode::from(CONFLICTS)
    } else {
        ExitCode::SUCCESS
    })
}

fn read_document(path: &Path) -> Result<Document> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let document =
        codec::from_yaml(&source).with_context(|| format!("Failed to parse {}", path.display()))?;

    info!(
        "Read {} with {} track(s) and {} measure(s)",
        path.display(),
        document.tracks.len(),
        document.measure_count()
    );
    Ok(document)
}

fn write_merge(comparison: &Comparison<'_>, output: &Path) -> Result<()> {
    let merged = comparison.merge().context("Failed to merge the documents")?;
    let yaml = codec::to_yaml(&merged).context("Failed to serialise the merged document")?;
    fs::write(output, yaml).with_context(|| format!("Failed to write {}", output.display()))?;

    if comparison.has_conflicts() {
        warn!(
            "Wrote {} without {} conflicting change(s)",
            output.display(),
            comparison.conflicts().len()
        );
    } else {
        info!("Wrote merged document to {}", output.display());
    }
    Ok(())
}

fn show(
    args: &Args,
    [mine, base]: [&Document; 2],
    yours: Option<&Document>,
    comparison: &Comparison<'_>,
) -> Result<Vec<String>> {
    let mut lines = vec![
        file_info("OLDFILE: ", &args.old, base),
        file_info("MYFILE:  ", &args.mine, mine),
    ];
    if let (Some(path), Some(yours)) = (&args.yours, yours) {
        lines.push(file_info("YOURFILE:", path, yours));
    }

    let report = comparison.attribute_report();
    if !report.is_empty() {
        section(&mut lines, "Song information");
        lines.extend(report);
    }

    let grid = comparison
        .measure_grid()
        .context("Failed to align the measures")?;
    if grid.has_changes() {
        section(&mut lines, "Measures");
        let used = grid
            .header()
            .iter()
            .chain(grid.rows().iter().flatten())
            .copied()
            .collect::<HashSet<_>>();
        lines.extend(
            LEGEND
                .iter()
                .filter(|(symbol, _)| *symbol != Symbol::Unchanged && used.contains(symbol))
                .map(|(symbol, meaning)| format!("  {symbol}  {meaning}")),
        );
        lines.push(String::new());
        lines.extend(grid.to_string().lines().map(str::to_owned));
    }

    Ok(lines)
}

fn file_info(label: &str, path: &Path, document: &Document) -> String {
    format!(
        "{label} {}\t{} track(s), {} measure(s)",
        path.display(),
        document.tracks.len(),
        document.measure_count()
    )
}

fn section(lines: &mut Vec<String>, title: &str) {
    lines.push(String::new());
    lines.push(title.to_owned());
    lines.push("=".repeat(title.len()));
    lines.push(String::new());
}
