use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::process::Command;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "wordcell workspace automation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the cell benchmarks once per load configuration and compare them
    Bench {
        /// Run quickly (lower sample size/time)
        #[arg(long, default_value_t = false)]
        quick: bool,

        /// Generate report only (skip running benchmarks)
        #[arg(long, default_value_t = false)]
        report_only: bool,

        /// Where to write the markdown report
        #[arg(long, default_value = "benchmark_results/report.md")]
        out: String,
    },
}

/// Feature sets compared by the report: baseline name and cargo features.
const CONFIGS: &[(&str, &str)] = &[("native", ""), ("cas", "cas-load")];

const BENCH: &str = "cell_benchmark";

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Bench {
            quick,
            report_only,
            out,
        } => {
            if !report_only {
                run_benchmarks(quick)?;
            }
            generate_report(Path::new(&out))?;
        }
    }

    Ok(())
}

fn run_benchmarks(quick: bool) -> Result<()> {
    println!("Compiling benchmarks...");
    let status = Command::new("cargo")
        .args(["build", "--bench", BENCH, "--release"])
        .status()
        .context("failed to spawn cargo")?;
    if !status.success() {
        anyhow::bail!("Failed to compile benchmarks");
    }

    for (baseline, features) in CONFIGS {
        println!("\n>>> Benchmarking configuration: {baseline}");
        let start = Instant::now();

        let mut cmd = Command::new("cargo");
        cmd.arg("bench").arg("--bench").arg(BENCH);
        if !features.is_empty() {
            cmd.arg("--features").arg(features);
        }

        // Criterion arguments go after --
        cmd.arg("--").arg("--save-baseline").arg(baseline);

        if quick {
            cmd.arg("--measurement-time").arg("0.1");
            cmd.arg("--noplot");
            cmd.arg("--sample-size").arg("10");
        }

        let status = cmd
            .status()
            .with_context(|| format!("Failed to run bench for {baseline}"))?;

        if status.success() {
            println!("Finished {baseline} in {:.2?}", start.elapsed());
        } else {
            eprintln!("Warning: Benchmark failed for {baseline}");
        }
    }

    Ok(())
}

fn generate_report(report_path: &Path) -> Result<()> {
    println!("\n>>> Generating Report...");
    let criterion_dir = Path::new("target/criterion");
    if !criterion_dir.exists() {
        eprintln!("No criterion output found at {}", criterion_dir.display());
        return Ok(());
    }

    let mut results: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
    collect_results(criterion_dir, &mut results)?;

    if let Some(parent) = report_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    use std::fmt::Write;
    let mut report = String::new();
    writeln!(report, "# Cell Benchmark Report")?;
    writeln!(report)?;

    write!(report, "| Workload |")?;
    for (baseline, _) in CONFIGS {
        write!(report, " {baseline} (Ops/s) | vs native |")?;
    }
    writeln!(report)?;

    write!(report, "|---|")?;
    for _ in CONFIGS {
        write!(report, "---|---|")?;
    }
    writeln!(report)?;

    for (workload, by_baseline) in &results {
        write!(report, "| {workload} |")?;
        let native = by_baseline.get("native").copied().unwrap_or(0.0);

        for (baseline, _) in CONFIGS {
            match by_baseline.get(*baseline) {
                Some(ops) => {
                    let rel = if native > 0.0 { ops / native } else { 0.0 };
                    write!(report, " {} | **{rel:.2}x** |", format_ops(*ops))?;
                }
                None => write!(report, " N/A | - |")?,
            }
        }
        writeln!(report)?;
    }

    fs::write(report_path, report)
        .with_context(|| format!("writing {}", report_path.display()))?;
    println!("Report written to {}", report_path.display());
    Ok(())
}

fn format_ops(ops: f64) -> String {
    if ops > 1_000_000.0 {
        format!("{:.2}M", ops / 1_000_000.0)
    } else if ops > 1_000.0 {
        format!("{:.2}K", ops / 1_000.0)
    } else {
        format!("{ops:.0}")
    }
}

/// Walks criterion's output tree. Layout: `<group>/<function>/<baseline>/estimates.json`.
fn collect_results(dir: &Path, results: &mut BTreeMap<String, BTreeMap<String, f64>>) -> Result<()> {
    let entries = fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))?;

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_results(&path, results)?;
            continue;
        }
        if path.file_name().and_then(|s| s.to_str()) != Some("estimates.json") {
            continue;
        }

        let Some(baseline_dir) = path.parent() else { continue };
        let Some(workload_dir) = baseline_dir.parent() else { continue };
        let (Some(baseline), Some(function)) = (dir_name(baseline_dir), dir_name(workload_dir)) else {
            continue;
        };
        let workload = match workload_dir.parent().and_then(dir_name) {
            Some(group) if group != "criterion" => format!("{group}/{function}"),
            _ => function,
        };

        if !CONFIGS.iter().any(|(name, _)| *name == baseline) {
            continue;
        }

        // Throughput from benchmark.json, when the group declared one.
        let mut elements = None;
        if let Ok(content) = fs::read_to_string(baseline_dir.join("benchmark.json")) {
            let json: serde_json::Value = serde_json::from_str(&content)
                .with_context(|| format!("parsing benchmark.json for {workload}"))?;
            elements = json
                .get("throughput")
                .and_then(|t| t.get("Elements"))
                .and_then(serde_json::Value::as_f64);
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let json: serde_json::Value = serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        let time_ns = json
            .get("mean")
            .and_then(|m| m.get("point_estimate"))
            .and_then(serde_json::Value::as_f64)
            .unwrap_or(0.0);

        if time_ns > 0.0 {
            let metric = elements.unwrap_or(1.0) * 1e9 / time_ns;
            results.entry(workload).or_default().insert(baseline, metric);
        }
    }

    Ok(())
}

fn dir_name(path: &Path) -> Option<String> {
    path.file_name()?.to_str().map(str::to_owned)
}
