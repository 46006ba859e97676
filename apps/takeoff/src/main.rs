// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: Calibrated roof measurements from an annotated sketch
//!
//! A job file carries the sketch (labeled lines plus facet rings) and
//! the operator's datasheet. The tool fits the drawing scale, predicts
//! missing lengths, estimates facet areas, and writes a report next to
//! each job.
//!
//! Usage:
//!   rooftake <job.json>... [options]

use rayon::prelude::*;
use rooftake_estimate::{process_roof, Datasheet, Roof, SheetRow, Summary, TakeoffResult};
use rooftake_geometry::{Point2D, Polygon, SketchLine};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// One takeoff job: sketch geometry plus the annotation sheet
#[derive(Debug, Deserialize)]
struct JobFile {
    lines: Vec<SketchLine>,
    /// Facet rings as bare point arrays, one per roof surface
    facets: Vec<Vec<Point2D>>,
    sheet: Vec<SheetRow>,
}

/// Everything a report consumer needs: the filled sheet and the rollup
#[derive(Debug, Serialize)]
struct ReportFile {
    predicted: usize,
    facets_measured: usize,
    sheet: Datasheet,
    summary: Summary,
}

struct Options {
    output_dir: Option<PathBuf>,
    pretty: bool,
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return;
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,rooftake=debug".into()),
        )
        .pretty()
        .init();

    // Parse options
    let mut inputs: Vec<String> = Vec::new();
    let mut output_dir: Option<PathBuf> = None;
    let mut pretty = false;
    let mut threads: Option<usize> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--output" => {
                i += 1;
                output_dir = Some(PathBuf::from(&args[i]));
            }
            "--pretty" => {
                pretty = true;
            }
            "--threads" => {
                i += 1;
                threads = Some(args[i].parse().expect("Invalid threads value"));
            }
            other if other.starts_with("--") => {
                eprintln!("Unknown option: {}", other);
                print_usage();
                std::process::exit(1);
            }
            job => {
                inputs.push(job.to_string());
            }
        }
        i += 1;
    }

    if inputs.is_empty() {
        eprintln!("Error: no job files given");
        print_usage();
        std::process::exit(1);
    }

    if let Some(dir) = &output_dir {
        if let Err(e) = fs::create_dir_all(dir) {
            eprintln!("Error: Cannot create output directory '{}': {}", dir.display(), e);
            std::process::exit(1);
        }
    }

    if let Some(n) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .expect("Failed to initialize thread pool");
    }

    let opts = Options { output_dir, pretty };

    tracing::info!(jobs = inputs.len(), "Starting takeoff run");

    if inputs.len() == 1 {
        run_single(&inputs[0], &opts);
    } else {
        run_batch(&inputs, &opts);
    }
}

/// One job with staged progress output and a printed summary
fn run_single(input: &str, opts: &Options) {
    println!("=== Roof Sketch Takeoff ===");
    println!();

    // Step 1: Load job
    println!("[1/4] Loading job: {}", input);
    let job = load_job(input).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    println!(
        "  Lines: {}  Facets: {}  Sheet rows: {}",
        job.lines.len(),
        job.facets.len(),
        job.sheet.len()
    );

    // Step 2: Assemble roof
    println!("[2/4] Assembling roof...");
    let (roof, mut sheet) = assemble_job(job);
    println!(
        "  Split {} lines into {} segments across {} facets",
        roof.lines().len(),
        roof.segments().len(),
        roof.facets().len()
    );

    // Step 3: Calibrate and measure
    println!("[3/4] Calibrating and measuring...");
    let result = match process_roof(&roof, &mut sheet) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    println!(
        "  Predicted lengths: {}  Facets measured: {}",
        result.predicted, result.facets_measured
    );

    // Step 4: Write report
    let out_path = report_path(input, opts);
    println!("[4/4] Writing report: {}", out_path.display());
    if let Err(e) = write_report(&out_path, &result, sheet, opts.pretty) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    println!();
    print_summary(&result.summary);
}

/// Many jobs in parallel, one status line per job
fn run_batch(inputs: &[String], opts: &Options) {
    println!("=== Roof Sketch Takeoff ({} jobs) ===", inputs.len());
    println!();

    let results: Vec<Result<String, String>> = inputs
        .par_iter()
        .map(|input| {
            let job = load_job(input)?;
            let (roof, mut sheet) = assemble_job(job);
            let result = process_roof(&roof, &mut sheet)
                .map_err(|e| format!("{}: {}", input, e))?;
            let out_path = report_path(input, opts);
            write_report(&out_path, &result, sheet, opts.pretty)?;
            Ok(format!(
                "{}: {:.0} sq ft over {} facets -> {}",
                input,
                result.summary.total_area_sqft,
                result.facets_measured,
                out_path.display()
            ))
        })
        .collect();

    let mut failures = 0;
    for result in &results {
        match result {
            Ok(line) => println!("  {}", line),
            Err(e) => {
                failures += 1;
                eprintln!("  Error: {}", e);
            }
        }
    }

    println!();
    println!(
        "{} of {} jobs completed",
        results.len() - failures,
        results.len()
    );
    if failures > 0 {
        std::process::exit(1);
    }
}

fn load_job(path: &str) -> Result<JobFile, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Cannot read job '{}': {}", path, e))?;
    serde_json::from_str(&content).map_err(|e| format!("Cannot parse job '{}': {}", path, e))
}

fn assemble_job(job: JobFile) -> (Roof, Datasheet) {
    let polygons = job.facets.into_iter().map(Polygon::new).collect();
    let roof = Roof::assemble(job.lines, polygons);
    let sheet = Datasheet::new(job.sheet);
    (roof, sheet)
}

/// Report lands beside its job unless an output directory was given
fn report_path(input: &str, opts: &Options) -> PathBuf {
    let input = Path::new(input);
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "takeoff".to_string());
    let file = format!("{}.takeoff.json", stem);

    match &opts.output_dir {
        Some(dir) => dir.join(file),
        None => input.with_file_name(file),
    }
}

fn write_report(
    path: &Path,
    result: &TakeoffResult,
    sheet: Datasheet,
    pretty: bool,
) -> Result<(), String> {
    let report = ReportFile {
        predicted: result.predicted,
        facets_measured: result.facets_measured,
        sheet,
        summary: result.summary.clone(),
    };

    let json = if pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    }
    .map_err(|e| format!("Cannot encode report: {}", e))?;

    fs::write(path, json).map_err(|e| format!("Cannot write '{}': {}", path.display(), e))
}

fn print_summary(summary: &Summary) {
    println!("=== Takeoff Summary ===");
    println!(
        "  Total area: {:.0} sq ft ({:.1} squares)",
        summary.total_area_sqft, summary.total_squares
    );
    println!("  Facets measured: {}", summary.facet_count);
    if let Some(pitch) = summary.predominant_pitch {
        println!("  Predominant pitch: {:.0}/12", pitch);
    }

    println!();
    println!("  Area by pitch:");
    for (pitch, area) in &summary.area_by_pitch {
        println!("    {:>4.0}/12: {:.0} sq ft", pitch, area);
    }

    println!();
    println!("  Lengths (ft):");
    for (category, total) in &summary.length_totals {
        println!("    {:6} {:>6.0}", format!("{}:", category.code()), total);
    }

    println!();
    println!("  Waste schedule:");
    for line in &summary.waste_schedule {
        println!(
            "    {:>3.0}%: {:>8.0} sq ft  {:>6.1} squares",
            (line.factor - 1.0) * 100.0,
            line.area_sqft,
            line.squares
        );
    }
}

fn print_usage() {
    // Plain argument, not a format string: the job-file example contains
    // literal braces
    println!(
        "{}",
        r#"Roof Sketch Takeoff
===================

Calibrates an annotated roof sketch against known lengths, predicts the
rest, and estimates the true area of every facet.

USAGE:
  rooftake <job.json>... [OPTIONS]

ARGUMENTS:
  <job.json>        One or more takeoff job files (sketch + datasheet)

OPTIONS:
  --output <dir>    Directory for reports (default: beside each job)
  --pretty          Pretty-print report JSON
  --threads <n>     Worker threads for batch runs (default: all cores)
  -h, --help        Show this help message

JOB FILE:
  {
    "lines":  [{"id": "E1", "start": {"x": 0.0, "y": 0.0}, "end": {"x": 40.0, "y": 0.0}}, ...],
    "facets": [[{"x": 0.0, "y": 0.0}, {"x": 40.0, "y": 0.0}, ...], ...],
    "sheet":  [{"line_label": "E1", "category": "E", "length_ft": 20.0, "pitch": 6.0}, ...]
  }

  Sheet cells left as "-" are filled by the run: lengths by scale
  prediction, areas by facet estimation (row order pairs rows with
  facets).

EXAMPLES:
  # Single job with a readable report
  rooftake roof.json --pretty

  # Batch a folder of jobs into ./reports
  rooftake jobs/*.json --output reports --threads 4
"#
    );
}
