//! Generate command implementation.
//!
//! Converts one photo, several photos or whole directories into avatars.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use clap::Args;
use rayon::prelude::*;

use crate::discovery::{
    clean_path, collect_inputs, default_output_path, load_config, output_path_in, Manifest,
};
use crate::error::{AvatarError, Result};
use crate::output::{display_path, format_size, plural, Printer};
use crate::render::{generate, AvatarOptions, AvatarResult, ImageSource, OutputTarget};

/// Generate pixel-art avatars from photos
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Images or directories to convert (prompts for a path when omitted)
    pub inputs: Vec<PathBuf>,

    /// Output file for a single input, output directory for several
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Pixel grid size, 8-128 (lower is more pixelated) [default: 32]
    #[arg(long, short = 'p', value_name = "N")]
    pub pixels: Option<u32>,

    /// Output image size, 32-2048 [default: 512]
    #[arg(long, short = 's', value_name = "N")]
    pub size: Option<u32>,

    /// Palette style [default: 8bit]
    #[arg(long)]
    pub style: Option<String>,

    /// Config file (default: ./avatar.yaml when present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print results as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

/// One planned conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Job {
    input: PathBuf,
    output: PathBuf,
}

pub fn run(args: GenerateArgs, printer: &Printer) -> Result<Vec<AvatarResult>> {
    let config = load_config(Path::new("."), args.config.as_deref())?;
    if let Some(path) = &config.path {
        printer.info("Config", &display_path(path));
    }

    let options = config.manifest.resolve_options(args.pixels, args.size, args.style.as_deref());
    options.validate()?;

    let inputs = if args.inputs.is_empty() {
        vec![prompt_for_input(printer)?]
    } else {
        args.inputs
            .iter()
            .map(|p| PathBuf::from(clean_path(&p.to_string_lossy())))
            .collect()
    };

    let batch = inputs.len() > 1 || inputs.iter().any(|p| p.is_dir());
    let jobs = plan_jobs(&inputs, args.output.as_deref(), &config.manifest, &options.style, batch)?;

    let results = if batch {
        run_batch(&jobs, &options, printer)?
    } else {
        vec![run_single(&jobs[0], &options, printer)?]
    };

    if args.json {
        print_json(&results, batch)?;
    }

    Ok(results)
}

fn prompt_for_input(printer: &Printer) -> Result<PathBuf> {
    let line = printer
        .prompt("Drag & drop your image here:")
        .map_err(|e| AvatarError::InvalidParameter {
            message: format!("Failed to read input path: {}", e),
            help: None,
        })?;

    let cleaned = clean_path(&line);
    if cleaned.is_empty() {
        return Err(AvatarError::InvalidParameter {
            message: "No input path given".to_string(),
            help: Some("Pass an image path: avatar generate photo.jpg".to_string()),
        });
    }
    Ok(PathBuf::from(cleaned))
}

/// Decide where each input's avatar goes.
///
/// A single input writes to `--output` as a file; a batch treats it as a
/// directory and mirrors each scanned file's subdirectory inside it.
/// Without either, the config's `output_dir` or the input's own directory
/// is used.
fn plan_jobs(
    inputs: &[PathBuf],
    output: Option<&Path>,
    manifest: &Manifest,
    style: &str,
    batch: bool,
) -> Result<Vec<Job>> {
    let files = collect_inputs(inputs);
    if files.is_empty() {
        return Err(AvatarError::InputNotFound {
            path: inputs.first().cloned().unwrap_or_default(),
            message: "No supported images found".to_string(),
        });
    }

    let output_dir = if batch {
        output.or(manifest.output_dir.as_deref())
    } else {
        manifest.output_dir.as_deref()
    };

    let jobs = files
        .into_iter()
        .map(|file| {
            let output = match (batch, output, output_dir) {
                (false, Some(path), _) => path.to_path_buf(),
                (_, _, Some(dir)) => output_path_in(&dir.join(&file.subdir), &file.path, style),
                _ => default_output_path(&file.path, style),
            };
            Job {
                input: file.path,
                output,
            }
        })
        .collect();

    Ok(jobs)
}

fn run_single(job: &Job, options: &AvatarOptions, printer: &Printer) -> Result<AvatarResult> {
    print_generating(job, options, printer);
    let result = generate(
        &ImageSource::Path(job.input.clone()),
        &OutputTarget::Path(job.output.clone()),
        options,
    )?;
    print_finished(&result, printer);
    Ok(result)
}

fn run_batch(jobs: &[Job], options: &AvatarOptions, printer: &Printer) -> Result<Vec<AvatarResult>> {
    for job in jobs {
        print_generating(job, options, printer);
    }

    let clashes = clashing_outputs(jobs);

    let outcomes: Vec<Result<AvatarResult>> = jobs
        .par_iter()
        .map(|job| {
            if clashes.contains(job.output.as_path()) {
                return Err(AvatarError::OutputWrite {
                    path: job.output.clone(),
                    message: "Output path is shared with another input in this batch".to_string(),
                });
            }
            generate(
                &ImageSource::Path(job.input.clone()),
                &OutputTarget::Path(job.output.clone()),
                options,
            )
        })
        .collect();

    let mut results = Vec::new();
    let mut failed = 0;
    for (job, outcome) in jobs.iter().zip(outcomes) {
        match outcome {
            Ok(result) => {
                print_finished(&result, printer);
                results.push(result);
            }
            Err(e) => {
                failed += 1;
                printer.error("Failed", &format!("{}: {}", display_path(&job.input), e));
            }
        }
    }

    printer.status(
        "Finished",
        &format!(
            "{} of {}",
            plural(results.len(), "avatar", "avatars"),
            jobs.len()
        ),
    );

    if failed > 0 {
        return Err(AvatarError::Batch {
            failed,
            total: jobs.len(),
        });
    }
    Ok(results)
}

/// Output paths that more than one job would write, or that another job
/// reads as its input. Jobs writing these are failed instead of run.
fn clashing_outputs(jobs: &[Job]) -> HashSet<&Path> {
    let mut counts: HashMap<&Path, usize> = HashMap::new();
    for job in jobs {
        *counts.entry(job.output.as_path()).or_default() += 1;
    }
    let inputs: HashSet<&Path> = jobs.iter().map(|job| job.input.as_path()).collect();

    counts
        .into_iter()
        .filter(|(output, n)| *n > 1 || inputs.contains(output))
        .map(|(output, _)| output)
        .collect()
}

fn print_generating(job: &Job, options: &AvatarOptions, printer: &Printer) {
    printer.status(
        "Generating",
        &format!(
            "{} ({}x{} grid, {})",
            display_path(&job.input),
            options.pixel_size,
            options.pixel_size,
            options.style
        ),
    );
}

fn print_finished(result: &AvatarResult, printer: &Printer) {
    let output = result
        .output_path
        .as_deref()
        .map(display_path)
        .unwrap_or_default();
    printer.status(
        "Wrote",
        &format!(
            "{} {}",
            output,
            printer.dim(&format!(
                "({}x{}, {})",
                result.output_size,
                result.output_size,
                format_size(result.file_size)
            ))
        ),
    );
}

fn print_json(results: &[AvatarResult], batch: bool) -> Result<()> {
    let json = if batch {
        serde_json::to_string_pretty(results)
    } else {
        serde_json::to_string_pretty(&results[0])
    };
    let json = json.map_err(|e| AvatarError::OutputWrite {
        path: PathBuf::from("<stdout>"),
        message: e.to_string(),
    })?;
    println!("{}", json);
    Ok(())
}
