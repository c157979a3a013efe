//! docmd CLI - Word to Markdown conversion tool

mod inputs;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docmd::{
    convert_batch, BatchJob, ConvertOptions, OutputFormat, OutputLayout, ParseOptions,
    RenderOptions,
};

use inputs::{assign_names, expand_inputs, InputFile};

#[derive(Parser)]
#[command(name = "docmd")]
#[command(version)]
#[command(about = "Convert Word documents (.docx, .doc) to Markdown", long_about = None)]
#[command(after_help = "Examples:\n  \
    docmd report.docx                  # writes report/report.md\n  \
    docmd report.docx -o out.md        # writes out.md and assets/ next to it\n  \
    docmd \"*.docx\" -o converted/       # batch conversion")]
struct Cli {
    /// Input Word files; `*` and `?` are expanded in the file name
    #[arg(value_name = "INPUT", required = true)]
    inputs: Vec<String>,

    /// Output file, or directory for several inputs
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Include YAML frontmatter from document properties
    #[arg(long)]
    frontmatter: bool,

    /// Write the converted block structure as JSON instead of Markdown
    #[arg(long)]
    json: bool,

    /// Limit heading level jumps and strip trailing heading punctuation
    #[arg(long)]
    normalize_headings: bool,

    /// Skip unreadable styles, numbering or media parts instead of failing
    #[arg(long)]
    lenient: bool,

    /// Number of documents converted in parallel
    #[arg(short, long, value_name = "N")]
    jobs: Option<usize>,

    /// Office suite binary used for legacy .doc input
    #[arg(long, value_name = "PATH", env = "DOCMD_SOFFICE_PATH")]
    soffice: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

/// Convert every input; `Ok(false)` when at least one failed.
fn run(cli: &Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let expansion = expand_inputs(&cli.inputs);
    for pattern in &expansion.unmatched {
        eprintln!("{} no files match {}", "Warning:".yellow(), pattern);
    }
    for skipped in &expansion.skipped {
        eprintln!(
            "{} skipping non-Word file {}",
            "Warning:".yellow(),
            skipped.display()
        );
    }
    if expansion.files.is_empty() {
        return Err("no Word documents to convert".into());
    }

    let options = build_options(cli);
    let files = assign_names(&expansion.files);
    let jobs = plan_jobs(&files, cli.output.as_deref(), options.output_format)?;

    let pb = progress_bar(jobs.len());
    let outcomes = match cli.jobs {
        Some(threads) => rayon::ThreadPoolBuilder::new()
            .num_threads(threads.max(1))
            .build()?
            .install(|| convert_batch(&jobs, &options)),
        None => convert_batch(&jobs, &options),
    };
    pb.finish_and_clear();

    let mut failures = 0;
    for (job, outcome) in jobs.iter().zip(&outcomes) {
        match &outcome.result {
            Ok(result) => {
                if cli.output.is_none() {
                    println!("=== {} ===", outcome.input.display());
                    print!("{}", result.content);
                }
                for warning in &result.warnings {
                    eprintln!(
                        "{} {}: {}",
                        "Warning:".yellow(),
                        outcome.input.display(),
                        warning
                    );
                }
                if let Some(ref layout) = job.layout {
                    eprintln!(
                        "{} {} -> {}",
                        "Converted".green(),
                        outcome.input.display(),
                        layout.output_file.display()
                    );
                }
            }
            Err(e) => {
                failures += 1;
                eprintln!(
                    "{} {}: {}",
                    "Failed".red().bold(),
                    outcome.input.display(),
                    e
                );
            }
        }
    }

    if jobs.len() > 1 {
        let summary = format!(
            "{} converted, {} failed",
            jobs.len() - failures,
            failures
        );
        if failures == 0 {
            eprintln!("{}", summary.green().bold());
        } else {
            eprintln!("{}", summary.red().bold());
        }
    }

    Ok(failures == 0)
}

fn build_options(cli: &Cli) -> ConvertOptions {
    let mut parse = ParseOptions::new();
    if cli.lenient {
        parse = parse.lenient();
    }
    if let Some(ref soffice) = cli.soffice {
        parse = parse.with_soffice_path(soffice);
    }

    let render = RenderOptions::new()
        .with_frontmatter(cli.frontmatter)
        .with_heading_normalization(cli.normalize_headings)
        .with_stats(cli.verbose);

    ConvertOptions::new()
        .with_parse_options(parse)
        .with_render_options(render)
        .with_format(if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Markdown
        })
}

/// Output layout per input. Several inputs always treat `-o` as a directory.
fn plan_jobs(
    files: &[InputFile],
    output: Option<&Path>,
    format: OutputFormat,
) -> Result<Vec<BatchJob>, Box<dyn std::error::Error>> {
    if let Some(out) = output {
        if files.len() > 1 {
            fs::create_dir_all(out)?;
        }
    }

    Ok(files
        .iter()
        .map(|file| {
            let layout = OutputLayout::resolve_named(&file.name, output, format);
            BatchJob::new(file.path.clone(), layout)
        })
        .collect())
}

fn progress_bar(len: usize) -> ProgressBar {
    if len < 2 {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(format!("Converting {} documents...", len));
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::parse_from([
            "docmd",
            "a.docx",
            "b.doc",
            "-o",
            "out",
            "-v",
            "--json",
            "--normalize-headings",
            "-j",
            "2",
        ]);
        assert_eq!(cli.inputs, vec!["a.docx", "b.doc"]);
        assert_eq!(cli.output, Some(PathBuf::from("out")));
        assert!(cli.verbose && cli.json && cli.normalize_headings);
        assert_eq!(cli.jobs, Some(2));

        let options = build_options(&cli);
        assert_eq!(options.output_format, OutputFormat::Json);
        assert!(options.render.normalize_headings);
        assert!(options.render.collect_stats);
    }

    #[test]
    fn test_plan_jobs_forces_directory_for_batches() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("converted");
        let files = assign_names(&[PathBuf::from("x/a.docx"), PathBuf::from("y/a.docx")]);

        let jobs = plan_jobs(&files, Some(&out), OutputFormat::Markdown).unwrap();
        assert!(out.is_dir());
        let outputs: Vec<PathBuf> = jobs
            .iter()
            .filter_map(|j| j.layout.as_ref().map(|l| l.output_file.clone()))
            .collect();
        assert_eq!(
            outputs,
            vec![out.join("a").join("a.md"), out.join("a_2").join("a_2.md")]
        );
    }

    #[test]
    fn test_plan_single_file_output() {
        let files = assign_names(&[PathBuf::from("report.docx")]);
        let jobs = plan_jobs(&files, Some(Path::new("out/final.md")), OutputFormat::Markdown)
            .unwrap();
        let layout = jobs[0].layout.as_ref().unwrap();
        assert_eq!(layout.output_file, PathBuf::from("out/final.md"));
    }
}
