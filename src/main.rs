mod cli;

use facetprep::{
    config,
    darken::{self, DarkenJob, EncodeOptions},
    partition::{self, AnnotationCollection},
};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Exit status of a darken run that finished but skipped some files.
const EXIT_SKIPPED_FILES: u8 = 2;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "facetprep=debug".to_string()
        } else {
            "facetprep=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    match cli.command {
        Commands::Partition {
            input,
            output_dir,
            pretty,
        } => {
            run_partition(cli.config.as_deref(), input, output_dir, pretty)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Darken {
            level,
            source_dir,
            output_dir,
            parallel,
            dry_run,
        } => run_darken(
            cli.config.as_deref(),
            level,
            source_dir,
            output_dir,
            parallel,
            dry_run,
        ),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Version => {
            println!("facetprep {}", env!("CARGO_PKG_VERSION"));
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_partition(
    config_path: Option<&Path>,
    input: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    pretty: bool,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    let input = input.or(config.partition.input).context(
        "No annotation file given; pass --input or set partition.input in the config file",
    )?;

    // Without an explicit output directory the groups land next to the input.
    let output_dir = output_dir
        .or(config.partition.output_dir)
        .or_else(|| input.parent().map(Path::to_path_buf))
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from("."));

    tracing::info!("Loading annotations from {:?}", input);
    let collection = AnnotationCollection::load(&input)
        .with_context(|| format!("Failed to load annotation file: {:?}", input))?;
    tracing::info!(
        "Loaded {} images and {} annotations",
        collection.images.len(),
        collection.annotations.len()
    );

    let groups = partition::partition(&collection);
    let pretty = pretty || config.partition.pretty;
    let reports = partition::write_partition(&groups, &output_dir, pretty)
        .with_context(|| format!("Failed to write partition to {:?}", output_dir))?;

    for report in &reports {
        println!("{}", report);
    }

    Ok(())
}

fn run_darken(
    config_path: Option<&Path>,
    level: Option<f32>,
    source_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    parallel: bool,
    dry_run: bool,
) -> Result<ExitCode> {
    let config = config::load_config_or_default(config_path)?;

    let source_dir = source_dir.or(config.darken.source_dir).context(
        "No source directory given; pass --source-dir or set darken.source_dir in the config file",
    )?;
    let output_dir = output_dir.or(config.darken.output_dir).context(
        "No output directory given; pass --output-dir or set darken.output_dir in the config file",
    )?;

    let levels = darken::select_levels(level, &config.darken.levels)?;
    match level {
        Some(_) => println!("Processing only level {}", levels[0]),
        None => println!("Processing all {} darkness levels", levels.len()),
    }

    let job = DarkenJob {
        source_dir,
        output_dir,
        levels,
        encode: EncodeOptions {
            jpeg_quality: config.darken.jpeg_quality,
        },
        parallel: parallel || config.darken.parallel,
    };

    if dry_run {
        let planned = job.plan()?;
        for unit in &planned {
            println!("{} -> {}", unit.source.display(), unit.destination.display());
        }
        println!("\n[DRY RUN] Would write {} images", planned.len());
        return Ok(ExitCode::SUCCESS);
    }

    let summary = darken::run_batch(&job)
        .with_context(|| format!("Darkening {:?} failed", job.source_dir))?;

    println!(
        "--- All levels complete: {} written, {} skipped across {} levels ---",
        summary.processed,
        summary.skipped(),
        summary.levels
    );

    if summary.is_clean() {
        Ok(ExitCode::SUCCESS)
    } else {
        for failure in &summary.failures {
            println!(
                "  skipped [{}] {}: {}",
                failure.level,
                failure.path.display(),
                failure.error
            );
        }
        Ok(ExitCode::from(EXIT_SKIPPED_FILES))
    }
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            print_config(&config);
        }
        None => {
            println!("No config file specified, using defaults");
            print_config(&config::Config::default());
        }
    }

    Ok(())
}

fn print_config(config: &config::Config) {
    let show = |path: &Option<PathBuf>| {
        path.as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(not set)".to_string())
    };

    println!("  Partition input: {}", show(&config.partition.input));
    println!("  Partition output: {}", show(&config.partition.output_dir));
    println!("  Darken source: {}", show(&config.darken.source_dir));
    println!("  Darken output: {}", show(&config.darken.output_dir));
    println!("  Darken levels: {:?}", config.darken.levels);
    println!("  JPEG quality: {}", config.darken.jpeg_quality);
    println!("  Parallel: {}", config.darken.parallel);
}
