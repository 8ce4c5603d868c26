use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "facetprep")]
#[command(author, version, about = "Dataset preparation tools for FACET/COCO data")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split an annotation file into men and women subsets
    Partition {
        /// Annotation collection to split
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Directory for gender_men.json and gender_women.json
        /// (defaults to the input file's directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Write indented JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Write darkened copies of a directory of images
    Darken {
        /// Single darkness level to apply (0.1 - 1.0); all configured levels if omitted
        #[arg(long)]
        level: Option<f32>,

        /// Directory containing the source images
        #[arg(short, long)]
        source_dir: Option<PathBuf>,

        /// Base directory for the darkness_<level> output directories
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Process the files of each level in parallel
        #[arg(long)]
        parallel: bool,

        /// Show what would be written without decoding or writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
