use std::path::PathBuf;

use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};

use crate::color_when::ColorWhen;

/// Diff and merge tablature scores stored as YAML documents
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = None,
    after_help = "Returns 0 if the diff or merge completed without conflicts\n\
                  Returns 1 if conflicts occurred\n\
                  Returns 2 if an error occurred"
)]
pub struct Args {
    /// The common ancestor
    #[arg(index = 1, value_name = "OLDFILE")]
    pub old: PathBuf,

    /// The first descendant
    #[arg(index = 2, value_name = "MYFILE")]
    pub mine: PathBuf,

    /// The second descendant, for a three-way diff
    #[arg(index = 3, value_name = "YOURFILE")]
    pub yours: Option<PathBuf>,

    /// Path to write the merged document to
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub verbose: Verbosity<WarnLevel>,

    #[arg(
        long,
        value_name = "WHEN",
        default_value = "auto",
        default_missing_value = "always",
        num_args = 0..=1,
        value_enum
    )]
    pub color: ColorWhen,
}
