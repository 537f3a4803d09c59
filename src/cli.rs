use crate::{constants::*, io::vcf_writer::OutputType};
use anyhow::{anyhow, Result};
use chrono::Datelike;
use clap::{ArgAction, Parser};
use env_logger::fmt::Color;
use log::{Level, LevelFilter};
use once_cell::sync::Lazy;
use std::{
    io::Write,
    path::{Path, PathBuf},
};

/// Full version string including the crate version and git description.
///
/// # Examples
/// * `0.1.0-1ba958a-dirty` - while on a dirty branch
/// * `0.1.0-1ba958a` - with a fresh commit
pub static FULL_VERSION: Lazy<String> = Lazy::new(|| {
    let git_describe = env!("VERGEN_GIT_DESCRIBE");
    if git_describe.is_empty() {
        env!("CARGO_PKG_VERSION").to_string()
    } else {
        format!("{}-{}", env!("CARGO_PKG_VERSION"), git_describe)
    }
});

#[derive(Parser, Debug)]
#[command(name="vcfpolyx",
          version=&**FULL_VERSION,
          about="Number of repeated REF bases around POS",
          long_about = None,
          after_help = format!("Copyright (C) 2014-{} Pierre Lindenbaum. This program comes with ABSOLUTELY NO WARRANTY.", chrono::Utc::now().year()),
          help_template = "{name} {version}\n{about-section}\n{usage-heading}\n    {usage}\n\n{all-args}{after-help}",
          )]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(flatten)]
    pub args: PolyxArgs,

    /// Specify multiple times to increase verbosity level (e.g., -vv for more verbosity)
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        global = true
    )]
    pub verbosity: u8,
}

#[derive(Parser, Debug, Clone)]
pub struct PolyxArgs {
    /// VCF/BCF file to annotate [default: standard input]
    #[arg(value_name = "VCF", value_parser = check_input_exists)]
    pub input: Option<PathBuf>,

    /// Indexed FASTA reference (a .fai index must exist next to it)
    #[arg(
        short = 'R',
        long = "reference",
        value_name = "FASTA",
        required = true,
        value_parser = check_file_exists
    )]
    pub reference: PathBuf,

    /// Tag used in the INFO and FILTER columns
    #[arg(
        short = 't',
        long = "tag",
        value_name = "TAG",
        default_value = DEFAULT_TAG,
        value_parser = check_tag
    )]
    pub tag: String,

    /// Set FILTER=<TAG>_ge_<N> when the number of repeated bases is greater or equal to N (negative disables)
    #[arg(
        short = 'n',
        long = "filter",
        value_name = "N",
        default_value_t = DEFAULT_THRESHOLD,
        allow_negative_numbers = true
    )]
    pub threshold: i32,

    /// Do not compute the tag for records that are already FILTERed
    #[arg(long = "skip-filtered", default_value_t = DEFAULT_SKIP_FILTERED)]
    pub skip_filtered: bool,

    /// Write output to a file [default: standard output]
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        value_parser = check_prefix_path
    )]
    pub output: Option<String>,

    /// Output type: u|b|v|z, u/b: un/compressed BCF, v/z: un/compressed VCF
    #[arg(
        short = 'O',
        long = "output-type",
        value_name = "OUTPUT_TYPE",
        value_parser = validate_output_type,
        help_heading = "Advanced"
    )]
    pub output_type: Option<OutputType>,

    /// Do not append version and command line to the header
    #[arg(
        long = "no-version",
        default_value_t = DEFAULT_NO_VERSION,
        help_heading = "Advanced"
    )]
    pub no_version: bool,
}

/// Initializes the verbosity level for logging based on the command-line arguments.
///
/// # Arguments
///
/// * `args` - A reference to the parsed command-line arguments.
pub fn init_verbose(args: &Cli) {
    let filter_level: LevelFilter = match args.verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let level = record.level();
            let mut style = buf.style();
            match record.level() {
                Level::Error => style.set_color(Color::Red),
                Level::Warn => style.set_color(Color::Yellow),
                Level::Info => style.set_color(Color::Green),
                Level::Debug => style.set_color(Color::Blue),
                Level::Trace => style.set_color(Color::Cyan),
            };

            writeln!(
                buf,
                "{} [{}] {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                style.value(level),
                record.module_path().unwrap_or("unknown_module"),
                record.args()
            )
        })
        .filter_level(filter_level)
        .init();
}

/// Checks if the provided file path exists.
///
/// # Arguments
///
/// * `s` - A string slice representing the file path to check.
///
/// # Returns
///
/// Returns a `Result<PathBuf>` which is Ok if the file exists, or an Err with a descriptive message if not.
fn check_file_exists(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if !path.exists() {
        return Err(anyhow!("File does not exist: {}", path.display()));
    }
    Ok(path.to_path_buf())
}

fn check_input_exists(s: &str) -> Result<PathBuf> {
    if s == "-" {
        return Ok(PathBuf::from(s));
    }
    check_file_exists(s)
}

fn check_prefix_path(s: &str) -> Result<String> {
    let path = Path::new(s);
    if let Some(parent_dir) = path.parent() {
        if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
            return Err(anyhow!("Path does not exist: {}", parent_dir.display()));
        }
    }
    Ok(s.to_string())
}

fn check_tag(s: &str) -> Result<String> {
    let tag = s.trim();
    if tag.is_empty() {
        return Err(anyhow!("Tag must not be empty"));
    }
    if let Some(c) = tag
        .chars()
        .find(|c| c.is_whitespace() || matches!(c, ',' | ';' | '=' | '<' | '>' | '"'))
    {
        return Err(anyhow!("Tag `{}` contains the invalid character {:?}", tag, c));
    }
    Ok(tag.to_string())
}

fn validate_output_type(s: &str) -> Result<OutputType> {
    match s {
        "u" => Ok(OutputType::Bcf {
            is_uncompressed: true,
        }),
        "v" => Ok(OutputType::Vcf {
            is_uncompressed: true,
        }),
        "b" => Ok(OutputType::Bcf {
            is_uncompressed: false,
        }),
        "z" => Ok(OutputType::Vcf {
            is_uncompressed: false,
        }),
        _ => Err(anyhow!(
            "Invalid output type: {}. Must be one of u, b, v, z.",
            s
        )),
    }
}
