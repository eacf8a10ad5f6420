//! filter-fasta
//!
//! Print every record whose header matches a pattern, cut to a coordinate
//! window and wrapped at a fixed width.

use clap::Parser;
use fasta_extract::io::DEFAULT_LINE_WIDTH;
use fasta_extract::{
    ExtractError, ExtractRequest, Extractions, MatchOptions, SequenceWriter, Window,
};
use log::{debug, error};
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "filter-fasta")]
#[command(author, version, about = "Extract windows of FASTA records whose headers match a pattern")]
#[command(
    long_about = "Extract windows of FASTA records whose headers match a pattern.

Coordinates are interbase: --skip 10 --end 20 prints bases 11 through 20.
Each match is printed as a '>' header line, so the output is valid FASTA.

Examples:
  filter-fasta -i genome.fa -p '^chr2 '
  filter-fasta -i genome.fa -p 'chr[0-9]+' -s 1000 -c 500 -w 60
  filter-fasta -i reads.fa -p 'strand=-' -r"
)]
struct Cli {
    /// Input FASTA or quality file
    #[arg(short = 'i', long = "in")]
    input: PathBuf,

    /// Header pattern (POSIX extended syntax)
    #[arg(short, long, default_value = ".")]
    pattern: String,

    /// Read the pattern as POSIX basic syntax
    #[arg(long)]
    basic: bool,

    /// Match headers ignoring case
    #[arg(long)]
    ignore_case: bool,

    /// Bases to skip before the window
    #[arg(short, long, visible_alias = "base-skip", default_value_t = 0)]
    skip: u64,

    /// End of the window (default: end of the sequence)
    #[arg(short, long, visible_alias = "base-end", conflicts_with = "count")]
    end: Option<u64>,

    /// Number of bases in the window
    #[arg(short, long, visible_alias = "base-count")]
    count: Option<u64>,

    /// Output line width (0 disables wrapping)
    #[arg(short, long, default_value_t = DEFAULT_LINE_WIDTH)]
    width: usize,

    /// Print the reverse complement
    #[arg(short, long)]
    rev: bool,
}

impl Cli {
    fn window(&self) -> Window {
        match (self.end, self.count) {
            (Some(end), _) => Window::new(self.skip, end),
            (None, Some(count)) => Window::with_count(self.skip, count),
            (None, None) => Window::from_start(self.skip),
        }
    }

    fn request(&self) -> ExtractRequest {
        let options = MatchOptions::extended()
            .with_extended(!self.basic)
            .with_case_insensitive(self.ignore_case)
            .with_report_captures(false);

        ExtractRequest::new(self.pattern.as_str())
            .with_window(self.window())
            .with_options(options)
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(records) => {
            debug!("Wrote {} records", records);
            ExitCode::SUCCESS
        }
        Err(err) => {
            // Engine failures are logged where they occur
            if matches!(err, ExtractError::Io(_)) {
                error!("{}", err);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> fasta_extract::Result<usize> {
    let stdout = io::stdout();
    let mut writer = SequenceWriter::new(BufWriter::new(stdout.lock()))
        .with_line_width(cli.width)
        .with_reverse_complement(cli.rev);

    for extraction in Extractions::open(&cli.input, &cli.request())? {
        let extraction = extraction?;
        writer.write_match(&extraction.matched, &extraction.sequence)?;
    }

    writer.flush()?;
    Ok(writer.records_written())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use fasta_extract::WindowEnd;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_help_mentions_header_marker() {
        let help = Cli::command().render_long_help().to_string();
        assert!(help.contains("'>' header line"));
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["filter-fasta", "-i", "in.fa"]);
        assert_eq!(cli.pattern, ".");
        assert_eq!(cli.width, DEFAULT_LINE_WIDTH);
        assert_eq!(cli.window(), Window::entire());
        assert!(cli.request().options().extended);
    }

    #[test]
    fn test_window_flags() {
        let cli = Cli::parse_from(["filter-fasta", "-i", "in.fa", "-s", "10", "-e", "20"]);
        assert_eq!(cli.window(), Window::new(10, 20));

        let cli = Cli::parse_from(["filter-fasta", "-i", "in.fa", "--base-skip", "5", "-c", "3"]);
        assert_eq!(cli.window(), Window::new(5, 8));

        let cli = Cli::parse_from(["filter-fasta", "-i", "in.fa", "-s", "7"]);
        assert_eq!(cli.window().end, WindowEnd::Entire);
    }

    #[test]
    fn test_end_conflicts_with_count() {
        let parsed = Cli::try_parse_from(["filter-fasta", "-i", "in.fa", "-e", "5", "-c", "3"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_basic_syntax_flag() {
        let cli = Cli::parse_from(["filter-fasta", "-i", "in.fa", "--basic", "--ignore-case"]);
        let request = cli.request();
        assert!(!request.options().extended);
        assert!(request.options().case_insensitive);
    }
}
