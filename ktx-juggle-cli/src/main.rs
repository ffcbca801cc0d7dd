//! KTX Juggle CLI
//!
//! Converts KTX texture files to JSON and back. If the output argument is
//! omitted, the JSON is printed to stdout and no files are written. If the
//! output file is JSON, the pixel data is written to separate binary files.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use ktx_juggle::TracingSink;
use ktx_juggle::convert::{self, ConvertOptions};
use std::fmt::{self, Write as _};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

#[derive(Parser)]
#[command(name = "ktxjuggle")]
#[command(about = "Converts KTX texture files to JSON and back")]
#[command(version)]
struct Cli {
    /// Log level
    #[arg(long, value_enum, value_name = "STR", default_value = "DEBUG")]
    log: LogLevel,

    /// Max length of inlined image pattern
    #[arg(long, value_name = "INT", default_value_t = 16)]
    inline: usize,

    /// Do not align metadata and images
    #[arg(long)]
    noalign: bool,

    /// Input file name (.ktx or .json)
    #[arg(value_name = "IN")]
    input: PathBuf,

    /// Output file name (.ktx or .json)
    #[arg(value_name = "OUT")]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    #[value(name = "DEBUG")]
    Debug,
    #[value(name = "WARNING")]
    Warning,
    #[value(name = "ERROR")]
    Error,
    #[value(name = "OFF")]
    Off,
}

impl LogLevel {
    fn directive(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Warning => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }
}

/// Formats events as `LEVEL: message`
struct LevelPrefix;

impl<S, N> FormatEvent<S, N> for LevelPrefix
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let level = match *event.metadata().level() {
            Level::ERROR => "ERROR",
            Level::WARN => "WARNING",
            Level::INFO => "INFO",
            _ => "DEBUG",
        };
        write!(writer, "{}: ", level)?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn init_logging(level: LogLevel) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level.directive()))
        .with_writer(std::io::stderr)
        .event_format(LevelPrefix)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let options = ConvertOptions::new(!cli.noalign, cli.inline);
    if let Some(json) = convert_command(&cli.input, cli.output.as_deref(), &options)? {
        print!("{}", json);
    }
    Ok(())
}

fn convert_command(
    input: &Path,
    output: Option<&Path>,
    options: &ConvertOptions,
) -> Result<Option<String>> {
    let mut sink = TracingSink;
    let json = convert::convert_file(input, output, options, &mut sink)
        .with_context(|| format!("Failed to convert {}", input.display()))?;

    if let Some(output) = output {
        tracing::debug!("Wrote {}", output.display());
    }
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ktx_juggle::{KtxContainer, KtxHeader, MipLevel};

    #[test]
    fn test_default_arguments() {
        let cli = Cli::try_parse_from(["ktxjuggle", "in.ktx"]).unwrap();
        assert_eq!(cli.log, LogLevel::Debug);
        assert_eq!(cli.inline, 16);
        assert!(!cli.noalign);
        assert_eq!(cli.input, PathBuf::from("in.ktx"));
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_all_arguments() {
        let cli = Cli::try_parse_from([
            "ktxjuggle", "--log", "OFF", "--inline", "0", "--noalign", "in.json", "out.ktx",
        ])
        .unwrap();
        assert_eq!(cli.log.directive(), "off");
        assert_eq!(cli.inline, 0);
        assert!(cli.noalign);
        assert_eq!(cli.output, Some(PathBuf::from("out.ktx")));

        assert!(Cli::try_parse_from(["ktxjuggle", "--log", "INFO", "in.ktx"]).is_err());
        assert!(Cli::try_parse_from(["ktxjuggle"]).is_err());
    }

    #[test]
    fn test_convert_command() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("tex.ktx");
        let output = dir.path().join("nested").join("tex.json");

        let header = KtxHeader {
            pixel_width: 1,
            pixel_height: 1,
            ..KtxHeader::default()
        };
        let ktx = KtxContainer::new(header).with_level(MipLevel::single(vec![0xAA; 4]));
        let options = ConvertOptions::default();
        convert::write_path(&ktx, &input, &options).unwrap();

        let preview = convert_command(&input, None, &options).unwrap().unwrap();
        assert!(preview.contains("\"%AA\""));

        assert!(convert_command(&input, Some(output.as_path()), &options).unwrap().is_none());
        assert!(output.exists());

        let err = convert_command(&dir.path().join("tex.png"), None, &options).unwrap_err();
        assert!(format!("{:#}", err).contains("Input file must be .ktx or .json"));
    }
}
