use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, error::ErrorKind};

use crate::config::PipelineConfig;
use crate::constants::pipeline::DEFAULT_BLOCK_SIZE;
use crate::pipeline::AggregationPipeline;

#[derive(Debug, Parser)]
#[command(
    name = "aggregate_file",
    disable_help_subcommand = true,
    about = "Streaming min/mean/max aggregation over a delimited measurement file",
    long_about = "Aggregate a `key;value` measurement file into one line of \
        `key=min/avg/max` entries sorted by key, using a parallel \
        chunked-read pipeline with bounded memory."
)]
struct AggregateFileCli {
    #[arg(long, value_name = "PATH", help = "Path to the input file to aggregate")]
    input: PathBuf,
    #[arg(
        long,
        default_value_t = 0,
        help = "Scan worker threads (0 = available cores minus one)"
    )]
    workers: usize,
    #[arg(
        long = "block-size",
        value_name = "BYTES",
        default_value_t = DEFAULT_BLOCK_SIZE,
        help = "Raw read block size in bytes"
    )]
    block_size: usize,
    #[arg(long, help = "Print chunk/record counters after the report line")]
    show_metrics: bool,
}

/// Run the file-aggregation CLI with the provided argument iterator.
///
/// Prints the aggregated report line to stdout followed by the elapsed-time
/// report; fatal pipeline errors propagate to the caller.
pub fn run_aggregate_file_app<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let Some(cli) = parse_cli::<AggregateFileCli, _>(
        std::iter::once("aggregate_file".to_string()).chain(args_iter),
    )?
    else {
        return Ok(());
    };

    let config = PipelineConfig {
        block_size: cli.block_size,
        workers: cli.workers,
        ..Default::default()
    };
    let pipeline = AggregationPipeline::new(config)?;
    let report = pipeline.run(&cli.input)?;

    println!("{}", report.to_line());
    if cli.show_metrics {
        let metrics = report.metrics;
        println!(
            "Chunks: {} ({} bytes), records: {} parsed / {} skipped",
            metrics.chunks_dispatched,
            metrics.bytes_read,
            metrics.records_parsed,
            metrics.records_skipped
        );
    }
    println!("Execution time: {:?}", report.elapsed);
    Ok(())
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(err.into()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults_match_pipeline_defaults() {
        let cli = AggregateFileCli::try_parse_from(["aggregate_file", "--input", "data.txt"])
            .expect("minimal args parse");
        assert_eq!(cli.workers, 0);
        assert_eq!(cli.block_size, DEFAULT_BLOCK_SIZE);
        assert!(!cli.show_metrics);
        assert_eq!(cli.input, PathBuf::from("data.txt"));
    }

    #[test]
    fn cli_accepts_tuning_flags() {
        let cli = AggregateFileCli::try_parse_from([
            "aggregate_file",
            "--input",
            "data.txt",
            "--workers",
            "4",
            "--block-size",
            "65536",
            "--show-metrics",
        ])
        .expect("tuned args parse");
        assert_eq!(cli.workers, 4);
        assert_eq!(cli.block_size, 65536);
        assert!(cli.show_metrics);
    }

    #[test]
    fn missing_input_flag_is_a_parse_error() {
        assert!(AggregateFileCli::try_parse_from(["aggregate_file"]).is_err());
    }
}
