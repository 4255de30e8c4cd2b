//! Streletz serial bus decoder
//!
//! Reads a capture of UART events and prints the Streletz annotation stream.

mod input;
mod output;

use anyhow::Context;
use clap::Parser;
use log::{debug, info};
use std::io::BufWriter;
use std::path::PathBuf;
use streletz_core::utils::parse_byte;
use streletz_core::{DecoderOptions, ANNOTATION_ROWS, DECODER_INFO, OPTIONAL_CHANNELS};
use streletz_decoder::{RowFilterSink, StreletzDecoder};
use tokio::io::{AsyncBufRead, BufReader};

use output::{OutputFormat, WriterSink};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Capture file with one UART event per line (JSON); stdin if omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// JSON file with decoder options
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Request header byte (decimal or 0x-prefixed hex)
    #[arg(long, value_parser = parse_byte)]
    header_tx: Option<u8>,

    /// Response header byte (decimal or 0x-prefixed hex)
    #[arg(long, value_parser = parse_byte)]
    header_rx: Option<u8>,

    /// Print start time (sec) in annotation
    #[arg(long)]
    print_sec: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Annotation rows to print (framing, data, warnings, packets); all if omitted
    #[arg(long, value_delimiter = ',')]
    rows: Vec<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// 配置文件打底，命令行参数覆盖
    fn decoder_options(&self) -> anyhow::Result<DecoderOptions> {
        let mut options = match &self.config {
            Some(path) => DecoderOptions::from_json_file(path)
                .with_context(|| format!("loading options from {}", path.display()))?,
            None => DecoderOptions::default(),
        };
        if let Some(header) = self.header_tx {
            options.header_tx = header;
        }
        if let Some(header) = self.header_rx {
            options.header_rx = header;
        }
        if self.print_sec {
            options.print_sec = true;
        }
        Ok(options)
    }

    fn selected_rows(&self) -> Vec<String> {
        if self.rows.is_empty() {
            ANNOTATION_ROWS.iter().map(|row| row.id.to_string()).collect()
        } else {
            self.rows.clone()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let options = args.decoder_options()?;
    for channel in OPTIONAL_CHANNELS {
        debug!("channel {} ({}): {}", channel.id, channel.name, channel.desc);
    }
    info!(
        "{}: header_tx=0x{:02X} header_rx=0x{:02X} print_sec={}",
        DECODER_INFO.longname, options.header_tx, options.header_rx, options.print_sec
    );

    let writer = WriterSink::new(BufWriter::new(std::io::stdout()), args.format);
    let sink = RowFilterSink::new(writer, args.selected_rows())?;
    let mut decoder = StreletzDecoder::new(options, sink);

    let reader: Box<dyn AsyncBufRead + Unpin> = match &args.input {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("opening {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(tokio::io::stdin())),
    };

    let count = input::feed_events(reader, &mut decoder).await?;
    info!("{count} events read");

    let (sink, stats) = decoder.finish();
    sink.into_inner().finish().context("writing annotations")?;

    match args.format {
        OutputFormat::Text => eprintln!("{stats}"),
        OutputFormat::Json => eprintln!("{}", serde_json::to_string(&stats)?),
    }
    Ok(())
}
