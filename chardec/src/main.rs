//! Binary entry point for `chardec`: decode a captured terminal byte stream
//! to text on stdout.

mod args;
mod config;
mod error;
mod output;
mod state;

use std::fs::File;
use std::io::{self, ErrorKind, Read, Write};
use std::process::ExitCode;

use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};

use chardec_core::{ByteFragment, CharDecoder, CharacterSetManager};

use crate::args::Args;
use crate::config::{Config, parse_log_level};
use crate::error::CliError;
use crate::output::TextSink;

const USAGE: &str = "\
usage: chardec [options] [FILE]

Decode a terminal byte stream (ISO-2022 designators, SO/SI, DEC line
drawing, multi-byte encodings) to UTF-8 text. Reads stdin if FILE is
absent or `-`.

options:
  -c, --config PATH     TOML config file
  -e, --encoding NAME   session encoding (overrides config)
  -s, --state PATH      load charset state before, save it after
      --print-config    print the effective config and exit
  -v, --verbose         debug logging
  -V, --version         print version and exit
  -h, --help            print this help and exit
";

/// Read size per call into the decoder.
const READ_CHUNK: usize = 4096;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), CliError> {
    let args = Args::parse(std::env::args().skip(1))?;
    if args.help {
        print!("{USAGE}");
        return Ok(());
    }
    if args.version {
        println!("chardec {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(encoding) = args.encoding {
        config.decoder.encoding = encoding;
    }
    if args.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let configured = parse_log_level(&config.log_level);
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        configured.unwrap_or(LevelFilter::Warn)
    };
    init_logger(level);
    if configured.is_none() {
        log::warn!("unknown log level {:?}, using warn", config.log_level);
    }

    let mut decoder = CharDecoder::with_config(&config.decoder, TextSink::new(&config.output));
    if let Some(path) = &args.state {
        if let Some(mapping) = state::load(path)? {
            log::debug!("restoring {mapping:?} from {}", path.display());
            decoder.restore(&mapping);
        }
    }

    let input: Box<dyn Read> = match &args.input {
        Some(path) => Box::new(File::open(path).map_err(|source| CliError::File {
            path: path.clone(),
            source,
        })?),
        None => Box::new(io::stdin().lock()),
    };
    decode_stream(input, &mut decoder, &mut io::stdout().lock())?;

    if let Some(path) = &args.state {
        let mapping = decoder.charset_mapping();
        log::debug!("saving {mapping:?} to {}", path.display());
        state::save(path, &mapping)?;
    }

    let sink = decoder.sink();
    log::info!(
        "{} invalid sequence(s), {} unsupported designator(s)",
        sink.invalid_sequences(),
        sink.unsupported_designators()
    );
    Ok(())
}

/// Log to stderr; stdout carries decoded text.
fn init_logger(level: LevelFilter) {
    let config = ConfigBuilder::new().set_time_level(LevelFilter::Off).build();
    if let Err(e) = WriteLogger::init(level, config, io::stderr()) {
        eprintln!("warning: logger unavailable: {e}");
    }
}

/// Pump `input` through the decoder, writing text after every read.
fn decode_stream<R: Read, W: Write>(
    mut input: R,
    decoder: &mut CharDecoder<TextSink>,
    out: &mut W,
) -> Result<(), CliError> {
    let mut buf = [0u8; READ_CHUNK];
    loop {
        let n = match input.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        decoder.on_reception(ByteFragment::new(&buf, 0, n)?);
        out.write_all(decoder.sink_mut().take().as_bytes())?;
    }
    decoder.finish();
    out.write_all(decoder.sink_mut().take().as_bytes())?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests;
