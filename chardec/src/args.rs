//! Command-line argument parsing.

use std::path::PathBuf;

use chardec_core::EncodingType;

use crate::error::CliError;

/// Parsed command line.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Args {
    pub config: Option<PathBuf>,
    pub encoding: Option<EncodingType>,
    pub state: Option<PathBuf>,
    /// Input file; `None` reads stdin.
    pub input: Option<PathBuf>,
    pub verbose: bool,
    pub print_config: bool,
    pub help: bool,
    pub version: bool,
}

impl Args {
    /// Parse arguments, excluding the program name.
    ///
    /// Options taking a value accept both `--opt value` and `--opt=value`.
    /// A lone `-` names stdin.
    pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self, CliError> {
        let mut out = Self::default();
        let mut iter = args.into_iter();
        while let Some(arg) = iter.next() {
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) if flag.starts_with("--") => (flag.to_owned(), Some(value.to_owned())),
                _ => (arg.clone(), None),
            };
            let mut value = |name: &str| {
                inline
                    .clone()
                    .or_else(|| iter.next())
                    .ok_or_else(|| CliError::Usage(format!("{name} requires a value")))
            };
            match flag.as_str() {
                "-h" | "--help" => out.help = true,
                "-V" | "--version" => out.version = true,
                "-v" | "--verbose" => out.verbose = true,
                "--print-config" => out.print_config = true,
                "-c" | "--config" => out.config = Some(PathBuf::from(value("--config")?)),
                "-e" | "--encoding" => out.encoding = Some(value("--encoding")?.parse()?),
                "-s" | "--state" => out.state = Some(PathBuf::from(value("--state")?)),
                "-" => out.input = None,
                s if s.starts_with('-') => {
                    return Err(CliError::Usage(format!("unknown option {s}")));
                }
                _ => {
                    if out.input.is_some() {
                        return Err(CliError::Usage("only one input file may be given".to_owned()));
                    }
                    out.input = Some(PathBuf::from(&flag));
                }
            }
        }
        Ok(out)
    }
}
