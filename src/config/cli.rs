// Command-line argument parsing for the `serve` binary

use crate::error::CliError;

use super::resolve::ServeOption;

pub const USAGE: &str = "\
Serve a directory over HTTP with a health endpoint at /healthz.

Usage: serve [OPTIONS]

Options:
  --host <HOST>      Bind address (default: $HOST or 0.0.0.0)
  --port <PORT>      Port to listen on (default: $PORT or 8000)
  --dir <DIR>        Directory to serve (default: $ROOT_DIR or current working directory)
  --config <PATH>    Settings file for logging/http options (default: serve.toml, optional)
  -h, --help         Print help
  -V, --version      Print version";

/// Raw command-line values; nothing here is defaulted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub host: Option<String>,
    pub port: Option<String>,
    pub dir: Option<String>,
    pub config: Option<String>,
    pub help: bool,
    pub version: bool,
}

impl CliArgs {
    /// Parse arguments, excluding the program name.
    ///
    /// Accepts `--flag value` and `--flag=value`. A later occurrence of a flag
    /// replaces an earlier one.
    pub fn parse<I, S>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut parsed = Self::default();
        let mut args = args
            .into_iter()
            .map(Into::into)
            .collect::<Vec<String>>()
            .into_iter();

        while let Some(arg) = args.next() {
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) if flag.starts_with("--") => {
                    (flag.to_string(), Some(value.to_string()))
                }
                _ => (arg.clone(), None),
            };

            if let Some(option) = ServeOption::from_flag(&flag) {
                let value = take_value(option.flag(), inline, &mut args)?;
                *parsed.slot(option) = Some(value);
                continue;
            }

            match flag.as_str() {
                "-h" | "--help" => parsed.help = true,
                "-V" | "--version" => parsed.version = true,
                "--config" => parsed.config = Some(take_value("--config", inline, &mut args)?),
                _ => return Err(CliError::UnknownArgument(arg)),
            }
        }

        Ok(parsed)
    }

    /// Value given on the command line for one of the server options
    pub fn value(&self, option: ServeOption) -> Option<&str> {
        match option {
            ServeOption::Host => self.host.as_deref(),
            ServeOption::Port => self.port.as_deref(),
            ServeOption::Dir => self.dir.as_deref(),
        }
    }

    fn slot(&mut self, option: ServeOption) -> &mut Option<String> {
        match option {
            ServeOption::Host => &mut self.host,
            ServeOption::Port => &mut self.port,
            ServeOption::Dir => &mut self.dir,
        }
    }
}

fn take_value(
    flag: &'static str,
    inline: Option<String>,
    rest: &mut impl Iterator<Item = String>,
) -> Result<String, CliError> {
    if let Some(value) = inline {
        return Ok(value);
    }
    match rest.next() {
        Some(value) if !value.starts_with("--") => Ok(value),
        _ => Err(CliError::MissingValue(flag)),
    }
}
