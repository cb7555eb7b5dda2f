// Server option resolution
// Each option is resolved independently: command-line flag, then environment
// variable, then a built-in constant.

use std::io;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::{Path, PathBuf};

use super::cli::CliArgs;
use crate::error::StartupError;

/// The three options that decide where and what the server serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServeOption {
    Host,
    Port,
    Dir,
}

impl ServeOption {
    pub const ALL: [Self; 3] = [Self::Host, Self::Port, Self::Dir];

    /// The option a command-line flag such as `--port` sets
    pub fn from_flag(flag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|option| option.flag() == flag)
    }

    pub const fn flag(self) -> &'static str {
        match self {
            Self::Host => "--host",
            Self::Port => "--port",
            Self::Dir => "--dir",
        }
    }

    pub const fn env_var(self) -> &'static str {
        match self {
            Self::Host => "HOST",
            Self::Port => "PORT",
            Self::Dir => "ROOT_DIR",
        }
    }

    /// Constant used when neither flag nor environment provides a value.
    /// `Dir` defaults to the working directory at startup.
    fn fallback(self, cwd: &Path) -> String {
        match self {
            Self::Host => "0.0.0.0".to_string(),
            Self::Port => "8000".to_string(),
            Self::Dir => cwd.to_string_lossy().into_owned(),
        }
    }
}

/// Resolve one option. An environment variable set to the empty string still
/// counts as set.
pub fn resolve<F>(option: ServeOption, cli: &CliArgs, env: F, cwd: &Path) -> String
where
    F: Fn(&str) -> Option<String>,
{
    cli.value(option)
        .map(ToString::to_string)
        .or_else(|| env(option.env_var()))
        .unwrap_or_else(|| option.fallback(cwd))
}

/// Resolved server configuration, fixed for the life of the process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub root_dir: PathBuf,
}

impl ServerConfig {
    pub fn resolve<F>(cli: &CliArgs, env: F, cwd: &Path) -> Result<Self, StartupError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = resolve(ServeOption::Host, cli, &env, cwd);
        let port_value = resolve(ServeOption::Port, cli, &env, cwd);
        let port = port_value
            .trim()
            .parse::<u16>()
            .map_err(|source| StartupError::InvalidPort {
                value: port_value.clone(),
                source,
            })?;
        let root_dir = PathBuf::from(resolve(ServeOption::Dir, cli, &env, cwd));

        Ok(Self {
            host,
            port,
            root_dir,
        })
    }

    /// Resolve `host:port` to the address to bind. An empty host binds all
    /// IPv4 interfaces; host names are looked up and the first address wins.
    pub fn socket_addr(&self) -> Result<SocketAddr, StartupError> {
        let host = match self.host.trim() {
            "" => "0.0.0.0",
            h => h.trim_start_matches('[').trim_end_matches(']'),
        };

        let invalid = |source: io::Error| StartupError::InvalidAddress {
            host: self.host.clone(),
            port: self.port,
            source,
        };

        (host, self.port)
            .to_socket_addrs()
            .map_err(invalid)?
            .next()
            .ok_or_else(|| {
                invalid(io::Error::new(
                    io::ErrorKind::AddrNotAvailable,
                    "host resolved to no addresses",
                ))
            })
    }
}
