//! Server configuration.
//!
//! [`ServerConfig::load`] layers, lowest to highest precedence: the embedded
//! defaults below, an optional TOML file named by `--config`, environment
//! variables prefixed `MUSIC_ONTOLOGY_`, and the remaining command-line flags.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use serde::Deserialize;

use crate::error::ServerError;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
host          = "127.0.0.1"
port          = 8000
ontology_path = "data/music-ontology.owl"
cors_origins  = ["*"]
"#;

/// Prefix of the environment variables read by [`ServerConfig::load`].
pub const ENV_PREFIX: &str = "MUSIC_ONTOLOGY";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Effective server configuration after all layers are applied.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// TCP port to bind.
    pub port: u16,
    /// Ontology document loaded at startup.
    pub ontology_path: PathBuf,
    /// Origins allowed by CORS. `"*"` allows any origin.
    pub cors_origins: Vec<String>,
}

/// Command-line flags of the server binary.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "music-ontology-server",
    version,
    about = "Serve a music ontology over a JSON REST API"
)]
pub struct ServerArgs {
    /// TOML file layered over the built-in defaults.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Interface to bind.
    #[arg(long)]
    pub host: Option<String>,

    /// TCP port to bind.
    #[arg(long)]
    pub port: Option<u16>,

    /// Ontology document to load (RDF/XML, Turtle or N-Triples).
    #[arg(long, value_name = "PATH")]
    pub ontology: Option<PathBuf>,
}

impl ServerConfig {
    /// Builds the configuration from every layer, reading the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Config`] if the config file cannot be read or a
    /// value has the wrong type.
    pub fn load(args: &ServerArgs) -> Result<Self, ServerError> {
        Self::layered(args, config::Environment::with_prefix(ENV_PREFIX))
    }

    /// Return the built-in defaults without touching the filesystem or the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Config`] if the embedded defaults fail to
    /// deserialize.
    pub fn defaults() -> Result<Self, ServerError> {
        config::Config::builder()
            .add_source(config::File::from_str(
                DEFAULT_CONFIG,
                config::FileFormat::Toml,
            ))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    fn layered(args: &ServerArgs, env: config::Environment) -> Result<Self, ServerError> {
        let mut builder = config::Config::builder().add_source(config::File::from_str(
            DEFAULT_CONFIG,
            config::FileFormat::Toml,
        ));
        if let Some(path) = &args.config {
            builder = builder.add_source(config::File::from(path.as_path()).required(true));
        }

        builder
            .add_source(
                env.try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors_origins"),
            )
            .set_override_option("host", args.host.clone())?
            .set_override_option("port", args.port.map(i64::from))?
            .set_override_option(
                "ontology_path",
                args.ontology
                    .as_ref()
                    .map(|p| p.to_string_lossy().into_owned()),
            )?
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// The address to bind.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Address`] if `host:port` is not a socket
    /// address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ServerError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ServerError::Address(format!("{}:{}: {e}", self.host, self.port)))
    }

    /// Returns true if CORS should allow any origin.
    #[must_use]
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
