use std::fmt;
use std::io::{self, Write};

use clap::Parser;

use crate::config::Config;
use crate::{invoke, logger, InvokerError};

#[derive(Parser, Debug, Clone)]
#[command(name = "llama-invoke", version, about, long_about = None)]
pub struct InvokerArgs {
    /// Host of the Llama Stack server
    #[arg(long, env = "LLAMA_STACK_SERVER_HOST")]
    pub host: Option<String>,

    /// Port of the Llama Stack server
    #[arg(long, env = "LLAMA_STACK_SERVER_PORT")]
    pub port: Option<String>,

    /// Model asked for the completion
    #[arg(long, env = "INFERENCE_MODEL")]
    pub model: Option<String>,

    /// Log level, logs go to stderr
    #[arg(long = "log", env = "LLAMA_INVOKE_LOG", value_enum, default_value_t = LogLevel::default())]
    pub log_level: LogLevel,
}

#[derive(clap::ValueEnum, Default, Debug, Copy, Clone, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl AsRef<str> for LogLevel {
    fn as_ref(&self) -> &str {
        match self {
            Self::Off => "off",
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Resolves the configuration up front so a missing value fails before any request.
#[allow(clippy::missing_errors_doc)]
pub async fn execute<W: Write>(args: &InvokerArgs, out: &mut W) -> Result<(), InvokerError> {
    let config = Config::try_from(args)?;
    invoke(&config, out).await
}

#[allow(clippy::missing_errors_doc)]
pub async fn run() -> Result<(), InvokerError> {
    // values already in the environment win over .env
    let dotenv = dotenvy::dotenv();
    let args = InvokerArgs::parse();
    logger::init(args.log_level);
    if let Ok(path) = dotenv {
        log::debug!("loaded environment from {}", path.display());
    }
    execute(&args, &mut io::stdout().lock()).await
}
