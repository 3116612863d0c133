use crate::cli::InvokerArgs;
use crate::InvokerError;

pub const HOST_VAR: &str = "LLAMA_STACK_SERVER_HOST";
pub const PORT_VAR: &str = "LLAMA_STACK_SERVER_PORT";
pub const MODEL_VAR: &str = "INFERENCE_MODEL";

/// Where the server lives and which model to ask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: String,
    pub model_id: String,
}

impl Config {
    /// Resolves every value through `lookup`; the first absent key is reported.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, InvokerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require =
            |key: &'static str| lookup(key).ok_or(InvokerError::MissingConfiguration(key));
        Ok(Self {
            host: require(HOST_VAR)?,
            port: require(PORT_VAR)?,
            model_id: require(MODEL_VAR)?,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl TryFrom<&InvokerArgs> for Config {
    type Error = InvokerError;

    fn try_from(value: &InvokerArgs) -> Result<Self, Self::Error> {
        Self::from_lookup(|key| match key {
            HOST_VAR => value.host.clone(),
            PORT_VAR => value.port.clone(),
            MODEL_VAR => value.model.clone(),
            _ => None,
        })
    }
}
