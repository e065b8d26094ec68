use serde::Deserialize;

use ocpp_envelope_core::error::{OcppError, Result};
use ocpp_envelope_core::protocol::CodecOptions;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InspectConfig {
    pub version: u32,

    #[serde(default)]
    pub codec: CodecOptions,

    #[serde(default)]
    pub output: OutputSection,

    #[serde(default)]
    pub log: LogSection,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            version: 1,
            codec: CodecOptions::default(),
            output: OutputSection::default(),
            log: LogSection::default(),
        }
    }
}

impl InspectConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(OcppError::UnsupportedVersion);
        }

        self.log.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
        }
    }
}

fn default_pretty() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogSection {
    /// `tracing_subscriber::EnvFilter` directive, used when `RUST_LOG` is unset.
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

impl LogSection {
    pub fn validate(&self) -> Result<()> {
        if self.filter.trim().is_empty() {
            return Err(OcppError::BadConfig("log.filter must not be empty".into()));
        }
        Ok(())
    }
}

fn default_filter() -> String {
    "info".into()
}
