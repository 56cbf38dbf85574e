//! Environment variable source: DAQ_APPENV__* prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add environment variable overlay to builder.
/// `DAQ_APPENV__DATABASE__SCHEME=jsonconfig` sets `database.scheme`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix("DAQ_APPENV")
            .separator("__")
            .try_parsing(true),
    );
    Ok(builder)
}
