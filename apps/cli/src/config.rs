//! CLI configuration loading and merging.

use trainbench_training::ClientConfig;

/// Load and merge CLI configuration.
///
/// Configuration precedence:
/// 1. CLI arguments (handled by clap)
/// 2. Environment variables
/// 3. Local config file (./.trainbenchrc)
/// 4. Global config file (~/.trainbench/config.toml)
/// 5. Defaults
pub fn load_config(backend_url: Option<String>) -> ClientConfig {
    let mut config = ClientConfig::discover_and_load();
    if let Some(url) = backend_url {
        config.backend_url = Some(url);
    }
    config
}
