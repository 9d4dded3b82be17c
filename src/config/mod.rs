use anyhow::Error;
use confique::Config;
use std::sync::{Arc, OnceLock};

#[derive(Debug, Config)]
pub struct ExprConfig {
    /// Default tracing filter, used when `RUST_LOG` is not set
    #[config(env = "SENSAPP_EXPR_LOG_FILTER", default = "info")]
    pub log_filter: String,

    /// Fail when scalar arithmetic produces NaN or an infinity
    #[config(env = "SENSAPP_EXPR_REJECT_NON_FINITE", default = true)]
    pub reject_non_finite: bool,

    #[config(env = "SENSAPP_EXPR_PRETTY_OUTPUT", default = false)]
    pub pretty_output: bool,
}

impl ExprConfig {
    pub fn load() -> Result<ExprConfig, Error> {
        let c = ExprConfig::builder()
            .env()
            .file("settings.toml")
            .load()?;

        Ok(c)
    }
}

static EXPR_CONFIG: OnceLock<Arc<ExprConfig>> = OnceLock::new();

pub fn get() -> Result<Arc<ExprConfig>, Error> {
    EXPR_CONFIG.get().cloned().ok_or_else(|| {
        Error::msg(
            "Configuration not loaded. Please call load_configuration() before using the configuration",
        )
    })
}

pub fn load_configuration() -> Result<(), Error> {
    // Check if the configuration has already been loaded
    if EXPR_CONFIG.get().is_some() {
        return Ok(());
    }

    let config = ExprConfig::load()?;
    EXPR_CONFIG.get_or_init(|| Arc::new(config));

    Ok(())
}
