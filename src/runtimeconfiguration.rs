use bon::bon;

use crate::gdalinterop;
use crate::Result;

/// Process wide GDAL configuration, applied once at startup.
pub struct RuntimeConfiguration {
    debug_logging: bool,
    config_options: Vec<(String, String)>,
}

#[bon]
impl RuntimeConfiguration {
    #[builder]
    pub fn new(debug_logging: Option<bool>, config_options: Option<Vec<(String, String)>>) -> Self {
        Self {
            debug_logging: debug_logging.unwrap_or(false),
            config_options: config_options.unwrap_or_default(),
        }
    }

    /// Installs the diagnostics handler and applies the configured GDAL options.
    /// Safe to call more than once, handler registration only happens the first time.
    pub fn apply(&self) -> Result<()> {
        gdalinterop::install_diagnostics_handler();

        if self.debug_logging && gdal::config::set_config_option("CPL_DEBUG", "ON").is_err() {
            log::debug!("Failed to set GDAL debug level");
        }

        for (key, value) in &self.config_options {
            gdal::config::set_config_option(key, value)?;
        }

        Ok(())
    }
}
