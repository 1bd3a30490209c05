//! NVS-backed configuration adapter.
//!
//! Implements [`ConfigPort`] over the ESP-IDF non-volatile storage
//! partition; on the host it degrades to an in-memory cell so the same
//! code paths run in tests and simulation. The config is stored as one
//! postcard-encoded blob — small, versioned only by its shape, and
//! atomic at the NVS API level.
//!
//! Validation happens on `save`: a provisioning channel must not be able
//! to persist pin indices off the board or a tick period the sequencer
//! phases cannot survive.

use log::info;

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::SystemConfig;
use crate::pins;

const NVS_NAMESPACE: &str = "gensentry";
const CONFIG_KEY: &str = "config";

/// Upper bound on the stored blob; the struct encodes well under this.
const CONFIG_BLOB_MAX: usize = 256;

/// Range-check a configuration before it is persisted.
fn validate(config: &SystemConfig) -> Result<(), ConfigError> {
    let input_pins = [
        config.ignition_in_pin,
        config.no_charge_in_pin,
        config.estop_in_pin,
    ];
    if input_pins
        .iter()
        .any(|&p| p >= pins::FIRST_ANALOG_IN_PIN + 2)
    {
        return Err(ConfigError::ValidationFailed("input pin off the board"));
    }

    let output_pins = [
        config.ignition_out_pin,
        config.starter_out_pin,
        config.horn_out_pin,
    ];
    if output_pins
        .iter()
        .any(|&p| p >= pins::FIRST_ANALOG_OUT_PIN + 2)
    {
        return Err(ConfigError::ValidationFailed("output pin off the board"));
    }

    if config.control_loop_interval_ms == 0 || config.control_loop_interval_ms > 1_000 {
        return Err(ConfigError::ValidationFailed(
            "tick period must be 1-1000 ms to resolve the crank phases",
        ));
    }
    if config.start_timeout_secs == 0 {
        return Err(ConfigError::ValidationFailed("start timeout must be nonzero"));
    }

    Ok(())
}

// ───────────────────────────────────────────────────────────────
// ESP-IDF implementation
// ───────────────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub struct NvsAdapter {
    nvs: std::sync::Mutex<esp_idf_svc::nvs::EspNvs<esp_idf_svc::nvs::NvsDefault>>,
}

#[cfg(target_os = "espidf")]
impl NvsAdapter {
    pub fn new() -> anyhow::Result<Self> {
        let partition = esp_idf_svc::nvs::EspDefaultNvsPartition::take()?;
        let nvs = esp_idf_svc::nvs::EspNvs::new(partition, NVS_NAMESPACE, true)?;
        info!("NVS namespace '{}' opened", NVS_NAMESPACE);
        Ok(Self {
            nvs: std::sync::Mutex::new(nvs),
        })
    }
}

#[cfg(target_os = "espidf")]
impl ConfigPort for NvsAdapter {
    fn load(&self) -> Result<SystemConfig, ConfigError> {
        let nvs = self.nvs.lock().map_err(|_| ConfigError::IoError)?;
        let mut buf = [0u8; CONFIG_BLOB_MAX];
        let blob = nvs
            .get_blob(CONFIG_KEY, &mut buf)
            .map_err(|_| ConfigError::IoError)?
            .ok_or(ConfigError::NotFound)?;
        postcard::from_bytes(blob).map_err(|_| ConfigError::Corrupted)
    }

    fn save(&self, config: &SystemConfig) -> Result<(), ConfigError> {
        validate(config)?;
        let bytes = postcard::to_allocvec(config).map_err(|_| ConfigError::IoError)?;
        let mut nvs = self.nvs.lock().map_err(|_| ConfigError::IoError)?;
        nvs.set_blob(CONFIG_KEY, &bytes)
            .map_err(|_| ConfigError::StorageFull)?;
        info!("config saved to NVS ({} bytes)", bytes.len());
        Ok(())
    }
}

// ───────────────────────────────────────────────────────────────
// Host (simulation / test) implementation
// ───────────────────────────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
pub struct NvsAdapter {
    blob: core::cell::RefCell<Option<Vec<u8>>>,
}

#[cfg(not(target_os = "espidf"))]
impl NvsAdapter {
    pub fn new() -> anyhow::Result<Self> {
        info!("NVS(sim): in-memory config store");
        Ok(Self {
            blob: core::cell::RefCell::new(None),
        })
    }
}

#[cfg(not(target_os = "espidf"))]
impl Default for NvsAdapter {
    fn default() -> Self {
        Self {
            blob: core::cell::RefCell::new(None),
        }
    }
}

#[cfg(not(target_os = "espidf"))]
impl ConfigPort for NvsAdapter {
    fn load(&self) -> Result<SystemConfig, ConfigError> {
        match self.blob.borrow().as_deref() {
            Some(bytes) => postcard::from_bytes(bytes).map_err(|_| ConfigError::Corrupted),
            None => Err(ConfigError::NotFound),
        }
    }

    fn save(&self, config: &SystemConfig) -> Result<(), ConfigError> {
        validate(config)?;
        let bytes = postcard::to_allocvec(config).map_err(|_| ConfigError::IoError)?;
        debug_assert!(bytes.len() <= CONFIG_BLOB_MAX);
        *self.blob.borrow_mut() = Some(bytes);
        Ok(())
    }
}
