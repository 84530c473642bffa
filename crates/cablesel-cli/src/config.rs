//! Configuration file handling.
//!
//! The configuration lives in `~/.cablesel/config.toml` unless `--config`
//! names another file. Every section is optional; a missing file means the
//! built-in defaults.
//!
//! ```toml
//! [economics]
//! electricity_price_per_mwh = 2500.0
//! horizon_years = 10.0
//! currency = "TL"
//!
//! [economics.daily_hours]
//! industrial = 10.0
//! residential = 5.0
//!
//! [defaults]
//! system_voltage = 0.8
//! topology = "single-core"
//!
//! [catalog]
//! path = "/data/cables.csv"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use cablesel_algo::EconomicParams;
use cablesel_core::units::{Celsius, Kilometers, Kilovolts, Megavars, Megawatts};
use cablesel_core::{Arrangement, LoadCategory, LoadSpec, RawLoadInput, Topology};
use serde::{Deserialize, Serialize};

use crate::cli::LoadArgs;

pub const CONFIG_FILE: &str = "config.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CableselConfig {
    #[serde(default)]
    pub economics: EconomicParams,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Load inputs used when a flag is omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// MW
    pub active_power: f64,
    /// MVar
    pub reactive_power: f64,
    /// kV
    pub system_voltage: f64,
    pub parallel_circuits: u32,
    /// km
    pub cable_length: f64,
    /// °C
    pub ambient_temp: f64,
    pub topology: Topology,
    pub arrangement: Arrangement,
    pub load_category: LoadCategory,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self::from_spec(&LoadSpec::default())
    }
}

impl DefaultsConfig {
    pub fn from_spec(spec: &LoadSpec) -> Self {
        Self {
            active_power: spec.active_power.value(),
            reactive_power: spec.reactive_power.value(),
            system_voltage: spec.system_voltage.value(),
            parallel_circuits: spec.parallel_circuits,
            cable_length: spec.cable_length.value(),
            ambient_temp: spec.ambient_temp.value(),
            topology: spec.topology,
            arrangement: spec.arrangement,
            load_category: spec.load_category,
        }
    }

    pub fn to_spec(&self) -> LoadSpec {
        LoadSpec {
            active_power: Megawatts(self.active_power),
            reactive_power: Megavars(self.reactive_power),
            system_voltage: Kilovolts(self.system_voltage),
            parallel_circuits: self.parallel_circuits,
            cable_length: Kilometers(self.cable_length),
            ambient_temp: Celsius(self.ambient_temp),
            topology: self.topology,
            arrangement: self.arrangement,
            load_category: self.load_category,
        }
    }

    /// Text inputs from these defaults with any given flags laid over them.
    pub fn overlay(&self, args: &LoadArgs) -> RawLoadInput {
        let base = RawLoadInput::from_spec(&self.to_spec());
        let pick = |flag: &Option<String>, default: String| flag.clone().unwrap_or(default);
        RawLoadInput {
            active_power: pick(&args.active_power, base.active_power),
            reactive_power: pick(&args.reactive_power, base.reactive_power),
            system_voltage: pick(&args.system_voltage, base.system_voltage),
            parallel_circuits: pick(&args.parallel_circuits, base.parallel_circuits),
            cable_length: pick(&args.cable_length, base.cable_length),
            ambient_temp: pick(&args.ambient_temp, base.ambient_temp),
            topology: pick(&args.topology, base.topology),
            arrangement: pick(&args.arrangement, base.arrangement),
            load_category: pick(&args.category, base.load_category),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// External catalog file; the built-in table when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// `~/.cablesel`
pub fn config_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".cablesel"))
        .ok_or_else(|| anyhow!("cannot determine home directory"))
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE))
}

impl CableselConfig {
    /// Load from `path` if given, else from the default location.
    ///
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => default_config_path()?,
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        fs::write(path, self.to_toml()?)
            .with_context(|| format!("writing config {}", path.display()))?;
        Ok(())
    }
}
