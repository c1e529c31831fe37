//! Transmission and Emission Spectroscopy Metrics (Kempton et al. 2018, PASP 130, 114401).
//!
//! Both metrics are proportional to the expected signal-to-noise of a JWST/NIRISS
//! (TSM) or MIRI/LRS (ESM) observation, normalised so targets can be ranked.
//!
//! Inputs are read from [`PlanetProperties`]:
//!
//! | Metric | Keys |
//! |--------|------|
//! | TSM | `Rp`, `Mp`, `Rs`, `Teq` (or `Teff` + `a`), `Jmag` |
//! | ESM | `Rp`, `Rs`, `Teq` (or `Teff` + `a`), `Teff`, `Kmag` |

use crate::error::MetricError;
use crate::models::{AU_TO_SOLAR_RADIUS, PlanetProperties, SOLAR_TO_EARTH_RADII};

/// Keys the TSM reads.
pub const TSM_REQUIRED: &[&str] = &["Rp", "Mp", "Rs", "Teq", "Jmag"];

/// Keys the ESM reads.
pub const ESM_REQUIRED: &[&str] = &["Rp", "Rs", "Teq", "Teff", "Kmag"];

/// ESM normalisation constant.
pub const ESM_SCALE: f64 = 4.29e6;

/// Dayside temperature over equilibrium temperature.
pub const DAYSIDE_FACTOR: f64 = 1.10;

/// Reference wavelength of the ESM, metres.
pub const ESM_WAVELENGTH_M: f64 = 7.5e-6;

/// Second radiation constant hc/k, metre kelvin.
const HC_OVER_K: f64 = 1.438_776_877e-2;

/// TSM scale factor for a planet radius in Earth radii (Kempton et al. 2018, Table 1).
///
/// Radii above 10 R⊕ keep the sub-Jovian factor.
#[must_use]
pub fn tsm_scale_factor(rp_earth: f64) -> f64 {
    if rp_earth < 1.5 {
        0.190
    } else if rp_earth < 2.75 {
        1.26
    } else if rp_earth < 4.0 {
        1.28
    } else {
        1.15
    }
}

/// Equilibrium temperature for zero albedo and full heat redistribution.
#[must_use]
pub fn equilibrium_temperature(teff: f64, rs_solar: f64, a_au: f64) -> f64 {
    teff * (rs_solar / (a_au * AU_TO_SOLAR_RADIUS)).sqrt() * 0.25_f64.powf(0.25)
}

/// Ratio of Planck spectral radiances B(λ, t_num) / B(λ, t_den).
#[must_use]
pub fn planck_ratio(wavelength_m: f64, t_num: f64, t_den: f64) -> f64 {
    let x = |t: f64| HC_OVER_K / (wavelength_m * t);
    (x(t_den).exp() - 1.0) / (x(t_num).exp() - 1.0)
}

/// Inputs of the TSM, in the units of the published formula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TsmInputs {
    /// Planet radius, Earth radii.
    pub rp_earth: f64,
    /// Planet mass, Earth masses.
    pub mp_earth: f64,
    /// Stellar radius, solar radii.
    pub rs_solar: f64,
    /// Equilibrium temperature, K.
    pub teq: f64,
    /// Host J magnitude.
    pub jmag: f64,
}

impl TsmInputs {
    /// Gather and validate the inputs from a property record.
    pub fn from_properties(props: &PlanetProperties) -> Result<Self, MetricError> {
        ensure_present(props, TSM_REQUIRED)?;
        Ok(Self {
            rp_earth: positive("Rp", props.radius_earth())?,
            mp_earth: positive("Mp", props.mass_earth())?,
            rs_solar: positive("Rs", props.rs)?,
            teq: positive("Teq", teq(props))?,
            jmag: required("Jmag", props.jmag)?,
        })
    }

    /// TSM = SF · Rp³ · Teq / (Mp · Rs²) · 10^(−mJ/5)
    #[must_use]
    pub fn tsm(&self) -> f64 {
        tsm_scale_factor(self.rp_earth) * self.rp_earth.powi(3) * self.teq
            / (self.mp_earth * self.rs_solar.powi(2))
            * 10f64.powf(-self.jmag / 5.0)
    }
}

/// Inputs of the ESM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EsmInputs {
    /// Planet radius, Earth radii.
    pub rp_earth: f64,
    /// Stellar radius, solar radii.
    pub rs_solar: f64,
    /// Equilibrium temperature, K.
    pub teq: f64,
    /// Stellar effective temperature, K.
    pub teff: f64,
    /// Host K magnitude.
    pub kmag: f64,
}

impl EsmInputs {
    /// Gather and validate the inputs from a property record.
    pub fn from_properties(props: &PlanetProperties) -> Result<Self, MetricError> {
        ensure_present(props, ESM_REQUIRED)?;
        Ok(Self {
            rp_earth: positive("Rp", props.radius_earth())?,
            rs_solar: positive("Rs", props.rs)?,
            teq: positive("Teq", teq(props))?,
            teff: positive("Teff", props.effective_temperature())?,
            kmag: required("Kmag", props.kmag)?,
        })
    }

    /// Dayside temperature, K.
    #[must_use]
    pub fn dayside_temperature(&self) -> f64 {
        DAYSIDE_FACTOR * self.teq
    }

    /// Planet-to-star radius ratio.
    #[must_use]
    pub fn radius_ratio(&self) -> f64 {
        self.rp_earth / (self.rs_solar * SOLAR_TO_EARTH_RADII)
    }

    /// ESM = 4.29e6 · B₇.₅(Tday) / B₇.₅(Teff) · (Rp/Rs)² · 10^(−mK/5)
    #[must_use]
    pub fn esm(&self) -> f64 {
        ESM_SCALE
            * planck_ratio(ESM_WAVELENGTH_M, self.dayside_temperature(), self.teff)
            * self.radius_ratio().powi(2)
            * 10f64.powf(-self.kmag / 5.0)
    }
}

/// Transmission Spectroscopy Metric of a planet.
///
/// With `verbose`, every input and intermediate is logged at info level.
pub fn tsm(props: &PlanetProperties, verbose: bool) -> Result<f64, MetricError> {
    let inputs = TsmInputs::from_properties(props)?;
    let value = inputs.tsm();

    if verbose {
        tracing::info!(
            planet = props.display_name(),
            rp_earth = inputs.rp_earth,
            mp_earth = inputs.mp_earth,
            rs_solar = inputs.rs_solar,
            teq = inputs.teq,
            jmag = inputs.jmag,
            scale_factor = tsm_scale_factor(inputs.rp_earth),
            tsm = value,
            "Computed TSM"
        );
    } else {
        tracing::debug!(planet = props.display_name(), tsm = value, "Computed TSM");
    }
    Ok(value)
}

/// Emission Spectroscopy Metric of a planet.
///
/// With `verbose`, every input and intermediate is logged at info level.
pub fn esm(props: &PlanetProperties, verbose: bool) -> Result<f64, MetricError> {
    let inputs = EsmInputs::from_properties(props)?;
    let value = inputs.esm();

    if verbose {
        tracing::info!(
            planet = props.display_name(),
            rp_earth = inputs.rp_earth,
            rs_solar = inputs.rs_solar,
            teq = inputs.teq,
            tday = inputs.dayside_temperature(),
            teff = inputs.teff,
            kmag = inputs.kmag,
            radius_ratio = inputs.radius_ratio(),
            esm = value,
            "Computed ESM"
        );
    } else {
        tracing::debug!(planet = props.display_name(), esm = value, "Computed ESM");
    }
    Ok(value)
}

/// `Teq` as published, else derived from the host star and orbit.
fn teq(props: &PlanetProperties) -> Option<f64> {
    props.teq.or_else(|| {
        Some(equilibrium_temperature(props.effective_temperature()?, props.rs?, props.semi_major_axis?))
    })
}

/// Keys of `required` that `props` cannot supply, in table order.
///
/// `Teq` counts as present when it can be derived from `Teff`, `Rs` and `a`.
#[must_use]
pub fn missing_keys(props: &PlanetProperties, required: &[&'static str]) -> Vec<&'static str> {
    required
        .iter()
        .copied()
        .filter(|key| {
            let value = if *key == "Teq" { teq(props) } else { props.value(key) };
            value.is_none()
        })
        .collect()
}

fn ensure_present(props: &PlanetProperties, required: &[&'static str]) -> Result<(), MetricError> {
    match missing_keys(props, required).first() {
        Some(key) => Err(MetricError::MissingProperty(*key)),
        None => Ok(()),
    }
}

fn required(key: &'static str, value: Option<f64>) -> Result<f64, MetricError> {
    match value {
        Some(v) if v.is_finite() => Ok(v),
        Some(v) => Err(MetricError::InvalidProperty { key, value: v }),
        None => Err(MetricError::MissingProperty(key)),
    }
}

fn positive(key: &'static str, value: Option<f64>) -> Result<f64, MetricError> {
    let v = required(key, value)?;
    if v > 0.0 { Ok(v) } else { Err(MetricError::InvalidProperty { key, value: v }) }
}
