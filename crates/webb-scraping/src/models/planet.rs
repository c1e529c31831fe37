//! Planet properties as served by exo.MAST.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Jupiter radius in Earth radii: 1 R_J = 11.209 R⊕
pub const JUPITER_TO_EARTH_RADII: f64 = 11.209;

/// Jupiter mass in Earth masses: 1 M_J = 317.828 M⊕
pub const JUPITER_TO_EARTH_MASSES: f64 = 317.828;

/// Solar radius in Earth radii: 1 R☉ = 109.2 R⊕
pub const SOLAR_TO_EARTH_RADII: f64 = 695_700.0 / 6_371.0;

/// AU in solar radii.
pub const AU_TO_SOLAR_RADIUS: f64 = 215.032;

/// Response of the exo.MAST identifier lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetIdentifiers {
    /// Name exo.MAST files the planet under.
    #[serde(default)]
    pub canonical_name: Option<String>,

    /// Name as it appears in the NASA Exoplanet Archive.
    #[serde(default)]
    pub exoplanet_archive_name: Option<String>,

    /// Other names the service matched.
    #[serde(default, rename = "planetNames")]
    pub planet_names: Vec<String>,
}

/// Unit a radius or mass column is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyUnit {
    /// Jupiter radii or masses.
    Jupiter,
    /// Earth radii or masses.
    Earth,
}

impl BodyUnit {
    /// Interpret an exo.MAST unit label (`R_J`, `M_Earth`, ...). Jupiter units when absent.
    #[must_use]
    pub fn parse(label: Option<&str>) -> Self {
        let Some(label) = label else {
            return Self::Jupiter;
        };
        let label = label.to_ascii_lowercase();
        if label.contains("earth") || label.ends_with("_e") || label == "re" || label == "me" {
            Self::Earth
        } else {
            Self::Jupiter
        }
    }
}

/// Physical properties of one exoplanet and its host star.
///
/// Typed fields cover what the spectroscopy metrics read; every other key of the
/// document is kept in [`extra`](Self::extra).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanetProperties {
    /// Planet name.
    #[serde(default)]
    pub planet_name: Option<String>,

    /// exo.MAST canonical name.
    #[serde(default)]
    pub canonical_name: Option<String>,

    /// Planet radius.
    #[serde(rename = "Rp", default, deserialize_with = "lenient_f64")]
    pub rp: Option<f64>,

    /// Unit of `Rp`.
    #[serde(rename = "Rp_unit", default)]
    pub rp_unit: Option<String>,

    /// Planet mass.
    #[serde(rename = "Mp", default, deserialize_with = "lenient_f64")]
    pub mp: Option<f64>,

    /// Unit of `Mp`.
    #[serde(rename = "Mp_unit", default)]
    pub mp_unit: Option<String>,

    /// Stellar radius, solar radii.
    #[serde(rename = "Rs", default, deserialize_with = "lenient_f64")]
    pub rs: Option<f64>,

    /// Stellar mass, solar masses.
    #[serde(rename = "Ms", default, deserialize_with = "lenient_f64")]
    pub ms: Option<f64>,

    /// Stellar effective temperature, K.
    #[serde(rename = "Teff", default, deserialize_with = "lenient_f64")]
    pub teff: Option<f64>,

    /// Stellar temperature under its short key; some records carry only this one.
    #[serde(rename = "Ts", default, deserialize_with = "lenient_f64")]
    pub ts: Option<f64>,

    /// Planet equilibrium temperature, K.
    #[serde(rename = "Teq", default, deserialize_with = "lenient_f64")]
    pub teq: Option<f64>,

    /// Semi-major axis, AU.
    #[serde(rename = "a", default, deserialize_with = "lenient_f64")]
    pub semi_major_axis: Option<f64>,

    /// Orbital period, days.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub orbital_period: Option<f64>,

    /// Host star J-band magnitude.
    #[serde(rename = "Jmag", default, deserialize_with = "lenient_f64")]
    pub jmag: Option<f64>,

    /// Host star H-band magnitude.
    #[serde(rename = "Hmag", default, deserialize_with = "lenient_f64")]
    pub hmag: Option<f64>,

    /// Host star K-band magnitude.
    #[serde(rename = "Kmag", default, deserialize_with = "lenient_f64")]
    pub kmag: Option<f64>,

    /// Host star V-band magnitude.
    #[serde(rename = "Vmag", default, deserialize_with = "lenient_f64")]
    pub vmag: Option<f64>,

    /// Remaining keys, verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl PlanetProperties {
    /// Look up a numeric property by its exo.MAST key.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<f64> {
        match key {
            "Rp" => self.rp,
            "Mp" => self.mp,
            "Rs" => self.rs,
            "Ms" => self.ms,
            "Teff" => self.effective_temperature(),
            "Ts" => self.ts,
            "Teq" => self.teq,
            "a" => self.semi_major_axis,
            "orbital_period" => self.orbital_period,
            "Jmag" => self.jmag,
            "Hmag" => self.hmag,
            "Kmag" => self.kmag,
            "Vmag" => self.vmag,
            other => self.extra.get(other).and_then(serde_json::Value::as_f64),
        }
    }

    /// Stellar effective temperature: `Teff`, else `Ts`.
    #[must_use]
    pub fn effective_temperature(&self) -> Option<f64> {
        self.teff.or(self.ts)
    }

    /// Planet radius in Earth radii.
    #[must_use]
    pub fn radius_earth(&self) -> Option<f64> {
        let rp = self.rp?;
        Some(match BodyUnit::parse(self.rp_unit.as_deref()) {
            BodyUnit::Jupiter => rp * JUPITER_TO_EARTH_RADII,
            BodyUnit::Earth => rp,
        })
    }

    /// Planet mass in Earth masses.
    #[must_use]
    pub fn mass_earth(&self) -> Option<f64> {
        let mp = self.mp?;
        Some(match BodyUnit::parse(self.mp_unit.as_deref()) {
            BodyUnit::Jupiter => mp * JUPITER_TO_EARTH_MASSES,
            BodyUnit::Earth => mp,
        })
    }

    /// Name to show for this planet.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.canonical_name
            .as_deref()
            .or(self.planet_name.as_deref())
            .unwrap_or("unnamed planet")
    }
}

/// Accept numbers, numeric strings, or anything else as `None`.
///
/// exo.MAST mixes `null`, numbers and empty strings in numeric columns.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}
