//! Data models for targets and the service payloads that populate them.
//!
//! Service payloads use `#[serde(default)]` for optional fields and keep the
//! services' own key names.

mod observation;
mod planet;
mod target;

pub use observation::{
    ConeResponse, HST, JWST, NameLookup, Observation, Paging, ResolvedCoordinate,
};
pub use planet::{
    AU_TO_SOLAR_RADIUS, BodyUnit, JUPITER_TO_EARTH_MASSES, JUPITER_TO_EARTH_RADII,
    PlanetIdentifiers, PlanetProperties, SOLAR_TO_EARTH_RADII,
};
pub use target::{Approval, Target};
