//! Planet properties from exo.MAST.

use super::Scraper;
use crate::error::{ClientError, ScrapeError, ScrapeResult};
use crate::models::Target;

impl Scraper {
    /// Fetch the planet's physical properties.
    ///
    /// exo.MAST files properties under a canonical name, so the input name is first
    /// resolved to it.
    pub async fn scrape_planet_properties(&self, target: &mut Target) -> ScrapeResult<()> {
        let name = target.input_name.as_str();
        let missing = |e: ClientError, what: String| {
            if e.is_not_found() { ScrapeError::not_found(what) } else { ScrapeError::from(e) }
        };

        let identifiers = self
            .client
            .exomast_identifiers(name)
            .await
            .map_err(|e| missing(e, format!("exo.MAST does not know '{name}'")))?;
        let canonical_name = identifiers
            .canonical_name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| ScrapeError::not_found(format!("exo.MAST has no canonical name for '{name}'")))?;

        let properties = self
            .client
            .exomast_properties(&canonical_name)
            .await
            .map_err(|e| missing(e, format!("exo.MAST has no properties for '{canonical_name}'")))?;
        let first = properties.into_iter().next().ok_or_else(|| {
            ScrapeError::not_found(format!("exo.MAST returned no properties for '{canonical_name}'"))
        })?;

        tracing::info!(name, canonical_name = %canonical_name, "Fetched planet properties");
        target.planet_properties = Some(first);
        Ok(())
    }
}
