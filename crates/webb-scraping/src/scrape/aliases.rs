//! Catalog aliases from SIMBAD, with an ExoFOP fallback for TIC ids.

use scraper::{Html, Selector};
use serde::Serialize;

use super::Scraper;
use crate::config::api;
use crate::error::{ScrapeError, ScrapeResult};
use crate::models::Target;

/// How alias resolution went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome", content = "added")]
pub enum AliasResolution {
    /// SIMBAD resolved the name; this many new aliases were recorded.
    Resolved(usize),
    /// SIMBAD did not know the name; ExoFOP supplied this many new aliases.
    ExoFopFallback(usize),
    /// Neither source could be used.
    Unresolved,
}

impl Scraper {
    /// Record every identifier SIMBAD knows for the target.
    ///
    /// When SIMBAD cannot resolve the name and it is a TIC id, the ExoFOP target page
    /// is scraped instead.
    pub async fn find_aliases(&self, target: &mut Target) -> ScrapeResult<AliasResolution> {
        let identifiers = self.client.simbad_identifiers(&target.input_name).await?;

        if !identifiers.is_empty() {
            let added = target.add_aliases(identifiers);
            tracing::info!(name = %target.input_name, added, "Resolved aliases with SIMBAD");
            return Ok(AliasResolution::Resolved(added));
        }

        tracing::warn!(name = %target.input_name, "SIMBAD could not resolve target, trying ExoFOP");
        match parse_tic_id(&target.input_name) {
            Some(tic_id) => {
                let added = self.scrape_exofop_aliases(target, tic_id).await?;
                Ok(AliasResolution::ExoFopFallback(added))
            }
            None => {
                tracing::warn!(
                    name = %target.input_name,
                    "Not a TIC id, cannot scrape ExoFOP; retry with a TIC id as the input name"
                );
                Ok(AliasResolution::Unresolved)
            }
        }
    }

    /// Add the aliases listed on the ExoFOP page of a TIC id.
    pub async fn scrape_exofop_aliases(&self, target: &mut Target, tic_id: u64) -> ScrapeResult<usize> {
        let page = self.client.exofop_target_page(tic_id).await?;
        let aliases = parse_exofop_aliases(&page)?;
        let added = target.add_aliases(aliases);
        tracing::info!(tic_id, added, "Scraped ExoFOP aliases");
        Ok(added)
    }
}

/// Numeric part of a TIC name (`TIC 307210830`, `TIC307210830`, `TIC-307210830`).
#[must_use]
pub fn parse_tic_id(name: &str) -> Option<u64> {
    let name = name.trim();
    let prefix = name.get(..3)?;
    if !prefix.eq_ignore_ascii_case("TIC") {
        return None;
    }
    name[3..].trim_start_matches([' ', '-', '_']).trim().parse().ok()
}

/// Aliases from an ExoFOP target page: the first cell of the alias table holds them
/// comma-separated.
pub fn parse_exofop_aliases(html: &str) -> ScrapeResult<Vec<String>> {
    let document = Html::parse_document(html);
    let tables = Selector::parse("table").expect("valid table selector");
    let cells = Selector::parse("td").expect("valid cell selector");

    let table = document.select(&tables).nth(api::EXOFOP_ALIAS_TABLE).ok_or_else(|| {
        ScrapeError::markup(format!(
            "ExoFOP page has no table at position {}",
            api::EXOFOP_ALIAS_TABLE
        ))
    })?;
    let cell = table
        .select(&cells)
        .next()
        .ok_or_else(|| ScrapeError::markup("ExoFOP alias table has no cells"))?;

    let text: String = cell.text().collect();
    Ok(text
        .split(',')
        .map(str::trim)
        .filter(|alias| !alias.is_empty())
        .map(str::to_string)
        .collect())
}
