//! Scrape stages that populate a [`Target`].
//!
//! Each stage:
//! 1. Calls one external service through the [`AstroClient`]
//! 2. Interprets the page or payload (HTML parsing happens in plain functions so a
//!    parsed document is never held across an `.await`)
//! 3. Merges what it found into the target without duplicating earlier results
//!
//! Tolerated misses come back as outcome values; anything else is an error.

mod aliases;
mod arxiv;
mod observations;
mod planet;
mod programs;

pub use aliases::{AliasResolution, parse_exofop_aliases, parse_tic_id};
pub use arxiv::pdf_links;
pub use observations::ObservationLookup;
pub use programs::{ProgramSearch, extract_target_names, program_ids, target_section};

use std::sync::Arc;

use serde::Serialize;

use crate::client::AstroClient;
use crate::error::{ScrapeError, ScrapeResult, Stage};
use crate::metrics;
use crate::models::Target;

/// Converts a PDF document to plain text.
pub trait PdfText: Send + Sync {
    /// Extract the text of every page, in reading order.
    fn extract(&self, pdf: &[u8]) -> anyhow::Result<String>;
}

/// [`PdfText`] backed by the `pdf-extract` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtract;

impl PdfText for PdfExtract {
    fn extract(&self, pdf: &[u8]) -> anyhow::Result<String> {
        pdf_extract::extract_text_from_mem(pdf).map_err(|e| anyhow::anyhow!("{e:?}"))
    }
}

/// What each stage of [`Scraper::scrape_all`] found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScrapeSummary {
    /// Alias lookup outcome.
    pub aliases: AliasResolution,
    /// New arXiv links collected.
    pub arxiv_links_added: usize,
    /// JWST archive lookup outcome.
    pub webb: ObservationLookup,
    /// HST archive lookup outcome.
    pub hst: ObservationLookup,
}

/// Runs the scrape stages against the configured services.
#[derive(Clone)]
pub struct Scraper {
    client: Arc<AstroClient>,
    pdf: Arc<dyn PdfText>,
}

impl Scraper {
    /// Create a scraper using `pdf-extract` for program PDFs.
    #[must_use]
    pub fn new(client: Arc<AstroClient>) -> Self {
        Self { client, pdf: Arc::new(PdfExtract) }
    }

    /// Replace the PDF text extractor.
    #[must_use]
    pub fn with_pdf_text(mut self, pdf: Arc<dyn PdfText>) -> Self {
        self.pdf = pdf;
        self
    }

    /// The underlying HTTP client.
    #[must_use]
    pub fn client(&self) -> &AstroClient {
        &self.client
    }

    /// Run alias resolution, literature search, JWST and HST lookups, and the planet
    /// property fetch, in that order.
    ///
    /// The first failing stage stops the run; its error names the stage. Results of
    /// the stages that completed stay on `target`.
    pub async fn scrape_all(&self, target: &mut Target) -> ScrapeResult<ScrapeSummary> {
        tracing::info!(name = %target.input_name, "Scraping target");

        let aliases = self.find_aliases(target).await.map_err(|e| e.at_stage(Stage::Aliases))?;
        let arxiv_links_added =
            self.scrape_arxiv(target).await.map_err(|e| e.at_stage(Stage::Arxiv))?;
        let webb = self.scrape_webb_mast(target).await.map_err(|e| e.at_stage(Stage::WebbMast))?;
        let hst = self.scrape_hst(target).await.map_err(|e| e.at_stage(Stage::Hst))?;
        self.scrape_planet_properties(target)
            .await
            .map_err(|e| e.at_stage(Stage::PlanetProperties))?;

        let summary = ScrapeSummary { aliases, arxiv_links_added, webb, hst };
        tracing::info!(name = %target.input_name, ?summary, "Scrape complete");
        Ok(summary)
    }

    /// Compute TSM and ESM for the target, fetching planet properties first if needed.
    pub async fn run_all_calculations(&self, target: &mut Target, verbose: bool) -> ScrapeResult<()> {
        if target.planet_properties.is_none() {
            self.scrape_planet_properties(target).await?;
        }
        let Some(properties) = target.planet_properties.as_ref() else {
            return Err(ScrapeError::not_found(format!(
                "no planet properties for '{}'",
                target.input_name
            )));
        };

        let tsm = metrics::tsm(properties, verbose)?;
        let esm = metrics::esm(properties, verbose)?;
        target.tsm = Some(tsm);
        target.esm = Some(esm);
        Ok(())
    }

    /// Run the PDF extractor off the async runtime.
    async fn pdf_text(&self, url: &str, bytes: Vec<u8>) -> ScrapeResult<String> {
        let pdf = Arc::clone(&self.pdf);
        let to_error = |message: String| ScrapeError::Pdf { url: url.to_string(), message };

        tokio::task::spawn_blocking(move || pdf.extract(&bytes))
            .await
            .map_err(|e| to_error(e.to_string()))?
            .map_err(|e| to_error(e.to_string()))
    }
}

impl std::fmt::Debug for Scraper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scraper").field("client", &self.client).finish_non_exhaustive()
    }
}
