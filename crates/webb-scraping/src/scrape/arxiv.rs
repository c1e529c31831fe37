//! Literature links from arXiv abstract searches.

use scraper::{Html, Selector};

use super::Scraper;
use crate::error::ScrapeResult;
use crate::models::Target;

impl Scraper {
    /// Search astro-ph abstracts for each alias (or the input name when there are none)
    /// and collect the PDF links of the results. Returns the number of new links.
    pub async fn scrape_arxiv(&self, target: &mut Target) -> ScrapeResult<usize> {
        let queries: Vec<String> = target.search_names().into_iter().map(str::to_string).collect();
        let mut added = 0;

        for (i, query) in queries.iter().enumerate() {
            tracing::debug!(query = %query, progress = i + 1, of = queries.len(), "Searching arXiv");
            let page = self.client.arxiv_search(query).await?;
            for link in pdf_links(&page) {
                if target.add_arxiv_link(link) {
                    added += 1;
                }
            }
        }

        tracing::info!(name = %target.input_name, queries = queries.len(), added, "Scraped arXiv");
        Ok(added)
    }
}

/// Every hyperlink on a page whose target looks like a PDF, in page order.
#[must_use]
pub fn pdf_links(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let anchors = Selector::parse("a[href]").expect("valid anchor selector");

    document
        .select(&anchors)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| href.contains("pdf"))
        .map(str::to_string)
        .collect()
}
