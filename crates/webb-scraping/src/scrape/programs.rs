//! Manual JWST approval check against the STScI program listings.
//!
//! Each listed program has a public phase-2 PDF whose "Science Target" section names
//! the targets it observes. The archive lookup in `observations` is preferred; this
//! path also covers programs that have not taken data yet.

use std::collections::{BTreeSet, HashSet};

use regex::Regex;
use scraper::{Html, Selector};
use serde::Serialize;

use super::Scraper;
use crate::config::listings;
use crate::error::ScrapeResult;
use crate::models::{Approval, Target};

const SECTION_START: &str = "Science Target";
const SECTION_END: &str = "ABSTRACT";

/// What a listing scrape covered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProgramSearch {
    /// Program PDFs downloaded and read.
    pub programs_checked: usize,
    /// Programs naming one of the target's aliases.
    pub matches: usize,
}

impl Scraper {
    /// Check every program on a JWST listing page for the target.
    ///
    /// A program counts when one of the target's aliases is among the names in its
    /// PDF's target table; its PDF link is recorded in `webb_proposal_links`. An
    /// unknown `webb_approved` becomes `NotApproved` once all programs were read.
    pub async fn search_webb_site(&self, target: &mut Target, url: &str) -> ScrapeResult<ProgramSearch> {
        if target.aliases.is_empty() {
            tracing::warn!(name = %target.input_name, "No aliases known, not checking aliases");
        }

        let listing = self.client.fetch_page(url).await?;
        let programs = program_ids(&listing);
        tracing::info!(url, programs = programs.len(), "Found JWST programs");

        let mut search = ProgramSearch::default();
        for (i, program_id) in programs.iter().enumerate() {
            let pdf_link = self.client.program_pdf_url(program_id);
            tracing::debug!(program_id = %program_id, progress = i + 1, of = programs.len(), "Reading program PDF");

            let bytes = self.client.get_bytes(&pdf_link).await?;
            let text = self.pdf_text(&pdf_link, bytes).await?;
            let names = extract_target_names(target_section(&text));
            search.programs_checked += 1;

            let matched: Vec<&String> = target.aliases.iter().filter(|a| names.contains(*a)).collect();
            if !matched.is_empty() {
                tracing::info!(program_id = %program_id, ?matched, "Target listed in JWST program");
                target.webb_approved = Approval::Approved;
                target.add_webb_proposal_link(pdf_link);
                search.matches += 1;
            }
        }

        target.webb_approved.settle();
        Ok(search)
    }

    /// Check the approved Guaranteed Time Observations programs.
    pub async fn search_gto(&self, target: &mut Target) -> ScrapeResult<ProgramSearch> {
        let url = format!("{}{}", self.client.config().stsci_url, listings::GTO_PATH);
        self.search_webb_site(target, &url).await
    }

    /// Check the approved Early Release Science programs.
    pub async fn search_ers(&self, target: &mut Target) -> ScrapeResult<ProgramSearch> {
        let url = format!("{}{}", self.client.config().stsci_url, listings::ERS_PATH);
        self.search_webb_site(target, &url).await
    }

    /// Check both the GTO and ERS listings.
    pub async fn search_webb(&self, target: &mut Target) -> ScrapeResult<ProgramSearch> {
        let gto = self.search_gto(target).await?;
        let ers = self.search_ers(target).await?;
        Ok(ProgramSearch {
            programs_checked: gto.programs_checked + ers.programs_checked,
            matches: gto.matches + ers.matches,
        })
    }
}

/// Program ids linked from a listing page, first occurrence order.
#[must_use]
pub fn program_ids(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let anchors = Selector::parse("a[href]").expect("valid anchor selector");
    let mut seen = HashSet::new();

    document
        .select(&anchors)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|href| href.strip_prefix(listings::PROGRAM_LINK_PREFIX))
        .map(|rest| rest.split(['&', '#']).next().unwrap_or(rest).trim().to_string())
        .filter(|id| !id.is_empty() && seen.insert(id.clone()))
        .collect()
}

/// The part of a program's text between the target table heading and the abstract.
///
/// A missing heading starts the section at the beginning of the text; a missing
/// abstract marker runs it to the end.
#[must_use]
pub fn target_section(text: &str) -> &str {
    let start = text.find(SECTION_START).map_or(0, |i| i + SECTION_START.len());
    let end = text[start..].find(SECTION_END).map_or(text.len(), |i| start + i);
    &text[start..end]
}

/// Target names in a target table: entries look like `(1) HAT-P-35` or `(2) GJ 357`.
#[must_use]
pub fn extract_target_names(section: &str) -> BTreeSet<String> {
    let patterns = [
        r"\(\d\) (\w+)",
        r"\(\d\) (\w+-\w+)",
        r"\(\d\) (\w+-\w+-\w+)",
        r"\(\d\) (\w+ \w+)",
    ];

    let mut names = BTreeSet::new();
    for pattern in patterns {
        let re = Regex::new(pattern).expect("valid target name pattern");
        names.extend(re.captures_iter(section).map(|c| c[1].to_string()));
    }
    names
}
