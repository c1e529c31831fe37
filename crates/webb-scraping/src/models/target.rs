//! The target record populated by the scrape stages.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::PlanetProperties;

/// Whether a target appears in a telescope's programs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Approval {
    /// The corresponding scrape has not run yet.
    #[default]
    Unknown,
    /// At least one program or observation covers the target.
    Approved,
    /// The scrape ran and found nothing.
    NotApproved,
}

impl Approval {
    /// `Some(bool)` once a scrape has decided, `None` while unknown.
    #[must_use]
    pub const fn as_bool(self) -> Option<bool> {
        match self {
            Self::Unknown => None,
            Self::Approved => Some(true),
            Self::NotApproved => Some(false),
        }
    }

    /// Returns true if the scrape has not run yet.
    #[must_use]
    pub const fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Settle an unknown flag to `NotApproved`; a decided flag is left alone.
    pub fn settle(&mut self) {
        if self.is_unknown() {
            *self = Self::NotApproved;
        }
    }
}

impl From<Option<bool>> for Approval {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => Self::Unknown,
            Some(true) => Self::Approved,
            Some(false) => Self::NotApproved,
        }
    }
}

impl fmt::Display for Approval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Unknown => "unknown",
            Self::Approved => "yes",
            Self::NotApproved => "no",
        };
        f.write_str(label)
    }
}

/// Everything learned about one named target.
///
/// Created with only the input name; the [`Scraper`](crate::Scraper) stages fill the
/// remaining fields in any order, and re-running a stage does not duplicate entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Target {
    /// Name the target was requested under.
    pub input_name: String,

    /// Names by which the target is known in other catalogs.
    #[serde(default)]
    pub aliases: Vec<String>,

    /// Whether the target is part of a JWST program.
    #[serde(default)]
    pub webb_approved: Approval,

    /// Whether the target has public HST observations.
    #[serde(default)]
    pub hst_approved: Approval,

    /// Phase-2 PDFs of JWST programs listing the target.
    #[serde(default)]
    pub webb_proposal_links: Vec<String>,

    /// Titles of JWST observations covering the target.
    #[serde(default)]
    pub webb_proposal_names: Vec<String>,

    /// HST observation title to data product URL.
    #[serde(default)]
    pub hst_data: BTreeMap<String, Option<String>>,

    /// arXiv PDF links mentioning the target or an alias.
    #[serde(default)]
    pub arxiv_links: Vec<String>,

    /// exo.MAST properties of the planet, once fetched.
    #[serde(default)]
    pub planet_properties: Option<PlanetProperties>,

    /// Transmission Spectroscopy Metric.
    #[serde(default)]
    pub tsm: Option<f64>,

    /// Emission Spectroscopy Metric.
    #[serde(default)]
    pub esm: Option<f64>,
}

impl Target {
    /// Create a target that knows only its name.
    #[must_use]
    pub fn new(input_name: impl Into<String>) -> Self {
        Self { input_name: input_name.into(), ..Default::default() }
    }

    /// Names to search under: the aliases, or the input name when none are known.
    #[must_use]
    pub fn search_names(&self) -> Vec<&str> {
        if self.aliases.is_empty() {
            vec![self.input_name.as_str()]
        } else {
            self.aliases.iter().map(String::as_str).collect()
        }
    }

    /// Append aliases not already known. Returns how many were added.
    pub fn add_aliases<I, S>(&mut self, aliases: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let before = self.aliases.len();
        for alias in aliases {
            push_unique(&mut self.aliases, alias.into());
        }
        self.aliases.len() - before
    }

    /// Append an arXiv link if not already collected. Returns true if added.
    pub fn add_arxiv_link(&mut self, link: impl Into<String>) -> bool {
        push_unique(&mut self.arxiv_links, link.into())
    }

    /// Record a JWST observation title.
    pub fn add_webb_proposal_name(&mut self, name: impl Into<String>) -> bool {
        push_unique(&mut self.webb_proposal_names, name.into())
    }

    /// Record a JWST program PDF link.
    pub fn add_webb_proposal_link(&mut self, link: impl Into<String>) -> bool {
        push_unique(&mut self.webb_proposal_links, link.into())
    }

    /// Returns true if `name` is one of the known aliases.
    #[must_use]
    pub fn has_alias(&self, name: &str) -> bool {
        self.aliases.iter().any(|a| a == name)
    }
}

fn push_unique(list: &mut Vec<String>, value: String) -> bool {
    if value.is_empty() || list.contains(&value) {
        return false;
    }
    list.push(value);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_target_is_unknown() {
        let target = Target::new("GJ 357");
        assert_eq!(target.input_name, "GJ 357");
        assert!(target.webb_approved.is_unknown());
        assert!(target.hst_approved.is_unknown());
        assert!(target.aliases.is_empty());
        assert!(target.planet_properties.is_none());
    }

    #[test]
    fn test_settle_only_moves_unknown() {
        let mut flag = Approval::Unknown;
        flag.settle();
        assert_eq!(flag, Approval::NotApproved);

        let mut flag = Approval::Approved;
        flag.settle();
        assert_eq!(flag, Approval::Approved);
    }

    #[test]
    fn test_approval_bool_mapping() {
        assert_eq!(Approval::from(None), Approval::Unknown);
        assert_eq!(Approval::from(Some(true)).as_bool(), Some(true));
        assert_eq!(Approval::NotApproved.as_bool(), Some(false));
    }

    #[test]
    fn test_add_aliases_skips_duplicates() {
        let mut target = Target::new("TRAPPIST-1");
        assert_eq!(target.add_aliases(["2MASS J23062928-0502285", "TRAPPIST-1"]), 2);
        assert_eq!(target.add_aliases(["TRAPPIST-1", "EPIC 246199087"]), 1);
        assert_eq!(target.aliases.len(), 3);
        assert!(target.has_alias("EPIC 246199087"));
    }

    #[test]
    fn test_search_names_falls_back_to_input() {
        let mut target = Target::new("HAT-P-35");
        assert_eq!(target.search_names(), vec!["HAT-P-35"]);
        target.add_aliases(["TYC 1234-5678-1"]);
        assert_eq!(target.search_names(), vec!["TYC 1234-5678-1"]);
    }

    #[test]
    fn test_links_deduplicated() {
        let mut target = Target::new("x");
        assert!(target.add_arxiv_link("/pdf/2101.00001"));
        assert!(!target.add_arxiv_link("/pdf/2101.00001"));
        assert!(!target.add_arxiv_link(""));
        assert_eq!(target.arxiv_links.len(), 1);
    }
}
