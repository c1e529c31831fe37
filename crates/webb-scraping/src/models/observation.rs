//! MAST portal API payloads.

use serde::{Deserialize, Serialize};

/// Mission tag MAST uses for JWST observations.
pub const JWST: &str = "JWST";

/// Mission tag MAST uses for HST observations.
pub const HST: &str = "HST";

/// One row of a CAOM cone search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Observation {
    /// Mission the observation belongs to (`JWST`, `HST`, `TESS`, ...).
    #[serde(default)]
    pub obs_collection: Option<String>,

    /// Proposal title.
    #[serde(default)]
    pub obs_title: Option<String>,

    /// Data product URL.
    #[serde(default, rename = "dataURL")]
    pub data_url: Option<String>,

    /// Observation identifier.
    #[serde(default)]
    pub obs_id: Option<String>,

    /// Target name as given in the proposal.
    #[serde(default)]
    pub target_name: Option<String>,

    /// Proposal identifier. MAST returns it as a string for most missions.
    #[serde(default)]
    pub proposal_id: Option<serde_json::Value>,
}

impl Observation {
    /// Returns true if this observation belongs to `mission`.
    #[must_use]
    pub fn is_mission(&self, mission: &str) -> bool {
        self.obs_collection.as_deref() == Some(mission)
    }
}

/// A `Mast.Name.Lookup` response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameLookup {
    /// Positions the resolver matched, best first.
    #[serde(default)]
    pub resolved_coordinate: Vec<ResolvedCoordinate>,
}

/// A resolved sky position.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ResolvedCoordinate {
    /// Right ascension, degrees.
    pub ra: f64,
    /// Declination, degrees.
    pub decl: f64,
}

/// A paged `Mast.Caom.Cone` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConeResponse {
    /// `COMPLETE` once the data is ready, `EXECUTING` while MAST is still working.
    #[serde(default)]
    pub status: String,

    /// Message accompanying an error status.
    #[serde(default)]
    pub msg: Option<String>,

    /// Rows on this page.
    #[serde(default)]
    pub data: Vec<Observation>,

    /// Paging information.
    #[serde(default)]
    pub paging: Option<Paging>,
}

impl ConeResponse {
    /// Returns true while the query is still running server-side.
    #[must_use]
    pub fn is_executing(&self) -> bool {
        self.status.eq_ignore_ascii_case("EXECUTING")
    }

    /// Returns true if MAST reported a failure.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.status.eq_ignore_ascii_case("ERROR")
    }

    /// Total number of pages, one if the response carried no paging block.
    #[must_use]
    pub fn page_count(&self) -> u32 {
        self.paging.as_ref().map_or(1, |p| p.pages_filtered.max(1))
    }
}

/// MAST paging block.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paging {
    /// Current page, 1-based.
    #[serde(default)]
    pub page: u32,

    /// Total pages after filtering.
    #[serde(default)]
    pub pages_filtered: u32,

    /// Total rows after filtering.
    #[serde(default)]
    pub rows_filtered: u64,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_cone_response_decodes() {
        let resp: ConeResponse = serde_json::from_value(json!({
            "status": "COMPLETE",
            "msg": "",
            "data": [
                {"obs_collection": "JWST", "obs_title": "Hot Rocks", "dataURL": null, "proposal_id": "3730"},
                {"obs_collection": "TESS", "obs_title": null, "extra_col": 1}
            ],
            "paging": {"page": 1, "pageSize": 2, "pagesFiltered": 3, "rows": 2, "rowsFiltered": 6}
        }))
        .unwrap();

        assert_eq!(resp.data.len(), 2);
        assert!(resp.data[0].is_mission(JWST));
        assert!(!resp.data[1].is_mission(HST));
        assert_eq!(resp.page_count(), 3);
        assert!(!resp.is_executing());
    }

    #[test]
    fn test_page_count_without_paging() {
        let resp = ConeResponse { status: "COMPLETE".into(), ..Default::default() };
        assert_eq!(resp.page_count(), 1);
    }

    #[test]
    fn test_name_lookup_empty() {
        let lookup: NameLookup =
            serde_json::from_value(json!({"resolvedCoordinate": [], "status": ""})).unwrap();
        assert!(lookup.resolved_coordinate.is_empty());
    }
}
