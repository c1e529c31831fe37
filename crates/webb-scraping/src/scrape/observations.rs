//! JWST and HST coverage from the MAST observation archive.

use serde::Serialize;

use super::Scraper;
use crate::error::ScrapeResult;
use crate::models::{Approval, HST, JWST, Observation, Target};

/// How an archive lookup went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome", content = "observations")]
pub enum ObservationLookup {
    /// This many observations of the mission lie within the search radius.
    Found(usize),
    /// The position resolved but the mission never observed it.
    NoneFound,
    /// MAST could not resolve the name to a position.
    Unresolved,
}

impl Scraper {
    /// Check MAST for JWST observations of the target.
    ///
    /// Sets `webb_approved` and records observation titles in `webb_proposal_names`.
    pub async fn scrape_webb_mast(&self, target: &mut Target) -> ScrapeResult<ObservationLookup> {
        let Some(observations) = self.mission_observations(&target.input_name, JWST).await? else {
            target.webb_approved.settle();
            return Ok(ObservationLookup::Unresolved);
        };

        for observation in &observations {
            if let Some(title) = &observation.obs_title {
                target.add_webb_proposal_name(title.as_str());
            }
        }

        Ok(record(&mut target.webb_approved, observations.len()))
    }

    /// Check MAST for HST observations of the target.
    ///
    /// Sets `hst_approved` and maps each observation title to its data product URL in
    /// `hst_data`.
    pub async fn scrape_hst(&self, target: &mut Target) -> ScrapeResult<ObservationLookup> {
        let Some(observations) = self.mission_observations(&target.input_name, HST).await? else {
            target.hst_approved.settle();
            return Ok(ObservationLookup::Unresolved);
        };

        let count = observations.len();
        for observation in observations {
            if let Some(title) = observation.obs_title {
                target.hst_data.insert(title, observation.data_url);
            }
        }

        Ok(record(&mut target.hst_approved, count))
    }

    /// Observations of one mission around the target; `None` when the name does not resolve.
    async fn mission_observations(
        &self,
        name: &str,
        mission: &str,
    ) -> ScrapeResult<Option<Vec<Observation>>> {
        let Some(observations) = self.client.query_observations(name).await? else {
            tracing::warn!(name, mission, "MAST could not resolve target");
            return Ok(None);
        };

        let total = observations.len();
        let matching: Vec<Observation> =
            observations.into_iter().filter(|o| o.is_mission(mission)).collect();
        tracing::info!(name, mission, total, matching = matching.len(), "Queried MAST");
        Ok(Some(matching))
    }
}

fn record(flag: &mut Approval, count: usize) -> ObservationLookup {
    if count > 0 {
        *flag = Approval::Approved;
        ObservationLookup::Found(count)
    } else {
        flag.settle();
        ObservationLookup::NoneFound
    }
}
