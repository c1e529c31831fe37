//! HTTP client for the astronomy services a target is scraped from.
//!
//! Provides async HTTP client with:
//! - Connection pooling via reqwest
//! - Request logging middleware
//! - One method per remote endpoint, returning raw pages or typed payloads
//!
//! HTML interpretation lives in [`crate::scrape`]; this layer only moves bytes.

mod middleware;

pub use middleware::RequestLogger;

use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use serde::Deserialize;
use serde_json::json;

use crate::config::{Config, api};
use crate::error::{ClientError, ClientResult};
use crate::models::{
    ConeResponse, NameLookup, Observation, PlanetIdentifiers, PlanetProperties, ResolvedCoordinate,
};

/// Client for SIMBAD, ExoFOP, MAST, STScI, arXiv and exo.MAST.
#[derive(Clone)]
pub struct AstroClient {
    /// HTTP client with middleware.
    client: ClientWithMiddleware,

    /// Service endpoints and query constants.
    config: Config,
}

impl AstroClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(api::MAX_KEEPALIVE)
            .pool_idle_timeout(api::KEEPALIVE_EXPIRY)
            .gzip(true)
            .build()?;

        let client = ClientBuilder::new(client).with(RequestLogger).build();

        Ok(Self { client, config })
    }

    /// Configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// All identifiers SIMBAD knows for `name`. Empty when SIMBAD cannot resolve it.
    ///
    /// # Errors
    ///
    /// Returns error on HTTP failure or a malformed TAP response.
    pub async fn simbad_identifiers(&self, name: &str) -> ClientResult<Vec<String>> {
        let query = format!(
            "SELECT id2.id FROM ident AS id1 JOIN ident AS id2 USING(oidref) WHERE id1.id = '{}'",
            name.replace('\'', "''")
        );
        let params = vec![
            ("request".to_string(), "doQuery".to_string()),
            ("lang".to_string(), "adql".to_string()),
            ("format".to_string(), "json".to_string()),
            ("query".to_string(), query),
        ];

        #[derive(Deserialize)]
        struct TapResponse {
            #[serde(default)]
            data: Vec<Vec<serde_json::Value>>,
        }

        let result: TapResponse = self.get_json(&self.config.simbad_url, &params).await?;
        Ok(result
            .data
            .into_iter()
            .filter_map(|row| row.into_iter().next())
            .filter_map(|cell| cell.as_str().map(normalize_identifier))
            .filter(|id| !id.is_empty())
            .collect())
    }

    /// ExoFOP TESS target page for a TIC id, as HTML.
    ///
    /// # Errors
    ///
    /// Returns error on HTTP failure.
    pub async fn exofop_target_page(&self, tic_id: u64) -> ClientResult<String> {
        let url = format!("{}/target.php", self.config.exofop_url);
        let params = vec![("id".to_string(), tic_id.to_string())];
        self.get_text(&url, &params).await
    }

    /// Resolve a target name to a sky position with the MAST name resolver.
    ///
    /// # Errors
    ///
    /// Returns error on HTTP failure or a malformed response.
    pub async fn resolve_position(&self, name: &str) -> ClientResult<Option<ResolvedCoordinate>> {
        let request = json!({
            "service": "Mast.Name.Lookup",
            "params": {"input": name, "format": "json"},
            "format": "json",
        });

        let lookup: NameLookup = self.mast_invoke(&request).await?;
        Ok(lookup.resolved_coordinate.into_iter().next())
    }

    /// All CAOM observations within `radius_deg` of a position, across every page.
    ///
    /// # Errors
    ///
    /// Returns error on HTTP failure, a MAST error status, or a query still
    /// executing after the configured number of polls.
    pub async fn cone_search(
        &self,
        ra: f64,
        dec: f64,
        radius_deg: f64,
    ) -> ClientResult<Vec<Observation>> {
        let mut observations = Vec::new();
        let mut page = 1;

        loop {
            let request = json!({
                "service": "Mast.Caom.Cone",
                "params": {"ra": ra, "dec": dec, "radius": radius_deg},
                "format": "json",
                "pagesize": self.config.mast_page_size,
                "page": page,
                "removenullcolumns": true,
            });

            let response = self.poll_cone(&request).await?;
            let pages = response.page_count();
            tracing::debug!(page, pages, rows = response.data.len(), "Cone search page");
            observations.extend(response.data);

            if page >= pages {
                break;
            }
            page += 1;
        }

        Ok(observations)
    }

    /// Observations near the position `name` resolves to; `None` if it does not resolve.
    ///
    /// # Errors
    ///
    /// Returns error on HTTP failure or a MAST error status.
    pub async fn query_observations(&self, name: &str) -> ClientResult<Option<Vec<Observation>>> {
        let Some(position) = self.resolve_position(name).await? else {
            return Ok(None);
        };

        tracing::debug!(name, ra = position.ra, dec = position.decl, "Resolved target position");
        let observations = self
            .cone_search(position.ra, position.decl, self.config.search_radius_deg)
            .await?;
        Ok(Some(observations))
    }

    /// arXiv astro-ph abstract search results for `query`, as HTML.
    ///
    /// # Errors
    ///
    /// Returns error on HTTP failure.
    pub async fn arxiv_search(&self, query: &str) -> ClientResult<String> {
        let url = format!("{}/search/astro-ph", self.config.arxiv_url);
        let params = vec![
            ("query".to_string(), query.to_string()),
            ("searchtype".to_string(), "abstract".to_string()),
            ("abstracts".to_string(), "show".to_string()),
            ("order".to_string(), "-announced_date_first".to_string()),
            ("size".to_string(), api::ARXIV_PAGE_SIZE.to_string()),
        ];
        self.get_text(&url, &params).await
    }

    /// Any page, as HTML.
    ///
    /// # Errors
    ///
    /// Returns error on HTTP failure.
    pub async fn fetch_page(&self, url: &str) -> ClientResult<String> {
        self.get_text(url, &[]).await
    }

    /// URL of the phase-2 PDF of a JWST program.
    #[must_use]
    pub fn program_pdf_url(&self, program_id: &str) -> String {
        format!("{}/jwst/phase2-public/{}.pdf", self.config.stsci_url, program_id)
    }

    /// exo.MAST identifiers for a planet name.
    ///
    /// # Errors
    ///
    /// Returns error on HTTP failure or a malformed response.
    pub async fn exomast_identifiers(&self, name: &str) -> ClientResult<PlanetIdentifiers> {
        let url = format!("{}/exoplanets/identifiers/", self.config.exomast_url);
        let params = vec![("name".to_string(), name.to_string())];
        self.get_json(&url, &params).await
    }

    /// exo.MAST property records for a canonical planet name.
    ///
    /// # Errors
    ///
    /// Returns error on HTTP failure or a malformed response.
    pub async fn exomast_properties(&self, canonical_name: &str) -> ClientResult<Vec<PlanetProperties>> {
        let mut url = url::Url::parse(&format!("{}/exoplanets", self.config.exomast_url))?;
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidUrl(self.config.exomast_url.clone()))?
            .pop_if_empty()
            .push(&canonical_name.to_lowercase())
            .push("properties");

        self.get_json(url.as_str(), &[]).await
    }

    /// Download a document.
    ///
    /// # Errors
    ///
    /// Returns error on HTTP failure.
    pub async fn get_bytes(&self, url: &str) -> ClientResult<Vec<u8>> {
        let response = self.client.get(url).send().await?;
        let response = self.handle_response(response).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Make a GET request and return the body as text.
    async fn get_text(&self, url: &str, params: &[(String, String)]) -> ClientResult<String> {
        let response = self.client.get(url).query(params).send().await?;
        let response = self.handle_response(response).await?;
        Ok(response.text().await?)
    }

    /// Make a GET request and decode a JSON body.
    async fn get_json<T>(&self, url: &str, params: &[(String, String)]) -> ClientResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let text = self.get_text(url, params).await?;
        serde_json::from_str(&text).map_err(ClientError::from)
    }

    /// POST a request document to the MAST `invoke` endpoint.
    async fn mast_invoke<T>(&self, request: &serde_json::Value) -> ClientResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}/invoke", self.config.mast_url);
        let body = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("request", &serde_json::to_string(request)?)
            .finish();

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .header("Accept", "text/plain")
            .body(body)
            .send()
            .await?;

        let response = self.handle_response(response).await?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(ClientError::from)
    }

    /// Issue a cone-search page request, re-polling while MAST is still executing it.
    async fn poll_cone(&self, request: &serde_json::Value) -> ClientResult<ConeResponse> {
        let mut polls = 0;
        loop {
            let response: ConeResponse = self.mast_invoke(request).await?;

            if response.is_error() {
                return Err(ClientError::bad_request(
                    response.msg.unwrap_or_else(|| "MAST query failed".to_string()),
                ));
            }
            if !response.is_executing() {
                return Ok(response);
            }

            polls += 1;
            if polls >= self.config.mast_max_polls {
                return Err(ClientError::server(
                    202,
                    format!("MAST query still executing after {polls} polls"),
                ));
            }
            tracing::debug!(polls, "MAST query executing, polling again");
            tokio::time::sleep(self.config.mast_poll_interval).await;
        }
    }

    /// Handle service response status codes.
    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        match status.as_u16() {
            404 => Err(ClientError::not_found(text)),
            400 => Err(ClientError::bad_request(text)),
            500..=599 => Err(ClientError::server(status.as_u16(), text)),
            other => Err(ClientError::UnexpectedStatus { status: other, message: text }),
        }
    }
}

impl std::fmt::Debug for AstroClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AstroClient")
            .field("mast_url", &self.config.mast_url)
            .field("exomast_url", &self.config.exomast_url)
            .finish_non_exhaustive()
    }
}

/// Collapse SIMBAD's column padding (`"HD  97658"`) to single spaces.
fn normalize_identifier(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
