//! Configuration for the target scraper.

use std::time::Duration;

/// Service endpoints and fixed query constants.
pub mod api {
    use std::time::Duration;

    /// SIMBAD TAP synchronous query endpoint.
    pub const SIMBAD_TAP_URL: &str = "https://simbad.cds.unistra.fr/simbad/sim-tap/sync";

    /// ExoFOP TESS target pages.
    pub const EXOFOP_URL: &str = "https://exofop.ipac.caltech.edu/tess";

    /// MAST portal API.
    pub const MAST_URL: &str = "https://mast.stsci.edu/api/v0";

    /// STScI site hosting JWST program listings and phase-2 PDFs.
    pub const STSCI_URL: &str = "http://www.stsci.edu";

    /// arXiv search front-end.
    pub const ARXIV_URL: &str = "https://arxiv.org";

    /// exo.MAST API.
    pub const EXOMAST_URL: &str = "https://exo.mast.stsci.edu/api/v0.1";

    /// Cone-search radius around the resolved target position, in degrees.
    pub const SEARCH_RADIUS_DEG: f64 = 0.02;

    /// Results per arXiv search page.
    pub const ARXIV_PAGE_SIZE: u32 = 50;

    /// Position of the alias table among the `<table>` elements of an ExoFOP target page.
    pub const EXOFOP_ALIAS_TABLE: usize = 7;

    /// Rows per MAST result page.
    pub const MAST_PAGE_SIZE: u32 = 50_000;

    /// Times an `EXECUTING` MAST query is re-polled before giving up.
    pub const MAST_MAX_POLLS: u32 = 30;

    /// Wait between MAST polls.
    pub const MAST_POLL_INTERVAL: Duration = Duration::from_secs(2);

    /// Request timeout. MAST cone searches over crowded fields are slow.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Maximum keepalive connections.
    pub const MAX_KEEPALIVE: usize = 10;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);
}

/// JWST program listing pages.
pub mod listings {
    /// Approved Guaranteed Time Observations programs.
    pub const GTO_PATH: &str = "/jwst/observing-programs/approved-gto-programs";

    /// Approved Early Release Science programs.
    pub const ERS_PATH: &str = "/jwst/observing-programs/approved-ers-programs";

    /// Prefix of the per-program links on a listing page.
    pub const PROGRAM_LINK_PREFIX: &str = "/jwst/observing-programs/program-information?id=";
}

/// Scraper configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// SIMBAD TAP endpoint.
    pub simbad_url: String,

    /// ExoFOP base URL.
    pub exofop_url: String,

    /// MAST API base URL.
    pub mast_url: String,

    /// STScI site base URL.
    pub stsci_url: String,

    /// arXiv base URL.
    pub arxiv_url: String,

    /// exo.MAST API base URL.
    pub exomast_url: String,

    /// Cone-search radius in degrees.
    pub search_radius_deg: f64,

    /// Rows per MAST page.
    pub mast_page_size: u32,

    /// Polls allowed for an `EXECUTING` MAST query.
    pub mast_max_polls: u32,

    /// Wait between MAST polls.
    pub mast_poll_interval: Duration,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,
}

impl Config {
    /// Create a configuration pointing at the public services.
    #[must_use]
    pub fn new() -> Self {
        Self {
            simbad_url: api::SIMBAD_TAP_URL.to_string(),
            exofop_url: api::EXOFOP_URL.to_string(),
            mast_url: api::MAST_URL.to_string(),
            stsci_url: api::STSCI_URL.to_string(),
            arxiv_url: api::ARXIV_URL.to_string(),
            exomast_url: api::EXOMAST_URL.to_string(),
            search_radius_deg: api::SEARCH_RADIUS_DEG,
            mast_page_size: api::MAST_PAGE_SIZE,
            mast_max_polls: api::MAST_MAX_POLLS,
            mast_poll_interval: api::MAST_POLL_INTERVAL,
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
        }
    }

    /// Create a test configuration routing every service to one mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            simbad_url: format!("{base_url}/simbad/sim-tap/sync"),
            exofop_url: format!("{base_url}/exofop/tess"),
            mast_url: format!("{base_url}/mast/api/v0"),
            stsci_url: format!("{base_url}/stsci"),
            arxiv_url: format!("{base_url}/arxiv"),
            exomast_url: format!("{base_url}/exomast/api/v0.1"),
            search_radius_deg: api::SEARCH_RADIUS_DEG,
            mast_page_size: api::MAST_PAGE_SIZE,
            mast_max_polls: 3,
            mast_poll_interval: Duration::from_millis(0), // No waiting in tests
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Each service URL can be overridden (`WEBB_SIMBAD_URL`, `WEBB_EXOFOP_URL`,
    /// `WEBB_MAST_URL`, `WEBB_STSCI_URL`, `WEBB_ARXIV_URL`, `WEBB_EXOMAST_URL`),
    /// e.g. to point at a mirror. A `.env` file is honoured.
    ///
    /// # Errors
    ///
    /// Returns error if an override is not a valid URL.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let mut config = Self::new();
        let overrides: [(&str, &mut String); 6] = [
            ("WEBB_SIMBAD_URL", &mut config.simbad_url),
            ("WEBB_EXOFOP_URL", &mut config.exofop_url),
            ("WEBB_MAST_URL", &mut config.mast_url),
            ("WEBB_STSCI_URL", &mut config.stsci_url),
            ("WEBB_ARXIV_URL", &mut config.arxiv_url),
            ("WEBB_EXOMAST_URL", &mut config.exomast_url),
        ];

        for (var, slot) in overrides {
            if let Ok(value) = std::env::var(var) {
                url::Url::parse(&value)
                    .map_err(|e| anyhow::anyhow!("{var} is not a valid URL: {e}"))?;
                *slot = value.trim_end_matches('/').to_string();
            }
        }

        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
