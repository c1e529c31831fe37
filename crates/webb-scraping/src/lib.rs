//! Web reconnaissance on an astronomical target.
//!
//! Collects what public services know about one named target: catalog aliases
//! (SIMBAD, ExoFOP), JWST and HST coverage (MAST), arXiv papers, and exoplanet
//! properties (exo.MAST), plus the Transmission and Emission Spectroscopy Metrics
//! derived from those properties.
//!
//! # Features
//!
//! - **Tri-state approval flags**: unknown until the lookup runs, then a definite answer
//! - **Explicit outcomes**: "not found" and "unresolved" are values, failures are errors
//! - **Halt-and-report pipeline**: `scrape_all` names the stage that failed
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use webb_scraping::{AstroClient, Config, Scraper, Target};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = AstroClient::new(Config::from_env()?)?;
//!     let scraper = Scraper::new(Arc::new(client));
//!
//!     let mut target = Target::new("GJ 357");
//!     scraper.scrape_all(&mut target).await?;
//!     println!("JWST: {}", target.webb_approved);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod formatters;
pub mod metrics;
pub mod models;
pub mod scrape;

pub use client::AstroClient;
pub use config::Config;
pub use error::{ClientError, MetricError, ScrapeError, Stage};
pub use models::{Approval, PlanetProperties, Target};
pub use scrape::{Scraper, ScrapeSummary};
