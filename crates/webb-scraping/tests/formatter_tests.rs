//! Markdown and JSON report formatting.

use serde_json::json;

use webb_scraping::formatters;
use webb_scraping::models::{Approval, PlanetProperties, Target};
use webb_scraping::scrape::{AliasResolution, ObservationLookup};
use webb_scraping::{ScrapeError, ScrapeSummary, Stage};

// =============================================================================
// Helper Functions
// =============================================================================

fn make_target() -> Target {
    let mut target = Target::new("GJ 357");
    target.add_aliases(["GJ 357", "TOI-562"]);
    target.webb_approved = Approval::Approved;
    target.hst_approved = Approval::NotApproved;
    target.add_webb_proposal_name("Hot Rocks Survey");
    target.add_arxiv_link("https://arxiv.org/pdf/1904.09991");
    target
}

fn make_properties() -> PlanetProperties {
    serde_json::from_value(json!({
        "planet_name": "GJ 357 b",
        "canonical_name": "GJ 357 b",
        "Rp": 1.217,
        "Rp_unit": "R_Earth",
        "Teq": 525.0,
        "Jmag": "7.337"
    }))
    .unwrap()
}

// =============================================================================
// Markdown Tests
// =============================================================================

#[test]
fn test_target_markdown_layout() {
    let markdown = formatters::format_target_markdown(&make_target());

    insta::assert_snapshot!(markdown, @r"
    # GJ 357

    **Aliases** (2): GJ 357, TOI-562

    **JWST approved**: yes | **HST approved**: no

    ## JWST observations

    - Hot Rocks Survey

    ## arXiv (1)

    - https://arxiv.org/pdf/1904.09991
    ");
}

#[test]
fn test_fresh_target_markdown() {
    let markdown = formatters::format_target_markdown(&Target::new("K2-18"));

    assert!(markdown.starts_with("# K2-18\n"));
    assert!(markdown.contains("**Aliases**: none found"));
    assert!(markdown.contains("**JWST approved**: unknown | **HST approved**: unknown"));
    assert!(markdown.contains("No arXiv links found."));
    assert!(!markdown.contains("## "));
    assert!(!markdown.contains("**TSM**"));
}

#[test]
fn test_hst_data_links_when_url_known() {
    let mut target = Target::new("TRAPPIST-1");
    target.hst_data.insert("UV monitoring".to_string(), None);
    target
        .hst_data
        .insert("Atmospheres".to_string(), Some("mast:HST/product/a.fits".to_string()));

    let markdown = formatters::format_target_markdown(&target);

    assert!(markdown.contains("## HST observations\n\n- [Atmospheres](mast:HST/product/a.fits)\n- UV monitoring\n"));
}

#[test]
fn test_metrics_line() {
    let mut target = make_target();
    target.tsm = Some(29.3);
    target.esm = Some(6.5);

    let markdown = formatters::format_target_markdown(&target);
    assert!(markdown.contains("**TSM**: 29.30 | **ESM**: 6.50\n"));

    target.esm = None;
    let markdown = formatters::format_target_markdown(&target);
    assert!(markdown.contains("**TSM**: 29.30\n"));
    assert!(!markdown.contains("**ESM**"));
}

#[test]
fn test_properties_markdown_shows_known_values_only() {
    let markdown = formatters::format_properties_markdown(&make_properties());

    assert_eq!(
        markdown,
        "## Planet properties\n\n**Planet**: GJ 357 b | **Rp**: 1.217 | **Teq**: 525 | **Jmag**: 7.337\n\n"
    );
}

#[test]
fn test_target_markdown_includes_properties() {
    let mut target = make_target();
    target.planet_properties = Some(make_properties());

    let markdown = formatters::format_target_markdown(&target);
    let properties = markdown.find("## Planet properties").unwrap();
    let arxiv = markdown.find("## arXiv").unwrap();
    assert!(properties < arxiv);
}

// =============================================================================
// JSON Tests
// =============================================================================

#[test]
fn test_report_contains_target_and_timestamp() {
    let report = formatters::target_report(&make_target(), None, None).unwrap();

    assert!(report["generated_at"].is_string());
    assert!(chrono::DateTime::parse_from_rfc3339(report["generated_at"].as_str().unwrap()).is_ok());
    assert_eq!(report["target"]["input_name"], "GJ 357");
    assert_eq!(report["target"]["webb_approved"], "approved");
    assert_eq!(report["target"]["hst_approved"], "not_approved");
    assert_eq!(report["target"]["aliases"], json!(["GJ 357", "TOI-562"]));
    assert!(report["target"]["tsm"].is_null());
    assert!(report.get("summary").is_none());
    assert!(report.get("failed_stage").is_none());
}

#[test]
fn test_report_with_summary() {
    let summary = ScrapeSummary {
        aliases: AliasResolution::Resolved(2),
        arxiv_links_added: 1,
        webb: ObservationLookup::Found(1),
        hst: ObservationLookup::NoneFound,
    };

    let report = formatters::target_report(&make_target(), Some(&summary), None).unwrap();

    assert_eq!(report["summary"]["arxiv_links_added"], 1);
    assert_eq!(report["summary"]["aliases"]["outcome"], "resolved");
    assert_eq!(report["summary"]["aliases"]["added"], 2);
}

#[test]
fn test_report_round_trips_target() {
    let mut target = make_target();
    target.planet_properties = Some(make_properties());

    let report = formatters::target_report(&target, None, None).unwrap();
    let decoded: Target = serde_json::from_value(report["target"].clone()).unwrap();

    assert_eq!(decoded.aliases, target.aliases);
    assert_eq!(decoded.webb_approved, Approval::Approved);
    assert_eq!(decoded.planet_properties, target.planet_properties);
}

#[test]
fn test_partial_report_keeps_collected_results() {
    let mut target = make_target();
    target.hst_approved = Approval::Unknown;
    let err = ScrapeError::not_found("exo.MAST does not know 'GJ 357'").at_stage(Stage::PlanetProperties);

    let report = formatters::target_report(&target, None, Some(&err)).unwrap();

    assert_eq!(report["failed_stage"], "planet_properties");
    assert!(report["error"].as_str().unwrap().contains("exo.MAST does not know"));
    assert_eq!(report["target"]["aliases"], json!(["GJ 357", "TOI-562"]));
    assert_eq!(report["target"]["webb_approved"], "approved");
    assert_eq!(report["target"]["hst_approved"], "unknown");
}

#[test]
fn test_partial_report_outside_pipeline_has_no_stage() {
    let err = ScrapeError::Metric(webb_scraping::MetricError::MissingProperty("Jmag"));

    let report = formatters::target_report(&make_target(), None, Some(&err)).unwrap();

    assert!(report["failed_stage"].is_null());
    assert!(report["error"].as_str().unwrap().contains("Jmag"));
}

#[test]
fn test_failure_markdown_names_stage() {
    let err = ScrapeError::markup("ExoFOP alias table has no cells").at_stage(Stage::Aliases);
    let markdown = formatters::format_failure_markdown(&err);
    assert_eq!(
        markdown,
        "\n**Stopped at stage `aliases`**: Unexpected markup: ExoFOP alias table has no cells\n"
    );

    let err = ScrapeError::not_found("no planet");
    assert_eq!(formatters::format_failure_markdown(&err), "\n**Stopped early**: Not found: no planet\n");
}

#[test]
fn test_approval_flags() {
    let flags = formatters::approval_flags(&make_target());
    assert_eq!(flags, json!({"name": "GJ 357", "jwst": true, "hst": false}));

    let flags = formatters::approval_flags(&Target::new("K2-18"));
    assert_eq!(flags, json!({"name": "K2-18", "jwst": null, "hst": null}));
}
