//! Alias resolution against mocked SIMBAD and ExoFOP.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use webb_scraping::scrape::AliasResolution;
use webb_scraping::{AstroClient, Config, ScrapeError, Scraper, Target};

fn setup_scraper(mock_server: &MockServer) -> Scraper {
    let config = Config::for_testing(&mock_server.uri());
    let client = AstroClient::new(config).unwrap();
    Scraper::new(Arc::new(client))
}

fn tap_rows(ids: &[&str]) -> serde_json::Value {
    json!({
        "metadata": [{"name": "id", "datatype": "char"}],
        "data": ids.iter().map(|id| json!([id])).collect::<Vec<_>>()
    })
}

fn exofop_page(aliases: &str) -> String {
    let filler = "<table><tr><td>section</td></tr></table>".repeat(7);
    format!("<html><body>{filler}<table><tr><td>{aliases}</td></tr></table></body></html>")
}

async fn mount_simbad(mock_server: &MockServer, ids: &[&str]) {
    Mock::given(method("GET"))
        .and(path("/simbad/sim-tap/sync"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tap_rows(ids)))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_simbad_aliases_recorded() {
    let mock_server = MockServer::start().await;
    mount_simbad(&mock_server, &["GJ   357", "TOI-562", "HIP  45908", "TOI-562"]).await;

    let scraper = setup_scraper(&mock_server);
    let mut target = Target::new("GJ 357");

    let outcome = scraper.find_aliases(&mut target).await.unwrap();

    assert_eq!(outcome, AliasResolution::Resolved(3));
    assert_eq!(target.aliases, vec!["GJ 357", "TOI-562", "HIP 45908"]);
}

#[tokio::test]
async fn test_find_aliases_is_idempotent() {
    let mock_server = MockServer::start().await;
    mount_simbad(&mock_server, &["TRAPPIST-1", "2MASS J23062928-0502285"]).await;

    let scraper = setup_scraper(&mock_server);
    let mut target = Target::new("TRAPPIST-1");

    scraper.find_aliases(&mut target).await.unwrap();
    let second = scraper.find_aliases(&mut target).await.unwrap();

    assert_eq!(second, AliasResolution::Resolved(0));
    assert_eq!(target.aliases.len(), 2);
}

#[tokio::test]
async fn test_unresolved_tic_falls_back_to_exofop() {
    let mock_server = MockServer::start().await;
    mount_simbad(&mock_server, &[]).await;

    Mock::given(method("GET"))
        .and(path("/exofop/tess/target.php"))
        .and(query_param("id", "307210830"))
        .respond_with(ResponseTemplate::new(200).set_body_string(exofop_page(
            "TIC 307210830, L 98-59, 2MASS J08180563-6818468, TOI-175",
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let scraper = setup_scraper(&mock_server);
    let mut target = Target::new("TIC 307210830");

    let outcome = scraper.find_aliases(&mut target).await.unwrap();

    assert_eq!(outcome, AliasResolution::ExoFopFallback(4));
    assert!(target.has_alias("L 98-59"));
    assert!(target.has_alias("TOI-175"));
}

#[tokio::test]
async fn test_unresolved_non_tic_is_tolerated() {
    let mock_server = MockServer::start().await;
    mount_simbad(&mock_server, &[]).await;

    Mock::given(method("GET"))
        .and(path("/exofop/tess/target.php"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let scraper = setup_scraper(&mock_server);
    let mut target = Target::new("Not A Star 123");

    let outcome = scraper.find_aliases(&mut target).await.unwrap();

    assert_eq!(outcome, AliasResolution::Unresolved);
    assert!(target.aliases.is_empty());
}

#[tokio::test]
async fn test_exofop_page_without_alias_table_is_error() {
    let mock_server = MockServer::start().await;
    mount_simbad(&mock_server, &[]).await;

    Mock::given(method("GET"))
        .and(path("/exofop/tess/target.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><table></table></html>"))
        .mount(&mock_server)
        .await;

    let scraper = setup_scraper(&mock_server);
    let mut target = Target::new("TIC 1");

    let err = scraper.find_aliases(&mut target).await.unwrap_err();
    assert!(matches!(err, ScrapeError::Markup(_)), "{err}");
}

#[tokio::test]
async fn test_simbad_server_error_propagates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/simbad/sim-tap/sync"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&mock_server)
        .await;

    let scraper = setup_scraper(&mock_server);
    let mut target = Target::new("GJ 357");

    let err = scraper.find_aliases(&mut target).await.unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("503"), "{msg}");
    assert!(target.aliases.is_empty());
}
