use berita_harvester::config::{Config, SelectorConfig, UserAgentConfig};
use berita_harvester::harvest::{
    build_http_client, run_harvest, BoundedHarvester, HarvestPlan, HarvestResult,
    HtmlListingParser, ListingSelectors,
};
use std::sync::Arc;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Renders one listing item in the source site's markup
fn listing_item(title: &str, date: &str, slug: &str) -> String {
    format!(
        r#"<div class="media">
            <a class="pull-left" href="/berita/{slug}"><img src="/uploads/{slug}.jpg"></a>
            <div class="media-body">
                <h3 class="media-heading">{title}</h3>
                <ul class="list-inline">
                    <li><span>operator</span></li>
                    <li>|</li>
                    <li><span>{date}</span></li>
                    <li>|</li>
                    <li><span>Pengumuman</span></li>
                </ul>
            </div>
        </div>"#
    )
}

fn listing_page(items: &[String]) -> String {
    format!(
        r#"<html><head><title>Berita</title></head><body>
        <div class="card"><div class="card-body card-padding-lg">{}</div></div>
        </body></html>"#,
        items.join("\n")
    )
}

async fn mount_page(server: &MockServer, page: u32, body: String) {
    Mock::given(method("GET"))
        .and(path(format!("/berita/laman/{}", page)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

fn listing_parser(server: &MockServer) -> HtmlListingParser {
    let client = build_http_client(&UserAgentConfig::default()).expect("Failed to build client");
    let origin = Url::parse(&server.uri()).expect("Failed to parse mock origin");
    let selectors =
        ListingSelectors::compile(&SelectorConfig::default()).expect("Default selectors compile");
    HtmlListingParser::new(client, origin, selectors)
}

fn titles(result: &HarvestResult) -> Vec<String> {
    result.articles().iter().map(|a| a.title.clone()).collect()
}

#[tokio::test]
async fn test_harvest_merges_and_sorts_pages() {
    let mock_server = MockServer::start().await;
    let base_url = format!("{}/berita", mock_server.uri());

    mount_page(
        &mock_server,
        1,
        listing_page(&[listing_item("Rilis Januari", "5 Januari 2024", "rilis-januari")]),
    )
    .await;
    mount_page(&mock_server, 2, listing_page(&[])).await;
    mount_page(
        &mock_server,
        3,
        listing_page(&[
            listing_item("Tanpa Tanggal", "N/A", "tanpa-tanggal"),
            listing_item("Rilis Februari", "10 Februari 2024", "rilis-februari"),
        ]),
    )
    .await;

    let harvester = BoundedHarvester::new(
        Arc::new(listing_parser(&mock_server)),
        HarvestPlan::new(1, 3, 2),
    )
    .expect("Valid plan");

    let result = harvester.run(&base_url).await;

    assert_eq!(
        titles(&result),
        vec!["Rilis Februari", "Rilis Januari", "Tanpa Tanggal"]
    );

    let newest = &result.articles()[0];
    assert_eq!(
        newest.link,
        format!("{}/berita/rilis-februari", mock_server.uri())
    );
    assert_eq!(
        newest.image,
        format!("{}/uploads/rilis-februari.jpg", mock_server.uri())
    );
    assert_eq!(newest.user, "operator");
    assert_eq!(newest.tags, "Pengumuman");
    assert_eq!(harvester.available_permits(), 2);
}

#[tokio::test]
async fn test_failing_page_does_not_fail_harvest() {
    let mock_server = MockServer::start().await;
    let base_url = format!("{}/berita", mock_server.uri());

    mount_page(
        &mock_server,
        1,
        listing_page(&[listing_item("Satu", "1 Maret 2024", "satu")]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/berita/laman/2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    mount_page(
        &mock_server,
        3,
        listing_page(&[listing_item("Tiga", "3 Maret 2024", "tiga")]),
    )
    .await;

    let harvester = BoundedHarvester::new(
        Arc::new(listing_parser(&mock_server)),
        HarvestPlan::new(1, 3, 3),
    )
    .expect("Valid plan");

    let result = harvester.run(&base_url).await;

    assert_eq!(titles(&result), vec!["Tiga", "Satu"]);
}

#[tokio::test]
async fn test_no_pages_with_articles_is_no_data() {
    let mock_server = MockServer::start().await;
    let base_url = format!("{}/berita", mock_server.uri());

    // Page 1 exists but is empty; page 2 is not mounted and returns 404
    mount_page(&mock_server, 1, listing_page(&[])).await;

    let harvester = BoundedHarvester::new(
        Arc::new(listing_parser(&mock_server)),
        HarvestPlan::new(1, 2, 2),
    )
    .expect("Valid plan");

    assert_eq!(harvester.run(&base_url).await, HarvestResult::NoData);
}

#[tokio::test]
async fn test_slow_page_skipped_after_timeout() {
    let mock_server = MockServer::start().await;
    let base_url = format!("{}/berita", mock_server.uri());

    mount_page(
        &mock_server,
        1,
        listing_page(&[listing_item("Cepat", "2 April 2024", "cepat")]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/berita/laman/2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(listing_page(&[listing_item(
                    "Lambat",
                    "3 April 2024",
                    "lambat",
                )]))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let plan = HarvestPlan::new(1, 2, 2).with_page_timeout(Duration::from_millis(200));
    let harvester = BoundedHarvester::new(Arc::new(listing_parser(&mock_server)), plan)
        .expect("Valid plan");

    let result = harvester.run(&base_url).await;

    assert_eq!(titles(&result), vec!["Cepat"]);
}

#[tokio::test]
async fn test_run_harvest_from_config() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        1,
        listing_page(&[listing_item("Lama", "1 Juni 2023", "lama")]),
    )
    .await;
    mount_page(
        &mock_server,
        2,
        listing_page(&[listing_item("Baru", "1 Juni 2024", "baru")]),
    )
    .await;

    let mut config = Config::default();
    config.source.base_url = format!("{}/berita/", mock_server.uri());
    config.source.origin = mock_server.uri();
    config.harvest.first_page = 1;
    config.harvest.last_page = 2;
    config.harvest.max_concurrent = 1;

    let result = run_harvest(&config).await.expect("Harvest should start");

    assert_eq!(titles(&result), vec!["Baru", "Lama"]);
}

#[tokio::test]
async fn test_run_harvest_rejects_inverted_range() {
    let mut config = Config::default();
    config.harvest.first_page = 5;
    config.harvest.last_page = 1;

    let result = run_harvest(&config).await;
    assert!(result.is_err());
}
