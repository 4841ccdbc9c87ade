use berita_harvester::article::scrape_article;
use berita_harvester::config::UserAgentConfig;
use berita_harvester::harvest::build_http_client;
use berita_harvester::HarvestError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ARTICLE_PAGE: &str = r#"<html><body>
    <div class="col-md-8">
        <h2>Jadwal Cut Off Pendataan</h2>
        <ul class="list-inline">
            <li><span><i class="glyphicon glyphicon-user"></i> Diposkan Oleh : admin</span></li>
            <li><span><i class="glyphicon glyphicon-calendar"></i> Tanggal : 10 Februari 2024</span></li>
            <li><span><i class="glyphicon glyphicon-tag"></i> Kategori : Pengumuman</span></li>
        </ul>
        <p>Batas akhir pendataan semester ganjil.</p>
        <p>Mohon operator segera melakukan sinkronisasi.</p>
    </div>
    <div class="col-md-4">
        <div><h2>Berita Lainnya</h2></div>
    </div>
</body></html>"#;

#[tokio::test]
async fn test_scrape_article_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/berita/jadwal-cut-off"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(ARTICLE_PAGE)
                .insert_header("content-type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let client = build_http_client(&UserAgentConfig::default()).expect("Failed to build client");
    let url = format!("{}/berita/jadwal-cut-off", mock_server.uri());

    let detail = scrape_article(&client, &url).await.expect("Scrape failed");

    assert_eq!(detail.title, "Jadwal Cut Off Pendataan");
    assert_eq!(detail.author, "admin");
    assert_eq!(detail.date, "10 Februari 2024");
    assert_eq!(detail.category, "Pengumuman");
    assert_eq!(
        detail.content,
        "Batas akhir pendataan semester ganjil. Mohon operator segera melakukan sinkronisasi."
    );
}

#[tokio::test]
async fn test_scrape_missing_article_is_status_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = build_http_client(&UserAgentConfig::default()).expect("Failed to build client");
    let url = format!("{}/berita/tidak-ada", mock_server.uri());

    let result = scrape_article(&client, &url).await;

    assert!(matches!(
        result,
        Err(HarvestError::Status { status: 404, .. })
    ));
}
