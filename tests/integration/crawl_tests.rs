//! Integration tests for the crawler
//!
//! These tests use wiremock to stand in for the box office site and drive
//! the full crawl cycle end-to-end.

use boxoffice_crawler::config::{Config, RowErrorPolicy};
use boxoffice_crawler::crawler::Coordinator;
use boxoffice_crawler::{CrawlError, ExtractError, MovieRecord};
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn create_test_config(server: &MockServer, buckets: &[&str]) -> Config {
    let mut config = Config::default();
    config.crawler.base_url = format!("{}/movies", server.uri());
    config.crawler.bucket_delay = 0;
    config.crawler.buckets = Some(buckets.iter().map(|b| b.to_string()).collect());
    config
}

/// A listing row: (id, title, domestic gross cell, date cell)
type Row<'a> = (&'a str, &'a str, &'a str, &'a str);

fn listing_page(letter: &str, rows: &[Row<'_>], pages: u32) -> String {
    let rows: Vec<String> = rows
        .iter()
        .map(|(id, title, gross, date)| {
            format!(
                r#"<tr><td><font size="2"><a href="/movies/?id={}.htm"><b>{}</b></a></font></td>
                <td>Studio</td><td><font size="2">{}</font></td><td>1,000</td><td>$1</td><td>100</td>
                <td><font size="2">{}</font></td></tr>"#,
                id, title, gross, date
            )
        })
        .collect();

    let page_links: Vec<String> = (2..=pages)
        .map(|n| {
            format!(
                r#"<a href="/movies/alphabetical.htm?letter={}&amp;page={}">{}</a>"#,
                letter, n, n
            )
        })
        .collect();

    format!(
        r#"<html><head><title>Movies</title></head><body>
        <a href="/movies/?id=promo.htm"><img src="/img/promo.jpg"></a>
        <table>{}</table>
        <p>{}</p>
        </body></html>"#,
        rows.join("\n"),
        page_links.join(" ")
    )
}

fn date_link(date: &str) -> String {
    format!(
        r#"<a href="/schedule/?view=bydate&amp;release=theatrical&amp;date={}">{}</a>"#,
        date, date
    )
}

fn year_link(year: u32) -> String {
    format!(
        r#"<a href="/schedule/?view=bydate&amp;release=theatrical&amp;yr={}&amp;p=.htm">TBD</a>"#,
        year
    )
}

fn main_page(genre: &str) -> String {
    format!(
        r#"<html><body><table>
        <tr><td>Distributor: <b>Studio</b></td><td>Release Date: <b>2009</b></td></tr>
        <tr><td>Genre: <b>{}</b></td><td>Runtime: <b>2 hrs.</b></td></tr>
        </table></body></html>"#,
        genre
    )
}

fn intl_page(foreign: &str, mexico: &str) -> String {
    format!(
        r#"<html><body><h3>Mexico</h3><table>
        <tr><td><b>Gross To Date Foreign:</b></td><td><font>{}</font></td></tr>
        <tr><td><b>Gross To Date Country:</b></td><td><font>{}</font></td></tr>
        </table></body></html>"#,
        foreign, mexico
    )
}

const EMPTY_PAGE: &str = "<html><body><p>No data</p></body></html>";

async fn mount_listing(server: &MockServer, letter: &str, page: Option<u32>, status: u16, body: String) {
    let mut mock = Mock::given(method("GET"))
        .and(path("/movies/alphabetical.htm"))
        .and(query_param("letter", letter));
    if let Some(page) = page {
        mock = mock.and(query_param("page", page.to_string()));
    }
    mock.respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

/// Mounts the detail and international pages of one movie (international first,
/// since both share a path and differ only by query)
async fn mount_movie(server: &MockServer, id: &str, main: String, intl: Option<String>) {
    if let Some(intl) = intl {
        Mock::given(method("GET"))
            .and(path("/movies/"))
            .and(query_param("page", "intl"))
            .and(query_param("id", format!("{}.htm", id)))
            .respond_with(ResponseTemplate::new(200).set_body_string(intl))
            .mount(server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path("/movies/"))
        .and(query_param("id", format!("{}.htm", id)))
        .respond_with(ResponseTemplate::new(200).set_body_string(main))
        .mount(server)
        .await;
}

/// Answers every remaining detail request with a page carrying no data
async fn mount_empty_details(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/movies/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EMPTY_PAGE))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_two_pages_to_csv() {
    let server = MockServer::start().await;

    // Page 2 is mounted first: the page 1 matcher would also accept its query
    mount_listing(
        &server,
        "A",
        Some(2),
        200,
        listing_page("A", &[("gamma", "Gamma", "$250", "1999")], 2),
    )
    .await;
    mount_listing(
        &server,
        "A",
        None,
        200,
        listing_page(
            "A",
            &[
                ("alpha", "Alpha", "$1,000,000*", date_link("12/18/2009").as_str()),
                ("beta", "Beta", "n/a", year_link(2027).as_str()),
            ],
            2,
        ),
    )
    .await;

    mount_movie(
        &server,
        "alpha",
        main_page("Drama"),
        Some(intl_page("$500,000", "$20,000")),
    )
    .await;
    mount_movie(&server, "beta", EMPTY_PAGE.to_string(), Some(EMPTY_PAGE.to_string())).await;
    // Gamma's main page also answers its international URL and never mentions Mexico
    mount_movie(&server, "gamma", main_page("Comedy"), None).await;

    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("movies.csv");
    let mut config = create_test_config(&server, &["A"]);
    config.output.csv_path = csv_path.to_string_lossy().to_string();

    let mut coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let summary = coordinator.run().await.expect("Crawl failed");

    assert_eq!(summary.buckets_crawled, 1);
    assert_eq!(summary.pages_crawled, 2);
    assert_eq!(summary.rows_seen, 3);
    assert_eq!(summary.records_written, 3);
    assert!(summary.duplicate_names.is_empty());
    assert!(summary.finished_at.is_some());

    let content = std::fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<_> = content.lines().collect();
    assert_eq!(
        lines,
        vec![
            r#""Alpha",2009,"Drama",1500000.0,20000.0,1000000.0,"alpha""#,
            r#""Beta",2027,"",0.0,0.0,0.0,"beta""#,
            r#""Gamma",1999,"Comedy",250.0,0.0,250.0,"gamma""#,
        ]
    );

    let registry = coordinator.registry();
    assert_eq!(registry.name_for_id("alpha"), Some("Alpha"));
    let alpha = registry.record("Alpha").unwrap();
    assert_eq!(alpha.gross_total, alpha.gross_usa + alpha.gross_foreign);
}

#[tokio::test]
async fn test_name_collisions_get_suffixes() {
    let server = MockServer::start().await;

    mount_listing(
        &server,
        "H",
        None,
        200,
        listing_page(
            "H",
            &[
                ("heat95", "Heat", "$67,436,818", "1995"),
                ("heat86", "Heat", "$2,000,000", "1986"),
                ("heat72", "\"Heat\"", "$1,000", "1972"),
            ],
            1,
        ),
    )
    .await;
    mount_empty_details(&server).await;

    let config = create_test_config(&server, &["H"]);
    let mut coordinator = Coordinator::with_sink(config, Vec::<MovieRecord>::new()).unwrap();
    coordinator.run().await.expect("Crawl failed");

    let names: Vec<_> = coordinator.sink().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Heat", "Heat (1)", "Heat (2)"]);

    let registry = coordinator.registry();
    assert_eq!(registry.record_count(), 3);
    assert_eq!(registry.name_for_id("heat86"), Some("Heat (1)"));
    assert_eq!(registry.record("Heat (2)").unwrap().year, Some(1972));
}

#[tokio::test]
async fn test_malformed_id_row_is_skipped() {
    let server = MockServer::start().await;

    mount_listing(
        &server,
        "M",
        None,
        200,
        listing_page(
            "M",
            &[("", "Nameless", "$5", "2001"), ("memento", "Memento", "$25,544,867", "2001")],
            1,
        ),
    )
    .await;
    mount_empty_details(&server).await;

    let config = create_test_config(&server, &["M"]);
    let mut coordinator = Coordinator::with_sink(config, Vec::<MovieRecord>::new()).unwrap();
    let summary = coordinator.run().await.expect("Crawl failed");

    assert_eq!(summary.rows_seen, 2);
    assert_eq!(summary.rows_malformed, 1);
    assert_eq!(coordinator.sink().len(), 1);
    assert_eq!(coordinator.sink()[0].id, "memento");
}

#[tokio::test]
async fn test_bad_domestic_gross_aborts_crawl() {
    let server = MockServer::start().await;

    mount_listing(
        &server,
        "B",
        None,
        200,
        listing_page(
            "B",
            &[
                ("brave", "Brave", "$237,283,207", "2012"),
                ("broken", "Broken", "$12 million", "2012"),
                ("bolt", "Bolt", "$114,053,579", "2008"),
            ],
            1,
        ),
    )
    .await;
    mount_empty_details(&server).await;

    let config = create_test_config(&server, &["B"]);
    let mut coordinator = Coordinator::with_sink(config, Vec::<MovieRecord>::new()).unwrap();
    let err = coordinator.run().await.unwrap_err();

    match err {
        CrawlError::Row { row, source } => {
            assert_eq!(row, "Broken");
            assert!(matches!(
                *source,
                CrawlError::Extract(ExtractError::InvalidAmount { .. })
            ));
        }
        other => panic!("unexpected error: {}", other),
    }

    // Rows before the failure were already emitted, none after it
    let ids: Vec<_> = coordinator.sink().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["brave"]);
}

#[tokio::test]
async fn test_skip_policy_continues_past_bad_row() {
    let server = MockServer::start().await;

    mount_listing(
        &server,
        "B",
        None,
        200,
        listing_page(
            "B",
            &[
                ("broken", "Broken", "$12 million", "2012"),
                ("bolt", "Bolt", "$114,053,579", "2008"),
            ],
            1,
        ),
    )
    .await;
    mount_empty_details(&server).await;

    let mut config = create_test_config(&server, &["B"]);
    config.crawler.on_row_error = RowErrorPolicy::Skip;
    let mut coordinator = Coordinator::with_sink(config, Vec::<MovieRecord>::new()).unwrap();
    let summary = coordinator.run().await.expect("Crawl failed");

    assert_eq!(summary.rows_failed, 1);
    assert_eq!(summary.records_written, 1);
    assert_eq!(coordinator.sink()[0].id, "bolt");
}

#[tokio::test]
async fn test_failed_first_page_skips_bucket() {
    let server = MockServer::start().await;

    mount_listing(&server, "A", None, 500, "Server error".to_string()).await;
    mount_listing(
        &server,
        "B",
        None,
        200,
        listing_page("B", &[("bolt", "Bolt", "$114,053,579", "2008")], 1),
    )
    .await;
    mount_empty_details(&server).await;

    let config = create_test_config(&server, &["A", "B"]);
    let mut coordinator = Coordinator::with_sink(config, Vec::<MovieRecord>::new()).unwrap();
    let summary = coordinator.run().await.expect("Crawl failed");

    assert_eq!(summary.buckets_skipped, 1);
    assert_eq!(summary.buckets_crawled, 1);
    assert_eq!(coordinator.sink().len(), 1);
}

#[tokio::test]
async fn test_later_page_with_bad_status_still_parsed() {
    let server = MockServer::start().await;

    mount_listing(
        &server,
        "C",
        Some(2),
        503,
        listing_page("C", &[("cars", "Cars", "$244,082,982", "2006")], 2),
    )
    .await;
    mount_listing(
        &server,
        "C",
        None,
        200,
        listing_page("C", &[("coco", "Coco", "$210,460,015", "2017")], 2),
    )
    .await;
    mount_empty_details(&server).await;

    let config = create_test_config(&server, &["C"]);
    let mut coordinator = Coordinator::with_sink(config, Vec::<MovieRecord>::new()).unwrap();
    coordinator.run().await.expect("Crawl failed");

    let ids: Vec<_> = coordinator.sink().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["coco", "cars"]);
}

#[tokio::test]
async fn test_detail_timeout_yields_neutral_values() {
    let server = MockServer::start().await;

    mount_listing(
        &server,
        "U",
        None,
        200,
        listing_page("U", &[("up", "Up", "$293,004,164", "2009")], 1),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/movies/"))
        .and(query_param("page", "intl"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(intl_page("$400,000,000", "$30,000,000"))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;
    mount_movie(&server, "up", main_page("Animation"), None).await;

    let mut config = create_test_config(&server, &["U"]);
    config.crawler.request_timeout = 1;
    let mut coordinator = Coordinator::with_sink(config, Vec::<MovieRecord>::new()).unwrap();
    coordinator.run().await.expect("Crawl failed");

    let record = &coordinator.sink()[0];
    assert_eq!(record.genre, "Animation");
    assert_eq!(record.gross_foreign, 0.0);
    assert_eq!(record.gross_foreign_mx, 0.0);
    assert_eq!(record.gross_total, 293_004_164.0);
}

#[tokio::test]
async fn test_page_link_without_number_is_fatal() {
    let server = MockServer::start().await;

    let body = listing_page("Z", &[("zoo", "Zoo", "$1", "2000")], 1)
        .replace("</body>", r#"<a href="/movies/homepage.htm">Home</a></body>"#);
    mount_listing(&server, "Z", None, 200, body).await;
    mount_empty_details(&server).await;

    let config = create_test_config(&server, &["Z"]);
    let mut coordinator = Coordinator::with_sink(config, Vec::<MovieRecord>::new()).unwrap();
    let err = coordinator.run().await.unwrap_err();

    assert!(matches!(
        err,
        CrawlError::Extract(ExtractError::PageNumber { .. })
    ));
    assert!(coordinator.sink().is_empty());
}
