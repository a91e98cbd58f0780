use stockdash_lib::yahoo_quotes_api::{self, Client};
use stockdash_lib::{CompanyProfile, ScrapeClient, ScrapeError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

fn scraper(server: &MockServer) -> ScrapeClient {
    ScrapeClient::new(Client::with_base_url(&server.uri()).unwrap())
}

#[tokio::test]
async fn company_profile_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/quote/AAPL/profile"))
        .and(query_param("p", "AAPL"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("profile_aapl.html")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let profile = scraper(&mock_server).company_profile("aapl").await.unwrap();
    assert_eq!(
        profile,
        Some(CompanyProfile {
            ticker: "AAPL".into(),
            name: "Apple Inc.".into(),
            sector: "Technology".into(),
            industry: "Consumer Electronics".into(),
        })
    );
}

#[tokio::test]
async fn company_profile_not_found_is_none() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/quote/ZZZZ/profile"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&mock_server)
        .await;

    let profile = scraper(&mock_server).company_profile("ZZZZ").await.unwrap();
    assert_eq!(profile, None);
}

#[tokio::test]
async fn company_profile_changed_markup_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/quote/AAPL/profile"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body><h1>Apple</h1></body></html>"),
        )
        .mount(&mock_server)
        .await;

    let result = scraper(&mock_server).company_profile("AAPL").await;
    assert!(matches!(result, Err(ScrapeError::Parse(_))));
}

#[tokio::test]
async fn company_profile_unreachable_is_request_error() {
    let client = Client::with_base_url("http://127.0.0.1:1").unwrap();
    let result = ScrapeClient::new(client).company_profile("AAPL").await;
    assert!(matches!(
        result,
        Err(ScrapeError::Request(yahoo_quotes_api::Error::RequestFailed))
    ));
}
