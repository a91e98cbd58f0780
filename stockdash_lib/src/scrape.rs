//! HTML scraping of the company profile page.

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use yahoo_quotes_api::Client;

#[derive(thiserror::Error, Debug)]
pub enum ScrapeError {
    #[error("request error: {0}")]
    Request(#[from] yahoo_quotes_api::Error),
    #[error("parse error: {0}")]
    Parse(String),
}

/// Selector for the company name heading.
const NAME_SELECTOR: &str = r#"h3[class="Fz(m) Mb(10px)"]"#;
/// Selector for the bold profile values; the first is the sector, the second the industry.
const VALUE_SELECTOR: &str = r#"span[class~="Fw(600)"]"#;

/// Name, sector and industry of a listed company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyProfile {
    pub ticker: String,
    pub name: String,
    pub sector: String,
    pub industry: String,
}

pub struct ScrapeClient {
    client: Client,
}

impl ScrapeClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Fetches and parses the profile page.
    ///
    /// A non-success status yields `Ok(None)`; transport failures and pages
    /// whose markup no longer matches the selectors are errors.
    pub async fn company_profile(
        &self,
        ticker: &str,
    ) -> Result<Option<CompanyProfile>, ScrapeError> {
        match self.client.get_profile_html(ticker).await {
            Ok(html) => parse_profile_html(ticker, &html).map(Some),
            Err(yahoo_quotes_api::Error::HttpStatus { status, .. }) => {
                tracing::warn!(
                    "N/A: profile page for {} returned status {}",
                    ticker.to_uppercase(),
                    status
                );
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css)
        .map_err(|e| ScrapeError::Parse(format!("invalid selector {}: {:?}", css, e)))
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extracts the profile fields from page HTML.
pub fn parse_profile_html(ticker: &str, html: &str) -> Result<CompanyProfile, ScrapeError> {
    let doc = Html::parse_document(html);
    let name_sel = selector(NAME_SELECTOR)?;
    let value_sel = selector(VALUE_SELECTOR)?;

    let name = doc
        .select(&name_sel)
        .next()
        .map(element_text)
        .ok_or_else(|| ScrapeError::Parse("missing company name heading".into()))?;

    let mut values = doc.select(&value_sel).map(element_text);
    let sector = values
        .next()
        .ok_or_else(|| ScrapeError::Parse("missing sector".into()))?;
    let industry = values
        .next()
        .ok_or_else(|| ScrapeError::Parse("missing industry".into()))?;

    Ok(CompanyProfile {
        ticker: ticker.to_uppercase(),
        name,
        sector,
        industry,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body>
<section>
  <h3 class="Fz(m) Mb(10px)">Apple Inc.</h3>
  <p class="D(ib) Va(t)">
    <span>Sector(s)</span>: <span class="Fw(600)">Technology</span><br/>
    <span>Industry</span>: <span class="Fw(600)">Consumer   Electronics</span><br/>
    <span>Full Time Employees</span>: <span class="Fw(600)"><span>164,000</span></span>
  </p>
</section>
</body></html>"#;

    #[test]
    fn parses_name_sector_industry() {
        let profile = parse_profile_html("aapl", PAGE).unwrap();
        assert_eq!(
            profile,
            CompanyProfile {
                ticker: "AAPL".into(),
                name: "Apple Inc.".into(),
                sector: "Technology".into(),
                industry: "Consumer Electronics".into(),
            }
        );
    }

    #[test]
    fn other_h3_ignored() {
        let html = PAGE.replace(
            "<section>",
            r#"<section><h3 class="Fz(s)">Quote Lookup</h3>"#,
        );
        assert_eq!(parse_profile_html("AAPL", &html).unwrap().name, "Apple Inc.");
    }

    #[test]
    fn extra_classes_on_values_still_match() {
        let html = PAGE.replace(r#"class="Fw(600)""#, r#"class="Fw(600) C($c-fuji-grey-l)""#);
        let profile = parse_profile_html("AAPL", &html).unwrap();
        assert_eq!(profile.sector, "Technology");
    }

    #[test]
    fn missing_heading_is_parse_error() {
        let html = PAGE.replace("Fz(m) Mb(10px)", "Fz(l)");
        match parse_profile_html("AAPL", &html) {
            Err(ScrapeError::Parse(msg)) => assert!(msg.contains("name")),
            other => panic!("expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn missing_industry_is_parse_error() {
        let html = r#"<h3 class="Fz(m) Mb(10px)">X</h3><span class="Fw(600)">Energy</span>"#;
        match parse_profile_html("X", html) {
            Err(ScrapeError::Parse(msg)) => assert!(msg.contains("industry")),
            other => panic!("expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn selectors_compile() {
        assert!(selector(NAME_SELECTOR).is_ok());
        assert!(selector(VALUE_SELECTOR).is_ok());
    }
}
