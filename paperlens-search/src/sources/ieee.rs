//! IEEE Xplore: scraped search results.
//!
//! Only results whose link is a document page on the Xplore site itself
//! (`…/document/<id>`) are kept; conference landing pages, author pages and
//! off-site links are dropped.

use scraper::{ElementRef, Html};
use url::Url;

use crate::browser::BrowserSession;
use crate::config::AggregatorConfig;
use crate::error::SearchError;
use crate::extract::{clean_text, extract_year};
use crate::source::SourceAdapter;
use crate::types::{RawPaper, Source};

use super::{first_text, selector, UNKNOWN_AUTHORS};

/// Result blocks scanned per search page.
const MAX_BLOCKS: usize = 5;

/// IEEE Xplore scraper.
#[derive(Debug, Clone, Copy, Default)]
pub struct IeeeAdapter;

impl SourceAdapter for IeeeAdapter {
    async fn fetch(
        &self,
        query: &str,
        config: &AggregatorConfig,
    ) -> Result<Vec<RawPaper>, SearchError> {
        tracing::trace!(query, "IEEE fetch");

        let site = config.endpoints.parsed(Source::Ieee)?;
        let mut search_url = site
            .join("/search/searchresult.jsp")
            .map_err(|e| SearchError::Config(format!("invalid IEEE search URL: {e}")))?;
        search_url
            .query_pairs_mut()
            .append_pair("newsearch", "true")
            .append_pair("queryText", query);

        let mut session = BrowserSession::open(config)?;
        session.navigate(search_url.clone()).await?;
        let page_url = session.current_url().cloned().unwrap_or(search_url);
        let papers = parse_ieee_html(session.page_source(), &page_url, &site, MAX_BLOCKS)?;
        session.close();

        tracing::debug!(count = papers.len(), "IEEE results parsed");
        Ok(papers)
    }

    fn source(&self) -> Source {
        Source::Ieee
    }
}

struct IeeeSelectors {
    result: scraper::Selector,
    title_link: scraper::Selector,
    snippet: scraper::Selector,
    authors: scraper::Selector,
    publisher_info: scraper::Selector,
}

impl IeeeSelectors {
    fn new() -> Result<Self, SearchError> {
        Ok(Self {
            result: selector(".List-results-items", "result")?,
            title_link: selector("h3 a[href]", "title")?,
            snippet: selector(".description, .twist-container", "snippet")?,
            authors: selector("p.author", "author")?,
            publisher_info: selector(".publisher-info-container", "publisher info")?,
        })
    }
}

/// Parse an Xplore results page.
///
/// `page_url` resolves relative links; `site` decides which links count as
/// on-site document pages.
fn parse_ieee_html(
    html: &str,
    page_url: &Url,
    site: &Url,
    max_blocks: usize,
) -> Result<Vec<RawPaper>, SearchError> {
    let document = Html::parse_document(html);
    let selectors = IeeeSelectors::new()?;

    let papers = document
        .select(&selectors.result)
        .take(max_blocks)
        .filter_map(
            |element| match parse_block(&element, &selectors, page_url, site) {
                Ok(paper) => Some(paper),
                Err(err) => {
                    tracing::debug!(error = %err, "skipping IEEE result");
                    None
                }
            },
        )
        .collect();
    Ok(papers)
}

fn parse_block(
    element: &ElementRef<'_>,
    sel: &IeeeSelectors,
    page_url: &Url,
    site: &Url,
) -> Result<RawPaper, SearchError> {
    let anchor = element
        .select(&sel.title_link)
        .next()
        .ok_or_else(|| SearchError::Parse("result has no title link".into()))?;

    let title = clean_text(&anchor.text().collect::<String>());
    if title.is_empty() {
        return Err(SearchError::Parse("result has an empty title".into()));
    }

    let href = anchor.value().attr("href").unwrap_or_default().trim();
    let link = page_url
        .join(href)
        .map_err(|e| SearchError::Parse(format!("bad link {href:?}: {e}")))?;
    if !is_document_url(&link, site) {
        return Err(SearchError::Parse(format!("{link} is not a document page")));
    }

    let year = first_text(element, &sel.publisher_info)
        .as_deref()
        .and_then(extract_year);

    Ok(RawPaper {
        title,
        link: link.into(),
        snippet: first_text(element, &sel.snippet).unwrap_or_default(),
        authors: first_text(element, &sel.authors).unwrap_or_else(|| UNKNOWN_AUTHORS.to_owned()),
        year,
        source: Source::Ieee,
        citations: 0,
    })
}

/// Whether `url` is a document page on the Xplore site.
fn is_document_url(url: &Url, site: &Url) -> bool {
    url.host_str() == site.host_str()
        && url.port_or_known_default() == site.port_or_known_default()
        && url.path().contains("/document")
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MOCK_IEEE_HTML: &str = r#"<!DOCTYPE html>
<html>
<body>
<div class="List-results-items">
  <h3><a href="/document/8578001/">Deep Learning for Computer Vision: A Brief Review</a></h3>
  <p class="author"><span>A. Voulodimos</span>; <span>N. Doulamis</span></p>
  <div class="publisher-info-container">Year: 2018 | Volume: 2018 | Journal Article</div>
  <div class="description">Over the last years deep learning methods have been shown to outperform previous methods.</div>
</div>
<div class="List-results-items">
  <h3><a href="/xpl/conhome/1000001/proceeding">Conference landing page</a></h3>
</div>
<div class="List-results-items">
  <h3><a href="https://elsewhere.example.com/document/1">Off-site document</a></h3>
</div>
<div class="List-results-items">
  <div class="description">A block with no title.</div>
</div>
<div class="List-results-items">
  <h3><a href="https://ieeexplore.ieee.org/document/9000002">Second document</a></h3>
  <div class="publisher-info-container">Publisher: IEEE</div>
</div>
<div class="List-results-items">
  <h3><a href="/document/9000003">Beyond the scan limit</a></h3>
</div>
</body>
</html>"#;

    fn site() -> Url {
        Url::parse("https://ieeexplore.ieee.org").expect("url")
    }

    #[test]
    fn parse_keeps_only_document_pages() {
        let page = site().join("/search/searchresult.jsp?queryText=x").expect("url");
        let papers = parse_ieee_html(MOCK_IEEE_HTML, &page, &site(), MAX_BLOCKS).expect("parse");
        assert_eq!(papers.len(), 2);

        assert_eq!(papers[0].title, "Deep Learning for Computer Vision: A Brief Review");
        assert_eq!(papers[0].link, "https://ieeexplore.ieee.org/document/8578001/");
        assert_eq!(papers[0].year, Some(2018));
        assert!(papers[0].snippet.starts_with("Over the last years"));
        assert_eq!(papers[0].authors, "A. Voulodimos; N. Doulamis");
        assert_eq!(papers[0].source, Source::Ieee);
        assert_eq!(papers[0].citations, 0);

        assert_eq!(papers[1].title, "Second document");
        assert_eq!(papers[1].year, None);
        assert_eq!(papers[1].authors, UNKNOWN_AUTHORS);
    }

    #[test]
    fn document_url_check() {
        let doc = Url::parse("https://ieeexplore.ieee.org/document/1").expect("url");
        let search = Url::parse("https://ieeexplore.ieee.org/search/searchresult.jsp").expect("url");
        let other = Url::parse("https://example.com/document/1").expect("url");
        assert!(is_document_url(&doc, &site()));
        assert!(!is_document_url(&search, &site()));
        assert!(!is_document_url(&other, &site()));
    }

    #[tokio::test]
    async fn fetch_navigates_search_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/searchresult.jsp"))
            .and(query_param("queryText", "computer vision"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<div class="List-results-items"><h3><a href="/document/42">Vision paper</a></h3>
                   <div class="publisher-info-container">Year: 2023</div></div>"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let config = AggregatorConfig {
            request_delay_ms: (0, 0),
            endpoints: crate::config::SourceEndpoints {
                ieee: server.uri(),
                ..Default::default()
            },
            ..Default::default()
        };
        let papers = IeeeAdapter.fetch("computer vision", &config).await.expect("fetch");
        assert_eq!(papers.len(), 1);
        assert_eq!(papers[0].link, format!("{}/document/42", server.uri()));
        assert_eq!(papers[0].year, Some(2023));
    }
}
