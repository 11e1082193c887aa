//! Google Scholar: scraped result pages with citation counts.
//!
//! Scholar wraps many outbound links in its own redirectors
//! (`/scholar_url?url=…`, `/url?q=…`) or links to intermediate pages on
//! its own domain. Only records that resolve to a URL outside Scholar are
//! kept.

use scraper::{ElementRef, Html};
use url::Url;

use crate::browser::BrowserSession;
use crate::config::AggregatorConfig;
use crate::error::SearchError;
use crate::extract::{clean_text, extract_citations, extract_year};
use crate::source::SourceAdapter;
use crate::types::{RawPaper, Source};

use super::{first_text, selector, UNKNOWN_AUTHORS};

/// Result blocks scanned per search page.
const MAX_BLOCKS: usize = 15;

/// Query parameters Scholar's redirectors carry the real target in.
const REDIRECT_PARAMS: &[&str] = &["url", "q"];

/// Google Scholar scraper.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoogleScholarAdapter;

/// Fields lifted from one result block before its link is resolved.
#[derive(Debug, Clone, PartialEq)]
struct ScholarBlock {
    title: String,
    href: Option<String>,
    snippet: String,
    byline: Option<String>,
    citations: u32,
}

impl SourceAdapter for GoogleScholarAdapter {
    async fn fetch(
        &self,
        query: &str,
        config: &AggregatorConfig,
    ) -> Result<Vec<RawPaper>, SearchError> {
        tracing::trace!(query, "Google Scholar fetch");

        let base = config.endpoints.parsed(Source::GoogleScholar)?;
        let mut search_url = base
            .join("/scholar")
            .map_err(|e| SearchError::Config(format!("invalid Scholar search URL: {e}")))?;
        search_url
            .query_pairs_mut()
            .append_pair("q", query)
            .append_pair("hl", "en");

        let mut session = BrowserSession::open(config)?;
        session.navigate(search_url.clone()).await?;
        let page_url = session.current_url().cloned().unwrap_or(search_url);
        let blocks = parse_scholar_html(session.page_source(), MAX_BLOCKS)?;

        let mut papers = Vec::with_capacity(blocks.len());
        for block in blocks {
            let Some(link) = resolve_outbound(&mut session, &base, &page_url, block.href.as_deref()).await
            else {
                tracing::debug!(title = %block.title, "skipping Scholar result without a direct link");
                continue;
            };

            let year = block.byline.as_deref().and_then(extract_year);
            papers.push(RawPaper {
                title: block.title,
                link,
                snippet: block.snippet,
                authors: block.byline.unwrap_or_else(|| UNKNOWN_AUTHORS.to_owned()),
                year,
                source: Source::GoogleScholar,
                citations: block.citations,
            });
        }

        tracing::debug!(count = papers.len(), "Google Scholar results parsed");
        Ok(papers)
    }

    fn source(&self) -> Source {
        Source::GoogleScholar
    }
}

/// Parse a Scholar results page into result blocks.
///
/// Blocks that cannot be read (no title) are logged and skipped; the page
/// as a whole only fails if the selectors themselves are invalid.
fn parse_scholar_html(html: &str, max_blocks: usize) -> Result<Vec<ScholarBlock>, SearchError> {
    let document = Html::parse_document(html);
    let selectors = ScholarSelectors::new()?;

    let blocks = document
        .select(&selectors.result)
        .take(max_blocks)
        .filter_map(|element| match parse_block(&element, &selectors) {
            Ok(block) => Some(block),
            Err(err) => {
                tracing::debug!(error = %err, "skipping unreadable Scholar block");
                None
            }
        })
        .collect();
    Ok(blocks)
}

struct ScholarSelectors {
    result: scraper::Selector,
    title: scraper::Selector,
    link: scraper::Selector,
    snippet: scraper::Selector,
    byline: scraper::Selector,
    footer: scraper::Selector,
}

impl ScholarSelectors {
    fn new() -> Result<Self, SearchError> {
        Ok(Self {
            result: selector(".gs_r", "result")?,
            title: selector(".gs_rt", "title")?,
            link: selector("a[href]", "link")?,
            snippet: selector(".gs_rs", "snippet")?,
            byline: selector(".gs_a", "author")?,
            footer: selector(".gs_fl", "footer")?,
        })
    }
}

fn parse_block(element: &ElementRef<'_>, sel: &ScholarSelectors) -> Result<ScholarBlock, SearchError> {
    let title_el = element
        .select(&sel.title)
        .next()
        .ok_or_else(|| SearchError::Parse("result block has no title".into()))?;

    let anchor = title_el.select(&sel.link).next();
    let title = match anchor {
        Some(a) => clean_text(&a.text().collect::<String>()),
        None => clean_text(&title_el.text().collect::<String>()),
    };
    if title.is_empty() {
        return Err(SearchError::Parse("result block has an empty title".into()));
    }

    let href = anchor
        .and_then(|a| a.value().attr("href"))
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map(str::to_owned);

    let footer: String = element
        .select(&sel.footer)
        .map(|el| el.text().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ");

    Ok(ScholarBlock {
        title,
        href,
        snippet: first_text(element, &sel.snippet).unwrap_or_default(),
        byline: first_text(element, &sel.byline),
        citations: extract_citations(&footer),
    })
}

/// Turn a result's `href` into a direct, non-Scholar URL.
///
/// Tries, in order: the link itself, a target embedded in a Scholar
/// redirector, and finally following the link with the session. Returns
/// `None` when every option still points at Scholar or fails.
async fn resolve_outbound(
    session: &mut BrowserSession,
    search_base: &Url,
    page_url: &Url,
    href: Option<&str>,
) -> Option<String> {
    let absolute = page_url.join(href?).ok()?;
    if !is_search_engine_url(&absolute, search_base) {
        return Some(absolute.into());
    }

    if let Some(target) = decode_redirect(&absolute) {
        if !is_search_engine_url(&target, search_base) {
            return Some(target.into());
        }
    }

    match session.follow(absolute.as_str()).await {
        Ok(landed) if !is_search_engine_url(&landed, search_base) => Some(landed.into()),
        Ok(landed) => {
            tracing::trace!(%landed, "Scholar link resolved back to Scholar");
            None
        }
        Err(err) => {
            tracing::debug!(error = %err, "failed to follow Scholar link");
            None
        }
    }
}

/// Whether `url` belongs to the search engine rather than a publisher.
fn is_search_engine_url(url: &Url, search_base: &Url) -> bool {
    let same_origin = url.host_str() == search_base.host_str()
        && url.port_or_known_default() == search_base.port_or_known_default();
    same_origin
        || url
            .host_str()
            .is_some_and(|host| host.contains("scholar.google."))
}

/// Extract the real target from a Scholar redirector URL, if present.
fn decode_redirect(url: &Url) -> Option<Url> {
    url.query_pairs()
        .filter(|(key, _)| REDIRECT_PARAMS.contains(&key.as_ref()))
        .filter_map(|(_, value)| Url::parse(&value).ok())
        .find(|target| matches!(target.scheme(), "http" | "https"))
}
