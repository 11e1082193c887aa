//! Headless browsing session used by the scraped sources.
//!
//! A [`BrowserSession`] loads pages over HTTP, keeps the current page
//! source and URL, and can "click" a link by following it to its final,
//! redirect-resolved destination. DOM queries run against
//! [`BrowserSession::page_source`] with CSS selectors.
//!
//! A session is owned by exactly one adapter invocation. It is released
//! when dropped, which covers success, early `?` returns and panics alike.
//! Every navigation goes through the session's [`RateLimiter`].

use url::Url;

use crate::config::AggregatorConfig;
use crate::error::SearchError;
use crate::http;
use crate::rate_limit::RateLimiter;

/// A response read in full, not yet made the current page.
struct LoadedPage {
    status: reqwest::StatusCode,
    url: Url,
    body: String,
}

/// An exclusive, scoped browsing session.
pub struct BrowserSession {
    client: reqwest::Client,
    limiter: RateLimiter,
    current_url: Option<Url>,
    page: String,
    pages_loaded: usize,
}

impl BrowserSession {
    /// Start a new session with a fresh cookie jar and User-Agent.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the underlying client cannot be built.
    pub fn open(config: &AggregatorConfig) -> Result<Self, SearchError> {
        let client = http::build_client(config)?;
        tracing::trace!("browser session opened");
        Ok(Self {
            client,
            limiter: RateLimiter::from_config(config),
            current_url: None,
            page: String::new(),
            pages_loaded: 0,
        })
    }

    /// Load `url`, replacing the current page.
    ///
    /// Redirects are followed; [`current_url`](Self::current_url) reports
    /// where the browser finally landed.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Navigation`] on connection failure, a non-2xx
    /// status, or an unreadable body.
    pub async fn navigate(&mut self, url: Url) -> Result<(), SearchError> {
        let loaded = self.fetch(url.clone()).await?;
        if !loaded.status.is_success() {
            return Err(SearchError::Navigation(format!(
                "{url} returned {}",
                loaded.status
            )));
        }
        self.commit(loaded);
        Ok(())
    }

    /// Follow a link as if it had been clicked and return the resolved URL.
    ///
    /// Relative `href`s are resolved against the current page. The landing
    /// page's status does not matter: a publisher answering 403 to bots has
    /// still been reached, and its URL is the resolved target.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Navigation`] if the link is malformed or no
    /// response arrives at all.
    pub async fn follow(&mut self, href: &str) -> Result<Url, SearchError> {
        let target = self.resolve(href)?;
        let loaded = self.fetch(target).await?;
        if !loaded.status.is_success() {
            tracing::debug!(
                status = %loaded.status,
                url = %loaded.url,
                "followed link landed on an error page"
            );
        }
        let landed = loaded.url.clone();
        self.commit(loaded);
        Ok(landed)
    }

    async fn fetch(&self, url: Url) -> Result<LoadedPage, SearchError> {
        self.limiter.wait().await;
        tracing::trace!(%url, "navigate");

        let response = self
            .client
            .get(url.clone())
            .header("Accept", "text/html,application/xhtml+xml")
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| SearchError::Navigation(format!("failed to load {url}: {e}")))?;

        let status = response.status();
        let landed = response.url().clone();
        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Navigation(format!("failed to read {landed}: {e}")))?;

        tracing::trace!(url = %landed, %status, bytes = body.len(), "page loaded");
        Ok(LoadedPage {
            status,
            url: landed,
            body,
        })
    }

    fn commit(&mut self, loaded: LoadedPage) {
        self.current_url = Some(loaded.url);
        self.page = loaded.body;
        self.pages_loaded += 1;
    }

    /// Resolve `href` against the current page URL.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Navigation`] if `href` cannot form a URL.
    pub fn resolve(&self, href: &str) -> Result<Url, SearchError> {
        let resolved = match self.current_url {
            Some(ref base) => base.join(href),
            None => Url::parse(href),
        };
        resolved.map_err(|e| SearchError::Navigation(format!("invalid link {href:?}: {e}")))
    }

    /// HTML source of the current page (empty before the first navigation).
    pub fn page_source(&self) -> &str {
        &self.page
    }

    /// URL of the current page, after redirects.
    pub fn current_url(&self) -> Option<&Url> {
        self.current_url.as_ref()
    }

    /// Number of pages loaded so far in this session.
    pub fn pages_loaded(&self) -> usize {
        self.pages_loaded
    }

    /// End the session explicitly. Dropping the session has the same effect.
    pub fn close(self) {}
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        tracing::trace!(pages = self.pages_loaded, "browser session released");
    }
}
