//! Command handlers: build a page session, answer one message, print JSON.

use std::sync::Arc;

use inspector_core::AppConfig;
use inspector_scan::{Request, Response, Scanner};
use inspector_scraper::{PageSession, StaticPage, SystemClock};

pub(crate) async fn run_scan(
    config: &AppConfig,
    url: &str,
    analyze: bool,
    browser: bool,
) -> anyhow::Result<()> {
    let scanner = Scanner::from_app_config(config, Arc::new(SystemClock))?;
    if analyze && scanner.analysis().is_none() {
        tracing::warn!("--analyze given but INSPECTOR_ANALYSIS_URL is not set");
    }
    let page = open_page(&scanner, url, browser).await?;
    let response = scanner
        .handle(page.as_ref(), Request::ScanListing, analyze)
        .await;
    print_response(&response)
}

pub(crate) async fn run_open_reviews(
    config: &AppConfig,
    url: &str,
    browser: bool,
) -> anyhow::Result<()> {
    let scanner = Scanner::from_app_config(config, Arc::new(SystemClock))?;
    let page = open_page(&scanner, url, browser).await?;
    let response = scanner
        .handle(page.as_ref(), Request::OpenReviews, false)
        .await;
    print_response(&response)
}

async fn open_page(
    scanner: &Scanner,
    url: &str,
    browser: bool,
) -> anyhow::Result<Box<dyn PageSession>> {
    if browser {
        #[cfg(feature = "browser")]
        {
            return Ok(Box::new(inspector_scraper::ChromePage::launch(url).await?));
        }
        #[cfg(not(feature = "browser"))]
        anyhow::bail!("--browser needs inspector-cli built with the `browser` feature");
    }
    let page = StaticPage::fetch(scanner.client(), url)
        .await
        .map_err(|e| anyhow::anyhow!("failed to fetch {url}: {e}"))?;
    Ok(Box::new(page))
}

/// Prints the response; a failed scan still prints, then exits non-zero.
fn print_response(response: &Response) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(response)?);
    if let Response::Failed(failed) = response {
        anyhow::bail!("scan failed: {}", failed.error);
    }
    Ok(())
}
