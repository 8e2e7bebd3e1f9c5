use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::time::{Instant, sleep, timeout};
use tracing::{debug, info, warn};

use crate::domain::{BrowserLauncher, DomainError, PageSession};
use crate::infrastructure::http_client::HttpClientTrait;

/// W3C identifier under which element references are returned
const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

const SCROLL_TO_BOTTOM: &str = "window.scrollTo(0, document.body.scrollHeight);";
const SCROLL_HEIGHT: &str = "return document.body.scrollHeight;";

/// Settings for sessions opened against a WebDriver endpoint
#[derive(Debug, Clone)]
pub struct WebDriverOptions {
    pub endpoint: String,
    pub headless: bool,
    pub page_load_timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for WebDriverOptions {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:9515".to_string(),
            headless: true,
            page_load_timeout: Duration::from_secs(30),
            poll_interval: Duration::from_millis(250),
        }
    }
}

/// Opens one Chrome session per launch on a chromedriver-compatible endpoint
#[derive(Debug)]
pub struct WebDriverLauncher<C: HttpClientTrait + Clone> {
    client: C,
    options: WebDriverOptions,
}

impl<C: HttpClientTrait + Clone> WebDriverLauncher<C> {
    pub fn new(client: C, mut options: WebDriverOptions) -> Self {
        options.endpoint = options.endpoint.trim_end_matches('/').to_string();
        Self { client, options }
    }

    fn capabilities(&self) -> Value {
        let mut args = vec![
            "--no-sandbox",
            "--disable-dev-shm-usage",
            "--window-size=1920,1080",
        ];
        if self.options.headless {
            args.push("--headless=new");
        }

        json!({
            "capabilities": {
                "alwaysMatch": {
                    "browserName": "chrome",
                    "goog:chromeOptions": { "args": args }
                }
            }
        })
    }
}

#[async_trait]
impl<C: HttpClientTrait + Clone + 'static> BrowserLauncher for WebDriverLauncher<C> {
    async fn launch(&self) -> Result<Box<dyn PageSession>, DomainError> {
        let url = format!("{}/session", self.options.endpoint);
        let response = self
            .client
            .post_json(&url, vec![], &self.capabilities())
            .await
            .map_err(|e| DomainError::navigation(format!("Failed to start browser: {}", e)))?;

        let session_id = response["value"]["sessionId"]
            .as_str()
            .ok_or_else(|| DomainError::navigation("WebDriver returned no session id"))?
            .to_string();

        info!(session_id = %session_id, "Browser session started");

        let page = WebDriverPage {
            client: self.client.clone(),
            session_url: format!("{}/session/{}", self.options.endpoint, session_id),
            poll_interval: self.options.poll_interval,
        };

        let timeouts = json!({
            "pageLoad": self.options.page_load_timeout.as_millis() as u64,
            "script": self.options.page_load_timeout.as_millis() as u64,
        });
        if let Err(e) = page.post("timeouts", &timeouts).await {
            warn!(error = %e, "Failed to set page load timeout");
        }

        Ok(Box::new(page))
    }
}

/// A live WebDriver session
#[derive(Debug)]
pub struct WebDriverPage<C: HttpClientTrait> {
    client: C,
    session_url: String,
    poll_interval: Duration,
}

impl<C: HttpClientTrait> WebDriverPage<C> {
    async fn post(&self, command: &str, body: &Value) -> Result<Value, DomainError> {
        let url = format!("{}/{}", self.session_url, command);
        let response = self.client.post_json(&url, vec![], body).await?;
        Ok(response["value"].clone())
    }

    async fn get(&self, command: &str) -> Result<Value, DomainError> {
        let url = format!("{}/{}", self.session_url, command);
        let response = self.client.get_json(&url, vec![]).await?;
        Ok(response["value"].clone())
    }

    async fn execute(&self, script: &str) -> Result<Value, DomainError> {
        self.post("execute/sync", &json!({ "script": script, "args": [] }))
            .await
    }

    async fn find_element(&self, selector: &str) -> Result<String, DomainError> {
        let value = self
            .post(
                "element",
                &json!({ "using": "css selector", "value": selector }),
            )
            .await
            .map_err(|e| {
                DomainError::extraction(format!("Element '{}' not found: {}", selector, e))
            })?;

        value[ELEMENT_KEY]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| DomainError::extraction(format!("Element '{}' not found", selector)))
    }
}

#[async_trait]
impl<C: HttpClientTrait> PageSession for WebDriverPage<C> {
    async fn goto(&self, url: &str, limit: Duration) -> Result<(), DomainError> {
        debug!(url = %url, "Navigating");

        match timeout(limit, self.post("url", &json!({ "url": url }))).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(DomainError::navigation(format!(
                "Failed to navigate to {}: {}",
                url, e
            ))),
            Err(_) => Err(DomainError::navigation(format!(
                "Timeout navigating to {}",
                url
            ))),
        }
    }

    async fn wait_for_selector(&self, selector: &str, limit: Duration) -> Result<(), DomainError> {
        let deadline = Instant::now() + limit;

        loop {
            if self.count(selector).await? > 0 {
                return Ok(());
            }

            if Instant::now() >= deadline {
                return Err(DomainError::navigation(format!(
                    "Timeout waiting for selector '{}'",
                    selector
                )));
            }

            sleep(self.poll_interval).await;
        }
    }

    async fn scroll_to_bottom(&self) -> Result<(), DomainError> {
        self.execute(SCROLL_TO_BOTTOM).await.map(|_| ())
    }

    async fn scroll_height(&self) -> Result<u64, DomainError> {
        let value = self.execute(SCROLL_HEIGHT).await?;

        value
            .as_u64()
            .or_else(|| value.as_f64().map(|h| h.max(0.0) as u64))
            .ok_or_else(|| DomainError::extraction(format!("Unexpected scroll height: {}", value)))
    }

    async fn count(&self, selector: &str) -> Result<usize, DomainError> {
        let value = self
            .post(
                "elements",
                &json!({ "using": "css selector", "value": selector }),
            )
            .await
            .map_err(|e| DomainError::navigation(format!("Element query failed: {}", e)))?;

        Ok(value.as_array().map(Vec::len).unwrap_or(0))
    }

    async fn content(&self) -> Result<String, DomainError> {
        let value = self
            .get("source")
            .await
            .map_err(|e| DomainError::extraction(format!("Failed to read page source: {}", e)))?;

        Ok(value.as_str().unwrap_or_default().to_string())
    }

    async fn fill(&self, selector: &str, value: &str) -> Result<(), DomainError> {
        let element = self.find_element(selector).await?;

        self.post(&format!("element/{}/clear", element), &json!({}))
            .await?;
        self.post(
            &format!("element/{}/value", element),
            &json!({ "text": value }),
        )
        .await?;

        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<(), DomainError> {
        let element = self.find_element(selector).await?;
        self.post(&format!("element/{}/click", element), &json!({}))
            .await?;
        Ok(())
    }

    async fn current_url(&self) -> Result<String, DomainError> {
        let value = self.get("url").await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    async fn close(&self) -> Result<(), DomainError> {
        self.client.delete_json(&self.session_url, vec![]).await?;
        debug!(session = %self.session_url, "Browser session closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::infrastructure::http_client::mock::MockHttpClient;

    const ENDPOINT: &str = "http://driver:9515";
    const SESSION: &str = "http://driver:9515/session/abc";

    fn options() -> WebDriverOptions {
        WebDriverOptions {
            endpoint: ENDPOINT.to_string(),
            poll_interval: Duration::from_millis(1),
            ..Default::default()
        }
    }

    fn session_client() -> MockHttpClient {
        MockHttpClient::new()
            .with_response(
                "POST",
                format!("{}/session", ENDPOINT),
                json!({"value": {"sessionId": "abc", "capabilities": {}}}),
            )
            .with_response("POST", format!("{}/timeouts", SESSION), json!({"value": null}))
    }

    async fn launch(client: Arc<MockHttpClient>) -> Box<dyn PageSession> {
        WebDriverLauncher::new(client, options())
            .launch()
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_launch_requests_headless_chrome() {
        let client = Arc::new(session_client());
        launch(client.clone()).await;

        let sent = client.requests_to("POST", &format!("{}/session", ENDPOINT));
        let args = sent[0].body.clone().unwrap()["capabilities"]["alwaysMatch"]
            ["goog:chromeOptions"]["args"]
            .clone();
        assert!(args.as_array().unwrap().contains(&json!("--headless=new")));

        let timeouts = client.requests_to("POST", &format!("{}/timeouts", SESSION));
        assert_eq!(timeouts[0].body.clone().unwrap()["pageLoad"], 30_000);
    }

    #[tokio::test]
    async fn test_launch_without_driver_is_navigation_error() {
        let client = Arc::new(MockHttpClient::new().with_error(
            "POST",
            format!("{}/session", ENDPOINT),
            "connection refused",
        ));

        let result = WebDriverLauncher::new(client, options()).launch().await;
        assert!(matches!(result, Err(DomainError::Navigation { .. })));
    }

    #[tokio::test]
    async fn test_count_and_wait_for_selector() {
        let elements = format!("{}/elements", SESSION);
        let client = Arc::new(
            session_client()
                .with_response("POST", &elements, json!({"value": []}))
                .with_response(
                    "POST",
                    &elements,
                    json!({"value": [{ELEMENT_KEY: "e1"}, {ELEMENT_KEY: "e2"}]}),
                ),
        );
        let page = launch(client.clone()).await;

        page.wait_for_selector("li.item", Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(page.count("li.item").await.unwrap(), 2);
        assert_eq!(client.requests_to("POST", &elements).len(), 3);
    }

    #[tokio::test]
    async fn test_wait_for_selector_times_out() {
        let client = Arc::new(session_client().with_response(
            "POST",
            format!("{}/elements", SESSION),
            json!({"value": []}),
        ));
        let page = launch(client).await;

        let result = page
            .wait_for_selector("div.never", Duration::from_millis(5))
            .await;
        assert!(matches!(result, Err(DomainError::Navigation { .. })));
    }

    #[tokio::test]
    async fn test_scroll_height_and_source() {
        let client = Arc::new(
            session_client()
                .with_response(
                    "POST",
                    format!("{}/execute/sync", SESSION),
                    json!({"value": 2480}),
                )
                .with_response(
                    "GET",
                    format!("{}/source", SESSION),
                    json!({"value": "<html><body>hi</body></html>"}),
                ),
        );
        let page = launch(client).await;

        assert_eq!(page.scroll_height().await.unwrap(), 2480);
        assert!(page.content().await.unwrap().contains("hi"));
    }

    #[tokio::test]
    async fn test_fill_click_and_close() {
        let client = Arc::new(
            session_client()
                .with_response(
                    "POST",
                    format!("{}/element", SESSION),
                    json!({"value": {ELEMENT_KEY: "e7"}}),
                )
                .with_response("POST", format!("{}/element/e7/clear", SESSION), json!({"value": null}))
                .with_response("POST", format!("{}/element/e7/value", SESSION), json!({"value": null}))
                .with_response("POST", format!("{}/element/e7/click", SESSION), json!({"value": null}))
                .with_response("DELETE", SESSION, json!({"value": null})),
        );
        let page = launch(client.clone()).await;

        page.fill("input[name='session_key']", "jane@example.com")
            .await
            .unwrap();
        page.click("button[type='submit']").await.unwrap();
        page.close().await.unwrap();

        let typed = client.requests_to("POST", &format!("{}/element/e7/value", SESSION));
        assert_eq!(typed[0].body.clone().unwrap()["text"], "jane@example.com");
        assert_eq!(client.requests_to("DELETE", SESSION).len(), 1);
    }

    #[tokio::test]
    async fn test_missing_element_is_extraction_error() {
        let client = Arc::new(session_client().with_error(
            "POST",
            format!("{}/element", SESSION),
            "HTTP 404: no such element",
        ));
        let page = launch(client).await;

        let result = page.click("button.missing").await;
        assert!(matches!(result, Err(DomainError::Extraction { .. })));
    }
}
