//! W3C WebDriver backend.
//!
//! Talks to any WebDriver server (chromedriver, geckodriver, Selenium)
//! over HTTP with a blocking client. Elements are looked up fresh on every
//! call, which keeps the session free of stale references between steps.

use std::thread;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::blocking::{Client, RequestBuilder};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use super::{Driver, DriverError, DriverResult, Key, Locator, Target};

/// Key under which WebDriver serializes element references.
const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

const CLICK_SCRIPT: &str = "arguments[0].click();";

/// Browser launch options sent as session capabilities.
#[derive(Debug, Clone)]
pub struct BrowserOptions {
    /// Browser name: `chrome`, `firefox`, or anything the server accepts.
    pub browser: String,
    /// Run without a visible window.
    pub headless: bool,
    /// Window size in CSS pixels.
    pub window: (u32, u32),
    /// Delay after every interaction.
    pub slow_mo: Duration,
    /// Per-request HTTP timeout.
    pub request_timeout: Duration,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            browser: "chrome".to_string(),
            headless: false,
            window: (1366, 900),
            slow_mo: Duration::from_millis(150),
            request_timeout: Duration::from_secs(60),
        }
    }
}

impl BrowserOptions {
    /// Build the `capabilities` object for `POST /session`.
    pub fn capabilities(&self) -> Value {
        let (width, height) = self.window;
        let always_match = match self.browser.as_str() {
            "chrome" | "chromium" => {
                let mut args = vec![format!("--window-size={},{}", width, height)];
                if self.headless {
                    args.push("--headless=new".to_string());
                }
                json!({
                    "browserName": "chrome",
                    "goog:chromeOptions": { "args": args },
                })
            }
            "firefox" => {
                let mut args = vec![
                    format!("--width={}", width),
                    format!("--height={}", height),
                ];
                if self.headless {
                    args.push("-headless".to_string());
                }
                json!({
                    "browserName": "firefox",
                    "moz:firefoxOptions": { "args": args },
                })
            }
            other => json!({ "browserName": other }),
        };
        json!({ "alwaysMatch": always_match })
    }
}

/// A live WebDriver session.
pub struct WebDriverSession {
    client: Client,
    endpoint: String,
    session_id: Option<String>,
    slow_mo: Duration,
}

impl WebDriverSession {
    /// Open a new browser session on the WebDriver server at `endpoint`.
    pub fn connect(endpoint: &str, options: &BrowserOptions) -> DriverResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("hrflow/", env!("CARGO_PKG_VERSION")))
            .timeout(options.request_timeout)
            .build()?;
        let endpoint = endpoint.trim_end_matches('/').to_string();

        let body = json!({ "capabilities": options.capabilities() });
        let value = send(client.post(format!("{}/session", endpoint)).json(&body))?;
        let session_id = value
            .get("sessionId")
            .and_then(Value::as_str)
            .ok_or_else(|| DriverError::InvalidResponse("missing sessionId".to_string()))?
            .to_string();

        info!("Opened {} session {} at {}", options.browser, session_id, endpoint);

        Ok(Self {
            client,
            endpoint,
            session_id: Some(session_id),
            slow_mo: options.slow_mo,
        })
    }

    /// Session id, or `None` once closed.
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    fn url(&self, path: &str) -> DriverResult<String> {
        let id = self.session_id.as_deref().ok_or(DriverError::SessionClosed)?;
        Ok(format!("{}/session/{}{}", self.endpoint, id, path))
    }

    fn get(&self, path: &str) -> DriverResult<Value> {
        send(self.client.get(self.url(path)?))
    }

    fn post(&self, path: &str, body: Value) -> DriverResult<Value> {
        send(self.client.post(self.url(path)?).json(&body))
    }

    fn find_all(&self, locator: &Locator) -> DriverResult<Vec<String>> {
        let query = locator.query();
        let value = self.post(
            "/elements",
            json!({ "using": query.strategy.as_webdriver(), "value": query.value }),
        )?;
        let elements = value
            .as_array()
            .ok_or_else(|| DriverError::InvalidResponse("elements is not an array".to_string()))?;

        Ok(elements
            .iter()
            .filter_map(|e| e.get(ELEMENT_KEY).and_then(Value::as_str))
            .map(String::from)
            .collect())
    }

    fn element(&self, target: &Target) -> DriverResult<String> {
        self.find_all(&target.locator)?
            .into_iter()
            .nth(target.index)
            .ok_or_else(|| DriverError::NoSuchElement(target.to_string()))
    }

    fn settle(&self) {
        if !self.slow_mo.is_zero() {
            thread::sleep(self.slow_mo);
        }
    }
}

impl Driver for WebDriverSession {
    fn navigate(&mut self, url: &str) -> DriverResult<()> {
        debug!("Navigating to {}", url);
        self.post("/url", json!({ "url": url }))?;
        self.settle();
        Ok(())
    }

    fn count(&mut self, locator: &Locator) -> DriverResult<usize> {
        Ok(self.find_all(locator)?.len())
    }

    fn is_visible(&mut self, target: &Target) -> DriverResult<bool> {
        let Some(id) = self.find_all(&target.locator)?.into_iter().nth(target.index) else {
            return Ok(false);
        };
        match self.get(&format!("/element/{}/displayed", id)) {
            Ok(value) => Ok(value.as_bool().unwrap_or(false)),
            Err(DriverError::Protocol { error, .. }) if error == "stale element reference" => {
                Ok(false)
            }
            Err(DriverError::NoSuchElement(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn click(&mut self, target: &Target) -> DriverResult<()> {
        let id = self.element(target)?;
        debug!("Clicking {}", target);
        self.post(&format!("/element/{}/click", id), json!({}))?;
        self.settle();
        Ok(())
    }

    fn fill(&mut self, target: &Target, text: &str) -> DriverResult<()> {
        let id = self.element(target)?;
        debug!("Filling {}", target);
        self.post(&format!("/element/{}/clear", id), json!({}))?;
        if !text.is_empty() {
            self.post(&format!("/element/{}/value", id), json!({ "text": text }))?;
        }
        self.settle();
        Ok(())
    }

    fn text(&mut self, target: &Target) -> DriverResult<String> {
        let id = self.element(target)?;
        let value = self.get(&format!("/element/{}/text", id))?;
        value
            .as_str()
            .map(String::from)
            .ok_or_else(|| DriverError::InvalidResponse("element text is not a string".to_string()))
    }

    fn press_key(&mut self, key: Key) -> DriverResult<()> {
        self.post("/actions", key_actions(key))?;
        self.settle();
        Ok(())
    }

    fn script_click(&mut self, target: &Target) -> DriverResult<()> {
        let id = self.element(target)?;
        debug!("Script-clicking {}", target);
        self.post(
            "/execute/sync",
            json!({ "script": CLICK_SCRIPT, "args": [{ ELEMENT_KEY: id }] }),
        )?;
        self.settle();
        Ok(())
    }

    fn screenshot(&mut self) -> DriverResult<Vec<u8>> {
        let value = self.get("/screenshot")?;
        let encoded = value
            .as_str()
            .ok_or_else(|| DriverError::InvalidResponse("screenshot is not a string".to_string()))?;
        Ok(STANDARD.decode(encoded)?)
    }

    fn pause(&mut self, duration: Duration) {
        thread::sleep(duration);
    }

    fn close(&mut self) -> DriverResult<()> {
        let id = self.session_id.take().ok_or(DriverError::SessionClosed)?;
        send(
            self.client
                .delete(format!("{}/session/{}", self.endpoint, id)),
        )?;
        info!("Closed session {}", id);
        Ok(())
    }
}

impl Drop for WebDriverSession {
    fn drop(&mut self) {
        if self.session_id.is_some() {
            if let Err(e) = self.close() {
                warn!("Failed to close WebDriver session: {}", e);
            }
        }
    }
}

/// Send a request and unwrap the WebDriver `value` envelope.
fn send(request: RequestBuilder) -> DriverResult<Value> {
    let response = request.send()?;
    let status = response.status();
    let body: Value = response
        .json()
        .map_err(|e| DriverError::InvalidResponse(format!("HTTP {}: {}", status, e)))?;
    let value = body.get("value").cloned().unwrap_or(Value::Null);

    if status.is_success() {
        Ok(value)
    } else {
        Err(protocol_error(&value, status.as_u16()))
    }
}

fn protocol_error(value: &Value, status: u16) -> DriverError {
    let error = value
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or("unknown error")
        .to_string();
    let message = value
        .get("message")
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| format!("HTTP {}", status));

    if error == "no such element" {
        DriverError::NoSuchElement(message)
    } else {
        DriverError::Protocol { error, message }
    }
}

fn key_code(key: Key) -> &'static str {
    match key {
        Key::ArrowDown => "\u{E015}",
        Key::Enter => "\u{E007}",
        Key::Escape => "\u{E00C}",
        Key::Delete => "\u{E017}",
        Key::SelectAll => "a",
    }
}

/// Build a `POST /actions` payload for one key press.
fn key_actions(key: Key) -> Value {
    let code = key_code(key);
    let actions = if key == Key::SelectAll {
        json!([
            { "type": "keyDown", "value": "\u{E009}" },
            { "type": "keyDown", "value": code },
            { "type": "keyUp", "value": code },
            { "type": "keyUp", "value": "\u{E009}" },
        ])
    } else {
        json!([
            { "type": "keyDown", "value": code },
            { "type": "keyUp", "value": code },
        ])
    };
    json!({ "actions": [{ "type": "key", "id": "keyboard", "actions": actions }] })
}
