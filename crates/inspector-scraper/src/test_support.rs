//! A scripted [`PageSession`] for driving the interactive strategies in tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::ScraperError;
use crate::page::PageSession;

#[derive(Debug, Default)]
struct ScriptState {
    current: String,
    pending: VecDeque<String>,
    on_click: HashMap<String, Vec<String>>,
    clicks: Vec<String>,
}

/// Serves `html` until a scripted selector is clicked; each later `html()`
/// call then yields the next scripted frame, and the last frame sticks.
#[derive(Debug)]
pub(crate) struct ScriptedPage {
    url: String,
    reachable: bool,
    state: Mutex<ScriptState>,
}

impl ScriptedPage {
    pub(crate) fn new(url: &str, html: &str) -> Self {
        Self {
            url: url.to_owned(),
            reachable: true,
            state: Mutex::new(ScriptState {
                current: html.to_owned(),
                ..ScriptState::default()
            }),
        }
    }

    /// A page whose every call fails, as if the tab had gone away.
    pub(crate) fn unreachable(url: &str) -> Self {
        Self {
            reachable: false,
            ..Self::new(url, "")
        }
    }

    pub(crate) fn on_click(self, selector: &str, frames: Vec<String>) -> Self {
        self.state
            .lock()
            .unwrap()
            .on_click
            .insert(selector.to_owned(), frames);
        self
    }

    pub(crate) fn clicks(&self) -> Vec<String> {
        self.state.lock().unwrap().clicks.clone()
    }

    fn check(&self, action: &str) -> Result<(), ScraperError> {
        if self.reachable {
            Ok(())
        } else {
            Err(ScraperError::page(action, "page closed"))
        }
    }
}

#[async_trait]
impl PageSession for ScriptedPage {
    async fn url(&self) -> Result<String, ScraperError> {
        self.check("read url")?;
        Ok(self.url.clone())
    }

    async fn html(&self) -> Result<String, ScraperError> {
        self.check("read content")?;
        let mut state = self.state.lock().unwrap();
        if let Some(next) = state.pending.pop_front() {
            state.current = next;
        }
        Ok(state.current.clone())
    }

    async fn click(&self, selector: &str) -> Result<(), ScraperError> {
        self.check("click")?;
        let mut state = self.state.lock().unwrap();
        state.clicks.push(selector.to_owned());
        let frames = state
            .on_click
            .get(selector)
            .cloned()
            .ok_or_else(|| ScraperError::page(format!("click {selector}"), "no such element"))?;
        state.pending = frames.into();
        Ok(())
    }

    async fn scroll_into_view(&self, _selector: &str) -> Result<(), ScraperError> {
        self.check("scroll")
    }
}
