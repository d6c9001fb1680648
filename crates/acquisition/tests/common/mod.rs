//! Shared fakes for acquisition tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use acquisition::{ProbeOutcome, SourceProbe, Unreachable};
use async_trait::async_trait;
use reqwest::Url;

/// How a scripted candidate behaves.
#[derive(Debug, Clone)]
pub enum Script {
    /// Answer after the delay.
    Answer(Duration, ProbeOutcome),
    /// Never answer.
    Hang,
    Panic,
}

/// A probe that replays a fixed script per URL and records call order.
/// Unknown URLs are unreachable with a 404.
#[derive(Default)]
pub struct ScriptedProbe {
    scripts: HashMap<String, Script>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, script: Script) -> Self {
        self.scripts.insert(url.to_string(), script);
        self
    }

    pub fn reachable(self, url: &str) -> Self {
        self.with(url, Script::Answer(Duration::ZERO, ProbeOutcome::Reachable))
    }

    pub fn status(self, url: &str, code: u16) -> Self {
        self.with(
            url,
            Script::Answer(
                Duration::ZERO,
                ProbeOutcome::Unreachable(Unreachable::Status(code)),
            ),
        )
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[async_trait]
impl SourceProbe for ScriptedProbe {
    async fn probe(&self, url: &Url, _timeout: Duration) -> ProbeOutcome {
        self.calls.lock().unwrap().push(url.to_string());
        match self.scripts.get(url.as_str()) {
            Some(Script::Answer(delay, outcome)) => {
                tokio::time::sleep(*delay).await;
                outcome.clone()
            }
            Some(Script::Hang) => std::future::pending().await,
            Some(Script::Panic) => panic!("probe blew up"),
            None => ProbeOutcome::Unreachable(Unreachable::Status(404)),
        }
    }
}

pub fn list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
