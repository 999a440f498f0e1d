//! Context Resolver
//!
//! Gathers ambient page context (active URL, current selection) from the
//! host for template rendering. Resolution never fails: losing context is
//! a degraded-but-usable outcome, so every host failure collapses to an
//! empty value.

use std::sync::Arc;

use url::Url;

use crate::host::{is_restricted_url, HostPlatform};
use crate::models::context::PromptContext;

pub struct ContextResolver {
    host: Arc<dyn HostPlatform>,
}

impl ContextResolver {
    pub fn new(host: Arc<dyn HostPlatform>) -> Self {
        Self { host }
    }

    /// Resolve the current context. On a restricted page only the URL is
    /// returned and no script evaluation is attempted; a failed selection
    /// read is swallowed and leaves the selection empty.
    pub async fn resolve(&self) -> PromptContext {
        let tab = match self.host.active_tab().await {
            Ok(Some(tab)) => tab,
            Ok(None) => return PromptContext::default(),
            Err(e) => {
                tracing::debug!("active tab query failed: {}", e);
                return PromptContext::default();
            }
        };

        let mut context = PromptContext {
            url: Some(tab.url.clone()),
            ..Default::default()
        };

        if is_restricted_url(&tab.url) {
            return context;
        }

        match self.host.read_selection(tab.id).await {
            Ok(selection) => context.selection = Some(selection),
            Err(e) => {
                tracing::debug!("selection read failed, continuing without: {}", e);
            }
        }

        // TODO: clipboard capture needs a host read capability; until then
        // the clipboard marker renders empty.
        context
    }

    /// Hostname of the active page, used to gate contextual prompts.
    pub async fn active_domain(&self) -> Option<String> {
        let tab = self.host.active_tab().await.ok().flatten()?;
        Url::parse(&tab.url)
            .ok()?
            .host_str()
            .map(|host| host.to_string())
    }
}
