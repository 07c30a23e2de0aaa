use std::sync::Arc;

use sheet_layout::LayoutOptions;

use crate::config::AppConfig;

/// Application state shared with every axum handler.
///
/// Read-only after startup; each request builds its own documents.
#[derive(Clone)]
pub struct SharedState {
    inner: Arc<SharedStateInner>,
}

struct SharedStateInner {
    config: AppConfig,
    layout: LayoutOptions,
}

impl SharedState {
    pub fn new(config: AppConfig) -> Self {
        Self::with_layout(config, LayoutOptions::default())
    }

    pub fn with_layout(config: AppConfig, layout: LayoutOptions) -> Self {
        Self {
            inner: Arc::new(SharedStateInner { config, layout }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn layout_options(&self) -> &LayoutOptions {
        &self.inner.layout
    }
}
