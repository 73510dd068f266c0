//! Dashboard server client
//!
//! Wraps the core HTTP gateway and runs session effects as browser tasks.
//! Effects run concurrently, so overlapping data requests are possible; the
//! session drops responses that are not the latest.

use dioxus::prelude::*;
use wasm_bindgen_futures::spawn_local as spawn;

use evalboard_core::{DashboardConfig, DashboardSession, Effect, Gateway, HttpGateway};

/// Base URL baked in at build time, like any other frontend env setting
const BUILD_BASE_URL: Option<&str> = option_env!("EVALBOARD_API_BASE_URL");

/// Base URL for the dashboard server: the build-time setting, or `/api` on
/// the page origin.
pub fn base_url() -> String {
    if let Some(url) = BUILD_BASE_URL.filter(|u| !u.is_empty()) {
        return url.to_string();
    }
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .map(|origin| format!("{origin}/api"))
        .unwrap_or_default()
}

pub fn gateway() -> HttpGateway {
    let config = DashboardConfig::with_base_url(base_url());
    tracing::info!(base_url = %config.api_base_url, "Dashboard gateway configured");
    HttpGateway::from_config(&config)
}

/// Session state plus the gateway its effects run against.
/// Shared with components via context.
#[derive(Clone)]
pub struct DashboardHandle {
    pub session: Signal<DashboardSession>,
    gateway: HttpGateway,
}

impl DashboardHandle {
    pub fn new(session: Signal<DashboardSession>, gateway: HttpGateway) -> Self {
        Self { session, gateway }
    }

    /// Apply a transition to the session and run the effects it returns
    pub fn apply(&self, transition: impl FnOnce(&mut DashboardSession) -> Vec<Effect>) {
        let mut session = self.session;
        let effects = transition(&mut *session.write());
        dispatch(session, self.gateway.clone(), effects);
    }
}

fn dispatch(mut session: Signal<DashboardSession>, gateway: HttpGateway, effects: Vec<Effect>) {
    for effect in effects {
        let gateway = gateway.clone();
        spawn(async move {
            let follow_up = match effect {
                Effect::LoadColorConfig => {
                    let result = gateway.color_config().await;
                    session.write().on_color_config(result);
                    Vec::new()
                }
                Effect::Upload(file) => {
                    let result = gateway.upload(&file).await;
                    session.write().on_upload(result)
                }
                Effect::LoadFilters => {
                    let result = gateway.filters().await;
                    session.write().on_filters(result)
                }
                Effect::LoadData { seq, query } => {
                    let result = gateway.data(&query).await;
                    session.write().on_data(seq, result);
                    Vec::new()
                }
            };
            dispatch(session, gateway, follow_up);
        });
    }
}
