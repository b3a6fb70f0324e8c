//! Bootstrap data for the client-side hero and layout engines.

use axum::{Json, extract::State};
use serde::Serialize;

use shanny_core::model::{LayoutDefaults, Slide};

use crate::infra::app_state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteBootstrap {
    pub slides: Vec<Slide>,
    pub carousel_interval_ms: u64,
    pub layout: LayoutDefaults,
    pub frame_interval_ms: u64,
}

/// `GET /api/site`
pub async fn site_handler(State(state): State<AppState>) -> Json<SiteBootstrap> {
    let site = &state.config().site;
    Json(SiteBootstrap {
        slides: state.deck.iter().cloned().collect(),
        carousel_interval_ms: site.carousel_interval.as_millis() as u64,
        layout: site.layout,
        frame_interval_ms: site.frame_interval.as_millis() as u64,
    })
}
