use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::StayScopeError;
use crate::config::SearchConfig;
use crate::models::HotelRecord;
use crate::nearby_service::{NearbyService, SourcesOverview};
use crate::report::NearbyReport;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<NearbyService>,
    pub search: SearchConfig,
}

#[derive(Serialize, Deserialize)]
pub struct ApiHotel {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub price: u32,
    pub rating: f64,
    pub label: String,
}

impl From<&HotelRecord> for ApiHotel {
    fn from(hotel: &HotelRecord) -> Self {
        Self {
            name: hotel.name.clone(),
            latitude: hotel.coordinates.latitude,
            longitude: hotel.coordinates.longitude,
            price: hotel.price,
            rating: hotel.rating,
            label: hotel.label(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NearbyQuery {
    pub hotel: String,
    /// Meters; the configured default when omitted
    pub radius: Option<f64>,
}

pub struct ApiError(StayScopeError);

impl From<StayScopeError> for ApiError {
    fn from(error: StayScopeError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            StayScopeError::HotelNotFound { .. } => StatusCode::NOT_FOUND,
            StayScopeError::InvalidRadius { .. } | StayScopeError::Validation { .. } => {
                StatusCode::BAD_REQUEST
            }
            StayScopeError::EmptyFeed { .. } => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::warn!("Request failed: {}", self.0);
        }

        (status, Json(json!({ "error": self.0.user_message() }))).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/hotels", get(get_hotels))
        .route("/nearby", get(get_nearby))
        .route("/sources", get(get_sources))
        .with_state(state)
}

async fn get_hotels(State(state): State<AppState>) -> Result<Json<Vec<ApiHotel>>, ApiError> {
    let snapshot = state.service.hotel_snapshot().await;
    if snapshot.hotels.is_empty() {
        return Err(StayScopeError::empty_feed("hotel list").into());
    }
    Ok(Json(snapshot.hotels.iter().map(ApiHotel::from).collect()))
}

async fn get_nearby(
    State(state): State<AppState>,
    Query(query): Query<NearbyQuery>,
) -> Result<Json<NearbyReport>, ApiError> {
    let radius_m = query
        .radius
        .unwrap_or_else(|| f64::from(state.search.default_radius_m));
    state.search.check_radius(radius_m)?;

    let report = state.service.nearby(&query.hotel, radius_m).await?;
    Ok(Json(report))
}

async fn get_sources(State(state): State<AppState>) -> Json<SourcesOverview> {
    Json(state.service.sources().await)
}
