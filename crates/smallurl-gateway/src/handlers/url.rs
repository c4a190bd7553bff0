use axum::extract::{Path, Query, State};
use axum::response::Redirect;
use axum::Json;
use smallurl_core::{LongUrl, ShortId, ShortenRequest};
use tracing::debug;
use url::Url;

use crate::error::{AppError, Result};
use crate::model::{ExpandQuery, ShortenUrlRequest, UrlResponse};
use crate::state::AppState;

pub async fn shorten_url_handler(
    State(state): State<AppState>,
    Json(request): Json<ShortenUrlRequest>,
) -> Result<Json<UrlResponse>> {
    let long_url = LongUrl::parse(request.long_url)?;
    // An empty `shortId` means "generate one".
    let custom_short_id = request
        .short_id
        .filter(|id| !id.is_empty())
        .map(ShortId::custom)
        .transpose()?;

    let response = state
        .shortener()
        .shorten(ShortenRequest {
            long_url,
            custom_short_id,
            base: state.base_url().clone(),
        })
        .await?;

    Ok(Json(response.into()))
}

pub async fn expand_url_handler(
    State(state): State<AppState>,
    Query(query): Query<ExpandQuery>,
) -> Result<Json<UrlResponse>> {
    let raw = query
        .short_url
        .filter(|url| !url.is_empty())
        .ok_or_else(|| AppError::BadRequest("query parameter 'shortUrl' is required".into()))?;
    let short_url = Url::parse(&raw)
        .map_err(|e| AppError::BadRequest(format!("'{raw}' is not a valid url: {e}")))?;

    let response = state.shortener().expand(&short_url).await?;
    Ok(Json(response.into()))
}

pub async fn redirect_handler(
    Path(short_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect> {
    let record = state
        .shortener()
        .resolve(&ShortId::new_unchecked(short_id))
        .await?;

    debug!(short_id = %record.short_id, long_url = %record.long_url, "redirecting");
    Ok(Redirect::to(&record.long_url))
}
