//! axum service for the dashboard pages, CSV download and JSON summary.

use anyhow::{Context, Result};
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing::{debug, error, info};

use crate::equity::CountyRank;
use crate::load::{Dataset, LoadCache};
use crate::recommend;
use crate::render::{layout, pages, Page};
use crate::season::Season;
use crate::summary::{monthly_trend, summarize, Summary};
use crate::table::{self, CSV_MEDIA_TYPE, EXPORT_FILE_NAME};

/// Shared state backing HTTP handlers.
pub struct AppState {
    pub cache: Arc<LoadCache>,
    pub data_path: PathBuf,
    /// `None` when no county table was configured.
    pub rankings: Option<Vec<CountyRank>>,
    pub table_rows: usize,
}

impl AppState {
    /// Cached dataset for the configured path; the first load runs on the blocking pool.
    async fn dataset(&self) -> Result<Arc<Dataset>> {
        let cache = Arc::clone(&self.cache);
        let path = self.data_path.clone();
        tokio::task::spawn_blocking(move || cache.get_or_load(&path))
            .await
            .context("load task failed")?
    }
}

pub enum AppError {
    BadRequest(String),
    Internal(anyhow::Error),
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AppError::Internal(err) => {
                error!("request failed: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Error: {:#}", err),
                )
                    .into_response()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SeasonQuery {
    season: Option<String>,
}

impl SeasonQuery {
    fn season(&self) -> Result<Season, AppError> {
        match self.season.as_deref() {
            None | Some("") => Ok(Season::All),
            Some(s) => Season::from_str(s)
                .ok_or_else(|| AppError::BadRequest(format!("unknown season `{s}`"))),
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(Page::Overview.path(), get(overview_route))
        .route(Page::HotspotsMap.path(), get(hotspots_route))
        .route(Page::SeasonalTrends.path(), get(trends_route))
        .route(Page::EquityRankings.path(), get(equity_route))
        .route(Page::Recommendations.path(), get(recommendations_route))
        .route("/download", get(download_route))
        .route("/api/summary", get(summary_route))
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(addr: SocketAddr, state: Arc<AppState>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "dashboard listening");
    axum::serve(listener, router(state))
        .await
        .context("dashboard server error")
}

async fn overview_route(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SeasonQuery>,
) -> Result<Html<String>, AppError> {
    let season = q.season()?;
    let ds = state.dataset().await?;
    let retained = season.filter(&ds.records);
    let summary = summarize(season, &retained);
    debug!(season = season.as_str(), records = summary.records, "overview");
    let body = pages::overview(season, &summary, &retained, state.table_rows);
    Ok(Html(layout(Page::Overview, season, &body)))
}

async fn hotspots_route(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SeasonQuery>,
) -> Result<Html<String>, AppError> {
    let season = q.season()?;
    let ds = state.dataset().await?;
    let retained = season.filter(&ds.records);
    let summary = summarize(season, &retained);
    let body = pages::hotspots(&summary, &retained);
    Ok(Html(layout(Page::HotspotsMap, season, &body)))
}

async fn trends_route(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SeasonQuery>,
) -> Result<Html<String>, AppError> {
    let season = q.season()?;
    let ds = state.dataset().await?;
    let retained = season.filter(&ds.records);
    let body = pages::trends(&monthly_trend(&retained));
    Ok(Html(layout(Page::SeasonalTrends, season, &body)))
}

async fn equity_route(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SeasonQuery>,
) -> Result<Html<String>, AppError> {
    let season = q.season()?;
    let body = pages::equity(state.rankings.as_deref());
    Ok(Html(layout(Page::EquityRankings, season, &body)))
}

async fn recommendations_route(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SeasonQuery>,
) -> Result<Html<String>, AppError> {
    let season = q.season()?;
    let ds = state.dataset().await?;
    let retained = season.filter(&ds.records);
    let notes = recommend::recommendations(
        &summarize(season, &retained),
        &monthly_trend(&retained),
        state.rankings.as_deref(),
    );
    let body = pages::recommendations(&notes);
    Ok(Html(layout(Page::Recommendations, season, &body)))
}

async fn download_route(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SeasonQuery>,
) -> Result<Response, AppError> {
    let season = q.season()?;
    let ds = state.dataset().await?;
    let retained = season.filter(&ds.records);
    let bytes = table::to_csv_bytes(&retained)?;
    info!(season = season.as_str(), rows = retained.len(), "csv download");
    Ok((
        [
            (header::CONTENT_TYPE, CSV_MEDIA_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}

async fn summary_route(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SeasonQuery>,
) -> Result<Json<Summary>, AppError> {
    let season = q.season()?;
    let ds = state.dataset().await?;
    let retained = season.filter(&ds.records);
    Ok(Json(summarize(season, &retained)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use std::fs;
    use tempfile::{tempdir, TempDir};
    use tower::ServiceExt;

    const DATA: &str = "\
x,2023-04-10,100,Apr-23,1.0,38.0,22.5,80
y,2023-07-01,40,Jul-23,-0.5,37.1,19.0,12
far,2023-05-02,10,May-23,95.0,38.0,20,10
";

    fn state_with(dir: &TempDir, rankings: Option<Vec<CountyRank>>) -> Arc<AppState> {
        let path = dir.path().join("df_gps.csv");
        fs::write(&path, DATA).unwrap();
        Arc::new(AppState {
            cache: Arc::new(LoadCache::new()),
            data_path: path,
            rankings,
            table_rows: 100,
        })
    }

    async fn get(state: Arc<AppState>, uri: &str) -> (StatusCode, Option<String>, String) {
        let resp = router(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let ctype = resp
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, ctype, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_overview_page() {
        let dir = tempdir().unwrap();
        let (status, ctype, body) = get(state_with(&dir, None), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(ctype.unwrap().starts_with("text/html"));
        assert!(body.contains("Total Trees"));
        assert!(body.contains(">140<"));
        assert!(body.contains("50.0%"));
        assert!(body.contains("L.circleMarker"));
    }

    #[tokio::test]
    async fn test_all_pages_render() {
        let dir = tempdir().unwrap();
        let state = state_with(&dir, None);
        for page in Page::ALL {
            let uri = format!("{}?season=rainy", page.path());
            let (status, _, body) = get(Arc::clone(&state), &uri).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
            assert!(body.contains(page.title()));
        }
        // one load shared by every page
        assert_eq!(state.cache.len(), 1);
    }

    #[tokio::test]
    async fn test_bad_season_is_400() {
        let dir = tempdir().unwrap();
        let (status, _, _) = get(state_with(&dir, None), "/?season=monsoon").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_download_csv() {
        let dir = tempdir().unwrap();
        let resp = router(state_with(&dir, None))
            .oneshot(
                Request::builder()
                    .uri("/download?season=dry")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "text/csv");
        assert_eq!(
            resp.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"filtered_tree_planting.csv\""
        );
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("gps_str,plantingdate"));
        assert!(lines[1].starts_with("y,2023-07-01,40,"));
    }

    #[tokio::test]
    async fn test_summary_json() {
        let dir = tempdir().unwrap();
        let (status, _, body) = get(state_with(&dir, None), "/api/summary?season=rainy").await;
        assert_eq!(status, StatusCode::OK);
        let v: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(v["total_trees"], 100);
        assert_eq!(v["records"], 1);
        assert_eq!(v["rainy_pct"], 100.0);
        assert_eq!(v["season"], "Rainy");
    }

    #[tokio::test]
    async fn test_missing_data_file_is_500() {
        let dir = tempdir().unwrap();
        let state = Arc::new(AppState {
            cache: Arc::new(LoadCache::new()),
            data_path: dir.path().join("nope.csv"),
            rankings: None,
            table_rows: 10,
        });
        let (status, _, body) = get(state, "/").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains("opening"));
    }
}
