use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::config::RouteDefinition;
use crate::http::server::AppState;

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub routes: usize,
}

/// A route definition with its declaration index.
#[derive(Serialize)]
pub struct RouteEntry {
    pub index: usize,
    #[serde(flatten)]
    pub route: RouteDefinition,
}

pub async fn get_status(State(state): State<AppState>) -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        routes: state.routes.load().len(),
    })
}

pub async fn get_routes(State(state): State<AppState>) -> Json<Vec<RouteEntry>> {
    let table = state.routes.load();
    let entries = table
        .routes()
        .enumerate()
        .map(|(index, route)| RouteEntry {
            index,
            route: route.clone(),
        })
        .collect();
    Json(entries)
}

pub async fn get_warnings(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.routes.load().validate_routes())
}

pub async fn get_routes_by_tenant(
    State(state): State<AppState>,
    Path(tenant): Path<String>,
) -> Json<Vec<RouteDefinition>> {
    let table = state.routes.load();
    Json(table.routes_by_tenant(&tenant).into_iter().cloned().collect())
}

pub async fn get_routes_by_host(
    State(state): State<AppState>,
    Path(host): Path<String>,
) -> Json<Vec<RouteDefinition>> {
    let table = state.routes.load();
    Json(table.routes_by_host(&host).into_iter().cloned().collect())
}
