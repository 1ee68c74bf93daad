//! Transaction export handler

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Response},
    Extension,
};
use tracing::info;

use crate::{AppError, AppState, CurrentUser};
use tally_core::write_transactions_csv;

/// GET /api/export-transactions - Download transaction history as CSV
pub async fn export_transactions(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Response<Body>, AppError> {
    let transactions = state.db.transaction_snapshot(user.0.id)?;

    let mut buf = Vec::new();
    write_transactions_csv(&mut buf, &transactions)?;

    info!(
        user = %user.0.username,
        count = transactions.len(),
        "Exported transactions to CSV"
    );

    let filename = format!(
        "transactions_export_{}.csv",
        chrono::Utc::now().format("%Y%m%d_%H%M%S")
    );

    let response = Response::builder()
        .header(header::CONTENT_TYPE, "text/csv")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        )
        .body(Body::from(buf))
        .map_err(|e| AppError::from(anyhow::anyhow!(e)))?;

    Ok(response)
}
