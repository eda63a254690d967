//! Initialization endpoint

use axum::{extract::State, Json};

use crate::{models::InitializeResponse, state::AppState, Error, Result};

/// Reset the datastore from the configured SQL directory and rebuild
/// the cached snapshots. Files run in name order.
pub async fn initialize(State(state): State<AppState>) -> Result<Json<InitializeResponse>> {
    let scripts = sql_scripts(&state.config.database.init_sql_dir)?;
    for path in scripts {
        let sql = std::fs::read_to_string(&path)
            .map_err(|e| Error::Internal(format!("reading {}: {e}", path.display())))?;
        sqlx::raw_sql(&sql).execute(&state.pool).await?;
        tracing::info!(script = %path.display(), "Applied init script");
    }

    state.chairs.refresh_low_priced().await?;
    state.estates.refresh_low_priced().await?;

    Ok(Json(InitializeResponse { language: "rust" }))
}

fn sql_scripts(dir: &str) -> Result<Vec<std::path::PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| Error::Internal(format!("reading init sql dir {dir}: {e}")))?;
    let mut scripts: Vec<_> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "sql"))
        .collect();
    scripts.sort();
    Ok(scripts)
}
