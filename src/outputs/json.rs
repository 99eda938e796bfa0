//! JSON output for the aggregator.
//!
//! Each [`ScrapeBatch`] is written to `{json_output_dir}/{date}/{source}.json`.

use crate::models::ScrapeBatch;
use std::error::Error;
use std::path::PathBuf;
use tokio::fs;
use tracing::{error, info, instrument};

/// Write a [`ScrapeBatch`] to a JSON file with date-based directory structure.
///
/// # Returns
///
/// The path of the written file, or an error if directory creation or file
/// writing fails.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir, source = %batch.source))]
pub async fn write_batch(
    batch: &ScrapeBatch,
    json_output_dir: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(batch)?;

    let full_json_dir = PathBuf::from(json_output_dir).join(&batch.local_date);
    if let Err(e) = fs::create_dir_all(&full_json_dir).await {
        error!(dir = %full_json_dir.display(), error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let output_json_filename = full_json_dir.join(format!("{}.json", batch.source));
    fs::write(&output_json_filename, json).await?;
    info!(
        path = %output_json_filename.display(),
        count = batch.articles.len(),
        "Wrote JSON batch"
    );

    Ok(output_json_filename)
}
