//! Sequential and fork-join reduction of segment results

use super::{
    grid::PixelGrid,
    luminance::LuminanceFn,
    partition::Partition,
    segment::{sum_segment, SegmentResult},
};
use crate::error::{BrightnessError, Result};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, instrument, trace, warn};

/// Sum the whole image in one pass on the calling thread
pub fn reduce_sequential<I>(image: &I, luminance: LuminanceFn) -> Result<SegmentResult>
where
    I: PixelGrid + ?Sized,
{
    sum_segment(image, 0, image.width(), luminance)
}

/// Sum every partition on its own blocking task and fold the partial results
///
/// All tasks are spawned before any is awaited. Each task sends exactly one
/// result through a channel sized to the partition count; the fold runs here,
/// after every task has been joined.
///
/// # Errors
/// - The first segment error received from any task
/// - `TaskFailed` when a task panicked or did not deliver its result
#[instrument(level = "debug", skip(image, partitions, luminance), fields(partitions = partitions.len()))]
pub async fn reduce_parallel<I>(
    image: Arc<I>,
    partitions: &[Partition],
    luminance: LuminanceFn,
) -> Result<SegmentResult>
where
    I: PixelGrid + ?Sized + 'static,
{
    if partitions.is_empty() {
        return Ok(SegmentResult::default());
    }

    let (tx, mut rx) = mpsc::channel::<Result<SegmentResult>>(partitions.len());
    let mut handles = Vec::with_capacity(partitions.len());

    for &Partition { x_min, x_max } in partitions {
        let image = Arc::clone(&image);
        let tx = tx.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            debug!(x_min, x_max, "Covering segment");
            let result = sum_segment(&*image, x_min, x_max, luminance);
            // Capacity equals the partition count, so this never waits
            if tx.blocking_send(result).is_err() {
                warn!(x_min, x_max, "Result receiver dropped before segment was delivered");
            }
        }));
    }
    drop(tx);

    let mut partials = Vec::with_capacity(partitions.len());
    while let Some(partial) = rx.recv().await {
        partials.push(partial);
    }

    futures::future::try_join_all(handles).await.map_err(|e| {
        if e.is_panic() {
            BrightnessError::task_failed(format!("segment task panicked: {}", e))
        } else {
            BrightnessError::task_failed(format!("segment task did not complete: {}", e))
        }
    })?;

    if partials.len() != partitions.len() {
        return Err(BrightnessError::task_failed(format!(
            "received {} of {} segment results",
            partials.len(),
            partitions.len()
        )));
    }

    debug!("All splits have completed. Reducing results...");
    let mut total = SegmentResult::default();
    for partial in partials {
        total = total.merge(partial?);
        trace!(
            pixel_count = total.pixel_count,
            luminance_sum = total.luminance_sum,
            "Running total"
        );
    }
    Ok(total)
}
