use futures::future::join_all;
use serde_json::Value;

use crate::catalog::CatalogClient;
use crate::import::{ImportError, ImportOutcome, ProductTypeImporter};

/// Per-chunk accounting returned when a chunk settles cleanly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChunkReport {
    pub processed: usize,
    pub imported: usize,
    pub skipped: usize,
}

/// Reconcile every definition in `chunk` as one concurrent set.
///
/// All items are dispatched at once and the chunk settles when the
/// slowest item settles; there is no internal timeout or cancellation.
/// The returned future is the completion signal the external stream
/// driver awaits before submitting the next chunk: it resolves with a
/// report when every item succeeded or was skipped under the continue
/// policy, and rejects with the first error (in input order) otherwise.
/// Failed items are already in the importer's ledger either way.
pub async fn run_chunk<C: CatalogClient>(
    importer: &ProductTypeImporter<C>,
    chunk: &[Value],
) -> Result<ChunkReport, ImportError> {
    let outcomes = join_all(chunk.iter().map(|def| importer.import_one(def))).await;

    let mut report = ChunkReport {
        processed: chunk.len(),
        ..ChunkReport::default()
    };
    for outcome in outcomes {
        match outcome? {
            ImportOutcome::SkippedInvalid => report.skipped += 1,
            ImportOutcome::Created(_)
            | ImportOutcome::Updated(_)
            | ImportOutcome::Unchanged(_) => report.imported += 1,
        }
    }
    Ok(report)
}
