//! Diagnostics emitted while resolving objects and extracting columns.
//!
//! The extraction layer reports what it found through an
//! [`ExtractionObserver`] instead of deciding itself how loudly to log.
//! Return values carry the outcome; observers only see it.

/// Receives diagnostics from [`CatalogTools`](crate::CatalogTools).
///
/// All methods default to doing nothing.
pub trait ExtractionObserver: Send + Sync {
    /// A search hit matched both name and class type.
    fn match_found(&self, _object_name: &str, _object_type: &str, _object_id: &str) {}

    /// The search ran out of hits, or hit the ceiling, without a match.
    fn search_exhausted(&self, _object_name: &str, _object_type: &str, _hits_inspected: usize) {}

    /// Column extraction was asked for an object that is not a table or view.
    fn not_a_table(&self, _object_id: &str, _class_type: Option<&str>) {}
}

/// Observer that forwards diagnostics to `tracing`.
///
/// With `verbose` set, matches are reported at info level instead of debug.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver {
    verbose: bool,
}

impl TracingObserver {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

impl ExtractionObserver for TracingObserver {
    fn match_found(&self, object_name: &str, object_type: &str, object_id: &str) {
        if self.verbose {
            tracing::info!(object_name, object_type, object_id, "Match found");
        } else {
            tracing::debug!(object_name, object_type, object_id, "Match found");
        }
    }

    fn search_exhausted(&self, object_name: &str, object_type: &str, hits_inspected: usize) {
        tracing::debug!(object_name, object_type, hits_inspected, "No matching object found");
    }

    fn not_a_table(&self, object_id: &str, class_type: Option<&str>) {
        tracing::error!(
            object_id,
            class_type = ?class_type,
            "Passed in ID of an object that isn't a table or view"
        );
    }
}
