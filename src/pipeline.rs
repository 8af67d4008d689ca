// 🔁 Enrichment Pipeline - ordered passes over the whole collection
//
// A pass maps the collection to an updated collection in place. Passes are
// independent; the conventional order is Values → Images → Narrative.

use crate::config::Config;
use crate::item::Item;
use crate::store;
use anyhow::Result;
use serde::Serialize;
use std::path::Path;

// ============================================================================
// PASS
// ============================================================================

/// One enrichment step.
///
/// Adding a new enrichment means implementing this trait; the pipeline and
/// the binaries don't change.
pub trait Pass {
    /// Short name used in logs and reports
    fn name(&self) -> &'static str;

    /// Enrich every item in place and report what was touched
    fn apply(&self, items: &mut [Item]) -> PassReport;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassReport {
    pub pass: &'static str,
    pub total: usize,
    /// Named counters in the order the pass recorded them
    pub counts: Vec<(&'static str, usize)>,
}

impl PassReport {
    pub fn new(pass: &'static str, total: usize) -> Self {
        PassReport {
            pass,
            total,
            counts: Vec::new(),
        }
    }

    pub fn with_count(mut self, label: &'static str, value: usize) -> Self {
        self.counts.push((label, value));
        self
    }

    /// Counter value, 0 if the pass never recorded it
    pub fn count(&self, label: &str) -> usize {
        self.counts
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, v)| *v)
            .unwrap_or(0)
    }

    pub fn summary(&self) -> String {
        let counts: Vec<String> = self
            .counts
            .iter()
            .map(|(label, value)| format!("{} {}", value, label.replace('_', " ")))
            .collect();

        format!("[{}] {} items: {}", self.pass, self.total, counts.join(", "))
    }
}

// ============================================================================
// PIPELINE
// ============================================================================

#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub reports: Vec<PassReport>,
    pub fingerprint_before: String,
    pub fingerprint_after: String,
}

impl PipelineOutcome {
    pub fn changed(&self) -> bool {
        self.fingerprint_before != self.fingerprint_after
    }
}

pub struct Pipeline {
    passes: Vec<Box<dyn Pass>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Pipeline { passes: Vec::new() }
    }

    pub fn with_pass(mut self, pass: impl Pass + 'static) -> Self {
        self.passes.push(Box::new(pass));
        self
    }

    /// Values → Images → Narrative, with tables and reference year from `config`
    pub fn standard(config: &Config) -> Result<Self> {
        Ok(Pipeline::new()
            .with_pass(config.value_estimator())
            .with_pass(config.image_assigner()?)
            .with_pass(config.narrative_enhancer()?))
    }

    pub fn pass_names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    pub fn run(&self, items: &mut [Item]) -> Vec<PassReport> {
        self.passes
            .iter()
            .map(|pass| {
                tracing::debug!(pass = pass.name(), "running pass");
                pass.apply(items)
            })
            .collect()
    }

    /// Load the collection, run every pass, write the whole file back
    pub fn run_file(&self, path: &Path) -> Result<PipelineOutcome> {
        let mut items = store::load_collection(path)?;
        let fingerprint_before = store::fingerprint(&items);

        let reports = self.run(&mut items);

        let fingerprint_after = store::fingerprint(&items);
        store::save_collection(path, &items)?;

        let outcome = PipelineOutcome {
            reports,
            fingerprint_before,
            fingerprint_after,
        };

        if outcome.changed() {
            tracing::info!(path = ?path, "collection updated");
        } else {
            tracing::info!(path = ?path, "collection unchanged");
        }

        Ok(outcome)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Run a single pass against a collection file
pub fn run_pass_on_file(pass: impl Pass + 'static, path: &Path) -> Result<PipelineOutcome> {
    Pipeline::new().with_pass(pass).run_file(path)
}

// ============================================================================
// TESTS
// ============================================================================
