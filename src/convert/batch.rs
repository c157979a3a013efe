//! Parallel batch conversion.
//!
//! Every document owns its style context, list state and image map, so
//! inputs are converted independently on the rayon pool.

use std::path::PathBuf;

use rayon::prelude::*;

use super::{ConvertOptions, ConverterRegistry, OutputLayout};
use crate::error::Result;

/// One input of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchJob {
    /// Input document
    pub input: PathBuf,
    /// Where to write it; `None` converts without writing
    pub layout: Option<OutputLayout>,
}

impl BatchJob {
    /// A job that converts and writes to `layout`.
    pub fn new(input: impl Into<PathBuf>, layout: OutputLayout) -> Self {
        Self {
            input: input.into(),
            layout: Some(layout),
        }
    }

    /// A job that only converts.
    pub fn convert_only(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            layout: None,
        }
    }
}

/// Outcome of one batch job.
#[derive(Debug)]
pub struct BatchOutcome {
    /// The input this outcome belongs to
    pub input: PathBuf,
    /// The converted document, or why it failed
    pub result: Result<super::ConvertResult>,
}

impl BatchOutcome {
    /// Whether the job succeeded.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Convert many documents in parallel.
///
/// Returns one outcome per job, in input order. A failing document never
/// stops the others.
pub fn convert_batch(jobs: &[BatchJob], options: &ConvertOptions) -> Vec<BatchOutcome> {
    let registry = ConverterRegistry::with_defaults();

    jobs.par_iter()
        .map(|job| {
            let result = registry.convert(&job.input, options).and_then(|converted| {
                if let Some(ref layout) = job.layout {
                    let layout = layout.clone().with_asset_dir_name(&options.render.asset_dir_name);
                    layout.write(&converted)?;
                }
                Ok(converted)
            });
            if let Err(ref e) = result {
                log::warn!("Failed to convert {}: {}", job.input.display(), e);
            }
            BatchOutcome {
                input: job.input.clone(),
                result,
            }
        })
        .collect()
}
