//! Producer side of the alignment pipeline: read a line, parse it, normalize
//! the gap structure, trim the edges, and hand the record off through the
//! bounded queue. The consumer side (a consensus or graph builder) only needs
//! the queue handle.

use std::io::BufRead;

use anyhow::{anyhow, Result};

use crate::io::{self, AlnFormat};
use crate::normalize::{normalize_gaps, trim_edges};
use crate::queue::BoundedQueue;
use crate::types::{Alignment, GroupBy};

/// Per-stream configuration, fixed before parsing begins and passed
/// explicitly rather than held as global state.
#[derive(Debug, Clone, Copy)]
pub struct PipelineConfig {
    pub format: AlnFormat,
    pub group_by: GroupBy,
    /// Canonicalize indel placement by pushing gaps rightward.
    pub push_gaps: bool,
    /// Aligned target bases removed from each end after normalization.
    pub trim: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            format: AlnFormat::M5,
            group_by: GroupBy::Target,
            push_gaps: true,
            trim: 10,
        }
    }
}

/// Runs the parse -> normalize -> trim loop over `reader`, pushing each
/// record into `queue`. Returns the number of records pushed.
///
/// Blank lines are skipped. Records with too few aligned target bases for the
/// configured trim are skipped with a warning. A malformed line aborts the
/// stream with an error naming the line. A closed queue stops the loop
/// cleanly; records already handed off stay valid.
pub fn run_producer<R: BufRead>(
    reader: R,
    config: &PipelineConfig,
    queue: &BoundedQueue<Alignment>,
) -> Result<usize> {
    let mut pushed = 0usize;

    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        let parsed = io::parse_line(&line, config.format, config.group_by)
            .map_err(|e| anyhow!("Error parsing line {}: {}", line_num + 1, e))?;
        let Some(aln) = parsed else { continue };

        let mut aln = normalize_gaps(&aln, config.push_gaps);
        if config.trim > 0 {
            if aln.target_span() < 2 * config.trim as u64 {
                log::warn!(
                    "line {}: {} spans only {} target bases, too short to trim {} from each end; skipping",
                    line_num + 1,
                    aln.source_id,
                    aln.target_span(),
                    config.trim
                );
                continue;
            }
            aln = trim_edges(&aln, config.trim);
        }

        if queue.push(aln).is_err() {
            log::info!("queue closed, stopping after {} records", pushed);
            break;
        }
        pushed += 1;
    }

    Ok(pushed)
}
