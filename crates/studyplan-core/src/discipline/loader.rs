//! Loading disciplines and their content from disk.

use std::path::Path;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::table::{parse_discipline_list, parse_subjects};
use super::{close_all, Discipline, DisciplineSpec};
use crate::content::StreamCursor;
use crate::error::{PlanError, Result};
use crate::storage::table::read_records;

/// How content tables are held during a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    /// Read every content table up front, grouped by subject.
    #[default]
    Materialized,
    /// Keep each content table open and read one row at a time.
    Streaming,
}

/// Load the discipline list at `list_path` and every content table it names.
///
/// Content sources are resolved relative to the list's directory.
pub fn load_disciplines(list_path: &Path, mode: StorageMode) -> Result<Vec<Discipline>> {
    let records = read_records(list_path)?;
    let specs = parse_discipline_list(&records)?;
    let base_dir = list_path.parent().unwrap_or_else(|| Path::new(""));

    let disciplines = load_from_specs(specs, base_dir, mode)?;
    info!(
        count = disciplines.len(),
        mode = ?mode,
        "loaded disciplines from {}",
        list_path.display()
    );
    Ok(disciplines)
}

/// Attach content to already parsed discipline rows, keeping their order.
///
/// Materialized content is read in parallel; the first failure wins.
pub fn load_from_specs(
    specs: Vec<DisciplineSpec>,
    base_dir: &Path,
    mode: StorageMode,
) -> Result<Vec<Discipline>> {
    match mode {
        StorageMode::Materialized => specs
            .into_par_iter()
            .map(|spec| load_materialized(spec, base_dir))
            .collect(),
        StorageMode::Streaming => {
            let mut disciplines = Vec::with_capacity(specs.len());
            for spec in specs {
                match open_stream(spec, base_dir) {
                    Ok(discipline) => disciplines.push(discipline),
                    Err(err) => {
                        // Already opened sources are released before bailing
                        let _ = close_all(&mut disciplines);
                        return Err(err);
                    }
                }
            }
            Ok(disciplines)
        }
    }
}

fn load_materialized(spec: DisciplineSpec, base_dir: &Path) -> Result<Discipline> {
    let path = base_dir.join(&spec.source);
    debug!(discipline = %spec.name, path = %path.display(), "reading content");

    let subjects = read_records(&path)
        .and_then(|records| parse_subjects(&records).map_err(PlanError::from))
        .inspect_err(|err| {
            error!(discipline = %spec.name, error = %err, "failed to load content");
        })?;

    Ok(Discipline::with_subjects(spec, subjects))
}

fn open_stream(spec: DisciplineSpec, base_dir: &Path) -> Result<Discipline> {
    let path = base_dir.join(&spec.source);
    debug!(discipline = %spec.name, path = %path.display(), "opening content stream");

    let cursor =
        StreamCursor::open(&path).map_err(|err| PlanError::cursor(spec.name.clone(), err))?;
    Ok(Discipline::streaming(spec, cursor))
}
