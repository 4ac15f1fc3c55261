use crate::error::{CliError, Result};
use crossweave::core::quality::usual::QualityWeights;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileGridConfig {
    pub rows: Option<usize>,
    pub cols: Option<usize>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileSearchConfig {
    pub beam_width: Option<usize>,
    pub num_solutions: Option<usize>,
    pub parallel: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileQualityWeights {
    pub word_lengths: Option<f64>,
    pub pending_lengths: Option<f64>,
    pub crossed_cells: Option<f64>,
    pub full_span: Option<f64>,
    pub sym_span: Option<f64>,
    pub surrounded_cells: Option<f64>,
    pub surrounded_requires_both: Option<bool>,
    pub need_crossings: Option<f64>,
    pub favour_centre: Option<f64>,
    pub edge_penalties: Option<Vec<f64>>,
    pub virgin_factor: Option<f64>,
}

impl FileQualityWeights {
    /// Overlays the values set in the file on `base`.
    pub fn apply_to(&self, base: QualityWeights) -> QualityWeights {
        QualityWeights {
            word_lengths: self.word_lengths.unwrap_or(base.word_lengths),
            pending_lengths: self.pending_lengths.unwrap_or(base.pending_lengths),
            crossed_cells: self.crossed_cells.unwrap_or(base.crossed_cells),
            full_span: self.full_span.unwrap_or(base.full_span),
            sym_span: self.sym_span.unwrap_or(base.sym_span),
            surrounded_cells: self.surrounded_cells.unwrap_or(base.surrounded_cells),
            surrounded_requires_both: self
                .surrounded_requires_both
                .unwrap_or(base.surrounded_requires_both),
            need_crossings: self.need_crossings.unwrap_or(base.need_crossings),
            favour_centre: self.favour_centre.unwrap_or(base.favour_centre),
            edge_penalties: self
                .edge_penalties
                .clone()
                .unwrap_or(base.edge_penalties),
            virgin_factor: self.virgin_factor.unwrap_or(base.virgin_factor),
        }
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileCoatingConfig {
    pub dictionary: Option<PathBuf>,
    pub optimum_length: Option<usize>,
    pub min_length: Option<usize>,
    pub quality: Option<FileQualityWeights>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub grid: Option<FileGridConfig>,
    pub search: Option<FileSearchConfig>,
    pub quality: Option<FileQualityWeights>,
    pub coating: Option<FileCoatingConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}
