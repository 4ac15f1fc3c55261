use crate::core::quality::usual::QualityWeights;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

pub const DEFAULT_BEAM_WIDTH: usize = 20;
pub const DEFAULT_NUM_SOLUTIONS: usize = 1;
pub const DEFAULT_OPTIMUM_COAT_LENGTH: usize = 5;
pub const DEFAULT_MIN_COAT_LENGTH: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Capacity of the beam kept at each fleshing level.
    pub beam_width: usize,
    /// Number of finished boards returned.
    pub num_solutions: usize,
    /// Expand each level on the rayon pool. Only honored when the crate is
    /// built with the `parallel` feature.
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            beam_width: DEFAULT_BEAM_WIDTH,
            num_solutions: DEFAULT_NUM_SOLUTIONS,
            parallel: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoatingConfig {
    /// Preferred length of a coat word; lengths are tried outward from here.
    pub optimum_length: usize,
    /// Shortest coat word considered.
    pub min_length: usize,
    /// Weights used to rank coated boards. Falls back to the search weights.
    pub quality: Option<QualityWeights>,
}

impl Default for CoatingConfig {
    fn default() -> Self {
        Self {
            optimum_length: DEFAULT_OPTIMUM_COAT_LENGTH,
            min_length: DEFAULT_MIN_COAT_LENGTH,
            quality: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuildConfig {
    pub rows: usize,
    pub cols: usize,
    pub search: SearchConfig,
    pub quality: QualityWeights,
    pub coating: CoatingConfig,
}

impl BuildConfig {
    /// Length of the longest word that can fit on the grid.
    pub fn max_word_length(&self) -> usize {
        self.rows.max(self.cols)
    }

    /// Weights for ranking coated boards.
    pub fn coating_quality(&self) -> &QualityWeights {
        self.coating.quality.as_ref().unwrap_or(&self.quality)
    }
}

#[derive(Default)]
pub struct BuildConfigBuilder {
    rows: Option<usize>,
    cols: Option<usize>,
    beam_width: Option<usize>,
    num_solutions: Option<usize>,
    parallel: Option<bool>,
    quality: Option<QualityWeights>,
    optimum_coat_length: Option<usize>,
    min_coat_length: Option<usize>,
    coating_quality: Option<QualityWeights>,
}

impl BuildConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(mut self, rows: usize) -> Self {
        self.rows = Some(rows);
        self
    }
    pub fn cols(mut self, cols: usize) -> Self {
        self.cols = Some(cols);
        self
    }
    pub fn beam_width(mut self, width: usize) -> Self {
        self.beam_width = Some(width);
        self
    }
    pub fn num_solutions(mut self, n: usize) -> Self {
        self.num_solutions = Some(n);
        self
    }
    pub fn parallel(mut self, enabled: bool) -> Self {
        self.parallel = Some(enabled);
        self
    }
    pub fn quality(mut self, weights: QualityWeights) -> Self {
        self.quality = Some(weights);
        self
    }
    pub fn optimum_coat_length(mut self, length: usize) -> Self {
        self.optimum_coat_length = Some(length);
        self
    }
    pub fn min_coat_length(mut self, length: usize) -> Self {
        self.min_coat_length = Some(length);
        self
    }
    pub fn coating_quality(mut self, weights: QualityWeights) -> Self {
        self.coating_quality = Some(weights);
        self
    }

    pub fn build(self) -> Result<BuildConfig, ConfigError> {
        let rows = self.rows.ok_or(ConfigError::MissingParameter("rows"))?;
        let cols = self.cols.ok_or(ConfigError::MissingParameter("cols"))?;
        require_positive("rows", rows)?;
        require_positive("cols", cols)?;

        let search = SearchConfig {
            beam_width: self.beam_width.unwrap_or(DEFAULT_BEAM_WIDTH),
            num_solutions: self.num_solutions.unwrap_or(DEFAULT_NUM_SOLUTIONS),
            parallel: self.parallel.unwrap_or(false),
        };
        require_positive("beam_width", search.beam_width)?;
        require_positive("num_solutions", search.num_solutions)?;

        let coating = CoatingConfig {
            optimum_length: self
                .optimum_coat_length
                .unwrap_or(DEFAULT_OPTIMUM_COAT_LENGTH),
            min_length: self.min_coat_length.unwrap_or(DEFAULT_MIN_COAT_LENGTH),
            quality: self.coating_quality,
        };
        require_positive("min_coat_length", coating.min_length)?;
        if coating.optimum_length < coating.min_length {
            return Err(ConfigError::InvalidParameter {
                name: "optimum_coat_length",
                reason: format!(
                    "must be at least min_coat_length ({})",
                    coating.min_length
                ),
            });
        }

        Ok(BuildConfig {
            rows,
            cols,
            search,
            quality: self.quality.unwrap_or_default(),
            coating,
        })
    }
}

fn require_positive(name: &'static str, value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::InvalidParameter {
            name,
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(())
}
