use crossweave::engine::config::{
    DEFAULT_BEAM_WIDTH, DEFAULT_MIN_COAT_LENGTH, DEFAULT_NUM_SOLUTIONS,
    DEFAULT_OPTIMUM_COAT_LENGTH,
};

pub struct DefaultsConfig {
    pub beam_width: usize,
    pub num_solutions: usize,
    pub parallel: bool,
    pub optimum_coat_length: usize,
    pub min_coat_length: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            beam_width: DEFAULT_BEAM_WIDTH,
            num_solutions: DEFAULT_NUM_SOLUTIONS,
            parallel: false,
            optimum_coat_length: DEFAULT_OPTIMUM_COAT_LENGTH,
            min_coat_length: DEFAULT_MIN_COAT_LENGTH,
        }
    }
}
