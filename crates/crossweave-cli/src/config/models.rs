use crossweave::engine::config as core_config;
use std::path::PathBuf;

pub struct AppConfig {
    pub words_path: PathBuf,
    /// `None` when coating is disabled or no dictionary is configured.
    pub dictionary_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub core_config: core_config::BuildConfig,
}
