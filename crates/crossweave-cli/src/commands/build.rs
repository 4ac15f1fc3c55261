use crate::cli::BuildArgs;
use crate::config::builder::build_config;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use crossweave::{
    core::index::dictionary::DictionaryIndex,
    core::io::{grid, word_list},
    engine::progress::ProgressReporter,
    workflows::{self, build::Solution},
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub fn run(args: BuildArgs) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let app_config = build_config(&args)?;
    let config = &app_config.core_config;

    info!("Loading puzzle words from {:?}", &app_config.words_path);
    let words = load_word_list(&app_config.words_path)?;

    let dictionary = match &app_config.dictionary_path {
        Some(path) => {
            info!("Loading coating dictionary from {:?}", path);
            let dictionary = DictionaryIndex::new(load_word_list(path)?);
            info!(words = dictionary.len(), "Coating dictionary indexed.");
            Some(dictionary)
        }
        None => None,
    };

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Building {}x{} grid for {} word(s)...",
        config.rows,
        config.cols,
        words.len()
    );
    info!("Invoking the core build workflow...");

    let result = workflows::build::run(&words, dictionary.as_ref(), config, &reporter)?;

    info!(
        "Workflow finished, received {} solution(s).",
        result.solutions.len()
    );

    if result.solutions.is_empty() {
        warn!("Workflow completed but found no grids.");
        println!("Warning: Crossweave finished but found no grids.");
        return Ok(());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (i, solution) in result.solutions.iter().enumerate() {
        writeln!(out, "\nSolution {} (quality: {:.4})", i + 1, solution.quality)?;
        grid::write_to(&solution.board, &mut out)?;
    }

    if let Some(output) = &app_config.output_path {
        for (i, solution) in result.solutions.iter().enumerate() {
            let output_path = generate_output_path(output, i + 1, result.solutions.len());
            write_solution(solution, &output_path)?;
            info!(
                "Wrote solution {} (quality: {:.4}) to {:?}",
                i + 1,
                solution.quality,
                &output_path
            );
            println!(
                "✓ Solution {} written to: {}",
                i + 1,
                output_path.display()
            );
        }
    }

    Ok(())
}

fn load_word_list(path: &Path) -> Result<Vec<String>> {
    word_list::read_from_path(path).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

fn write_solution(solution: &Solution, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writeln!(writer, "# quality: {:.4}", solution.quality)?;
    grid::write_to(&solution.board, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Numbers output files when more than one solution is written.
///
/// `grid.txt` becomes `grid-1.txt`, `grid-2.txt`, ...; a single solution keeps
/// the path as given.
fn generate_output_path(base: &Path, index: usize, total: usize) -> PathBuf {
    if total <= 1 {
        return base.to_path_buf();
    }
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "grid".to_string());
    let file_name = match base.extension() {
        Some(ext) => format!("{}-{}.{}", stem, index, ext.to_string_lossy()),
        None => format!("{}-{}", stem, index),
    };
    base.with_file_name(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn args_for(words: PathBuf) -> BuildArgs {
        BuildArgs {
            words,
            config: None,
            output: None,
            rows: Some(5),
            cols: Some(5),
            num_solutions: Some(2),
            beam_width: Some(8),
            parallel: false,
            dictionary: None,
            no_coat: false,
            set_values: vec![],
        }
    }

    #[test]
    fn single_solution_keeps_the_output_path() {
        let path = PathBuf::from("out/grid.txt");
        assert_eq!(generate_output_path(&path, 1, 1), path);
    }

    #[test]
    fn several_solutions_are_numbered() {
        let path = PathBuf::from("out/grid.txt");
        assert_eq!(
            generate_output_path(&path, 2, 3),
            PathBuf::from("out/grid-2.txt")
        );
        assert_eq!(
            generate_output_path(Path::new("grid"), 1, 2),
            PathBuf::from("grid-1")
        );
    }

    #[test]
    fn build_writes_the_best_grid_to_the_output_file() {
        let dir = tempdir().unwrap();
        let words = dir.path().join("words.txt");
        fs::write(&words, "# animals\ncat\ndog\ncard\ngoat\n").unwrap();

        let mut args = args_for(words);
        args.num_solutions = Some(1);
        args.output = Some(dir.path().join("grid.txt"));
        run(args).unwrap();

        let first = fs::read_to_string(dir.path().join("grid.txt")).unwrap();
        assert!(first.starts_with("# quality: "));
        for word in ["CAT", "DOG", "CARD", "GOAT"] {
            assert!(first.contains(word));
        }
    }

    #[test]
    fn missing_word_list_is_a_parsing_error() {
        let dir = tempdir().unwrap();
        let args = args_for(dir.path().join("absent.txt"));
        assert!(matches!(run(args), Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn oversized_word_surfaces_the_core_error() {
        let dir = tempdir().unwrap();
        let words = dir.path().join("words.txt");
        fs::write(&words, "cat\nelephant\n").unwrap();
        assert!(matches!(run(args_for(words)), Err(CliError::Core(_))));
    }
}
