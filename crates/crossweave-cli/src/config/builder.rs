use super::defaults::DefaultsConfig;
use super::file::{FileConfig, FileQualityWeights};
use super::models::AppConfig;
use crate::cli::BuildArgs;
use crate::error::{CliError, Result};
use crossweave::core::quality::usual::QualityWeights;
use crossweave::engine::config as core_config;
use std::str::FromStr;

pub fn build_config(args: &BuildArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let grid_file = file_config.grid.take().unwrap_or_default();
    let rows = args.rows.or(grid_file.rows).ok_or_else(|| {
        CliError::Config(
            "Grid rows are required, either via --rows or `grid.rows` in the config file."
                .to_string(),
        )
    })?;
    let cols = args.cols.or(grid_file.cols).ok_or_else(|| {
        CliError::Config(
            "Grid columns are required, either via --cols or `grid.cols` in the config file."
                .to_string(),
        )
    })?;

    let search_file = file_config.search.take().unwrap_or_default();
    let beam_width = args
        .beam_width
        .or(search_file.beam_width)
        .unwrap_or(defaults.beam_width);
    let num_solutions = args
        .num_solutions
        .or(search_file.num_solutions)
        .unwrap_or(defaults.num_solutions);
    let parallel = args.parallel || search_file.parallel.unwrap_or(defaults.parallel);

    let quality = file_config
        .quality
        .take()
        .map(|partial| partial.apply_to(QualityWeights::default()))
        .unwrap_or_default();

    let coating_file = file_config.coating.take().unwrap_or_default();
    let dictionary_path = if args.no_coat {
        None
    } else {
        args.dictionary.clone().or(coating_file.dictionary)
    };

    let mut builder = core_config::BuildConfigBuilder::new()
        .rows(rows)
        .cols(cols)
        .beam_width(beam_width)
        .num_solutions(num_solutions)
        .parallel(parallel)
        .optimum_coat_length(
            coating_file
                .optimum_length
                .unwrap_or(defaults.optimum_coat_length),
        )
        .min_coat_length(
            coating_file
                .min_length
                .unwrap_or(defaults.min_coat_length),
        );
    if let Some(partial) = coating_file.quality {
        builder = builder.coating_quality(partial.apply_to(quality.clone()));
    }
    let core_config = builder
        .quality(quality)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        words_path: args.words.clone(),
        dictionary_path,
        output_path: args.output.clone(),
        core_config,
    })
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}

fn set_quality_value(
    weights: &mut FileQualityWeights,
    term: &str,
    key: &str,
    value: &str,
) -> Result<()> {
    match term {
        "surrounded-requires-both" => {
            weights.surrounded_requires_both = Some(parse_value(key, value, "boolean")?);
            return Ok(());
        }
        "edge-penalties" => {
            let penalties = value
                .split(',')
                .map(|v| parse_value(key, v.trim(), "float"))
                .collect::<Result<Vec<f64>>>()?;
            weights.edge_penalties = Some(penalties);
            return Ok(());
        }
        _ => {}
    }
    let slot = match term {
        "word-lengths" => &mut weights.word_lengths,
        "pending-lengths" => &mut weights.pending_lengths,
        "crossed-cells" => &mut weights.crossed_cells,
        "full-span" => &mut weights.full_span,
        "sym-span" => &mut weights.sym_span,
        "surrounded-cells" => &mut weights.surrounded_cells,
        "need-crossings" => &mut weights.need_crossings,
        "favour-centre" => &mut weights.favour_centre,
        "virgin-factor" => &mut weights.virgin_factor,
        _ => {
            return Err(CliError::Config(format!(
                "Unsupported configuration key for --set: '{}'",
                key
            )));
        }
    };
    *slot = Some(parse_value(key, value, "float")?);
    Ok(())
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };

        match key {
            "grid.rows" => {
                config.grid.get_or_insert_with(Default::default).rows =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "grid.cols" => {
                config.grid.get_or_insert_with(Default::default).cols =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "search.beam-width" => {
                config.search.get_or_insert_with(Default::default).beam_width =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "search.num-solutions" => {
                config
                    .search
                    .get_or_insert_with(Default::default)
                    .num_solutions = Some(parse_value(key, value_str, "integer")?);
            }
            "search.parallel" => {
                config.search.get_or_insert_with(Default::default).parallel =
                    Some(parse_value(key, value_str, "boolean")?);
            }
            "coating.optimum-length" => {
                config
                    .coating
                    .get_or_insert_with(Default::default)
                    .optimum_length = Some(parse_value(key, value_str, "integer")?);
            }
            "coating.min-length" => {
                config.coating.get_or_insert_with(Default::default).min_length =
                    Some(parse_value(key, value_str, "integer")?);
            }
            _ => {
                if let Some(term) = key.strip_prefix("coating.quality.") {
                    let coating = config.coating.get_or_insert_with(Default::default);
                    let weights = coating.quality.get_or_insert_with(Default::default);
                    set_quality_value(weights, term, key, value_str)?;
                } else if let Some(term) = key.strip_prefix("quality.") {
                    let weights = config.quality.get_or_insert_with(Default::default);
                    set_quality_value(weights, term, key, value_str)?;
                } else {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
    }
    Ok(config)
}
