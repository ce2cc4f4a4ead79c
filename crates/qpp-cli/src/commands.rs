use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::info_span;

use qpp_convert::{BatchOptions, BatchReport, Converter, run_batch};
use qpp_encode::QppJsonEncoder;
use qpp_model::{ConversionConfig, ModelError, QrdaScope, TemplateId};
use qpp_validate::{MeasureConfigs, load_default_measure_configs};

use crate::cli::ConvertArgs;
use crate::summary::apply_table_style;

/// Build the conversion settings for `args`, rejecting unknown scopes.
pub fn conversion_config(args: &ConvertArgs) -> Result<ConversionConfig, ModelError> {
    let scope = QrdaScope::parse_filter(&args.template_scope)?;
    let mut config = ConversionConfig::default()
        .with_skip_validation(args.skip_validation)
        .with_skip_defaults(args.skip_defaults)
        .with_scope(scope);
    if let Some(dir) = &args.output_dir {
        config = config.with_output_dir(dir);
    }
    Ok(config)
}

pub fn run_convert(args: &ConvertArgs, config: &ConversionConfig) -> Result<BatchReport> {
    let span = info_span!("convert", patterns = args.patterns.len());
    let _guard = span.enter();
    let measures = load_default_measure_configs().context("load measure configurations")?;
    let converter = Converter::new(config, &measures, &QppJsonEncoder);
    let options = BatchOptions::default().with_jobs(args.jobs);
    Ok(run_batch(&args.patterns, &converter, options))
}

pub fn run_scopes() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Scope", "Templates"]);
    apply_table_style(&mut table);
    for (scope, templates) in scope_rows() {
        table.add_row(vec![scope, templates]);
    }
    println!("{table}");
    Ok(())
}

/// Scope name and the templates it admits, one row per scope.
pub fn scope_rows() -> Vec<(String, String)> {
    QrdaScope::ALL
        .into_iter()
        .map(|scope| {
            let templates = scope
                .templates()
                .into_iter()
                .map(TemplateId::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            (scope.to_string(), templates)
        })
        .collect()
}

pub fn run_measures() -> Result<()> {
    let measures = load_default_measure_configs().context("load measure configurations")?;
    let mut table = Table::new();
    table.set_header(vec!["eMeasure UUID", "eCQM", "Measure", "Title", "Populations"]);
    apply_table_style(&mut table);
    for row in measure_rows(&measures) {
        table.add_row(row);
    }
    println!("{table}");
    Ok(())
}

pub fn measure_rows(measures: &MeasureConfigs) -> Vec<Vec<String>> {
    let dash = || "-".to_string();
    measures
        .iter()
        .map(|measure| {
            vec![
                measure.e_measure_uuid.clone(),
                measure.electronic_measure_id.clone().unwrap_or_else(dash),
                measure.measure_id.clone().unwrap_or_else(dash),
                measure.title.clone().unwrap_or_else(dash),
                measure.sub_population.len().to_string(),
            ]
        })
        .collect()
}
