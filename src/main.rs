use anyhow::Context;
use clap::Parser;
use std::io::Write;
use uni_explorer::config::{Command, OutputFormat};
use uni_explorer::core::{cache, export};
use uni_explorer::domain::filter::{FilterState, ViewMode, COMPARE_SLOTS};
use uni_explorer::presentation::{CompareView, ExplorerView, View, VisualizeView};
use uni_explorer::utils::error::ErrorSeverity;
use uni_explorer::utils::monitor::SystemMonitor;
use uni_explorer::utils::{logger, validation::Validate};
use uni_explorer::{AppConfig, CliConfig, Dataset, ExplorerError, LocalStorage, QueryEngine};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入設定檔 (可選)，再套用命令列覆蓋
    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("failed to load config file '{}'", path))?,
        None => AppConfig::default(),
    };
    cli.apply_overrides(&mut config);

    if cli.log_json {
        logger::init_json_logger(cli.verbose, config.log_level());
    } else {
        logger::init_cli_logger(cli.verbose, config.log_level());
    }

    tracing::info!("Starting uni-explorer");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let monitor = SystemMonitor::new(cli.monitor || config.monitoring_enabled());
    if monitor.is_enabled() {
        tracing::info!("🔍 System monitoring enabled");
    }

    if let Err(e) = run(&cli, &config, &monitor) {
        tracing::error!(
            "❌ uni-explorer failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

fn run(cli: &CliConfig, config: &AppConfig, monitor: &SystemMonitor) -> uni_explorer::Result<()> {
    if let Command::Compare { names, .. } = &cli.command {
        let max_compare = config.view.max_compare.min(COMPARE_SLOTS);
        if names.len() > max_compare {
            return Err(ExplorerError::ValidationError {
                message: format!(
                    "at most {} universities can be compared, got {}",
                    max_compare,
                    names.len()
                ),
            });
        }
    }

    let data_storage = LocalStorage::new(config.data.base_path.clone());
    let dataset = cache::get_or_load(|| Dataset::load(&data_storage, config))?;
    monitor.log_phase("load");

    let engine = QueryEngine::new(dataset).with_frequency_limit(config.view.frequency_limit);
    let countries = engine.countries();
    let default_country = countries.first().map(String::as_str);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Command::Explore {
            filters,
            export: write_export,
            format,
            ..
        } => {
            let state = filters.to_filter_state(default_country, ViewMode::Explorer);
            let view = ExplorerView::build(&engine, &state, config.view.top_n);
            monitor.log_phase("query");
            render(&view, *format, &mut out)?;
            if *write_export {
                let storage = LocalStorage::new(config.export.output_path.clone());
                let path = export::export_to_storage(&storage, &config.export.filename, &view.universities)?;
                writeln!(out, "📁 Exported to: {}", path)?;
            }
        }
        Command::Compare { names, format } => {
            let mut state = FilterState::default();
            state.reset(default_country);
            state.view = ViewMode::Compare;
            for (slot, name) in names.iter().enumerate() {
                state.set_comparison(slot, Some(name.clone()));
            }
            let selected = state.selected_comparisons();
            let view = CompareView::build(&engine, selected.as_slice());
            monitor.log_phase("query");
            render(&view, *format, &mut out)?;
        }
        Command::Visualize { filters, format } => {
            let state = filters.to_filter_state(default_country, ViewMode::Visualize);
            let view = VisualizeView::build(&engine, &state);
            monitor.log_phase("query");
            render(&view, *format, &mut out)?;
        }
        Command::Countries => {
            for country in &countries {
                writeln!(out, "{}", country)?;
            }
        }
        Command::States { country } => {
            for state in engine.state_options(country) {
                writeln!(out, "{}", state)?;
            }
        }
        Command::Names => {
            for name in engine.comparable_names() {
                writeln!(out, "{}", name)?;
            }
        }
        Command::Export { filters, .. } => {
            let state = filters.to_filter_state(default_country, ViewMode::Explorer);
            let universities = engine.filter_state(&state);
            let storage = LocalStorage::new(config.export.output_path.clone());
            let path = export::export_to_storage(&storage, &config.export.filename, &universities)?;
            writeln!(out, "✅ Exported {} universities", universities.len())?;
            writeln!(out, "📁 Output saved to: {}", path)?;
        }
    }

    monitor.log_phase("render");
    Ok(())
}

fn render<V: View, W: Write>(view: &V, format: OutputFormat, out: &mut W) -> uni_explorer::Result<()> {
    match format {
        OutputFormat::Text => view.render_text(out)?,
        OutputFormat::Json => view.render_json(out)?,
    }
    Ok(())
}
