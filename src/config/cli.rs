use crate::config::toml_config::AppConfig;
use crate::domain::filter::{FilterState, StateFilter, ViewMode, COMPARE_SLOTS};
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Clone, Parser)]
#[command(name = "uni-explorer")]
#[command(about = "Browse and compare universities with their global rankings")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Directory the data files are resolved against
    #[arg(long, global = true)]
    pub base_path: Option<String>,

    /// University directory CSV
    #[arg(long, global = true)]
    pub universities: Option<String>,

    /// Rankings CSV
    #[arg(long, global = true)]
    pub rankings: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log process memory and timing per phase")]
    pub monitor: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List universities for a country, with the top-ranked ones first
    Explore {
        #[command(flatten)]
        filters: FilterArgs,

        /// How many ranked universities to show
        #[arg(long)]
        top: Option<usize>,

        /// Also write the filtered list to CSV
        #[arg(long)]
        export: bool,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Compare ranked universities side by side
    Compare {
        /// Up to three university names
        #[arg(value_name = "NAME", required = true, num_args = 1..=COMPARE_SLOTS)]
        names: Vec<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Country and domain statistics
    Visualize {
        #[command(flatten)]
        filters: FilterArgs,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// List the available countries
    Countries,
    /// List the state/province options for a country
    States {
        #[arg(long)]
        country: String,
    },
    /// List the names that can be compared
    Names,
    /// Write the filtered universities to CSV
    Export {
        #[command(flatten)]
        filters: FilterArgs,

        /// Output directory (overrides the config file)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Country to show; defaults to the first country alphabetically
    #[arg(long)]
    pub country: Option<String>,

    /// State/province, or "All"
    #[arg(long, default_value = "All")]
    pub state: String,

    /// Case-insensitive name search
    #[arg(long)]
    pub search: Option<String>,
}

impl FilterArgs {
    pub fn to_filter_state(&self, default_country: Option<&str>, view: ViewMode) -> FilterState {
        let mut state = FilterState::default();
        state.reset(self.country.as_deref().or(default_country));
        state.state = StateFilter::parse(&self.state);
        state.search = self.search.clone().filter(|q| !q.is_empty());
        state.view = view;
        state
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl CliConfig {
    /// 命令列參數覆蓋設定檔的值
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(base_path) = &self.base_path {
            config.data.base_path = base_path.clone();
        }
        if let Some(universities) = &self.universities {
            config.data.universities_path = universities.clone();
        }
        if let Some(rankings) = &self.rankings {
            config.data.rankings_path = rankings.clone();
        }
        if let Command::Export {
            output: Some(output),
            ..
        } = &self.command
        {
            config.export.output_path = output.clone();
        }
        if let Command::Explore { top: Some(top), .. } = &self.command {
            config.view.top_n = *top;
        }
    }
}
