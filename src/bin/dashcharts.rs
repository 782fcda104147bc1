use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use dashboard_charts::chart::{ChartType, OptionsCustomization, ValueFormats};
use dashboard_charts::format::ValueFormat;
use dashboard_charts::models::{Dataset, SummaryType};
use dashboard_charts::table::{SortOrder, TableOptions};
use dashboard_charts::view::{ChartProps, ScorecardProps, StackMode, render_chart, render_scorecard, render_table};
use dashboard_charts::ChartConfig;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "dashcharts",
    version,
    about = "Shape dashboard datasets into chart, table, and scorecard view models"
)]
struct Cli {
    /// JSON file with style overrides (fonts, paddings, palettes, locale).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Locale for number formatting (en, de, fr, ...); overrides the config file.
    #[arg(long, global = true)]
    locale: Option<String>,
    /// Pretty-print the JSON output.
    #[arg(long, global = true, default_value_t = false)]
    pretty: bool,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the normalized dataset and render options of a chart.
    Chart(ChartArgs),
    /// Build a formatted table with an optional summary row.
    Table(TableArgs),
    /// Reduce one column to a single formatted figure.
    Scorecard(ScorecardArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Number,
    Percent,
    Euro,
}

impl From<FormatArg> for ValueFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Number => ValueFormat::Number,
            FormatArg::Percent => ValueFormat::Percent,
            FormatArg::Euro => ValueFormat::Euro,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum SummaryArg {
    Sum,
    Average,
    None,
}

impl SummaryArg {
    fn summary_type(self) -> Option<SummaryType> {
        match self {
            SummaryArg::Sum => Some(SummaryType::Sum),
            SummaryArg::Average => Some(SummaryType::Average),
            SummaryArg::None => None,
        }
    }
}

#[derive(Args, Debug)]
struct ChartArgs {
    /// Dataset file: a JSON array of rows, `null`, or an upstream error payload.
    #[arg(short, long)]
    data: PathBuf,
    /// Chart type: line, bar, area, pie, doughnut, scatter, bubble, combined.
    #[arg(short = 't', long = "type")]
    chart_type: ChartType,
    /// Value columns separated by comma or semicolon (bar columns for combined charts).
    #[arg(short, long)]
    keys: String,
    /// Line columns of a combined chart.
    #[arg(long)]
    line_keys: Option<String>,
    /// Show bar/area values as shares of each category's total.
    #[arg(long, default_value_t = false)]
    percentage: bool,
    /// JSON file with display options (showLegend, halfPieChart, xAxisTitle, stack, ...).
    #[arg(long)]
    options: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = FormatArg::Number)]
    x_format: FormatArg,
    #[arg(long, value_enum, default_value_t = FormatArg::Number)]
    y_format: FormatArg,
    /// Right axis format of a combined chart.
    #[arg(long, value_enum, default_value_t = FormatArg::Number)]
    y_right_format: FormatArg,
    /// Bubble radius format.
    #[arg(long, value_enum, default_value_t = FormatArg::Number)]
    r_format: FormatArg,
}

#[derive(Args, Debug)]
struct TableArgs {
    #[arg(short, long)]
    data: PathBuf,
    /// Columns to keep besides the first one (all if omitted).
    #[arg(short, long)]
    keys: Option<String>,
    #[arg(long, value_enum, default_value_t = SummaryArg::Sum)]
    summary: SummaryArg,
    #[arg(long, value_enum, default_value_t = FormatArg::Number)]
    format: FormatArg,
    /// Column to sort by.
    #[arg(long)]
    sort_key: Option<String>,
    /// Header toggle state used with --sort-key.
    #[arg(long, default_value_t = false)]
    ascending: bool,
}

#[derive(Args, Debug)]
struct ScorecardArgs {
    #[arg(short, long)]
    data: PathBuf,
    /// Column to summarize.
    #[arg(short, long)]
    key: String,
    #[arg(long, value_enum, default_value_t = SummaryArg::Sum)]
    summary: SummaryArg,
    #[arg(long, value_enum, default_value_t = FormatArg::Number)]
    format: FormatArg,
}

fn parse_list(s: &str) -> Vec<String> {
    s.split([',', ';'])
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

fn load_dataset(path: &Path) -> Result<Dataset> {
    let text = fs::read_to_string(path).with_context(|| format!("read dataset {}", path.display()))?;
    let dataset = Dataset::from_json_str(&text).with_context(|| format!("parse dataset {}", path.display()))?;
    Ok(dataset)
}

fn load_options(path: Option<&Path>) -> Result<OptionsCustomization> {
    let Some(path) = path else {
        return Ok(OptionsCustomization::default());
    };
    let text = fs::read_to_string(path).with_context(|| format!("read options {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse options {}", path.display()))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match cli.config.as_deref() {
        Some(path) => ChartConfig::from_json_file(path)?,
        None => ChartConfig::default(),
    };
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }

    match cli.cmd {
        Command::Chart(args) => cmd_chart(args, &config, cli.pretty),
        Command::Table(args) => cmd_table(args, &config, cli.pretty),
        Command::Scorecard(args) => cmd_scorecard(args, &config, cli.pretty),
    }
}

fn cmd_chart(args: ChartArgs, config: &ChartConfig, pretty: bool) -> Result<()> {
    let dataset = load_dataset(&args.data)?;
    let props = ChartProps {
        chart_type: args.chart_type,
        keys: parse_list(&args.keys),
        line_keys: args.line_keys.as_deref().map(parse_list),
        options: load_options(args.options.as_deref())?,
        stack_mode: if args.percentage {
            StackMode::Percentage100
        } else {
            StackMode::Normal
        },
        formats: ValueFormats {
            x: args.x_format.into(),
            y: args.y_format.into(),
            y_right: args.y_right_format.into(),
            r: args.r_format.into(),
        },
    };
    let view = render_chart(&dataset, &props, config)
        .with_context(|| format!("build {} chart", props.chart_type))?;
    print_json(&view, pretty)
}

fn cmd_table(args: TableArgs, config: &ChartConfig, pretty: bool) -> Result<()> {
    let dataset = load_dataset(&args.data)?;
    let options = TableOptions {
        allowed_keys: args.keys.as_deref().map(parse_list),
        summary_row: args.summary.summary_type(),
        value_format: args.format.into(),
        sort: args.sort_key.map(|key| SortOrder {
            key,
            ascending: args.ascending,
        }),
    };
    let view = render_table(&dataset, &options, config).context("build table")?;
    print_json(&view, pretty)
}

fn cmd_scorecard(args: ScorecardArgs, config: &ChartConfig, pretty: bool) -> Result<()> {
    let dataset = load_dataset(&args.data)?;
    let summary_type = args
        .summary
        .summary_type()
        .ok_or_else(|| anyhow::anyhow!("a scorecard needs --summary sum or average"))?;
    let props = ScorecardProps {
        summary_key: args.key,
        summary_type,
        value_format: args.format.into(),
    };
    let view = render_scorecard(&dataset, &props, config).context("build scorecard")?;
    print_json(&view, pretty)
}
