use anyhow::{Context, Result, bail};
use clap::Parser;
use hashbench_plots::render::{OutputFormat, ProgressInfo, RenderConfig};
use hashbench_plots::{ColorMaps, FigureData, FigureOptions, FigurePanels, Plot, ReportFigure};
use hashbench_plots::{BasePlotOptions, SurfaceMode};
use hashbench_results::{
    BenchmarkReport, DEFAULT_RESULTS_FILE, LIBRARY_PREFIX, MalformedPolicy, REFERENCE_PREFIX,
    compare_by_key_size, render_table, samples_with_prefix,
};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// hashbench-report - charts for hashmap insertion benchmarks
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "hashbench-report")]
#[command(about = "Compare hashmap insertion benchmarks as surface and log-log charts", long_about = None)]
struct Cli {
    /// Google Benchmark JSON results file
    #[arg(value_name = "INPUT", default_value = DEFAULT_RESULTS_FILE)]
    input: PathBuf,

    /// Output image path
    #[arg(short, long, value_name = "OUTPUT", default_value = "benchmarks.png")]
    output: PathBuf,

    /// Image format (defaults to the output extension, then PNG)
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Figure width in pixels
    #[arg(long, default_value = "1600")]
    width: u32,

    /// Figure height in pixels
    #[arg(long, default_value = "1200")]
    height: u32,

    /// Benchmark name prefix of the map under test
    #[arg(long, default_value = LIBRARY_PREFIX)]
    library_prefix: String,

    /// Benchmark name prefix of the map it is compared to
    #[arg(long, default_value = REFERENCE_PREFIX)]
    reference_prefix: String,

    /// Legend label of the map under test
    #[arg(long, default_value = "hashmap_t")]
    library_label: String,

    /// Legend label of the map it is compared to
    #[arg(long, default_value = "std::unordered_map")]
    reference_label: String,

    /// Value size (bytes) held fixed by the surfaces and the line panels
    #[arg(long, default_value = "256")]
    value_size: u64,

    /// Insertion counts of the two log-log panels (comma-separated, e.g. "1,256")
    #[arg(long, value_delimiter = ',', default_values_t = [1u64, 256])]
    insertions: Vec<u64>,

    /// Selection shown by the two surface panels
    #[arg(long, value_enum, default_value = "insertions")]
    surface_mode: SurfaceModeArg,

    /// Insertion count held fixed by the surfaces in value-size mode
    #[arg(long, default_value = "16")]
    surface_insertions: u64,

    /// Surface color map (viridis, plasma, inferno, magma, turbo, cividis)
    #[arg(long, default_value = "viridis")]
    colormap: ColorMaps,

    /// Skip benchmarks whose names don't parse instead of failing
    #[arg(long)]
    skip_malformed: bool,

    /// Print a speedup table per key size for each line panel
    #[arg(long)]
    summary: bool,

    /// Export the plotted series as JSON
    #[arg(long, value_name = "JSON_PATH")]
    export_json: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum FormatArg {
    Png,
    #[value(alias = "jpg")]
    Jpeg,
    Svg,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Png => OutputFormat::Png,
            FormatArg::Jpeg => OutputFormat::Jpeg,
            FormatArg::Svg => OutputFormat::Svg,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum SurfaceModeArg {
    /// Key size x insertions at the fixed value size
    Insertions,
    /// Key size x value size at the fixed surface insertion count
    ValueSize,
}

impl From<SurfaceModeArg> for SurfaceMode {
    fn from(mode: SurfaceModeArg) -> Self {
        match mode {
            SurfaceModeArg::Insertions => SurfaceMode::Insertions,
            SurfaceModeArg::ValueSize => SurfaceMode::ValueSize,
        }
    }
}

/// Everything a run needs, resolved from the command line
#[derive(Debug)]
struct ReportConfig {
    input: PathBuf,
    output: PathBuf,
    format: OutputFormat,
    library_prefix: String,
    reference_prefix: String,
    malformed: MalformedPolicy,
    figure: FigureOptions,
    summary: bool,
    export_json: Option<PathBuf>,
}

impl TryFrom<Cli> for ReportConfig {
    type Error = anyhow::Error;

    fn try_from(cli: Cli) -> Result<Self> {
        let [low_insertions, high_insertions] = cli.insertions[..] else {
            bail!(
                "--insertions takes exactly two counts, got {}",
                cli.insertions.len()
            );
        };

        let extension_format = OutputFormat::from_path(&cli.output);
        let format = match (cli.format.map(OutputFormat::from), extension_format) {
            (Some(explicit), Some(guessed)) if explicit != guessed => {
                warn!(
                    "Writing {} to {} despite its .{} extension",
                    explicit,
                    cli.output.display(),
                    guessed.extension()
                );
                explicit
            }
            (Some(explicit), _) => explicit,
            (None, guessed) => guessed.unwrap_or_default(),
        };

        let base = BasePlotOptions::new()
            .width(cli.width)
            .height(cli.height)
            .build()?;
        let figure = FigureOptions::new()
            .base(base)
            .library_label(cli.library_label)
            .reference_label(cli.reference_label)
            .value_size(cli.value_size)
            .low_insertions(low_insertions)
            .high_insertions(high_insertions)
            .surface_mode(SurfaceMode::from(cli.surface_mode))
            .surface_insertions(cli.surface_insertions)
            .colormap(cli.colormap)
            .build()?;

        Ok(Self {
            input: cli.input,
            output: cli.output,
            format,
            library_prefix: cli.library_prefix,
            reference_prefix: cli.reference_prefix,
            malformed: if cli.skip_malformed {
                MalformedPolicy::Skip
            } else {
                MalformedPolicy::Fail
            },
            figure,
            summary: cli.summary,
            export_json: cli.export_json,
        })
    }
}

/// Load both maps' samples, plus the time unit when both agree on one
fn load_figure_data(config: &ReportConfig) -> Result<(FigureData, Option<String>)> {
    let report = BenchmarkReport::open(&config.input)
        .with_context(|| format!("Failed to load {}", config.input.display()))?;

    let library = samples_with_prefix(&report, &config.library_prefix, config.malformed)
        .with_context(|| format!("Failed to read {} benchmarks", config.library_prefix))?;
    let reference = samples_with_prefix(&report, &config.reference_prefix, config.malformed)
        .with_context(|| format!("Failed to read {} benchmarks", config.reference_prefix))?;
    info!(
        "Loaded {} library and {} reference samples",
        library.len(),
        reference.len()
    );

    let time_unit = match (
        report.time_unit(&config.library_prefix),
        report.time_unit(&config.reference_prefix),
    ) {
        (Some(a), Some(b)) if a == b => Some(a.to_string()),
        (Some(a), Some(b)) => {
            warn!("Maps were timed in different units ({a} vs {b}); leaving axes unitless");
            None
        }
        _ => None,
    };

    Ok((FigureData { library, reference }, time_unit))
}

fn print_summary(data: &FigureData, figure: &FigureOptions) -> Result<()> {
    let unit = figure.time_unit.as_deref().unwrap_or("time");
    for insertions in [figure.low_insertions, figure.high_insertions] {
        let rows =
            compare_by_key_size(&data.library, &data.reference, figure.value_size, insertions)
                .context("Failed to build comparison summary")?;
        println!(
            "\n📊 Value size {}, {} insertions:",
            figure.value_size, insertions
        );
        print!(
            "{}",
            render_table(&rows, &figure.library_label, &figure.reference_label, unit)
        );
    }
    println!();
    Ok(())
}

/// Write every plotted series as pretty JSON
fn export_series(path: &Path, config: &ReportConfig, panels: &FigurePanels) -> Result<()> {
    let export = serde_json::json!({
        "input": config.input.display().to_string(),
        "value_size": config.figure.value_size,
        "time_unit": config.figure.time_unit,
        "surfaces": panels.surfaces.iter().map(|panel| serde_json::json!({
            "title": panel.title,
            "x_label": panel.x_label,
            "y_label": panel.y_label,
            "z_label": panel.z_label,
            "scale": "log10",
            "x": panel.series.x.to_vec(),
            "y": panel.series.y.to_vec(),
            "z": panel.series.z.to_vec(),
        })).collect::<Vec<_>>(),
        "lines": panels.lines.iter().map(|panel| serde_json::json!({
            "title": panel.title,
            "insertions": panel.insertions,
            "x_label": panel.x_label,
            "y_label": panel.y_label,
            "series": panel.series.iter().map(|named| serde_json::json!({
                "label": named.label,
                "x": named.series.x.to_vec(),
                "y": named.series.y.to_vec(),
            })).collect::<Vec<_>>(),
        })).collect::<Vec<_>>(),
    });

    let json = serde_json::to_string_pretty(&export)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write series export {}", path.display()))?;
    Ok(())
}

fn run(mut config: ReportConfig) -> Result<()> {
    let start_time = Instant::now();

    let (data, time_unit) = load_figure_data(&config)?;
    config.figure.time_unit = time_unit;

    if config.summary {
        print_summary(&data, &config.figure)?;
    }

    let panels = FigurePanels::build(&data, &config.figure).context("Failed to select plot data")?;

    if let Some(ref path) = config.export_json {
        export_series(path, &config, &panels)?;
        println!("💾 Exported series to {}", path.display());
    }

    let mut render_config = RenderConfig::with_progress(Box::new(
        |info: ProgressInfo| -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            debug!(
                "Panel {}/{} done: {} ({:.0}%)",
                info.completed,
                info.total,
                info.panel,
                info.percent()
            );
            Ok(())
        },
    ));
    let bytes = ReportFigure
        .render(&panels, &config.figure, config.format, &mut render_config)
        .context("Failed to render figure")?;

    if let Some(parent) = config.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(&config.output, &bytes)
        .with_context(|| format!("Failed to write {}", config.output.display()))?;

    println!(
        "✅ Wrote {} ({}x{} {}, {} bytes) in {:.2}s",
        config.output.display(),
        config.figure.base.width,
        config.figure.base.height,
        config.format,
        bytes.len(),
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing subscriber with environment filter
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = ReportConfig::try_from(args)?;
    debug!("{:?}", config);
    run(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("hashbench-report").chain(args.iter().copied()))
            .unwrap()
    }

    fn config(args: &[&str]) -> ReportConfig {
        ReportConfig::try_from(parse(args)).unwrap()
    }

    const FIXTURE: &str = r#"{
        "context": {"host_name": "bench-box", "num_cpus": 8},
        "benchmarks": [
            {"name": "BM_HashmapInsert<char[1<<2], char[1<<8]>/1", "cpu_time": "10.0", "time_unit": "ns"},
            {"name": "BM_HashmapInsert<char[1<<4], char[1<<8]>/1", "cpu_time": 20.0, "time_unit": "ns"},
            {"name": "BM_StdUnorderedMap<char[1<<2], char[1<<8]>/1", "cpu_time": "30.0", "time_unit": "ns"},
            {"name": "BM_StdUnorderedMap<char[1<<4], char[1<<8]>/1", "cpu_time": 40.0, "time_unit": "ns"}
        ]
    }"#;

    #[test]
    fn test_defaults() {
        let config = config(&[]);
        assert_eq!(config.input, PathBuf::from(DEFAULT_RESULTS_FILE));
        assert_eq!(config.output, PathBuf::from("benchmarks.png"));
        assert_eq!(config.format, OutputFormat::Png);
        assert_eq!(config.library_prefix, LIBRARY_PREFIX);
        assert_eq!(config.reference_prefix, REFERENCE_PREFIX);
        assert_eq!(config.malformed, MalformedPolicy::Fail);
        assert_eq!(config.figure.value_size, 256);
        assert_eq!(config.figure.low_insertions, 1);
        assert_eq!(config.figure.high_insertions, 256);
        assert_eq!(config.figure.surface_mode, SurfaceMode::Insertions);
        assert_eq!(config.figure.colormap, ColorMaps::Viridis);
        assert_eq!(config.figure.base.width, 1600);
        assert!(!config.summary);
        assert!(config.export_json.is_none());
    }

    #[test]
    fn test_flags_map_onto_options() {
        let config = config(&[
            "results.json",
            "--insertions",
            "4,1024",
            "--surface-mode",
            "value-size",
            "--colormap",
            "Plasma",
            "--library-label",
            "flat_map",
            "--width",
            "800",
            "--skip-malformed",
            "--summary",
        ]);
        assert_eq!(config.input, PathBuf::from("results.json"));
        assert_eq!(config.figure.low_insertions, 4);
        assert_eq!(config.figure.high_insertions, 1024);
        assert_eq!(config.figure.surface_mode, SurfaceMode::ValueSize);
        assert_eq!(config.figure.colormap, ColorMaps::Plasma);
        assert_eq!(config.figure.library_label, "flat_map");
        assert_eq!(config.figure.base.width, 800);
        assert_eq!(config.malformed, MalformedPolicy::Skip);
        assert!(config.summary);
    }

    #[test]
    fn test_format_resolution() {
        assert_eq!(config(&["-o", "out.svg"]).format, OutputFormat::Svg);
        assert_eq!(config(&["-o", "out.JPG"]).format, OutputFormat::Jpeg);
        assert_eq!(config(&["-o", "out"]).format, OutputFormat::Png);
        assert_eq!(config(&["-o", "out", "--format", "jpg"]).format, OutputFormat::Jpeg);
        // An explicit format wins over the extension
        assert_eq!(config(&["-o", "out.png", "--format", "svg"]).format, OutputFormat::Svg);
    }

    #[test]
    fn test_insertions_need_two_counts() {
        assert!(ReportConfig::try_from(parse(&["--insertions", "1"])).is_err());
        assert!(ReportConfig::try_from(parse(&["--insertions", "1,2,3"])).is_err());
    }

    #[test]
    fn test_rejects_unknown_values() {
        let bin = "hashbench-report";
        assert!(Cli::try_parse_from([bin, "--colormap", "jet"]).is_err());
        assert!(Cli::try_parse_from([bin, "--format", "gif"]).is_err());
        assert!(Cli::try_parse_from([bin, "--surface-mode", "keys"]).is_err());
        assert!(Cli::try_parse_from([bin, "--value-size", "-4"]).is_err());
    }

    #[test]
    fn test_load_figure_data_from_fixture() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FIXTURE.as_bytes()).unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let config = config(&[&path]);
        let (data, time_unit) = load_figure_data(&config).unwrap();
        assert_eq!(data.library.len(), 2);
        assert_eq!(data.reference.len(), 2);
        assert_eq!(data.reference[1].time, 40.0);
        assert_eq!(time_unit.as_deref(), Some("ns"));
    }

    #[test]
    fn test_missing_input_names_the_file() {
        let config = config(&["does/not/exist.json"]);
        let err = load_figure_data(&config).unwrap_err();
        assert!(format!("{err:#}").contains("does/not/exist.json"), "{err:#}");
    }

    #[test]
    fn test_unknown_prefix_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FIXTURE.as_bytes()).unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let config = config(&[&path, "--reference-prefix", "BM_AbseilFlatMap"]);
        let err = load_figure_data(&config).unwrap_err();
        assert!(format!("{err:#}").contains("BM_AbseilFlatMap"), "{err:#}");
    }

    #[test]
    fn test_export_series_writes_plain_arrays() {
        let samples = |scale: f64| {
            let mut samples = Vec::new();
            for key_size in [4u64, 16] {
                for insertions in [1u64, 256] {
                    samples.push(hashbench_results::Sample {
                        key_size,
                        value_size: 256,
                        insertions,
                        time: scale * (key_size * insertions) as f64,
                    });
                }
            }
            samples
        };
        let data = FigureData {
            library: samples(1.0),
            reference: samples(3.0),
        };
        let config = config(&[]);
        let panels = FigurePanels::build(&data, &config.figure).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.json");
        export_series(&path, &config, &panels).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["surfaces"][0]["title"], "hashmap_t");
        assert_eq!(json["surfaces"][0]["x"].as_array().unwrap().len(), 4);
        assert_eq!(json["lines"][1]["insertions"], 256);
        assert_eq!(json["lines"][1]["series"][1]["y"][1], 12288.0);
    }
}
