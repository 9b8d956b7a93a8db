use clap::{Parser, Subcommand};
use concentra::{
    load_settings, DirectorySink, DocumentExporter, ExportConfig, ExportError,
    FilesystemMediaSource, LayoutModel, Module, PricingConfig, ProjectMetadata,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "concentra", version, about = "Exports quotation concentrates as PDF")]
struct Cli {
    /// JSON export configuration.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Renders the concentrate PDF.
    Export {
        /// JSON array of modules.
        #[arg(long)]
        modules: PathBuf,
        /// Persisted layout settings. Defaults apply when omitted.
        #[arg(long)]
        settings: Option<PathBuf>,
        #[arg(long)]
        project: String,
        #[arg(long, default_value = "")]
        client: String,
        /// Defaults to today.
        #[arg(long)]
        date: Option<String>,
        /// Logo path relative to the media directory.
        #[arg(long)]
        logo: Option<String>,
        #[arg(long, default_value_t = 1.0)]
        fx: f64,
        #[arg(long, default_value_t = 0.0)]
        tax: f64,
        #[arg(long, default_value = ".")]
        media_dir: PathBuf,
        #[arg(long, default_value = ".")]
        out: PathBuf,
        /// Money preset: en-US, es-MX or es-ES.
        #[arg(long)]
        locale: Option<String>,
    },
    /// Prints grand totals without rendering.
    Totals {
        #[arg(long)]
        modules: PathBuf,
        #[arg(long, default_value_t = 1.0)]
        fx: f64,
        #[arg(long, default_value_t = 0.0)]
        tax: f64,
        #[arg(long)]
        json: bool,
    },
}

fn read_modules(path: &Path) -> Result<Vec<Module>, ExportError> {
    log::info!("Loading modules from {}", path.display());
    let source = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&source)?)
}

fn read_layout(path: Option<&Path>) -> Result<LayoutModel, ExportError> {
    match path {
        Some(path) => {
            let source = fs::read_to_string(path)?;
            Ok(load_settings(&serde_json::from_str(&source)?))
        }
        None => Ok(LayoutModel::default()),
    }
}

#[tokio::main]
async fn main() -> Result<(), ExportError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => ExportConfig::from_file(path)?,
        None => ExportConfig::default(),
    };

    match cli.command {
        Command::Export {
            modules,
            settings,
            project,
            client,
            date,
            logo,
            fx,
            tax,
            media_dir,
            out,
            locale,
        } => {
            if let Some(locale) = locale {
                config = config.with_locale(&locale)?;
            }
            let modules = read_modules(&modules)?;
            let layout = read_layout(settings.as_deref())?;
            let metadata = ProjectMetadata {
                project_name: project,
                client_name: client,
                date: date.unwrap_or_else(|| chrono::Local::now().format("%d/%m/%Y").to_string()),
                logo: logo.map(Into::into),
            };

            let exporter = DocumentExporter::builder()
                .with_media_source(FilesystemMediaSource::new(media_dir))
                .with_config(config)
                .with_pricing(PricingConfig { fx_rate: fx, tax_pct: tax })
                .build();
            let sink = DirectorySink::new(&out);
            let document = exporter
                .export_to_sink(&modules, &layout, &metadata, &sink)
                .await?;

            println!(
                "Wrote {} ({} pages)",
                sink.path_for(&document.filename).display(),
                document.pages
            );
            for diagnostic in &document.diagnostics {
                println!("  note: {diagnostic}");
            }
        }
        Command::Totals {
            modules,
            fx,
            tax,
            json,
        } => {
            let modules = read_modules(&modules)?;
            let totals = concentra::compute_grand(&modules, fx, tax)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&totals)?);
            } else {
                println!("Sell USD:           {:.2}", totals.sell_usd);
                println!("Cost USD:           {:.2}", totals.cost_usd);
                println!("Sell local ex tax:  {:.2}", totals.sell_local_ex_tax);
                println!("Tax:                {:.2}", totals.sell_local_tax);
                println!("Sell local inc tax: {:.2}", totals.sell_local_inc_tax);
                println!("Margin:             {:.2}%", totals.margin_pct());
            }
        }
    }
    Ok(())
}
