use clap::{Parser, Subcommand};
use i18n_data::config::{self, SiteConfig};
use i18n_data::content::Content;
use i18n_data::{data, output, resolve};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "i18n-data")]
#[command(about = "Resolve localized fields and id references in site data")]
#[command(long_about = "\
Resolve localized fields and id references in site data

Every .json and .toml file in the data directory is loaded into one tree,
keyed by file name. Two key conventions are then resolved per language:

  title_localized: { en: \"Hello\", fr: \"Bonjour\" }  →  title: \"Bonjour\"
  author_id: 2                                     →  author: { id: 2, ... }

References look in the root collection named after the relation plus \"s\"
(author_id → authors). Missing locales and dangling ids become null.

Site structure:

  site/
  ├── config.toml          # languages, default_lang, suffixes, plurals
  └── _data/
      ├── authors.json     # → authors
      ├── site.toml        # → site
      └── blog/
          └── series.json  # → blog.series

Run 'i18n-data gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Site root containing config.toml and the data directory
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    /// Output directory for resolved views
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve one language and print the view as JSON
    Resolve {
        /// Language to resolve (defaults to default_lang)
        #[arg(long)]
        lang: Option<String>,
    },
    /// Resolve every configured language and write <output>/<lang>/data.json
    Build,
    /// Load and resolve every language without writing, reporting misses
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Resolve { lang } => {
            let (config, tree) = load_site(&cli.source)?;
            let lang = lang.unwrap_or_else(|| config.default_lang.clone());
            let locales = config.locales_for(&lang)?;
            let resolution = resolve::resolve(&tree, &locales, &config.resolve_options());
            println!("{}", serde_json::to_string_pretty(&resolution.content)?);
        }
        Command::Build => {
            let (config, tree) = load_site(&cli.source)?;
            output::print_data_output(&tree, &config.data_path(&cli.source));

            println!("==> Resolving {} languages", config.languages.len());
            init_thread_pool(&config.processing);
            let views = resolve::resolve_languages(
                &tree,
                &config.languages,
                &config.default_lang,
                &config.resolve_options(),
            );
            for (lang, view) in &views {
                let path = cli.output.join(lang).join("data.json");
                data::write_json(&view.content, &path)?;
                output::print_resolve_output(lang, *lang == config.default_lang, &view.stats, Some(&path));
            }
            output::print_summary(&views);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            let (config, tree) = load_site(&cli.source)?;
            output::print_data_output(&tree, &config.data_path(&cli.source));
            init_thread_pool(&config.processing);
            let views = resolve::resolve_languages(
                &tree,
                &config.languages,
                &config.default_lang,
                &config.resolve_options(),
            );
            for (lang, view) in &views {
                output::print_resolve_output(lang, *lang == config.default_lang, &view.stats, None);
            }
            output::print_summary(&views);
            println!("{}", output::format_check_result(&views));
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load `config.toml` and the data directory it points at.
fn load_site(source: &Path) -> Result<(SiteConfig, Content), Box<dyn std::error::Error>> {
    let config = config::load_config(source)?;
    let data_dir = config.data_path(source);
    let tree = data::load_data_dir(&data_dir)?;
    info!(dir = %data_dir.display(), languages = ?config.languages, "loaded site data");
    Ok((config, tree))
}

/// Log to stderr so `resolve` output on stdout stays valid JSON.
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores: config can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
