use clap::{Arg, ArgAction, Command};
use portfolio_i18n::{
    DirLocaleFetcher, HttpLocaleFetcher, Language, LoadedTable, LocaleFetcher, SwitcherConfig,
    TableProvider, TableSource, apply_translation_table, embedded_table, load_table_from_file,
    loader::locale_file_name, resolve_initial_language, scan_markup,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("portfolio-i18n")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Language tooling for the bilingual portfolio page")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log locale loading details")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("resolve")
                .about("Resolve the language a new visitor would see")
                .arg(
                    Arg::new("stored")
                        .long("stored")
                        .short('s')
                        .help("Stored preference, as found in local storage"),
                )
                .arg(
                    Arg::new("browser")
                        .long("browser")
                        .short('b')
                        .help("Browser locale (repeatable, most preferred first)")
                        .action(ArgAction::Append),
                ),
        )
        .subcommand(
            Command::new("show")
                .about("Load a translation table the way the page does and print it")
                .arg(
                    Arg::new("lang")
                        .help("Language code (de, en)")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("base-url")
                        .long("base-url")
                        .short('u')
                        .help("Page URL locale files are resolved against")
                        .conflicts_with("locales-dir"),
                )
                .arg(
                    Arg::new("locales-dir")
                        .long("locales-dir")
                        .short('d')
                        .help("Read locale files from a local directory")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Report translation keys used by a page but missing from its locales")
                .arg(
                    Arg::new("html")
                        .help("Path of the HTML page")
                        .required(true)
                        .index(1)
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("locales-dir")
                        .long("locales-dir")
                        .short('d')
                        .help("Locale directory (default: the embedded tables)")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = cli().get_matches();

    let default_level = if matches.get_flag("verbose") { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = SwitcherConfig::from_env()?;

    match matches.subcommand() {
        Some(("resolve", sub)) => {
            let stored = sub.get_one::<String>("stored").map(String::as_str);
            let browser: Vec<&str> = sub
                .get_many::<String>("browser")
                .map(|values| values.map(String::as_str).collect())
                .unwrap_or_default();
            let lang = resolve_initial_language(stored, &browser, config.default_language);
            println!("{}", lang);
        }
        Some(("show", sub)) => {
            let lang: Language = sub
                .get_one::<String>("lang")
                .map(String::as_str)
                .unwrap_or_default()
                .parse()?;
            let base_url = sub
                .get_one::<String>("base-url")
                .cloned()
                .or_else(|| config.base_url.clone());

            let loaded = if let Some(dir) = sub.get_one::<PathBuf>("locales-dir") {
                load_with(DirLocaleFetcher::new(dir), lang).await
            } else if let Some(url) = base_url {
                let fetcher = HttpLocaleFetcher::with_locales_path(
                    &url,
                    &config.locales_path,
                    config.request_timeout,
                )?;
                load_with(fetcher, lang).await
            } else {
                println!("# {} (embedded)", lang);
                print_table_entries(&embedded_table(lang));
                return Ok(());
            };

            if let Some(reason) = &loaded.report.fallback_reason {
                eprintln!("⚠️  Using embedded translations: {}", reason);
            }
            let source = match loaded.report.source {
                TableSource::Network | TableSource::Cache => "fetched",
                TableSource::Embedded => "embedded",
            };
            println!("# {} ({})", lang, source);
            print_table_entries(&loaded.table);
        }
        Some(("check", sub)) => {
            let html_path = sub
                .get_one::<PathBuf>("html")
                .ok_or("missing HTML path")?;
            let locales_dir = sub.get_one::<PathBuf>("locales-dir");
            check_page(html_path, locales_dir.map(PathBuf::as_path), &config)?;
        }
        _ => unreachable!("subcommand_required is set"),
    }

    Ok(())
}

async fn load_with<F: LocaleFetcher>(fetcher: F, lang: Language) -> LoadedTable {
    TableProvider::new(fetcher).load(lang).await
}

fn print_table_entries(table: &portfolio_i18n::TranslationTable) {
    for key in table.sorted_keys() {
        println!("{} = {}", key, table.get_or_key(key));
    }
}

fn check_page(
    html_path: &Path,
    locales_dir: Option<&Path>,
    config: &SwitcherConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let html = std::fs::read_to_string(html_path)
        .map_err(|e| format!("Failed to read '{}': {}", html_path.display(), e))?;
    let page = scan_markup(&html, &config.markers);

    println!(
        "📄 {} ({} marked elements, lang={})",
        html_path.display(),
        page.elements().len(),
        page.language().unwrap_or("unset")
    );

    let mut missing_total = 0;
    for lang in Language::ALL {
        let table = match locales_dir {
            Some(dir) => load_table_from_file(&dir.join(locale_file_name(lang)))?,
            None => embedded_table(lang),
        };

        let mut doc = page.clone();
        let stats = apply_translation_table(&mut doc, &table, lang, config);

        if stats.missing.is_empty() {
            println!("✅ {}: {} bindings translated", lang, stats.translated);
        } else {
            println!("❌ {}: {} missing keys", lang, stats.missing.len());
            for key in &stats.missing {
                println!("   - {}", key);
            }
            missing_total += stats.missing.len();
        }
    }

    if missing_total > 0 {
        return Err(format!("{} missing translation keys", missing_total).into());
    }
    Ok(())
}
