mod cli;
mod replay;
mod scenario;

use tabview_config::TabviewConfig;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = cli::parse();

    // An explicit config path must load; the default path falls back.
    let loaded = match &args.config {
        Some(path) => match tabview_config::load_config_from(path) {
            Ok(config) => Ok(config),
            Err(e) => {
                eprintln!("tabview: config {}: {e}", path.display());
                std::process::exit(1);
            }
        },
        None => tabview_config::load_config(),
    };

    let fallback = loaded
        .as_ref()
        .map(|config| config.logging.level)
        .unwrap_or_default()
        .directive();
    let log_directive = args.log_level.as_deref().unwrap_or(fallback);
    let directive = log_directive.parse().unwrap_or_else(|e| {
        eprintln!("tabview: invalid log level {log_directive:?} ({e}), using {fallback}");
        fallback
            .parse()
            .unwrap_or_else(|_| LevelFilter::INFO.into())
    });
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .init();

    tracing::info!("tabview v{} starting", env!("CARGO_PKG_VERSION"));

    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        TabviewConfig::default()
    });

    let scenario = match scenario::Scenario::load(&args.scenario) {
        Ok(scenario) => scenario,
        Err(e) => {
            eprintln!("tabview: {e}");
            std::process::exit(1);
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("tabview: failed to start runtime: {e}");
            std::process::exit(1);
        }
    };

    let report = runtime.block_on(replay::run(&scenario, &config, args.speed));

    println!("state:      {:?}", report.loading_state);
    println!("url:        {}", report.url);
    println!("title:      {}", report.title);
    println!(
        "history:    {} entries, current {:?}",
        report.history.entries.len(),
        report.history.index
    );
    println!("events:     {}", report.events.len());
    println!(
        "transfers:  {} started, {} queued",
        report.started_transfers.len(),
        report.queued_transfers
    );
    let view = &report.view;
    println!(
        "progress:   {} | {} | {} | {} | {}",
        view.document, view.elements, view.total, view.speed, view.elapsed
    );
}
