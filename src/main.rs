use std::fs::{self, File};
use std::path::PathBuf;

use clap::Parser;
use log::{debug, error, info, warn};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use rentdesk::core::config::{self, CliOverrides, RentdeskConfig};
use rentdesk::core::seed::seed_demo_data;
use rentdesk::core::state::App;
use rentdesk::core::store::JsonStore;

#[derive(Parser)]
#[command(name = "rentdesk", about = "Vehicle rental desk for the terminal")]
struct Args {
    /// Rows per page in every list
    #[arg(short, long)]
    page_size: Option<usize>,

    /// JSON file holding agencies, vehicles, customers and rentals
    #[arg(short, long)]
    data_file: Option<PathBuf>,

    /// Load demo agencies, vehicles and customers into an empty data file
    #[arg(long)]
    seed: bool,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Logging goes next to the data file, so the config is needed first.
    // Its outcome is logged once the logger is up.
    let loaded = config::load_config();
    let cli = CliOverrides {
        page_size: args.page_size,
        data_file: args.data_file,
    };
    let defaults = RentdeskConfig::default();
    let file_config = match &loaded {
        Ok((config, _)) => config,
        Err(_) => &defaults,
    };
    let resolved = config::resolve(file_config, &cli);

    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Some(parent) = resolved.log_file.parent() {
        let _ = fs::create_dir_all(parent);
    }
    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(level, log_config, log_file);
    }

    match &loaded {
        Ok((config, source)) => {
            source.log();
            debug!("Config: {:?}", config);
        }
        Err(e) => {
            warn!("{}; continuing with defaults", e);
            eprintln!("rentdesk: {e}; continuing with defaults");
        }
    }
    debug!("Resolved config: {:?}", resolved);
    info!(
        "Rentdesk starting up (data file {}, page size {})",
        resolved.data_file.display(),
        resolved.page_size
    );

    let store = JsonStore::open(&resolved.data_file).map_err(|e| {
        error!("Failed to open {}: {}", resolved.data_file.display(), e);
        std::io::Error::other(format!(
            "cannot open {}: {e}",
            resolved.data_file.display()
        ))
    })?;
    let mut app = App::from_config(Box::new(store), &resolved);

    if args.seed {
        match seed_demo_data(&mut app.engine) {
            Ok(true) => app.notify("Demo data loaded"),
            Ok(false) => app.notify("Data file already has records, demo data skipped"),
            Err(e) => {
                error!("Seeding failed: {}", e);
                app.notify(format!("Seeding failed: {e}"));
            }
        }
    }

    rentdesk::tui::run(app)
}
