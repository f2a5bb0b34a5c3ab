use clap::Parser;
use record_store::core::diagnostics::{Diagnostics, HealthStatus};
use record_store::{RecordStore, RecordStoreConfig};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Dump the header and directory of a record store", long_about = None)]
struct Args {
    /// Store file to inspect
    path: Option<PathBuf>,

    /// JSON config file, instead of passing path and sizes
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long, default_value_t = 4096)]
    data_size: u32,

    #[arg(short, long, default_value_t = 64)]
    records: u16,

    /// Write the export here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Include record bytes (hex) in the export
    #[arg(long)]
    dump_data: bool,
}

#[derive(Serialize)]
struct StoreExport {
    path: PathBuf,
    magic: String,
    version: u32,
    count: u16,
    used: u16,
    size: u32,
    checksum: String,
    free_chunks: usize,
    health: String,
    records: Vec<RecordExport>,
}

#[derive(Serialize)]
struct RecordExport {
    slot: usize,
    id: u16,
    offset: u32,
    size: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match (&args.config, &args.path) {
        (Some(config), _) => RecordStoreConfig::from_json_file(config)?,
        (None, Some(path)) => RecordStoreConfig::new(path, args.data_size, args.records),
        (None, None) => return Err("either a store path or --config is required".into()),
    };

    let store = RecordStore::open(config);
    if !store.is_data_mapped() {
        let reason = store
            .open_error()
            .map(|err| err.to_string())
            .unwrap_or_else(|| "unknown error".to_string());
        return Err(format!("unable to open {:?}: {}", store.path(), reason).into());
    }
    if let Some(err) = store.open_error() {
        eprintln!("warning: store did not validate: {}", err);
    }

    let header = store.header();
    let health = match Diagnostics::check_health(&store) {
        HealthStatus::Healthy => "healthy".to_string(),
        HealthStatus::Corrupted(reason) => format!("corrupted: {}", reason),
        HealthStatus::Suspicious(reason) => format!("suspicious: {}", reason),
    };

    let records = store
        .entries()
        .map(|(slot, entry)| RecordExport {
            slot,
            id: entry.id(),
            offset: entry.offset(),
            size: entry.size(),
            data: args
                .dump_data
                .then(|| store.find_record(entry.id()).map(hex))
                .flatten(),
        })
        .collect();

    let export = StoreExport {
        path: store.path().to_path_buf(),
        magic: format!("{:#010x}", header.magic),
        version: header.version,
        count: header.count,
        used: header.used,
        size: header.size,
        checksum: format!("{:#010x}", store.calc_checksum()),
        free_chunks: store.free_chunks(),
        health,
        records,
    };

    let json = serde_json::to_string_pretty(&export)?;
    match &args.output {
        Some(path) => {
            let mut file = File::create(path)?;
            file.write_all(json.as_bytes())?;
            eprintln!("Exported directory to {:?}", path);
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
