use bytemuck::{Pod, Zeroable};
use record_store::{Record, RecordLookup, RecordStore, RecordStoreConfig};

/// Window position persisted between runs.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct WindowPlacement {
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    maximized: u32,
}

impl Record for WindowPlacement {
    const ID: u16 = 1;
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("=== Record Store Demo ===");

    let config = RecordStoreConfig::builder()
        .path("demo_records.bin")
        .data_size(4096)
        .record_count(16)
        .build();

    // 1. Open (or create) the store
    println!("\n[1] Opening {:?}...", config.path);
    let mut store = RecordStore::open(config);
    if !store.is_valid() {
        if let Some(err) = store.open_error() {
            println!("    Store unusable: {}", err);
        }
        if !store.is_data_mapped() {
            return Err("unable to map the record store".into());
        }
        println!("    Resetting store contents.");
        store.reset();
    }

    let header = store.header();
    println!(
        "    Header Info: Records={}/{}, Size={}, Free Chunks={}",
        header.used,
        header.count,
        header.size,
        store.free_chunks()
    );

    // 2. Load or create the window placement
    println!("\n[2] Loading window placement...");
    let (lookup, record) = store.typed::<WindowPlacement>();
    match (lookup, record) {
        (RecordLookup::Opened, Some(mut record)) => {
            let placement = record.read();
            println!("    Restored: {:?}", placement);
            record.update(|p| p.x += 10);
        }
        (RecordLookup::Created, Some(mut record)) => {
            println!("    No saved placement, using defaults.");
            record.write(&WindowPlacement {
                x: 100,
                y: 100,
                width: 1280,
                height: 720,
                maximized: 0,
            });
        }
        (lookup, _) => println!("    Lookup failed: {:?}", lookup),
    }

    // 3. Close writes the checksum
    println!("\n[3] Closing store (checksum {:#010x})...", store.calc_checksum());
    store.close();

    println!("\n=== Demo Complete ===");
    Ok(())
}
