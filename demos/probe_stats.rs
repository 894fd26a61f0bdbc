use clap::Parser;
use quad_hash::HashMap;
use quad_hash::TableConfig;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'c', long = "target_capacity", default_value_t = 1000)]
    target_capacity: usize,

    #[arg(short = 'l', long = "load_factor", default_value_t = 0.8)]
    load_factor: f32,

    /// Fraction of the inserted keys to remove again before printing.
    #[arg(short = 'r', long = "remove_fraction", default_value_t = 0.0)]
    remove_fraction: f64,
}

fn main() {
    let args = Args::parse();

    println!(
        "Creating HashMap with target capacity: {}",
        args.target_capacity
    );

    let mut map: HashMap<u64, u64> = HashMap::with_config(TableConfig {
        initial_capacity: args.target_capacity,
        load_factor: args.load_factor,
    });

    println!("Actual capacity: {}", map.capacity());
    println!("Filling map until just below its growth threshold...");

    let threshold = (map.capacity() as f64 * f64::from(map.load_factor())).ceil() as u64;
    let initial_capacity = map.capacity();
    for key in 0..threshold.saturating_sub(1) {
        map.insert(key, key);
    }

    let to_remove = (map.len() as f64 * args.remove_fraction.clamp(0.0, 1.0)) as u64;
    for key in (0..to_remove).map(|i| i * 7 % threshold.max(1)) {
        map.remove(&key);
    }

    println!("Inserted {} values, {} remain", threshold.saturating_sub(1), map.len());
    if map.capacity() != initial_capacity {
        println!(
            "Map grew from {} to {} slots while filling",
            initial_capacity,
            map.capacity()
        );
    }
    println!(
        "Final load factor: {:.2}%",
        (map.len() as f64 / map.capacity() as f64) * 100.0
    );

    map.probe_histogram().print();
    map.debug_stats().print();
}
