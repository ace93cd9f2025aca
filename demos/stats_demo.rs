use chain_hash::HashMap;
use chain_hash::Hashtable;
use chain_hash::bucket_store::DebugStats;
use clap::Parser;
use clap::ValueEnum;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Container {
    Map,
    Table,
}

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'n', long = "entries", default_value_t = 1000)]
    entries: usize,

    #[arg(short = 'c', long = "initial_capacity", default_value_t = 16)]
    initial_capacity: usize,

    #[arg(short = 'l', long = "load_factor", default_value_t = 0.75)]
    load_factor: f32,

    #[arg(long = "container", value_enum, default_value_t = Container::Map)]
    container: Container,
}

fn print_histogram(histogram: &[usize]) {
    let max = histogram.iter().copied().max().unwrap_or(0);
    println!("Chain length histogram:");
    for (len, &count) in histogram.iter().enumerate() {
        let width = if max == 0 { 0 } else { count * 60 / max };
        println!("{:>3} | {} ({})", len, "#".repeat(width), count);
    }
}

fn report(stats: DebugStats, histogram: &[usize]) {
    stats.print();
    print_histogram(histogram);
}

fn main() {
    let args = Args::parse();

    println!(
        "Filling {:?} with {} entries (initial capacity {}, load factor {})",
        args.container, args.entries, args.initial_capacity, args.load_factor
    );

    match args.container {
        Container::Map => {
            let mut map: HashMap<u64, u64> =
                match HashMap::try_with_capacity_and_load_factor(args.initial_capacity, args.load_factor) {
                    Ok(map) => map,
                    Err(error) => {
                        eprintln!("Invalid configuration: {error}");
                        return;
                    }
                };
            for i in 0..args.entries as u64 {
                map.insert(i, i);
            }
            println!("Final capacity: {}", map.capacity());
            report(map.debug_stats(), &map.chain_histogram());
        }
        Container::Table => {
            let table: Hashtable<u64, u64> =
                match Hashtable::try_with_capacity_and_load_factor(args.initial_capacity, args.load_factor) {
                    Ok(table) => table,
                    Err(error) => {
                        eprintln!("Invalid configuration: {error}");
                        return;
                    }
                };
            for i in 0..args.entries as u64 {
                if let Err(error) = table.put(i, i) {
                    eprintln!("Insert of {i} failed: {error}");
                    return;
                }
            }
            println!("Final capacity: {}", table.capacity());
            if let Some((low, high)) = table.occupied_bounds() {
                println!("Enumeration scans buckets {low}..={high}");
            }
            report(table.debug_stats(), &table.chain_histogram());
        }
    }
}
