use edomset::format::{self, GraphEntry};
use edomset::gen::{self, GeneratorConfig};
use edomset::greedy;
use edomset::harness::{run_with_timeout, HarnessConfig};
use edomset::record::{SearchOutcome, SearchRecord};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::error::Error;
use std::time::Duration;

struct GenerateArgs {
    out: String,
    seed: u64,
    min_vertices: usize,
    max_vertices: usize,
    densities: Vec<f64>,
}

struct RunArgs {
    input: String,
    exhaustive: bool,
    greedy: bool,
    timeout: Duration,
    exhaustive_out: String,
    greedy_out: String,
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str);

    let result = match command {
        Some("generate") => parse_generate_args(&args[2..]).and_then(|a| generate(&a)),
        Some("run") => parse_run_args(&args[2..]).and_then(|a| run(&a)),
        Some("--help" | "-h") => usage_and_exit(0),
        _ => usage_and_exit(2),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn parse_generate_args(args: &[String]) -> Result<GenerateArgs, Box<dyn Error>> {
    let mut out = GenerateArgs {
        out: "all_graphs_data.txt".to_owned(),
        seed: 124_467,
        min_vertices: 10,
        max_vertices: 18,
        densities: vec![0.125, 0.25, 0.5, 0.75],
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--out" => {
                out.out = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2)).clone();
                i += 2;
            }
            "--seed" => {
                out.seed = parse_value(args.get(i + 1))?;
                i += 2;
            }
            "--min-vertices" => {
                out.min_vertices = parse_value(args.get(i + 1))?;
                i += 2;
            }
            "--max-vertices" => {
                out.max_vertices = parse_value(args.get(i + 1))?;
                i += 2;
            }
            "--densities" => {
                let raw = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                out.densities = raw
                    .split(',')
                    .map(str::parse)
                    .collect::<Result<Vec<f64>, _>>()?;
                i += 2;
            }
            _ => usage_and_exit(2),
        }
    }
    Ok(out)
}

fn parse_run_args(args: &[String]) -> Result<RunArgs, Box<dyn Error>> {
    let mut out = RunArgs {
        input: "all_graphs_data.txt".to_owned(),
        exhaustive: true,
        greedy: true,
        timeout: Duration::from_secs(240),
        exhaustive_out: "min_edge_dominating_sets.txt".to_owned(),
        greedy_out: "greedy_edge_dominating_sets.txt".to_owned(),
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                out.input = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2)).clone();
                i += 2;
            }
            "--algorithm" => {
                match args.get(i + 1).map(String::as_str) {
                    Some("both") => {}
                    Some("exhaustive") => out.greedy = false,
                    Some("greedy") => out.exhaustive = false,
                    _ => usage_and_exit(2),
                }
                i += 2;
            }
            "--timeout" => {
                out.timeout = Duration::from_secs(parse_value(args.get(i + 1))?);
                i += 2;
            }
            "--exhaustive-out" => {
                out.exhaustive_out =
                    args.get(i + 1).unwrap_or_else(|| usage_and_exit(2)).clone();
                i += 2;
            }
            "--greedy-out" => {
                out.greedy_out = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2)).clone();
                i += 2;
            }
            _ => usage_and_exit(2),
        }
    }
    Ok(out)
}

fn parse_value<T: std::str::FromStr>(arg: Option<&String>) -> Result<T, Box<dyn Error>>
where
    T::Err: Error + 'static,
{
    let raw = arg.unwrap_or_else(|| usage_and_exit(2));
    Ok(raw.parse()?)
}

fn generate(args: &GenerateArgs) -> Result<(), Box<dyn Error>> {
    println!("--------------------------------------------------");
    println!(
        "Generating graphs: {}..={} vertices, densities {:?}, seed {}",
        args.min_vertices, args.max_vertices, args.densities, args.seed
    );
    println!("--------------------------------------------------");

    let cfg = GeneratorConfig::default();
    let mut rng = SmallRng::seed_from_u64(args.seed);
    let mut entries = Vec::new();

    for num_vertices in args.min_vertices..=args.max_vertices {
        for &density in &args.densities {
            let graph = gen::generate(num_vertices, density, &cfg, &mut rng)?;
            let name = gen::graph_name(num_vertices, density);
            println!(
                "Generated {name}: {} vertices, {} edges",
                graph.vertex_count(),
                graph.edge_count()
            );
            entries.push(GraphEntry {
                name,
                num_vertices,
                density,
                graph,
            });
        }
    }

    format::save_graphs(&args.out, &entries)?;
    println!("Wrote {} graphs to {}", entries.len(), args.out);
    Ok(())
}

fn run(args: &RunArgs) -> Result<(), Box<dyn Error>> {
    let entries = format::load_graphs(&args.input)?;
    println!("Loaded {} graphs from {}", entries.len(), args.input);

    if args.exhaustive {
        let harness_cfg = HarnessConfig {
            timeout: args.timeout,
            ..HarnessConfig::default()
        };
        // Graphs are independent; the harness already isolates each search
        // in its own worker, so the batch can fan out across cores.
        let records: Vec<SearchRecord> = entries
            .par_iter()
            .map(|entry| {
                println!(
                    "Processing {} with {} vertices and density {}",
                    entry.name, entry.num_vertices, entry.density
                );
                run_with_timeout(&entry.graph, &entry.name, &harness_cfg)
            })
            .collect();
        write_records(&args.exhaustive_out, &records)?;
        println!("Exhaustive results written to {}", args.exhaustive_out);
    }

    if args.greedy {
        let records: Vec<SearchRecord> = entries
            .iter()
            .map(|entry| {
                println!(
                    "Processing {} with {} vertices and density {}",
                    entry.name, entry.num_vertices, entry.density
                );
                let outcome: SearchOutcome = greedy::search(&entry.graph);
                SearchRecord::completed(&entry.name, outcome)
            })
            .collect();
        write_records(&args.greedy_out, &records)?;
        println!("Greedy results written to {}", args.greedy_out);
    }

    Ok(())
}

/// Truncates `path` and appends each record block in input order.
fn write_records(path: &str, records: &[SearchRecord]) -> Result<(), Box<dyn Error>> {
    std::fs::write(path, "")?;
    for record in records {
        record.append_to_file(path)?;
    }
    Ok(())
}

fn usage_and_exit(code: i32) -> ! {
    eprintln!(
        "Usage:\n  edomset generate [--out FILE] [--seed SEED] [--min-vertices N] [--max-vertices N] [--densities D1,D2,...]\n  edomset run [--input FILE] [--algorithm both|exhaustive|greedy] [--timeout SECS] [--exhaustive-out FILE] [--greedy-out FILE]\n\nOptions:\n  --out FILE               Graph file to write (default: all_graphs_data.txt)\n  --seed SEED              Deterministic generator seed (default: 124467)\n  --min-vertices N         Smallest graph order to generate (default: 10)\n  --max-vertices N         Largest graph order to generate (default: 18)\n  --densities D1,D2,...    Edge densities to generate (default: 0.125,0.25,0.5,0.75)\n  --input FILE             Graph file to read (default: all_graphs_data.txt)\n  --algorithm WHICH        Which engine(s) to run (default: both)\n  --timeout SECS           Deadline for each exhaustive search (default: 240)\n  --exhaustive-out FILE    Exhaustive results file (default: min_edge_dominating_sets.txt)\n  --greedy-out FILE        Greedy results file (default: greedy_edge_dominating_sets.txt)\n"
    );
    std::process::exit(code)
}
