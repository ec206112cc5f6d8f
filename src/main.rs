use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use csv::{ReaderBuilder, Writer};

use bmssp::{dijkstra_all, solve, Graph};

#[derive(Parser, Debug)]
#[command(name = "bmssp")]
#[command(about = "Build a graph from a CSV edge list and run an SSSP algorithm from a source node id.", long_about = None)]
struct Cli {
    /// Path to the .csv file (header row, then src,dst,weight records)
    #[arg(short, long)]
    csv: String,

    /// Source node id to run SSSP from
    #[arg(short, long)]
    source: usize,

    #[arg(short, long, value_enum, default_value = "bmssp")]
    algorithm: Algorithm,

    /// Output CSV (node_id, distance). If omitted, prints a summary to stdout.
    #[arg(short, long)]
    out: Option<String>,

    /// Include unreachable nodes in output with infinite distance
    #[arg(long, default_value_t = false)]
    include_unreachable: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Algorithm {
    Bmssp,
    Dijkstra,
}

impl Algorithm {
    fn run(&self, graph: &Graph, start: usize) -> Vec<f64> {
        match self {
            Algorithm::Bmssp => {
                let (dist, _) = solve(graph, start);
                (0..graph.num_vertices())
                    .map(|v| dist.get(&v).copied().unwrap_or(f64::INFINITY))
                    .collect()
            }
            Algorithm::Dijkstra => dijkstra_all(graph, start),
        }
    }
}

fn parse_csv_into_graph(path: &str) -> Result<Graph> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path))?;

    let mut edges = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let src: usize = record[0].parse()?;
        let dst: usize = record[1].parse()?;
        let weight: f64 = record[2].parse()?;
        edges.push((src, dst, weight));
    }

    Graph::from_edges(&edges).context("building graph from edge list")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let graph = parse_csv_into_graph(&cli.csv)?;
    println!(
        "Graph: {} nodes, {} directed edges",
        graph.num_vertices(),
        graph.num_edges()
    );

    use std::time::SystemTime;
    let now = SystemTime::now();
    let dist = cli.algorithm.run(&graph, cli.source);
    if let Ok(elapsed) = now.elapsed() {
        println!("{} s", elapsed.as_secs_f64());
    }

    if let Some(out_path) = cli.out {
        let mut wtr =
            Writer::from_path(&out_path).with_context(|| format!("creating CSV {}", &out_path))?;
        wtr.write_record(["node_id", "distance"])?;
        let mut dist_with_idx: Vec<(usize, &f64)> = dist.iter().enumerate().collect();
        dist_with_idx.sort_by(|a, b| a.1.partial_cmp(b.1).unwrap());
        let mut written = 0usize;
        for (idx, d) in &dist_with_idx {
            if d.is_finite() || cli.include_unreachable {
                let val = if d.is_finite() {
                    format!("{:.6}", d)
                } else {
                    String::from("inf")
                };
                wtr.write_record(&[idx.to_string(), val])?;
                written += 1;
            }
        }
        wtr.flush()?;
        println!("Wrote distances for {} nodes to {}", written, out_path);
    } else {
        let reachable = dist.iter().filter(|x| x.is_finite()).count();
        println!("Nodes: {}", dist.len());
        println!("Reachable from {}: {}", cli.source, reachable);
        if reachable > 0 {
            let mut maxd = 0.0_f64;
            for d in dist.iter().copied().filter(|x| x.is_finite()) {
                if d > maxd {
                    maxd = d;
                }
            }
            println!("Max finite distance: {:.2}", maxd);
        }
    }

    Ok(())
}
