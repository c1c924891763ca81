use std::path::PathBuf;

use clap::{Parser, Subcommand};

use cfftables::{Cff, CffTable, PlannerConfig};

#[derive(Parser)]
#[command(author, version, long_about = None)]
#[command(about = "CFF catalog CLI - look up, dump and check cover-free families")]
struct Cli {
    /// Largest d the catalog covers
    #[arg(long, default_value_t = 3)]
    d_max: usize,

    /// Largest number of rows the catalog covers
    #[arg(long, default_value_t = 100)]
    t_max: usize,

    /// Column counts are capped at this value
    #[arg(long, default_value_t = 10_000)]
    n_max: usize,

    /// Leave Reed-Solomon codes out of the plan
    #[arg(long)]
    no_reed_solomon: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Best CFF with exactly T rows
    ByT {
        d: usize,
        t: usize,
        /// Write the matrix to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Smallest CFF with at least N columns
    ByN {
        d: usize,
        n: usize,
        /// Keep every column of the cataloged entry
        #[arg(long)]
        full: bool,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// List the planned entries
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Check the cover-free property of a saved matrix
    Verify {
        path: PathBuf,
        /// Check against this d instead of the one in the header
        #[arg(long)]
        d: Option<usize>,
    },
}

fn emit(cff: &Cff, output: &Option<PathBuf>) -> cfftables::Result<()> {
    match output {
        Some(path) => {
            cff.save(path)?;
            println!("{cff} written to {}", path.display());
        }
        None => cff.write(std::io::stdout().lock())?,
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let start_time = std::time::Instant::now();

    let config = PlannerConfig::new().with_reed_solomon(!cli.no_reed_solomon);
    let table = || CffTable::with_config(cli.d_max, cli.t_max, cli.n_max, config);

    match &cli.command {
        Commands::ByT { d, t, output } => {
            let cff = table()?.get_by_t(*d, *t)?;
            emit(&cff, output)?;
        }
        Commands::ByN { d, n, full, output } => {
            let cff = table()?.get_by_n(*d, *n, !full)?;
            emit(&cff, output)?;
        }
        Commands::List { json } => {
            let table = table()?;
            if *json {
                println!("{}", table.to_json()?);
            } else {
                for entry in table.entries() {
                    println!("{}-CFF({},{})\t{:?}", entry.d, entry.t, entry.n, entry.recipe);
                }
            }
        }
        Commands::Verify { path, d } => {
            let mut cff = Cff::load(path)?;
            if let Some(d) = d {
                cff.set_d(*d)?;
            }
            let ok = cff.verify();
            println!("{cff}: {}", if ok { "cover-free" } else { "NOT cover-free" });
        }
    }

    let elapsed = start_time.elapsed();
    eprintln!("Completed in {elapsed:.2?}");

    Ok(())
}
