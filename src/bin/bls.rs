use anyhow::{Context, Result};
use bls_series::api::{Client, DEFAULT_ENDPOINT};
use bls_series::report::{self, Outcome};
use bls_series::sweep::{self, SweepParams};
use bls_series::{BlsError, CountyId, SeriesRequest};
use bls_series::{stats, storage};
use clap::{Args, Parser, Subcommand};
use log::{info, warn};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "bls",
    version,
    about = "Fetch & summarize BLS county unemployment series",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    cmd: Option<Command>,
    // Without a subcommand, `bls` behaves like `bls fetch`.
    #[command(flatten)]
    fetch: FetchArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch one county's unemployment rate and print it.
    Fetch(FetchArgs),
    /// Fetch ranges of county codes and save those that have data.
    Sweep(SweepArgs),
    /// Print min/max/mean/median of a file written by `sweep`.
    Stats(StatsArgs),
}

#[derive(Args, Debug)]
struct ApiArgs {
    /// First year of the series (YYYY).
    #[arg(long, default_value = "2006")]
    start_year: String,
    /// Last year of the series (YYYY).
    #[arg(long, default_value = "2014")]
    end_year: String,
    /// BLS API registration key.
    #[arg(long, env = "BLS_REGISTRATION_KEY", hide_env_values = true)]
    registration_key: Option<String>,
    /// Endpoint of the timeseries data API.
    #[arg(long, env = "BLS_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,
    /// Total request timeout in seconds.
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,
}

#[derive(Args, Debug)]
struct FetchArgs {
    /// Five-digit county FIPS code (e.g., 37119 for Mecklenburg County, NC).
    #[arg(short, long, default_value = "37119")]
    county: String,
    #[command(flatten)]
    api: ApiArgs,
}

#[derive(Args, Debug)]
struct SweepArgs {
    /// County codes or inclusive ranges, separated by comma or semicolon (e.g., 37000:37199,45000:45199).
    #[arg(short, long)]
    counties: String,
    /// Save the collected series as JSON.
    #[arg(long, default_value = "county_unemployment_data.json")]
    out: PathBuf,
    /// Also save the collected series as CSV.
    #[arg(long)]
    csv: Option<PathBuf>,
    #[command(flatten)]
    api: ApiArgs,
}

#[derive(Args, Debug)]
struct StatsArgs {
    /// JSON file written by `bls sweep`.
    input: PathBuf,
    /// Also print one line per county.
    #[arg(long, default_value_t = false)]
    by_county: bool,
}

fn fmt_num(x: f64) -> String {
    // Format up to 4 decimals, then trim trailing zeros and trailing dot.
    let s = format!("{:.4}", x);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let res = match cli.cmd {
        Some(Command::Fetch(args)) => cmd_fetch(args),
        Some(Command::Sweep(args)) => cmd_sweep(args),
        Some(Command::Stats(args)) => cmd_stats(args),
        None => cmd_fetch(cli.fetch),
    };
    match res {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn client(api: &ApiArgs) -> Result<Client> {
    if api.registration_key.is_none() {
        warn!("no registration key set (BLS_REGISTRATION_KEY); unregistered API limits apply");
    }
    let client = Client::with_timeout(Duration::from_secs(api.timeout))
        .context("build http client")?
        .endpoint(api.endpoint.as_str());
    Ok(client)
}

fn cmd_fetch(args: FetchArgs) -> Result<ExitCode> {
    let client = client(&args.api)?;
    let request = SeriesRequest::for_county(
        &CountyId::new(args.county),
        args.api.start_year,
        args.api.end_year,
        args.api.registration_key,
    );

    let mut stdout = std::io::stdout().lock();
    match report::fetch_and_report(&client, &request, &mut stdout) {
        Ok(Outcome::Observations(n)) => {
            info!("{} observations for {}", n, request.series_id());
            Ok(ExitCode::SUCCESS)
        }
        Ok(Outcome::Empty) => Ok(ExitCode::SUCCESS),
        Err(BlsError::Console(e)) => Err(e).context("write report"),
        // Already reported on stdout.
        Err(_) => Ok(ExitCode::FAILURE),
    }
}

fn cmd_sweep(args: SweepArgs) -> Result<ExitCode> {
    let ranges = sweep::parse_ranges(&args.counties).map_err(anyhow::Error::msg)?;
    if ranges.is_empty() {
        anyhow::bail!("at least one county code or range required");
    }
    let client = client(&args.api)?;
    let params = SweepParams {
        start_year: args.api.start_year,
        end_year: args.api.end_year,
        registration_key: args.api.registration_key,
    };
    let counties = ranges.iter().flat_map(|r| r.counties());

    let mut stdout = std::io::stdout().lock();
    let result = sweep::sweep(&client, counties, &params, &mut stdout)?;

    storage::save_json(&result.data, &args.out)?;
    eprintln!(
        "Saved {} counties to {}",
        result.data.len(),
        args.out.display()
    );
    if let Some(path) = args.csv.as_ref() {
        storage::save_csv(&result.data, path)?;
        eprintln!("Saved CSV to {}", path.display());
    }

    if result.failed.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        warn!("{} counties failed: {}", result.failed.len(), result.failed.join(","));
        Ok(ExitCode::FAILURE)
    }
}

fn cmd_stats(args: StatsArgs) -> Result<ExitCode> {
    let data = storage::load_json(&args.input)?;
    let Some(all) = stats::overall_summary(&data) else {
        anyhow::bail!("no values in {}", args.input.display());
    };
    println!("Min is {}", fmt_num(all.min));
    println!("Max is {}", fmt_num(all.max));
    println!("Average is {}", fmt_num(all.mean));
    println!("Median is {}", fmt_num(all.median));

    if args.by_county {
        for s in stats::grouped_summary(&data) {
            println!(
                "{}  count={}  min={} max={} mean={} median={}",
                s.county_id,
                s.summary.count,
                fmt_num(s.summary.min),
                fmt_num(s.summary.max),
                fmt_num(s.summary.mean),
                fmt_num(s.summary.median)
            );
        }
    }
    Ok(ExitCode::SUCCESS)
}
