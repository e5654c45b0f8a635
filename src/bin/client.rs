//! Interactive terminal client for the Mutual Fund Analysis API.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use chrono::Local;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use fund_analysis::frontend::download::save_report;
use fund_analysis::frontend::progress::Progress;
use fund_analysis::frontend::view::{Tab, render_banner, render_menu, render_report_section, render_tab};
use fund_analysis::frontend::{AnalysisApi, ClientError, ClientState, TROUBLESHOOTING};
use fund_analysis::models::{AnalysisResponse, POPULAR_FUNDS};
use fund_analysis::telemetry::init_cli_logging;

#[derive(Parser, Debug)]
#[command(name = "client")]
#[command(about = "AI-powered mutual fund analysis in your terminal", long_about = None)]
struct Args {
    /// Base URL of the analysis server
    #[arg(long, env = "ANALYSIS_API_URL", default_value = "http://127.0.0.1:8000")]
    api_url: String,

    /// Seconds to wait for one analysis
    #[arg(long, env = "ANALYSIS_TIMEOUT_SECS", default_value_t = 300)]
    timeout_secs: u64,

    /// Directory downloaded reports are written to
    #[arg(long, env = "REPORT_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Analyze one fund, print every view, save the report and exit
    #[arg(short, long)]
    name: Option<String>,

    /// Print the popular fund examples and exit
    #[arg(long)]
    list_examples: bool,
}

type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    init_cli_logging();

    let args = Args::parse();

    if args.list_examples {
        print_examples();
        return Ok(ExitCode::SUCCESS);
    }

    let api = AnalysisApi::new(&args.api_url, Duration::from_secs(args.timeout_secs))?;
    tracing::debug!(api_url = %api.base_url(), "Client configured");

    if let Some(name) = args.name {
        return run_once(&api, &name, &args.output_dir).await;
    }

    run_interactive(&api, &args.output_dir).await?;
    Ok(ExitCode::SUCCESS)
}

fn print_examples() {
    println!("💡 Popular Fund Examples:");
    for (i, fund) in POPULAR_FUNDS.iter().enumerate() {
        println!("  {}. {}", i + 1, fund);
    }
}

fn print_error(err: &ClientError) {
    eprintln!("\n❌ {err}\n");
    eprintln!("🔧 Troubleshooting Guide\n\n{TROUBLESHOOTING}\n");
}

fn prompt(text: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    write!(stdout, "{text}")?;
    stdout.flush()
}

async fn submit(api: &AnalysisApi, state: &mut ClientState, fund_name: &str) {
    println!("\n📈 Analyzing: {fund_name}");
    let progress = Progress::start();
    let outcome = api.analyze(fund_name).await;
    progress.finish();
    state.finish(outcome);
}

async fn run_once(api: &AnalysisApi, name: &str, output_dir: &Path) -> anyhow::Result<ExitCode> {
    let mut state = ClientState::Idle;
    let Some(fund_name) = state.submit(name) else {
        eprintln!("⚠️  Please enter a fund name to analyze.");
        return Ok(ExitCode::FAILURE);
    };

    submit(api, &mut state, &fund_name).await;

    match state {
        ClientState::Done(Ok(response)) => {
            println!("{}\n", render_banner(&response));
            for tab in Tab::ALL {
                println!("{}\n", render_tab(tab, &response));
            }
            let path = save_report(output_dir, &response, Local::now().date_naive()).await?;
            println!("📥 Report saved to {}", path.display());
            Ok(ExitCode::SUCCESS)
        }
        ClientState::Done(Err(err)) => {
            print_error(&err);
            Ok(ExitCode::FAILURE)
        }
        _ => Ok(ExitCode::FAILURE),
    }
}

async fn run_interactive(api: &AnalysisApi, output_dir: &Path) -> anyhow::Result<()> {
    println!("📈 Mutual Fund Analyzer");
    println!("AI-powered comprehensive analysis of mutual funds\n");
    print_examples();
    println!();

    let mut input: Input = BufReader::new(tokio::io::stdin()).lines();
    let mut state = ClientState::Idle;

    loop {
        prompt("🔍 Fund name (1-5 for an example, q to quit): ")?;
        let Some(line) = input.next_line().await? else {
            break;
        };
        let line = line.trim();

        if line.eq_ignore_ascii_case("q") {
            break;
        }

        let choice = line
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| POPULAR_FUNDS.get(i).copied())
            .unwrap_or(line);

        let Some(fund_name) = state.submit(choice) else {
            println!("⚠️  Please enter a fund name to analyze.");
            continue;
        };

        submit(api, &mut state, &fund_name).await;

        match &state {
            ClientState::Done(Ok(response)) => {
                if !browse(&mut input, response, output_dir).await? {
                    break;
                }
            }
            ClientState::Done(Err(err)) => print_error(err),
            _ => {}
        }
        state.reset();
    }

    println!("Bye.");
    Ok(())
}

/// Result menu. Returns `false` when the user quits.
async fn browse(
    input: &mut Input,
    response: &AnalysisResponse,
    output_dir: &Path,
) -> anyhow::Result<bool> {
    println!("\n{}\n", render_banner(response));
    println!("{}\n", render_tab(Tab::Fund, response));

    loop {
        println!("{}", render_menu(response));
        prompt("> ")?;
        let Some(line) = input.next_line().await? else {
            return Ok(false);
        };
        let key = line.trim();

        if let Some(tab) = Tab::from_key(key) {
            println!("\n{}\n", render_tab(tab, response));
            continue;
        }

        if let Some(number) = key.strip_prefix('r').and_then(|n| n.parse::<usize>().ok()) {
            match render_report_section(response, number) {
                Some(text) => println!("\n{text}\n"),
                None => println!("⚠️  No report section {number}"),
            }
            continue;
        }

        match key {
            "d" => match save_report(output_dir, response, Local::now().date_naive()).await {
                Ok(path) => println!("📥 Report saved to {}\n", path.display()),
                Err(e) => eprintln!("❌ Could not save report: {e:#}\n"),
            },
            "n" => return Ok(true),
            "q" => return Ok(false),
            _ => println!("Unknown option: {key}"),
        }
    }
}
