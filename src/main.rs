use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use statement_insights::server::{serve, AppState};
use statement_insights::{
    AnalysisEvent, AnalyzerConfig, GeminiClient, Outcome, StatementAnalyzer, Upload,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "statement-insights", version, about = "AI-powered bank & UPI statement analyzer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the web tool
    Serve {
        /// Address to listen on (overrides STATEMENT_BIND_ADDR)
        #[arg(long)]
        addr: Option<String>,
    },
    /// Analyze one statement and print the report
    Analyze {
        /// Path to the PDF statement
        pdf: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = AnalyzerConfig::from_env().context("failed to load configuration")?;
    info!("Using model {} (timeout {}s)", config.model, config.request_timeout_secs);

    let model = Arc::new(GeminiClient::from_config(&config)?);
    let analyzer = StatementAnalyzer::new(model, &config.temp_dir);

    match cli.command {
        Command::Serve { addr } => {
            let addr = addr.unwrap_or_else(|| config.bind_addr.clone());
            serve(AppState::new(analyzer), &addr, config.max_upload_bytes)
                .await
                .context("server failed")?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Analyze { pdf } => analyze_file(&analyzer, pdf).await,
    }
}

async fn analyze_file(analyzer: &StatementAnalyzer, pdf: PathBuf) -> Result<ExitCode> {
    let bytes = tokio::fs::read(&pdf)
        .await
        .with_context(|| format!("failed to read {}", pdf.display()))?;
    let filename = pdf
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| pdf.display().to_string());

    let (tx, mut rx) = tokio::sync::mpsc::channel(8);
    let printer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match event {
                AnalysisEvent::Uploaded { .. } => println!("✅ File uploaded successfully!"),
                AnalysisEvent::Extracting => println!("📄 Extracting text from your statement..."),
                AnalysisEvent::Validating => println!("🔎 Checking that this is a bank statement..."),
                AnalysisEvent::Analyzing => println!("🧠 Analyzing your financial data with AI..."),
                AnalysisEvent::Completed | AnalysisEvent::Stopped { .. } => {}
            }
        }
    });

    let outcome = analyzer
        .analyze_with_progress(Upload::new(filename, bytes), Some(tx))
        .await;
    if let Err(e) = printer.await {
        warn!("Progress printer stopped: {}", e);
    }

    match outcome? {
        Outcome::Success { report } => {
            println!("\n📊 Financial Insights Report\n");
            println!("{}\n", report.body);
            println!("{}", Outcome::Success { report }.message());
            Ok(ExitCode::SUCCESS)
        }
        other => {
            eprintln!("{}", other.message());
            Ok(ExitCode::from(2))
        }
    }
}
