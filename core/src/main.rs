//! Claim Desk CLI - submit claims and query the claims backend
//!
//! # Main Commands
//!
//! ```bash
//! claimdesk claim --emirates-id eid.pdf --driving-license dl.jpg \
//!     --vehicle-registry mulkiya.png --claim-form form.pdf \
//!     --damaged-photo front.jpg --damaged-photo side.jpg
//! claimdesk workshop quote1.pdf quote2.pdf quote3.pdf
//! claimdesk ask "Is towing covered?"        # one question
//! claimdesk ask                              # chat on stdin, one thread
//! ```
//!
//! # Debug Commands
//!
//! ```bash
//! claimdesk segment report.txt --kind claims   # Split a saved report
//! claimdesk slots                               # Show document layouts
//! claimdesk health                              # Ping the backend
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use claimdesk::{
    analyze_workshops, ask_policy, report_is_incomplete, segment_claims_report, segment_workshop_report,
    stages::interval_ticks, submit_claim, ClaimResult, ClaimsBackend, ClaimsClient, CliResult, ClientError,
    ClientConfig, ConversationId, DocumentSet, FileError, FileHandle, LocalFile, PolicyAnswer, SlotError,
    SlotKind, StageProgress, STAGE_INTERVAL,
};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "claimdesk")]
#[command(about = "Submit motor insurance claims and query the claims backend", long_about = None)]
struct Cli {
    /// Backend base URL (overrides CLAIMDESK_BACKEND_URL)
    #[arg(short, long, global = true)]
    backend: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a claim and show the analysis
    Claim(ClaimArgs),

    /// Compare three workshop quotations
    Workshop {
        /// First workshop quotation
        workshop1: PathBuf,
        /// Second workshop quotation
        workshop2: PathBuf,
        /// Third workshop quotation
        workshop3: PathBuf,
    },

    /// Ask a policy question (reads questions from stdin if none given)
    Ask {
        /// The question
        question: Option<String>,

        /// Continue an existing conversation
        #[arg(short, long)]
        thread: Option<String>,
    },

    /// Split a saved report into sections
    Segment {
        /// Report text file
        input: PathBuf,

        /// Report layout
        #[arg(short, long, value_enum, default_value = "claims")]
        kind: ReportKind,
    },

    /// Show the document slots of each upload surface
    Slots,

    /// Check the backend is reachable
    Health,
}

#[derive(Args)]
struct ClaimArgs {
    /// Emirates ID (front and back)
    #[arg(long)]
    emirates_id: Option<PathBuf>,

    /// Driving license
    #[arg(long)]
    driving_license: Option<PathBuf>,

    /// Vehicle registration (Mulkiya)
    #[arg(long)]
    vehicle_registry: Option<PathBuf>,

    /// Completed claim form
    #[arg(long)]
    claim_form: Option<PathBuf>,

    /// Photo of the damage (repeat up to 5 times)
    #[arg(long = "damaged-photo")]
    damaged_photos: Vec<PathBuf>,

    /// Police report, if there is one
    #[arg(long)]
    police_report: Option<PathBuf>,

    /// Print the raw result as JSON instead of the formatted view
    #[arg(long)]
    json: bool,

    /// Skip the stage animation
    #[arg(long)]
    no_stages: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ReportKind {
    Claims,
    Workshop,
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Claim(args) => cmd_claim(cli.backend, args).await,

        Commands::Workshop {
            workshop1,
            workshop2,
            workshop3,
        } => cmd_workshop(cli.backend, [workshop1, workshop2, workshop3]).await,

        Commands::Ask { question, thread } => cmd_ask(cli.backend, question, thread).await,

        Commands::Segment { input, kind } => cmd_segment(&input, kind),

        Commands::Slots => cmd_slots(),

        Commands::Health => cmd_health(cli.backend).await,
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

/// Human-readable logs on stderr, filtered by `RUST_LOG`.
fn init_tracing() {
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "claimdesk=warn".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn client(backend: Option<String>) -> CliResult<ClaimsClient> {
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = backend {
        config.backend_url = ClientConfig::with_backend(url).backend_url;
    }
    log::debug!("backend: {}", config.backend_url);
    Ok(ClaimsClient::new(config)?)
}

/// Load `paths` into `slot_id`, skipping files the slot does not accept.
fn load_slot(documents: &mut DocumentSet<LocalFile>, slot_id: &str, paths: &[PathBuf]) -> CliResult<()> {
    let slot = documents
        .slot(slot_id)
        .ok_or_else(|| SlotError::UnknownSlot(slot_id.to_string()))?;
    let accept = slot.accept();
    let capacity = slot.capacity();

    let mut files = Vec::new();
    for path in paths {
        match LocalFile::load_accepted(path, accept) {
            Ok(file) => {
                log::info!("{}: {} ({} bytes)", slot_id, file.name(), file.size());
                files.push(file)
            }
            Err(e @ FileError::NotAccepted { .. }) => log::warn!("skipping {}: {}", path.display(), e),
            Err(e) => return Err(e.into()),
        }
    }

    let offered = files.len();
    let held = documents.add_files(slot_id, files)?;
    if offered > capacity {
        log::warn!("{}: {} file(s) given, kept the first {}", slot_id, offered, held);
    }
    Ok(())
}

// =============================================================================
// Claim
// =============================================================================

async fn cmd_claim(backend: Option<String>, args: ClaimArgs) -> CliResult<()> {
    let mut documents = DocumentSet::<LocalFile>::claim();
    let slots: [(&str, Vec<PathBuf>); 6] = [
        ("emirates_id", args.emirates_id.into_iter().collect()),
        ("driving_license", args.driving_license.into_iter().collect()),
        ("vehicle_registry", args.vehicle_registry.into_iter().collect()),
        ("claim_form", args.claim_form.into_iter().collect()),
        ("damaged_photos", args.damaged_photos),
        ("police_report", args.police_report.into_iter().collect()),
    ];
    for (slot_id, paths) in &slots {
        load_slot(&mut documents, slot_id, paths)?;
    }

    if !documents.is_ready() {
        eprintln!("📋 Missing: {}", missing_slots(&documents).join(", "));
        return Err(ClientError::NotReady {
            remaining: documents.remaining_required_count(),
        }
        .into());
    }

    let client = client(backend)?;
    eprintln!("📄 Submitting claim ({} files) to {}", documents.file_count(), client.config().backend_url);

    let result = if args.no_stages {
        submit_claim(&client, &documents).await
    } else {
        let (result, _) = claimdesk::present(
            submit_claim(&client, &documents),
            StageProgress::claim(),
            || interval_ticks(STAGE_INTERVAL),
            |p| {
                let marker = if p.is_complete() { "✅" } else { "⏳" };
                eprintln!("   {} [{}/{}] {}", marker, p.stage() + 1, p.labels().len(), p.label());
            },
        )
        .await;
        result
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_claim(&result);
    }
    Ok(())
}

fn missing_slots(documents: &DocumentSet<LocalFile>) -> Vec<String> {
    documents
        .slots()
        .iter()
        .filter(|s| s.required() && !s.uploaded())
        .map(|s| format!("--{}", s.id().replace('_', "-")))
        .collect()
}

fn print_claim(result: &ClaimResult) {
    let analysis = result.analysis();

    if result.is_success() {
        println!("\n✅ Claim processed");
    } else {
        println!("\n❌ Claim status: {}", result.status);
    }

    println!("\n## Executive Summary\n{}", analysis.executive_summary());
    println!("\nEstimated claim:   {}", analysis.estimated_claim());
    println!("Policy suggestion: {}", analysis.policy_suggestion());

    print_pairs("Policy Details", &analysis.policy_details());
    print_pairs("Claim Details", &analysis.claim_details());

    if let Some(table) = result.table() {
        println!("\n## Details");
        println!("{}", table.columns.join(" | "));
        for row in &table.rows {
            println!("{}", row.join(" | "));
        }
    }

    if let Some(report) = result.report() {
        if report_is_incomplete(report) {
            println!("\n⚠️  Some values could not be read from the documents. Check them before relying on this report.");
        }
        for section in segment_claims_report(report) {
            println!("\n### {}\n{}", section.heading, section.body);
        }
    }

    if !result.next_steps.is_empty() {
        println!("\n## Next Steps");
        for (i, step) in result.next_steps.iter().enumerate() {
            println!("{}. {}", i + 1, step);
        }
    }
}

fn print_pairs(title: &str, pairs: &[(String, String)]) {
    if pairs.is_empty() {
        return;
    }
    println!("\n## {}", title);
    for (label, value) in pairs {
        println!("  {}: {}", label, value);
    }
}

// =============================================================================
// Workshop
// =============================================================================

async fn cmd_workshop(backend: Option<String>, paths: [PathBuf; 3]) -> CliResult<()> {
    let mut documents = DocumentSet::<LocalFile>::workshop();
    for (slot_id, path) in ["workshop1", "workshop2", "workshop3"].into_iter().zip(paths) {
        load_slot(&mut documents, slot_id, &[path])?;
    }

    let client = client(backend)?;
    eprintln!("🔧 Analyzing {} workshop quotations...", documents.file_count());

    let response = analyze_workshops(&client, &documents).await?;
    let report = segment_workshop_report(response.workshop_report.as_deref().unwrap_or_default());

    for card in &report.workshops {
        println!("\n## {}\n{}", card.heading, card.body);
    }
    if let Some(comparison) = &report.comparison {
        println!("\n## Comparison\n{}", comparison);
    }
    if let Some(suggestion) = &report.suggestion {
        println!("\n## Suggested Workshop\n{}", suggestion);
    }
    if report.is_empty() {
        // Nothing matched the expected headings; show the text as-is.
        println!("{}", response.workshop_report.unwrap_or_default());
    }
    Ok(())
}

// =============================================================================
// Policy Q&A
// =============================================================================

async fn cmd_ask(backend: Option<String>, question: Option<String>, thread: Option<String>) -> CliResult<()> {
    let client = client(backend)?;
    let conversation = thread.map(ConversationId::from).unwrap_or_default();
    eprintln!("💬 Conversation: {}", conversation);

    if let Some(question) = question {
        let answer = ask_policy(&client, &question, &conversation).await?;
        print_answer(&answer);
        return Ok(());
    }

    let stdin = std::io::stdin();
    loop {
        eprint!("> ");
        std::io::stderr().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        let answer = ask_policy(&client, &line, &conversation).await?;
        print_answer(&answer);
    }
    Ok(())
}

fn print_answer(answer: &PolicyAnswer) {
    println!("\n{}\n", answer.answer);
    if let Some(debug) = &answer.debug_info {
        eprintln!(
            "   confidence: {}  evidence: {}  iterations: {}",
            debug.confidence_label(),
            debug.evidence_count.map(|n| n.to_string()).unwrap_or_else(|| "-".into()),
            debug.iterations.map(|n| n.to_string()).unwrap_or_else(|| "-".into()),
        );
        for doc in &debug.evidence_docs {
            eprintln!("   📎 {}", doc.citation());
        }
    }
}

// =============================================================================
// Debug commands
// =============================================================================

fn cmd_segment(input: &Path, kind: ReportKind) -> CliResult<()> {
    let text = std::fs::read_to_string(input)?;

    match kind {
        ReportKind::Claims => {
            let sections = segment_claims_report(&text);
            eprintln!("✂️  {} section(s)", sections.len());
            for section in sections {
                println!("[{}]\n{}\n", section.heading, section.body);
            }
            if report_is_incomplete(&text) {
                eprintln!("⚠️  Report contains unknown or insufficient values");
            }
        }
        ReportKind::Workshop => {
            let report = segment_workshop_report(&text);
            eprintln!("✂️  {} workshop card(s)", report.workshops.len());
            for card in &report.workshops {
                println!("[{}]\n{}\n", card.heading, card.body);
            }
            println!("[comparison]\n{}\n", report.comparison.as_deref().unwrap_or("-"));
            println!("[suggestion]\n{}", report.suggestion.as_deref().unwrap_or("-"));
        }
    }
    Ok(())
}

fn cmd_slots() -> CliResult<()> {
    for (title, documents) in [
        ("Claim documents", DocumentSet::<LocalFile>::claim()),
        ("Workshop quotations", DocumentSet::<LocalFile>::workshop()),
    ] {
        println!("\n📋 {}", title);
        for slot in documents.slots() {
            let kind = match slot.kind() {
                SlotKind::Single => "1 file".to_string(),
                SlotKind::Multi { max } => format!("up to {} files", max),
            };
            println!(
                "  {:<18} {:<30} {:<10} {:<14} {}",
                slot.id(),
                slot.name(),
                if slot.required() { "required" } else { "optional" },
                kind,
                slot.accept().accept_attr(),
            );
        }
    }
    Ok(())
}

async fn cmd_health(backend: Option<String>) -> CliResult<()> {
    let client = client(backend)?;
    let url = client.config().backend_url.clone();
    let health = client.health().await?;
    println!("✅ {} is {}", url, health.status);
    Ok(())
}
