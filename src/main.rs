//! # chatwrapped CLI
//!
//! Command-line interface for the chatwrapped library.

use std::fs;
use std::io::Write;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use chatwrapped::cli::Args;
use chatwrapped::normalizer::{NormalizedExport, normalize};
use chatwrapped::stats::UsageStats;
use chatwrapped::{ChatwrappedError, Result};

fn main() {
    // operator-only channel: skip/parse diagnostics land on stderr,
    // controlled by RUST_LOG
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();

    println!("🤖 chatwrapped v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input: {}", args.input);
    println!();

    println!("⏳ Parsing conversations...");
    let parse_start = Instant::now();
    let raw = fs::read_to_string(&args.input)?;
    let raw: serde_json::Value = serde_json::from_str(&raw)?;
    let export = normalize(&raw)?;
    if export.is_empty() {
        return Err(ChatwrappedError::EmptyExport);
    }
    println!(
        "   Found {} messages in {} conversations ({:.2}s)",
        export.records.len(),
        export.conversation_count,
        parse_start.elapsed().as_secs_f64()
    );

    if let Some(path) = &args.records {
        write_records(&export, path)?;
        println!("💾 Records written to {}", path);
    }

    let stats = UsageStats::from_records(&export.records, export.conversation_count)?;
    print_stats(&stats);

    #[cfg(feature = "insights")]
    if !args.no_insights {
        run_insights(&args, &export, &stats);
    }

    println!();
    println!("✅ Done in {:.2}s", total_start.elapsed().as_secs_f64());
    Ok(())
}

fn print_stats(stats: &UsageStats) {
    println!();
    println!("📊 Quick Stats");
    println!("   Total requests:           {}", stats.total_user_messages);
    println!("   Total conversations:      {}", stats.total_conversations);
    println!("   Avg. requests / day:      {:.1}", stats.avg_requests_per_day);
    println!("   Avg. words / request:     {:.1}", stats.avg_words_per_request);
    println!("   Total words written:      {}", stats.total_words);
    println!("   Max requests in a day:    {}", stats.max_daily_requests);
    println!(
        "   Avg. conversation length: {:.1} user msgs",
        stats.avg_conversation_length
    );

    println!();
    println!("📈 Usage Patterns");
    println!("   Most active day: {}", stats.most_active_day);
    println!("   Peak hour:       {}:00", stats.peak_hour);
    println!("   Busiest month:   {}", stats.busiest_month);
    println!("   Weekend share:   {:.0}%", stats.weekend_share * 100.0);

    println!();
    println!("   Activity by day of week:");
    for (day, count) in &stats.weekday_counts {
        println!("     {:<9} {}", day, count);
    }
}

/// Dumps the normalized records as JSONL for inspection.
fn write_records(export: &NormalizedExport, path: &str) -> Result<()> {
    let mut file = std::io::BufWriter::new(fs::File::create(path)?);
    for rec in &export.records {
        serde_json::to_writer(&mut file, rec)?;
        file.write_all(b"\n")?;
    }
    file.flush()?;
    Ok(())
}

/// The optional enrichment stage. Nothing in here may fail the run: every
/// collaborator problem degrades to a fallback or an informational notice.
#[cfg(feature = "insights")]
fn run_insights(args: &Args, export: &NormalizedExport, stats: &UsageStats) {
    use chatwrapped::config::{RunConfig, RunContext};
    use chatwrapped::insights::{self, gemini::SummaryClient, image::ImageClient, prompt};
    use tracing::warn;

    println!();
    println!("🤖 AI-Powered Insights");

    let ctx = RunContext::new(RunConfig::from_env());
    let Some(api_key) = ctx.config.gemini_api_key.clone() else {
        println!("⚠️  GEMINI_API_KEY not set, skipping AI insights.");
        return;
    };

    println!("   Analyzing your chat history...");
    let insights = match SummaryClient::new(api_key) {
        Ok(client) => insights::generate(&client, &export.records, stats),
        Err(err) => {
            warn!(error = %err, "could not build summarization client");
            insights::local_insights(stats, &export.records)
        }
    };

    if !insights.summary.is_empty() {
        println!();
        println!("📝 Your ChatGPT Usage Profile");
        println!("   {}", insights.summary);
    }
    if !insights.topics.is_empty() {
        println!();
        println!("🔍 Your Main Discussion Topics");
        for topic in insights.topics.iter().take(10) {
            println!("   • {}", topic);
        }
    }

    // the portrait needs a summary to draw from
    if insights.summary.is_empty() {
        return;
    }
    match ctx.config.hf_api_token.clone() {
        None => println!("ℹ️  Set HF_API_TOKEN to enable portrait generation."),
        Some(token) => {
            println!();
            println!("🎨 Generating your portrait...");
            let result = ImageClient::new(token).and_then(|client| {
                client.generate(&prompt::image_prompt(&insights.summary, &insights.topics))
            });
            match result {
                Ok(bytes) => match fs::write(&args.image_output, &bytes) {
                    Ok(()) => println!("   Saved to {}", args.image_output),
                    Err(err) => {
                        warn!(error = %err, "could not save portrait");
                        println!("ℹ️  The portrait could not be saved.");
                    }
                },
                Err(err) => {
                    warn!(error = %err, "image generation failed");
                    println!("ℹ️  Image generation is temporarily unavailable.");
                }
            }
        }
    }
}
