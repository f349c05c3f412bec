//! Command-line interface definition using clap.

use clap::Parser;

/// Turn a ChatGPT conversations.json export into usage statistics and
/// AI-generated insights.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatwrapped")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatwrapped conversations.json
    chatwrapped conversations.json --no-insights
    chatwrapped conversations.json --records records.jsonl
    chatwrapped conversations.json -o portrait.png

ENVIRONMENT:
    GEMINI_API_KEY   enables the AI summary (optional)
    HF_API_TOKEN     enables portrait generation (optional)
    REQUEST_LIMIT    request-count ceiling (default 500)")]
pub struct Args {
    /// Path to the exported conversations.json file
    pub input: String,

    /// Skip the AI insights stage even when credentials are set
    #[arg(long)]
    pub no_insights: bool,

    /// Where to save the generated portrait
    #[arg(short = 'o', long, value_name = "PATH", default_value = "portrait.png")]
    pub image_output: String,

    /// Also dump the normalized records as JSONL to this path
    #[arg(long, value_name = "PATH")]
    pub records: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_args() {
        let args = Args::parse_from(["chatwrapped", "conversations.json"]);
        assert_eq!(args.input, "conversations.json");
        assert!(!args.no_insights);
        assert_eq!(args.image_output, "portrait.png");
        assert!(args.records.is_none());
    }

    #[test]
    fn test_all_flags() {
        let args = Args::parse_from([
            "chatwrapped",
            "export.json",
            "--no-insights",
            "-o",
            "me.png",
            "--records",
            "out.jsonl",
        ]);
        assert!(args.no_insights);
        assert_eq!(args.image_output, "me.png");
        assert_eq!(args.records.as_deref(), Some("out.jsonl"));
    }
}
