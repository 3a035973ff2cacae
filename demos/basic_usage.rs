//! Run the built-in logbook tasks against a real endpoint.
//!
//! ```bash
//! export STRUCTCALL_BASE_URL=https://api.openai.com/v1
//! export STRUCTCALL_MODEL=gpt-4o-mini
//! export OPENAI_API_KEY=sk-...
//! cargo run --example basic_usage
//! ```

use structcall::{BackendSettings, LogbookAssistant};

#[tokio::main]
async fn main() -> structcall::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "structcall=debug".into()),
        )
        .init();

    let base_url = std::env::var("STRUCTCALL_BASE_URL")
        .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
    let model = std::env::var("STRUCTCALL_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

    // API key resolution falls through to the keyring and OPENAI_API_KEY.
    let assistant = LogbookAssistant::builder()
        .http_backend(BackendSettings::new(base_url, model))?
        .build()?;

    let entry = "Today I traced a faulty patch cable in the server room, \
                 re-crimped both ends, and documented the fix in the network log.";

    let sentiment = assistant.analyze_sentiment(entry).await?;
    println!(
        "sentiment: {:?} (fallback: {:?})",
        sentiment.output.sentiment, sentiment.fallback
    );

    let skills = assistant.extract_skills(entry).await?;
    println!("skills: {:?}", skills.output.skills);

    let feedback = assistant
        .generate_feedback(entry, Some("Learn practical network maintenance."))
        .await?;
    println!(
        "supervisor comment: {} (technical depth {}/10)",
        feedback.output.supervisor_comment, feedback.output.technical_depth.score
    );

    let suggestion = assistant.suggest_next_entry(entry).await?;
    println!("tomorrow: {}", suggestion.output.suggestion);

    Ok(())
}
