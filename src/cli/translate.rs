//! CLI `translate` command — one retrieval-augmented translation, printed as JSON.

use anyhow::Result;

use korpo::config::KorpoConfig;
use korpo::{Direction, TranslationRequest, Translator};

pub async fn translate(
    config: &KorpoConfig,
    text: &str,
    direction: Direction,
    context: Option<String>,
) -> Result<()> {
    let translator = Translator::from_config(config)?;

    let snapshot = config.resolved_snapshot_path();
    if snapshot.exists() {
        translator.load_examples(&snapshot).await?;
    } else {
        eprintln!(
            "No example snapshot at {}; translating without examples.",
            snapshot.display()
        );
    }

    let mut request = TranslationRequest::new(text, direction);
    if let Some(context) = context {
        request = request.with_context(context);
    }

    match translator.translate(&request).await {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        Err(e) => {
            let status = translator.status();
            println!("{}", serde_json::to_string_pretty(&status)?);
            Err(e.into())
        }
    }
}
