// Score Text
// Command-line scorer for a single text or headline, printing the JSON result

use falsify_lib::models::ContentSample;
use falsify_lib::services::noise::noise_for;
use falsify_lib::services::text_processor::{count_words, preview};
use falsify_lib::services::{ContentScorer, HeadlineScorer};
use serde_json::{json, Value};

fn parse_arg_value(args: &[String], key: &str) -> Option<String> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn has_flag(args: &[String], key: &str) -> bool {
    args.iter().any(|a| a == key)
}

fn main() -> Result<(), String> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args[1].starts_with("--") {
        eprintln!(
            "Usage:\n  score_text <text> [--title <t>] [--headline] [--jitter] [--out <json_path>]\n\nNotes:\n  - Scores are deterministic unless --jitter is given.\n  - --headline scores <text> as a single headline and ignores --title."
        );
        return Ok(());
    }

    let text = args[1].clone();
    let title = parse_arg_value(&args, "--title");
    let out_path = parse_arg_value(&args, "--out");
    let noise = noise_for(has_flag(&args, "--jitter"));

    let output: Value = if has_flag(&args, "--headline") {
        let result = HeadlineScorer::new(noise).analyze(&text);
        json!({ "headline": text, "analysis": result })
    } else {
        let sample = ContentSample::new(title.as_deref(), &text);
        let combined = sample.combined_text();
        let result = ContentScorer::new(noise).score_sample(&sample);
        json!({
            "input_text": preview(&combined, 200),
            "word_count": count_words(&combined),
            "analysis": result,
        })
    };

    let rendered = serde_json::to_string_pretty(&output).map_err(|e| e.to_string())?;
    println!("{}", rendered);

    if let Some(path) = out_path {
        std::fs::write(&path, &rendered).map_err(|e| format!("Failed to write {}: {}", path, e))?;
        eprintln!("Wrote {}", path);
    }

    Ok(())
}
