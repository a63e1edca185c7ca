//! Strips `:contentReference[oaicite:N]{index=N}` citation artefacts from
//! every string of a JSON catalog file.

use anyhow::{bail, Context, Result};
use clap::Parser;
use regex::Regex;
use serde_json::Value;
use std::path::PathBuf;

const CITATION_PATTERN: &str = r":contentReference\[oaicite:\d+\]\{index=\d+\}";

#[derive(Parser, Debug)]
#[command(name = "clean-refs", version, about, long_about = None)]
struct Args {
    /// JSON file to clean
    input: PathBuf,
    /// Where to write the cleaned, pretty-printed JSON
    output: PathBuf,
}

fn clean_value(value: Value, pattern: &Regex) -> Value {
    match value {
        Value::String(s) => Value::String(pattern.replace_all(&s, "").into_owned()),
        Value::Array(values) => Value::Array(
            values
                .into_iter()
                .map(|v| clean_value(v, pattern))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, clean_value(v, pattern)))
                .collect(),
        ),
        other => other,
    }
}

fn clean_text(text: &str, pattern: &Regex) -> Result<String> {
    let value: Value = serde_json::from_str(text).context("input is not valid JSON")?;
    Ok(serde_json::to_string_pretty(&clean_value(value, pattern))?)
}

fn main() -> Result<()> {
    let args = Args::parse();
    if !args.input.is_file() {
        bail!("{} does not exist or is not a file", args.input.display());
    }

    let pattern = Regex::new(CITATION_PATTERN)?;
    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let cleaned = clean_text(&text, &pattern)?;
    std::fs::write(&args.output, cleaned)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    println!("Cleaned JSON written to {}", args.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pattern() -> Regex {
        Regex::new(CITATION_PATTERN).unwrap()
    }

    #[test]
    fn test_strips_nested_citations() {
        let dirty = json!([
            {
                "name": "Rex:contentReference[oaicite:12]{index=12}",
                "notes": ["Feed meat:contentReference[oaicite:3]{index=3} only"],
                "level": 150,
                "tame": {"kibble": "Exceptional:contentReference[oaicite:0]{index=0}"}
            }
        ]);
        let clean = clean_value(dirty, &pattern());
        assert_eq!(
            clean,
            json!([
                {
                    "name": "Rex",
                    "notes": ["Feed meat only"],
                    "level": 150,
                    "tame": {"kibble": "Exceptional"}
                }
            ])
        );
    }

    #[test]
    fn test_leaves_lookalikes() {
        let text = r#"{"a": ":contentReference[oaicite:x]{index=1}", "b": "oaicite:1"}"#;
        let cleaned = clean_text(text, &pattern()).unwrap();
        let value: Value = serde_json::from_str(&cleaned).unwrap();
        assert_eq!(value["a"], ":contentReference[oaicite:x]{index=1}");
        assert_eq!(value["b"], "oaicite:1");
    }

    #[test]
    fn test_output_is_pretty_and_keeps_unicode() {
        let cleaned = clean_text(r#"{"name":"Ptéranodon"}"#, &pattern()).unwrap();
        assert_eq!(cleaned, "{\n  \"name\": \"Ptéranodon\"\n}");
    }

    #[test]
    fn test_keeps_key_order() {
        let text = r#"{"name":"Rex:contentReference[oaicite:1]{index=1}","class":"Rex_Character_BP_C","a":1}"#;
        let cleaned = clean_text(text, &pattern()).unwrap();
        assert_eq!(
            cleaned,
            "{\n  \"name\": \"Rex\",\n  \"class\": \"Rex_Character_BP_C\",\n  \"a\": 1\n}"
        );
    }

    #[test]
    fn test_rejects_invalid_json() {
        assert!(clean_text("{broken", &pattern()).is_err());
    }

    #[test]
    fn test_writes_cleaned_file() -> Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let input = temp_dir.path().join("in.json");
        std::fs::write(&input, r#"["x:contentReference[oaicite:1]{index=1}"]"#)?;
        let cleaned = clean_text(&std::fs::read_to_string(&input)?, &pattern())?;
        assert_eq!(cleaned, "[\n  \"x\"\n]");
        Ok(())
    }
}
