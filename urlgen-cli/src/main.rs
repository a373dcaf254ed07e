//! urlgen CLI
//!
//! Builds a relay subscription page in memory, types each value into its
//! field, lets the debounce timers run and prints what each display element
//! ends up showing.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use owo_colors::OwoColorize;
use urlgen_binder::{DeployConfig, HostSetting, Page, destination_id};
use urlgen_common::warning::clear_warnings;

/// urlgen — render relay subscription URLs the way the subscription page does
#[derive(Parser, Debug)]
#[command(name = "urlgen")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Follow the page origin (default https://localhost/)
    urlgen tag=#music

    # Pin the relay host
    urlgen --host https://relay.example tag=music instance=#mastodon.social

    # Use a deployment config and print JSON
    urlgen --config deploy.json --json tag='foo bar'
"#)]
struct Cli {
    /// Field assignments, e.g. `tag=#music`
    #[arg(value_name = "FIELD=VALUE", required = true)]
    assignments: Vec<String>,

    /// JSON deployment config
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Fixed `scheme://host` prefix (overrides the config)
    #[arg(long, value_name = "URL")]
    host: Option<String>,

    /// URL the page is served from, used when following the page origin
    #[arg(long, value_name = "URL", default_value = "https://localhost/")]
    page_url: String,

    /// Text shown for empty fields (overrides the config)
    #[arg(long)]
    placeholder: Option<String>,

    /// Debounce delay in milliseconds (overrides the config)
    #[arg(long, value_name = "MS")]
    debounce_ms: Option<u64>,

    /// Print a JSON object instead of colored lines
    #[arg(short, long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    clear_warnings();

    let config = load_config(&cli)?;
    let assignments = cli
        .assignments
        .iter()
        .map(String::as_str)
        .map(parse_assignment)
        .collect::<anyhow::Result<Vec<_>>>()?;

    let page = Page::new(&cli.page_url);
    let mut field_ids = config.field_ids();
    for &(field_id, _) in &assignments {
        if !field_ids.contains(&field_id) {
            field_ids.push(field_id);
        }
    }
    for field_id in &field_ids {
        if !page.insert_field_markup(field_id) {
            bail!("page has no body to hold field '{field_id}'");
        }
    }

    let binder = config.binder(page.location());
    let _ = page.bind_fields(&binder, field_ids.iter().copied());

    for (field_id, value) in &assignments {
        let _ = page.type_text(field_id, value);
    }
    let _ = page.timers().run_until_idle();

    let rendered: BTreeMap<&str, String> = assignments
        .iter()
        .map(|(field_id, _)| {
            let text = page
                .text_content(&destination_id(field_id))
                .unwrap_or_default();
            (*field_id, text)
        })
        .collect();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&rendered)?);
    } else {
        for (field_id, text) in &rendered {
            println!("{} → {}", field_id.cyan(), text.trim_end().green());
        }
    }

    Ok(())
}

/// Start from the config file (or the page-origin preset) and apply flags.
fn load_config(cli: &Cli) -> anyhow::Result<DeployConfig> {
    let mut config = match &cli.config {
        Some(path) => DeployConfig::from_file(path)?,
        None => DeployConfig::page_origin(),
    };
    if let Some(host) = &cli.host {
        config.host = HostSetting::Fixed(host.clone());
    }
    if let Some(placeholder) = &cli.placeholder {
        config.placeholder.clone_from(placeholder);
    }
    if let Some(debounce_ms) = cli.debounce_ms {
        config.debounce_ms = debounce_ms;
    }
    config.validate().context("invalid command-line overrides")?;
    Ok(config)
}

/// Split `field=value` at the first `=`.
fn parse_assignment(arg: &str) -> anyhow::Result<(&str, &str)> {
    match arg.split_once('=') {
        Some((field_id, value)) if !field_id.is_empty() => Ok((field_id, value)),
        _ => bail!("expected FIELD=VALUE, got '{arg}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment_splits_at_first_equals() {
        assert_eq!(parse_assignment("tag=a=b").unwrap(), ("tag", "a=b"));
        assert_eq!(parse_assignment("tag=").unwrap(), ("tag", ""));
    }

    #[test]
    fn test_parse_assignment_rejects_missing_field() {
        assert!(parse_assignment("=music").is_err());
        assert!(parse_assignment("music").is_err());
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from([
            "urlgen",
            "--host",
            "https://relay.example",
            "--placeholder",
            "-",
            "tag=music",
        ]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config.host, HostSetting::Fixed("https://relay.example".to_string()));
        assert_eq!(config.placeholder, "-");
    }

    #[test]
    fn test_cli_rejects_schemeless_host() {
        let cli = Cli::parse_from(["urlgen", "--host", "relay.example", "tag=music"]);
        assert!(load_config(&cli).is_err());
    }
}
