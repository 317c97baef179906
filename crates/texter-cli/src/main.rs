use anyhow::{Context, Result};
use std::{env, path::PathBuf, process};
use texter_engine::{AttrMap, Document, SelectionRange, io};

mod config;
use config::Config;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        usage(&args);
    }
    let path = PathBuf::from(&args[1]);
    let verb = args[2].as_str();

    let config = match Config::load() {
        Ok(Some(config)) => config,
        Ok(None) => Config::default(),
        Err(e) => {
            eprintln!("Error: failed to load config file: {e}");
            eprintln!("Fix or remove {}", Config::config_path().display());
            process::exit(1);
        }
    };

    let markup = io::load_markup(&path)?;
    let doc =
        Document::from_markup(&markup).with_context(|| format!("parsing {}", path.display()))?;

    match verb {
        "show" => {
            let output = serde_json::json!({
                "text": doc.text(),
                "formatting": doc.formatting(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        "apply" | "remove" => {
            if args.len() < 5 {
                usage(&args);
            }
            let tag = config.resolve(&args[3]);
            let range = parse_range(&args[4])?;
            let attrs = parse_attrs(&args[5..])?;

            let mut doc = doc;
            doc.apply_tag_at(&tag, range, &attrs, verb == "remove")?;
            let markup = doc.markup()?;
            io::save_markup(&path, &markup)?;
            println!("{markup}");
        }
        other => {
            eprintln!("Error: unknown command '{other}'");
            usage(&args);
        }
    }

    Ok(())
}

fn usage(args: &[String]) -> ! {
    let prog = args.first().map(String::as_str).unwrap_or("texter-cli");
    eprintln!("Usage: {prog} <file> show");
    eprintln!("       {prog} <file> apply <tag-or-action> <start..end> [attr=value ...]");
    eprintln!("       {prog} <file> remove <tag-or-action> <start..end>");
    eprintln!();
    eprintln!("Actions: bold, italic, underline, strike, link (see config file");
    eprintln!("at {} to add your own)", Config::config_path().display());
    process::exit(1);
}

/// Parses `start..end` into a selection range (character offsets).
fn parse_range(s: &str) -> Result<SelectionRange> {
    let (start, end) = s
        .split_once("..")
        .with_context(|| format!("range '{s}' is not of the form start..end"))?;
    let start = start
        .parse()
        .with_context(|| format!("range start '{start}' is not a number"))?;
    let end = end
        .parse()
        .with_context(|| format!("range end '{end}' is not a number"))?;
    Ok(SelectionRange::new(start, end))
}

/// Parses trailing `name=value` arguments into an attribute map.
fn parse_attrs(args: &[String]) -> Result<AttrMap> {
    let mut attrs = AttrMap::new();
    for arg in args {
        let (name, value) = arg
            .split_once('=')
            .with_context(|| format!("attribute '{arg}' is not of the form name=value"))?;
        attrs.insert(name.to_string(), value.to_string());
    }
    Ok(attrs)
}
