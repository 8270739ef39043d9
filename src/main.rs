mod cli;

use scenename::{config, Codec};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "scenename=trace,scenename_core=trace,scenename_naming=trace,scenename_parsing=trace"
                .to_string()
        } else {
            "scenename=info,scenename_naming=warn,scenename_parsing=warn".to_string()
        }
    });

    // Logs go to stderr so parse output can be piped.
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Parse { text, json } => parse_name(&text, json, cli.config.as_deref()),
        Commands::Rename { texts } => rename(&texts, cli.config.as_deref()),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("scenename {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn load_codec(config_path: Option<&Path>) -> Result<Codec> {
    let config = config::load_config_or_default(config_path)?;
    Codec::new(&config).context("Failed to build codec from configuration")
}

fn parse_name(text: &str, json: bool, config_path: Option<&Path>) -> Result<()> {
    let codec = load_codec(config_path)?;
    let entity = codec
        .decode(text)
        .with_context(|| format!("Failed to parse {:?}", text))?;

    if json {
        let json_str = serde_json::to_string_pretty(&entity)?;
        println!("{}", json_str);
    } else {
        println!("Kind: {}", entity.kind());
        match codec.encode(&entity) {
            Ok(name) => println!("Canonical: {}", name),
            Err(e) => tracing::warn!("Could not name parsed entity: {}", e),
        }
        println!("{:#?}", entity);
    }

    Ok(())
}

fn rename(texts: &[String], config_path: Option<&Path>) -> Result<()> {
    let codec = load_codec(config_path)?;
    let mut failed = 0;

    for text in texts {
        match codec.rename(text) {
            Ok(name) => println!("{}", name),
            Err(e) => {
                eprintln!("{}: {}", text, e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} names could not be renamed", failed, texts.len());
    }
    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, using defaults");
            config::Config::default()
        }
    };

    Codec::new(&config).context("Configuration does not produce a working codec")?;

    println!(
        "  Separators: default {:?}, release {:?}, range {:?}, addition {:?}",
        config.naming.default_separator,
        config.naming.release_separator,
        config.naming.range_separator,
        config.naming.addition_separator
    );
    println!("  Number width: {}", config.naming.number_width);
    println!("  Date format: {}", config.naming.date_format);
    println!("  Extra tags: {}", config.parsing.extra_tags.len());
    println!("  Extra languages: {}", config.parsing.extra_languages.len());

    Ok(())
}
