use std::env;
use std::fs;
use std::path::PathBuf;

use searchmap_cli::{compile_file, parse_args, CompileArgs, USAGE};
use searchmap_core::config::{resolve_with_base, Config};

fn cli_args() -> CompileArgs {
    let mut args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}\n{USAGE}");
            std::process::exit(1);
        }
    };
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    args.source = resolve_with_base(&cwd, args.source.to_string_lossy());
    args
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli_args();
    let config = match &args.config_dir {
        Some(dir) => {
            let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
            Config::load_in(dir, &env_name)
        }
        None => Config::load(),
    }
    .map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;

    let mapping = compile_file(&config, &args.source)?;
    let json = if args.pretty {
        serde_json::to_string_pretty(&mapping)?
    } else {
        serde_json::to_string(&mapping)?
    };
    match args.out {
        Some(path) => {
            fs::write(&path, json)?;
            tracing::info!(out = %path.display(), "mapping written");
        }
        None => println!("{json}"),
    }
    Ok(())
}
