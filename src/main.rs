mod cli;

use trickplay::{
    bif::{BifParser, BifWriter, FrameImageSource},
    config,
    service::{thumbnail_url_for_second, BifService},
};

use anyhow::{Context, Result};
use bytes::Bytes;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;
use tokio_util::sync::CancellationToken;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| default_log_filter(cli.verbose).to_string());

    // Logs go to stderr so JSON and data URIs on stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Inspect { file, json } => inspect_file(&file, json),
        Commands::Extract {
            file,
            position,
            output,
        } => extract_frame(&file, position, output.as_deref()),
        Commands::Fetch { url } => fetch_bif(&url, cli.config.as_deref()),
        Commands::ThumbnailUrl { second, base_url } => {
            print_thumbnail_url(second, base_url, cli.config.as_deref())
        }
        Commands::Pack {
            output,
            images,
            interval,
        } => pack_images(&output, &images, interval),
        Commands::Version => {
            println!("trickplay {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn inspect_file(file: &Path, json: bool) -> Result<()> {
    let data = std::fs::read(file).with_context(|| format!("Failed to read {:?}", file))?;
    let index = BifParser::parse_index(&data)
        .with_context(|| format!("Not a readable BIF file: {:?}", file))?;

    if json {
        let value = serde_json::json!({
            "file": file,
            "size": data.len(),
            "header": index.header,
            "frames": index.frame_count(),
            "terminator_valid": index.terminator_valid,
            "offsets": index.offsets,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("File: {}", file.display());
    println!("Size: {} bytes", data.len());
    println!("Version: {}", index.header.version);
    println!("Frames: {}", index.frame_count());
    println!(
        "Timestamp multiplier: {} ms",
        index.header.timestamp_multiplier
    );
    if index.terminator_valid {
        println!("Terminator: ok");
    } else {
        println!("Terminator: marker missing, frames may be missing");
    }

    if index.frame_count() > 0 {
        println!("\n{:>6}  {:>12}  {:>10}  {:>8}", "frame", "position", "offset", "size");
        for (i, pair) in index.offsets.windows(2).enumerate() {
            println!(
                "{:>6}  {:>12}  {:>10}  {:>8}",
                i,
                format_position(pair[0].position_millis),
                pair[0].offset_bytes,
                pair[1].offset_bytes.saturating_sub(pair[0].offset_bytes)
            );
        }
    }

    Ok(())
}

fn extract_frame(file: &Path, position: u64, output: Option<&Path>) -> Result<()> {
    let data = std::fs::read(file).with_context(|| format!("Failed to read {:?}", file))?;
    let source = BifParser::parse(Bytes::from(data))
        .with_context(|| format!("Not a readable BIF file: {:?}", file))?;

    match output {
        Some(path) => {
            let image = source
                .image_data(position)
                .with_context(|| format!("No frame available at {} ms", position))?;
            std::fs::write(path, &image)
                .with_context(|| format!("Failed to write {:?}", path))?;
            println!("Wrote {} bytes to {}", image.len(), path.display());
        }
        None => {
            let uri = source
                .base64_image(position)
                .with_context(|| format!("No frame available at {} ms", position))?;
            println!("{}", uri);
        }
    }

    source.clear_cache();
    Ok(())
}

fn fetch_bif(url: &str, config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let service = BifService::new(&config.http);

    let rt = tokio::runtime::Runtime::new()?;
    let source = rt.block_on(async {
        let token = CancellationToken::new();
        let cancel = token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });

        service.fetch_cancellable(url, &token).await
    })?;

    let source = source.context("Downloaded file is not a readable BIF file")?;
    println!("URL: {}", url);
    println!("Frames: {}", source.frame_count());
    if let Some(last) = source.offsets().iter().rev().nth(1) {
        println!("Last frame at: {}", format_position(last.position_millis));
    }

    Ok(())
}

fn print_thumbnail_url(
    second: f64,
    base_url: Option<String>,
    config_path: Option<&Path>,
) -> Result<()> {
    let base_url = match base_url {
        Some(url) => url,
        None => config::load_config_or_default(config_path)?
            .thumbnails
            .base_url
            .unwrap_or_default(),
    };

    println!("{}", thumbnail_url_for_second(second, &base_url)?);
    Ok(())
}

fn pack_images(output: &Path, images: &[std::path::PathBuf], interval: u32) -> Result<()> {
    let mut writer = BifWriter::new();

    for (i, path) in images.iter().enumerate() {
        let data = std::fs::read(path).with_context(|| format!("Failed to read {:?}", path))?;
        let timestamp = u32::try_from(i)
            .ok()
            .and_then(|i| i.checked_mul(interval))
            .context("Frame timestamp does not fit in 32 bits")?;
        writer.push_frame(timestamp, data);
    }

    let data = writer.finish()?;
    std::fs::write(output, &data).with_context(|| format!("Failed to write {:?}", output))?;

    tracing::info!(frames = writer.len(), bytes = data.len(), "Wrote BIF file");
    println!("Wrote {} frames to {}", writer.len(), output.display());
    Ok(())
}

fn default_log_filter(verbose: bool) -> &'static str {
    if verbose {
        "trickplay=debug,trickplay_bif=debug,reqwest=debug"
    } else {
        "trickplay=info,trickplay_bif=info"
    }
}

/// Format milliseconds as `HH:MM:SS.mmm`.
fn format_position(millis: u64) -> String {
    if millis == u64::MAX {
        return "end".to_string();
    }
    let secs = millis / 1000;
    format!(
        "{:02}:{:02}:{:02}.{:03}",
        secs / 3600,
        (secs / 60) % 60,
        secs % 60,
        millis % 1000
    )
}
