//! CLI entry-point for fetching lexicon packs.

use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

use anyhow::{anyhow, Context, Result};
use clap::Args as ClapArgs;
use futures::stream::{self, StreamExt};
use reqwest::Client;
use tracing::{info, instrument, warn};
use zip::ZipArchive;

use crate::config::Settings;

/// Args for the `fetch` sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Comma separated pack names, resolved against the configured base URL.
    #[arg(long, value_delimiter = ',', default_value = "english-base,chinese-base")]
    pub packs: Vec<String>,
    /// Full archive URL overriding the base URL (first pack name only).
    #[arg(long)]
    pub url: Option<String>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let client = Client::builder()
        .user_agent("bilingual-ner/0.1")
        .gzip(true)
        .build()?;

    if let Some(url) = &args.url {
        let name = args.packs.first().map(String::as_str).unwrap_or("custom");
        fetch_pack(&client, name, url, &settings).await?;
        return Ok(());
    }

    let base = settings.lexicon_base_url.trim_end_matches('/').to_string();
    let concurrency = 2usize;
    stream::iter(args.packs.clone())
        .map(|pack| {
            let client = client.clone();
            let settings = settings.clone();
            let base = base.clone();
            async move {
                let url = format!("{base}/{pack}.zip");
                fetch_pack(&client, &pack, &url, &settings)
                    .await
                    .with_context(|| format!("fetch lexicon pack {pack}"))
            }
        })
        .buffer_unordered(concurrency)
        .collect::<Vec<_>>()
        .await
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(())
}

async fn fetch_pack(client: &Client, name: &str, url: &str, settings: &Settings) -> Result<()> {
    let archive_path = settings.join_lexicon(format!("{name}.zip"));
    if archive_path.exists() {
        info!(%name, "using cached lexicon archive");
    } else {
        info!(%url, "downloading lexicon pack");
        let resp = client.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(anyhow!("pack {name} not available ({})", resp.status()));
        }
        let bytes = resp.bytes().await?;
        let mut file =
            File::create(&archive_path).with_context(|| format!("create {archive_path:?}"))?;
        file.write_all(&bytes)?;
        info!(size = bytes.len(), "downloaded lexicon archive");
    }

    let extracted = extract_pack(&archive_path, &settings.lexicon_dir)?;
    info!(%name, files = extracted, "lexicon pack ready");
    Ok(())
}

/// Unpack every `.tsv` entry of `archive_path` into `dest` (flattened to the
/// bare file name, so hostile paths inside an archive go nowhere), returning
/// the number of files written.
pub fn extract_pack(archive_path: &Path, dest: &Path) -> Result<usize> {
    let file =
        File::open(archive_path).with_context(|| format!("open archive {archive_path:?}"))?;
    let mut archive = ZipArchive::new(file)?;

    let mut extracted = 0usize;
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let name = entry.name().to_string();
        if name.contains("__MACOSX") || !name.to_ascii_lowercase().ends_with(".tsv") {
            continue;
        }
        let Some(file_name) = Path::new(&name)
            .file_name()
            .and_then(|s| s.to_str())
            .map(str::to_string)
        else {
            warn!(%name, "skipping archive entry without a file name");
            continue;
        };
        let mut contents = String::new();
        entry.read_to_string(&mut contents)?;
        let out_path = dest.join(&file_name);
        std::fs::write(&out_path, contents)
            .with_context(|| format!("write lexicon {out_path:?}"))?;
        info!(file = %file_name, "extracted lexicon");
        extracted += 1;
    }
    Ok(extracted)
}
