use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use media_maid::{
    catalog::Catalog,
    config::Config,
    confirm::{AutoConfirm, Gate, Prompt},
    parse::{Classified, FilenameParser, NameParser},
    plex::PlexClient,
    reconcile::movie_present,
    scan::{ScanOutcome, scan_tv_folder},
    skiplist,
};
use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Downloads directory to clean
    root: String,
    /// File listing folder names to never touch, one per line
    #[arg(long, default_value = "torrent_names.txt")]
    skip_list: String,
    /// Delete removable folders without prompting
    #[arg(short = 'y', long)]
    yes: bool,
    /// Evaluate and report every folder without deleting anything
    #[arg(long)]
    dry_run: bool,
}

/// Run the deletion gate for one removable folder. Faults are reported
/// and swallowed so the rest of the run keeps going.
fn maybe_remove<G: Gate>(config: &Config, gate: &G, folder_path: &Path, folder_name: &str) {
    if config.dry_run {
        println!("  {} would remove '{}'", "dry-run".cyan(), folder_name);
        return;
    }
    let confirmed = match gate.confirm(folder_name) {
        Ok(confirmed) => confirmed,
        Err(err) => {
            println!(
                "  {} confirmation failed ({}), keeping folder",
                "!".red(),
                err
            );
            return;
        }
    };
    if !confirmed {
        println!("  skipping removal");
        return;
    }
    match fs::remove_dir_all(folder_path) {
        Ok(()) => println!("  {} removed '{}'", "ok".green(), folder_name),
        Err(err) => println!(
            "  {} failed to remove '{}': {}",
            "!".red(),
            folder_name,
            err
        ),
    }
}

/// One pass over the downloads root: skip-list, classify, reconcile
/// against the catalog, then gate the removable folders. Strictly
/// sequential; one folder's trouble never blocks the next.
async fn sweep<P, C, G>(
    config: &Config,
    skip: &HashSet<String>,
    parser: &P,
    catalog: &C,
    gate: &G,
) -> Result<()>
where
    P: NameParser,
    C: Catalog,
    G: Gate,
{
    let mut entries = fs::read_dir(&config.downloads_root)?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let folder_name = entry.file_name().to_string_lossy().into_owned();
        let folder_path = entry.path();

        if skip.contains(&folder_name) {
            println!("{} '{}' is in the skip-list", "[skip]".cyan(), folder_name);
            continue;
        }

        match parser.classify(&folder_name) {
            Classified::Movie { title, year } => {
                match year {
                    Some(year) => {
                        println!("\n{} => movie '{}' ({})", folder_name.bold(), title, year)
                    }
                    None => println!("\n{} => movie '{}'", folder_name.bold(), title),
                }
                let present = match movie_present(catalog, &title, year).await {
                    Ok(present) => present,
                    Err(err) => {
                        println!("  {} catalog fault: {}", "!".red(), err);
                        false
                    }
                };
                if present {
                    println!("  found in catalog, safe to remove");
                    maybe_remove(config, gate, &folder_path, &folder_name);
                } else {
                    println!("  not in catalog, keeping folder");
                }
            }
            Classified::EpisodeCollection => {
                println!("\n{} => TV folder", folder_name.bold());
                match scan_tv_folder(parser, catalog, &folder_path).await {
                    Ok(ScanOutcome::Removable) => {
                        println!("  all episodes in catalog, safe to remove");
                        maybe_remove(config, gate, &folder_path, &folder_name);
                    }
                    Ok(ScanOutcome::Unparseable(_)) => {
                        println!("  keeping folder");
                    }
                    Ok(ScanOutcome::Missing(ids)) => {
                        println!("  missing from catalog: {}, keeping folder", ids.join(", "));
                    }
                    Err(err) => {
                        println!("  {} scan failed ({}), keeping folder", "!".red(), err);
                    }
                }
            }
            Classified::Unrecognized => {
                println!("{} could not classify '{}'", "[skip]".cyan(), folder_name);
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    let config = Config {
        downloads_root: PathBuf::from(&args.root),
        skip_list: PathBuf::from(&args.skip_list),
        assume_yes: args.yes,
        dry_run: args.dry_run,
    };
    config.validate()?;

    let skip = skiplist::load(&config.skip_list)?;
    if !skip.is_empty() {
        println!("Folders in the skip-list:");
        for name in &skip {
            println!("  - {}", name);
        }
        println!("------------------------------------------------");
    }

    let catalog = PlexClient::from_env()?;
    let parser = FilenameParser;

    if config.assume_yes || config.dry_run {
        sweep(&config, &skip, &parser, &catalog, &AutoConfirm).await
    } else {
        sweep(&config, &skip, &parser, &catalog, &Prompt).await
    }
}
