//! Command-line front-end for the structured code surgery engine.
//!
//! Sub-commands:
//! - `detect`  — report the detected language of a file or stdin;
//! - `extract` — print the element tree (or one element) as JSON;
//! - `patch`   — upsert or remove the element an XPath addresses.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use scalpel_engine::model::language::LanguageKind;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[clap(name = "code-scalpel", version, about = "Structured code surgery")]
struct Opts {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Detect the language of a source file (or stdin with `-`).
    Detect {
        /// Source file path, or `-` for stdin.
        file: PathBuf,
    },
    /// Extract the element tree as JSON.
    Extract {
        /// Source file path, or `-` for stdin.
        file: PathBuf,
        /// Print only the element this XPath addresses.
        #[clap(long)]
        xpath: Option<String>,
        /// Print the element's content hash instead of its body.
        #[clap(long, requires = "xpath")]
        hash: bool,
        /// Override language detection (`python`, `typescript`).
        #[clap(long)]
        language: Option<String>,
    },
    /// Upsert or remove an element addressed by XPath.
    Patch {
        /// Source file path, or `-` for stdin.
        file: PathBuf,
        /// Target element, e.g. `MyClass.my_method`.
        #[clap(long)]
        xpath: String,
        /// File holding the replacement code (`-` for stdin).
        #[clap(long, conflicts_with = "delete")]
        code_file: Option<PathBuf>,
        /// Remove the element instead of replacing it.
        #[clap(long)]
        delete: bool,
        /// Write the result back instead of printing it.
        #[clap(long, short = 'w')]
        write: bool,
        /// Override language detection (`python`, `typescript`).
        #[clap(long)]
        language: Option<String>,
    },
}

fn read_source(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("read stdin")?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
    }
}

fn resolve_language(path: &Path, flag: Option<&str>, code: &str) -> Result<LanguageKind> {
    if let Some(tag) = flag {
        return tag
            .parse()
            .map_err(|_| anyhow::anyhow!("unsupported language: {tag}"));
    }
    if path.as_os_str() != "-" {
        if let Ok(lang) = scalpel_engine::language_for_file(path) {
            return Ok(lang);
        }
    }
    scalpel_engine::detect_language(code).context("could not detect language")
}

fn main() -> Result<()> {
    // Load environment variables from .env when present.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();
    match opts.command {
        Command::Detect { file } => {
            let code = read_source(&file)?;
            match scalpel_engine::detect_language(&code) {
                Some(lang) => println!("{lang}"),
                None => bail!("could not detect language"),
            }
        }
        Command::Extract {
            file,
            xpath,
            hash,
            language,
        } => {
            let code = read_source(&file)?;
            let lang = resolve_language(&file, language.as_deref(), &code)?;
            debug!(%lang, "extracting");
            match xpath {
                Some(xpath) if hash => {
                    match scalpel_engine::get_element_hash(&code, &xpath, Some(lang))? {
                        Some(hash) => println!("{hash}"),
                        None => bail!("no element at xpath: {xpath}"),
                    }
                }
                Some(xpath) => {
                    match scalpel_engine::get_text_by_xpath(&code, &xpath, Some(lang))? {
                        Some(text) => print!("{text}"),
                        None => bail!("no element at xpath: {xpath}"),
                    }
                }
                None => {
                    // A recognized path selects the dialect grammar as well.
                    let by_path = file.as_os_str() != "-"
                        && language.is_none()
                        && scalpel_engine::language_for_file(&file).is_ok();
                    let tree = if by_path {
                        scalpel_engine::extract_file(&file, &code)?
                    } else {
                        scalpel_engine::extract(&code, Some(lang))?
                    };
                    println!("{}", serde_json::to_string_pretty(&tree)?);
                }
            }
        }
        Command::Patch {
            file,
            xpath,
            code_file,
            delete,
            write,
            language,
        } => {
            let code = read_source(&file)?;
            let lang = resolve_language(&file, language.as_deref(), &code)?;
            let patched = if delete {
                scalpel_engine::remove_element_by_xpath(&code, &xpath, Some(lang))?
            } else {
                let source = code_file.context("--code-file is required unless --delete")?;
                let new_code = read_source(&source)?;
                scalpel_engine::upsert_element_by_xpath(&code, &xpath, &new_code, Some(lang))?
            };
            if patched == code {
                eprintln!("no changes");
            }
            if write && file.as_os_str() != "-" {
                std::fs::write(&file, &patched)
                    .with_context(|| format!("write {}", file.display()))?;
            } else {
                print!("{patched}");
            }
        }
    }
    Ok(())
}
