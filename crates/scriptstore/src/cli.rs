use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::info;
use serde_json::Value;

use scriptstore_core::kernel::constants::DEFAULT_PATH_SEPARATOR;
use scriptstore_core::storage::json;
use scriptstore_core::value::to_script;
use scriptstore_core::{HostValue, Result, ScriptValue, StorageManager, StorageSettings};

/// Scriptstore: inspect and edit script storage files
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Directory the storage file is resolved under
    #[arg(long, default_value = ".")]
    pub data_dir: PathBuf,

    /// Separator splitting hierarchical keys
    #[arg(long, default_value_t = DEFAULT_PATH_SEPARATOR)]
    pub separator: char,

    /// Write flat-object files on one line
    #[arg(long)]
    pub compact: bool,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Storage file relative to the data directory (.json, .yml or .yaml)
    pub file: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the storage kind
    Type,
    /// Print whether a key is set
    Exists { key: String },
    /// Print the value at a key as JSON, or nil
    Get { key: String },
    /// Set a key and save
    Set {
        key: String,
        /// JSON literal, or plain text when it does not parse
        value: String,
    },
    /// Set a key only if it is not set yet; prints whether it wrote
    SetDefault { key: String, value: String },
    /// Remove a key and save; prints whether something was removed
    Clear { key: String },
    /// Print the whole document as JSON
    Dump,
}

/// Reads a command-line value the way a script literal would arrive.
pub fn parse_value(raw: &str) -> ScriptValue {
    match serde_json::from_str::<Value>(raw) {
        Ok(parsed) => to_script(&json::from_json(&parsed)),
        Err(_) => ScriptValue::from(raw),
    }
}

fn render(key: &str, value: &HostValue, pretty: bool) -> Result<String> {
    if value.is_null() {
        return Ok("nil".to_string());
    }
    let rendered = json::to_json(key, value)?;
    Ok(if pretty {
        format!("{:#}", rendered)
    } else {
        rendered.to_string()
    })
}

pub fn run(args: &CliArgs) -> Result<()> {
    let settings = StorageSettings {
        path_separator: args.separator,
        pretty_json: !args.compact,
    };
    let mut manager = StorageManager::new(&args.data_dir).with_settings(settings);
    let store = manager.storage_object(&args.file)?;
    info!("Opened {} storage '{}'", store.kind(), store.path().display());

    match &args.command {
        Command::Type => println!("{}", store.kind()),
        Command::Exists { key } => println!("{}", store.exists(key)),
        Command::Get { key } => println!("{}", render(key, &store.get_host(key), false)?),
        Command::Set { key, value } => {
            store.set(key, &parse_value(value))?;
            store.flush()?;
        }
        Command::SetDefault { key, value } => {
            let written = store.set_default(key, &parse_value(value))?;
            if written {
                store.flush()?;
            }
            println!("{}", written);
        }
        Command::Clear { key } => {
            let removed = store.clear(key);
            store.flush()?;
            println!("{}", removed);
        }
        Command::Dump => println!("{}", render("", &store.snapshot(), true)?),
    }
    Ok(())
}
