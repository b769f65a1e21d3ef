//! Entry point for the netdash TUI. Parses args, resolves the backend, and runs the App.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::info;

use netdash::app::App;
use netdash::logging;
use netdash::profiles::{
    load_profiles, save_decision, save_profiles, ProfileEntry, ProfileRequest, ResolveProfile,
    SaveDecision, PROFILES_VERSION,
};
use netdash::{ApiClient, DEFAULT_BASE_URL};

#[derive(Parser, Debug)]
#[command(name = "netdash")]
#[command(about = "Network device status dashboard for the terminal")]
#[command(version)]
struct Args {
    /// Backend base URL, e.g. http://localhost:5000
    base_url: Option<String>,

    /// Named profile to load, or to create/update when BASE_URL is given
    #[arg(short = 'P', long, value_name = "NAME")]
    profile: Option<String>,

    /// Username to pre-fill on the login screen (stored with the profile)
    #[arg(short, long)]
    username: Option<String>,

    /// Overwrite an existing profile without asking
    #[arg(long)]
    save: bool,

    /// Log file (default: <data dir>/netdash/netdash.log); filter with NETDASH_LOG
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Resolve the backend and persist profile changes, print the URL, and exit
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_path = args.log_file.clone().unwrap_or_else(logging::default_log_path);
    logging::init(&log_path)?;
    tracing::debug!(?args, "parsed command line arguments");

    let (base_url, username) = resolve_backend(&args)?;

    // Validate the URL even on a dry run
    let api = ApiClient::new(&base_url).with_context(|| format!("backend '{base_url}'"))?;

    if args.dry_run {
        println!("{}", api.base_url());
        return Ok(());
    }

    info!(backend = %api.base_url(), "starting netdash");
    let mut app = App::new(Arc::new(api), base_url, username);
    app.run().await
}

/// Work out the backend URL and login username, saving the named profile when asked.
fn resolve_backend(args: &Args) -> anyhow::Result<(String, Option<String>)> {
    let mut profiles = load_profiles();
    let req = ProfileRequest {
        profile_name: args.profile.clone(),
        base_url: args.base_url.clone(),
    };

    match req.resolve(&profiles) {
        ResolveProfile::Direct(url) => {
            let Some(name) = args.profile.as_ref() else {
                return Ok((url, args.username.clone()));
            };
            let username = args
                .username
                .clone()
                .or_else(|| profiles.profiles.get(name).and_then(|e| e.username.clone()));
            let entry = ProfileEntry {
                base_url: url.clone(),
                username: username.clone(),
            };
            let persist = match save_decision(&profiles, name, &entry) {
                SaveDecision::Create => true,
                SaveDecision::Unchanged => false,
                SaveDecision::Changed => {
                    args.save || prompt_yes_no(&format!("Overwrite existing profile '{name}'? [y/N]: "))
                }
            };
            if persist {
                profiles.profiles.insert(name.clone(), entry);
                profiles.version = PROFILES_VERSION;
                save_profiles(&profiles).context("saving profiles")?;
                info!(profile = %name, "profile saved");
            }
            Ok((url, username))
        }
        ResolveProfile::Loaded(entry) => {
            Ok((entry.base_url, args.username.clone().or(entry.username)))
        }
        ResolveProfile::Missing(name) => {
            bail!("profile '{name}' does not exist; pass a BASE_URL to create it")
        }
        ResolveProfile::Default => Ok((DEFAULT_BASE_URL.to_string(), args.username.clone())),
    }
}

fn prompt_yes_no(prompt: &str) -> bool {
    eprint!("{prompt}");
    let _ = io::stderr().flush();
    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_ok() {
        matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}
