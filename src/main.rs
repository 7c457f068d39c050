//! git-lens - browse a git repository's history from your browser
//!
//! # Usage
//! ```bash
//! git-lens /path/to/repository        # Start server
//! git-lens status                     # Check if running
//! git-lens kill                       # Stop running instance
//! ```

use std::fs;
use std::io::{Read, Write};
use std::path::PathBuf;

use axum::http::StatusCode;
use axum::{Json, Router};
use clap::{Parser, Subcommand};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use git_lens::git::GitRepository;
use git_lens::routes::{self, AppState};

/// git-lens - history, diff, blame and search over a git repository
#[derive(Parser)]
#[command(name = "git-lens")]
#[command(about = "A git history browsing and search backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the git repository to serve by default
    #[arg(value_name = "REPO_PATH")]
    repo_path: Option<String>,

    /// Port to run the server on
    #[arg(short, long, default_value = "3001")]
    port: u16,
}

#[derive(Subcommand)]
enum Commands {
    /// Check if git-lens is currently running
    Status,
    /// Stop the running git-lens instance
    Kill,
}

/// PID file info stored as JSON
#[derive(serde::Serialize, serde::Deserialize)]
struct PidInfo {
    pid: u32,
    repo_path: String,
    port: u16,
}

fn get_pid_file_path() -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push("git-lens.pid");
    path
}

fn read_pid_info() -> Option<PidInfo> {
    let path = get_pid_file_path();
    let mut file = fs::File::open(&path).ok()?;
    let mut contents = String::new();
    file.read_to_string(&mut contents).ok()?;
    serde_json::from_str(&contents).ok()
}

fn write_pid_info(info: &PidInfo) -> anyhow::Result<()> {
    let path = get_pid_file_path();
    let mut file = fs::File::create(&path)?;
    file.write_all(serde_json::to_string(info)?.as_bytes())?;
    Ok(())
}

fn remove_pid_file() {
    let _ = fs::remove_file(get_pid_file_path());
}

#[cfg(unix)]
fn is_process_running(pid: u32) -> bool {
    // On Unix, sending signal 0 checks if process exists
    unsafe { libc::kill(pid as i32, 0) == 0 }
}

#[cfg(windows)]
fn is_process_running(pid: u32) -> bool {
    use std::process::Command;
    // On Windows, check if process exists using tasklist
    Command::new("tasklist")
        .args(&["/FI", &format!("PID eq {}", pid), "/NH"])
        .output()
        .map(|output| {
            let output_str = String::from_utf8_lossy(&output.stdout);
            output_str.contains(&pid.to_string())
        })
        .unwrap_or(false)
}

#[cfg(unix)]
fn kill_process(pid: u32) -> bool {
    unsafe { libc::kill(pid as i32, libc::SIGTERM) == 0 }
}

#[cfg(windows)]
fn kill_process(pid: u32) -> bool {
    use std::process::Command;
    // On Windows, use taskkill
    Command::new("taskkill")
        .args(&["/PID", &pid.to_string(), "/F"])
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

fn handle_status() {
    match read_pid_info() {
        Some(info) => {
            if is_process_running(info.pid) {
                println!("✓ git-lens is running");
                println!("  PID:  {}", info.pid);
                println!("  Repo: {}", info.repo_path);
                println!("  URL:  http://127.0.0.1:{}", info.port);
            } else {
                println!("✗ git-lens is not running (stale PID file)");
                remove_pid_file();
            }
        }
        None => {
            println!("✗ git-lens is not running");
        }
    }
}

fn handle_kill() {
    match read_pid_info() {
        Some(info) => {
            if is_process_running(info.pid) {
                if kill_process(info.pid) {
                    println!("✓ Stopped git-lens (PID {})", info.pid);
                    remove_pid_file();
                } else {
                    println!("✗ Failed to stop git-lens (PID {})", info.pid);
                }
            } else {
                println!("✗ git-lens is not running (stale PID file)");
                remove_pid_file();
            }
        }
        None => {
            println!("✗ git-lens is not running");
        }
    }
}

async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "Not Found" })),
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Status) => {
            handle_status();
            return Ok(());
        }
        Some(Commands::Kill) => {
            handle_kill();
            return Ok(());
        }
        None => {}
    }

    // Need a repo path to start the server
    let repo_path = cli.repo_path.unwrap_or_else(|| {
        eprintln!("Usage: git-lens <REPO_PATH> [--port <PORT>]");
        eprintln!("       git-lens status");
        eprintln!("       git-lens kill");
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  git-lens .                # Serve current directory");
        eprintln!("  git-lens ~/myproject      # Serve a specific repo");
        std::process::exit(1);
    });

    // Check if already running
    if let Some(info) = read_pid_info() {
        if is_process_running(info.pid) {
            eprintln!("✗ git-lens is already running (PID {})", info.pid);
            eprintln!("  Repo: {}", info.repo_path);
            eprintln!("  URL:  http://127.0.0.1:{}", info.port);
            eprintln!();
            eprintln!("Run 'git-lens kill' to stop it first.");
            std::process::exit(1);
        } else {
            remove_pid_file();
        }
    }

    // Initialize tracing (quieter for production)
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Fail fast if the default repository cannot be opened
    if let Err(e) = GitRepository::open(&repo_path) {
        eprintln!("✗ Failed to open repository: {}", e);
        eprintln!("  Path: {}", repo_path);
        std::process::exit(1);
    }

    let canonical_path = std::fs::canonicalize(&repo_path)
        .unwrap_or_else(|_| PathBuf::from(&repo_path))
        .to_string_lossy()
        .to_string();

    let state = AppState::new(canonical_path.clone());

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the router
    let app = Router::new()
        .merge(routes::create_router(state))
        .fallback(not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Bind to the port
    let addr = format!("127.0.0.1:{}", cli.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("✗ Failed to bind to port {}: {}", cli.port, e);
            eprintln!("  Try a different port with --port <PORT>");
            std::process::exit(1);
        }
    };

    // Write PID file
    let pid_info = PidInfo {
        pid: std::process::id(),
        repo_path: canonical_path.clone(),
        port: cli.port,
    };
    write_pid_info(&pid_info)?;

    // Print startup message
    let url = format!("http://127.0.0.1:{}", cli.port);
    println!();
    println!("  ┌─────────────────────────────────────────────┐");
    println!("  │                  git-lens                   │");
    println!("  └─────────────────────────────────────────────┘");
    println!();
    println!("  Repository: {}", canonical_path);
    println!("  Server:     {}", url);
    println!();
    println!("  Commands:");
    println!("    git-lens status  - Check if running");
    println!("    git-lens kill    - Stop the server");
    println!();
    println!("  Press Ctrl+C to stop");
    println!();

    // Set up graceful shutdown
    let shutdown = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for Ctrl+C");
        println!("\n  Shutting down...");
        remove_pid_file();
    };

    // Start the server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
