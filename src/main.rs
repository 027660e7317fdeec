//! codify-mcp: MCP server that turns source files into review prompts.
//!
//! Usage:
//!   codify-mcp --mcp [--root <path>]         # Start MCP server
//!   codify-mcp tools                         # List the tool catalog
//!   codify-mcp call <tool> --args '<json>'   # Run one tool call
//!   codify-mcp todos [--pattern <glob>]      # Scan for marker comments

use clap::{Parser, Subcommand};
use codify_mcp::services::{scanner, DEFAULT_EXCLUDES};
use codify_mcp::tools::todos::DEFAULT_FILE_PATTERN;
use codify_mcp::{catalog, fmt, CodifyServer, Dispatcher, ToolArgs, ToolContext};
use rmcp::ServiceExt;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "codify-mcp")]
#[command(about = "MCP server that prepares code review, pattern and PRD prompts")]
#[command(version)]
struct Cli {
    /// Run as MCP server (stdin/stdout JSON-RPC)
    #[arg(long)]
    mcp: bool,

    /// Default project root for tools called without projectRoot (default: cwd)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List available tools and their arguments
    Tools,

    /// Run a single tool call and print its text result
    Call {
        /// Tool name
        tool: String,

        /// Arguments as a JSON object
        #[arg(short, long, default_value = "{}")]
        args: String,
    },

    /// Scan the project for TODO/FIXME/HACK/NOTE/BUG/XXX comments
    Todos {
        /// Glob pattern for files to scan
        #[arg(short, long, default_value = DEFAULT_FILE_PATTERN)]
        pattern: String,

        /// Extra glob patterns to skip (repeatable)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // CRITICAL: Log to stderr only (stdout is JSON-RPC for MCP)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("codify_mcp=info".parse()?))
        .with_writer(io::stderr)
        .init();

    let ctx = match cli.root {
        Some(root) => ToolContext::new(dunce::canonicalize(&root).unwrap_or(root)),
        None => ToolContext::from_current_dir()?,
    };

    if cli.mcp {
        if let Err(e) = run_mcp_server(ctx).await {
            tracing::error!("MCP server failed: {:#}", e);
            std::process::exit(1);
        }
        Ok(())
    } else if let Some(cmd) = cli.command {
        run_cli(ctx, cmd)
    } else {
        eprintln!("Use --mcp to start MCP server, or a subcommand for CLI mode.");
        eprintln!("Run with --help for more information.");
        std::process::exit(1);
    }
}

async fn run_mcp_server(ctx: ToolContext) -> anyhow::Result<()> {
    tracing::info!(
        "Starting MCP server with default root: {}",
        ctx.default_root.display()
    );

    let server = CodifyServer::new(ctx);

    // Run the MCP server on stdin/stdout
    let service = server.serve(rmcp::transport::io::stdio()).await?;
    service.waiting().await?;

    tracing::info!("MCP server stopped");
    Ok(())
}

fn use_color() -> bool {
    io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

fn run_cli(ctx: ToolContext, cmd: Commands) -> anyhow::Result<()> {
    let color = use_color();
    let mut out = io::stdout().lock();

    match cmd {
        Commands::Tools => {
            fmt::fmt_tools(&mut out, catalog::list(), color)?;
        }

        Commands::Call { tool, args } => {
            let args: ToolArgs = serde_json::from_str(&args)
                .map_err(|e| anyhow::anyhow!("--args must be a JSON object: {e}"))?;
            let result = Dispatcher::new(ctx).dispatch(&tool, &args)?;
            fmt::fmt_result(&mut out, &result, color)?;
        }

        Commands::Todos {
            pattern,
            exclude,
            json,
        } => {
            let excludes: Vec<String> = DEFAULT_EXCLUDES
                .iter()
                .map(|s| (*s).to_string())
                .chain(exclude)
                .collect();
            let report = scanner::scan(&ctx.default_root, &pattern, &excludes)?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
            } else {
                fmt::fmt_todos(&mut out, &report, color)?;
            }
        }
    }

    out.flush()?;
    Ok(())
}
