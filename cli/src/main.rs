use clap::{Parser, Subcommand};
use evalboard_cli::{CliContext, commands, logging, readline};
use std::io::Write;

#[tokio::main]
async fn main() -> Result<(), String> {
    let _log_guard = logging::init();

    let mut ctx = CliContext::new().map_err(|e| e.to_string())?;
    tracing::info!(base_url = %ctx.config.api_base_url, "Connecting to dashboard server");

    // Color config is requested once, before anything else
    ctx.driver.start().await;

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &mut ctx).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                writeln!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(version, about = "evaluation dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show phase, upload state and current selection
    Status,
    /// Show the configured server, or persist a new base URL
    Config {
        #[arg(long)]
        base_url: Option<String>,
    },
    Colors,
    /// Choose the data file to upload
    Select {
        #[arg(short, long)]
        path: String,
    },
    /// Upload the chosen file (or the given path) and load filters
    Upload {
        #[arg(short, long)]
        path: Option<String>,
    },
    Filters,
    Method {
        #[arg(short, long)]
        value: String,
    },
    Age {
        #[arg(short, long)]
        value: String,
    },
    Period {
        #[arg(short, long)]
        value: String,
    },
    /// Add or remove a county from the selection
    Toggle {
        #[arg(short, long)]
        county: String,
    },
    Show,
    /// Write the ECharts option for the current rows as JSON
    Chart {
        #[arg(short, long)]
        out: String,
    },
    Exit,
}

async fn respond(line: &str, ctx: &mut CliContext) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "evalboard".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match &cli.command {
        Some(Commands::Status) => commands::show_status(ctx),
        Some(Commands::Config { base_url: None }) => commands::show_config(ctx),
        Some(Commands::Config {
            base_url: Some(url),
        }) => commands::save_base_url(url)?,
        Some(Commands::Colors) => commands::show_colors(ctx),
        Some(Commands::Select { path }) => commands::select_file(path, ctx)?,
        Some(Commands::Upload { path }) => commands::upload(path.as_deref(), ctx).await?,
        Some(Commands::Filters) => commands::show_filters(ctx),
        Some(Commands::Method { value }) => commands::set_method(value, ctx).await?,
        Some(Commands::Age { value }) => commands::set_age(value, ctx).await?,
        Some(Commands::Period { value }) => commands::set_period(value, ctx).await?,
        Some(Commands::Toggle { county }) => commands::toggle_county(county, ctx).await?,
        Some(Commands::Show) => commands::show_rows(ctx),
        Some(Commands::Chart { out }) => commands::write_chart(out, ctx)?,
        Some(Commands::Exit) => {
            commands::exit()?;
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}
