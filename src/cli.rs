// command line interface

use crate::triage::{Chat, Db, ModelStore, Predictor};
use crate::{Output, Server};
use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "medtriage", about = "Symptom triage backend with a canned health chat")]
struct Cli {
    /// sqlite file for the interaction log
    #[arg(long, env = "MEDTRIAGE_DB", default_value = "database.db", global = true)]
    db: PathBuf,

    /// directory holding department_model.json and risk_model.json
    #[arg(long, default_value = "models", global = true)]
    models: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// start the http server (default)
    Serve {
        /// port number
        #[arg(long, short, default_value = "8000")]
        port: u16,

        /// host to bind
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
    },

    /// show the most recent logged predictions
    Logs {
        /// how many rows
        #[arg(
            long,
            short = 'n',
            default_value = "20",
            value_parser = clap::value_parser!(u32).range(1..)
        )]
        limit: u32,

        /// print json lines instead of a table
        #[arg(long)]
        json: bool,
    },

    /// print the canned reply for a message
    Chat { message: String },
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve { port, host }) => serve(&cli.db, &cli.models, &host, port).await,
        None => serve(&cli.db, &cli.models, "0.0.0.0", 8000).await,

        Some(Commands::Logs { limit, json }) => {
            let db = Db::open(&cli.db).await.into_diagnostic()?;
            let records = db.recent(limit).await.into_diagnostic()?;

            if json {
                println!("{}", Output::json_lines(&records).into_diagnostic()?);
            } else {
                println!("{}", Output::table(&records));
            }
            Ok(())
        }

        Some(Commands::Chat { message }) => {
            println!("{}", Chat::reply(&message));
            Ok(())
        }
    }
}

async fn serve(db_path: &Path, models_dir: &Path, host: &str, port: u16) -> Result<()> {
    let models = ModelStore::load(models_dir);

    let db = Db::open(db_path).await.into_diagnostic()?;
    tracing::info!(db = %db_path.display(), "interaction log ready");

    let predictor = Predictor::new(models, db);
    Server::run(predictor, host, port).await.into_diagnostic()
}
