use clap::Parser;
use ladder_processor::{
    args::{Args, Operation},
    database::{db::DbClient, db_structs::NewMatch},
    model
};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&args.log_level))
        .init();

    let client = match DbClient::connect(&args.connection_string).await {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            error!("Application cannot start without a valid database connection");
            std::process::exit(1);
        }
    };

    let result = match args.operation {
        Operation::SeasonTransition => model::run_season_transition(&client).await,
        Operation::ReplayRatingHistory => model::replay_rating_history(&client).await,
        Operation::ReplaySeasonSnapshots => model::replay_season_snapshots(&client).await,
        Operation::RecordMatch {
            season_id,
            winner_id,
            loser_id,
            date,
            shutout
        } => model::record_match(
            &client,
            &NewMatch {
                season_id,
                winner_id,
                loser_id,
                date,
                shutout
            }
        )
        .await
        .map(|_| ())
    };

    if let Err(e) = result {
        error!("Operation failed: {}", e);
        std::process::exit(1);
    }
}
