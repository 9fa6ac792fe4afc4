use clap::{Parser, Subcommand};
use std::sync::Arc;

use scoreboard_engine::{
    FilterState, HttpScoresFetcher, NewScore, RankPolicy, ScoreListState, ScoreboardEngine,
    ShareTarget,
};

#[derive(Parser)]
#[command(name = "scoreboard-cli")]
#[command(about = "Scoreboard CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Scores API base endpoint
    #[arg(short, long, default_value = "http://127.0.0.1:3001/scores")]
    api_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the leaderboard
    Leaderboard {
        /// Filter usernames by substring
        #[arg(short, long, default_value = "")]
        search: String,

        /// Only show scores at or above this value
        #[arg(short, long)]
        min_score: Option<i64>,

        /// Rank numbering: 'unfiltered' or 'filtered'
        #[arg(short, long, default_value = "unfiltered")]
        policy: RankPolicy,
    },

    /// List one user's scores
    MyScores {
        /// Owner email
        email: String,
    },

    /// Submit a new score
    Add {
        username: String,
        score: i64,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        photo_url: Option<String>,
    },

    /// Change an existing score
    Edit { id: i64, score: i64 },

    /// Delete a score
    Remove { id: i64 },

    /// Print share links for a score
    Share { username: String, score: i64 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let fetcher = Arc::new(HttpScoresFetcher::new(&cli.api_url)?);
    let engine = ScoreboardEngine::new(fetcher);

    match cli.command {
        Commands::Leaderboard {
            search,
            min_score,
            policy,
        } => {
            let engine = engine.with_policy(policy);
            let filter = FilterState::new(search, min_score);
            let view = engine.leaderboard(&filter).await?;

            if let Some(message) = view.empty_message() {
                println!("{}", message);
                return Ok(());
            }

            println!(
                "Leaderboard ({} of {} matching, {:.2}ms)",
                view.entries.len(),
                view.matching_records,
                view.latency_ms
            );
            println!("{:<6} {:<20} {:<28} {:>8}  {}", "Rank", "User", "Email", "Score", "Submitted");
            for entry in &view.entries {
                println!(
                    "{:<6} {:<20} {:<28} {:>8}  {}",
                    entry.rank,
                    entry.record.username,
                    entry.record.email,
                    entry.record.score,
                    entry.record.submitted_date()
                );
            }
        }

        Commands::MyScores { email } => {
            let state = engine.my_scores(&email).await?;

            if state.is_empty() {
                println!("No scores found for {}.", email);
                return Ok(());
            }

            println!("{:<4} {:>8}  {}", "#", "Score", "Submitted");
            for (index, record) in state.records().iter().enumerate() {
                println!(
                    "{:<4} {:>8}  {}",
                    index + 1,
                    record.score,
                    record.submitted_date()
                );
            }
        }

        Commands::Add {
            username,
            score,
            email,
            photo_url,
        } => {
            let mut state = ScoreListState::default();
            let stored = engine
                .submit_score(
                    &mut state,
                    NewScore::now(username, score, photo_url, email.unwrap_or_default()),
                )
                .await?;

            println!("Submitted score {} (id {})", stored.score, stored.id);
        }

        Commands::Edit { id, score } => {
            let mut state = ScoreListState::default();
            let updated = engine.edit_score(&mut state, id, score).await?;

            println!("Score {} is now {}", updated.id, updated.score);
        }

        Commands::Remove { id } => {
            let mut state = ScoreListState::default();
            engine.remove_score(&mut state, id).await?;

            println!("Removed score {}", id);
        }

        Commands::Share { username, score } => {
            for target in ShareTarget::ALL {
                println!(
                    "{:<10} {}",
                    target.label(),
                    scoreboard_engine::share_url(target, &username, score)
                );
            }
        }
    }

    Ok(())
}
