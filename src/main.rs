use clap::Parser;
use tracing_subscriber::EnvFilter;

use moosement::challenges::{projected_award, Difficulty};
use moosement::config::{Cli, Command, Config};
use moosement::render;
use moosement::state::AppState;
use moosement::teams::NewTeam;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse CLI args and load config
    let cli = Cli::parse();
    let config = Config::load(&cli)?;
    let state = AppState::connect(config)?;

    let command = cli.command.unwrap_or(Command::Session);
    if let Err(e) = run(&state, command).await {
        // Mirror the app's alert: one line for the user, details in the log
        tracing::debug!("Command failed: {:?}", e);
        match e.downcast_ref::<moosement::error::ClientError>() {
            Some(client_err) => eprintln!("{}", client_err.alert_message()),
            None => eprintln!("{}", e),
        }
        std::process::exit(1);
    }

    Ok(())
}

async fn run(state: &AppState, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Session => {
            let session = state.init_session().await;
            println!("{}", render::session(&session));
        }
        Command::Challenges => {
            let mut board = state.challenge_board();
            board.load().await?;
            print!("{}", render::challenges(&board));
        }
        Command::Toggle { id, photo } => {
            let mut board = state.challenge_board();
            board.load().await?;
            let outcome = board.toggle(&id, photo).await?;
            println!("{}", render::toggle(&outcome));
        }
        Command::Activity { date } => {
            let mut calendar = state.activity_calendar();
            calendar.load().await;
            if let Some(date) = date {
                calendar.select(date);
            }
            print!("{}", render::activity(&calendar));
        }
        Command::Rewards => {
            let mut ledger = state.rewards_ledger();
            ledger.load().await?;
            print!("{}", render::rewards(&ledger));
        }
        Command::Redeem { name } => {
            let mut ledger = state.rewards_ledger();
            ledger.load().await?;
            let outcome = ledger.redeem(&name).await?;
            println!("{}", render::redeem(&name, &outcome));
        }
        Command::Leaderboard => {
            let mut leaderboard = state.leaderboard();
            leaderboard.load().await?;
            print!("{}", render::leaderboard(&leaderboard.ranked()));
        }
        Command::Join { code } => {
            state.teams().join(&code).await?;
            println!("Successfully joined the team!");
        }
        Command::CreateTeam {
            name,
            privacy,
            description,
            company_id,
        } => {
            let created = state
                .teams()
                .create(NewTeam {
                    name,
                    privacy,
                    description,
                    company_id,
                })
                .await?;
            match created.team_id {
                Some(id) => println!("Team created successfully (id {})", id),
                None => println!("Team created successfully"),
            }
        }
        Command::Invite => {
            let link = state.teams().invite().await?;
            println!("{}", link.invite_link);
        }
        Command::Login { email, password } => {
            let receipt = state.accounts().login(&email, &password).await?;
            println!("Login successful!");
            if let Some(user_id) = receipt.user_id {
                println!("User ID: {}", user_id);
            }
        }
        Command::Register {
            name,
            email,
            password,
        } => {
            let receipt = state.accounts().register(&name, &email, &password).await?;
            println!("User registered successfully!");
            if let Some(user_id) = receipt.user_id {
                println!("User ID: {}", user_id);
            }
        }
        Command::Difficulty { points, streak } => {
            println!("{}", Difficulty::from_points(points));
            if let Some(streak) = streak {
                println!(
                    "Award at a {} day streak: {} points",
                    streak,
                    projected_award(points, streak)
                );
            }
        }
    }

    Ok(())
}
