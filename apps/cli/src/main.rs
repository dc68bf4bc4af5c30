use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    advance_rotation, load_rotation_overview, load_settings, local_today, new_user_from_inputs,
    toggle_user_active, HttpRotaClient, RotaApi,
};
use shared::domain::UserId;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "rotactl", about = "Inspect and manage the duty rotation from a terminal")]
struct Cli {
    #[arg(long)]
    api_url: Option<String>,
    #[arg(long)]
    rotation_id: Option<i64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Who is on duty right now.
    Current,
    /// Upcoming weeks and their assignees.
    Forecast,
    /// Hand duty to the next person.
    Rotate,
    #[command(subcommand)]
    Users(UsersCommand),
}

#[derive(Subcommand, Debug)]
enum UsersCommand {
    List,
    Add { name: String, email: String },
    Delete { user_id: i64 },
    Toggle { user_id: i64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let settings = load_settings()?.with_overrides(cli.api_url, cli.rotation_id);
    let client = HttpRotaClient::from_settings(&settings)?;
    tracing::debug!(api_url = client.base_url(), "using rotation api");

    match cli.command {
        Command::Current => {
            let rotation = client.current_rotation().await?;
            println!(
                "on duty: {}",
                rotation.current_user_name().unwrap_or("none")
            );
        }
        Command::Forecast => {
            let overview = load_rotation_overview(&client, local_today()).await?;
            if overview.forecast.is_empty() {
                println!("no upcoming weeks");
            }
            for week in &overview.forecast {
                println!("{}  {}", week.week_label(), week.user);
            }
        }
        Command::Rotate => {
            let message = advance_rotation(&client).await?;
            println!("{message}");
            let rotation = client.current_rotation().await?;
            println!(
                "on duty: {}",
                rotation.current_user_name().unwrap_or("none")
            );
        }
        Command::Users(command) => run_users(&client, command).await?,
    }

    Ok(())
}

async fn run_users(client: &HttpRotaClient, command: UsersCommand) -> Result<()> {
    match command {
        UsersCommand::List => {
            for user in client.list_users().await? {
                let state = if user.active { "active" } else { "inactive" };
                println!("{}\t{}\t{}\t{state}", user.id, user.name, user.email);
            }
        }
        UsersCommand::Add { name, email } => {
            let Some(new_user) = new_user_from_inputs(&name, &email) else {
                bail!("name and email must both be non-empty");
            };
            let user = client.create_user(new_user).await?;
            println!("created user_id={}", user.id);
        }
        UsersCommand::Delete { user_id } => {
            client.delete_user(UserId(user_id)).await?;
            println!("deleted user_id={user_id}");
        }
        UsersCommand::Toggle { user_id } => {
            let user_id = UserId(user_id);
            let user = client
                .list_users()
                .await?
                .into_iter()
                .find(|user| user.id == user_id)
                .with_context(|| format!("no user with id {user_id}"))?;
            let active = toggle_user_active(client, user_id, user.active).await?;
            println!("user_id={user_id} active={active}");
        }
    }
    Ok(())
}
