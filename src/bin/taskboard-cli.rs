use std::process::ExitCode;

use clap::{Parser, Subcommand};

use taskboard::client::{shell, TaskClient, TaskRef, TodoApp, DEFAULT_API_URL};
use taskboard::observability::logging;

#[derive(Parser)]
#[command(name = "taskboard-cli")]
#[command(about = "Terminal client for the task board API", long_about = None)]
struct Cli {
    /// Tasks collection URL.
    #[arg(short, long, env = "TASKBOARD_API_URL", default_value = DEFAULT_API_URL)]
    url: String,

    /// Disable ANSI styling.
    #[arg(long)]
    plain: bool,

    /// Log requests to stderr.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show all tasks
    List,
    /// Add a task
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Flip a task's completed flag (position or id)
    Toggle { task: TaskRef },
    /// Delete a task (position or id)
    Delete { task: TaskRef },
    /// Interactive session (default)
    Shell,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_cli(cli.verbose);

    let styled = !cli.plain;
    let mut app = TodoApp::new(TaskClient::new(&cli.url)?);
    app.load().await;

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            shell::run(&mut app, stdin, &mut std::io::stdout(), styled).await?;
            return Ok(ExitCode::SUCCESS);
        }
        Commands::List => {}
        Commands::Add { text } => {
            app.set_input(text.join(" "));
            if !app.add().await {
                eprintln!("Nothing to add.");
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Toggle { task } => match app.resolve(&task) {
            Some(id) => app.toggle(&id).await,
            None => {
                eprintln!("No task at that position.");
                return Ok(ExitCode::FAILURE);
            }
        },
        Commands::Delete { task } => match app.resolve(&task) {
            Some(id) => app.delete(&id).await,
            None => {
                eprintln!("No task at that position.");
                return Ok(ExitCode::FAILURE);
            }
        },
    }

    print!("{}", app.view().render(styled));
    if app.state().error.is_some() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
