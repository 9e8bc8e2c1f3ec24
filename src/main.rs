use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use uuid::Uuid;

use knowledge_assistant::config::{AssistantConfig, ConfigError};
use knowledge_assistant::conversation::{Message, Role};
use knowledge_assistant::widget::Widget;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("stdin read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("transcript encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "knowledge-assistant", about = "Interactive driver for the Knowledge help widget")]
struct Cli {
    /// Print the ordered transcript as JSON lines on exit.
    #[arg(long, env = "ASSISTANT_JSON")]
    json: bool,

    /// Start with the panel open.
    #[arg(long)]
    open: bool,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let config = AssistantConfig::from_env()?;
    tracing::info!(
        delay_min_ms = config.delay.min_ms(),
        delay_max_ms = config.delay.max_ms(),
        seeded = config.rng_seed.is_some(),
        "assistant ready"
    );

    let mut widget = Widget::from_config(&config);
    if cli.open {
        widget.open();
    }

    let mut shown = Vec::new();
    print_new(&widget, &mut shown);
    print_help(&widget);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let pending = match line.trim() {
            "/quit" => break,
            "/toggle" => {
                widget.toggle();
                print_panel(&widget);
                None
            }
            "/open" => {
                widget.open();
                print_panel(&widget);
                None
            }
            "/close" => {
                widget.close();
                print_panel(&widget);
                None
            }
            "/history" => {
                shown.clear();
                None
            }
            "/help" => {
                print_help(&widget);
                None
            }
            cmd if cmd.starts_with("/suggest") => {
                let prompt = cmd
                    .strip_prefix("/suggest")
                    .unwrap_or_default()
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| widget.suggestions().get(i).cloned());
                match prompt {
                    Some(prompt) => widget.pick_suggestion(&prompt),
                    None => {
                        println!("usage: /suggest 1-{}", widget.suggestions().len());
                        None
                    }
                }
            }
            _ => {
                widget.edit_draft(line.as_str());
                widget.submit_draft()
            }
        };

        if let Some(pending) = pending {
            print_new(&widget, &mut shown);
            if let Some(indicator) = widget.thinking_indicator() {
                println!("  … {indicator}");
            }
            if let Err(e) = pending.settled().await {
                tracing::error!(error = %e, "reply task failed");
            }
        }
        print_new(&widget, &mut shown);
    }

    if cli.json {
        for message in widget.messages() {
            println!("{}", serde_json::to_string(&message)?);
        }
    }
    Ok(())
}

/// Print messages not yet shown, in chronological order.
fn print_new(widget: &Widget, shown: &mut Vec<Uuid>) {
    if !widget.is_open() {
        return;
    }
    for message in widget.messages() {
        if !shown.contains(&message.id) {
            print_message(&message);
            shown.push(message.id);
        }
    }
}

fn print_message(message: &Message) {
    let who = match message.role {
        Role::Assistant => "asistente",
        Role::User => "tú",
    };
    println!("[{who}] {}", message.text);
}

fn print_panel(widget: &Widget) {
    println!("(panel {})", if widget.is_open() { "abierto" } else { "cerrado" });
}

fn print_help(widget: &Widget) {
    println!("commands: /toggle /open /close /suggest N /history /help /quit");
    for (i, prompt) in widget.suggestions().iter().enumerate() {
        println!("  /suggest {}: {prompt}", i + 1);
    }
}
