//! Terminal front end for the payments chat service
//!
//! Drives a `ChatSession` against a running server and fills in tool forms on stdin.

use anyhow::{Context, Result, bail};
use clap::Parser;
use paygent::core::forms::{FieldKind, ResultBody, ResultStatus, render_tool_result};
use paygent::core::payments::PaymentsEnvironment;
use paygent::core::providers::ProviderKind;
use paygent::core::session::{ChatSession, ClientSettings, QUICK_ACTIONS, SessionStatus};
use paygent::core::streaming::ChatStreamPart;
use paygent::core::types::ChatRequest;
use paygent::sdk::ChatClient;
use paygent::utils::logging::{LogFormat, init_logging};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// Command line options
#[derive(Debug, Parser)]
#[command(name = "paygent-chat", version, about = "Chat with the payments assistant")]
struct Cli {
    /// Server base URL
    #[arg(long, env = "PAYGENT_URL", default_value = "http://127.0.0.1:3000")]
    server: String,

    /// Settings file holding API keys and preferences
    #[arg(long, env = "PAYGENT_SETTINGS")]
    settings: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 120)]
    timeout: u64,
}

type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    init_logging("warn", LogFormat::Pretty);

    let cli = Cli::parse();
    let settings_path = cli.settings.unwrap_or_else(default_settings_path);
    let settings = ClientSettings::load(&settings_path)
        .with_context(|| format!("loading settings from {}", settings_path.display()))?;

    let client = ChatClient::new(&cli.server, Duration::from_secs(cli.timeout))?;
    let mut session = ChatSession::new(settings);
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    println!("Paygent chat ({}). Type /help for commands.", client.base_url());

    while let Some(line) = prompt(&mut input, "> ").await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(command) = line.strip_prefix(':') {
            if !run_command(command, &mut session, &client, &settings_path).await? {
                break;
            }
            continue;
        }
        if line == "/help" {
            print_help();
            continue;
        }

        let request = match session.submit_user_input(line, Vec::new()) {
            Ok(request) => request,
            Err(e) => {
                println!("! {}", e);
                continue;
            }
        };
        run_turn(&client, &mut session, request, &mut input).await?;
    }

    Ok(())
}

/// Run a turn, then keep answering forms until the session is idle again
async fn run_turn(
    client: &ChatClient,
    session: &mut ChatSession,
    mut request: ChatRequest,
    input: &mut Input,
) -> Result<()> {
    loop {
        let status = match client.drive(session, &request, print_part).await {
            Ok(status) => status,
            Err(e) => {
                println!();
                println!("! {}", e);
                return Ok(());
            }
        };
        println!();

        if let Some(banner) = session.banner() {
            println!("! {}", banner);
        }
        if status != SessionStatus::AwaitingForm {
            return Ok(());
        }

        match fill_form(session, input).await? {
            Some(next) => request = next,
            None => return Ok(()),
        }
    }
}

/// Prompt for each field; returns `None` when the user cancels
async fn fill_form(session: &mut ChatSession, input: &mut Input) -> Result<Option<ChatRequest>> {
    loop {
        let Some(form) = session.form() else {
            return Ok(None);
        };
        println!("== {} == (empty keeps the current value, 'cancel' aborts)", form.kind.title());

        let fields: Vec<(String, String)> = form
            .fields
            .iter()
            .map(|field| {
                let mut label = field.label.clone();
                if let FieldKind::Select(options) = &field.kind {
                    label = format!("{} [{}]", label, options.join("|"));
                }
                let marker = if field.required { "*" } else { "" };
                let text = format!("{}{} ({}): ", label, marker, field.effective_value());
                (field.name.clone(), text)
            })
            .collect();

        for (name, text) in fields {
            let Some(answer) = prompt(input, &text).await? else {
                bail!("stdin closed while filling a form");
            };
            let answer = answer.trim();
            if answer.eq_ignore_ascii_case("cancel") {
                session.cancel_form()?;
                println!("Form cancelled.");
                return Ok(None);
            }
            if !answer.is_empty() {
                if let Some(form) = session.form_mut() {
                    form.set(&name, answer)?;
                }
            }
        }

        match session.submit_form() {
            Ok(request) => return Ok(Some(request)),
            Err(e) => println!("! {}", e),
        }
    }
}

fn print_part(part: &ChatStreamPart) {
    match part {
        ChatStreamPart::TextDelta { text } => {
            print!("{}", text);
            let _ = std::io::stdout().flush();
        }
        ChatStreamPart::ToolCall {
            tool_name, args, ..
        } => {
            println!();
            println!("[{}] {}", tool_name, serde_json::Value::Object(args.clone()));
        }
        ChatStreamPart::ToolResult {
            tool_name, result, ..
        } => {
            let view = render_tool_result(Some(result));
            let badge = match view.status {
                ResultStatus::Ok => "ok",
                ResultStatus::Failed => "failed",
                ResultStatus::Pending => "pending",
            };
            let summary = match view.body {
                ResultBody::Empty => String::new(),
                ResultBody::Text(text) | ResultBody::Error(text) => text,
                ResultBody::Items { prefix, items } => {
                    let titles: Vec<String> = items.into_iter().map(|i| i.title).collect();
                    format!("{} {}", prefix, titles.join(", "))
                }
                ResultBody::Json { prefix, value } => format!("{} {}", prefix, value),
                ResultBody::FormRequest { submit_to, .. } => {
                    format!("needs your input for {}", submit_to)
                }
            };
            println!("[{} {}] {}", tool_name, badge, summary);
        }
        ChatStreamPart::Start { .. }
        | ChatStreamPart::Error { .. }
        | ChatStreamPart::Finish { .. } => {}
    }
}

/// Handle a `:command`; returns false to quit
async fn run_command(
    command: &str,
    session: &mut ChatSession,
    client: &ChatClient,
    settings_path: &Path,
) -> Result<bool> {
    let mut words = command.split_whitespace();
    let name = words.next().unwrap_or_default();
    let arg = words.next();

    match (name, arg) {
        ("quit", _) | ("q", _) => return Ok(false),
        ("key", Some(key)) => {
            let settings = session.settings_mut();
            let provider = settings.ai_provider;
            settings.set_api_key(provider, key);
        }
        ("payman", Some(key)) => session.settings_mut().payman_api_key = Some(key.to_string()),
        ("provider", Some(value)) => match value.parse::<ProviderKind>() {
            Ok(kind) => session.settings_mut().ai_provider = kind,
            Err(e) => println!("! {}", e),
        },
        ("mode", Some(value)) => match value.parse::<PaymentsEnvironment>() {
            Ok(mode) => session.settings_mut().payman_mode = mode,
            Err(e) => println!("! {}", e),
        },
        ("login", Some(code)) => match client.exchange_token(code).await {
            Ok(token) => {
                let access_token = token
                    .get("access_token")
                    .and_then(|t| t.as_str())
                    .map(str::to_string);
                session.settings_mut().access_token = access_token;
                println!("Signed in.");
            }
            Err(e) => println!("! {}", e),
        },
        ("logout", _) => session.settings_mut().clear_credentials(),
        _ => {
            print_help();
            return Ok(true);
        }
    }

    session.settings().save(settings_path)?;
    Ok(true)
}

fn print_help() {
    println!("Shortcuts:");
    for action in QUICK_ACTIONS {
        println!("  {:<10} {}", action.shortcut, action.label);
    }
    println!("Commands:");
    println!("  :key <key>          save the API key for the current provider");
    println!("  :payman <key>       save the payments API key");
    println!("  :provider <name>    openai or anthropic");
    println!("  :mode <env>         sandbox or production");
    println!("  :login <code>       exchange an OAuth code");
    println!("  :logout             remove saved credentials");
    println!("  :quit");
}

async fn prompt(input: &mut Input, text: &str) -> Result<Option<String>> {
    print!("{}", text);
    std::io::stdout().flush()?;
    Ok(input.next_line().await?)
}

fn default_settings_path() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_default()
        .join(".paygent")
        .join("settings.json")
}
