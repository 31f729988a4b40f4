use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use std::path::Path;

use svgforge_core::{
    ApiConfig, ChatSession, Conversation, ConversationManager, ExportedArtifact, KeyValueStore,
    OpenAIClient, SendOutcome, ICON_STYLES,
};

use crate::commands::{handle_command, CommandResult};

pub fn build_session(api: &ApiConfig) -> ChatSession {
    ChatSession::new(Box::new(OpenAIClient::from_config(api)))
}

/// Run one generation in the active conversation and print the result.
pub async fn run_single_prompt<S: KeyValueStore>(
    manager: &mut ConversationManager<S>,
    prompt: &str,
) -> Result<()> {
    let outcome = manager.send_user_message(prompt).await?;
    print_outcome(&outcome);
    Ok(())
}

/// Interactive loop: slash commands or prompts, one line at a time.
pub async fn run_repl<S: KeyValueStore>(mut manager: ConversationManager<S>) -> Result<()> {
    println!("SVG Forge (model {}) - type /help for commands", manager.session().model());
    print_active_header(&manager);

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match handle_command(input) {
            CommandResult::Quit => break,
            CommandResult::NotACommand => {
                if manager.is_loading() {
                    eprintln!("A request is still running.");
                    continue;
                }
                match manager.send_user_message(input).await {
                    Ok(outcome) => print_outcome(&outcome),
                    Err(e) => eprintln!("Error: {e}"),
                }
            }
            command => {
                if let Err(e) = dispatch(&mut manager, command).await {
                    eprintln!("Error: {e:#}");
                }
            }
        }

        if manager.run_deferred() {
            print_active_header(&manager);
        }
    }

    Ok(())
}

/// Execute a parsed command against `manager`.
pub async fn dispatch<S: KeyValueStore>(
    manager: &mut ConversationManager<S>,
    command: CommandResult,
) -> Result<()> {
    match command {
        CommandResult::Message(msg) => println!("{msg}"),
        CommandResult::NewConversation => {
            manager.create_conversation();
            print_active_header(manager);
        }
        CommandResult::ListConversations => {
            print!("{}", format_conversation_list(manager.conversations(), manager.active_id()));
        }
        CommandResult::SelectConversation(target) => {
            let id = resolve_target(manager.conversations(), &target)
                .with_context(|| format!("No conversation matches '{target}'"))?;
            if manager.select_conversation(&id) {
                print_active_header(manager);
            }
        }
        CommandResult::DeleteConversation(target) => {
            let id = match target {
                Some(target) => resolve_target(manager.conversations(), &target)
                    .with_context(|| format!("No conversation matches '{target}'"))?,
                None => manager
                    .active_id()
                    .map(str::to_string)
                    .context("No active conversation")?,
            };
            if manager.delete_conversation(&id) {
                println!("Deleted {id}");
                if manager.active_id().is_some() {
                    print_active_header(manager);
                }
            }
        }
        CommandResult::ClearAll => {
            let mut confirm = confirm_on_stdin;
            if manager.clear_all(&mut confirm) {
                println!("All conversations cleared.");
                print_active_header(manager);
            }
        }
        CommandResult::ListStyles => {
            let current = manager.current_style().id;
            for style in ICON_STYLES {
                let marker = if style.id == current { "*" } else { " " };
                println!("{marker} {:<18} {}", style.id, style.name);
            }
        }
        CommandResult::SetStyle(id) => {
            let style = manager.set_style(&id)?;
            println!("Style: {}: {}", style.name, style.description);
        }
        CommandResult::ShowGallery => {
            let conversation = manager.active_conversation().context("No active conversation")?;
            if conversation.svgs.is_empty() {
                println!("No SVGs generated in this conversation yet.");
            }
            for (i, item) in conversation.svgs.iter().enumerate() {
                println!("{:>3}. {}", i + 1, item.prompt);
            }
        }
        CommandResult::SelectArtifact(n) => {
            let svg = manager
                .active_conversation()
                .and_then(|c| c.svgs.get(n.checked_sub(1)?))
                .map(|item| item.svg_code.clone())
                .with_context(|| format!("No gallery item {n}"))?;
            manager.select_gallery_artifact(&svg).await;
            println!("Loaded gallery item {n}; further edits apply to it.");
        }
        CommandResult::PrintSvg => {
            println!("{}", manager.current_svg().context("Nothing to show yet")?);
        }
        CommandResult::CopySvg => {
            let svg = manager.current_svg().context("Nothing to copy yet")?;
            let mut clipboard = arboard::Clipboard::new().context("Clipboard unavailable")?;
            clipboard.set_text(svg.to_string())?;
            println!("Copied SVG to clipboard.");
        }
        CommandResult::ExportSvg(dir) => {
            let svg = manager.current_svg().context("Nothing to export yet")?;
            let dir = dir.unwrap_or_else(|| Path::new(".").to_path_buf());
            let path = ExportedArtifact::new(svg).write_to(&dir)?;
            println!("Saved {}", path.display());
        }
        CommandResult::ShowStatus => {
            println!("Model:        {}", manager.session().model());
            println!("Style:        {}", manager.current_style().name);
            println!("Conversations: {}", manager.conversations().len());
            if let Some(c) = manager.active_conversation() {
                println!("Active:       {} ({} messages, {} SVGs)", c.title, c.messages.len(), c.svgs.len());
            }
        }
        CommandResult::Quit | CommandResult::NotACommand => {}
    }
    Ok(())
}

/// A 1-based list number or a conversation id (prefixes accepted when
/// unambiguous).
pub fn resolve_target(conversations: &[Conversation], target: &str) -> Option<String> {
    if let Ok(n) = target.parse::<usize>() {
        if n >= 1 && n <= conversations.len() {
            return Some(conversations[n - 1].id.clone());
        }
    }
    if let Some(exact) = conversations.iter().find(|c| c.id == target) {
        return Some(exact.id.clone());
    }
    let mut matches = conversations.iter().filter(|c| c.id.starts_with(target));
    match (matches.next(), matches.next()) {
        (Some(only), None) => Some(only.id.clone()),
        _ => None,
    }
}

pub fn format_conversation_list(conversations: &[Conversation], active: Option<&str>) -> String {
    let mut out = String::new();
    for (i, c) in conversations.iter().enumerate() {
        let marker = if Some(c.id.as_str()) == active { "*" } else { " " };
        let short_id: String = c.id.chars().take(8).collect();
        out.push_str(&format!(
            "{marker}{:>3}. {:<24} {short_id}  {} msgs, {} svgs\n",
            i + 1,
            c.title,
            c.messages.len(),
            c.svgs.len()
        ));
    }
    out
}

fn print_outcome(outcome: &SendOutcome) {
    println!("{}", outcome.reply().content);
    if let SendOutcome::Generated { artifact, .. } = outcome {
        println!("\n{}", artifact.svg_code);
    }
}

fn print_active_header<S: KeyValueStore>(manager: &ConversationManager<S>) {
    if let Some(c) = manager.active_conversation() {
        println!("-- {} [{}]", c.title, manager.current_style().name);
    }
}

fn confirm_on_stdin(prompt: &str) -> bool {
    print!("{prompt} [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}
