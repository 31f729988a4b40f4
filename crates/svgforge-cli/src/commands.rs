use std::path::PathBuf;

/// Result of processing a slash command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Display a message to the user.
    Message(String),
    /// Start a fresh conversation.
    NewConversation,
    /// List conversations.
    ListConversations,
    /// Switch to a conversation by list number or id.
    SelectConversation(String),
    /// Delete a conversation by list number or id; the active one when empty.
    DeleteConversation(Option<String>),
    /// Delete everything after confirmation.
    ClearAll,
    /// List icon styles.
    ListStyles,
    /// Change the icon style.
    SetStyle(String),
    /// List the artifacts of the active conversation.
    ShowGallery,
    /// Load a gallery artifact (1-based) into the preview.
    SelectArtifact(usize),
    /// Print the SVG currently on display.
    PrintSvg,
    /// Copy the SVG on display to the clipboard.
    CopySvg,
    /// Export the SVG on display into a directory (cwd when absent).
    ExportSvg(Option<PathBuf>),
    /// Show status (model, style, conversation).
    ShowStatus,
    /// Quit the application.
    Quit,
    /// Not a command - treat as regular input.
    NotACommand,
}

pub fn handle_command(input: &str) -> CommandResult {
    let input = input.trim();
    let parts: Vec<&str> = input.splitn(2, ' ').collect();
    let cmd = parts[0];
    let arg = parts.get(1).map(|s| s.trim()).unwrap_or("");

    match cmd {
        "/help" | "/h" => show_help(),
        "/exit" | "/quit" | "/q" => CommandResult::Quit,

        // Conversation commands
        "/new" => CommandResult::NewConversation,
        "/list" | "/conversations" | "/history" => CommandResult::ListConversations,
        "/select" | "/open" => {
            if arg.is_empty() {
                CommandResult::Message("Usage: /select <number|id>".into())
            } else {
                CommandResult::SelectConversation(arg.to_string())
            }
        }
        "/delete" | "/rm" => {
            CommandResult::DeleteConversation((!arg.is_empty()).then(|| arg.to_string()))
        }
        "/clear" => CommandResult::ClearAll,

        // Style commands
        "/styles" => CommandResult::ListStyles,
        "/style" => {
            if arg.is_empty() {
                CommandResult::ListStyles
            } else {
                CommandResult::SetStyle(arg.to_string())
            }
        }

        // Artifact commands
        "/gallery" => CommandResult::ShowGallery,
        "/show" => match arg.parse::<usize>() {
            Ok(n) if n > 0 => CommandResult::SelectArtifact(n),
            _ => CommandResult::Message("Usage: /show <gallery-number>".into()),
        },
        "/svg" | "/code" => CommandResult::PrintSvg,
        "/copy" => CommandResult::CopySvg,
        "/export" => CommandResult::ExportSvg((!arg.is_empty()).then(|| PathBuf::from(arg))),

        "/status" => CommandResult::ShowStatus,
        "/version" => CommandResult::Message(format!("SVG Forge v{}", env!("CARGO_PKG_VERSION"))),

        // Unknown command
        _ => {
            if input.starts_with('/') {
                CommandResult::Message(format!("Unknown command: {cmd}. Type /help for commands."))
            } else {
                CommandResult::NotACommand
            }
        }
    }
}

fn show_help() -> CommandResult {
    let help_text = "\
╭─ SVG Forge Commands ───────────────────────────────────────────╮

  CONVERSATIONS
    /new                      Start a fresh conversation
    /list                     List conversations
    /select <n|id>            Switch conversation
    /delete [n|id]            Delete a conversation (default: active)
    /clear                    Delete all conversations (asks first)

  STYLE
    /styles                   List icon styles
    /style <id>               Change icon style

  ARTIFACTS
    /gallery                  List generated SVGs in this conversation
    /show <n>                 Load a gallery SVG for further edits
    /svg                      Print the SVG on display
    /copy                     Copy the SVG on display to the clipboard
    /export [dir]             Save the SVG on display as a file

  OTHER
    /status                   Show model, style and conversation
    /help, /h                 Show this help message
    /version                  Show version information
    /exit, /quit, /q          Quit the application

  Anything else is sent to the model.
╰────────────────────────────────────────────────────────────────╯";

    CommandResult::Message(help_text.into())
}
