/// SVG Forge: centralized constants.
/// Storage keys, default endpoints, fixed prompt fragments and chat notices.

// ─── Models ───────────────────────────────────────────────────────────────────

pub mod models {
    pub const DEFAULT_MODEL: &str = "gemini-3-flash";
    pub const DEFAULT_TEMPERATURE: f32 = 0.7;
}

// ─── API Endpoints ────────────────────────────────────────────────────────────

pub mod endpoints {
    pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8045/v1";
    pub const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";
}

// ─── Environment ──────────────────────────────────────────────────────────────

pub mod env {
    /// Explicit overrides, checked first.
    pub const API_KEY: &str = "SVGFORGE_API_KEY";
    pub const BASE_URL: &str = "SVGFORGE_BASE_URL";
    pub const MODEL: &str = "SVGFORGE_MODEL";

    /// Generic overrides shared with other OpenAI-compatible tooling.
    pub const GENERIC_API_KEY: &str = "API_KEY";
    pub const GENERIC_BASE_URL: &str = "BASE_URL";
    pub const GENERIC_MODEL: &str = "MODEL";
}

// ─── Storage ──────────────────────────────────────────────────────────────────

pub mod storage {
    pub const CONVERSATIONS_KEY: &str = "svg_gen_conversations";
    pub const DATA_DIR_NAME: &str = ".svgforge";
    pub const CONFIG_DIR_NAME: &str = "svgforge";
    pub const CONFIG_FILE_NAME: &str = "config.toml";
}

// ─── Conversations ────────────────────────────────────────────────────────────

pub mod conversation {
    pub const DEFAULT_TITLE: &str = "UNTITLED_SESSION";
    /// Characters of the first user message kept in a derived title.
    pub const TITLE_MAX_CHARS: usize = 20;
    pub const TITLE_ELLIPSIS: &str = "...";
}

// ─── Chat Notices ─────────────────────────────────────────────────────────────

pub mod notices {
    pub const SVG_PLACEHOLDER: &str = "[SVG_GENERATED_SUCCESSFULLY]";
    pub const GENERIC_FAILURE: &str = "ERR: SYSTEM_FAILURE. PLEASE_RETRY.";
    pub const RATE_LIMITED: &str = "ERR: RATE_LIMIT_EXCEEDED. [QUOTA_FULL]. PLEASE_WAIT.";
    pub const CLEAR_ALL_PROMPT: &str = "WARNING: PURGING ALL DATA LOGS. CONFIRM?";

    /// Substrings of an error message that mark a rate-limit/quota failure.
    pub const RATE_LIMIT_MARKERS: &[&str] = &["429", "RESOURCE_EXHAUSTED", "quota"];
}

// ─── Export ───────────────────────────────────────────────────────────────────

pub mod export {
    pub const SVG_MIME_TYPE: &str = "image/svg+xml";
    pub const FILE_PREFIX: &str = "forge_export_";
    pub const FILE_EXTENSION: &str = "svg";
}
