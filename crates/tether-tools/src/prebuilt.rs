//! Catalogue of tools the agent service ships with.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// A tool that exists server-side without any client registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrebuiltTool {
    pub name: &'static str,
    pub description: &'static str,
}

const fn tool(name: &'static str, description: &'static str) -> PrebuiltTool {
    PrebuiltTool { name, description }
}

/// Prebuilt tools, grouped by purpose.
pub const PREBUILT_TOOLS: &[PrebuiltTool] = &[
    // Core memory
    tool(
        "core_memory_replace",
        "Replace the contents of core memory. To delete memories, use an empty string for new_content.",
    ),
    tool("core_memory_append", "Append to the contents of core memory."),
    // Memory editing
    tool(
        "memory",
        "Memory management tool with various sub-commands for memory block operations (view, create, str_replace, insert, delete, rename).",
    ),
    tool(
        "memory_finish_edits",
        "Call the memory_finish_edits command when you are finished making edits (integrating all new information) into the memory blocks.",
    ),
    tool(
        "memory_replace",
        "Replace a specific string in a memory block with a new string. Used for making precise edits.",
    ),
    tool(
        "memory_insert",
        "Insert text at a specific location in a memory block.",
    ),
    tool(
        "memory_rethink",
        "Completely rewrite the contents of a memory block. Use for large sweeping changes, not for small precise edits.",
    ),
    // Archival memory
    tool(
        "archival_memory_insert",
        "Add to archival memory. Phrase the memory contents such that they can be easily queried later.",
    ),
    tool(
        "archival_memory_search",
        "Search archival memory using semantic (embedding-based) search with optional temporal filtering.",
    ),
    // Search
    tool(
        "conversation_search",
        "Search prior conversation history using hybrid search (text + semantic similarity).",
    ),
    // Messaging
    tool("send_message", "Sends a message to the human user."),
    tool(
        "send_message_to_agents_matching_tags",
        "Sends a message to all agents within the same organization that match the specified tag criteria.",
    ),
    tool(
        "send_message_to_agent_and_wait_for_reply",
        "Sends a message to a specific agent within the same organization and waits for a response.",
    ),
    tool(
        "send_message_to_agent_async",
        "Sends a message to a specific agent within the same organization without waiting for a reply.",
    ),
    // Execution
    tool(
        "run_code",
        "Run code in a sandbox. Supports Python, Javascript, Typescript, R, and Java.",
    ),
    // Web
    tool(
        "web_search",
        "Search the web and retrieve relevant content.",
    ),
    tool(
        "fetch_webpage",
        "Fetch a webpage and convert it to markdown/text format.",
    ),
    // File system
    tool("open_file", "Open and read a file from the agent's filesystem"),
    tool("grep_file", "Search for a pattern in files"),
    tool("search_file", "Search for files by name or pattern"),
];

static BY_NAME: Lazy<HashMap<&'static str, &'static PrebuiltTool>> =
    Lazy::new(|| PREBUILT_TOOLS.iter().map(|t| (t.name, t)).collect());

/// Look up a prebuilt tool by name.
pub fn find(name: &str) -> Option<&'static PrebuiltTool> {
    BY_NAME.get(name).copied()
}
