//! Chat input shortcuts

/// A canned query reachable by a slash shortcut
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickAction {
    pub label: &'static str,
    pub shortcut: &'static str,
    pub query: &'static str,
}

pub const QUICK_ACTIONS: [QuickAction; 5] = [
    QuickAction {
        label: "Who can my AI pay?",
        shortcut: "/who",
        query: "Show me who I can pay",
    },
    QuickAction {
        label: "Add a payee",
        shortcut: "/add",
        query: "I want to add a new payee",
    },
    QuickAction {
        label: "Send money",
        shortcut: "/send",
        query: "I want to send money",
    },
    QuickAction {
        label: "Check balance",
        shortcut: "/balance",
        query: "What's my current balance?",
    },
    QuickAction {
        label: "Request money",
        shortcut: "/request",
        query: "I want to request money from someone",
    },
];

/// Expand an exact shortcut; any other input is returned unchanged
pub fn expand_shortcut(input: &str) -> &str {
    let trimmed = input.trim();
    QUICK_ACTIONS
        .iter()
        .find(|action| action.shortcut == trimmed)
        .map(|action| action.query)
        .unwrap_or(input)
}
