//! Known values of the free-text status, role and type fields.
//!
//! The records keep these fields as plain text. Lookup is lenient: text the
//! backend sends that is not listed here yields `None`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An enum whose variants map one to one onto wire strings.
macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $wire)] $variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }

            pub fn from_wire(text: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|item| item.as_str() == text)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum!(GoalStatus {
    Active => "active",
    Paused => "paused",
    Completed => "completed",
    Abandoned => "abandoned",
});

wire_enum!(TaskStatus {
    Pending => "pending",
    InProgress => "in_progress",
    Completed => "completed",
    Skipped => "skipped",
});

wire_enum!(
    /// Author of a conversation entry.
    Role {
        User => "user",
        Assistant => "assistant",
        System => "system",
        Tool => "tool",
    }
);

wire_enum!(
    /// Which coaching agent produced a reply.
    AgentType {
        Planner => "planner",
        Executor => "executor",
        Evaluator => "evaluator",
        Accountability => "accountability",
    }
);

wire_enum!(ProviderType {
    OpenRouter => "openrouter",
    Ollama => "ollama",
});
