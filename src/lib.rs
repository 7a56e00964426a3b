pub mod bindings;
pub mod client;

pub use bindings::chat::{ChatRequest, ChatResponse};
pub use bindings::models::{Conversation, Goal, LlmProviderConfig, Task, Timestamp};
pub use bindings::{normalize, Binding, BindingError, Input, NormalizeMode, Passthrough, Shape};
pub use client::{BackendError, ClientConfig, CoachClient, Transport};
