pub mod id;
pub use id::{ChatId, ChatKind, UserId};

mod format_duration;
pub use format_duration::FormatDuration;
