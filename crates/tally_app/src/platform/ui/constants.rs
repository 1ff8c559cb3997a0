use std::time::Duration;

pub const TITLE: &str = " LLM Token Counter ";
pub const DROP_HINT: &str = "Drag & drop a file here";
pub const DROP_SUBHINT: &str = "(the terminal pastes its path)";
pub const PICKER_TITLE: &str = " Model ";
pub const HELP_TEXT: &str = "↑/↓ j/k: move | Enter/Space: select model | q/Esc: quit";

pub const PICKER_WIDTH: u16 = 36;
pub const DROP_ZONE_HEIGHT: u16 = 7;
pub const STATUS_HEIGHT: u16 = 5;

/// How long the loop waits for terminal input before draining engine events.
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);
