use serde::Serialize;

pub const MAX_TITLE_LEN: usize = 100;
pub const MAX_MESSAGE_LEN: usize = 200;

/// A dismissable message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    /// Builds a notice from trimmed text.
    /// Returns `None` when either part is blank or longer than allowed, in
    /// which case nothing should be shown.
    pub fn new(title: &str, message: &str) -> Option<Self> {
        let title = title.trim();
        let message = message.trim();
        if title.is_empty() || title.chars().count() > MAX_TITLE_LEN {
            return None;
        }
        if message.is_empty() || message.chars().count() > MAX_MESSAGE_LEN {
            return None;
        }
        Some(Self {
            title: title.to_string(),
            message: message.to_string(),
        })
    }
}

#[test]
fn notice_trims() {
    let notice = Notice::new("  Error ", " Invalid credentials\n").unwrap();
    assert_eq!(notice.title, "Error");
    assert_eq!(notice.message, "Invalid credentials");
}

#[test]
fn notice_rejects_blank() {
    assert!(Notice::new("   ", "message").is_none());
    assert!(Notice::new("title", "").is_none());
}

#[test]
fn notice_rejects_too_long() {
    let message = "x".repeat(MAX_MESSAGE_LEN + 1);
    assert!(Notice::new("title", &message).is_none());
    let title = "x".repeat(MAX_TITLE_LEN + 1);
    assert!(Notice::new(&title, "message").is_none());
}
