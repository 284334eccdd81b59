//! User-visible, non-fatal notices.
//!
//! Backend faults are recovered locally inside a turn; what remains is a
//! notice the hosting shell renders without terminating the session.

use serde::{Deserialize, Serialize};

/// Which backend a notice originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Retrieval,
    Generation,
}

/// A non-fatal, user-visible error notice attached to a rendered turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    /// Notice for a failed search backend call.
    pub fn retrieval(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Retrieval,
            message: message.into(),
        }
    }

    /// Notice for a failed generation backend call.
    pub fn generation(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Generation,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_constructors() {
        let retrieval = Notice::retrieval("search backend unreachable");
        assert_eq!(retrieval.kind, NoticeKind::Retrieval);
        assert_eq!(retrieval.message, "search backend unreachable");

        let generation = Notice::generation("generation backend unreachable");
        assert_eq!(generation.kind, NoticeKind::Generation);
    }
}
