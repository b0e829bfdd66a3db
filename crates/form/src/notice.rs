use serde::{Deserialize, Serialize};

/// How quantity-limit notices are presented.
///
/// One policy per deployment; the controller never mixes the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NoticePolicy {
    /// Inline text that the controller clears after `clear_after_ms`.
    Transient { clear_after_ms: u64 },
    /// A blocking alert the shopper dismisses.
    Blocking,
}

impl Default for NoticePolicy {
    fn default() -> Self {
        NoticePolicy::Transient {
            clear_after_ms: 3_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    QuantityBelowMinimum,
    QuantityAboveMaximum,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    pub policy: NoticePolicy,
}
