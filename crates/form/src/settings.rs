use serde::{Deserialize, Serialize};

use orderform_locale::Locale;

use crate::notice::NoticePolicy;

/// Scroll offset past which the back-to-top button shows.
pub const BACK_TO_TOP_THRESHOLD_PX: f64 = 1500.0;

/// Per-deployment controller settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSettings {
    #[serde(default)]
    pub notice_policy: NoticePolicy,
    #[serde(default)]
    pub locale: Locale,
    #[serde(default = "default_back_to_top")]
    pub back_to_top_threshold_px: f64,
}

fn default_back_to_top() -> f64 {
    BACK_TO_TOP_THRESHOLD_PX
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            notice_policy: NoticePolicy::default(),
            locale: Locale::default(),
            back_to_top_threshold_px: BACK_TO_TOP_THRESHOLD_PX,
        }
    }
}
