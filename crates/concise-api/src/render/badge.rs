//! Plan badge markup.

use concise_models::{PlanResolution, PlanStatus};

use super::escape_html;

/// Render the plan badge shown next to the user menu.
pub fn render_badge(resolution: &PlanResolution) -> String {
    let tone = resolution.badge_tone();
    let status = match resolution.status {
        PlanStatus::Active { .. } => "active",
        PlanStatus::Free => "free",
        PlanStatus::Unrecognized { .. } => "unrecognized",
    };

    format!(
        concat!(
            r#"<span class="plan-badge plan-badge--{tone}" data-plan-status="{status}">"#,
            r#"<span class="plan-badge__crown plan-badge__crown--{tone}" aria-hidden="true">&#9819;</span>"#,
            "{name}</span>"
        ),
        tone = tone.as_str(),
        status = status,
        name = escape_html(&resolution.plan_name),
    )
}
