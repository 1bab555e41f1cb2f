//! Board metadata for the UI: titles, recipients, templates, tone labels.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::record::TONES;
use crate::web::state::SharedState;

/// Starter templates offered by the compose form.
const TEMPLATES: [(&str, &str, &str); 5] = [
    (
        "Short & Encouraging",
        "You've got this! 💪 Keep calm and trust your preparation.",
        "💪",
    ),
    (
        "Inspirational",
        "Believe in yourself — your hard work will pay off! 🌟📚",
        "🌟",
    ),
    (
        "Light & Funny",
        "Go smash those exams like a boss! 🧠⚡ (Don't forget to breathe.)",
        "😄",
    ),
    (
        "Supportive & Warm",
        "Wishing you clarity, focus and success. All the best! ❤️✍️",
        "❤️",
    ),
    (
        "Calm & Focused",
        "One question at a time. You've prepared well — now show what you know. 🌿",
        "🌿",
    ),
];

pub async fn board_handler(State(state): State<SharedState>) -> impl IntoResponse {
    let st = state.lock().await;

    let templates: Vec<serde_json::Value> = TEMPLATES
        .iter()
        .map(|(label, text, icon)| {
            serde_json::json!({ "label": label, "text": text, "icon": icon })
        })
        .collect();

    let body = serde_json::json!({
        "title": st.title,
        "subtitle": st.subtitle,
        "recipients": st.recipients,
        "recipient_string": st.recipient_string,
        "tones": TONES,
        "templates": templates,
        "admin_enabled": st.admin_key.is_some(),
    });
    (StatusCode::OK, axum::Json(body))
}
