use std::sync::OnceLock;

use regex::Regex;

pub const EMPTY_INPUT_REPLY: &str = "هاه يا وليدي، عيد سؤالك لو سمحت 🌸";
pub const EMPTY_OUTPUT_REPLY: &str = "يزاك الله خير يا وليدي، وضّح لي أكثر عشان أخدمك 😊";

const MAX_LINES: usize = 3;

/// Applied in order, each to the output of the previous one.
const DIALECT: &[(&str, &str)] = &[
    ("لا تقلق", "لا تشيل هم"),
    ("لا تقلقي", "لا تشيلين هم"),
    ("نعم", "ايه"),
    ("حسناً", "تمام"),
    ("جداً", "وايد"),
    ("لماذا", "ليش"),
    ("ماذا", "شو"),
];

fn control_tokens() -> &'static Regex {
    static PAT: OnceLock<Regex> = OnceLock::new();
    PAT.get_or_init(|| Regex::new(r"<\|[^>]+?\|>|</?s>").expect("valid regex"))
}

/// Rewrites raw model output into the persona's voice.
///
/// Never returns an empty string.
pub fn normalize(raw: &str) -> String {
    if raw.is_empty() {
        return EMPTY_INPUT_REPLY.to_string();
    }

    let mut text = control_tokens().replace_all(raw, "").trim().to_string();
    for (from, to) in DIALECT {
        text = text.replace(from, to);
    }

    let lines: Vec<&str> = text.lines().collect();
    if lines.len() > MAX_LINES {
        text = lines[..MAX_LINES].join("\n");
    }
    let text = text.trim();

    if text.is_empty() {
        EMPTY_OUTPUT_REPLY.to_string()
    } else {
        text.to_string()
    }
}
