use std::sync::OnceLock;

use regex::Regex;

pub const GREETING_REPLY: &str = "هلا وغلا يا وليدي، نوّرت المجلس. شو بخاطرك اليوم؟ 🫖";
pub const UNCLEAR_REPLY: &str = "ما فهمت الكلام زين. حطّه بجملة أو سؤال واضح عشان أساعدك.";
pub const CLARIFY_TOPIC_REPLY: &str =
    "وضّح لي أكثر يا وليدي: عن أي موضوع تبيني أتكلم؟ دراسة؟ صحة عامة؟ تنظيم وقت؟";

const GREETINGS: &[&str] = &[
    "هلا",
    "مرحبا",
    "السلام",
    "السلام عليكم",
    "هاي",
    "اهلين",
    "هلو",
    "شلونج",
    "شلونك",
];

/// Checked in order; the first key found in the message wins.
pub const SMALL_TALK: &[(&str, &str)] = &[
    ("كيفك", "بخير يا وليدي، يزاك الله خير على السؤال. كيف أمورك انت؟"),
    ("كيف الحال", "تمام ولله الحمد. بشّرني عنك؟"),
    (
        "من انتي",
        "أنا يدّوه، جدة إماراتية أساعدك بنصيحة بسيطة من القلب. شو بخاطرك؟",
    ),
];

fn whitespace_run() -> &'static Regex {
    static PAT: OnceLock<Regex> = OnceLock::new();
    PAT.get_or_init(|| Regex::new(r"\s+").expect("valid regex"))
}

fn symbols_only() -> &'static Regex {
    static PAT: OnceLock<Regex> = OnceLock::new();
    PAT.get_or_init(|| Regex::new(r"^\W+$").expect("valid regex"))
}

/// True when some character appears at least four times in a row.
fn has_repeated_run(text: &str) -> bool {
    let mut prev = None;
    let mut run = 0;
    for c in text.chars() {
        if Some(c) == prev {
            run += 1;
        } else {
            prev = Some(c);
            run = 1;
        }
        if run >= 4 {
            return true;
        }
    }
    false
}

/// Answers the message locally when one of the canned rules applies.
///
/// Returns `None` when the message should go to the model.
pub fn classify(text: &str) -> Option<&'static str> {
    let normalized = whitespace_run().replace_all(text, " ").trim().to_lowercase();
    let words = normalized.split_whitespace().count();

    if words <= 3 && GREETINGS.iter().any(|g| normalized.contains(g)) {
        return Some(GREETING_REPLY);
    }

    if let Some(reply) = SMALL_TALK
        .iter()
        .find(|(key, _)| normalized.contains(key))
        .map(|(_, reply)| *reply)
    {
        return Some(reply);
    }

    if symbols_only().is_match(&normalized) || has_repeated_run(&normalized) {
        return Some(UNCLEAR_REPLY);
    }

    if words <= 2 {
        return Some(CLARIFY_TOPIC_REPLY);
    }

    None
}
