//! Pre-post content screening.
//!
//! Checks run in a fixed order: empty, length, then the hard-block rules
//! (first match wins), then the warning rules, which aggregate instead of
//! short-circuiting. All rule data lives in `ModerationConfig` so the
//! filter stays a pure function of its inputs.

use regex::Regex;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    None,
    Warning,
    Blocked,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModerationOutcome {
    pub severity: Severity,
    pub message: String,
    /// Human-readable descriptions of every rule that fired.
    pub triggered: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ModerationConfig {
    pub max_length: usize,
    /// Whole-word matches, case-insensitive.
    pub profanity: Vec<String>,
    pub explicit_patterns: Vec<Regex>,
    /// Substring matches against the lowercased content.
    pub hate_keywords: Vec<String>,
    pub link_patterns: Vec<Regex>,
    /// Warn when uppercase letters exceed this fraction of all letters...
    pub max_caps_ratio: f64,
    /// ...but only for content with at least this many letters.
    pub min_caps_len: usize,
    /// Warn on runs of this many identical characters.
    pub max_repeat_run: usize,
    pub max_emoji: usize,
}

impl Default for ModerationConfig {
    fn default() -> Self {
        let compile = |patterns: &[&str]| {
            patterns
                .iter()
                .map(|p| Regex::new(p).expect("moderation pattern must compile"))
                .collect()
        };
        ModerationConfig {
            max_length: 5000,
            profanity: ["fuck", "shit", "bitch", "asshole", "cunt", "wanker"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            explicit_patterns: compile(&[
                r"(?i)\b(porn(ography)?|xxx|nsfw|onlyfans)\b",
                r"(?i)\bsend\s+nudes\b",
            ]),
            hate_keywords: ["kill yourself", "gas the", "subhuman", "go back to your country"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            link_patterns: compile(&[
                r"(?i)\b(bit\.ly|tinyurl\.com|t\.co|goo\.gl|is\.gd|ow\.ly|cutt\.ly)/\S+",
            ]),
            max_caps_ratio: 0.7,
            min_caps_len: 15,
            max_repeat_run: 6,
            max_emoji: 10,
        }
    }
}

pub fn moderate(content: &str, config: &ModerationConfig) -> ModerationOutcome {
    if content.trim().is_empty() {
        return blocked("Post content cannot be empty", vec!["empty content".to_string()]);
    }
    let char_count = content.chars().count();
    if char_count > config.max_length {
        return blocked(
            &format!("Post exceeds the {} character limit", config.max_length),
            vec![format!("length {} > {}", char_count, config.max_length)],
        );
    }

    let lower = content.to_lowercase();
    let words: HashSet<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    for word in &config.profanity {
        if words.contains(word.as_str()) {
            return blocked(
                "Post contains prohibited language",
                vec![format!("profanity: {}", word)],
            );
        }
    }
    for pattern in &config.explicit_patterns {
        if pattern.is_match(content) {
            return blocked(
                "Post contains explicit content",
                vec![format!("explicit pattern: {}", pattern.as_str())],
            );
        }
    }
    for keyword in &config.hate_keywords {
        if lower.contains(keyword.as_str()) {
            return blocked(
                "Post contains hateful content",
                vec![format!("hate keyword: {}", keyword)],
            );
        }
    }

    let mut triggered = Vec::new();

    let letters: Vec<char> = content.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.len() >= config.min_caps_len {
        let caps = letters.iter().filter(|c| c.is_uppercase()).count();
        let ratio = caps as f64 / letters.len() as f64;
        if ratio > config.max_caps_ratio {
            triggered.push(format!("excessive capital letters ({:.0}%)", ratio * 100.0));
        }
    }

    let run = longest_char_run(content);
    if run >= config.max_repeat_run {
        triggered.push(format!("repeated characters (run of {})", run));
    }

    let emoji = content.chars().filter(|c| is_emoji(*c)).count();
    if emoji > config.max_emoji {
        triggered.push(format!("too many emoji ({})", emoji));
    }

    for pattern in &config.link_patterns {
        if let Some(m) = pattern.find(content) {
            triggered.push(format!("suspicious shortened link: {}", m.as_str()));
        }
    }

    if triggered.is_empty() {
        ModerationOutcome {
            severity: Severity::None,
            message: "No issues found".to_string(),
            triggered,
        }
    } else {
        ModerationOutcome {
            severity: Severity::Warning,
            message: "Post flagged for review".to_string(),
            triggered,
        }
    }
}

fn blocked(message: &str, triggered: Vec<String>) -> ModerationOutcome {
    ModerationOutcome {
        severity: Severity::Blocked,
        message: message.to_string(),
        triggered,
    }
}

// The regex crate has no backreferences, so identical-character runs are
// counted directly.
fn longest_char_run(content: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    let mut previous: Option<char> = None;
    for c in content.chars() {
        current = if previous == Some(c) { current + 1 } else { 1 };
        longest = longest.max(current);
        previous = Some(c);
    }
    longest
}

fn is_emoji(c: char) -> bool {
    matches!(
        u32::from(c),
        0x1F000..=0x1FAFF // symbols, emoticons, supplemental pictographs
            | 0x2600..=0x27BF // misc symbols and dingbats
            | 0xFE0F // variation selector
    )
}
