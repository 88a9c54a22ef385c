//! Built-in word tables used by the question generator.

/// Words skipped when looking for a key term.
pub const COMMON_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "can", "her", "was", "one", "our",
    "out", "day", "get", "has", "him", "his", "how", "man", "new", "now", "old", "see", "two",
    "way", "who", "boy", "did", "its", "let", "put", "say", "she", "too", "use",
];

/// Keyword → plausible alternatives. Checked in order; the first keyword found wins.
pub const DOMAIN_TERMS: &[(&str, &[&str])] = &[
    ("java", &["Python", "JavaScript", "C++", "Ruby"]),
    ("python", &["Java", "JavaScript", "Ruby", "PHP"]),
    ("object", &["procedural", "functional", "declarative", "imperative"]),
    ("oriented", &["based", "driven", "structured", "focused"]),
    ("machine", &["human", "manual", "automated", "artificial"]),
    ("learning", &["training", "teaching", "studying", "memorizing"]),
    ("network", &["system", "protocol", "interface", "connection"]),
    ("data", &["information", "content", "metadata", "records"]),
    ("algorithm", &["heuristic", "formula", "function", "procedure"]),
    ("memory", &["storage", "cache", "buffer", "register"]),
    ("virtual", &["physical", "real", "actual", "concrete"]),
    ("intelligence", &["automation", "computation", "processing", "analysis"]),
];

pub const OPPOSITES: &[(&str, &str)] = &[
    ("high", "low"),
    ("fast", "slow"),
    ("large", "small"),
    ("simple", "complex"),
    ("true", "false"),
    ("correct", "incorrect"),
    ("valid", "invalid"),
];

pub const GENERIC_WRONG_ANSWERS: &[&str] = &[
    "None of the above",
    "All options are correct",
    "Cannot be determined",
    "Depends on context",
    "Not applicable",
    "Undefined behavior",
    "Random value",
    "System default",
];
