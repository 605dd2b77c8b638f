use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::Rule;

const VERBS: &str = "divide|divides|divided|dividing|separate|separates|separated|separating";

// "divide between X and between Y"
static DOUBLE_BETWEEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\b({VERBS})\s+between\s+([^,;]+?)\s+and\s+between\s+([^,;]+?)\b"
    ))
    .unwrap()
});

// "to divide X and between Y"
static TRAILING_BETWEEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(to\s+(?:divide|separate))\s+([^,;]+?)\s+and\s+between\s+([^,;]+?)\b")
        .unwrap()
});

/// A direct object that spans another clause or "between" belongs to a
/// different construction.
static CLAUSE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(?:and|between)\b").unwrap());

// "separate between X and Y"
static SEPARATE_BETWEEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(separate|separates|separated|separating)\s+between\s+([^,;]+?)\s+and\s+([^,;]+?)\b",
    )
    .unwrap()
});

/// Rewrite Hebrew "between ... and between ..." calques into
/// "X from Y".
///
/// Matches never cross a comma or semicolon, and the trailing form
/// ("to divide X and between Y") only applies when X is a single
/// phrase directly after the infinitive. Repeats until nothing
/// changes; every rewrite removes a "between", so this terminates.
pub fn repair_calques(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = repair_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn repair_pass(text: &str) -> String {
    let step = DOUBLE_BETWEEN.replace_all(text, "${1} ${2} from ${3}");
    let step = TRAILING_BETWEEN.replace_all(&step, |caps: &Captures| {
        if CLAUSE_BREAK.is_match(&caps[2]) {
            caps[0].to_string()
        } else {
            format!("{} {} from {}", &caps[1], &caps[2], &caps[3])
        }
    });
    SEPARATE_BETWEEN
        .replace_all(&step, "${1} ${2} from ${3}")
        .into_owned()
}

/// Calque repair rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalqueRepair;

impl Rule for CalqueRepair {
    fn name(&self) -> &'static str {
        "calque_repair"
    }

    fn apply(&self, text: &str) -> String {
        repair_calques(text)
    }
}
