use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::Rule;

static LORD_GOD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bLord\s+God\b").unwrap());

// Group 2 captures a trailing "GOD"; "the Lord GOD" is left as written.
static THE_LORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([Tt]he)\s+Lord\b(\s+GOD\b)?").unwrap());

/// Restore the small-caps covenant name in fixed formulas.
///
/// `Lord God` becomes `LORD God`; `the Lord` becomes `the LORD` unless it
/// is followed by `GOD`.
pub fn case_divine_names(text: &str) -> String {
    let step = LORD_GOD.replace_all(text, "LORD God");
    THE_LORD
        .replace_all(&step, |caps: &Captures| {
            if caps.get(2).is_some() {
                caps[0].to_string()
            } else {
                format!("{} LORD", &caps[1])
            }
        })
        .into_owned()
}

/// Divine-name casing rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct DivineNameCasing;

impl Rule for DivineNameCasing {
    fn name(&self) -> &'static str {
        "divine_name_casing"
    }

    fn apply(&self, text: &str) -> String {
        case_divine_names(text)
    }
}
