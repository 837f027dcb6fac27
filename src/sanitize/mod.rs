use once_cell::sync::Lazy;
use regex::Regex;

use crate::prompt::ROOT_COMPONENT;

/// Keyword that introduces a top-level binding in generated code.
pub const BINDING_KEYWORD: &str = "const";

/// Backtick or tilde fences, with or without an info string. The whole run of
/// fence characters is consumed so stripping never leaves a fresh fence behind.
static FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[`~]*(?:`{3}|~{3})[`~]*[A-Za-z0-9_+-]*").expect("fence regex is valid")
});

fn designated_binding() -> String {
    format!("{BINDING_KEYWORD} {ROOT_COMPONENT}")
}

/// Clean raw model output into embeddable code.
pub fn sanitize(raw: &str) -> String {
    sanitize_with_report(raw).0
}

/// Same as [`sanitize`], also returning a warning per dropped line.
///
/// Line-grain filter, not a parser: a line is dropped when it mentions the binding
/// keyword anywhere (string literals included) without the designated binding.
/// Multi-line declarations only lose their first line.
pub fn sanitize_with_report(raw: &str) -> (String, Vec<String>) {
    let mut warnings = Vec::new();
    let unfenced = FENCE.replace_all(raw, "");
    let designated = designated_binding();

    let kept: Vec<&str> = unfenced
        .split('\n')
        .enumerate()
        .filter(|(idx, line)| {
            let drop = line.contains(BINDING_KEYWORD) && !line.contains(&designated);
            if drop {
                warnings.push(format!("dropped line {}: {}", idx + 1, line.trim()));
            }
            !drop
        })
        .map(|(_, line)| line)
        .collect();

    (kept.join("\n").trim().to_string(), warnings)
}
