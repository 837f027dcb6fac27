use colored::Colorize;

use crate::wire::{GenerationOutcome, Mode, Route};

/// One-line header describing how a result was produced.
pub fn summary_line(outcome: &GenerationOutcome) -> String {
    let mode = match outcome.mode {
        Mode::New => "NEW",
        Mode::Edit => "EDIT",
    };
    let route = match outcome.route {
        Route::Primary => "primary",
        Route::Fallback => "fallback",
    };
    format!("[{mode}] via {} ({route})", outcome.provider)
}

pub fn show_outcome(outcome: &GenerationOutcome) {
    let header = summary_line(outcome);
    match outcome.route {
        Route::Primary => println!("\n{}", header.green().bold()),
        Route::Fallback => println!("\n{}", header.yellow().bold()),
    }

    println!("\n=== PLAN ===");
    match serde_json::to_string_pretty(&outcome.result.plan) {
        Ok(p) => println!("{p}"),
        Err(_) => println!("{}", outcome.result.plan),
    }

    println!("\n=== CODE ===");
    if outcome.result.generated_code.is_empty() {
        println!("{}", "(sanitized code is empty)".red());
    } else {
        println!("{}", outcome.result.generated_code);
    }

    println!("\n=== EXPLANATION ===");
    println!("{}\n", outcome.result.explanation.italic());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::GenerationResult;
    use serde_json::json;

    #[test]
    fn summary_names_mode_provider_and_route() {
        let outcome = GenerationOutcome {
            mode: Mode::Edit,
            route: Route::Fallback,
            provider: "groq".into(),
            result: GenerationResult {
                plan: json!({}),
                generated_code: String::new(),
                explanation: String::new(),
            },
        };
        assert_eq!(summary_line(&outcome), "[EDIT] via groq (fallback)");
    }
}
