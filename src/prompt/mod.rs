use crate::whitelist::ComponentWhitelist;
use crate::wire::{Mode, Plan};

/// Name of the single top-level component every generated program defines.
pub const ROOT_COMPONENT: &str = "App";

/// Last line every generated program must end with.
pub const RENDER_CALL: &str = "render(<App />);";

fn color_rules() -> &'static str {
r#"Color Rules:
- For colors, use the 'variant' prop on components. Never hard-code color values.
- Variants: "primary" (blue, default), "secondary" (gray/neutral), "danger" (red), "success" (green).
- If the user asks for "red", use variant="danger". If the user asks for "green", use variant="success"."#
}

pub fn planner_prompt(
    user_prompt: &str,
    current_code: &str,
    mode: Mode,
    whitelist: &ComponentWhitelist,
) -> String {
    let whitelist = whitelist.to_prompt_json();
    match mode {
        Mode::Edit => format!(
"You are a UI Architect. The user wants to MODIFY this existing React code:
---
{current_code}
---
NEW INTENT: \"{user_prompt}\"

TASK: Update the structural JSON layout plan.
1. PRESERVE everything not targeted by the new intent. KEEP all existing components that weren't specifically asked to be removed.
2. Add/Remove/Modify ONLY what is requested.
3. Use ONLY this whitelist: {whitelist}.
4. Return exactly one JSON object. No markdown, no prose."),
        Mode::New => format!(
"You are a UI Architect. Create a NEW JSON layout plan for: \"{user_prompt}\".
Use ONLY this whitelist: {whitelist}.
Return exactly one JSON object. No markdown, no prose."),
    }
}

pub fn generator_prompt(
    plan: &Plan,
    current_code: &str,
    mode: Mode,
    whitelist: &ComponentWhitelist,
) -> String {
    let plan_json = serde_json::to_string(plan).unwrap_or_else(|_| "null".to_string());
    let context = match mode {
        Mode::Edit => format!("BASE CODE TO MODIFY:\n{current_code}"),
        Mode::New => "This is a new generation.".to_string(),
    };
    let reserved = whitelist.reserved_names().join("', '");
    format!(
"Task: Convert this JSON plan into a React '{root}' component string: {plan_json}

CONTEXT:
{context}

STRICT RULES:
1. SURGICAL EDIT: Modify the existing '{root}' component. Do NOT delete existing logic unless requested.
2. NO REDEFINITIONS: Do NOT define '{reserved}'. They are global.
3. Define ONLY: const {root} = () => {{ ... }};
4. LAST LINE: {render}
5. OUTPUT: Raw code only. No markdown. No explanations.

{colors}",
        root = ROOT_COMPONENT,
        render = RENDER_CALL,
        colors = color_rules(),
    )
}

pub fn explanation_prompt(user_prompt: &str) -> String {
    format!("Explain why you made these specific changes for: {user_prompt}")
}

/// Explanation used on the fallback route, where no extra provider call is made.
pub fn fallback_explanation(user_prompt: &str) -> String {
    format!("I updated the UI components to match your request: {user_prompt}.")
}
