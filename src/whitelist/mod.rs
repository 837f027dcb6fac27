use serde::{Deserialize, Serialize};

/// Allowed layout primitives and components with their permitted props.
/// Only ever used to build prompts; generated plans are not checked against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentWhitelist {
    pub layout: Vec<String>,
    pub components: Vec<ComponentSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentSpec {
    pub name: String,
    pub props: Vec<String>,
}

fn spec(name: &str, props: &[&str]) -> ComponentSpec {
    ComponentSpec {
        name: name.into(),
        props: props.iter().map(|p| p.to_string()).collect(),
    }
}

impl Default for ComponentWhitelist {
    fn default() -> Self {
        Self {
            layout: ["Container", "Row", "Column", "Sidebar", "Navbar"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            components: vec![
                spec("Navbar", &["title"]),
                spec("Sidebar", &["title", "items"]),
                spec("Button", &["label", "variant", "size"]),
                spec("Card", &["title", "description"]),
                spec("Input", &["placeholder", "label", "type"]),
                spec("Table", &["headers", "dataRows"]),
                spec("Chart", &["type", "data"]),
            ],
        }
    }
}

impl ComponentWhitelist {
    /// Compact JSON form embedded verbatim in prompts.
    pub fn to_prompt_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Every name a generated program must not redefine.
    pub fn reserved_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for n in self
            .layout
            .iter()
            .chain(self.components.iter().map(|c| &c.name))
        {
            if !names.contains(&n.as_str()) {
                names.push(n);
            }
        }
        names
    }
}
