use crate::board::search::{SearchSettings, SearchStrategy};

/// Engine options adjustable over `setoption`.
pub struct UciOptions {
    pub depth: u32,
    pub movetime_ms: u64,
    pub strategy: SearchStrategy,
}

impl Default for UciOptions {
    fn default() -> Self {
        let defaults = SearchSettings::default();
        UciOptions {
            depth: defaults.depth,
            movetime_ms: defaults.movetime_ms,
            strategy: defaults.strategy,
        }
    }
}

impl UciOptions {
    pub fn print(&self) {
        println!("id name garnet");
        println!("id author garnet developers");
        println!(
            "option name Depth type spin default {} min 1 max 64",
            self.depth
        );
        println!(
            "option name MoveTime type spin default {} min 0 max 600000",
            self.movetime_ms
        );
        println!(
            "option name Strategy type combo default {} var FixedDepth var IterativeDeepening",
            strategy_name(self.strategy)
        );
        println!("uciok");
    }

    /// Search settings for the current option values.
    #[must_use]
    pub fn settings(&self) -> SearchSettings {
        SearchSettings {
            depth: self.depth,
            movetime_ms: self.movetime_ms,
            strategy: self.strategy,
        }
    }

    /// Apply a `setoption` pair. Unknown names produce a diagnostic and
    /// leave the options unchanged.
    pub fn apply_setoption(&mut self, name: &str, value: Option<&str>) {
        let normalized = name.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "depth" => {
                if let Some(v) = value.and_then(|v| v.parse::<u32>().ok()) {
                    self.depth = v.clamp(1, 64);
                }
            }
            "movetime" => {
                if let Some(v) = value.and_then(|v| v.parse::<u64>().ok()) {
                    self.movetime_ms = v;
                }
            }
            "strategy" => match value.map(str::to_ascii_lowercase).as_deref() {
                Some("fixeddepth") => self.strategy = SearchStrategy::FixedDepth,
                Some("iterativedeepening") => self.strategy = SearchStrategy::IterativeDeepening,
                other => {
                    println!(
                        "info string unknown strategy value '{}'",
                        other.unwrap_or("")
                    );
                }
            },
            _ => {
                println!("info string unknown option '{name}'");
            }
        }
    }
}

fn strategy_name(strategy: SearchStrategy) -> &'static str {
    match strategy {
        SearchStrategy::FixedDepth => "FixedDepth",
        SearchStrategy::IterativeDeepening => "IterativeDeepening",
    }
}

/// Split a `setoption` token list into its name and optional value.
#[must_use]
pub fn parse_setoption(parts: &[&str]) -> Option<(String, Option<String>)> {
    if parts.is_empty() || parts[0] != "setoption" {
        return None;
    }

    let mut name_parts: Vec<&str> = Vec::new();
    let mut value_parts: Vec<&str> = Vec::new();
    let mut mode = "";

    for part in parts.iter().skip(1) {
        match *part {
            "name" => mode = "name",
            "value" => mode = "value",
            _ => match mode {
                "name" => name_parts.push(part),
                "value" => value_parts.push(part),
                _ => {}
            },
        }
    }

    if name_parts.is_empty() {
        return None;
    }

    let name = name_parts.join(" ");
    let value = if value_parts.is_empty() {
        None
    } else {
        Some(value_parts.join(" "))
    };

    Some((name, value))
}
