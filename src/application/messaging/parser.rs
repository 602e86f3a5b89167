//! Input parser - splits console lines into chat text and commands

/// A line entered on the console
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Text to send to the assistant, untrimmed
    Text(String),
    Command { name: String, args: Vec<String> },
}

/// Parses raw input lines
pub struct InputParser {
    command_prefix: String,
}

impl InputParser {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            command_prefix: prefix.into(),
        }
    }

    pub fn parse(&self, line: impl Into<String>) -> Input {
        let line = line.into();

        let parts: Option<Vec<String>> = line
            .trim_start()
            .strip_prefix(self.command_prefix.as_str())
            .map(|cmd_text| cmd_text.split_whitespace().map(|s| s.to_string()).collect());
        let Some(parts) = parts else {
            return Input::Text(line);
        };

        let mut parts = parts.into_iter();
        match parts.next() {
            Some(name) => Input::Command {
                name: name.to_lowercase(),
                args: parts.collect(),
            },
            // A bare prefix is just text
            None => Input::Text(line),
        }
    }
}
