use crate::application::errors::CommandError;
use crate::domain::entities::ProductFilters;
use crate::domain::traits::ChatBackend;

/// Result of a console command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandReply {
    /// Status lines to show the user
    Lines(Vec<String>),
    /// End the session
    Quit,
}

struct CommandInfo {
    usage: &'static str,
    description: &'static str,
}

const COMMANDS: &[CommandInfo] = &[
    CommandInfo { usage: "help", description: "Show this message" },
    CommandInfo { usage: "history [limit]", description: "Show the server's conversation history" },
    CommandInfo { usage: "clear", description: "Clear the server's conversation history" },
    CommandInfo { usage: "search <query> [min=N] [max=N] [category=NAME]", description: "Search the product catalog" },
    CommandInfo { usage: "knowledge <query>", description: "Look up store policies" },
    CommandInfo { usage: "quit", description: "Leave the chat" },
];

/// Service for console commands that bypass the chat endpoint
pub struct CommandService {
    prefix: String,
}

impl CommandService {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub async fn handle<B: ChatBackend>(
        &self,
        backend: &B,
        name: &str,
        args: &[String],
    ) -> Result<CommandReply, CommandError> {
        match name {
            "help" => Ok(CommandReply::Lines(vec![self.get_help()])),
            "history" => {
                let limit = match args.first() {
                    Some(raw) => Some(raw.parse::<usize>().map_err(|_| {
                        CommandError::InvalidArgs(format!("limit must be a number: {}", raw))
                    })?),
                    None => None,
                };
                let history = backend.history().await?;
                if history.is_empty() {
                    return Ok(CommandReply::Lines(vec!["No history yet".to_string()]));
                }
                let skip = limit.map_or(0, |n| history.len().saturating_sub(n));
                let lines = history
                    .iter()
                    .skip(skip)
                    .map(|entry| {
                        let when = entry
                            .timestamp
                            .map(|t| format!("{} ", t.format("%Y-%m-%d %H:%M")))
                            .unwrap_or_default();
                        format!("{}you: {} | assistant: {}", when, entry.user, entry.assistant)
                    })
                    .collect();
                Ok(CommandReply::Lines(lines))
            }
            "clear" => {
                let message = backend.clear_history().await?;
                Ok(CommandReply::Lines(vec![message]))
            }
            "search" => {
                let (query, filters) = parse_search_args(args)?;
                let products = backend.search_products(&query, Some(filters)).await?;
                if products.is_empty() {
                    return Ok(CommandReply::Lines(vec![format!("No products found for \"{}\"", query)]));
                }
                let lines = products
                    .iter()
                    .map(|p| {
                        let mut line = format!("{} - R$ {:.2}", p.name, p.price);
                        if !p.category.is_empty() {
                            line.push_str(&format!(" ({})", p.category));
                        }
                        line
                    })
                    .collect();
                Ok(CommandReply::Lines(lines))
            }
            "knowledge" => {
                if args.is_empty() {
                    return Err(CommandError::InvalidArgs("knowledge needs a query".to_string()));
                }
                let information = backend.query_knowledge(&args.join(" ")).await?;
                if information.is_empty() {
                    return Ok(CommandReply::Lines(vec!["Nothing found".to_string()]));
                }
                Ok(CommandReply::Lines(information))
            }
            "quit" | "exit" => Ok(CommandReply::Quit),
            other => Err(CommandError::NotFound(other.to_string())),
        }
    }

    pub fn get_help(&self) -> String {
        let mut help = "Available commands:\n".to_string();
        for cmd in COMMANDS {
            help.push_str(&format!("  {}{} - {}\n", self.prefix, cmd.usage, cmd.description));
        }
        help.trim_end().to_string()
    }
}

/// Split `/search` arguments into the query and `key=value` filters
fn parse_search_args(args: &[String]) -> Result<(String, ProductFilters), CommandError> {
    let mut filters = ProductFilters::default();
    let mut words = Vec::new();

    for arg in args {
        let Some((key, value)) = arg.split_once('=') else {
            words.push(arg.as_str());
            continue;
        };
        let price = || {
            value.parse::<f64>().map_err(|_| {
                CommandError::InvalidArgs(format!("{} must be a number: {}", key, value))
            })
        };
        match key {
            "min" => filters.min_price = Some(price()?),
            "max" => filters.max_price = Some(price()?),
            "category" => filters.category = Some(value.to_string()),
            _ => words.push(arg.as_str()),
        }
    }

    if words.is_empty() {
        return Err(CommandError::InvalidArgs("search needs a query".to_string()));
    }
    Ok((words.join(" "), filters))
}
