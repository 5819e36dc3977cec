use crate::domain::ThemeName;
use anyhow::{anyhow, bail, Result};

pub const USAGE: &str = "usage: chat-theme <get | set <theme> | list | watch>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliCommand {
    Get,
    Set(ThemeName),
    List,
    Watch,
}

impl CliCommand {
    /// Parses the arguments after the program name. No arguments means `get`.
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<S> = args.into_iter().collect();
        let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();

        match args.as_slice() {
            [] | ["get"] => Ok(CliCommand::Get),
            ["list"] => Ok(CliCommand::List),
            ["watch"] => Ok(CliCommand::Watch),
            ["set", name] => {
                let theme = name
                    .parse::<ThemeName>()
                    .map_err(|e| anyhow!("{e}; run `chat-theme list` to see the available themes"))?;
                Ok(CliCommand::Set(theme))
            }
            _ => bail!("{USAGE}"),
        }
    }
}

/// One line per theme; the current one is marked with `*`.
#[must_use]
pub fn format_list(current: ThemeName) -> String {
    ThemeName::all()
        .iter()
        .map(|t| {
            let marker = if *t == current { '*' } else { ' ' };
            let scheme = if t.is_dark() { "dark" } else { "light" };
            format!("{marker} {:<10} {:<10} {scheme}", t.as_str(), t.label())
        })
        .collect::<Vec<_>>()
        .join("\n")
}
