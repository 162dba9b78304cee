//! Interactive session on stdin.
//!
//! Loads the outlet list once, then reads one command per line. Each command
//! maps to a single event on the shared state, so a click followed by a
//! search behaves exactly as it would on the map.

use std::io::Write;

use outletmap_core::AppConfig;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::commands::open_session;
use crate::render::{print_highlighted, print_markers, print_popup};
use crate::session::Session;

const HELP: &str = "\
commands:
  list                 show every marker
  highlighted          show only highlighted markers
  click <index|name>   select a marker and highlight outlets nearby
  search <text>        search by location or closing time (empty text allowed)
  reload               fetch the outlet list again
  help                 show this help
  quit                 leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum MarkerTarget {
    Index(usize),
    Name(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ShellCommand {
    List,
    Highlighted,
    Click(MarkerTarget),
    Search(String),
    Reload,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub(crate) fn parse_command(line: &str) -> Result<Option<ShellCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "list" | "ls" => ShellCommand::List,
        "highlighted" => ShellCommand::Highlighted,
        "click" => {
            if rest.is_empty() {
                return Err("usage: click <index|name>".to_string());
            }
            let target = rest
                .parse::<usize>()
                .map_or_else(|_| MarkerTarget::Name(rest.to_string()), MarkerTarget::Index);
            ShellCommand::Click(target)
        }
        "search" => ShellCommand::Search(rest.to_string()),
        "reload" => ShellCommand::Reload,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => return Err(format!("unknown command \"{other}\"; type help")),
    };
    Ok(Some(command))
}

/// Run the interactive session until `quit` or end of input.
///
/// # Errors
///
/// Returns an error if the API client cannot be built or stdin cannot be read.
pub(crate) async fn run_shell(config: &AppConfig) -> anyhow::Result<()> {
    let mut session = open_session(config, None).await?;
    print_markers(session.state());
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match parse_command(&line) {
            Ok(Some(ShellCommand::Quit)) => break,
            Ok(Some(command)) => execute(&mut session, command).await,
            Ok(None) => {}
            Err(message) => println!("{message}"),
        }
    }
    Ok(())
}

async fn execute(session: &mut Session, command: ShellCommand) {
    match command {
        ShellCommand::List => print_markers(session.state()),
        ShellCommand::Highlighted => print_highlighted(session.state()),
        ShellCommand::Click(target) => {
            let clicked = match target {
                MarkerTarget::Index(index) => session.click(index).await.then_some(index),
                MarkerTarget::Name(name) => session.click_name(&name).await,
            };
            match clicked {
                Some(index) => {
                    print_popup(session.state(), index);
                    print_highlighted(session.state());
                }
                None => println!("no such marker"),
            }
        }
        ShellCommand::Search(query) => {
            session.search(&query).await;
            print_highlighted(session.state());
        }
        ShellCommand::Reload => {
            session.load().await;
            print_markers(session.state());
        }
        ShellCommand::Help => println!("{HELP}"),
        ShellCommand::Quit => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_line_is_no_command() {
        assert_eq!(parse_command("   "), Ok(None));
    }

    #[test]
    fn click_by_index() {
        assert_eq!(
            parse_command("click 3"),
            Ok(Some(ShellCommand::Click(MarkerTarget::Index(3))))
        );
    }

    #[test]
    fn click_by_name_keeps_inner_spaces() {
        assert_eq!(
            parse_command("click  Subway Mid Valley "),
            Ok(Some(ShellCommand::Click(MarkerTarget::Name(
                "Subway Mid Valley".to_string()
            ))))
        );
    }

    #[test]
    fn click_without_target_is_an_error() {
        assert!(parse_command("click").is_err());
    }

    #[test]
    fn search_allows_empty_text() {
        assert_eq!(
            parse_command("search"),
            Ok(Some(ShellCommand::Search(String::new())))
        );
        assert_eq!(
            parse_command("SEARCH Bukit Bintang"),
            Ok(Some(ShellCommand::Search("Bukit Bintang".to_string())))
        );
    }

    #[test]
    fn aliases_parse() {
        assert_eq!(parse_command("ls"), Ok(Some(ShellCommand::List)));
        assert_eq!(parse_command("exit"), Ok(Some(ShellCommand::Quit)));
        assert_eq!(parse_command("?"), Ok(Some(ShellCommand::Help)));
        assert_eq!(parse_command("reload"), Ok(Some(ShellCommand::Reload)));
        assert_eq!(
            parse_command("highlighted"),
            Ok(Some(ShellCommand::Highlighted))
        );
    }

    #[test]
    fn unknown_verb_is_an_error() {
        let err = parse_command("teleport home").unwrap_err();
        assert!(err.contains("teleport"));
    }
}
