use crate::core::engine::Intent;
use crate::domain::model::{ItemId, SizeId};

pub const HELP: &str = "\
Commands:
  expand <item>                open or close an item
  toggle <item> <size>         switch a size on or off
  price <item> <size> <value>  set the price of a size
  show                         print the menu
  reset                        drop every saved price
  help                         this text
  quit                         leave";

/// One line typed into the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Dispatch(Intent),
    Show,
    Reset,
    Help,
    Quit,
    /// Blank line
    Nothing,
}

pub fn parse_line(line: &str) -> Result<ReplCommand, String> {
    let words: Vec<&str> = line.split_whitespace().collect();

    match words.as_slice() {
        [] => Ok(ReplCommand::Nothing),
        ["expand", item] => Ok(ReplCommand::Dispatch(Intent::ToggleExpanded(ItemId(
            parse_id("item", item)?,
        )))),
        ["toggle", item, size] => Ok(ReplCommand::Dispatch(Intent::ToggleSizeActive(
            ItemId(parse_id("item", item)?),
            SizeId(parse_id("size", size)?),
        ))),
        ["price", item, size, value] => Ok(ReplCommand::Dispatch(Intent::SetPrice(
            ItemId(parse_id("item", item)?),
            SizeId(parse_id("size", size)?),
            value.to_string(),
        ))),
        ["show"] => Ok(ReplCommand::Show),
        ["reset"] => Ok(ReplCommand::Reset),
        ["help"] | ["?"] => Ok(ReplCommand::Help),
        ["quit"] | ["exit"] => Ok(ReplCommand::Quit),
        [command, ..] => Err(format!("Unknown or incomplete command '{}'; try 'help'", command)),
    }
}

fn parse_id(what: &str, raw: &str) -> Result<u32, String> {
    raw.parse()
        .map_err(|_| format!("'{}' is not a valid {} id", raw, what))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_intents() {
        assert_eq!(
            parse_line("expand 3").unwrap(),
            ReplCommand::Dispatch(Intent::ToggleExpanded(ItemId(3)))
        );
        assert_eq!(
            parse_line("  toggle 1 2 ").unwrap(),
            ReplCommand::Dispatch(Intent::ToggleSizeActive(ItemId(1), SizeId(2)))
        );
        assert_eq!(
            parse_line("price 1 2 abc").unwrap(),
            ReplCommand::Dispatch(Intent::SetPrice(ItemId(1), SizeId(2), "abc".to_string()))
        );
    }

    #[test]
    fn test_parse_shell_commands() {
        assert_eq!(parse_line("").unwrap(), ReplCommand::Nothing);
        assert_eq!(parse_line("show").unwrap(), ReplCommand::Show);
        assert_eq!(parse_line("reset").unwrap(), ReplCommand::Reset);
        assert_eq!(parse_line("?").unwrap(), ReplCommand::Help);
        assert_eq!(parse_line("exit").unwrap(), ReplCommand::Quit);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_line("expand pizza").unwrap_err().contains("item id"));
        assert!(parse_line("toggle 1").is_err());
        assert!(parse_line("order 1").is_err());
        assert!(parse_line("toggle 1 -2").unwrap_err().contains("size id"));
    }
}
