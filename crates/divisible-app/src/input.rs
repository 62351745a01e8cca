//! Line-oriented player input.
//!
//! Each stdin line is either a bare word (`start`, `throw 3`, `menu`, `quit`)
//! or a JSON-encoded `PlayerCommand`.

use anyhow::{bail, Context, Result};

use divisible_core::commands::PlayerCommand;

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputLine {
    Command(PlayerCommand),
    Quit,
    Blank,
}

pub fn parse_line(line: &str) -> Result<InputLine> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(InputLine::Blank);
    }
    if line.starts_with('{') {
        let command: PlayerCommand =
            serde_json::from_str(line).with_context(|| format!("bad command JSON: {line}"))?;
        return Ok(InputLine::Command(command));
    }

    let mut words = line.split_whitespace();
    let verb = words.next().unwrap_or_default().to_ascii_lowercase();
    let parsed = match verb.as_str() {
        "start" | "s" => InputLine::Command(PlayerCommand::StartGame),
        "menu" | "m" => InputLine::Command(PlayerCommand::RequestMenu),
        "quit" | "q" | "exit" => InputLine::Quit,
        "throw" | "t" => {
            let Some(arg) = words.next() else {
                bail!("throw needs a ball value");
            };
            let value = arg
                .parse::<u32>()
                .with_context(|| format!("bad ball value: {arg}"))?;
            InputLine::Command(PlayerCommand::ThrowBall { value })
        }
        // A bare number is a throw.
        other => match other.parse::<u32>() {
            Ok(value) => InputLine::Command(PlayerCommand::ThrowBall { value }),
            Err(_) => bail!("unknown command: {line}"),
        },
    };
    if let Some(extra) = words.next() {
        bail!("unexpected argument: {extra}");
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_words() {
        assert_eq!(
            parse_line("start").unwrap(),
            InputLine::Command(PlayerCommand::StartGame)
        );
        assert_eq!(
            parse_line("  THROW 7 ").unwrap(),
            InputLine::Command(PlayerCommand::ThrowBall { value: 7 })
        );
        assert_eq!(
            parse_line("4").unwrap(),
            InputLine::Command(PlayerCommand::ThrowBall { value: 4 })
        );
        assert_eq!(
            parse_line("menu").unwrap(),
            InputLine::Command(PlayerCommand::RequestMenu)
        );
        assert_eq!(parse_line("q").unwrap(), InputLine::Quit);
        assert_eq!(parse_line("   ").unwrap(), InputLine::Blank);
    }

    #[test]
    fn test_parse_json() {
        assert_eq!(
            parse_line(r#"{"type":"ThrowBall","value":9}"#).unwrap(),
            InputLine::Command(PlayerCommand::ThrowBall { value: 9 })
        );
        assert!(parse_line(r#"{"type":"Pause"}"#).is_err());
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_line("throw").is_err());
        assert!(parse_line("throw x").is_err());
        assert!(parse_line("throw 3 4").is_err());
        assert!(parse_line("dance").is_err());
    }
}
