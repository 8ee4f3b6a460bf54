//! Line-based events read by the `waybutton-rs` binary.
//!
//! One event per line:
//!
//! ```text
//! 42                    set the percentage
//! value 42              same
//! category warning,low  set icon categories (empty clears)
//! click 3               click with button 3 (or left/middle/right/...)
//! press                 widget activation, same as button 1
//! ```

use crate::click::ClickButton;
use std::str::FromStr;
use waybutton_rs_core::{ButtonError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Value(u16),
    Categories(Vec<String>),
    Click(ClickButton),
    Press,
}

impl FromStr for InputEvent {
    type Err = ButtonError;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (command, argument) = match line.split_once(char::is_whitespace) {
            Some((command, argument)) => (command, argument.trim()),
            None => (line, ""),
        };

        match command.to_ascii_lowercase().as_str() {
            "value" => parse_value(argument),
            "category" | "categories" => Ok(Self::Categories(
                argument
                    .split(',')
                    .map(str::trim)
                    .filter(|category| !category.is_empty())
                    .map(str::to_owned)
                    .collect(),
            )),
            "click" if !argument.is_empty() => argument.parse().map(Self::Click),
            "press" if argument.is_empty() => Ok(Self::Press),
            _ if argument.is_empty() && !command.is_empty() => parse_value(command),
            _ => Err(ButtonError::invalid_input("Unrecognized event", line)),
        }
    }
}

fn parse_value(argument: &str) -> Result<InputEvent> {
    argument
        .parse::<u16>()
        .map(InputEvent::Value)
        .map_err(|e| ButtonError::InvalidInput {
            message: format!("Expected a value between 0 and {}: {}", u16::MAX, e),
            input: Some(argument.to_owned()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values() {
        assert_eq!("42".parse::<InputEvent>().unwrap(), InputEvent::Value(42));
        assert_eq!(" value  7 ".parse::<InputEvent>().unwrap(), InputEvent::Value(7));
        assert!("value -1".parse::<InputEvent>().is_err());
        assert!("70000".parse::<InputEvent>().is_err());
    }

    #[test]
    fn test_clicks() {
        assert_eq!(
            "click 3".parse::<InputEvent>().unwrap(),
            InputEvent::Click(ClickButton::Secondary)
        );
        assert_eq!(
            "CLICK middle".parse::<InputEvent>().unwrap(),
            InputEvent::Click(ClickButton::Middle)
        );
        assert_eq!("press".parse::<InputEvent>().unwrap(), InputEvent::Press);
        assert!("click".parse::<InputEvent>().is_err());
        assert!("click sideways".parse::<InputEvent>().is_err());
    }

    #[test]
    fn test_categories() {
        assert_eq!(
            "category charging, full".parse::<InputEvent>().unwrap(),
            InputEvent::Categories(vec!["charging".to_owned(), "full".to_owned()])
        );
        assert_eq!(
            "category".parse::<InputEvent>().unwrap(),
            InputEvent::Categories(Vec::new())
        );
    }

    #[test]
    fn test_garbage() {
        assert!(matches!(
            "".parse::<InputEvent>(),
            Err(ButtonError::InvalidInput { .. })
        ));
        assert!("jump 3".parse::<InputEvent>().is_err());
        assert!("hello".parse::<InputEvent>().is_err());
    }
}
