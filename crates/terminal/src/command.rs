//! Shopper commands typed at the prompt.

use thiserror::Error;

use orderform_catalog::VariantId;
use orderform_contact::FieldId;
use orderform_form::UiEvent;
use orderform_selection::QuantityStep;

pub const HELP: &str = "\
commands:
  select <color>          pick a color variant
  + | -                   change quantity of the selected color
  ship <method>           choose a shipping option
  name|phone|address <t>  fill a contact field
  submit                  place the order
  scroll <px>             report page scroll offset
  top                     back to top
  ok                      dismiss the notice
  time                    show the offer countdown
  help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Select(String),
    Step(QuantityStep),
    Ship(String),
    Contact(FieldId, String),
    Submit,
    Scroll(f64),
    Top,
    Dismiss,
    Time,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),

    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    #[error("invalid scroll offset `{0}`")]
    InvalidOffset(String),
}

/// Parse one line. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Input>, InputError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let arg = |name: &'static str| {
        if rest.is_empty() {
            Err(InputError::MissingArgument(name))
        } else {
            Ok(rest.to_string())
        }
    };

    let input = match word.to_ascii_lowercase().as_str() {
        "select" | "color" => Input::Select(arg("select")?),
        "+" | "plus" => Input::Step(QuantityStep::Increment),
        "-" | "minus" => Input::Step(QuantityStep::Decrement),
        "ship" => Input::Ship(arg("ship")?),
        // contact fields may legitimately be cleared
        "name" => Input::Contact(FieldId::Name, rest.to_string()),
        "phone" => Input::Contact(FieldId::Phone, rest.to_string()),
        "address" => Input::Contact(FieldId::Address, rest.to_string()),
        "submit" | "order" => Input::Submit,
        "scroll" => {
            let raw = arg("scroll")?;
            let offset = raw
                .parse::<f64>()
                .map_err(|_| InputError::InvalidOffset(raw.clone()))?;
            Input::Scroll(offset)
        }
        "top" => Input::Top,
        "ok" | "dismiss" => Input::Dismiss,
        "time" => Input::Time,
        "help" | "?" => Input::Help,
        "quit" | "exit" => Input::Quit,
        other => return Err(InputError::Unknown(other.to_string())),
    };
    Ok(Some(input))
}

impl Input {
    /// Translate into a control activation, using the storefront element ids.
    ///
    /// Steppers act on `selected`. Commands handled by the host itself
    /// (contact text, help, time, quit) return `None`.
    pub fn to_event(&self, selected: &VariantId) -> Option<UiEvent<String>> {
        let target = match self {
            Input::Select(variant) => format!("product-{}", variant.to_ascii_lowercase()),
            Input::Step(QuantityStep::Increment) => format!("btn-plus-{selected}"),
            Input::Step(QuantityStep::Decrement) => format!("btn-minus-{selected}"),
            Input::Ship(method) => format!("shipping-{method}"),
            Input::Submit => "order-form".to_string(),
            Input::Top => "back-to-top".to_string(),
            Input::Scroll(offset_y) => return Some(UiEvent::Scroll { offset_y: *offset_y }),
            Input::Dismiss => return Some(UiEvent::DismissNotice),
            Input::Contact(..) | Input::Time | Input::Help | Input::Quit => return None,
        };
        Some(UiEvent::Click(target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(parse_line("   "), Ok(None));
        assert_eq!(
            parse_line("select Blue"),
            Ok(Some(Input::Select("Blue".to_string())))
        );
        assert_eq!(
            parse_line("+"),
            Ok(Some(Input::Step(QuantityStep::Increment)))
        );
        assert_eq!(
            parse_line("name  Karim Uddin "),
            Ok(Some(Input::Contact(FieldId::Name, "Karim Uddin".to_string())))
        );
        assert_eq!(parse_line("scroll 1600"), Ok(Some(Input::Scroll(1600.0))));
        assert_eq!(parse_line("QUIT"), Ok(Some(Input::Quit)));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            parse_line("dance"),
            Err(InputError::Unknown("dance".to_string()))
        );
        assert_eq!(
            parse_line("select"),
            Err(InputError::MissingArgument("select"))
        );
        assert_eq!(
            parse_line("scroll far"),
            Err(InputError::InvalidOffset("far".to_string()))
        );
    }

    #[test]
    fn maps_to_storefront_controls() {
        let black = VariantId::new("black").unwrap();
        assert_eq!(
            Input::Step(QuantityStep::Decrement).to_event(&black),
            Some(UiEvent::Click("btn-minus-black".to_string()))
        );
        assert_eq!(
            Input::Select("White".to_string()).to_event(&black),
            Some(UiEvent::Click("product-white".to_string()))
        );
        assert_eq!(
            Input::Ship("inside_dhaka".to_string()).to_event(&black),
            Some(UiEvent::Click("shipping-inside_dhaka".to_string()))
        );
        assert_eq!(Input::Help.to_event(&black), None);
    }
}
