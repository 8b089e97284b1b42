//! Picks the value, if any, that a matched option consumes.

use std::iter::Peekable;

use crate::error::{Error, Result};
use crate::option::{Arity, Input, Kind, OptionDef, Value};
use crate::tokenizer::{looks_like_option, Mode};

/// Obtain the value for one occurrence of `def`.
///
/// A required value takes the next token unconditionally; an optional one
/// only takes it when it is not option-shaped under `mode`.
pub(crate) fn consume<I>(
    def: &OptionDef<'_>,
    inline: Option<String>,
    tokens: &mut Peekable<I>,
    mode: Mode,
) -> Result<Input>
where
    I: Iterator<Item = String>,
{
    let raw = match def.arity {
        Arity::None => return Ok(Input::Flag),
        Arity::Required => match inline {
            Some(v) => v,
            None => tokens
                .next()
                .ok_or_else(|| Error::MissingArgument(def.name.clone()))?,
        },
        Arity::Optional => match inline {
            Some(v) => v,
            None => match tokens.next_if(|t| !looks_like_option(t, mode)) {
                Some(v) => v,
                None => {
                    log::trace!("option '{}' falls back to its default", def.name);
                    return Ok(from_default(&def.default));
                }
            },
        },
    };
    coerce(def, raw)
}

fn coerce(def: &OptionDef<'_>, raw: String) -> Result<Input> {
    match def.kind {
        Kind::Integer => raw.parse::<i64>().map(Input::Int).map_err(|_| Error::Conversion {
            name: def.name.clone(),
            literal: raw.clone(),
        }),
        _ => Ok(Input::Text(raw)),
    }
}

fn from_default(default: &Value) -> Input {
    match default {
        Value::Str(s) => Input::Text(s.clone()),
        Value::Int(n) => Input::Int(*n),
        // only String and Integer options take optional values
        _ => Input::Flag,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::Opt;

    fn stream(tokens: &[&str]) -> Peekable<std::vec::IntoIter<String>> {
        tokens
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .into_iter()
            .peekable()
    }

    #[test]
    fn flag_ignores_inline_value() {
        let def = Opt::bool("flag", false).into_def();
        let mut tokens = stream(&["next"]);
        let input = consume(&def, Some("x".into()), &mut tokens, Mode::Normal).unwrap();
        assert_eq!(input, Input::Flag);
        assert_eq!(tokens.next().as_deref(), Some("next"));
    }

    #[test]
    fn required_prefers_inline_value() {
        let def = Opt::string("string", "").into_def();
        let mut tokens = stream(&["world"]);
        let input = consume(&def, Some("hello".into()), &mut tokens, Mode::Normal).unwrap();
        assert_eq!(input, Input::Text("hello".into()));
        assert_eq!(tokens.next().as_deref(), Some("world"));
    }

    #[test]
    fn required_takes_option_shaped_token() {
        let def = Opt::string("string", "").into_def();
        let mut tokens = stream(&["--hello", "world"]);
        let input = consume(&def, None, &mut tokens, Mode::Normal).unwrap();
        assert_eq!(input, Input::Text("--hello".into()));
    }

    #[test]
    fn required_at_end_of_stream_is_missing() {
        let def = Opt::string("string", "").into_def();
        let mut tokens = stream(&[]);
        let err = consume(&def, None, &mut tokens, Mode::Normal).unwrap_err();
        assert_eq!(err, Error::MissingArgument("string".into()));
        assert_eq!(err.to_string(), "Missing argument for option 'string'!");
    }

    #[test]
    fn optional_skips_option_shaped_token() {
        let def = Opt::string_optional("string", "default").into_def();
        let mut tokens = stream(&["--other"]);
        let input = consume(&def, None, &mut tokens, Mode::Normal).unwrap();
        assert_eq!(input, Input::Text("default".into()));
        assert_eq!(tokens.next().as_deref(), Some("--other"));
    }

    #[test]
    fn optional_takes_plain_token() {
        let def = Opt::int_optional("level", 1).into_def();
        let mut tokens = stream(&["3"]);
        let input = consume(&def, None, &mut tokens, Mode::Normal).unwrap();
        assert_eq!(input, Input::Int(3));
    }

    #[test]
    fn optional_uses_default_at_end_of_stream() {
        let def = Opt::int_optional("level", 1).into_def();
        let mut tokens = stream(&[]);
        assert_eq!(consume(&def, None, &mut tokens, Mode::Normal).unwrap(), Input::Int(1));
    }

    #[test]
    fn integer_conversion_failure_names_literal() {
        let def = Opt::int("int", 0).into_def();
        let mut tokens = stream(&[]);
        let err = consume(&def, Some("hello".into()), &mut tokens, Mode::Normal).unwrap_err();
        assert_eq!(
            err,
            Error::Conversion {
                name: "int".into(),
                literal: "hello".into()
            }
        );
        assert_eq!(err.to_string(), "Can't convert string to int: 'hello'");
    }
}
