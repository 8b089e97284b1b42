//! The parse loop and the public `GetOpt` handle.

use std::collections::{BTreeMap, BTreeSet};

use crate::consumer::consume;
use crate::error::{DefinitionError, Error, Result};
use crate::matcher::{resolve, Match};
use crate::option::{FromValue, Opt, Value};
use crate::registry::{Registry, Target};
use crate::tokenizer::{classify, Mode};

/// What to do with a token naming an option nobody declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownMode {
    #[default]
    Fail,
    /// Log a warning and keep the token as a positional argument.
    Warn,
    /// Keep the token as a positional argument.
    Pass,
}

/// Snapshot of one parse: every option's value, which options were given,
/// and the positional arguments left over.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParseResult {
    pub values: BTreeMap<String, Value>,
    pub called: BTreeSet<String>,
    pub remaining: Vec<String>,
}

/// Option parser: declare options with [`GetOpt::define`], then call
/// [`GetOpt::parse`].
///
/// Options bound to caller variables borrow them for `'a`; drop the parser to
/// read them again.
#[derive(Debug, Default)]
pub struct GetOpt<'a> {
    registry: Registry<'a>,
    mode: Mode,
    unknown_mode: UnknownMode,
    called: BTreeSet<String>,
    remaining: Vec<String>,
}

impl<'a> GetOpt<'a> {
    pub fn new() -> Self {
        GetOpt::default()
    }

    pub fn define(&mut self, opt: Opt<'a>) -> std::result::Result<&mut Self, DefinitionError> {
        self.registry.register(opt)?;
        Ok(self)
    }

    pub fn set_mode(&mut self, mode: Mode) -> &mut Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_unknown_mode(&mut self, unknown_mode: UnknownMode) -> &mut Self {
        self.unknown_mode = unknown_mode;
        self
    }

    /// Parse `args` (without the program name) and return the positional
    /// arguments.
    ///
    /// Every destination, bound variables included, starts from its declared
    /// default. On error, values stored for earlier tokens are kept and
    /// [`GetOpt::remaining`] holds the positionals seen so far.
    pub fn parse<I, S>(&mut self, args: I) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.called.clear();
        self.remaining.clear();
        for def in self.registry.options_mut() {
            def.reset();
        }

        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        log::debug!("parsing {:?} in {:?} mode", args, self.mode);
        let mut tokens = args.into_iter().peekable();

        while let Some(token) = tokens.next() {
            if token == "--" {
                self.remaining.extend(tokens.by_ref());
                log::trace!("terminator seen, {} tokens passed through", self.remaining.len());
                break;
            }

            let classified = classify(&token, self.mode);
            if !classified.is_option() {
                self.remaining.push(token);
                continue;
            }

            let targets = match self.resolve_all(&classified.names)? {
                Some(targets) => targets,
                None => {
                    self.remaining.push(token);
                    continue;
                }
            };

            // only the last name of a bundle may take a value
            let last = targets.len() - 1;
            for target in &targets[..last] {
                let def = self.registry.get(target.index);
                if def.takes_value() {
                    return Err(Error::BundledValue(def.name.clone()));
                }
            }

            let mut inline = classified.inline_value;
            for (i, target) in targets.into_iter().enumerate() {
                let value = if i == last { inline.take() } else { None };
                let input = consume(self.registry.get(target.index), value, &mut tokens, self.mode)?;
                let def = self.registry.get_mut(target.index);
                def.accumulate(target.negated, input)?;
                log::debug!("option '{}' set to {}", def.name, def.value());
                self.called.insert(def.name.clone());
            }
        }

        Ok(self.remaining.clone())
    }

    /// Resolve every name of one token. `None` means the token is to be kept
    /// as a positional because of the unknown-option policy.
    fn resolve_all(&self, names: &[String]) -> Result<Option<Vec<Target>>> {
        let mut targets = Vec::with_capacity(names.len());
        for name in names {
            match resolve(name, &self.registry) {
                Match::Exact(target) => targets.push(target),
                Match::Prefix(target) => {
                    log::trace!(
                        "'{}' abbreviates '{}'",
                        name,
                        self.registry.get(target.index).name
                    );
                    targets.push(target);
                }
                Match::Ambiguous(candidates) => {
                    return Err(Error::AmbiguousOption {
                        name: name.clone(),
                        candidates,
                    });
                }
                Match::Unknown => match self.unknown_mode {
                    UnknownMode::Fail => return Err(Error::UnknownOption(name.clone())),
                    UnknownMode::Warn => {
                        log::warn!("Unknown option '{}'", name);
                        return Ok(None);
                    }
                    UnknownMode::Pass => return Ok(None),
                },
            }
        }
        Ok(Some(targets))
    }

    /// Current value of the option with canonical name `name`.
    pub fn value(&self, name: &str) -> Option<Value> {
        self.registry.find(name).map(|def| def.value())
    }

    pub fn get<T: FromValue>(&self, name: &str) -> Result<T> {
        let value = self
            .value(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))?;
        T::from_value(&value).ok_or_else(|| Error::TypeMismatch {
            name: name.to_string(),
            expected: T::EXPECTED,
        })
    }

    /// Whether the option appeared in the last parsed input.
    pub fn is_called(&self, name: &str) -> bool {
        self.called.contains(name)
    }

    pub fn called(&self) -> &BTreeSet<String> {
        &self.called
    }

    pub fn remaining(&self) -> &[String] {
        &self.remaining
    }

    pub fn result(&self) -> ParseResult {
        ParseResult {
            values: self
                .registry
                .options()
                .map(|def| (def.name.clone(), def.value()))
                .collect(),
            called: self.called.clone(),
            remaining: self.remaining.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminator_passes_everything_through() {
        let mut opt = GetOpt::new();
        opt.define(Opt::bool("hello", false))
            .unwrap()
            .define(Opt::bool("world", false))
            .unwrap();
        let remaining = opt
            .parse(["hola", "--hello", "--", "mundo", "--world"])
            .unwrap();
        assert_eq!(remaining, vec!["hola", "mundo", "--world"]);
        assert!(opt.is_called("hello"));
        assert!(!opt.is_called("world"));
    }

    #[test]
    fn bundle_sets_every_flag() {
        let mut opt = GetOpt::new();
        opt.set_mode(Mode::Bundling);
        opt.define(Opt::bool("a", false)).unwrap();
        opt.define(Opt::bool("b", false)).unwrap();
        opt.define(Opt::string("c", "")).unwrap();
        let remaining = opt.parse(["-abc", "value", "rest"]).unwrap();
        assert_eq!(remaining, vec!["rest"]);
        assert!(opt.get::<bool>("a").unwrap());
        assert!(opt.get::<bool>("b").unwrap());
        assert_eq!(opt.get::<String>("c").unwrap(), "value");
    }

    #[test]
    fn bundle_inline_value_goes_to_last() {
        let mut opt = GetOpt::new();
        opt.set_mode(Mode::Bundling);
        opt.define(Opt::bool("a", false)).unwrap();
        opt.define(Opt::string("c", "")).unwrap();
        opt.parse(["-ac=value"]).unwrap();
        assert_eq!(opt.get::<String>("c").unwrap(), "value");
    }

    #[test]
    fn value_option_inside_bundle_is_rejected() {
        let mut opt = GetOpt::new();
        opt.set_mode(Mode::Bundling);
        opt.define(Opt::string("c", "")).unwrap();
        opt.define(Opt::bool("a", false)).unwrap();
        let err = opt.parse(["-ca"]).unwrap_err();
        assert_eq!(err, Error::BundledValue("c".into()));
        // the bundle is rejected as a whole
        assert!(!opt.is_called("a"));
    }

    #[test]
    fn optional_int_inside_bundle_is_rejected() {
        let mut opt = GetOpt::new();
        opt.set_mode(Mode::Bundling);
        opt.define(Opt::int_optional("l", 1)).unwrap();
        opt.define(Opt::bool("a", false)).unwrap();
        let err = opt.parse(["-la"]).unwrap_err();
        assert_eq!(err, Error::BundledValue("l".into()));
        assert!(!opt.is_called("a"));
        assert!(!opt.is_called("l"));
    }

    #[test]
    fn missing_value_at_end_of_bundle_keeps_earlier_flags() {
        let mut opt = GetOpt::new();
        opt.set_mode(Mode::Bundling);
        opt.define(Opt::bool("a", false)).unwrap();
        opt.define(Opt::int("c", 0)).unwrap();
        let err = opt.parse(["-ac"]).unwrap_err();
        assert_eq!(err, Error::MissingArgument("c".into()));
        assert!(opt.is_called("a"));
        assert!(opt.get::<bool>("a").unwrap());
        assert!(!opt.is_called("c"));
    }

    #[test]
    fn single_dash_mode_reads_attached_value() {
        let mut opt = GetOpt::new();
        opt.set_mode(Mode::SingleDash);
        opt.define(Opt::string("o", "")).unwrap();
        opt.parse(["-ofile.txt"]).unwrap();
        assert_eq!(opt.get::<String>("o").unwrap(), "file.txt");
    }

    #[test]
    fn error_keeps_committed_state() {
        let mut opt = GetOpt::new();
        opt.define(Opt::bool("flag", false)).unwrap();
        let err = opt.parse(["first", "--flag", "--bogus", "last"]).unwrap_err();
        assert_eq!(err, Error::UnknownOption("bogus".into()));
        assert_eq!(opt.remaining(), ["first"]);
        assert!(opt.is_called("flag"));
        assert!(opt.get::<bool>("flag").unwrap());
    }

    #[test]
    fn unknown_pass_keeps_token() {
        let mut opt = GetOpt::new();
        opt.set_unknown_mode(UnknownMode::Pass);
        opt.define(Opt::bool("flag", false)).unwrap();
        let remaining = opt.parse(["--bogus=1", "--flag", "x"]).unwrap();
        assert_eq!(remaining, vec!["--bogus=1", "x"]);
        assert!(opt.is_called("flag"));
    }

    #[test]
    fn unknown_warn_keeps_whole_bundle() {
        let mut opt = GetOpt::new();
        opt.set_mode(Mode::Bundling).set_unknown_mode(UnknownMode::Warn);
        opt.define(Opt::bool("a", false)).unwrap();
        let remaining = opt.parse(["-az"]).unwrap();
        assert_eq!(remaining, vec!["-az"]);
        assert!(!opt.is_called("a"));
    }

    #[test]
    fn ambiguity_is_fatal_even_when_passing_unknowns() {
        let mut opt = GetOpt::new();
        opt.set_unknown_mode(UnknownMode::Pass);
        opt.define(Opt::bool("flag", false)).unwrap();
        opt.define(Opt::bool("fleg", false)).unwrap();
        let err = opt.parse(["--fl"]).unwrap_err();
        assert_eq!(
            err,
            Error::AmbiguousOption {
                name: "fl".into(),
                candidates: vec!["flag".into(), "fleg".into()],
            }
        );
    }

    #[test]
    fn lone_dash_is_unknown_unless_declared() {
        let mut opt = GetOpt::new();
        assert_eq!(opt.parse(["-"]).unwrap_err(), Error::UnknownOption("-".into()));

        let mut opt = GetOpt::new();
        opt.define(Opt::bool("-", false)).unwrap();
        assert!(opt.parse(["-"]).unwrap().is_empty());
        assert!(opt.is_called("-"));
    }

    #[test]
    fn called_is_reset_between_parses() {
        let mut opt = GetOpt::new();
        opt.define(Opt::bool("flag", false)).unwrap();
        opt.parse(["--flag"]).unwrap();
        assert!(opt.is_called("flag"));
        opt.parse(Vec::<String>::new()).unwrap();
        assert!(!opt.is_called("flag"));
        assert!(!opt.get::<bool>("flag").unwrap());
    }

    #[test]
    fn list_starts_empty_on_each_parse() {
        let mut opt = GetOpt::new();
        opt.define(Opt::string_list("item")).unwrap();
        opt.parse(["--item", "a"]).unwrap();
        opt.parse(["--item", "b"]).unwrap();
        assert_eq!(opt.value("item"), Some(Value::List(vec!["b".into()])));
    }

    #[test]
    fn mode_defaults_to_normal() {
        let mut opt = GetOpt::new();
        assert_eq!(opt.mode(), Mode::Normal);
        opt.set_mode(Mode::Bundling);
        assert_eq!(opt.mode(), Mode::Bundling);
    }

    #[test]
    fn get_reports_missing_and_mismatched() {
        let mut opt = GetOpt::new();
        opt.define(Opt::int("int", 0)).unwrap();
        assert_eq!(opt.get::<i64>("nope").unwrap_err(), Error::NotFound("nope".into()));
        assert_eq!(
            opt.get::<String>("int").unwrap_err(),
            Error::TypeMismatch {
                name: "int".into(),
                expected: "String"
            }
        );
    }

    #[test]
    fn result_snapshot_lists_every_option() {
        let mut opt = GetOpt::new();
        opt.define(Opt::bool("flag", false)).unwrap();
        opt.define(Opt::string("name", "anon")).unwrap();
        opt.parse(["--flag", "pos"]).unwrap();
        let result = opt.result();
        assert_eq!(result.values.len(), 2);
        assert_eq!(result.values["name"], Value::Str("anon".into()));
        assert_eq!(result.called.iter().collect::<Vec<_>>(), vec!["flag"]);
        assert_eq!(result.remaining, vec!["pos"]);
    }
}
