//! Classification of a single raw argument token.

/// Dash convention used to read single-dash tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// `-abc` is the three options `a`, `b` and `c`.
    Bundling,
    /// `-abc` is the option `a` with the value `bc`.
    SingleDash,
    /// `-abc` is the option `abc`, same as `--abc`.
    #[default]
    Normal,
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bundling" => Ok(Mode::Bundling),
            "singledash" | "single-dash" => Ok(Mode::SingleDash),
            "normal" => Ok(Mode::Normal),
            _ => Err(format!("unknown mode '{}'", s)),
        }
    }
}

/// Option names encoded by one token, plus any value attached to it.
///
/// An empty `names` list means the token is a positional argument. When
/// several names are present (bundling) the inline value belongs to the last.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Classified {
    pub names: Vec<String>,
    pub inline_value: Option<String>,
}

impl Classified {
    fn positional() -> Self {
        Classified::default()
    }

    fn single(name: &str, inline_value: Option<&str>) -> Self {
        Classified {
            names: vec![name.to_string()],
            inline_value: inline_value.map(|s| s.to_string()),
        }
    }

    pub fn is_option(&self) -> bool {
        !self.names.is_empty()
    }
}

/// Split `s` at the first `=`.
fn split_value(s: &str) -> (&str, Option<&str>) {
    match s.find('=') {
        Some(pos) => (&s[..pos], Some(&s[pos + 1..])),
        None => (s, None),
    }
}

pub fn classify(token: &str, mode: Mode) -> Classified {
    if token == "-" || token == "--" {
        return Classified::single(token, None);
    }

    if let Some(long) = token.strip_prefix("--") {
        let (name, value) = split_value(long);
        return Classified::single(name, value);
    }

    let rest = match token.strip_prefix('-') {
        Some(rest) => rest,
        None => return Classified::positional(),
    };

    match mode {
        Mode::Bundling => {
            let (bundle, value) = split_value(rest);
            let mut names: Vec<String> = bundle.chars().map(|c| c.to_string()).collect();
            // "-=x" still names an option, just not a known one
            if names.is_empty() {
                names.push(String::new());
            }
            Classified {
                names,
                inline_value: value.map(|s| s.to_string()),
            }
        }
        Mode::SingleDash => {
            let mut chars = rest.chars();
            // rest is non-empty, "-" was handled above
            let first = chars.next().map(|c| c.to_string()).unwrap_or_default();
            let tail = chars.as_str();
            Classified {
                names: vec![first],
                inline_value: if tail.is_empty() {
                    None
                } else {
                    Some(tail.to_string())
                },
            }
        }
        Mode::Normal => {
            let (name, value) = split_value(rest);
            Classified::single(name, value)
        }
    }
}

/// True if `token` would be read as an option (or the terminator) in `mode`.
pub fn looks_like_option(token: &str, mode: Mode) -> bool {
    classify(token, mode).is_option()
}
