//! printf-style interpolation of render arguments into templates.
//!
//! Supported directives: `%d %s %v %f %q %x %X %%`, with flags `- + 0` and
//! space, width, precision and an explicit argument index (`%[2]d`).
//! Formatting never fails; problems are written into the output the way Go's
//! `fmt` does (`%!d(MISSING)`, `%!d(string=abc)`). Surplus arguments are
//! ignored because a translated template may legitimately skip some.

use std::fmt;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::i18n::plural::PluralOperands;

/// A positional render argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Int(i64),
    Float(f64),
    Str(String),
}

impl Arg {
    /// Infer an argument from free text: integer, then float, then string.
    pub fn infer(text: &str) -> Self {
        if let Ok(value) = text.parse::<i64>() {
            return Arg::Int(value);
        }
        match text.parse::<f64>() {
            Ok(value) if value.is_finite() => Arg::Float(value),
            _ => Arg::Str(text.to_string()),
        }
    }

    /// Operands for plural selection; strings count if they hold a number.
    pub fn plural_operands(&self) -> Option<PluralOperands> {
        match self {
            Arg::Int(value) => Some(PluralOperands::from_int(*value)),
            Arg::Float(value) => PluralOperands::from_float(*value),
            Arg::Str(text) => match Arg::infer(text.trim()) {
                Arg::Str(_) => None,
                number => number.plural_operands(),
            },
        }
    }

    /// Exact integer value, used by `=N` and `<N` cases.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Arg::Int(value) => Some(*value),
            Arg::Float(value) if value.fract() == 0.0 && value.is_finite() => Some(*value as i64),
            Arg::Float(_) => None,
            Arg::Str(text) => text.trim().parse().ok(),
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Arg::Int(_) => "int",
            Arg::Float(_) => "float64",
            Arg::Str(_) => "string",
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Int(value) => write!(f, "{}", value),
            Arg::Float(value) => write!(f, "{}", value),
            Arg::Str(value) => f.write_str(value),
        }
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Arg {
            fn from(value: $t) -> Self {
                Arg::Int(i64::from(value))
            }
        })*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<usize> for Arg {
    fn from(value: usize) -> Self {
        i64::try_from(value).map_or(Arg::Float(value as f64), Arg::Int)
    }
}

impl From<u64> for Arg {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or(Arg::Float(value as f64), Arg::Int)
    }
}

impl From<f32> for Arg {
    fn from(value: f32) -> Self {
        Arg::Float(f64::from(value))
    }
}

impl From<f64> for Arg {
    fn from(value: f64) -> Self {
        Arg::Float(value)
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg::Str(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg::Str(value)
    }
}

/// Upper bound for width and precision taken from a template.
const MAX_FIELD_WIDTH: usize = 1024;

// Cached directive pattern
static DIRECTIVE_REGEX: OnceLock<Regex> = OnceLock::new();

fn directive_regex() -> &'static Regex {
    DIRECTIVE_REGEX.get_or_init(|| {
        Regex::new(
            r"%(?P<flags>[-+ 0#]*)(?:\[(?P<index>\d+)\])?(?P<width>\d+)?(?:\.(?P<precision>\d+))?(?P<verb>[a-zA-Z%])",
        )
        .expect("directive pattern is valid")
    })
}

/// Substitute `args` into `template`.
pub fn sprintf(template: &str, args: &[Arg]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut last = 0;
    let mut next_arg = 0;

    for caps in directive_regex().captures_iter(template) {
        let Some(whole) = caps.get(0) else { continue };
        out.push_str(&template[last..whole.start()]);
        last = whole.end();

        let directive = Directive::from_captures(&caps);
        if directive.verb == '%' {
            out.push('%');
            continue;
        }

        if let Some(index) = caps.name("index") {
            match index.as_str().parse::<usize>() {
                Ok(index) if index >= 1 => next_arg = index - 1,
                _ => {
                    out.push_str(&format!("%!{}(BADINDEX)", directive.verb));
                    continue;
                }
            }
        }

        match args.get(next_arg) {
            Some(arg) => out.push_str(&directive.render(arg)),
            None => out.push_str(&format!("%!{}(MISSING)", directive.verb)),
        }
        next_arg += 1;
    }

    out.push_str(&template[last..]);
    out
}

/// One parsed `%` directive.
#[derive(Debug, Default)]
struct Directive {
    left: bool,
    zero: bool,
    plus: bool,
    space: bool,
    width: Option<usize>,
    precision: Option<usize>,
    verb: char,
}

impl Directive {
    fn from_captures(caps: &Captures<'_>) -> Self {
        let flags = caps.name("flags").map_or("", |m| m.as_str());
        // Digits only, so a parse failure means overflow.
        let number = |name: &str| {
            caps.name(name).map(|m| {
                m.as_str()
                    .parse::<usize>()
                    .unwrap_or(usize::MAX)
                    .min(MAX_FIELD_WIDTH)
            })
        };

        Self {
            left: flags.contains('-'),
            zero: flags.contains('0'),
            plus: flags.contains('+'),
            space: flags.contains(' '),
            width: number("width"),
            precision: number("precision"),
            verb: caps
                .name("verb")
                .and_then(|m| m.as_str().chars().next())
                .unwrap_or('v'),
        }
    }

    fn render(&self, arg: &Arg) -> String {
        let (body, numeric) = match (self.verb, arg) {
            ('d' | 'v', Arg::Int(value)) => (self.signed(value.unsigned_abs().to_string(), *value < 0), true),
            ('x', Arg::Int(value)) => (self.signed(format!("{:x}", value.unsigned_abs()), *value < 0), true),
            ('X', Arg::Int(value)) => (self.signed(format!("{:X}", value.unsigned_abs()), *value < 0), true),
            ('f' | 'F', Arg::Int(_)) => return self.bad_verb(arg),
            ('f' | 'F', Arg::Float(value)) => {
                let digits = format!("{:.*}", self.precision.unwrap_or(6), value.abs());
                (self.signed(digits, value.is_sign_negative()), true)
            }
            ('v', Arg::Float(value)) => (self.signed(value.abs().to_string(), value.is_sign_negative()), true),
            ('s' | 'v', Arg::Str(value)) => (self.truncate(value), false),
            ('q', Arg::Str(value)) => (format!("{:?}", self.truncate(value)), false),
            _ => return self.bad_verb(arg),
        };
        self.pad(body, numeric)
    }

    fn signed(&self, digits: String, negative: bool) -> String {
        let sign = if negative {
            "-"
        } else if self.plus {
            "+"
        } else if self.space {
            " "
        } else {
            ""
        };
        format!("{}{}", sign, digits)
    }

    fn truncate(&self, value: &str) -> String {
        match self.precision {
            Some(limit) => value.chars().take(limit).collect(),
            None => value.to_string(),
        }
    }

    fn pad(&self, body: String, numeric: bool) -> String {
        let len = body.chars().count();
        let Some(width) = self.width.filter(|&width| width > len) else {
            return body;
        };
        let fill = width - len;

        if self.left {
            format!("{}{}", body, " ".repeat(fill))
        } else if self.zero && numeric {
            let sign_len = body.starts_with(['-', '+', ' ']) as usize;
            let (sign, digits) = body.split_at(sign_len);
            format!("{}{}{}", sign, "0".repeat(fill), digits)
        } else {
            format!("{}{}", " ".repeat(fill), body)
        }
    }

    fn bad_verb(&self, arg: &Arg) -> String {
        format!("%!{}({}={})", self.verb, arg.type_name(), arg)
    }
}
