/// Header dialects accepted by the line parser.
///
/// Chat exports write the message time either with a 12-hour clock and an
/// AM/PM suffix or with a bare 24-hour clock. Which of the two are accepted
/// is configurable so that an unexpected export variant is skipped rather
/// than guessed at.
use clap::ValueEnum;

/// Clock convention used in a message header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum HeaderDialect {
    /// `9:05 PM` style, hour 1-12 followed by AM or PM (any case)
    #[value(name = "12h")]
    TwelveHour,
    /// `21:05` style, hour already in 0-23
    #[value(name = "24h")]
    TwentyFourHour,
}

/// Parser configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    pub dialects: Vec<HeaderDialect>,
}

impl ParserConfig {
    /// Accept only the given dialects. An empty list falls back to all of them.
    pub fn with_dialects(dialects: &[HeaderDialect]) -> Self {
        if dialects.is_empty() {
            return Self::default();
        }
        let mut accepted = Vec::with_capacity(dialects.len());
        for dialect in dialects {
            if !accepted.contains(dialect) {
                accepted.push(*dialect);
            }
        }
        Self { dialects: accepted }
    }

    pub fn accepts(&self, dialect: HeaderDialect) -> bool {
        self.dialects.contains(&dialect)
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            dialects: vec![HeaderDialect::TwelveHour, HeaderDialect::TwentyFourHour],
        }
    }
}
