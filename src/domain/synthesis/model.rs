use serde::{Deserialize, Serialize};

/// Hard limit the voice endpoint enforces on one synthesis request,
/// measured in characters (not bytes).
pub const MAX_TEXT_CHARS: usize = 200;

/// Pronunciation speed vocabulary of the voice endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Speed {
    #[default]
    Normal,
    Slower,
    Slowest,
}

impl Speed {
    /// Integer encoding used by the wire protocol.
    pub fn code(self) -> u8 {
        match self {
            Speed::Normal => 0,
            Speed::Slower => 1,
            Speed::Slowest => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Speed::Normal => "normal",
            Speed::Slower => "slower",
            Speed::Slowest => "slowest",
        }
    }

    /// Case-insensitive parse. Unrecognized input maps to `Normal` rather
    /// than erroring; existing option files rely on the fallback.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "slower" => Speed::Slower,
            "slowest" => Speed::Slowest,
            _ => Speed::Normal,
        }
    }
}

impl From<String> for Speed {
    fn from(s: String) -> Self {
        Speed::parse(&s)
    }
}

impl std::fmt::Display for Speed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Language/voice code recognized by the remote service, e.g. `th` or
/// `en-GB`. Opaque to this crate; an invalid code only surfaces as a remote
/// failure or an undecodable response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice(String);

impl Voice {
    pub fn new(code: impl Into<String>) -> Self {
        Voice(code.into())
    }

    /// Option-file folding rule: codes are lowercased unless they carry a
    /// region part (`en-GB` stays as written).
    pub fn normalized(code: &str) -> Self {
        if code.contains('-') {
            Voice(code.to_string())
        } else {
            Voice(code.to_lowercase())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Voice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One synthesis request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opt {
    pub text: String,
    pub voice: Voice,
    pub speed: Speed,
}

impl Opt {
    pub fn new(text: impl Into<String>, voice: Voice, speed: Speed) -> Self {
        Self {
            text: text.into(),
            voice,
            speed,
        }
    }

    /// Request size in the units the endpoint limit is expressed in.
    pub fn text_chars(&self) -> usize {
        self.text.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn speed_parses_case_insensitively() {
        assert_eq!(Speed::parse("slower"), Speed::Slower);
        assert_eq!(Speed::parse("SLOWEST"), Speed::Slowest);
        assert_eq!(Speed::parse("Normal"), Speed::Normal);
    }

    // Deliberate policy carried over from existing option files: unknown
    // speed strings are not an error.
    #[test]
    fn unknown_speed_falls_back_to_normal() {
        assert_eq!(Speed::parse("warp"), Speed::Normal);
        assert_eq!(Speed::parse(""), Speed::Normal);
    }

    #[test]
    fn speed_codes_match_the_wire_protocol() {
        assert_eq!(Speed::Normal.code(), 0);
        assert_eq!(Speed::Slower.code(), 1);
        assert_eq!(Speed::Slowest.code(), 2);
    }

    #[test]
    fn speed_round_trips_through_its_string_form() {
        for speed in [Speed::Normal, Speed::Slower, Speed::Slowest] {
            assert_eq!(Speed::parse(speed.as_str()), speed);
        }
    }

    #[test]
    fn voice_without_region_is_lowercased() {
        assert_eq!(Voice::normalized("TH").as_str(), "th");
        assert_eq!(Voice::normalized("de").as_str(), "de");
    }

    #[test]
    fn voice_with_region_keeps_its_case() {
        assert_eq!(Voice::normalized("en-GB").as_str(), "en-GB");
    }

    #[test]
    fn text_length_counts_characters_not_bytes() {
        let opt = Opt::new("สวัสดี", Voice::new("th"), Speed::Normal);
        assert_eq!(opt.text_chars(), 6);
        assert!(opt.text.len() > 6);
    }
}
