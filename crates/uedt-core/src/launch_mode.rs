use std::ops::{BitOr, BitOrAssign};

use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LaunchMode(u8);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown launch mode token '{token}' (expected one of {expected})")]
pub struct LaunchModeParseError {
    pub token: String,
    pub expected: String,
}

impl LaunchMode {
    pub const OPTIMIZED: LaunchMode = LaunchMode(1);
    pub const TRACE: LaunchMode = LaunchMode(1 << 1);
    pub const DEBUG: LaunchMode = LaunchMode(1 << 2);

    const KNOWN: &'static [(&'static str, LaunchMode)] = &[
        ("opti", Self::OPTIMIZED),
        ("trace", Self::TRACE),
        ("debug", Self::DEBUG),
    ];

    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn known_tokens() -> Vec<&'static str> {
        Self::KNOWN.iter().map(|(token, _)| *token).collect()
    }

    pub fn parse(raw: &str) -> Self {
        tokens(raw)
            .filter_map(|token| Self::lookup(&token))
            .fold(Self::empty(), BitOr::bitor)
    }

    pub fn parse_strict(raw: &str) -> Result<Self, LaunchModeParseError> {
        let mut mode = Self::empty();

        for token in tokens(raw) {
            match Self::lookup(&token) {
                Some(bit) => mode |= bit,
                None => {
                    return Err(LaunchModeParseError {
                        token,
                        expected: Self::known_tokens().join(", "),
                    });
                }
            }
        }

        Ok(mode)
    }

    pub fn expand(self) -> Vec<String> {
        let mut args = Vec::new();

        if self.contains(Self::DEBUG) {
            args.push("-debug".to_string());
        }

        if self.contains(Self::OPTIMIZED) {
            args.extend(
                [
                    "-noailogging",
                    "-nosound",
                    "-novsync",
                    "-nogpucrashdebugging",
                    "-nomcp",
                    "-noscreenmessages",
                    "-noverifygc",
                    "-nothreadtimeout",
                    "-unattended",
                ]
                .map(str::to_string),
            );
        }

        if self.contains(Self::TRACE) {
            args.push("-trace=default,memory,metadata,assetmetadata".to_string());
        }

        args
    }

    fn lookup(token: &str) -> Option<Self> {
        Self::KNOWN
            .iter()
            .find(|(known, _)| *known == token)
            .map(|(_, bit)| *bit)
    }
}

impl BitOr for LaunchMode {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for LaunchMode {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

fn tokens(raw: &str) -> impl Iterator<Item = String> + '_ {
    let normalized: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    normalized
        .split('|')
        .map(str::to_string)
        .filter(|token| !token.is_empty())
        .collect::<Vec<_>>()
        .into_iter()
}
