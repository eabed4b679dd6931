//! Voice specifications: one comma separated list of tones per voice.

use crate::{
    config::ToneSyntax,
    error::{Result, SynthError},
    sequencing::tones::ToneTable,
};

pub const TOKEN_DELIMITER: char = ',';

/// One melodic line as written on the command line, e.g. `"c4,e4,g4,_"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceSpec {
    tokens: Vec<String>,
}

impl VoiceSpec {
    /// Split on the delimiter. Tokens are kept verbatim; an empty argument
    /// yields a single empty token, which no table resolves.
    pub fn parse(arg: &str) -> Self {
        Self {
            tokens: arg.split(TOKEN_DELIMITER).map(str::to_string).collect(),
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Turn every token into a frequency in Hz.
    ///
    /// `voice` is only used to label errors. The first token that does not
    /// resolve aborts the whole voice.
    pub fn resolve(&self, voice: usize, syntax: ToneSyntax, table: &ToneTable) -> Result<Vec<f64>> {
        self.tokens
            .iter()
            .map(|token| match syntax {
                ToneSyntax::Notes => table.get(token).ok_or_else(|| SynthError::UnknownTone {
                    voice,
                    token: token.clone(),
                }),
                ToneSyntax::Hertz => parse_hertz(token).ok_or_else(|| {
                    SynthError::InvalidFrequency {
                        voice,
                        token: token.clone(),
                    }
                }),
            })
            .collect()
    }
}

/// Anything `f64` parsing accepts is a frequency, including negative and
/// non-finite values.
fn parse_hertz(token: &str) -> Option<f64> {
    token.parse::<f64>().ok()
}
