//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;
use tonewave::{
    config::{DEFAULT_DECLARED_SECONDS, DEFAULT_QUEUE_CAPACITY, DEFAULT_SAMPLE_RATE},
    HeaderMode, RenderConfig, ToneSyntax,
};

/// Output path that means "write to stdout".
pub const STDOUT_PATH: &str = "-";

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "tonewave")]
#[command(
    about = "Mix sine voices into 16-bit mono PCM",
    long_about = "Each VOICE is a comma separated list of notes such as \"c4,e4,g4,_\". \
                  Every note plays for half a second followed by a tenth of a second of \
                  silence. Voices play together and the output stops with the shortest one.\n\n\
                  Play the result with e.g. `aplay output.wav`."
)]
pub struct Args {
    /// Voices to mix, one per argument
    #[arg(value_name = "VOICE", required = true)]
    pub voices: Vec<String>,

    /// Sample rate in samples per second
    #[arg(short = 'r', long, value_name = "HZ", default_value_t = DEFAULT_SAMPLE_RATE)]
    pub sample_rate: u32,

    /// Transpose this many half steps up or down
    #[arg(
        short = 't',
        long,
        value_name = "STEPS",
        default_value_t = 0.0,
        allow_negative_numbers = true
    )]
    pub transpose: f64,

    /// File to write, or "-" for stdout
    #[arg(short = 'o', long, value_name = "PATH", default_value = "output.wav")]
    pub output: PathBuf,

    /// Write raw PCM without a WAV header
    #[arg(long, conflicts_with = "patch_header")]
    pub no_header: bool,

    /// Rewrite the header with the real length once done (files only)
    #[arg(long)]
    pub patch_header: bool,

    /// Voices are lists of frequencies in Hz instead of note names
    #[arg(long)]
    pub hz: bool,

    /// Length announced by the header before the real length is known
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_DECLARED_SECONDS)]
    pub declared_seconds: u32,

    /// Samples buffered between pipeline stages
    #[arg(long, value_name = "SAMPLES", default_value_t = DEFAULT_QUEUE_CAPACITY)]
    pub queue_capacity: usize,
}

impl Args {
    pub fn to_stdout(&self) -> bool {
        self.output.as_os_str() == STDOUT_PATH
    }

    pub fn header_mode(&self) -> HeaderMode {
        if self.no_header {
            HeaderMode::Omitted
        } else if self.patch_header {
            HeaderMode::Patched
        } else {
            HeaderMode::Declared
        }
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig::new()
            .sample_rate(self.sample_rate)
            .transpose(self.transpose)
            .header(self.header_mode())
            .tone_syntax(if self.hz {
                ToneSyntax::Hertz
            } else {
                ToneSyntax::Notes
            })
            .declared_seconds(self.declared_seconds)
            .queue_capacity(self.queue_capacity)
    }
}
