//! Render orchestration.
//!
//! One thread per voice, one mixer thread, and the calling thread writing
//! the output:
//!
//! ```text
//! voice-0 ──queue──┐
//! voice-1 ──queue──┼── mixer ──queue── caller ── header + PCM ──> sink
//! voice-n ──queue──┘
//! ```
//!
//! Queues are bounded, so a fast voice waits for the mixer and the mixer
//! waits for the writer. Completion travels only through queue closure.
//! Every worker hands its `Result` back through its join handle and this
//! module alone decides whether the render failed.

pub mod queue;

use std::{
    io::{self, BufWriter, Seek, Write},
    thread::{self, ScopedJoinHandle},
};

use tracing::{info, warn};

use crate::{
    config::{HeaderMode, RenderConfig},
    error::{Result, SynthError},
    io::{pcm::write_sample, wav::WavHeader, wav::MAX_DATA_LEN},
    sequencing::ToneTable,
    synth::{run_voice, MixOutcome, Mixer, VoiceOutcome},
};

/// What a finished render produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderReport {
    /// Mixed samples that reached the sink.
    pub samples_written: usize,
    /// The header as it stands in the output, if one was written.
    pub header: Option<WavHeader>,
    pub voices: Vec<VoiceOutcome>,
    pub mix: MixOutcome,
}

impl RenderReport {
    /// Bytes of PCM data written after the header.
    pub fn data_len(&self) -> usize {
        self.samples_written * 2
    }
}

/// Render `voices` into `sink`.
///
/// [`HeaderMode::Patched`] needs [`render_seekable`] and is rejected here.
pub fn render<S, W>(config: &RenderConfig, voices: &[S], sink: W) -> Result<RenderReport>
where
    S: AsRef<str>,
    W: Write,
{
    if config.header == HeaderMode::Patched {
        return Err(SynthError::PatchUnsupported);
    }
    let mut w = BufWriter::new(sink);
    let report = render_into(config, voices, &mut w)?;
    w.flush()?;
    Ok(report)
}

/// Like [`render`], but can go back and fix the header lengths.
pub fn render_seekable<S, W>(config: &RenderConfig, voices: &[S], sink: W) -> Result<RenderReport>
where
    S: AsRef<str>,
    W: Write + Seek,
{
    let mut w = BufWriter::new(sink);
    let mut report = render_into(config, voices, &mut w)?;
    if config.header == HeaderMode::Patched {
        let data_len = u32::try_from(report.data_len())
            .unwrap_or(MAX_DATA_LEN)
            .min(MAX_DATA_LEN);
        WavHeader::patch_lengths(&mut w, data_len)?;
        report.header = Some(WavHeader::mono16(config.sample_rate, data_len));
    }
    w.flush()?;
    Ok(report)
}

/// Run the pipeline and collect the mixed signal before encoding.
pub fn mix_voices<S>(config: &RenderConfig, voices: &[S]) -> Result<Vec<f64>>
where
    S: AsRef<str>,
{
    config.validate()?;
    let mut mixed = Vec::new();
    run_pipeline(config, voices, |sample| {
        mixed.push(sample);
        Ok(())
    })?;
    Ok(mixed)
}

fn render_into<S, W>(config: &RenderConfig, voices: &[S], w: &mut W) -> Result<RenderReport>
where
    S: AsRef<str>,
    W: Write,
{
    config.validate()?;

    let header = match config.header {
        HeaderMode::Omitted => None,
        HeaderMode::Declared | HeaderMode::Patched => {
            let header = WavHeader::mono16(config.sample_rate, config.declared_data_len());
            header.write_to(w)?;
            Some(header)
        }
    };

    let (samples_written, voices, mix) =
        run_pipeline(config, voices, |sample| write_sample(w, sample))?;

    let report = RenderReport {
        samples_written,
        header,
        voices,
        mix,
    };
    info!(
        samples = report.samples_written,
        seconds = report.samples_written as f64 / f64::from(config.sample_rate),
        voices = report.voices.len(),
        "render finished"
    );
    Ok(report)
}

/// Spawn the workers, feed every mixed sample to `sink`, join everything.
///
/// Error precedence: voice errors in voice order, then worker panics, then
/// the sink's own error.
fn run_pipeline<S, F>(
    config: &RenderConfig,
    voices: &[S],
    mut sink: F,
) -> Result<(usize, Vec<VoiceOutcome>, MixOutcome)>
where
    S: AsRef<str>,
    F: FnMut(f64) -> io::Result<()>,
{
    let table = ToneTable::new(config.transpose);
    let table = &table;

    thread::scope(|s| -> Result<(usize, Vec<VoiceOutcome>, MixOutcome)> {
        let mut receivers = Vec::with_capacity(voices.len());
        let mut voice_handles = Vec::with_capacity(voices.len());
        for (index, arg) in voices.iter().enumerate() {
            let arg = arg.as_ref();
            let (tx, rx) = queue::bounded(config.queue_capacity);
            let handle = thread::Builder::new()
                .name(format!("voice-{index}"))
                .spawn_scoped(s, move || run_voice(index, arg, config, table, tx))?;
            receivers.push(rx);
            voice_handles.push(handle);
        }

        let (mixed_tx, mut mixed_rx) = queue::bounded(config.queue_capacity);
        let mixer = Mixer::new(receivers);
        let mixer_handle = thread::Builder::new()
            .name("mixer".into())
            .spawn_scoped(s, move || mixer.run(mixed_tx))?;

        let mut samples_written = 0;
        let mut sink_result = Ok(());
        while let Some(sample) = mixed_rx.recv() {
            if let Err(err) = sink(sample) {
                sink_result = Err(err);
                break;
            }
            samples_written += 1;
        }
        // Unblocks the mixer if we bailed out early.
        drop(mixed_rx);

        let mut outcomes = Vec::with_capacity(voice_handles.len());
        let mut voice_error = None;
        let mut panicked = None;
        for handle in voice_handles {
            match join(handle) {
                Ok(Ok(outcome)) => outcomes.push(outcome),
                Ok(Err(err)) => {
                    voice_error.get_or_insert(err);
                }
                Err(err) => {
                    panicked.get_or_insert(err);
                }
            }
        }
        let mix = join(mixer_handle);

        if let Some(err) = voice_error.or(panicked) {
            return Err(err);
        }
        let mix = mix?;
        sink_result?;

        for outcome in outcomes.iter().filter(|o| !o.finished) {
            warn!(
                voice = outcome.voice,
                samples_sent = outcome.samples_sent,
                "voice cut short by a shorter voice"
            );
        }
        Ok((samples_written, outcomes, mix))
    })
}

fn join<T>(handle: ScopedJoinHandle<'_, T>) -> Result<T> {
    let name = handle.thread().name().unwrap_or("worker").to_string();
    handle.join().map_err(|_| SynthError::WorkerPanicked(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::MixEnd;

    fn config() -> RenderConfig {
        RenderConfig::new().sample_rate(8_000)
    }

    #[test]
    fn mixes_to_shortest_voice() {
        let mixed = mix_voices(&config(), &["a4", "a4,_,a4"]).unwrap();
        assert_eq!(mixed.len(), 4_800);
        assert_eq!(mixed[0], 0.0);
    }

    #[test]
    fn in_phase_voices_double() {
        let mixed = mix_voices(&config(), &["a4", "a4"]).unwrap();
        let single = mix_voices(&config(), &["a4"]).unwrap();
        assert_eq!(mixed.len(), single.len());
        for (m, s) in mixed.iter().zip(&single) {
            assert_eq!(*m, 2.0 * s);
        }
    }

    #[test]
    fn small_queues_still_complete() {
        let config = config().queue_capacity(1);
        let mixed = mix_voices(&config, &["c4,e4", "g4,c5", "_,_"]).unwrap();
        assert_eq!(mixed.len(), 2 * 4_800);
    }

    #[test]
    fn no_voices_renders_header_only() {
        let mut out = Vec::new();
        let report = render(&config(), &[] as &[&str], &mut out).unwrap();
        assert_eq!(report.samples_written, 0);
        assert_eq!(report.mix.end, MixEnd::NoVoices);
        assert_eq!(out.len(), 44);
    }

    #[test]
    fn unknown_tone_fails_the_render() {
        let mut out = Vec::new();
        let err = render(&config(), &["a4,c4", "a4,x9"], &mut out).unwrap_err();
        assert!(matches!(err, SynthError::UnknownTone { voice: 1, ref token } if token == "x9"));
        // Header only: the broken voice closed before the first tick.
        assert_eq!(out.len(), 44);
    }

    #[test]
    fn first_voice_error_wins() {
        let err = mix_voices(&config(), &["nope", "a4", "bad"]).unwrap_err();
        assert!(matches!(err, SynthError::UnknownTone { voice: 0, .. }));
    }

    #[test]
    fn patched_header_needs_seek() {
        let config = config().header(HeaderMode::Patched);
        let err = render(&config, &["a4"], Vec::new()).unwrap_err();
        assert!(matches!(err, SynthError::PatchUnsupported));
    }

    #[test]
    fn invalid_config_is_rejected_before_output() {
        let mut out = Vec::new();
        let err = render(&config().sample_rate(0), &["a4"], &mut out).unwrap_err();
        assert!(matches!(err, SynthError::InvalidConfig(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn sink_error_stops_the_pipeline() {
        struct Full(usize);
        impl Write for Full {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                if self.0 < buf.len() {
                    return Err(io::Error::new(io::ErrorKind::WriteZero, "disk full"));
                }
                self.0 -= buf.len();
                Ok(buf.len())
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let long = vec!["a4"; 200].join(",");
        let config = config().header(HeaderMode::Omitted);
        let err = run_pipeline(&config, &[long.as_str()], |sample| {
            write_sample(&mut Full(0), sample)
        })
        .unwrap_err();
        assert!(matches!(err, SynthError::Io(_)));
    }
}
