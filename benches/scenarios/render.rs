//! Benchmarks for complete renders into memory.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use tonewave::{render, HeaderMode, RenderConfig};

/// Ode to Joy, first phrase, split over up to four voices.
const VOICES: [&str; 4] = [
    "e4,e4,f4,g4,g4,f4,e4,d4,c4,c4,d4,e4,e4,d4,d4",
    "c4,c4,d4,e4,e4,d4,c4,b3,a3,a3,b3,c4,c4,b3,b3",
    "c3,_,_,_,g2,_,_,_,a2,_,_,_,g2,_,_",
    "_,c5,_,c5,_,c5,_,c5,_,c5,_,c5,_,c5,_",
];

pub fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/render");
    group.sample_size(10);

    let config = RenderConfig::new()
        .sample_rate(44_100)
        .header(HeaderMode::Omitted);

    for voices in 1..=VOICES.len() {
        let mut out = Vec::new();
        group.bench_with_input(BenchmarkId::new("voices", voices), &voices, |b, &n| {
            b.iter(|| {
                out.clear();
                render(&config, black_box(&VOICES[..n]), &mut out).unwrap()
            })
        });
    }

    // Tiny queues force a hand-off on nearly every sample
    let cramped = config.clone().queue_capacity(16);
    let mut out = Vec::new();
    group.bench_function("cramped_queues", |b| {
        b.iter(|| {
            out.clear();
            render(&cramped, black_box(&VOICES[..]), &mut out).unwrap()
        })
    });

    group.finish();
}
