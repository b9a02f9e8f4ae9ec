use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use tonearm::library::{Metadata, Track, TrackSet};
use tonearm::queue::Queue;

fn library(size: usize) -> Vec<Track> {
    (0..size)
        .map(|i| {
            Track::new(
                format!("{i}"),
                format!("/music/{i}.flac"),
                Metadata {
                    artist: vec![format!("Artïst {}", i % 300)],
                    album: format!("Album {}", i % 1200),
                    genre: vec!["Électronique".to_string()],
                    title: format!("Track number {i}"),
                    ..Default::default()
                },
            )
        })
        .collect()
}

fn bench_filter(c: &mut Criterion) {
    let mut set = TrackSet::new(library(20_000));
    c.bench_function("filter 20k tracks", |b| {
        b.iter(|| set.filter(black_box("artist 12")))
    });
}

fn bench_shuffle(c: &mut Criterion) {
    let tracks = library(20_000);
    let mut rng = StdRng::seed_from_u64(0);
    c.bench_function("shuffle 20k queue", |b| {
        b.iter(|| {
            let mut queue = Queue::new(tracks.clone(), Some(10_000));
            queue.shuffle(&mut rng);
            black_box(queue.cursor())
        })
    });
}

criterion_group!(benches, bench_filter, bench_shuffle);
criterion_main!(benches);
