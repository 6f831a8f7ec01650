use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::fs;

// Unisens containers are directories, so the benched fixture is synthesized
// into a tempdir instead of shipping payload files with the repo.

fn write_container(dir: &std::path::Path, ecg_samples: usize) {
    let index = r#"<?xml version="1.0" encoding="UTF-8"?>
<unisens xmlns="http://www.unisens.org/unisens2.0" duration="300" measurementId="bench" timestampStart="2019-04-23T09:00:00.000">
    <signalEntry id="ecg.bin" dataType="int16" sampleRate="1024" baseline="2048" lsbValue="0.5" unit="mV">
        <channel name="ch1"/>
    </signalEntry>
    <eventEntry id="marker.csv" sampleRate="1024" typeLength="1"/>
</unisens>"#;
    fs::write(dir.join("unisens.xml"), index).unwrap();

    let ecg: Vec<u8> = (0..ecg_samples)
        .flat_map(|i| ((i % 4096) as i16).to_le_bytes())
        .collect();
    fs::write(dir.join("ecg.bin"), ecg).unwrap();

    let marker: String = (0..256).map(|i| format!("{};A\n", i * 1024)).collect();
    fs::write(dir.join("marker.csv"), marker).unwrap();
}

fn bench_parse_containers(c: &mut Criterion) {
    let small = tempfile::tempdir().unwrap();
    write_container(small.path(), 1 << 10);
    let small_index = small.path().join("unisens.xml");
    c.bench_function("container - 1Ki ecg samples", |b| {
        b.iter(|| {
            let recording = unisens::UnisensFile::open(black_box(&small_index)).unwrap();
            black_box(recording);
        });
    });

    let large = tempfile::tempdir().unwrap();
    write_container(large.path(), 1 << 20);
    let large_index = large.path().join("unisens.xml");
    c.bench_function("container - 1Mi ecg samples", |b| {
        b.iter(|| {
            let recording = unisens::UnisensFile::open(black_box(&large_index)).unwrap();
            black_box(recording);
        });
    });
}

criterion_group! {
    name = benches;
    // This can be any expression that returns a `Criterion` object.
    config = Criterion::default().significance_level(0.1).sample_size(100);
    targets = bench_parse_containers
}
criterion_main!(benches);
