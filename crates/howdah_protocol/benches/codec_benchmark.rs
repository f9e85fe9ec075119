//! Compact identifier codec throughput.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use howdah_protocol::{PacketReader, PacketWriter, ALL_LAYOUTS, SWITCH_SEAT};
use howdah_shared::Identifier;

const SAMPLES: [u64; 4] = [0, 0x42, 0xF130_0000_0001_2345, u64::MAX];

fn bench_encode(c: &mut Criterion) {
    let mut writer = PacketWriter::new();
    c.bench_function("compact_id_encode", |b| {
        b.iter(|| {
            writer.reset();
            for raw in SAMPLES {
                black_box(SWITCH_SEAT.encode(&mut writer, Identifier(raw)));
            }
        });
    });
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("compact_id_decode");
    for (i, layout) in ALL_LAYOUTS.iter().enumerate() {
        let mut writer = PacketWriter::new();
        for raw in SAMPLES {
            assert!(layout.encode(&mut writer, Identifier(raw)));
        }
        let encoded = writer.as_slice().to_vec();
        group.bench_function(format!("layout_{i}"), |b| {
            b.iter(|| {
                let mut reader = PacketReader::new(black_box(&encoded));
                while let Some(id) = layout.decode(&mut reader) {
                    black_box(id);
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
