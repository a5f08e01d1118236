use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rangecodec_core::{compress, decompress};

fn skewed_input(len: usize) -> Vec<u8> {
    // Deterministic skewed byte stream: mostly small symbols with a
    // long tail, similar to text-like data.
    let mut state = 0x2545f4914f6cdd1du64;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let r = (state >> 33) as u32;
            match r % 100 {
                0..=59 => (r % 4) as u8,
                60..=89 => (r % 16) as u8,
                _ => (r % 256) as u8,
            }
        })
        .collect()
}

fn bench_compress(c: &mut Criterion) {
    let input = skewed_input(64 * 1024);
    let mut group = c.benchmark_group("compress");
    group.throughput(Throughput::Bytes(input.len() as u64));
    group.bench_function("skewed_64k", |b| {
        b.iter(|| compress(black_box(&input)).unwrap())
    });
    group.finish();
}

fn bench_decompress(c: &mut Criterion) {
    let input = skewed_input(64 * 1024);
    let artifact = compress(&input).unwrap();
    let mut group = c.benchmark_group("decompress");
    group.throughput(Throughput::Bytes(input.len() as u64));
    group.bench_function("skewed_64k", |b| {
        b.iter(|| decompress(black_box(&artifact)).unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_compress, bench_decompress);
criterion_main!(benches);
