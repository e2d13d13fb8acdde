// benches/decrypt.rs
//! Local decryption throughput (pre-encrypted data)

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use tdata_rs::{decrypt_local, encrypt_local, LocalKey};

// --- Size constants ---
const KB: usize = 1024;
const MB: usize = 1024 * 1024;

fn format_size(bytes: usize) -> String {
    if bytes >= MB {
        format!("{} MiB", bytes / MB)
    } else if bytes >= KB {
        format!("{} KiB", bytes / KB)
    } else {
        format!("{bytes} B")
    }
}

fn bench_decrypt(c: &mut Criterion) {
    let mut group = c.benchmark_group("decrypt_local");
    let key = LocalKey::new([0x5Au8; 256]);

    // settings files are under 1 KiB, cached media runs to megabytes
    let sizes = [814, 64 * KB, MB, 10 * MB];

    for &size in &sizes {
        let encrypted = encrypt_local(&vec![0x41u8; size], &key).unwrap();

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(
            BenchmarkId::new("size", format_size(size)),
            &size,
            |b, _| {
                b.iter(|| black_box(decrypt_local(black_box(&encrypted), &key).unwrap()));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_decrypt);
criterion_main!(benches);
