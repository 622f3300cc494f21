//! Benchmarks for frame submission, sorting and batching

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use glam::Vec2;
use vellum_sprite::{
    SpriteBatch, SpriteBatchConfig, SpriteDesc, SpriteStore, TextureId, TextureRef, build_batches,
    sort_indices,
};

fn textures(count: u64) -> Vec<TextureRef> {
    (1..=count)
        .map(|id| TextureRef::new(TextureId::new(id), 64, 64))
        .collect()
}

fn desc(i: u32) -> SpriteDesc {
    SpriteDesc::at(Vec2::new((i % 512) as f32, (i / 512) as f32))
        .with_layer((i.wrapping_mul(2654435761) % 8) as i32, (i % 3) as i32)
}

fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("sprite_batch_frame");
    let textures = textures(4);

    for size in [1_000u32, 10_000, 100_000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut batch = SpriteBatch::headless(SpriteBatchConfig::default());
            b.iter(|| {
                batch.begin();
                for i in 0..size {
                    let texture = textures[(i % 4) as usize];
                    batch.draw(Some(texture), black_box(desc(i)));
                }
                batch.end();
                batch.draw_call_count()
            });
        });
    }

    group.finish();
}

fn bench_sort_and_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_and_batch");
    let textures = textures(2);

    for size in [10_000u32, 100_000] {
        let mut store = SpriteStore::with_capacity(size as usize);
        for i in 0..size {
            store.push(textures[(i / 1000 % 2) as usize], &desc(i));
        }
        let records = store.records().to_vec();
        let unsorted = store.indices().to_vec();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            let mut batches = Vec::new();
            b.iter(|| {
                let mut indices = unsorted.clone();
                sort_indices(&records, &mut indices);
                build_batches(
                    &records,
                    &indices,
                    SpriteBatch::DEFAULT_MAX_SPRITES_PER_BATCH,
                    &mut batches,
                );
                batches.len()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_frame, bench_sort_and_batch);
criterion_main!(benches);
