// Copyright 2025 the Popstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use popstack_stack::{
    GlobalConfig, HostTime, Popup, PopupEntry, PopupKind, Stack, StackId, StackOperation,
    StackPriority,
};

const KINDS: [PopupKind; 4] = [
    PopupKind::Top,
    PopupKind::Center,
    PopupKind::Bottom,
    PopupKind::Anchored,
];

fn gen_entries(n: usize) -> Vec<PopupEntry<u32>> {
    let global = GlobalConfig::default();
    (0..n)
        .map(|i| {
            let popup = Popup::new("Bench", KINDS[i % 4], i as u32).custom_id(format!("p{i}"));
            PopupEntry::new(popup, i as u64, &global)
        })
        .collect()
}

fn bench_priority(c: &mut Criterion) {
    let mut group = c.benchmark_group("priority");
    for &n in &[4usize, 16, 64] {
        let entries = gen_entries(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("for_entries_n{n}"), |b| {
            b.iter(|| black_box(StackPriority::for_entries(&entries)));
        });
    }
    group.finish();
}

fn bench_insert_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("stack");
    for &n in &[8usize, 32] {
        let entries = gen_entries(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("insert_then_remove_last_n{n}"), |b| {
            b.iter_batched(
                || {
                    (
                        Stack::new(StackId::SHARED, Duration::ZERO),
                        entries.clone(),
                    )
                },
                |(mut stack, entries)| {
                    let now = HostTime::ZERO;
                    for entry in entries {
                        stack.submit(StackOperation::Insert(entry), now);
                    }
                    while !stack.is_empty() {
                        stack.submit(StackOperation::RemoveLast, now);
                    }
                    black_box(stack.drain_events().len());
                },
                BatchSize::SmallInput,
            );
        });
    }
    let entries = gen_entries(64);
    let keep: Vec<String> = (0..64).step_by(3).map(|i| format!("p{i}")).collect();
    group.bench_function("remove_all_excluding_n64", |b| {
        b.iter_batched(
            || {
                let mut stack = Stack::new(StackId::SHARED, Duration::ZERO);
                for entry in entries.clone() {
                    stack.submit(StackOperation::Insert(entry), HostTime::ZERO);
                }
                let _ = stack.drain_events();
                stack
            },
            |mut stack| {
                stack.submit(
                    StackOperation::RemoveAllExcluding(keep.clone()),
                    HostTime::ZERO,
                );
                black_box(stack.entries().len());
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_priority, bench_insert_remove);
criterion_main!(benches);
