//! Benchmark suite for the per-tick state machine
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml --bench tick

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use etta_benches::{block_document, sectioned_document, sizes};
use etta_types::{
	animation::AnimationRegistry,
	expression::{Expression, Scope},
	format::ParseConfig,
	game::{GameState, Idle, PlayerSnapshot},
	texture::TextureId,
};
use std::hint::black_box;

/// Every even-numbered event is active.
struct EvenEvents;

impl GameState for EvenEvents {
	fn is_event_active(&self, name: &str) -> bool {
		name.rsplit('_').next().and_then(|n| n.parse::<usize>().ok()).is_some_and(|n| n % 2 == 0)
	}
}

/// Benchmark one registry tick over many textures
fn bench_registry_tick(c: &mut Criterion) {
	let mut group = c.benchmark_group("registry_tick");
	let player = PlayerSnapshot::new(4.0, 20.0, 10);

	for textures in [1usize, 16, 128] {
		let registry = AnimationRegistry::new();
		let sectioned = sectioned_document(sizes::SMALL);
		let block = block_document(sizes::SMALL);
		for i in 0..textures {
			let content = if i % 2 == 0 {
				&sectioned
			} else {
				&block
			};
			let texture = TextureId::from(format!("item/bench_{i}").as_str());
			if let Err(e) = registry.load(content, &texture, &ParseConfig::default()) {
				eprintln!("Warning: could not load benchmark texture: {e}");
			}
		}

		group.throughput(Throughput::Elements(textures as u64));
		group.bench_with_input(BenchmarkId::from_parameter(textures), &registry, |b, registry| {
			b.iter(|| registry.tick(black_box(&player), &EvenEvents));
		});
	}

	group.finish();
}

/// Benchmark a single expression evaluation
fn bench_expression_evaluate(c: &mut Criterion) {
	let mut group = c.benchmark_group("expression_evaluate");
	let scope = Scope::from_player(&PlayerSnapshot::new(4.0, 20.0, 10));

	let mut flat = Expression::new("health < 6 && (hunger > 2 || event(player_hurt))");
	group.bench_function("flat", |b| {
		b.iter(|| black_box(flat.evaluate(black_box(&scope), &Idle)));
	});

	let mut block = Expression::new("{ mut n = 0; if health < 6 { n = n + 1 } else { n = n - 1 }; eval(n > 0) }");
	group.bench_function("block", |b| {
		b.iter(|| black_box(block.evaluate(black_box(&scope), &Idle)));
	});

	group.finish();
}

criterion_group!(benches, bench_registry_tick, bench_expression_evaluate);

criterion_main!(benches);
