//! Benchmark suite for animation description parsing
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml --bench parse

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use etta_benches::{block_document, mcmeta_document, sectioned_document, sizes};
use etta_types::{
	expression::Expression,
	format::{self, ParseConfig, frames::Substitutions},
	texture::TextureId,
};
use std::hint::black_box;

/// Benchmark whole-document parsing for each format
fn bench_documents(c: &mut Criterion) {
	let mut group = c.benchmark_group("parse_document");
	let texture = TextureId::from("item/bench");
	let config = ParseConfig::default();

	for size in [sizes::SMALL, sizes::MEDIUM, sizes::LARGE] {
		group.throughput(Throughput::Elements(size as u64));

		let sectioned = sectioned_document(size);
		group.bench_with_input(BenchmarkId::new("sectioned", size), &sectioned, |b, doc| {
			b.iter(|| black_box(format::parse(black_box(doc), &texture, &config)));
		});

		let block = block_document(size);
		group.bench_with_input(BenchmarkId::new("block", size), &block, |b, doc| {
			b.iter(|| black_box(format::parse(black_box(doc), &texture, &config)));
		});

		let vanilla = mcmeta_document(size);
		group.bench_with_input(BenchmarkId::new("mcmeta", size), &vanilla, |b, doc| {
			b.iter(|| black_box(format::parse(black_box(doc), &texture, &config)));
		});
	}

	group.finish();
}

/// Benchmark frame specification expansion
fn bench_frame_specs(c: &mut Criterion) {
	let mut group = c.benchmark_group("frame_spec");
	let mut substitutions = Substitutions::new();
	substitutions.define_variable("walk", "0-31");

	for spec in ["0-7", "[0-63:2, 100, 120-127]", "$walk"] {
		group.bench_with_input(BenchmarkId::from_parameter(spec), &spec, |b, spec| {
			b.iter(|| black_box(format::frames::resolve(black_box(spec), &substitutions, 4096)));
		});
	}

	group.finish();
}

/// Benchmark expression compilation in both dialects
fn bench_expression_parse(c: &mut Criterion) {
	let mut group = c.benchmark_group("expression_parse");

	let sources = [
		("flat", "health < 6 && (hunger > 2 || event(player_hurt)) && !has_effect(regeneration)"),
		(
			"block",
			"{ const low = health / max_health < 0.25; when frame_index() { 0 => eval(low), rest__ => { if low { eval(true) } } } }",
		),
	];
	for (name, source) in sources {
		group.bench_function(name, |b| {
			b.iter(|| black_box(Expression::parse(black_box(source))));
		});
	}

	group.finish();
}

criterion_group!(benches, bench_documents, bench_frame_specs, bench_expression_parse);

criterion_main!(benches);
