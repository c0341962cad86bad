//! Lexer benchmarks.
//!
//! Run with: `cargo bench --package linterna-lex`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use linterna_lex::tokenize;

fn token_count(source: &str) -> usize {
    let (tokens, _) = tokenize(source);
    tokens.len()
}

fn bench_lexer_simple(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer");

    let source = "let x = 42; function main() { let y = x + 1; return y; }";
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("simple_let", |b| {
        b.iter(|| token_count(black_box("let x = 42;")))
    });

    group.bench_function("function_with_body", |b| {
        b.iter(|| token_count(black_box(source)))
    });

    group.finish();
}

fn bench_lexer_complex(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_complex");

    let source = r#"
        // classic recursion
        function fibonacci(n) {
            if (n <= 1) {
                return n;
            }
            return fibonacci(n - 1) + fibonacci(n - 2);
        }

        const LIMIT = 10;
        let results = [];
        for (let i = 0; i < LIMIT; i++) {
            results[i] = fibonacci(i);
        }

        let banner = `computed ${LIMIT} values`;
        console.log(banner, results);
    "#;

    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("complex_source", |b| {
        b.iter(|| token_count(black_box(source)))
    });

    group.finish();
}

criterion_group!(benches, bench_lexer_simple, bench_lexer_complex);
criterion_main!(benches);
