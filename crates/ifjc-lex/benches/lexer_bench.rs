//! Lexer benchmarks.
//!
//! Run with: `cargo bench --package ifjc-lex`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use ifjc_lex::Lexer;
use ifjc_util::Handler;

fn lexer_token_count(source: &str) -> usize {
    let mut handler = Handler::new();
    let lexer = Lexer::new(source, &mut handler);
    lexer.count()
}

fn bench_lexer(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer");

    let source = r#"
        require "ifj21"
        function factorial(n : integer) : integer
            if n < 2 then
                return 1
            else
                return n * factorial(n - 1)
            end
        end
    "#;
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("function_with_recursion", |b| {
        b.iter(|| lexer_token_count(black_box(source)))
    });

    group.bench_function("string_with_escapes", |b| {
        b.iter(|| lexer_token_count(black_box(r#""hello\nworld\t\65\66\67""#)))
    });

    group.finish();
}

criterion_group!(benches, bench_lexer);
criterion_main!(benches);
