//! Parser/compiler benchmarks.
//!
//! Run with: `cargo bench --package ifjc-parse`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use ifjc_parse::compile;
use ifjc_util::Handler;

fn compile_source(source: &str) {
    let mut handler = Handler::new();
    let (_, _rendered) = compile(source, &mut handler);
}

fn bench_parser(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser");

    let factorial = r#"
        require "ifj21"
        global factorial : function(integer) : (integer)
        function factorial(n : integer) : (integer)
            if n < 2 then
                return 1
            else
                return n * factorial(n - 1)
            end
        end
        function main()
            write(factorial(10))
        end
        main()
    "#;
    group.throughput(Throughput::Bytes(factorial.len() as u64));
    group.bench_function("factorial_with_forward_declaration", |b| {
        b.iter(|| compile_source(black_box(factorial)))
    });

    let arithmetic_heavy = r#"
        require "ifj21"
        function compute(a : integer, b : integer, c : number) : (number)
            local x : number
            local y : integer
            x = a * b + c / 2.0
            y = a + b - c
            return x + y
        end
        function main()
            local r : number = compute(1, 2, 3.0)
            write(r)
        end
        main()
    "#;
    group.throughput(Throughput::Bytes(arithmetic_heavy.len() as u64));
    group.bench_function("mixed_arithmetic_expressions", |b| {
        b.iter(|| compile_source(black_box(arithmetic_heavy)))
    });

    group.finish();
}

criterion_group!(benches, bench_parser);
criterion_main!(benches);
