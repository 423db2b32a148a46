use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sexpr::{parse, parse_with, ParserConfig, Scanner, StreamMode};

fn sample_source() -> String {
    let form = "(define (fib n) (if (< n 2) n (+ (fib (- n 1)) (fib (- n 2))))) \"a quoted atom\"\n";
    form.repeat(200)
}

fn scanner_benchmark(c: &mut Criterion) {
    let source = sample_source();

    c.bench_function("tokenize fib program", |b| {
        b.iter(|| Scanner::new(black_box(&source)).count())
    });
}

fn parser_benchmark(c: &mut Criterion) {
    let source = sample_source();
    let rendezvous = ParserConfig::default().with_stream(StreamMode::Rendezvous);

    c.bench_function("parse fib program (pull)", |b| {
        b.iter(|| parse(black_box(&source), "bench").map(|tree| tree.iter().count()))
    });

    c.bench_function("parse fib program (rendezvous)", |b| {
        b.iter(|| parse_with(black_box(&source), "bench", &rendezvous).map(|tree| tree.iter().count()))
    });

    let deep = format!("{}x{}", "(".repeat(10_000), ")".repeat(10_000));
    c.bench_function("parse 10k nested lists", |b| {
        b.iter(|| parse(black_box(&deep), "bench").is_ok())
    });
}

criterion_group!(benches, scanner_benchmark, parser_benchmark);
criterion_main!(benches);
