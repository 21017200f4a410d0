//! Benchmarks `Lexer::tokenize` over a representative program.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fax_lex::lex;

const PROGRAM: &str = r#"
defun add(a, b) {
    return a + b;
}

defun main() {
    i = 0;
    while i < 100 {
        out add(i, 1);
        i = i + 1;
    }
    return 0;
}
"#;

fn bench_lex(c: &mut Criterion) {
    c.bench_function("lex_representative_program", |b| {
        b.iter(|| lex(black_box(PROGRAM)).unwrap());
    });
}

criterion_group!(benches, bench_lex);
criterion_main!(benches);
