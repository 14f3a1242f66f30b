//! Scanner throughput benchmarks for `jinx_lexer`.
//!
//! Measures tokenization only: tokens are pulled from the lazy scanner and
//! dropped, nothing is collected.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use jinx_lexer::{scan, SymbolTable, SyntaxConfig};

/// Generate a page with N list items mixing all construct kinds.
fn generate_n_items(n: usize) -> String {
    let mut source = String::from("<ul>\n");
    for i in 0..n {
        source.push_str(&format!(
            "  {{# item {i} #}}\n  {{% if items[{i}].visible %}}\n    <li title=\"{{{{ items[{i}].title | e }}}}\">{{{{ items[{i}].name }}}}</li>\n  {{% endif %}}\n"
        ));
    }
    source.push_str("</ul>\n");
    source
}

/// Mostly literal text with sparse expressions, the common case for pages.
fn generate_text_heavy(n: usize) -> String {
    (0..n)
        .map(|i| format!("Lorem ipsum dolor sit amet, consectetur adipiscing elit {{{{ n{i} }}}}.\n"))
        .collect()
}

fn bench_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("scanner/throughput");
    let symbols = SymbolTable::default();

    for num_items in [10, 100, 1000, 5000] {
        let source = generate_n_items(num_items);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::new("mixed", num_items), &source, |b, src| {
            b.iter(|| {
                for token in scan(src, &symbols) {
                    black_box(token);
                }
            });
        });

        let source = generate_text_heavy(num_items);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::new("text", num_items), &source, |b, src| {
            b.iter(|| {
                for token in scan(src, &symbols) {
                    black_box(token);
                }
            });
        });
    }

    group.finish();
}

/// Same input with whitespace control and the strict opener rule enabled.
fn bench_whitespace_control(c: &mut Criterion) {
    let mut group = c.benchmark_group("scanner/whitespace_control");
    let config = SyntaxConfig::default()
        .with_lstrip_blocks(true)
        .with_trim_blocks(true)
        .with_whitespace_required_within_tokens(true);
    let Ok(symbols) = SymbolTable::new(config) else {
        return;
    };

    let source = generate_n_items(1000);
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("mixed/1000", |b| {
        b.iter(|| {
            for token in scan(black_box(&source), &symbols) {
                black_box(token);
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_throughput, bench_whitespace_control);
criterion_main!(benches);
