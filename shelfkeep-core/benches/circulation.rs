//! Catalog operation benchmarks

use criterion::{criterion_group, criterion_main, Criterion};
use shelfkeep_core::Catalog;

fn large_catalog() -> Catalog {
    let mut catalog = Catalog::new();
    for n in 0..1_000 {
        catalog
            .add_book(&format!("Book {n}"), &format!("Author {}", n % 50), &n.to_string())
            .expect("unique isbn");
    }
    for n in 0..200 {
        catalog
            .add_member(&format!("Member {n}"), &format!("MEM{n:04}"))
            .expect("unique member id");
    }
    catalog
}

fn circulation_benchmark(c: &mut Criterion) {
    let catalog = large_catalog();

    c.bench_function("search_books", |b| {
        b.iter(|| std::hint::black_box(catalog.search_books("author 7").len()))
    });

    c.bench_function("borrow_and_return", |b| {
        let mut catalog = catalog.clone();
        b.iter(|| {
            catalog.borrow_book("999", "MEM0199").expect("book is available");
            catalog.return_book("999", None).expect("book is on loan");
        })
    });

    c.bench_function("most_borrowed_book", |b| {
        let mut catalog = catalog.clone();
        for n in 0..150 {
            catalog
                .borrow_book(&n.to_string(), &format!("MEM{:04}", n % 200))
                .expect("under the limit");
        }
        b.iter(|| std::hint::black_box(catalog.most_borrowed_book().map(|(_, n)| n)))
    });
}

criterion_group!(benches, circulation_benchmark);
criterion_main!(benches);
