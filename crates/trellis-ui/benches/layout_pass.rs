use criterion::{black_box, criterion_group, criterion_main, Criterion};
use trellis_testing::{column, expanding_widget, fixed_widget, row, sync_context};
use trellis_ui::{Size, Widget};

fn build_grid(rows: usize, columns: usize) -> Widget {
    let context = sync_context();
    let root = Widget::new(&context);
    column(&root);
    for _ in 0..rows {
        let line = expanding_widget(&root);
        row(&line);
        for index in 0..columns {
            if index % 3 == 0 {
                fixed_widget(&line, 24.0, 24.0);
            } else {
                expanding_widget(&line);
            }
        }
    }
    root
}

fn layout_pass(c: &mut Criterion) {
    let root = build_grid(40, 12);
    let mut toggle = false;
    c.bench_function("layout_pass_40x12", |b| {
        b.iter(|| {
            toggle = !toggle;
            let width = if toggle { 800.0 } else { 801.0 };
            root.resize(black_box(Size::new(width, 600.0)));
        })
    });
}

fn limits_after_mutation(c: &mut Criterion) {
    let root = build_grid(20, 8);
    c.bench_function("limits_after_mutation_20x8", |b| {
        b.iter(|| {
            let extra = expanding_widget(&root);
            let minimum = root.minimum_size();
            root.remove_widget(&extra).ok();
            black_box(minimum)
        })
    });
}

criterion_group!(benches, layout_pass, limits_after_mutation);
criterion_main!(benches);
