//! Benchmarks for the paint path: mirroring the shared board and drawing it
//!
//! Platform: Cross-platform (POSIX shared memory on Unix, file mapping on Windows)

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tictactoe::board::Board;
use tictactoe::layout::{Layout, Point, Rect};
use tictactoe::render::{self, Canvas, Palette, Pen};
use tictactoe::shared::BoardStore;
use tictactoe::test_utils::unique_segment_name;
use tictactoe::types::{Cell, CellPos, GridSize, Rgb};

/// Canvas that only counts primitives
#[derive(Default)]
struct CountingCanvas {
    primitives: usize,
}

impl Canvas for CountingCanvas {
    fn fill(&mut self, _area: Rect, _color: Rgb) {
        self.primitives += 1;
    }

    fn line(&mut self, _from: Point, _to: Point, _pen: Pen) {
        self.primitives += 1;
    }

    fn ellipse(&mut self, _bounds: Rect, _pen: Pen) {
        self.primitives += 1;
    }
}

fn filled_store() -> BoardStore {
    let mut store = BoardStore::acquire(&unique_segment_name("bench")).expect("acquire");
    for (i, pos) in GridSize::new(10).unwrap().positions().enumerate() {
        let cell = if i % 2 == 0 { Cell::Cross } else { Cell::Nought };
        store.write(pos, cell);
    }
    store
}

fn bench_refresh(c: &mut Criterion) {
    let store = filled_store();
    let mut group = c.benchmark_group("board_refresh");

    for n in [3u64, 10] {
        let size = GridSize::new(n).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut board = Board::new(size);
            b.iter(|| black_box(board.refresh_from(black_box(&store))));
        });
    }

    group.finish();
}

fn bench_paint(c: &mut Criterion) {
    let store = filled_store();
    let palette = Palette::new(Rgb::new(45, 73, 255), Rgb::new(255, 48, 55));
    let mut group = c.benchmark_group("paint");

    for n in [3u64, 10] {
        let size = GridSize::new(n).unwrap();
        let mut board = Board::new(size);
        board.refresh_from(&store);
        let layout = Layout::new(size, 800, 600);
        assert_eq!(board.get(CellPos::new(0, 0).unwrap()), Cell::Cross);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let mut canvas = CountingCanvas::default();
                render::paint(&mut canvas, &layout, &board, &palette);
                black_box(canvas.primitives)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_refresh, bench_paint);
criterion_main!(benches);
