use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use bg_core::{destinations_from, movable_sources, Board, Color, Source};

/// Deterministic board generator: scatter both sides' checkers with a
/// small LCG so enumeration sees varied occupancy patterns.
fn gen_boards(n: usize) -> Vec<Board> {
    let mut out = Vec::with_capacity(n);
    let mut x: u64 = 0xA5A5_A5A5_0123_4567;
    for _ in 0..n {
        let mut board = Board::empty();
        for color in [Color::White, Color::Black] {
            let mut placed = 0u8;
            while placed < 15 {
                x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
                let idx = (x >> 33) as usize % 24;
                let v = board.points[idx];
                let sign = match color {
                    Color::White => 1,
                    Color::Black => -1,
                };
                // Keep each point single-colored.
                if v == 0 || v.signum() == sign {
                    board.points[idx] += sign;
                    placed += 1;
                }
            }
        }
        out.push(board);
    }
    out
}

fn bench_destinations(c: &mut Criterion) {
    let mut g = c.benchmark_group("bg_core_legal");
    for &n in &[64usize, 512usize] {
        let boards = gen_boards(n);
        g.bench_with_input(BenchmarkId::new("destinations_batch", n), &boards, |b, s| {
            b.iter(|| {
                for board in s.iter() {
                    for idx in 0..24usize {
                        black_box(destinations_from(
                            black_box(board),
                            Color::White,
                            black_box(&[3, 4]),
                            Source::Point(idx),
                        ));
                    }
                }
            })
        });
        g.bench_with_input(BenchmarkId::new("movable_sources_doubles", n), &boards, |b, s| {
            b.iter(|| {
                for board in s.iter() {
                    black_box(movable_sources(
                        black_box(board),
                        Color::Black,
                        black_box(&[6, 6, 6, 6]),
                    ));
                }
            })
        });
    }
    g.finish();
}

criterion_group!(benches, bench_destinations);
criterion_main!(benches);
