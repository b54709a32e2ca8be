use criterion::{criterion_group, criterion_main, Criterion};
use ntuple_2048::agent::{Agent, Action, RandomEnvironment};
use ntuple_2048::engine::{Board, Move};
use ntuple_2048::ntuple::Network;
use ntuple_2048::td::select_move;
use std::hint::black_box;

fn corpus() -> Vec<Board> {
    let mut env = RandomEnvironment::seeded(1337);
    let mut boards = Vec::new();
    let mut b = Board::EMPTY;
    for _ in 0..2 {
        env.take_action(&b).apply(&mut b);
    }
    boards.push(b);
    let seq = [Move::Left, Move::Up, Move::Right, Move::Down];
    for i in 0..48 {
        if Action::Slide(seq[i % seq.len()]).apply(&mut b).is_some() {
            env.take_action(&b).apply(&mut b);
        }
        boards.push(b);
    }
    boards
}

// Non-zero weights so the table reads are not all the same cache line.
fn network() -> Network {
    let mut net = Network::new();
    for (i, b) in corpus().iter().enumerate() {
        net.update(b, i as f32 * 0.25);
    }
    net
}

fn bench_values(c: &mut Criterion) {
    let boards = corpus();
    let net = network();
    c.bench_function("ntuple/board_value", |bch| {
        bch.iter(|| {
            let mut acc = 0f32;
            for bd in &boards {
                acc += net.board_value(black_box(bd));
            }
            black_box(acc)
        })
    });
    c.bench_function("ntuple/afterstate_value", |bch| {
        bch.iter(|| {
            let mut acc = 0f32;
            for bd in &boards {
                acc += net.afterstate_value(black_box(bd));
            }
            black_box(acc)
        })
    });
}

fn bench_policy(c: &mut Criterion) {
    let boards = corpus();
    let net = network();
    c.bench_function("td/select_move", |bch| {
        bch.iter(|| {
            let mut n = 0usize;
            for bd in &boards {
                n += select_move(&net, black_box(bd)).is_some() as usize;
            }
            black_box(n)
        })
    });
}

criterion_group!(evaluate, bench_values, bench_policy);
criterion_main!(evaluate);
