//! Quick Baag-Chal Demo - plays a short scripted game through the engine
//! and logs every step. Run with `RUST_LOG=debug` to also see rejections.

use baagchal_core::{GameOutcome, Position, Session};
use tracing_subscriber::EnvFilter;

enum Step {
    Place(u8, u8),
    Move((u8, u8), (u8, u8)),
}

const OPENING: &[Step] = &[
    Step::Place(0, 1),
    Step::Move((0, 0), (0, 2)),
    Step::Place(1, 2),
    Step::Move((0, 2), (2, 2)),
    Step::Place(2, 3),
    // Tigers to move, so this goat move is rejected
    Step::Move((2, 3), (1, 3)),
    Step::Move((2, 2), (2, 4)),
    Step::Place(3, 0),
    Step::Move((4, 0), (2, 0)),
    Step::Place(2, 1),
    Step::Move((2, 0), (2, 2)),
];

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut session = Session::new().with_listener(|outcome: &GameOutcome| {
        println!("*** {} ***", outcome);
    });

    for step in OPENING {
        let result = match *step {
            Step::Place(r, c) => session.place_goat(Position::new(r, c)),
            Step::Move((fr, fc), (tr, tc)) => {
                session.complete_move(Position::new(fr, fc), Position::new(tr, tc))
            }
        };
        match result {
            Ok(report) => println!("{:?} -> {} to play", report.action, report.next_player),
            Err(err) => println!("rejected: {}", err),
        }
        println!("{}", session.board());
    }

    println!(
        "placed {} / captured {} / phase {:?}",
        session.placed_goats(),
        session.captured_goats(),
        session.phase()
    );
}
