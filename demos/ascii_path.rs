//! Terminal demo: random grid, clicked endpoints, shortest path.
//!
//! Run: cargo run --bin ascii-path [seed]

use std::io::{self, Write};

use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use tilepath_demos::{Shade, frame, tile_center};
use tilepath_paths::Outcome;
use tilepath_session::{Event, Response, Session, SessionConfig};

fn color(shade: Shade) -> Color {
    match shade {
        Shade::Floor => Color::DarkGrey,
        Shade::Wall => Color::Grey,
        Shade::Path => Color::Cyan,
        Shade::Start => Color::Green,
        Shade::Goal => Color::Red,
        Shade::Selected => Color::Yellow,
    }
}

fn draw(session: &Session) -> io::Result<()> {
    let mut out = io::stdout().lock();
    for row in frame(session) {
        for shade in row {
            queue!(out, SetForegroundColor(color(shade)), Print(shade.glyph()))?;
        }
        queue!(out, ResetColor, Print('\n'))?;
    }
    out.flush()
}

fn main() {
    let seed = std::env::args().nth(1).and_then(|s| s.parse().ok());
    let config = SessionConfig {
        seed,
        ..SessionConfig::default()
    };
    let mut session = match Session::new(config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    // Click the first and last open tiles, as a user would.
    let open: Vec<_> = session
        .grid()
        .iter()
        .filter(|(_, kind)| kind.is_traversable())
        .map(|(p, _)| p)
        .collect();
    let ts = session.tile_size();
    for p in [open.first(), open.last()].into_iter().flatten() {
        let (x, y) = tile_center(*p, ts);
        session.handle(Event::Click { x, y });
    }

    match session.handle(Event::RunSearch) {
        Response::Searched(Outcome::Solved { cost }) => println!("path found, cost {cost}"),
        Response::Searched(Outcome::Unreachable) => println!("goal unreachable"),
        Response::Rejected(e) => println!("search rejected: {e}"),
        other => println!("unexpected response: {other:?}"),
    }

    if let Err(e) = draw(&session) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
