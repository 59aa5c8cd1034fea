//! Searches a seeded random grid with A* and plays the search back in the
//! terminal.

use std::process::ExitCode;

use gridpath_crossterm::TerminalPlayer;
use gridpath_demos::{Command, USAGE, parse_args, search};
use gridpath_replay::Player;

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(Command::Run(args)) => args,
        Ok(Command::Help) => {
            print!("{USAGE}");
            return Ok(ExitCode::SUCCESS);
        }
        Err(err) => {
            eprintln!("astar-demo: {err}\n\n{USAGE}");
            return Ok(ExitCode::from(2));
        }
    };

    let grid = args.scenario();
    let (trace, _outcome, summary) = search(grid.clone())?;
    let mut player = Player::new(&grid, trace);

    if args.headless {
        player.finish();
        print!("{}", player.board().render_ascii());
    } else {
        TerminalPlayer::new()
            .with_fps(args.fps)
            .run(&mut player)?;
    }
    println!("{summary}");
    Ok(ExitCode::SUCCESS)
}
