//! Headless line-oriented driver: one command per input line, vi-style keys.

use std::io::{self, BufRead, Write};

use anyhow::Context;
use deep_delve::{Command, Direction, GameConfig, Session, TurnOutcome, save::RunState};

fn parse_command(line: &str) -> Option<Command> {
    let command = match line.trim() {
        "k" => Command::Move(Direction::North),
        "j" => Command::Move(Direction::South),
        "h" => Command::Move(Direction::West),
        "l" => Command::Move(Direction::East),
        "y" => Command::Move(Direction::NorthWest),
        "u" => Command::Move(Direction::NorthEast),
        "b" => Command::Move(Direction::SouthWest),
        "n" => Command::Move(Direction::SouthEast),
        "." => Command::Wait,
        "," => Command::PickUp,
        "d" => Command::Descend,
        "a" => Command::Ascend,
        "p" => Command::UsePortal,
        "s" => Command::QuickSave,
        _ => return None,
    };
    Some(command)
}

fn print_status(session: &Session, out: &mut impl Write) -> io::Result<()> {
    let snap = session.snapshot();
    writeln!(
        out,
        "HP {}/{}  Lv {} ({}/{})  Gold {}  Depth {} (max {})  {}  [{}]",
        snap.hp,
        snap.max_hp,
        snap.level,
        snap.exp,
        snap.exp_to_next,
        snap.gold,
        snap.depth,
        snap.max_depth,
        snap.playtime,
        snap.theme
    )
}

/// 视野范围内的地图：玩家、可见敌人与物品、楼梯覆盖在地形之上
fn print_map(session: &Session, out: &mut impl Write) -> io::Result<()> {
    let (px, py) = session.player().position();
    let radius = session.config().fov_radius as i32;
    let level = session.level();
    for y in py - radius..=py + radius {
        let row: String = (px - radius..=px + radius)
            .map(|x| match session.tile_view(x, y) {
                Some(_) if (x, y) == (px, py) => '@',
                Some(view) if view.visible => level
                    .enemy_at(x, y)
                    .map(|e| e.body.glyph)
                    .or_else(|| level.item_at(x, y).map(|i| i.glyph))
                    .or_else(|| view.feature.map(|f| f.glyph()))
                    .unwrap_or(view.glyph),
                Some(view) if view.explored => view.feature.map_or(view.glyph, |f| f.glyph()),
                _ => ' ',
            })
            .collect();
        writeln!(out, "{}", row.trim_end())?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => GameConfig::from_json_file(&path)
            .with_context(|| format!("Failed to load config {path}"))?,
        None => GameConfig::default(),
    };

    let mut session = match args.next() {
        Some(save_name) => Session::load(config, &save_name)
            .with_context(|| format!("Failed to load save {save_name}"))?,
        None => Session::new(config).context("Failed to start a new run")?,
    };

    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    for line in session.messages().iter() {
        writeln!(out, "{line}")?;
    }
    print_status(&session, &mut out)?;

    for line in stdin.lock().lines() {
        let line = line?;
        match line.trim() {
            "q" => break,
            "m" => {
                print_map(&session, &mut out)?;
                continue;
            }
            _ => {}
        }
        let Some(command) = parse_command(&line) else {
            writeln!(out, "keys: hjklyubn move, . wait, , pick up, d/a stairs, p portal, s save, m map, q quit")?;
            continue;
        };

        let before = session.messages().total();
        let outcome = session.handle_command(command);
        let fresh = (session.messages().total() - before) as usize;
        for line in session.messages().tail(fresh) {
            writeln!(out, "{line}")?;
        }
        print_status(&session, &mut out)?;

        if matches!(outcome, TurnOutcome::Died | TurnOutcome::Won) {
            break;
        }
    }

    if session.state() == RunState::Playing {
        let file_name = session.save(None).context("Failed to save on exit")?;
        writeln!(out, "Game saved as {file_name}")?;
    }
    Ok(())
}
