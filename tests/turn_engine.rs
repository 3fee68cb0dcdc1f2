mod helpers;

use deep_delve::combat::{AiState, EnemyKind};
use deep_delve::items::ItemTemplate;
use deep_delve::save::RunState;
use deep_delve::{Command, Direction, GameConfig, Session, TurnOutcome};
use helpers::{TestSessionBuilder, logged};

#[test]
fn killing_a_one_hp_enemy_removes_it_and_awards_experience() {
    let mut session = TestSessionBuilder::new(1)
        .enemy_with_hp(EnemyKind::Rat, 6, 5, 1)
        .build();

    let outcome = session.handle_command(Command::Move(Direction::East));

    assert_eq!(outcome, TurnOutcome::TurnTaken);
    assert!(session.level().enemies.is_empty());
    assert!(session.level().enemy_at(6, 5).is_none());
    assert_eq!(session.player().exp, 10);
    assert_eq!(session.player().position(), (5, 5));
    assert!(logged(&session, "You hit Giant Rat for 9 damage!"));
    assert!(logged(&session, "Giant Rat dies!"));
    assert_eq!(session.turns(), 1);
}

#[test]
fn exactly_enough_experience_levels_up_once() {
    let mut session = TestSessionBuilder::new(2)
        .enemy_with_hp(EnemyKind::Rat, 5, 6, 1)
        .build();
    session.player_mut().exp = 90;

    session.handle_command(Command::Move(Direction::South));

    let player = session.player();
    assert_eq!(player.level, 2);
    assert_eq!(player.exp, 0);
    assert_eq!(player.exp_to_next, 150);
    assert_eq!(player.body.hp, 120);
    assert!(logged(&session, "Level up! Now level 2"));
}

#[test]
fn surviving_adjacent_enemy_strikes_back() {
    let mut session = TestSessionBuilder::new(3)
        .enemy(EnemyKind::Goblin, 6, 5)
        .build();

    session.handle_command(Command::Move(Direction::East));

    let goblin = &session.level().enemies[0];
    assert_eq!(goblin.body.hp, 17);
    assert_eq!(goblin.position(), (6, 5));
    assert_eq!(session.player().body.hp, 97);
    assert!(logged(&session, "You hit Goblin for 8 damage!"));
    assert!(logged(&session, "Goblin hits you for 3 damage!"));
}

#[test]
fn diagonal_neighbours_move_instead_of_attacking() {
    let mut session = TestSessionBuilder::new(4)
        .enemy(EnemyKind::Orc, 6, 6)
        .build();

    session.handle_command(Command::Wait);

    // Manhattan distance 2: the orc steps next to the player, never onto it
    let orc = &session.level().enemies[0];
    assert_ne!(orc.position(), (5, 5));
    assert_eq!(orc.body.manhattan_to(5, 5), 1);
    assert_eq!(orc.ai_state, AiState::Chase);
    assert_eq!(session.player().body.hp, 100);
}

#[test]
fn sighted_enemy_closes_distance() {
    let mut session = TestSessionBuilder::new(5)
        .enemy(EnemyKind::Rat, 9, 5)
        .build();

    session.handle_command(Command::Wait);
    assert_eq!(session.level().enemies[0].position(), (8, 5));
    session.handle_command(Command::Wait);
    assert_eq!(session.level().enemies[0].position(), (7, 5));
}

#[test]
fn enemies_never_share_a_cell() {
    let mut session = TestSessionBuilder::new(6)
        .player_at(10, 10)
        .enemy(EnemyKind::Rat, 13, 10)
        .enemy(EnemyKind::Rat, 14, 10)
        .enemy(EnemyKind::Goblin, 13, 11)
        .build();

    for _ in 0..6 {
        session.handle_command(Command::Wait);
        let enemies = &session.level().enemies;
        for (i, a) in enemies.iter().enumerate() {
            assert_ne!(a.position(), session.player().position());
            for b in &enemies[i + 1..] {
                assert_ne!(a.position(), b.position());
            }
        }
    }
}

#[test]
fn walking_into_a_wall_still_takes_a_turn() {
    let mut session = TestSessionBuilder::new(7).player_at(1, 1).build();

    let outcome = session.handle_command(Command::Move(Direction::NorthWest));

    assert_eq!(outcome, TurnOutcome::TurnTaken);
    assert_eq!(session.player().position(), (1, 1));
    assert_eq!(session.turns(), 1);
}

#[test]
fn picking_up_nothing_costs_no_time() {
    let mut session = TestSessionBuilder::new(8)
        .enemy(EnemyKind::Rat, 9, 5)
        .build();

    let outcome = session.handle_command(Command::PickUp);

    assert_eq!(outcome, TurnOutcome::NoTime);
    assert_eq!(session.turns(), 0);
    assert_eq!(session.level().enemies[0].position(), (9, 5));
    assert_eq!(
        session.messages().last(),
        Some("There's nothing here to pick up.")
    );
}

#[test]
fn picking_up_items_applies_them() {
    let mut session = TestSessionBuilder::new(9)
        .item(ItemTemplate::HealthPotion, 5, 5)
        .item(ItemTemplate::GoldSmall, 6, 5)
        .build();
    session.player_mut().body.take_damage(50);

    assert_eq!(session.handle_command(Command::PickUp), TurnOutcome::TurnTaken);
    assert_eq!(session.player().body.hp, 80);
    assert!(logged(&session, "You picked up Health Potion. Restored 30 HP"));

    session.handle_command(Command::Move(Direction::East));
    session.handle_command(Command::PickUp);
    assert_eq!(session.player().gold(), 25);
    assert!(session.level().items.is_empty());
}

#[test]
fn features_require_standing_on_them() {
    let mut session = TestSessionBuilder::new(10).stairs_down(8, 8).build();

    for command in [Command::Descend, Command::Ascend] {
        assert_eq!(session.handle_command(command), TurnOutcome::NoTime);
        assert_eq!(session.messages().last(), Some("There are no stairs here."));
    }
    assert_eq!(session.handle_command(Command::UsePortal), TurnOutcome::NoTime);
    assert_eq!(session.messages().last(), Some("There is no portal here."));
    assert_eq!(session.depth(), 1);
}

#[test]
fn descend_then_ascend_regenerates_levels() {
    let mut session = TestSessionBuilder::new(11).stairs_down(5, 5).build();

    assert_eq!(
        session.handle_command(Command::Descend),
        TurnOutcome::DepthChanged(2)
    );
    assert_eq!(session.depth(), 2);
    assert_eq!(session.player().max_depth, 2);
    assert_eq!(session.player().position(), session.level().spawn_point());
    assert!(logged(&session, "You descend to level 2!"));
    assert!(logged(&session, "Deepest level reached: 2"));

    let up = session.level().stairs_up.expect("depth 2 has stairs up");
    session.player_mut().place_at(up);
    assert_eq!(
        session.handle_command(Command::Ascend),
        TurnOutcome::DepthChanged(1)
    );
    assert_eq!(session.depth(), 1);
    assert_eq!(session.state(), RunState::Playing);
    assert_eq!(session.player().max_depth, 2);
    assert!(session.level().stairs_up.is_none());
}

#[test]
fn ascending_from_depth_one_wins() {
    let mut session = TestSessionBuilder::new(12).stairs_up(5, 5).build();

    assert_eq!(session.handle_command(Command::Ascend), TurnOutcome::Won);
    assert_eq!(session.state(), RunState::Won);
    assert_eq!(
        session.messages().last(),
        Some("You escape the dungeon! You win!")
    );

    assert_eq!(session.handle_command(Command::Wait), TurnOutcome::Ignored);
    assert_eq!(session.turns(), 0);
}

#[test]
fn portal_jumps_five_levels() {
    let mut session = TestSessionBuilder::new(13).portal(5, 5).build();

    assert_eq!(
        session.handle_command(Command::UsePortal),
        TurnOutcome::DepthChanged(6)
    );
    assert_eq!(session.depth(), 6);
    assert_eq!(session.player().max_depth, 6);
    assert!(logged(&session, "The portal transports you to level 6!"));
    assert!(logged(&session, "You feel the magic energy coursing through you!"));
    assert!(logged(&session, "=== Underground Tunnels - Level 6 ==="));
}

#[test]
fn lethal_hit_ends_the_run_once() {
    let mut session = TestSessionBuilder::new(14)
        .enemy(EnemyKind::Dragon, 6, 5)
        .enemy(EnemyKind::Troll, 4, 5)
        .build();
    session.player_mut().body.hp = 1;

    assert_eq!(session.handle_command(Command::Wait), TurnOutcome::Died);
    assert_eq!(session.state(), RunState::Dead);
    assert_eq!(session.player().body.hp, 0);
    // 两个敌人都完成了攻击，但死亡消息只出现一次
    assert!(logged(&session, "Dragon hits you for 20 damage!"));
    assert!(logged(&session, "Troll hits you for 10 damage!"));
    assert_eq!(
        session.messages().iter().filter(|l| *l == "You have died!").count(),
        1
    );

    assert_eq!(
        session.handle_command(Command::Move(Direction::East)),
        TurnOutcome::Ignored
    );
    assert_eq!(session.level().enemies[0].body.hp, 100);
}

#[test]
fn enemies_dead_at_phase_start_do_not_act() {
    let mut session = TestSessionBuilder::new(15)
        .enemy_with_hp(EnemyKind::Troll, 6, 5, 0)
        .build();

    session.handle_command(Command::Wait);

    assert_eq!(session.player().body.hp, 100);
    assert_eq!(session.level().enemies[0].position(), (6, 5));
}

#[test]
fn quick_save_is_free_and_reports_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = TestSessionBuilder::new(16).save_dir(dir.path()).build();

    assert_eq!(session.handle_command(Command::QuickSave), TurnOutcome::NoTime);
    assert_eq!(session.turns(), 0);
    assert_eq!(session.messages().last(), Some("Game saved as quicksave.json"));
    assert!(dir.path().join("quicksave.json").is_file());
}

#[test]
fn failed_quick_save_is_reported_not_raised() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not_a_dir");
    std::fs::write(&blocker, "file").unwrap();
    let mut session = TestSessionBuilder::new(17).save_dir(&blocker).build();

    assert_eq!(session.handle_command(Command::QuickSave), TurnOutcome::NoTime);
    let last = session.messages().last().unwrap();
    assert!(last.starts_with("Failed to save game: "), "{last}");
    assert_eq!(session.state(), RunState::Playing);
}

#[test]
fn same_seed_same_run() {
    let config = GameConfig {
        seed: Some(99),
        ..GameConfig::default()
    };
    let mut a = Session::new(config.clone()).unwrap();
    let mut b = Session::new(config).unwrap();
    assert_eq!(a.level(), b.level());

    let script = [
        Command::Move(Direction::East),
        Command::Wait,
        Command::Move(Direction::South),
        Command::Move(Direction::SouthWest),
        Command::Wait,
    ];
    for command in script {
        assert_eq!(a.handle_command(command), b.handle_command(command));
    }
    assert_eq!(a.level(), b.level());
    assert_eq!(a.player(), b.player());
}
