//! Whole-game scenarios driven through the public API.

use engine::{
    prelude::*, EntityRecord, EquipSlot, ItemType, MoveRequest, MoveResult,
    ScenarioStatus, Settings, Species,
};
use pretty_assertions::assert_eq;
use util::Logos;

fn runtime(settings: Settings, seed: &str, map: &str) -> Runtime {
    let mut r = Runtime::new(settings, &Logos::new(seed));
    r.load_ascii_level(LevelId(0), map).unwrap();
    r
}

#[test]
fn fight_to_the_death() {
    let settings = Settings {
        autopilot: true,
        ..Default::default()
    };
    let mut r = runtime(
        settings,
        "duel",
        "
        ########
        #@....r#
        ########",
    );

    let mut hits = 0;
    for _ in 0..500 {
        r.tick().unwrap();
        hits += r
            .drain_msgs()
            .filter(|m| matches!(m, Msg::Hit { .. }))
            .count();
        if r.mobs().count() < 2 {
            break;
        }
    }

    assert!(hits > 0);
    assert_eq!(r.mobs().count(), 1);
    match r.player() {
        Some(p) => {
            assert!(p.is_alive(&r));
            assert_eq!(r.scenario_status(), ScenarioStatus::Ongoing);
        }
        None => assert_eq!(r.scenario_status(), ScenarioStatus::Lost),
    }
}

#[test]
fn same_seed_same_story() {
    let map = "
        ##########
        #@..o...r#
        #..(.....#
        ##########";
    let run = || {
        let settings = Settings {
            autopilot: true,
            gear_seeking: true,
            ..Default::default()
        };
        let mut r = runtime(settings, "replay", map);
        let mut log = Vec::new();
        for _ in 0..50 {
            r.tick().unwrap();
            log.extend(r.drain_msgs().filter_map(|m| match m {
                Msg::Message(text) => Some(text),
                _ => None,
            }));
        }
        log
    };

    assert_eq!(run(), run());
}

#[test]
fn walking_into_lava() {
    let mut r = runtime(
        Settings::default(),
        "lava",
        "
        #####
        #@&.#
        #####",
    );
    let player = r.player().unwrap();
    let start = player.loc(&r).unwrap();
    let lava = start + ivec2(1, 0);

    let MoveRequest::NeedsConfirmation { id, .. } =
        r.request_move(player, lava).unwrap()
    else {
        panic!("lava should need confirmation");
    };
    assert!(matches!(
        r.request_move(player, lava),
        Err(Error::MovePending(_))
    ));

    assert!(matches!(r.decline_move(id), Ok(MoveResult::Declined(_))));
    assert_eq!(player.loc(&r), Some(start));
    assert!(matches!(
        r.confirm_move(id),
        Err(Error::UnknownMoveRequest(_))
    ));

    let MoveRequest::NeedsConfirmation { id, .. } =
        r.request_move(player, lava).unwrap()
    else {
        panic!("lava should need confirmation");
    };
    let hp = player.hit_points(&r);
    assert_eq!(r.confirm_move(id).unwrap(), MoveResult::Moved);
    assert_eq!(player.loc(&r), Some(lava));
    assert!(player.hit_points(&r) < hp);
}

#[test]
fn looting() {
    let mut r = runtime(
        Settings::default(),
        "loot",
        "
        ######
        #@(]=#
        ######",
    );
    let player = r.player().unwrap();
    let start = player.loc(&r).unwrap();

    for x in 1..=3 {
        let to = start + ivec2(x, 0);
        assert_eq!(
            r.request_move(player, to).unwrap(),
            MoveRequest::Resolved(MoveResult::Moved)
        );
        let item = to.items_at(&r)[0];
        assert!(player.pick_up(&mut r, &item).is_done());
        assert!(player.equip(&mut r, &item).is_done());
    }

    assert_eq!(player.inventory(&r).len(), 3);
    assert_eq!(player.protection(&r), 3);
    let dagger = player.wielded(&r).unwrap();
    assert_eq!(dagger.item_type(&r), ItemType::Dagger);
    assert!(player.equipped(&r, EquipSlot::Ring).is_some());

    let texts: Vec<String> = r
        .drain_msgs()
        .filter_map(|m| match m {
            Msg::Message(text) => Some(text),
            _ => None,
        })
        .collect();
    assert!(texts.iter().any(|t| t == "You see a dagger here."), "{texts:?}");
    assert!(texts.iter().any(|t| t == "You wield the dagger."), "{texts:?}");
}

#[test]
fn records_survive_json() {
    let mut r = runtime(
        Settings::default(),
        "save",
        "
        #####
        #@.T#
        #####",
    );
    let troll = r.mobs().find(|e| e.species(&r) == Species::Troll).unwrap();
    let club = r.spawn_item(ItemType::Club);
    club.place(&mut r, troll);
    troll.equip(&mut r, &club);

    let json = serde_json::to_string(&troll.record(&r)).unwrap();
    let rec: EntityRecord = serde_json::from_str(&json).unwrap();

    let mut r2 = runtime(Settings::default(), "load", "#....#");
    let loc = Location::new(LevelId(0), 2, 0);
    let copy = r2.restore_entity(&rec, loc).unwrap();
    assert_eq!(copy.loc(&r2), Some(loc));
    assert_eq!(copy.species(&r2), Species::Troll);
    assert_eq!(copy.hit_points(&r2), troll.hit_points(&r));
    assert_eq!(copy.weapon_name(&r2), "club");
}
