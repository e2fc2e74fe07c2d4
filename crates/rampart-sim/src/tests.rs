//! Tests for the combat engine, the damage resolver and the trigger chain.

use glam::Vec2;

use rampart_core::combat::{DamageOutcome, Damageable, Hit};
use rampart_core::components::{Enemy, Pickup, Unit};
use rampart_core::config::CombatConfig;
use rampart_core::constants::*;
use rampart_core::enums::*;
use rampart_core::events::CombatEvent;
use rampart_core::input::{InputSnapshot, InputTracker, RawInput};
use rampart_core::state::CombatSnapshot;

use crate::ballistics::{Effect, Explosion, Projectile, ProjectileSet, ProjectileSpec};
use crate::engine::{CombatEngine, CutsceneGate, NoCutscene};
use crate::grenade::{Grenade, GrenadeCheck};
use crate::score::ScoreState;
use crate::stage::build_stage;
use crate::systems::player::{self as player_systems, Player};
use crate::systems::triggers::{self, Trigger, TriggerInput, TriggerState, Wall};
use crate::world_setup;

struct ActiveGate;

impl CutsceneGate for ActiveGate {
    fn is_active(&self) -> bool {
        true
    }
}

fn step(engine: &mut CombatEngine) -> CombatSnapshot {
    engine.update(DT, InputSnapshot::default(), &NoCutscene)
}

fn count_events(snapshots: &[CombatSnapshot], pred: impl Fn(&CombatEvent) -> bool) -> usize {
    snapshots
        .iter()
        .flat_map(|s| s.events.iter())
        .filter(|e| pred(*e))
        .count()
}

fn kill_all_enemies(engine: &mut CombatEngine) {
    for (_entity, (unit, _enemy)) in engine.world_mut().query_mut::<(&mut Unit, &Enemy)>() {
        unit.take_hit(&Hit::damage(1_000.0));
    }
}

/// Ticks until every wave of `stage` has spawned, plus a margin.
fn frames_past_last_wave(stage: u32) -> usize {
    let last_wave = build_stage(stage)
        .schedule
        .waves
        .iter()
        .map(|w| w.spawn_at_secs)
        .fold(0.0, f64::max);
    (last_wave / f64::from(DT)) as usize + 10
}

fn unit_of(engine: &CombatEngine, entity: hecs::Entity) -> Unit {
    engine
        .world()
        .get::<&Unit>(entity)
        .map(|unit| (*unit).clone())
        .expect("unit component")
}

/// Script: walk right, fire in bursts, throw a grenade now and then.
fn scripted_input(tracker: &mut InputTracker, frame: u32) -> InputSnapshot {
    tracker.sample(RawInput {
        move_axis: if frame % 240 < 120 { 1.0 } else { 0.0 },
        jump_held: frame % 90 == 0,
        fire_held: frame % 40 < 25,
        grenade_held: frame % 150 == 10,
    })
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let config = CombatConfig {
        seed: 12345,
        drop_chance: 0.5,
        ..Default::default()
    };
    let mut engine_a = CombatEngine::new(config.clone());
    let mut engine_b = CombatEngine::new(config);
    let mut tracker_a = InputTracker::new();
    let mut tracker_b = InputTracker::new();

    for frame in 0..1200 {
        let snap_a = engine_a.update(DT, scripted_input(&mut tracker_a, frame), &NoCutscene);
        let snap_b = engine_b.update(DT, scripted_input(&mut tracker_b, frame), &NoCutscene);

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged at frame {frame}");
    }
}

#[test]
fn test_engine_survives_odd_deltas() {
    let mut engine = CombatEngine::new(CombatConfig::default());
    for delta in [0.0, -1.0, f32::NAN, f32::INFINITY, 5.0, DT] {
        let snap = engine.update(delta, InputSnapshot::default(), &NoCutscene);
        assert!(snap.player.position.is_finite());
        assert!(snap.time.elapsed_secs.is_finite());
    }
    // Large steps are clamped.
    assert!(engine.time().elapsed_secs <= f64::from(MAX_FRAME_DELTA * 2.0 + DT) + 1e-6);
}

// ---- Cutscene gate ----

#[test]
fn test_gate_skips_all_processing() {
    let mut engine = CombatEngine::new(CombatConfig::default());
    for _ in 0..30 {
        step(&mut engine);
    }
    let before = step(&mut engine);
    let tick = engine.time().tick;

    for _ in 0..30 {
        let snap = engine.update(
            DT,
            InputSnapshot {
                move_axis: 1.0,
                fire_held: true,
                grenade_just_pressed: true,
                ..Default::default()
            },
            &ActiveGate,
        );
        assert!(snap.gated);
        assert!(snap.audio_cues.is_empty());
        assert!(snap.events.is_empty());
    }
    assert_eq!(engine.time().tick, tick, "Gated ticks must not advance time");

    let after = engine.update(DT, InputSnapshot::default(), &ActiveGate);
    assert_eq!(after.player.position, before.player.position);
    assert_eq!(after.player.grenades, before.player.grenades);
    assert_eq!(after.score.shots_fired, before.score.shots_fired);
    assert_eq!(
        serde_json::to_string(&after.enemies).unwrap(),
        serde_json::to_string(&before.enemies).unwrap(),
        "Grunts must not move while gated"
    );

    let resumed = step(&mut engine);
    assert!(!resumed.gated);
    assert_eq!(resumed.time.tick, tick + 1);
}

#[test]
fn test_boss_intro_holds_while_gated() {
    let mut engine = CombatEngine::new(CombatConfig::default());
    for _ in 0..frames_past_last_wave(1) {
        step(&mut engine);
    }
    kill_all_enemies(&mut engine);
    engine.player_mut().body.position.x = 1700.0;

    let mut intro = false;
    for _ in 0..300 {
        let snap = step(&mut engine);
        if snap.events.iter().any(|e| matches!(e, CombatEvent::BossIntroStarted)) {
            intro = true;
            break;
        }
    }
    assert!(intro, "Wall should finish rising and start the intro");

    let gated: Vec<CombatSnapshot> = (0..600)
        .map(|_| engine.update(DT, InputSnapshot::default(), &ActiveGate))
        .collect();
    assert_eq!(
        count_events(&gated, |e| matches!(e, CombatEvent::BossSpawned { .. })),
        0
    );
    assert!(engine.boss().is_none());
    assert_eq!(engine.phase(), CombatPhase::BossIntro);

    let mut frames = 0;
    loop {
        frames += 1;
        let snap = step(&mut engine);
        if snap.events.iter().any(|e| matches!(e, CombatEvent::BossSpawned { .. })) {
            break;
        }
        assert!(frames < 600, "Boss never spawned");
    }
    let intro_frames = (BOSS_INTRO_SECS / DT) as usize;
    assert!(
        frames + 2 >= intro_frames,
        "Intro ran {frames} ungated frames, needs about {intro_frames}"
    );
    assert!(engine.boss().is_some());
}

// ---- Resolver ----

#[test]
fn test_single_shot_hits_exactly_one_of_two_overlapping() {
    let mut engine = CombatEngine::new(CombatConfig::default());
    let first = engine.spawn_test_enemy(GruntKind::Rifleman, 700.0);
    let second = engine.spawn_test_enemy(GruntKind::Rifleman, 704.0);
    engine.player_fire_mut().spawn(ProjectileSpec::straight(
        Vec2::new(700.0, RIFLEMAN_HALF_EXTENTS.y),
        2000.0,
        PLAYER_SHOT_SPEED,
        Effect::Direct { damage: 1.0 },
        Owner::Player,
    ));

    step(&mut engine);

    let health = |entity| {
        engine
            .world()
            .get::<&Unit>(entity)
            .map(|unit| unit.health().current())
            .unwrap()
    };
    assert_eq!(health(first), RIFLEMAN_MAX_HEALTH - 1.0, "First in order takes the hit");
    assert_eq!(health(second), RIFLEMAN_MAX_HEALTH, "Second is untouched");
}

#[test]
fn test_area_hits_only_targets_in_radius() {
    let mut units = [
        Unit::new(Vec2::new(100.0, 36.0), RIFLEMAN_HALF_EXTENTS, 10.0),
        Unit::new(Vec2::new(150.0, 36.0), RIFLEMAN_HALF_EXTENTS, 10.0),
        Unit::new(Vec2::new(400.0, 36.0), RIFLEMAN_HALF_EXTENTS, 10.0),
    ];
    let mut shell = Projectile::new(ProjectileSpec::lobbed(
        Vec2::new(0.0, 0.0),
        Vec2::new(120.0, 0.0),
        100.0,
        400.0,
        Effect::Blast {
            damage: 4.0,
            radius: 80.0,
        },
        Owner::Tower,
    ));
    // Fly until the arc says it is time to explode.
    let arena = rampart_core::types::ArenaGeometry::default();
    while !shell.should_explode() {
        shell.update(DT, &arena);
    }

    let outcomes = shell.on_hit(units.iter_mut().enumerate());
    let hit: Vec<usize> = outcomes.iter().map(|(i, _)| *i).collect();
    assert_eq!(hit, vec![0, 1]);
    assert_eq!(units[0].health().current(), 6.0);
    assert_eq!(units[1].health().current(), 6.0);
    assert_eq!(units[2].health().current(), 10.0, "Out-of-radius target unaffected");

    // Resolved projectiles are inert.
    assert!(shell.on_hit(units.iter_mut().enumerate()).is_empty());
    assert_eq!(units[0].health().current(), 6.0);
}

#[test]
fn test_explosion_skips_dead_targets() {
    let mut alive = Unit::new(Vec2::new(0.0, 36.0), RIFLEMAN_HALF_EXTENTS, 5.0);
    let mut dead = Unit::new(Vec2::new(10.0, 36.0), RIFLEMAN_HALF_EXTENTS, 5.0);
    dead.take_hit(&Hit::damage(5.0));
    let explosion = Explosion {
        origin: Vec2::new(5.0, 0.0),
        radius: 50.0,
        damage: 1.0,
        knockback_secs: 0.0,
        faction: Faction::Player,
    };
    let outcomes = explosion.apply([("alive", &mut alive), ("dead", &mut dead)]);
    assert_eq!(outcomes, vec![("alive", DamageOutcome::Damaged)]);
}

#[test]
fn test_explosion_knockback_pushes_away_from_origin() {
    let mut left = Unit::new(Vec2::new(-30.0, 36.0), RIFLEMAN_HALF_EXTENTS, 5.0);
    let mut right = Unit::new(Vec2::new(30.0, 36.0), RIFLEMAN_HALF_EXTENTS, 5.0);
    let explosion = Explosion {
        origin: Vec2::new(0.0, 0.0),
        radius: 60.0,
        damage: 1.0,
        knockback_secs: 0.5,
        faction: Faction::Player,
    };
    explosion.apply([("left", &mut left), ("right", &mut right)]);
    assert_eq!(left.status.knockback.map(|k| k.direction), Some(-1.0));
    assert_eq!(right.status.knockback.map(|k| k.direction), Some(1.0));

    // A killing blast leaves no status behind.
    let mut fragile = Unit::new(Vec2::new(30.0, 36.0), RIFLEMAN_HALF_EXTENTS, 1.0);
    explosion.apply([("fragile", &mut fragile)]);
    assert!(!fragile.is_alive());
    assert!(!fragile.status.is_knocked_back());
}

#[test]
fn test_hostile_fire_hurts_player() {
    let mut engine = CombatEngine::new(CombatConfig::default());
    let player_position = engine.player().position();
    engine.hostile_fire_mut().spawn(ProjectileSpec::straight(
        player_position,
        0.0,
        RIFLEMAN_BULLET_SPEED,
        Effect::Direct {
            damage: RIFLEMAN_BULLET_DAMAGE,
        },
        Owner::Grunt,
    ));
    let snap = step(&mut engine);
    assert_eq!(snap.player.health, PLAYER_MAX_HEALTH - RIFLEMAN_BULLET_DAMAGE);
    assert!(snap.audio_cues.contains(&rampart_core::events::AudioCue::PlayerHurt));
    assert!(snap.projectiles.iter().all(|p| p.owner != Owner::Grunt));
}

// ---- Grenades ----

#[test]
fn test_grenade_damage_latch_holds() {
    let mut units = [
        Unit::new(Vec2::new(300.0, 36.0), RIFLEMAN_HALF_EXTENTS, 50.0),
        Unit::new(Vec2::new(330.0, 36.0), RIFLEMAN_HALF_EXTENTS, 50.0),
    ];
    let mut grenade = Grenade::thrown(Vec2::new(0.0, 80.0), Vec2::new(320.0, 0.0));

    let mut detonations = 0;
    let mut damage_phases = 0;
    let mut ticks_after_damage = 0;
    for _ in 0..600 {
        grenade.update(DT);
        match grenade.check(units.iter_mut().enumerate()) {
            GrenadeCheck::Detonated(_) => detonations += 1,
            GrenadeCheck::Damaged(hits) => {
                damage_phases += 1;
                assert_eq!(hits.len(), 2, "Both grunts are in radius");
            }
            GrenadeCheck::Flying => {}
            GrenadeCheck::Spent => ticks_after_damage += 1,
        }
    }

    assert_eq!(detonations, 1);
    assert_eq!(damage_phases, 1);
    assert!(ticks_after_damage >= 5, "Latch must be exercised on later checks");
    assert!(grenade.damage_dealt());
    assert!(grenade.is_expired());
    for unit in &units {
        assert_eq!(unit.health().current(), 50.0 - GRENADE_DAMAGE);
    }
}

#[test]
fn test_grenade_damage_follows_detonation_check() {
    let mut unit = Unit::new(Vec2::new(0.0, 36.0), RIFLEMAN_HALF_EXTENTS, 50.0);
    // Thrown from right beside the target: proximity detonates at once.
    let mut grenade = Grenade::thrown(Vec2::new(10.0, 40.0), Vec2::new(330.0, 0.0));
    assert!(matches!(
        grenade.check([((), &mut unit)]),
        GrenadeCheck::Detonated(_)
    ));
    assert_eq!(unit.health().current(), 50.0, "No damage on the detonation check");
    assert!(matches!(grenade.check([((), &mut unit)]), GrenadeCheck::Damaged(_)));
    assert_eq!(unit.health().current(), 50.0 - GRENADE_DAMAGE);
    for _ in 0..5 {
        assert_eq!(grenade.check([((), &mut unit)]), GrenadeCheck::Spent);
    }
    assert_eq!(unit.health().current(), 50.0 - GRENADE_DAMAGE);
}

#[test]
fn test_player_grenade_throw_consumes_stock() {
    let mut engine = CombatEngine::new(CombatConfig::default());
    let mut tracker = InputTracker::new();
    let throw = RawInput {
        grenade_held: true,
        ..Default::default()
    };
    // Holding the button throws once.
    for _ in 0..10 {
        engine.update(DT, tracker.sample(throw), &NoCutscene);
    }
    assert_eq!(engine.player().grenades, PLAYER_START_GRENADES - 1);
}

#[test]
fn test_grenade_knockback_pushes_grunt_and_holds_fire() {
    let mut engine = CombatEngine::new(CombatConfig::default());
    let hold_x = build_stage(1).heavy_hold_x;
    let heavy = engine.spawn_test_enemy(GruntKind::Heavy, hold_x);
    step(&mut engine);
    let start = unit_of(&engine, heavy).position;

    engine.grenades_mut().push(Grenade::thrown(
        start - Vec2::new(15.0, 0.0),
        start + Vec2::new(GRENADE_THROW_DISTANCE, 0.0),
    ));
    let mut knocked = false;
    for _ in 0..5 {
        step(&mut engine);
        if unit_of(&engine, heavy).status.is_knocked_back() {
            knocked = true;
            break;
        }
    }
    assert!(knocked, "Grenade blast knocks the heavy back");
    let hit = unit_of(&engine, heavy);
    assert_eq!(hit.health().current(), HEAVY_MAX_HEALTH - GRENADE_DAMAGE);

    // Ready to fire the moment the knockback wears off.
    if let Ok(mut unit) = engine.world_mut().get::<&mut Unit>(heavy) {
        unit.status.attack_cooldown = 0.0;
    }

    let mut last_x = hit.position.x;
    let mut knocked_frames = 0;
    loop {
        let snap = step(&mut engine);
        let unit = unit_of(&engine, heavy);
        let grunt_shots = snap
            .projectiles
            .iter()
            .filter(|p| p.owner == Owner::Grunt)
            .count();
        if !unit.status.is_knocked_back() {
            assert_eq!(grunt_shots, 1, "Heavy fires once the knockback expires");
            break;
        }
        knocked_frames += 1;
        assert!(knocked_frames < 60, "Knockback never expired");
        assert!(unit.position.x > last_x, "Pushed away from the blast");
        assert_eq!(grunt_shots, 0, "No fire while knocked back");
        last_x = unit.position.x;
    }
    assert!(knocked_frames >= (GRENADE_KNOCKBACK_SECS / DT) as usize - 2);
    assert!(
        last_x - start.x > KNOCKBACK_SPEED * GRENADE_KNOCKBACK_SECS * 0.8,
        "Pushed {} px",
        last_x - start.x
    );
}

#[test]
fn test_boss_grenade_does_not_knock_back() {
    let mut grenade = Grenade::tossed(Vec2::new(0.0, 40.0), Vec2::new(300.0, 40.0));
    let mut player = Unit::new(Vec2::new(0.0, 40.0), PLAYER_HALF_EXTENTS, PLAYER_MAX_HEALTH);
    assert!(matches!(
        grenade.check([((), &mut player)]),
        GrenadeCheck::Detonated(_)
    ));
    grenade.check([((), &mut player)]);
    assert_eq!(
        player.health().current(),
        PLAYER_MAX_HEALTH - BOSS_GRENADE_DAMAGE
    );
    assert!(!player.status.is_knocked_back());
}

// ---- Boss ----

fn engine_with_idle_boss() -> CombatEngine {
    let mut engine = CombatEngine::new(CombatConfig::default());
    engine.spawn_test_boss();
    for _ in 0..600 {
        step(&mut engine);
        if engine.boss().map(|b| b.state()) == Some(BossState::Idle) {
            return engine;
        }
    }
    panic!("boss never finished entering");
}

#[test]
fn test_boss_invincible_while_entering() {
    let mut engine = CombatEngine::new(CombatConfig::default());
    engine.spawn_test_boss();
    assert_eq!(engine.strike_boss(10.0), Some(DamageOutcome::Ignored));
    let snap = step(&mut engine);
    let boss = snap.boss.expect("boss view");
    assert!(boss.invincible);
    assert_eq!(boss.health, BOSS_MAX_HEALTH);
}

#[test]
fn test_boss_death_end_to_end() {
    let mut engine = engine_with_idle_boss();
    let boss_position = engine.boss().map(|b| b.position()).unwrap();

    // Boss projectiles in flight at the moment of death.
    for i in 0..3 {
        engine.hostile_fire_mut().spawn(ProjectileSpec::straight(
            boss_position + Vec2::new(0.0, i as f32),
            0.0,
            BOSS_BULLET_SPEED,
            Effect::Direct { damage: 1.0 },
            Owner::Boss,
        ));
    }
    engine
        .grenades_mut()
        .push(Grenade::tossed(boss_position, Vec2::new(1600.0, 0.0)));

    let mut kills = 0;
    for _ in 0..200 {
        if engine.strike_boss(1.0) == Some(DamageOutcome::Killed) {
            kills += 1;
        }
    }
    assert_eq!(kills, 1);
    assert_eq!(engine.boss().map(|b| b.state()), Some(BossState::Dead));
    assert_eq!(engine.strike_boss(1.0), Some(DamageOutcome::Ignored));

    let mut snapshots = Vec::new();
    let frames = (BOSS_DEFEAT_SEQUENCE_SECS / DT) as usize + 30;
    for _ in 0..frames {
        snapshots.push(step(&mut engine));
        assert_eq!(engine.strike_boss(1.0), Some(DamageOutcome::Ignored));
    }

    assert_eq!(
        count_events(&snapshots, |e| matches!(
            e,
            CombatEvent::BossProjectilesCleared { count: 4 }
        )),
        1,
        "Projectile clear fires exactly once and covers bullets and grenades"
    );
    assert_eq!(count_events(&snapshots, |e| matches!(e, CombatEvent::BossDefeated)), 1);
    assert_eq!(
        count_events(&snapshots, |e| matches!(
            e,
            CombatEvent::StageCompleted { stage: 1 }
        )),
        1
    );
    assert!(snapshots[0].projectiles.iter().all(|p| p.owner != Owner::Boss));
    assert!(snapshots[0].grenades.iter().all(|g| g.owner != Owner::Boss));
    assert_eq!(engine.phase(), CombatPhase::Victory);
}

#[test]
fn test_boss_volley_spawns_full_spread() {
    let mut engine = engine_with_idle_boss();
    let mut volleys = 0;
    for _ in 0..(BOSS_IDLE_SECS / DT) as usize + 30 {
        let snap = step(&mut engine);
        volleys += snap
            .audio_cues
            .iter()
            .filter(|c| **c == rampart_core::events::AudioCue::BossVolley)
            .count();
        if volleys > 0 {
            let boss_shots = snap
                .projectiles
                .iter()
                .filter(|p| p.owner == Owner::Boss)
                .count();
            assert_eq!(boss_shots, BOSS_VOLLEY_SIZE as usize);
            break;
        }
    }
    assert_eq!(volleys, 1);
}

#[test]
fn test_supply_drops_only_during_boss_fight() {
    let mut engine = CombatEngine::new(CombatConfig {
        player_max_health: 1.0e6,
        drop_chance: 0.0,
        ..Default::default()
    });
    let is_supply = |e: &CombatEvent| {
        matches!(
            e,
            CombatEvent::PickupDropped {
                kind: PickupKind::GrenadeAmmo,
                ..
            }
        )
    };

    let skirmish: Vec<CombatSnapshot> = (0..((SUPPLY_DROP_INTERVAL_SECS + 3.0) / DT) as usize)
        .map(|_| step(&mut engine))
        .collect();
    assert_eq!(count_events(&skirmish, is_supply), 0, "No supply drops before the boss");

    engine.spawn_test_boss();
    let fight: Vec<CombatSnapshot> = (0..((SUPPLY_DROP_INTERVAL_SECS * 2.0 + 0.5) / DT) as usize)
        .map(|_| step(&mut engine))
        .collect();
    assert_eq!(count_events(&fight, is_supply), 2);
    let drop_height = engine.config().arena.ground_y + CAMERA_HEIGHT;
    for event in fight.iter().flat_map(|s| s.events.iter()) {
        if let CombatEvent::PickupDropped { position, .. } = event {
            assert_eq!(position.y, drop_height, "Crates fall from the top of the camera");
            assert!(position.x >= engine.config().arena.boss_camera_left());
        }
    }

    let mut killed = false;
    for _ in 0..1_000 {
        if engine.strike_boss(10.0) == Some(DamageOutcome::Killed) {
            killed = true;
            break;
        }
    }
    assert!(killed);
    let after: Vec<CombatSnapshot> = (0..((SUPPLY_DROP_INTERVAL_SECS + 1.0) / DT) as usize)
        .map(|_| step(&mut engine))
        .collect();
    assert_eq!(count_events(&after, is_supply), 0, "Drops stop once the boss is dead");
}

#[test]
fn test_charge_contact_lands_once_per_charge() {
    let mut engine = CombatEngine::new(CombatConfig {
        player_max_health: 1.0e6,
        drop_chance: 0.0,
        ..Default::default()
    });
    engine.spawn_test_boss();
    engine.player_mut().body.position.x = 1700.0;

    // Hits landed during each charge, in order.
    let mut charges: Vec<u32> = Vec::new();
    for _ in 0..(60.0 / DT) as usize {
        // Only the charge may touch the player.
        kill_all_enemies(&mut engine);
        engine.hostile_fire_mut().deactivate_owned_by(Owner::Boss);
        engine.grenades_mut().retain(|g| g.owner() != Owner::Boss);

        let before = engine.player().body.health().current();
        let snap = step(&mut engine);
        if snap.events.iter().any(|e| {
            matches!(
                e,
                CombatEvent::BossStateChanged {
                    to: BossState::Charge,
                    ..
                }
            )
        }) {
            charges.push(0);
        }
        let taken = before - engine.player().body.health().current();
        if taken > 0.0 {
            assert_eq!(taken, BOSS_CHARGE_DAMAGE);
            assert!(snap.player.knocked_back, "Charge contact knocks the player back");
            let current = charges.last_mut().expect("damage outside a charge");
            *current += 1;
        }
        if charges.len() == 3 {
            break;
        }
    }
    assert_eq!(charges.len(), 3, "Boss should charge three times in a minute");
    assert_eq!(charges[0], 1, "First charge runs through the player");
    assert!(
        charges.iter().all(|hits| *hits <= 1),
        "At most one contact per charge: {charges:?}"
    );
}

#[test]
fn test_towers_never_target_boss() {
    let mut engine = CombatEngine::new(CombatConfig {
        player_max_health: 1.0e6,
        drop_chance: 0.0,
        ..Default::default()
    });
    // No grunts left to target.
    for _ in 0..frames_past_last_wave(1) {
        kill_all_enemies(&mut engine);
        step(&mut engine);
    }
    engine.spawn_test_boss();
    for _ in 0..300 {
        kill_all_enemies(&mut engine);
        step(&mut engine);
    }
    assert!(engine.boss().is_some_and(|b| !b.is_dead()));
    let arena = engine.config().arena;
    let recheck = engine.config().tower_recheck_secs;
    let boss_x = engine.boss().map(|b| b.position().x).unwrap();
    world_setup::spawn_tower(
        engine.world_mut(),
        TowerKind::Mortar,
        boss_x - MORTAR_TOWER_RANGE * 0.5,
        &arena,
        recheck,
    );
    for _ in 0..120 {
        kill_all_enemies(&mut engine);
        let snap = step(&mut engine);
        assert!(snap.towers.iter().all(|t| !t.has_target));
        assert!(snap.projectiles.iter().all(|p| p.owner != Owner::Tower));
    }
    assert_eq!(engine.boss().map(|b| b.health().current()), Some(BOSS_MAX_HEALTH));
}

// ---- Triggers ----

#[test]
fn test_wall_trap_latch_fires_once() {
    let mut engine = CombatEngine::new(CombatConfig::default());
    for _ in 0..frames_past_last_wave(1) {
        step(&mut engine);
    }
    assert!(!engine.triggers().wall_armed);

    kill_all_enemies(&mut engine);
    // The trap waits for the player to walk into the arena.
    for _ in 0..30 {
        step(&mut engine);
    }
    assert!(!engine.triggers().wall_armed);
    assert_eq!(engine.wall().height, 0.0);

    let inside_x = engine.wall().x + WALL_THICKNESS * 0.5 + PLAYER_HALF_EXTENTS.x + 100.0;
    engine.player_mut().body.position.x = inside_x;
    let snapshots: Vec<CombatSnapshot> = (0..15).map(|_| step(&mut engine)).collect();

    assert_eq!(
        count_events(&snapshots, |e| matches!(e, CombatEvent::WallTrapArmed)),
        1
    );
    assert!(engine.triggers().wall_armed);
    assert_eq!(engine.score().enemies_destroyed, engine.score().enemies_total);
    assert!(engine.wall().height > 0.0);
    assert_eq!(snapshots.last().map(|s| s.phase), Some(CombatPhase::WallRising));
    assert_eq!(
        engine.player().position().x,
        inside_x,
        "Rising wall does not move a player already inside"
    );
}

#[test]
fn test_wall_trap_waits_for_player_in_arena() {
    let arena = rampart_core::types::ArenaGeometry::default();
    let mut state = TriggerState::default();
    let mut wall = Wall::new(&arena);
    let outside = TriggerInput {
        all_waves_spawned: true,
        enemies_destroyed: 5,
        enemies_total: 5,
        player_alive: true,
        player_in_arena: false,
    };
    for _ in 0..120 {
        assert!(triggers::run(&mut state, &mut wall, outside, DT).is_empty());
    }
    assert!(!state.wall_armed);
    assert!(!wall.is_raised());

    let inside = TriggerInput {
        player_in_arena: true,
        ..outside
    };
    assert_eq!(
        triggers::run(&mut state, &mut wall, inside, DT),
        vec![Trigger::WallTrapArmed]
    );

    // The player straddling the wall line is not inside yet.
    let edge = wall.x + WALL_THICKNESS * 0.5 + PLAYER_HALF_EXTENTS.x;
    assert!(wall.is_behind(edge, PLAYER_HALF_EXTENTS.x));
    assert!(!wall.is_behind(edge - 1.0, PLAYER_HALF_EXTENTS.x));
}

#[test]
fn test_trigger_chain_spawns_boss_once() {
    let arena = rampart_core::types::ArenaGeometry::default();
    let mut state = TriggerState::default();
    let mut wall = Wall::new(&arena);
    let input = TriggerInput {
        all_waves_spawned: true,
        enemies_destroyed: 5,
        enemies_total: 5,
        player_alive: true,
        player_in_arena: true,
    };

    let mut fired = Vec::new();
    for _ in 0..600 {
        fired.extend(triggers::run(&mut state, &mut wall, input, DT));
    }
    assert_eq!(
        fired,
        vec![
            Trigger::WallTrapArmed,
            Trigger::BossIntroStarted,
            Trigger::SpawnBoss
        ]
    );
    assert!(wall.is_complete());
    assert_eq!(state.phase(), CombatPhase::BossFight);
}

#[test]
fn test_wipe_requires_all_waves_spawned() {
    let arena = rampart_core::types::ArenaGeometry::default();
    let mut state = TriggerState::default();
    let mut wall = Wall::new(&arena);
    let early = TriggerInput {
        all_waves_spawned: false,
        enemies_destroyed: 2,
        enemies_total: 7,
        player_alive: true,
        player_in_arena: true,
    };
    assert!(triggers::run(&mut state, &mut wall, early, DT).is_empty());

    let empty_stage = TriggerInput {
        all_waves_spawned: true,
        enemies_destroyed: 0,
        enemies_total: 0,
        player_alive: true,
        player_in_arena: true,
    };
    assert!(triggers::run(&mut state, &mut wall, empty_stage, DT).is_empty());
    assert!(!state.wall_armed);
}

#[test]
fn test_player_defeat_reported_once() {
    let mut engine = CombatEngine::new(CombatConfig::default());
    engine.player_mut().take_hit(&Hit::damage(PLAYER_MAX_HEALTH));
    let snapshots: Vec<CombatSnapshot> = (0..10).map(|_| step(&mut engine)).collect();
    assert_eq!(
        count_events(&snapshots, |e| matches!(e, CombatEvent::PlayerDefeated)),
        1
    );
    assert_eq!(engine.phase(), CombatPhase::Defeat);
    assert!(!snapshots[0].player.alive);
}

// ---- Drops and pickups ----

#[test]
fn test_drop_rolled_once_per_enemy() {
    let mut engine = CombatEngine::new(CombatConfig {
        drop_chance: 1.0,
        ..Default::default()
    });
    let grunt = engine.spawn_test_enemy(GruntKind::Rifleman, 900.0);
    if let Ok(mut unit) = engine.world_mut().get::<&mut Unit>(grunt) {
        unit.take_hit(&Hit::damage(1_000.0));
    }

    let snapshots: Vec<CombatSnapshot> = (0..20).map(|_| step(&mut engine)).collect();
    assert_eq!(
        count_events(&snapshots, |e| matches!(e, CombatEvent::PickupDropped { .. })),
        1
    );
    assert_eq!(
        count_events(&snapshots, |e| matches!(
            e,
            CombatEvent::EnemyKilled {
                kind: GruntKind::Rifleman,
                ..
            }
        )),
        1
    );
    assert_eq!(engine.score().enemies_destroyed, 1);
}

#[test]
fn test_no_drops_when_chance_zero() {
    let mut engine = CombatEngine::new(CombatConfig {
        drop_chance: 0.0,
        ..Default::default()
    });
    let grunt = engine.spawn_test_enemy(GruntKind::Heavy, 900.0);
    if let Ok(mut unit) = engine.world_mut().get::<&mut Unit>(grunt) {
        unit.take_hit(&Hit::damage(1_000.0));
    }
    let snapshots: Vec<CombatSnapshot> = (0..5).map(|_| step(&mut engine)).collect();
    assert_eq!(
        count_events(&snapshots, |e| matches!(e, CombatEvent::PickupDropped { .. })),
        0
    );
}

#[test]
fn test_pickup_falls_and_is_collected() {
    let mut engine = CombatEngine::new(CombatConfig::default());
    let above_player = engine.player().position() + Vec2::new(0.0, 200.0);
    world_setup::spawn_pickup(engine.world_mut(), PickupKind::GrenadeAmmo, above_player);

    let snapshots: Vec<CombatSnapshot> = (0..120).map(|_| step(&mut engine)).collect();
    assert_eq!(
        count_events(&snapshots, |e| matches!(
            e,
            CombatEvent::PickupCollected {
                kind: PickupKind::GrenadeAmmo
            }
        )),
        1
    );
    assert_eq!(
        engine.player().grenades,
        PLAYER_START_GRENADES + GRENADE_PICKUP_AMOUNT
    );
    let remaining = engine.world().query::<&Pickup>().iter().count();
    assert_eq!(remaining, 0, "Collected pickups are despawned");
}

#[test]
fn test_health_pickup_heals() {
    let mut engine = CombatEngine::new(CombatConfig::default());
    engine.player_mut().take_hit(&Hit::damage(40.0));
    let at_player = engine.player().position();
    world_setup::spawn_pickup(engine.world_mut(), PickupKind::Health, at_player);
    step(&mut engine);
    assert_eq!(
        engine.player().body.health().current(),
        PLAYER_MAX_HEALTH - 40.0 + HEALTH_PICKUP_AMOUNT
    );
}

// ---- Player ----

#[test]
fn test_player_fire_rate_limited() {
    let mut engine = CombatEngine::new(CombatConfig::default());
    let hold_fire = InputSnapshot {
        fire_held: true,
        ..Default::default()
    };
    let frames = 60;
    for _ in 0..frames {
        engine.update(DT, hold_fire, &NoCutscene);
    }
    let expected = (frames as f32 * DT / PLAYER_FIRE_INTERVAL).ceil() as u32;
    let fired = engine.score().shots_fired;
    assert!(
        fired >= expected.saturating_sub(1) && fired <= expected + 1,
        "Expected ~{expected} player shots, got {fired}"
    );
}

#[test]
fn test_raised_wall_keeps_player_in_arena() {
    let arena = rampart_core::types::ArenaGeometry::default();
    let mut player = Player::new(&arena, PLAYER_MAX_HEALTH, 0);
    let mut player_fire = ProjectileSet::new();
    let mut grenades = Vec::new();
    let mut audio = Vec::new();
    let mut score = ScoreState::default();
    let wall_x = arena.boss_camera_left();
    let walk_left = InputSnapshot {
        move_axis: -1.0,
        ..Default::default()
    };

    for _ in 0..120 {
        player_systems::run(
            &mut player,
            &walk_left,
            DT,
            &arena,
            Some(wall_x),
            &mut player_fire,
            &mut grenades,
            &mut audio,
            &mut score,
        );
    }
    let min_x = wall_x + WALL_THICKNESS * 0.5 + PLAYER_HALF_EXTENTS.x;
    assert_eq!(player.position().x, min_x, "Player is held on the arena side of the wall");
    assert_eq!(player.facing, -1.0);

    // Without a wall the arena edge is the limit.
    for _ in 0..600 {
        player_systems::run(
            &mut player,
            &walk_left,
            DT,
            &arena,
            None,
            &mut player_fire,
            &mut grenades,
            &mut audio,
            &mut score,
        );
    }
    assert_eq!(player.position().x, arena.left + PLAYER_HALF_EXTENTS.x);
}

#[test]
fn test_player_jump_lands_on_floor() {
    let arena = rampart_core::types::ArenaGeometry::default();
    let mut player = Player::new(&arena, PLAYER_MAX_HEALTH, 0);
    let floor = player.position().y;
    let mut player_fire = ProjectileSet::new();
    let mut grenades = Vec::new();
    let mut audio = Vec::new();
    let mut score = ScoreState::default();

    let mut peak = floor;
    for frame in 0..120 {
        let input = InputSnapshot {
            jump: frame == 0,
            ..Default::default()
        };
        player_systems::run(
            &mut player,
            &input,
            DT,
            &arena,
            None,
            &mut player_fire,
            &mut grenades,
            &mut audio,
            &mut score,
        );
        peak = peak.max(player.position().y);
    }
    assert!(peak > floor + 100.0, "Jump should clear 100px, peaked at {peak}");
    assert_eq!(player.position().y, floor);
    assert!(player.grounded);
}

#[test]
fn test_towers_shoot_enemies_in_range() {
    let mut engine = CombatEngine::new(CombatConfig::default());
    let tower_x = build_stage(1).towers[0].x;
    engine.spawn_test_enemy(GruntKind::Heavy, tower_x + GUN_TOWER_RANGE - 50.0);
    let snap = step(&mut engine);
    assert!(snap.towers.iter().any(|t| t.has_target));
    assert!(snap
        .projectiles
        .iter()
        .any(|p| p.owner == Owner::Tower && p.visual == VisualKey::PlayerShot));
}

#[test]
fn test_dead_enemy_is_despawned_after_corpse_time() {
    let mut engine = CombatEngine::new(CombatConfig {
        drop_chance: 0.0,
        ..Default::default()
    });
    let grunt = engine.spawn_test_enemy(GruntKind::Rifleman, 900.0);
    if let Ok(mut unit) = engine.world_mut().get::<&mut Unit>(grunt) {
        unit.take_hit(&Hit::damage(1_000.0));
    }
    step(&mut engine);
    assert!(engine.world().contains(grunt), "Corpse lingers");
    for _ in 0..(ENEMY_CORPSE_SECS / DT) as usize + 5 {
        step(&mut engine);
    }
    assert!(!engine.world().contains(grunt));
}

#[test]
fn test_resting_pickup_expires() {
    let mut engine = CombatEngine::new(CombatConfig::default());
    let floor = engine.config().arena.standing_y(PICKUP_HALF_EXTENTS);
    let pickup = world_setup::spawn_pickup(
        engine.world_mut(),
        PickupKind::Health,
        Vec2::new(900.0, floor),
    );
    let lifetime = (PICKUP_RESTING_LIFETIME_SECS / DT) as usize;

    let mut snapshots: Vec<CombatSnapshot> = (0..lifetime - 10).map(|_| step(&mut engine)).collect();
    assert!(engine.world().contains(pickup), "Still resting before its lifetime");
    snapshots.extend((0..20).map(|_| step(&mut engine)));
    assert!(!engine.world().contains(pickup), "Expired pickup is despawned");
    assert_eq!(
        count_events(&snapshots, |e| matches!(e, CombatEvent::PickupCollected { .. })),
        0
    );
}

#[test]
fn test_frost_tower_slows_grunt() {
    let mut engine = CombatEngine::new(CombatConfig::default());
    let hold_x = build_stage(1).heavy_hold_x;
    let arena = engine.config().arena;
    let recheck = engine.config().tower_recheck_secs;
    world_setup::spawn_tower(
        engine.world_mut(),
        TowerKind::Frost,
        hold_x - FROST_TOWER_RANGE + 50.0,
        &arena,
        recheck,
    );
    let heavy = engine.spawn_test_enemy(GruntKind::Heavy, hold_x);

    let mut slowed = false;
    for _ in 0..90 {
        let snap = step(&mut engine);
        if unit_of(&engine, heavy).status.slow.is_some() {
            assert!(snap.enemies.iter().any(|e| e.kind == GruntKind::Heavy && e.slowed));
            slowed = true;
            break;
        }
    }
    assert!(slowed, "Frost shot should slow the heavy");
    let unit = unit_of(&engine, heavy);
    assert_eq!(unit.health().current(), HEAVY_MAX_HEALTH - FROST_TOWER_DAMAGE);
    assert_eq!(unit.status.speed_multiplier(), FROST_SLOW_STRENGTH);
}

#[test]
fn test_mortar_tower_splashes_grouped_grunts() {
    let mut engine = CombatEngine::new(CombatConfig::default());
    let hold_x = build_stage(1).heavy_hold_x;
    let arena = engine.config().arena;
    let recheck = engine.config().tower_recheck_secs;
    world_setup::spawn_tower(
        engine.world_mut(),
        TowerKind::Mortar,
        hold_x - 500.0,
        &arena,
        recheck,
    );
    let first = engine.spawn_test_enemy(GruntKind::Heavy, hold_x);
    let second = engine.spawn_test_enemy(GruntKind::Heavy, hold_x + 40.0);

    let mut snapshots = Vec::new();
    for _ in 0..240 {
        snapshots.push(step(&mut engine));
        if unit_of(&engine, first).health().current() < HEAVY_MAX_HEALTH {
            break;
        }
    }
    assert_eq!(
        count_events(&snapshots, |e| matches!(
            e,
            CombatEvent::Explosion {
                faction: Faction::Player,
                ..
            }
        )),
        1
    );
    for heavy in [first, second] {
        assert_eq!(
            unit_of(&engine, heavy).health().current(),
            HEAVY_MAX_HEALTH - MORTAR_TOWER_DAMAGE,
            "Both grunts inside the blast take mortar damage"
        );
    }
}
