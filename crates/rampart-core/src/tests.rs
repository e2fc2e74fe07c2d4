use glam::Vec2;
use proptest::prelude::*;

use crate::assets::{VisualCatalog, VisualHandle};
use crate::combat::{DamageOutcome, Damageable, Hit};
use crate::components::{Health, StatusEffects, Unit};
use crate::config::{CombatConfig, ConfigError};
use crate::enums::*;
use crate::events::{AudioCue, CombatEvent};
use crate::input::{InputTracker, RawInput};
use crate::progress::Progress;
use crate::state::CombatSnapshot;
use crate::types::{Bounds, Timer};

fn grunt(health: f32) -> Unit {
    Unit::new(Vec2::new(0.0, 36.0), Vec2::new(18.0, 36.0), health)
}

// ---- Health ----

#[test]
fn test_health_kill_reported_once() {
    let mut unit = grunt(3.0);
    assert_eq!(unit.take_hit(&Hit::damage(1.0)), DamageOutcome::Damaged);
    assert_eq!(unit.take_hit(&Hit::damage(5.0)), DamageOutcome::Killed);
    assert_eq!(unit.health().current(), 0.0);
    assert!(!unit.is_alive());

    for _ in 0..10 {
        assert_eq!(unit.take_hit(&Hit::damage(1.0)), DamageOutcome::Ignored);
    }
    assert_eq!(unit.health().current(), 0.0);
}

#[test]
fn test_dead_unit_cannot_heal_or_act() {
    let mut unit = grunt(1.0);
    unit.take_hit(&Hit::damage(1.0));
    unit.heal(50.0);
    assert_eq!(unit.health().current(), 0.0);
    assert!(!unit.can_act());
}

#[test]
fn test_heal_clamped_to_max() {
    let mut health = Health::new(10.0);
    health.apply_damage(4.0);
    health.heal(100.0);
    assert_eq!(health.current(), 10.0);
}

#[test]
fn test_non_finite_damage_ignored() {
    let mut health = Health::new(10.0);
    assert_eq!(health.apply_damage(f32::NAN), DamageOutcome::Ignored);
    assert_eq!(health.apply_damage(f32::INFINITY), DamageOutcome::Ignored);
    assert_eq!(health.apply_damage(-3.0), DamageOutcome::Ignored);
    assert_eq!(health.current(), 10.0);
}

proptest! {
    /// Health stays within [0, max] for any sequence of damage and heals.
    #[test]
    fn prop_health_stays_clamped(
        max in 1.0f32..500.0,
        ops in prop::collection::vec((any::<bool>(), -50.0f32..300.0), 0..64)
    ) {
        let mut unit = Unit::new(Vec2::ZERO, Vec2::ONE, max);
        let mut kills = 0;
        for (is_damage, amount) in ops {
            if is_damage {
                if unit.take_hit(&Hit::damage(amount)) == DamageOutcome::Killed {
                    kills += 1;
                }
            } else {
                unit.heal(amount);
            }
            let current = unit.health().current();
            prop_assert!((0.0..=max).contains(&current));
            prop_assert_eq!(unit.is_alive(), current > 0.0);
        }
        prop_assert!(kills <= 1);
    }
}

// ---- Status effects ----

#[test]
fn test_can_act_gate() {
    let mut status = StatusEffects::default();
    assert!(status.can_act());

    status.attack_cooldown = 0.5;
    assert!(!status.can_act());
    status.tick(0.5);
    assert!(status.can_act());

    let mut unit = grunt(5.0);
    unit.take_hit(&Hit::damage(1.0).with_knockback(0.3, 1.0));
    assert!(!unit.can_act(), "Knocked-back units cannot act");
    unit.status.tick(0.31);
    assert!(unit.can_act());
}

#[test]
fn test_slow_multiplier_and_expiry() {
    let mut unit = grunt(5.0);
    unit.take_hit(&Hit::damage(1.0).with_slow(0.5, 2.0));
    assert!((unit.status.speed_multiplier() - 0.5).abs() < 1e-6);

    // Weaker slow does not replace the stronger one.
    unit.take_hit(&Hit::damage(1.0).with_slow(0.2, 10.0));
    assert!((unit.status.speed_multiplier() - 0.5).abs() < 1e-6);

    unit.status.tick(2.1);
    assert_eq!(unit.status.speed_multiplier(), 1.0);
}

#[test]
fn test_killing_blow_does_not_apply_effects() {
    let mut unit = grunt(1.0);
    unit.take_hit(&Hit::damage(1.0).with_slow(0.5, 2.0));
    assert!(unit.status.slow.is_none());
}

// ---- Timer ----

#[test]
fn test_timer_ignores_bad_steps() {
    let mut timer = Timer::new();
    timer.advance(0.25);
    timer.advance(-1.0);
    timer.advance(f32::NAN);
    timer.advance(0.25);
    assert!((timer.elapsed() - 0.5).abs() < 1e-6);
    assert!(timer.has_elapsed(0.5));
    timer.reset();
    assert_eq!(timer.elapsed(), 0.0);
}

// ---- Bounds ----

#[test]
fn test_bounds_overlap() {
    let a = Bounds::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
    let b = Bounds::new(Vec2::new(15.0, 0.0), Vec2::new(10.0, 10.0));
    let c = Bounds::new(Vec2::new(20.0, 0.0), Vec2::new(10.0, 10.0));
    assert!(a.intersects(&b));
    assert!(!a.intersects(&c), "Touching edges do not overlap");
    assert_eq!(a.distance_sq(Vec2::new(3.0, 4.0)), 0.0, "Inside the box");
    assert_eq!(a.distance_sq(Vec2::new(13.0, 14.0)), 25.0);
}

// ---- Input ----

#[test]
fn test_just_pressed_only_on_first_tick() {
    let mut tracker = InputTracker::new();
    let held = RawInput {
        fire_held: true,
        grenade_held: true,
        jump_held: true,
        ..Default::default()
    };

    let first = tracker.sample(held);
    assert!(first.fire_just_pressed);
    assert!(first.grenade_just_pressed);
    assert!(first.jump);

    for _ in 0..5 {
        let next = tracker.sample(held);
        assert!(!next.fire_just_pressed);
        assert!(!next.grenade_just_pressed);
        assert!(!next.jump);
        assert!(next.fire_held);
    }

    let released = tracker.sample(RawInput::default());
    assert!(!released.fire_held);

    let again = tracker.sample(held);
    assert!(again.fire_just_pressed, "Re-press after release is a new edge");
}

#[test]
fn test_move_axis_sanitized() {
    let mut tracker = InputTracker::new();
    let snap = tracker.sample(RawInput {
        move_axis: 3.0,
        ..Default::default()
    });
    assert_eq!(snap.move_axis, 1.0);
    let snap = tracker.sample(RawInput {
        move_axis: f32::NAN,
        ..Default::default()
    });
    assert_eq!(snap.move_axis, 0.0);
}

// ---- Config ----

#[test]
fn test_config_partial_json_uses_defaults() {
    let config = CombatConfig::from_json(r#"{ "seed": 7, "arena": { "right": 3000.0 } }"#).unwrap();
    assert_eq!(config.seed, 7);
    assert_eq!(config.arena.right, 3000.0);
    assert_eq!(config.arena.camera_width, CombatConfig::default().arena.camera_width);
    assert_eq!(config.stage, 1);
}

#[test]
fn test_config_rejects_bad_values() {
    let err = CombatConfig::from_json(r#"{ "drop_chance": 1.5 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));

    let err = CombatConfig::from_json(r#"{ "arena": { "left": 10.0, "right": 5.0 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));

    let err = CombatConfig::from_json("not json").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));

    let err = CombatConfig::load("/nonexistent/rampart.json").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

// ---- Progress / assets ----

#[test]
fn test_progress_is_monotonic() {
    let mut progress = Progress::default();
    assert!(progress.record_completion(2));
    assert_eq!(progress.highest_unlocked, 3);
    assert!(!progress.record_completion(1));
    assert_eq!(progress.highest_unlocked, 3);
    assert!(progress.is_unlocked(3));
    assert!(!progress.is_unlocked(4));
}

#[test]
fn test_missing_visual_falls_back_to_placeholder() {
    let mut catalog = VisualCatalog::new();
    catalog.register(VisualKey::Boss, "sprites/boss.png");
    assert_eq!(
        catalog.resolve(VisualKey::Boss),
        VisualHandle::Asset("sprites/boss.png".into())
    );
    assert_eq!(catalog.resolve(VisualKey::Grenade), VisualHandle::Placeholder);
}

// ---- Serialization ----

#[test]
fn test_audio_cue_names_unique() {
    let cues = [
        AudioCue::PlayerShot,
        AudioCue::PlayerHurt,
        AudioCue::PlayerDeath,
        AudioCue::GrenadeThrow,
        AudioCue::Explosion,
        AudioCue::EnemyShot,
        AudioCue::EnemyDeath,
        AudioCue::TowerShot,
        AudioCue::PickupCollected,
        AudioCue::WallRise,
        AudioCue::BossIntro,
        AudioCue::BossVolley,
        AudioCue::BossGrenade,
        AudioCue::BossChargeWindup,
        AudioCue::BossCharge,
        AudioCue::BossDefeat,
    ];
    let names: std::collections::HashSet<_> = cues.iter().map(|c| c.name()).collect();
    assert_eq!(names.len(), cues.len());
    assert_eq!(AudioCue::BossCharge.name(), "boss-charge");
    assert_eq!(AudioCue::EnemyDeath.name(), "enemy-death");
}

#[test]
fn test_snapshot_serializes_events() {
    let snapshot = CombatSnapshot {
        events: vec![
            CombatEvent::BossStateChanged {
                from: BossState::Idle,
                to: BossState::PerformingBurst,
            },
            CombatEvent::StageCompleted { stage: 2 },
        ],
        ..Default::default()
    };
    let json = serde_json::to_string(&snapshot).unwrap();
    assert!(json.contains("\"type\":\"StageCompleted\""));
    let back: CombatSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back.events, snapshot.events);
}
