//! combat-harness: run a headless fight from a config file and report what happened.
//!
//! Usage:
//!   combat-harness [--config fight.json] [--frames N] [--seed N] [--stage N]
//!                  [--progress progress.json] [--trace]
//!
//! A scripted pilot plays the player. The summary is printed to stdout as
//! JSON; diagnostics go to stderr under `RUST_LOG` (default `warn`).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rampart_core::assets::{VisualCatalog, VisualHandle};
use rampart_core::config::CombatConfig;
use rampart_core::constants::{DT, RIFLEMAN_FIRING_RANGE};
use rampart_core::enums::{BossState, CombatPhase, VisualKey};
use rampart_core::events::CombatEvent;
use rampart_core::input::{InputTracker, RawInput};
use rampart_core::progress::Progress;
use rampart_core::state::CombatSnapshot;
use rampart_sim::{CombatEngine, NoCutscene};

/// Default cap: five minutes of fight at the nominal tick rate.
const DEFAULT_FRAMES: u32 = 60 * 300;

struct Args {
    config: Option<PathBuf>,
    frames: u32,
    seed: Option<u64>,
    stage: Option<u32>,
    progress: Option<PathBuf>,
    trace: bool,
}

#[derive(Debug, Default, Serialize)]
struct Summary {
    stage: u32,
    seed: u64,
    frames_run: u32,
    elapsed_secs: f64,
    final_phase: Option<CombatPhase>,
    player_health: f32,
    enemies_destroyed: u32,
    enemies_total: u32,
    shots_fired: u32,
    pickups_collected: u32,
    boss_cleared_projectiles: usize,
    boss_states_seen: Vec<BossState>,
    event_counts: BTreeMap<String, u32>,
    placeholder_visuals: Vec<VisualKey>,
    unlocked_stage: u32,
}

fn main() -> Result<()> {
    init_tracing();

    let args = parse_args(std::env::args().skip(1))?;
    let mut config = match &args.config {
        Some(path) => CombatConfig::load(path)
            .with_context(|| format!("loading fight config {}", path.display()))?,
        None => CombatConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(stage) = args.stage {
        config.stage = stage;
    }
    config.validate().context("validating fight config")?;

    let mut progress = match &args.progress {
        Some(path) => load_progress(path)?,
        None => Progress::default(),
    };
    if !progress.is_unlocked(config.stage) {
        bail!(
            "stage {} is locked (highest unlocked: {})",
            config.stage,
            progress.highest_unlocked
        );
    }

    let summary = run_fight(config, args.frames, args.trace, &mut progress);

    if let Some(path) = &args.progress {
        let json = serde_json::to_string_pretty(&progress)?;
        std::fs::write(path, json)
            .with_context(|| format!("writing progress {}", path.display()))?;
    }

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}

fn print_usage() {
    eprintln!(
        "combat-harness: headless RAMPART fight runner\n\
         \n\
           --config <path>    Fight config JSON (optional, defaults apply)\n\
           --frames <N>       Maximum ticks to run (default: {DEFAULT_FRAMES})\n\
           --seed <N>         Override the config seed\n\
           --stage <N>        Override the config stage\n\
           --progress <path>  Progress JSON to check and update\n\
           --trace            Print every snapshot as a JSON line to stderr\n"
    );
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut parsed = Args {
        config: None,
        frames: DEFAULT_FRAMES,
        seed: None,
        stage: None,
        progress: None,
        trace: false,
    };

    while let Some(arg) = args.next() {
        let mut value = || {
            args.next()
                .with_context(|| format!("{arg} requires a value"))
        };
        match arg.as_str() {
            "--config" => parsed.config = Some(PathBuf::from(value()?)),
            "--progress" => parsed.progress = Some(PathBuf::from(value()?)),
            "--frames" => parsed.frames = value()?.parse().context("--frames expects a count")?,
            "--seed" => parsed.seed = Some(value()?.parse().context("--seed expects an integer")?),
            "--stage" => {
                parsed.stage = Some(value()?.parse().context("--stage expects a stage number")?)
            }
            "--trace" => parsed.trace = true,
            "help" | "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => {
                print_usage();
                bail!("unknown argument: {other}");
            }
        }
    }
    Ok(parsed)
}

fn load_progress(path: &Path) -> Result<Progress> {
    if !path.exists() {
        return Ok(Progress::default());
    }
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading progress {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("parsing progress {}", path.display()))
}

/// The handles a desktop build would ship with. The frost and mortar towers
/// have no art yet and fall back to placeholders.
fn default_catalog() -> VisualCatalog {
    let mut catalog = VisualCatalog::new();
    for (key, path) in [
        (VisualKey::Player, "sprites/player.png"),
        (VisualKey::Rifleman, "sprites/rifleman.png"),
        (VisualKey::Heavy, "sprites/heavy.png"),
        (VisualKey::GunTower, "sprites/gun_tower.png"),
        (VisualKey::Boss, "sprites/boss.png"),
        (VisualKey::PlayerShot, "sprites/shot.png"),
        (VisualKey::EnemyBullet, "sprites/enemy_bullet.png"),
        (VisualKey::BossBullet, "sprites/boss_bullet.png"),
        (VisualKey::Shell, "sprites/shell.png"),
        (VisualKey::Grenade, "sprites/grenade.png"),
        (VisualKey::Explosion, "sprites/explosion.png"),
        (VisualKey::HealthPickup, "sprites/health.png"),
        (VisualKey::GrenadePickup, "sprites/grenade_crate.png"),
    ] {
        catalog.register(key, path);
    }
    catalog
}

/// Scripted player: advance until grunts are in rifle range, hold fire,
/// lob a grenade every few seconds and hop over boss charges.
fn pilot(snapshot: &CombatSnapshot, frame: u32) -> RawInput {
    let player_x = snapshot.player.position.x;
    let nearest = snapshot
        .enemies
        .iter()
        .map(|e| e.position.x)
        .chain(snapshot.boss.as_ref().map(|b| b.position.x))
        .filter(|x| *x > player_x)
        .fold(f32::INFINITY, f32::min);

    let move_axis = if nearest - player_x > RIFLEMAN_FIRING_RANGE * 0.8 {
        1.0
    } else {
        0.0
    };
    let boss_charging = snapshot
        .boss
        .as_ref()
        .is_some_and(|b| matches!(b.state, BossState::PrepareCharge | BossState::Charge));

    RawInput {
        move_axis,
        jump_held: boss_charging,
        fire_held: nearest.is_finite(),
        grenade_held: frame % 180 == 0 && nearest - player_x < 400.0,
    }
}

fn run_fight(config: CombatConfig, frames: u32, trace: bool, progress: &mut Progress) -> Summary {
    let catalog = default_catalog();
    let mut summary = Summary {
        stage: config.stage,
        seed: config.seed,
        ..Default::default()
    };
    info!(stage = config.stage, seed = config.seed, "starting fight");

    let mut engine = CombatEngine::new(config);
    let mut tracker = InputTracker::new();
    let mut last = CombatSnapshot::default();
    let mut seen_visuals: Vec<VisualKey> = Vec::new();

    for frame in 0..frames {
        let input = tracker.sample(pilot(&last, frame));
        let snapshot = engine.update(DT, input, &NoCutscene);
        summary.frames_run = frame + 1;

        if trace {
            if let Ok(line) = serde_json::to_string(&snapshot) {
                eprintln!("{line}");
            }
        }

        for event in &snapshot.events {
            *summary.event_counts.entry(event_name(event).to_string()).or_default() += 1;
            match event {
                CombatEvent::BossProjectilesCleared { count } => {
                    summary.boss_cleared_projectiles = *count;
                }
                CombatEvent::StageCompleted { stage } => {
                    if progress.record_completion(*stage) {
                        info!(stage, "stage unlocked");
                    }
                }
                _ => {}
            }
        }
        if let Some(boss) = &snapshot.boss {
            if !summary.boss_states_seen.contains(&boss.state) {
                summary.boss_states_seen.push(boss.state);
            }
        }
        for key in visuals(&snapshot) {
            if !seen_visuals.contains(&key) {
                seen_visuals.push(key);
            }
        }

        let done = matches!(snapshot.phase, CombatPhase::Victory | CombatPhase::Defeat);
        last = snapshot;
        if done {
            debug!(frame, phase = ?last.phase, "fight over");
            break;
        }
    }

    summary.elapsed_secs = last.time.elapsed_secs;
    summary.final_phase = Some(last.phase);
    summary.player_health = last.player.health;
    summary.enemies_destroyed = last.score.enemies_destroyed;
    summary.enemies_total = last.score.enemies_total;
    summary.shots_fired = last.score.shots_fired;
    summary.pickups_collected = last.score.pickups_collected;
    summary.placeholder_visuals = seen_visuals
        .into_iter()
        .filter(|key| catalog.resolve(*key) == VisualHandle::Placeholder)
        .collect();
    summary.unlocked_stage = progress.highest_unlocked;
    summary
}

fn visuals(snapshot: &CombatSnapshot) -> impl Iterator<Item = VisualKey> + '_ {
    std::iter::once(VisualKey::Player)
        .chain(snapshot.enemies.iter().map(|e| e.visual))
        .chain(snapshot.towers.iter().map(|t| t.visual))
        .chain(snapshot.boss.iter().map(|b| b.visual))
        .chain(snapshot.projectiles.iter().map(|p| p.visual))
        .chain(snapshot.grenades.iter().map(|g| g.visual))
        .chain(snapshot.pickups.iter().map(|p| p.visual))
}

fn event_name(event: &CombatEvent) -> &'static str {
    match event {
        CombatEvent::EnemyKilled { .. } => "enemy_killed",
        CombatEvent::PickupDropped { .. } => "pickup_dropped",
        CombatEvent::PickupCollected { .. } => "pickup_collected",
        CombatEvent::Explosion { .. } => "explosion",
        CombatEvent::WallTrapArmed => "wall_trap_armed",
        CombatEvent::BossIntroStarted => "boss_intro_started",
        CombatEvent::BossSpawned { .. } => "boss_spawned",
        CombatEvent::BossStateChanged { .. } => "boss_state_changed",
        CombatEvent::BossProjectilesCleared { .. } => "boss_projectiles_cleared",
        CombatEvent::BossDefeated => "boss_defeated",
        CombatEvent::StageCompleted { .. } => "stage_completed",
        CombatEvent::PlayerDefeated => "player_defeated",
    }
}
