//! Simulation constants and tuning parameters.
//!
//! World units are pixels at 1:1 camera zoom, y-up, seconds for time.

use glam::Vec2;

/// Nominal simulation tick rate (Hz). The engine accepts any delta; this is the
/// step used by the harness and the tests.
pub const TICK_RATE: u32 = 60;

/// Seconds per nominal tick.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

/// Largest step a single update will integrate. Longer frames are clamped.
pub const MAX_FRAME_DELTA: f32 = 0.1;

// --- Arena defaults ---

pub const ARENA_LEFT: f32 = 0.0;
pub const ARENA_RIGHT: f32 = 2400.0;
pub const ARENA_GROUND_Y: f32 = 0.0;
pub const CAMERA_WIDTH: f32 = 960.0;
pub const CAMERA_HEIGHT: f32 = 540.0;

/// Projectiles further than this outside the arena are retired.
pub const OUT_OF_BOUNDS_MARGIN: f32 = 200.0;

// --- Player ---

pub const PLAYER_MAX_HEALTH: f32 = 100.0;
pub const PLAYER_HALF_EXTENTS: Vec2 = Vec2::new(20.0, 40.0);
pub const PLAYER_START_X: f32 = 120.0;
pub const PLAYER_SPEED: f32 = 260.0;
pub const PLAYER_JUMP_VELOCITY: f32 = 620.0;
pub const PLAYER_GRAVITY: f32 = 1600.0;
/// Seconds between shots while fire is held.
pub const PLAYER_FIRE_INTERVAL: f32 = 0.2;
pub const PLAYER_SHOT_SPEED: f32 = 900.0;
pub const PLAYER_SHOT_DAMAGE: f32 = 1.0;
/// Distance ahead of the muzzle used as the linear shot's target X.
pub const PLAYER_SHOT_RANGE: f32 = 1200.0;
pub const PLAYER_START_GRENADES: u32 = 3;
pub const PLAYER_MAX_GRENADES: u32 = 9;

// --- Grenades ---

pub const GRENADE_THROW_DISTANCE: f32 = 320.0;
pub const GRENADE_APEX_HEIGHT: f32 = 120.0;
pub const GRENADE_SPEED: f32 = 500.0;
pub const GRENADE_DAMAGE: f32 = 10.0;
pub const GRENADE_RADIUS: f32 = 90.0;
/// Knockback a player grenade applies to every grunt it damages.
pub const GRENADE_KNOCKBACK_SECS: f32 = 0.5;
/// Distance at which a flying grenade detonates against a live target.
pub const GRENADE_PROXIMITY: f32 = 24.0;
/// How long a detonated grenade stays around for presentation before removal.
pub const EXPLOSION_LINGER_SECS: f32 = 0.35;
pub const GRENADE_HALF_EXTENTS: Vec2 = Vec2::new(6.0, 6.0);

// --- Ballistics ---

/// Flight time is `|dx| / (speed * BALLISTIC_SPEED_FACTOR)`.
pub const BALLISTIC_SPEED_FACTOR: f32 = 0.8;
/// Explode once elapsed time exceeds this multiple of the flight time.
pub const BALLISTIC_TIME_LIMIT_FACTOR: f32 = 1.2;
/// Floor for the horizontal distance used to derive flight time.
pub const MIN_BALLISTIC_DISTANCE: f32 = 24.0;
pub const MIN_BALLISTIC_SPEED: f32 = 1.0;
/// Squared-distance threshold (as a distance) to the landing point.
pub const EXPLOSION_PROXIMITY: f32 = 8.0;
/// Dead-man's switch for every projectile, regardless of motion kind.
pub const PROJECTILE_HARD_TIMEOUT_SECS: f32 = 6.0;
pub const SHOT_HALF_EXTENTS: Vec2 = Vec2::new(6.0, 3.0);
pub const SHELL_HALF_EXTENTS: Vec2 = Vec2::new(8.0, 8.0);
/// Retired projectiles kept for reuse per projectile set.
pub const PROJECTILE_POOL_CAPACITY: usize = 64;

// --- Status effects ---

pub const KNOCKBACK_SPEED: f32 = 240.0;

// --- Grunts ---

pub const RIFLEMAN_MAX_HEALTH: f32 = 3.0;
pub const RIFLEMAN_SPEED: f32 = 80.0;
pub const RIFLEMAN_FIRING_RANGE: f32 = 420.0;
pub const RIFLEMAN_FIRE_INTERVAL: f32 = 1.6;
pub const RIFLEMAN_FIRST_SHOT_DELAY: f32 = 0.5;
pub const RIFLEMAN_BULLET_SPEED: f32 = 420.0;
pub const RIFLEMAN_BULLET_DAMAGE: f32 = 5.0;
pub const RIFLEMAN_HALF_EXTENTS: Vec2 = Vec2::new(18.0, 36.0);

pub const HEAVY_MAX_HEALTH: f32 = 12.0;
pub const HEAVY_SPEED: f32 = 45.0;
pub const HEAVY_FIRE_INTERVAL: f32 = 3.5;
pub const HEAVY_FIRST_SHOT_DELAY: f32 = 1.0;
pub const HEAVY_SHELL_SPEED: f32 = 380.0;
pub const HEAVY_SHELL_DAMAGE: f32 = 12.0;
pub const HEAVY_SHELL_APEX: f32 = 140.0;
pub const HEAVY_SHELL_RADIUS: f32 = 70.0;
pub const HEAVY_HALF_EXTENTS: Vec2 = Vec2::new(30.0, 40.0);

/// Seconds a dead grunt lingers before it is despawned.
pub const ENEMY_CORPSE_SECS: f32 = 1.0;
/// Horizontal gap between grunts of the same wave at spawn.
pub const ENEMY_SPAWN_SPACING: f32 = 56.0;

// --- Towers ---

/// Interval at which a tower re-validates its current target.
pub const TOWER_RECHECK_SECS: f32 = 0.1;
/// Muzzle height of a tower above the floor.
pub const TOWER_MUZZLE_HEIGHT: f32 = 40.0;

pub const GUN_TOWER_RANGE: f32 = 500.0;
pub const GUN_TOWER_INTERVAL: f32 = 0.5;
pub const GUN_TOWER_DAMAGE: f32 = 1.0;
pub const GUN_TOWER_SHOT_SPEED: f32 = 800.0;

pub const FROST_TOWER_RANGE: f32 = 420.0;
pub const FROST_TOWER_INTERVAL: f32 = 1.2;
pub const FROST_TOWER_DAMAGE: f32 = 1.0;
pub const FROST_TOWER_SHOT_SPEED: f32 = 600.0;
pub const FROST_SLOW_STRENGTH: f32 = 0.5;
pub const FROST_SLOW_SECS: f32 = 2.0;

pub const MORTAR_TOWER_RANGE: f32 = 700.0;
pub const MORTAR_TOWER_INTERVAL: f32 = 2.5;
pub const MORTAR_TOWER_DAMAGE: f32 = 4.0;
pub const MORTAR_TOWER_RADIUS: f32 = 80.0;
pub const MORTAR_TOWER_APEX: f32 = 160.0;
pub const MORTAR_TOWER_SHELL_SPEED: f32 = 420.0;

// --- Boss ---

pub const BOSS_MAX_HEALTH: f32 = 200.0;
pub const BOSS_HALF_EXTENTS: Vec2 = Vec2::new(60.0, 90.0);
pub const BOSS_ENTRY_SPEED: f32 = 180.0;
/// Spawn distance beyond the right camera edge.
pub const BOSS_SPAWN_OFFSET: f32 = 160.0;
/// Stop position as a fraction of the camera width from its left edge.
pub const BOSS_STOP_FRACTION: f32 = 0.8;
pub const BOSS_IDLE_SECS: f32 = 1.0;
pub const BOSS_BURSTS_PER_CYCLE: u32 = 3;
pub const BOSS_VOLLEY_SIZE: u32 = 5;
/// Vertical spacing between bullets of one volley.
pub const BOSS_VOLLEY_SPREAD: f32 = 14.0;
pub const BOSS_BURST_SECS: f32 = 0.4;
pub const BOSS_BURST_COOLDOWN_SECS: f32 = 0.6;
pub const BOSS_BULLET_SPEED: f32 = 520.0;
pub const BOSS_BULLET_DAMAGE: f32 = 6.0;
/// Stagger applied by each boss bullet.
pub const BOSS_BULLET_KNOCKBACK_SECS: f32 = 0.15;
pub const BOSS_PRE_GRENADE_SECS: f32 = 0.5;
pub const BOSS_GRENADES_PER_CYCLE: u32 = 4;
pub const BOSS_TOSS_SECS: f32 = 0.3;
pub const BOSS_TOSS_COOLDOWN_SECS: f32 = 0.7;
/// Horizontal offset from the player for alternating grenade targets.
pub const BOSS_GRENADE_SIDE_OFFSET: f32 = 90.0;
pub const BOSS_GRENADE_DAMAGE: f32 = 12.0;
pub const BOSS_GRENADE_RADIUS: f32 = 80.0;
pub const BOSS_GRENADE_APEX: f32 = 220.0;
pub const BOSS_GRENADE_SPEED: f32 = 450.0;
pub const BOSS_PREPARE_CHARGE_SECS: f32 = 0.8;
pub const BOSS_CHARGE_SPEED: f32 = 700.0;
pub const BOSS_CHARGE_DAMAGE: f32 = 15.0;
pub const BOSS_CHARGE_KNOCKBACK_SECS: f32 = 0.4;
pub const BOSS_DEFEAT_SEQUENCE_SECS: f32 = 2.5;

// --- Wall trap / intro ---

pub const WALL_TARGET_HEIGHT: f32 = 320.0;
pub const WALL_RISE_SPEED: f32 = 240.0;
pub const WALL_THICKNESS: f32 = 40.0;
pub const BOSS_INTRO_SECS: f32 = 2.0;

// --- Pickups ---

pub const DROP_CHANCE: f64 = 0.25;
/// Probability that a rolled drop is a health pickup rather than grenades.
pub const HEALTH_DROP_SHARE: f64 = 0.6;
pub const SUPPLY_DROP_INTERVAL_SECS: f32 = 12.0;
pub const PICKUP_HALF_EXTENTS: Vec2 = Vec2::new(14.0, 14.0);
pub const PICKUP_GRAVITY: f32 = 900.0;
pub const PICKUP_RESTING_LIFETIME_SECS: f32 = 10.0;
pub const HEALTH_PICKUP_AMOUNT: f32 = 25.0;
pub const GRENADE_PICKUP_AMOUNT: u32 = 2;
