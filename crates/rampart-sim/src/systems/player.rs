//! Player controller: movement, jumping, firing and grenade throws.

use glam::Vec2;

use rampart_core::combat::{DamageOutcome, Damageable, Hit};
use rampart_core::components::Unit;
use rampart_core::constants::*;
use rampart_core::enums::Owner;
use rampart_core::events::AudioCue;
use rampart_core::input::InputSnapshot;
use rampart_core::types::{ArenaGeometry, Bounds};

use crate::ballistics::{Effect, ProjectileSet, ProjectileSpec};
use crate::grenade::Grenade;
use crate::score::ScoreState;

/// The player-controlled unit. Owned by the engine.
#[derive(Debug, Clone)]
pub struct Player {
    pub body: Unit,
    pub velocity_y: f32,
    pub grounded: bool,
    /// -1 facing left, +1 facing right.
    pub facing: f32,
    pub grenades: u32,
}

impl Player {
    pub fn new(arena: &ArenaGeometry, max_health: f32, grenades: u32) -> Self {
        let position = Vec2::new(
            arena.left + PLAYER_START_X,
            arena.standing_y(PLAYER_HALF_EXTENTS),
        );
        Self {
            body: Unit::new(position, PLAYER_HALF_EXTENTS, max_health),
            velocity_y: 0.0,
            grounded: true,
            facing: 1.0,
            grenades,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    fn muzzle(&self) -> Vec2 {
        self.body.position + Vec2::new(self.facing * self.body.half_extents.x, 0.0)
    }
}

impl Damageable for Player {
    fn bounds(&self) -> Bounds {
        self.body.bounds()
    }

    fn is_alive(&self) -> bool {
        self.body.is_alive()
    }

    fn take_hit(&mut self, hit: &Hit) -> DamageOutcome {
        self.body.take_hit(hit)
    }
}

/// Advance the player by one step of `dt`.
///
/// `wall_x` is the barrier's X while it has any height; the player is kept
/// to its right.
#[allow(clippy::too_many_arguments)]
pub fn run(
    player: &mut Player,
    input: &InputSnapshot,
    dt: f32,
    arena: &ArenaGeometry,
    wall_x: Option<f32>,
    player_fire: &mut ProjectileSet,
    grenades: &mut Vec<Grenade>,
    audio: &mut Vec<AudioCue>,
    score: &mut ScoreState,
) {
    if !player.is_alive() {
        return;
    }
    player.body.status.tick(dt);

    // 1. Horizontal movement (or knockback push)
    let half = player.body.half_extents;
    if let Some(knockback) = player.body.status.knockback {
        player.body.position.x += knockback.direction * KNOCKBACK_SPEED * dt;
    } else {
        let axis = input.move_axis;
        if axis != 0.0 {
            player.facing = axis.signum();
        }
        player.body.position.x +=
            axis * PLAYER_SPEED * player.body.status.speed_multiplier() * dt;

        if input.jump && player.grounded {
            player.velocity_y = PLAYER_JUMP_VELOCITY;
            player.grounded = false;
        }
    }

    let mut min_x = arena.left + half.x;
    if let Some(wall_x) = wall_x {
        min_x = min_x.max(wall_x + WALL_THICKNESS * 0.5 + half.x);
    }
    let max_x = (arena.right - half.x).max(min_x);
    player.body.position.x = player.body.position.x.clamp(min_x, max_x);

    // 2. Vertical motion against the floor
    if !player.grounded {
        player.velocity_y -= PLAYER_GRAVITY * dt;
        player.body.position.y += player.velocity_y * dt;
        let floor = arena.standing_y(half);
        if player.body.position.y <= floor {
            player.body.position.y = floor;
            player.velocity_y = 0.0;
            player.grounded = true;
        }
    }

    // 3. Fire while held, on the shared cooldown gate
    if (input.fire_held || input.fire_just_pressed) && player.body.can_act() {
        let origin = player.muzzle();
        player_fire.spawn(ProjectileSpec::straight(
            origin,
            origin.x + player.facing * PLAYER_SHOT_RANGE,
            PLAYER_SHOT_SPEED,
            Effect::Direct {
                damage: PLAYER_SHOT_DAMAGE,
            },
            Owner::Player,
        ));
        player.body.status.attack_cooldown = PLAYER_FIRE_INTERVAL;
        score.shots_fired += 1;
        audio.push(AudioCue::PlayerShot);
    }

    // 4. Grenade throw on press
    if input.grenade_just_pressed && player.grenades > 0 && !player.body.status.is_knocked_back()
    {
        let origin = player.body.position + Vec2::new(0.0, half.y);
        let target = Vec2::new(
            player.body.position.x + player.facing * GRENADE_THROW_DISTANCE,
            arena.ground_y,
        );
        grenades.push(Grenade::thrown(origin, target));
        player.grenades -= 1;
        audio.push(AudioCue::GrenadeThrow);
    }
}
