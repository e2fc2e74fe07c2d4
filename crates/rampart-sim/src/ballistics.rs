//! Projectile and ballistics model.
//!
//! A projectile is a closed combination of a [`Motion`] (straight or lobbed)
//! and an [`Effect`] (what it does on impact). Lobbed motion is a closed-form
//! [`Arc`] solved once at launch and evaluated analytically from the elapsed
//! flight time, so the path does not depend on how the frames were sliced.

use glam::Vec2;

use rampart_core::combat::{DamageOutcome, Damageable, Hit};
use rampart_core::constants::*;
use rampart_core::enums::{Faction, Owner};
use rampart_core::types::{ArenaGeometry, Bounds, Timer};

/// Closed-form parabolic trajectory from `origin` to `target`.
///
/// Flight time is `T = d / (speed * 0.8)` with `d = max(|dx|, 24)`, so a
/// launch straight up or down still yields a finite `T`. Gravity and launch
/// velocity are solved from the rise to the apex and the fall from it, which
/// are both strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    origin: Vec2,
    target: Vec2,
    vx: f32,
    vy0: f32,
    /// Downward acceleration magnitude.
    gravity: f32,
    flight_secs: f32,
}

impl Arc {
    pub fn new(origin: Vec2, target: Vec2, apex_height: f32, speed: f32) -> Self {
        let dx = target.x - origin.x;
        let dx = if dx.is_finite() { dx } else { 0.0 };
        let speed = if speed.is_finite() {
            speed.max(MIN_BALLISTIC_SPEED)
        } else {
            MIN_BALLISTIC_SPEED
        };
        let apex_height = if apex_height.is_finite() {
            apex_height.max(1.0)
        } else {
            1.0
        };

        let distance = dx.abs().max(MIN_BALLISTIC_DISTANCE);
        let flight_secs = distance / (speed * BALLISTIC_SPEED_FACTOR);
        let vx = dx / flight_secs;

        let apex_y = origin.y.max(target.y) + apex_height;
        let rise = apex_y - origin.y;
        let fall = apex_y - target.y;
        let root_sum = rise.sqrt() + fall.sqrt();
        let gravity = 2.0 * root_sum * root_sum / (flight_secs * flight_secs);
        let vy0 = (2.0 * gravity * rise).sqrt();

        Self {
            origin,
            target,
            vx,
            vy0,
            gravity,
            flight_secs,
        }
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    /// Total flight time `T`.
    pub fn flight_secs(&self) -> f32 {
        self.flight_secs
    }

    pub fn horizontal_velocity(&self) -> f32 {
        self.vx
    }

    /// Time at which the arc peaks.
    pub fn apex_secs(&self) -> f32 {
        self.vy0 / self.gravity
    }

    pub fn position_at(&self, t: f32) -> Vec2 {
        Vec2::new(
            self.origin.x + self.vx * t,
            self.origin.y + self.vy0 * t - 0.5 * self.gravity * t * t,
        )
    }

    /// Whether a projectile following this arc, currently at `position`
    /// after `t` seconds, must explode.
    pub fn should_explode(&self, t: f32, position: Vec2) -> bool {
        position.distance_squared(self.target) < EXPLOSION_PROXIMITY * EXPLOSION_PROXIMITY
            || (t > self.apex_secs() && position.y < self.target.y)
            || t > self.flight_secs * BALLISTIC_TIME_LIMIT_FACTOR
            || t > PROJECTILE_HARD_TIMEOUT_SECS
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    /// Constant horizontal velocity. The sign is fixed at launch.
    Linear { velocity: f32 },
    Parabolic(Arc),
}

/// What a projectile does to whatever it hits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    Direct { damage: f32 },
    Slow { damage: f32, strength: f32, secs: f32 },
    Knockback { damage: f32, secs: f32 },
    /// Area damage around the impact point.
    Blast { damage: f32, radius: f32 },
}

impl Effect {
    pub fn is_area(&self) -> bool {
        matches!(self, Effect::Blast { .. })
    }

    pub fn damage(&self) -> f32 {
        match *self {
            Effect::Direct { damage }
            | Effect::Slow { damage, .. }
            | Effect::Knockback { damage, .. }
            | Effect::Blast { damage, .. } => damage,
        }
    }

    /// The hit a single target receives. `direction` is the push direction
    /// for knockback.
    pub fn hit(&self, direction: f32) -> Hit {
        match *self {
            Effect::Direct { damage } | Effect::Blast { damage, .. } => Hit::damage(damage),
            Effect::Slow {
                damage,
                strength,
                secs,
            } => Hit::damage(damage).with_slow(strength, secs),
            Effect::Knockback { damage, secs } => {
                Hit::damage(damage).with_knockback(secs, direction)
            }
        }
    }
}

/// How a projectile leaves the muzzle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Launch {
    /// Straight toward `target_x`.
    Straight { target_x: f32, speed: f32 },
    Lobbed {
        target: Vec2,
        apex_height: f32,
        speed: f32,
    },
}

/// Everything needed to (re)initialize a projectile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileSpec {
    pub origin: Vec2,
    pub launch: Launch,
    pub effect: Effect,
    pub owner: Owner,
}

impl ProjectileSpec {
    pub fn straight(origin: Vec2, target_x: f32, speed: f32, effect: Effect, owner: Owner) -> Self {
        Self {
            origin,
            launch: Launch::Straight { target_x, speed },
            effect,
            owner,
        }
    }

    pub fn lobbed(
        origin: Vec2,
        target: Vec2,
        apex_height: f32,
        speed: f32,
        effect: Effect,
        owner: Owner,
    ) -> Self {
        Self {
            origin,
            launch: Launch::Lobbed {
                target,
                apex_height,
                speed,
            },
            effect,
            owner,
        }
    }
}

/// A single projectile in flight.
///
/// Becomes inactive on its first resolved hit, on leaving the arena, or on
/// timing out. Once inactive it only comes back through [`Projectile::reset`].
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    position: Vec2,
    motion: Motion,
    effect: Effect,
    owner: Owner,
    half_extents: Vec2,
    elapsed: Timer,
    active: bool,
}

impl Projectile {
    pub fn new(spec: ProjectileSpec) -> Self {
        let (motion, half_extents) = match spec.launch {
            Launch::Straight { target_x, speed } => {
                let direction = if target_x < spec.origin.x { -1.0 } else { 1.0 };
                let speed = if speed.is_finite() { speed.abs() } else { 0.0 };
                (
                    Motion::Linear {
                        velocity: direction * speed,
                    },
                    SHOT_HALF_EXTENTS,
                )
            }
            Launch::Lobbed {
                target,
                apex_height,
                speed,
            } => (
                Motion::Parabolic(Arc::new(spec.origin, target, apex_height, speed)),
                SHELL_HALF_EXTENTS,
            ),
        };
        Self {
            position: spec.origin,
            motion,
            effect: spec.effect,
            owner: spec.owner,
            half_extents,
            elapsed: Timer::new(),
            active: true,
        }
    }

    /// Reinitialize a retired projectile for reuse.
    pub fn reset(&mut self, spec: ProjectileSpec) {
        *self = Self::new(spec);
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn motion(&self) -> &Motion {
        &self.motion
    }

    pub fn effect(&self) -> &Effect {
        &self.effect
    }

    pub fn owner(&self) -> Owner {
        self.owner
    }

    pub fn faction(&self) -> Faction {
        self.owner.faction()
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed.elapsed()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.position, self.half_extents)
    }

    /// Horizontal travel direction, -1 or +1.
    pub fn direction(&self) -> f32 {
        let vx = match self.motion {
            Motion::Linear { velocity } => velocity,
            Motion::Parabolic(arc) => arc.horizontal_velocity(),
        };
        if vx < 0.0 {
            -1.0
        } else {
            1.0
        }
    }

    /// Advance along the trajectory. Straight shots retire when they leave
    /// the arena or time out; lobbed ones are left for the resolver to detonate.
    pub fn update(&mut self, dt: f32, arena: &ArenaGeometry) {
        if !self.active {
            return;
        }
        self.elapsed.advance(dt);
        match self.motion {
            Motion::Linear { velocity } => {
                if dt.is_finite() && dt > 0.0 {
                    self.position.x += velocity * dt;
                }
                if arena.is_out_of_bounds(self.position, OUT_OF_BOUNDS_MARGIN)
                    || self.elapsed() > PROJECTILE_HARD_TIMEOUT_SECS
                {
                    self.active = false;
                }
            }
            Motion::Parabolic(arc) => {
                self.position = arc.position_at(self.elapsed());
            }
        }
    }

    /// Whether a lobbed projectile has reached one of its explosion conditions.
    pub fn should_explode(&self) -> bool {
        match self.motion {
            Motion::Linear { .. } => false,
            Motion::Parabolic(arc) => arc.should_explode(self.elapsed(), self.position),
        }
    }

    /// The explosion this projectile would produce right now, if it is an
    /// active area-effect projectile.
    pub fn explosion(&self) -> Option<Explosion> {
        match self.effect {
            Effect::Blast { damage, radius } if self.active => Some(Explosion {
                origin: self.position,
                radius,
                damage,
                knockback_secs: 0.0,
                faction: self.faction(),
            }),
            _ => None,
        }
    }

    /// Resolve this projectile against `targets`, in order.
    ///
    /// Single-target effects hit the first live target whose bounds overlap
    /// and stop. Area effects explode on the spot and hit every live target
    /// in radius. Either way the projectile is inactive afterwards, and
    /// calling this again is a no-op.
    pub fn on_hit<'t, K, I, D>(&mut self, targets: I) -> Vec<(K, DamageOutcome)>
    where
        I: IntoIterator<Item = (K, &'t mut D)>,
        D: Damageable + ?Sized + 't,
    {
        if !self.active {
            return Vec::new();
        }

        if let Some(explosion) = self.explosion() {
            self.active = false;
            return explosion.apply(targets);
        }

        let bounds = self.bounds();
        let hit = self.effect.hit(self.direction());
        for (key, target) in targets {
            if !target.is_alive() || !target.bounds().intersects(&bounds) {
                continue;
            }
            self.active = false;
            let outcome = target.take_hit(&hit);
            return vec![(key, outcome)];
        }
        Vec::new()
    }
}

/// An ephemeral area hit, applied once and discarded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Explosion {
    pub origin: Vec2,
    pub radius: f32,
    pub damage: f32,
    /// Push applied to every target hit, away from the origin. Zero for none.
    pub knockback_secs: f32,
    pub faction: Faction,
}

impl Explosion {
    /// Damage every live target whose bounds lie within `radius` of the origin.
    /// Compares squared distances.
    pub fn apply<'t, K, I, D>(&self, targets: I) -> Vec<(K, DamageOutcome)>
    where
        I: IntoIterator<Item = (K, &'t mut D)>,
        D: Damageable + ?Sized + 't,
    {
        let radius_sq = self.radius * self.radius;
        let mut outcomes = Vec::new();
        for (key, target) in targets {
            let bounds = target.bounds();
            if !target.is_alive() || bounds.distance_sq(self.origin) > radius_sq {
                continue;
            }
            let outcome = target.take_hit(&self.hit_from(bounds.center.x));
            if outcome.landed() {
                outcomes.push((key, outcome));
            }
        }
        outcomes
    }

    fn hit_from(&self, target_x: f32) -> Hit {
        let hit = Hit::damage(self.damage);
        if self.knockback_secs <= 0.0 {
            return hit;
        }
        let direction = if target_x < self.origin.x { -1.0 } else { 1.0 };
        hit.with_knockback(self.knockback_secs, direction)
    }
}

/// Ordered collection of projectiles with a bounded pool of retired ones.
#[derive(Debug, Clone, Default)]
pub struct ProjectileSet {
    live: Vec<Projectile>,
    pool: Vec<Projectile>,
}

impl ProjectileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Launch a projectile, reusing a retired instance when one is pooled.
    pub fn spawn(&mut self, spec: ProjectileSpec) {
        match self.pool.pop() {
            Some(mut projectile) => {
                projectile.reset(spec);
                self.live.push(projectile);
            }
            None => self.live.push(Projectile::new(spec)),
        }
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Number of retired projectiles waiting for reuse.
    pub fn pooled(&self) -> usize {
        self.pool.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.live.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Projectile> {
        self.live.iter_mut()
    }

    pub fn update(&mut self, dt: f32, arena: &ArenaGeometry) {
        for projectile in &mut self.live {
            projectile.update(dt, arena);
        }
    }

    /// Deactivate every active projectile fired by `owner`. Returns how many.
    pub fn deactivate_owned_by(&mut self, owner: Owner) -> usize {
        let mut count = 0;
        for projectile in &mut self.live {
            if projectile.is_active() && projectile.owner() == owner {
                projectile.deactivate();
                count += 1;
            }
        }
        count
    }

    /// Remove inactive projectiles, walking indices in reverse so removals
    /// never shift an entry that has not been visited yet. Returns how many.
    pub fn sweep(&mut self) -> usize {
        let mut removed = 0;
        for i in (0..self.live.len()).rev() {
            if self.live[i].is_active() {
                continue;
            }
            let retired = self.live.remove(i);
            if self.pool.len() < PROJECTILE_POOL_CAPACITY {
                self.pool.push(retired);
            }
            removed += 1;
        }
        removed
    }
}
