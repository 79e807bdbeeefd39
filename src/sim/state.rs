//! Game state and core simulation types
//!
//! Each entity kind owns its own update rule. Collections are plain `Vec`s
//! owned by `GameState`; nothing holds a reference to another entity.

use glam::{IVec2, Vec2};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, fully_in_bounds, unit_direction};
use super::input::HeldKeys;
use crate::consts::*;
use crate::error::TuningResult;
use crate::tuning::Tuning;

/// Popup color for damage dealt to an enemy
pub const ENEMY_HIT_COLOR: [u8; 3] = [255, 255, 0];
/// Popup color for damage dealt to the player
pub const PLAYER_HIT_COLOR: [u8; 3] = [255, 0, 0];

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player hp reached zero; the session is over
    Defeated,
}

/// One of the eight directions the player can face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    East,
    NorthEast,
    North,
    NorthWest,
    West,
    SouthWest,
    South,
    SouthEast,
}

impl Facing {
    pub const ALL: [Facing; 8] = [
        Facing::East,
        Facing::NorthEast,
        Facing::North,
        Facing::NorthWest,
        Facing::West,
        Facing::SouthWest,
        Facing::South,
        Facing::SouthEast,
    ];

    /// Map a sign-only direction sum to a facing (screen y grows downward)
    pub fn from_offset(offset: IVec2) -> Option<Self> {
        match (offset.x.signum(), offset.y.signum()) {
            (1, 0) => Some(Facing::East),
            (1, -1) => Some(Facing::NorthEast),
            (0, -1) => Some(Facing::North),
            (-1, -1) => Some(Facing::NorthWest),
            (-1, 0) => Some(Facing::West),
            (-1, 1) => Some(Facing::SouthWest),
            (0, 1) => Some(Facing::South),
            (1, 1) => Some(Facing::SouthEast),
            _ => None,
        }
    }

    pub fn offset(&self) -> IVec2 {
        match self {
            Facing::East => IVec2::new(1, 0),
            Facing::NorthEast => IVec2::new(1, -1),
            Facing::North => IVec2::new(0, -1),
            Facing::NorthWest => IVec2::new(-1, -1),
            Facing::West => IVec2::new(-1, 0),
            Facing::SouthWest => IVec2::new(-1, 1),
            Facing::South => IVec2::new(0, 1),
            Facing::SouthEast => IVec2::new(1, 1),
        }
    }

    /// Normalized direction vector
    pub fn unit(&self) -> Vec2 {
        self.offset().as_vec2().normalize()
    }
}

/// Player invulnerability state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Guard {
    /// Bomb hits apply damage
    Normal,
    /// Bomb hits are ignored until the timer drops below zero
    Hyper { timer: i32 },
}

/// The player-controlled sprite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    pub facing: Facing,
    pub speed: f32,
    pub hp: u32,
    pub max_hp: u32,
    pub guard: Guard,
}

impl Player {
    pub fn new(center: Vec2, tuning: &Tuning) -> Self {
        Self {
            rect: Rect::new(center, Vec2::from(PLAYER_SIZE)),
            facing: Facing::default(),
            speed: tuning.player_speed,
            hp: tuning.player_max_hp,
            max_hp: tuning.player_max_hp,
            guard: Guard::Normal,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect.center
    }

    pub fn is_hyper(&self) -> bool {
        matches!(self.guard, Guard::Hyper { .. })
    }

    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }

    /// Move by the held-key sum, all or nothing
    ///
    /// The whole displacement is reverted if it would leave the playfield on
    /// either axis. Diagonals are not normalized.
    pub fn apply_input(&mut self, keys: &HeldKeys) {
        let sum = keys.offset();
        let delta = sum.as_vec2() * self.speed;
        self.rect.translate(delta);
        if !fully_in_bounds(&self.rect) {
            self.rect.translate(-delta);
        }
        if let Some(facing) = Facing::from_offset(sum) {
            self.facing = facing;
        }
    }

    /// Count down the invulnerability window; returns true on leaving Hyper
    ///
    /// Runs in the same tick as the hit that entered Hyper, so the timer
    /// already reads `hyper_duration - 1` once that frame completes.
    pub fn update_guard(&mut self) -> bool {
        if let Guard::Hyper { timer } = &mut self.guard {
            *timer -= 1;
            if *timer < 0 {
                self.guard = Guard::Normal;
                return true;
            }
        }
        false
    }

    /// Apply a hit; ignored (returns false) while in Hyper
    ///
    /// Damage saturates at zero hp.
    pub fn take_hit(&mut self, damage: u32, hyper_duration: i32) -> bool {
        if self.is_hyper() {
            return false;
        }
        self.hp = self.hp.saturating_sub(damage);
        self.guard = Guard::Hyper {
            timer: hyper_duration,
        };
        true
    }

    /// Blink alpha: half-transparent on even Hyper frames
    pub fn alpha(&self) -> u8 {
        match self.guard {
            Guard::Hyper { timer } if timer % 2 == 0 => 128,
            _ => 255,
        }
    }

    pub fn health_fraction(&self) -> f32 {
        self.hp as f32 / self.max_hp as f32
    }
}

/// A player projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Beam {
    pub id: u32,
    pub rect: Rect,
    /// Unit direction, fixed at creation
    pub vel: Vec2,
    pub speed: f32,
}

impl Beam {
    /// Spawn ahead of the player along its facing
    pub fn fire(id: u32, player: &Player, speed: f32) -> Self {
        let vel = player.facing.unit();
        let center = player.center() + player.rect.size * vel;
        Self {
            id,
            rect: Rect::new(center, Vec2::from(BEAM_SIZE)),
            vel,
            speed,
        }
    }

    /// Translate one frame; returns false once out of bounds
    pub fn update(&mut self) -> bool {
        self.rect.translate(self.vel * self.speed);
        fully_in_bounds(&self.rect)
    }
}

/// An enemy projectile aimed at the player's position at launch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bomb {
    pub id: u32,
    pub rect: Rect,
    /// Unit direction, fixed at creation (zero if launched from the target)
    pub vel: Vec2,
    pub speed: f32,
    pub radius: u32,
    /// Red channel of the bomb color
    pub red: u8,
    pub damage: u32,
}

impl Bomb {
    pub fn aimed(id: u32, from: Vec2, target: Vec2, radius: u32, red: u8, tuning: &Tuning) -> Self {
        Self {
            id,
            rect: Rect::around_circle(from, radius as f32),
            vel: unit_direction(from, target),
            speed: tuning.bomb_speed,
            radius,
            red,
            damage: tuning.bomb_damage,
        }
    }

    /// Translate one frame; returns false once out of bounds
    pub fn update(&mut self) -> bool {
        self.rect.translate(self.vel * self.speed);
        fully_in_bounds(&self.rect)
    }
}

/// A descending alien
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub rect: Rect,
    pub speed: f32,
    /// Center depth at which descent stops
    pub rest_depth: f32,
    /// Frames between bombs while resting
    pub attack_interval: u32,
    /// May go negative for the rest of the frame before removal
    pub hp: i32,
    pub max_hp: i32,
    /// Which alien image to draw
    pub sprite: u8,
    /// Frames since spawn
    pub age: u64,
}

impl Enemy {
    /// Roll a new enemy at the top edge
    pub fn spawn(id: u32, rng: &mut Pcg32, tuning: &Tuning) -> Self {
        let x = rng.random_range(0..=SCREEN_WIDTH as u32) as f32;
        let rest_depth =
            rng.random_range(tuning.enemy_rest_depth_min..=tuning.enemy_rest_depth_max) as f32;
        let attack_interval =
            rng.random_range(tuning.enemy_attack_interval_min..=tuning.enemy_attack_interval_max);
        let sprite = rng.random_range(0..ENEMY_SPRITE_VARIANTS);
        Self {
            id,
            rect: Rect::new(Vec2::new(x, 0.0), Vec2::from(ENEMY_SIZE)),
            speed: tuning.enemy_speed,
            rest_depth,
            attack_interval,
            hp: tuning.enemy_hp,
            max_hp: tuning.enemy_hp,
            sprite,
            age: 0,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect.center
    }

    /// Derived every frame from depth; once true it stays true
    pub fn is_resting(&self) -> bool {
        self.rect.center.y >= self.rest_depth
    }

    pub fn ready_to_attack(&self) -> bool {
        self.is_resting() && self.age % self.attack_interval as u64 == 0
    }

    pub fn is_destroyed(&self) -> bool {
        self.hp <= 0
    }

    pub fn update(&mut self) {
        if !self.is_resting() {
            self.rect.center.y += self.speed;
        }
        self.age += 1;
    }

    pub fn health_fraction(&self) -> f32 {
        (self.hp.max(0) as f32 / self.max_hp as f32).min(1.0)
    }
}

/// Floating damage number
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DamagePopup {
    pub pos: Vec2,
    pub vel_y: f32,
    /// Frames left; removed once below zero
    pub life: i32,
    pub amount: u32,
    pub color: [u8; 3],
}

impl DamagePopup {
    pub fn new(amount: u32, pos: Vec2, color: [u8; 3], tuning: &Tuning) -> Self {
        Self {
            pos,
            vel_y: tuning.popup_speed,
            life: tuning.popup_lifetime,
            amount,
            color,
        }
    }

    pub fn label(&self) -> String {
        self.amount.to_string()
    }

    /// Drift one frame; returns false once expired
    pub fn update(&mut self) -> bool {
        self.pos.y += self.vel_y;
        self.life -= 1;
        self.life >= 0
    }
}

/// Gameplay events emitted during a tick (for audio/presentation)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BeamFired { id: u32 },
    EnemySpawned { id: u32 },
    BombLaunched { id: u32, enemy: u32 },
    EnemyHit { id: u32, damage: u32 },
    EnemyDestroyed { id: u32 },
    PlayerHit { damage: u32, hp: u32 },
    PlayerRecovered,
    PlayerDefeated,
}

/// Explicit simulation context: frame index and the seeded RNG
#[derive(Debug, Clone)]
pub struct SimContext {
    pub seed: u64,
    /// Global frame counter, incremented at the end of every completed tick
    pub frame: u64,
    pub rng: Pcg32,
}

impl SimContext {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            frame: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

/// Running totals for the session report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub beams_fired: u32,
    pub enemies_spawned: u32,
    pub enemies_destroyed: u32,
    pub bombs_launched: u32,
    pub damage_taken: u32,
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub player: Player,
    pub beams: Vec<Beam>,
    pub bombs: Vec<Bomb>,
    pub enemies: Vec<Enemy>,
    pub popups: Vec<DamagePopup>,
    pub stats: SessionStats,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Fresh session state
    ///
    /// Expects a `Tuning` that passed `validate`; a zero spawn or attack
    /// interval panics in `tick`. Use `try_new` for untrusted tuning.
    pub fn new(tuning: Tuning) -> Self {
        let player = Player::new(Vec2::from(PLAYER_START), &tuning);
        Self {
            tuning,
            phase: GamePhase::Playing,
            player,
            beams: Vec::new(),
            bombs: Vec::new(),
            enemies: Vec::new(),
            popups: Vec::new(),
            stats: SessionStats::default(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Validate the tuning before building the state
    pub fn try_new(tuning: Tuning) -> TuningResult<Self> {
        tuning.validate()?;
        Ok(Self::new(tuning))
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn fire_beam(&mut self) {
        let id = self.next_entity_id();
        self.beams.push(Beam::fire(id, &self.player, self.tuning.beam_speed));
        self.stats.beams_fired += 1;
        self.events.push(GameEvent::BeamFired { id });
    }

    pub fn spawn_enemy(&mut self, rng: &mut Pcg32) {
        let id = self.next_entity_id();
        let enemy = Enemy::spawn(id, rng, &self.tuning);
        log::debug!(
            "Enemy {} spawned at x={} (rest depth {}, interval {})",
            id,
            enemy.center().x,
            enemy.rest_depth,
            enemy.attack_interval
        );
        self.enemies.push(enemy);
        self.stats.enemies_spawned += 1;
        self.events.push(GameEvent::EnemySpawned { id });
    }

    /// Launch a bomb from `from` toward the player's current center
    pub fn launch_bomb(&mut self, enemy: u32, from: Vec2, rng: &mut Pcg32) {
        let id = self.next_entity_id();
        let radius = rng.random_range(self.tuning.bomb_radius_min..=self.tuning.bomb_radius_max);
        let red = rng.random_range(50..=255u8);
        let target = self.player.center();
        let bomb = Bomb::aimed(id, from, target, radius, red, &self.tuning);
        if bomb.vel == Vec2::ZERO {
            log::warn!("Bomb {} launched from the player's center; it will not move", id);
        }
        self.bombs.push(bomb);
        self.stats.bombs_launched += 1;
        self.events.push(GameEvent::BombLaunched { id, enemy });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_at(x: f32, y: f32) -> Player {
        Player::new(Vec2::new(x, y), &Tuning::default())
    }

    #[test]
    fn test_facing_roundtrips_offsets() {
        for facing in Facing::ALL {
            assert_eq!(Facing::from_offset(facing.offset()), Some(facing));
        }
        assert_eq!(Facing::from_offset(IVec2::ZERO), None);
    }

    #[test]
    fn test_diagonal_move_is_not_normalized() {
        let mut p = player_at(500.0, 300.0);
        p.apply_input(&HeldKeys {
            up: true,
            left: true,
            ..Default::default()
        });
        assert_eq!(p.center(), Vec2::new(490.0, 290.0));
        assert_eq!(p.facing, Facing::NorthWest);
    }

    #[test]
    fn test_move_reverts_whole_displacement() {
        // Right edge is at 1100 - 45 = 1055 for the center; one axis would be fine
        let mut p = player_at(1050.0, 300.0);
        p.apply_input(&HeldKeys {
            right: true,
            down: true,
            ..Default::default()
        });
        assert_eq!(p.center(), Vec2::new(1050.0, 300.0));
        // Facing still follows the attempted direction
        assert_eq!(p.facing, Facing::SouthEast);
    }

    #[test]
    fn test_no_keys_keeps_facing() {
        let mut p = player_at(500.0, 300.0);
        p.facing = Facing::South;
        p.apply_input(&HeldKeys::default());
        assert_eq!(p.facing, Facing::South);
        assert_eq!(p.center(), Vec2::new(500.0, 300.0));
    }

    #[test]
    fn test_hyper_window() {
        let mut p = player_at(500.0, 300.0);
        assert!(p.take_hit(34, 60));
        assert_eq!(p.hp, 66);
        assert_eq!(p.guard, Guard::Hyper { timer: 60 });

        // Immune while hyper
        assert!(!p.take_hit(34, 60));
        assert_eq!(p.hp, 66);

        // 60 -> 0 stays hyper, the 61st decrement leaves it
        for _ in 0..60 {
            assert!(!p.update_guard());
        }
        assert_eq!(p.guard, Guard::Hyper { timer: 0 });
        assert!(p.update_guard());
        assert_eq!(p.guard, Guard::Normal);
        assert_eq!(p.alpha(), 255);
    }

    #[test]
    fn test_blink_alpha_follows_parity() {
        let mut p = player_at(500.0, 300.0);
        p.guard = Guard::Hyper { timer: 58 };
        assert_eq!(p.alpha(), 128);
        p.guard = Guard::Hyper { timer: 57 };
        assert_eq!(p.alpha(), 255);
    }

    #[test]
    fn test_damage_saturates_at_zero() {
        let mut p = player_at(500.0, 300.0);
        p.hp = 20;
        p.take_hit(34, 60);
        assert_eq!(p.hp, 0);
        assert!(p.is_defeated());
    }

    #[test]
    fn test_beam_spawns_ahead_and_normalized() {
        let mut p = player_at(500.0, 300.0);
        p.facing = Facing::NorthEast;
        let beam = Beam::fire(1, &p, 10.0);
        assert!((beam.vel.length() - 1.0).abs() < 1e-6);
        assert!(beam.rect.center.x > p.center().x);
        assert!(beam.rect.center.y < p.center().y);
    }

    #[test]
    fn test_beam_culled_on_first_exit() {
        let mut p = player_at(950.0, 300.0);
        p.facing = Facing::East;
        let mut beam = Beam::fire(1, &p, 10.0);
        // Beam box starts at x=1040 with half-width 30: right edge 1070
        assert!(beam.update()); // 1080
        assert!(beam.update()); // 1090
        assert!(beam.update()); // 1100 touches the edge
        assert!(!beam.update()); // 1110 is out
    }

    #[test]
    fn test_bomb_culled_on_first_exit() {
        let tuning = Tuning::default();
        let from = Vec2::new(300.0, 620.0);
        let mut bomb = Bomb::aimed(1, from, Vec2::new(300.0, 900.0), 20, 255, &tuning);
        // Bottom edge starts at 640 and moves 6 per frame
        assert!(fully_in_bounds(&bomb.rect));
        assert!(bomb.update()); // 646
        assert!(!bomb.update()); // 652 is out
    }

    #[test]
    fn test_try_new_rejects_invalid_tuning() {
        let tuning = Tuning {
            enemy_spawn_interval: 0,
            ..Tuning::default()
        };
        assert!(GameState::try_new(tuning).is_err());
        assert!(GameState::try_new(Tuning::default()).is_ok());
    }

    #[test]
    fn test_enemy_descends_then_rests() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut e = Enemy::spawn(1, &mut rng, &Tuning::default());
        e.rest_depth = 20.0;
        e.update(); // 6
        e.update(); // 12
        e.update(); // 18
        assert!(!e.is_resting());
        e.update(); // 24
        assert!(e.is_resting());
        let y = e.center().y;
        e.update();
        assert_eq!(e.center().y, y);
    }

    #[test]
    fn test_enemy_spawn_ranges() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1234);
        for id in 0..200 {
            let e = Enemy::spawn(id, &mut rng, &tuning);
            assert!((0.0..=SCREEN_WIDTH).contains(&e.center().x));
            assert_eq!(e.center().y, 0.0);
            assert!((50.0..=325.0).contains(&e.rest_depth));
            assert!((50..=150).contains(&e.attack_interval));
            assert!(e.sprite < ENEMY_SPRITE_VARIANTS);
            assert_eq!(e.hp, 30);
        }
    }

    #[test]
    fn test_bomb_aimed_at_snapshot() {
        let tuning = Tuning::default();
        let bomb = Bomb::aimed(
            1,
            Vec2::new(100.0, 100.0),
            Vec2::new(100.0, 400.0),
            20,
            200,
            &tuning,
        );
        assert_eq!(bomb.vel, Vec2::new(0.0, 1.0));
        assert_eq!(bomb.rect.size, Vec2::splat(40.0));
        assert_eq!(bomb.damage, 34);
    }

    #[test]
    fn test_popup_lifetime() {
        let tuning = Tuning::default();
        let mut popup = DamagePopup::new(10, Vec2::new(0.0, 100.0), ENEMY_HIT_COLOR, &tuning);
        let mut frames = 0;
        while popup.update() {
            frames += 1;
        }
        assert_eq!(frames, 30);
        assert_eq!(popup.pos.y, 100.0 - 2.0 * 31.0);
        assert_eq!(popup.label(), "10");
    }
}
