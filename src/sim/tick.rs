//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Step order:
//! input, enemy spawn, enemy attacks, beam hits, bomb hits, advance, frame++.

use super::input::{InputEvent, TickInput};
use super::state::{
    DamagePopup, ENEMY_HIT_COLOR, GameEvent, GamePhase, GameState, PLAYER_HIT_COLOR, SimContext,
};

/// What the caller should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// Quit observed while draining input; later steps were skipped
    Quit,
    /// Player hp reached zero this tick (or earlier)
    Defeated,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, ctx: &mut SimContext, input: &TickInput) -> TickOutcome {
    state.events.clear();

    if state.phase == GamePhase::Defeated {
        return TickOutcome::Defeated;
    }

    // 1. Drain input events
    for event in &input.events {
        match event {
            InputEvent::Fire => state.fire_beam(),
            InputEvent::Quit => return TickOutcome::Quit,
        }
    }

    // 2. Global spawn timer
    if ctx.frame % state.tuning.enemy_spawn_interval == 0 {
        state.spawn_enemy(&mut ctx.rng);
    }

    // 3. Resting enemies attack on their interval
    let attackers: Vec<_> = state
        .enemies
        .iter()
        .filter(|e| e.ready_to_attack())
        .map(|e| (e.id, e.center()))
        .collect();
    for (enemy, from) in attackers {
        state.launch_bomb(enemy, from, &mut ctx.rng);
    }

    // 4. Beams vs enemies
    resolve_beam_hits(state);

    // 5. Bombs vs player
    if resolve_bomb_hits(state) {
        state.phase = GamePhase::Defeated;
        state.events.push(GameEvent::PlayerDefeated);
        log::info!(
            "Player defeated on frame {} ({} enemies destroyed)",
            ctx.frame,
            state.stats.enemies_destroyed
        );
        return TickOutcome::Defeated;
    }

    // 6. Advance and cull
    advance(state, input);

    // 7. Next frame
    ctx.frame += 1;
    TickOutcome::Continue
}

/// Every overlapping (enemy, beam) pair deals damage independently
///
/// Beams are consumed by any hit; enemies are removed once hp <= 0.
fn resolve_beam_hits(state: &mut GameState) {
    let damage = state.tuning.beam_damage;
    let mut consumed = vec![false; state.beams.len()];
    let mut popups = Vec::new();

    for enemy in &mut state.enemies {
        for (beam, used) in state.beams.iter().zip(consumed.iter_mut()) {
            if !enemy.rect.overlaps(&beam.rect) {
                continue;
            }
            *used = true;
            enemy.hp -= damage;
            popups.push(DamagePopup::new(
                damage.max(0) as u32,
                enemy.center(),
                ENEMY_HIT_COLOR,
                &state.tuning,
            ));
            state.events.push(GameEvent::EnemyHit {
                id: enemy.id,
                damage: damage.max(0) as u32,
            });
            log::debug!("Enemy {} hit by beam {} (hp {})", enemy.id, beam.id, enemy.hp);
        }
    }

    let mut flags = consumed.into_iter();
    state.beams.retain(|_| !flags.next().unwrap_or(false));

    for enemy in state.enemies.iter().filter(|e| e.is_destroyed()) {
        state.events.push(GameEvent::EnemyDestroyed { id: enemy.id });
        state.stats.enemies_destroyed += 1;
        log::debug!("Enemy {} destroyed", enemy.id);
    }
    state.enemies.retain(|e| !e.is_destroyed());
    state.popups.extend(popups);
}

/// At most one bomb hit per frame, only while the player is Normal
///
/// Returns true if the hit left the player at zero hp.
fn resolve_bomb_hits(state: &mut GameState) -> bool {
    if state.player.is_hyper() {
        return false;
    }

    let player_rect = state.player.rect;
    let before = state.bombs.len();
    state.bombs.retain(|b| !b.rect.overlaps(&player_rect));
    if state.bombs.len() == before {
        return false;
    }

    let damage = state.tuning.bomb_damage;
    let hp_before = state.player.hp;
    state.player.take_hit(damage, state.tuning.hyper_duration);
    state.stats.damage_taken += hp_before - state.player.hp;
    state.popups.push(DamagePopup::new(
        damage,
        state.player.center(),
        PLAYER_HIT_COLOR,
        &state.tuning,
    ));
    state.events.push(GameEvent::PlayerHit {
        damage,
        hp: state.player.hp,
    });
    log::debug!(
        "Player hit by {} bomb(s) for {} (hp {})",
        before - state.bombs.len(),
        damage,
        state.player.hp
    );

    state.player.is_defeated()
}

fn advance(state: &mut GameState, input: &TickInput) {
    state.player.apply_input(&input.held);
    if state.player.update_guard() {
        state.events.push(GameEvent::PlayerRecovered);
    }

    state.beams.retain_mut(|b| b.update());
    for enemy in &mut state.enemies {
        enemy.update();
    }
    state.bombs.retain_mut(|b| b.update());
    state.popups.retain_mut(|p| p.update());
}
