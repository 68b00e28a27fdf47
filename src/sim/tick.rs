//! Fixed timestep simulation tick
//!
//! Core game loop that advances a run deterministically. Gravity and
//! collision resolution belong to the host; the tick only consumes their
//! results through [`TickInput`].

use super::state::{GameEvent, GamePhase, RunSession};
use crate::consts::*;

/// Input snapshot for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump key currently held
    pub jump_held: bool,
    /// Player body is standing on the ground
    pub grounded: bool,
    /// Host physics reported a player/obstacle overlap since the last tick
    pub collided: bool,
}

/// Advance the run by one fixed timestep ([`SIM_DT_MS`])
pub fn tick(session: &mut RunSession, input: &TickInput) {
    let jump_pressed = input.jump_held && !session.jump_was_held;
    session.jump_was_held = input.jump_held;

    if session.phase == GamePhase::Over {
        // Everything stays frozen until the player asks for another run
        if jump_pressed {
            session.restart();
        }
        return;
    }

    if input.collided {
        session.end_run();
        return;
    }

    session.elapsed_ticks += 1;

    // Background and sky
    session.parallax.advance(SIM_DT);
    if let Some(phase) = session.clock.advance(SIM_DT_MS) {
        session.events.push(GameEvent::SkyChanged { phase });
    }

    // Jump only from the ground, so holding the key cannot double-jump
    if input.jump_held && input.grounded {
        session.events.push(GameEvent::Jumped {
            impulse: session.config.jump_impulse,
        });
    }

    // Score accrues per fixed interval of running time
    session.score_timer_ms += SIM_DT_MS;
    while session.score_timer_ms >= session.config.score_interval_ms {
        session.score_timer_ms -= session.config.score_interval_ms;
        session.add_point();
    }

    if session.spawner.advance(SIM_DT_MS) {
        session.spawn_obstacle();
    }

    for obstacle in &mut session.obstacles {
        obstacle.x += obstacle.velocity * SIM_DT;
    }
    session.cull_obstacles(OBSTACLE_CULL_X);
}
