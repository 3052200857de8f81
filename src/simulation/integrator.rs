//! Time integrators for the cloth grid
//!
//! Integration is split in two so the energy regulator can sit in between:
//! [`candidate`] proposes new positions from the accumulated force, and
//! [`commit`] installs the (regulated) positions and updates the auxiliary
//! grid of the active scheme

use std::mem;

use super::engine::Scheme;
use super::states::{ClothState, NVec2, PointGrid};

/// Propose new positions for every point
///
/// - Verlet: `x' = 2x - x_prev + (f/m) dt^2`
/// - Euler:  `v <- v + (f/m) dt`, then `x' = x + v dt`
///
/// Euler updates `state.velocity` in place; Verlet leaves the state untouched
pub fn candidate(scheme: Scheme, state: &mut ClothState, force: &[NVec2], mass: f64, dt: f64) -> Vec<NVec2> {
    state.assert_consistent();
    assert_eq!(force.len(), state.pos.len(), "force buffer does not match grid");

    match scheme {
        Scheme::Verlet => {
            let dt2 = dt * dt;
            state
                .pos
                .points()
                .iter()
                .zip(state.prev_pos.points())
                .zip(force)
                .map(|((x, x_prev), f)| 2.0 * x - x_prev + f / mass * dt2)
                .collect()
        }
        Scheme::Euler => {
            // Kick: v_n+1 = v_n + a dt
            for (v, f) in state.velocity.points_mut().iter_mut().zip(force) {
                *v += f / mass * dt;
            }
            // Drift: x_n+1 = x_n + v_n+1 dt
            state
                .pos
                .points()
                .iter()
                .zip(state.velocity.points())
                .map(|(x, v)| x + v * dt)
                .collect()
        }
    }
}

/// Install `new_points` as the current positions
/// Verlet moves the outgoing positions into `prev_pos`; Euler only replaces `pos`
pub fn commit(scheme: Scheme, state: &mut ClothState, new_points: Vec<NVec2>) {
    match scheme {
        Scheme::Verlet => {
            let next = PointGrid::from_points(state.pos.height(), state.pos.width(), new_points);
            state.prev_pos = mem::replace(&mut state.pos, next);
        }
        Scheme::Euler => state.pos.replace_points(new_points),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_point(x: NVec2) -> ClothState {
        ClothState::at_rest(PointGrid::filled(1, 1, x))
    }

    #[test]
    fn verlet_from_rest_moves_by_acceleration_dt2() {
        let mut state = single_point(NVec2::new(1.0, 1.0));
        let force = [NVec2::new(-4.0, 0.0)];
        let next = candidate(Scheme::Verlet, &mut state, &force, 2.0, 0.5);
        assert_eq!(next[0], NVec2::new(0.5, 1.0));
        // candidate leaves state alone
        assert_eq!(state.pos.points()[0], NVec2::new(1.0, 1.0));

        commit(Scheme::Verlet, &mut state, next);
        assert_eq!(state.pos.points()[0], NVec2::new(0.5, 1.0));
        assert_eq!(state.prev_pos.points()[0], NVec2::new(1.0, 1.0));
    }

    #[test]
    fn verlet_carries_implicit_velocity() {
        let mut state = single_point(NVec2::new(1.0, 0.0));
        state.prev_pos.points_mut()[0] = NVec2::new(0.0, 0.0);
        let next = candidate(Scheme::Verlet, &mut state, &[NVec2::zeros()], 1.0, 1.0);
        assert_eq!(next[0], NVec2::new(2.0, 0.0));
    }

    #[test]
    fn euler_updates_velocity_before_position() {
        let mut state = single_point(NVec2::new(0.0, 0.0));
        let force = [NVec2::new(2.0, -2.0)];
        let next = candidate(Scheme::Euler, &mut state, &force, 1.0, 0.5);
        assert_eq!(state.velocity.points()[0], NVec2::new(1.0, -1.0));
        assert_eq!(next[0], NVec2::new(0.5, -0.5));

        commit(Scheme::Euler, &mut state, next);
        assert_eq!(state.pos.points()[0], NVec2::new(0.5, -0.5));
        // previous positions belong to the other scheme
        assert_eq!(state.prev_pos.points()[0], NVec2::new(0.0, 0.0));
    }
}
