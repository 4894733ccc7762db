use eframe::egui::{Vec2, vec2};

#[derive(Clone, Copy)]
pub(super) struct Spring {
    pub(super) from: usize,
    pub(super) to: usize,
    pub(super) rest_length: f32,
}

fn fallback_direction(i: usize, j: usize) -> Vec2 {
    let angle = ((i as f32) * 0.618_034 + (j as f32) * 0.414_214) * std::f32::consts::TAU;
    vec2(angle.cos(), angle.sin())
}

/// Short-range repulsion: only pairs closer than `r_i + r_j + margin` push
/// each other apart, proportionally to the overlap.
pub(super) fn accumulate_repulsion(
    positions: &[Vec2],
    radii: &[f32],
    margin: f32,
    strength: f32,
    disp: &mut [Vec2],
) {
    let n = positions.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let delta = positions[i] - positions[j];
            let distance = delta.length();
            let min_distance = radii[i] + radii[j] + margin;
            if distance >= min_distance {
                continue;
            }

            let direction = if distance > 0.0001 {
                delta / distance
            } else {
                fallback_direction(i, j)
            };

            let push = (min_distance - distance) * strength;
            disp[i] += direction * push;
            disp[j] -= direction * push;
        }
    }
}

pub(super) fn accumulate_springs(
    positions: &[Vec2],
    springs: &[Spring],
    strength: f32,
    disp: &mut [Vec2],
) {
    for spring in springs {
        let delta = positions[spring.to] - positions[spring.from];
        let distance = delta.length();
        if distance <= 0.0001 {
            continue;
        }
        let direction = delta / distance;

        let force = (distance - spring.rest_length) * strength;
        disp[spring.from] += direction * force;
        disp[spring.to] -= direction * force;
    }
}

pub(super) fn accumulate_center_gravity(
    positions: &[Vec2],
    center: Vec2,
    strength: f32,
    disp: &mut [Vec2],
) {
    for (position, displacement) in positions.iter().zip(disp.iter_mut()) {
        *displacement += (center - *position) * strength;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distant_pairs_do_not_repel() {
        let positions = [vec2(0.0, 0.0), vec2(200.0, 0.0)];
        let mut disp = [Vec2::ZERO; 2];
        accumulate_repulsion(&positions, &[24.0, 16.0], 40.0, 0.5, &mut disp);
        assert_eq!(disp, [Vec2::ZERO; 2]);
    }

    #[test]
    fn overlapping_pairs_are_pushed_apart_symmetrically() {
        let positions = [vec2(0.0, 0.0), vec2(60.0, 0.0)];
        let mut disp = [Vec2::ZERO; 2];
        accumulate_repulsion(&positions, &[24.0, 16.0], 40.0, 0.5, &mut disp);
        assert_eq!(disp[0], vec2(-10.0, 0.0));
        assert_eq!(disp[1], vec2(10.0, 0.0));
    }

    #[test]
    fn coincident_nodes_still_separate() {
        let positions = [vec2(5.0, 5.0), vec2(5.0, 5.0)];
        let mut disp = [Vec2::ZERO; 2];
        accumulate_repulsion(&positions, &[16.0, 16.0], 40.0, 0.5, &mut disp);
        assert!(disp[0].length() > 0.0);
        assert_eq!(disp[0], -disp[1]);
    }

    #[test]
    fn springs_pull_toward_rest_length() {
        let positions = [vec2(0.0, 0.0), vec2(200.0, 0.0)];
        let springs = [Spring {
            from: 0,
            to: 1,
            rest_length: 100.0,
        }];
        let mut disp = [Vec2::ZERO; 2];
        accumulate_springs(&positions, &springs, 0.1, &mut disp);
        assert_eq!(disp[0], vec2(10.0, 0.0));
        assert_eq!(disp[1], vec2(-10.0, 0.0));

        let compressed = [vec2(0.0, 0.0), vec2(50.0, 0.0)];
        let mut disp = [Vec2::ZERO; 2];
        accumulate_springs(&compressed, &springs, 0.1, &mut disp);
        assert_eq!(disp[0], vec2(-5.0, 0.0));
    }

    #[test]
    fn gravity_moves_a_fraction_toward_center() {
        let positions = [vec2(0.0, 0.0)];
        let mut disp = [Vec2::ZERO; 1];
        accumulate_center_gravity(&positions, vec2(100.0, 50.0), 0.1, &mut disp);
        assert_eq!(disp[0], vec2(10.0, 5.0));
    }
}
