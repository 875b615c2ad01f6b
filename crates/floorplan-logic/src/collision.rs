//! Center/half-extent overlap test for placed components.
//!
//! Two footprints collide only when they overlap on both axes with positive
//! area. Edges that merely touch do not count.

use crate::placement::PlacedComponent;

/// Strict AABB overlap between two center/size boxes.
pub fn boxes_overlap(
    (x, z, width, depth): (f32, f32, f32, f32),
    (rx, rz, rw, rd): (f32, f32, f32, f32),
) -> bool {
    (x - rx).abs() < (width + rw) / 2.0 && (z - rz).abs() < (depth + rd) / 2.0
}

/// First existing component (other than `exclude_id`) overlapping the box.
pub fn find_collision<'a>(
    x: f32,
    z: f32,
    width: f32,
    depth: f32,
    existing: &'a [PlacedComponent],
    exclude_id: Option<&str>,
) -> Option<&'a PlacedComponent> {
    existing
        .iter()
        .filter(|c| Some(c.id.as_str()) != exclude_id)
        .find(|c| {
            boxes_overlap(
                (x, z, width, depth),
                (c.position.x, c.position.z, c.width, c.depth),
            )
        })
}

/// Whether the box overlaps any existing component other than `exclude_id`.
pub fn check_collision(
    x: f32,
    z: f32,
    width: f32,
    depth: f32,
    existing: &[PlacedComponent],
    exclude_id: Option<&str>,
) -> bool {
    find_collision(x, z, width, depth, existing, exclude_id).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::WorldPos;
    use crate::placement::ComponentKind;

    fn comp(id: &str, x: f32, z: f32, w: f32, d: f32) -> PlacedComponent {
        PlacedComponent {
            id: id.to_string(),
            kind: ComponentKind::Rack,
            position: WorldPos::new(x, z),
            width: w,
            height: 2.0,
            depth: d,
        }
    }

    #[test]
    fn separated_boxes_do_not_collide() {
        let existing = vec![comp("a", 3.0, 0.0, 2.0, 2.0)];
        assert!(!check_collision(0.0, 0.0, 2.0, 2.0, &existing, None));
    }

    #[test]
    fn overlapping_boxes_collide() {
        let existing = vec![comp("a", 1.0, 0.0, 2.0, 2.0)];
        assert!(check_collision(0.0, 0.0, 2.0, 2.0, &existing, None));
    }

    #[test]
    fn touching_edges_do_not_collide() {
        let existing = vec![comp("a", 2.0, 0.0, 2.0, 2.0)];
        assert!(!check_collision(0.0, 0.0, 2.0, 2.0, &existing, None));
    }

    #[test]
    fn overlap_needs_both_axes() {
        let existing = vec![comp("a", 1.0, 5.0, 2.0, 2.0)];
        assert!(!check_collision(0.0, 0.0, 2.0, 2.0, &existing, None));
    }

    #[test]
    fn excluded_component_is_skipped() {
        let existing = vec![comp("self", 0.0, 0.0, 2.0, 2.0), comp("b", 10.0, 0.0, 2.0, 2.0)];
        assert!(!check_collision(0.5, 0.0, 2.0, 2.0, &existing, Some("self")));
        assert!(check_collision(0.5, 0.0, 2.0, 2.0, &existing, None));
    }

    #[test]
    fn find_reports_first_hit() {
        let existing = vec![
            comp("far", 20.0, 0.0, 2.0, 2.0),
            comp("near", 1.0, 1.0, 2.0, 2.0),
            comp("also", 0.0, 1.0, 2.0, 2.0),
        ];
        let hit = find_collision(0.0, 0.0, 2.0, 2.0, &existing, None);
        assert_eq!(hit.map(|c| c.id.as_str()), Some("near"));
    }
}
