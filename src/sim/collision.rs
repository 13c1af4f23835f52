//! Collision detection between the player and falling objects
//!
//! Both hitboxes are inset by `HITBOX_PADDING`. Objects are first scaled by
//! their visual scale so a swollen growing object is as dangerous as it looks.

use super::rect::Rect;
use super::state::{FallingObject, Player};
use crate::consts::HITBOX_PADDING;

/// What the first overlapping object means for the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Ripe bonus at this index: eat it
    Bonus(usize),
    /// Anything else at this index: run over
    Fatal(usize),
}

/// Shrunk player hitbox
pub fn player_hitbox(player: &Player) -> Rect {
    player.rect().inset(HITBOX_PADDING)
}

/// Object hitbox: scaled around its center, then shrunk
pub fn object_hitbox(object: &FallingObject) -> Rect {
    object.rect().scaled(object.scale).inset(HITBOX_PADDING)
}

/// Find the first object touching the player, newest first.
///
/// Only one contact is reported per tick; a ripe bonus found first hides any
/// fatal overlap further down the list until the next tick.
pub fn find_contact(player: &Player, objects: &[FallingObject]) -> Option<Contact> {
    let hitbox = player_hitbox(player);
    objects
        .iter()
        .enumerate()
        .rev()
        .find(|(_, obj)| hitbox.overlaps(&object_hitbox(obj)))
        .map(|(i, obj)| {
            if obj.is_edible() {
                Contact::Bonus(i)
            } else {
                Contact::Fatal(i)
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::ObjectKind;
    use glam::Vec2;

    fn object_at(id: u32, center: Vec2, kind: ObjectKind) -> FallingObject {
        let mut obj = FallingObject::new(id, 0.0, 30.0, 3.0, kind);
        obj.pos = center - Vec2::new(15.0, OBJECT_HEIGHT / 2.0);
        obj
    }

    #[test]
    fn test_object_hitbox_scales_then_insets() {
        let mut obj = FallingObject::new(1, 100.0, 30.0, 3.0, ObjectKind::Normal);
        obj.pos.y = 200.0;
        obj.scale = 2.0;
        let hb = object_hitbox(&obj);
        // 60x60 around (115, 215), minus 8 on each side
        assert!((hb.w - 44.0).abs() < 0.001);
        assert!((hb.h - 44.0).abs() < 0.001);
        assert!((hb.center().x - 115.0).abs() < 0.001);
    }

    #[test]
    fn test_no_contact_when_apart() {
        let player = Player::default();
        let obj = object_at(1, Vec2::new(50.0, 100.0), ObjectKind::Normal);
        assert_eq!(find_contact(&player, &[obj]), None);
    }

    #[test]
    fn test_graze_inside_padding_is_forgiven() {
        let player = Player::default();
        let pr = player.rect();
        // Unscaled 30x30 box with scale 1 touching the player's left edge by 4px
        let mut obj = FallingObject::new(1, pr.x - 26.0, 30.0, 3.0, ObjectKind::Normal);
        obj.pos.y = pr.y;
        obj.scale = 1.0;
        assert!(obj.rect().overlaps(&pr));
        assert_eq!(find_contact(&player, &[obj]), None);
    }

    #[test]
    fn test_ripe_bonus_is_edible_contact() {
        let player = Player::default();
        let mut obj = object_at(1, player.rect().center(), ObjectKind::Bonus);
        obj.transformed = true;
        assert_eq!(find_contact(&player, &[obj]), Some(Contact::Bonus(0)));
    }

    #[test]
    fn test_unripe_bonus_and_growing_are_fatal() {
        let player = Player::default();
        let center = player.rect().center();
        let bonus = object_at(1, center, ObjectKind::Bonus);
        assert_eq!(find_contact(&player, &[bonus]), Some(Contact::Fatal(0)));

        let mut growing = object_at(2, center, ObjectKind::Growing);
        growing.transformed = true;
        assert_eq!(find_contact(&player, &[growing]), Some(Contact::Fatal(0)));
    }

    #[test]
    fn test_newest_object_wins() {
        let player = Player::default();
        let center = player.rect().center();
        let normal = object_at(1, center, ObjectKind::Normal);
        let mut bonus = object_at(2, center, ObjectKind::Bonus);
        bonus.transformed = true;

        // Bonus inserted last is seen first
        let objects = vec![normal.clone(), bonus.clone()];
        assert_eq!(find_contact(&player, &objects), Some(Contact::Bonus(1)));

        let objects = vec![bonus, normal];
        assert_eq!(find_contact(&player, &objects), Some(Contact::Fatal(1)));
    }
}
